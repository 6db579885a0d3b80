#![forbid(unsafe_code)]

//! Elm-style program runtime.
//!
//! A [`Model`] owns application state. The runtime feeds it messages
//! converted from terminal events, executes the [`Cmd`]s it returns, and
//! repaints through [`Model::view`] whenever something changed.
//!
//! # Example
//!
//! ```ignore
//! use glance_runtime::{Cmd, Model, Program, ProgramConfig};
//!
//! struct Counter { count: i32 }
//!
//! enum Msg { Increment, Quit, Other }
//!
//! impl From<Event> for Msg { /* ... */ }
//!
//! impl Model for Counter {
//!     type Message = Msg;
//!
//!     fn update(&mut self, msg: Msg) -> Cmd<Msg> {
//!         match msg {
//!             Msg::Increment => { self.count += 1; Cmd::none() }
//!             Msg::Quit => Cmd::quit(),
//!             Msg::Other => Cmd::none(),
//!         }
//!     }
//!
//!     fn view(&self, frame: &mut Frame) {
//!         // paint self.count
//!     }
//! }
//!
//! Program::with_config(Counter { count: 0 }, ProgramConfig::default())?.run()?;
//! ```

use std::io::{self, Stdout};
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use glance_core::event::{Event, MouseEvent};
use glance_core::terminal_session::{SessionOptions, TerminalSession};
use glance_render::buffer::Buffer;
use glance_render::diff::BufferDiff;
use glance_render::frame::{Frame, HitGrid, HitId};
use glance_render::presenter::Presenter;
use tracing::{debug, debug_span, info, info_span};

/// The application model.
///
/// `update` is the only place state changes; `view` must be a pure
/// function of the model.
pub trait Model: Sized {
    /// The message type for this model.
    ///
    /// Must be convertible from terminal events.
    type Message: From<Event> + Send + 'static;

    /// Initialize the model with startup commands.
    ///
    /// Called once when the program starts.
    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::none()
    }

    /// Update the model in response to a message.
    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message>;

    /// Render the current state to a frame.
    fn view(&self, frame: &mut Frame);

    /// Map a primary-button press on a hit region registered by the last
    /// `view` into a message.
    ///
    /// Returning `None` lets the raw mouse event through via `From<Event>`.
    fn on_hit(&self, _id: HitId, _mouse: &MouseEvent) -> Option<Self::Message> {
        None
    }
}

/// Commands represent side effects to be executed by the runtime.
#[derive(Default)]
pub enum Cmd<M> {
    /// No operation.
    #[default]
    None,
    /// Quit the application.
    Quit,
    /// Execute multiple commands in order.
    Batch(Vec<Cmd<M>>),
    /// Send a message to the model.
    Msg(M),
    /// Deliver one [`Event::Tick`] after the duration.
    ///
    /// Ticks are one-shot; a model that wants a steady cadence schedules
    /// the next tick when it handles the current one. A newer schedule
    /// replaces a pending one.
    Tick(Duration),
    /// Run a blocking closure on a background thread; its return value is
    /// sent back to the model as a message.
    Task(Option<String>, Box<dyn FnOnce() -> M + Send>),
}

impl<M: std::fmt::Debug> std::fmt::Debug for Cmd<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Quit => write!(f, "Quit"),
            Self::Batch(cmds) => f.debug_tuple("Batch").field(cmds).finish(),
            Self::Msg(m) => f.debug_tuple("Msg").field(m).finish(),
            Self::Tick(d) => f.debug_tuple("Tick").field(d).finish(),
            Self::Task(name, _) => f.debug_struct("Task").field("name", name).finish(),
        }
    }
}

impl<M> Cmd<M> {
    /// Create a no-op command.
    #[inline]
    pub fn none() -> Self {
        Self::None
    }

    /// Create a quit command.
    #[inline]
    pub fn quit() -> Self {
        Self::Quit
    }

    /// Create a message command.
    #[inline]
    pub fn msg(m: M) -> Self {
        Self::Msg(m)
    }

    /// Create a tick command.
    #[inline]
    pub fn tick(duration: Duration) -> Self {
        Self::Tick(duration)
    }

    /// Create a batch of commands.
    pub fn batch(cmds: Vec<Self>) -> Self {
        let mut cmds: Vec<Self> = cmds.into_iter().filter(|c| !c.is_none()).collect();
        match cmds.len() {
            0 => Self::None,
            1 => cmds.pop().unwrap_or_default(),
            _ => Self::Batch(cmds),
        }
    }

    /// Create a named background task command.
    pub fn task_named<F>(name: impl Into<String>, f: F) -> Self
    where
        F: FnOnce() -> M + Send + 'static,
    {
        Self::Task(Some(name.into()), Box::new(f))
    }

    /// Whether this is [`Cmd::None`].
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Return a stable name for tracing.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Quit => "Quit",
            Self::Batch(_) => "Batch",
            Self::Msg(_) => "Msg",
            Self::Tick(_) => "Tick",
            Self::Task(..) => "Task",
        }
    }
}

/// Where on the terminal the UI lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenMode {
    /// Full screen on the alternate buffer.
    #[default]
    AltScreen,
    /// Bottom `ui_height` rows of the main screen, keeping scrollback.
    Inline {
        /// Rows reserved for the UI.
        ui_height: u16,
    },
}

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct ProgramConfig {
    /// Screen mode (inline or alternate screen).
    pub screen_mode: ScreenMode,
    /// Enable mouse support.
    pub mouse: bool,
    /// Upper bound on how long one input poll blocks.
    pub poll_timeout: Duration,
    /// Quit automatically after this long.
    pub exit_after: Option<Duration>,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            screen_mode: ScreenMode::AltScreen,
            mouse: true,
            poll_timeout: Duration::from_millis(100),
            exit_after: None,
        }
    }
}

/// Drives a [`Model`] against the real terminal.
pub struct Program<M: Model> {
    model: M,
    session: TerminalSession,
    presenter: Presenter<Stdout>,
    config: ProgramConfig,
    running: bool,
    dirty: bool,
    width: u16,
    height: u16,
    previous: Option<Buffer>,
    hits: Option<HitGrid>,
    next_tick: Option<Instant>,
    task_sender: mpsc::Sender<M::Message>,
    task_receiver: mpsc::Receiver<M::Message>,
    task_handles: Vec<JoinHandle<()>>,
    started: Instant,
}

impl<M: Model> Program<M> {
    /// Take over the terminal for `model`.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal session cannot be set up.
    pub fn with_config(model: M, config: ProgramConfig) -> io::Result<Self> {
        let session = TerminalSession::new(SessionOptions {
            alternate_screen: matches!(config.screen_mode, ScreenMode::AltScreen),
            mouse_capture: config.mouse,
        })?;
        let (width, height) = session.size()?;
        let (task_sender, task_receiver) = mpsc::channel();

        let mut program = Self {
            model,
            session,
            presenter: Presenter::new(io::stdout()),
            config,
            running: true,
            dirty: true,
            width: width.max(1),
            height: height.max(1),
            previous: None,
            hits: None,
            next_tick: None,
            task_sender,
            task_receiver,
            task_handles: Vec::new(),
            started: Instant::now(),
        };
        program.reserve_inline_rows()?;
        Ok(program)
    }

    /// Run until the model quits.
    ///
    /// # Errors
    ///
    /// Propagates terminal I/O errors.
    pub fn run(&mut self) -> io::Result<()> {
        let cmd = {
            let _span = info_span!("glance.program.init").entered();
            self.model.init()
        };
        self.execute_cmd(cmd)?;
        self.render_frame()?;

        while self.running {
            if self.session.poll_event(self.effective_timeout())? {
                loop {
                    if let Some(event) = self.session.read_event()? {
                        self.handle_event(event)?;
                    }
                    if !self.running || !self.session.poll_event(Duration::ZERO)? {
                        break;
                    }
                }
            }

            self.process_task_results()?;
            self.reap_finished_tasks();

            if self.next_tick.is_some_and(|at| Instant::now() >= at) {
                self.next_tick = None;
                self.dispatch(M::Message::from(Event::Tick), "Tick")?;
            }

            if self
                .config
                .exit_after
                .is_some_and(|limit| self.started.elapsed() >= limit)
            {
                info!("exit-after deadline reached");
                self.running = false;
            }

            if self.dirty && self.running {
                self.render_frame()?;
            }
        }

        self.reap_finished_tasks();
        Ok(())
    }

    fn effective_timeout(&self) -> Duration {
        let mut timeout = self.config.poll_timeout;
        if let Some(at) = self.next_tick {
            timeout = timeout.min(at.saturating_duration_since(Instant::now()));
        }
        timeout
    }

    fn handle_event(&mut self, event: Event) -> io::Result<()> {
        if let Event::Resize { width, height } = event {
            self.width = width.max(1);
            self.height = height.max(1);
            self.previous = None;
            crossterm::execute!(
                io::stdout(),
                crossterm::terminal::Clear(crossterm::terminal::ClearType::All)
            )?;
        }

        if let Event::Mouse(mouse) = &event
            && mouse.is_left_down()
            && let Some(id) = self.hit_at(mouse)
            && let Some(msg) = self.model.on_hit(id, mouse)
        {
            debug!(hit = id.id(), "mouse press resolved to hit region");
            return self.dispatch(msg, "Hit");
        }

        self.dispatch(M::Message::from(event), "Event")
    }

    fn hit_at(&self, mouse: &MouseEvent) -> Option<HitId> {
        let origin = self.origin_y();
        let y = mouse.y.checked_sub(origin)?;
        self.hits.as_ref()?.hit_test(mouse.x, y)
    }

    fn dispatch(&mut self, msg: M::Message, source: &'static str) -> io::Result<()> {
        let cmd = {
            let _span = debug_span!("glance.program.update", source).entered();
            self.model.update(msg)
        };
        self.dirty = true;
        self.execute_cmd(cmd)
    }

    fn execute_cmd(&mut self, cmd: Cmd<M::Message>) -> io::Result<()> {
        if !cmd.is_none() {
            tracing::trace!(cmd = cmd.type_name(), "executing command");
        }
        match cmd {
            Cmd::None => {}
            Cmd::Quit => self.running = false,
            Cmd::Msg(m) => self.dispatch(m, "Cmd")?,
            Cmd::Batch(cmds) => {
                for c in cmds {
                    self.execute_cmd(c)?;
                    if !self.running {
                        break;
                    }
                }
            }
            Cmd::Tick(duration) => {
                self.next_tick = Some(Instant::now() + duration);
            }
            Cmd::Task(name, f) => {
                debug!(task = name.as_deref().unwrap_or("anonymous"), "spawning task");
                let sender = self.task_sender.clone();
                let handle = std::thread::spawn(move || {
                    let _ = sender.send(f());
                });
                self.task_handles.push(handle);
            }
        }
        Ok(())
    }

    fn process_task_results(&mut self) -> io::Result<()> {
        while let Ok(msg) = self.task_receiver.try_recv() {
            self.dispatch(msg, "Task")?;
            if !self.running {
                break;
            }
        }
        Ok(())
    }

    fn reap_finished_tasks(&mut self) {
        let (finished, remaining): (Vec<_>, Vec<_>) = self
            .task_handles
            .drain(..)
            .partition(JoinHandle::is_finished);
        self.task_handles = remaining;
        for handle in finished {
            if let Err(payload) = handle.join() {
                let msg = payload
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_owned())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic payload".to_owned());
                tracing::error!("spawned task panicked: {msg}");
            }
        }
    }

    fn ui_height(&self) -> u16 {
        match self.config.screen_mode {
            ScreenMode::AltScreen => self.height,
            ScreenMode::Inline { ui_height } => ui_height.clamp(1, self.height),
        }
    }

    fn origin_y(&self) -> u16 {
        self.height - self.ui_height()
    }

    fn reserve_inline_rows(&mut self) -> io::Result<()> {
        if matches!(self.config.screen_mode, ScreenMode::Inline { .. }) {
            crossterm::execute!(
                io::stdout(),
                crossterm::terminal::ScrollUp(self.ui_height())
            )?;
        }
        Ok(())
    }

    fn render_frame(&mut self) -> io::Result<()> {
        let _span = debug_span!("glance.program.render", width = self.width).entered();
        let mut frame = Frame::new(self.width, self.ui_height());
        self.model.view(&mut frame);

        let diff = match &self.previous {
            Some(prev)
                if prev.width() == frame.buffer.width()
                    && prev.height() == frame.buffer.height() =>
            {
                BufferDiff::compute(prev, &frame.buffer)
            }
            _ => BufferDiff::full(&frame.buffer),
        };

        self.presenter.set_origin(self.origin_y());
        self.presenter.present(&frame.buffer, &diff)?;

        let Frame { buffer, hit_grid } = frame;
        self.previous = Some(buffer);
        self.hits = Some(hit_grid);
        self.dirty = false;
        Ok(())
    }
}
