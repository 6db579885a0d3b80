#![forbid(unsafe_code)]

//! Headless driver for models.
//!
//! [`ProgramSimulator`] plays the runtime's part with no terminal attached.
//! Tasks run inline on the calling thread and a scheduled tick only fires
//! when the test calls [`ProgramSimulator::tick`], so every run is
//! reproducible.
//!
//! ```ignore
//! use glance_runtime::simulator::ProgramSimulator;
//!
//! let mut sim = ProgramSimulator::new(Screen::default());
//! sim.init();
//! sim.inject_event(Event::key(KeyCode::Char('d')));
//! let rows = sim.capture_frame(60, 20).to_text();
//! assert!(rows.contains("GOOD MORNING!"));
//! ```

use std::time::Duration;

use glance_core::event::Event;
use glance_render::buffer::Buffer;
use glance_render::frame::Frame;

use crate::program::{Cmd, Model};

/// One command the simulator carried out, in execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CmdRecord {
    None,
    Quit,
    Msg,
    /// A batch and how many commands it held.
    Batch(usize),
    Tick(Duration),
    /// A task and its name, run inline.
    Task(Option<String>),
}

/// Runs a [`Model`] in memory.
pub struct ProgramSimulator<M: Model> {
    model: M,
    /// Most recently captured frame; its hit grid resolves mouse presses.
    last_frame: Option<Frame>,
    command_log: Vec<CmdRecord>,
    running: bool,
    pending_tick: Option<Duration>,
}

impl<M: Model> ProgramSimulator<M> {
    /// Wrap `model`. Nothing runs until [`init`](Self::init).
    pub fn new(model: M) -> Self {
        Self {
            model,
            last_frame: None,
            command_log: Vec::new(),
            running: true,
            pending_tick: None,
        }
    }

    /// Run [`Model::init`] and whatever it returns.
    pub fn init(&mut self) {
        let cmd = self.model.init();
        self.execute_cmd(cmd);
    }

    /// Feed events in order, stopping early once the model quits.
    ///
    /// Left-button presses landing on a hit region of the last captured
    /// frame go through [`Model::on_hit`] first, as in the real runtime.
    pub fn inject_events(&mut self, events: &[Event]) {
        for event in events {
            if !self.running {
                break;
            }
            let msg = self
                .resolve_hit(event)
                .unwrap_or_else(|| M::Message::from(event.clone()));
            let cmd = self.model.update(msg);
            self.execute_cmd(cmd);
        }
    }

    pub fn inject_event(&mut self, event: Event) {
        self.inject_events(&[event]);
    }

    /// Deliver a message directly, skipping event conversion.
    pub fn send(&mut self, msg: M::Message) {
        if !self.running {
            return;
        }
        let cmd = self.model.update(msg);
        self.execute_cmd(cmd);
    }

    /// Deliver the pending tick, if one is scheduled.
    ///
    /// Returns `false` when no tick was pending.
    pub fn tick(&mut self) -> bool {
        if self.pending_tick.take().is_none() || !self.running {
            return false;
        }
        let cmd = self.model.update(M::Message::from(Event::Tick));
        self.execute_cmd(cmd);
        true
    }

    /// Paint the model into a fresh `width` x `height` frame and keep it
    /// for hit resolution.
    pub fn capture_frame(&mut self, width: u16, height: u16) -> &Buffer {
        let mut frame = Frame::new(width, height);
        self.model.view(&mut frame);
        &self.last_frame.insert(frame).buffer
    }

    /// The most recently captured frame, if any.
    pub fn last_frame(&self) -> Option<&Frame> {
        self.last_frame.as_ref()
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// `false` once a [`Cmd::Quit`] has run.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The tick delay currently scheduled, if any.
    pub fn pending_tick(&self) -> Option<Duration> {
        self.pending_tick
    }

    pub fn command_log(&self) -> &[CmdRecord] {
        &self.command_log
    }

    fn resolve_hit(&self, event: &Event) -> Option<M::Message> {
        let Event::Mouse(mouse) = event else {
            return None;
        };
        if !mouse.is_left_down() {
            return None;
        }
        let id = self.last_frame.as_ref()?.hit_test(mouse.x, mouse.y)?;
        self.model.on_hit(id, mouse)
    }

    fn execute_cmd(&mut self, cmd: Cmd<M::Message>) {
        match cmd {
            Cmd::None => {
                self.command_log.push(CmdRecord::None);
            }
            Cmd::Quit => {
                self.running = false;
                self.command_log.push(CmdRecord::Quit);
            }
            Cmd::Msg(m) => {
                self.command_log.push(CmdRecord::Msg);
                let cmd = self.model.update(m);
                self.execute_cmd(cmd);
            }
            Cmd::Batch(cmds) => {
                self.command_log.push(CmdRecord::Batch(cmds.len()));
                for c in cmds {
                    self.execute_cmd(c);
                    if !self.running {
                        break;
                    }
                }
            }
            Cmd::Tick(duration) => {
                self.pending_tick = Some(duration);
                self.command_log.push(CmdRecord::Tick(duration));
            }
            Cmd::Task(name, f) => {
                self.command_log.push(CmdRecord::Task(name));
                let msg = f();
                let cmd = self.model.update(msg);
                self.execute_cmd(cmd);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glance_core::event::{KeyCode, MouseEvent};
    use glance_core::geometry::Rect;
    use glance_render::cell::{PackedRgba, StyleFlags};
    use glance_render::frame::HitId;

    struct Counter {
        value: i32,
        ticks: u32,
        initialized: bool,
    }

    #[derive(Debug)]
    enum CounterMsg {
        Increment,
        Quit,
        Ticked,
        Ignore,
        Loaded(i32),
    }

    impl From<Event> for CounterMsg {
        fn from(event: Event) -> Self {
            match event {
                Event::Key(k) if k.code == KeyCode::Char('+') => CounterMsg::Increment,
                Event::Key(k) if k.code == KeyCode::Char('q') => CounterMsg::Quit,
                Event::Tick => CounterMsg::Ticked,
                _ => CounterMsg::Ignore,
            }
        }
    }

    const PLUS: HitId = HitId::new(1);

    impl Model for Counter {
        type Message = CounterMsg;

        fn init(&mut self) -> Cmd<Self::Message> {
            self.initialized = true;
            Cmd::batch(vec![
                Cmd::task_named("load", || CounterMsg::Loaded(10)),
                Cmd::tick(Duration::from_millis(50)),
            ])
        }

        fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message> {
            match msg {
                CounterMsg::Increment => {
                    self.value += 1;
                    Cmd::none()
                }
                CounterMsg::Quit => Cmd::quit(),
                CounterMsg::Ticked => {
                    self.ticks += 1;
                    Cmd::none()
                }
                CounterMsg::Ignore => Cmd::none(),
                CounterMsg::Loaded(v) => {
                    self.value = v;
                    Cmd::none()
                }
            }
        }

        fn view(&self, frame: &mut Frame) {
            let text = format!("[+] {}", self.value);
            let end = frame.print(0, 0, &text, PackedRgba::WHITE, StyleFlags::empty());
            frame.register_hit(Rect::new(0, 0, 3.min(end), 1), PLUS);
        }

        fn on_hit(&self, id: HitId, _mouse: &MouseEvent) -> Option<Self::Message> {
            (id == PLUS).then_some(CounterMsg::Increment)
        }
    }

    fn counter() -> ProgramSimulator<Counter> {
        ProgramSimulator::new(Counter {
            value: 0,
            ticks: 0,
            initialized: false,
        })
    }

    #[test]
    fn init_runs_tasks_synchronously() {
        let mut sim = counter();
        sim.init();
        assert!(sim.model().initialized);
        assert_eq!(sim.model().value, 10);
        assert_eq!(sim.pending_tick(), Some(Duration::from_millis(50)));
        assert!(
            sim.command_log()
                .contains(&CmdRecord::Task(Some("load".to_owned())))
        );
    }

    #[test]
    fn ticks_are_one_shot() {
        let mut sim = counter();
        sim.init();
        assert!(sim.tick());
        assert_eq!(sim.model().ticks, 1);
        assert!(!sim.tick());
    }

    #[test]
    fn key_events_route_through_from() {
        let mut sim = counter();
        sim.inject_event(Event::key(KeyCode::Char('+')));
        sim.inject_event(Event::key(KeyCode::Char('+')));
        assert_eq!(sim.model().value, 2);
    }

    #[test]
    fn clicks_resolve_against_last_frame() {
        let mut sim = counter();
        sim.inject_event(Event::click(1, 0));
        assert_eq!(sim.model().value, 0, "no frame captured yet");

        let buf = sim.capture_frame(10, 1);
        assert_eq!(buf.row_text(0).trim_end(), "[+] 0");
        sim.inject_event(Event::click(1, 0));
        sim.inject_event(Event::click(6, 0));
        assert_eq!(sim.model().value, 1);
    }

    #[test]
    fn quit_stops_processing() {
        let mut sim = counter();
        sim.inject_events(&[
            Event::key(KeyCode::Char('q')),
            Event::key(KeyCode::Char('+')),
        ]);
        assert!(!sim.is_running());
        assert_eq!(sim.model().value, 0);
        sim.send(CounterMsg::Increment);
        assert_eq!(sim.model().value, 0);
    }
}
