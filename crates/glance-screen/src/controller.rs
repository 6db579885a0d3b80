#![forbid(unsafe_code)]

//! The screen controller.
//!
//! Owns the [`ViewState`] and the font gate. Until both fonts resolve the
//! screen is a spinner and only quit gets through; afterwards keys and
//! clicks flip the two flags and the view follows [`render`].

use std::sync::Arc;
use std::time::Duration;

use glance_core::event::{Event, KeyCode, MouseEvent};
use glance_render::frame::{Frame, HitId};
use glance_runtime::{Cmd, Model};
use tracing::{debug, debug_span, error, info, info_span};

use crate::assets::{AssetError, AssetSource, FontSet, load_fonts};
use crate::plan::{RenderPlan, render};
use crate::state::{Capabilities, ViewState};
use crate::view::{DARK_MODE_HIT, EXPAND_HIT, paint, paint_loading};

/// Spinner cadence while fonts load.
pub const SPINNER_INTERVAL: Duration = Duration::from_millis(100);

/// Messages for [`ScreenController`].
#[derive(Debug)]
pub enum Msg {
    ToggleExpanded,
    ToggleDarkMode,
    /// Result of the font task started at init.
    FontsLoaded(Result<FontSet, AssetError>),
    Tick,
    Quit,
    Noop,
}

impl From<Event> for Msg {
    fn from(event: Event) -> Self {
        match event {
            Event::Key(key) if !key.is_press() => Msg::Noop,
            Event::Key(key) if key.ctrl() => {
                if key.is_char('c') {
                    Msg::Quit
                } else {
                    Msg::Noop
                }
            }
            Event::Key(key) => match key.code {
                KeyCode::Char('q') | KeyCode::Escape => Msg::Quit,
                KeyCode::Char('m') | KeyCode::Char(' ') | KeyCode::Enter => Msg::ToggleExpanded,
                KeyCode::Char('d') => Msg::ToggleDarkMode,
                _ => Msg::Noop,
            },
            Event::Tick => Msg::Tick,
            _ => Msg::Noop,
        }
    }
}

/// Whether the fonts have resolved.
///
/// Moves from `Loading` to `Ready` once and never back. A failed load
/// leaves the screen in `Loading` for good.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadPhase {
    Loading,
    Ready(FontSet),
}

/// The greeting screen.
pub struct ScreenController {
    state: ViewState,
    caps: Capabilities,
    phase: LoadPhase,
    assets: Arc<dyn AssetSource>,
    spinner: usize,
}

impl ScreenController {
    /// A freshly mounted screen: collapsed, light, loading.
    pub fn new(caps: Capabilities, assets: Arc<dyn AssetSource>) -> Self {
        Self {
            state: ViewState::default(),
            caps,
            phase: LoadPhase::Loading,
            assets,
            spinner: 0,
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn capabilities(&self) -> Capabilities {
        self.caps
    }

    pub fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.phase, LoadPhase::Ready(_))
    }

    /// Current spinner frame index.
    pub fn spinner_step(&self) -> usize {
        self.spinner
    }

    /// Show or hide the detail panel.
    pub fn toggle_expanded(&mut self) {
        self.state.toggle_expanded();
        debug!(expanded = self.state.expanded, "detail panel toggled");
    }

    /// Switch palettes. Ignored when dark mode is unsupported.
    pub fn toggle_dark_mode(&mut self) {
        if !self.caps.supports_dark_mode {
            debug!("dark mode unsupported, toggle ignored");
            return;
        }
        self.state.toggle_dark_mode();
        debug!(dark_mode = self.state.dark_mode, "palette toggled");
    }

    /// The plan for the current state.
    pub fn render(&self) -> RenderPlan {
        render(self.state, self.caps)
    }

    fn fonts_loaded(&mut self, result: Result<FontSet, AssetError>) {
        match result {
            Ok(fonts) => {
                if self.is_ready() {
                    return;
                }
                info!(
                    regular = fonts.regular.asset.name(),
                    bold = fonts.bold.asset.name(),
                    "fonts loaded"
                );
                self.phase = LoadPhase::Ready(fonts);
            }
            Err(err) => {
                error!(error = %err, "font loading failed, screen stays on the loading indicator");
            }
        }
    }
}

impl Model for ScreenController {
    type Message = Msg;

    fn init(&mut self) -> Cmd<Msg> {
        let _span = info_span!(
            "glance.screen.init",
            supports_dark_mode = self.caps.supports_dark_mode
        )
        .entered();

        let assets = Arc::clone(&self.assets);
        Cmd::batch(vec![
            Cmd::task_named("load-fonts", move || {
                Msg::FontsLoaded(load_fonts(assets.as_ref()))
            }),
            Cmd::tick(SPINNER_INTERVAL),
        ])
    }

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        let _span = debug_span!("glance.screen.update", ready = self.is_ready()).entered();

        match msg {
            Msg::Quit => {
                info!("quit requested");
                return Cmd::quit();
            }
            Msg::Tick => {
                if self.is_ready() {
                    return Cmd::none();
                }
                self.spinner = self.spinner.wrapping_add(1);
                return Cmd::tick(SPINNER_INTERVAL);
            }
            Msg::FontsLoaded(result) => self.fonts_loaded(result),
            Msg::Noop => {}
            _ if !self.is_ready() => debug!(?msg, "input ignored while loading"),
            Msg::ToggleExpanded => self.toggle_expanded(),
            Msg::ToggleDarkMode => self.toggle_dark_mode(),
        }
        Cmd::none()
    }

    fn view(&self, frame: &mut Frame) {
        match &self.phase {
            LoadPhase::Loading => paint_loading(frame, self.spinner),
            LoadPhase::Ready(fonts) => paint(frame, &self.render(), fonts, self.assets.as_ref()),
        }
    }

    fn on_hit(&self, id: HitId, _mouse: &MouseEvent) -> Option<Msg> {
        if !self.is_ready() {
            return None;
        }
        match id {
            EXPAND_HIT => Some(Msg::ToggleExpanded),
            DARK_MODE_HIT => Some(Msg::ToggleDarkMode),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{BundledAssets, FontAsset, FontFace};
    use glance_core::event::{KeyEvent, Modifiers};

    struct Broken;

    impl AssetSource for Broken {
        fn load_font(&self, font: FontAsset) -> Result<FontFace, AssetError> {
            Err(AssetError::Missing {
                name: font.name(),
                path: format!("/nowhere/{}.ttf", font.name()).into(),
            })
        }
    }

    fn ready(caps: Capabilities) -> ScreenController {
        let mut screen = ScreenController::new(caps, Arc::new(BundledAssets));
        screen.fonts_loaded(load_fonts(&BundledAssets));
        screen
    }

    #[test]
    fn keys_map_to_messages() {
        let msg = |code| Msg::from(Event::key(code));
        assert!(matches!(msg(KeyCode::Char('m')), Msg::ToggleExpanded));
        assert!(matches!(msg(KeyCode::Enter), Msg::ToggleExpanded));
        assert!(matches!(msg(KeyCode::Char(' ')), Msg::ToggleExpanded));
        assert!(matches!(msg(KeyCode::Char('d')), Msg::ToggleDarkMode));
        assert!(matches!(msg(KeyCode::Char('q')), Msg::Quit));
        assert!(matches!(msg(KeyCode::Escape), Msg::Quit));
        assert!(matches!(msg(KeyCode::Char('x')), Msg::Noop));

        let ctrl_c = KeyEvent::new(KeyCode::Char('c')).with_modifiers(Modifiers::CTRL);
        assert!(matches!(Msg::from(Event::Key(ctrl_c)), Msg::Quit));
        let ctrl_m = KeyEvent::new(KeyCode::Char('m')).with_modifiers(Modifiers::CTRL);
        assert!(matches!(Msg::from(Event::Key(ctrl_m)), Msg::Noop));
    }

    #[test]
    fn key_release_is_ignored() {
        let release =
            KeyEvent::new(KeyCode::Char('m')).with_kind(glance_core::event::KeyEventKind::Release);
        assert!(matches!(Msg::from(Event::Key(release)), Msg::Noop));
    }

    #[test]
    fn toggles_change_state_once_ready() {
        let mut screen = ready(Capabilities::DARK_CAPABLE);
        screen.update(Msg::ToggleExpanded);
        screen.update(Msg::ToggleDarkMode);
        assert_eq!(
            screen.state(),
            ViewState {
                expanded: true,
                dark_mode: true
            }
        );
    }

    #[test]
    fn toggles_ignored_while_loading() {
        let mut screen = ScreenController::new(Capabilities::DARK_CAPABLE, Arc::new(BundledAssets));
        screen.update(Msg::ToggleExpanded);
        screen.update(Msg::ToggleDarkMode);
        assert_eq!(screen.state(), ViewState::default());
        assert!(matches!(screen.update(Msg::Quit), Cmd::Quit));
    }

    #[test]
    fn plain_variant_ignores_dark_toggle() {
        let mut screen = ready(Capabilities::PLAIN);
        screen.toggle_dark_mode();
        assert!(!screen.state().dark_mode);
    }

    #[test]
    fn failed_load_stays_loading() {
        let mut screen = ScreenController::new(Capabilities::PLAIN, Arc::new(Broken));
        screen.fonts_loaded(load_fonts(&Broken));
        assert_eq!(screen.phase(), &LoadPhase::Loading);
    }

    #[test]
    fn ready_is_sticky() {
        let mut screen = ready(Capabilities::PLAIN);
        screen.fonts_loaded(load_fonts(&Broken));
        assert!(screen.is_ready());
    }

    #[test]
    fn tick_rearms_only_while_loading() {
        let mut screen = ScreenController::new(Capabilities::PLAIN, Arc::new(BundledAssets));
        assert!(matches!(screen.update(Msg::Tick), Cmd::Tick(d) if d == SPINNER_INTERVAL));
        assert_eq!(screen.spinner_step(), 1);

        screen.fonts_loaded(load_fonts(&BundledAssets));
        assert!(screen.update(Msg::Tick).is_none());
        assert_eq!(screen.spinner_step(), 1);
    }

    #[test]
    fn hits_resolve_only_when_ready() {
        let mouse = MouseEvent::new(
            glance_core::event::MouseEventKind::Down(glance_core::event::MouseButton::Left),
            0,
            0,
        );
        let loading = ScreenController::new(Capabilities::PLAIN, Arc::new(BundledAssets));
        assert!(loading.on_hit(EXPAND_HIT, &mouse).is_none());

        let screen = ready(Capabilities::DARK_CAPABLE);
        assert!(matches!(
            screen.on_hit(EXPAND_HIT, &mouse),
            Some(Msg::ToggleExpanded)
        ));
        assert!(matches!(
            screen.on_hit(DARK_MODE_HIT, &mouse),
            Some(Msg::ToggleDarkMode)
        ));
        assert!(screen.on_hit(HitId::new(99), &mouse).is_none());
    }
}
