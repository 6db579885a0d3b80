use glance_core::event::{Event, KeyCode};
use glance_render::frame::Frame;
use glance_runtime::program::{Cmd, Model};
use glance_runtime::simulator::{CmdRecord, ProgramSimulator};

/// Records the order in which it sees messages.
#[derive(Default)]
struct Journal {
    seen: Vec<&'static str>,
}

#[derive(Debug)]
enum Step {
    Leave,
    Note(&'static str),
    Nothing,
}

impl From<Event> for Step {
    fn from(event: Event) -> Self {
        match event {
            Event::Key(key) if key.is_char('q') => Step::Leave,
            Event::Key(_) => Step::Note("key"),
            _ => Step::Nothing,
        }
    }
}

impl Model for Journal {
    type Message = Step;

    fn update(&mut self, msg: Step) -> Cmd<Step> {
        match msg {
            Step::Leave => Cmd::batch(vec![
                Cmd::msg(Step::Note("before")),
                Cmd::quit(),
                Cmd::msg(Step::Note("after")),
            ]),
            Step::Note(what) => {
                self.seen.push(what);
                Cmd::none()
            }
            Step::Nothing => Cmd::none(),
        }
    }

    fn view(&self, _frame: &mut Frame) {}
}

#[test]
fn commands_after_quit_in_a_batch_are_skipped() {
    let mut sim = ProgramSimulator::new(Journal::default());
    sim.send(Step::Leave);

    assert!(!sim.is_running());
    assert_eq!(sim.model().seen, ["before"]);
    assert_eq!(
        sim.command_log(),
        &[
            CmdRecord::Batch(3),
            CmdRecord::Msg,
            CmdRecord::None,
            CmdRecord::Quit,
        ]
    );
}

#[test]
fn input_after_quit_never_reaches_the_model() {
    let mut sim = ProgramSimulator::new(Journal::default());
    sim.inject_events(&[
        Event::key(KeyCode::Char('x')),
        Event::key(KeyCode::Char('q')),
        Event::key(KeyCode::Char('x')),
    ]);
    assert_eq!(sim.model().seen, ["key", "before"]);

    sim.send(Step::Note("late"));
    assert_eq!(sim.model().seen, ["key", "before"]);
}
