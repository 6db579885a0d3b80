#![forbid(unsafe_code)]

//! Runtime: the [`Model`] contract, commands, the terminal [`Program`]
//! loop, and a deterministic [`ProgramSimulator`] for tests.

pub mod program;
pub mod simulator;

pub use program::{Cmd, Model, Program, ProgramConfig, ScreenMode};
pub use simulator::{CmdRecord, ProgramSimulator};
