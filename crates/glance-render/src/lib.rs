#![forbid(unsafe_code)]

//! Render kernel: cells, buffers, frames with hit regions, diffs, and the
//! ANSI presenter.

pub mod buffer;
pub mod cell;
pub mod diff;
pub mod frame;
pub mod presenter;
