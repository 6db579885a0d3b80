#![forbid(unsafe_code)]

//! Core: terminal lifecycle, geometry, and input events.

pub mod event;
pub mod geometry;
pub mod terminal_session;
