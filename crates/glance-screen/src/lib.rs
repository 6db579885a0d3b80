#![forbid(unsafe_code)]

//! A single greeting screen.
//!
//! The screen shows a quote, a greeting with a fixed time readout and
//! location, and a button that swaps the quote for four calendar rows.
//! The dark-capable variant adds a switch between light and dark palettes.
//!
//! [`ScreenController`] owns the state and implements the runtime's
//! [`Model`](glance_runtime::Model); [`render`] maps state to a
//! [`RenderPlan`] and [`view`] paints it.

pub mod assets;
pub mod cli;
pub mod controller;
pub mod logging;
pub mod plan;
pub mod state;
pub mod view;

pub use assets::{AssetError, AssetSource, BundledAssets, DirAssets, FontAsset, ImageAsset};
pub use controller::{LoadPhase, Msg, ScreenController};
pub use plan::{Block, RenderPlan, render};
pub use state::{Capabilities, ViewState};
