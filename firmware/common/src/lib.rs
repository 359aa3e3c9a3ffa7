//! Retained-mode UI core for the e-bike display.
//!
//! This crate holds everything that does not touch a specific board:
//!
//! - [`field`]: the polymorphic [`Field`] model and its arena
//! - [`layout`]: placement of one field on one screen
//! - [`graph`]: bounded ring buffer of samples behind graph fields
//! - [`render`]: the dirty-tracking renderer and its per-variant widgets
//! - [`navigator`], [`editor`], [`customize`]: the interaction state machines
//! - [`screen`], [`ui`]: screens with lifecycle hooks and the screen manager
//! - [`app`]: the e-bike screens, warnings and trip accounting
//!
//! # no_std Compatibility
//!
//! The crate is `no_std` and allocation free. Tests run on the host with
//! `std` enabled (via `cfg_attr`).

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub(crate) mod logging;

pub mod app;
pub mod buttons;
pub mod canvas;
pub mod colors;
pub mod config;
pub mod customize;
pub mod editor;
pub mod error;
pub mod field;
pub mod graph;
pub mod layout;
pub mod navigator;
pub mod render;
pub mod screen;
pub mod ui;
pub mod units;

mod widgets;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used items
pub use buttons::{ButtonDecoder, ButtonEvents, Buttons};
pub use canvas::Canvas;
pub use config::{DisplayProfile, C850, SW102};
pub use error::UiError;
pub use field::{Field, FieldArena, FieldId};
pub use layout::{AlignX, AlignY, Border, ColorOp, FieldLayout};
pub use screen::{Screen, ScreenHooks, ScreenId};
pub use ui::Ui;
pub use units::Units;
