//! Board glue for the e-bike display on a Pico 2 - testable on the host.
//!
//! This library contains the logic of the firmware that does not touch the
//! hardware. The binary (`main.rs`) uses it and adds the embedded-specific code.
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test -p ebike-display-pico2 --lib --target x86_64-unknown-linux-gnu  # Linux/macOS
//! cargo test -p ebike-display-pico2 --lib --target x86_64-pc-windows-msvc    # Windows
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), allowing use of the standard
//! test framework while the actual firmware runs as `no_std`.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]

// Button pin sampling
pub mod input;

// Placement of the UI on the panel
pub mod panel;

// Frame statistics for the log
pub mod stats;
