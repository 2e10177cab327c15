//! Control plane of the Lagoon effects controller.
//!
//! It is meant to run in a firmware with two loops running in different
//! frequencies, sharing a small set of independently updated fields. The
//! control loop owns all mutable state, the display loop only reads a
//! published frame of it.
//!
//! ```text
//!   [Pots] [CV] [Buttons]
//!     |     |      |
//!     V     V      V
//!   [ ControlLoop {Store} ] ----> [PWM] [Select lines]
//!              |
//!              | (Frame)
//!              V
//!       [ SharedFrame ]
//!              |
//!              V
//!       [ DisplayLoop ] --------> [OLED]
//! ```

#![cfg_attr(not(test), no_std)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_precision_loss)]

#[cfg(test)]
#[macro_use]
extern crate approx;

mod log;
mod mapping;

pub mod bank;
pub mod catalog;
pub mod frame;
pub mod input;
pub mod output;
pub mod scope;
pub mod selector;
pub mod settings;
pub mod store;
pub mod view;

pub use crate::frame::{Frame, ScopeFrame, SharedFrame};
pub use crate::input::snapshot::Snapshot;
pub use crate::output::{DesiredOutput, ScanRequest};
pub use crate::store::{Mode, Store};

/// Resolution of both the ADC inputs and the PWM outputs.
pub const ADC_MAX_VALUE: u16 = 4095;
