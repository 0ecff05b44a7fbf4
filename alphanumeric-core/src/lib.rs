//! Glyph encoding and multiplexed scan-out for a four digit, 14-segment alphanumeric display
//! fed through a shift-register chain.
//!
//! All hardware access goes through `embedded-hal`, `embedded-io` and `embedded-storage`
//! traits, so the same code runs on the Pico and against host test doubles.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod console;
pub mod controller;
pub mod display;
pub mod error;
pub mod glyph;
pub mod message;
pub mod scan;
pub mod shift;
pub mod store;

#[cfg(test)]
mod mock;

pub use config::Config;
pub use console::LineReader;
pub use controller::{Controller, Step};
pub use display::Display;
pub use error::Error;
pub use glyph::{translate, Glyph};
pub use message::{Message, MessageError, DEFAULT_MESSAGE, MAX_MESSAGE_LEN};
pub use scan::{ScanOut, ScanState, DIGIT_COUNT};
pub use shift::ShiftRegister;
pub use store::{Commit, MessageStore};
