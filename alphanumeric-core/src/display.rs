//! State shared by the refresh loop and the console.

use crate::glyph::translate;
use crate::message::Message;
use crate::scan::{digit_index, ScanState, DIGIT_COUNT};

/// The message on show and the scroll position within it.
///
/// Owned by the control loop and handed by exclusive reference to both the refresh step
/// and the replacement step, so a swap can never land in the middle of a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Display {
    message: Message,
    scan: ScanState,
}

impl Display {
    pub fn new(message: Message) -> Self {
        Self {
            message,
            scan: ScanState::new(),
        }
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn scan(&self) -> ScanState {
        self.scan
    }

    /// Swaps in a new message and restarts the scroll from its first character.
    pub fn replace(&mut self, message: Message) {
        self.message = message;
        self.scan.reset();
    }

    pub(crate) fn clamp(&mut self) {
        self.scan.clamp(self.message.len());
    }

    pub(crate) fn end_frame(&mut self, frames_per_step: u8) -> bool {
        self.scan.end_frame(self.message.len(), frames_per_step)
    }

    /// The words the next frame transmits, digit 0 first.
    pub fn frame_words(&self) -> [u16; DIGIT_COUNT] {
        let offset = self.scan.offset();
        let len = self.message.len();
        core::array::from_fn(|digit| {
            let byte = self.message.byte_at(digit_index(offset, digit, len));
            translate(byte).with_digit(digit as u8)
        })
    }
}
