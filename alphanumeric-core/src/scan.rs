//! Multiplexed refresh of the four digits.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorKind, OutputPin};
use fugit::MillisDurationU32;

use crate::config::Config;
use crate::display::Display;
use crate::glyph::Glyph;
use crate::shift::ShiftRegister;

pub const DIGIT_COUNT: usize = 4;

/// Message index shown on `digit` while the window starts at `offset`.
///
/// Digit 0 is wired as the rightmost position, so it shows the last character of the window.
pub fn digit_index(offset: usize, digit: usize, len: usize) -> usize {
    (offset + DIGIT_COUNT - 1 - digit) % len
}

/// Where the visible window is and how long it has been there.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanState {
    offset: usize,
    loops: u8,
}

impl ScanState {
    pub const fn new() -> Self {
        Self { offset: 0, loops: 0 }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn loops(&self) -> u8 {
        self.loops
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Pulls the offset back inside a message of `len` bytes.
    pub fn clamp(&mut self, len: usize) {
        self.offset = if len == 0 { 0 } else { self.offset % len };
    }

    /// Counts a finished frame. Returns `true` when the window moved.
    pub fn end_frame(&mut self, len: usize, frames_per_step: u8) -> bool {
        self.loops = self.loops.saturating_add(1);
        if self.loops < frames_per_step {
            return false;
        }
        self.loops = 0;
        self.offset = (self.offset + 1) % len.max(1);
        true
    }
}

/// Drives the display chain: one transmission and one settle delay per digit.
pub struct ScanOut<DATA, CLOCK, LATCH> {
    register: ShiftRegister<DATA, CLOCK, LATCH>,
    settle: MillisDurationU32,
    frames_per_step: u8,
}

impl<DATA, CLOCK, LATCH> ScanOut<DATA, CLOCK, LATCH>
where
    DATA: OutputPin,
    CLOCK: OutputPin,
    LATCH: OutputPin,
{
    pub fn new(register: ShiftRegister<DATA, CLOCK, LATCH>, config: &Config) -> Self {
        Self {
            register,
            settle: config.settle,
            frames_per_step: config.frames_per_step,
        }
    }

    /// Clears every digit.
    pub fn blank(&mut self) -> Result<(), ErrorKind> {
        for digit in 0..DIGIT_COUNT as u8 {
            self.register.transmit(Glyph::BLANK.with_digit(digit))?;
        }
        Ok(())
    }

    /// Shows every digit once, then advances the frame counter.
    ///
    /// Each digit is held for the settle time with nothing else on the wire. Returns `true`
    /// when this frame moved the window.
    pub fn refresh<D: DelayNs>(
        &mut self,
        display: &mut Display,
        delay: &mut D,
    ) -> Result<bool, ErrorKind> {
        display.clamp();
        for word in display.frame_words() {
            self.register.transmit(word)?;
            delay.delay_ms(self.settle.to_millis());
        }
        let stepped = display.end_frame(self.frames_per_step);
        #[cfg(feature = "defmt")]
        if stepped {
            defmt::trace!("window offset {}", display.scan().offset());
        }
        Ok(stepped)
    }
}
