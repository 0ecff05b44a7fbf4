//! Compile-time timing and layout settings.

use fugit::MillisDurationU32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// How long each digit stays lit before the next one is selected.
    pub settle: MillisDurationU32,
    /// Full refresh frames shown before the window moves one character.
    pub frames_per_step: u8,
    /// Longest gap between console bytes that still counts as one message.
    pub inter_byte: MillisDurationU32,
    /// Offset of the message record inside the persistent store.
    pub store_base: u32,
}

impl Config {
    pub const DEFAULT: Self = Self {
        settle: MillisDurationU32::millis(6),
        frames_per_step: 10,
        inter_byte: MillisDurationU32::millis(300),
        store_base: 0,
    };

    /// Time one character stays in the same position.
    pub fn step_duration(&self) -> MillisDurationU32 {
        let digits = crate::scan::DIGIT_COUNT as u32;
        MillisDurationU32::millis(
            self.settle.to_millis() * digits * u32::from(self.frames_per_step.max(1)),
        )
    }
}
