//! Bit-banged synchronous serial out to a shift-register chain.

use embedded_hal::digital::{ErrorKind, OutputPin, PinState};

use crate::error::pin_error;

/// Data, clock and latch lines of a 74HC595 style chain.
pub struct ShiftRegister<DATA, CLOCK, LATCH> {
    data: DATA,
    clock: CLOCK,
    latch: LATCH,
}

impl<DATA, CLOCK, LATCH> ShiftRegister<DATA, CLOCK, LATCH>
where
    DATA: OutputPin,
    CLOCK: OutputPin,
    LATCH: OutputPin,
{
    pub fn new(data: DATA, clock: CLOCK, latch: LATCH) -> Self {
        Self { data, clock, latch }
    }

    /// Clocks out one byte, most significant bit first. Bits are sampled on the rising edge.
    pub fn shift_out(&mut self, byte: u8) -> Result<(), ErrorKind> {
        for bit in (0..8).rev() {
            let level = PinState::from(byte & (1 << bit) != 0);
            self.data.set_state(level).map_err(pin_error)?;
            self.clock.set_high().map_err(pin_error)?;
            self.clock.set_low().map_err(pin_error)?;
        }
        Ok(())
    }

    /// Sends a 16-bit word high byte first and latches it onto the parallel outputs.
    pub fn transmit(&mut self, word: u16) -> Result<(), ErrorKind> {
        let [high, low] = word.to_be_bytes();
        self.latch.set_low().map_err(pin_error)?;
        self.shift_out(high)?;
        self.shift_out(low)?;
        self.latch.set_high().map_err(pin_error)
    }
}
