//! The steady-state loop body: refresh the display, then look for a new message.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_io::{Read, ReadReady, Write};

use crate::config::Config;
use crate::console::LineReader;
use crate::display::Display;
use crate::error::Error;
use crate::message::Message;
use crate::scan::ScanOut;
use crate::shift::ShiftRegister;
use crate::store::{Commit, MessageStore};

/// What one pass of [`Controller::step`] did besides refreshing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    Refreshed,
    Scrolled,
    Replaced,
}

pub struct Controller<DATA, CLOCK, LATCH, S> {
    display: Display,
    scan_out: ScanOut<DATA, CLOCK, LATCH>,
    reader: LineReader,
    store: MessageStore<S>,
}

impl<DATA, CLOCK, LATCH, S> Controller<DATA, CLOCK, LATCH, S>
where
    DATA: OutputPin,
    CLOCK: OutputPin,
    LATCH: OutputPin,
    S: Commit,
{
    /// Blanks the digits and loads the persisted message.
    pub fn new(
        register: ShiftRegister<DATA, CLOCK, LATCH>,
        storage: S,
        config: &Config,
    ) -> Result<Self, Error<S::Error>> {
        let mut scan_out = ScanOut::new(register, config);
        scan_out.blank()?;
        let mut store = MessageStore::new(storage, config.store_base);
        let message = store.load().map_err(Error::Storage)?;
        Ok(Self {
            display: Display::new(message),
            scan_out,
            reader: LineReader::new(config.inter_byte),
            store,
        })
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    /// One frame, then one look at the console.
    ///
    /// A new message takes effect before the next frame. It is shown even if persisting it
    /// fails; the storage error is still returned.
    pub fn step<C, D>(&mut self, console: &mut C, delay: &mut D) -> Result<Step, Error<S::Error>>
    where
        C: Read + ReadReady + Write,
        D: DelayNs,
    {
        let scrolled = self.scan_out.refresh(&mut self.display, delay)?;
        match self.reader.poll(console, delay)? {
            Some(message) => {
                self.replace(message)?;
                LineReader::acknowledge(console, self.display.message())?;
                Ok(Step::Replaced)
            }
            None if scrolled => Ok(Step::Scrolled),
            None => Ok(Step::Refreshed),
        }
    }

    /// Shows `message` from its first character and persists it.
    pub fn replace(&mut self, message: Message) -> Result<(), Error<S::Error>> {
        #[cfg(feature = "defmt")]
        defmt::info!("new message, {} bytes", message.len());
        self.display.replace(message);
        self.store.save(self.display.message()).map_err(Error::Storage)
    }
}
