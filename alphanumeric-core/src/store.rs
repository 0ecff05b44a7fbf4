//! Persisted message record.
//!
//! ```text
//! base + 0          length L (1..=128)
//! base + 1 ..= L    message bytes
//! base + L + 1      0x00 terminator
//! ```

use embedded_storage::Storage;

use crate::message::{is_reserved, Message, MAX_MESSAGE_LEN};

pub const TERMINATOR: u8 = 0x00;

/// Room a record needs in the underlying storage.
pub const RECORD_LEN: usize = MAX_MESSAGE_LEN + 2;

/// Storage that stages writes and makes them durable together.
///
/// Flash has to erase a whole sector to change a byte, so a record is written in three
/// ordered steps and then committed once.
pub trait Commit: Storage {
    fn commit(&mut self) -> Result<(), Self::Error>;
}

pub struct MessageStore<S> {
    storage: S,
    base: u32,
}

impl<S: Commit> MessageStore<S> {
    pub fn new(storage: S, base: u32) -> Self {
        Self { storage, base }
    }

    pub fn into_inner(self) -> S {
        self.storage
    }

    /// Reads the stored message, or the default message if the record is missing or damaged.
    pub fn load(&mut self) -> Result<Message, S::Error> {
        Ok(self.stored()?.unwrap_or_default())
    }

    fn stored(&mut self) -> Result<Option<Message>, S::Error> {
        let mut len = [0u8; 1];
        self.storage.read(self.base, &mut len)?;
        let len = usize::from(len[0]);
        if !(1..=MAX_MESSAGE_LEN).contains(&len) {
            #[cfg(feature = "defmt")]
            defmt::debug!("stored length {} out of range", len);
            return Ok(None);
        }

        let mut buffer = [0u8; MAX_MESSAGE_LEN];
        let text = &mut buffer[..len];
        self.storage.read(self.base + 1, text)?;
        if text.iter().copied().any(is_reserved) {
            #[cfg(feature = "defmt")]
            defmt::debug!("stored message ends early");
            return Ok(None);
        }
        Ok(Message::new(text).ok())
    }

    /// Writes length, then text, then terminator, and commits once.
    ///
    /// Does nothing if `message` is already the stored record.
    pub fn save(&mut self, message: &Message) -> Result<(), S::Error> {
        if self.stored()?.as_ref() == Some(message) {
            return Ok(());
        }
        let text = message.as_bytes();
        let len = text.len() as u8;
        self.storage.write(self.base, &[len])?;
        self.storage.write(self.base + 1, text)?;
        self.storage
            .write(self.base + 1 + u32::from(len), &[TERMINATOR])?;
        self.storage.commit()
    }
}
