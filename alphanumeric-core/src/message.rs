//! The text being scrolled.

use heapless::Vec;

/// Longest message the store and the console accept.
pub const MAX_MESSAGE_LEN: usize = 128;

/// Shown when nothing valid has been persisted yet.
pub const DEFAULT_MESSAGE: &[u8] = b"HELLO WORLD ";

const _: () = assert!(!DEFAULT_MESSAGE.is_empty() && DEFAULT_MESSAGE.len() <= MAX_MESSAGE_LEN);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MessageError {
    Empty,
    TooLong,
    /// `0x00` or `0xFF`, which the store reads as the end of a record.
    ReservedByte,
}

/// True for bytes a message may not contain.
pub const fn is_reserved(byte: u8) -> bool {
    byte == 0x00 || byte == 0xFF
}

/// A non-empty run of at most [`MAX_MESSAGE_LEN`] bytes, none of them reserved.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Message(Vec<u8, MAX_MESSAGE_LEN>);

impl Message {
    pub fn new(bytes: &[u8]) -> Result<Self, MessageError> {
        if bytes.is_empty() {
            return Err(MessageError::Empty);
        }
        if bytes.iter().copied().any(is_reserved) {
            return Err(MessageError::ReservedByte);
        }
        Vec::from_slice(bytes)
            .map(Self)
            .map_err(|()| MessageError::TooLong)
    }

    /// Always at least 1.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The byte at `index`, wrapping around the end of the message.
    pub fn byte_at(&self, index: usize) -> u8 {
        self.0[index % self.0.len()]
    }
}

impl Default for Message {
    fn default() -> Self {
        Self(Vec::from_slice(DEFAULT_MESSAGE).unwrap_or_default())
    }
}
