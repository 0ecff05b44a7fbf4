//! New messages typed on the serial console.

use embedded_hal::delay::DelayNs;
use embedded_io::{ErrorKind, Read, ReadReady, Write};
use fugit::MillisDurationU32;
use heapless::Vec;

use crate::error::io_error;
use crate::message::{is_reserved, Message, MAX_MESSAGE_LEN};

/// Collects a burst of console bytes into a replacement message.
///
/// There is no end marker: the message is complete once the line has been quiet for the
/// inter-byte time. A sender slower than that gets its text split into several messages.
pub struct LineReader {
    inter_byte: MillisDurationU32,
}

impl LineReader {
    pub const fn new(inter_byte: MillisDurationU32) -> Self {
        Self { inter_byte }
    }

    /// Returns `None` straight away when nothing is waiting.
    ///
    /// Bytes past [`MAX_MESSAGE_LEN`] are read and dropped so the next poll starts clean.
    /// `0x00` and `0xFF` are skipped since a stored message cannot hold them.
    pub fn poll<R, D>(&self, rx: &mut R, delay: &mut D) -> Result<Option<Message>, ErrorKind>
    where
        R: Read + ReadReady,
        D: DelayNs,
    {
        if !rx.read_ready().map_err(io_error)? {
            return Ok(None);
        }

        let mut line: Vec<u8, MAX_MESSAGE_LEN> = Vec::new();
        let mut dropped = 0usize;
        loop {
            while rx.read_ready().map_err(io_error)? {
                let mut byte = [0u8; 1];
                if rx.read(&mut byte).map_err(io_error)? == 0 {
                    break;
                }
                if is_reserved(byte[0]) {
                    continue;
                }
                if line.push(byte[0]).is_err() {
                    dropped += 1;
                }
            }
            delay.delay_ms(self.inter_byte.to_millis());
            if !rx.read_ready().map_err(io_error)? {
                break;
            }
        }

        #[cfg(feature = "defmt")]
        if dropped > 0 {
            defmt::warn!("console input truncated, {} bytes dropped", dropped);
        }
        #[cfg(not(feature = "defmt"))]
        let _ = dropped;

        Ok(Message::new(&line).ok())
    }

    /// Echoes an accepted message back to the sender.
    pub fn acknowledge<W: Write>(tx: &mut W, message: &Message) -> Result<(), ErrorKind> {
        tx.write_all(message.as_bytes()).map_err(io_error)?;
        tx.write_all(b"\r\n").map_err(io_error)?;
        tx.flush().map_err(io_error)
    }
}
