use alphanumeric_core::store::Commit;
use embedded_storage::{ReadStorage, Storage};
use rp2040_flash::flash;

const XIP_BASE: u32 = 0x1000_0000;
const FLASH_SIZE: u32 = 2 * 1024 * 1024;
pub const SECTOR_SIZE: usize = 4096;
/// Offset of the last sector of flash, kept out of the FLASH region in memory.x.
const SECTOR_OFFSET: u32 = FLASH_SIZE - SECTOR_SIZE as u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum FlashError {
    OutOfBounds,
}

/// One flash sector used as byte-addressable storage.
///
/// Reads and writes go to a RAM copy of the sector. [`Commit::commit`] erases and reprograms
/// the sector once if anything changed.
pub struct FlashSector {
    image: [u8; SECTOR_SIZE],
    dirty: bool,
}

impl FlashSector {
    pub fn new() -> Self {
        let mut image = [0u8; SECTOR_SIZE];
        // SAFETY: the sector is inside the memory-mapped XIP window and is never executed from.
        let mapped = unsafe {
            core::slice::from_raw_parts((XIP_BASE + SECTOR_OFFSET) as *const u8, SECTOR_SIZE)
        };
        image.copy_from_slice(mapped);
        Self {
            image,
            dirty: false,
        }
    }
}

impl ReadStorage for FlashSector {
    type Error = FlashError;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        let start = offset as usize;
        let source = self
            .image
            .get(start..start + bytes.len())
            .ok_or(FlashError::OutOfBounds)?;
        bytes.copy_from_slice(source);
        Ok(())
    }

    fn capacity(&self) -> usize {
        SECTOR_SIZE
    }
}

impl Storage for FlashSector {
    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        let start = offset as usize;
        self.image
            .get_mut(start..start + bytes.len())
            .ok_or(FlashError::OutOfBounds)?
            .copy_from_slice(bytes);
        self.dirty = true;
        Ok(())
    }
}

impl Commit for FlashSector {
    fn commit(&mut self) -> Result<(), Self::Error> {
        if !self.dirty {
            return Ok(());
        }
        cortex_m::interrupt::free(|_| {
            // SAFETY: interrupts are off and core 1 is never started, so nothing executes from
            // flash while XIP is down. The sector is reserved in memory.x and the image is a
            // whole sector. boot2 is rerun afterwards to restore fast XIP.
            unsafe { flash::flash_range_erase_and_program(SECTOR_OFFSET, &self.image, true) }
        });
        self.dirty = false;
        defmt::debug!("flash sector programmed at {=u32:#x}", SECTOR_OFFSET);
        Ok(())
    }
}
