#![cfg_attr(not(test), no_std)]
//! Firmware images for the sensor hub's update bootloader.
//!
//! An image is a flat application payload plus a handful of string metadata
//! entries. The updater only reads it through [`FirmwareImage`], in chunks.

mod chunks;
mod image;

pub use chunks::{Chunk, Chunks, DEFAULT_PACKET_LEN};
pub use image::{StaticImage, DUMMY};

/// Well-known metadata keys.
pub mod keys {
    pub const FW_FORMAT: &str = "FW-Format";
    pub const SW_PART_NUMBER: &str = "SW-Part-Number";
    pub const SW_VERSION: &str = "SW-Version";
    pub const SW_BUILD: &str = "SW-Build";
    pub const BUILD_TIMESTAMP: &str = "Build-Timestamp";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ImageError {
    /// The requested range runs past the end of the application payload.
    OutOfBounds { offset: u32, len: usize, app_len: u32 },
}

impl core::fmt::Display for ImageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ImageError::OutOfBounds { offset, len, app_len } => write!(
                f,
                "Read of {} bytes at offset {} exceeds image length {}",
                len, offset, app_len
            ),
        }
    }
}

/// Source of a firmware image.
pub trait FirmwareImage {
    /// Prepare the image for reading.
    fn open(&mut self) -> Result<(), ImageError> {
        Ok(())
    }

    /// Release whatever `open` acquired.
    fn close(&mut self) -> Result<(), ImageError> {
        Ok(())
    }

    /// Value of metadata entry `key`, if present.
    fn metadata(&self, key: &str) -> Option<&str>;

    /// Length of the application payload in bytes.
    fn app_len(&self) -> u32;

    /// Preferred number of bytes per read, or 0 for no preference.
    fn packet_len(&self) -> u32;

    /// Copy `buffer.len()` bytes starting at `offset` into `buffer`.
    ///
    /// Fails without writing anything when the range does not fit inside the
    /// payload.
    fn read(&self, offset: u32, buffer: &mut [u8]) -> Result<(), ImageError>;

    /// Walk the payload in reads of the preferred size.
    fn chunks(&self) -> Chunks {
        Chunks::new(self.app_len(), self.packet_len())
    }
}
