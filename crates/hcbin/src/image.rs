use crate::{keys, FirmwareImage, ImageError};

/// Image compiled into the program as constant tables.
#[derive(Debug, Clone, Copy)]
pub struct StaticImage {
    metadata: &'static [(&'static str, &'static str)],
    payload: &'static [u8],
    packet_len: u32,
}

/// Placeholder image for builds without real hub firmware. Its format is
/// `DUMMY`, which no updater should accept.
pub static DUMMY: StaticImage = StaticImage::new(
    &[
        (keys::FW_FORMAT, "DUMMY"),
        (keys::SW_PART_NUMBER, ""),
        (keys::SW_VERSION, "99.99.99"),
        (keys::SW_BUILD, "99"),
        (keys::BUILD_TIMESTAMP, ""),
    ],
    &[0x00; 8],
);

impl StaticImage {
    pub const fn new(
        metadata: &'static [(&'static str, &'static str)],
        payload: &'static [u8],
    ) -> Self {
        Self { metadata, payload, packet_len: 0 }
    }

    /// Same image, with a preferred read size.
    pub const fn with_packet_len(self, packet_len: u32) -> Self {
        Self { packet_len, ..self }
    }
}

impl FirmwareImage for StaticImage {
    fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, value)| *value)
    }

    fn app_len(&self) -> u32 {
        self.payload.len() as u32
    }

    fn packet_len(&self) -> u32 {
        self.packet_len
    }

    fn read(&self, offset: u32, buffer: &mut [u8]) -> Result<(), ImageError> {
        let out_of_bounds = ImageError::OutOfBounds {
            offset,
            len: buffer.len(),
            app_len: self.app_len(),
        };
        let start = offset as usize;
        let end = start.checked_add(buffer.len()).ok_or(out_of_bounds)?;
        let source = self.payload.get(start..end).ok_or(out_of_bounds)?;
        buffer.copy_from_slice(source);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static PAYLOAD: [u8; 6] = [1, 2, 3, 4, 5, 6];
    static IMAGE: StaticImage =
        StaticImage::new(&[(keys::FW_FORMAT, "BNO_V1")], &PAYLOAD);

    #[test]
    fn read_at_the_very_end_is_allowed() {
        let mut buffer = [0u8; 2];
        IMAGE.read(4, &mut buffer).unwrap();
        assert_eq!(buffer, [5, 6]);

        let mut empty = [0u8; 0];
        assert!(IMAGE.read(6, &mut empty).is_ok());
    }

    #[test]
    fn offset_overflow_is_out_of_bounds() {
        let mut buffer = [0xEE; 4];
        assert!(IMAGE.read(u32::MAX, &mut buffer).is_err());
        assert_eq!(buffer, [0xEE; 4]);
    }
}
