/// Read size used when an image has no preference.
pub const DEFAULT_PACKET_LEN: u32 = 64;

/// One read of a chunked transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Chunk {
    pub offset: u32,
    pub len: u32,
}

/// Consecutive chunks covering a payload; only the last may be short.
#[derive(Debug, Clone)]
pub struct Chunks {
    next: u32,
    total: u32,
    packet_len: u32,
}

impl Chunks {
    pub fn new(total: u32, packet_len: u32) -> Self {
        let packet_len = if packet_len == 0 { DEFAULT_PACKET_LEN } else { packet_len };
        Self { next: 0, total, packet_len }
    }
}

impl Iterator for Chunks {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        if self.next >= self.total {
            return None;
        }
        let len = self.packet_len.min(self.total - self.next);
        let chunk = Chunk { offset: self.next, len };
        self.next += len;
        Some(chunk)
    }
}
