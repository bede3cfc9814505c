use crate::errors::JournalError;

/// Journal file magic bytes: `b"ECJ1"`.
pub const MAGIC: &[u8; 4] = b"ECJ1";

/// Current journal format version.
pub const VERSION: u16 = 0x0001;

/// Header size in bytes.
pub const HEADER_SIZE: usize = 16;

/// Frame header size in bytes.
pub const FRAME_HEADER_SIZE: usize = 8;

/// Maximum payload size: 1 MiB.
pub const MAX_PAYLOAD_SIZE: u32 = 1024 * 1024;

/// Frame kind byte for a JSON journal entry.
pub const FRAME_KIND_ENTRY: u8 = 0x01;

/// Journal file header (16 bytes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalHeader {
    /// Magic bytes: `"ECJ1"`.
    pub magic: [u8; 4],
    /// Format version.
    pub version: u16,
    /// Reserved flags (must be 0).
    pub flags: u16,
    /// Reserved bytes (must be all zeros).
    pub reserved: [u8; 8],
}

impl JournalHeader {
    /// Header for the current format version.
    pub fn new() -> Self {
        Self {
            magic: *MAGIC,
            version: VERSION,
            flags: 0,
            reserved: [0; 8],
        }
    }

    /// Serializes the header to bytes.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4..6].copy_from_slice(&self.version.to_le_bytes());
        bytes[6..8].copy_from_slice(&self.flags.to_le_bytes());
        bytes[8..16].copy_from_slice(&self.reserved);
        bytes
    }

    /// Parses and validates a header.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, JournalError> {
        if bytes.len() < HEADER_SIZE {
            return Err(JournalError::InvalidHeader(format!(
                "header too short: {} bytes",
                bytes.len()
            )));
        }

        let magic = [bytes[0], bytes[1], bytes[2], bytes[3]];
        if magic != *MAGIC {
            return Err(JournalError::InvalidHeader(format!(
                "invalid magic: {:?}, expected {:?}",
                magic, MAGIC
            )));
        }

        let version = u16::from_le_bytes([bytes[4], bytes[5]]);
        if version != VERSION {
            return Err(JournalError::InvalidHeader(format!(
                "unsupported version: 0x{:04x}, expected 0x{:04x}",
                version, VERSION
            )));
        }

        let flags = u16::from_le_bytes([bytes[6], bytes[7]]);
        if flags != 0 {
            return Err(JournalError::InvalidHeader(format!(
                "non-zero flags: 0x{:04x}",
                flags
            )));
        }

        let mut reserved = [0u8; 8];
        reserved.copy_from_slice(&bytes[8..16]);
        if reserved != [0u8; 8] {
            return Err(JournalError::InvalidHeader(
                "non-zero reserved bytes".to_string(),
            ));
        }

        Ok(Self {
            magic,
            version,
            flags,
            reserved,
        })
    }
}

impl Default for JournalHeader {
    fn default() -> Self {
        Self::new()
    }
}

/// Record frame kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// UTF-8 JSON journal entry.
    Entry,
    /// Kind this reader does not understand; skipped.
    Unknown(u8),
}

impl FrameKind {
    /// Decodes a kind byte.
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            FRAME_KIND_ENTRY => FrameKind::Entry,
            _ => FrameKind::Unknown(byte),
        }
    }

    /// Encodes this kind as a byte.
    pub fn to_byte(self) -> u8 {
        match self {
            FrameKind::Entry => FRAME_KIND_ENTRY,
            FrameKind::Unknown(b) => b,
        }
    }
}

/// Record frame header (8 bytes): kind, three reserved bytes, payload length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFrame {
    /// Frame kind.
    pub kind: FrameKind,
    /// Payload length in bytes (little-endian on disk).
    pub len: u32,
}

impl RecordFrame {
    /// Frame header for a payload of `len` bytes.
    pub fn new(kind: FrameKind, len: usize) -> Result<Self, JournalError> {
        match u32::try_from(len) {
            Ok(len) if len <= MAX_PAYLOAD_SIZE => Ok(Self { kind, len }),
            _ => Err(JournalError::PayloadTooLarge {
                size: len,
                max: MAX_PAYLOAD_SIZE,
            }),
        }
    }

    /// Serializes the frame header to bytes.
    pub fn to_bytes(&self) -> [u8; FRAME_HEADER_SIZE] {
        let mut bytes = [0u8; FRAME_HEADER_SIZE];
        bytes[0] = self.kind.to_byte();
        bytes[4..8].copy_from_slice(&self.len.to_le_bytes());
        bytes
    }

    /// Parses a frame header found at `offset`.
    pub fn from_bytes(bytes: &[u8], offset: u64) -> Result<Self, JournalError> {
        if bytes.len() < FRAME_HEADER_SIZE {
            return Err(JournalError::InvalidFrame {
                offset,
                reason: format!("frame header too short: {} bytes", bytes.len()),
            });
        }

        if bytes[1..4] != [0u8; 3] {
            return Err(JournalError::InvalidFrame {
                offset,
                reason: "non-zero reserved bytes".to_string(),
            });
        }

        let len = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        if len > MAX_PAYLOAD_SIZE {
            return Err(JournalError::InvalidFrame {
                offset,
                reason: format!("payload size {} exceeds maximum {}", len, MAX_PAYLOAD_SIZE),
            });
        }

        Ok(Self {
            kind: FrameKind::from_byte(bytes[0]),
            len,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_layout() {
        let bytes = JournalHeader::new().to_bytes();
        assert_eq!(&bytes[0..4], b"ECJ1");
        assert_eq!(&bytes[4..6], &[1, 0]);
        assert_eq!(&bytes[6..16], &[0; 10]);
        assert_eq!(JournalHeader::from_bytes(&bytes).unwrap(), JournalHeader::new());
    }

    #[test]
    fn header_rejects_foreign_magic() {
        let mut bytes = JournalHeader::new().to_bytes();
        bytes[0..4].copy_from_slice(b"NRJ1");
        assert!(matches!(
            JournalHeader::from_bytes(&bytes),
            Err(JournalError::InvalidHeader(_))
        ));
    }

    #[test]
    fn header_rejects_invalid_version() {
        let mut bytes = JournalHeader::new().to_bytes();
        bytes[4] = 0x02;
        let err = JournalHeader::from_bytes(&bytes).unwrap_err();
        assert!(err.to_string().contains("version"));
    }

    #[test]
    fn header_rejects_non_zero_flags_and_reserved() {
        let mut bytes = JournalHeader::new().to_bytes();
        bytes[6] = 0x01;
        assert!(JournalHeader::from_bytes(&bytes).is_err());

        let mut bytes = JournalHeader::new().to_bytes();
        bytes[15] = 0x01;
        assert!(JournalHeader::from_bytes(&bytes).is_err());
    }

    #[test]
    fn frame_layout() {
        let bytes = RecordFrame::new(FrameKind::Entry, 0x0102).unwrap().to_bytes();
        assert_eq!(bytes, [0x01, 0, 0, 0, 0x02, 0x01, 0, 0]);
        let frame = RecordFrame::from_bytes(&bytes, 16).unwrap();
        assert_eq!(frame.kind, FrameKind::Entry);
        assert_eq!(frame.len, 0x0102);
    }

    #[test]
    fn frame_rejects_oversized_payload() {
        assert!(RecordFrame::new(FrameKind::Entry, MAX_PAYLOAD_SIZE as usize).is_ok());
        assert!(matches!(
            RecordFrame::new(FrameKind::Entry, MAX_PAYLOAD_SIZE as usize + 1),
            Err(JournalError::PayloadTooLarge { .. })
        ));

        let mut bytes = [0u8; FRAME_HEADER_SIZE];
        bytes[0] = FRAME_KIND_ENTRY;
        bytes[4..8].copy_from_slice(&(MAX_PAYLOAD_SIZE + 1).to_le_bytes());
        assert!(RecordFrame::from_bytes(&bytes, 0).is_err());
    }

    #[test]
    fn frame_reports_offset_of_bad_reserved_bytes() {
        let mut bytes = RecordFrame::new(FrameKind::Entry, 10).unwrap().to_bytes();
        bytes[2] = 0x01;
        match RecordFrame::from_bytes(&bytes, 42) {
            Err(JournalError::InvalidFrame { offset, .. }) => assert_eq!(offset, 42),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn unknown_kind_is_preserved() {
        let kind = FrameKind::from_byte(0x7F);
        assert_eq!(kind, FrameKind::Unknown(0x7F));
        assert_eq!(kind.to_byte(), 0x7F);
    }
}
