use ecocert_canonical::{PrincipalId, Timestamp};
use ecocert_core::{CallContext, Operation, RegistryConfig};
use ecocert_journal::frame::MAX_PAYLOAD_SIZE;
use ecocert_journal::{
    replay, verify_chain, FrameKind, JournalError, JournalReader, JournalWriter, ReadMode,
    WriteOptions,
};
use std::fs;
use std::io::{Seek, Write};
use std::path::Path;
use tempfile::TempDir;

fn write_entries(path: &Path, count: u64) {
    let mut writer = JournalWriter::open(path, WriteOptions::default()).unwrap();
    writer
        .append(
            &CallContext::new("ST2TEST", 0),
            Operation::SetAuthority {
                principal: PrincipalId::new("ST2TEST"),
            },
            Timestamp::new("2024-01-01T00:00:00Z"),
        )
        .unwrap();
    for fee in 1..count {
        writer
            .append(
                &CallContext::new("ST2TEST", fee),
                Operation::SetIssuanceFee { fee },
                Timestamp::new("2024-01-01T00:00:00Z"),
            )
            .unwrap();
    }
    writer.finish().unwrap();
}

#[test]
fn test_payload_size_limit() {
    let temp_dir = TempDir::new().unwrap();
    let journal_path = temp_dir.path().join("test.ecj");

    let oversized_payload = vec![0u8; MAX_PAYLOAD_SIZE as usize + 1];
    let mut writer = JournalWriter::open(&journal_path, WriteOptions::default()).unwrap();
    match writer.append_raw(FrameKind::Entry, &oversized_payload) {
        Err(JournalError::PayloadTooLarge { size, max }) => {
            assert_eq!(size, MAX_PAYLOAD_SIZE as usize + 1);
            assert_eq!(max, MAX_PAYLOAD_SIZE);
        }
        other => panic!("expected PayloadTooLarge, got {:?}", other),
    }
}

#[test]
fn test_max_payload_size_allowed() {
    let temp_dir = TempDir::new().unwrap();
    let journal_path = temp_dir.path().join("test.ecj");

    let max_payload = vec![0u8; MAX_PAYLOAD_SIZE as usize];
    let mut writer = JournalWriter::open(&journal_path, WriteOptions::default()).unwrap();
    writer
        .append_raw(FrameKind::Unknown(0x7F), &max_payload)
        .unwrap();
    writer.finish().unwrap();

    let mut reader = JournalReader::open(&journal_path, ReadMode::Strict).unwrap();
    let (kind, payload) = reader.read_frame().unwrap().unwrap();
    assert_eq!(kind, FrameKind::Unknown(0x7F));
    assert_eq!(payload.len(), MAX_PAYLOAD_SIZE as usize);
}

#[test]
fn test_frame_reserved_bytes_must_be_zero() {
    let temp_dir = TempDir::new().unwrap();
    let journal_path = temp_dir.path().join("test.ecj");
    write_entries(&journal_path, 1);

    let mut file = fs::OpenOptions::new()
        .read(true)
        .write(true)
        .open(&journal_path)
        .unwrap();
    file.seek(std::io::SeekFrom::Start(16 + 1)).unwrap();
    file.write_all(&[0x01]).unwrap();
    drop(file);

    let mut reader = JournalReader::open(&journal_path, ReadMode::Strict).unwrap();
    assert!(matches!(
        reader.read_frame(),
        Err(JournalError::InvalidFrame { offset: 16, .. })
    ));
}

#[test]
fn test_header_reserved_bytes_must_be_zero() {
    let temp_dir = TempDir::new().unwrap();
    let journal_path = temp_dir.path().join("test.ecj");
    write_entries(&journal_path, 1);

    let mut file = fs::OpenOptions::new()
        .read(true)
        .write(true)
        .open(&journal_path)
        .unwrap();
    file.seek(std::io::SeekFrom::Start(8)).unwrap();
    file.write_all(&[0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08])
        .unwrap();
    drop(file);

    assert!(JournalReader::open(&journal_path, ReadMode::Strict).is_err());
    assert!(JournalWriter::open(&journal_path, WriteOptions::default()).is_err());
}

#[test]
fn test_short_file_is_not_a_journal() {
    let temp_dir = TempDir::new().unwrap();
    let journal_path = temp_dir.path().join("test.ecj");
    fs::write(&journal_path, b"ECJ1").unwrap();

    assert!(matches!(
        JournalWriter::open(&journal_path, WriteOptions::default()),
        Err(JournalError::FileNotEmpty)
    ));
    assert!(matches!(
        JournalReader::open(&journal_path, ReadMode::Strict),
        Err(JournalError::InvalidHeader(_))
    ));
}

#[test]
fn test_partial_write_handling() {
    let temp_dir = TempDir::new().unwrap();
    let journal_path = temp_dir.path().join("test.ecj");
    write_entries(&journal_path, 2);

    let mut reader = JournalReader::open(&journal_path, ReadMode::Strict).unwrap();
    reader.read_entry().unwrap().unwrap();
    let first_entry_end = reader.position();
    drop(reader);

    let file = fs::OpenOptions::new()
        .write(true)
        .open(&journal_path)
        .unwrap();
    file.set_len(first_entry_end + 10).unwrap();
    drop(file);

    {
        let mut reader = JournalReader::open(&journal_path, ReadMode::Strict).unwrap();
        assert!(reader.read_entry().unwrap().is_some());
        assert!(matches!(
            reader.read_entry(),
            Err(JournalError::TruncatedFrame { .. })
        ));
    }

    {
        let mut reader = JournalReader::open(&journal_path, ReadMode::Permissive).unwrap();
        assert!(reader.read_entry().unwrap().is_some());
        assert!(reader.read_entry().unwrap().is_none());
    }

    let report = verify_chain(&journal_path, ReadMode::Permissive).unwrap();
    assert_eq!(report.entries, 1);
    assert!(verify_chain(&journal_path, ReadMode::Strict).is_err());
    assert!(replay(&journal_path, RegistryConfig::default()).is_err());
}

#[test]
fn test_truncated_frame_header() {
    let temp_dir = TempDir::new().unwrap();
    let journal_path = temp_dir.path().join("test.ecj");
    write_entries(&journal_path, 1);

    let mut file = fs::OpenOptions::new()
        .append(true)
        .open(&journal_path)
        .unwrap();
    file.write_all(&[0x01, 0x00, 0x00]).unwrap();
    drop(file);

    let mut reader = JournalReader::open(&journal_path, ReadMode::Permissive).unwrap();
    assert!(reader.read_entry().unwrap().is_some());
    assert!(reader.read_entry().unwrap().is_none());

    let mut reader = JournalReader::open(&journal_path, ReadMode::Strict).unwrap();
    reader.read_entry().unwrap();
    assert!(reader.read_entry().is_err());
}

#[test]
fn test_unknown_frame_kind_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let journal_path = temp_dir.path().join("test.ecj");
    write_entries(&journal_path, 1);

    let mut file = fs::OpenOptions::new()
        .append(true)
        .open(&journal_path)
        .unwrap();
    let mut frame_header = [0u8; 8];
    frame_header[0] = 0xFF;
    frame_header[4..8].copy_from_slice(&10u32.to_le_bytes());
    file.write_all(&frame_header).unwrap();
    file.write_all(b"unknown123").unwrap();
    drop(file);

    let mut reader = JournalReader::open(&journal_path, ReadMode::Strict).unwrap();
    let entry = reader.read_entry().unwrap().unwrap();
    assert_eq!(entry.sequence, 0);
    assert!(reader.read_entry().unwrap().is_none());

    // Writers resume past skipped frames.
    write_entries_after(&journal_path);
    assert_eq!(verify_chain(&journal_path, ReadMode::Strict).unwrap().entries, 2);
}

fn write_entries_after(path: &Path) {
    let mut writer = JournalWriter::open(path, WriteOptions::default()).unwrap();
    writer
        .append(
            &CallContext::new("ST2TEST", 9),
            Operation::SetIssuanceFee { fee: 9 },
            Timestamp::new("2024-01-02T00:00:00Z"),
        )
        .unwrap();
    writer.finish().unwrap();
}
