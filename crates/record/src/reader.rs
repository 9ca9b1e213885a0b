//! Shard file reader.
//!
//! Validates the shard header, then iterates records one at a time.
//! Each record's checksum is verified before its payload is parsed, so
//! corruption is reported at the record where it occurs and records
//! before it remain readable.

use crate::error::{RecordError, Result};
use crate::record::{Record, RECORD_FRAME_SIZE, SHARD_FORMAT_VERSION, SHARD_HEADER_SIZE, SHARD_MAGIC};
use byteorder::{ByteOrder, LittleEndian};
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

/// Streaming reader over one shard file.
///
/// Clean EOF exactly at a record boundary ends iteration; EOF anywhere
/// else is reported as [`RecordError::TruncatedRecord`].
#[derive(Debug)]
pub struct ShardReader<R: Read> {
    inner: R,
    offset: u64,
}

impl ShardReader<BufReader<File>> {
    /// Open a shard file and validate its header.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::new(BufReader::new(file))
    }
}

impl<R: Read> ShardReader<R> {
    /// Wrap a reader positioned at the start of a shard and validate
    /// the header.
    pub fn new(mut inner: R) -> Result<Self> {
        let mut header = [0u8; SHARD_HEADER_SIZE];
        inner.read_exact(&mut header)?;

        if header[..4] != SHARD_MAGIC {
            return Err(RecordError::BadMagic);
        }
        let version = LittleEndian::read_u32(&header[4..]);
        if version != SHARD_FORMAT_VERSION {
            return Err(RecordError::UnsupportedVersion { version });
        }

        Ok(Self {
            inner,
            offset: SHARD_HEADER_SIZE as u64,
        })
    }

    /// Read the next record, or `None` at clean end of shard.
    pub fn read_record(&mut self) -> Result<Option<Record>> {
        let mut frame = [0u8; RECORD_FRAME_SIZE];
        let got = read_fully(&mut self.inner, &mut frame)?;
        if got == 0 {
            return Ok(None);
        }
        if got < frame.len() {
            return Err(RecordError::TruncatedRecord {
                offset: self.offset,
                needed: frame.len(),
                have: got,
            });
        }

        let payload_len = LittleEndian::read_u64(&frame[..8]);
        let expected_crc = LittleEndian::read_u32(&frame[8..]);
        let len = usize::try_from(payload_len).map_err(|_| RecordError::OversizedRecord {
            len: payload_len,
            offset: self.offset,
        })?;

        let mut payload = vec![0u8; len];
        let got = read_fully(&mut self.inner, &mut payload)?;
        if got < len {
            return Err(RecordError::TruncatedRecord {
                offset: self.offset,
                needed: len,
                have: got,
            });
        }

        let actual_crc = crc32fast::hash(&payload);
        if actual_crc != expected_crc {
            return Err(RecordError::ChecksumMismatch {
                offset: self.offset,
                expected: expected_crc,
                actual: actual_crc,
            });
        }

        let record = Record::decode_payload(&payload, self.offset)?;
        self.offset += (RECORD_FRAME_SIZE + len) as u64;
        Ok(Some(record))
    }
}

impl<R: Read> Iterator for ShardReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}

/// Read all records from a shard file into memory.
///
/// Convenience for consumers and tests; prefer iterating a
/// [`ShardReader`] for large shards.
pub fn read_shard(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    ShardReader::open(path)?.collect()
}

/// Fill `buf` as far as the stream allows, returning the bytes read.
///
/// Unlike `read_exact`, a short read is not an error here; the caller
/// distinguishes clean EOF (0 bytes) from truncation (partial fill).
fn read_fully(reader: &mut impl Read, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::shard_header;
    use std::io::Cursor;

    fn shard_bytes(records: &[Record]) -> Vec<u8> {
        let mut bytes = shard_header().to_vec();
        for record in records {
            bytes.extend_from_slice(&record.encode());
        }
        bytes
    }

    #[test]
    fn test_reads_records_in_write_order() {
        let records = vec![
            Record::new("a.js", b"aaa".to_vec(), 1),
            Record::new("b.js", b"bbb".to_vec(), 1),
            Record::new("c.js", Vec::new(), 1),
        ];
        let bytes = shard_bytes(&records);

        let read: Vec<Record> = ShardReader::new(Cursor::new(bytes))
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(read, records);
    }

    #[test]
    fn test_empty_shard_yields_no_records() {
        let bytes = shard_header().to_vec();
        let mut reader = ShardReader::new(Cursor::new(bytes)).unwrap();
        assert!(reader.read_record().unwrap().is_none());
    }

    #[test]
    fn test_bad_magic_rejected() {
        let mut bytes = shard_bytes(&[Record::new("a", vec![], 0)]);
        bytes[0] = b'X';

        let err = ShardReader::new(Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, RecordError::BadMagic));
    }

    #[test]
    fn test_unknown_version_rejected() {
        let mut bytes = shard_header().to_vec();
        bytes[4..].copy_from_slice(&99u32.to_le_bytes());

        let err = ShardReader::new(Cursor::new(bytes)).unwrap_err();
        assert!(matches!(
            err,
            RecordError::UnsupportedVersion { version: 99 }
        ));
    }

    #[test]
    fn test_flipped_payload_byte_fails_checksum() {
        let mut bytes = shard_bytes(&[Record::new("a.js", b"payload".to_vec(), 1)]);
        let last = bytes.len() - 1;
        bytes[last] ^= 0xFF;

        let mut reader = ShardReader::new(Cursor::new(bytes)).unwrap();
        let err = reader.read_record().unwrap_err();
        assert!(matches!(err, RecordError::ChecksumMismatch { .. }));
        assert!(err.is_corruption());
    }

    #[test]
    fn test_truncated_tail_detected() {
        let mut bytes = shard_bytes(&[Record::new("a.js", b"payload".to_vec(), 1)]);
        bytes.truncate(bytes.len() - 3);

        let mut reader = ShardReader::new(Cursor::new(bytes)).unwrap();
        let err = reader.read_record().unwrap_err();
        assert!(matches!(err, RecordError::TruncatedRecord { .. }));
    }

    #[test]
    fn test_records_before_corruption_remain_readable() {
        let good = Record::new("good.js", b"intact".to_vec(), 0);
        let mut bytes = shard_bytes(&[good.clone(), Record::new("bad.js", b"mangled".to_vec(), 0)]);
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;

        let mut reader = ShardReader::new(Cursor::new(bytes)).unwrap();
        assert_eq!(reader.read_record().unwrap(), Some(good));
        assert!(reader.read_record().is_err());
    }
}
