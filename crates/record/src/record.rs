//! Record encoding: one (filename, data, label) triple per record.
//!
//! # Record Layout
//!
//! ```text
//! u64 LE  payload_len
//! u32 LE  crc32(payload)
//! payload_len bytes:
//!     0x01  u32 LE len  filename bytes
//!     0x02  u64 LE len  data bytes
//!     0x03  u64 LE      label (fixed-width scalar, no length prefix)
//! ```
//!
//! Fields are written in the order above; the decoder accepts them in
//! any order and rejects duplicates-by-last-wins only implicitly (a
//! well-formed writer never emits duplicates).

use crate::error::{RecordError, Result};
use byteorder::{LittleEndian, ReadBytesExt};
use std::borrow::Cow;
use std::io::Read;

/// Shard file magic bytes.
pub const SHARD_MAGIC: [u8; 4] = *b"SPKD";

/// Current shard format version.
///
/// Bumped whenever the field set or framing changes; readers reject
/// shards written by versions they do not know.
pub const SHARD_FORMAT_VERSION: u32 = 1;

/// Size of the fixed shard header in bytes (magic + version).
pub const SHARD_HEADER_SIZE: usize = 8;

/// Size of the per-record frame in bytes (payload length + checksum).
pub(crate) const RECORD_FRAME_SIZE: usize = 12;

const TAG_FILENAME: u8 = 0x01;
const TAG_DATA: u8 = 0x02;
const TAG_LABEL: u8 = 0x03;

/// Build the fixed header every shard file starts with.
pub fn shard_header() -> [u8; SHARD_HEADER_SIZE] {
    let mut header = [0u8; SHARD_HEADER_SIZE];
    header[..4].copy_from_slice(&SHARD_MAGIC);
    header[4..].copy_from_slice(&SHARD_FORMAT_VERSION.to_le_bytes());
    header
}

/// One packed sample: source filename, raw file bytes, run label.
///
/// The filename is stored as raw bytes so paths with non-UTF-8
/// components round-trip unchanged; text input is stored as UTF-8.
/// `data` is never inspected or decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Original source path, as raw bytes
    pub filename: Vec<u8>,
    /// Full byte content of the source file
    pub data: Vec<u8>,
    /// Obfuscation label for the run (0 or 1 from the writer; the
    /// encoder itself accepts any value)
    pub label: u64,
}

impl Record {
    /// Create a record.
    ///
    /// `filename` accepts both text (`&str`, `String`) and raw bytes
    /// (`Vec<u8>`, `&[u8]`); text is stored UTF-8 encoded.
    pub fn new(filename: impl Into<Vec<u8>>, data: Vec<u8>, label: u64) -> Self {
        Self {
            filename: filename.into(),
            data,
            label,
        }
    }

    /// The filename as text, with invalid UTF-8 replaced.
    pub fn filename_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.filename)
    }

    /// Encode this record into its framed wire representation.
    ///
    /// Pure and deterministic: identical records always produce
    /// byte-identical output.
    pub fn encode(&self) -> Vec<u8> {
        let payload = self.encode_payload();

        let mut out = Vec::with_capacity(RECORD_FRAME_SIZE + payload.len());
        out.extend_from_slice(&(payload.len() as u64).to_le_bytes());
        out.extend_from_slice(&crc32fast::hash(&payload).to_le_bytes());
        out.extend_from_slice(&payload);
        out
    }

    fn encode_payload(&self) -> Vec<u8> {
        // tag + u32 len + tag + u64 len + tag + u64 scalar
        let fixed = 1 + 4 + 1 + 8 + 1 + 8;
        let mut payload = Vec::with_capacity(fixed + self.filename.len() + self.data.len());

        payload.push(TAG_FILENAME);
        payload.extend_from_slice(&(self.filename.len() as u32).to_le_bytes());
        payload.extend_from_slice(&self.filename);

        payload.push(TAG_DATA);
        payload.extend_from_slice(&(self.data.len() as u64).to_le_bytes());
        payload.extend_from_slice(&self.data);

        payload.push(TAG_LABEL);
        payload.extend_from_slice(&self.label.to_le_bytes());

        payload
    }

    /// Decode a record from a checksum-verified payload.
    ///
    /// `offset` is the byte offset of the record's frame within the
    /// shard, used only for error reporting.
    pub(crate) fn decode_payload(payload: &[u8], offset: u64) -> Result<Self> {
        let mut cursor = std::io::Cursor::new(payload);
        let mut filename: Option<Vec<u8>> = None;
        let mut data: Option<Vec<u8>> = None;
        let mut label: Option<u64> = None;

        while (cursor.position() as usize) < payload.len() {
            let tag = cursor.read_u8().map_err(|_| truncated(payload, offset))?;
            match tag {
                TAG_FILENAME => {
                    let len = cursor
                        .read_u32::<LittleEndian>()
                        .map_err(|_| truncated(payload, offset))? as usize;
                    filename = Some(read_bytes(&mut cursor, len, payload, offset)?);
                }
                TAG_DATA => {
                    let len = cursor
                        .read_u64::<LittleEndian>()
                        .map_err(|_| truncated(payload, offset))?;
                    let len = usize::try_from(len)
                        .map_err(|_| RecordError::OversizedRecord { len, offset })?;
                    data = Some(read_bytes(&mut cursor, len, payload, offset)?);
                }
                TAG_LABEL => {
                    let value = cursor
                        .read_u64::<LittleEndian>()
                        .map_err(|_| truncated(payload, offset))?;
                    label = Some(value);
                }
                tag => return Err(RecordError::UnknownFieldTag { tag, offset }),
            }
        }

        Ok(Self {
            filename: filename.ok_or(RecordError::MissingField {
                field: "filename",
                offset,
            })?,
            data: data.ok_or(RecordError::MissingField {
                field: "data",
                offset,
            })?,
            label: label.ok_or(RecordError::MissingField {
                field: "label",
                offset,
            })?,
        })
    }
}

fn truncated(payload: &[u8], offset: u64) -> RecordError {
    RecordError::TruncatedRecord {
        offset,
        needed: payload.len() + 1,
        have: payload.len(),
    }
}

fn read_bytes(
    cursor: &mut std::io::Cursor<&[u8]>,
    len: usize,
    payload: &[u8],
    offset: u64,
) -> Result<Vec<u8>> {
    let remaining = payload.len() - cursor.position() as usize;
    if len > remaining {
        return Err(RecordError::TruncatedRecord {
            offset,
            needed: len,
            have: remaining,
        });
    }
    let mut bytes = vec![0u8; len];
    cursor.read_exact(&mut bytes)?;
    Ok(bytes)
}
