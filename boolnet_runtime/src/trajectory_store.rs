//! Append-only run log: binary protobuf frames.
//!
//! Storage format: length-prefixed protobuf frames.
//!   [4-byte LE length][protobuf bytes][4-byte LE length][protobuf bytes]...
//!
//! Rules:
//!   - Strict append only, no mutation, no deletion, no reordering
//!   - fsync after every write
//!   - Sequence 1 is the run header, every later record is a step
//!   - Sequence strictly increasing with no gaps

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};

use prost::Message;
use tracing::{debug, warn};

use crate::error::{Result, RuntimeError};
use crate::proto_bridge::kind_of;
use crate::proto_types::{ProtoRecordEnvelope, RecordKind};

/// Largest accepted frame.
pub const MAX_FRAME_LEN: usize = 16 * 1024 * 1024;

/// Append-only run log backed by a binary file.
pub struct TrajectoryStore {
    path: PathBuf,
    last_sequence: u64,
}

impl TrajectoryStore {
    /// Open or create a log at `path`, reading existing frames to find
    /// the last sequence number.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let last_sequence = if path.exists() {
            let records = Self::read_all_from_file(path)?;
            records.last().map(|r| r.sequence).unwrap_or(0)
        } else {
            0
        };

        Ok(Self {
            path: path.to_path_buf(),
            last_sequence,
        })
    }

    /// Append one record after checking sequence and header placement.
    pub fn append(&mut self, record: &ProtoRecordEnvelope) -> Result<()> {
        let expected = self.last_sequence + 1;
        if record.sequence != expected {
            return Err(RuntimeError::Sequence {
                expected,
                got: record.sequence,
            });
        }
        match (kind_of(record)?, expected) {
            (RecordKind::RunHeader(_), 1) | (RecordKind::Step(_), 2..) => {}
            (RecordKind::Step(_), _) => return Err(RuntimeError::HeaderRequired),
            (RecordKind::RunHeader(_), _) => return Err(RuntimeError::DuplicateHeader),
        }

        let frame = encode_frame(record)?;

        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        let previous_len = file.metadata()?.len();
        if let Err(e) = file.write_all(&frame).and_then(|()| file.sync_all()) {
            // Never leave a torn frame behind.
            if let Err(trunc) = file.set_len(previous_len) {
                warn!(error = %trunc, path = %self.path.display(), "could not roll back partial frame");
            }
            return Err(e.into());
        }

        self.last_sequence = record.sequence;
        debug!(sequence = record.sequence, bytes = frame.len(), "appended record");
        Ok(())
    }

    /// Load all records in sequence order.
    pub fn load_all(&self) -> Result<Vec<ProtoRecordEnvelope>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        Self::read_all_from_file(&self.path)
    }

    pub fn last_sequence(&self) -> u64 {
        self.last_sequence
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every frame, validating framing and sequence continuity.
    fn read_all_from_file(path: &Path) -> Result<Vec<ProtoRecordEnvelope>> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        let mut records: Vec<ProtoRecordEnvelope> = Vec::new();
        let mut len_buf = [0u8; 4];

        loop {
            match reader.read_exact(&mut len_buf) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
                Err(e) => return Err(e.into()),
            }

            let len = u32::from_le_bytes(len_buf) as usize;
            if len == 0 || len > MAX_FRAME_LEN {
                return Err(RuntimeError::malformed(format!("invalid frame length: {}", len)));
            }

            let mut frame = vec![0u8; len];
            reader
                .read_exact(&mut frame)
                .map_err(|e| RuntimeError::malformed(format!("truncated frame: {}", e)))?;

            let record = ProtoRecordEnvelope::decode(frame.as_slice())
                .map_err(|e| RuntimeError::malformed(format!("protobuf decode error: {}", e)))?;

            let expected = records.len() as u64 + 1;
            if record.sequence != expected {
                return Err(RuntimeError::Sequence {
                    expected,
                    got: record.sequence,
                });
            }
            records.push(record);
        }

        Ok(records)
    }
}

/// Length prefix and payload as one buffer, written with a single call.
fn encode_frame(record: &ProtoRecordEnvelope) -> Result<Vec<u8>> {
    let len = record.encoded_len();
    if len == 0 || len > MAX_FRAME_LEN {
        return Err(RuntimeError::malformed(format!("frame length {} out of range", len)));
    }
    let mut frame = Vec::with_capacity(4 + len);
    frame.extend_from_slice(&(len as u32).to_le_bytes());
    record
        .encode(&mut frame)
        .map_err(|e| RuntimeError::malformed(format!("protobuf encode error: {}", e)))?;
    Ok(frame)
}
