//! Blob record type
//!
//! The record format is identical on both tiers:
//!
//! ```text
//! +------------------+
//! | Checksum         | (u32 LE)
//! +------------------+
//! | Payload          | (data_length bytes)
//! +------------------+
//! ```
//!
//! Checksum covers the payload only. No padding, no version field.

use std::io;

use super::checksum::{calculate_crc32, verify_checksum};

/// Size of the checksum header in bytes
pub const CHECKSUM_LEN: usize = 4;

/// Checksum plus fixed-length payload.
///
/// The payload length is fixed when the record is created and never
/// changes; decoding refuses input of the wrong size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobRecord {
    checksum: u32,
    payload: Box<[u8]>,
}

impl BlobRecord {
    /// Creates an all-zero record, checksum included.
    ///
    /// The result is not sealed: a zero checksum does not match a zero
    /// payload.
    pub fn zeroed(data_length: usize) -> Self {
        Self {
            checksum: 0,
            payload: vec![0u8; data_length].into_boxed_slice(),
        }
    }

    /// Creates a sealed record holding a copy of `payload`.
    pub fn sealed(payload: &[u8]) -> Self {
        let mut record = Self {
            checksum: 0,
            payload: payload.into(),
        };
        record.seal();
        record
    }

    /// Payload length in bytes
    pub fn data_length(&self) -> usize {
        self.payload.len()
    }

    /// Encoded length: checksum header plus payload
    pub fn encoded_len(&self) -> usize {
        CHECKSUM_LEN + self.payload.len()
    }

    /// Stored checksum (not recomputed)
    pub fn checksum(&self) -> u32 {
        self.checksum
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn payload_mut(&mut self) -> &mut [u8] {
        &mut self.payload
    }

    /// Checksum computed over the current payload
    pub fn computed_checksum(&self) -> u32 {
        calculate_crc32(&self.payload)
    }

    /// Whether the stored checksum matches the payload
    pub fn is_valid(&self) -> bool {
        verify_checksum(&self.payload, self.checksum)
    }

    /// Recomputes and stores the checksum. Returns the new value.
    pub fn seal(&mut self) -> u32 {
        self.checksum = self.computed_checksum();
        self.checksum
    }

    /// Zero-fills checksum and payload, then seals.
    pub fn reset(&mut self) {
        self.checksum = 0;
        self.payload.fill(0);
        self.seal();
    }

    /// Serialize the complete record to bytes.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        buf.extend_from_slice(&self.checksum.to_le_bytes());
        buf.extend_from_slice(&self.payload);
        buf
    }

    /// Overwrites this record from its encoded form.
    ///
    /// The checksum is taken as stored; use [`BlobRecord::is_valid`] to
    /// check it. Fails with `InvalidData` if `data` is not exactly
    /// `encoded_len()` bytes, leaving the record untouched.
    pub fn decode_from(&mut self, data: &[u8]) -> io::Result<()> {
        if data.len() != self.encoded_len() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Record size mismatch: expected {} bytes, got {}",
                    self.encoded_len(),
                    data.len()
                ),
            ));
        }

        self.fill_from(data);
        Ok(())
    }

    /// Overwrites this record from a buffer of exactly `encoded_len()`
    /// bytes, as sized by the caller.
    pub(crate) fn fill_from(&mut self, data: &[u8]) {
        debug_assert_eq!(data.len(), self.encoded_len());
        let (header, payload) = data.split_at(CHECKSUM_LEN);
        self.checksum = u32::from_le_bytes([header[0], header[1], header[2], header[3]]);
        self.payload.copy_from_slice(payload);
    }
}
