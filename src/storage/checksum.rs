//! CRC32 checksum computation for blob records
//!
//! The checksum is stored on both tiers, so every implementation must agree
//! on it bit for bit:
//! - Polynomial 0x04C11DB7, processed MSB-first
//! - Register starts at 0xFFFFFFFF
//! - No final inversion (CRC-32/MPEG-2, not the zip/ethernet variant)

const POLYNOMIAL: u32 = 0x04C1_1DB7;
const INITIAL: u32 = 0xFFFF_FFFF;

/// Computes the record checksum over the provided data.
///
/// Processes one bit at a time, no lookup table.
/// An empty input returns the initial register value.
pub fn calculate_crc32(data: &[u8]) -> u32 {
    let mut crc = INITIAL;
    for &byte in data {
        let mut mask = 0x80u8;
        while mask != 0 {
            let mut bit = crc & 0x8000_0000 != 0;
            if byte & mask != 0 {
                bit = !bit;
            }
            crc <<= 1;
            if bit {
                crc ^= POLYNOMIAL;
            }
            mask >>= 1;
        }
    }
    crc
}

/// Verifies that the computed checksum matches the expected checksum.
pub fn verify_checksum(data: &[u8], expected: u32) -> bool {
    calculate_crc32(data) == expected
}
