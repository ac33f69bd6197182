// Copyright 2020 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Binary wire encoding for a histogram: a fixed big-endian header
//! followed by the counts array, optionally wrapped in a zlib-compatible
//! deflate stream for compact storage in an interval log.

use std::io::{Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::counts::{CountsBackend, PlainCounts};
use crate::error::CodecError;
use crate::histogram::Histogram;

const WORD_SIZE_LOG2: i32 = 3; // counts are stored as 8-byte (2^3) words
const ENCODING_COOKIE_V1: i32 = 0x1C84_9308 | (WORD_SIZE_LOG2 << 4);
const COMPRESSION_COOKIE_V1: i32 = 0x1C84_9309 | (WORD_SIZE_LOG2 << 4);

/// A limit on the number of counts slots we will allocate while decoding
/// an untrusted header, to avoid an attacker driving an out-of-memory
/// abort via a forged `counts_len`.
const MAX_TRUSTED_COUNTS_LEN: u64 = 64 * 1024 * 1024;

/// Encode `histogram` into the plain (uncompressed) big-endian wire
/// format: a 32-byte header followed by `counts_len` 8-byte counts.
pub fn encode<C: CountsBackend>(histogram: &Histogram<C>) -> Result<Vec<u8>, CodecError> {
    let config = histogram.config();
    let mut buffer = Vec::with_capacity(32 + config.counts_len() * 8);
    buffer.write_i32::<BigEndian>(ENCODING_COOKIE_V1)?;
    buffer.write_i32::<BigEndian>(config.significant_figures() as i32)?;
    buffer.write_i64::<BigEndian>(config.lowest_discernible_value() as i64)?;
    buffer.write_i64::<BigEndian>(config.highest_trackable_value() as i64)?;
    buffer.write_i64::<BigEndian>(histogram.total_count() as i64)?;
    for index in 0..config.counts_len() {
        buffer.write_i64::<BigEndian>(histogram.count_at_index(index) as i64)?;
    }
    Ok(buffer)
}

/// Decode a plain, uncompressed encoding produced by [`encode`].
pub fn decode(bytes: &[u8]) -> Result<Histogram<PlainCounts>, CodecError> {
    let mut cursor = std::io::Cursor::new(bytes);
    let cookie = cursor.read_i32::<BigEndian>()?;
    if cookie != ENCODING_COOKIE_V1 {
        return Err(CodecError::EncodingCookieMismatch);
    }
    let significant_figures = cursor.read_i32::<BigEndian>()? as u8;
    let lowest_discernible_value = cursor.read_i64::<BigEndian>()? as u64;
    let highest_trackable_value = cursor.read_i64::<BigEndian>()? as u64;
    let total_count = cursor.read_i64::<BigEndian>()? as u64;

    let histogram = Histogram::<PlainCounts>::new(
        lowest_discernible_value,
        highest_trackable_value,
        significant_figures,
    )
    .map_err(|_| CodecError::EncodingCookieMismatch)?;

    if histogram.config().counts_len() as u64 > MAX_TRUSTED_COUNTS_LEN {
        return Err(CodecError::CountsOverflow);
    }

    let mut first_nonzero_index = None;
    let mut last_nonzero_index = None;
    for index in 0..histogram.config().counts_len() {
        let count = cursor.read_i64::<BigEndian>()? as u64;
        if count != 0 {
            histogram.record_n(histogram.config().value_from_flat_index(index), count);
            first_nonzero_index.get_or_insert(index);
            last_nonzero_index = Some(index);
        }
    }
    // `record_n` updated min/max from each index's lowest-equivalent value;
    // re-establish them from the equivalence range of the lowest/highest
    // occupied index, matching how they were derived before encoding.
    if let (Some(first), Some(last)) = (first_nonzero_index, last_nonzero_index) {
        let config = *histogram.config();
        let lowest = config.lowest_equivalent_value(config.value_from_flat_index(first));
        let highest = config.highest_equivalent_value(config.value_from_flat_index(last));
        histogram.note_extremum(lowest);
        histogram.note_extremum(highest);
    }
    debug_assert_eq!(histogram.total_count(), total_count);
    Ok(histogram)
}

/// Encode `histogram`, then deflate-compress it (zlib-compatible, level
/// 4) and wrap it in the compression flyweight.
pub fn encode_compressed<C: CountsBackend>(histogram: &Histogram<C>) -> Result<Vec<u8>, CodecError> {
    let plain = encode(histogram)?;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(4));
    encoder
        .write_all(&plain)
        .map_err(CodecError::DeflateFailed)?;
    let compressed = encoder.finish().map_err(CodecError::DeflateFailed)?;

    let mut buffer = Vec::with_capacity(8 + compressed.len());
    buffer.write_i32::<BigEndian>(COMPRESSION_COOKIE_V1)?;
    buffer.write_i32::<BigEndian>(compressed.len() as i32)?;
    buffer.extend_from_slice(&compressed);
    Ok(buffer)
}

/// Inverse of [`encode_compressed`].
pub fn decode_compressed(bytes: &[u8]) -> Result<Histogram<PlainCounts>, CodecError> {
    let mut cursor = std::io::Cursor::new(bytes);
    let cookie = cursor.read_i32::<BigEndian>()?;
    if cookie != COMPRESSION_COOKIE_V1 {
        return Err(CodecError::CompressionCookieMismatch);
    }
    let length = cursor.read_i32::<BigEndian>()?;
    if length < 0 {
        return Err(CodecError::CompressionCookieMismatch);
    }
    let start = cursor.position() as usize;
    let end = start + length as usize;
    let compressed = bytes
        .get(start..end)
        .ok_or(CodecError::CompressionCookieMismatch)?;

    let mut decoder = ZlibDecoder::new(compressed);
    let mut plain = Vec::new();
    decoder
        .read_to_end(&mut plain)
        .map_err(CodecError::InflateFailed)?;

    decode(&plain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counts::PlainCounts;

    #[test]
    fn round_trips_plain_encoding() {
        let h = Histogram::<PlainCounts>::new(1, 3_600_000_000, 3).unwrap();
        for v in [1000u64, 2000, 100_000_000] {
            h.record(v);
        }
        let bytes = encode(&h).unwrap();
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded.total_count(), h.total_count());
        assert!(h.values_are_equivalent(decoded.min(), h.min()));
        assert!(h.values_are_equivalent(decoded.max(), h.max()));
        for v in [1000u64, 2000, 100_000_000] {
            assert_eq!(decoded.count_at_value(v), h.count_at_value(v));
        }
    }

    #[test]
    fn round_trips_compressed_encoding() {
        let h = Histogram::<PlainCounts>::new(1, 3_600_000_000, 3).unwrap();
        for _ in 0..10_000 {
            h.record(1000);
        }
        h.record_correct(100_000_000, 10_000);
        let bytes = encode_compressed(&h).unwrap();
        let decoded = decode_compressed(&bytes).unwrap();
        assert_eq!(decoded.total_count(), h.total_count());
    }

    #[test]
    fn rejects_bad_encoding_cookie() {
        let mut bytes = vec![0u8; 32];
        bytes[3] = 0xFF;
        assert!(matches!(
            decode(&bytes),
            Err(CodecError::EncodingCookieMismatch)
        ));
    }

    #[test]
    fn rejects_bad_compression_cookie() {
        let bytes = vec![0u8; 8];
        assert!(matches!(
            decode_compressed(&bytes),
            Err(CodecError::CompressionCookieMismatch)
        ));
    }
}
