// Copyright 2020 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The interval log text format: a small comment header followed by one
//! CSV + base64 data line per recorded interval.

use std::io::{BufRead, Write};

use crate::codec;
use crate::counts::PlainCounts;
use crate::error::LogError;
use crate::histogram::Histogram;

const FORMAT_VERSION: &str = "1.1";

/// Parsed interval-log header.
#[derive(Clone, Debug, PartialEq)]
pub struct LogHeader {
    /// Major format version; this crate only accepts `1`.
    pub major_version: u32,
    /// Minor format version, informational.
    pub minor_version: u32,
    /// The log's nominal start time, as seconds since the Unix epoch
    /// (may carry a fractional component, truncated here to whole
    /// seconds plus milliseconds captured separately).
    pub start_timestamp_seconds: f64,
}

/// Write the three comment lines and CSV column header that open an
/// interval log.
pub fn write_header<W: Write>(
    writer: &mut W,
    prefix: &str,
    start_timestamp_seconds: f64,
) -> Result<(), LogError> {
    writeln!(writer, "#[{prefix}]")?;
    writeln!(writer, "#[Histogram log format version {FORMAT_VERSION}]")?;
    let seconds = start_timestamp_seconds.trunc() as i64;
    let millis = ((start_timestamp_seconds.fract()) * 1000.0).round() as i64;
    writeln!(
        writer,
        "#[StartTime: {seconds}.{millis:03} (seconds since epoch)]"
    )?;
    writeln!(
        writer,
        "\"StartTimestamp\",\"EndTimestamp\",\"Interval_Max\",\"Interval_Compressed_Histogram\""
    )?;
    Ok(())
}

/// Write one interval's data line: start/end timestamps (seconds,
/// fractional), the interval's observed maximum, and the base64-encoded
/// compressed histogram.
pub fn write_interval<W: Write, C: crate::counts::CountsBackend>(
    writer: &mut W,
    start_timestamp_seconds: f64,
    end_timestamp_seconds: f64,
    histogram: &Histogram<C>,
) -> Result<(), LogError> {
    let max_seconds = histogram.max() as f64 / 1000.0;
    let encoded = codec::encode_compressed(histogram).map_err(LogError::Codec)?;
    let text = crate::base64::encode(&encoded);
    writeln!(
        writer,
        "{start_timestamp_seconds:.3},{end_timestamp_seconds:.3},{max_seconds:.3},{text}"
    )?;
    Ok(())
}

/// Read and parse the comment header + CSV column header from the start
/// of an interval log. Returns [`LogError::InvalidVersion`] if no
/// recognizable version comment is found, or if its major version is not
/// `1`.
pub fn read_header<R: BufRead>(reader: &mut R) -> Result<LogHeader, LogError> {
    let mut minor_version = None;
    let mut start_timestamp_seconds = 0.0;
    let mut major_version = None;

    let mut line = String::new();
    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line)?;
        if bytes_read == 0 {
            break;
        }
        let trimmed = line.trim_end();
        if trimmed.is_empty() {
            continue;
        }
        if !trimmed.starts_with('#') {
            // first non-comment, non-blank line is the CSV column header;
            // the header block is over.
            break;
        }
        if let Some(rest) = trimmed.strip_prefix("#[Histogram log format version ") {
            let version = rest.trim_end_matches(']');
            let mut parts = version.splitn(2, '.');
            let major_part = parts.next();
            let minor_part = parts.next();
            // the only format this crate emits is "<major>.<minor>" with a
            // single-digit minor component (e.g. "1.1"); anything else
            // (extra padding, missing minor, non-numeric) is unsupported.
            let well_formed = minor_part.map(|s| s.len() == 1).unwrap_or(false);
            if well_formed {
                major_version = major_part.and_then(|s| s.parse::<u32>().ok());
                minor_version = minor_part.and_then(|s| s.parse::<u32>().ok());
            }
        } else if let Some(rest) = trimmed.strip_prefix("#[StartTime: ") {
            let value = rest.split_whitespace().next().unwrap_or("");
            start_timestamp_seconds = value.parse::<f64>().unwrap_or(0.0);
        }
    }

    match major_version {
        Some(1) => Ok(LogHeader {
            major_version: 1,
            minor_version: minor_version.unwrap_or(0),
            start_timestamp_seconds,
        }),
        _ => Err(LogError::InvalidVersion),
    }
}

/// One decoded interval record.
pub struct LogInterval {
    /// Interval start timestamp, seconds since the log's start time.
    pub start_timestamp: f64,
    /// Interval end timestamp, seconds since the log's start time.
    pub end_timestamp: f64,
    /// The decoded histogram for this interval.
    pub histogram: Histogram<PlainCounts>,
}

/// Read one data line from an interval log, skipping blank lines.
/// Returns `Ok(None)` at end of file.
pub fn read_interval<R: BufRead>(reader: &mut R) -> Result<Option<LogInterval>, LogError> {
    let mut line = String::new();
    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line)?;
        if bytes_read == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('#') || trimmed.starts_with("\"StartTimestamp\"") {
            continue;
        }

        let mut fields = trimmed.splitn(4, ',');
        let start = fields.next().ok_or(LogError::MalformedLine)?;
        let end = fields.next().ok_or(LogError::MalformedLine)?;
        let _max = fields.next().ok_or(LogError::MalformedLine)?;
        let data = fields.next().ok_or(LogError::MalformedLine)?;

        let start_timestamp: f64 = start.parse().map_err(|_| LogError::MalformedLine)?;
        let end_timestamp: f64 = end.parse().map_err(|_| LogError::MalformedLine)?;

        let bytes = crate::base64::decode(data).map_err(|_| LogError::MalformedLine)?;
        let histogram = codec::decode_compressed(&bytes).map_err(LogError::Codec)?;

        return Ok(Some(LogInterval {
            start_timestamp,
            end_timestamp,
            histogram,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counts::PlainCounts;
    use std::io::Cursor;

    fn sample_histogram(corrected: bool) -> Histogram<PlainCounts> {
        let h = Histogram::<PlainCounts>::new(1, 3_600_000_000, 3).unwrap();
        for _ in 0..10_000 {
            h.record(1000);
        }
        if corrected {
            h.record_correct(100_000_000, 10_000);
        } else {
            h.record(100_000_000);
        }
        h
    }

    #[test]
    fn scenario_e_log_round_trip() {
        let start_time = 1_700_000_000.0;
        let mut buffer = Vec::new();
        write_header(&mut buffer, "Test log", start_time).unwrap();

        let corrected = sample_histogram(true);
        let raw = sample_histogram(false);
        write_interval(&mut buffer, 0.0, 1.0, &corrected).unwrap();
        write_interval(&mut buffer, 1.0, 2.0, &raw).unwrap();

        let mut reader = Cursor::new(buffer);
        let header = read_header(&mut reader).unwrap();
        assert_eq!(header.major_version, 1);
        assert_eq!(header.minor_version, 1);
        assert_eq!(header.start_timestamp_seconds.trunc(), 1_700_000_000.0);

        let first = read_interval(&mut reader).unwrap().unwrap();
        assert_eq!(first.histogram.total_count(), corrected.total_count());

        let second = read_interval(&mut reader).unwrap().unwrap();
        assert_eq!(second.histogram.total_count(), raw.total_count());

        assert!(read_interval(&mut reader).unwrap().is_none());
    }

    #[test]
    fn scenario_g_invalid_version() {
        let text = "#[Histogram log format version 1.00]\n";
        let mut reader = Cursor::new(text.as_bytes());
        assert!(matches!(
            read_header(&mut reader),
            Err(LogError::InvalidVersion)
        ));
    }

    #[test]
    fn tolerates_blank_lines_between_intervals() {
        let mut buffer = Vec::new();
        write_header(&mut buffer, "blank line test", 0.0).unwrap();
        let h = sample_histogram(false);
        write_interval(&mut buffer, 0.0, 1.0, &h).unwrap();
        buffer.extend_from_slice(b"\n\n");
        write_interval(&mut buffer, 1.0, 2.0, &h).unwrap();

        let mut reader = Cursor::new(buffer);
        read_header(&mut reader).unwrap();
        assert!(read_interval(&mut reader).unwrap().is_some());
        assert!(read_interval(&mut reader).unwrap().is_some());
        assert!(read_interval(&mut reader).unwrap().is_none());
    }
}
