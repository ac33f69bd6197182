// Copyright 2020 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use thiserror::Error;

/// Possible errors returned by operations that construct or record into a
/// histogram.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum HistogramError {
    /// One or more of the constructor arguments was out of its valid range.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// An operation was attempted between two histograms whose `Config`s
    /// do not match.
    #[error("histograms have incompatible configurations")]
    IncompatibleConfig,
}

/// Possible errors returned by the binary encoder/decoder.
#[derive(Error, Debug)]
pub enum CodecError {
    /// The compression flyweight's cookie did not match the expected magic.
    #[error("compression cookie mismatch")]
    CompressionCookieMismatch,
    /// The encoding flyweight's cookie did not match the expected magic.
    #[error("encoding cookie mismatch")]
    EncodingCookieMismatch,
    /// The deflate stream could not be initialized.
    #[error("failed to initialize deflate stream")]
    DeflateInitFailed,
    /// A deflate step failed.
    #[error("deflate failed: {0}")]
    DeflateFailed(std::io::Error),
    /// The inflate stream could not be initialized.
    #[error("failed to initialize inflate stream")]
    InflateInitFailed,
    /// An inflate step failed.
    #[error("inflate failed: {0}")]
    InflateFailed(std::io::Error),
    /// The decoded header claims a `counts_len` too large to be trusted.
    #[error("decoded counts array would overflow available memory")]
    CountsOverflow,
    /// The decoded histogram's configuration does not match a provided
    /// accumulator histogram.
    #[error("decoded histogram configuration is incompatible with destination")]
    IncompatibleConfig,
    /// An underlying I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Possible errors returned while reading an interval log.
#[derive(Error, Debug)]
pub enum LogError {
    /// The log header was missing a recognizable format-version comment,
    /// or its major version was not 1.
    #[error("invalid or missing log format version")]
    InvalidVersion,
    /// A data line could not be parsed as `"ts,ts,ts,base64"`.
    #[error("malformed log data line")]
    MalformedLine,
    /// An error occurred decoding the histogram embedded in a data line.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
    /// An underlying I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
