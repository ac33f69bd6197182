// Copyright 2020 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Standard base64 framing (`A-Za-z0-9+/`, `=` padded) for embedding an
//! encoded histogram inside an interval log line.

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Encode `bytes` using the standard base64 alphabet with `=` padding.
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode a standard base64 string. Fails if the input is not valid
/// base64 (wrong alphabet, wrong padding, truncated group).
pub fn decode(text: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(text.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_f_boundary_vectors() {
        assert_eq!(encode(b"Man"), "TWFu");
        assert_eq!(
            encode(b"any carnal pleasure."),
            "YW55IGNhcm5hbCBwbGVhc3VyZS4="
        );
        assert_eq!(
            encode(b"any carnal pleasure"),
            "YW55IGNhcm5hbCBwbGVhc3VyZQ=="
        );
    }

    #[test]
    fn round_trips() {
        for input in [
            &b""[..],
            b"M",
            b"Ma",
            b"Man",
            b"any carnal pleasure.",
            b"any carnal pleasure",
        ] {
            let encoded = encode(input);
            assert_eq!(decode(&encoded).unwrap(), input);
        }
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(decode("not valid base64!!").is_err());
    }
}
