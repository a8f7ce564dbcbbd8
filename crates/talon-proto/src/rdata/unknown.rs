//! Opaque payloads for unrecognized record types (RFC 3597).

use bytes::BytesMut;
use data_encoding::HEXLOWER;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An uninterpreted RDATA payload.
///
/// Holds the TYPE code and the raw RDLENGTH bytes, so records this codec
/// has no decoder for still re-encode byte-identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Unknown {
    /// The record TYPE code.
    type_code: u16,
    /// The raw RDATA bytes.
    data: Vec<u8>,
}

impl Unknown {
    /// Creates an opaque payload.
    pub fn new(type_code: u16, data: impl Into<Vec<u8>>) -> Self {
        Self {
            type_code,
            data: data.into(),
        }
    }

    /// Returns the record TYPE code.
    #[inline]
    pub const fn type_code(&self) -> u16 {
        self.type_code
    }

    /// Returns the raw RDATA bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the encoded length.
    #[inline]
    pub fn wire_len(&self) -> usize {
        self.data.len()
    }

    /// Appends the raw bytes to a buffer.
    pub fn write_to(&self, buf: &mut BytesMut) {
        buf.extend_from_slice(&self.data);
    }
}

impl fmt::Display for Unknown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // RFC 3597 generic encoding: \# <length> <hex>
        write!(f, "\\# {} {}", self.data.len(), HEXLOWER.encode(&self.data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_accessors() {
        let unknown = Unknown::new(65280, vec![1, 2, 3, 4]);
        assert_eq!(unknown.type_code(), 65280);
        assert_eq!(unknown.data(), &[1, 2, 3, 4]);
        assert_eq!(unknown.wire_len(), 4);
    }

    #[test]
    fn test_unknown_write() {
        let unknown = Unknown::new(999, vec![0xAA, 0xBB]);
        let mut buf = BytesMut::new();
        unknown.write_to(&mut buf);
        assert_eq!(&buf[..], &[0xAA, 0xBB]);
    }

    #[test]
    fn test_unknown_display() {
        let unknown = Unknown::new(65280, vec![0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(unknown.to_string(), "\\# 4 deadbeef");

        let empty = Unknown::new(65280, Vec::new());
        assert_eq!(empty.to_string(), "\\# 0 ");
    }
}
