//! DNS wire format error types.
//!
//! Every decode failure identifies the offset and field that broke, so the
//! caller can log or map it to a FORMERR response without re-parsing.

use thiserror::Error;

/// Result type alias for DNS wire format operations.
pub type Result<T> = std::result::Result<T, Error>;

/// DNS wire format errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Fewer bytes available than a field or declared count requires.
    #[error("truncated message: need {needed} bytes at offset {offset}")]
    TruncatedMessage {
        /// Offset where the shortfall occurred.
        offset: usize,
        /// Number of bytes the field required.
        needed: usize,
    },

    /// A label length octet uses the reserved `0x40`/`0x80` bit patterns.
    #[error("invalid label length 0x{value:02X} at offset {offset}")]
    InvalidLabelLength {
        /// Offset of the length octet.
        offset: usize,
        /// The offending octet.
        value: u8,
    },

    /// Name decoding exceeded the pointer-hop bound, or a compression
    /// pointer did not point strictly backward.
    #[error("compression loop detected at offset {offset}")]
    CompressionLoopDetected {
        /// Offset of the pointer that tripped the bound.
        offset: usize,
    },

    /// A known TYPE's RDLENGTH is inconsistent with its field layout.
    #[error("malformed {rtype} RDATA: {reason}")]
    MalformedRData {
        /// Record type name.
        rtype: &'static str,
        /// What was inconsistent.
        reason: String,
    },

    /// Bytes remain after all declared sections were consumed (strict
    /// decoding only).
    #[error("trailing garbage: {remaining} bytes left at offset {offset}")]
    TrailingGarbage {
        /// Offset of the first unconsumed byte.
        offset: usize,
        /// Number of unconsumed bytes.
        remaining: usize,
    },

    /// A domain name exceeds the 255-octet wire length bound.
    #[error("name too long: {length} bytes exceeds maximum of 255")]
    NameTooLong {
        /// Wire length the name would have had.
        length: usize,
    },

    /// A label exceeds the 63-octet bound.
    #[error("label too long: {length} bytes exceeds maximum of 63")]
    LabelTooLong {
        /// Actual label length.
        length: usize,
    },

    /// A label contains a character outside the accepted set.
    #[error("invalid character {character:?} in label at position {position}")]
    InvalidLabelChar {
        /// The offending character.
        character: char,
        /// Position within the label.
        position: usize,
    },

    /// The reserved Z bits in the header are nonzero (strict decoding only).
    #[error("reserved header bits set: Z={value:#05b}")]
    ReservedBitsSet {
        /// The 3-bit Z field value.
        value: u8,
    },
}

impl Error {
    /// Creates a new `TruncatedMessage` error.
    #[inline]
    pub fn truncated(offset: usize, needed: usize) -> Self {
        Self::TruncatedMessage { offset, needed }
    }

    /// Creates a new `MalformedRData` error.
    #[inline]
    pub fn malformed_rdata(rtype: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedRData {
            rtype,
            reason: reason.into(),
        }
    }

    /// Returns true if this error means the message was not even shaped like
    /// a DNS message and should be dropped rather than answered.
    #[inline]
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::TruncatedMessage { .. }
                | Self::InvalidLabelLength { .. }
                | Self::CompressionLoopDetected { .. }
        )
    }

    /// Returns true if this error maps to a FORMERR response: the framing
    /// was readable but a field violated the format.
    #[inline]
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedRData { .. }
                | Self::NameTooLong { .. }
                | Self::LabelTooLong { .. }
                | Self::TrailingGarbage { .. }
                | Self::ReservedBitsSet { .. }
        )
    }
}
