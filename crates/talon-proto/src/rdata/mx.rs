//! Mail exchange records (MX, RFC 1035).

use crate::error::{Error, Result};
use crate::name::{Name, NameParser};
use crate::wire::WireReader;
use bytes::BytesMut;
use serde::{Deserialize, Serialize};
use std::fmt;

/// MX record payload: a preference value and a mail server name.
///
/// Lower preference values are tried first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MX {
    /// The preference (lower is more preferred).
    preference: u16,
    /// The mail exchange host.
    exchange: Name,
}

impl MX {
    /// Creates a new MX payload.
    #[inline]
    pub fn new(preference: u16, exchange: Name) -> Self {
        Self {
            preference,
            exchange,
        }
    }

    /// Returns the preference value.
    #[inline]
    pub const fn preference(&self) -> u16 {
        self.preference
    }

    /// Returns the mail exchange host.
    #[inline]
    pub fn exchange(&self) -> &Name {
        &self.exchange
    }

    /// Decodes an MX payload at `offset`, bounded by the record's RDLENGTH.
    pub fn parse(message: &[u8], offset: usize, rdlength: usize) -> Result<Self> {
        if rdlength < 2 {
            return Err(Error::malformed_rdata(
                "MX",
                format!("RDLENGTH {rdlength} too short for preference field"),
            ));
        }

        let preference = WireReader::at(message, offset)?.read_u16()?;
        let (exchange, consumed) = NameParser::new(message).parse_name(offset + 2)?;

        if 2 + consumed > rdlength {
            return Err(Error::malformed_rdata(
                "MX",
                format!("fields occupy {} bytes, RDLENGTH is {rdlength}", 2 + consumed),
            ));
        }

        Ok(Self {
            preference,
            exchange,
        })
    }

    /// Returns the encoded length.
    #[inline]
    pub fn wire_len(&self) -> usize {
        2 + self.exchange.wire_len()
    }

    /// Appends the payload to a buffer.
    pub fn write_to(&self, buf: &mut BytesMut) {
        buf.extend_from_slice(&self.preference.to_be_bytes());
        self.exchange.write_wire(buf);
    }
}

impl fmt::Display for MX {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.preference, self.exchange)
    }
}

impl PartialOrd for MX {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MX {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Lower preference sorts first.
        self.preference
            .cmp(&other.preference)
            .then_with(|| self.exchange.as_wire().cmp(other.exchange.as_wire()))
    }
}
