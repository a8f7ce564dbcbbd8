//! Service location records (SRV, RFC 2782).

use crate::error::{Error, Result};
use crate::name::{Name, NameParser};
use crate::wire::WireReader;
use bytes::BytesMut;
use serde::{Deserialize, Serialize};
use std::fmt;

/// SRV record payload: where a named service lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SRV {
    /// Priority (lower is tried first).
    priority: u16,
    /// Weight for load balancing among equal priorities.
    weight: u16,
    /// TCP/UDP port of the service.
    port: u16,
    /// Host providing the service.
    target: Name,
}

impl SRV {
    /// Creates a new SRV payload.
    #[inline]
    pub fn new(priority: u16, weight: u16, port: u16, target: Name) -> Self {
        Self {
            priority,
            weight,
            port,
            target,
        }
    }

    /// Returns the priority.
    #[inline]
    pub const fn priority(&self) -> u16 {
        self.priority
    }

    /// Returns the weight.
    #[inline]
    pub const fn weight(&self) -> u16 {
        self.weight
    }

    /// Returns the port.
    #[inline]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Returns the target host.
    #[inline]
    pub fn target(&self) -> &Name {
        &self.target
    }

    /// Decodes an SRV payload at `offset`, bounded by the record's RDLENGTH.
    pub fn parse(message: &[u8], offset: usize, rdlength: usize) -> Result<Self> {
        if rdlength < 6 {
            return Err(Error::malformed_rdata(
                "SRV",
                format!("RDLENGTH {rdlength} too short for fixed fields"),
            ));
        }

        let mut rd = WireReader::at(message, offset)?;
        let priority = rd.read_u16()?;
        let weight = rd.read_u16()?;
        let port = rd.read_u16()?;

        let (target, consumed) = NameParser::new(message).parse_name(offset + 6)?;
        if 6 + consumed > rdlength {
            return Err(Error::malformed_rdata(
                "SRV",
                format!("fields occupy {} bytes, RDLENGTH is {rdlength}", 6 + consumed),
            ));
        }

        Ok(Self {
            priority,
            weight,
            port,
            target,
        })
    }

    /// Returns the encoded length.
    #[inline]
    pub fn wire_len(&self) -> usize {
        6 + self.target.wire_len()
    }

    /// Appends the payload to a buffer.
    pub fn write_to(&self, buf: &mut BytesMut) {
        buf.extend_from_slice(&self.priority.to_be_bytes());
        buf.extend_from_slice(&self.weight.to_be_bytes());
        buf.extend_from_slice(&self.port.to_be_bytes());
        self.target.write_wire(buf);
    }
}

impl fmt::Display for SRV {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.priority, self.weight, self.port, self.target
        )
    }
}
