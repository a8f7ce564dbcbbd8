//! DNS response codes.
//!
//! The 4-bit RCODE field in the header indicates the status of a response.
//! See RFC 1035 Section 4.1.1 and RFC 6895 for the registry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// DNS response code.
///
/// Only the 4 header bits are modeled here; extended RCODEs require EDNS0,
/// which this codec treats as an opaque OPT record. Reserved values survive
/// a decode/encode round trip unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rcode {
    /// No error condition - RFC 1035.
    NoError,
    /// Format error: the server could not interpret the query - RFC 1035.
    FormErr,
    /// Server failure - RFC 1035.
    ServFail,
    /// Name error: the queried domain does not exist - RFC 1035.
    NXDomain,
    /// The server does not support the requested kind of query - RFC 1035.
    NotImp,
    /// The server refuses to perform the operation - RFC 1035.
    Refused,
    /// Name exists when it should not - RFC 2136.
    YXDomain,
    /// RR set exists when it should not - RFC 2136.
    YXRRSet,
    /// RR set that should exist does not - RFC 2136.
    NXRRSet,
    /// Server not authoritative for the zone - RFC 2136.
    NotAuth,
    /// Name not contained in zone - RFC 2136.
    NotZone,
    /// A reserved value (11-15), preserved verbatim.
    Reserved(u8),
}

impl Rcode {
    /// Creates a response code from its 4-bit wire value. The upper four
    /// bits of the argument are ignored.
    #[inline]
    pub fn from_u4(value: u8) -> Self {
        match value & 0x0F {
            0 => Self::NoError,
            1 => Self::FormErr,
            2 => Self::ServFail,
            3 => Self::NXDomain,
            4 => Self::NotImp,
            5 => Self::Refused,
            6 => Self::YXDomain,
            7 => Self::YXRRSet,
            8 => Self::NXRRSet,
            9 => Self::NotAuth,
            10 => Self::NotZone,
            other => Self::Reserved(other),
        }
    }

    /// Returns the 4-bit wire value.
    #[inline]
    pub const fn to_u4(self) -> u8 {
        match self {
            Self::NoError => 0,
            Self::FormErr => 1,
            Self::ServFail => 2,
            Self::NXDomain => 3,
            Self::NotImp => 4,
            Self::Refused => 5,
            Self::YXDomain => 6,
            Self::YXRRSet => 7,
            Self::NXRRSet => 8,
            Self::NotAuth => 9,
            Self::NotZone => 10,
            Self::Reserved(v) => v,
        }
    }

    /// Returns true if this response indicates success.
    #[inline]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::NoError)
    }

    /// Returns true if this response indicates the name does not exist.
    #[inline]
    pub const fn is_nxdomain(self) -> bool {
        matches!(self, Self::NXDomain)
    }

    /// Returns true if this response indicates a server-side failure.
    #[inline]
    pub const fn is_server_error(self) -> bool {
        matches!(self, Self::ServFail)
    }

    /// Returns the conventional name of the response code.
    pub fn name(self) -> &'static str {
        match self {
            Self::NoError => "NOERROR",
            Self::FormErr => "FORMERR",
            Self::ServFail => "SERVFAIL",
            Self::NXDomain => "NXDOMAIN",
            Self::NotImp => "NOTIMP",
            Self::Refused => "REFUSED",
            Self::YXDomain => "YXDOMAIN",
            Self::YXRRSet => "YXRRSET",
            Self::NXRRSet => "NXRRSET",
            Self::NotAuth => "NOTAUTH",
            Self::NotZone => "NOTZONE",
            Self::Reserved(_) => "RESERVED",
        }
    }
}

impl fmt::Display for Rcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reserved(v) => write!(f, "RCODE{v}"),
            other => write!(f, "{}", other.name()),
        }
    }
}

impl Default for Rcode {
    fn default() -> Self {
        Self::NoError
    }
}
