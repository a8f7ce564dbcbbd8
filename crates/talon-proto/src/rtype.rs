//! DNS record types.
//!
//! The TYPE field selects the layout of a resource record's RDATA. This
//! module defines the types this codec knows by name; every other 16-bit
//! value is carried through [`Type::Unknown`] and its RDATA stays opaque.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;

/// DNS record type.
///
/// Covers the RFC 1035 core plus the widely deployed extensions. Types
/// listed here but without a dedicated RDATA decoder (OPT and the DNSSEC
/// family) still decode: their payload is kept as opaque bytes.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    IntoPrimitive,
    TryFromPrimitive,
    Serialize,
    Deserialize,
)]
#[repr(u16)]
pub enum RecordType {
    /// IPv4 address - RFC 1035
    A = 1,
    /// Authoritative name server - RFC 1035
    NS = 2,
    /// Canonical name (alias) - RFC 1035
    CNAME = 5,
    /// Start of authority - RFC 1035
    SOA = 6,
    /// Null record - RFC 1035
    NULL = 10,
    /// Domain name pointer - RFC 1035
    PTR = 12,
    /// Host information - RFC 1035
    HINFO = 13,
    /// Mail exchange - RFC 1035
    MX = 15,
    /// Text strings - RFC 1035
    TXT = 16,
    /// IPv6 address - RFC 3596
    AAAA = 28,
    /// Server selection - RFC 2782
    SRV = 33,
    /// Naming authority pointer - RFC 3403
    NAPTR = 35,
    /// Delegation name - RFC 6672
    DNAME = 39,
    /// EDNS(0) option pseudo-RR - RFC 6891
    OPT = 41,
    /// Delegation signer - RFC 4034
    DS = 43,
    /// SSH key fingerprint - RFC 4255
    SSHFP = 44,
    /// DNSSEC signature - RFC 4034
    RRSIG = 46,
    /// Next secure - RFC 4034
    NSEC = 47,
    /// DNS public key - RFC 4034
    DNSKEY = 48,
    /// Next secure v3 - RFC 5155
    NSEC3 = 50,
    /// NSEC3 parameters - RFC 5155
    NSEC3PARAM = 51,
    /// TLSA certificate association - RFC 6698
    TLSA = 52,
    /// Service binding - RFC 9460
    SVCB = 64,
    /// HTTPS service binding - RFC 9460
    HTTPS = 65,
    /// Sender policy framework - RFC 7208
    SPF = 99,
    /// Incremental zone transfer - RFC 1995
    IXFR = 251,
    /// Full zone transfer - RFC 5936
    AXFR = 252,
    /// Any record type - RFC 1035, RFC 8482
    ANY = 255,
    /// Certification authority authorization - RFC 8659
    CAA = 257,
}

impl RecordType {
    /// Returns the numeric value of the record type.
    #[inline]
    pub const fn to_u16(self) -> u16 {
        self as u16
    }

    /// Creates a record type from its numeric value.
    #[inline]
    pub fn from_u16(value: u16) -> Option<Self> {
        Self::try_from(value).ok()
    }

    /// Returns true if this is a DNSSEC-related record type.
    #[inline]
    pub const fn is_dnssec(self) -> bool {
        matches!(
            self,
            Self::DS
                | Self::RRSIG
                | Self::NSEC
                | Self::DNSKEY
                | Self::NSEC3
                | Self::NSEC3PARAM
        )
    }

    /// Returns true if this is a query-only type (QTYPE), never valid as a
    /// record in a response section.
    #[inline]
    pub const fn is_query_type(self) -> bool {
        matches!(self, Self::IXFR | Self::AXFR | Self::ANY)
    }

    /// Returns the conventional name of the record type.
    pub const fn name(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::NS => "NS",
            Self::CNAME => "CNAME",
            Self::SOA => "SOA",
            Self::NULL => "NULL",
            Self::PTR => "PTR",
            Self::HINFO => "HINFO",
            Self::MX => "MX",
            Self::TXT => "TXT",
            Self::AAAA => "AAAA",
            Self::SRV => "SRV",
            Self::NAPTR => "NAPTR",
            Self::DNAME => "DNAME",
            Self::OPT => "OPT",
            Self::DS => "DS",
            Self::SSHFP => "SSHFP",
            Self::RRSIG => "RRSIG",
            Self::NSEC => "NSEC",
            Self::DNSKEY => "DNSKEY",
            Self::NSEC3 => "NSEC3",
            Self::NSEC3PARAM => "NSEC3PARAM",
            Self::TLSA => "TLSA",
            Self::SVCB => "SVCB",
            Self::HTTPS => "HTTPS",
            Self::SPF => "SPF",
            Self::IXFR => "IXFR",
            Self::AXFR => "AXFR",
            Self::ANY => "ANY",
            Self::CAA => "CAA",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Default for RecordType {
    fn default() -> Self {
        Self::A
    }
}

/// A TYPE value that can represent both named types and arbitrary values.
///
/// Unknown values are preserved so that records of types this codec has
/// never heard of still round-trip (RFC 3597).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Type {
    /// A known, named record type.
    Known(RecordType),
    /// An unrecognized type value.
    Unknown(u16),
}

impl Type {
    /// Creates a type from a u16 wire value.
    #[inline]
    pub fn from_u16(value: u16) -> Self {
        RecordType::from_u16(value)
            .map(Self::Known)
            .unwrap_or(Self::Unknown(value))
    }

    /// Returns the numeric wire value.
    #[inline]
    pub const fn to_u16(self) -> u16 {
        match self {
            Self::Known(t) => t.to_u16(),
            Self::Unknown(v) => v,
        }
    }

    /// Returns the named type, if known.
    #[inline]
    pub const fn as_known(self) -> Option<RecordType> {
        match self {
            Self::Known(t) => Some(t),
            Self::Unknown(_) => None,
        }
    }
}

impl From<RecordType> for Type {
    fn from(t: RecordType) -> Self {
        Self::Known(t)
    }
}

impl From<u16> for Type {
    fn from(value: u16) -> Self {
        Self::from_u16(value)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(t) => write!(f, "{t}"),
            Self::Unknown(v) => write!(f, "TYPE{v}"),
        }
    }
}

impl Default for Type {
    fn default() -> Self {
        Self::Known(RecordType::A)
    }
}
