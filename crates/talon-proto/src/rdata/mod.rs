//! DNS record data (RDATA).
//!
//! The payload of a resource record is a tagged variant keyed by the TYPE
//! field. Types this codec understands get a structured payload; everything
//! else is captured as opaque bytes and round-trips unchanged (RFC 3597).
//! That opaque path also carries OPT and the DNSSEC record types, which are
//! decoded but not interpreted here.

mod mx;
mod soa;
mod srv;
mod text;
mod unknown;

pub use mx::MX;
pub use soa::SOA;
pub use srv::SRV;
pub use text::{HINFO, TXT};
pub use unknown::Unknown;

use crate::error::{Error, Result};
use crate::name::{Name, NameParser};
use crate::rtype::{RecordType, Type};
use bytes::BytesMut;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// DNS record data, keyed by the record TYPE.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum RData {
    /// IPv4 address (A record). RDLENGTH is exactly 4.
    A(Ipv4Addr),

    /// IPv6 address (AAAA record). RDLENGTH is exactly 16.
    AAAA(Ipv6Addr),

    /// Authoritative name server (NS record).
    NS(Name),

    /// Canonical name / alias (CNAME record).
    CNAME(Name),

    /// Domain name pointer for reverse lookups (PTR record).
    PTR(Name),

    /// Delegation name, a subtree-wide alias (DNAME record).
    DNAME(Name),

    /// Mail exchange (MX record).
    MX(MX),

    /// Start of authority (SOA record).
    SOA(SOA),

    /// Text strings (TXT record).
    TXT(TXT),

    /// Host information (HINFO record).
    HINFO(HINFO),

    /// Service location (SRV record).
    SRV(SRV),

    /// Any other TYPE, preserved as raw bytes.
    Unknown(Unknown),
}

impl RData {
    /// Decodes RDATA from the message.
    ///
    /// `offset` points at the first RDATA byte and `rdlength` is the length
    /// the record declared. Name-bearing payloads parse against the whole
    /// message (compression pointers may reach before the record), but every
    /// field has to fit inside the declared RDLENGTH; a known TYPE whose
    /// fields do not fit fails with
    /// [`MalformedRData`](crate::Error::MalformedRData).
    pub fn parse(rtype: Type, message: &[u8], offset: usize, rdlength: u16) -> Result<Self> {
        let rdlength = rdlength as usize;
        let rdata = message
            .get(offset..offset + rdlength)
            .ok_or_else(|| Error::truncated(offset, rdlength))?;

        match rtype.as_known() {
            Some(RecordType::A) => {
                let octets: [u8; 4] = rdata
                    .try_into()
                    .map_err(|_| Error::malformed_rdata("A", format!("RDLENGTH {rdlength}, expected 4")))?;
                Ok(Self::A(Ipv4Addr::from(octets)))
            }
            Some(RecordType::AAAA) => {
                let octets: [u8; 16] = rdata.try_into().map_err(|_| {
                    Error::malformed_rdata("AAAA", format!("RDLENGTH {rdlength}, expected 16"))
                })?;
                Ok(Self::AAAA(Ipv6Addr::from(octets)))
            }
            Some(RecordType::NS) => Ok(Self::NS(parse_name_rdata(
                "NS", message, offset, rdlength,
            )?)),
            Some(RecordType::CNAME) => Ok(Self::CNAME(parse_name_rdata(
                "CNAME", message, offset, rdlength,
            )?)),
            Some(RecordType::PTR) => Ok(Self::PTR(parse_name_rdata(
                "PTR", message, offset, rdlength,
            )?)),
            Some(RecordType::DNAME) => Ok(Self::DNAME(parse_name_rdata(
                "DNAME", message, offset, rdlength,
            )?)),
            Some(RecordType::MX) => Ok(Self::MX(MX::parse(message, offset, rdlength)?)),
            Some(RecordType::SOA) => Ok(Self::SOA(SOA::parse(message, offset, rdlength)?)),
            Some(RecordType::TXT) => Ok(Self::TXT(TXT::parse(rdata)?)),
            Some(RecordType::HINFO) => Ok(Self::HINFO(HINFO::parse(rdata)?)),
            Some(RecordType::SRV) => Ok(Self::SRV(SRV::parse(message, offset, rdlength)?)),
            _ => Ok(Self::Unknown(Unknown::new(rtype.to_u16(), rdata))),
        }
    }

    /// Returns the TYPE this payload belongs to.
    pub fn record_type(&self) -> Type {
        match self {
            Self::A(_) => Type::Known(RecordType::A),
            Self::AAAA(_) => Type::Known(RecordType::AAAA),
            Self::NS(_) => Type::Known(RecordType::NS),
            Self::CNAME(_) => Type::Known(RecordType::CNAME),
            Self::PTR(_) => Type::Known(RecordType::PTR),
            Self::DNAME(_) => Type::Known(RecordType::DNAME),
            Self::MX(_) => Type::Known(RecordType::MX),
            Self::SOA(_) => Type::Known(RecordType::SOA),
            Self::TXT(_) => Type::Known(RecordType::TXT),
            Self::HINFO(_) => Type::Known(RecordType::HINFO),
            Self::SRV(_) => Type::Known(RecordType::SRV),
            Self::Unknown(u) => Type::from_u16(u.type_code()),
        }
    }

    /// Returns the encoded RDATA length; this is what RDLENGTH is recomputed
    /// from on every encode.
    pub fn wire_len(&self) -> usize {
        match self {
            Self::A(_) => 4,
            Self::AAAA(_) => 16,
            Self::NS(name) | Self::CNAME(name) | Self::PTR(name) | Self::DNAME(name) => {
                name.wire_len()
            }
            Self::MX(mx) => mx.wire_len(),
            Self::SOA(soa) => soa.wire_len(),
            Self::TXT(txt) => txt.wire_len(),
            Self::HINFO(hinfo) => hinfo.wire_len(),
            Self::SRV(srv) => srv.wire_len(),
            Self::Unknown(u) => u.wire_len(),
        }
    }

    /// Appends the RDATA to a buffer, names uncompressed.
    pub fn write_to(&self, buf: &mut BytesMut) {
        match self {
            Self::A(addr) => buf.extend_from_slice(&addr.octets()),
            Self::AAAA(addr) => buf.extend_from_slice(&addr.octets()),
            Self::NS(name) | Self::CNAME(name) | Self::PTR(name) | Self::DNAME(name) => {
                name.write_wire(buf);
            }
            Self::MX(mx) => mx.write_to(buf),
            Self::SOA(soa) => soa.write_to(buf),
            Self::TXT(txt) => txt.write_to(buf),
            Self::HINFO(hinfo) => hinfo.write_to(buf),
            Self::SRV(srv) => srv.write_to(buf),
            Self::Unknown(u) => u.write_to(buf),
        }
    }

    /// Returns the IPv4 address if this is an A payload.
    #[inline]
    pub fn as_a(&self) -> Option<Ipv4Addr> {
        match self {
            Self::A(addr) => Some(*addr),
            _ => None,
        }
    }

    /// Returns the IPv6 address if this is an AAAA payload.
    #[inline]
    pub fn as_aaaa(&self) -> Option<Ipv6Addr> {
        match self {
            Self::AAAA(addr) => Some(*addr),
            _ => None,
        }
    }

    /// Returns the target name if this is a CNAME payload.
    #[inline]
    pub fn as_cname(&self) -> Option<&Name> {
        match self {
            Self::CNAME(name) => Some(name),
            _ => None,
        }
    }
}

/// Decodes a payload that is a single (possibly compressed) name.
fn parse_name_rdata(
    rtype: &'static str,
    message: &[u8],
    offset: usize,
    rdlength: usize,
) -> Result<Name> {
    let (name, consumed) = NameParser::new(message).parse_name(offset)?;
    if consumed > rdlength {
        return Err(Error::malformed_rdata(
            rtype,
            format!("name occupies {consumed} bytes, RDLENGTH is {rdlength}"),
        ));
    }
    Ok(name)
}

impl fmt::Display for RData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A(addr) => write!(f, "{addr}"),
            Self::AAAA(addr) => write!(f, "{addr}"),
            Self::NS(name) | Self::CNAME(name) | Self::PTR(name) | Self::DNAME(name) => {
                write!(f, "{name}")
            }
            Self::MX(mx) => write!(f, "{mx}"),
            Self::SOA(soa) => write!(f, "{soa}"),
            Self::TXT(txt) => write!(f, "{txt}"),
            Self::HINFO(hinfo) => write!(f, "{hinfo}"),
            Self::SRV(srv) => write!(f, "{srv}"),
            Self::Unknown(u) => write!(f, "{u}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_a_rdata() {
        let rdata = RData::parse(Type::Known(RecordType::A), &[0x7F, 0, 0, 1], 0, 4).unwrap();
        assert_eq!(rdata, RData::A(Ipv4Addr::new(127, 0, 0, 1)));
        assert_eq!(rdata.as_a(), Some(Ipv4Addr::new(127, 0, 0, 1)));
        assert_eq!(rdata.wire_len(), 4);
        assert_eq!(rdata.to_string(), "127.0.0.1");
    }

    #[test]
    fn test_a_rdata_length_mismatch() {
        let result = RData::parse(Type::Known(RecordType::A), &[0x7F, 0, 0, 1], 0, 3);
        assert!(matches!(
            result,
            Err(Error::MalformedRData { rtype: "A", .. })
        ));

        let result = RData::parse(Type::Known(RecordType::A), &[0x7F, 0, 0, 1, 0], 0, 5);
        assert!(matches!(
            result,
            Err(Error::MalformedRData { rtype: "A", .. })
        ));
    }

    #[test]
    fn test_aaaa_rdata() {
        let bytes: [u8; 16] = [
            0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x01,
        ];
        let rdata = RData::parse(Type::Known(RecordType::AAAA), &bytes, 0, 16).unwrap();
        assert_eq!(rdata.to_string(), "2001:db8::1");

        let result = RData::parse(Type::Known(RecordType::AAAA), &bytes, 0, 15);
        assert!(matches!(
            result,
            Err(Error::MalformedRData { rtype: "AAAA", .. })
        ));
    }

    #[test]
    fn test_cname_rdata() {
        let name = Name::from_str("www.example.com").unwrap();
        let mut buf = BytesMut::new();
        name.write_wire(&mut buf);

        let rdata = RData::parse(
            Type::Known(RecordType::CNAME),
            &buf,
            0,
            buf.len() as u16,
        )
        .unwrap();
        assert_eq!(rdata.as_cname(), Some(&name));
    }

    #[test]
    fn test_name_rdata_exceeds_rdlength() {
        let name = Name::from_str("www.example.com").unwrap();
        let mut buf = BytesMut::new();
        name.write_wire(&mut buf);

        // Declares fewer bytes than the name occupies.
        let result = RData::parse(Type::Known(RecordType::NS), &buf, 0, 4);
        assert!(matches!(
            result,
            Err(Error::MalformedRData { rtype: "NS", .. })
        ));
    }

    #[test]
    fn test_unknown_rdata_roundtrip() {
        let payload = [0xDE, 0xAD, 0xBE, 0xEF];
        let rdata = RData::parse(Type::Unknown(65280), &payload, 0, 4).unwrap();

        assert_eq!(rdata.record_type(), Type::Unknown(65280));
        assert_eq!(rdata.wire_len(), 4);

        let mut buf = BytesMut::new();
        rdata.write_to(&mut buf);
        assert_eq!(&buf[..], &payload);
    }

    #[test]
    fn test_dnssec_types_stay_opaque() {
        // DNSKEY is a known TYPE code but has no structured decoder here.
        let payload = [0x01, 0x01, 0x03, 0x08];
        let rdata = RData::parse(Type::Known(RecordType::DNSKEY), &payload, 0, 4).unwrap();

        match &rdata {
            RData::Unknown(u) => {
                assert_eq!(u.type_code(), RecordType::DNSKEY.to_u16());
                assert_eq!(u.data(), &payload);
            }
            other => panic!("expected opaque payload, got {other:?}"),
        }
    }
}
