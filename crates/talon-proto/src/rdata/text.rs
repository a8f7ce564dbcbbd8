//! Text-carrying record types (TXT, HINFO - RFC 1035).
//!
//! Both are built from `<character-string>`s: a length octet followed by up
//! to 255 bytes of content.

use crate::error::{Error, Result};
use bytes::BytesMut;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Reads one `<character-string>` starting at `pos`.
fn read_character_string<'a>(
    rtype: &'static str,
    data: &'a [u8],
    pos: usize,
) -> Result<(&'a [u8], usize)> {
    let len = *data
        .get(pos)
        .ok_or_else(|| Error::malformed_rdata(rtype, "missing character-string length"))?
        as usize;

    let content = data.get(pos + 1..pos + 1 + len).ok_or_else(|| {
        Error::malformed_rdata(
            rtype,
            format!("character-string length {len} exceeds remaining RDATA"),
        )
    })?;

    Ok((content, 1 + len))
}

/// Renders a character-string in quoted presentation format.
fn fmt_character_string(f: &mut fmt::Formatter<'_>, s: &[u8]) -> fmt::Result {
    write!(f, "\"")?;
    for &byte in s {
        if byte == b'"' || byte == b'\\' {
            write!(f, "\\{}", byte as char)?;
        } else if byte.is_ascii_graphic() || byte == b' ' {
            write!(f, "{}", byte as char)?;
        } else {
            write!(f, "\\{byte:03}")?;
        }
    }
    write!(f, "\"")
}

/// TXT record payload: one or more character-strings.
///
/// Consumers that span multiple strings (SPF, DKIM, domain verification)
/// concatenate them; [`TXT::data`] does that for you.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TXT {
    /// The strings, each at most 255 bytes.
    strings: SmallVec<[Vec<u8>; 2]>,
}

impl TXT {
    /// Creates a TXT payload from a list of strings.
    pub fn new(strings: impl IntoIterator<Item = impl Into<Vec<u8>>>) -> Self {
        Self {
            strings: strings.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a TXT payload holding a single string.
    pub fn from_string(s: impl Into<Vec<u8>>) -> Self {
        Self {
            strings: smallvec::smallvec![s.into()],
        }
    }

    /// Returns the individual strings.
    pub fn strings(&self) -> &[Vec<u8>] {
        &self.strings
    }

    /// Returns all strings concatenated.
    pub fn data(&self) -> Vec<u8> {
        self.strings.iter().flatten().copied().collect()
    }

    /// Returns the concatenated data as UTF-8, if valid.
    pub fn text(&self) -> Option<String> {
        String::from_utf8(self.data()).ok()
    }

    /// Decodes a TXT payload from exactly the RDATA bytes.
    pub fn parse(rdata: &[u8]) -> Result<Self> {
        let mut strings = SmallVec::new();
        let mut pos = 0;

        while pos < rdata.len() {
            let (content, consumed) = read_character_string("TXT", rdata, pos)?;
            strings.push(content.to_vec());
            pos += consumed;
        }

        Ok(Self { strings })
    }

    /// Returns the encoded length.
    pub fn wire_len(&self) -> usize {
        self.strings
            .iter()
            .map(|s| s.chunks(255).map(|c| 1 + c.len()).sum::<usize>())
            .sum()
    }

    /// Appends the payload to a buffer, splitting oversized strings into
    /// 255-byte chunks.
    pub fn write_to(&self, buf: &mut BytesMut) {
        for s in &self.strings {
            for chunk in s.chunks(255) {
                buf.extend_from_slice(&[chunk.len() as u8]);
                buf.extend_from_slice(chunk);
            }
        }
    }
}

impl fmt::Display for TXT {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, s) in self.strings.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            fmt_character_string(f, s)?;
        }
        Ok(())
    }
}

/// HINFO record payload: host CPU and operating system strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HINFO {
    /// CPU type.
    cpu: Vec<u8>,
    /// Operating system.
    os: Vec<u8>,
}

impl HINFO {
    /// Creates a new HINFO payload.
    pub fn new(cpu: impl Into<Vec<u8>>, os: impl Into<Vec<u8>>) -> Self {
        Self {
            cpu: cpu.into(),
            os: os.into(),
        }
    }

    /// Returns the CPU string.
    pub fn cpu(&self) -> &[u8] {
        &self.cpu
    }

    /// Returns the OS string.
    pub fn os(&self) -> &[u8] {
        &self.os
    }

    /// Decodes an HINFO payload from exactly the RDATA bytes: two
    /// character-strings, nothing more.
    pub fn parse(rdata: &[u8]) -> Result<Self> {
        let (cpu, cpu_len) = read_character_string("HINFO", rdata, 0)?;
        let (os, os_len) = read_character_string("HINFO", rdata, cpu_len)?;

        if cpu_len + os_len != rdata.len() {
            return Err(Error::malformed_rdata(
                "HINFO",
                format!(
                    "{} trailing bytes after OS string",
                    rdata.len() - cpu_len - os_len
                ),
            ));
        }

        Ok(Self {
            cpu: cpu.to_vec(),
            os: os.to_vec(),
        })
    }

    /// Returns the encoded length.
    pub fn wire_len(&self) -> usize {
        2 + self.cpu.len() + self.os.len()
    }

    /// Appends the payload to a buffer.
    pub fn write_to(&self, buf: &mut BytesMut) {
        buf.extend_from_slice(&[self.cpu.len() as u8]);
        buf.extend_from_slice(&self.cpu);
        buf.extend_from_slice(&[self.os.len() as u8]);
        buf.extend_from_slice(&self.os);
    }
}

impl fmt::Display for HINFO {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_character_string(f, &self.cpu)?;
        write!(f, " ")?;
        fmt_character_string(f, &self.os)
    }
}
