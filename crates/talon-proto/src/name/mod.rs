//! DNS domain names.
//!
//! A domain name is a sequence of labels. On the wire each label is
//! length-prefixed and the sequence ends with a zero-length root label; the
//! whole encoding is capped at 255 octets and each label at 63. Messages may
//! replace a tail of the sequence with a compression pointer; see
//! [`NameParser`] for decoding those.
//!
//! [`Name`] stores the uncompressed wire form inline and compares and hashes
//! case-insensitively, per RFC 1035.

mod label;
mod parse;

pub use label::{Label, LabelIter};
pub use parse::{NameCompressor, NameParser};

use crate::error::{Error, Result};
use crate::{MAX_LABEL_LENGTH, MAX_NAME_LENGTH};
use bytes::BytesMut;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A DNS domain name.
///
/// The in-memory representation is the uncompressed wire format, root
/// terminator included, so `example.com.` is stored as
///
/// ```text
/// 07 'e' 'x' 'a' 'm' 'p' 'l' 'e' 03 'c' 'o' 'm' 00
/// ```
///
/// Most names fit the inline buffer and never touch the heap.
///
/// # Comparison Semantics
///
/// Equality and hashing are ASCII-case-insensitive, per RFC 1035. Label
/// boundaries are part of the comparison: `ab.c.` and `a.bc.` differ.
#[derive(Clone)]
pub struct Name {
    /// Uncompressed wire format, always ending in the root label.
    wire: SmallVec<[u8; 64]>,
}

impl Name {
    /// Returns the root domain name.
    #[inline]
    pub fn root() -> Self {
        Self {
            wire: smallvec::smallvec![0],
        }
    }

    /// Builds a name from a sequence of label byte strings, root excluded.
    ///
    /// Fails with [`Error::LabelTooLong`] for a label over 63 bytes, with
    /// [`Error::InvalidLabelChar`] for an empty label, and with
    /// [`Error::NameTooLong`] if the encoding would exceed 255 octets.
    pub fn from_labels<I, L>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = L>,
        L: AsRef<[u8]>,
    {
        let mut wire = SmallVec::<[u8; 64]>::new();

        for label in labels {
            let label = label.as_ref();
            if label.is_empty() {
                return Err(Error::InvalidLabelChar {
                    character: '.',
                    position: 0,
                });
            }
            if label.len() > MAX_LABEL_LENGTH {
                return Err(Error::LabelTooLong { length: label.len() });
            }
            if wire.len() + 1 + label.len() + 1 > MAX_NAME_LENGTH {
                return Err(Error::NameTooLong {
                    length: wire.len() + 1 + label.len() + 1,
                });
            }

            wire.push(label.len() as u8);
            wire.extend_from_slice(label);
        }

        wire.push(0);
        Ok(Self { wire })
    }

    /// Wraps wire bytes the caller has already validated.
    #[inline]
    pub(crate) fn from_wire_unchecked(wire: SmallVec<[u8; 64]>) -> Self {
        debug_assert!(wire.last() == Some(&0));
        Self { wire }
    }

    /// Returns the uncompressed wire format, root terminator included.
    #[inline]
    pub fn as_wire(&self) -> &[u8] {
        &self.wire
    }

    /// Returns the wire format length.
    #[inline]
    pub fn wire_len(&self) -> usize {
        self.wire.len()
    }

    /// Returns true if this is the root domain.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.wire.len() == 1
    }

    /// Returns the number of labels, root excluded.
    #[inline]
    pub fn label_count(&self) -> usize {
        self.labels().count()
    }

    /// Returns an iterator over the labels, root excluded.
    #[inline]
    pub fn labels(&self) -> LabelIter<'_> {
        LabelIter::new(&self.wire)
    }

    /// Appends the name to a buffer in uncompressed wire format.
    pub fn write_wire(&self, buf: &mut BytesMut) {
        buf.extend_from_slice(&self.wire);
    }

    /// Converts to the dotted presentation format.
    ///
    /// Always renders fully qualified: `www.example.com.`, or `.` for the
    /// root.
    pub fn to_presentation(&self) -> CompactString {
        use std::fmt::Write;

        let mut out = CompactString::const_new("");
        for label in self.labels() {
            // Label's Display handles escaping; CompactString never errors.
            let _ = write!(out, "{label}.");
        }

        if out.is_empty() {
            out.push('.');
        }
        out
    }
}

impl FromStr for Name {
    type Err = Error;

    /// Parses a name from dotted presentation format.
    ///
    /// A trailing dot is accepted and implied when absent. Labels may
    /// contain alphanumerics, `-`, `_`, and `*` (for wildcards).
    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() || s == "." {
            return Ok(Self::root());
        }

        let s = s.strip_suffix('.').unwrap_or(s);

        for part in s.split('.') {
            for (i, c) in part.chars().enumerate() {
                if !c.is_ascii_alphanumeric() && c != '-' && c != '_' && c != '*' {
                    return Err(Error::InvalidLabelChar {
                        character: c,
                        position: i,
                    });
                }
            }
        }

        Self::from_labels(s.split('.').map(str::as_bytes))
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_presentation())
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name(\"{self}\")")
    }
}

impl PartialEq for Name {
    /// Case-insensitive comparison per DNS semantics.
    ///
    /// Comparing the raw wire forms byte-for-byte (modulo case) is exact:
    /// length octets are below 0x41, so case folding never confuses them
    /// with label content.
    fn eq(&self, other: &Self) -> bool {
        self.wire.eq_ignore_ascii_case(&other.wire)
    }
}

impl Eq for Name {}

impl Hash for Name {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for &byte in self.wire.iter() {
            state.write_u8(byte.to_ascii_lowercase());
        }
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::root()
    }
}

impl Serialize for Name {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_presentation())
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(name: &Name) -> u64 {
        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_root() {
        let root = Name::root();
        assert!(root.is_root());
        assert_eq!(root.label_count(), 0);
        assert_eq!(root.wire_len(), 1);
        assert_eq!(root.as_wire(), &[0]);
        assert_eq!(root.to_string(), ".");
    }

    #[test]
    fn test_from_labels() {
        let name = Name::from_labels(["example", "com"]).unwrap();
        assert_eq!(
            name.as_wire(),
            &[7, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 3, b'c', b'o', b'm', 0]
        );
        assert_eq!(name.label_count(), 2);
        assert_eq!(name.to_string(), "example.com.");
    }

    #[test]
    fn test_from_str() {
        let name = Name::from_str("www.example.com.").unwrap();
        assert_eq!(name.label_count(), 3);
        assert_eq!(name.to_string(), "www.example.com.");

        // Trailing dot is optional.
        assert_eq!(Name::from_str("www.example.com").unwrap(), name);

        assert!(Name::from_str(".").unwrap().is_root());
        assert!(matches!(
            Name::from_str("bad label.com"),
            Err(Error::InvalidLabelChar { character: ' ', .. })
        ));
    }

    #[test]
    fn test_case_insensitive_eq_and_hash() {
        let lower = Name::from_str("www.example.com").unwrap();
        let upper = Name::from_str("WWW.EXAMPLE.COM").unwrap();
        let mixed = Name::from_str("Www.ExAmPlE.CoM").unwrap();

        assert_eq!(lower, upper);
        assert_eq!(lower, mixed);
        assert_eq!(hash_of(&lower), hash_of(&upper));

        assert_ne!(lower, Name::from_str("www.example.org").unwrap());
    }

    #[test]
    fn test_label_boundaries_matter() {
        let a = Name::from_labels(["ab", "c"]).unwrap();
        let b = Name::from_labels(["a", "bc"]).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_label_too_long() {
        let long = "a".repeat(64);
        assert!(matches!(
            Name::from_str(&long),
            Err(Error::LabelTooLong { length: 64 })
        ));

        // 63 is fine.
        assert!(Name::from_str(&"a".repeat(63)).is_ok());
    }

    #[test]
    fn test_name_too_long() {
        // Four 62-byte labels encode to 4 * 63 + 1 = 253 octets: fine.
        let label = "a".repeat(62);
        let ok = Name::from_labels([&label, &label, &label, &label]);
        assert!(ok.is_ok());
        assert_eq!(ok.unwrap().wire_len(), 253);

        // A fifth pushes past 255.
        let too_long = Name::from_labels([&label, &label, &label, &label, &label]);
        assert!(matches!(too_long, Err(Error::NameTooLong { .. })));
    }

    #[test]
    fn test_wildcard_presentation() {
        let name = Name::from_str("*.example.com").unwrap();
        assert!(name.labels().next().unwrap().is_wildcard());
        assert_eq!(name.to_string(), "*.example.com.");
    }
}
