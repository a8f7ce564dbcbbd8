//! Name decoding and encoding against a full message.
//!
//! Decoding has to handle compression (RFC 1035 Section 4.1.4): a length
//! octet with the top two bits set is a 14-bit pointer back into the message
//! where the rest of the name continues. Adversarial input can chain or loop
//! such pointers, so the walk only ever follows pointers to strictly earlier
//! offsets and gives up after a fixed hop budget.

use super::Name;
use crate::error::{Error, Result};
use crate::MAX_NAME_LENGTH;
use bytes::BytesMut;
use smallvec::SmallVec;

/// Pointer hop budget. Strictly-backward pointers already guarantee
/// termination; the budget caps the work spent on a hostile pointer chain.
const MAX_POINTER_HOPS: usize = 128;

/// Decoder for domain names embedded in a DNS message.
///
/// Holds the complete message buffer so compression pointers can be
/// resolved against earlier offsets.
#[derive(Debug, Clone, Copy)]
pub struct NameParser<'a> {
    /// The complete message.
    message: &'a [u8],
}

impl<'a> NameParser<'a> {
    /// Creates a parser over the given message buffer.
    #[inline]
    pub const fn new(message: &'a [u8]) -> Self {
        Self { message }
    }

    /// Decodes the name starting at `offset`.
    ///
    /// Returns the name and the number of bytes it occupies at the call
    /// site. A compression pointer occupies exactly two bytes there no
    /// matter how much of the message it pulls in, so the caller's cursor
    /// always advances past the pointer itself and nothing else.
    pub fn parse_name(&self, offset: usize) -> Result<(Name, usize)> {
        let mut wire = SmallVec::<[u8; 64]>::new();
        let mut pos = offset;
        let mut consumed = 0;
        let mut hops = 0;
        let mut jumped = false;

        loop {
            let len_byte = *self
                .message
                .get(pos)
                .ok_or_else(|| Error::truncated(pos, 1))?;

            match len_byte {
                // Root label: end of name.
                0 => {
                    wire.push(0);
                    if !jumped {
                        consumed = pos + 1 - offset;
                    }
                    break;
                }

                // Ordinary label.
                1..=0x3F => {
                    let len = len_byte as usize;
                    let content = self
                        .message
                        .get(pos + 1..pos + 1 + len)
                        .ok_or_else(|| Error::truncated(pos + 1, len))?;

                    // +1 length octet now, +1 root octet eventually.
                    let projected = wire.len() + 1 + len + 1;
                    if projected > MAX_NAME_LENGTH {
                        return Err(Error::NameTooLong { length: projected });
                    }

                    wire.push(len_byte);
                    wire.extend_from_slice(content);
                    pos += 1 + len;
                }

                // Compression pointer: top two bits set.
                0xC0..=0xFF => {
                    let low = *self
                        .message
                        .get(pos + 1)
                        .ok_or_else(|| Error::truncated(pos + 1, 1))?;
                    let target = usize::from(u16::from_be_bytes([len_byte & 0x3F, low]));

                    // Pointing at or past the pointer cannot make progress.
                    if target >= pos {
                        return Err(Error::CompressionLoopDetected { offset: pos });
                    }

                    hops += 1;
                    if hops > MAX_POINTER_HOPS {
                        return Err(Error::CompressionLoopDetected { offset: pos });
                    }

                    if !jumped {
                        consumed = pos + 2 - offset;
                        jumped = true;
                    }
                    pos = target;
                }

                // 0x40..=0xBF: the reserved 01/10 label types.
                _ => {
                    return Err(Error::InvalidLabelLength {
                        offset: pos,
                        value: len_byte,
                    });
                }
            }
        }

        Ok((Name::from_wire_unchecked(wire), consumed))
    }
}

/// Compressing name encoder.
///
/// Remembers the offset of every name suffix it has written and replaces a
/// repeated suffix with a pointer. Compression is an optimization, never a
/// requirement: decoders must accept both forms.
#[derive(Debug, Default)]
pub struct NameCompressor {
    /// Lowercased suffix wire bytes -> offset of the first occurrence.
    table: hashbrown::HashMap<Vec<u8>, u16>,
}

impl NameCompressor {
    /// Creates an empty compressor. State is per message: offsets are only
    /// meaningful within the buffer the names are written into.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `name` to `buf`, emitting a pointer where a suffix already
    /// appeared in this message.
    pub fn write_name(&mut self, buf: &mut BytesMut, name: &Name) {
        let wire = name.as_wire();
        let mut pos = 0;

        while wire[pos] != 0 {
            let suffix: Vec<u8> = wire[pos..].iter().map(u8::to_ascii_lowercase).collect();

            if let Some(&target) = self.table.get(&suffix) {
                let pointer = 0xC000 | target;
                buf.extend_from_slice(&pointer.to_be_bytes());
                return;
            }

            // Only offsets that fit in 14 bits can be pointed at later.
            let here = buf.len();
            if here < 0x4000 {
                self.table.insert(suffix, here as u16);
            }

            let len = wire[pos] as usize;
            buf.extend_from_slice(&wire[pos..pos + 1 + len]);
            pos += 1 + len;
        }

        buf.extend_from_slice(&[0]);
    }
}
