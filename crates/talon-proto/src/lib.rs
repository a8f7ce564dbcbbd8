//! # Talon DNS Wire Codec
//!
//! This crate decodes raw DNS messages (RFC 1035 wire format) into a
//! structured, strongly-typed representation and encodes the reverse. It is
//! a pure transformation between a byte buffer and a [`Message`] value: no
//! I/O, no resolution logic, no caching.
//!
//! ## Highlights
//!
//! - **Full RFC 1035 message framing**: header, question section, and the
//!   three resource record sections, driven by the header counts.
//! - **Compression-pointer handling** with strict loop and length bounds, so
//!   adversarial input fails cleanly instead of looping or overflowing.
//! - **Typed RDATA** for the common record types, with an opaque fallback
//!   that round-trips any unrecognized TYPE byte-for-byte.
//! - **Strict and lenient decode modes**: lenient decoding tolerates
//!   transport padding and nonzero reserved header bits, strict decoding
//!   rejects both.
//!
//! ## Example
//!
//! ```rust,ignore
//! use talon_proto::{Message, Question, Name, RecordType, RecordClass};
//!
//! // Decode a DNS message from wire format
//! let bytes: &[u8] = &[/* DNS message bytes */];
//! let message = Message::parse(bytes)?;
//!
//! // Build a query and encode it
//! let query = Message::query(
//!     Question::new(Name::from_str("example.com.")?, RecordType::A, RecordClass::IN)
//! );
//! let wire = query.to_wire();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod class;
pub mod error;
pub mod header;
pub mod message;
pub mod name;
pub mod opcode;
pub mod question;
pub mod rcode;
pub mod rdata;
pub mod record;
pub mod rtype;
pub mod wire;

// Re-exports for convenience
pub use class::{Class, RecordClass};
pub use error::{Error, Result};
pub use header::Header;
pub use message::Message;
pub use name::Name;
pub use opcode::Opcode;
pub use question::Question;
pub use rcode::Rcode;
pub use rdata::RData;
pub use record::ResourceRecord;
pub use rtype::{RecordType, Type};

/// Maximum length of a DNS label (63 bytes per RFC 1035).
pub const MAX_LABEL_LENGTH: usize = 63;

/// Maximum wire length of a domain name, including length octets and the
/// root label (255 bytes per RFC 1035).
pub const MAX_NAME_LENGTH: usize = 255;

/// Maximum size of a UDP DNS message without EDNS0 (512 bytes per RFC 1035).
pub const MAX_UDP_MESSAGE_SIZE: usize = 512;
