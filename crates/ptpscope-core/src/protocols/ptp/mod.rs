//! PTP container decoding with Canon vendor extensions.
//!
//! A container is a 12-byte little-endian header (length, type, code,
//! transaction id) followed by up to five u32 parameters and an optional
//! payload. The declared length is advisory and only drives stream
//! iteration; the decoder trusts the slice it is handed.
//!
//! Code classification is layered: Canon vendor tables are consulted
//! before the standard PTP tables, and codes absent from both resolve to
//! a hex `Unknown` label rather than an error. Wire-format offsets live in
//! `layout`, safe reads in `reader`.

pub mod codes;
pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use codes::{CodeDomain, CodeOrigin, lookup, resolve_name};
pub use error::PtpError;
pub use parser::{Container, ContainerCategory, decode_container};
