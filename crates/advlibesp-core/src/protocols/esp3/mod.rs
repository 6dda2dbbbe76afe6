//! ESP3 (EnOcean Serial Protocol 3) envelope decoding.
//!
//! A serial packet is laid out as `sync | header(4) | crc8h | data |
//! optional data | crc8d`. The header carries the data length (u16, big
//! endian), the optional data length and the packet type code. Type codes
//! from `0x80` upwards are reserved for manufacturer-specific communication;
//! unknown codes below that resolve to `RFU` rather than failing.
//!
//! CRC8 fields are not verified. Offsets live in `layout`, safe reads in
//! `reader`, the code table in `types`.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;
pub mod types;

pub use error::Esp3Error;
pub use parser::{PacketHeader, parse_header};
pub use types::PacketType;
