//! Decoder for EnOcean Serial Protocol 3 (ESP3) packets.
//!
//! A packet captured from an EnOcean gateway is decoded in layers: the ESP3
//! envelope (sync byte, header, data region), then for `RADIO_ERP1` packets
//! the radio telegram (telegram type, sender id, type-specific payload).
//! Results are merged into one flat [`DecodedPacket`] record, ready to be
//! serialized as JSON.
//!
//! Payload semantics beyond raw hex come from caller-supplied
//! [`ProfileDecoder`]s, tried in order for 4BS, VLD and RPS telegrams. The
//! crate itself only knows the telegram layout.
//!
//! Invariants:
//! - Decoding is pure: the same input always yields the same record.
//! - Structurally invalid input yields `None`, never a panic.
//! - Every decoded record carries a `uri`, defaulting to [`DEFAULT_URI`].
//!
//! CRC8 checksums are not verified.
//!
//! # Examples
//! ```
//! use advlibesp_core::{ProcessOptions, process};
//!
//! let packet = process(
//!     "55000d0701fdd440ff0b004114d2041400698001ffffffff2a00c4",
//!     &[],
//!     &ProcessOptions::default(),
//! )
//! .unwrap();
//! assert_eq!(packet.telegram_type(), Some("UTE"));
//! assert_eq!(packet.eep_type(), Some("D2-14-41"));
//! assert_eq!(packet.device_ids(), vec!["04140069/7"]);
//! ```

mod bytes;
mod decoder;
mod identifier;
mod packet;
mod profile;
pub mod protocols;

pub use bytes::{RawPacket, to_bytes, to_hex_string};
pub use decoder::{DEFAULT_URI, DecodeError, decode_erp1, process, try_process};
pub use identifier::{
    DeviceSignature, IdentifierIndex, IdentifierType, SIGNATURE_SEPARATOR, SignatureError,
    format_signature, lookup_indices,
};
pub use packet::{DecodedPacket, DeviceProfile, ProcessOptions, keys};
pub use profile::{ProfileCapability, ProfileDecoder, ProfileFields, ProfileOutcome, dispatch};
pub use protocols::erp1::TelegramType;
pub use protocols::esp3::{PacketHeader, PacketType, parse_header as decode_header};
