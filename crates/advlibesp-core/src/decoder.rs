use thiserror::Error;
use tracing::debug;

use crate::bytes::{RawPacket, to_bytes};
use crate::packet::{DecodedPacket, ProcessOptions, keys};
use crate::profile::ProfileDecoder;
use crate::protocols::common::reader::clamped_slice;
use crate::protocols::erp1::{self, Erp1Error};
use crate::protocols::esp3::{self, Esp3Error, PacketHeader, PacketType, layout};

/// Organisation URI attached when nothing more specific is known.
pub const DEFAULT_URI: &str = "https://sniffypedia.org/Organization/EnOcean_GmbH/";

/// Reasons a packet is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("input is not a byte buffer or a valid hex string")]
    InvalidInput,
    #[error("packet too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("missing sync byte: expected 0x55, got {found:#04x}")]
    MissingSync { found: u8 },
    #[error("header error: {0}")]
    Header(#[from] Esp3Error),
    #[error("telegram error: {0}")]
    Telegram(#[from] Erp1Error),
}

/// Decode one ESP3 packet (or a bare ERP1 telegram) into a flat record.
///
/// Returns `None` for anything that is not a structurally valid packet.
/// Every returned record carries a `uri`.
///
/// # Examples
/// ```
/// use advlibesp_core::{DEFAULT_URI, ProcessOptions, process};
///
/// let options = ProcessOptions::default();
/// let packet = process("55000a0701eba55602460905174f008001ffffffff4100a9", &[], &options)
///     .unwrap();
/// assert_eq!(packet.telegram_type(), Some("4BS"));
/// assert_eq!(packet.device_ids(), vec!["05174f00/7"]);
/// assert_eq!(packet.telegram_payload(), Some("56024609"));
/// assert_eq!(packet.uri(), Some(DEFAULT_URI));
///
/// assert!(process("xyz", &[], &options).is_none());
/// ```
pub fn process<'a>(
    data: impl Into<RawPacket<'a>>,
    decoders: &[&dyn ProfileDecoder],
    options: &ProcessOptions,
) -> Option<DecodedPacket> {
    match try_process(data, decoders, options) {
        Ok(packet) => Some(packet),
        Err(err) => {
            debug!(error = %err, "packet rejected");
            None
        }
    }
}

/// Like [`process`], but reports why a packet was rejected.
pub fn try_process<'a>(
    data: impl Into<RawPacket<'a>>,
    decoders: &[&dyn ProfileDecoder],
    options: &ProcessOptions,
) -> Result<DecodedPacket, DecodeError> {
    let bytes = to_bytes(data.into()).ok_or(DecodeError::InvalidInput)?;
    if bytes.len() < layout::MIN_PACKET_LEN {
        return Err(DecodeError::TooShort {
            needed: layout::MIN_PACKET_LEN,
            actual: bytes.len(),
        });
    }

    let mut packet = if options.is_erp1_payload_only {
        decode_erp1(&bytes, decoders, options)?
    } else {
        decode_esp3(&bytes, decoders, options)?
    };

    if !packet.contains_key(keys::URI) {
        packet.insert(keys::URI, DEFAULT_URI);
    }
    Ok(packet)
}

/// Decode a bare ERP1 telegram into output fields (no `uri` defaulting).
///
/// # Examples
/// ```
/// use advlibesp_core::{ProcessOptions, decode_erp1};
///
/// let telegram = [0xd5, 0x09, 0x05, 0x91, 0xee, 0x00, 0x80];
/// let packet = decode_erp1(&telegram, &[], &ProcessOptions::default()).unwrap();
/// assert_eq!(packet.device_ids(), vec!["0591ee00/7"]);
/// assert!(packet.uri().is_none());
/// ```
pub fn decode_erp1(
    telegram: &[u8],
    decoders: &[&dyn ProfileDecoder],
    options: &ProcessOptions,
) -> Result<DecodedPacket, Erp1Error> {
    let decoded = erp1::parse_erp1(telegram, decoders, options)?;
    Ok(decoded.into_packet(options.include_protocol_overhead()))
}

fn decode_esp3(
    bytes: &[u8],
    decoders: &[&dyn ProfileDecoder],
    options: &ProcessOptions,
) -> Result<DecodedPacket, DecodeError> {
    let found = bytes[layout::SYNC_OFFSET];
    if found != layout::SYNC_BYTE {
        return Err(DecodeError::MissingSync { found });
    }

    let header = esp3::parse_header(clamped_slice(bytes, layout::HEADER_RANGE))?;
    let data = clamped_slice(bytes, layout::data_range(header.data_length));

    let mut packet = DecodedPacket::new();
    if options.include_protocol_overhead() {
        insert_header(&mut packet, &header);
    }

    match header.packet_type {
        PacketType::RadioErp1 => match decode_erp1(data, decoders, options) {
            Ok(telegram) => packet.merge(telegram),
            Err(err) => debug!(error = %err, "RADIO_ERP1 body not decoded"),
        },
        other => debug!(packet_type = %other, "no body decoder for packet type"),
    }

    Ok(packet)
}

fn insert_header(packet: &mut DecodedPacket, header: &PacketHeader) {
    packet.insert(keys::TYPE, header.packet_type.as_str());
    packet.insert(keys::DATA_LENGTH, header.data_length);
    packet.insert(keys::OPTIONAL_LENGTH, header.optional_length);
}
