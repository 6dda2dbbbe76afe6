//! Input conversion and hex rendering shared by every decoder.
//!
//! Packets arrive either as raw buffers or as hexadecimal strings (as logged
//! by most gateways). Both are normalised into a borrowed-or-owned byte slice
//! once per packet; decoders only ever see `&[u8]`.

use std::borrow::Cow;

/// A packet as supplied by the caller, before conversion to bytes.
///
/// # Examples
/// ```
/// use advlibesp_core::RawPacket;
///
/// let from_hex = RawPacket::from("55000a07");
/// let from_bytes = RawPacket::from(&[0x55u8, 0x00][..]);
/// assert!(matches!(from_hex, RawPacket::Hex(_)));
/// assert!(matches!(from_bytes, RawPacket::Bytes(_)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawPacket<'a> {
    /// Hexadecimal string, case-insensitive, no separators.
    Hex(&'a str),
    /// Raw byte buffer.
    Bytes(&'a [u8]),
}

impl<'a> From<&'a str> for RawPacket<'a> {
    fn from(value: &'a str) -> Self {
        RawPacket::Hex(value)
    }
}

impl<'a> From<&'a String> for RawPacket<'a> {
    fn from(value: &'a String) -> Self {
        RawPacket::Hex(value.as_str())
    }
}

impl<'a> From<&'a [u8]> for RawPacket<'a> {
    fn from(value: &'a [u8]) -> Self {
        RawPacket::Bytes(value)
    }
}

impl<'a> From<&'a Vec<u8>> for RawPacket<'a> {
    fn from(value: &'a Vec<u8>) -> Self {
        RawPacket::Bytes(value.as_slice())
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for RawPacket<'a> {
    fn from(value: &'a [u8; N]) -> Self {
        RawPacket::Bytes(value.as_slice())
    }
}

/// Convert a packet representation into bytes.
///
/// Returns `None` for empty, odd-length or non-hex strings. Buffers are
/// borrowed as-is.
///
/// # Examples
/// ```
/// use advlibesp_core::{RawPacket, to_bytes};
///
/// let bytes = to_bytes(RawPacket::from("55AB")).unwrap();
/// assert_eq!(&bytes[..], &[0x55, 0xab]);
/// assert!(to_bytes(RawPacket::from("xyz")).is_none());
/// ```
pub fn to_bytes(input: RawPacket<'_>) -> Option<Cow<'_, [u8]>> {
    match input {
        RawPacket::Bytes(bytes) => Some(Cow::Borrowed(bytes)),
        RawPacket::Hex(text) => {
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            hex::decode(text).ok().map(Cow::Owned)
        }
    }
}

/// Render bytes as lowercase hex, optionally reversing the byte order first.
///
/// # Examples
/// ```
/// use advlibesp_core::to_hex_string;
///
/// assert_eq!(to_hex_string(&[0x41, 0x14, 0xd2], false), "4114d2");
/// assert_eq!(to_hex_string(&[0x41, 0x14, 0xd2], true), "d21441");
/// ```
pub fn to_hex_string(bytes: &[u8], reverse: bool) -> String {
    if reverse {
        let reversed: Vec<u8> = bytes.iter().rev().copied().collect();
        hex::encode(reversed)
    } else {
        hex::encode(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::{RawPacket, to_bytes, to_hex_string};

    #[test]
    fn hex_is_case_insensitive() {
        let lower = to_bytes(RawPacket::from("d2a5f6")).unwrap();
        let upper = to_bytes(RawPacket::from("D2A5F6")).unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn hex_rejects_garbage() {
        assert!(to_bytes(RawPacket::from("xyz")).is_none());
        assert!(to_bytes(RawPacket::from("55 00")).is_none());
        assert!(to_bytes(RawPacket::from("550")).is_none());
        assert!(to_bytes(RawPacket::from("")).is_none());
    }

    #[test]
    fn hex_tolerates_surrounding_whitespace() {
        let bytes = to_bytes(RawPacket::from("  5500\n")).unwrap();
        assert_eq!(&bytes[..], &[0x55, 0x00]);
    }

    #[test]
    fn buffers_are_borrowed() {
        let data = vec![0x55u8, 0x00];
        let bytes = to_bytes(RawPacket::from(&data)).unwrap();
        assert!(matches!(bytes, std::borrow::Cow::Borrowed(_)));
    }

    #[test]
    fn empty_buffer_passes_through() {
        let empty: &[u8] = &[];
        let bytes = to_bytes(RawPacket::from(empty)).unwrap();
        assert!(bytes.is_empty());
    }

    #[test]
    fn hex_string_reversal() {
        assert_eq!(to_hex_string(&[], true), "");
        assert_eq!(to_hex_string(&[0x00, 0x0f], false), "000f");
        assert_eq!(to_hex_string(&[0x00, 0x0f], true), "0f00");
    }
}
