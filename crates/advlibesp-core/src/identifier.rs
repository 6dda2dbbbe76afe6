//! Device identifiers and URI index lookup.
//!
//! EnOcean transmitters are identified by a 32-bit EURID. Decoded packets
//! carry it as a signature string `"<8 hex digits>/7"`, where `7` is the
//! identifier type code for EURID-32.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Separator between the hex id and the identifier type code.
pub const SIGNATURE_SEPARATOR: char = '/';

/// Identifier schemes understood by the signature codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierType {
    /// EnOcean unique radio identifier, 32 bits.
    Eurid32,
}

impl IdentifierType {
    pub const fn code(self) -> u8 {
        match self {
            IdentifierType::Eurid32 => 7,
        }
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            7 => Some(IdentifierType::Eurid32),
            _ => None,
        }
    }
}

/// Errors returned when parsing a signature string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("missing '/' separator in signature")]
    MissingSeparator,
    #[error("invalid device id: {0:?}")]
    InvalidId(String),
    #[error("unsupported identifier type: {0:?}")]
    UnsupportedIdType(String),
}

/// Sender signature of a radio telegram.
///
/// # Examples
/// ```
/// use advlibesp_core::DeviceSignature;
///
/// let signature = DeviceSignature::from_bytes(&[0x05, 0x17, 0x4f, 0x00]).unwrap();
/// assert_eq!(signature.to_string(), "05174f00/7");
/// assert_eq!("05174f00/7".parse::<DeviceSignature>().unwrap(), signature);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceSignature {
    id: u32,
}

impl DeviceSignature {
    pub const fn new(id: u32) -> Self {
        Self { id }
    }

    /// Read a big-endian id from the first four bytes.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let raw: [u8; 4] = bytes.get(..4)?.try_into().ok()?;
        Some(Self::new(u32::from_be_bytes(raw)))
    }

    pub const fn id(&self) -> u32 {
        self.id
    }

    pub const fn id_type(&self) -> IdentifierType {
        IdentifierType::Eurid32
    }
}

impl fmt::Display for DeviceSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:08x}{}{}",
            self.id,
            SIGNATURE_SEPARATOR,
            self.id_type().code()
        )
    }
}

impl FromStr for DeviceSignature {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, id_type) = s
            .split_once(SIGNATURE_SEPARATOR)
            .ok_or(SignatureError::MissingSeparator)?;
        let supported = id_type
            .parse::<u8>()
            .ok()
            .and_then(IdentifierType::from_code);
        if supported.is_none() {
            return Err(SignatureError::UnsupportedIdType(id_type.to_string()));
        }
        if id.len() != 8 || !id.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(SignatureError::InvalidId(id.to_string()));
        }
        let id = u32::from_str_radix(id, 16)
            .map_err(|_| SignatureError::InvalidId(id.to_string()))?;
        Ok(Self::new(id))
    }
}

impl Serialize for DeviceSignature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DeviceSignature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Format a raw 4-byte identifier as a signature string.
///
/// Returns `None` when fewer than four bytes are supplied.
///
/// # Examples
/// ```
/// use advlibesp_core::format_signature;
///
/// assert_eq!(format_signature(&[0x04, 0x14, 0x15, 0x00]).as_deref(), Some("04141500/7"));
/// assert!(format_signature(&[0x04, 0x14]).is_none());
/// ```
pub fn format_signature(bytes: &[u8]) -> Option<String> {
    DeviceSignature::from_bytes(bytes).map(|signature| signature.to_string())
}

/// Resolves a device signature to a descriptive URI.
///
/// The decoder never consults an index on its own; callers that keep one
/// apply it to the `deviceIds` of a decoded packet.
pub trait IdentifierIndex {
    fn lookup(&self, id: &str) -> Option<String>;
}

impl IdentifierIndex for HashMap<String, String> {
    fn lookup(&self, id: &str) -> Option<String> {
        self.get(id).cloned()
    }
}

/// Look `id` up in each index in order; the first hit wins.
pub fn lookup_indices(id: &str, indices: &[&dyn IdentifierIndex]) -> Option<String> {
    indices.iter().find_map(|index| index.lookup(id))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{
        DeviceSignature, IdentifierIndex, SignatureError, format_signature, lookup_indices,
    };

    #[test]
    fn signature_is_zero_padded() {
        let signature = DeviceSignature::new(0x2e);
        assert_eq!(signature.to_string(), "0000002e/7");
    }

    #[test]
    fn signature_reads_only_first_four_bytes() {
        let formatted = format_signature(&[0x01, 0x02, 0x03, 0x04, 0xff]);
        assert_eq!(formatted.as_deref(), Some("01020304/7"));
    }

    #[test]
    fn parse_accepts_uppercase_hex() {
        let signature: DeviceSignature = "0591EE00/7".parse().unwrap();
        assert_eq!(signature.id(), 0x0591_ee00);
    }

    #[test]
    fn parse_rejects_malformed() {
        assert_eq!(
            "05174f00".parse::<DeviceSignature>(),
            Err(SignatureError::MissingSeparator)
        );
        assert!(matches!(
            "05174f00/2".parse::<DeviceSignature>(),
            Err(SignatureError::UnsupportedIdType(_))
        ));
        assert!(matches!(
            "5174f00/7".parse::<DeviceSignature>(),
            Err(SignatureError::InvalidId(_))
        ));
        assert!(matches!(
            "+5174f00/7".parse::<DeviceSignature>(),
            Err(SignatureError::InvalidId(_))
        ));
    }

    #[test]
    fn signature_serializes_as_string() {
        let signature = DeviceSignature::new(0x0414_1500);
        let value = serde_json::to_value(signature).unwrap();
        assert_eq!(value, serde_json::json!("04141500/7"));
        let back: DeviceSignature = serde_json::from_value(value).unwrap();
        assert_eq!(back, signature);
    }

    struct Fixed(&'static str);

    impl IdentifierIndex for Fixed {
        fn lookup(&self, _id: &str) -> Option<String> {
            Some(self.0.to_string())
        }
    }

    #[test]
    fn lookup_indices_first_hit_wins() {
        let mut known = HashMap::new();
        known.insert(
            "05174f00/7".to_string(),
            "https://example.com/sensor".to_string(),
        );
        let fallback = Fixed("https://example.com/fallback");
        let indices: [&dyn IdentifierIndex; 2] = [&known, &fallback];

        assert_eq!(
            lookup_indices("05174f00/7", &indices).as_deref(),
            Some("https://example.com/sensor")
        );
        assert_eq!(
            lookup_indices("0591ee00/7", &indices).as_deref(),
            Some("https://example.com/fallback")
        );
        assert!(lookup_indices("0591ee00/7", &[]).is_none());
    }
}
