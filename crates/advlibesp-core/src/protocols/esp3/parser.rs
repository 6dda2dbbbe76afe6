use serde::Serialize;

use super::error::Esp3Error;
use super::layout;
use super::reader::Esp3Reader;
use super::types::PacketType;

/// Decoded ESP3 header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PacketHeader {
    #[serde(rename = "type")]
    pub packet_type: PacketType,
    pub data_length: u16,
    pub optional_length: u8,
}

/// Decode the 4-byte header that follows the sync byte.
///
/// Unknown type codes are not an error; they decode to
/// [`PacketType::Rfu`] or [`PacketType::ManufacturerSpecific`].
///
/// # Examples
/// ```
/// use advlibesp_core::protocols::esp3::{PacketType, parse_header};
///
/// let header = parse_header(&[0x00, 0x0f, 0x07, 0x01]).unwrap();
/// assert_eq!(header.packet_type, PacketType::RadioErp1);
/// assert_eq!(header.data_length, 15);
/// assert_eq!(header.optional_length, 7);
/// ```
pub fn parse_header(bytes: &[u8]) -> Result<PacketHeader, Esp3Error> {
    let reader = Esp3Reader::new(bytes);
    reader.require_len(layout::HEADER_LEN)?;

    let data_length = reader.read_data_length()?;
    let optional_length = reader.read_optional_length()?;
    let packet_type = PacketType::from_code(reader.read_packet_type_code()?);

    Ok(PacketHeader {
        packet_type,
        data_length,
        optional_length,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::parse_header;
    use crate::protocols::esp3::{Esp3Error, PacketType};

    #[test]
    fn parse_radio_erp1_header() {
        let header = parse_header(&[0x00, 0x0f, 0x07, 0x01]).unwrap();
        let value = serde_json::to_value(header).unwrap();
        assert_eq!(
            value,
            json!({ "type": "RADIO_ERP1", "dataLength": 15, "optionalLength": 7 })
        );
    }

    #[test]
    fn parse_big_endian_length() {
        let header = parse_header(&[0x01, 0x02, 0x00, 0x02]).unwrap();
        assert_eq!(header.data_length, 0x0102);
        assert_eq!(header.packet_type, PacketType::Response);
    }

    #[test]
    fn parse_unknown_type_is_not_an_error() {
        let header = parse_header(&[0x00, 0x01, 0x00, 0x42]).unwrap();
        assert_eq!(header.packet_type, PacketType::Rfu(0x42));
        let header = parse_header(&[0x00, 0x01, 0x00, 0x91]).unwrap();
        assert_eq!(header.packet_type, PacketType::ManufacturerSpecific(0x91));
    }

    #[test]
    fn parse_short_header() {
        let err = parse_header(&[0x00, 0x0f, 0x07]).unwrap_err();
        assert_eq!(err, Esp3Error::TooShort { needed: 4, actual: 3 });
        assert!(parse_header(&[]).is_err());
    }
}
