use std::ops::Range;

use super::error::Esp3Error;
use super::layout;

pub struct Esp3Reader<'a> {
    payload: &'a [u8],
}

impl<'a> Esp3Reader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload }
    }

    pub fn require_len(&self, needed: usize) -> Result<(), Esp3Error> {
        if self.payload.len() < needed {
            return Err(Esp3Error::TooShort {
                needed,
                actual: self.payload.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, Esp3Error> {
        self.payload
            .get(offset)
            .copied()
            .ok_or(Esp3Error::TooShort {
                needed: offset + 1,
                actual: self.payload.len(),
            })
    }

    pub fn read_u16_be(&self, range: Range<usize>) -> Result<u16, Esp3Error> {
        let bytes = self.read_slice(range)?;
        if bytes.len() != 2 {
            return Err(Esp3Error::TooShort {
                needed: 2,
                actual: bytes.len(),
            });
        }
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_slice(&self, range: Range<usize>) -> Result<&'a [u8], Esp3Error> {
        self.payload.get(range.clone()).ok_or(Esp3Error::TooShort {
            needed: range.end,
            actual: self.payload.len(),
        })
    }

    pub fn read_data_length(&self) -> Result<u16, Esp3Error> {
        self.read_u16_be(layout::DATA_LENGTH_RANGE)
    }

    pub fn read_optional_length(&self) -> Result<u8, Esp3Error> {
        self.read_u8(layout::OPTIONAL_LENGTH_OFFSET)
    }

    pub fn read_packet_type_code(&self) -> Result<u8, Esp3Error> {
        self.read_u8(layout::PACKET_TYPE_OFFSET)
    }
}

#[cfg(test)]
mod tests {
    use super::Esp3Reader;
    use crate::protocols::esp3::error::Esp3Error;

    #[test]
    fn read_header_fields() {
        let header = [0x00, 0x0f, 0x07, 0x01];
        let reader = Esp3Reader::new(&header);
        assert_eq!(reader.read_data_length().unwrap(), 15);
        assert_eq!(reader.read_optional_length().unwrap(), 7);
        assert_eq!(reader.read_packet_type_code().unwrap(), 0x01);
    }

    #[test]
    fn read_past_end() {
        let header = [0x00, 0x0f];
        let reader = Esp3Reader::new(&header);
        let err = reader.read_packet_type_code().unwrap_err();
        assert_eq!(err, Esp3Error::TooShort { needed: 4, actual: 2 });
    }
}
