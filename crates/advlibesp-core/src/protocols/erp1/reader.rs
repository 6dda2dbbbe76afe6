use std::ops::Range;

use super::error::Erp1Error;
use super::layout;
use crate::bytes::to_hex_string;
use crate::identifier::DeviceSignature;

pub struct Erp1Reader<'a> {
    payload: &'a [u8],
}

impl<'a> Erp1Reader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload }
    }

    pub fn require_len(&self, needed: usize) -> Result<(), Erp1Error> {
        if self.payload.len() < needed {
            return Err(Erp1Error::TooShort {
                needed,
                actual: self.payload.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, Erp1Error> {
        self.payload
            .get(offset)
            .copied()
            .ok_or(Erp1Error::TooShort {
                needed: offset + 1,
                actual: self.payload.len(),
            })
    }

    pub fn read_slice(&self, range: Range<usize>) -> Result<&'a [u8], Erp1Error> {
        self.payload.get(range.clone()).ok_or(Erp1Error::TooShort {
            needed: range.end,
            actual: self.payload.len(),
        })
    }

    pub fn read_rorg(&self) -> Result<u8, Erp1Error> {
        self.read_u8(layout::RORG_OFFSET)
    }

    pub fn read_sender(&self, range: Range<usize>) -> Result<DeviceSignature, Erp1Error> {
        let bytes = self.read_slice(range)?;
        DeviceSignature::from_bytes(bytes).ok_or(Erp1Error::TooShort {
            needed: layout::SENDER_ID_LEN,
            actual: bytes.len(),
        })
    }

    pub fn read_trailing_sender(&self) -> Result<DeviceSignature, Erp1Error> {
        self.require_len(layout::TRAILER_LEN)?;
        self.read_sender(layout::trailing_sender_range(self.payload.len()))
    }

    pub fn read_hex(&self, range: Range<usize>) -> Result<String, Erp1Error> {
        let bytes = self.read_slice(range)?;
        Ok(to_hex_string(bytes, false))
    }

    pub fn read_variable_data_hex(&self) -> Result<String, Erp1Error> {
        self.read_hex(layout::variable_data_range(self.payload.len()))
    }

    pub fn read_flag(&self, offset: usize, mask: u8) -> Result<bool, Erp1Error> {
        Ok(self.read_u8(offset)? & mask == mask)
    }

    /// EEP announced by a UTE teach-in, as `RORG-FUNC-TYPE` in uppercase hex.
    pub fn read_ute_eep(&self) -> Result<String, Erp1Error> {
        let bytes = self.read_slice(layout::UTE_EEP_RANGE)?;
        let eep = to_hex_string(bytes, true).to_ascii_uppercase();
        Ok(format!("{}-{}-{}", &eep[0..2], &eep[2..4], &eep[4..6]))
    }
}
