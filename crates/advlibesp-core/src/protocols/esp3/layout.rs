use std::ops::Range;

pub const SYNC_BYTE: u8 = 0x55;
pub const SYNC_OFFSET: usize = 0;

/// Header position within the serial packet.
pub const HEADER_RANGE: Range<usize> = 1..5;
pub const CRC8H_OFFSET: usize = 5;
pub const DATA_OFFSET: usize = 6;

/// Sync byte, header and header CRC.
pub const MIN_PACKET_LEN: usize = DATA_OFFSET;

// Offsets within the 4-byte header.
pub const HEADER_LEN: usize = 4;
pub const DATA_LENGTH_RANGE: Range<usize> = 0..2;
pub const OPTIONAL_LENGTH_OFFSET: usize = 2;
pub const PACKET_TYPE_OFFSET: usize = 3;

pub const MANUFACTURER_SPECIFIC_MIN: u8 = 0x80;

/// Data region of a packet whose header announces `data_length` bytes.
pub const fn data_range(data_length: u16) -> Range<usize> {
    DATA_OFFSET..DATA_OFFSET + data_length as usize
}
