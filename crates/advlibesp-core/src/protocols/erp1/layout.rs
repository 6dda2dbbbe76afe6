use std::ops::Range;

pub const MIN_LEN: usize = 6;
pub const RORG_OFFSET: usize = 0;

/// Sender id (4) and status (1) closing every variable-length telegram.
pub const TRAILER_LEN: usize = 5;
pub const SENDER_ID_LEN: usize = 4;

pub const FOUR_BS_DATA_RANGE: Range<usize> = 1..5;
pub const FOUR_BS_SENDER_RANGE: Range<usize> = 5..9;

pub const ONE_BS_DATA_OFFSET: usize = 1;
pub const ONE_BS_SENDER_RANGE: Range<usize> = 2..6;
pub const CONTACT_MASK: u8 = 0x01;

pub const RPS_DATA_RANGE: Range<usize> = 1..2;
// Unconfirmed against the EEP documentation; older gateways read 1..5.
pub const RPS_SENDER_RANGE: Range<usize> = 2..6;

pub const UTE_DATA_RANGE: Range<usize> = 1..8;
/// TYPE, FUNC and R-ORG of the announced EEP, in wire order.
pub const UTE_EEP_RANGE: Range<usize> = 5..8;

/// Data bytes of a variable-length telegram of `len` bytes.
pub const fn variable_data_range(len: usize) -> Range<usize> {
    1..len.saturating_sub(TRAILER_LEN)
}

/// Sender id of a variable-length telegram of `len` bytes.
pub const fn trailing_sender_range(len: usize) -> Range<usize> {
    let start = len.saturating_sub(TRAILER_LEN);
    start..start + SENDER_ID_LEN
}
