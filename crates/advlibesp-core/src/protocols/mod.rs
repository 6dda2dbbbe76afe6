//! Protocol decoding modules.
//!
//! Each protocol layer follows the same structure:
//! - `layout`: byte offsets and ranges (source of truth)
//! - `reader`: safe byte access and protocol conventions
//! - `types`: closed code tables with an explicit unrecognised variant
//! - `parser`: domain-level decoding (no direct byte indexing)
//! - `error`: explicit, actionable errors
//!
//! Parsers are pure and contain no I/O. `esp3` handles the serial envelope,
//! `erp1` the radio telegram carried inside `RADIO_ERP1` packets.

pub(crate) mod common;
pub mod erp1;
pub mod esp3;
