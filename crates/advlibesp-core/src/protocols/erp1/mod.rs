//! ERP1 (EnOcean Radio Protocol 1) telegram decoding.
//!
//! The first byte (R-ORG) selects the telegram type. Each type places the
//! 4-byte sender id at a fixed offset: directly after the data for 4BS, 1BS
//! and RPS, or just before the trailing status byte for the variable-length
//! types (VLD, ADT, MSC, UTE). Telegrams shorter than 6 bytes are rejected.
//!
//! 4BS, VLD and RPS payloads are offered to the caller's profile decoders in
//! order; when none claims the telegram the data bytes are reported as raw
//! hex. UTE teach-in telegrams always yield their announced EEP, 1BS
//! telegrams their contact bit, and MSC telegrams raw hex only.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;
pub mod types;

pub use error::Erp1Error;
pub use parser::{Erp1Telegram, TelegramContent, parse_erp1};
pub use types::TelegramType;
