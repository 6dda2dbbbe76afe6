//! Profile decoders: the extension point for EEP-specific payload semantics.
//!
//! Callers pass an ordered list of decoders. For each 4BS, VLD or RPS
//! telegram the matching method is called on each decoder in turn, with the
//! device's configured EEP (if any) and the whole telegram. The first
//! [`ProfileOutcome::Decoded`] wins and its fields are merged verbatim into
//! the decoded packet; no further decoders are consulted.

use serde_json::{Map, Value};
use tracing::trace;

use crate::protocols::erp1::TelegramType;

/// Fields contributed by a profile decoder.
pub type ProfileFields = Map<String, Value>;

/// Result of offering a telegram to one profile decoder.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileOutcome {
    /// The decoder claimed the telegram.
    Decoded(ProfileFields),
    /// The decoder handles this telegram type but not this telegram.
    NoMatch,
    /// The decoder has no support for this telegram type.
    Unsupported,
}

impl From<Option<ProfileFields>> for ProfileOutcome {
    fn from(value: Option<ProfileFields>) -> Self {
        match value {
            Some(fields) => ProfileOutcome::Decoded(fields),
            None => ProfileOutcome::NoMatch,
        }
    }
}

/// EEP decoder plugged into telegram decoding.
///
/// Every method defaults to [`ProfileOutcome::Unsupported`]; implement the
/// ones the decoder handles.
///
/// # Examples
/// ```
/// use advlibesp_core::{ProcessOptions, ProfileDecoder, ProfileFields, ProfileOutcome, process};
/// use serde_json::json;
///
/// struct Temperature;
///
/// impl ProfileDecoder for Temperature {
///     fn decode_4bs(&self, _eep_type: Option<&str>, telegram: &[u8]) -> ProfileOutcome {
///         let raw = telegram[3];
///         let mut fields = ProfileFields::new();
///         fields.insert("temperature".into(), json!(40.0 - f64::from(raw) * 40.0 / 255.0));
///         ProfileOutcome::Decoded(fields)
///     }
/// }
///
/// let packet = process(
///     "55000a0701eba55602460905174f008001ffffffff4100a9",
///     &[&Temperature],
///     &ProcessOptions::default(),
/// )
/// .unwrap();
/// assert!(packet.get("temperature").is_some());
/// assert!(packet.telegram_payload().is_none());
/// ```
pub trait ProfileDecoder {
    fn decode_4bs(&self, eep_type: Option<&str>, telegram: &[u8]) -> ProfileOutcome {
        let _ = (eep_type, telegram);
        ProfileOutcome::Unsupported
    }

    fn decode_vld(&self, eep_type: Option<&str>, telegram: &[u8]) -> ProfileOutcome {
        let _ = (eep_type, telegram);
        ProfileOutcome::Unsupported
    }

    fn decode_rps(&self, eep_type: Option<&str>, telegram: &[u8]) -> ProfileOutcome {
        let _ = (eep_type, telegram);
        ProfileOutcome::Unsupported
    }
}

/// Telegram types that are offered to profile decoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileCapability {
    FourBs,
    Vld,
    Rps,
}

impl ProfileCapability {
    pub const fn for_telegram(telegram_type: TelegramType) -> Option<Self> {
        match telegram_type {
            TelegramType::FourBs => Some(ProfileCapability::FourBs),
            TelegramType::Vld => Some(ProfileCapability::Vld),
            TelegramType::Rps => Some(ProfileCapability::Rps),
            _ => None,
        }
    }

    fn invoke(
        self,
        decoder: &dyn ProfileDecoder,
        eep_type: Option<&str>,
        telegram: &[u8],
    ) -> ProfileOutcome {
        match self {
            ProfileCapability::FourBs => decoder.decode_4bs(eep_type, telegram),
            ProfileCapability::Vld => decoder.decode_vld(eep_type, telegram),
            ProfileCapability::Rps => decoder.decode_rps(eep_type, telegram),
        }
    }
}

/// Offer `telegram` to each decoder in order and return the first decoded
/// field set, or `None` when no decoder claims it.
pub fn dispatch(
    capability: ProfileCapability,
    decoders: &[&dyn ProfileDecoder],
    eep_type: Option<&str>,
    telegram: &[u8],
) -> Option<ProfileFields> {
    for (position, decoder) in decoders.iter().enumerate() {
        match capability.invoke(*decoder, eep_type, telegram) {
            ProfileOutcome::Decoded(fields) => {
                trace!(?capability, position, eep_type, "profile decoder matched");
                return Some(fields);
            }
            ProfileOutcome::NoMatch | ProfileOutcome::Unsupported => continue,
        }
    }
    trace!(
        ?capability,
        candidates = decoders.len(),
        "no profile decoder matched"
    );
    None
}
