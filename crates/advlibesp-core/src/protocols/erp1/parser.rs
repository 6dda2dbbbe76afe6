use serde_json::Value;
use tracing::debug;

use super::error::Erp1Error;
use super::layout;
use super::reader::Erp1Reader;
use super::types::TelegramType;
use crate::identifier::DeviceSignature;
use crate::packet::{DecodedPacket, ProcessOptions, keys};
use crate::profile::{ProfileCapability, ProfileDecoder, ProfileFields, dispatch};

/// Decoded ERP1 telegram before it is flattened into a [`DecodedPacket`].
#[derive(Debug, Clone, PartialEq)]
pub struct Erp1Telegram {
    pub telegram_type: TelegramType,
    pub sender: Option<DeviceSignature>,
    pub content: TelegramContent,
}

/// Type-specific content of a telegram.
#[derive(Debug, Clone, PartialEq)]
pub enum TelegramContent {
    /// Nothing beyond the sender is extracted for this type.
    Empty,
    /// 1BS contact state.
    Contact { is_contact_detected: bool },
    /// Fields produced by a profile decoder.
    Profile(ProfileFields),
    /// Data bytes as lowercase hex, no decoder claimed them.
    Raw { payload: String },
    /// UTE teach-in: the announced EEP and the raw data bytes.
    TeachIn {
        eep_type: Option<String>,
        payload: Option<String>,
    },
}

impl Erp1Telegram {
    /// Flatten into output fields. `telegramType` is only included when
    /// `include_overhead` is set and the R-ORG is recognized.
    pub fn into_packet(self, include_overhead: bool) -> DecodedPacket {
        let mut packet = DecodedPacket::new();
        if include_overhead {
            if let Some(name) = self.telegram_type.name() {
                packet.insert(keys::TELEGRAM_TYPE, name);
            }
        }

        if let TelegramContent::Contact {
            is_contact_detected,
        } = &self.content
        {
            packet.insert(
                keys::IS_CONTACT_DETECTED,
                vec![Value::Bool(*is_contact_detected)],
            );
        }

        if let Some(sender) = self.sender {
            packet.set_device_ids(&[sender]);
        }

        match self.content {
            TelegramContent::Empty | TelegramContent::Contact { .. } => {}
            TelegramContent::Profile(fields) => packet.merge(fields),
            TelegramContent::Raw { payload } => {
                packet.insert(keys::TELEGRAM_PAYLOAD, payload);
            }
            TelegramContent::TeachIn { eep_type, payload } => {
                if let Some(eep_type) = eep_type {
                    packet.insert(keys::EEP_TYPE, eep_type);
                }
                if let Some(payload) = payload {
                    packet.insert(keys::TELEGRAM_PAYLOAD, payload);
                }
            }
        }

        packet
    }
}

/// Decode an ERP1 telegram (R-ORG, data, sender id, status).
///
/// # Examples
/// ```
/// use advlibesp_core::ProcessOptions;
/// use advlibesp_core::protocols::erp1::{TelegramContent, TelegramType, parse_erp1};
///
/// let telegram = [0xa5, 0x56, 0x02, 0x46, 0x09, 0x05, 0x17, 0x4f, 0x00, 0x80];
/// let decoded = parse_erp1(&telegram, &[], &ProcessOptions::default()).unwrap();
/// assert_eq!(decoded.telegram_type, TelegramType::FourBs);
/// assert_eq!(decoded.sender.unwrap().to_string(), "05174f00/7");
/// assert_eq!(
///     decoded.content,
///     TelegramContent::Raw { payload: "56024609".to_string() }
/// );
/// ```
pub fn parse_erp1(
    telegram: &[u8],
    decoders: &[&dyn ProfileDecoder],
    options: &ProcessOptions,
) -> Result<Erp1Telegram, Erp1Error> {
    let reader = Erp1Reader::new(telegram);
    reader.require_len(layout::MIN_LEN)?;

    let telegram_type = TelegramType::from_rorg(reader.read_rorg()?);

    let (sender, content) = match telegram_type {
        TelegramType::FourBs => {
            // Telegrams cut short before the sender still carry their data bytes.
            let sender = match reader.read_sender(layout::FOUR_BS_SENDER_RANGE) {
                Ok(sender) => Some(sender),
                Err(err) => {
                    debug!(error = %err, "4BS sender not present");
                    None
                }
            };
            let content = profile_or_raw(
                ProfileCapability::FourBs,
                sender.as_ref(),
                decoders,
                options,
                telegram,
                || reader.read_hex(layout::FOUR_BS_DATA_RANGE),
            )?;
            (sender, content)
        }
        TelegramType::Vld => {
            let sender = reader.read_trailing_sender()?;
            let content = profile_or_raw(
                ProfileCapability::Vld,
                Some(&sender),
                decoders,
                options,
                telegram,
                || reader.read_variable_data_hex(),
            )?;
            (Some(sender), content)
        }
        TelegramType::Rps => {
            let sender = reader.read_sender(layout::RPS_SENDER_RANGE)?;
            let content = profile_or_raw(
                ProfileCapability::Rps,
                Some(&sender),
                decoders,
                options,
                telegram,
                || reader.read_hex(layout::RPS_DATA_RANGE),
            )?;
            (Some(sender), content)
        }
        TelegramType::OneBs => {
            let sender = reader.read_sender(layout::ONE_BS_SENDER_RANGE)?;
            let is_contact_detected =
                reader.read_flag(layout::ONE_BS_DATA_OFFSET, layout::CONTACT_MASK)?;
            (
                Some(sender),
                TelegramContent::Contact {
                    is_contact_detected,
                },
            )
        }
        TelegramType::Ute => {
            let sender = reader.read_trailing_sender()?;
            // Short teach-ins still identify their sender.
            let content = TelegramContent::TeachIn {
                eep_type: reader.read_ute_eep().ok(),
                payload: reader.read_hex(layout::UTE_DATA_RANGE).ok(),
            };
            (Some(sender), content)
        }
        TelegramType::Msc => {
            let sender = reader.read_trailing_sender()?;
            let payload = reader.read_variable_data_hex()?;
            (Some(sender), TelegramContent::Raw { payload })
        }
        TelegramType::Adt => (Some(reader.read_trailing_sender()?), TelegramContent::Empty),
        TelegramType::Sec
        | TelegramType::SecEncaps
        | TelegramType::SecMan
        | TelegramType::SmReq
        | TelegramType::SysEx
        | TelegramType::SmLrnReq
        | TelegramType::SmLrnAns
        | TelegramType::Signal
        | TelegramType::Unrecognized(_) => (None, TelegramContent::Empty),
    };

    Ok(Erp1Telegram {
        telegram_type,
        sender,
        content,
    })
}

fn profile_or_raw<F>(
    capability: ProfileCapability,
    sender: Option<&DeviceSignature>,
    decoders: &[&dyn ProfileDecoder],
    options: &ProcessOptions,
    telegram: &[u8],
    raw_payload: F,
) -> Result<TelegramContent, Erp1Error>
where
    F: FnOnce() -> Result<String, Erp1Error>,
{
    let signature = sender.map(DeviceSignature::to_string);
    let eep_type = signature
        .as_deref()
        .and_then(|signature| options.eep_type_for(signature));
    match dispatch(capability, decoders, eep_type, telegram) {
        Some(fields) => Ok(TelegramContent::Profile(fields)),
        None => Ok(TelegramContent::Raw {
            payload: raw_payload()?,
        }),
    }
}
