use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::identifier::DeviceSignature;

/// Field names used in [`DecodedPacket`].
pub mod keys {
    pub const TYPE: &str = "type";
    pub const DATA_LENGTH: &str = "dataLength";
    pub const OPTIONAL_LENGTH: &str = "optionalLength";
    pub const TELEGRAM_TYPE: &str = "telegramType";
    pub const DEVICE_IDS: &str = "deviceIds";
    pub const TELEGRAM_PAYLOAD: &str = "telegramPayload";
    pub const IS_CONTACT_DETECTED: &str = "isContactDetected";
    pub const EEP_TYPE: &str = "eepType";
    pub const URI: &str = "uri";
}

/// Decoded packet as an open key/value record.
///
/// Header fields, telegram fields and whatever a profile decoder contributes
/// are merged into one flat JSON object. Later merges overwrite earlier keys.
///
/// # Examples
/// ```
/// use advlibesp_core::{DecodedPacket, ProcessOptions, process};
///
/// let packet: DecodedPacket = process(
///     "55000707017ad5090591ee008001ffffffff47003c",
///     &[],
///     &ProcessOptions::default(),
/// )
/// .unwrap();
/// assert_eq!(packet.telegram_type(), Some("1BS"));
/// assert_eq!(packet.device_ids(), vec!["0591ee00/7"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DecodedPacket(Map<String, Value>);

impl DecodedPacket {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Merge another record in; its keys win on conflict.
    pub fn merge(&mut self, other: impl IntoIterator<Item = (String, Value)>) {
        self.0.extend(other);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn uri(&self) -> Option<&str> {
        self.get(keys::URI).and_then(Value::as_str)
    }

    pub fn telegram_type(&self) -> Option<&str> {
        self.get(keys::TELEGRAM_TYPE).and_then(Value::as_str)
    }

    pub fn eep_type(&self) -> Option<&str> {
        self.get(keys::EEP_TYPE).and_then(Value::as_str)
    }

    pub fn telegram_payload(&self) -> Option<&str> {
        self.get(keys::TELEGRAM_PAYLOAD).and_then(Value::as_str)
    }

    /// Device signatures, in order; non-string entries are skipped.
    pub fn device_ids(&self) -> Vec<&str> {
        self.get(keys::DEVICE_IDS)
            .and_then(Value::as_array)
            .map(|ids| ids.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    pub(crate) fn set_device_ids(&mut self, ids: &[DeviceSignature]) {
        let ids: Vec<Value> = ids.iter().map(|id| Value::String(id.to_string())).collect();
        self.insert(keys::DEVICE_IDS, ids);
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl IntoIterator for DecodedPacket {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<DecodedPacket> for Value {
    fn from(packet: DecodedPacket) -> Self {
        Value::Object(packet.0)
    }
}

/// Per-device configuration used to steer profile decoders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceProfile {
    /// EEP identifier such as `A5-02-05`, passed to decoders as a hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eep_type: Option<String>,
}

impl DeviceProfile {
    pub fn with_eep_type(eep_type: impl Into<String>) -> Self {
        Self {
            eep_type: Some(eep_type.into()),
        }
    }
}

/// Options recognised by [`process`](crate::process).
///
/// Deserializes from the camelCase keys used by gateway configuration files.
///
/// # Examples
/// ```
/// use advlibesp_core::ProcessOptions;
///
/// let options: ProcessOptions = serde_json::from_str(
///     r#"{ "ignoreProtocolOverhead": true,
///          "deviceProfiles": { "05174f00/7": { "eepType": "A5-02-05" } } }"#,
/// )
/// .unwrap();
/// assert!(options.ignore_protocol_overhead);
/// assert!(!options.is_erp1_payload_only);
/// assert_eq!(options.eep_type_for("05174f00/7"), Some("A5-02-05"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProcessOptions {
    /// Drop header fields and `telegramType` from the output.
    pub ignore_protocol_overhead: bool,
    /// Treat the input as a bare ERP1 telegram without ESP3 envelope.
    #[serde(rename = "isERP1PayloadOnly")]
    pub is_erp1_payload_only: bool,
    /// Device profiles keyed by signature string.
    pub device_profiles: HashMap<String, DeviceProfile>,
}

impl ProcessOptions {
    pub fn eep_type_for(&self, signature: &str) -> Option<&str> {
        self.device_profiles
            .get(signature)
            .and_then(|profile| profile.eep_type.as_deref())
    }

    pub(crate) fn include_protocol_overhead(&self) -> bool {
        !self.ignore_protocol_overhead
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{DecodedPacket, ProcessOptions, keys};

    #[test]
    fn merge_overwrites_existing_keys() {
        let mut packet = DecodedPacket::new();
        packet.insert(keys::URI, "https://example.com/a");
        packet.insert(keys::TELEGRAM_TYPE, "4BS");

        let mut other = DecodedPacket::new();
        other.insert(keys::URI, "https://example.com/b");
        packet.merge(other);

        assert_eq!(packet.uri(), Some("https://example.com/b"));
        assert_eq!(packet.telegram_type(), Some("4BS"));
        assert_eq!(packet.len(), 2);
    }

    #[test]
    fn device_ids_skip_non_strings() {
        let mut packet = DecodedPacket::new();
        packet.insert(keys::DEVICE_IDS, json!(["05174f00/7", 12]));
        assert_eq!(packet.device_ids(), vec!["05174f00/7"]);
        assert!(DecodedPacket::new().device_ids().is_empty());
    }

    #[test]
    fn options_default_when_keys_missing() {
        let options: ProcessOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, ProcessOptions::default());
    }

    #[test]
    fn options_accept_payload_only_key() {
        let options: ProcessOptions =
            serde_json::from_value(json!({ "isERP1PayloadOnly": true })).unwrap();
        assert!(options.is_erp1_payload_only);
    }

    #[test]
    fn profile_without_eep_type_gives_no_hint() {
        let options: ProcessOptions =
            serde_json::from_value(json!({ "deviceProfiles": { "05174f00/7": {} } })).unwrap();
        assert_eq!(options.eep_type_for("05174f00/7"), None);
        assert_eq!(options.eep_type_for("0591ee00/7"), None);
    }

    #[test]
    fn packet_serializes_flat() {
        let mut packet = DecodedPacket::new();
        packet.insert(keys::DATA_LENGTH, 10);
        let value = serde_json::to_value(&packet).unwrap();
        assert_eq!(value, json!({ "dataLength": 10 }));
    }
}
