use std::fmt;

use serde::{Serialize, Serializer};

use super::layout;

/// ESP3 packet type, as carried in the last header byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PacketType {
    RadioErp1,
    Response,
    RadioSubTel,
    Event,
    CommonCommand,
    SmartAckCommand,
    RemoteManCommand,
    RadioMessage,
    RadioErp2,
    ConfigCommand,
    CommandAccepted,
    Radio802_15_4,
    Command2_4,
    /// Any code from `0x80` upwards.
    ManufacturerSpecific(u8),
    /// Unassigned code below `0x80`, reserved for future use.
    Rfu(u8),
}

impl PacketType {
    pub const fn from_code(code: u8) -> Self {
        if code >= layout::MANUFACTURER_SPECIFIC_MIN {
            return PacketType::ManufacturerSpecific(code);
        }
        match code {
            0x01 => PacketType::RadioErp1,
            0x02 => PacketType::Response,
            0x03 => PacketType::RadioSubTel,
            0x04 => PacketType::Event,
            0x05 => PacketType::CommonCommand,
            0x06 => PacketType::SmartAckCommand,
            0x07 => PacketType::RemoteManCommand,
            0x09 => PacketType::RadioMessage,
            0x0a => PacketType::RadioErp2,
            0x0b => PacketType::ConfigCommand,
            0x0c => PacketType::CommandAccepted,
            0x10 => PacketType::Radio802_15_4,
            0x11 => PacketType::Command2_4,
            other => PacketType::Rfu(other),
        }
    }

    pub const fn code(self) -> u8 {
        match self {
            PacketType::RadioErp1 => 0x01,
            PacketType::Response => 0x02,
            PacketType::RadioSubTel => 0x03,
            PacketType::Event => 0x04,
            PacketType::CommonCommand => 0x05,
            PacketType::SmartAckCommand => 0x06,
            PacketType::RemoteManCommand => 0x07,
            PacketType::RadioMessage => 0x09,
            PacketType::RadioErp2 => 0x0a,
            PacketType::ConfigCommand => 0x0b,
            PacketType::CommandAccepted => 0x0c,
            PacketType::Radio802_15_4 => 0x10,
            PacketType::Command2_4 => 0x11,
            PacketType::ManufacturerSpecific(code) | PacketType::Rfu(code) => code,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            PacketType::RadioErp1 => "RADIO_ERP1",
            PacketType::Response => "RESPONSE",
            PacketType::RadioSubTel => "RADIO_SUB_TEL",
            PacketType::Event => "EVENT",
            PacketType::CommonCommand => "COMMON_COMMAND",
            PacketType::SmartAckCommand => "SMART_ACK_COMMAND",
            PacketType::RemoteManCommand => "REMOTE_MAN_COMMAND",
            PacketType::RadioMessage => "RADIO_MESSAGE",
            PacketType::RadioErp2 => "RADIO_ERP2",
            PacketType::ConfigCommand => "CONFIG_COMMAND",
            PacketType::CommandAccepted => "COMMAND_ACCEPTED",
            PacketType::Radio802_15_4 => "RADIO_802_15_4",
            PacketType::Command2_4 => "COMMAND_2_4",
            PacketType::ManufacturerSpecific(_) => "MANUFACTURER_SPECIFIC_COMMUNICATION",
            PacketType::Rfu(_) => "RFU",
        }
    }
}

impl fmt::Display for PacketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PacketType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
