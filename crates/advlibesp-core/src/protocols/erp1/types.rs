use std::fmt;

/// ERP1 telegram type, selected by the R-ORG byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TelegramType {
    Sec,
    SecEncaps,
    SecMan,
    FourBs,
    Adt,
    SmReq,
    SysEx,
    SmLrnReq,
    SmLrnAns,
    Signal,
    Msc,
    Vld,
    Ute,
    OneBs,
    Rps,
    /// R-ORG without an assigned telegram type.
    Unrecognized(u8),
}

impl TelegramType {
    pub const fn from_rorg(rorg: u8) -> Self {
        match rorg {
            0x30 => TelegramType::Sec,
            0x31 => TelegramType::SecEncaps,
            0x34 => TelegramType::SecMan,
            0xa5 => TelegramType::FourBs,
            0xa6 => TelegramType::Adt,
            0xa7 => TelegramType::SmReq,
            0xc5 => TelegramType::SysEx,
            0xc6 => TelegramType::SmLrnReq,
            0xc7 => TelegramType::SmLrnAns,
            0xd0 => TelegramType::Signal,
            0xd1 => TelegramType::Msc,
            0xd2 => TelegramType::Vld,
            0xd4 => TelegramType::Ute,
            0xd5 => TelegramType::OneBs,
            0xf6 => TelegramType::Rps,
            other => TelegramType::Unrecognized(other),
        }
    }

    pub const fn rorg(self) -> u8 {
        match self {
            TelegramType::Sec => 0x30,
            TelegramType::SecEncaps => 0x31,
            TelegramType::SecMan => 0x34,
            TelegramType::FourBs => 0xa5,
            TelegramType::Adt => 0xa6,
            TelegramType::SmReq => 0xa7,
            TelegramType::SysEx => 0xc5,
            TelegramType::SmLrnReq => 0xc6,
            TelegramType::SmLrnAns => 0xc7,
            TelegramType::Signal => 0xd0,
            TelegramType::Msc => 0xd1,
            TelegramType::Vld => 0xd2,
            TelegramType::Ute => 0xd4,
            TelegramType::OneBs => 0xd5,
            TelegramType::Rps => 0xf6,
            TelegramType::Unrecognized(rorg) => rorg,
        }
    }

    /// Name used in decoded output; `None` for unrecognized R-ORG codes.
    pub const fn name(self) -> Option<&'static str> {
        let name = match self {
            TelegramType::Sec => "SEC",
            TelegramType::SecEncaps => "SEC_ENCAPS",
            TelegramType::SecMan => "SEC_MAN",
            TelegramType::FourBs => "4BS",
            TelegramType::Adt => "ADT",
            TelegramType::SmReq => "SM_REQ",
            TelegramType::SysEx => "SYS_EX",
            TelegramType::SmLrnReq => "SM_LRN_REQ",
            TelegramType::SmLrnAns => "SM_LRN_ANS",
            TelegramType::Signal => "SIGNAL",
            TelegramType::Msc => "MSC",
            TelegramType::Vld => "VLD",
            TelegramType::Ute => "UTE",
            TelegramType::OneBs => "1BS",
            TelegramType::Rps => "RPS",
            TelegramType::Unrecognized(_) => return None,
        };
        Some(name)
    }
}

impl fmt::Display for TelegramType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "R-ORG {:#04x}", self.rorg()),
        }
    }
}
