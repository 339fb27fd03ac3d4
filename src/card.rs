//! Structured card identity values and decode results.

use std::fmt;

use crate::{field::CardField, format::WiegandFormat};

/// Identity values carried by a credential. Fields a format does not define stay zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CardFields {
    pub facility_code: u32,
    pub card_number: u64,
    pub issue_level: u32,
    pub oem_code: u32,
}

impl CardFields {
    pub fn new(facility_code: u32, card_number: u64) -> Self {
        CardFields {
            facility_code,
            card_number,
            ..Default::default()
        }
    }

    pub fn with_issue_level(mut self, issue_level: u32) -> Self {
        self.issue_level = issue_level;
        self
    }

    pub fn with_oem_code(mut self, oem_code: u32) -> Self {
        self.oem_code = oem_code;
        self
    }

    pub fn get(&self, field: CardField) -> u64 {
        match field {
            CardField::FacilityCode => self.facility_code as u64,
            CardField::CardNumber => self.card_number,
            CardField::IssueLevel => self.issue_level as u64,
            CardField::OemCode => self.oem_code as u64,
        }
    }

    /// Stores `value`; layouts never give a 32-bit field more than 32 bits.
    pub(crate) fn set(&mut self, field: CardField, value: u64) {
        match field {
            CardField::FacilityCode => self.facility_code = value as u32,
            CardField::CardNumber => self.card_number = value,
            CardField::IssueLevel => self.issue_level = value as u32,
            CardField::OemCode => self.oem_code = value as u32,
        }
    }
}

/// Outcome of recomputing a format's parity bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParityStatus {
    /// The format carries no parity bits.
    Absent,
    Valid,
    Invalid,
}

impl ParityStatus {
    /// True unless a parity bit disagrees.
    pub fn is_ok(&self) -> bool {
        !matches!(self, ParityStatus::Invalid)
    }
}

/// One structurally valid reading of a bit pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedCard<'a> {
    pub format: &'a WiegandFormat,
    pub fields: CardFields,
    pub parity: ParityStatus,
}

impl DecodedCard<'_> {
    pub fn format_name(&self) -> &str {
        self.format.name()
    }
}

impl fmt::Display for DecodedCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<10} {:<34}",
            self.format.name(),
            self.format.description()
        )?;

        for field in CardField::ALL {
            if self.format.has_field(field) {
                write!(f, " {}: {}", field.label(), self.fields.get(field))?;
            }
        }

        match self.parity {
            ParityStatus::Absent => Ok(()),
            ParityStatus::Valid => write!(f, "  parity: ok"),
            ParityStatus::Invalid => write!(f, "  parity: fail"),
        }
    }
}
