//! Building blocks of a [crate::format::Layout]: card fields, parity bits and fixed marker bits.

use std::fmt;

use crate::fragment::Fragment;

/// The card identity values a Wiegand format can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CardField {
    FacilityCode,
    CardNumber,
    IssueLevel,
    OemCode,
}

impl CardField {
    /// All fields in presentation order.
    pub const ALL: [CardField; 4] = [
        CardField::FacilityCode,
        CardField::CardNumber,
        CardField::IssueLevel,
        CardField::OemCode,
    ];

    /// Widest layout the field's value type can hold.
    pub fn max_bits(&self) -> usize {
        match self {
            CardField::CardNumber => 64,
            _ => 32,
        }
    }

    /// Short label used when printing decoded cards.
    pub fn label(&self) -> &'static str {
        match self {
            CardField::FacilityCode => "FC",
            CardField::CardNumber => "CN",
            CardField::IssueLevel => "Issue",
            CardField::OemCode => "OEM",
        }
    }
}

impl fmt::Display for CardField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CardField::FacilityCode => "facility code",
            CardField::CardNumber => "card number",
            CardField::IssueLevel => "issue level",
            CardField::OemCode => "OEM code",
        };
        f.write_str(name)
    }
}

#[cfg(feature = "serde")]
impl From<crate::serde::CardFieldDef> for CardField {
    fn from(value: crate::serde::CardFieldDef) -> Self {
        match value {
            crate::serde::CardFieldDef::FacilityCode => CardField::FacilityCode,
            crate::serde::CardFieldDef::CardNumber => CardField::CardNumber,
            crate::serde::CardFieldDef::IssueLevel => CardField::IssueLevel,
            crate::serde::CardFieldDef::OemCode => CardField::OemCode,
        }
    }
}

/// Where a card field lives in the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub card_field: CardField,
    /// Bit ranges concatenated MSB-first to form the value (one or more, possibly non-contiguous).
    pub fragments: Vec<Fragment>,
}

impl Field {
    /// A field stored in a single contiguous run of bits.
    pub fn linear(card_field: CardField, offset_bits: usize, len_bits: usize) -> Self {
        Field {
            card_field,
            fragments: vec![Fragment::new(offset_bits, len_bits)],
        }
    }
}

#[cfg(feature = "serde")]
impl From<crate::serde::FieldDef> for Field {
    fn from(value: crate::serde::FieldDef) -> Self {
        Field {
            card_field: value.field.into(),
            fragments: value.fragments.into_iter().map(Into::into).collect(),
        }
    }
}

/// Parity convention of a check bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    /// Covered ones plus the check bit add up to an even count.
    Even,
    /// Covered ones plus the check bit add up to an odd count.
    Odd,
}

impl Parity {
    /// Check bit for a run holding `ones` set bits.
    pub fn bit_for(&self, ones: u32) -> u8 {
        let odd_count = (ones % 2) as u8;
        match self {
            Parity::Even => odd_count,
            Parity::Odd => odd_count ^ 1,
        }
    }
}

/// A check bit at `position` computed over the bits in `covers`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParityBit {
    pub position: usize,
    pub parity: Parity,
    pub covers: Vec<Fragment>,
}

impl ParityBit {
    pub fn even(position: usize, covers: Vec<Fragment>) -> Self {
        ParityBit {
            position,
            parity: Parity::Even,
            covers,
        }
    }

    pub fn odd(position: usize, covers: Vec<Fragment>) -> Self {
        ParityBit {
            position,
            parity: Parity::Odd,
            covers,
        }
    }
}

#[cfg(feature = "serde")]
impl From<crate::serde::ParityDef> for ParityBit {
    fn from(value: crate::serde::ParityDef) -> Self {
        ParityBit {
            position: value.position,
            parity: match value.parity {
                crate::serde::ParityKindDef::Even => Parity::Even,
                crate::serde::ParityKindDef::Odd => Parity::Odd,
            },
            covers: value.covers.into_iter().map(Into::into).collect(),
        }
    }
}

/// A marker bit every valid message carries at `position`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedBit {
    pub position: usize,
    pub value: bool,
}

#[cfg(feature = "serde")]
impl From<crate::serde::FixedBitDef> for FixedBit {
    fn from(value: crate::serde::FixedBitDef) -> Self {
        FixedBit {
            position: value.position,
            value: value.value,
        }
    }
}
