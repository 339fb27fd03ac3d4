//! Wiegand format descriptors: a declarative [Layout] compiled into a [WiegandFormat].

use crate::{
    bits::{BitTriple, MAX_BITS},
    card::{CardFields, DecodedCard, ParityStatus},
    compiled::{CompiledField, CompiledParity},
    errors::{CompileError, EncodeError, ReadError},
    field::{CardField, Field, FixedBit, ParityBit},
    fragment::Fragment,
};

/// Declarative description of a named bit layout. Use [WiegandFormat::compile] to validate it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    /// Unique catalog key, matched case-sensitively.
    pub name: String,
    pub description: String,
    /// Declared message length in bits.
    pub bit_len: usize,
    /// Card fields carried by the format.
    pub fields: Vec<Field>,
    /// Check bits, computed in order after the fields are placed.
    pub parity: Vec<ParityBit>,
    /// Marker bits that every valid message carries.
    pub fixed: Vec<FixedBit>,
}

#[cfg(feature = "serde")]
impl From<crate::serde::FormatDef> for Layout {
    fn from(value: crate::serde::FormatDef) -> Self {
        Layout {
            name: value.name,
            description: value.description,
            bit_len: value.bit_len,
            fields: value.fields.into_iter().map(Into::into).collect(),
            parity: value.parity.into_iter().map(Into::into).collect(),
            fixed: value.fixed.into_iter().map(Into::into).collect(),
        }
    }
}

/// A validated format: fields never overlap each other, parity bits or fixed bits,
/// and everything lies inside `bit_len`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WiegandFormat {
    name: String,
    description: String,
    bit_len: usize,
    fields: Vec<CompiledField>,
    parity: Vec<CompiledParity>,
    fixed: Vec<FixedBit>,
}

impl WiegandFormat {
    /// Compiles a layout. Fails if any part is out of range or claims a bit twice.
    pub fn compile(layout: &Layout) -> Result<Self, CompileError> {
        if layout.name.trim().is_empty() {
            return Err(CompileError::InvalidFormatName);
        }
        if layout.bit_len == 0 || layout.bit_len > MAX_BITS {
            return Err(CompileError::InvalidLength(layout.bit_len));
        }

        let mut claimed = Claimed::new(layout.bit_len);
        let mut fields: Vec<CompiledField> = Vec::with_capacity(layout.fields.len());

        for field in &layout.fields {
            if fields.iter().any(|f| f.card_field == field.card_field) {
                return Err(CompileError::DuplicateField(field.card_field));
            }

            let compiled_field = CompiledField::try_from(field)?;
            for fragment in &field.fragments {
                claimed.claim(fragment)?;
            }

            fields.push(compiled_field);
        }

        let mut parity = Vec::with_capacity(layout.parity.len());
        for parity_bit in &layout.parity {
            let compiled_parity = CompiledParity::try_from(parity_bit)?;
            claimed.claim(&Fragment::new(parity_bit.position, 1))?;
            for fragment in &parity_bit.covers {
                claimed.check_range(fragment)?;
            }

            parity.push(compiled_parity);
        }

        for fixed in &layout.fixed {
            claimed.claim(&Fragment::new(fixed.position, 1))?;
        }

        Ok(WiegandFormat {
            name: layout.name.clone(),
            description: layout.description.clone(),
            bit_len: layout.bit_len,
            fields,
            parity,
            fixed: layout.fixed.clone(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    pub fn has_parity(&self) -> bool {
        !self.parity.is_empty()
    }

    pub fn has_field(&self, card_field: CardField) -> bool {
        self.field(card_field).is_some()
    }

    /// Bit width allotted to `card_field`, if the format carries it.
    pub fn field_bits(&self, card_field: CardField) -> Option<usize> {
        self.field(card_field).map(|f| f.total_bits)
    }

    fn field(&self, card_field: CardField) -> Option<&CompiledField> {
        self.fields.iter().find(|f| f.card_field == card_field)
    }

    /// Packs `card` into a right-aligned `bit_len`-bit message.
    ///
    /// Fails when a value exceeds its field width or the format lacks a field
    /// that was given a non-zero value.
    pub fn pack(&self, card: &CardFields) -> Result<BitTriple, EncodeError> {
        for card_field in CardField::ALL {
            let value = card.get(card_field);
            match self.field(card_field) {
                None if value != 0 => return Err(EncodeError::UnsupportedField(card_field)),
                Some(field) if value > field.max_value() => {
                    return Err(EncodeError::Overflow {
                        field: card_field,
                        value,
                        max_bits: field.total_bits,
                    });
                }
                _ => {}
            }
        }

        let mut bits = BitTriple::default();
        self.write(&mut bits, card)?;

        Ok(bits)
    }

    fn write(&self, bits: &mut BitTriple, card: &CardFields) -> Result<(), ReadError> {
        for fixed in &self.fixed {
            bits.write_bits_at(self.bit_len, fixed.position, 1, fixed.value as u64)?;
        }
        for field in &self.fields {
            field.scatter(bits, self.bit_len, card.get(field.card_field))?;
        }
        for parity in &self.parity {
            parity.apply(bits, self.bit_len)?;
        }

        Ok(())
    }

    /// Reads the card fields out of a `bit_len`-bit message. Bits above the
    /// declared length are ignored.
    ///
    /// Returns `None` when the fixed marker bits do not match.
    pub fn unpack(&self, bits: &BitTriple) -> Option<DecodedCard<'_>> {
        let bits = bits.truncated(self.bit_len);

        for fixed in &self.fixed {
            if bits.read_bit_at(self.bit_len, fixed.position).ok()? != fixed.value as u8 {
                return None;
            }
        }

        let mut fields = CardFields::default();
        for field in &self.fields {
            fields.set(field.card_field, field.assemble(&bits, self.bit_len).ok()?);
        }

        let parity = if !self.has_parity() {
            ParityStatus::Absent
        } else {
            let mut status = ParityStatus::Valid;
            for parity in &self.parity {
                if !parity.check(&bits, self.bit_len).ok()? {
                    status = ParityStatus::Invalid;
                }
            }
            status
        };

        Some(DecodedCard {
            format: self,
            fields,
            parity,
        })
    }
}

/// Tracks which message bits a layout has already assigned.
struct Claimed {
    bit_len: usize,
    mask: u128,
}

impl Claimed {
    fn new(bit_len: usize) -> Self {
        Claimed { bit_len, mask: 0 }
    }

    fn check_range(&self, fragment: &Fragment) -> Result<(), CompileError> {
        if fragment.len_bits == 0 {
            return Err(CompileError::InvalidFragment);
        }
        if fragment.end_bits() > self.bit_len {
            return Err(CompileError::OutOfRange(fragment.end_bits() - 1));
        }

        Ok(())
    }

    fn claim(&mut self, fragment: &Fragment) -> Result<(), CompileError> {
        self.check_range(fragment)?;

        for pos in fragment.offset_bits..fragment.end_bits() {
            let bit = 1u128 << pos;
            if self.mask & bit != 0 {
                return Err(CompileError::OverlappingBits(pos));
            }
            self.mask |= bit;
        }

        Ok(())
    }
}
