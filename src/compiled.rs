use crate::{
    bits::BitTriple,
    errors::{CompileError, ReadError},
    field::{CardField, Field, Parity, ParityBit},
    fragment::Fragment,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledField {
    pub card_field: CardField,
    pub total_bits: usize,
    pub fragments: Vec<CompiledFragment>,
}

impl TryFrom<&Field> for CompiledField {
    type Error = CompileError;

    fn try_from(value: &Field) -> Result<Self, Self::Error> {
        let total_bits: usize = value
            .fragments
            .iter()
            .fold(0, |acc: usize, fragment| acc.saturating_add(fragment.len_bits));

        if total_bits == 0 || total_bits > value.card_field.max_bits() {
            return Err(CompileError::InvalidFieldSize(value.card_field));
        }

        let mut fragments = Vec::with_capacity(value.fragments.len());
        let mut remaining = total_bits;
        for fragment in &value.fragments {
            remaining -= fragment.len_bits;

            let mut compiled_fragment = CompiledFragment::try_from(fragment)?;
            compiled_fragment.shift = remaining;

            fragments.push(compiled_fragment);
        }

        Ok(CompiledField {
            card_field: value.card_field,
            total_bits,
            fragments,
        })
    }
}

impl CompiledField {
    /// Largest value the field can hold.
    pub fn max_value(&self) -> u64 {
        if self.total_bits >= 64 {
            u64::MAX
        } else {
            (1u64 << self.total_bits) - 1
        }
    }

    /// Gathers the field's fragments from a `bit_len`-bit message.
    pub fn assemble(&self, bits: &BitTriple, bit_len: usize) -> Result<u64, ReadError> {
        let mut value = 0u64;

        for fragment in &self.fragments {
            let part = bits.read_bits_at(bit_len, fragment.offset_bits, fragment.len_bits)?;
            value |= part << fragment.shift;
        }

        Ok(value)
    }

    /// Spreads `value` over the field's fragments. The value must already fit [Self::max_value].
    pub fn scatter(&self, bits: &mut BitTriple, bit_len: usize, value: u64) -> Result<(), ReadError> {
        for fragment in &self.fragments {
            let part = value >> fragment.shift;
            bits.write_bits_at(bit_len, fragment.offset_bits, fragment.len_bits, part)?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledFragment {
    pub offset_bits: usize,
    pub len_bits: usize,
    pub shift: usize,
}

impl TryFrom<&Fragment> for CompiledFragment {
    type Error = CompileError;

    fn try_from(fragment: &Fragment) -> Result<Self, Self::Error> {
        if fragment.len_bits == 0 {
            return Err(CompileError::InvalidFragment);
        }

        Ok(CompiledFragment {
            offset_bits: fragment.offset_bits,
            len_bits: fragment.len_bits,
            shift: 0,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledParity {
    pub position: usize,
    pub parity: Parity,
    pub covers: Vec<Fragment>,
}

impl TryFrom<&ParityBit> for CompiledParity {
    type Error = CompileError;

    fn try_from(value: &ParityBit) -> Result<Self, Self::Error> {
        if value.covers.iter().any(|fragment| fragment.len_bits == 0) {
            return Err(CompileError::InvalidFragment);
        }

        Ok(CompiledParity {
            position: value.position,
            parity: value.parity,
            covers: value.covers.clone(),
        })
    }
}

impl CompiledParity {
    /// Check bit the covered bits call for.
    pub fn expected(&self, bits: &BitTriple, bit_len: usize) -> Result<u8, ReadError> {
        let mut ones = 0u32;

        for fragment in &self.covers {
            let mut pos = fragment.offset_bits;
            while pos < fragment.end_bits() {
                let n = (fragment.end_bits() - pos).min(64);
                ones += bits.read_bits_at(bit_len, pos, n)?.count_ones();
                pos += n;
            }
        }

        Ok(self.parity.bit_for(ones))
    }

    pub fn apply(&self, bits: &mut BitTriple, bit_len: usize) -> Result<(), ReadError> {
        let bit = self.expected(bits, bit_len)?;
        bits.write_bits_at(bit_len, self.position, 1, bit as u64)
    }

    pub fn check(&self, bits: &BitTriple, bit_len: usize) -> Result<bool, ReadError> {
        Ok(bits.read_bit_at(bit_len, self.position)? == self.expected(bits, bit_len)?)
    }
}
