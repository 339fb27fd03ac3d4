//! Conversions between hex text, binary text, byte arrays and the 96-bit [BitTriple].
//!
//! Bits are addressed in MSB-first order: for a message of `bit_len` bits,
//! position 0 is the first transmitted bit. A message is stored right-aligned
//! in the triple, so position `p` lives at value bit `bit_len - 1 - p`.

use crate::errors::{ParseError, ReadError};

/// Largest payload a [BitTriple] holds.
pub const MAX_BITS: usize = 96;

/// Up to 96 payload bits split into three 32-bit words, most significant in `top`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BitTriple {
    pub top: u32,
    pub mid: u32,
    pub bot: u32,
}

impl BitTriple {
    pub const fn new(top: u32, mid: u32, bot: u32) -> Self {
        BitTriple { top, mid, bot }
    }

    /// Builds a triple from the low 96 bits of `value`.
    pub fn from_u128(value: u128) -> Self {
        BitTriple {
            top: (value >> 64) as u32,
            mid: (value >> 32) as u32,
            bot: value as u32,
        }
    }

    pub fn as_u128(&self) -> u128 {
        ((self.top as u128) << 64) | ((self.mid as u128) << 32) | self.bot as u128
    }

    /// Position of the highest set bit plus one; 0 for an all-zero triple.
    pub fn significant_bits(&self) -> usize {
        (128 - self.as_u128().leading_zeros()) as usize
    }

    /// Keeps only the low `bit_len` bits.
    pub fn truncated(&self, bit_len: usize) -> Self {
        BitTriple::from_u128(self.as_u128() & low_mask(bit_len.min(MAX_BITS)))
    }

    /// Reads the bit at `bit_pos` of a `bit_len`-bit message. Returns 0 or 1.
    pub fn read_bit_at(&self, bit_len: usize, bit_pos: usize) -> Result<u8, ReadError> {
        self.read_bits_at(bit_len, bit_pos, 1).map(|bit| bit as u8)
    }

    /// Reads `n` bits starting at `bit_pos` of a `bit_len`-bit message (max 64 bits). MSB-first.
    pub fn read_bits_at(&self, bit_len: usize, bit_pos: usize, n: usize) -> Result<u64, ReadError> {
        if n > 64 {
            return Err(ReadError::TooManyBitsRead);
        }

        let shift = shift_for(bit_len, bit_pos, n)?;
        Ok(((self.as_u128() >> shift) & low_mask(n)) as u64)
    }

    /// Writes the low `n` bits of `value` at `bit_pos` of a `bit_len`-bit message.
    pub fn write_bits_at(
        &mut self,
        bit_len: usize,
        bit_pos: usize,
        n: usize,
        value: u64,
    ) -> Result<(), ReadError> {
        if n > 64 {
            return Err(ReadError::TooManyBitsRead);
        }

        let shift = shift_for(bit_len, bit_pos, n)?;
        let mask = low_mask(n) << shift;
        let bits = (self.as_u128() & !mask) | (((value as u128) << shift) & mask);
        *self = BitTriple::from_u128(bits);

        Ok(())
    }

    /// Packs a `bit_len`-bit message MSB-first into the minimum number of bytes,
    /// zero-padded at the low end.
    pub fn to_bytes(&self, bit_len: usize) -> Vec<u8> {
        let bit_len = bit_len.min(MAX_BITS);
        let n_bytes = bit_len.div_ceil(8);
        let aligned = self.truncated(bit_len).as_u128() << (n_bytes * 8 - bit_len);

        (0..n_bytes)
            .rev()
            .map(|i| (aligned >> (i * 8)) as u8)
            .collect()
    }

    /// Uppercase hex of [BitTriple::to_bytes].
    pub fn to_hex(&self, bit_len: usize) -> String {
        hex::encode_upper(self.to_bytes(bit_len))
    }

    /// Renders a `bit_len`-bit message as '0'/'1' characters, first bit first.
    pub fn to_binary_string(&self, bit_len: usize) -> String {
        let bit_len = bit_len.min(MAX_BITS);
        let value = self.as_u128();

        (0..bit_len)
            .rev()
            .map(|i| if (value >> i) & 1 == 1 { '1' } else { '0' })
            .collect()
    }
}

fn low_mask(n: usize) -> u128 {
    if n >= 128 { u128::MAX } else { (1u128 << n) - 1 }
}

fn shift_for(bit_len: usize, bit_pos: usize, n: usize) -> Result<usize, ReadError> {
    if bit_len > MAX_BITS {
        return Err(ReadError::OutOfBounds);
    }

    let end = bit_pos.checked_add(n).ok_or(ReadError::OutOfBounds)?;
    if end > bit_len {
        return Err(ReadError::OutOfBounds);
    }

    Ok(bit_len - end)
}

/// Reads a single bit at `bit_pos` (0 = MSB of first byte). Returns 0 or 1.
fn read_bit_at(data: &[u8], bit_pos: usize) -> Result<u8, ReadError> {
    if bit_pos >= data.len() * 8 {
        return Err(ReadError::OutOfBounds);
    }

    Ok((data[bit_pos / 8] >> (7 - bit_pos % 8)) & 1)
}

/// Number of leading hex digits in `s`.
pub fn hex_prefix_len(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_hexdigit).count()
}

/// Number of leading '0'/'1' characters in `s`.
pub fn binary_prefix_len(s: &str) -> usize {
    s.bytes().take_while(|&b| b == b'0' || b == b'1').count()
}

fn check_consumed(s: &str, consumed: usize) -> Result<(), ParseError> {
    let total = s.chars().count();
    if consumed != total {
        return Err(ParseError::InvalidCharacter { consumed, total });
    }

    Ok(())
}

/// Expands bytes to '0'/'1' characters, MSB first. The result is `8 * bytes.len()` long.
pub fn bytes_to_binary_string(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 8);
    for byte in bytes {
        out.push_str(&format!("{byte:08b}"));
    }

    out
}

/// Packs '0'/'1' text into bytes, MSB first, zero-padded to whole bytes.
/// Returns the bytes and the bit length (the input length).
pub fn binary_string_to_bytes(s: &str) -> Result<(Vec<u8>, usize), ParseError> {
    let consumed = binary_prefix_len(s);
    check_consumed(s, consumed)?;

    let mut out = vec![0u8; consumed.div_ceil(8)];
    for (i, bit) in s.bytes().enumerate() {
        out[i / 8] |= (bit - b'0') << (7 - i % 8);
    }

    Ok((out, consumed))
}

/// Parses '0'/'1' text into a triple, first character most significant.
/// Returns the triple and the number of characters consumed.
pub fn binary_string_to_bit_triple(s: &str) -> Result<(BitTriple, usize), ParseError> {
    let consumed = binary_prefix_len(s);
    check_consumed(s, consumed)?;

    if consumed > MAX_BITS {
        return Err(ParseError::TooLong {
            bits: consumed,
            max: MAX_BITS,
        });
    }

    let value = s
        .bytes()
        .fold(0u128, |acc, bit| (acc << 1) | (bit - b'0') as u128);

    Ok((BitTriple::from_u128(value), consumed))
}

/// Parses hex text (either case) into a triple, first digit most significant.
/// Returns the triple and the number of characters consumed; the bit length is four times that.
pub fn hex_string_to_bit_triple(s: &str) -> Result<(BitTriple, usize), ParseError> {
    let consumed = hex_prefix_len(s);
    check_consumed(s, consumed)?;

    if consumed * 4 > MAX_BITS {
        return Err(ParseError::TooLong {
            bits: consumed * 4,
            max: MAX_BITS,
        });
    }

    let value = s.chars().fold(0u128, |acc, c| {
        (acc << 4) | c.to_digit(16).unwrap_or_default() as u128
    });

    Ok((BitTriple::from_u128(value), consumed))
}

/// Reads the first `bit_len` bits of an MSB-first packed byte array into a triple.
pub fn byte_array_to_bit_triple(bytes: &[u8], bit_len: usize) -> Result<BitTriple, ParseError> {
    if bit_len > MAX_BITS {
        return Err(ParseError::TooLong {
            bits: bit_len,
            max: MAX_BITS,
        });
    }

    let mut value = 0u128;
    for pos in 0..bit_len {
        let bit = read_bit_at(bytes, pos).map_err(|_| ParseError::OutOfBounds)?;
        value = (value << 1) | bit as u128;
    }

    Ok(BitTriple::from_u128(value))
}

/// Decodes hex text into bytes.
pub fn hex_string_to_bytes(s: &str) -> Result<Vec<u8>, ParseError> {
    hex::decode(s).map_err(|err| match err {
        hex::FromHexError::InvalidHexCharacter { index, .. } => ParseError::InvalidCharacter {
            consumed: index,
            total: s.chars().count(),
        },
        hex::FromHexError::OddLength | hex::FromHexError::InvalidStringLength => {
            ParseError::OddLength
        }
    })
}
