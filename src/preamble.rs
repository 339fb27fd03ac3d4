//! HID ProxII preamble: header bits plus a leading sentinel 1 placed above a
//! Wiegand message so a reader can recover the message length.

use crate::{bits::BitTriple, errors::EncodeError};

/// Longest message the preamble can frame.
pub const MAX_PREAMBLE_BITS: usize = 84;

/// Header marking an extended-length frame (38 bits and up).
const EXTENDED_HEADER: u32 = 0x09E0_0000;

/// Header bit 37 of a standard frame (up to 36 bits).
const STANDARD_HEADER: u32 = 0x20;

/// Adds the preamble for a `bit_len`-bit message. 37-bit messages carry none.
pub fn add_hid_header(bits: &mut BitTriple, bit_len: usize) -> Result<(), EncodeError> {
    if bit_len == 0 || bit_len > MAX_PREAMBLE_BITS {
        return Err(EncodeError::PreambleUnsupported(bit_len));
    }

    match bit_len {
        48 => bits.mid |= 1 << (bit_len - 32),
        64.. => {
            bits.top |= EXTENDED_HEADER;
            bits.top |= 1 << (bit_len - 64);
        }
        38.. => {
            bits.top |= EXTENDED_HEADER;
            bits.mid |= 1 << (bit_len - 32);
        }
        37 => {}
        32.. => {
            bits.mid |= STANDARD_HEADER;
            bits.mid |= 1 << (bit_len - 32);
        }
        _ => {
            bits.mid |= STANDARD_HEADER;
            bits.bot |= 1 << bit_len;
        }
    }

    Ok(())
}

/// Recovers the message length from the position of the sentinel bit.
/// A non-zero `mid` without header bit 37 is taken as a bare 37-bit message.
/// Returns 0 when no bit is set.
pub fn length_from_header(bits: &BitTriple) -> usize {
    let (mut hfmt, mut len) = if bits.top & 0x001F_FFFF > 0 {
        (bits.top & 0x001F_FFFF, 64)
    } else if bits.mid & 0xFFFF_FFC0 > 0 {
        (bits.mid & 0xFFFF_FFC0, 32)
    } else if bits.mid != 0 && bits.mid & STANDARD_HEADER == 0 {
        return 37;
    } else if bits.mid & 0x1F > 0 {
        (bits.mid & 0x1F, 32)
    } else {
        (bits.bot, 0)
    };

    if hfmt == 0 {
        return 0;
    }

    while hfmt > 1 {
        hfmt >>= 1;
        len += 1;
    }

    len
}

/// True when the triple is a well-formed preamble frame for a `bit_len`-bit message.
/// A 37-bit frame has no header, so nothing may be set above the message.
pub fn has_hid_header(bits: &BitTriple, bit_len: usize) -> bool {
    match bit_len {
        0 => false,
        1..=36 => bits.mid & STANDARD_HEADER != 0 && bits.top == 0,
        37 => bits.top == 0 && bits.mid != 0 && bits.mid >> 5 == 0,
        48 => bits.top == 0 && bits.mid >> 17 == 0,
        _ => bits.top & EXTENDED_HEADER == EXTENDED_HEADER,
    }
}
