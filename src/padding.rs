//! The padded "new PACS" representation: a pad-count byte followed by payload
//! bytes whose last `pad` bits are filler.

use crate::{bits::BitTriple, errors::PaddingError};

/// Longest accepted padded buffer, pad byte included.
pub const MAX_PADDED_LEN: usize = 18;

/// Strips the padding of `buffer` and returns the remaining payload bits as '0'/'1' text.
///
/// `buffer[0]` is the pad count; it must be smaller than the `8 * (len - 1)` payload bits.
pub fn strip_pacs_padding(buffer: &[u8]) -> Result<String, PaddingError> {
    let (&pad, payload) = buffer.split_first().ok_or(PaddingError::Empty)?;

    if buffer.len() > MAX_PADDED_LEN {
        return Err(PaddingError::TooLong {
            len: buffer.len(),
            max: MAX_PADDED_LEN,
        });
    }

    let available = payload.len() * 8;
    if pad as usize >= available {
        return Err(PaddingError::InvalidPadCount { pad, available });
    }

    let mut bin = String::new();
    bin.try_reserve_exact(available)?;
    for byte in payload {
        for i in (0..8).rev() {
            bin.push(if (byte >> i) & 1 == 1 { '1' } else { '0' });
        }
    }
    bin.truncate(available - pad as usize);

    log::debug!("stripped {pad} pad bits, {} payload bits remain", bin.len());
    Ok(bin)
}

/// Builds the padded form of a `bit_len`-bit message: pad count, then the
/// message MSB-first with the filler bits at the end.
pub fn pad_pacs(bits: &BitTriple, bit_len: usize) -> Vec<u8> {
    let payload = bits.to_bytes(bit_len);
    let pad = (payload.len() * 8 - bit_len.min(payload.len() * 8)) as u8;

    let mut out = Vec::with_capacity(payload.len() + 1);
    out.push(pad);
    out.extend(payload);

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_padding_36_bits() {
        let bin = strip_pacs_padding(&[4, 0x06, 0xBD, 0x88, 0xEB, 0x80]).unwrap();
        assert_eq!(bin.len(), 36);
        assert_eq!(bin, "000001101011110110001000111010111000");
    }

    #[test]
    fn test_strip_padding_26_bits() {
        let bin = strip_pacs_padding(&[6, 0xBD, 0x88, 0xEB, 0x80]).unwrap();
        assert_eq!(bin, "10111101100010001110101110");
    }

    #[test]
    fn test_strip_padding_zero_pad() {
        let bin = strip_pacs_padding(&[0, 0xA5]).unwrap();
        assert_eq!(bin, "10100101");
    }

    #[test]
    fn test_invalid_pad_count() {
        assert_eq!(
            strip_pacs_padding(&[8, 0xFF]).unwrap_err(),
            PaddingError::InvalidPadCount {
                pad: 8,
                available: 8
            }
        );
        assert_eq!(
            strip_pacs_padding(&[0]).unwrap_err(),
            PaddingError::InvalidPadCount {
                pad: 0,
                available: 0
            }
        );
    }

    #[test]
    fn test_empty_and_too_long() {
        assert_eq!(strip_pacs_padding(&[]).unwrap_err(), PaddingError::Empty);
        assert_eq!(
            strip_pacs_padding(&[0; 19]).unwrap_err(),
            PaddingError::TooLong { len: 19, max: 18 }
        );
        assert_eq!(strip_pacs_padding(&[0; 18]).unwrap().len(), 136);
    }

    #[test]
    fn test_pad_pacs() {
        let bits = BitTriple::new(0, 0, 0x02F6_23AE);
        assert_eq!(pad_pacs(&bits, 26), vec![6, 0xBD, 0x88, 0xEB, 0x80]);
        assert_eq!(pad_pacs(&bits, 32), vec![0, 0x02, 0xF6, 0x23, 0xAE]);
    }
}
