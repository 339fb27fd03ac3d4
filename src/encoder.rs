//! Packing [CardFields] into catalog formats.

use std::fmt;

use crate::{
    bits::BitTriple,
    card::CardFields,
    catalog::Catalog,
    errors::EncodeError,
    format::WiegandFormat,
    padding, preamble,
};

/// Result of packing card fields into one format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedMessage<'a> {
    pub bits: BitTriple,
    /// Declared length of the format; the preamble, if any, sits above it.
    pub bit_len: usize,
    pub format: &'a WiegandFormat,
    pub preamble: bool,
}

impl PackedMessage<'_> {
    /// Hex rendering of the message.
    ///
    /// Without a preamble this is the minimum number of bytes covering the
    /// declared length, MSB-first and zero-padded at the low end. With a
    /// preamble the whole frame is rendered right-aligned.
    pub fn to_hex(&self) -> String {
        if !self.preamble {
            return self.bits.to_hex(self.bit_len);
        }

        let n_bytes = self.bits.significant_bits().div_ceil(8);
        let value = self.bits.as_u128();
        let bytes: Vec<u8> = (0..n_bytes).rev().map(|i| (value >> (i * 8)) as u8).collect();
        hex::encode_upper(bytes)
    }

    /// '0'/'1' rendering of the declared-length message, without any preamble.
    pub fn to_binary_string(&self) -> String {
        self.bits.to_binary_string(self.bit_len)
    }

    /// The padded PACS form: pad count byte followed by the left-aligned message.
    pub fn to_padded_pacs(&self) -> Vec<u8> {
        padding::pad_pacs(&self.bits, self.bit_len)
    }
}

impl fmt::Display for PackedMessage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<10} {:<34} --> {}",
            self.format.name(),
            self.format.description(),
            self.to_hex()
        )
    }
}

/// Packs card fields into the formats of a [Catalog].
#[derive(Debug, Clone, Copy)]
pub struct Encoder<'a> {
    catalog: &'a Catalog,
    preamble: bool,
}

impl<'a> Encoder<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Encoder {
            catalog,
            preamble: false,
        }
    }

    /// Prepends the HID ProxII preamble to every packed message.
    pub fn with_preamble(mut self, preamble: bool) -> Self {
        self.preamble = preamble;
        self
    }

    /// Packs `card` into `format`, failing if any value does not fit.
    pub fn encode_one(
        &self,
        card: &CardFields,
        format: &'a WiegandFormat,
    ) -> Result<PackedMessage<'a>, EncodeError> {
        let mut bits = format.pack(card)?;
        if self.preamble {
            preamble::add_hid_header(&mut bits, format.bit_len())?;
        }

        Ok(PackedMessage {
            bits,
            bit_len: format.bit_len(),
            format,
            preamble: self.preamble,
        })
    }

    /// Looks `name` up in the catalog and packs `card` into it.
    pub fn encode_named(
        &self,
        card: &CardFields,
        name: &str,
    ) -> Result<PackedMessage<'a>, EncodeError> {
        let format = self
            .catalog
            .find(name)
            .map_err(|_| EncodeError::UnknownFormat(name.to_string()))?;
        self.encode_one(card, format)
    }

    /// Packs `card` into every format that can hold it, in catalog order.
    pub fn encode_all(&self, card: &CardFields) -> Encodings<'a> {
        Encodings {
            encoder: *self,
            card: *card,
            formats: self.catalog.iter(),
        }
    }
}

/// Lazy sequence of [PackedMessage]s produced by [Encoder::encode_all].
#[derive(Debug, Clone)]
pub struct Encodings<'a> {
    encoder: Encoder<'a>,
    card: CardFields,
    formats: std::slice::Iter<'a, WiegandFormat>,
}

impl<'a> Iterator for Encodings<'a> {
    type Item = PackedMessage<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        for format in self.formats.by_ref() {
            match self.encoder.encode_one(&self.card, format) {
                Ok(message) => return Some(message),
                Err(err) => log::debug!("skipping {}: {err}", format.name()),
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use crate::field::CardField;

    use super::*;

    #[test]
    fn test_encode_one_h10301() {
        let catalog = Catalog::builtin().unwrap();
        let encoder = Encoder::new(&catalog);
        let message = encoder
            .encode_one(&CardFields::new(123, 4567), catalog.find("H10301").unwrap())
            .unwrap();

        assert_eq!(message.bit_len, 26);
        assert_eq!(message.to_hex(), "BD88EB80");
        assert_eq!(message.to_binary_string(), "10111101100010001110101110");
        assert_eq!(message.to_padded_pacs(), vec![6, 0xBD, 0x88, 0xEB, 0x80]);
    }

    #[test]
    fn test_encode_with_preamble() {
        let catalog = Catalog::builtin().unwrap();
        let encoder = Encoder::new(&catalog).with_preamble(true);
        let message = encoder
            .encode_named(&CardFields::new(123, 4567), "H10301")
            .unwrap();

        assert_eq!(message.bits, BitTriple::new(0, 0x20, 0x06F6_23AE));
        assert_eq!(message.to_hex(), "2006F623AE");
        assert_eq!(message.to_binary_string(), "10111101100010001110101110");
    }

    #[test]
    fn test_encode_named_unknown() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(
            Encoder::new(&catalog)
                .encode_named(&CardFields::new(1, 1), "h10301")
                .unwrap_err(),
            EncodeError::UnknownFormat("h10301".to_string())
        );
    }

    #[test]
    fn test_encode_one_overflow() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(
            Encoder::new(&catalog)
                .encode_named(&CardFields::new(101, 70000), "H10301")
                .unwrap_err(),
            EncodeError::Overflow {
                field: CardField::CardNumber,
                value: 70000,
                max_bits: 16
            }
        );
    }

    #[test]
    fn test_encode_all_skips_narrow_formats() {
        let catalog = Catalog::builtin().unwrap();
        let card = CardFields::new(101, 1337);
        let messages: Vec<_> = Encoder::new(&catalog).encode_all(&card).collect();

        assert_eq!(messages[0].format.name(), "H10301");
        for name in ["ADT31", "HCP32", "H10302", "MDI37", "Casi40"] {
            assert!(messages.iter().all(|m| m.format.name() != name), "{name}");
        }
        for message in &messages {
            let cn_bits = message.format.field_bits(CardField::CardNumber).unwrap();
            assert!(cn_bits >= 11);
        }
    }

    #[test]
    fn test_encode_all_is_restartable() {
        let catalog = Catalog::builtin().unwrap();
        let card = CardFields::new(1, 1).with_issue_level(1);
        let encodings = Encoder::new(&catalog).encode_all(&card);

        let first: Vec<_> = encodings.clone().map(|m| m.format.name()).collect();
        let second: Vec<_> = encodings.map(|m| m.format.name()).collect();
        assert_eq!(first, vec!["Kastle", "SMP34", "S12906"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_display() {
        let catalog = Catalog::builtin().unwrap();
        let message = Encoder::new(&catalog)
            .encode_named(&CardFields::new(123, 4567), "H10301")
            .unwrap();
        assert!(message.to_string().starts_with("H10301"));
        assert!(message.to_string().ends_with("--> BD88EB80"));
    }
}
