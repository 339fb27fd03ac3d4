//! Interpreting raw Wiegand bits against every catalog format of matching length.

use crate::{
    bits::BitTriple,
    card::{DecodedCard, ParityStatus},
    catalog::Catalog,
    format::WiegandFormat,
};

/// All readings of one message, or `Unknown` when no format accepts it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded<'a> {
    Cards(Vec<DecodedCard<'a>>),
    Unknown,
}

impl<'a> Decoded<'a> {
    pub fn cards(&self) -> &[DecodedCard<'a>] {
        match self {
            Decoded::Cards(cards) => cards,
            Decoded::Unknown => &[],
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Decoded::Unknown)
    }
}

/// Decodes messages against the formats of a [Catalog].
#[derive(Debug, Clone, Copy)]
pub struct Decoder<'a> {
    catalog: &'a Catalog,
}

impl<'a> Decoder<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Decoder { catalog }
    }

    /// Lazily yields a reading for every `bit_len`-bit format whose fixed bits
    /// match, in catalog order. Parity failures are reported, not filtered.
    pub fn decode(&self, bits: &BitTriple, bit_len: usize) -> Decodings<'a> {
        Decodings {
            bits: *bits,
            bit_len,
            formats: self.catalog.iter(),
        }
    }

    /// Collects [Decoder::decode] into a [Decoded].
    pub fn classify(&self, bits: &BitTriple, bit_len: usize) -> Decoded<'a> {
        let cards: Vec<_> = self.decode(bits, bit_len).collect();
        if cards.is_empty() {
            log::debug!("no {bit_len}-bit format matches {:?}", bits);
            Decoded::Unknown
        } else {
            Decoded::Cards(cards)
        }
    }
}

/// Lazy sequence of [DecodedCard]s produced by [Decoder::decode].
#[derive(Debug, Clone)]
pub struct Decodings<'a> {
    bits: BitTriple,
    bit_len: usize,
    formats: std::slice::Iter<'a, WiegandFormat>,
}

impl<'a> Iterator for Decodings<'a> {
    type Item = DecodedCard<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        for format in self.formats.by_ref() {
            if format.bit_len() != self.bit_len {
                continue;
            }

            match format.unpack(&self.bits) {
                Some(card) => {
                    log::trace!("{} accepted, parity {:?}", format.name(), card.parity);
                    if card.parity == ParityStatus::Invalid {
                        log::debug!("{} parity mismatch", format.name());
                    }
                    return Some(card);
                }
                None => log::trace!("{} rejected: fixed bits mismatch", format.name()),
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        bits::hex_string_to_bit_triple,
        card::CardFields,
        encoder::Encoder,
        field::CardField,
    };

    use super::*;

    #[test]
    fn test_decode_h10301() {
        let catalog = Catalog::builtin().unwrap();
        let decoder = Decoder::new(&catalog);
        let cards: Vec<_> = decoder
            .decode(&BitTriple::new(0, 0, 0x02F6_23AE), 26)
            .collect();

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].format_name(), "H10301");
        assert_eq!(cards[0].fields, CardFields::new(123, 4567));
        assert_eq!(cards[0].parity, ParityStatus::Valid);
        assert_eq!(cards[1].format_name(), "ind26");
    }

    #[test]
    fn test_decode_40_bit_hex() {
        let catalog = Catalog::builtin().unwrap();
        let (bits, bit_len) = hex_string_to_bit_triple("2006F623AE").unwrap();
        assert_eq!(bit_len, 40);

        let cards: Vec<_> = Decoder::new(&catalog).decode(&bits, bit_len).collect();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].format_name(), "Casi40");
        assert_eq!(
            cards[0].fields.card_number,
            bits.read_bits_at(40, 1, 38).unwrap()
        );
        assert_eq!(cards[0].parity, ParityStatus::Absent);
    }

    #[test]
    fn test_classify_unknown() {
        let catalog = Catalog::builtin().unwrap();
        let decoder = Decoder::new(&catalog);
        assert!(decoder.classify(&BitTriple::new(0, 0, 0x7F), 7).is_unknown());
        assert!(decoder.classify(&BitTriple::default(), 0).cards().is_empty());
    }

    #[test]
    fn test_fixed_bit_mismatch_skips_format() {
        let catalog = Catalog::builtin().unwrap();
        let decoder = Decoder::new(&catalog);

        let kastle = Encoder::new(&catalog)
            .encode_named(&CardFields::new(7, 99).with_issue_level(1), "Kastle")
            .unwrap();
        let names: Vec<_> = decoder
            .decode(&kastle.bits, 32)
            .map(|c| c.format_name().to_string())
            .collect();
        assert!(names.contains(&"Kastle".to_string()));

        let mut cleared = kastle.bits;
        cleared.write_bits_at(32, 1, 1, 0).unwrap();
        assert!(decoder.decode(&cleared, 32).all(|c| c.format_name() != "Kastle"));
    }

    #[test]
    fn test_decodings_restartable() {
        let catalog = Catalog::builtin().unwrap();
        let decodings = Decoder::new(&catalog).decode(&BitTriple::new(0, 0, 0x02F6_23AE), 26);

        let first: Vec<_> = decodings.clone().map(|c| c.format_name().to_string()).collect();
        let second: Vec<_> = decodings.map(|c| c.format_name().to_string()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_decode_reports_parity_failure() {
        let catalog = Catalog::builtin().unwrap();
        let card = Decoder::new(&catalog)
            .decode(&BitTriple::new(0, 0, 0x02F6_23AF), 26)
            .next()
            .unwrap();
        assert_eq!(card.parity, ParityStatus::Invalid);
        assert_eq!(card.fields.get(CardField::FacilityCode), 123);
    }
}
