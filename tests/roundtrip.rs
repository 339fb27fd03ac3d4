use proptest::prelude::*;
use wiegand::{
    bits::{
        binary_string_to_bytes, byte_array_to_bit_triple, bytes_to_binary_string,
        hex_string_to_bit_triple,
    },
    card::CardFields,
    catalog::Catalog,
    decoder::Decoder,
    encoder::Encoder,
    field::CardField,
    format::WiegandFormat,
    padding::{pad_pacs, strip_pacs_padding},
};

fn masked(format: &WiegandFormat, field: CardField, value: u64) -> u64 {
    match format.field_bits(field) {
        Some(bits) => value & (u64::MAX >> (64 - bits)),
        None => 0,
    }
}

fn fields_for(format: &WiegandFormat, raw: [u64; 4]) -> CardFields {
    CardFields {
        facility_code: masked(format, CardField::FacilityCode, raw[0]) as u32,
        card_number: masked(format, CardField::CardNumber, raw[1]),
        issue_level: masked(format, CardField::IssueLevel, raw[2]) as u32,
        oem_code: masked(format, CardField::OemCode, raw[3]) as u32,
    }
}

proptest! {
    #[test]
    fn bytes_round_trip_through_binary(bytes in proptest::collection::vec(any::<u8>(), 1..=18)) {
        let bin = bytes_to_binary_string(&bytes);
        prop_assert_eq!(bin.len(), bytes.len() * 8);

        let (back, bit_len) = binary_string_to_bytes(&bin).unwrap();
        prop_assert_eq!(bit_len, bytes.len() * 8);
        prop_assert_eq!(back, bytes);
    }

    #[test]
    fn hex_round_trips_through_triple(bytes in proptest::collection::vec(any::<u8>(), 1..=12)) {
        let hex = hex::encode(&bytes);
        let (bits, consumed) = hex_string_to_bit_triple(&hex).unwrap();
        prop_assert_eq!(consumed, hex.len());
        prop_assert_eq!(bits.to_hex(consumed * 4), hex.to_uppercase());
    }

    #[test]
    fn binary_text_matches_byte_array(bin in "[01]{1,96}") {
        let (bytes, bit_len) = binary_string_to_bytes(&bin).unwrap();
        let bits = byte_array_to_bit_triple(&bytes, bit_len).unwrap();
        prop_assert_eq!(bits.to_binary_string(bit_len), bin);
    }

    #[test]
    fn padded_pacs_round_trip(bin in "[01]{1,96}") {
        let (bytes, bit_len) = binary_string_to_bytes(&bin).unwrap();
        let bits = byte_array_to_bit_triple(&bytes, bit_len).unwrap();
        prop_assert_eq!(strip_pacs_padding(&pad_pacs(&bits, bit_len)).unwrap(), bin);
    }

    #[test]
    fn decode_recovers_encoded_fields(raw in any::<[u64; 4]>(), preamble in any::<bool>()) {
        let catalog = Catalog::builtin().unwrap();
        let encoder = Encoder::new(&catalog).with_preamble(preamble);
        let decoder = Decoder::new(&catalog);

        for format in &catalog {
            let fields = fields_for(format, raw);
            let message = encoder.encode_one(&fields, format).unwrap();

            let found = decoder
                .decode(&message.bits, format.bit_len())
                .any(|card| card.format_name() == format.name()
                    && card.fields == fields
                    && card.parity.is_ok());
            prop_assert!(found, "{} lost {:?}", format.name(), fields);
        }
    }
}

#[test]
fn encode_all_omits_narrow_card_numbers() {
    let catalog = Catalog::builtin().unwrap();
    let card = CardFields::new(101, 1337);

    let names: Vec<_> = Encoder::new(&catalog)
        .encode_all(&card)
        .map(|m| m.format.name().to_string())
        .collect();
    assert_eq!(names[0], "H10301");

    for format in &catalog {
        if format.field_bits(CardField::CardNumber).is_some_and(|bits| bits < 11) {
            assert!(!names.iter().any(|name| name == format.name()));
        }
    }
}
