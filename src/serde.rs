//! JSON-deserializable catalog description.
//!
//! These types mirror [crate::format::Layout] and its parts so a deployment can
//! ship its own catalog file. Load one with [crate::catalog::Catalog::from_json].

use serde::{Deserialize, Serialize};

/// Top-level catalog definition: formats in catalog order.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CatalogDef {
    pub formats: Vec<FormatDef>,
}

/// Description of a single named format.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FormatDef {
    /// Unique, case-sensitive catalog key.
    pub name: String,
    pub description: String,
    /// Declared message length in bits.
    pub bit_len: usize,
    pub fields: Vec<FieldDef>,
    /// Check bits, computed in the listed order.
    #[serde(default)]
    pub parity: Vec<ParityDef>,
    #[serde(default)]
    pub fixed: Vec<FixedBitDef>,
}

/// A card field and the fragments holding it, concatenated MSB-first.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FieldDef {
    pub field: CardFieldDef,
    pub fragments: Vec<FragmentDef>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy)]
pub enum CardFieldDef {
    FacilityCode,
    CardNumber,
    IssueLevel,
    OemCode,
}

/// A contiguous run of bits counted from the first transmitted bit.
#[derive(Debug, Deserialize, Serialize, Clone, Copy)]
pub struct FragmentDef {
    pub offset_bits: usize,
    pub len_bits: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ParityDef {
    pub position: usize,
    pub parity: ParityKindDef,
    pub covers: Vec<FragmentDef>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy)]
pub enum ParityKindDef {
    Even,
    Odd,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy)]
pub struct FixedBitDef {
    pub position: usize,
    pub value: bool,
}

#[cfg(test)]
mod tests {
    use crate::{
        card::{CardFields, ParityStatus},
        catalog::Catalog,
        decoder::Decoder,
        encoder::Encoder,
        errors::{CatalogError, CompileError},
    };

    const H10301_JSON: &str = r#"
    {
        "formats": [
            {
                "name": "H10301",
                "description": "HID H10301 26-bit",
                "bit_len": 26,
                "fields": [
                    { "field": "FacilityCode", "fragments": [{ "offset_bits": 1, "len_bits": 8 }] },
                    { "field": "CardNumber", "fragments": [{ "offset_bits": 9, "len_bits": 16 }] }
                ],
                "parity": [
                    { "position": 0, "parity": "Even", "covers": [{ "offset_bits": 1, "len_bits": 12 }] },
                    { "position": 25, "parity": "Odd", "covers": [{ "offset_bits": 13, "len_bits": 12 }] }
                ]
            }
        ]
    }
    "#;

    #[test]
    fn test_catalog_from_json() {
        let catalog = Catalog::from_json(H10301_JSON).unwrap();
        assert_eq!(catalog.len(), 1);

        let message = Encoder::new(&catalog)
            .encode_named(&CardFields::new(123, 4567), "H10301")
            .unwrap();
        assert_eq!(message.to_hex(), "BD88EB80");

        let card = Decoder::new(&catalog).decode(&message.bits, 26).next().unwrap();
        assert_eq!(card.fields, CardFields::new(123, 4567));
        assert_eq!(card.parity, ParityStatus::Valid);
    }

    #[test]
    fn test_json_matches_builtin() {
        let from_json = Catalog::from_json(H10301_JSON).unwrap();
        let builtin = Catalog::builtin().unwrap();
        assert_eq!(from_json.get(0), builtin.get(0));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            Catalog::from_json("{ \"formats\": 3 }").unwrap_err(),
            CatalogError::Definition(_)
        ));
    }

    #[test]
    fn test_invalid_layout() {
        let json = r#"{ "formats": [{ "name": "X", "description": "", "bit_len": 4,
            "fields": [{ "field": "CardNumber", "fragments": [{ "offset_bits": 2, "len_bits": 4 }] }] }] }"#;
        assert_eq!(
            Catalog::from_json(json).unwrap_err(),
            CatalogError::Compile {
                name: "X".to_string(),
                source: CompileError::OutOfRange(5)
            }
        );
    }
}
