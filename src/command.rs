//! The list, encode and decode operations, returning printable reports.

use std::fmt;

use crate::{
    bits::{self, BitTriple, MAX_BITS},
    card::CardFields,
    catalog::{Catalog, FormatSummary},
    decoder::{Decoded, Decoder},
    encoder::{Encoder, PackedMessage},
    errors::{Error, ParseError},
    padding, preamble,
};

/// Every format in the catalog, in catalog order.
pub fn list(catalog: &Catalog) -> impl Iterator<Item = FormatSummary<'_>> + Clone {
    catalog.list()
}

/// Card fields to encode, optionally restricted to one named format.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodeRequest {
    pub fields: CardFields,
    pub format: Option<String>,
    pub preamble: bool,
}

/// Encodes into the named format, or into every format that accepts the fields.
///
/// A named format either yields exactly one message or fails; without a name
/// the result may be empty.
pub fn encode<'a>(
    catalog: &'a Catalog,
    request: &EncodeRequest,
) -> Result<Vec<PackedMessage<'a>>, Error> {
    let encoder = Encoder::new(catalog).with_preamble(request.preamble);

    match &request.format {
        Some(name) => Ok(vec![encoder.encode_named(&request.fields, name)?]),
        None => Ok(encoder.encode_all(&request.fields).collect()),
    }
}

/// Raw message to decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeInput {
    /// Hex text; the bit length is four times the digit count.
    Hex(String),
    /// '0'/'1' text; the bit length is the character count.
    Binary(String),
    /// Hex text of a padded PACS buffer (pad count byte first).
    PaddedPacsHex(String),
}

impl DecodeInput {
    /// Picks the single supplied input. Empty strings count as absent.
    pub fn from_options(
        hex: Option<String>,
        binary: Option<String>,
        padded: Option<String>,
    ) -> Result<Self, Error> {
        let mut inputs = [
            hex.map(DecodeInput::Hex),
            binary.map(DecodeInput::Binary),
            padded.map(DecodeInput::PaddedPacsHex),
        ]
        .into_iter()
        .flatten()
        .filter(|input| !input.text().is_empty());

        match (inputs.next(), inputs.next()) {
            (None, _) => Err(Error::EmptyInput),
            (Some(input), None) => Ok(input),
            (Some(_), Some(_)) => Err(Error::AmbiguousInput),
        }
    }

    fn text(&self) -> &str {
        match self {
            DecodeInput::Hex(s) | DecodeInput::Binary(s) | DecodeInput::PaddedPacsHex(s) => s,
        }
    }
}

/// Result of the decode operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeReport<'a> {
    /// Uppercase hex of the decoded message.
    pub raw_hex: String,
    pub bit_len: usize,
    pub outcome: Decoded<'a>,
    /// Decode at the length encoded by an HID preamble, when one was found.
    pub header: Option<(usize, Decoded<'a>)>,
}

/// Decodes one raw message against every catalog format of its length.
pub fn decode<'a>(catalog: &'a Catalog, input: &DecodeInput) -> Result<DecodeReport<'a>, Error> {
    if input.text().is_empty() {
        return Err(Error::EmptyInput);
    }

    let decoder = Decoder::new(catalog);

    match input {
        DecodeInput::Hex(s) => decode_hex(decoder, s),
        DecodeInput::Binary(s) => decode_binary(decoder, s),
        DecodeInput::PaddedPacsHex(s) => {
            let bytes = bits::hex_string_to_bytes(s)?;
            let bin = padding::strip_pacs_padding(&bytes)?;
            decode_binary(decoder, &bin)
        }
    }
}

fn decode_hex<'a>(decoder: Decoder<'a>, s: &str) -> Result<DecodeReport<'a>, Error> {
    let consumed = bits::hex_prefix_len(s);
    let total = s.chars().count();
    if consumed != total {
        return Err(ParseError::InvalidCharacter { consumed, total }.into());
    }

    let bit_len = total * 4;
    if bit_len > MAX_BITS {
        return Ok(unrecognized(s.to_uppercase(), bit_len));
    }

    let (bits, _) = bits::hex_string_to_bit_triple(s)?;
    let mut report = report(decoder, &bits, bit_len);
    report.raw_hex = s.to_uppercase();

    let header_len = preamble::length_from_header(&bits);
    if header_len != 0 && header_len < bit_len && preamble::has_hid_header(&bits, header_len) {
        log::debug!("HID preamble found, {header_len}-bit message");
        report.header = Some((header_len, decoder.classify(&bits, header_len)));
    }

    Ok(report)
}

fn decode_binary<'a>(decoder: Decoder<'a>, s: &str) -> Result<DecodeReport<'a>, Error> {
    let (bytes, bit_len) = bits::binary_string_to_bytes(s)?;
    if bit_len > MAX_BITS {
        return Ok(unrecognized(hex::encode_upper(&bytes), bit_len));
    }

    let bits = bits::byte_array_to_bit_triple(&bytes, bit_len)?;
    Ok(report(decoder, &bits, bit_len))
}

fn report<'a>(decoder: Decoder<'a>, bits: &BitTriple, bit_len: usize) -> DecodeReport<'a> {
    DecodeReport {
        raw_hex: bits.to_hex(bit_len),
        bit_len,
        outcome: decoder.classify(bits, bit_len),
        header: None,
    }
}

fn unrecognized<'a>(raw_hex: String, bit_len: usize) -> DecodeReport<'a> {
    log::debug!("{bit_len}-bit payload is too long for the format catalog");
    DecodeReport {
        raw_hex,
        bit_len,
        outcome: Decoded::Unknown,
        header: None,
    }
}

fn write_outcome(f: &mut fmt::Formatter<'_>, outcome: &Decoded<'_>) -> fmt::Result {
    match outcome {
        Decoded::Cards(cards) => {
            for card in cards {
                writeln!(f, "  {card}")?;
            }
            Ok(())
        }
        Decoded::Unknown => writeln!(f, "  unknown format"),
    }
}

impl fmt::Display for DecodeReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Raw: {} ({} bits)", self.raw_hex, self.bit_len)?;
        write_outcome(f, &self.outcome)?;

        if let Some((bit_len, outcome)) = &self.header {
            writeln!(f, "HID preamble: {bit_len}-bit message")?;
            write_outcome(f, outcome)?;
        }

        Ok(())
    }
}
