//! # wiegand
//!
//! Encoding and decoding of Wiegand access-control credentials.
//!
//! Card identity values (facility code, card number, issue level, OEM code)
//! are packed into, or recovered from, raw bit streams using a catalog of
//! named bit layouts. Hex, binary and padded PACS text all convert losslessly
//! to and from the 96-bit [bits::BitTriple].
//!
//! ## Example
//!
//! ```
//! use wiegand::card::CardFields;
//! use wiegand::catalog::Catalog;
//! use wiegand::decoder::Decoder;
//! use wiegand::encoder::Encoder;
//!
//! let catalog = Catalog::builtin().unwrap();
//! let message = Encoder::new(&catalog)
//!     .encode_named(&CardFields::new(123, 4567), "H10301")
//!     .unwrap();
//! assert_eq!(message.to_hex(), "BD88EB80");
//!
//! let card = Decoder::new(&catalog).decode(&message.bits, 26).next().unwrap();
//! assert_eq!(card.format_name(), "H10301");
//! assert_eq!(card.fields.card_number, 4567);
//! ```

pub mod bits;
mod builtin;
pub mod card;
pub mod catalog;
pub mod command;
pub mod compiled;
pub mod decoder;
pub mod encoder;
pub mod errors;
pub mod field;
pub mod format;
pub mod fragment;
pub mod padding;
pub mod preamble;
#[cfg(feature = "serde")]
pub mod serde;
