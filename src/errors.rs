//! Error types for bit access, text parsing, padding, catalog compilation and encoding.

use std::collections::TryReserveError;

use crate::field::CardField;

/// Errors produced when reading or writing bits of a [crate::bits::BitTriple].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReadError {
    /// Requested bit range is beyond the end of the message.
    #[error("bit range is outside the message")]
    OutOfBounds,
    /// More than 64 bits were requested in a single read.
    #[error("at most 64 bits can be read at once")]
    TooManyBitsRead,
}

/// Errors produced when turning hex or binary text (or packed bytes) into bits.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Only the first `consumed` of `total` characters belong to the expected alphabet.
    #[error("{consumed} of {total} characters are valid")]
    InvalidCharacter { consumed: usize, total: usize },
    /// Input holds more bits than the target representation.
    #[error("{bits} bits exceed the {max}-bit limit")]
    TooLong { bits: usize, max: usize },
    /// Declared bit length is larger than the supplied buffer.
    #[error("bit length is larger than the buffer")]
    OutOfBounds,
    /// Hex text must hold whole bytes.
    #[error("hex string has an odd number of digits")]
    OddLength,
}

/// Errors produced when stripping a padded PACS buffer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaddingError {
    /// The buffer holds no pad byte.
    #[error("padded PACS buffer is empty")]
    Empty,
    /// The buffer is longer than the extra-long PACS format.
    #[error("padded PACS buffer of {len} bytes exceeds {max} bytes")]
    TooLong { len: usize, max: usize },
    /// Pad count does not leave any payload bit.
    #[error("pad count {pad} is not below the {available} available bits")]
    InvalidPadCount { pad: u8, available: usize },
    /// Scratch buffer for the bit expansion could not be allocated.
    #[error("failed to allocate scratch buffer")]
    Alloc(#[from] TryReserveError),
}

/// Errors produced when compiling a [crate::format::Layout] into a [crate::format::WiegandFormat].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// Format name is empty.
    #[error("format name is empty")]
    InvalidFormatName,
    /// Declared length is 0 or larger than 96 bits.
    #[error("format length {0} is outside 1..=96")]
    InvalidLength(usize),
    /// Fragment has zero length.
    #[error("fragment has zero length")]
    InvalidFragment,
    /// A fragment or bit position lies beyond the declared length.
    #[error("bit {0} is outside the format")]
    OutOfRange(usize),
    /// Field width is 0 or wider than the card field can hold.
    #[error("{0} has an invalid width")]
    InvalidFieldSize(CardField),
    /// The same card field is defined twice.
    #[error("{0} is defined twice")]
    DuplicateField(CardField),
    /// Two fields, parity bits or fixed bits claim the same position.
    #[error("bit {0} is claimed twice")]
    OverlappingBits(usize),
}

/// Errors produced when building or querying a [crate::catalog::Catalog].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// A layout failed to compile.
    #[error("format {name}: {source}")]
    Compile { name: String, source: CompileError },
    /// Two layouts share a name.
    #[error("format {0} is defined twice")]
    DuplicateFormat(String),
    /// No format with this name exists.
    #[error("unknown format: {0}")]
    UnknownFormat(String),
    /// Catalog definition could not be deserialized.
    #[cfg(feature = "serde")]
    #[error("invalid catalog definition: {0}")]
    Definition(String),
}

/// Errors produced when packing [crate::card::CardFields] into a specific format.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// Value does not fit the bit width the format allocates to the field.
    #[error("{field} {value} does not fit in {max_bits} bits")]
    Overflow {
        field: CardField,
        value: u64,
        max_bits: usize,
    },
    /// Value is non-zero but the format has no such field.
    #[error("format has no {0}")]
    UnsupportedField(CardField),
    /// The HID preamble is not defined for this length.
    #[error("no preamble for {0}-bit messages")]
    PreambleUnsupported(usize),
    /// No format with this name exists.
    #[error("unknown format: {0}")]
    UnknownFormat(String),
    /// A layout position could not be written.
    #[error("layout does not fit the message: {0}")]
    Layout(#[from] ReadError),
}

/// Errors produced by the list/encode/decode operations in [crate::command].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Padding(#[from] PaddingError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("the card data could not be encoded in the selected format: {0}")]
    Encode(#[from] EncodeError),
    /// Decode was called without hex, binary or padded input.
    #[error("empty input")]
    EmptyInput,
    /// More than one decode input was supplied.
    #[error("exactly one of hex, binary or padded input is allowed")]
    AmbiguousInput,
}
