//! Ordered, immutable collection of [WiegandFormat]s.
//!
//! Catalog order is fixed when the catalog is built and is the order in which
//! the encoder and decoder try formats.

use std::fmt;

use crate::{
    builtin,
    errors::CatalogError,
    format::{Layout, WiegandFormat},
};

/// Compiled formats in definition order, with unique names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    formats: Vec<WiegandFormat>,
}

impl Catalog {
    /// Compiles `layouts` in order. Fails on the first invalid layout or repeated name.
    pub fn new(layouts: &[Layout]) -> Result<Self, CatalogError> {
        let mut formats: Vec<WiegandFormat> = Vec::with_capacity(layouts.len());

        for layout in layouts {
            if formats.iter().any(|f| f.name() == layout.name) {
                return Err(CatalogError::DuplicateFormat(layout.name.clone()));
            }

            let format = WiegandFormat::compile(layout).map_err(|source| CatalogError::Compile {
                name: layout.name.clone(),
                source,
            })?;
            formats.push(format);
        }

        Ok(Catalog { formats })
    }

    /// The formats shipped with the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Catalog::new(&builtin::layouts())
    }

    /// Parses a JSON catalog definition (see [crate::serde::CatalogDef]).
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let def: crate::serde::CatalogDef =
            serde_json::from_str(json).map_err(|e| CatalogError::Definition(e.to_string()))?;
        Catalog::try_from(def)
    }

    /// Looks a format up by exact, case-sensitive name.
    pub fn find(&self, name: &str) -> Result<&WiegandFormat, CatalogError> {
        self.formats
            .iter()
            .find(|f| f.name() == name)
            .ok_or_else(|| CatalogError::UnknownFormat(name.to_string()))
    }

    /// Index of the named format in catalog order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.formats.iter().position(|f| f.name() == name)
    }

    pub fn get(&self, index: usize) -> Option<&WiegandFormat> {
        self.formats.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WiegandFormat> {
        self.formats.iter()
    }

    /// Formats declared at exactly `bit_len` bits, in catalog order.
    pub fn with_bit_len(&self, bit_len: usize) -> impl Iterator<Item = &WiegandFormat> + Clone {
        self.formats.iter().filter(move |f| f.bit_len() == bit_len)
    }

    /// Name, length and description of every format, in catalog order.
    pub fn list(&self) -> impl Iterator<Item = FormatSummary<'_>> + Clone {
        self.formats.iter().map(FormatSummary::from)
    }

    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a WiegandFormat;
    type IntoIter = std::slice::Iter<'a, WiegandFormat>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(feature = "serde")]
impl TryFrom<crate::serde::CatalogDef> for Catalog {
    type Error = CatalogError;

    fn try_from(value: crate::serde::CatalogDef) -> Result<Self, Self::Error> {
        let layouts: Vec<Layout> = value.formats.into_iter().map(Into::into).collect();
        Catalog::new(&layouts)
    }
}

/// One row of the format listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSummary<'a> {
    pub name: &'a str,
    pub bit_len: usize,
    pub description: &'a str,
}

impl<'a> From<&'a WiegandFormat> for FormatSummary<'a> {
    fn from(format: &'a WiegandFormat) -> Self {
        FormatSummary {
            name: format.name(),
            bit_len: format.bit_len(),
            description: format.description(),
        }
    }
}

impl fmt::Display for FormatSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<10} {:>3}-bit  {}", self.name, self.bit_len, self.description)
    }
}
