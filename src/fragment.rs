/// A contiguous run of message bits, `offset_bits` counted from the first transmitted bit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fragment {
    pub offset_bits: usize,
    pub len_bits: usize,
}

impl Fragment {
    pub fn new(offset_bits: usize, len_bits: usize) -> Self {
        Fragment {
            offset_bits,
            len_bits,
        }
    }

    /// One past the last bit covered.
    pub fn end_bits(&self) -> usize {
        self.offset_bits.saturating_add(self.len_bits)
    }
}

#[cfg(feature = "serde")]
impl From<crate::serde::FragmentDef> for Fragment {
    fn from(value: crate::serde::FragmentDef) -> Self {
        Fragment::new(value.offset_bits, value.len_bits)
    }
}
