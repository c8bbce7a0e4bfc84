//! Error-correction level selection.

/// Error-correction strength, from roughly 7% of codewords recoverable
/// (`Low`) up to roughly 30% (`High`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeEcc {
    Low,
    Medium,
    Quartile,
    High,
}

impl CodeEcc {
    /// Dense 0..4 index matching table column order (L, M, Q, H).
    pub(crate) fn ordinal(self) -> usize {
        match self {
            CodeEcc::Low => 0,
            CodeEcc::Medium => 1,
            CodeEcc::Quartile => 2,
            CodeEcc::High => 3,
        }
    }

    /// Parses the single-letter CLI form (`L`, `M`, `Q`, `H`), case
    /// insensitive.
    pub fn from_letter(letter: char) -> Option<CodeEcc> {
        match letter.to_ascii_uppercase() {
            'L' => Some(CodeEcc::Low),
            'M' => Some(CodeEcc::Medium),
            'Q' => Some(CodeEcc::Quartile),
            'H' => Some(CodeEcc::High),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_letter_is_case_insensitive() {
        assert_eq!(CodeEcc::from_letter('l'), Some(CodeEcc::Low));
        assert_eq!(CodeEcc::from_letter('H'), Some(CodeEcc::High));
        assert_eq!(CodeEcc::from_letter('x'), None);
    }

    #[test]
    fn ordinals_are_dense() {
        let all = [CodeEcc::Low, CodeEcc::Medium, CodeEcc::Quartile, CodeEcc::High];
        for (i, ec) in all.iter().enumerate() {
            assert_eq!(ec.ordinal(), i);
        }
    }
}
