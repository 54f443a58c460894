//! A1-style cell references.

/// A 1-based cell position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CellRef {
    pub row: u32,
    pub col: u32,
}

/// Largest column Excel allows (`XFD`).
const MAX_COLUMN: u32 = 16_384;

/// Largest row Excel allows.
const MAX_ROW: u32 = 1_048_576;

impl CellRef {
    /// Parse a reference such as `B7` or `$AA$10`.
    pub fn parse(reference: &str) -> Option<Self> {
        let reference = reference.trim();
        let letters_end = reference
            .char_indices()
            .find(|&(_, c)| !(c.is_ascii_alphabetic() || c == '$'))
            .map(|(i, _)| i)?;

        let col = column_index(&reference[..letters_end])?;
        let row = reference[letters_end..]
            .trim_start_matches('$')
            .parse::<u32>()
            .ok()
            .filter(|r| (1..=MAX_ROW).contains(r))?;

        Some(Self { row, col })
    }
}

/// Convert column letters (`A`, `Z`, `AA`) to a 1-based index.
pub fn column_index(letters: &str) -> Option<u32> {
    let letters = letters.trim_matches('$');
    if letters.is_empty() || letters.len() > 3 {
        return None;
    }

    let mut index: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        index = index * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
    }

    (index <= MAX_COLUMN).then_some(index)
}
