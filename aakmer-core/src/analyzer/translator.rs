//! Reduced amino-acid alphabet.
//!
//! Collapses the 20 standard residues (plus the ambiguity codes B, Z, J, X and
//! the rare U, O) onto 11 representatives, so that k-mers differing only by a
//! conservative substitution index to the same token:
//!
//! ```text
//! W      -> W        AST     -> A
//! G      -> G        RK      -> R
//! H      -> H        ILVM    -> L
//! P      -> P        DENQBZ  -> D
//! C      -> C        XUOJ    -> X
//! FY     -> Y        other   -> X
//! ```
//!
//! Only uppercase letters carry meaning. Lowercase letters, digits, whitespace
//! and every byte above 0x7F fall through to the sentinel `X`.

/// Byte every unmapped input translates to.
pub const SENTINEL: u8 = b'X';

/// The output alphabet, sorted.
pub const REPRESENTATIVES: [u8; 11] = *b"ACDGHLPRWXY";

const GROUPS: [(u8, u8); 26] = [
    (b'A', b'A'),
    (b'B', b'D'),
    (b'C', b'C'),
    (b'D', b'D'),
    (b'E', b'D'),
    (b'F', b'Y'),
    (b'G', b'G'),
    (b'H', b'H'),
    (b'I', b'L'),
    (b'J', b'X'),
    (b'K', b'R'),
    (b'L', b'L'),
    (b'M', b'L'),
    (b'N', b'D'),
    (b'O', b'X'),
    (b'P', b'P'),
    (b'Q', b'D'),
    (b'R', b'R'),
    (b'S', b'A'),
    (b'T', b'A'),
    (b'U', b'X'),
    (b'V', b'L'),
    (b'W', b'W'),
    (b'X', b'X'),
    (b'Y', b'Y'),
    (b'Z', b'D'),
];

const fn build_table() -> [u8; 256] {
    let mut table = [SENTINEL; 256];
    let mut i = 0;
    while i < GROUPS.len() {
        let (from, to) = GROUPS[i];
        table[from as usize] = to;
        i += 1;
    }
    table
}

/// Full 256-entry translation table, computed at compile time.
pub const TRANSLATION_TABLE: [u8; 256] = build_table();

/// Residue translator backed by [`TRANSLATION_TABLE`].
///
/// Zero-sized; every method is a table lookup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResidueTranslator;

impl ResidueTranslator {
    /// Creates a translator.
    #[inline(always)]
    pub const fn new() -> Self {
        Self
    }

    /// Translates one byte. Total over `u8`.
    #[must_use]
    #[inline(always)]
    pub const fn translate(self, byte: u8) -> u8 {
        TRANSLATION_TABLE[byte as usize]
    }

    /// Translates `src` into `dst` byte by byte.
    ///
    /// `dst` must be exactly as long as `src`. The source is never written.
    #[inline(always)]
    pub fn translate_into(self, src: &[u8], dst: &mut [u8]) {
        debug_assert_eq!(src.len(), dst.len(), "translator: length mismatch");
        for (d, &s) in dst.iter_mut().zip(src) {
            *d = TRANSLATION_TABLE[s as usize];
        }
    }

    /// Returns the raw lookup table.
    #[inline(always)]
    pub const fn table(self) -> &'static [u8; 256] {
        &TRANSLATION_TABLE
    }

    /// True if `byte` is one of the 11 output symbols.
    #[inline]
    pub fn is_representative(self, byte: u8) -> bool {
        REPRESENTATIVES.binary_search(&byte).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: ResidueTranslator = ResidueTranslator::new();

    #[test]
    fn every_letter_matches_group_table() {
        let expected = b"ADCDDYGHLXRLLDXPDRAAXLWXYD";
        for (i, &want) in expected.iter().enumerate() {
            let letter = b'A' + i as u8;
            assert_eq!(
                T.translate(letter),
                want,
                "{} should map to {}",
                letter as char,
                want as char
            );
        }
    }

    #[test]
    fn spot_checks() {
        assert_eq!(T.translate(b'F'), b'Y');
        assert_eq!(T.translate(b'I'), b'L');
        assert_eq!(T.translate(b'N'), b'D');
        assert_eq!(T.translate(b'W'), b'W');
        assert_eq!(T.translate(b'K'), b'R');
        assert_eq!(T.translate(b'S'), b'A');
    }

    #[test]
    fn everything_outside_uppercase_is_sentinel() {
        let mut outside = 0;
        for b in 0u8..=255 {
            if !b.is_ascii_uppercase() {
                assert_eq!(T.translate(b), SENTINEL, "byte {:#04x}", b);
                outside += 1;
            }
        }
        assert_eq!(outside, 230);
    }

    #[test]
    fn not_case_insensitive() {
        for b in b'a'..=b'z' {
            assert_eq!(T.translate(b), b'X');
        }
    }

    #[test]
    fn output_is_reduced_alphabet() {
        for &out in T.table() {
            assert!(T.is_representative(out), "{} not a representative", out as char);
        }
        assert!(!T.is_representative(b'E'));
    }

    #[test]
    fn idempotent() {
        for b in 0u8..=255 {
            let once = T.translate(b);
            assert_eq!(T.translate(once), once);
        }
    }

    #[test]
    fn translate_into_leaves_source() {
        let src = *b"ABCDEFGHIJ";
        let mut dst = [0u8; 10];
        T.translate_into(&src, &mut dst);
        assert_eq!(&dst, b"ADCDDYGHLX");
        assert_eq!(&src, b"ABCDEFGHIJ");
    }
}
