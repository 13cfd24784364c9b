//! K-mer windowing.
//!
//! Cuts a residue sequence into overlapping fixed-width windows, stride 1, and
//! translates each window into the reduced alphabet before handing it on.
//!
//! ## Window rules
//!
//! For a document of length `L` and width `K`:
//!
//! ```text
//! L == 0      -> no tokens
//! 0 < L < K   -> one token, the whole document (length L)
//! L >= K      -> L-K+1 tokens at offsets 0..=L-K, each of length K
//! ```
//!
//! The final full window already ends at the document end, so no shorter
//! trailing token is ever produced when `L >= K`.
//!
//! ## Usage
//!
//! ```rust
//! use aakmer_core::analyzer::kmer::KmerWindower;
//!
//! let windower = KmerWindower::default();
//! let mut tokens = Vec::new();
//! windower.for_each(b"ABCDEFGHIJKLMNO", |token, _offset| {
//!     tokens.push(token.to_vec());
//! });
//!
//! assert_eq!(tokens.len(), 6);
//! assert_eq!(tokens[0], b"ADCDDYGHLX");
//! ```
//!
//! Tokens are translated into a scratch buffer owned by the call. The source
//! document is only ever read.

use core::convert::Infallible;
use core::num::NonZeroUsize;

use aakmer_types::{BooleanInfo, ConfigError, ParseError, Token, TOKEN_INLINE_CAP};
use smallvec::SmallVec;
use tracing::trace;

use super::translator::ResidueTranslator;
use crate::sink::TokenSink;

/// Window width used by the reduced-alphabet index.
pub const DEFAULT_K: usize = 10;

const DEFAULT_WIDTH: NonZeroUsize = match NonZeroUsize::new(DEFAULT_K) {
    Some(k) => k,
    None => panic!("DEFAULT_K must be non-zero"),
};

type Scratch = SmallVec<[u8; TOKEN_INLINE_CAP]>;

/// Sliding-window k-mer extractor.
///
/// Stateless and `Copy`; one instance can serve any number of documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KmerWindower {
    k: NonZeroUsize,
    translator: ResidueTranslator,
}

impl Default for KmerWindower {
    fn default() -> Self {
        Self {
            k: DEFAULT_WIDTH,
            translator: ResidueTranslator::new(),
        }
    }
}

impl KmerWindower {
    /// Creates a windower of width `k`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ZeroWindow` if `k` is zero.
    pub fn new(k: usize) -> Result<Self, ConfigError> {
        let k = NonZeroUsize::new(k).ok_or(ConfigError::ZeroWindow)?;
        Ok(Self {
            k,
            translator: ResidueTranslator::new(),
        })
    }

    /// Window width.
    #[inline(always)]
    pub const fn k(&self) -> usize {
        self.k.get()
    }

    /// Number of tokens a document of `len` bytes produces.
    #[inline(always)]
    pub const fn count(&self, len: usize) -> usize {
        let k = self.k.get();
        if len == 0 {
            0
        } else if len < k {
            1
        } else {
            len - k + 1
        }
    }

    /// Length of every token cut from a document of `len` bytes.
    #[inline(always)]
    pub const fn token_len(&self, len: usize) -> usize {
        let k = self.k.get();
        if len < k {
            len
        } else {
            k
        }
    }

    /// Streams `(token, offset)` for every window, left to right.
    ///
    /// The token slice points into a per-call scratch buffer and is
    /// overwritten by the next window.
    pub fn for_each<F>(&self, doc: &[u8], mut emit: F)
    where
        F: FnMut(&[u8], usize),
    {
        let mut scratch = Scratch::from_elem(0, self.token_len(doc.len()));
        let result: Result<usize, Infallible> = self.scan(doc, &mut scratch, |token, offset| {
            emit(token, offset);
            Ok(())
        });
        if let Err(never) = result {
            match never {}
        }
    }

    /// Streams every window into `sink` with plain-word metadata.
    ///
    /// Returns the number of tokens the sink accepted.
    ///
    /// # Errors
    ///
    /// `ParseError::Alloc` if the scratch buffer cannot be allocated, or
    /// whatever the sink returns. Emission stops at the first error; tokens
    /// already accepted stand.
    pub fn window_into<S>(&self, doc: &[u8], sink: &mut S) -> Result<usize, ParseError>
    where
        S: TokenSink + ?Sized,
    {
        let width = self.token_len(doc.len());
        let mut scratch = Scratch::new();
        scratch
            .try_reserve_exact(width)
            .map_err(|_| ParseError::Alloc { bytes: width })?;
        scratch.resize(width, 0);

        self.scan(doc, &mut scratch, |token, _| {
            sink.add_word(token, &BooleanInfo::WORD)
        })
    }

    /// Materializes every translated window as an owned [`Token`].
    ///
    /// # Errors
    ///
    /// `ParseError::Alloc` if the token list cannot be allocated.
    pub fn window_and_translate(&self, doc: &[u8]) -> Result<Vec<Token>, ParseError> {
        let n = self.count(doc.len());
        let mut tokens: Vec<Token> = Vec::new();
        tokens
            .try_reserve_exact(n)
            .map_err(|_| ParseError::Alloc {
                bytes: n.saturating_mul(core::mem::size_of::<Token>()),
            })?;
        self.window_into(doc, &mut tokens)?;
        Ok(tokens)
    }

    /// Core loop. `scratch` must be exactly `token_len(doc.len())` bytes.
    #[inline(always)]
    fn scan<E, F>(&self, doc: &[u8], scratch: &mut [u8], mut emit: F) -> Result<usize, E>
    where
        F: FnMut(&[u8], usize) -> Result<(), E>,
    {
        let k = self.k.get();
        debug_assert_eq!(scratch.len(), self.token_len(doc.len()));

        if doc.is_empty() {
            return Ok(0);
        }

        if doc.len() < k {
            self.translator.translate_into(doc, scratch);
            trace!(offset = 0, token = %scratch.escape_ascii(), "short document");
            emit(&*scratch, 0)?;
            return Ok(1);
        }

        let mut emitted = 0usize;
        for (offset, window) in doc.windows(k).enumerate() {
            self.translator.translate_into(window, scratch);
            trace!(offset, token = %scratch.escape_ascii(), "window");
            emit(&*scratch, offset)?;
            emitted += 1;
        }
        Ok(emitted)
    }
}

/// Extracts translated k-mers of width [`DEFAULT_K`] into owned tokens.
///
/// # Errors
///
/// `ParseError::Alloc` if the token list cannot be allocated.
#[inline]
pub fn window_and_translate(doc: &[u8]) -> Result<Vec<Token>, ParseError> {
    KmerWindower::default().window_and_translate(doc)
}
