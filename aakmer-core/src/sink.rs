//! Token sinks.
//!
//! A sink is whatever the host hands the parser to receive tokens: the
//! full-text index when storing a document, the search-term list when parsing
//! a query, or a plain `Vec` in tests. The parser never registers a sink
//! globally; one is passed explicitly into every parse call.

use aakmer_types::{BooleanInfo, ParseError, SinkError, Token};

/// Receiver of translated tokens.
pub trait TokenSink {
    /// Accepts one token.
    ///
    /// `word` is only valid for the duration of the call; copy it to keep it.
    /// Returning an error stops the parse. Tokens already accepted stand.
    fn add_word(&mut self, word: &[u8], info: &BooleanInfo) -> Result<(), ParseError>;
}

impl<S: TokenSink + ?Sized> TokenSink for &mut S {
    #[inline(always)]
    fn add_word(&mut self, word: &[u8], info: &BooleanInfo) -> Result<(), ParseError> {
        (**self).add_word(word, info)
    }
}

/// Collects owned tokens. Both list growth and wide-token copies are fallible.
impl TokenSink for Vec<Token> {
    #[inline]
    fn add_word(&mut self, word: &[u8], _info: &BooleanInfo) -> Result<(), ParseError> {
        self.try_reserve(1).map_err(|_| ParseError::Alloc {
            bytes: core::mem::size_of::<Token>(),
        })?;
        self.push(Token::try_from_slice(word)?);
        Ok(())
    }
}

/// Adapts a closure into a [`TokenSink`].
///
/// ```
/// use aakmer_core::sink::{FnSink, TokenSink};
/// use aakmer_types::{BooleanInfo, SinkError};
///
/// let mut seen = 0usize;
/// let mut sink = FnSink(|word: &[u8], _: &BooleanInfo| {
///     seen += word.len();
///     Ok::<(), SinkError>(())
/// });
/// sink.add_word(b"ACDDD", &BooleanInfo::WORD).unwrap();
/// drop(sink);
/// assert_eq!(seen, 5);
/// ```
pub struct FnSink<F>(pub F);

impl<F> TokenSink for FnSink<F>
where
    F: FnMut(&[u8], &BooleanInfo) -> Result<(), SinkError>,
{
    #[inline(always)]
    fn add_word(&mut self, word: &[u8], info: &BooleanInfo) -> Result<(), ParseError> {
        (self.0)(word, info).map_err(ParseError::from)
    }
}
