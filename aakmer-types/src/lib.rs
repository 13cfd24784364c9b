//! Core types shared across the aakmer tokenizer.
//!
//! This crate holds the vocabulary that both the tokenizer core and any host
//! adapter speak. Keeping it separate ensures:
//!
//! - **Small tokens**: k-mers live inline in a `SmallVec`, no heap traffic for
//!   the usual window widths
//! - **Stable metadata**: the boolean-mode record handed to the host has a
//!   fixed layout and a fixed default
//! - **Clean boundaries**: the core depends on these types, never the reverse

#![warn(missing_docs)]

use core::fmt;

use smallvec::SmallVec;
use thiserror::Error;

/// Identifier of a host session (one connection / worker thread).
pub type SessionId = u64;

/// Inline capacity of a [`Token`]. Windows up to this width never allocate.
pub const TOKEN_INLINE_CAP: usize = 16;

/// Classification of a token handed to the host.
///
/// `#[repr(u8)]` keeps the discriminants identical to the host's token-type
/// enumeration so an adapter can pass them through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenKind {
    /// End of input marker
    Eof = 0,
    /// Plain word
    Word = 1,
    /// Opening parenthesis of a boolean group
    LeftParen = 2,
    /// Closing parenthesis of a boolean group
    RightParen = 3,
    /// Stopword placeholder
    Stopword = 4,
}

/// Boolean-mode metadata attached to every emitted token.
///
/// The k-mer parser never builds boolean expressions, so every token carries
/// [`BooleanInfo::WORD`]: a plain word, no operators, no weighting, no phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BooleanInfo {
    /// Token classification
    pub kind: TokenKind,
    /// `+` / `-` operator state (0 = neither)
    pub yesno: i32,
    /// Relevance weight adjustment (`>` / `<` operators)
    pub weight_adjust: i32,
    /// Negation (`~`) flag
    pub wasign: i8,
    /// Truncation (`*`) flag
    pub trunc: bool,
    /// Byte preceding the token in the query
    pub prev: u8,
    /// Phrase quote marker, if the token is inside a quoted phrase
    pub quot: Option<u8>,
}

impl BooleanInfo {
    /// Metadata for a plain word with every boolean field at its default.
    pub const WORD: Self = Self {
        kind: TokenKind::Word,
        yesno: 0,
        weight_adjust: 0,
        wasign: 0,
        trunc: false,
        prev: b' ',
        quot: None,
    };
}

impl Default for BooleanInfo {
    fn default() -> Self {
        Self::WORD
    }
}

/// What the host is parsing for.
///
/// Accepted for interface fidelity; the k-mer parser produces the same tokens
/// in every mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum ParseMode {
    /// Indexing, or a natural-language query without stopword handling
    #[default]
    Simple = 0,
    /// Natural-language query with stopwords
    WithStopwords = 1,
    /// Boolean-mode query; the host expects boolean metadata per token
    FullBoolean = 2,
}

impl fmt::Display for ParseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParseMode::Simple => "simple",
            ParseMode::WithStopwords => "with_stopwords",
            ParseMode::FullBoolean => "full_boolean",
        };
        f.write_str(name)
    }
}

/// An owned, translated k-mer.
///
/// Always a private copy: a token never aliases the document it was cut from.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Token(SmallVec<[u8; TOKEN_INLINE_CAP]>);

impl Token {
    /// Creates a token by copying `bytes`.
    #[inline]
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self(SmallVec::from_slice(bytes))
    }

    /// Creates a token by copying `bytes`, reporting heap exhaustion instead
    /// of aborting. Tokens up to [`TOKEN_INLINE_CAP`] bytes never allocate.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Alloc` if a wide token cannot be allocated.
    pub fn try_from_slice(bytes: &[u8]) -> Result<Self, ParseError> {
        let mut buf: SmallVec<[u8; TOKEN_INLINE_CAP]> = SmallVec::new();
        buf.try_reserve_exact(bytes.len())
            .map_err(|_| ParseError::Alloc { bytes: bytes.len() })?;
        buf.extend_from_slice(bytes);
        Ok(Self(buf))
    }

    /// Returns the token bytes.
    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the token length in bytes.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true for the zero-length token.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if the token bytes live on the heap rather than inline.
    #[inline(always)]
    pub fn spilled(&self) -> bool {
        self.0.spilled()
    }
}

impl AsRef<[u8]> for Token {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl PartialEq<[u8]> for Token {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl PartialEq<&[u8]> for Token {
    fn eq(&self, other: &&[u8]) -> bool {
        self.as_bytes() == *other
    }
}

impl<const N: usize> PartialEq<&[u8; N]> for Token {
    fn eq(&self, other: &&[u8; N]) -> bool {
        self.as_bytes() == &other[..]
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({:?})", String::from_utf8_lossy(&self.0))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Translated tokens are always ASCII; anything else is shown escaped.
        for &b in self.0.iter() {
            write!(f, "{}", b.escape_ascii())?;
        }
        Ok(())
    }
}

/// Rejection reported by a host sink while accepting a token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("sink rejected token: {reason}")]
pub struct SinkError {
    /// Host-supplied description of the failure.
    pub reason: String,
}

impl SinkError {
    /// Creates a sink error with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Errors that can occur while parsing a document.
///
/// Both variants are fatal for the document: tokens emitted before the
/// failure stand, nothing after it is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Copying token bytes ran out of memory.
    #[error("allocation of {bytes} bytes failed while copying tokens")]
    Alloc {
        /// Size of the failed request.
        bytes: usize,
    },
    /// The host sink refused a token.
    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Kind of a configuration variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    /// Signed integer with an inclusive range
    Long,
    /// Free-form string
    Str,
}

impl fmt::Display for VarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarKind::Long => f.write_str("long"),
            VarKind::Str => f.write_str("string"),
        }
    }
}

/// Errors from configuration handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The k-mer window width must be at least one byte.
    #[error("k-mer width must be non-zero")]
    ZeroWindow,
    /// No variable with this name exists in the requested scope.
    #[error("unknown variable: {0}")]
    UnknownVariable(String),
    /// The value's kind does not match the variable's kind.
    #[error("variable {name} expects a {expected} value")]
    TypeMismatch {
        /// Variable name.
        name: &'static str,
        /// Kind the variable accepts.
        expected: VarKind,
    },
    /// The session has not been opened.
    #[error("unknown session: {0}")]
    UnknownSession(SessionId),
}

/// Value of a configuration variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VarValue {
    /// Integer value
    Long(i64),
    /// String value
    Str(String),
}

impl VarValue {
    /// Returns the kind of this value.
    pub const fn kind(&self) -> VarKind {
        match self {
            VarValue::Long(_) => VarKind::Long,
            VarValue::Str(_) => VarKind::Str,
        }
    }
}

impl fmt::Display for VarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarValue::Long(v) => write!(f, "{}", v),
            VarValue::Str(s) => f.write_str(s),
        }
    }
}

/// Value of a status variable as shown to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusValue {
    /// Fixed informational text
    Text(&'static str),
    /// Counter reading
    Long(u64),
}

impl fmt::Display for StatusValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusValue::Text(s) => f.write_str(s),
            StatusValue::Long(v) => write!(f, "{}", v),
        }
    }
}
