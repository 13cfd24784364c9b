//! Host-facing full-text parser.
//!
//! The host calls [`KmerParser::parse`] once per stored document and once per
//! search string. Every call bumps the call counter exactly once, then streams
//! the translated k-mers of the document into the sink the host supplied.
//!
//! ```
//! use aakmer_core::parser::{KmerParser, ParserParam};
//! use aakmer_types::{ParseMode, Token};
//!
//! let parser = KmerParser::default();
//! let mut tokens: Vec<Token> = Vec::new();
//! let n = parser
//!     .parse(&ParserParam::new(b"ABCDEFGHIJKLMNO", ParseMode::Simple), &mut tokens)
//!     .unwrap();
//!
//! assert_eq!(n, 6);
//! assert_eq!(tokens[0], b"ADCDDYGHLX");
//! ```

use aakmer_types::{ConfigError, ParseError, ParseMode, SessionId};
use tracing::{debug, warn};

use crate::analyzer::kmer::KmerWindower;
use crate::config::ParserConfig;
use crate::sink::TokenSink;
use crate::status::{CallCounter, CALLS};

/// One parse request from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserParam<'d> {
    /// Document or query bytes. Borrowed for the duration of the call.
    pub doc: &'d [u8],
    /// What the host is parsing for.
    pub mode: ParseMode,
    /// Session issuing the request, if the host tracks one.
    pub session: Option<SessionId>,
}

impl<'d> ParserParam<'d> {
    /// Creates a request with no session attached.
    #[inline]
    pub const fn new(doc: &'d [u8], mode: ParseMode) -> Self {
        Self {
            doc,
            mode,
            session: None,
        }
    }

    /// Attaches the issuing session.
    #[inline]
    pub const fn with_session(mut self, session: SessionId) -> Self {
        self.session = Some(session);
        self
    }
}

/// K-mer full-text parser.
///
/// Holds no per-document state. The only shared state is the call counter,
/// which defaults to the process-wide [`CALLS`].
#[derive(Debug, Clone, Copy)]
pub struct KmerParser<'c> {
    windower: KmerWindower,
    counter: &'c CallCounter,
}

impl Default for KmerParser<'static> {
    fn default() -> Self {
        Self {
            windower: KmerWindower::default(),
            counter: &CALLS,
        }
    }
}

impl KmerParser<'static> {
    /// Creates a parser that reports into the process-wide counter.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ZeroWindow` if the configured width is zero.
    pub fn new(config: &ParserConfig) -> Result<Self, ConfigError> {
        Self::with_counter(config, &CALLS)
    }
}

impl<'c> KmerParser<'c> {
    /// Creates a parser that reports into `counter`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ZeroWindow` if the configured width is zero.
    pub fn with_counter(config: &ParserConfig, counter: &'c CallCounter) -> Result<Self, ConfigError> {
        Ok(Self {
            windower: config.windower()?,
            counter,
        })
    }

    /// Per-query setup. Nothing to prepare; always succeeds.
    #[inline]
    pub fn init(&self, _param: &ParserParam<'_>) -> Result<(), ParseError> {
        Ok(())
    }

    /// Per-query teardown. Nothing to release; always succeeds.
    #[inline]
    pub fn deinit(&self, _param: &ParserParam<'_>) -> Result<(), ParseError> {
        Ok(())
    }

    /// Parses one document or query into `sink`.
    ///
    /// The mode is logged but does not change the tokens: every token is a
    /// plain word with default boolean metadata.
    ///
    /// Returns the number of tokens emitted.
    ///
    /// # Errors
    ///
    /// Allocation failure or sink rejection, surfaced as soon as it happens.
    /// The counter has already been bumped and earlier tokens stand.
    pub fn parse<S>(&self, param: &ParserParam<'_>, sink: &mut S) -> crate::Result<usize>
    where
        S: TokenSink + ?Sized,
    {
        let call = self.counter.increment();

        match self.windower.window_into(param.doc, sink) {
            Ok(tokens) => {
                debug!(
                    call,
                    len = param.doc.len(),
                    mode = %param.mode,
                    session = ?param.session,
                    tokens,
                    "parsed document"
                );
                Ok(tokens)
            }
            Err(e) => {
                warn!(
                    call,
                    len = param.doc.len(),
                    mode = %param.mode,
                    error = %e,
                    "parse aborted"
                );
                Err(e)
            }
        }
    }

    /// The windower this parser runs.
    #[inline]
    pub fn windower(&self) -> &KmerWindower {
        &self.windower
    }

    /// Calls served so far, as recorded by this parser's counter.
    #[inline]
    pub fn calls(&self) -> u64 {
        self.counter.get()
    }
}
