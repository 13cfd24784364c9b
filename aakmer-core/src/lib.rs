//! Reduced-alphabet amino-acid k-mer tokenizer.
//!
//! A replacement full-text parser for database hosts that index protein
//! sequences. Instead of splitting on whitespace, every document is cut into
//! overlapping windows of `K` residues (10 by default), and each residue is
//! mapped onto an 11-letter alphabet so that conservative substitutions index
//! to the same token.
//!
//! ```
//! use aakmer_core::window_and_translate;
//!
//! let tokens = window_and_translate(b"ABCDEFGHIJKLMNO").unwrap();
//! assert_eq!(tokens.len(), 6);
//! assert_eq!(tokens[0].to_string(), "ADCDDYGHLX");
//! ```
//!
//! Layout:
//! - [`analyzer`]: translation table and k-mer windowing, the pure core
//! - [`sink`]: how tokens reach the host
//! - [`parser`]: per-call entry point, counts invocations
//! - [`plugin`]: descriptor and lifecycle a host adapter binds to
//! - [`config`] / [`status`]: host-visible variables

pub mod analyzer;
pub mod config;
pub mod parser;
pub mod plugin;
pub mod sink;
pub mod status;

pub use aakmer_types::{BooleanInfo, ParseError, ParseMode, Token};
pub use analyzer::{window_and_translate, KmerWindower, ResidueTranslator};
pub use parser::{KmerParser, ParserParam};
pub use sink::TokenSink;

/// Result type for parse operations.
pub type Result<T> = core::result::Result<T, ParseError>;
