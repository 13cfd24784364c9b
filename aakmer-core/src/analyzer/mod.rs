//! Residue analysis pipeline.
//!
//! This module provides the two stages every document goes through:
//! - **Translator**: Maps each residue byte onto the reduced alphabet
//! - **Kmer**: Slides a fixed-width window over the sequence and emits one
//!   translated token per position

pub mod kmer;
pub mod translator;

pub use kmer::{window_and_translate, KmerWindower, DEFAULT_K};
pub use translator::{ResidueTranslator, TRANSLATION_TABLE};
