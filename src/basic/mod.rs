//! # MSX-BASIC module
//!
//! Bidirectional conversion between MSX-BASIC source text and the
//! interpreter's tokenized intermediate form, including BCD floating point
//! and implicit line-number back-references (spec.md §4.7-§4.9).
//!
//! Grounded structurally on `a2kit::lang::applesoft`'s split into a keyword
//! table, a tokenizer, and a detokenizer, but the tokenizer/detokenizer
//! themselves are flat cursor scanners (spec.md defines tokenization as a
//! scan, not a parse) rather than a tree-sitter-grammar walk.

pub mod bcd;
pub mod detokenizer;
pub mod keywords;
pub mod tokenizer;

pub const MEMORY_ORIGIN: u16 = 0x8000;
pub const HEADER_BYTE: u8 = 0xFF;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("line number out of range (must be 1-65535)")]
    InvalidLineNumber,
    #[error("tokenized program is truncated or malformed")]
    Truncated,
}
