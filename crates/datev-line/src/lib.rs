//! DATEV Line: header line codec, format sniffing and preamble rendering
//!
//! Works on one [`datev_core::FormatDefinition`] at a time; the registry
//! hands out the definitions, this crate reads and writes the lines.

pub mod detect;
pub mod header_line;
pub mod options;
pub mod preamble;
mod tokenizer;

pub use detect::{detect_tokens, Detection};
pub use header_line::HeaderLine;
pub use options::{LineOptions, OptionsError};
pub use preamble::render_preamble;
