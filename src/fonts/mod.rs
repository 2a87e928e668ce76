//! Font encoding support for generated documents.
//!
//! Generated PDFs use the standard base-14 fonts with WinAnsiEncoding, so
//! text must be mapped from Unicode to single WinAnsi bytes before it is
//! written into a content stream.

pub mod encoding;

pub use encoding::{encode_winansi, is_winansi_char, unicode_to_winansi, SUBSTITUTE_CHAR};
