//! Format converters for resumes.
//!
//! This module renders a [`ResumeRecord`](crate::ResumeRecord) as markup
//! source:
//! - **LaTeX**: a standalone `article` document with escaped field values
//!
//! # Examples
//!
//! ```
//! use resume_export::converters::render_markup;
//! use resume_export::ResumeRecord;
//!
//! let resume = ResumeRecord::new("Grace Hopper", "grace@navy.mil");
//! let latex = render_markup(&resume);
//! assert!(latex.contains(r"\textbf{Grace Hopper}"));
//! ```

pub mod latex;

// Re-export main types
pub use latex::{LatexConverter, LatexOptions, escape_latex, render_markup};
