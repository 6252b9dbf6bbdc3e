//! # fb2tex
//!
//! A converter from FictionBook 2 (FB2) ebooks to LaTeX source.
//!
//! ## Features
//!
//! - Tolerant FB2 parsing with encoding detection (UTF-8, declared encoding,
//!   windows-1252 fallback)
//! - Sections, poems, citations, epigraphs and annotations mapped to LaTeX
//!   structures, with a table of contents
//! - Embedded JPEG and PNG images written next to the output as grayscale
//!   files with a fixed print density
//! - Configurable page geometry, language and fonts via [`LatexConfig`]
//!
//! ## Quick Start
//!
//! ```no_run
//! use fb2tex::LatexExporter;
//! use std::path::Path;
//!
//! LatexExporter::new().convert_file(Path::new("book.fb2"), Path::new("book.tex"))?;
//! # Ok::<(), fb2tex::Error>(())
//! ```
//!
//! ## Rendering in memory
//!
//! ```
//! use fb2tex::{EnclosureTable, LatexConfig, parse_str, render_document};
//!
//! let doc = parse_str(
//!     "<FictionBook><body><section><title><p>One</p></title><p>Hi &amp; bye</p></section></body></FictionBook>",
//! )?;
//! let tex = render_document(&doc, &EnclosureTable::new(), &LatexConfig::default())?;
//! assert!(tex.contains("\\section{One}"));
//! assert!(tex.contains("Hi \\& bye"));
//! # Ok::<(), fb2tex::Error>(())
//! ```

pub mod enclosure;
pub mod error;
pub mod export;
pub mod fb2;
pub mod latex;
pub(crate) mod util;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use enclosure::{Enclosure, EnclosureTable, ImageKind};
pub use error::{Error, Result};
pub use export::LatexExporter;
pub use fb2::{BookInfo, Document, Element, Node, Tag, parse_bytes, parse_str};
pub use latex::{LatexConfig, escape, render_document};
