//! Pure TeX generation from the FictionBook tree.
//!
//! This module transforms a parsed [`Document`](crate::fb2::Document) into
//! TeX source. No I/O is performed here; the export layer
//! ([`crate::export`]) builds the enclosure table and writes files.
//!
//! - [`escape`]: ordered text-escaping pipeline
//! - [`InlineConverter`]: paragraph content (emphasis, links, images, code)
//! - [`BlockConverter`]: sections, poems, citations, epigraphs, description
//! - [`render_document`]: preamble, metadata, bodies and postamble
//!
//! ## Output mapping
//!
//! | FictionBook         | TeX                                   |
//! |---------------------|---------------------------------------|
//! | `section`           | `\section{title}`                     |
//! | `subtitle`          | `\subsection{...}`                    |
//! | `poem`              | `verse` environment                   |
//! | `cite`              | `quotation` environment               |
//! | `epigraph`          | `epigraphs` environment, `\qitem`     |
//! | `empty-line`        | `\vspace`                             |
//! | `a l:href="#id"`    | `\hyperlink{id}{...}`                 |
//! | `p id="id"`         | `\hypertarget{id}{}` before the text  |
//! | `image l:href="#id"`| centered `\includegraphics`           |

mod block;
mod config;
mod escape;
mod inline;
mod preamble;
mod render;

pub use block::{BlockConverter, toc_element};
pub use config::LatexConfig;
pub use escape::escape;
pub use inline::InlineConverter;
pub use preamble::{postamble, preamble};
pub use render::{render_document, validate};
