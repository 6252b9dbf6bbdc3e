//! FictionBook 2 input: document tree, parser and summary.
//!
//! - [`tree`]: owned, read-only tree of [`Element`]s with a closed [`Tag`] set
//! - [`parser`]: quick-xml event loop producing a [`Document`]
//! - [`info`]: metadata summary used by `fb2tex --info`

mod info;
mod parser;
mod tree;

pub use info::{BinaryInfo, BookInfo, author_name};
pub use parser::{parse_bytes, parse_str};
pub use tree::{BinaryResource, Document, Element, InlineKind, Node, Tag};
