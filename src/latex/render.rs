//! Whole-document assembly.
//!
//! Pure: takes a parsed document and a prebuilt enclosure table and returns
//! the TeX source. The export layer ([`crate::export`]) handles building the
//! table and writing files.

use crate::enclosure::EnclosureTable;
use crate::error::{Error, Result};
use crate::fb2::{Document, Element, Tag};

use super::block::BlockConverter;
use super::config::LatexConfig;
use super::preamble::{postamble, preamble};

/// Check for the two required elements: the `FictionBook` root and a `body`.
pub fn validate(doc: &Document) -> Result<(&Element, &Element)> {
    let root = doc.root().ok_or(Error::MissingRoot)?;
    let body = root.child(&Tag::Body).ok_or(Error::MissingBody)?;
    Ok((root, body))
}

/// Render a complete TeX document.
///
/// Fails only when the root or body element is missing; everything else is
/// logged and the affected content is left out.
pub fn render_document(
    doc: &Document,
    enclosures: &EnclosureTable,
    config: &LatexConfig,
) -> Result<String> {
    let (root, body) = validate(doc)?;
    let mut converter = BlockConverter::new(enclosures, config);

    converter.write(&preamble(config));
    converter.description(root.child(&Tag::Description));
    converter.write("\\tableofcontents\n\\newpage\n\n");

    converter.body(body);
    // Further bodies, usually footnotes, go after the main text.
    for extra in root.children_with(&Tag::Body).skip(1) {
        converter.body(extra);
    }

    converter.write(&postamble(config));
    Ok(converter.finish())
}
