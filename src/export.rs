//! TeX export: enclosure pre-pass, rendering and file output.
//!
//! # Example
//!
//! ```no_run
//! use fb2tex::LatexExporter;
//! use std::path::Path;
//!
//! LatexExporter::new().convert_file(Path::new("book.fb2"), Path::new("out/book.tex"))?;
//! # Ok::<(), fb2tex::Error>(())
//! ```

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::enclosure::EnclosureTable;
use crate::error::Result;
use crate::fb2::{BinaryResource, Document, parse_bytes};
use crate::latex::{LatexConfig, render_document, validate};

/// Exporter for TeX output.
#[derive(Debug, Clone, Default)]
pub struct LatexExporter {
    config: LatexConfig,
}

impl LatexExporter {
    /// Create a LatexExporter with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a LatexExporter with the specified configuration.
    pub fn with_config(config: LatexConfig) -> Self {
        Self { config }
    }

    /// Convert a parsed document, writing enclosure images into `out_dir`
    /// and the TeX source to `writer`.
    ///
    /// Missing root or body elements are reported before anything is
    /// written, to either the directory or the writer.
    pub fn export<W: Write>(&self, doc: &Document, out_dir: &Path, writer: &mut W) -> Result<()> {
        let (root, _) = validate(doc)?;

        let resources = BinaryResource::collect(root);
        let enclosures = EnclosureTable::build(&resources, out_dir, self.config.image_dpi);
        log::debug!(
            "Materialized {} of {} enclosures",
            enclosures.len(),
            resources.len()
        );

        let tex = render_document(doc, &enclosures, &self.config)?;
        writer.write_all(tex.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Convert an FB2 file to a TeX file. Enclosures land next to the output.
    ///
    /// The output file is only created once the document has been validated.
    pub fn convert_file(&self, input: &Path, output: &Path) -> Result<()> {
        log::info!("Converting {}", input.display());

        let bytes = fs::read(input)?;
        let doc = parse_bytes(&bytes)?;
        validate(&doc)?;

        let out_dir = output_dir(output);
        let mut writer = BufWriter::new(File::create(output)?);
        self.export(&doc, &out_dir, &mut writer)?;

        log::info!("Conversion successfully finished");
        Ok(())
    }
}

/// Directory enclosures are written to: the output's parent, or `.`.
pub fn output_dir(output: &Path) -> PathBuf {
    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Default output path: the input with a `.tex` extension.
pub fn default_output(input: &Path) -> PathBuf {
    input.with_extension("tex")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_dir() {
        assert_eq!(output_dir(Path::new("book.tex")), PathBuf::from("."));
        assert_eq!(output_dir(Path::new("out/book.tex")), PathBuf::from("out"));
    }

    #[test]
    fn test_default_output() {
        assert_eq!(default_output(Path::new("a/book.fb2")), PathBuf::from("a/book.tex"));
        assert_eq!(default_output(Path::new("book")), PathBuf::from("book.tex"));
    }
}
