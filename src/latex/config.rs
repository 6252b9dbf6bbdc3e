//! Output configuration: page geometry, fonts, language and image resolution.

use crate::enclosure::DEFAULT_DPI;

/// Configuration for TeX generation.
///
/// The defaults reproduce a pocket-sized book page (90.6mm × 122.4mm, 1mm
/// margins) set in Computer Modern Sans with Russian hyphenation, which suits
/// 6" e-ink readers.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Deserialize))]
#[cfg_attr(feature = "cli", serde(default))]
pub struct LatexConfig {
    /// Base font size option of the document class.
    pub font_size: String,
    /// Extra `\documentclass` options.
    pub class_options: Vec<String>,
    pub paper_width: String,
    pub paper_height: String,
    pub margin: String,
    /// Babel language.
    pub language: String,
    /// `inputenc` encoding.
    pub input_encoding: String,
    /// Font family wrapped around the whole body, if any.
    pub font_family: Option<String>,
    pub link_color: String,
    /// Resolution stamped on generated enclosure images.
    pub image_dpi: u16,
    /// Vertical space for an empty line in running text.
    pub empty_line_space: String,
    /// Vertical space between blocks of titles and epigraphs.
    pub title_space: String,
}

impl Default for LatexConfig {
    fn default() -> Self {
        Self {
            font_size: "12pt".to_string(),
            class_options: vec!["openany".to_string()],
            paper_width: "90.6mm".to_string(),
            paper_height: "122.4mm".to_string(),
            margin: "1mm".to_string(),
            language: "russian".to_string(),
            input_encoding: "utf8".to_string(),
            font_family: Some("cmss".to_string()),
            link_color: "black".to_string(),
            image_dpi: DEFAULT_DPI,
            empty_line_space: "12pt".to_string(),
            title_space: "10pt".to_string(),
        }
    }
}

impl LatexConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_paper_size(mut self, width: impl Into<String>, height: impl Into<String>) -> Self {
        self.paper_width = width.into();
        self.paper_height = height.into();
        self
    }

    pub fn with_margin(mut self, margin: impl Into<String>) -> Self {
        self.margin = margin.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_font_family(mut self, family: Option<&str>) -> Self {
        self.font_family = family.map(str::to_string);
        self
    }

    pub fn with_image_dpi(mut self, dpi: u16) -> Self {
        self.image_dpi = dpi;
        self
    }
}
