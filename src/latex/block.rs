//! Block-level structure → TeX.
//!
//! Walks sections, poems, citations, epigraphs and the description,
//! appending to an owned output buffer. Inline content is delegated to
//! [`InlineConverter`]. Structural problems are logged and skipped: tables
//! and a few poem parts are known but unsupported (`warn`), anything not
//! expected in a given context is unknown (`error`).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::enclosure::EnclosureTable;
use crate::fb2::{Element, Node, Tag, author_name};

use super::config::LatexConfig;
use super::escape::escape;
use super::inline::{InlineConverter, escape_target};

static SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r" +").unwrap());

/// Heading text: spaces become control spaces so titles survive bookmarking.
pub fn toc_element(title: &str) -> String {
    SPACES.replace_all(title, r"\ ").into_owned()
}

/// Streaming converter for block structure.
pub struct BlockConverter<'a> {
    inline: InlineConverter<'a>,
    config: &'a LatexConfig,
    output: String,
}

impl<'a> BlockConverter<'a> {
    pub fn new(enclosures: &'a EnclosureTable, config: &'a LatexConfig) -> Self {
        Self {
            inline: InlineConverter::new(enclosures),
            config,
            output: String::new(),
        }
    }

    /// Append raw TeX.
    pub fn write(&mut self, tex: &str) {
        self.output.push_str(tex);
    }

    /// Consume the converter, returning the accumulated TeX.
    pub fn finish(self) -> String {
        self.output
    }

    /// Body epigraphs followed by the top-level sections.
    pub fn body(&mut self, body: &Element) {
        self.epigraphs(body);
        for section in body.children_with(&Tag::Section) {
            self.section(section);
        }
    }

    pub fn section(&mut self, section: &Element) {
        let title = section
            .child(&Tag::Title)
            .map(|t| self.title_text(t))
            .unwrap_or_default();
        self.write(&format!("\n\\section{{{}}}\n", toc_element(&title)));
        if let Some(id) = section.id() {
            self.anchor(id);
        }

        self.epigraphs(section);

        for x in section.elements() {
            match &x.tag {
                Tag::Section => self.section(x),
                Tag::Paragraph => self.paragraph(x),
                Tag::EmptyLine => self.empty_line(),
                Tag::Image => {
                    let tex = self.inline.image(x);
                    self.write(&tex);
                }
                Tag::Poem => self.poem(x),
                Tag::Subtitle => {
                    let subtitle = self.inline.convert(x);
                    self.write(&format!("\\subsection{{{}}}\n", toc_element(&subtitle)));
                }
                Tag::Cite => self.cite(x),
                Tag::Table => log::warn!("Unsupported element: {}", x.tag),
                Tag::Title | Tag::Epigraph => {}
                _ => log::error!("Unknown section element: {}", x.tag),
            }
        }
    }

    /// Title text: paragraphs joined by forced line breaks, empty lines as vertical space.
    pub fn title_text(&self, title: &Element) -> String {
        let mut first = true;
        let mut res = String::new();
        for x in title.elements() {
            match x.tag {
                Tag::Paragraph => {
                    if !first {
                        res.push_str("\\\\");
                    }
                    first = false;
                    res.push_str(&self.inline.convert(x));
                }
                Tag::EmptyLine => {
                    res.push_str(&format!("\\vspace{{{}}}", self.config.title_space));
                }
                _ => log::error!("Unknown section title element: {}", x.tag),
            }
        }
        res
    }

    /// A paragraph, preceded by a link target when it carries an id.
    pub fn paragraph(&mut self, p: &Element) {
        if let Some(id) = p.id() {
            self.anchor(id);
        }
        let text = self.inline.convert(p);
        self.write(&text);
        self.write("\n\n");
    }

    fn anchor(&mut self, id: &str) {
        self.write(&format!("\\hypertarget{{{}}}{{}}\n", escape_target(id)));
    }

    fn empty_line(&mut self) {
        let space = format!("\\vspace{{{}}}\n\n", self.config.empty_line_space);
        self.write(&space);
    }

    pub fn poem(&mut self, poem: &Element) {
        self.write("\\begin{verse}\n\n");

        if let Some(t) = poem.child(&Tag::Title) {
            let title = self.title_text(t);
            if !title.is_empty() {
                self.write(&format!("\\poemtitle{{{}}}\n", toc_element(&title)));
            }
        }

        self.epigraphs(poem);

        for x in poem.elements() {
            match x.tag {
                Tag::Stanza => self.stanza(x),
                Tag::Date => {
                    log::warn!("Unsupported element: {} ('{}')", x.tag, x.text().trim());
                }
                Tag::Title | Tag::Epigraph | Tag::TextAuthor => {}
                _ => log::error!("Unknown poem element: {}", x.tag),
            }
        }

        self.authors(poem);

        self.write("\\end{verse}\n\n");
    }

    fn stanza(&mut self, stanza: &Element) {
        for x in stanza.elements() {
            match x.tag {
                Tag::Title => {
                    if !self.title_text(x).is_empty() {
                        log::warn!("Unsupported element: stanza 'title'");
                    }
                }
                Tag::Subtitle => {
                    if !self.inline.convert(x).is_empty() {
                        log::warn!("Unsupported element: stanza 'subtitle'");
                    }
                }
                Tag::Verse => {
                    let line = self.inline.convert(x);
                    self.write(&line);
                    self.write("\\\\\n");
                }
                _ => log::error!("Unknown stanza element: {}", x.tag),
            }
        }
        self.write("\n");
    }

    /// `\author{...}` from the direct `text-author` children, joined by `\and`.
    fn authors(&mut self, element: &Element) {
        let names: Vec<String> = element
            .children_with(&Tag::TextAuthor)
            .map(|a| escape(a.text().trim(), false))
            .filter(|name| !name.is_empty())
            .collect();
        if !names.is_empty() {
            self.write(&format!("\\author{{{}}}\n", names.join(" \\and ")));
        }
    }

    pub fn cite(&mut self, cite: &Element) {
        self.write("\\begin{quotation}\n");

        for child in &cite.children {
            let x = match child {
                Node::Element(x) => x,
                Node::Text(text) => {
                    if !text.trim().is_empty() {
                        self.write(&escape(text, false));
                    }
                    continue;
                }
            };
            match x.tag {
                Tag::Paragraph => self.paragraph(x),
                Tag::Poem => self.poem(x),
                Tag::EmptyLine => self.empty_line(),
                Tag::Subtitle => {
                    let subtitle = self.inline.convert(x);
                    self.write(&format!("\\subsection*{{{}}}\n", toc_element(&subtitle)));
                }
                Tag::Table => log::warn!("Unsupported element: {}", x.tag),
                Tag::TextAuthor => {}
                _ => log::error!("Unknown cite element: {}", x.tag),
            }
        }

        self.authors(cite);

        self.write("\\end{quotation}\n");
    }

    /// All direct `epigraph` children in one `epigraphs` environment.
    pub fn epigraphs(&mut self, parent: &Element) {
        let epigraphs: Vec<&Element> = parent.children_with(&Tag::Epigraph).collect();
        if epigraphs.is_empty() {
            return;
        }

        self.write("\\begin{epigraphs}\n");
        for epigraph in epigraphs {
            self.write("\\qitem{");
            self.epigraph_text(epigraph);
            self.write(" }%\n");

            let author = epigraph
                .child(&Tag::TextAuthor)
                .map(|a| escape(a.text().trim(), false))
                .unwrap_or_default();
            self.write(&format!("\t{{{author}}}\n"));
        }
        self.write("\\end{epigraphs}\n");
    }

    fn epigraph_text(&mut self, epigraph: &Element) {
        let mut first = true;
        for x in epigraph.elements() {
            match x.tag {
                Tag::Paragraph => {
                    if !first {
                        self.write(&format!("\\vspace{{{}}}", self.config.title_space));
                    }
                    first = false;
                    let text = self.inline.convert(x);
                    self.write(&text);
                }
                Tag::EmptyLine => {
                    self.write(&format!("\\vspace{{{}}}", self.config.title_space));
                }
                Tag::Poem => self.poem(x),
                Tag::Cite => self.cite(x),
                Tag::TextAuthor => {}
                _ => log::error!("Unknown epigraph element: {}", x.tag),
            }
        }
    }

    /// Front-matter synopsis: a small-print block followed by a page break.
    pub fn annotation(&mut self, annotation: &Element) {
        if !annotation.has_content() {
            return;
        }

        self.write("\\section*{}\n");
        self.write("\\begin{small}\n");
        for x in annotation.elements() {
            match x.tag {
                Tag::Paragraph => self.paragraph(x),
                Tag::EmptyLine => self.write("\n\n"),
                Tag::Poem => self.poem(x),
                Tag::Subtitle => {
                    let subtitle = self.inline.convert(x);
                    self.write(&format!("\\subsection*{{{}}}\n", toc_element(&subtitle)));
                }
                Tag::Cite => self.cite(x),
                Tag::Table => log::warn!("Unsupported element: {}", x.tag),
                _ => log::error!("Unknown annotation element: {}", x.tag),
            }
        }
        self.write("\\end{small}\n");
        self.write("\\pagebreak\n\n");
    }

    /// Title page data, cover images and annotation from `description`.
    pub fn description(&mut self, description: Option<&Element>) {
        let Some(description) = description else {
            log::warn!("Missing required 'description' element");
            return;
        };
        let Some(title_info) = description.child(&Tag::TitleInfo) else {
            log::warn!("Missing required 'title-info' element");
            return;
        };

        let title = title_info
            .child(&Tag::BookTitle)
            .map(|t| escape(t.text().trim(), false))
            .unwrap_or_default();
        if title.is_empty() {
            log::warn!("Missing 'book-title' element");
        }

        let authors: Vec<String> = title_info
            .children_with(&Tag::Author)
            .map(|a| escape(&author_name(a), false))
            .filter(|name| !name.is_empty())
            .collect();
        if authors.is_empty() {
            log::warn!("Missing 'author' element");
        }

        if !authors.is_empty() {
            self.write(&format!("\\author{{{}}}\n", authors.join(" \\and ")));
        }
        if !title.is_empty() {
            self.write(&format!("\\title{{{}}}\n", toc_element(&title)));
        }
        self.write("\\date{}\n");
        if !authors.is_empty() || !title.is_empty() {
            self.write("\\maketitle\n");
        }

        // Cover images are placed as-is; a titlepage wrapper is left to the template.
        if let Some(coverpage) = title_info.child(&Tag::Coverpage) {
            for image in coverpage.children_with(&Tag::Image) {
                let tex = self.inline.image(image);
                self.write(&tex);
            }
        }

        if let Some(annotation) = title_info.child(&Tag::Annotation) {
            self.annotation(annotation);
        }
    }
}
