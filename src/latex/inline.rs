//! Paragraph-level content → TeX.
//!
//! Converts the mixed text/inline children of a paragraph-like element
//! (`p`, `v`, `subtitle`, `text-author`) into a flat TeX string. Nothing in
//! here fails: unsupported and unknown elements are reported and dropped.

use crate::enclosure::EnclosureTable;
use crate::fb2::{Element, InlineKind, Node, Tag};

use super::escape::escape;

/// Converter for inline content. Holds the enclosure table for image lookups.
#[derive(Debug, Clone, Copy)]
pub struct InlineConverter<'a> {
    enclosures: &'a EnclosureTable,
}

impl<'a> InlineConverter<'a> {
    pub fn new(enclosures: &'a EnclosureTable) -> Self {
        Self { enclosures }
    }

    /// Convert the children of `element` into TeX.
    pub fn convert(&self, element: &Element) -> String {
        let mut out = String::new();
        for child in &element.children {
            match child {
                Node::Text(text) => out.push_str(&escape(text, false)),
                Node::Element(e) => self.convert_element(e, &mut out),
            }
        }
        out
    }

    fn convert_element(&self, e: &Element, out: &mut String) {
        match &e.tag {
            Tag::Inline(kind) => match kind {
                InlineKind::Strong => wrap(out, "\\textbf{", &self.convert(e), "}"),
                InlineKind::Emphasis => wrap(out, "\\textit{", &self.convert(e), "}"),
                InlineKind::Strikethrough => wrap(out, "\\sout{", &self.convert(e), "}"),
                InlineKind::Sub => wrap(out, "$_{\\textrm{", &self.convert(e), "}}$"),
                InlineKind::Sup => wrap(out, "$^{\\textrm{", &self.convert(e), "}}$"),
                InlineKind::Code => wrap(
                    out,
                    "\n\\begin{verbatim}\n",
                    &escape(&e.text(), true),
                    "\n\\end{verbatim}\n",
                ),
                InlineKind::Link => self.link(e, out),
                InlineKind::Style | InlineKind::Line => {
                    log::warn!("Unsupported element: {}", e.tag);
                }
            },
            Tag::Image => out.push_str(&self.image(e)),
            _ => log::error!("Unknown paragraph element: {}", e.tag),
        }
    }

    fn link(&self, e: &Element, out: &mut String) {
        let Some(href) = e.href() else {
            log::warn!("'a' without 'href'");
            return;
        };

        let text = escape(&e.text(), false);
        match href.strip_prefix('#') {
            Some(target) => out.push_str(&format!(
                "\\hyperlink{{{}}}{{\\underline{{{text}}}}}",
                escape_target(target)
            )),
            None => out.push_str(&format!(
                "\\href{{{}}}{{\\underline{{{text}}}}}",
                escape_target(href)
            )),
        }
    }

    /// Centered `\includegraphics` for an `<image l:href="#id"/>`.
    ///
    /// Only local references are supported; anything else, and ids missing
    /// from the enclosure table, are reported and produce no output.
    pub fn image(&self, e: &Element) -> String {
        let Some(id) = e.href().and_then(|href| href.strip_prefix('#')) else {
            log::error!("Invalid inline image ref '{}'", e.href().unwrap_or(""));
            return String::new();
        };
        let Some(enclosure) = self.enclosures.resolve(id) else {
            log::error!("Non-existing image ref '{id}'");
            return String::new();
        };
        let path = enclosure.path.to_string_lossy().replace('\\', "/");
        format!("\\begin{{center}}\n\\includegraphics{{{path}}}\n\\end{{center}}\n")
    }
}

fn wrap(out: &mut String, open: &str, content: &str, close: &str) {
    out.push_str(open);
    out.push_str(content);
    out.push_str(close);
}

/// hyperref takes URLs and anchor names verbatim except for the comment and
/// parameter characters.
pub(super) fn escape_target(url: &str) -> String {
    url.replace('%', "\\%").replace('#', "\\#")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enclosure::{Enclosure, ImageKind};
    use crate::test_helpers::{capture_logs, count_logs};
    use log::Level;
    use std::path::PathBuf;

    fn inline(kind: InlineKind) -> Element {
        Element::new(Tag::Inline(kind))
    }

    fn convert(p: &Element) -> String {
        let table = EnclosureTable::new();
        InlineConverter::new(&table).convert(p)
    }

    #[test]
    fn test_text_is_escaped() {
        let p = Element::new(Tag::Paragraph).with_text("50% & more");
        assert_eq!(convert(&p), r"50\% \& more");
    }

    #[test]
    fn test_emphasis_nesting() {
        let p = Element::new(Tag::Paragraph)
            .with_text("a ")
            .with_child(
                inline(InlineKind::Strong)
                    .with_text("b ")
                    .with_child(inline(InlineKind::Emphasis).with_text("c")),
            )
            .with_text(" d");
        assert_eq!(convert(&p), r"a \textbf{b \textit{c}} d");
    }

    #[test]
    fn test_strikethrough_sub_sup() {
        let p = Element::new(Tag::Paragraph)
            .with_child(inline(InlineKind::Strikethrough).with_text("x"))
            .with_text("H")
            .with_child(inline(InlineKind::Sub).with_text("2"))
            .with_text("O m")
            .with_child(inline(InlineKind::Sup).with_text("3"));
        assert_eq!(
            convert(&p),
            r"\sout{x}H$_{\textrm{2}}$O m$^{\textrm{3}}$"
        );
    }

    #[test]
    fn test_code_is_verbatim() {
        let p = Element::new(Tag::Paragraph)
            .with_child(inline(InlineKind::Code).with_text("let a_b = \"%\";"));
        assert_eq!(
            convert(&p),
            "\n\\begin{verbatim}\nlet a_b = \"%\";\n\\end{verbatim}\n"
        );
    }

    #[test]
    fn test_internal_link() {
        let p = Element::new(Tag::Paragraph).with_child(
            inline(InlineKind::Link)
                .with_attr("href", "#n1")
                .with_text("[1]"),
        );
        assert_eq!(
            convert(&p),
            r"\hyperlink{n1}{\underline{\string[1\string]}}"
        );
    }

    #[test]
    fn test_external_link() {
        let p = Element::new(Tag::Paragraph).with_child(
            inline(InlineKind::Link)
                .with_attr("href", "http://example.com/a%20b#top")
                .with_text("site"),
        );
        assert_eq!(
            convert(&p),
            r"\href{http://example.com/a\%20b\#top}{\underline{site}}"
        );
    }

    #[test]
    fn test_link_without_href_is_dropped() {
        let p = Element::new(Tag::Paragraph)
            .with_text("x ")
            .with_child(inline(InlineKind::Link).with_text("orphan"));
        assert_eq!(convert(&p), "x ");

        let empty = Element::new(Tag::Paragraph)
            .with_child(inline(InlineKind::Link).with_attr("href", "").with_text("orphan"));
        assert_eq!(convert(&empty), "");
    }

    #[test]
    fn test_internal_link_target_is_escaped() {
        let p = Element::new(Tag::Paragraph).with_child(
            inline(InlineKind::Link)
                .with_attr("href", "#n%1#b")
                .with_text("note"),
        );
        assert_eq!(convert(&p), r"\hyperlink{n\%1\#b}{\underline{note}}");
    }

    #[test]
    fn test_unsupported_and_unknown_are_dropped() {
        let p = Element::new(Tag::Paragraph)
            .with_text("a")
            .with_child(inline(InlineKind::Style).with_text("styled"))
            .with_child(inline(InlineKind::Line).with_text("line"))
            .with_child(Element::new(Tag::Unknown("blink".to_string())).with_text("x"))
            .with_child(Element::new(Tag::Poem))
            .with_text("b");
        assert_eq!(convert(&p), "ab");
    }

    #[test]
    fn test_unsupported_warns_unknown_errors() {
        let p = Element::new(Tag::Paragraph)
            .with_child(inline(InlineKind::Style).with_text("styled"))
            .with_child(Element::new(Tag::Unknown("blink".to_string())).with_text("x"))
            .with_child(inline(InlineKind::Link).with_text("no target"));
        let (tex, logs) = capture_logs(|| convert(&p));
        assert_eq!(tex, "");

        assert_eq!(count_logs(&logs, Level::Warn, "Unsupported element: style"), 1);
        assert_eq!(count_logs(&logs, Level::Warn, "'a' without 'href'"), 1);
        assert_eq!(count_logs(&logs, Level::Error, "Unknown paragraph element: blink"), 1);
        assert_eq!(logs.len(), 3);
    }

    #[test]
    fn test_dangling_image_is_an_error() {
        let table = EnclosureTable::new();
        let image = Element::new(Tag::Image).with_attr("href", "#gone");
        let (tex, logs) = capture_logs(|| InlineConverter::new(&table).image(&image));
        assert_eq!(tex, "");
        assert_eq!(count_logs(&logs, Level::Error, "Non-existing image ref 'gone'"), 1);
    }

    #[test]
    fn test_image_resolution() {
        let mut table = EnclosureTable::new();
        table.insert(
            "pic",
            Enclosure {
                kind: ImageKind::Png,
                path: PathBuf::from("enc123.png"),
            },
        );
        let converter = InlineConverter::new(&table);

        let found = Element::new(Tag::Image).with_attr("href", "#pic");
        assert_eq!(
            converter.image(&found),
            "\\begin{center}\n\\includegraphics{enc123.png}\n\\end{center}\n"
        );

        let dangling = Element::new(Tag::Image).with_attr("href", "#nope");
        assert_eq!(converter.image(&dangling), "");

        let external = Element::new(Tag::Image).with_attr("href", "http://x/y.png");
        assert_eq!(converter.image(&external), "");

        assert_eq!(converter.image(&Element::new(Tag::Image)), "");
    }
}
