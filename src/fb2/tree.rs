//! FictionBook document tree.
//!
//! The parser produces an owned tree of [`Node`]s. Element kinds are a closed
//! [`Tag`] enum so converters match exhaustively; names outside the
//! recognized set land in [`Tag::Unknown`] and keep their original spelling
//! for reporting.

use std::fmt;

/// Inline (paragraph-level) element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InlineKind {
    Strong,
    Emphasis,
    Strikethrough,
    Sub,
    Sup,
    Code,
    Link,
    /// `<style name="...">` spans. Recognized, not rendered.
    Style,
    /// Free-floating `<l>` line markers. Recognized, not rendered.
    Line,
}

/// Element kinds of a FictionBook 2 document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    FictionBook,
    Description,
    TitleInfo,
    BookTitle,
    Author,
    FirstName,
    MiddleName,
    LastName,
    Coverpage,
    Annotation,
    Body,
    Section,
    Title,
    Subtitle,
    Paragraph,
    EmptyLine,
    Poem,
    Stanza,
    Verse,
    Cite,
    Epigraph,
    TextAuthor,
    Date,
    Lang,
    Image,
    Binary,
    Table,
    Inline(InlineKind),
    Unknown(String),
}

impl Tag {
    /// Map a local (namespace-stripped) element name to its tag.
    pub fn from_name(name: &str) -> Self {
        match name {
            "FictionBook" => Tag::FictionBook,
            "description" => Tag::Description,
            "title-info" => Tag::TitleInfo,
            "book-title" => Tag::BookTitle,
            "author" => Tag::Author,
            "first-name" => Tag::FirstName,
            "middle-name" => Tag::MiddleName,
            "last-name" => Tag::LastName,
            "coverpage" => Tag::Coverpage,
            "annotation" => Tag::Annotation,
            "body" => Tag::Body,
            "section" => Tag::Section,
            "title" => Tag::Title,
            "subtitle" => Tag::Subtitle,
            "p" => Tag::Paragraph,
            "empty-line" => Tag::EmptyLine,
            "poem" => Tag::Poem,
            "stanza" => Tag::Stanza,
            "v" => Tag::Verse,
            "cite" => Tag::Cite,
            "epigraph" => Tag::Epigraph,
            "text-author" => Tag::TextAuthor,
            "date" => Tag::Date,
            "lang" => Tag::Lang,
            "image" => Tag::Image,
            "binary" => Tag::Binary,
            "table" => Tag::Table,
            "strong" => Tag::Inline(InlineKind::Strong),
            "emphasis" => Tag::Inline(InlineKind::Emphasis),
            "strikethrough" => Tag::Inline(InlineKind::Strikethrough),
            "sub" => Tag::Inline(InlineKind::Sub),
            "sup" => Tag::Inline(InlineKind::Sup),
            "code" => Tag::Inline(InlineKind::Code),
            "a" => Tag::Inline(InlineKind::Link),
            "style" => Tag::Inline(InlineKind::Style),
            "l" => Tag::Inline(InlineKind::Line),
            other => Tag::Unknown(other.to_string()),
        }
    }

    /// The element name as it appears in FictionBook markup.
    pub fn name(&self) -> &str {
        match self {
            Tag::FictionBook => "FictionBook",
            Tag::Description => "description",
            Tag::TitleInfo => "title-info",
            Tag::BookTitle => "book-title",
            Tag::Author => "author",
            Tag::FirstName => "first-name",
            Tag::MiddleName => "middle-name",
            Tag::LastName => "last-name",
            Tag::Coverpage => "coverpage",
            Tag::Annotation => "annotation",
            Tag::Body => "body",
            Tag::Section => "section",
            Tag::Title => "title",
            Tag::Subtitle => "subtitle",
            Tag::Paragraph => "p",
            Tag::EmptyLine => "empty-line",
            Tag::Poem => "poem",
            Tag::Stanza => "stanza",
            Tag::Verse => "v",
            Tag::Cite => "cite",
            Tag::Epigraph => "epigraph",
            Tag::TextAuthor => "text-author",
            Tag::Date => "date",
            Tag::Lang => "lang",
            Tag::Image => "image",
            Tag::Binary => "binary",
            Tag::Table => "table",
            Tag::Inline(kind) => match kind {
                InlineKind::Strong => "strong",
                InlineKind::Emphasis => "emphasis",
                InlineKind::Strikethrough => "strikethrough",
                InlineKind::Sub => "sub",
                InlineKind::Sup => "sup",
                InlineKind::Code => "code",
                InlineKind::Link => "a",
                InlineKind::Style => "style",
                InlineKind::Line => "l",
            },
            Tag::Unknown(name) => name,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A node in the document tree: character data or an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Element(Element),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        }
    }
}

/// An element with its attributes and ordered children.
///
/// Attribute names are stored without namespace prefix, so `l:href` and
/// `xlink:href` are both reachable as `href`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: Tag,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder: add an attribute.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Builder: append a child element.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Builder: append a text child.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id").filter(|id| !id.is_empty())
    }

    pub fn href(&self) -> Option<&str> {
        self.attr("href").filter(|href| !href.is_empty())
    }

    /// Direct element children.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Direct element children with the given tag.
    pub fn children_with<'a>(&'a self, tag: &'a Tag) -> impl Iterator<Item = &'a Element> {
        self.elements().filter(move |e| &e.tag == tag)
    }

    /// First direct child with the given tag.
    pub fn child(&self, tag: &Tag) -> Option<&Element> {
        self.elements().find(|e| &e.tag == tag)
    }

    /// All descendants with the given tag, in document order.
    pub fn descendants<'a>(&'a self, tag: &Tag, out: &mut Vec<&'a Element>) {
        for e in self.elements() {
            if &e.tag == tag {
                out.push(e);
            }
            e.descendants(tag, out);
        }
    }

    /// Concatenated character data of this element and its descendants.
    pub fn text(&self) -> String {
        let mut result = String::new();
        collect_text(self, &mut result);
        result
    }

    /// True when the element has at least one element child or non-blank text.
    pub fn has_content(&self) -> bool {
        self.children.iter().any(|n| match n {
            Node::Element(_) => true,
            Node::Text(t) => !t.trim().is_empty(),
        })
    }
}

fn collect_text(element: &Element, result: &mut String) {
    for child in &element.children {
        match child {
            Node::Text(t) => result.push_str(t),
            Node::Element(e) => collect_text(e, result),
        }
    }
}

/// A parsed FictionBook file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Top-level elements, normally a single `FictionBook`.
    pub nodes: Vec<Element>,
}

impl Document {
    /// The `FictionBook` root element, wherever it sits in the top level.
    pub fn root(&self) -> Option<&Element> {
        self.nodes.iter().find(|e| e.tag == Tag::FictionBook)
    }
}

/// A `<binary>` enclosure as declared in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryResource<'a> {
    pub id: &'a str,
    pub content_type: &'a str,
    /// Base64 payload, possibly wrapped across lines.
    pub payload: &'a str,
}

impl<'a> BinaryResource<'a> {
    /// Collect the `<binary>` children of the root, skipping ones without an id.
    pub fn collect(root: &'a Element) -> Vec<BinaryResource<'a>> {
        root.children_with(&Tag::Binary)
            .filter_map(|b| {
                let Some(id) = b.id() else {
                    log::warn!("Skipping binary without 'id'");
                    return None;
                };
                let payload = b.children.iter().find_map(|n| match n {
                    Node::Text(t) => Some(t.as_str()),
                    Node::Element(_) => None,
                });
                Some(BinaryResource {
                    id,
                    content_type: b.attr("content-type").unwrap_or(""),
                    payload: payload.unwrap_or(""),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_round_trip_names() {
        for name in ["section", "p", "empty-line", "text-author", "a", "l", "FictionBook"] {
            assert_eq!(Tag::from_name(name).name(), name);
        }
    }

    #[test]
    fn test_unknown_tag_keeps_name() {
        let tag = Tag::from_name("sequence");
        assert_eq!(tag, Tag::Unknown("sequence".to_string()));
        assert_eq!(tag.to_string(), "sequence");
    }

    #[test]
    fn test_element_queries() {
        let section = Element::new(Tag::Section)
            .with_child(Element::new(Tag::Title).with_child(
                Element::new(Tag::Paragraph).with_text("One"),
            ))
            .with_child(
                Element::new(Tag::Paragraph)
                    .with_attr("id", "p1")
                    .with_text("Hello ")
                    .with_child(Element::new(Tag::Inline(InlineKind::Strong)).with_text("world")),
            );

        assert!(section.child(&Tag::Title).is_some());
        assert_eq!(section.children_with(&Tag::Paragraph).count(), 1);

        let p = section.child(&Tag::Paragraph).unwrap();
        assert_eq!(p.id(), Some("p1"));
        assert_eq!(p.text(), "Hello world");

        let mut paragraphs = Vec::new();
        section.descendants(&Tag::Paragraph, &mut paragraphs);
        assert_eq!(paragraphs.len(), 2);
    }

    #[test]
    fn test_has_content() {
        assert!(!Element::new(Tag::Annotation).with_text("  \n").has_content());
        assert!(Element::new(Tag::Annotation).with_text("x").has_content());
        assert!(
            Element::new(Tag::Annotation)
                .with_child(Element::new(Tag::EmptyLine))
                .has_content()
        );
    }

    #[test]
    fn test_collect_binaries() {
        let root = Element::new(Tag::FictionBook)
            .with_child(
                Element::new(Tag::Binary)
                    .with_attr("id", "cover.jpg")
                    .with_attr("content-type", "image/jpeg")
                    .with_text("AAAA"),
            )
            .with_child(Element::new(Tag::Binary).with_text("BBBB"));

        let binaries = BinaryResource::collect(&root);
        assert_eq!(binaries.len(), 1);
        assert_eq!(binaries[0].id, "cover.jpg");
        assert_eq!(binaries[0].content_type, "image/jpeg");
        assert_eq!(binaries[0].payload, "AAAA");
    }
}
