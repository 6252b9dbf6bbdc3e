//! Book summary for `fb2tex --info`.

use crate::error::{Error, Result};

use super::tree::{BinaryResource, Document, Element, Tag};

/// Display name of a `title-info/author`: first, middle and last name parts,
/// whichever are present, joined by single spaces.
pub fn author_name(author: &Element) -> String {
    [Tag::FirstName, Tag::MiddleName, Tag::LastName]
        .iter()
        .filter_map(|tag| author.child(tag))
        .map(|part| part.text().trim().to_string())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Metadata and structure counts of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct BookInfo {
    pub title: Option<String>,
    pub authors: Vec<String>,
    pub language: Option<String>,
    pub bodies: usize,
    /// Sections at any depth, across all bodies.
    pub sections: usize,
    pub binaries: Vec<BinaryInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct BinaryInfo {
    pub id: String,
    pub content_type: String,
    /// Approximate decoded size in bytes.
    pub size: usize,
}

impl BookInfo {
    pub fn from_document(doc: &Document) -> Result<Self> {
        let root = doc.root().ok_or(Error::MissingRoot)?;
        let mut info = BookInfo::default();

        if let Some(title_info) = root
            .child(&Tag::Description)
            .and_then(|d| d.child(&Tag::TitleInfo))
        {
            info.title = title_info
                .child(&Tag::BookTitle)
                .map(|t| t.text().trim().to_string());
            info.authors = title_info
                .children_with(&Tag::Author)
                .map(author_name)
                .filter(|name| !name.is_empty())
                .collect();
            info.language = title_info
                .child(&Tag::Lang)
                .map(|l| l.text().trim().to_string());
        }

        for body in root.children_with(&Tag::Body) {
            info.bodies += 1;
            let mut sections = Vec::new();
            body.descendants(&Tag::Section, &mut sections);
            info.sections += sections.len();
        }

        info.binaries = BinaryResource::collect(root)
            .into_iter()
            .map(|b| BinaryInfo {
                id: b.id.to_string(),
                content_type: b.content_type.to_string(),
                size: b.payload.chars().filter(|c| !c.is_whitespace()).count() / 4 * 3,
            })
            .collect();

        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fb2::parse_str;

    #[test]
    fn test_author_name_parts() {
        let author = Element::new(Tag::Author)
            .with_child(Element::new(Tag::LastName).with_text(" Pushkin "))
            .with_child(Element::new(Tag::FirstName).with_text("Alexander"));
        assert_eq!(author_name(&author), "Alexander Pushkin");

        let nickname_only = Element::new(Tag::Author)
            .with_child(Element::new(Tag::Unknown("nickname".to_string())).with_text("anon"));
        assert_eq!(author_name(&nickname_only), "");
    }

    #[test]
    fn test_book_info() {
        let doc = parse_str(
            r#"<FictionBook>
  <description><title-info>
    <author><first-name>Anton</first-name><last-name>Chekhov</last-name></author>
    <book-title>Stories</book-title>
    <lang>ru</lang>
  </title-info></description>
  <body>
    <section><section><p>a</p></section></section>
    <section><p>b</p></section>
  </body>
  <body name="notes"><section id="n1"><p>note</p></section></body>
  <binary id="c.png" content-type="image/png">AAAA</binary>
</FictionBook>"#,
        )
        .unwrap();

        let info = BookInfo::from_document(&doc).unwrap();
        assert_eq!(info.title.as_deref(), Some("Stories"));
        assert_eq!(info.authors, vec!["Anton Chekhov"]);
        assert_eq!(info.language.as_deref(), Some("ru"));
        assert_eq!(info.bodies, 2);
        assert_eq!(info.sections, 4);
        assert_eq!(info.binaries.len(), 1);
        assert_eq!(info.binaries[0].size, 3);
    }

    #[test]
    fn test_book_info_missing_root() {
        let doc = parse_str("<html/>").unwrap();
        assert!(matches!(BookInfo::from_document(&doc), Err(Error::MissingRoot)));
    }
}
