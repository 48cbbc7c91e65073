/*!
 * Footnote extraction from a packaged document.
 */

use serde::Serialize;

use super::package::PackageArchive;
use super::tree::ElementTree;
use super::xml::XmlDocument;
use crate::errors::AppError;

// @const: Entry holding the footnote bodies
pub const FOOTNOTES_PART: &str = "word/footnotes.xml";

/// One user-visible footnote
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Footnote {
    pub id: String,
    pub content: String,
}

/// Read the footnotes of a package.
///
/// Separator footnotes (ids `-1` and `0`) and footnotes without an id are
/// skipped, as are footnotes whose trimmed text is empty. A package without
/// a footnotes part has no footnotes.
///
/// # Returns
/// * `Result<Vec<Footnote>, AppError>` - Footnotes in document order
pub fn extract_footnotes<A: PackageArchive + ?Sized>(archive: &A) -> Result<Vec<Footnote>, AppError> {
    if !archive.list_entries().iter().any(|entry| entry == FOOTNOTES_PART) {
        return Ok(Vec::new());
    }

    let xml = archive.read_entry_text(FOOTNOTES_PART)?;
    let document = XmlDocument::parse(&xml)?;
    Ok(collect_footnotes(&document))
}

fn collect_footnotes<T: ElementTree>(tree: &T) -> Vec<Footnote> {
    let mut footnotes = Vec::new();

    for footnote in tree.descendants(tree.root(), "footnote") {
        let Some(id) = tree
            .get_attribute(footnote, "w:id")
            .or_else(|| tree.get_attribute(footnote, "id"))
        else {
            continue;
        };
        if id == "-1" || id == "0" {
            continue;
        }

        let content: String = tree
            .descendants(footnote, "t")
            .into_iter()
            .map(|t| tree.text_content(t))
            .collect();
        let content = content.trim();
        if content.is_empty() {
            continue;
        }

        footnotes.push(Footnote {
            id: id.to_string(),
            content: content.to_string(),
        });
    }

    footnotes
}
