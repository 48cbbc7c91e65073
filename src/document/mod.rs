/*!
 * WordprocessingML document handling.
 *
 * - `tree`: the element tree interface the rewriter works against
 * - `xml`: quick-xml backed implementation of that interface
 * - `fonts`: font-name policy deciding which runs convert
 * - `rewriter`: per-run conversion of one part
 * - `package`: ZIP archive access and whole-package conversion
 * - `footnotes`: footnote extraction
 */

pub mod fonts;
pub mod footnotes;
pub mod package;
pub mod rewriter;
pub mod tree;
pub mod xml;

pub use fonts::FontPolicy;
pub use footnotes::{extract_footnotes, Footnote};
pub use package::{
    convert_package, convert_part, DocxPackage, MemoryPackage, PackageArchive, PackageOptions,
    PackageReport, PartFilter, PartOutcome,
};
pub use rewriter::{rewrite_part, PartReport, RewriteOptions};
pub use tree::{ElementTree, NodeId};
pub use xml::XmlDocument;
