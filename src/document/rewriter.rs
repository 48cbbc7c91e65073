/*!
 * Per-run conversion of a WordprocessingML part.
 *
 * Legacy → Unicode converts whole runs whose font names the legacy family,
 * or, in force mode, runs the classifier approves. Unicode → legacy splits
 * mixed-script runs into one run per segment and forces the legacy font on
 * the Bengali ones. Run lists are snapshotted before any edit.
 */

use log::{debug, trace};
use serde::Serialize;

use super::fonts::FontPolicy;
use super::tree::{ElementTree, NodeId};
use crate::conversion::{
    classify_script, convert_legacy_to_unicode, convert_unicode_to_legacy, segment,
    ConversionDirection,
};

/// Run font attributes consulted for decisions
const RUN_FONT_ATTRIBUTES: [&str; 4] = ["ascii", "hAnsi", "cs", "eastAsia"];

/// Font attributes renamed inside style definitions
const STYLE_FONT_ATTRIBUTES: [&str; 5] = ["ascii", "hAnsi", "cs", "eastAsia", "hint"];

/// Font attributes forced when producing legacy text
const LEGACY_FONT_ATTRIBUTES: [&str; 3] = ["ascii", "hAnsi", "cs"];

/// Elements that precede `rFonts` inside run properties
const BEFORE_RUN_FONTS: [&str; 5] = ["ins", "del", "moveFrom", "moveTo", "rStyle"];

/// Elements that follow `rPr` inside paragraph properties
const AFTER_PARAGRAPH_RUN_PROPERTIES: [&str; 2] = ["sectPr", "pPrChange"];

/// Mode flags for one part
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteOptions {
    pub direction: ConversionDirection,
    pub force_convert: bool,
    pub is_style_part: bool,
}

/// What a rewrite did to one part
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PartReport {
    pub runs_seen: usize,
    pub runs_converted: usize,
    pub runs_split: usize,
    pub runs_skipped: usize,
    pub structural_mismatches: usize,
    pub ambiguous_classifications: usize,
    pub fonts_renamed: usize,
    pub paragraph_marks: usize,
}

impl PartReport {
    /// Add another report's counters to this one
    pub fn merge(&mut self, other: &PartReport) {
        self.runs_seen += other.runs_seen;
        self.runs_converted += other.runs_converted;
        self.runs_split += other.runs_split;
        self.runs_skipped += other.runs_skipped;
        self.structural_mismatches += other.structural_mismatches;
        self.ambiguous_classifications += other.ambiguous_classifications;
        self.fonts_renamed += other.fonts_renamed;
        self.paragraph_marks += other.paragraph_marks;
    }

    /// `true` when the tree was changed
    pub fn is_modified(&self) -> bool {
        self.runs_converted > 0 || self.runs_split > 0 || self.fonts_renamed > 0 || self.paragraph_marks > 0
    }
}

/// Rewrite the runs of one part in place.
///
/// # Arguments
/// * `tree` - The parsed part
/// * `options` - Direction, force mode and whether this is a style part
/// * `policy` - Font names driving the decisions
///
/// # Returns
/// * `PartReport` - Counters describing what changed
pub fn rewrite_part<T: ElementTree>(tree: &mut T, options: &RewriteOptions, policy: &FontPolicy) -> PartReport {
    let report = match (options.direction, options.is_style_part) {
        (ConversionDirection::LegacyToUnicode, true) => rename_style_fonts(tree, policy),
        (ConversionDirection::LegacyToUnicode, false) => {
            rewrite_runs_to_unicode(tree, options.force_convert, policy)
        }
        (ConversionDirection::UnicodeToLegacy, true) => PartReport::default(),
        (ConversionDirection::UnicodeToLegacy, false) => {
            let mut report = rewrite_runs_to_legacy(tree, policy);
            report.paragraph_marks = mark_paragraphs(tree, policy);
            report
        }
    };

    debug!(
        "{} part: {} runs, {} converted, {} split, {} skipped, {} mismatched, {} ambiguous",
        options.direction,
        report.runs_seen,
        report.runs_converted,
        report.runs_split,
        report.runs_skipped,
        report.structural_mismatches,
        report.ambiguous_classifications
    );
    report
}

fn w_attribute<'a, T: ElementTree>(tree: &'a T, node: NodeId, name: &str) -> Option<&'a str> {
    tree.get_attribute(node, &format!("w:{}", name))
        .or_else(|| tree.get_attribute(node, name))
}

fn set_w_attribute<T: ElementTree>(tree: &mut T, node: NodeId, name: &str, value: &str) {
    tree.set_attribute(node, &format!("w:{}", name), value);
}

/// Element name with the same prefix as `reference`
fn qualified_like<T: ElementTree>(tree: &T, reference: NodeId, local: &str) -> String {
    match tree.name(reference).and_then(|name| name.split_once(':')) {
        Some((prefix, _)) => format!("{}:{}", prefix, local),
        None => local.to_string(),
    }
}

/// Existing child `local` of `parent`, or a new one inserted at the index
/// chosen by `position`
fn ensure_child<T: ElementTree>(
    tree: &mut T,
    parent: NodeId,
    local: &str,
    position: impl FnOnce(&T) -> usize,
) -> NodeId {
    if let Some(existing) = tree.first_child(parent, local) {
        return existing;
    }
    let name = qualified_like(tree, parent, local);
    let index = position(&*tree);
    let child = tree.create_element(&name);
    tree.insert_child(parent, index, child);
    child
}

/// Index just after the last child whose local name is in `locals`, or 0
fn index_after<T: ElementTree>(tree: &T, parent: NodeId, locals: &[&str]) -> usize {
    tree.child_nodes(parent)
        .iter()
        .rposition(|&child| tree.local_name(child).is_some_and(|name| locals.contains(&name)))
        .map_or(0, |index| index + 1)
}

/// Index of the first child whose local name is in `locals`, or the end
fn index_before<T: ElementTree>(tree: &T, parent: NodeId, locals: &[&str]) -> usize {
    let children = tree.child_nodes(parent);
    children
        .iter()
        .position(|&child| tree.local_name(child).is_some_and(|name| locals.contains(&name)))
        .unwrap_or(children.len())
}

fn run_fonts<T: ElementTree>(tree: &T, run: NodeId) -> Option<NodeId> {
    let properties = tree.first_descendant(run, "rPr")?;
    tree.first_descendant(properties, "rFonts")
}

fn font_names<T: ElementTree>(tree: &T, fonts: Option<NodeId>, attributes: &[&str]) -> Vec<String> {
    fonts
        .map(|fonts| {
            attributes
                .iter()
                .filter_map(|attr| w_attribute(tree, fonts, attr))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

// =========================================================================
// Legacy → Unicode
// =========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FontVerdict {
    Legacy,
    Skipped,
    Unknown,
}

fn verdict_for(names: &[String], policy: &FontPolicy) -> FontVerdict {
    if names.iter().any(|name| policy.is_legacy_font(name)) {
        FontVerdict::Legacy
    } else if names
        .iter()
        .any(|name| policy.is_skipped_font(name, ConversionDirection::LegacyToUnicode))
    {
        FontVerdict::Skipped
    } else {
        FontVerdict::Unknown
    }
}

/// Decide from run fonts, then from the run and paragraph style names.
fn run_font_verdict<T: ElementTree>(tree: &T, run: NodeId, policy: &FontPolicy) -> FontVerdict {
    let names = font_names(tree, run_fonts(tree, run), &RUN_FONT_ATTRIBUTES);
    let verdict = verdict_for(&names, policy);
    if verdict != FontVerdict::Unknown {
        return verdict;
    }

    let run_style = tree
        .first_descendant(run, "rPr")
        .and_then(|properties| tree.first_descendant(properties, "rStyle"));
    let paragraph_style = tree
        .parent(run)
        .and_then(|paragraph| tree.first_descendant(paragraph, "pStyle"));

    let style_names: Vec<String> = [run_style, paragraph_style]
        .into_iter()
        .flatten()
        .filter_map(|style| w_attribute(tree, style, "val"))
        .map(str::to_string)
        .collect();
    verdict_for(&style_names, policy)
}

fn rewrite_runs_to_unicode<T: ElementTree>(tree: &mut T, force_convert: bool, policy: &FontPolicy) -> PartReport {
    let mut report = PartReport::default();
    let runs = tree.descendants(tree.root(), "r");

    for run in runs {
        report.runs_seen += 1;

        let verdict = run_font_verdict(tree, run, policy);
        let use_heuristic = match verdict {
            FontVerdict::Legacy => false,
            FontVerdict::Unknown if force_convert => true,
            FontVerdict::Skipped | FontVerdict::Unknown => {
                report.runs_skipped += 1;
                continue;
            }
        };

        let mut converted_any = false;
        for text_node in tree.children(run, "t") {
            let text = tree.text_content(text_node);
            if text.is_empty() {
                continue;
            }

            if use_heuristic {
                let script = classify_script(&text);
                if script.is_ambiguous() {
                    report.ambiguous_classifications += 1;
                    debug!("Ambiguous script, treating as legacy: {:?}", text);
                }
                if !script.is_legacy {
                    trace!("Leaving text unconverted ({:?}): {:?}", script.reason, text);
                    continue;
                }
            }

            let converted = convert_legacy_to_unicode(&text);
            tree.set_text_content(text_node, &converted);
            tree.set_attribute(text_node, "xml:space", "preserve");
            converted_any = true;
        }

        if !converted_any {
            report.runs_skipped += 1;
            continue;
        }

        report.runs_converted += 1;
        if verdict == FontVerdict::Legacy {
            report.fonts_renamed += rename_run_fonts(tree, run, &policy.unicode_font);
        }
    }

    report
}

fn rename_run_fonts<T: ElementTree>(tree: &mut T, run: NodeId, target: &str) -> usize {
    let Some(fonts) = run_fonts(tree, run) else {
        return 0;
    };

    let mut renamed = 0;
    for attr in RUN_FONT_ATTRIBUTES {
        if w_attribute(tree, fonts, attr).is_some() {
            set_w_attribute(tree, fonts, attr, target);
            renamed += 1;
        }
    }
    renamed
}

fn rename_style_fonts<T: ElementTree>(tree: &mut T, policy: &FontPolicy) -> PartReport {
    let mut report = PartReport::default();

    for fonts in tree.descendants(tree.root(), "rFonts") {
        for attr in STYLE_FONT_ATTRIBUTES {
            let is_legacy = w_attribute(tree, fonts, attr).is_some_and(|name| policy.is_legacy_font(name));
            if is_legacy {
                set_w_attribute(tree, fonts, attr, &policy.unicode_font);
                report.fonts_renamed += 1;
            }
        }
    }

    report
}

// =========================================================================
// Unicode → legacy
// =========================================================================

fn has_bengali_segment(text: &str) -> bool {
    !text.is_empty() && segment(text).iter().any(|part| part.is_bengali)
}

fn is_skipped_for_legacy<T: ElementTree>(tree: &T, run: NodeId, policy: &FontPolicy) -> bool {
    font_names(tree, run_fonts(tree, run), &LEGACY_FONT_ATTRIBUTES)
        .iter()
        .any(|name| policy.is_skipped_font(name, ConversionDirection::UnicodeToLegacy))
}

/// Element children of a run other than its properties
fn content_children<T: ElementTree>(tree: &T, run: NodeId) -> Vec<NodeId> {
    tree.child_nodes(run)
        .into_iter()
        .filter(|&child| tree.local_name(child).is_some_and(|name| name != "rPr"))
        .collect()
}

fn rewrite_runs_to_legacy<T: ElementTree>(tree: &mut T, policy: &FontPolicy) -> PartReport {
    let mut report = PartReport::default();
    let runs = tree.descendants(tree.root(), "r");

    for run in runs {
        report.runs_seen += 1;

        if is_skipped_for_legacy(tree, run, policy) {
            report.runs_skipped += 1;
            continue;
        }

        let content = content_children(tree, run);
        let has_bengali = content.iter().any(|&child| {
            tree.local_name(child) == Some("t") && has_bengali_segment(&tree.text_content(child))
        });
        if !has_bengali {
            report.runs_skipped += 1;
            continue;
        }

        let parent = match tree.parent(run) {
            Some(parent) if tree.child_nodes(parent).contains(&run) => parent,
            _ => {
                debug!("Run without a parent container, leaving it unchanged");
                report.structural_mismatches += 1;
                continue;
            }
        };

        let mut split = false;
        let pieces = if content.len() > 1 {
            split = true;
            isolate_content(tree, parent, run, &content)
        } else {
            vec![run]
        };

        let mut converted = false;
        for piece in pieces {
            let Some(text_node) = tree.first_child(piece, "t") else {
                continue;
            };
            let outcome = convert_run_segments(tree, parent, piece, text_node, policy);
            converted |= outcome.converted;
            split |= outcome.split;
        }

        if converted {
            report.runs_converted += 1;
        } else {
            report.runs_skipped += 1;
        }
        if split {
            report.runs_split += 1;
        }
    }

    report
}

/// Replace `run` with one run per content child, each carrying a copy of
/// the run properties.
fn isolate_content<T: ElementTree>(tree: &mut T, parent: NodeId, run: NodeId, content: &[NodeId]) -> Vec<NodeId> {
    let properties = tree.first_child(run, "rPr");
    let mut pieces = Vec::with_capacity(content.len());

    for &child in content {
        let piece = tree.clone_element(run, false);
        if let Some(properties) = properties {
            let copy = tree.clone_element(properties, true);
            tree.append_child(piece, copy);
        }
        tree.append_child(piece, child);
        pieces.push(piece);
    }

    tree.replace_child(parent, run, &pieces);
    pieces
}

struct SegmentOutcome {
    converted: bool,
    split: bool,
}

/// Convert the Bengali parts of a single-text run, splitting it when the
/// text mixes scripts.
fn convert_run_segments<T: ElementTree>(
    tree: &mut T,
    parent: NodeId,
    run: NodeId,
    text_node: NodeId,
    policy: &FontPolicy,
) -> SegmentOutcome {
    let text = tree.text_content(text_node);
    let segments = if text.is_empty() { Vec::new() } else { segment(&text) };

    if !segments.iter().any(|part| part.is_bengali) {
        return SegmentOutcome {
            converted: false,
            split: false,
        };
    }

    if segments.len() == 1 {
        tree.set_text_content(text_node, &convert_unicode_to_legacy(&text));
        tree.set_attribute(text_node, "xml:space", "preserve");
        force_legacy_font(tree, run, policy);
        return SegmentOutcome {
            converted: true,
            split: false,
        };
    }

    let mut clones = Vec::with_capacity(segments.len());
    for part in &segments {
        let clone = tree.clone_element(run, true);
        if let Some(clone_text) = tree.first_child(clone, "t") {
            if part.is_bengali {
                tree.set_text_content(clone_text, &convert_unicode_to_legacy(&part.content));
                force_legacy_font(tree, clone, policy);
            } else {
                tree.set_text_content(clone_text, &part.content);
            }
            tree.set_attribute(clone_text, "xml:space", "preserve");
        }
        clones.push(clone);
    }

    trace!("Split run into {} segments: {:?}", clones.len(), text);
    let replaced = tree.replace_child(parent, run, &clones);
    SegmentOutcome {
        converted: replaced,
        split: replaced,
    }
}

/// Set the legacy output font on a run, creating `rPr`/`rFonts` as needed.
fn force_legacy_font<T: ElementTree>(tree: &mut T, run: NodeId, policy: &FontPolicy) {
    let properties = ensure_child(tree, run, "rPr", |_| 0);
    set_legacy_fonts(tree, properties, policy);
}

fn set_legacy_fonts<T: ElementTree>(tree: &mut T, properties: NodeId, policy: &FontPolicy) {
    let fonts = ensure_child(tree, properties, "rFonts", |tree| {
        index_after(tree, properties, &BEFORE_RUN_FONTS)
    });
    for attr in LEGACY_FONT_ATTRIBUTES {
        set_w_attribute(tree, fonts, attr, &policy.legacy_font);
    }
}

/// Force the legacy font on every paragraph mark; returns the paragraph count.
fn mark_paragraphs<T: ElementTree>(tree: &mut T, policy: &FontPolicy) -> usize {
    let paragraphs = tree.descendants(tree.root(), "p");

    for &paragraph in &paragraphs {
        let paragraph_properties = ensure_child(tree, paragraph, "pPr", |_| 0);
        let mark_properties = ensure_child(tree, paragraph_properties, "rPr", |tree| {
            index_before(tree, paragraph_properties, &AFTER_PARAGRAPH_RUN_PROPERTIES)
        });
        set_legacy_fonts(tree, mark_properties, policy);
    }

    paragraphs.len()
}
