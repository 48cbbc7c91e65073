/*!
 * Splits mixed-script Unicode text into alternating Bengali and Latin
 * segments so that only the Bengali parts are converted.
 */

use super::clusters::{is_bengali, is_danda};

/// A contiguous stretch of text on one side of the script boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub content: String,
    pub is_bengali: bool,
}

impl Segment {
    fn new(content: String, is_bengali: bool) -> Self {
        Self { content, is_bengali }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strength {
    Bengali,
    Latin,
    Neutral,
}

fn strength(c: char) -> Strength {
    if is_bengali(c) || is_danda(c) {
        Strength::Bengali
    } else if c.is_ascii_alphanumeric() {
        Strength::Latin
    } else {
        Strength::Neutral
    }
}

/// Nearest strong classification seen so far, scanning in iteration order.
fn nearest_strong<'a>(classes: impl Iterator<Item = &'a Strength>) -> Vec<Option<Strength>> {
    let mut last = None;
    classes
        .map(|&class| {
            let nearest = last;
            if class != Strength::Neutral {
                last = Some(class);
            }
            nearest
        })
        .collect()
}

/// Partition `text` into Bengali and Latin segments.
///
/// Spaces and punctuation join the nearest strong character on their left,
/// or on their right at the start of the text, and default to Bengali.
/// Concatenating the segments gives back `text` exactly.
pub fn segment(text: &str) -> Vec<Segment> {
    let chars: Vec<char> = text.chars().collect();
    let classes: Vec<Strength> = chars.iter().map(|&c| strength(c)).collect();

    let left = nearest_strong(classes.iter());
    let mut right = nearest_strong(classes.iter().rev());
    right.reverse();

    let mut segments: Vec<Segment> = Vec::new();
    for (i, &c) in chars.iter().enumerate() {
        let is_bengali = match (classes[i], left[i], right[i]) {
            (Strength::Bengali, _, _) => true,
            (Strength::Latin, _, _) => false,
            (Strength::Neutral, Some(Strength::Latin), _) => false,
            (Strength::Neutral, Some(Strength::Bengali), _) => true,
            (Strength::Neutral, _, Some(Strength::Latin)) => false,
            (Strength::Neutral, _, _) => true,
        };

        match segments.last_mut() {
            Some(last) if last.is_bengali == is_bengali => last.content.push(c),
            _ => segments.push(Segment::new(c.to_string(), is_bengali)),
        }
    }

    segments
}
