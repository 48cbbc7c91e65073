/*!
 * Sentence-final punctuation spacing.
 *
 * Both converters finish with this pass. It removes horizontal whitespace
 * before a danda, double danda or legacy pipe and leaves exactly one space
 * after it when more text follows on the same line. Legacy input is cleaned
 * with the danda-only variant before glyph lookup, since joining two pipes
 * would turn them into the double-danda key.
 */

use super::clusters::is_danda;

/// Legacy fonts draw the danda on the ASCII pipe.
const LEGACY_DANDA: char = '|';

fn is_sentence_mark(c: char) -> bool {
    is_danda(c) || c == LEGACY_DANDA
}

fn is_horizontal_space(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Normalize spacing around sentence-final marks.
///
/// Applying it twice gives the same result as applying it once.
pub fn normalize_typography(text: &str) -> String {
    normalize_marks(text, is_sentence_mark)
}

/// Same as [`normalize_typography`] but leaves the legacy pipe alone.
pub fn normalize_danda_spacing(text: &str) -> String {
    normalize_marks(text, is_danda)
}

fn normalize_marks(text: &str, is_mark: fn(char) -> bool) -> String {
    let mut result = String::with_capacity(text.len() + 8);
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if !is_mark(c) {
            result.push(c);
            continue;
        }

        while result.ends_with(is_horizontal_space) {
            result.pop();
        }
        result.push(c);

        while chars.next_if(|&next| is_horizontal_space(next)).is_some() {}

        match chars.peek() {
            None | Some('\n') | Some('\r') => {}
            Some(&next) if is_mark(next) => {}
            Some(_) => result.push(' '),
        }
    }

    result
}
