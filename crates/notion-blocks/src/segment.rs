//! Sentence segmentation for selected PDF text
//!
//! Text copied out of a PDF viewer carries line breaks and runs of spaces
//! wherever the layout wrapped. We collapse all of that to single spaces and
//! then cut after every `.`, `!` or `?` that is followed by a space.

/// Characters that close a sentence.
const TERMINALS: [char; 3] = ['.', '!', '?'];

/// Whitespace-normalized text: no leading or trailing whitespace, and every
/// internal whitespace run replaced by exactly one ASCII space.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn new(raw: &str) -> Self {
        Self(raw.split_whitespace().collect::<Vec<_>>().join(" "))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate the sentence fragments in order.
    ///
    /// The iterator borrows the text and is cheap to clone, so a sequence
    /// can be replayed any number of times.
    pub fn sentences(&self) -> Sentences<'_> {
        Sentences { rest: &self.0 }
    }
}

impl std::fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lazy iterator over the sentence fragments of a [`NormalizedText`].
#[derive(Debug, Clone)]
pub struct Sentences<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Sentences<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let text: &'a str = self.rest;
            if text.is_empty() {
                return None;
            }

            let (fragment, rest) = match split_after_terminal(text) {
                Some(at) => text.split_at(at),
                None => (text, ""),
            };
            self.rest = rest.trim_start();

            let fragment = fragment.trim();
            if !fragment.is_empty() {
                return Some(fragment);
            }
        }
    }
}

/// Byte offset just past the first terminal punctuation mark that is
/// followed by whitespace.
fn split_after_terminal(text: &str) -> Option<usize> {
    let mut chars = text.char_indices().peekable();
    while let Some((idx, c)) = chars.next() {
        if !TERMINALS.contains(&c) {
            continue;
        }
        if let Some((_, next)) = chars.peek() {
            if next.is_whitespace() {
                return Some(idx + c.len_utf8());
            }
        }
    }
    None
}

/// Split `text` into trimmed, non-empty bullet strings.
///
/// ```
/// use notion_blocks::format_bullets;
///
/// assert_eq!(
///     format_bullets("Hello world. How are you? Fine!"),
///     vec!["Hello world.", "How are you?", "Fine!"]
/// );
/// ```
pub fn format_bullets(text: &str) -> Vec<String> {
    NormalizedText::new(text)
        .sentences()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_terminal_punctuation() {
        assert_eq!(
            format_bullets("Hello world. How are you? Fine!"),
            vec!["Hello world.", "How are you?", "Fine!"]
        );
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(format_bullets("").is_empty());
        assert!(format_bullets("   \n\t  ").is_empty());
    }

    #[test]
    fn no_terminal_punctuation_is_one_bullet() {
        assert_eq!(
            format_bullets("no terminal punctuation"),
            vec!["no terminal punctuation"]
        );
    }

    #[test]
    fn trailing_terminal_does_not_add_empty_bullet() {
        assert_eq!(format_bullets("One. Two."), vec!["One.", "Two."]);
    }

    #[test]
    fn collapses_layout_whitespace() {
        let raw = "  The quick\nbrown   fox.\r\n\tJumps   over\nthe dog?  ";
        assert_eq!(
            NormalizedText::new(raw).as_str(),
            "The quick brown fox. Jumps over the dog?"
        );
        assert_eq!(
            format_bullets(raw),
            vec!["The quick brown fox.", "Jumps over the dog?"]
        );
    }

    #[test]
    fn punctuation_inside_a_token_is_not_a_boundary() {
        assert_eq!(
            format_bullets("Version 1.2.3 shipped e.g.today. Done"),
            vec!["Version 1.2.3 shipped e.g.today.", "Done"]
        );
    }

    #[test]
    fn repeated_terminals_stay_with_their_sentence() {
        assert_eq!(
            format_bullets("Really?! Yes... ok"),
            vec!["Really?!", "Yes...", "ok"]
        );
    }

    #[test]
    fn multibyte_text_splits_on_char_boundaries() {
        assert_eq!(
            format_bullets("Größe ändern. Ça va? 你好!"),
            vec!["Größe ändern.", "Ça va?", "你好!"]
        );
    }

    #[test]
    fn sentences_can_be_replayed() {
        let text = NormalizedText::new("A. B. C.");
        let iter = text.sentences();
        let first: Vec<_> = iter.clone().collect();
        let second: Vec<_> = iter.collect();
        assert_eq!(first, second);
        assert_eq!(text.sentences().count(), 3);
    }
}
