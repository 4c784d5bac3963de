//! Fixed-width rewrap of extracted text

/// Collapse whitespace runs and greedily rewrap at `width` columns.
///
/// Purely cosmetic: words are never split or hyphenated, so a single word
/// longer than `width` occupies its own over-long line. Rewrapping
/// already-wrapped text at the same width reproduces it exactly.
pub fn wrap(text: &str, width: usize) -> String {
    let mut out = String::with_capacity(text.len());
    let mut line_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if line_len == 0 {
            out.push_str(word);
            line_len = word_len;
        } else if line_len + 1 + word_len <= width {
            out.push(' ');
            out.push_str(word);
            line_len += 1 + word_len;
        } else {
            out.push('\n');
            out.push_str(word);
            line_len = word_len;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(wrap("a  b\t\tc\n\nd", 120), "a b c d");
    }

    #[test]
    fn no_line_exceeds_width() {
        let text = "lorem ipsum dolor sit amet consectetur adipiscing elit sed do eiusmod \
                    tempor incididunt ut labore et dolore magna aliqua ut enim ad minim veniam";
        let wrapped = wrap(text, 40);
        for line in wrapped.lines() {
            assert!(line.chars().count() <= 40, "over-long line: {:?}", line);
        }
        // Content is preserved modulo line breaks.
        assert_eq!(wrapped.replace('\n', " "), text);
    }

    #[test]
    fn rewrap_is_idempotent_at_same_width() {
        let text = "the quick brown fox jumps over the lazy dog and keeps on running \
                    far beyond the fence into the neighbouring field";
        let once = wrap(text, 30);
        let twice = wrap(&once, 30);
        assert_eq!(once, twice);
    }

    #[test]
    fn long_words_get_their_own_line() {
        let wrapped = wrap("short pneumonoultramicroscopicsilicovolcanoconiosis tail", 10);
        assert_eq!(
            wrapped,
            "short\npneumonoultramicroscopicsilicovolcanoconiosis\ntail"
        );
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(wrap("", 120), "");
        assert_eq!(wrap("   \n ", 120), "");
    }
}
