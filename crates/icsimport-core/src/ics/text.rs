//! Text value decoding for SUMMARY, DESCRIPTION and LOCATION.

/// Decodes an ICS text value.
///
/// Replaces the `\n`, `\,`, `\;` and `\\` escapes in that order, strips any
/// markup tags and trims surrounding whitespace. The backslash escape is
/// replaced last so its output is never rescanned.
pub fn decode_text(text: &str) -> String {
    let unescaped = text
        .replace("\\n", "\n")
        .replace("\\,", ",")
        .replace("\\;", ";")
        .replace("\\\\", "\\");

    strip_tags(&unescaped).trim().to_string()
}

/// Removes markup tags from text.
///
/// A `<` followed by a non-whitespace character opens a tag that runs up to
/// and including the next `>`, or to the end of the text if unterminated.
/// A `<` followed by whitespace or at the end of the text is kept.
pub fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '<' {
            out.push(c);
            continue;
        }

        match chars.peek() {
            Some(next) if !next.is_whitespace() => {
                for inner in chars.by_ref() {
                    if inner == '>' {
                        break;
                    }
                }
            }
            _ => out.push(c),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_escapes() {
        assert_eq!(
            decode_text("Line one\\nLine two\\, with comma\\; and semicolon"),
            "Line one\nLine two, with comma; and semicolon"
        );
    }

    #[test]
    fn backslash_replaced_last() {
        // `\\,` loses its comma escape first, leaving a lone backslash.
        assert_eq!(decode_text("a\\\\,b"), "a\\,b");
        assert_eq!(decode_text("C:\\\\Temp"), "C:\\Temp");
    }

    #[test]
    fn strips_markup_and_trims() {
        assert_eq!(
            decode_text("  <p>Doors open at <b>7pm</b></p>  "),
            "Doors open at 7pm"
        );
    }

    #[test]
    fn keeps_comparison_signs() {
        assert_eq!(strip_tags("a < b"), "a < b");
        assert_eq!(strip_tags("ends with <"), "ends with <");
    }

    #[test]
    fn unterminated_tag_runs_to_end() {
        assert_eq!(strip_tags("visible<span class="), "visible");
    }

    #[test]
    fn escaped_line_break_then_markup() {
        assert_eq!(decode_text("<br>First\\nSecond"), "First\nSecond");
    }
}
