//! The line-by-line markup tokenizer.
//!
//! Each input line is classified into one [`Token`] by checking marker
//! prefixes in a fixed precedence order; raw-HTML and fenced-code blocks
//! switch the tokenizer into an accumulating mode until their closing
//! marker. The format is deliberately permissive: malformed input never
//! raises an error, it just produces incomplete output. In particular a
//! block opener that is never closed silently swallows the rest of the
//! document.

use crate::highlight::Highlighter;
use crate::markdown;
use crate::markup::{AnchorIds, Numbering, Token};
use anyhow::Result;

/// Language assumed for fenced code blocks without a language hint.
const DEFAULT_LANGUAGE: &str = "python";

/// Accumulating block state.
enum Mode {
    Text,
    RawHtml { lines: Vec<String> },
    Code { lines: Vec<String>, language: Option<String> },
}

/// Tokenize one document's lines.
///
/// `ids` and `numbers` are shared with sibling calls when anchor IDs and
/// numbering must stay continuous across a document set. When `limit` is
/// set, consumption stops at the first separator boundary that reaches it
/// and a "read more" block pointing at `read_more` is appended instead.
pub fn tokenize(
    lines: &[String],
    limit: Option<usize>,
    read_more: &str,
    ids: &mut AnchorIds,
    numbers: &mut dyn Numbering,
    highlighter: &Highlighter,
) -> Result<Vec<Token>> {
    let mut tokens: Vec<Token> = Vec::new();
    let mut mode = Mode::Text;
    let mut sections = 0usize;

    for line in lines {
        if limit.is_some_and(|limit| limit > 0 && sections >= limit) {
            tokens.push(Token::Separator);
            tokens.push(Token::RawHtml {
                html: format!("<a class=\"read-more\" href=\"{read_more}\">Read More</a>"),
            });
            tokens.push(Token::Separator);
            return Ok(tokens);
        }

        let stripped = line.trim_start();
        if !matches!(mode, Mode::Code { .. }) && stripped.is_empty() {
            continue;
        }

        mode = match mode {
            Mode::RawHtml { mut lines } => {
                if stripped.starts_with("!!") {
                    tokens.push(Token::RawHtml { html: lines.join("\n") });
                    Mode::Text
                } else {
                    lines.push(stripped.to_string());
                    Mode::RawHtml { lines }
                }
            }
            Mode::Code { mut lines, language } => {
                if stripped.starts_with("```") {
                    let source = lines.join("\n");
                    let html = highlighter
                        .highlight(&source, language.as_deref().unwrap_or(DEFAULT_LANGUAGE))?;
                    tokens.push(Token::Code { html, source });
                    Mode::Text
                } else {
                    // keep indentation, drop the line ending
                    lines.push(line.trim_end().to_string());
                    Mode::Code { lines, language }
                }
            }
            Mode::Text => classify(stripped, &mut tokens, &mut sections, ids, numbers),
        };
    }

    Ok(tokens)
}

/// Classify a single non-blank line outside any block mode.
///
/// Marker checks happen in this order: bullet, header, raw note, note,
/// single-line raw HTML, raw-HTML block opener, code fence, separator,
/// default. Returns the mode for the next line.
fn classify(
    stripped: &str,
    tokens: &mut Vec<Token>,
    sections: &mut usize,
    ids: &mut AnchorIds,
    numbers: &mut dyn Numbering,
) -> Mode {
    if stripped.starts_with('*') {
        let (level, text) = count_and_strip(stripped, '*');
        tokens.push(Token::Bullet { html: markdown::render(text), level });
    } else if stripped.starts_with('#') {
        let (level, text) = count_and_strip(stripped, '#');
        let number = numbers.generate(level);
        let anchor = ids.generate(text);
        let indent = "&nbsp;".repeat((number.len() / 2).saturating_sub(1));
        tokens.push(Token::Header {
            // titles are plain text with HTML escaping, never markdown
            html: html_escape::encode_text(text).into_owned(),
            title: text.to_string(),
            level,
            anchor,
            number,
            indent,
        });
    } else if let Some(rest) = stripped.strip_prefix(";!") {
        tokens.push(Token::NoteRawHtml { html: rest.to_string() });
    } else if let Some(rest) = stripped.strip_prefix(';') {
        tokens.push(Token::Note { html: markdown::render(rest) });
    } else if let Some(rest) = stripped.strip_prefix("!!!") {
        tokens.push(Token::RawHtml { html: rest.to_string() });
    } else if stripped.starts_with("!!") {
        return Mode::RawHtml { lines: Vec::new() };
    } else if let Some(rest) = stripped.strip_prefix("```") {
        let hint = rest.trim().to_lowercase();
        return Mode::Code {
            lines: Vec::new(),
            language: if hint.is_empty() { None } else { Some(hint) },
        };
    } else if stripped.trim_end() == "---" {
        tokens.push(Token::Separator);
        *sections += 1;
    } else {
        tokens.push(Token::Default { html: markdown::render(stripped) });
    }
    Mode::Text
}

/// Count the leading repetitions of a single-byte ASCII marker and return
/// the remainder of the line.
fn count_and_strip(text: &str, marker: char) -> (usize, &str) {
    let rest = text.trim_start_matches(marker);
    (text.len() - rest.len(), rest)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::SyntaxTheme;
    use crate::markup::OutlineNumbers;

    fn tokenize_lines(lines: &[&str], limit: Option<usize>, read_more: &str) -> Vec<Token> {
        let lines: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        let mut ids = AnchorIds::default();
        let mut numbers = OutlineNumbers::default();
        let highlighter = Highlighter::new(SyntaxTheme::default());
        tokenize(&lines, limit, read_more, &mut ids, &mut numbers, &highlighter)
            .expect("can tokenize")
    }

    #[test]
    fn classifies_each_marker() {
        let tokens = tokenize_lines(
            &[
                "# Title",
                "* point",
                "; a note",
                ";!<b>raw note</b>",
                "!!!<b>raw line</b>",
                "---",
                "plain text",
            ],
            None,
            "",
        );

        assert!(matches!(&tokens[0], Token::Header { level: 1, .. }));
        assert!(matches!(&tokens[1], Token::Bullet { level: 1, .. }));
        assert!(matches!(&tokens[2], Token::Note { .. }));
        assert_eq!(tokens[3], Token::NoteRawHtml { html: "<b>raw note</b>".to_string() });
        assert_eq!(tokens[4], Token::RawHtml { html: "<b>raw line</b>".to_string() });
        assert_eq!(tokens[5], Token::Separator);
        assert_eq!(tokens[6], Token::Default { html: "<p>plain text</p>".to_string() });
    }

    #[test]
    fn header_carries_anchor_number_and_escaped_title() {
        let tokens = tokenize_lines(&["# Tom & Jerry", "## Tom & Jerry"], None, "");

        match &tokens[0] {
            Token::Header { html, level, anchor, number, indent, .. } => {
                assert_eq!(html, " Tom &amp; Jerry");
                assert_eq!(*level, 1);
                assert_eq!(anchor, "tom-jerry");
                assert_eq!(number, "1 ");
                assert_eq!(indent, "");
            }
            other => panic!("expected header, got {other:?}"),
        }
        match &tokens[1] {
            Token::Header { level, anchor, number, indent, .. } => {
                assert_eq!(*level, 2);
                assert_eq!(anchor, "tom-jerry1");
                assert_eq!(number, "1.1 ");
                assert_eq!(indent, "&nbsp;");
            }
            other => panic!("expected header, got {other:?}"),
        }
    }

    #[test]
    fn nested_bullets_report_their_depth() {
        let tokens = tokenize_lines(&["** deep"], None, "");
        assert!(matches!(&tokens[0], Token::Bullet { level: 2, .. }));
    }

    #[test]
    fn leading_whitespace_is_ignored() {
        let tokens = tokenize_lines(&["   # Indented", "  ---  "], None, "");
        assert!(matches!(&tokens[0], Token::Header { .. }));
        assert_eq!(tokens[1], Token::Separator);
    }

    #[test]
    fn dashes_with_trailing_text_are_not_separators() {
        let tokens = tokenize_lines(&["--- not a separator"], None, "");
        assert!(matches!(&tokens[0], Token::Default { .. }));
    }

    #[test]
    fn raw_html_block_accumulates_until_closed() {
        let tokens = tokenize_lines(
            &["!!", "<div>", "", "  <p>hi</p>", "</div>", "!!", "after"],
            None,
            "",
        );

        // blank lines inside the block are dropped, indentation is stripped
        assert_eq!(
            tokens[0],
            Token::RawHtml { html: "<div>\n<p>hi</p>\n</div>".to_string() }
        );
        assert!(matches!(&tokens[1], Token::Default { .. }));
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn unclosed_raw_html_block_swallows_the_rest() {
        let tokens = tokenize_lines(&["before", "!!", "<div>", "never closed"], None, "");
        assert_eq!(tokens.len(), 1);
        assert!(matches!(&tokens[0], Token::Default { .. }));
    }

    #[test]
    fn code_block_is_highlighted_and_keeps_its_source() {
        let tokens = tokenize_lines(
            &["```python", "def f():", "    return 1", "```"],
            None,
            "",
        );

        match &tokens[0] {
            Token::Code { html, source } => {
                assert_eq!(source, "def f():\n    return 1");
                assert!(html.contains("<pre>"));
            }
            other => panic!("expected code, got {other:?}"),
        }
    }

    #[test]
    fn code_block_preserves_blank_lines_and_indentation() {
        let tokens = tokenize_lines(&["```", "a = 1", "", "    b = 2", "```"], None, "");
        match &tokens[0] {
            Token::Code { source, .. } => assert_eq!(source, "a = 1\n\n    b = 2"),
            other => panic!("expected code, got {other:?}"),
        }
    }

    #[test]
    fn unclosed_code_block_swallows_the_rest() {
        let tokens = tokenize_lines(&["```rust", "fn main() {}"], None, "");
        assert!(tokens.is_empty());
    }

    #[test]
    fn truncation_stops_at_the_section_limit() {
        let tokens = tokenize_lines(
            &[
                "one", "---", "two", "---", "three", "---", "four", "---", "five", "---",
            ],
            Some(2),
            "posts/full.html",
        );

        // two full sections, then the read-more block
        let read_more = Token::RawHtml {
            html: "<a class=\"read-more\" href=\"posts/full.html\">Read More</a>".to_string(),
        };
        assert_eq!(
            tokens,
            vec![
                Token::Default { html: "<p>one</p>".to_string() },
                Token::Separator,
                Token::Default { html: "<p>two</p>".to_string() },
                Token::Separator,
                Token::Separator,
                read_more,
                Token::Separator,
            ]
        );
    }

    #[test]
    fn no_truncation_when_document_ends_at_the_limit() {
        let tokens = tokenize_lines(&["one", "---", "two", "---"], Some(2), "posts/full.html");
        assert_eq!(tokens.len(), 4);
    }
}
