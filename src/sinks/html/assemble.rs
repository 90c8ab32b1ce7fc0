//! Token-stream to cell assembly.
//!
//! Folds the ordered token streams of a document set into content/note
//! cells, flattening nested bullet runs into HTML lists and collecting the
//! table of contents along the way. Like the tokenizer, this never rejects
//! input: badly nested bullets just produce visually odd lists.

use crate::highlight::Highlighter;
use crate::markup::{AnchorIds, Numbering, Token};
use crate::source::Document;
use anyhow::Result;

/// Longest outline number (with its trailing space) still listed in the
/// table of contents; deeper numbers render in content but would bloat the
/// TOC column.
const TOC_NUMBER_MAX_WIDTH: usize = 9;

/// One rendered content/note pair, the atomic unit written to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub content: String,
    pub note: String,
}

/// A table-of-contents line for one qualifying header, in encounter order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub anchor: String,
    /// HTML-escaped heading text.
    pub title: String,
    /// Visual indent derived from the outline number's width.
    pub indent: String,
}

impl TocEntry {
    fn to_html(&self) -> String {
        format!(
            "<div class=\"toc-item\"><a href=\"#{}\">{}{}</a></div>",
            self.anchor, self.indent, self.title
        )
    }
}

/// The result of assembling one document set.
pub struct Assembly {
    pub cells: Vec<Cell>,
    pub toc: String,
}

/// Assemble the documents' token streams into cells and a TOC.
///
/// Every document ends in a synthetic separator so trailing content always
/// flushes into a cell; between documents an `<hr />` is pushed into both
/// columns so visually distinct documents stay separated even when the
/// author omits a closing separator.
pub fn assemble(
    documents: &[Document],
    ids: &mut AnchorIds,
    numbers: &mut dyn Numbering,
    highlighter: &Highlighter,
    all_headers: bool,
    include_meta: bool,
) -> Result<Assembly> {
    let mut assembler = Assembler::new(all_headers);

    for (i, document) in documents.iter().enumerate() {
        assembler.awaiting_first_header = include_meta;
        for token in document.tokenize(ids, numbers, highlighter)? {
            assembler.token(token, document);
        }
        if i + 1 < documents.len() {
            assembler.token(Token::RawHtml { html: "<hr />".to_string() }, document);
            assembler.token(Token::NoteRawHtml { html: "<hr />".to_string() }, document);
        }
        assembler.token(Token::Separator, document);
    }

    Ok(assembler.finish())
}

struct Assembler {
    all_headers: bool,
    awaiting_first_header: bool,
    cells: Vec<Cell>,
    content: Vec<String>,
    note: Vec<String>,
    toc: Vec<TocEntry>,
    /// Level of the previous bullet while a list is open.
    bullet: Option<usize>,
}

impl Assembler {
    fn new(all_headers: bool) -> Assembler {
        Assembler {
            all_headers,
            awaiting_first_header: false,
            cells: Vec::new(),
            content: Vec::new(),
            note: Vec::new(),
            toc: Vec::new(),
            bullet: None,
        }
    }

    fn token(&mut self, token: Token, document: &Document) {
        if let Token::Bullet { html, level } = token {
            self.bullet_item(html, level);
            return;
        }

        // any non-bullet token ends an open list
        if self.bullet.take().is_some() {
            self.content.push("</li></ul>".to_string());
        }

        match token {
            Token::Note { html } | Token::NoteRawHtml { html } => self.note.push(html),
            Token::RawHtml { html } | Token::Code { html, .. } => self.content.push(html),
            Token::Default { html } => self.content.push(html),
            Token::Header { html, level, anchor, number, indent, .. } => {
                self.header(html, level, anchor, number, indent, document);
            }
            Token::Separator => self.flush(),
            Token::Bullet { .. } => {}
        }
    }

    /// Append one list item, opening or closing lists as the nesting level
    /// moves. Only one level is ever closed at a time, so a level jump
    /// downwards of more than one leaves the outer list open; that matches
    /// the permissive handling of badly nested input.
    fn bullet_item(&mut self, html: String, level: usize) {
        match self.bullet {
            None => self.content.push("<ul>".to_string()),
            Some(prev) if prev > level => self.content.push("</ul>".to_string()),
            Some(prev) if prev < level => self.content.push("<ul>".to_string()),
            Some(_) => self.content.push("</li>".to_string()),
        }
        self.content.push(format!("<li>{html}"));
        self.bullet = Some(level);
    }

    fn header(
        &mut self,
        html: String,
        level: usize,
        anchor: String,
        number: String,
        indent: String,
        document: &Document,
    ) {
        if (self.all_headers || level == 1) && number.len() <= TOC_NUMBER_MAX_WIDTH {
            self.toc.push(TocEntry {
                anchor: anchor.clone(),
                title: html.clone(),
                indent,
            });
        }

        self.content.push(format!(
            "<h{heading} id=\"{anchor}\">{number}{html}</h{heading}>",
            heading = level + 1
        ));

        if self.awaiting_first_header {
            let (created, modified) = document.created_modified();
            self.content.push(format!(
                "<span class=\"timestamp\">Created {created}, Last Updated {modified}</span>"
            ));
        }
        self.awaiting_first_header = false;
    }

    /// Close the current cell. Separators with nothing accumulated (for
    /// example the leading one synthesized in markdown mode) produce no
    /// cell, so a separator-wrapped prose file stays a single cell.
    fn flush(&mut self) {
        if self.content.is_empty() && self.note.is_empty() {
            return;
        }
        self.cells.push(Cell {
            content: self.content.join("\n"),
            note: self.note.join("\n"),
        });
        self.content.clear();
        self.note.clear();
    }

    fn finish(self) -> Assembly {
        let toc = self
            .toc
            .iter()
            .map(TocEntry::to_html)
            .collect::<Vec<String>>()
            .join("\n");
        Assembly { cells: self.cells, toc }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::SyntaxTheme;
    use crate::markup::{NoNumbers, OutlineNumbers};
    use crate::source::history;

    fn assemble_text(text: &str, all_headers: bool, include_meta: bool) -> Assembly {
        assemble_documents(&[Document::from_text(text, false)], all_headers, include_meta)
    }

    fn assemble_documents(
        documents: &[Document],
        all_headers: bool,
        include_meta: bool,
    ) -> Assembly {
        let mut ids = AnchorIds::default();
        let mut numbers = OutlineNumbers::default();
        let highlighter = Highlighter::new(SyntaxTheme::default());
        assemble(
            documents,
            &mut ids,
            &mut numbers,
            &highlighter,
            all_headers,
            include_meta,
        )
        .expect("can assemble")
    }

    #[test]
    fn nested_bullets_flatten_into_nested_lists() {
        let assembly = assemble_text("* a\n* b\n** c\n** d\n* e", false, false);

        assert_eq!(assembly.cells.len(), 1);
        assert_eq!(
            assembly.cells[0].content,
            "<ul>\n<li><p>a</p>\n</li>\n<li><p>b</p>\n<ul>\n<li><p>c</p>\n</li>\n<li><p>d</p>\n</ul>\n<li><p>e</p>\n</li></ul>"
        );
    }

    #[test]
    fn one_separator_with_content_on_both_sides_makes_two_cells() {
        let assembly = assemble_text("first\n---\nsecond", false, false);
        assert_eq!(assembly.cells.len(), 2);
        assert_eq!(assembly.cells[0].content, "<p>first</p>");
        assert_eq!(assembly.cells[1].content, "<p>second</p>");
    }

    #[test]
    fn zero_separators_make_one_cell_with_all_content() {
        let assembly = assemble_text("first\nsecond", false, false);
        assert_eq!(assembly.cells.len(), 1);
        assert_eq!(assembly.cells[0].content, "<p>first</p>\n<p>second</p>");
    }

    #[test]
    fn markdown_mode_prose_makes_exactly_one_cell() {
        let documents = [Document::from_text("prose without separators", true)];
        let assembly = assemble_documents(&documents, false, false);
        assert_eq!(assembly.cells.len(), 1);
    }

    #[test]
    fn notes_land_in_the_note_column() {
        let assembly = assemble_text("content\n; a note\n;!<em>raw</em>", false, false);
        assert_eq!(assembly.cells.len(), 1);
        assert_eq!(assembly.cells[0].content, "<p>content</p>");
        assert_eq!(assembly.cells[0].note, "<p>a note</p>\n<em>raw</em>");
    }

    #[test]
    fn headers_render_one_level_down_with_anchor_and_number() {
        // the marker strip keeps the title's leading space, as the number's
        // own trailing space does
        let assembly = assemble_text("# One", false, false);
        assert_eq!(assembly.cells[0].content, "<h2 id=\"one\">1  One</h2>");
    }

    #[test]
    fn only_top_level_headers_reach_the_toc_by_default() {
        let assembly = assemble_text("# One\n## Two\n# Three", false, false);
        assert!(assembly.toc.contains("#one"));
        assert!(!assembly.toc.contains("#two"));
        assert!(assembly.toc.contains("#three"));
    }

    #[test]
    fn all_headers_mode_includes_deeper_levels() {
        let assembly = assemble_text("# One\n## Two", true, false);
        assert!(assembly.toc.contains("#one"));
        assert!(assembly.toc.contains("#two"));
    }

    #[test]
    fn too_wide_numbers_stay_out_of_the_toc_but_render_in_content() {
        // number "1.1.1.1.1 " is 10 characters, over the display width cap
        let assembly = assemble_text("# a\n## b\n### c\n#### d\n##### e", true, false);
        let toc_lines = assembly.toc.lines().count();
        assert_eq!(toc_lines, 4);
        assert!(assembly.cells[0].content.contains("1.1.1.1.1"));
    }

    #[test]
    fn toc_preserves_encounter_order() {
        let assembly = assemble_text("# Zebra\n# Apple", false, false);
        let zebra = assembly.toc.find("#zebra").expect("zebra in toc");
        let apple = assembly.toc.find("#apple").expect("apple in toc");
        assert!(zebra < apple);
    }

    #[test]
    fn documents_are_separated_by_horizontal_rules() {
        let documents = [
            Document::from_text("first doc", false),
            Document::from_text("second doc", false),
        ];
        let assembly = assemble_documents(&documents, false, false);

        assert_eq!(assembly.cells.len(), 2);
        assert!(assembly.cells[0].content.ends_with("<hr />"));
        assert_eq!(assembly.cells[0].note, "<hr />");
        assert!(!assembly.cells[1].content.contains("<hr />"));
    }

    #[test]
    fn first_header_of_a_document_gets_a_timestamp_line() {
        let assembly = assemble_text("# One\n# Two", false, true);
        let content = &assembly.cells[0].content;
        let today = history::today();

        assert_eq!(content.matches("class=\"timestamp\"").count(), 1);
        assert!(content.contains(&format!("Created {today}, Last Updated {today}")));
        // the timestamp follows the first header, not the second
        let stamp = content.find("timestamp").expect("timestamp present");
        let second = content.find("id=\"two\"").expect("second header present");
        assert!(stamp < second);
    }

    #[test]
    fn timestamps_can_be_suppressed() {
        let assembly = assemble_text("# One", false, false);
        assert!(!assembly.cells[0].content.contains("timestamp"));
    }

    #[test]
    fn numbering_can_be_disabled() {
        let documents = [Document::from_text("# One", false)];
        let mut ids = AnchorIds::default();
        let mut numbers = NoNumbers;
        let highlighter = Highlighter::new(SyntaxTheme::default());
        let assembly = assemble(&documents, &mut ids, &mut numbers, &highlighter, false, false)
            .expect("can assemble");
        assert_eq!(assembly.cells[0].content, "<h2 id=\"one\"> One</h2>");
    }

    #[test]
    fn anchors_stay_unique_across_documents() {
        let documents = [
            Document::from_text("# Intro", false),
            Document::from_text("# Intro", false),
        ];
        let assembly = assemble_documents(&documents, false, false);
        assert!(assembly.cells[0].content.contains("id=\"intro\""));
        assert!(assembly.cells[1].content.contains("id=\"intro1\""));
    }
}
