/// One classified unit of markup input.
///
/// Tokens are produced in document order by the tokenizer and consumed
/// exactly once, in that order, by the HTML cell assembler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Verbatim HTML destined for the content column.
    RawHtml { html: String },

    /// A section heading, carrying its generated anchor ID, outline number,
    /// and the visual indent derived from the number's width.
    Header {
        /// HTML-escaped (never markdown-rendered) heading text.
        html: String,
        /// The unescaped heading text.
        title: String,
        /// Heading depth, 1 = top level.
        level: usize,
        anchor: String,
        number: String,
        indent: String,
    },

    /// A bullet point; `level` is the nesting depth (`*` is 1, `**` is 2).
    Bullet { html: String, level: usize },

    /// A `---` line; ends the current cell.
    Separator,

    /// Markdown-rendered text for the note column.
    Note { html: String },

    /// Verbatim HTML for the note column.
    NoteRawHtml { html: String },

    /// A fenced code block. `html` is the highlighted markup, `source` keeps
    /// the unhighlighted text.
    Code { html: String, source: String },

    /// Any other line, markdown-rendered.
    Default { html: String },
}
