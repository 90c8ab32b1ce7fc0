//! Inline markdown rendering for markup lines.
//!
//! Bullet, note, and default lines are treated as markdown; heading titles
//! are HTML-escaped instead and never pass through here.

use pulldown_cmark::{html::push_html, Options, Parser};

/// Render one line (or short block) of markdown to HTML.
pub fn render(text: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let mut html = String::new();
    push_html(&mut html, Parser::new_ext(text, options));
    html.trim_end().to_string()
}
