//! Syntax highlighting for fenced code blocks.
//!
//! Uses syntect's bundled syntax definitions with class-based HTML output.
//! The CSS matching the configured theme is generated once per page and
//! substituted for the `$STYLES$` template placeholder, so the emitted
//! markup stays free of inline colours.

use crate::config::SyntaxTheme;
use anyhow::{anyhow, Context, Result};
use syntect::highlighting::ThemeSet;
use syntect::html::{css_for_theme_with_class_style, ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

const CLASS_STYLE: ClassStyle = ClassStyle::Spaced;

/// Owns the loaded syntax and theme sets for one conversion run.
pub struct Highlighter {
    syntaxes: SyntaxSet,
    themes: ThemeSet,
    theme: SyntaxTheme,
}

impl Highlighter {
    pub fn new(theme: SyntaxTheme) -> Highlighter {
        Highlighter {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            themes: ThemeSet::load_defaults(),
            theme,
        }
    }

    /// Highlight a fenced code block.
    ///
    /// `hint` comes from the fence line. An unknown hint falls back to
    /// first-line detection, then to plain text; highlighting never fails
    /// because of an unrecognized language.
    pub fn highlight(&self, code: &str, hint: &str) -> Result<String> {
        let syntax = self
            .syntaxes
            .find_syntax_by_token(hint)
            .or_else(|| self.syntaxes.find_syntax_by_first_line(code))
            .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text());

        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntaxes, CLASS_STYLE);
        for line in LinesWithEndings::from(code) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .with_context(|| format!("Failed to highlight code as {}", syntax.name))?;
        }

        Ok(format!(
            "<div class=\"highlight\"><pre>{}</pre></div>",
            generator.finalize()
        ))
    }

    /// CSS rules for the configured theme, substituted for `$STYLES$`.
    pub fn style_defs(&self) -> Result<String> {
        let theme = self.themes.themes.get(self.theme.key()).ok_or_else(|| {
            anyhow!(
                "Theme `{}` is missing from the bundled theme set",
                self.theme.key()
            )
        })?;
        css_for_theme_with_class_style(theme, CLASS_STYLE)
            .with_context(|| format!("Failed to generate CSS for theme `{}`", self.theme.key()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn can_highlight_with_explicit_language() {
        let highlighter = Highlighter::new(SyntaxTheme::default());
        let html = highlighter
            .highlight("print('hi')", "python")
            .expect("can highlight python");
        assert!(html.starts_with("<div class=\"highlight\"><pre>"));
        assert!(html.contains("<span"));
    }

    #[test]
    fn unknown_language_still_produces_markup() {
        let highlighter = Highlighter::new(SyntaxTheme::default());
        let html = highlighter
            .highlight("whatever text", "no-such-language")
            .expect("can fall back to plain text");
        assert!(html.contains("whatever text"));
    }

    #[test]
    fn escapes_code_content() {
        let highlighter = Highlighter::new(SyntaxTheme::default());
        let html = highlighter
            .highlight("a < b && c > d", "no-such-language")
            .expect("can highlight");
        assert!(html.contains("&lt;"));
        assert!(!html.contains("a < b"));
    }

    #[test]
    fn can_generate_theme_css() {
        let highlighter = Highlighter::new(SyntaxTheme::default());
        let css = highlighter.style_defs().expect("can generate css");
        assert!(!css.is_empty());
    }
}
