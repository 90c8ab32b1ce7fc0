//! Stateful anchor-ID and outline-number generation.
//!
//! One instance of each generator is shared across every document in a
//! render target so anchors stay unique and numbering stays continuous
//! across file boundaries. Both are reset between independent output
//! targets (the posts index page and each per-post page).

use std::collections::HashSet;

/// Issues unique, URL-safe anchor IDs from heading text.
#[derive(Debug, Default)]
pub struct AnchorIds {
    issued: HashSet<String>,
}

impl AnchorIds {
    /// Forget every issued ID, starting a fresh run.
    pub fn reset(&mut self) {
        self.issued.clear();
    }

    /// Slug the text and return an ID not yet issued in this run.
    ///
    /// The slug is the lower-cased text with every run of non-alphanumeric
    /// characters collapsed into a single dash and leading/trailing dashes
    /// trimmed. An empty or already-issued slug gets the smallest positive
    /// integer suffix that is still free.
    pub fn generate(&mut self, text: &str) -> String {
        let slug = slugify(text);
        if !slug.is_empty() && !self.issued.contains(&slug) {
            self.issued.insert(slug.clone());
            return slug;
        }

        let mut counter = 1usize;
        loop {
            let candidate = format!("{slug}{counter}");
            if !self.issued.contains(&candidate) {
                self.issued.insert(candidate.clone());
                return candidate;
            }
            counter += 1;
        }
    }
}

fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

/// Hierarchical display numbering for headings.
pub trait Numbering {
    /// Produce the display number for a heading at `level` (1 = top level).
    fn generate(&mut self, level: usize) -> String;

    /// Return to the initial state.
    fn reset(&mut self);
}

/// Conventional dotted outline numbers (`1 `, `1.1 `, `2.3.1 `), rendered
/// with a trailing space.
///
/// Level jumps of more than one are tolerated: the skipped depths get
/// zero-valued counters (level 1 followed directly by level 3 yields
/// `1.0.1 `).
#[derive(Debug)]
pub struct OutlineNumbers {
    prev_level: isize,
    counters: Vec<u64>,
}

impl Default for OutlineNumbers {
    fn default() -> Self {
        OutlineNumbers {
            prev_level: -1,
            counters: Vec::new(),
        }
    }
}

impl Numbering for OutlineNumbers {
    fn generate(&mut self, level: usize) -> String {
        let level = level as isize;
        if level == 1 {
            if self.counters.is_empty() {
                self.counters.push(0);
            } else {
                self.counters.truncate(1);
            }
        } else if self.prev_level < level {
            for _ in 0..(level - self.prev_level) {
                self.counters.push(0);
            }
        } else if self.prev_level > level {
            for _ in 0..(self.prev_level - level) {
                self.counters.pop();
            }
        }

        if let Some(top) = self.counters.last_mut() {
            *top += 1;
        }
        self.prev_level = level;

        let mut number = self
            .counters
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<String>>()
            .join(".");
        number.push(' ');
        number
    }

    fn reset(&mut self) {
        self.prev_level = -1;
        self.counters.clear();
    }
}

/// Numbering disabled: every heading gets the empty string.
#[derive(Debug, Default)]
pub struct NoNumbers;

impl Numbering for NoNumbers {
    fn generate(&mut self, _level: usize) -> String {
        String::new()
    }

    fn reset(&mut self) {}
}
