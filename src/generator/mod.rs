pub mod passage;

/// Supplies reference texts for new sessions and challenge passages.
pub trait TextSource {
    fn next_text(&mut self) -> String;
}

/// Collapse every whitespace run (newlines and tabs included) into one
/// space and trim the ends. Only keys the session screen can type survive.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Serves the same text every time (`--text` on the command line).
#[derive(Clone, Debug)]
pub struct RepeatText {
    text: String,
}

impl RepeatText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: collapse_whitespace(&text.into()),
        }
    }
}

impl TextSource for RepeatText {
    fn next_text(&mut self) -> String {
        self.text.clone()
    }
}
