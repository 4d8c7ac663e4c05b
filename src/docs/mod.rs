pub mod types;

use types::NoteInput;

/// Heading used in the context block for notes without a title.
pub const UNTITLED: &str = "(no title)";

/// A caller-supplied note, with missing fields already defaulted to `""`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    pub title: String,
    pub content: String,
}

impl Document {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// The text that gets embedded: title and content separated by a blank line, trimmed.
    pub fn text(&self) -> String {
        format!("{}\n\n{}", self.title, self.content)
            .trim()
            .to_string()
    }

    /// Title to show in the context block.
    pub fn heading(&self) -> &str {
        if self.title.is_empty() {
            UNTITLED
        } else {
            &self.title
        }
    }
}

impl From<NoteInput> for Document {
    fn from(note: NoteInput) -> Self {
        Self {
            title: note.title.unwrap_or_default(),
            content: note.content.unwrap_or_default(),
        }
    }
}
