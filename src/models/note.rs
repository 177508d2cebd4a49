use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

pub type NoteId = u64;

pub const PREVIEW_GRAPHEMES: usize = 50;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub date: NaiveDate,
}

impl Note {
    pub fn new(id: NoteId, title: String, content: String, date: NaiveDate) -> Self {
        Self {
            id,
            title,
            content,
            date,
        }
    }

    /// Collapsed form of the content shown on a note card: the first
    /// `max_graphemes` grapheme clusters, with `...` appended when cut.
    pub fn preview(&self, max_graphemes: usize) -> String {
        let mut graphemes = self.content.graphemes(true);
        let head: String = graphemes.by_ref().take(max_graphemes).collect();

        if graphemes.next().is_some() {
            head + "..."
        } else {
            head
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note_with(content: &str) -> Note {
        Note::new(
            1,
            "t".into(),
            content.into(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        )
    }

    #[test]
    fn short_content_is_not_truncated() {
        let note = note_with("groceries");
        assert_eq!(note.preview(PREVIEW_GRAPHEMES), "groceries");
    }

    #[test]
    fn content_at_limit_has_no_ellipsis() {
        let content = "x".repeat(PREVIEW_GRAPHEMES);
        assert_eq!(note_with(&content).preview(PREVIEW_GRAPHEMES), content);
    }

    #[test]
    fn long_content_is_cut_with_ellipsis() {
        let content = "y".repeat(PREVIEW_GRAPHEMES + 7);
        let preview = note_with(&content).preview(PREVIEW_GRAPHEMES);
        assert_eq!(preview, format!("{}...", "y".repeat(PREVIEW_GRAPHEMES)));
    }

    #[test]
    fn preview_counts_graphemes_not_bytes() {
        let note = note_with("Hôm nay trời đẹp");
        assert_eq!(note.preview(3), "Hôm...");
    }

    #[test]
    fn empty_content_previews_empty() {
        assert_eq!(note_with("").preview(PREVIEW_GRAPHEMES), "");
    }
}
