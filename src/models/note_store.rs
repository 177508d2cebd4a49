use tracing::{debug, info, warn};

use crate::models::{Clock, Note, NoteId, NoteStoreError, SystemClock};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub content: String,
    /// `None` while creating, the edited note's id otherwise.
    pub target: Option<NoteId>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Browsing,
    Editing,
}

/// In-memory owner of the note collection and the single active draft.
pub struct NoteStore<C = SystemClock> {
    notes: Vec<Note>,
    draft: Draft,
    mode: Mode,
    last_id: NoteId,
    clock: C,
}

impl NoteStore<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for NoteStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> NoteStore<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            notes: Vec::new(),
            draft: Draft::default(),
            mode: Mode::Browsing,
            last_id: 0,
            clock,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == Mode::Editing
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn start_create(&mut self) {
        debug!("Opening input view for a new note");
        self.draft = Draft::default();
        self.mode = Mode::Editing;
    }

    pub fn start_edit(&mut self, id: NoteId) -> Result<(), NoteStoreError> {
        let Some(note) = self.get(id) else {
            warn!("Cannot edit note {}: not found", id);
            return Err(NoteStoreError::NotFound(id));
        };

        self.draft = Draft {
            title: note.title.clone(),
            content: note.content.clone(),
            target: Some(id),
        };
        self.mode = Mode::Editing;
        debug!("Opening input view for note {}", id);

        Ok(())
    }

    pub fn update_draft_title(&mut self, text: impl Into<String>) {
        self.draft.title = text.into();
    }

    pub fn update_draft_content(&mut self, text: impl Into<String>) {
        self.draft.content = text.into();
    }

    /// Commits the draft and returns to browsing.
    ///
    /// A new note gets the next id and today's date. An edit replaces title
    /// and content in place; if its target has been deleted meanwhile the
    /// draft is dropped and `NotFound` is returned.
    pub fn save(&mut self) -> Result<NoteId, NoteStoreError> {
        if self.mode != Mode::Editing {
            return Err(NoteStoreError::NotEditing);
        }

        let draft = std::mem::take(&mut self.draft);
        self.mode = Mode::Browsing;

        match draft.target {
            None => {
                let id = self.next_id();
                let date = self.clock.today();
                self.notes
                    .push(Note::new(id, draft.title, draft.content, date));
                info!("Created note {} dated {}", id, date);
                Ok(id)
            }
            Some(id) => match self.notes.iter_mut().find(|note| note.id == id) {
                Some(note) => {
                    note.title = draft.title;
                    note.content = draft.content;
                    info!("Updated note {}", id);
                    Ok(id)
                }
                None => {
                    warn!("Discarding edit of note {}: it was deleted", id);
                    Err(NoteStoreError::NotFound(id))
                }
            },
        }
    }

    pub fn cancel(&mut self) {
        debug!("Discarding draft");
        self.draft = Draft::default();
        self.mode = Mode::Browsing;
    }

    pub fn delete(&mut self, id: NoteId) {
        let before = self.notes.len();
        self.notes.retain(|note| note.id != id);

        if self.notes.len() < before {
            info!("Deleted note {}", id);
        } else {
            debug!("Delete of note {} ignored: not present", id);
        }
    }

    pub fn all_notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    // Tracks the highest id ever handed out so deleting the newest note
    // does not free its id.
    fn next_id(&mut self) -> NoteId {
        let current_max = self.notes.iter().map(|note| note.id).max().unwrap_or(0);
        self.last_id = self.last_id.max(current_max) + 1;
        self.last_id
    }
}
