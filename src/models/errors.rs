use thiserror::Error;

use crate::models::NoteId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NoteStoreError {
    #[error("note {0} does not exist")]
    NotFound(NoteId),

    #[error("no note is being created or edited")]
    NotEditing,
}
