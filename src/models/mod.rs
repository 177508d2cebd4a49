mod clock;
mod errors;
mod grouping;
mod note;
mod note_store;
mod theme;

pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::NoteStoreError;
pub use grouping::{Bucket, BucketLabel, NoteGroups, format_date, group_notes};
pub use note::{Note, NoteId, PREVIEW_GRAPHEMES};
pub use note_store::{Draft, Mode, NoteStore};
pub use theme::Theme;
