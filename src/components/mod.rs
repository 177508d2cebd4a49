mod note_app;
mod palette;
mod text_field;

pub use note_app::NoteApp;
pub use palette::Palette;
pub use text_field::TextField;
