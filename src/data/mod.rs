pub mod app_settings;
pub mod note_index;
pub mod persistence;
pub mod todo;

pub use app_settings::{AppSettings, ChatSettings, Phrase, SpeechSettings};
pub use note_index::{date_key, NoteIndex};
pub use todo::{TodoId, TodoList};
