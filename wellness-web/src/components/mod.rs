pub mod chat_panel;
pub mod footer;
pub mod guess_form;
pub mod header;
pub mod mood_tracker;
pub mod notices;
pub mod story_view;
