pub mod content_view;
pub mod layout_editor;
