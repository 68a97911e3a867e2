pub mod block_content;
pub mod content;
pub mod content_layout;
