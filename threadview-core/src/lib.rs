pub mod archive;
pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod page;
pub mod render;
pub mod table;

pub use archive::{load_archive, parse_archive, read_archive_raw};
pub use config::ViewerConfig;
pub use error::{Result, ThreadviewError};
pub use format::{PIPELINE, Stage, escape_html, format_content};
pub use model::{
    Archive, Message, Node, RenderUnit, RenderWindow, RenderedLine, Thread, UNKNOWN_ROLE,
    USER_ROLE,
};
pub use page::{NO_MESSAGES_PLACEHOLDER, render_document, render_unit_html, render_window_html};
pub use render::{Windows, render_window, render_window_to_raw_json, render_windows_to_raw_json};
pub use table::{Table, looks_like_table};
