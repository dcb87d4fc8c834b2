//! Bankrot Telegram presentation layer
//!
//! Long-polling front-end for the bankruptcy-filing pipeline: receives
//! updates from the Bot API, routes commands, documents and photos to the
//! intake service, and delivers the rendered filing back to the chat.

pub mod handlers;
pub mod tasks;

pub use handlers::handle_update;
pub use tasks::spawn_update_polling_task;
