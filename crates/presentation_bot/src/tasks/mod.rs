//! Background tasks for the bot presentation layer

mod update_polling;

pub use update_polling::spawn_update_polling_task;
