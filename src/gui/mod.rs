mod app;
mod message;
mod sections;
mod widgets;

pub use app::{FolioApp, run};
pub use message::Message;
