pub mod config;
pub mod core;
pub mod error;
pub mod models;

pub use config::FolioConfig;
pub use core::content::ContentStore;
pub use core::page::{Effect, Page, PageEvent};
pub use error::{Error, Result};

#[cfg(feature = "gui")]
pub mod gui;
