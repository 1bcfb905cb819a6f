//! Headless interaction core. No toolkit types cross this boundary: every
//! component consumes plain events stamped with an [`std::time::Instant`].

pub mod ambient;
pub mod boundary;
pub mod case_study;
pub mod contact;
pub mod content;
pub mod drawer;
pub mod dropdown;
pub mod focus;
pub mod header;
pub mod input;
pub mod links;
pub mod modal;
pub mod page;
pub mod reveal;
pub mod scroll_lock;
