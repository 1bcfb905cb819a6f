mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from folio for tests
pub use folio::config::{AmbientConfig, FolioConfig};
pub use folio::core::ambient::MotionPreference;
pub use folio::core::boundary::GraphicsSupport;
pub use folio::core::contact::ContactField;
pub use folio::core::content::ContentStore;
pub use folio::core::input::{Key, Point, Rect};
pub use folio::core::links::DeepLink;
pub use folio::core::page::{DiePointer, Effect, Page, PageEvent};
pub use folio::models::{Anchor, ProjectId, SectionId};
