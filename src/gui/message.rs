use crate::core::input::{Key, Point};
use crate::core::page::PageEvent;

#[derive(Debug, Clone)]
pub enum Message {
    /// Forwarded to the page as-is.
    Page(PageEvent),
    Frame,
    Resized { width: f32, height: f32 },
    Scrolled(f32),
    KeyPressed(Key),
    CursorMoved(Point),
    /// A press no widget captured.
    PointerPressed,
    /// Swallowed input, e.g. a press on the dialog panel above its backdrop.
    None,
}
