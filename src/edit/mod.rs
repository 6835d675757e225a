//! Interactive refinement of extracted sprites.
//!
//! - **Erase**: brush erasing with stroke-level undo/redo (`erase.rs`, `history.rs`)
//! - **Crop**: draggable, resizable rectangle that cuts a new sprite from the
//!   source image (`crop.rs`)
//! - **Viewport**: display to raster coordinate mapping (`viewport.rs`)

pub mod crop;
pub mod erase;
pub mod history;
pub mod viewport;

pub use crop::{Corner, CropEditor, CropRect, DragMode};
pub use erase::{EditSession, StrokeState};
pub use history::History;
pub use viewport::{DisplayScale, Viewport};
