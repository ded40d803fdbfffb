//! In-memory photo booth session: captured photos, the overlay being edited,
//! the photos picked for a collage, and the collage presets on offer.
//!
//! Nothing here is persisted. Render calls receive snapshots of this state
//! and never hold on to it.

pub mod editor;
pub mod emoji;
pub mod gallery;
pub mod presets;
pub mod selection;


pub use editor::{OverlayEditor, OverlayPatch};
pub use emoji::EmojiSet;
pub use gallery::{Photo, PhotoGallery};
pub use presets::{CellAspect, CollagePreset, PRESETS};
pub use selection::CollageSelection;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Unknown photo: {0}")]
    UnknownPhoto(String),

    #[error("Unknown overlay: {0}")]
    UnknownOverlay(String),

    #[error("Nothing selected")]
    NoSelection,
}

pub type Result<T> = std::result::Result<T, SessionError>;
