pub mod character;
pub mod genre;
pub mod media;
pub mod movie;

pub use character::{
    CharacterChanges, CharacterDetail, CharacterFilter, CharacterSummary, NewCharacter,
};
pub use genre::{GenreChanges, GenreDetail, GenreFilter, GenreSummary, NewGenre};
pub use media::UploadedImage;
pub use movie::{MovieChanges, MovieDetail, MovieFilter, MovieRef, MovieSummary, NewMovie};

/// Result of a partial update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The row or one of its association sets changed.
    Modified,
    /// Nothing differed from what was stored.
    NotModified,
}

impl UpdateOutcome {
    #[must_use]
    pub const fn from_changed(changed: bool) -> Self {
        if changed {
            Self::Modified
        } else {
            Self::NotModified
        }
    }

    #[must_use]
    pub const fn is_modified(&self) -> bool {
        matches!(self, Self::Modified)
    }
}

/// A committed update, with the image file it displaced.
///
/// `replaced_image` is read inside the update transaction, so it names the
/// file that was referenced right before the new one took its place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowUpdate {
    pub outcome: UpdateOutcome,
    pub replaced_image: Option<String>,
}
