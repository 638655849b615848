//! Domain primitives shared by the store, services and HTTP layers.

pub mod error;

pub use error::CatalogError;

use std::fmt;

/// The kinds of catalog entity that can be stored, linked and illustrated.
///
/// Used to name entities in error messages, to pick the table an
/// association points at, and to pick the directory an image lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Movie,
    Character,
    Genre,
}

impl EntityKind {
    /// Lower-case singular name, as used in "ID does not belong to existing movie".
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Character => "character",
            Self::Genre => "genre",
        }
    }

    /// Capitalized singular name, as used in "Movie created".
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Movie => "Movie",
            Self::Character => "Character",
            Self::Genre => "Genre",
        }
    }

    /// Directory under the uploads root holding this kind's images.
    #[must_use]
    pub const fn upload_dir(&self) -> &'static str {
        match self {
            Self::Movie => "movies",
            Self::Character => "characters",
            Self::Genre => "genres",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort order for date-ordered listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Parses the `order` query parameter. Only `DESC` (any case) selects
    /// descending order; anything else keeps the ascending default.
    #[must_use]
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("desc") => Self::Descending,
            _ => Self::Ascending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_kind_names() {
        assert_eq!(EntityKind::Movie.to_string(), "movie");
        assert_eq!(EntityKind::Character.title(), "Character");
        assert_eq!(EntityKind::Genre.upload_dir(), "genres");
    }

    #[test]
    fn sort_order_from_param() {
        assert_eq!(SortOrder::from_param(None), SortOrder::Ascending);
        assert_eq!(SortOrder::from_param(Some("ASC")), SortOrder::Ascending);
        assert_eq!(SortOrder::from_param(Some("DESC")), SortOrder::Descending);
        assert_eq!(SortOrder::from_param(Some("desc")), SortOrder::Descending);
        assert_eq!(SortOrder::from_param(Some("sideways")), SortOrder::Ascending);
    }
}
