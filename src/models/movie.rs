use chrono::NaiveDate;
use sea_orm::FromQueryResult;
use serde::Serialize;

use super::{CharacterSummary, GenreSummary};
use crate::domain::SortOrder;

/// Row shape returned by `GET /movies`.
#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult)]
pub struct MovieSummary {
    pub id: i32,
    pub image: Option<String>,
    pub title: String,
    pub creation: NaiveDate,
}

/// Movie as embedded in character and genre details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct MovieRef {
    pub id: i32,
    pub image: Option<String>,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieDetail {
    pub id: i32,
    pub image: Option<String>,
    pub title: String,
    pub creation: NaiveDate,
    pub score: Option<f64>,
    pub characters: Vec<CharacterSummary>,
    pub genres: Vec<GenreSummary>,
}

#[derive(Debug, Clone, Default)]
pub struct MovieFilter {
    pub title: Option<String>,
    pub genre: Option<i32>,
    pub order: SortOrder,
}

#[derive(Debug, Clone)]
pub struct NewMovie {
    pub title: String,
    pub creation: NaiveDate,
    pub score: Option<f64>,
    pub characters: Option<Vec<i32>>,
    pub genres: Option<Vec<i32>>,
}

/// Fields of a partial movie update; `None` leaves the stored value alone.
#[derive(Debug, Clone, Default)]
pub struct MovieChanges {
    pub title: Option<String>,
    pub creation: Option<NaiveDate>,
    pub score: Option<f64>,
    pub characters: Option<Vec<i32>>,
    pub genres: Option<Vec<i32>>,
}
