use sea_orm::FromQueryResult;
use serde::Serialize;

use super::MovieRef;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct GenreSummary {
    pub id: i32,
    pub image: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreDetail {
    pub id: i32,
    pub image: Option<String>,
    pub name: String,
    pub movies: Vec<MovieRef>,
}

#[derive(Debug, Clone, Default)]
pub struct GenreFilter {
    pub name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewGenre {
    pub name: String,
    pub movies: Option<Vec<i32>>,
}

#[derive(Debug, Clone, Default)]
pub struct GenreChanges {
    pub name: Option<String>,
    pub movies: Option<Vec<i32>>,
}
