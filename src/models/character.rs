use sea_orm::FromQueryResult;
use serde::Serialize;

use super::MovieRef;

/// Row shape returned by `GET /characters`, also embedded in movie details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct CharacterSummary {
    pub id: i32,
    pub image: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterDetail {
    pub id: i32,
    pub image: Option<String>,
    pub name: String,
    pub age: i32,
    pub weight: f64,
    pub story: Option<String>,
    pub movies: Vec<MovieRef>,
}

#[derive(Debug, Clone, Default)]
pub struct CharacterFilter {
    pub name: Option<String>,
    pub age: Option<i32>,
    /// Keep characters linked to any of these movies. Empty means no filter.
    pub movies: Vec<i32>,
}

#[derive(Debug, Clone)]
pub struct NewCharacter {
    pub name: String,
    pub age: i32,
    pub weight: f64,
    pub story: Option<String>,
    pub movies: Option<Vec<i32>>,
}

#[derive(Debug, Clone, Default)]
pub struct CharacterChanges {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub weight: Option<f64>,
    pub story: Option<String>,
    pub movies: Option<Vec<i32>>,
}
