//! Turns loosely typed request bodies and query strings into typed requests.
//!
//! Bodies arrive as a map of JSON values: multipart text parts become
//! strings, JSON bodies keep their own types. [`FieldReader`] coerces each
//! field and records a [`FieldIssue`] for anything it cannot read; range and
//! length rules are then checked by `validator` on the typed request.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use chrono::{DateTime, NaiveDate};
use serde::Serialize;
use serde_json::{Map, Value};
use validator::{Validate, ValidationErrors};

use super::ApiError;
use crate::domain::SortOrder;
use crate::models::{
    CharacterChanges, CharacterFilter, GenreChanges, GenreFilter, MovieChanges, MovieFilter,
    NewCharacter, NewGenre, NewMovie,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    pub fn invalid(field: &str) -> Self {
        Self {
            field: field.to_string(),
            message: format!("Field {field} is invalid"),
        }
    }

    pub fn not_id_list(field: &str) -> Self {
        Self {
            field: field.to_string(),
            message: format!("Field {field} must be an array of int"),
        }
    }
}

/// The numeric `{id}` segment of an entity route.
///
/// Anything that does not parse as an `i32` is rejected with the usual
/// response envelope rather than axum's plain-text rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityId(pub i32);

impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<i32>::from_request_parts(parts, state)
            .await
            .map(|Path(id)| Self(id))
            .map_err(|_| ApiError::bad_request(FieldIssue::invalid("id").message))
    }
}

/// Reads typed values out of a body map, collecting one issue per bad field.
pub struct FieldReader<'a> {
    values: &'a Map<String, Value>,
    issues: Vec<FieldIssue>,
}

impl<'a> FieldReader<'a> {
    pub const fn new(values: &'a Map<String, Value>) -> Self {
        Self {
            values,
            issues: Vec::new(),
        }
    }

    fn present(&self, field: &str) -> Option<&'a Value> {
        self.values.get(field).filter(|v| !v.is_null())
    }

    fn reject(&mut self, issue: FieldIssue) {
        if !self.issues.iter().any(|i| i.field == issue.field) {
            self.issues.push(issue);
        }
    }

    pub fn text(&mut self, field: &str) -> Option<String> {
        match self.present(field)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => {
                self.reject(FieldIssue::invalid(field));
                None
            }
        }
    }

    pub fn int(&mut self, field: &str) -> Option<i32> {
        let parsed = match self.present(field)? {
            Value::String(s) => s.trim().parse::<i32>().ok(),
            Value::Number(n) => n.as_i64().and_then(|v| i32::try_from(v).ok()),
            _ => None,
        };
        if parsed.is_none() {
            self.reject(FieldIssue::invalid(field));
        }
        parsed
    }

    pub fn float(&mut self, field: &str) -> Option<f64> {
        let parsed = match self.present(field)? {
            Value::String(s) => s.trim().parse::<f64>().ok(),
            Value::Number(n) => n.as_f64(),
            _ => None,
        }
        .filter(|v| v.is_finite());
        if parsed.is_none() {
            self.reject(FieldIssue::invalid(field));
        }
        parsed
    }

    pub fn date(&mut self, field: &str) -> Option<NaiveDate> {
        let parsed = match self.present(field)? {
            Value::String(s) => parse_date(s.trim()),
            _ => None,
        };
        if parsed.is_none() {
            self.reject(FieldIssue::invalid(field));
        }
        parsed
    }

    /// An id list may be a JSON array, a JSON-encoded array string, or a
    /// list of repeated multipart parts.
    pub fn id_list(&mut self, field: &str) -> Option<Vec<i32>> {
        let parsed = match self.present(field)? {
            // A lone multipart part carries a single id.
            Value::String(s) => match serde_json::from_str::<Value>(s) {
                Ok(Value::Number(n)) => n
                    .as_i64()
                    .and_then(|v| i32::try_from(v).ok())
                    .map(|v| vec![v]),
                Ok(v) => ids_from_value(&v),
                Err(_) => None,
            },
            other => ids_from_value(other),
        };
        if parsed.is_none() {
            self.reject(FieldIssue::not_id_list(field));
        }
        parsed
    }

    pub fn require<T>(&mut self, field: &str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.reject(FieldIssue::invalid(field));
        }
        value
    }

    /// Merges `validator` failures and returns every issue found, in
    /// `order`.
    pub fn finish(
        mut self,
        order: &[&str],
        validated: Result<(), ValidationErrors>,
    ) -> Result<(), ApiError> {
        if let Err(errors) = validated {
            for (field, errs) in errors.field_errors() {
                let issue = errs
                    .iter()
                    .find_map(|e| e.message.as_ref())
                    .map_or_else(
                        || FieldIssue::invalid(&field),
                        |m| FieldIssue {
                            field: field.to_string(),
                            message: m.to_string(),
                        },
                    );
                self.reject(issue);
            }
        }

        if self.issues.is_empty() {
            return Ok(());
        }

        let rank = |field: &str| order.iter().position(|f| *f == field).unwrap_or(order.len());
        self.issues.sort_by_key(|i| rank(&i.field));
        Err(ApiError::validation(self.issues))
    }
}

fn ids_from_value(value: &Value) -> Option<Vec<i32>> {
    let Value::Array(items) = value else {
        return None;
    };
    items
        .iter()
        .map(|item| match item {
            Value::Number(n) => n.as_i64().and_then(|v| i32::try_from(v).ok()),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
        .collect()
}

/// Accepts `YYYY-MM-DD`, RFC 3339 and RFC 2822 dates.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|d| d.date_naive()))
        .or_else(|| DateTime::parse_from_rfc2822(raw).ok().map(|d| d.date_naive()))
}

fn round_score(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}

// ============================================================================
// Request bodies
// ============================================================================

#[derive(Debug, Default, Validate)]
pub struct MovieRequest {
    #[validate(length(min = 1, max = 255, message = "Field title is invalid"))]
    pub title: Option<String>,
    pub creation: Option<NaiveDate>,
    #[validate(range(min = 0.0, message = "Field score is invalid"))]
    pub score: Option<f64>,
    pub characters: Option<Vec<i32>>,
    pub genres: Option<Vec<i32>>,
}

const MOVIE_FIELDS: &[&str] = &["title", "creation", "score", "characters", "genres"];

impl MovieRequest {
    fn read(reader: &mut FieldReader<'_>) -> Self {
        Self {
            title: reader.text("title"),
            creation: reader.date("creation"),
            score: reader.float("score"),
            characters: reader.id_list("characters"),
            genres: reader.id_list("genres"),
        }
    }

    pub fn parse_new(values: &Map<String, Value>) -> Result<NewMovie, ApiError> {
        let mut reader = FieldReader::new(values);
        let request = Self::read(&mut reader);
        let title = reader.require("title", request.title.clone());
        let creation = reader.require("creation", request.creation);
        reader.finish(MOVIE_FIELDS, request.validate())?;

        match (title, creation) {
            (Some(title), Some(creation)) => Ok(NewMovie {
                title,
                creation,
                score: request.score.map(round_score),
                characters: request.characters,
                genres: request.genres,
            }),
            _ => Err(ApiError::internal("movie fields vanished after validation")),
        }
    }

    pub fn parse_changes(values: &Map<String, Value>) -> Result<MovieChanges, ApiError> {
        let mut reader = FieldReader::new(values);
        let request = Self::read(&mut reader);
        reader.finish(MOVIE_FIELDS, request.validate())?;

        Ok(MovieChanges {
            title: request.title,
            creation: request.creation,
            score: request.score.map(round_score),
            characters: request.characters,
            genres: request.genres,
        })
    }
}

#[derive(Debug, Default, Validate)]
pub struct CharacterRequest {
    #[validate(length(min = 2, max = 125, message = "Field name is invalid"))]
    pub name: Option<String>,
    #[validate(range(min = 0, message = "Field age is invalid"))]
    pub age: Option<i32>,
    #[validate(range(min = 0.0, message = "Field weight is invalid"))]
    pub weight: Option<f64>,
    #[validate(length(max = 225, message = "Field story is invalid"))]
    pub story: Option<String>,
    pub movies: Option<Vec<i32>>,
}

const CHARACTER_FIELDS: &[&str] = &["name", "age", "weight", "story", "movies"];

impl CharacterRequest {
    fn read(reader: &mut FieldReader<'_>) -> Self {
        Self {
            name: reader.text("name"),
            age: reader.int("age"),
            weight: reader.float("weight"),
            story: reader.text("story"),
            movies: reader.id_list("movies"),
        }
    }

    pub fn parse_new(values: &Map<String, Value>) -> Result<NewCharacter, ApiError> {
        let mut reader = FieldReader::new(values);
        let request = Self::read(&mut reader);
        let name = reader.require("name", request.name.clone());
        let age = reader.require("age", request.age);
        let weight = reader.require("weight", request.weight);
        reader.finish(CHARACTER_FIELDS, request.validate())?;

        match (name, age, weight) {
            (Some(name), Some(age), Some(weight)) => Ok(NewCharacter {
                name,
                age,
                weight,
                story: request.story,
                movies: request.movies,
            }),
            _ => Err(ApiError::internal(
                "character fields vanished after validation",
            )),
        }
    }

    pub fn parse_changes(values: &Map<String, Value>) -> Result<CharacterChanges, ApiError> {
        let mut reader = FieldReader::new(values);
        let request = Self::read(&mut reader);
        reader.finish(CHARACTER_FIELDS, request.validate())?;

        Ok(CharacterChanges {
            name: request.name,
            age: request.age,
            weight: request.weight,
            story: request.story,
            movies: request.movies,
        })
    }
}

#[derive(Debug, Default, Validate)]
pub struct GenreRequest {
    #[validate(length(min = 2, max = 125, message = "Field name is invalid"))]
    pub name: Option<String>,
    pub movies: Option<Vec<i32>>,
}

const GENRE_FIELDS: &[&str] = &["name", "movies"];

impl GenreRequest {
    fn read(reader: &mut FieldReader<'_>) -> Self {
        Self {
            name: reader.text("name"),
            movies: reader.id_list("movies"),
        }
    }

    pub fn parse_new(values: &Map<String, Value>) -> Result<NewGenre, ApiError> {
        let mut reader = FieldReader::new(values);
        let request = Self::read(&mut reader);
        let name = reader.require("name", request.name.clone());
        reader.finish(GENRE_FIELDS, request.validate())?;

        name.map(|name| NewGenre {
            name,
            movies: request.movies,
        })
        .ok_or_else(|| ApiError::internal("genre name vanished after validation"))
    }

    pub fn parse_changes(values: &Map<String, Value>) -> Result<GenreChanges, ApiError> {
        let mut reader = FieldReader::new(values);
        let request = Self::read(&mut reader);
        reader.finish(GENRE_FIELDS, request.validate())?;

        Ok(GenreChanges {
            name: request.name,
            movies: request.movies,
        })
    }
}

// ============================================================================
// List query parameters
// ============================================================================

/// Raw query pairs. Keys may repeat and may carry a `[]` suffix.
pub struct ListParams<'a>(pub &'a [(String, String)]);

impl<'a> ListParams<'a> {
    /// Last non-empty value for `key`.
    fn get(&self, key: &str) -> Option<&'a str> {
        self.0
            .iter()
            .rev()
            .find(|(k, v)| k == key && !v.trim().is_empty())
            .map(|(_, v)| v.trim())
    }

    fn all(&self, key: &str) -> impl Iterator<Item = &'a str> {
        let bracketed = format!("{key}[]");
        self.0
            .iter()
            .filter(move |(k, _)| *k == key || *k == bracketed)
            .flat_map(|(_, v)| v.split(','))
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    fn int(&self, key: &str) -> Result<Option<i32>, ApiError> {
        self.get(key)
            .map(|v| {
                v.parse::<i32>()
                    .map_err(|_| ApiError::validation(vec![FieldIssue::invalid(key)]))
            })
            .transpose()
    }

    pub fn character_filter(&self) -> Result<CharacterFilter, ApiError> {
        let movies = self
            .all("movies")
            .map(str::parse::<i32>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ApiError::validation(vec![FieldIssue::not_id_list("movies")]))?;

        Ok(CharacterFilter {
            name: self.get("name").map(ToString::to_string),
            age: self.int("age")?,
            movies,
        })
    }

    pub fn movie_filter(&self) -> Result<MovieFilter, ApiError> {
        Ok(MovieFilter {
            title: self.get("title").map(ToString::to_string),
            genre: self.int("genre")?,
            order: SortOrder::from_param(self.get("order")),
        })
    }

    pub fn genre_filter(&self) -> GenreFilter {
        GenreFilter {
            name: self.get("name").map(ToString::to_string),
        }
    }
}
