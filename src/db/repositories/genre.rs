use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, Set, TransactionTrait,
};

use super::associations::resolve_ids;
use super::contains_ci;
use super::links::GenreMovieLinks;
use crate::domain::{CatalogError, EntityKind};
use crate::entities::{genres, movies, prelude::*};
use crate::models::{
    GenreChanges, GenreDetail, GenreFilter, GenreSummary, MovieRef, NewGenre, RowUpdate,
    UpdateOutcome,
};

pub struct GenreRepository {
    conn: DatabaseConnection,
}

impl GenreRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    #[must_use]
    pub fn list_query(filter: &GenreFilter) -> Select<Genres> {
        let mut query = Genres::find();
        if let Some(name) = filter.name.as_deref() {
            query = query.filter(contains_ci(genres::Column::Name, name));
        }
        query.order_by_asc(genres::Column::Id)
    }

    pub async fn list(&self, filter: &GenreFilter) -> Result<Vec<GenreSummary>, CatalogError> {
        let genres = Self::list_query(filter)
            .select_only()
            .columns([genres::Column::Id, genres::Column::Image, genres::Column::Name])
            .into_model::<GenreSummary>()
            .all(&self.conn)
            .await?;

        Ok(genres)
    }

    pub async fn get(&self, id: i32) -> Result<Option<genres::Model>, CatalogError> {
        Ok(Genres::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn get_detail(&self, id: i32) -> Result<Option<GenreDetail>, CatalogError> {
        let Some(genre) = self.get(id).await? else {
            return Ok(None);
        };

        let movies = genre
            .find_related(Movies)
            .select_only()
            .columns([movies::Column::Id, movies::Column::Image, movies::Column::Title])
            .order_by_asc(movies::Column::Id)
            .into_model::<MovieRef>()
            .all(&self.conn)
            .await?;

        Ok(Some(GenreDetail {
            id: genre.id,
            image: genre.image,
            name: genre.name,
            movies,
        }))
    }

    pub async fn create(
        &self,
        genre: NewGenre,
        image: Option<String>,
    ) -> Result<genres::Model, CatalogError> {
        let txn = self.conn.begin().await?;

        let movie_ids = match genre.movies.as_deref() {
            Some(ids) => resolve_ids(&txn, EntityKind::Movie, ids).await?,
            None => Vec::new(),
        };

        let model = genres::ActiveModel {
            image: Set(image),
            name: Set(genre.name),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let pairs: Vec<_> = movie_ids.iter().map(|&m| (model.id, m)).collect();
        GenreMovieLinks::link(&txn, &pairs).await?;

        txn.commit().await?;
        Ok(model)
    }

    pub async fn update(
        &self,
        id: i32,
        changes: GenreChanges,
        image: Option<String>,
    ) -> Result<RowUpdate, CatalogError> {
        let txn = self.conn.begin().await?;

        let existing = Genres::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(CatalogError::not_found(EntityKind::Genre, id))?;

        let mut links_changed = false;
        if let Some(ids) = changes.movies.as_deref() {
            let resolved = resolve_ids(&txn, EntityKind::Movie, ids).await?;
            links_changed = GenreMovieLinks::replace_movies_of(&txn, id, &resolved).await?;
        }

        let mut active: genres::ActiveModel = existing.clone().into();
        if let Some(name) = changes.name
            && name != existing.name
        {
            active.name = Set(name);
        }
        let replaced_image = if let Some(image) = image {
            active.image = Set(Some(image));
            existing.image.clone()
        } else {
            None
        };

        let row_changed = active.is_changed();
        if row_changed {
            active.update(&txn).await?;
        }

        txn.commit().await?;
        Ok(RowUpdate {
            outcome: UpdateOutcome::from_changed(row_changed || links_changed),
            replaced_image,
        })
    }

    pub async fn delete(&self, id: i32) -> Result<genres::Model, CatalogError> {
        let txn = self.conn.begin().await?;

        let existing = Genres::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(CatalogError::not_found(EntityKind::Genre, id))?;

        GenreMovieLinks::unlink_genre(&txn, id).await?;
        Genres::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(existing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};

    #[test]
    fn name_filter_uses_lowered_like() {
        let sql = GenreRepository::list_query(&GenreFilter {
            name: Some("Sci".to_string()),
        })
        .build(DbBackend::Sqlite)
        .to_string();

        assert!(sql.contains(r#"LOWER("genres"."name") LIKE"#));
        assert!(sql.contains("%sci%"));
        assert!(sql.contains(r#"ORDER BY "genres"."id" ASC"#));
    }

    #[tokio::test]
    async fn first_image_replaces_nothing() {
        let store = crate::db::Store::new("sqlite::memory:").await.unwrap();
        let repo = store.genres();
        let genre = repo
            .create(
                NewGenre {
                    name: "Drama".to_string(),
                    movies: None,
                },
                None,
            )
            .await
            .unwrap();

        let update = repo
            .update(genre.id, GenreChanges::default(), Some("drama.svg".to_string()))
            .await
            .unwrap();
        assert!(update.outcome.is_modified());
        assert_eq!(update.replaced_image, None);
    }
}
