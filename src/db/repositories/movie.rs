use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, ModelTrait, Order,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set, TransactionTrait,
};

use super::associations::resolve_ids;
use super::contains_ci;
use super::links::{CharacterMovieLinks, GenreMovieLinks};
use crate::domain::{CatalogError, EntityKind, SortOrder};
use crate::entities::{characters, genres, genres_movies, movies, prelude::*};
use crate::models::{
    CharacterSummary, GenreSummary, MovieChanges, MovieDetail, MovieFilter, MovieSummary,
    NewMovie, RowUpdate, UpdateOutcome,
};

pub struct MovieRepository {
    conn: DatabaseConnection,
}

impl MovieRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Builds the listing query: title substring, genre membership, then
    /// creation date in the requested order with id as tie-breaker.
    #[must_use]
    pub fn list_query(filter: &MovieFilter) -> Select<Movies> {
        let mut query = Movies::find();

        if let Some(title) = filter.title.as_deref() {
            query = query.filter(contains_ci(movies::Column::Title, title));
        }

        if let Some(genre_id) = filter.genre {
            query = query
                .join(JoinType::InnerJoin, movies::Relation::GenresMovies.def())
                .filter(genres_movies::Column::GenreId.eq(genre_id));
        }

        let order = match filter.order {
            SortOrder::Ascending => Order::Asc,
            SortOrder::Descending => Order::Desc,
        };

        query
            .order_by(movies::Column::Creation, order.clone())
            .order_by(movies::Column::Id, order)
    }

    pub async fn list(&self, filter: &MovieFilter) -> Result<Vec<MovieSummary>, CatalogError> {
        let movies = Self::list_query(filter)
            .select_only()
            .columns([
                movies::Column::Id,
                movies::Column::Image,
                movies::Column::Title,
                movies::Column::Creation,
            ])
            .into_model::<MovieSummary>()
            .all(&self.conn)
            .await?;

        Ok(movies)
    }

    pub async fn get(&self, id: i32) -> Result<Option<movies::Model>, CatalogError> {
        Ok(Movies::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn get_detail(&self, id: i32) -> Result<Option<MovieDetail>, CatalogError> {
        let Some(movie) = self.get(id).await? else {
            return Ok(None);
        };

        let characters = movie
            .find_related(Characters)
            .select_only()
            .columns([
                characters::Column::Id,
                characters::Column::Image,
                characters::Column::Name,
            ])
            .order_by_asc(characters::Column::Id)
            .into_model::<CharacterSummary>()
            .all(&self.conn)
            .await?;

        let genres = movie
            .find_related(Genres)
            .select_only()
            .columns([genres::Column::Id, genres::Column::Image, genres::Column::Name])
            .order_by_asc(genres::Column::Id)
            .into_model::<GenreSummary>()
            .all(&self.conn)
            .await?;

        Ok(Some(MovieDetail {
            id: movie.id,
            image: movie.image,
            title: movie.title,
            creation: movie.creation,
            score: movie.score,
            characters,
            genres,
        }))
    }

    pub async fn create(
        &self,
        movie: NewMovie,
        image: Option<String>,
    ) -> Result<movies::Model, CatalogError> {
        let txn = self.conn.begin().await?;

        let character_ids = match movie.characters.as_deref() {
            Some(ids) => resolve_ids(&txn, EntityKind::Character, ids).await?,
            None => Vec::new(),
        };
        let genre_ids = match movie.genres.as_deref() {
            Some(ids) => resolve_ids(&txn, EntityKind::Genre, ids).await?,
            None => Vec::new(),
        };

        let model = movies::ActiveModel {
            image: Set(image),
            title: Set(movie.title),
            creation: Set(movie.creation),
            score: Set(movie.score),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let pairs: Vec<_> = character_ids.iter().map(|&c| (c, model.id)).collect();
        CharacterMovieLinks::link(&txn, &pairs).await?;
        let pairs: Vec<_> = genre_ids.iter().map(|&g| (g, model.id)).collect();
        GenreMovieLinks::link(&txn, &pairs).await?;

        txn.commit().await?;
        Ok(model)
    }

    /// Applies the supplied fields and replaces any supplied association set.
    ///
    /// `image` is the file name of an already stored replacement image.
    #[allow(clippy::float_cmp)]
    pub async fn update(
        &self,
        id: i32,
        changes: MovieChanges,
        image: Option<String>,
    ) -> Result<RowUpdate, CatalogError> {
        let txn = self.conn.begin().await?;

        let existing = Movies::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(CatalogError::not_found(EntityKind::Movie, id))?;

        let mut links_changed = false;
        if let Some(ids) = changes.characters.as_deref() {
            let resolved = resolve_ids(&txn, EntityKind::Character, ids).await?;
            links_changed |= CharacterMovieLinks::replace_characters_of(&txn, id, &resolved).await?;
        }
        if let Some(ids) = changes.genres.as_deref() {
            let resolved = resolve_ids(&txn, EntityKind::Genre, ids).await?;
            links_changed |= GenreMovieLinks::replace_genres_of(&txn, id, &resolved).await?;
        }

        let mut active: movies::ActiveModel = existing.clone().into();
        if let Some(title) = changes.title
            && title != existing.title
        {
            active.title = Set(title);
        }
        if let Some(creation) = changes.creation
            && creation != existing.creation
        {
            active.creation = Set(creation);
        }
        if let Some(score) = changes.score
            && existing.score != Some(score)
        {
            active.score = Set(Some(score));
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

    /// Deletes the movie and its join rows, returning the removed row.
    pub async fn delete(&self, id: i32) -> Result<movies::Model, CatalogError> {
        let txn = self.conn.begin().await?;

        let existing = Movies::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(CatalogError::not_found(EntityKind::Movie, id))?;

        CharacterMovieLinks::unlink_movie(&txn, id).await?;
        GenreMovieLinks::unlink_movie(&txn, id).await?;
        Movies::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(existing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};

    fn sql(filter: &MovieFilter) -> String {
        MovieRepository::list_query(filter)
            .build(DbBackend::Sqlite)
            .to_string()
    }

    #[test]
    fn default_listing_orders_by_creation_then_id() {
        let sql = sql(&MovieFilter::default());
        assert!(sql.contains(r#"ORDER BY "movies"."creation" ASC, "movies"."id" ASC"#));
        assert!(!sql.contains("WHERE"));
    }

    #[test]
    fn title_filter_is_case_insensitive_substring() {
        let sql = sql(&MovieFilter {
            title: Some("In%".to_string()),
            ..Default::default()
        });
        assert!(sql.contains(r#"LOWER("movies"."title") LIKE"#));
        assert!(sql.contains("ESCAPE"));
    }

    #[test]
    fn genre_filter_joins_link_table() {
        let sql = sql(&MovieFilter {
            genre: Some(4),
            order: SortOrder::Descending,
            ..Default::default()
        });
        assert!(sql.contains(r#"INNER JOIN "genres_movies""#));
        assert!(sql.contains(r#""genres_movies"."genre_id" = 4"#));
        assert!(sql.contains(r#""movies"."creation" DESC"#));
    }

    #[tokio::test]
    async fn update_reports_the_image_it_replaced() {
        let store = crate::db::Store::new("sqlite::memory:").await.unwrap();
        let repo = store.movies();
        let movie = repo
            .create(
                NewMovie {
                    title: "Inception".to_string(),
                    creation: chrono::NaiveDate::from_ymd_opt(2010, 7, 16).unwrap(),
                    score: None,
                    characters: None,
                    genres: None,
                },
                Some("first.png".to_string()),
            )
            .await
            .unwrap();

        let update = repo
            .update(movie.id, MovieChanges::default(), Some("second.png".to_string()))
            .await
            .unwrap();
        assert!(update.outcome.is_modified());
        assert_eq!(update.replaced_image.as_deref(), Some("first.png"));

        let changes = MovieChanges {
            score: Some(9.0),
            ..Default::default()
        };
        let update = repo.update(movie.id, changes, None).await.unwrap();
        assert!(update.outcome.is_modified());
        assert_eq!(update.replaced_image, None);

        let stored = repo.get(movie.id).await.unwrap().unwrap();
        assert_eq!(stored.image.as_deref(), Some("second.png"));
    }
}
