use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, ModelTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set, TransactionTrait,
};

use super::associations::resolve_ids;
use super::contains_ci;
use super::links::CharacterMovieLinks;
use crate::domain::{CatalogError, EntityKind};
use crate::entities::{characters, characters_movies, movies, prelude::*};
use crate::models::{
    CharacterChanges, CharacterDetail, CharacterFilter, CharacterSummary, MovieRef, NewCharacter,
    RowUpdate, UpdateOutcome,
};

pub struct CharacterRepository {
    conn: DatabaseConnection,
}

impl CharacterRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    #[must_use]
    pub fn list_query(filter: &CharacterFilter) -> Select<Characters> {
        let mut query = Characters::find();

        if let Some(name) = filter.name.as_deref() {
            query = query.filter(contains_ci(characters::Column::Name, name));
        }

        if let Some(age) = filter.age {
            query = query.filter(characters::Column::Age.eq(age));
        }

        if !filter.movies.is_empty() {
            query = query
                .join(
                    JoinType::InnerJoin,
                    characters::Relation::CharactersMovies.def(),
                )
                .filter(characters_movies::Column::MovieId.is_in(filter.movies.iter().copied()))
                .distinct();
        }

        query.order_by_asc(characters::Column::Id)
    }

    pub async fn list(
        &self,
        filter: &CharacterFilter,
    ) -> Result<Vec<CharacterSummary>, CatalogError> {
        let characters = Self::list_query(filter)
            .select_only()
            .columns([
                characters::Column::Id,
                characters::Column::Image,
                characters::Column::Name,
            ])
            .into_model::<CharacterSummary>()
            .all(&self.conn)
            .await?;

        Ok(characters)
    }

    pub async fn get(&self, id: i32) -> Result<Option<characters::Model>, CatalogError> {
        Ok(Characters::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn get_detail(&self, id: i32) -> Result<Option<CharacterDetail>, CatalogError> {
        let Some(character) = self.get(id).await? else {
            return Ok(None);
        };

        let movies = character
            .find_related(Movies)
            .select_only()
            .columns([movies::Column::Id, movies::Column::Image, movies::Column::Title])
            .order_by_asc(movies::Column::Id)
            .into_model::<MovieRef>()
            .all(&self.conn)
            .await?;

        Ok(Some(CharacterDetail {
            id: character.id,
            image: character.image,
            name: character.name,
            age: character.age,
            weight: character.weight,
            story: character.story,
            movies,
        }))
    }

    pub async fn create(
        &self,
        character: NewCharacter,
        image: Option<String>,
    ) -> Result<characters::Model, CatalogError> {
        let txn = self.conn.begin().await?;

        let movie_ids = match character.movies.as_deref() {
            Some(ids) => resolve_ids(&txn, EntityKind::Movie, ids).await?,
            None => Vec::new(),
        };

        let model = characters::ActiveModel {
            image: Set(image),
            name: Set(character.name),
            age: Set(character.age),
            weight: Set(character.weight),
            story: Set(character.story),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let pairs: Vec<_> = movie_ids.iter().map(|&m| (model.id, m)).collect();
        CharacterMovieLinks::link(&txn, &pairs).await?;

        txn.commit().await?;
        Ok(model)
    }

    #[allow(clippy::float_cmp)]
    pub async fn update(
        &self,
        id: i32,
        changes: CharacterChanges,
        image: Option<String>,
    ) -> Result<RowUpdate, CatalogError> {
        let txn = self.conn.begin().await?;

        let existing = Characters::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(CatalogError::not_found(EntityKind::Character, id))?;

        let mut links_changed = false;
        if let Some(ids) = changes.movies.as_deref() {
            let resolved = resolve_ids(&txn, EntityKind::Movie, ids).await?;
            links_changed = CharacterMovieLinks::replace_movies_of(&txn, id, &resolved).await?;
        }

        let mut active: characters::ActiveModel = existing.clone().into();
        if let Some(name) = changes.name
            && name != existing.name
        {
            active.name = Set(name);
        }
        if let Some(age) = changes.age
            && age != existing.age
        {
            active.age = Set(age);
        }
        if let Some(weight) = changes.weight
            && weight != existing.weight
        {
            active.weight = Set(weight);
        }
        if let Some(story) = changes.story
            && existing.story.as_deref() != Some(story.as_str())
        {
            active.story = Set(Some(story));
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

    pub async fn delete(&self, id: i32) -> Result<characters::Model, CatalogError> {
        let txn = self.conn.begin().await?;

        let existing = Characters::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(CatalogError::not_found(EntityKind::Character, id))?;

        CharacterMovieLinks::unlink_character(&txn, id).await?;
        Characters::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(existing)
    }
}
