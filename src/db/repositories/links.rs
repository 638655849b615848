//! Helpers for the `characters_movies` and `genres_movies` join tables.
//!
//! Every function takes a generic connection so it can run inside the
//! caller's transaction.

use std::collections::HashSet;

use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QuerySelect, Set,
};

use crate::entities::{characters_movies, genres_movies, prelude::*};

pub struct CharacterMovieLinks;

impl CharacterMovieLinks {
    pub async fn movies_of<C: ConnectionTrait>(
        db: &C,
        character_id: i32,
    ) -> Result<Vec<i32>, DbErr> {
        CharactersMovies::find()
            .select_only()
            .column(characters_movies::Column::MovieId)
            .filter(characters_movies::Column::CharacterId.eq(character_id))
            .into_tuple::<i32>()
            .all(db)
            .await
    }

    pub async fn characters_of<C: ConnectionTrait>(
        db: &C,
        movie_id: i32,
    ) -> Result<Vec<i32>, DbErr> {
        CharactersMovies::find()
            .select_only()
            .column(characters_movies::Column::CharacterId)
            .filter(characters_movies::Column::MovieId.eq(movie_id))
            .into_tuple::<i32>()
            .all(db)
            .await
    }

    pub async fn link<C: ConnectionTrait>(db: &C, pairs: &[(i32, i32)]) -> Result<(), DbErr> {
        if pairs.is_empty() {
            return Ok(());
        }

        let rows = pairs
            .iter()
            .map(|&(character_id, movie_id)| characters_movies::ActiveModel {
                character_id: Set(character_id),
                movie_id: Set(movie_id),
            });

        CharactersMovies::insert_many(rows)
            .exec_without_returning(db)
            .await?;
        Ok(())
    }

    pub async fn unlink_character<C: ConnectionTrait>(
        db: &C,
        character_id: i32,
    ) -> Result<u64, DbErr> {
        let res = CharactersMovies::delete_many()
            .filter(characters_movies::Column::CharacterId.eq(character_id))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }

    pub async fn unlink_movie<C: ConnectionTrait>(db: &C, movie_id: i32) -> Result<u64, DbErr> {
        let res = CharactersMovies::delete_many()
            .filter(characters_movies::Column::MovieId.eq(movie_id))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }

    /// Makes `movie_ids` the exact movie set of a character.
    /// Returns whether the set differed from what was stored.
    pub async fn replace_movies_of<C: ConnectionTrait>(
        db: &C,
        character_id: i32,
        movie_ids: &[i32],
    ) -> Result<bool, DbErr> {
        let current = Self::movies_of(db, character_id).await?;
        if same_set(&current, movie_ids) {
            return Ok(false);
        }

        Self::unlink_character(db, character_id).await?;
        let pairs: Vec<_> = movie_ids.iter().map(|&m| (character_id, m)).collect();
        Self::link(db, &pairs).await?;
        Ok(true)
    }

    pub async fn replace_characters_of<C: ConnectionTrait>(
        db: &C,
        movie_id: i32,
        character_ids: &[i32],
    ) -> Result<bool, DbErr> {
        let current = Self::characters_of(db, movie_id).await?;
        if same_set(&current, character_ids) {
            return Ok(false);
        }

        Self::unlink_movie(db, movie_id).await?;
        let pairs: Vec<_> = character_ids.iter().map(|&c| (c, movie_id)).collect();
        Self::link(db, &pairs).await?;
        Ok(true)
    }
}

pub struct GenreMovieLinks;

impl GenreMovieLinks {
    pub async fn movies_of<C: ConnectionTrait>(db: &C, genre_id: i32) -> Result<Vec<i32>, DbErr> {
        GenresMovies::find()
            .select_only()
            .column(genres_movies::Column::MovieId)
            .filter(genres_movies::Column::GenreId.eq(genre_id))
            .into_tuple::<i32>()
            .all(db)
            .await
    }

    pub async fn genres_of<C: ConnectionTrait>(db: &C, movie_id: i32) -> Result<Vec<i32>, DbErr> {
        GenresMovies::find()
            .select_only()
            .column(genres_movies::Column::GenreId)
            .filter(genres_movies::Column::MovieId.eq(movie_id))
            .into_tuple::<i32>()
            .all(db)
            .await
    }

    pub async fn link<C: ConnectionTrait>(db: &C, pairs: &[(i32, i32)]) -> Result<(), DbErr> {
        if pairs.is_empty() {
            return Ok(());
        }

        let rows = pairs.iter().map(|&(genre_id, movie_id)| genres_movies::ActiveModel {
            genre_id: Set(genre_id),
            movie_id: Set(movie_id),
        });

        GenresMovies::insert_many(rows)
            .exec_without_returning(db)
            .await?;
        Ok(())
    }

    pub async fn unlink_genre<C: ConnectionTrait>(db: &C, genre_id: i32) -> Result<u64, DbErr> {
        let res = GenresMovies::delete_many()
            .filter(genres_movies::Column::GenreId.eq(genre_id))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }

    pub async fn unlink_movie<C: ConnectionTrait>(db: &C, movie_id: i32) -> Result<u64, DbErr> {
        let res = GenresMovies::delete_many()
            .filter(genres_movies::Column::MovieId.eq(movie_id))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }

    pub async fn replace_movies_of<C: ConnectionTrait>(
        db: &C,
        genre_id: i32,
        movie_ids: &[i32],
    ) -> Result<bool, DbErr> {
        let current = Self::movies_of(db, genre_id).await?;
        if same_set(&current, movie_ids) {
            return Ok(false);
        }

        Self::unlink_genre(db, genre_id).await?;
        let pairs: Vec<_> = movie_ids.iter().map(|&m| (genre_id, m)).collect();
        Self::link(db, &pairs).await?;
        Ok(true)
    }

    pub async fn replace_genres_of<C: ConnectionTrait>(
        db: &C,
        movie_id: i32,
        genre_ids: &[i32],
    ) -> Result<bool, DbErr> {
        let current = Self::genres_of(db, movie_id).await?;
        if same_set(&current, genre_ids) {
            return Ok(false);
        }

        Self::unlink_movie(db, movie_id).await?;
        let pairs: Vec<_> = genre_ids.iter().map(|&g| (g, movie_id)).collect();
        Self::link(db, &pairs).await?;
        Ok(true)
    }
}

fn same_set(current: &[i32], wanted: &[i32]) -> bool {
    let current: HashSet<i32> = current.iter().copied().collect();
    let wanted: HashSet<i32> = wanted.iter().copied().collect();
    current == wanted
}
