use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub image: Option<String>,
    #[sea_orm(unique)]
    pub title: String,
    pub creation: Date,
    pub score: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::characters_movies::Entity")]
    CharactersMovies,
    #[sea_orm(has_many = "super::genres_movies::Entity")]
    GenresMovies,
}

impl Related<super::characters_movies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CharactersMovies.def()
    }
}

impl Related<super::genres_movies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GenresMovies.def()
    }
}

impl Related<super::characters::Entity> for Entity {
    fn to() -> RelationDef {
        super::characters_movies::Relation::Character.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::characters_movies::Relation::Movie.def().rev())
    }
}

impl Related<super::genres::Entity> for Entity {
    fn to() -> RelationDef {
        super::genres_movies::Relation::Genre.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::genres_movies::Relation::Movie.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
