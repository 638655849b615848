use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "characters")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub image: Option<String>,
    pub name: String,
    pub age: i32,
    pub weight: f64,
    pub story: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::characters_movies::Entity")]
    CharactersMovies,
}

impl Related<super::characters_movies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CharactersMovies.def()
    }
}

impl Related<super::movies::Entity> for Entity {
    fn to() -> RelationDef {
        super::characters_movies::Relation::Movie.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::characters_movies::Relation::Character.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
