use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "genres")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub image: Option<String>,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::genres_movies::Entity")]
    GenresMovies,
}

impl Related<super::genres_movies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GenresMovies.def()
    }
}

impl Related<super::movies::Entity> for Entity {
    fn to() -> RelationDef {
        super::genres_movies::Relation::Movie.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::genres_movies::Relation::Genre.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
