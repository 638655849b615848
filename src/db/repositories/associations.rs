use std::collections::HashSet;

use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QuerySelect};

use crate::domain::{CatalogError, EntityKind};
use crate::entities::{characters, genres, movies, prelude::*};

/// Resolves requested association ids against the `target` table.
///
/// Duplicates are dropped keeping first-seen order. The first id (in request
/// order) with no matching row fails the whole call.
pub async fn resolve_ids<C: ConnectionTrait>(
    db: &C,
    target: EntityKind,
    requested: &[i32],
) -> Result<Vec<i32>, CatalogError> {
    let wanted = dedup_ids(requested);
    if wanted.is_empty() {
        return Ok(wanted);
    }

    let existing: HashSet<i32> = existing_ids(db, target, &wanted)
        .await?
        .into_iter()
        .collect();

    if let Some(id) = first_missing(&wanted, &existing) {
        return Err(CatalogError::missing_association(target, id));
    }

    Ok(wanted)
}

async fn existing_ids<C: ConnectionTrait>(
    db: &C,
    target: EntityKind,
    ids: &[i32],
) -> Result<Vec<i32>, DbErr> {
    let ids = ids.iter().copied();
    match target {
        EntityKind::Movie => {
            Movies::find()
                .select_only()
                .column(movies::Column::Id)
                .filter(movies::Column::Id.is_in(ids))
                .into_tuple::<i32>()
                .all(db)
                .await
        }
        EntityKind::Character => {
            Characters::find()
                .select_only()
                .column(characters::Column::Id)
                .filter(characters::Column::Id.is_in(ids))
                .into_tuple::<i32>()
                .all(db)
                .await
        }
        EntityKind::Genre => {
            Genres::find()
                .select_only()
                .column(genres::Column::Id)
                .filter(genres::Column::Id.is_in(ids))
                .into_tuple::<i32>()
                .all(db)
                .await
        }
    }
}

#[must_use]
pub fn dedup_ids(ids: &[i32]) -> Vec<i32> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

#[must_use]
pub fn first_missing(wanted: &[i32], existing: &HashSet<i32>) -> Option<i32> {
    wanted.iter().copied().find(|id| !existing.contains(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_keeps_first_seen_order() {
        assert_eq!(dedup_ids(&[3, 1, 3, 2, 1]), vec![3, 1, 2]);
        assert!(dedup_ids(&[]).is_empty());
    }

    #[test]
    fn first_missing_follows_request_order() {
        let existing: HashSet<i32> = [1, 2].into_iter().collect();
        assert_eq!(first_missing(&[1, 9, 2, 7], &existing), Some(9));
        assert_eq!(first_missing(&[2, 1], &existing), None);
    }
}
