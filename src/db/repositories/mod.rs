pub mod associations;
pub mod character;
pub mod genre;
pub mod links;
pub mod movie;

use sea_orm::ColumnTrait;
use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};

const LIKE_ESCAPE: char = '\\';

/// Case-insensitive substring match of `column` against `needle`.
///
/// `%` and `_` in the needle are matched literally.
pub(crate) fn contains_ci<C: ColumnTrait>(column: C, needle: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(&needle.to_lowercase()));
    Expr::expr(Func::lower(Expr::col((column.entity_name(), column))))
        .like(LikeExpr::new(pattern).escape(LIKE_ESCAPE))
}

pub(crate) fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_') || c == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}
