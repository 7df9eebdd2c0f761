//! Name matching for list filters and uniqueness checks
//!
//! Every query that compares a column against user-supplied text goes
//! through this module. Input is lowercased and LIKE wildcards are escaped
//! here, so no caller builds a pattern by hand.

use sea_orm::sea_query::{Expr, Func, IntoColumnRef, LikeExpr, SimpleExpr};

/// Escape character used in every generated LIKE pattern
pub const LIKE_ESCAPE: char = '\\';

/// Escape LIKE metacharacters (`\`, `%`, `_`) so the input matches literally.
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// Case-insensitive prefix pattern for `input`.
pub fn prefix_pattern(input: &str) -> String {
    format!("{}%", escape_like(&input.to_lowercase()))
}

/// `LOWER(column) LIKE '<input>%' ESCAPE '\'`
pub fn starts_with_ignore_case<C>(column: C, input: &str) -> SimpleExpr
where
    C: IntoColumnRef,
{
    Expr::expr(Func::lower(Expr::col(column)))
        .like(LikeExpr::new(prefix_pattern(input)).escape(LIKE_ESCAPE))
}

/// `LOWER(column) = '<input>'`
pub fn equals_ignore_case<C>(column: C, input: &str) -> SimpleExpr
where
    C: IntoColumnRef,
{
    Expr::expr(Func::lower(Expr::col(column))).eq(input.to_lowercase())
}

/// Normalise an optional `filterName` query value; blank means no filter.
pub fn filter_term(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcards_are_escaped() {
        assert_eq!(escape_like("50%_off\\now"), "50\\%\\_off\\\\now");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[test]
    fn prefix_pattern_is_lowercase_and_anchored() {
        assert_eq!(prefix_pattern("Bug_"), "bug\\_%");
        assert_eq!(prefix_pattern(".*"), ".*%");
    }

    #[test]
    fn blank_filters_are_ignored() {
        assert_eq!(filter_term(None), None);
        assert_eq!(filter_term(Some("   ")), None);
        assert_eq!(filter_term(Some(" ab ")), Some("ab"));
    }
}
