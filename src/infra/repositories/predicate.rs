//! Translation of the domain predicate algebra into SeaORM conditions.
//!
//! This is the storage side of the filter compiler: [`Predicate`] trees
//! stay ORM-agnostic, and only this module knows which columns and SQL
//! operators they map onto. Case-insensitive matching compiles to
//! `LOWER(column) LIKE '%term%'`, which works on any backend.

use sea_orm::sea_query::{Condition, Expr, Func};
use sea_orm::ColumnTrait;

use super::entities::{advertisement, manufacturer};
use crate::domain::Predicate;

/// Build a SeaORM [`Condition`] from a predicate tree.
///
/// Callers referencing manufacturer leaves must join the manufacturer
/// relation into the select.
pub(crate) fn condition(predicate: &Predicate) -> Condition {
    match predicate {
        Predicate::All(parts) => parts
            .iter()
            .fold(Condition::all(), |cond, part| cond.add(condition(part))),
        Predicate::Any(parts) => parts
            .iter()
            .fold(Condition::any(), |cond, part| cond.add(condition(part))),
        Predicate::StatusEq(status) => {
            Condition::all().add(advertisement::Column::Status.eq(status.code()))
        }
        Predicate::StatusIn(statuses) => Condition::all().add(
            advertisement::Column::Status.is_in(statuses.iter().map(|status| status.code())),
        ),
        Predicate::OwnerEq(user_code) => {
            Condition::all().add(advertisement::Column::UserCode.eq(*user_code))
        }
        Predicate::ModelEq(model) => {
            Condition::all().add(advertisement::Column::ModelDescription.eq(model.as_str()))
        }
        Predicate::ManufacturerNameEq(name) => Condition::all().add(
            Expr::col((manufacturer::Entity, manufacturer::Column::Name)).eq(name.as_str()),
        ),
        Predicate::DescriptionContains(term) => Condition::all().add(
            Expr::expr(Func::lower(Expr::col((
                advertisement::Entity,
                advertisement::Column::Description,
            ))))
            .like(contains_pattern(term)),
        ),
        Predicate::ModelContains(term) => Condition::all().add(
            Expr::expr(Func::lower(Expr::col((
                advertisement::Entity,
                advertisement::Column::ModelDescription,
            ))))
            .like(contains_pattern(term)),
        ),
        Predicate::ManufacturerNameContains(term) => Condition::all().add(
            Expr::expr(Func::lower(Expr::col((
                manufacturer::Entity,
                manufacturer::Column::Name,
            ))))
            .like(contains_pattern(term)),
        ),
        Predicate::YearManufactureAtLeast(year) => {
            Condition::all().add(advertisement::Column::YearManufacture.gte(*year))
        }
        Predicate::YearModelAtMost(year) => {
            Condition::all().add(advertisement::Column::YearModel.lte(*year))
        }
        Predicate::ValueBetween(min, max) => {
            Condition::all().add(advertisement::Column::Value.between(*min, *max))
        }
    }
}

fn contains_pattern(term: &str) -> String {
    format!("%{}%", term.to_lowercase())
}
