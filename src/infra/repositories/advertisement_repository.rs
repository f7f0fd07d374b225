//! Advertisement repository: query-builder access for CRUD and search,
//! raw-SQL channel for the aggregate reports.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, Statement,
};

use super::entities::advertisement;
use super::entities::manufacturer;
use super::predicate;
use crate::domain::reports::{SoldCategory, StatusCount};
use crate::domain::{
    Advertisement, AdvertisementChanges, AdvertisementListing, AdvertisementStatus,
    NewAdvertisement, Predicate,
};
use crate::errors::AppResult;
use crate::types::PaginationParams;

/// Advertisement repository trait for dependency injection.
///
/// Listing/search methods join the manufacturer relation; aggregate
/// methods back the reporting services.
#[async_trait]
pub trait AdvertisementRepository: Send + Sync {
    /// Page of publicly visible (Active) advertisements, newest first
    async fn list_public(&self, page: PaginationParams) -> AppResult<Vec<AdvertisementListing>>;

    /// Advertisements matching a compiled filter predicate
    async fn search(
        &self,
        predicate: &Predicate,
        page: Option<PaginationParams>,
    ) -> AppResult<Vec<AdvertisementListing>>;

    /// One publicly visible advertisement by code
    async fn find_public(&self, code: i64) -> AppResult<Option<AdvertisementListing>>;

    /// One Active/Paused advertisement by code, scoped to its owner
    async fn find_owned(&self, code: i64, user_code: i64)
        -> AppResult<Option<AdvertisementListing>>;

    /// All Active/Paused advertisements of one owner
    async fn list_owned(&self, user_code: i64) -> AppResult<Vec<AdvertisementListing>>;

    /// Persist a new advertisement
    async fn create(&self, data: NewAdvertisement) -> AppResult<Advertisement>;

    /// Partial field overwrite; `None` when the code does not exist
    async fn update(
        &self,
        code: i64,
        changes: AdvertisementChanges,
    ) -> AppResult<Option<Advertisement>>;

    /// Transition to Removed, guarded by owner and a not-already-Removed
    /// check; `None` means the guard failed and nothing was written
    async fn soft_delete(&self, code: i64, user_code: i64) -> AppResult<Option<Advertisement>>;

    /// Atomic `views = views + 1`; returns the number of affected rows
    async fn increment_views(&self, code: i64) -> AppResult<u64>;

    /// Count advertisements in any of the given statuses, optionally
    /// scoped to one owner
    async fn count_with_status(
        &self,
        user_code: Option<i64>,
        statuses: &[AdvertisementStatus],
    ) -> AppResult<u64>;

    /// Sum of view counters, optionally scoped to one owner
    async fn total_views(&self, user_code: Option<i64>) -> AppResult<i64>;

    /// Codes of every advertisement of one owner, regardless of status
    async fn codes_by_owner(&self, user_code: i64) -> AppResult<Vec<i64>>;

    /// Advertisement count per status description
    async fn status_breakdown(&self) -> AppResult<Vec<StatusCount>>;

    /// Most frequent value of a category among Sold advertisements;
    /// `None` when there are no qualifying rows
    async fn top_sold_value(
        &self,
        user_code: Option<i64>,
        category: SoldCategory,
    ) -> AppResult<Option<String>>;

    /// Seconds elapsed since creation for each Active/Paused
    /// advertisement of one owner
    async fn listing_age_seconds(&self, user_code: i64) -> AppResult<Vec<i64>>;

    /// Summed paused duration of the owner's Active/Paused advertisements
    async fn total_paused_seconds(&self, user_code: i64) -> AppResult<i64>;

    /// Minimum and maximum value among Active advertisements
    async fn value_bounds(&self) -> AppResult<(Option<Decimal>, Option<Decimal>)>;

    /// Distinct (manufacture year, model year) pairs of Active advertisements
    async fn year_ranges(&self) -> AppResult<Vec<(i32, i32)>>;

    /// Distinct model descriptions of Active advertisements
    async fn model_options(&self) -> AppResult<Vec<String>>;

    /// Distinct manufacturer names of Active advertisements
    async fn brand_options(&self) -> AppResult<Vec<String>>;
}

/// Concrete implementation of AdvertisementRepository
pub struct AdvertisementStore {
    db: DatabaseConnection,
}

impl AdvertisementStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn owner_visible_codes() -> [i16; 2] {
        AdvertisementStatus::owner_visible().map(AdvertisementStatus::code)
    }
}

#[async_trait]
impl AdvertisementRepository for AdvertisementStore {
    async fn list_public(&self, page: PaginationParams) -> AppResult<Vec<AdvertisementListing>> {
        let rows = advertisement::Entity::find()
            .find_also_related(manufacturer::Entity)
            .filter(advertisement::Column::Status.eq(AdvertisementStatus::Active.code()))
            .order_by_desc(advertisement::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn search(
        &self,
        predicate: &Predicate,
        page: Option<PaginationParams>,
    ) -> AppResult<Vec<AdvertisementListing>> {
        let mut select = advertisement::Entity::find()
            .find_also_related(manufacturer::Entity)
            .filter(predicate::condition(predicate))
            .order_by_desc(advertisement::Column::CreatedAt);

        if let Some(page) = page {
            select = select.offset(page.offset()).limit(page.limit());
        }

        let rows = select.all(&self.db).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_public(&self, code: i64) -> AppResult<Option<AdvertisementListing>> {
        let row = advertisement::Entity::find_by_id(code)
            .find_also_related(manufacturer::Entity)
            .filter(advertisement::Column::Status.eq(AdvertisementStatus::Active.code()))
            .one(&self.db)
            .await?;

        Ok(row.map(Into::into))
    }

    async fn find_owned(
        &self,
        code: i64,
        user_code: i64,
    ) -> AppResult<Option<AdvertisementListing>> {
        let row = advertisement::Entity::find_by_id(code)
            .find_also_related(manufacturer::Entity)
            .filter(advertisement::Column::UserCode.eq(user_code))
            .filter(advertisement::Column::Status.is_in(Self::owner_visible_codes()))
            .one(&self.db)
            .await?;

        Ok(row.map(Into::into))
    }

    async fn list_owned(&self, user_code: i64) -> AppResult<Vec<AdvertisementListing>> {
        let rows = advertisement::Entity::find()
            .find_also_related(manufacturer::Entity)
            .filter(advertisement::Column::UserCode.eq(user_code))
            .filter(advertisement::Column::Status.is_in(Self::owner_visible_codes()))
            .order_by_desc(advertisement::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, data: NewAdvertisement) -> AppResult<Advertisement> {
        let active = advertisement::ActiveModel {
            user_code: Set(data.user_code),
            manufacturer_code: Set(data.manufacturer_code),
            status: Set(data
                .status
                .unwrap_or(AdvertisementStatus::Active)
                .code()),
            model_description: Set(data.model_description),
            brand: Set(data.brand),
            value: Set(data.value),
            year_manufacture: Set(data.year_manufacture),
            year_model: Set(data.year_model),
            views: Set(0),
            total_stopped_seconds: Set(0),
            created_at: Set(Utc::now()),
            image_path: Set(data.image_path),
            description: Set(data.description),
            ..Default::default()
        };

        let model = active.insert(&self.db).await?;
        Ok(model.into())
    }

    async fn update(
        &self,
        code: i64,
        changes: AdvertisementChanges,
    ) -> AppResult<Option<Advertisement>> {
        let Some(found) = advertisement::Entity::find_by_id(code).one(&self.db).await? else {
            return Ok(None);
        };

        if changes.is_noop() {
            return Ok(Some(found.into()));
        }

        let mut active: advertisement::ActiveModel = found.into();

        if let Some(manufacturer_code) = changes.manufacturer_code {
            active.manufacturer_code = Set(manufacturer_code);
        }
        if let Some(model_description) = changes.model_description {
            active.model_description = Set(model_description);
        }
        if let Some(brand) = changes.brand {
            active.brand = Set(brand);
        }
        if let Some(value) = changes.value {
            active.value = Set(value);
        }
        if let Some(year_manufacture) = changes.year_manufacture {
            active.year_manufacture = Set(year_manufacture);
        }
        if let Some(year_model) = changes.year_model {
            active.year_model = Set(year_model);
        }
        if let Some(status) = changes.status {
            active.status = Set(status.code());
        }
        if let Some(image_path) = changes.image_path {
            active.image_path = Set(Some(image_path));
        }
        if let Some(description) = changes.description {
            active.description = Set(Some(description));
        }

        let model = active.update(&self.db).await?;
        Ok(Some(model.into()))
    }

    async fn soft_delete(&self, code: i64, user_code: i64) -> AppResult<Option<Advertisement>> {
        let Some(found) = advertisement::Entity::find_by_id(code)
            .filter(advertisement::Column::UserCode.eq(user_code))
            .filter(advertisement::Column::Status.ne(AdvertisementStatus::Removed.code()))
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: advertisement::ActiveModel = found.into();
        active.status = Set(AdvertisementStatus::Removed.code());

        let model = active.update(&self.db).await?;
        Ok(Some(model.into()))
    }

    async fn increment_views(&self, code: i64) -> AppResult<u64> {
        // The counter bump must stay a single UPDATE statement
        let result = advertisement::Entity::update_many()
            .col_expr(
                advertisement::Column::Views,
                Expr::col(advertisement::Column::Views).add(1),
            )
            .filter(advertisement::Column::Code.eq(code))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    async fn count_with_status(
        &self,
        user_code: Option<i64>,
        statuses: &[AdvertisementStatus],
    ) -> AppResult<u64> {
        let mut select = advertisement::Entity::find().filter(
            advertisement::Column::Status.is_in(statuses.iter().map(|status| status.code())),
        );
        if let Some(user_code) = user_code {
            select = select.filter(advertisement::Column::UserCode.eq(user_code));
        }

        Ok(select.count(&self.db).await?)
    }

    async fn total_views(&self, user_code: Option<i64>) -> AppResult<i64> {
        let backend = self.db.get_database_backend();
        let statement = match user_code {
            Some(user_code) => Statement::from_sql_and_values(
                backend,
                "SELECT COALESCE(SUM(views), 0)::BIGINT AS total \
                 FROM advertisements WHERE user_code = $1",
                [user_code.into()],
            ),
            None => Statement::from_string(
                backend,
                "SELECT COALESCE(SUM(views), 0)::BIGINT AS total FROM advertisements",
            ),
        };

        let row = SumRow::find_by_statement(statement).one(&self.db).await?;
        Ok(row.map(|r| r.total).unwrap_or(0))
    }

    async fn codes_by_owner(&self, user_code: i64) -> AppResult<Vec<i64>> {
        let codes = advertisement::Entity::find()
            .select_only()
            .column(advertisement::Column::Code)
            .filter(advertisement::Column::UserCode.eq(user_code))
            .into_tuple::<i64>()
            .all(&self.db)
            .await?;

        Ok(codes)
    }

    async fn status_breakdown(&self) -> AppResult<Vec<StatusCount>> {
        let statement = Statement::from_string(
            self.db.get_database_backend(),
            "SELECT st.description AS status, COUNT(*)::BIGINT AS total \
             FROM advertisements a \
             JOIN status_types st ON st.code = a.status \
             GROUP BY st.code, st.description \
             ORDER BY st.code",
        );

        let rows = StatusCountRow::find_by_statement(statement)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| StatusCount {
                status: row.status,
                total: row.total,
            })
            .collect())
    }

    async fn top_sold_value(
        &self,
        user_code: Option<i64>,
        category: SoldCategory,
    ) -> AppResult<Option<String>> {
        // Closed category set, so the interpolated column is never
        // user-controlled
        let (select_expr, group_column) = match category {
            SoldCategory::Brand => ("brand", "brand"),
            SoldCategory::ModelDescription => ("model_description", "model_description"),
            SoldCategory::YearModel => ("year_model::TEXT", "year_model"),
        };

        let backend = self.db.get_database_backend();
        let statement = match user_code {
            Some(user_code) => Statement::from_sql_and_values(
                backend,
                format!(
                    "SELECT {select_expr} AS category, \
                            COUNT({group_column})::BIGINT AS total_sold \
                     FROM advertisements \
                     WHERE status = $1 AND user_code = $2 \
                     GROUP BY {group_column} \
                     ORDER BY total_sold DESC \
                     LIMIT 1"
                ),
                [AdvertisementStatus::Sold.code().into(), user_code.into()],
            ),
            None => Statement::from_sql_and_values(
                backend,
                format!(
                    "SELECT {select_expr} AS category, \
                            COUNT({group_column})::BIGINT AS total_sold \
                     FROM advertisements \
                     WHERE status = $1 \
                     GROUP BY {group_column} \
                     ORDER BY total_sold DESC \
                     LIMIT 1"
                ),
                [AdvertisementStatus::Sold.code().into()],
            ),
        };

        let row = CategoryRow::find_by_statement(statement).one(&self.db).await?;
        Ok(row.and_then(|r| r.category))
    }

    async fn listing_age_seconds(&self, user_code: i64) -> AppResult<Vec<i64>> {
        let statement = Statement::from_sql_and_values(
            self.db.get_database_backend(),
            "SELECT EXTRACT(EPOCH FROM (NOW() - created_at))::BIGINT AS age_seconds \
             FROM advertisements \
             WHERE user_code = $1 AND status IN ($2, $3)",
            [
                user_code.into(),
                AdvertisementStatus::Active.code().into(),
                AdvertisementStatus::Paused.code().into(),
            ],
        );

        let rows = AgeRow::find_by_statement(statement).all(&self.db).await?;
        Ok(rows.into_iter().map(|row| row.age_seconds).collect())
    }

    async fn total_paused_seconds(&self, user_code: i64) -> AppResult<i64> {
        let statement = Statement::from_sql_and_values(
            self.db.get_database_backend(),
            "SELECT COALESCE(SUM(total_stopped_seconds), 0)::BIGINT AS total \
             FROM advertisements \
             WHERE user_code = $1 AND status IN ($2, $3)",
            [
                user_code.into(),
                AdvertisementStatus::Active.code().into(),
                AdvertisementStatus::Paused.code().into(),
            ],
        );

        let row = SumRow::find_by_statement(statement).one(&self.db).await?;
        Ok(row.map(|r| r.total).unwrap_or(0))
    }

    async fn value_bounds(&self) -> AppResult<(Option<Decimal>, Option<Decimal>)> {
        let statement = Statement::from_sql_and_values(
            self.db.get_database_backend(),
            "SELECT MIN(value) AS min_value, MAX(value) AS max_value \
             FROM advertisements WHERE status = $1",
            [AdvertisementStatus::Active.code().into()],
        );

        let row = BoundsRow::find_by_statement(statement).one(&self.db).await?;
        Ok(row
            .map(|r| (r.min_value, r.max_value))
            .unwrap_or((None, None)))
    }

    async fn year_ranges(&self) -> AppResult<Vec<(i32, i32)>> {
        let statement = Statement::from_sql_and_values(
            self.db.get_database_backend(),
            "SELECT year_manufacture, year_model \
             FROM advertisements WHERE status = $1 \
             GROUP BY year_manufacture, year_model \
             ORDER BY year_manufacture, year_model",
            [AdvertisementStatus::Active.code().into()],
        );

        let rows = YearRangeRow::find_by_statement(statement)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| (row.year_manufacture, row.year_model))
            .collect())
    }

    async fn model_options(&self) -> AppResult<Vec<String>> {
        let statement = Statement::from_sql_and_values(
            self.db.get_database_backend(),
            "SELECT model_description AS value \
             FROM advertisements WHERE status = $1 \
             GROUP BY model_description \
             ORDER BY model_description",
            [AdvertisementStatus::Active.code().into()],
        );

        let rows = TextRow::find_by_statement(statement).all(&self.db).await?;
        Ok(rows.into_iter().map(|row| row.value).collect())
    }

    async fn brand_options(&self) -> AppResult<Vec<String>> {
        let statement = Statement::from_sql_and_values(
            self.db.get_database_backend(),
            "SELECT m.name AS value \
             FROM advertisements a \
             JOIN manufacturers m ON m.code = a.manufacturer_code \
             WHERE a.status = $1 \
             GROUP BY m.name \
             ORDER BY m.name",
            [AdvertisementStatus::Active.code().into()],
        );

        let rows = TextRow::find_by_statement(statement).all(&self.db).await?;
        Ok(rows.into_iter().map(|row| row.value).collect())
    }
}

#[derive(Debug, FromQueryResult)]
struct SumRow {
    total: i64,
}

#[derive(Debug, FromQueryResult)]
struct StatusCountRow {
    status: String,
    total: i64,
}

#[derive(Debug, FromQueryResult)]
struct CategoryRow {
    category: Option<String>,
}

#[derive(Debug, FromQueryResult)]
struct AgeRow {
    age_seconds: i64,
}

#[derive(Debug, FromQueryResult)]
struct BoundsRow {
    min_value: Option<Decimal>,
    max_value: Option<Decimal>,
}

#[derive(Debug, FromQueryResult)]
struct YearRangeRow {
    year_manufacture: i32,
    year_model: i32,
}

#[derive(Debug, FromQueryResult)]
struct TextRow {
    value: String,
}
