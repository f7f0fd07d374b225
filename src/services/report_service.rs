//! Reporting aggregator - derived statistics over stored records.
//!
//! Every report treats "no qualifying rows" as a terminal branch with
//! deterministic zero/default values; no division ever reaches a zero
//! denominator.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::reports::{
    CategoryReport, SoldCategory, SoldReport, StatusCount, ViewContactReport,
};
use crate::domain::AdvertisementStatus;
use crate::errors::AppResult;
use crate::infra::{AdvertisementRepository, ChatRepository};
use crate::services::parallel;
use crate::utils::{seconds_to_time_duration, TimeDuration};

/// Report service trait for dependency injection.
///
/// Reports taking `Option<i64>` run globally (admin view) when the scope
/// is `None` and per-owner otherwise.
#[async_trait]
pub trait ReportService: Send + Sync {
    /// Views-per-contact ratio
    async fn view_contact(&self, user_code: Option<i64>) -> AppResult<ViewContactReport>;

    /// Advertisement count per status description
    async fn status_breakdown(&self) -> AppResult<Vec<StatusCount>>;

    /// Sold count and percentage among the user's Active/Sold advertisements
    async fn sold_percentage(&self, user_code: i64) -> AppResult<SoldReport>;

    /// Most frequent brand, model and model year among Sold advertisements
    async fn sold_by_category(&self, user_code: Option<i64>) -> AppResult<Vec<CategoryReport>>;

    /// Average time the user's Active/Paused advertisements spent listed,
    /// formatted as a Portuguese sentence
    async fn time_in_listing(&self, user_code: i64) -> AppResult<String>;
}

/// Concrete implementation of ReportService
pub struct Reporter {
    ads: Arc<dyn AdvertisementRepository>,
    chats: Arc<dyn ChatRepository>,
}

impl Reporter {
    /// Create new service instance
    pub fn new(ads: Arc<dyn AdvertisementRepository>, chats: Arc<dyn ChatRepository>) -> Self {
        Self { ads, chats }
    }
}

#[async_trait]
impl ReportService for Reporter {
    async fn view_contact(&self, user_code: Option<i64>) -> AppResult<ViewContactReport> {
        let total_views = self.ads.total_views(user_code).await?;
        if total_views == 0 {
            return Ok(ViewContactReport::zeroed());
        }

        let total_contacts = match user_code {
            Some(user_code) => {
                let codes = self.ads.codes_by_owner(user_code).await?;
                self.chats.count_for_advertisements(&codes).await?
            }
            None => self.chats.count_all().await?,
        };

        if total_contacts == 0 {
            return Ok(ViewContactReport {
                total_views,
                total_contacts: 0,
                report: 0,
            });
        }

        let report = (total_views as f64 / total_contacts as f64).round() as i64;
        Ok(ViewContactReport {
            total_views,
            total_contacts,
            report,
        })
    }

    async fn status_breakdown(&self) -> AppResult<Vec<StatusCount>> {
        self.ads.status_breakdown().await
    }

    async fn sold_percentage(&self, user_code: i64) -> AppResult<SoldReport> {
        let (sold, total) = parallel::join2(
            self.ads
                .count_with_status(Some(user_code), &[AdvertisementStatus::Sold]),
            self.ads.count_with_status(
                Some(user_code),
                &[AdvertisementStatus::Active, AdvertisementStatus::Sold],
            ),
        )
        .await?;

        if total == 0 {
            return Ok(SoldReport {
                sold,
                percentage: "0,00%".to_string(),
            });
        }

        let percentage =
            format!("{:.2}%", sold as f64 / total as f64 * 100.0).replace('.', ",");
        Ok(SoldReport { sold, percentage })
    }

    async fn sold_by_category(&self, user_code: Option<i64>) -> AppResult<Vec<CategoryReport>> {
        let [brand, model, year] = SoldCategory::all();

        let (brand_winner, model_winner, year_winner) = parallel::join3(
            self.ads.top_sold_value(user_code, brand),
            self.ads.top_sold_value(user_code, model),
            self.ads.top_sold_value(user_code, year),
        )
        .await?;

        Ok(vec![
            CategoryReport::new(brand, brand_winner),
            CategoryReport::new(model, model_winner),
            CategoryReport::new(year, year_winner),
        ])
    }

    async fn time_in_listing(&self, user_code: i64) -> AppResult<String> {
        let ages = self.ads.listing_age_seconds(user_code).await?;

        // user doesn't have qualifying advertisements
        if ages.is_empty() {
            return Ok(TimeDuration::ZERO.to_string());
        }

        let total_paused = self.ads.total_paused_seconds(user_code).await?;
        let total_listed: i64 = ages.iter().sum();
        let quantity = ages.len() as f64;

        let average = ((total_listed - total_paused) as f64 / quantity)
            .round()
            .max(0.0) as u64;

        Ok(seconds_to_time_duration(average).to_string())
    }
}
