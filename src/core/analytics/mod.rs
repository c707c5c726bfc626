//! Pure, re-derivable views over a borrowed transaction list.
//!
//! Data flows one way: entries → [`monthly_bucket`] → [`daily_series`] /
//! [`category_totals`]. Nothing here mutates or stores its input.

pub mod bucket;
pub mod cache;
pub mod category;
pub mod daily;
pub mod overview;

pub use bucket::{in_month, monthly_bucket, YearMonth};
pub use cache::OverviewCache;
pub use category::{
    category_totals, rank_by_frequency, suggested_categories, CategoryFrequency, CategoryTotal,
};
pub use daily::{daily_series, DailyPoint};
pub use overview::{KindTotals, MonthlyOverview};
