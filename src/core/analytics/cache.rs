use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::core::analytics::bucket::YearMonth;
use crate::core::analytics::overview::MonthlyOverview;
use crate::ledger::Ledger;

/// Memoizes monthly overviews per ledger revision.
///
/// Any append or budget change bumps the ledger revision, which drops every
/// stored overview on the next lookup.
#[derive(Debug, Default)]
pub struct OverviewCache {
    revision: Option<u64>,
    entries: HashMap<YearMonth, MonthlyOverview>,
    hits: u64,
    misses: u64,
}

impl OverviewCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn overview(&mut self, ledger: &Ledger, reference: NaiveDate) -> &MonthlyOverview {
        if self.revision != Some(ledger.revision()) {
            if !self.entries.is_empty() {
                debug!(
                    stale = ?self.revision,
                    current = ledger.revision(),
                    "Invalidating overview cache"
                );
            }
            self.entries.clear();
            self.revision = Some(ledger.revision());
        }

        let key = YearMonth::of(reference);
        if self.entries.contains_key(&key) {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        self.entries
            .entry(key)
            .or_insert_with(|| MonthlyOverview::compute(ledger.transactions(), reference))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(hits, misses)` since creation.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}
