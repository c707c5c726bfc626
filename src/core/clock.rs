use chrono::{DateTime, NaiveDate, Utc};

/// Clock abstracts access to the current timestamp so services remain deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current UTC date. Defaults to `now().date_naive()`.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Real-time clock backed by the system UTC time source.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.today
            .and_hms_opt(12, 0, 0)
            .map(|naive| naive.and_utc())
            .unwrap_or_else(Utc::now)
    }

    fn today(&self) -> NaiveDate {
        self.today
    }
}
