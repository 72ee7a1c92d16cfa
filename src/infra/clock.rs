use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use crate::domain::ports::Clock;

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to one calendar day, used to make date validation reproducible.
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
        DateTime::from_naive_utc_and_offset(self.today.and_time(NaiveTime::MIN), Utc)
    }

    fn today(&self) -> NaiveDate {
        self.today
    }
}
