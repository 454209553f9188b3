use chrono::NaiveDate;

pub trait Clock: Send + Sync {
    /// Today's date as the guest calendar sees it.
    fn today(&self) -> NaiveDate;

    /// Today's date in UTC. Appointment times are UTC, so week offsets
    /// against them are measured from this date.
    fn today_utc(&self) -> NaiveDate;
}

/// Today's date in the local timezone of the process.
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }

    fn today_utc(&self) -> NaiveDate {
        chrono::Utc::now().date_naive()
    }
}

pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }

    fn today_utc(&self) -> NaiveDate {
        self.0
    }
}
