//! System clock adapter.

use biznisweb_application::ports::clock::Clock;
use chrono::NaiveDate;

/// Today's date in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}
