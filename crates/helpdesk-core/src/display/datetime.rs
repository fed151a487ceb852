//! Date and time formatting.

use std::fmt;

use jiff::{SignedDuration, Timestamp, tz::TimeZone};

/// A timestamp rendered in the system time zone.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let zoned = self.0.to_zoned(TimeZone::system());
        write!(f, "{}", zoned.strftime("%Y-%m-%d %H:%M:%S %Z"))
    }
}

/// Wall time between two timestamps, whole seconds, e.g. `3m 12s`.
pub struct Elapsed<'a> {
    pub from: &'a Timestamp,
    pub to: &'a Timestamp,
}

impl Elapsed<'_> {
    fn duration(&self) -> SignedDuration {
        let secs = self.to.duration_since(*self.from).as_secs().max(0);
        SignedDuration::from_secs(secs)
    }
}

impl fmt::Display for Elapsed<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let duration = self.duration();
        if duration.is_zero() {
            return write!(f, "0s");
        }
        write!(f, "{duration:#}")
    }
}
