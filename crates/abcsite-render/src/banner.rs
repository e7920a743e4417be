//! Time-limited release announcement on the home page.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Format of configured cutoff timestamps (interpreted as UTC).
pub const CUTOFF_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parse a cutoff timestamp such as `2013-08-15T00:00:00`.
///
/// # Errors
///
/// Returns the chrono parse error if `value` doesn't match [`CUTOFF_FORMAT`].
pub fn parse_cutoff(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, CUTOFF_FORMAT).map(|naive| naive.and_utc())
}

/// Announcement shown until a cutoff instant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PromoBanner {
    cutoff: Option<DateTime<Utc>>,
}

impl PromoBanner {
    /// Banner visible strictly before `cutoff`. `None` never shows it.
    #[must_use]
    pub fn new(cutoff: Option<DateTime<Utc>>) -> Self {
        Self { cutoff }
    }

    /// Whether the banner shows at `now`.
    #[must_use]
    pub fn is_visible(&self, now: DateTime<Utc>) -> bool {
        self.cutoff.is_some_and(|cutoff| now < cutoff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(value: &str) -> DateTime<Utc> {
        parse_cutoff(value).unwrap()
    }

    #[test]
    fn test_visible_before_cutoff() {
        let banner = PromoBanner::new(Some(at("2013-08-15T00:00:00")));
        assert!(banner.is_visible(at("2013-08-14T23:59:59")));
    }

    #[test]
    fn test_hidden_after_cutoff() {
        let banner = PromoBanner::new(Some(at("2013-08-15T00:00:00")));
        assert!(!banner.is_visible(at("2013-08-15T00:00:01")));
    }

    #[test]
    fn test_hidden_at_cutoff() {
        let banner = PromoBanner::new(Some(at("2013-08-15T00:00:00")));
        assert!(!banner.is_visible(at("2013-08-15T00:00:00")));
    }

    #[test]
    fn test_no_cutoff_never_visible() {
        assert!(!PromoBanner::default().is_visible(at("1999-01-01T00:00:00")));
    }

    #[test]
    fn test_parse_cutoff_rejects_other_formats() {
        assert!(parse_cutoff("August 15, 2013").is_err());
        assert!(parse_cutoff("2013-08-15").is_err());
    }
}
