//! Article dates
//!
//! Front-matter carries dates in the fixed `DD-MM-YYYY` pattern. Parsing is
//! strict: anything that does not match the pattern is rejected, so a typo in
//! one article fails the whole build instead of silently sorting it wrong.

use std::fmt;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use crate::helpers::date::format_moment;

/// Front-matter date pattern (`31-12-2024`).
pub const FRONT_MATTER_FORMAT: &str = "%d-%m-%Y";

/// A parsed article date.
///
/// Ordering is plain calendar order, oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArticleDate(NaiveDate);

impl ArticleDate {
    /// Parse a front-matter date string.
    pub fn parse(s: &str) -> Result<Self, chrono::ParseError> {
        NaiveDate::parse_from_str(s.trim(), FRONT_MATTER_FORMAT).map(ArticleDate)
    }

    /// Signed difference in days (`self - other`).
    pub fn signed_days_since(&self, other: &ArticleDate) -> i64 {
        self.0.signed_duration_since(other.0).num_days()
    }

    /// Format with a Moment.js-style format string (e.g. `MMMM Do YYYY`).
    pub fn display(&self, format: &str) -> String {
        format_moment(&self.0, format)
    }

    /// The long human-readable form used on article pages.
    pub fn long_display(&self) -> String {
        self.display("MMMM Do YYYY")
    }

    /// The underlying calendar date.
    pub fn inner(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for ArticleDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(FRONT_MATTER_FORMAT))
    }
}

impl Serialize for ArticleDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
