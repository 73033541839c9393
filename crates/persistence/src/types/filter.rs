//! Filter expressions for recipe search.
//!
//! A numeric filter is written as an optional comparison operator immediately
//! followed by a decimal numeral:
//!
//! ```text
//! >=4.5    rating of at least 4.5
//! <=30     at most 30 minutes
//! 400      exactly 400 (operator defaults to `=`)
//! ```
//!
//! Anything that does not match this grammar is treated as if the filter had
//! not been supplied at all. Malformed input is never an error.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Anchored grammar for numeric filters. ASCII digits only, no whitespace.
static COMPARISON_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(<=|>=|=|<|>)?([0-9]+(?:\.[0-9]+)?)$").expect("comparison pattern is valid")
});

/// Comparison operator of a numeric filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CompareOp {
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    Le,
    /// `>=`
    Ge,
    /// `=` (default when no operator is written).
    #[default]
    Eq,
}

impl CompareOp {
    /// Returns the SQL operator token.
    ///
    /// This is the only way an operator reaches query text, so the set of
    /// possible tokens is closed.
    pub fn as_sql(&self) -> &'static str {
        match self {
            CompareOp::Lt => "<",
            CompareOp::Gt => ">",
            CompareOp::Le => "<=",
            CompareOp::Ge => ">=",
            CompareOp::Eq => "=",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for CompareOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "<" => Ok(CompareOp::Lt),
            ">" => Ok(CompareOp::Gt),
            "<=" => Ok(CompareOp::Le),
            ">=" => Ok(CompareOp::Ge),
            "=" => Ok(CompareOp::Eq),
            _ => Err(format!("unknown comparison operator: {}", s)),
        }
    }
}

/// A parsed numeric filter such as `>=4.5`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// The comparison operator.
    pub op: CompareOp,
    /// The right-hand side. Always finite.
    pub value: f64,
}

impl Comparison {
    /// Creates a comparison.
    pub fn new(op: CompareOp, value: f64) -> Self {
        Self { op, value }
    }

    /// Parses a filter expression.
    ///
    /// Returns `None` for absent, empty or malformed input. An interior space
    /// (`"<= 3"`) is malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use recipebox_persistence::types::{CompareOp, Comparison};
    ///
    /// let parsed = Comparison::parse(Some(">=4.5")).unwrap();
    /// assert_eq!(parsed.op, CompareOp::Ge);
    /// assert_eq!(parsed.value, 4.5);
    ///
    /// assert_eq!(Comparison::parse(Some("4")).unwrap().op, CompareOp::Eq);
    /// assert!(Comparison::parse(Some("abc")).is_none());
    /// assert!(Comparison::parse(None).is_none());
    /// ```
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let raw = raw?;
        if raw.is_empty() {
            return None;
        }

        let captures = COMPARISON_PATTERN.captures(raw)?;
        let op = match captures.get(1) {
            Some(token) => token.as_str().parse().ok()?,
            None => CompareOp::Eq,
        };

        // A long enough digit run overflows to infinity
        let value: f64 = captures.get(2)?.as_str().parse().ok()?;
        if !value.is_finite() {
            return None;
        }

        Some(Self { op, value })
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op, self.value)
    }
}

/// The set of optional filters accepted by recipe search.
///
/// Text filters are kept verbatim; numeric filters are already parsed, so a
/// malformed numeric value shows up here as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeFilters {
    /// Case-insensitive substring of the title.
    pub title: Option<String>,
    /// Exact cuisine.
    pub cuisine: Option<String>,
    /// Rating comparison.
    pub rating: Option<Comparison>,
    /// Total time comparison, in minutes.
    pub total_time: Option<Comparison>,
    /// Calorie comparison against the number found in the nutrients text.
    pub calories: Option<Comparison>,
}

impl RecipeFilters {
    /// Creates an empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds filters from raw, untrusted request values.
    ///
    /// Empty text filters are dropped. Numeric filters go through
    /// [`Comparison::parse`].
    pub fn from_raw(
        title: Option<&str>,
        cuisine: Option<&str>,
        rating: Option<&str>,
        total_time: Option<&str>,
        calories: Option<&str>,
    ) -> Self {
        Self {
            title: non_empty(title),
            cuisine: non_empty(cuisine),
            rating: Comparison::parse(rating),
            total_time: Comparison::parse(total_time),
            calories: Comparison::parse(calories),
        }
    }

    /// Sets the title filter.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the cuisine filter.
    pub fn with_cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine = Some(cuisine.into());
        self
    }

    /// Sets the rating filter.
    pub fn with_rating(mut self, comparison: Comparison) -> Self {
        self.rating = Some(comparison);
        self
    }

    /// Sets the total time filter.
    pub fn with_total_time(mut self, comparison: Comparison) -> Self {
        self.total_time = Some(comparison);
        self
    }

    /// Sets the calories filter.
    pub fn with_calories(mut self, comparison: Comparison) -> Self {
        self.calories = Some(comparison);
        self
    }

    /// Returns true if no filter is active.
    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    /// Returns the number of active filters.
    pub fn active_count(&self) -> usize {
        [
            self.title.is_some(),
            self.cuisine.is_some(),
            self.rating.is_some(),
            self.total_time.is_some(),
            self.calories.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_operator() {
        let parsed = Comparison::parse(Some(">=4.5")).unwrap();
        assert_eq!(parsed, Comparison::new(CompareOp::Ge, 4.5));
    }

    #[test]
    fn test_parse_defaults_to_equality() {
        let parsed = Comparison::parse(Some("4")).unwrap();
        assert_eq!(parsed, Comparison::new(CompareOp::Eq, 4.0));
    }

    #[test]
    fn test_parse_all_operators() {
        let cases = [
            ("<120", CompareOp::Lt, 120.0),
            (">3.8", CompareOp::Gt, 3.8),
            ("<=400", CompareOp::Le, 400.0),
            (">=4.5", CompareOp::Ge, 4.5),
            ("=30", CompareOp::Eq, 30.0),
        ];

        for (raw, op, value) in cases {
            let parsed = Comparison::parse(Some(raw)).unwrap();
            assert_eq!(parsed.op, op, "operator for {}", raw);
            assert_eq!(parsed.value, value, "value for {}", raw);
        }
    }

    #[test]
    fn test_parse_absent_and_empty() {
        assert!(Comparison::parse(None).is_none());
        assert!(Comparison::parse(Some("")).is_none());
    }

    #[test]
    fn test_parse_malformed() {
        for raw in [
            "abc", "<= 3", " 3", "3 ", ">>3", "=<3", "3.", ".5", "-1", "1e3", "4.5.1", "=",
            "<=", "3,5", "٣",
        ] {
            assert!(Comparison::parse(Some(raw)).is_none(), "{:?} should not parse", raw);
        }
    }

    #[test]
    fn test_parse_overflow_is_absent() {
        let huge = "9".repeat(400);
        assert!(Comparison::parse(Some(&huge)).is_none());
    }

    #[test]
    fn test_operator_sql_round_trip() {
        for op in [
            CompareOp::Lt,
            CompareOp::Gt,
            CompareOp::Le,
            CompareOp::Ge,
            CompareOp::Eq,
        ] {
            assert_eq!(op.as_sql().parse::<CompareOp>().unwrap(), op);
        }
        assert!("!=".parse::<CompareOp>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Comparison::new(CompareOp::Le, 400.0).to_string(), "<=400");
        assert_eq!(Comparison::new(CompareOp::Ge, 4.5).to_string(), ">=4.5");
    }

    #[test]
    fn test_filters_from_raw() {
        let filters =
            RecipeFilters::from_raw(Some("pie"), Some(""), Some(">=4"), Some("soon"), None);

        assert_eq!(filters.title.as_deref(), Some("pie"));
        assert!(filters.cuisine.is_none());
        assert_eq!(filters.rating, Some(Comparison::new(CompareOp::Ge, 4.0)));
        assert!(filters.total_time.is_none());
        assert!(filters.calories.is_none());
        assert_eq!(filters.active_count(), 2);
    }

    #[test]
    fn test_filters_empty() {
        assert!(RecipeFilters::new().is_empty());
        assert!(RecipeFilters::from_raw(None, None, Some("x"), None, Some("")).is_empty());
        assert!(!RecipeFilters::new().with_cuisine("Thai").is_empty());
    }
}
