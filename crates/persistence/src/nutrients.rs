//! Numeric values from free-text nutrition data.
//!
//! Nutrient values are human-readable strings such as `"389 kcal"` or
//! `"12.5g"`. Two rules turn them into numbers:
//!
//! - [`extract_calories`] runs in-process for display. It takes the first
//!   run of digits, optionally followed by a decimal fraction, anywhere in
//!   the text.
//! - [`strip_to_numeric`] runs inside the datastore for filtering (the SQLite
//!   backend registers it as [`NUMERIC_TEXT_FUNCTION`]). It removes every
//!   character that is not an ASCII digit or `.`; the SQL around it turns an
//!   empty result into `0`.
//!
//! The two rules agree on values like `"389 kcal"` but diverge on text with
//! several numbers or separators: `"1,200 kcal"` displays as `1` and filters
//! as `1200`.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// Nutrient name to free-text value, as stored on a recipe.
pub type Nutrients = serde_json::Map<String, Value>;

/// Keys that may hold the calorie value; the source data is inconsistent
/// about capitalization. Tried in order.
pub const CALORIE_KEYS: [&str; 3] = ["calories", "Calorie", "calorie"];

/// Name of the SQL scalar function wrapping [`strip_to_numeric`].
pub const NUMERIC_TEXT_FUNCTION: &str = "nutrient_digits";

static FIRST_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+(?:\.[0-9]+)?").expect("number pattern is valid"));

/// Returns the raw calorie value: the first calorie key holding a non-null
/// value.
pub fn calorie_value(nutrients: &Nutrients) -> Option<&Value> {
    CALORIE_KEYS
        .iter()
        .filter_map(|key| nutrients.get(*key))
        .find(|value| !value.is_null())
}

/// Extracts the calorie count from a recipe's nutrients.
///
/// Returns `None` when nutrients are absent, no calorie key is present, the
/// value is not a string, or the string contains no digits.
///
/// # Examples
///
/// ```
/// use recipebox_persistence::nutrients::{Nutrients, extract_calories};
/// use serde_json::json;
///
/// let nutrients: Nutrients = serde_json::from_value(json!({"calories": "389 kcal"})).unwrap();
/// assert_eq!(extract_calories(Some(&nutrients)), Some(389.0));
/// assert_eq!(extract_calories(None), None);
/// ```
pub fn extract_calories(nutrients: Option<&Nutrients>) -> Option<f64> {
    let text = calorie_value(nutrients?)?.as_str()?;
    first_number(text)
}

/// Parses the first decimal number found anywhere in `text`.
pub fn first_number(text: &str) -> Option<f64> {
    FIRST_NUMBER
        .find(text)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

/// Removes every character that is not an ASCII digit or `.`.
///
/// The result may be empty or contain several dots; the datastore casts it
/// leniently.
pub fn strip_to_numeric(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect()
}
