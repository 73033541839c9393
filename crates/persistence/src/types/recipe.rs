//! Recipe records.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::nutrients::{Nutrients, extract_calories};

/// A stored recipe, as returned by the API.
///
/// Field names and nullability match the JSON shape served to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Row identity. Ordered; used as the sort tiebreaker.
    pub id: i64,
    /// Recipe title.
    pub title: String,
    /// Cuisine name.
    pub cuisine: Option<String>,
    /// Rating between 0 and 5.
    pub rating: Option<f64>,
    /// Preparation time in minutes.
    pub prep_time: Option<i64>,
    /// Cooking time in minutes.
    pub cook_time: Option<i64>,
    /// Total time in minutes.
    pub total_time: Option<i64>,
    /// Free-text description.
    pub description: Option<String>,
    /// Nutrient name to free-text value.
    pub nutrients: Option<Nutrients>,
    /// Free-text serving size, e.g. "8 servings".
    pub serves: Option<String>,
}

impl Recipe {
    /// Returns the calorie count parsed from the nutrients text, if any.
    pub fn calories(&self) -> Option<f64> {
        extract_calories(self.nutrients.as_ref())
    }
}

/// A recipe to be inserted.
///
/// Deserializes from import documents, which are loose about numbers:
/// numeric fields accept JSON numbers or numeric strings, and anything that
/// does not yield a finite number (including `"NaN"`) becomes `None`.
/// Unknown fields such as ingredients or source URLs are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewRecipe {
    /// Recipe title.
    pub title: String,
    /// Cuisine name.
    #[serde(default)]
    pub cuisine: Option<String>,
    /// Rating between 0 and 5.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub rating: Option<f64>,
    /// Preparation time in minutes.
    #[serde(default, deserialize_with = "lenient_minutes")]
    pub prep_time: Option<i64>,
    /// Cooking time in minutes.
    #[serde(default, deserialize_with = "lenient_minutes")]
    pub cook_time: Option<i64>,
    /// Total time in minutes.
    #[serde(default, deserialize_with = "lenient_minutes")]
    pub total_time: Option<i64>,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Nutrient name to free-text value.
    #[serde(default)]
    pub nutrients: Option<Nutrients>,
    /// Free-text serving size.
    #[serde(default)]
    pub serves: Option<String>,
}

impl NewRecipe {
    /// Creates a recipe with only a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Sets the cuisine.
    pub fn with_cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine = Some(cuisine.into());
        self
    }

    /// Sets the rating.
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Sets the total time in minutes.
    pub fn with_total_time(mut self, minutes: i64) -> Self {
        self.total_time = Some(minutes);
        self
    }

    /// Sets the nutrients.
    pub fn with_nutrients(mut self, nutrients: Nutrients) -> Self {
        self.nutrients = Some(nutrients);
        self
    }

    /// Sets a single nutrient value.
    pub fn with_nutrient(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.nutrients
            .get_or_insert_with(Nutrients::new)
            .insert(name.into(), Value::String(value.into()));
        self
    }
}

/// Converts a loosely typed JSON value to a finite number.
///
/// Numbers pass through, strings are trimmed and parsed, everything else is
/// `None`. Blank strings are `None` rather than zero.
pub fn to_nullable_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                trimmed.parse::<f64>().ok()
            }
        }
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(to_nullable_number))
}

fn lenient_minutes<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(to_nullable_number)
        .map(|n| n.round() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_recipe_json_shape() {
        let recipe = Recipe {
            id: 7,
            title: "Sweet Potato Pie".to_string(),
            cuisine: Some("Southern Recipes".to_string()),
            rating: Some(4.8),
            prep_time: Some(15),
            cook_time: Some(100),
            total_time: Some(115),
            description: None,
            nutrients: None,
            serves: Some("8 servings".to_string()),
        };

        let value = serde_json::to_value(&recipe).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["rating"], 4.8);
        assert!(value["description"].is_null());
        assert!(value["nutrients"].is_null());
        assert_eq!(value.as_object().unwrap().len(), 10);
    }

    #[test]
    fn test_recipe_calories() {
        let recipe = Recipe {
            id: 1,
            title: "Soup".to_string(),
            cuisine: None,
            rating: None,
            prep_time: None,
            cook_time: None,
            total_time: None,
            description: None,
            nutrients: NewRecipe::new("x").with_nutrient("calories", "389 kcal").nutrients,
            serves: None,
        };
        assert_eq!(recipe.calories(), Some(389.0));
    }

    #[test]
    fn test_new_recipe_lenient_numbers() {
        let doc = json!({
            "title": "Pie",
            "rating": "4.5",
            "prep_time": "NaN",
            "cook_time": 30,
            "total_time": "",
            "ingredients": ["flour"],
            "URL": "https://example.com/pie"
        });

        let recipe: NewRecipe = serde_json::from_value(doc).unwrap();
        assert_eq!(recipe.title, "Pie");
        assert_eq!(recipe.rating, Some(4.5));
        assert_eq!(recipe.prep_time, None);
        assert_eq!(recipe.cook_time, Some(30));
        assert_eq!(recipe.total_time, None);
        assert!(recipe.cuisine.is_none());
    }

    #[test]
    fn test_to_nullable_number() {
        assert_eq!(to_nullable_number(&json!(3)), Some(3.0));
        assert_eq!(to_nullable_number(&json!(" 42 ")), Some(42.0));
        assert_eq!(to_nullable_number(&json!("Infinity")), None);
        assert_eq!(to_nullable_number(&json!("abc")), None);
        assert_eq!(to_nullable_number(&json!(true)), None);
        assert_eq!(to_nullable_number(&Value::Null), None);
    }
}
