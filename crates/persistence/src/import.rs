//! Loading recipe documents for bulk import.
//!
//! An import file is a JSON array of recipe objects. Numeric fields may be
//! numbers or numeric strings; see [`NewRecipe`] for how loose values are
//! normalized. Fields the store does not keep (ingredients, instructions,
//! source URLs, regions) are ignored.

use std::path::Path;

use crate::error::{ImportError, StorageResult};
use crate::types::NewRecipe;

/// Reads and parses a recipe import file.
pub fn load_recipes_file<P: AsRef<Path>>(path: P) -> StorageResult<Vec<NewRecipe>> {
    let path = path.as_ref();
    let shown = path.display().to_string();

    let raw = std::fs::read_to_string(path).map_err(|source| ImportError::Read {
        path: shown.clone(),
        source,
    })?;

    let recipes = parse_recipes(&raw).map_err(|source| ImportError::Parse {
        path: shown.clone(),
        source,
    })?;

    tracing::debug!(path = %shown, count = recipes.len(), "Loaded recipe import file");
    Ok(recipes)
}

/// Parses a JSON array of recipe documents.
pub fn parse_recipes(raw: &str) -> Result<Vec<NewRecipe>, serde_json::Error> {
    serde_json::from_str(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use std::io::Write;

    const SAMPLE: &str = r#"[
        {
            "Contient": "Asia",
            "Country_State": "Thailand",
            "cuisine": "Thai",
            "title": "Pad Thai",
            "URL": "https://example.com/pad-thai",
            "rating": "4.6",
            "total_time": 35,
            "prep_time": "15",
            "cook_time": "NaN",
            "description": "Stir-fried noodles.",
            "ingredients": ["noodles", "tamarind"],
            "instructions": ["Soak noodles."],
            "nutrients": {"calories": "389 kcal", "fatContent": "12 g"},
            "serves": "4 servings"
        },
        {"title": "Plain Toast"}
    ]"#;

    #[test]
    fn test_parse_recipes() {
        let recipes = parse_recipes(SAMPLE).unwrap();
        assert_eq!(recipes.len(), 2);

        let pad_thai = &recipes[0];
        assert_eq!(pad_thai.title, "Pad Thai");
        assert_eq!(pad_thai.cuisine.as_deref(), Some("Thai"));
        assert_eq!(pad_thai.rating, Some(4.6));
        assert_eq!(pad_thai.total_time, Some(35));
        assert_eq!(pad_thai.prep_time, Some(15));
        assert_eq!(pad_thai.cook_time, None);
        assert_eq!(pad_thai.serves.as_deref(), Some("4 servings"));

        let toast = &recipes[1];
        assert_eq!(toast.rating, None);
        assert_eq!(toast.nutrients, None);
    }

    #[test]
    fn test_parse_rejects_non_array() {
        assert!(parse_recipes(r#"{"title": "Pad Thai"}"#).is_err());
    }

    #[test]
    fn test_load_recipes_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let recipes = load_recipes_file(file.path()).unwrap();
        assert_eq!(recipes.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_recipes_file("/nonexistent/recipes.json").unwrap_err();
        assert!(matches!(err, StorageError::Import(ImportError::Read { .. })));
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[{\"title\": ").unwrap();

        let err = load_recipes_file(file.path()).unwrap_err();
        assert!(matches!(err, StorageError::Import(ImportError::Parse { .. })));
    }
}
