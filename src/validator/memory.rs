use super::{TermSetProvider, TermTable};
use crate::error::{GameError, GameResult};
use std::collections::HashMap;

/// Caller-populated term tables.
///
/// Can be filled in code or from a JSON document shaped like
/// `{"fruit": {"en-us": ["apple", "banana"]}}`.
#[derive(Debug, Clone, Default)]
pub struct MemoryTerms {
    tables: HashMap<String, TermTable>,
}

impl MemoryTerms {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(document: &str) -> GameResult<Self> {
        let tables: HashMap<String, TermTable> = serde_json::from_str(document)
            .map_err(|e| GameError::InvalidArgument(format!("Malformed term tables: {}", e)))?;

        // Keys that differ only by case merge into one lower-case category
        let mut terms = Self::new();
        for (category, table) in tables {
            for (language, list) in table {
                terms.insert(&category, &language, list);
            }
        }
        Ok(terms)
    }

    /// Add terms for a category and language, extending any existing list
    pub fn insert<I, S>(&mut self, category: &str, language: &str, terms: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tables
            .entry(category.to_lowercase())
            .or_default()
            .entry(language.to_string())
            .or_default()
            .extend(terms.into_iter().map(Into::into));
        self
    }

    pub fn categories(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl TermSetProvider for MemoryTerms {
    fn term_table(&self, category: &str) -> Option<TermTable> {
        self.tables.get(category).cloned()
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::{Category, CategoryValidator};

    #[test]
    fn test_from_json() {
        let provider = MemoryTerms::from_json(
            r#"{"Fruit": {"en-us": ["Apple", "banana"], "pt-br": ["maçã"]}}"#,
        )
        .unwrap();
        assert_eq!(provider.categories(), vec!["fruit"]);

        let validator =
            CategoryValidator::new(&provider, "fruit".parse::<Category>().unwrap(), "en-us")
                .unwrap();
        assert!(validator.check("apple"));
        assert!(validator.check("BANANA"));
        assert!(!validator.check("maçã"));
    }

    #[test]
    fn test_from_json_merges_keys_differing_by_case() {
        let provider = MemoryTerms::from_json(
            r#"{"Fruit": {"en-us": ["apple"]}, "fruit": {"en-us": ["pear"], "pt-br": ["uva"]}}"#,
        )
        .unwrap();
        assert_eq!(provider.categories(), vec!["fruit"]);

        let en = CategoryValidator::new(&provider, "fruit".parse::<Category>().unwrap(), "en-us")
            .unwrap();
        assert!(en.check("apple"));
        assert!(en.check("pear"));
        assert_eq!(en.len(), 2);

        let pt = CategoryValidator::new(&provider, "fruit".parse::<Category>().unwrap(), "pt-br")
            .unwrap();
        assert!(pt.check("uva"));
    }

    #[test]
    fn test_from_json_rejects_wrong_shape() {
        let err = MemoryTerms::from_json(r#"{"fruit": ["apple"]}"#).unwrap_err();
        assert!(matches!(err, GameError::InvalidArgument(_)));
    }

    #[test]
    fn test_insert_extends() {
        let mut provider = MemoryTerms::new();
        provider
            .insert("animal", "en-us", ["cat"])
            .insert("animal", "en-us", vec!["dog".to_string()]);

        let table = provider.term_table("animal").unwrap();
        assert_eq!(table["en-us"], vec!["cat", "dog"]);
        assert!(provider.term_table("plant").is_none());
    }
}
