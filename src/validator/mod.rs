//! Category term validation
//!
//! Checks whether a submitted word belongs to a category in a given language.
//! Term data comes from a [`TermSetProvider`]; the validator never reads files
//! or hardcodes tables itself.

mod builtin;
mod memory;

pub use builtin::BuiltinTerms;
pub use memory::MemoryTerms;

use crate::error::{GameError, GameResult};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// Terms for one category, keyed by language code (e.g. "pt-br")
pub type TermTable = HashMap<String, Vec<String>>;

/// Source of term tables
pub trait TermSetProvider: Send + Sync {
    /// The per-language table for `category`, if the provider knows it
    fn term_table(&self, category: &str) -> Option<TermTable>;

    /// Get the name of this provider
    fn name(&self) -> &str;
}

impl<P: TermSetProvider + ?Sized> TermSetProvider for Box<P> {
    fn term_table(&self, category: &str) -> Option<TermTable> {
        (**self).term_table(category)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Country,
    Color,
    /// Any other category a provider has data for
    Custom(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Country => "country",
            Category::Color => "color",
            Category::Custom(name) => name,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = GameError;

    fn from_str(s: &str) -> GameResult<Self> {
        let name = s.trim().to_lowercase();
        match name.as_str() {
            "" => Err(GameError::InvalidArgument(
                "Category name cannot be empty".to_string(),
            )),
            "country" => Ok(Category::Country),
            "color" => Ok(Category::Color),
            _ => Ok(Category::Custom(name)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Case {
    #[default]
    Insensitive,
    Sensitive,
}

/// Membership check for one category in one language.
///
/// The term set is loaded when the validator is built and never changes.
#[derive(Debug, Clone)]
pub struct CategoryValidator {
    category: Category,
    language: String,
    case: Case,
    terms: HashSet<String>,
}

impl CategoryValidator {
    /// Case-insensitive validator
    pub fn new<P: TermSetProvider + ?Sized>(
        provider: &P,
        category: Category,
        language: &str,
    ) -> GameResult<Self> {
        Self::with_case(provider, category, language, Case::Insensitive)
    }

    pub fn with_case<P: TermSetProvider + ?Sized>(
        provider: &P,
        category: Category,
        language: &str,
        case: Case,
    ) -> GameResult<Self> {
        let unsupported = || GameError::UnsupportedLanguage {
            category: category.to_string(),
            language: language.to_string(),
        };

        let mut table = provider
            .term_table(category.as_str())
            .ok_or_else(unsupported)?;
        let terms = table.remove(language).ok_or_else(unsupported)?;

        let terms: HashSet<String> = match case {
            Case::Insensitive => terms.iter().map(|t| t.to_lowercase()).collect(),
            Case::Sensitive => terms.into_iter().collect(),
        };

        tracing::debug!(
            provider = provider.name(),
            category = %category,
            language,
            terms = terms.len(),
            "Term set loaded"
        );

        Ok(Self {
            category,
            language: language.to_string(),
            case,
            terms,
        })
    }

    /// Whether `term` is a valid answer. Unknown terms are simply `false`.
    pub fn check(&self, term: &str) -> bool {
        match self.case {
            Case::Insensitive => self.terms.contains(&term.to_lowercase()),
            Case::Sensitive => self.terms.contains(term),
        }
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Language codes present in a table, sorted
pub fn available_languages(table: &TermTable) -> Vec<&str> {
    let mut languages: Vec<&str> = table.keys().map(String::as_str).collect();
    languages.sort_unstable();
    languages
}
