use super::{TermSetProvider, TermTable};

const COUNTRY: &[(&str, &[&str])] = &[
    ("pt-br", &["brasil", "argentina", "polonia"]),
    ("en-us", &["brazil", "argentina", "poland"]),
];

const COLOR: &[(&str, &[&str])] = &[
    ("pt-br", &["vermelho", "verde", "azul"]),
    ("en-us", &["red", "green", "blue"]),
];

/// Small compiled-in tables for the country and color categories
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTerms;

impl TermSetProvider for BuiltinTerms {
    fn term_table(&self, category: &str) -> Option<TermTable> {
        let entries = match category {
            "country" => COUNTRY,
            "color" => COLOR,
            _ => return None,
        };

        Some(
            entries
                .iter()
                .map(|(language, terms)| {
                    (
                        language.to_string(),
                        terms.iter().map(|t| t.to_string()).collect(),
                    )
                })
                .collect(),
        )
    }

    fn name(&self) -> &str {
        "builtin"
    }
}
