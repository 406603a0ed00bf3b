//! Token extractors applied to normalized cell text.

pub mod patterns;

use crate::models::record::{Category, EvaluationMethod};

use patterns::{CATEGORY, CODE, EVALUATION, INTEGER, WHITESPACE};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from normalized cell text.
    fn extract(&self, text: &str) -> Option<Self::Output>;
}

/// Trim and collapse every whitespace run to a single space.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// Discipline code extractor.
pub struct CodeExtractor;

impl FieldExtractor for CodeExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<String> {
        CODE.find(text).map(|m| m.as_str().to_string())
    }
}

/// Category extractor.
pub struct CategoryExtractor;

impl FieldExtractor for CategoryExtractor {
    type Output = Category;

    fn extract(&self, text: &str) -> Option<Category> {
        CATEGORY
            .captures(text)
            .and_then(|caps| Category::from_code(&caps[1]))
    }
}

/// Evaluation method extractor.
pub struct EvaluationExtractor;

impl FieldExtractor for EvaluationExtractor {
    type Output = EvaluationMethod;

    fn extract(&self, text: &str) -> Option<EvaluationMethod> {
        EVALUATION
            .captures(text)
            .and_then(|caps| EvaluationMethod::from_code(&caps[1]))
    }
}

/// Non-negative integer extractor.
pub struct IntegerExtractor;

impl FieldExtractor for IntegerExtractor {
    type Output = u32;

    fn extract(&self, text: &str) -> Option<u32> {
        // Digit runs too long for u32 count as a miss.
        INTEGER.find(text).and_then(|m| m.as_str().parse().ok())
    }
}

/// Native and foreign discipline names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Names {
    pub native: Option<String>,
    pub foreign: Option<String>,
}

/// Extractor for a "native / foreign" name cell.
pub struct NamesExtractor;

impl FieldExtractor for NamesExtractor {
    type Output = Names;

    fn extract(&self, text: &str) -> Option<Names> {
        let non_empty = |part: &str| {
            let part = normalize_whitespace(part);
            (!part.is_empty()).then_some(part)
        };

        let names = match text.split_once('/') {
            Some((native, foreign)) => Names {
                native: non_empty(native),
                foreign: non_empty(foreign),
            },
            None => Names {
                native: non_empty(text),
                foreign: None,
            },
        };

        (names != Names::default()).then_some(names)
    }
}
