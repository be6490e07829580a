//! The resolved search predicate
//!
//! A [`FilterPredicate`] is a conjunction of clauses. It is built once per
//! request and never mutated afterwards. Storage backends either evaluate it
//! directly through [`Filterable`] or translate it into their own query
//! language.

use crate::core::field::{FieldValue, Filterable};
use regex::{Regex, RegexBuilder};
use std::fmt;

/// A case-insensitive match on a literal value
///
/// Metacharacters in the literal are escaped, so `c.*h` only matches the
/// text `c.*h`.
#[derive(Clone)]
pub struct Pattern {
    literal: String,
    regex: Regex,
}

impl Pattern {
    /// Compile a literal into a case-insensitive substring matcher
    pub fn literal(value: &str) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(&regex::escape(value))
            .case_insensitive(true)
            .build()?;
        Ok(Self {
            literal: value.to_string(),
            regex,
        })
    }

    pub fn as_literal(&self) -> &str {
        &self.literal
    }

    /// The escaped regular expression source
    pub fn as_regex(&self) -> &str {
        self.regex.as_str()
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.is_match(haystack)
    }

    /// Two patterns are equivalent when they match the same texts
    pub fn is_equivalent(&self, other: &Pattern) -> bool {
        self.literal.to_lowercase() == other.literal.to_lowercase()
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.literal == other.literal
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/i", self.regex.as_str())
    }
}

/// A condition on a single field
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Field equals the literal
    Equals(String),
    /// Field contains the literal, ignoring case
    Matches(Pattern),
    /// Field lies in the closed interval `[from, to]`
    Range { from: String, to: String },
    /// Boolean field has this value
    Is(bool),
}

impl Condition {
    /// Evaluate against a field value; missing or mistyped values never match
    pub fn matches(&self, value: Option<&FieldValue>) -> bool {
        match (self, value) {
            (Condition::Equals(expected), Some(FieldValue::String(actual))) => actual == expected,
            (Condition::Matches(pattern), Some(FieldValue::String(actual))) => {
                pattern.is_match(actual)
            }
            (Condition::Range { from, to }, Some(FieldValue::String(actual))) => {
                from.as_str() <= actual.as_str() && actual.as_str() <= to.as_str()
            }
            (Condition::Is(expected), Some(FieldValue::Boolean(actual))) => actual == expected,
            _ => false,
        }
    }
}

/// One member of the conjunction
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// A condition on a named field
    Field {
        field: &'static str,
        condition: Condition,
    },
    /// Satisfied when any of the sub-predicates is
    AnyOf(Vec<FilterPredicate>),
}

impl Clause {
    pub fn field(field: &'static str, condition: Condition) -> Self {
        Clause::Field { field, condition }
    }

    pub fn matches<T: Filterable + ?Sized>(&self, record: &T) -> bool {
        match self {
            Clause::Field { field, condition } => {
                condition.matches(record.field_value(field).as_ref())
            }
            Clause::AnyOf(alternatives) => alternatives.iter().any(|p| p.matches(record)),
        }
    }
}

/// A conjunction of clauses; the empty predicate matches every record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterPredicate {
    clauses: Vec<Clause>,
}

impl FilterPredicate {
    pub fn new(clauses: Vec<Clause>) -> Self {
        Self { clauses }
    }

    pub fn match_all() -> Self {
        Self::default()
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn matches<T: Filterable + ?Sized>(&self, record: &T) -> bool {
        self.clauses.iter().all(|clause| clause.matches(record))
    }
}

impl FromIterator<Clause> for FilterPredicate {
    fn from_iter<I: IntoIterator<Item = Clause>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
