//! Order search: tokenizer, command registry and filter resolver
//!
//! ```text
//! "paymentMethod:Cash AND currentWeek:2025-01-15"
//!        │ tokenize
//!        ▼
//! ["paymentMethod:Cash", "currentWeek:2025-01-15"]
//!        │ resolve
//!        ▼
//! FilterPredicate [paymentMethod ~ /Cash/i, orderDate in [2025-01-12, 2025-01-18]]
//! ```
//!
//! Malformed input is never an error. Phrases with an unknown command, an
//! empty value or an unusable value are dropped, so a query made only of
//! such phrases matches every order.

pub mod command;
pub mod predicate;
pub mod tokenizer;

pub use command::{CalendarPeriod, SearchCommand};
pub use predicate::{Clause, Condition, FilterPredicate, Pattern};
pub use tokenizer::tokenize;

/// Resolve phrases into a predicate, dropping those that do not resolve
pub fn resolve<S: AsRef<str>>(phrases: &[S]) -> FilterPredicate {
    phrases
        .iter()
        .filter_map(|phrase| resolve_phrase(phrase.as_ref()))
        .collect()
}

fn resolve_phrase(phrase: &str) -> Option<Clause> {
    let Some((name, value)) = phrase.split_once(':') else {
        tracing::debug!(phrase, "dropping search phrase without separator");
        return None;
    };
    let (name, value) = (name.trim(), value.trim());

    let Some(command) = SearchCommand::lookup(name) else {
        tracing::debug!(command = name, "dropping unknown search command");
        return None;
    };

    let clause = command.resolve(value);
    if clause.is_none() {
        tracing::debug!(command = name, value, "dropping unusable search value");
    }
    clause
}

/// Tokenize and resolve a raw search string in one step
pub fn parse_search(raw: Option<&str>) -> FilterPredicate {
    let predicate = resolve(&tokenize(raw));
    tracing::debug!(clauses = predicate.len(), "resolved search predicate");
    predicate
}
