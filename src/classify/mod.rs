//! Translation of structured backend errors into SQL error categories.
//!
//! The backend reports most database failures as free text, so the category is
//! picked by an ordered list of message rules. The rules sit behind
//! [`ClassificationRule`] so they can be replaced by direct kind dispatch once
//! the backend reports structured kinds for every case.

pub mod exception;
pub mod sqlite_error;

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::{
    classify::{
        exception::{BackendException, FatalBackendError},
        sqlite_error::SqliteError,
    },
    executor::error::BackendError,
};

/// One message heuristic.
///
/// The first rule whose [`matches`](ClassificationRule::matches) accepts the
/// message decides the outcome. If its `build` then returns `None` the error
/// falls back to a generic compile failure; later rules are not consulted.
pub trait ClassificationRule: Send + Sync {
    fn name(&self) -> &str;

    fn matches(&self, message: &str) -> bool;

    fn build(&self, message: &str, query: &str) -> Option<SqliteError>;
}

/// `InvalidParameterCount(<count>, <index>)` from the binder.
pub struct InvalidParameterCountRule {
    pattern: Regex,
}

impl InvalidParameterCountRule {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"InvalidParameterCount\((\d+), (\d+)\)")
                .expect("Invalid regex pattern"),
        }
    }
}

impl Default for InvalidParameterCountRule {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassificationRule for InvalidParameterCountRule {
    fn name(&self) -> &str {
        "InvalidParameterCount"
    }

    fn matches(&self, message: &str) -> bool {
        message.contains("InvalidParameterCount")
    }

    fn build(&self, message: &str, query: &str) -> Option<SqliteError> {
        let captures = self.pattern.captures(message)?;
        let param_count = captures[1].parse().ok()?;
        let index = captures[2].parse().ok()?;
        Some(SqliteError::bind_index_out_of_range(
            param_count,
            index,
            query,
        ))
    }
}

/// Case-sensitive substring match mapped to a fixed error constructor.
pub struct SubstringRule {
    needle: &'static str,
    build: fn(&str, &str) -> SqliteError,
}

impl SubstringRule {
    pub fn new(needle: &'static str, build: fn(&str, &str) -> SqliteError) -> Self {
        Self { needle, build }
    }
}

impl ClassificationRule for SubstringRule {
    fn name(&self) -> &str {
        self.needle
    }

    fn matches(&self, message: &str) -> bool {
        message.contains(self.needle)
    }

    fn build(&self, message: &str, query: &str) -> Option<SqliteError> {
        Some((self.build)(message, query))
    }
}

pub struct ErrorClassifier {
    rules: Vec<Box<dyn ClassificationRule>>,
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorClassifier {
    pub fn new() -> Self {
        Self::with_rules(Self::default_rules())
    }

    pub fn with_rules(rules: Vec<Box<dyn ClassificationRule>>) -> Self {
        Self { rules }
    }

    /// The rule set matching the backend's current error texts, in priority order.
    pub fn default_rules() -> Vec<Box<dyn ClassificationRule>> {
        vec![
            Box::new(InvalidParameterCountRule::new()),
            Box::new(SubstringRule::new(
                "ConstraintViolation",
                SqliteError::constraint,
            )),
            Box::new(SubstringRule::new("DiskFull", SqliteError::full)),
            Box::new(SubstringRule::new("DatabaseCorrupt", SqliteError::corrupt)),
        ]
    }

    pub fn rules(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.name())
    }

    /// Classifies `error` raised while running `query`.
    ///
    /// The fatal variant comes back as `Err` without touching the rules.
    pub fn classify(
        &self,
        error: &BackendError,
        query: &str,
    ) -> Result<SqliteError, FatalBackendError> {
        let exception = BackendException::from_error(error)?;
        Ok(self.translate(&exception, query))
    }

    pub fn translate(&self, exception: &BackendException, query: &str) -> SqliteError {
        let translated = match exception {
            BackendException::Db { message } => self.classify_message(message.as_deref(), query),
            BackendException::Generic { message } => SqliteError::compile(message, query),
        };
        debug!(
            category = %translated.category(),
            query = %query,
            "classified backend error"
        );
        translated
    }

    /// Runs the message rules against a database error text.
    pub fn classify_message(&self, message: Option<&str>, query: &str) -> SqliteError {
        let Some(message) = message else {
            return SqliteError::unknown(query);
        };

        match self.rules.iter().find(|rule| rule.matches(message)) {
            Some(rule) => rule
                .build(message, query)
                .unwrap_or_else(|| SqliteError::compile(message, query)),
            None => SqliteError::compile(message, query),
        }
    }
}

static DEFAULT_CLASSIFIER: LazyLock<ErrorClassifier> = LazyLock::new(ErrorClassifier::new);

pub fn default_classifier() -> &'static ErrorClassifier {
    &DEFAULT_CLASSIFIER
}

/// Classifies with the default rule set.
pub fn classify(error: &BackendError, query: &str) -> Result<SqliteError, FatalBackendError> {
    default_classifier().classify(error, query)
}
