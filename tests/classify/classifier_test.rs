use pagecursor::{
    classify::{
        ClassificationRule, ErrorClassifier, SubstringRule, classify,
        exception::{BackendException, FatalBackendError},
        sqlite_error::{ErrorCategory, SqliteError},
    },
    executor::error::{BackendError, DbErrorKind},
};

const QUERY: &str = "SELECT id FROM notes LIMIT 100 OFFSET 0";

#[test]
fn test_invalid_parameter_count_extracts_indices() -> Result<(), FatalBackendError> {
    let error = BackendError::database("InvalidParameterCount(3, 5)");
    let translated = classify(&error, QUERY)?;

    assert_eq!(translated.category(), ErrorCategory::ParameterIndexOutOfRange);
    assert_eq!(translated.parameter_index(), Some((3, 5)));
    assert_eq!(
        translated.message(),
        "Cannot bind argument at index 5 because the index is out of range. \
         The statement has 3 parameters."
    );
    assert_eq!(translated.query(), QUERY);
    Ok(())
}

#[test]
fn test_parameter_count_inside_longer_message() -> Result<(), FatalBackendError> {
    let error = BackendError::database(
        "DBError { info: \"InvalidParameterCount(1, 2)\", kind: Other }",
    );
    let translated = classify(&error, QUERY)?;
    assert_eq!(translated.parameter_index(), Some((1, 2)));
    Ok(())
}

#[test]
fn test_unparsable_parameter_count_degrades_to_generic() -> Result<(), FatalBackendError> {
    // Later rules are not consulted once the parameter rule has claimed the message.
    let error = BackendError::database("InvalidParameterCount(x, y) ConstraintViolation");
    let translated = classify(&error, QUERY)?;

    assert_eq!(translated.category(), ErrorCategory::QueryCompilationFailure);
    assert_eq!(
        translated.message(),
        format!(
            "error while compiling: \"{QUERY}\": InvalidParameterCount(x, y) ConstraintViolation"
        )
    );
    Ok(())
}

#[test]
fn test_constraint_violation_keeps_message_verbatim() -> Result<(), FatalBackendError> {
    let message =
        "SqliteFailure(Error { code: ConstraintViolation }, Some(\"UNIQUE constraint failed\"))";
    let translated = classify(&BackendError::database(message), QUERY)?;

    assert_eq!(translated.category(), ErrorCategory::ConstraintViolation);
    assert_eq!(translated.message(), message);
    assert_eq!(translated, SqliteError::constraint(message, QUERY));
    Ok(())
}

#[test]
fn test_disk_full_maps_to_storage_full() -> Result<(), FatalBackendError> {
    let message = "SqliteFailure(Error { code: DiskFull })";
    let translated = classify(&BackendError::database(message), QUERY)?;

    assert_eq!(translated.category(), ErrorCategory::StorageFull);
    assert_eq!(translated.message(), message);
    Ok(())
}

#[test]
fn test_corruption_is_formatted_with_query() -> Result<(), FatalBackendError> {
    let translated = classify(&BackendError::database("DatabaseCorrupt"), QUERY)?;

    assert_eq!(translated.category(), ErrorCategory::Corruption);
    assert_eq!(
        translated.message(),
        format!("error while compiling: \"{QUERY}\": DatabaseCorrupt")
    );
    Ok(())
}

#[test]
fn test_matching_is_case_sensitive() -> Result<(), FatalBackendError> {
    let translated = classify(&BackendError::database("diskfull"), QUERY)?;
    assert_eq!(translated.category(), ErrorCategory::QueryCompilationFailure);
    Ok(())
}

#[test]
fn test_unmatched_database_error_is_compile_failure() -> Result<(), FatalBackendError> {
    let error = BackendError::database("no such table: aa");
    let translated = classify(&error, QUERY)?;

    assert_eq!(translated.category(), ErrorCategory::QueryCompilationFailure);
    assert_eq!(
        translated.message(),
        format!("error while compiling: \"{QUERY}\": no such table: aa")
    );
    Ok(())
}

#[test]
fn test_missing_message_reports_unknown_error() -> Result<(), FatalBackendError> {
    let error = BackendError::Database {
        message: None,
        kind: Some(DbErrorKind::Other),
    };
    let translated = classify(&error, QUERY)?;

    assert_eq!(translated.category(), ErrorCategory::QueryCompilationFailure);
    assert_eq!(
        translated.message(),
        format!("Unknown error while compiling: \"{QUERY}\"")
    );
    assert!(translated.message().contains(QUERY));
    Ok(())
}

#[test]
fn test_other_variant_skips_message_rules() -> Result<(), FatalBackendError> {
    let error = BackendError::other("ConstraintViolation in some other subsystem");
    let translated = classify(&error, QUERY)?;

    assert_eq!(translated.category(), ErrorCategory::QueryCompilationFailure);
    assert_eq!(
        translated.message(),
        format!("error while compiling: \"{QUERY}\": ConstraintViolation in some other subsystem")
    );
    Ok(())
}

#[test]
fn test_fatal_variant_is_never_classified() {
    // A rule that would match everything proves the rules are bypassed.
    let classifier = ErrorClassifier::with_rules(vec![Box::new(SubstringRule::new(
        "",
        SqliteError::constraint,
    ))]);
    let error = BackendError::fatal("ConstraintViolation: backend poisoned");

    let result = classifier.classify(&error, QUERY);
    assert_eq!(
        result,
        Err(FatalBackendError {
            message: "ConstraintViolation: backend poisoned".to_string()
        })
    );
    assert!(classify(&error, QUERY).is_err());
}

#[test]
fn test_backend_exception_split() {
    let db = BackendException::from_error(&BackendError::database("boom"));
    assert_eq!(
        db,
        Ok(BackendException::Db {
            message: Some("boom".to_string())
        })
    );

    let other = BackendException::from_error(&BackendError::other("oops"));
    assert_eq!(
        other,
        Ok(BackendException::Generic {
            message: "oops".to_string()
        })
    );

    let fatal = BackendException::from_error(&BackendError::fatal("dead"));
    assert!(fatal.is_err());
}

#[test]
fn test_backend_exception_to_sqlite_error() {
    let exception = BackendException::Db {
        message: Some("DiskFull".to_string()),
    };
    assert_eq!(
        exception.to_sqlite_error(QUERY).category(),
        ErrorCategory::StorageFull
    );
    assert_eq!(exception.to_string(), "DiskFull");
}

struct LockedRule;

impl ClassificationRule for LockedRule {
    fn name(&self) -> &str {
        "Locked"
    }

    fn matches(&self, message: &str) -> bool {
        message.starts_with("database is locked")
    }

    fn build(&self, message: &str, query: &str) -> Option<SqliteError> {
        Some(SqliteError::full(message, query))
    }
}

#[test]
fn test_custom_rules_replace_defaults() -> Result<(), FatalBackendError> {
    let mut rules = ErrorClassifier::default_rules();
    rules.insert(0, Box::new(LockedRule));
    let classifier = ErrorClassifier::with_rules(rules);

    assert_eq!(
        classifier.rules().collect::<Vec<_>>(),
        vec![
            "Locked",
            "InvalidParameterCount",
            "ConstraintViolation",
            "DiskFull",
            "DatabaseCorrupt"
        ]
    );

    let translated = classifier.classify(&BackendError::database("database is locked"), QUERY)?;
    assert_eq!(translated.category(), ErrorCategory::StorageFull);

    let empty = ErrorClassifier::with_rules(Vec::new());
    let translated = empty.classify(&BackendError::database("DiskFull"), QUERY)?;
    assert_eq!(translated.category(), ErrorCategory::QueryCompilationFailure);
    Ok(())
}

#[test]
fn test_backend_error_accessors() {
    let error = BackendError::Database {
        message: Some("x".to_string()),
        kind: Some(DbErrorKind::Corrupt),
    };
    assert_eq!(error.localized(), Some("x"));
    assert_eq!(error.kind(), Some(DbErrorKind::Corrupt));
    assert!(!error.is_fatal());
    assert!(BackendError::fatal("y").is_fatal());
    assert_eq!(BackendError::other("z").localized(), Some("z"));
    assert_eq!(BackendError::other("z").kind(), None);
}
