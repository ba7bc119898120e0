use kg_normalizer::core::error::{
    AppError, CODE_CONFIG, CODE_IO, CODE_MISSING_FIELD, CODE_PARSE, CODE_SHAPE, CODE_WRITE,
};
use kg_normalizer::core::{ErrorCategory, ErrorSeverity, KgDocument};
use kg_types::ModelError;
use std::io;
use std::path::Path;

#[test]
fn test_model_errors_map_to_categories() {
    let missing: AppError = ModelError::MissingField {
        section: "evaluationExamples",
        index: 2,
        field: "input",
    }
    .into();
    assert_eq!(missing.category, ErrorCategory::MissingFieldError);
    assert_eq!(missing.code, CODE_MISSING_FIELD);

    let domain: AppError = ModelError::MissingDomain.into();
    assert_eq!(domain.category, ErrorCategory::MissingFieldError);

    let shape: AppError = ModelError::UnexpectedShape {
        key: "scripts".to_string(),
        expected: "an object",
    }
    .into();
    assert_eq!(shape.category, ErrorCategory::ValidationError);
    assert_eq!(shape.code, CODE_SHAPE);
    assert_eq!(shape.message, "`scripts` must be an object");
}

#[test]
fn test_io_error_keeps_source() {
    let err: AppError = io::Error::new(io::ErrorKind::PermissionDenied, "denied").into();
    assert_eq!(err.category, ErrorCategory::IoError);
    assert_eq!(err.code, CODE_IO);
    assert!(err.source.is_some());
    assert!(err.to_string().starts_with("[KG-IO-001] IoError: denied"));
}

#[test]
fn test_constructors_and_context() {
    let err = AppError::write("disk full").with_path(Path::new("/kg/Law_KG.json"));
    assert_eq!(err.to_string(), "[KG-WRITE-001] WriteError: disk full");
    assert_eq!(err.code, CODE_WRITE);
    assert_eq!(err.context.get("path").map(String::as_str), Some("/kg/Law_KG.json"));
    assert_eq!(err.severity(), ErrorSeverity::Error);

    assert_eq!(AppError::config("bad").code, CODE_CONFIG);
    assert_eq!(AppError::parse("bad").category, ErrorCategory::ParseError);
    assert_eq!(AppError::parse("bad").severity(), ErrorSeverity::Warning);
}

#[test]
fn test_parse_errors() {
    let err = KgDocument::parse("not json").unwrap_err();
    assert_eq!(err.code, CODE_PARSE);

    let err = KgDocument::parse("\"just a string\"").unwrap_err();
    assert_eq!(err.category, ErrorCategory::ParseError);
    assert!(err.message.contains("a string"));
}
