use jsonc_parser::parse_to_serde_value;

use crate::error::IngestError;
use crate::types::RawDataset;

/// Parse JSONC text (comments and trailing commas allowed) into an untyped
/// dataset.
///
/// No schema checks happen here. Text without any value, e.g. only
/// whitespace or comments, is a `ParseError`.
///
/// Example:
/// ```rust
/// use iam_dataset::parse_jsonc;
/// let dataset = parse_jsonc("{ \"a\": [1, 2,], // trailing\n }").unwrap();
/// assert_eq!(dataset.value()["a"][1], 2);
/// ```
pub fn parse_jsonc(text: &str) -> Result<RawDataset, IngestError> {
    parse_to_serde_value(text, &Default::default())
        .map_err(|e| IngestError::ParseError(e.to_string()))?
        .map(RawDataset::new)
        .ok_or_else(|| IngestError::ParseError("document contains no value".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use yare::parameterized;

    #[test]
    fn test_parse_strict_json() {
        let dataset = parse_jsonc(r#"{"serviceMap":{"S3":{"StringPrefix":"s3"}}}"#).unwrap();
        assert_eq!(dataset.value()["serviceMap"]["S3"]["StringPrefix"], "s3");
    }

    #[test]
    fn test_parse_tolerates_comments_and_trailing_commas() {
        let text = r#"
            // published dataset
            {
                "serviceMap": {
                    /* object storage */
                    "S3": { "StringPrefix": "s3", "Actions": ["GetObject", "PutObject",], },
                },
            }
        "#;
        let dataset = parse_jsonc(text).unwrap();
        assert_eq!(
            dataset.into_value(),
            json!({ "serviceMap": { "S3": { "StringPrefix": "s3", "Actions": ["GetObject", "PutObject"] } } })
        );
    }

    #[parameterized(
        unclosed_object = { "{\"a\": 1" },
        unclosed_array = { "[1, 2" },
        unterminated_string = { "{\"a\": \"b}" },
        two_values = { "{} {}" },
    )]
    fn test_parse_malformed_is_parse_error(text: &str) {
        let err = parse_jsonc(text).unwrap_err();
        assert!(matches!(err, IngestError::ParseError(_)));
    }

    #[parameterized(
        empty = { "" },
        whitespace = { "  \n\t" },
        comment_only = { "// nothing here" },
    )]
    fn test_parse_empty_is_parse_error(text: &str) {
        assert_eq!(
            parse_jsonc(text).unwrap_err(),
            IngestError::ParseError("document contains no value".to_string())
        );
    }
}
