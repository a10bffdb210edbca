//! DTOs for the save endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to store a URL under an optional alias.
///
/// A missing `url` deserializes to an empty string so that it is reported as a
/// validation failure on `url` rather than as an undecodable body.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveRequest {
    #[serde(default)]
    #[validate(length(min = 1, code = "required"), url)]
    pub url: String,

    /// Generated when absent or empty.
    #[serde(default)]
    pub alias: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub status: &'static str,
    pub alias: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn parse(body: &str) -> SaveRequest {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_alias_is_optional() {
        let request = parse(r#"{"url": "http://test.ru"}"#);

        assert_eq!(request.url, "http://test.ru");
        assert!(request.alias.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_missing_url_is_required() {
        let request = parse(r#"{"alias": "suc"}"#);

        let err = AppError::from(request.validate().unwrap_err());

        assert_eq!(err.field(), Some("url"));
        assert_eq!(err.to_string(), "field is required. Field: url");
    }

    #[test]
    fn test_malformed_url() {
        let request = parse(r#"{"url": "URL_TestCannotSaveInvalidURL", "alias": "x"}"#);

        let err = AppError::from(request.validate().unwrap_err());

        assert_eq!(err.to_string(), "field is not a valid URL. Field: url");
    }
}
