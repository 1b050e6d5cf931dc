// SPDX-License-Identifier: MIT

//! Custom GraphQL scalars.

use async_graphql::{InputValueError, InputValueResult, Scalar, ScalarType, Value};
use chrono::TimeZone;

/// SHA-256 content hash in lowercase hex. A file can be fetched from
/// `/file/{hash}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHash(pub String);

#[Scalar(name = "FileHash")]
impl ScalarType for FileHash {
    fn parse(value: Value) -> InputValueResult<Self> {
        match value {
            // Length is deliberately not enforced: seeded sample data uses
            // short placeholder names like "a.png".
            Value::String(s) => Ok(FileHash(s)),
            _ => Err(InputValueError::custom("Hash must be a string")),
        }
    }

    fn to_value(&self) -> Value {
        Value::String(self.0.clone())
    }
}

/// An absolute URL, carried as a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Url(pub String);

#[Scalar(name = "URL")]
impl ScalarType for Url {
    fn parse(value: Value) -> InputValueResult<Self> {
        match value {
            Value::String(s) if s.contains("://") => Ok(Url(s)),
            Value::String(_) => Err(InputValueError::custom("URL must be absolute")),
            _ => Err(InputValueError::custom("URL must be a string")),
        }
    }

    fn to_value(&self) -> Value {
        Value::String(self.0.clone())
    }
}

/// Date and time as milliseconds since the Unix epoch.
///
/// Numeric rather than a 32-bit seconds value, so it is immune to the
/// year-2038 overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeUtc(pub chrono::DateTime<chrono::Utc>);

#[Scalar(name = "DateTime")]
impl ScalarType for DateTimeUtc {
    fn parse(value: Value) -> InputValueResult<Self> {
        let millis = match &value {
            Value::Number(n) => n.as_i64(),
            _ => None,
        };
        let Some(millis) = millis else {
            return Err(InputValueError::custom(
                "DateTime must be epoch milliseconds",
            ));
        };
        match chrono::Utc.timestamp_millis_opt(millis) {
            chrono::LocalResult::Single(dt) => Ok(DateTimeUtc(dt)),
            _ => Err(InputValueError::custom("DateTime out of range")),
        }
    }

    fn to_value(&self) -> Value {
        Value::Number(self.0.timestamp_millis().into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_time_round_trip() {
        let dt = chrono::Utc.timestamp_millis_opt(1_577_804_400_000).unwrap();
        let value = DateTimeUtc(dt).to_value();
        assert_eq!(value, Value::Number(1_577_804_400_000i64.into()));

        let parsed = <DateTimeUtc as ScalarType>::parse(value).unwrap();
        assert_eq!(parsed.0, dt);
    }

    #[test]
    fn test_date_time_rejects_strings() {
        let result = <DateTimeUtc as ScalarType>::parse(Value::String("2020-01-01".into()));
        assert!(result.is_err());
    }

    #[test]
    fn test_url_requires_absolute() {
        assert!(<Url as ScalarType>::parse(Value::String("https://narumincho.com".into())).is_ok());
        assert!(<Url as ScalarType>::parse(Value::String("/relative/path".into())).is_err());
    }

    #[test]
    fn test_file_hash_requires_string() {
        assert!(<FileHash as ScalarType>::parse(Value::String("a.png".into())).is_ok());
        assert!(<FileHash as ScalarType>::parse(Value::Number(5.into())).is_err());
    }
}
