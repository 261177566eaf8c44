//! Inbound webhook form handling.

use mb_core::CoreError;

use crate::error::BridgeError;

/// Decoded `application/x-www-form-urlencoded` body of one delivery.
#[derive(Debug, Clone, Default)]
pub struct FormParams {
    pairs: Vec<(String, String)>,
}

impl FormParams {
    /// # Errors
    ///
    /// Returns [`BridgeError::Body`] if the body is not form-encoded.
    pub fn parse(body: &[u8]) -> Result<Self, BridgeError> {
        let pairs = serde_urlencoded::from_bytes::<Vec<(String, String)>>(body)
            .map_err(|e| BridgeError::Body(e.to_string()))?;
        Ok(Self { pairs })
    }

    /// Value of `key`. A repeated key resolves to its last occurrence.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Value of a field that must be present and non-empty. `"0"` counts as
    /// empty. Each read is logged with its value at debug level.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingField`] if the field is absent, empty or
    /// `"0"`.
    pub fn required(&self, key: &str) -> Result<&str, CoreError> {
        match self.get(key).filter(|v| !v.is_empty() && *v != "0") {
            Some(value) => {
                tracing::debug!(param = key, value, "form param");
                Ok(value)
            }
            None => {
                tracing::warn!(param = key, "missing form param");
                Err(CoreError::MissingField {
                    field: key.to_string(),
                })
            }
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn parses_teamwork_delivery() {
        let params =
            FormParams::parse(b"event=MILESTONE.COMPLETED&objectId=901&accountId=12").unwrap();
        assert_eq!(params.required("event").unwrap(), "MILESTONE.COMPLETED");
        assert_eq!(params.required("objectId").unwrap(), "901");
        assert_eq!(params.get("accountId"), Some("12"));
    }

    #[test]
    fn decodes_percent_and_plus() {
        let params = FormParams::parse(b"note=Design+Review%21").unwrap();
        assert_eq!(params.get("note"), Some("Design Review!"));
    }

    #[rstest]
    #[case::absent(&b"event=MILESTONE.COMPLETED"[..])]
    #[case::empty(&b"event=MILESTONE.COMPLETED&objectId="[..])]
    #[case::no_body(&b""[..])]
    #[case::zero(&b"event=MILESTONE.COMPLETED&objectId=0"[..])]
    fn missing_or_empty_field_is_rejected(#[case] body: &[u8]) {
        let params = FormParams::parse(body).unwrap();
        let err = params.required("objectId").unwrap_err();
        assert!(matches!(err, CoreError::MissingField { field } if field == "objectId"));
    }

    #[test]
    fn zero_like_values_are_not_zero() {
        let params = FormParams::parse(b"objectId=00&event=0.0").unwrap();
        assert_eq!(params.required("objectId").unwrap(), "00");
        assert_eq!(params.required("event").unwrap(), "0.0");
    }

    #[test]
    fn last_duplicate_wins() {
        let params = FormParams::parse(b"objectId=1&objectId=2").unwrap();
        assert_eq!(params.get("objectId"), Some("2"));
    }

    #[test]
    fn whitespace_is_kept() {
        let params: FormParams = [("objectId", " 7 ")].into_iter().collect();
        assert_eq!(params.required("objectId").unwrap(), " 7 ");
    }
}
