//! User Lookup/Create Service
//!
//! Stateless validation of the two `/user` operations. Nothing is persisted;
//! a successful call echoes the validated input back.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Validation failures of the user service
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UserError {
    #[error("invalid id")]
    InvalidId,

    #[error("invalid name")]
    InvalidName,
}

/// Lookup input: a non-negative integer id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserQuery {
    pub id: u64,
}

impl UserQuery {
    /// Parse the raw `id` query parameter.
    ///
    /// A leading `+` is accepted; negative numbers, values outside the
    /// signed 64-bit range and anything non-numeric are rejected.
    pub fn parse(raw: Option<&str>) -> Result<Self, UserError> {
        let raw = raw.filter(|s| !s.is_empty()).ok_or(UserError::InvalidId)?;
        let id: i64 = raw.parse().map_err(|_| UserError::InvalidId)?;
        let id = u64::try_from(id).map_err(|_| UserError::InvalidId)?;
        Ok(Self { id })
    }
}

/// Create input, as decoded from the request body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCreate {
    #[serde(default)]
    pub name: Option<String>,
}

impl UserCreate {
    /// Decode a JSON request body. Anything but a JSON object (or `null`)
    /// counts as a missing name.
    ///
    /// The `name` key matches case-insensitively (`Name`, `NAME`), with an
    /// exact `name` taking priority.
    pub fn from_json(body: &[u8]) -> Result<Self, UserError> {
        let value: Value = serde_json::from_slice(body).map_err(|_| UserError::InvalidName)?;

        let mut fields = match value {
            Value::Null => return Ok(Self::default()),
            Value::Object(fields) => fields,
            _ => return Err(UserError::InvalidName),
        };

        let key = fields
            .keys()
            .find(|key| *key == "name")
            .or_else(|| fields.keys().find(|key| key.eq_ignore_ascii_case("name")))
            .cloned();

        let name = match key.and_then(|key| fields.remove(&key)) {
            None | Some(Value::Null) => None,
            Some(Value::String(name)) => Some(name),
            Some(_) => return Err(UserError::InvalidName),
        };

        Ok(Self { name })
    }
}

/// Response of a successful lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserView {
    pub user_id: u64,
}

/// Response of a successful create
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedView {
    pub created: String,
}

/// Look a user up by id
pub fn lookup(query: UserQuery) -> UserView {
    UserView { user_id: query.id }
}

/// Validate the raw id and look the user up
pub fn lookup_raw(raw: Option<&str>) -> Result<UserView, UserError> {
    UserQuery::parse(raw).map(lookup)
}

/// Create a user from a decoded request
pub fn create(input: UserCreate) -> Result<CreatedView, UserError> {
    match input.name {
        Some(name) if !name.is_empty() => Ok(CreatedView { created: name }),
        _ => Err(UserError::InvalidName),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_echoes_id() {
        for id in ["0", "1", "42", "9223372036854775807"] {
            let view = lookup_raw(Some(id)).unwrap();
            assert_eq!(view.user_id.to_string(), id);
        }
    }

    #[test]
    fn test_lookup_plus_sign() {
        assert_eq!(lookup_raw(Some("+5")), Ok(UserView { user_id: 5 }));
    }

    #[test]
    fn test_lookup_rejects_bad_ids() {
        for raw in ["", "-1", "abc", "1.5", " 7", "9223372036854775808"] {
            assert_eq!(lookup_raw(Some(raw)), Err(UserError::InvalidId), "{raw:?}");
        }
    }

    #[test]
    fn test_lookup_missing_id() {
        assert_eq!(lookup_raw(None), Err(UserError::InvalidId));
    }

    #[test]
    fn test_create_echoes_name() {
        let input = UserCreate::from_json(br#"{"name": "Ada Lovelace"}"#).unwrap();
        let view = create(input).unwrap();
        assert_eq!(view.created, "Ada Lovelace");
    }

    #[test]
    fn test_create_whitespace_name_is_kept() {
        let input = UserCreate::from_json(br#"{"name": "  "}"#).unwrap();
        assert_eq!(create(input).unwrap().created, "  ");
    }

    #[test]
    fn test_create_name_key_ignores_case() {
        for body in [r#"{"Name": "bob"}"#, r#"{"NAME": "bob"}"#, r#"{"nAmE": "bob"}"#] {
            let input = UserCreate::from_json(body.as_bytes()).unwrap();
            assert_eq!(create(input).unwrap().created, "bob", "{body}");
        }
    }

    #[test]
    fn test_create_exact_name_key_wins() {
        let input = UserCreate::from_json(br#"{"Name": "other", "name": "bob"}"#).unwrap();
        assert_eq!(input.name.as_deref(), Some("bob"));
    }

    #[test]
    fn test_create_rejects_empty_or_missing_name() {
        for body in [
            r#"{"name": ""}"#,
            r#"{}"#,
            r#"{"name": null}"#,
            r#"{"username": "bob"}"#,
        ] {
            let input = UserCreate::from_json(body.as_bytes()).unwrap();
            assert_eq!(create(input), Err(UserError::InvalidName), "{body}");
        }
    }

    #[test]
    fn test_create_rejects_malformed_body() {
        for body in ["", "not json", r#"{"name": 5}"#, r#"["bob"]"#] {
            assert_eq!(
                UserCreate::from_json(body.as_bytes()),
                Err(UserError::InvalidName),
                "{body}"
            );
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(UserError::InvalidId.to_string(), "invalid id");
        assert_eq!(UserError::InvalidName.to_string(), "invalid name");
    }
}
