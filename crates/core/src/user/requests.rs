//! API request types for user operations.

use serde::{Deserialize, Serialize};

use super::error::UserError;
use super::operations::{validate_new_user, validate_profile};
use super::types::NewUser;

/// Request payload for creating or updating a user.
///
/// The stored name is `"{first_name} {last_name}"`. On update `email` may be
/// omitted and is ignored when present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    pub address: String,
    pub age: u32,
}

impl UserRequest {
    /// Validates the request as a create and converts it.
    pub fn into_new_user(self) -> Result<NewUser, UserError> {
        let user = self.into_unchecked()?;
        validate_new_user(&user)?;
        Ok(user)
    }

    /// Validates the request as an update and converts it.
    pub fn into_update(self) -> Result<NewUser, UserError> {
        let user = self.into_unchecked()?;
        validate_profile(&user)?;
        Ok(user)
    }

    fn into_unchecked(self) -> Result<NewUser, UserError> {
        let first = self.first_name.trim();
        let last = self.last_name.trim();
        if first.is_empty() {
            return Err(UserError::EmptyFirstName);
        }
        if last.is_empty() {
            return Err(UserError::EmptyLastName);
        }
        Ok(NewUser {
            name: format!("{first} {last}"),
            email: self.email.trim().to_string(),
            address: self.address,
            age: self.age,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> UserRequest {
        UserRequest {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            email: "grace@example.com".to_string(),
            address: "Arlington".to_string(),
            age: 85,
        }
    }

    #[test]
    fn test_into_new_user_joins_names() {
        let user = request().into_new_user().unwrap();
        assert_eq!(user.name, "Grace Hopper");
        assert_eq!(user.email, "grace@example.com");
    }

    #[test]
    fn test_into_new_user_requires_names() {
        let missing_first = UserRequest {
            first_name: " ".to_string(),
            ..request()
        };
        assert_eq!(missing_first.into_new_user(), Err(UserError::EmptyFirstName));

        let missing_last = UserRequest {
            last_name: String::new(),
            ..request()
        };
        assert_eq!(missing_last.into_new_user(), Err(UserError::EmptyLastName));
    }

    #[test]
    fn test_into_update_allows_missing_email() {
        let update = UserRequest {
            email: String::new(),
            ..request()
        };
        assert!(update.clone().into_new_user().is_err());
        assert_eq!(update.into_update().unwrap().name, "Grace Hopper");
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{"firstName":"Grace","lastName":"Hopper","address":"Arlington","age":85}"#;
        let parsed: UserRequest = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.first_name, "Grace");
        assert!(parsed.email.is_empty());
    }
}
