use serde::{Deserialize, Serialize};

/// A stored user. `id` and `email` never change after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub address: String,
    pub age: u32,
}

/// A user that has not been stored yet, or the replacement fields of an
/// update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub address: String,
    pub age: u32,
}

impl NewUser {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
        age: u32,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            address: address.into(),
            age,
        }
    }

    /// Builds the stored form with a store-assigned ID.
    pub fn into_user(self, id: i64) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            address: self.address,
            age: self.age,
        }
    }

    /// Applies these fields on top of `existing`, keeping its ID and email.
    pub fn apply_to(self, existing: &User) -> User {
        User {
            id: existing.id,
            email: existing.email.clone(),
            name: self.name,
            address: self.address,
            age: self.age,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> User {
        User {
            id: 9,
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            address: "12 St James's Square".to_string(),
            age: 36,
        }
    }

    #[test]
    fn test_into_user_assigns_id() {
        let user = NewUser::new("Alan Turing", "alan@example.com", "Wilmslow", 41).into_user(3);
        assert_eq!(user.id, 3);
        assert_eq!(user.email, "alan@example.com");
    }

    #[test]
    fn test_apply_to_keeps_id_and_email() {
        let patch = NewUser::new("Ada King", "countess@example.com", "Ockham Park", 37);
        let updated = patch.apply_to(&stored());

        assert_eq!(updated.id, 9);
        assert_eq!(updated.email, "ada@example.com");
        assert_eq!(updated.name, "Ada King");
        assert_eq!(updated.address, "Ockham Park");
        assert_eq!(updated.age, 37);
    }

    #[test]
    fn test_user_json_shape() {
        let json = serde_json::to_value(stored()).unwrap();
        assert_eq!(json["id"], 9);
        assert_eq!(json["email"], "ada@example.com");
        assert_eq!(json["age"], 36);
    }
}
