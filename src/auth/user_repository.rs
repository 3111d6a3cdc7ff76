use crate::error::Result;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};

/// Stored user record. `email` is the unique key; users are never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    pub password_hash: String,
}

#[derive(Clone)]
pub struct UserRepository {
    collection: Collection<User>,
}

impl UserRepository {
    pub fn new(db: Database) -> Self {
        Self {
            collection: db.collection("users"),
        }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = self.collection.find_one(doc! { "email": email }).await?;
        Ok(user)
    }

    pub async fn insert(&self, email: &str, password_hash: &str) -> Result<()> {
        self.collection
            .insert_one(User {
                id: None,
                email: email.to_string(),
                password_hash: password_hash.to_string(),
            })
            .await?;
        Ok(())
    }

    pub async fn update_password_hash(&self, email: &str, password_hash: &str) -> Result<()> {
        self.collection
            .update_one(
                doc! { "email": email },
                doc! { "$set": { "passwordHash": password_hash } },
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_bson_field_names() {
        let user = User {
            id: None,
            email: "u@x.com".to_string(),
            password_hash: "$2b$12$hash".to_string(),
        };
        let doc = mongodb::bson::to_document(&user).unwrap();
        assert_eq!(doc.get_str("email").unwrap(), "u@x.com");
        assert_eq!(doc.get_str("passwordHash").unwrap(), "$2b$12$hash");
        assert!(!doc.contains_key("_id"));
    }
}
