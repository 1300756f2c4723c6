use serde::{Deserialize, Serialize};

/// Access token and member URN for a user who connected LinkedIn.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, sqlx::FromRow)]
pub struct LinkedInToken {
    pub user_id: String,
    #[serde(skip_serializing)]
    pub access_token: String,
    pub linkedin_urn: String,
}

impl LinkedInToken {
    pub fn author_urn(&self) -> String {
        format!("urn:li:person:{}", self.linkedin_urn)
    }
}

/// Access token and X account id for a user who connected X.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, sqlx::FromRow)]
pub struct TwitterToken {
    pub user_id: String,
    #[serde(skip_serializing)]
    pub access_token: String,
    pub x_user_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_urn() {
        let token = LinkedInToken {
            user_id: "bruce".to_string(),
            access_token: "secret".to_string(),
            linkedin_urn: "abc123".to_string(),
        };

        assert_eq!(token.author_urn(), "urn:li:person:abc123");
    }

    #[test]
    fn test_access_token_is_not_serialized() {
        let token = TwitterToken {
            user_id: "bruce".to_string(),
            access_token: "secret".to_string(),
            x_user_id: "42".to_string(),
        };

        let json = serde_json::to_string(&token).unwrap();
        assert!(!json.contains("secret"));
    }
}
