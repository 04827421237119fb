//! Document shapes stored in MongoDB and the request payloads that
//! produce them.
//!
//! Field names mirror the stored documents (`_id`, `password_hash`) so the
//! same types serve as both driver models and JSON responses; the password
//! hash is never serialized back out.

use bson::oid::ObjectId;
use bson::DateTime;
use serde::{Deserialize, Serialize};

use crate::error::{PortalError, Result};

/// Lifecycle of a complaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintStatus {
    Open,
    InProgress,
    Resolved,
}

/// A stored complaint document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Complaint {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub description: String,
    pub status: ComplaintStatus,
    /// Id of the registered user who filed it.
    pub created_by: ObjectId,
    pub created_at: DateTime,
}

/// Payload for filing a new complaint.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewComplaint {
    pub title: String,
    pub description: String,
}

impl NewComplaint {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(PortalError::BadRequest("title must not be empty".into()));
        }
        if self.title.len() > 200 {
            return Err(PortalError::BadRequest("title too long (max 200)".into()));
        }
        if self.description.trim().is_empty() {
            return Err(PortalError::BadRequest(
                "description must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// A stored user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime,
}

/// Register/login payload.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn validate(&self) -> Result<()> {
        if !self.email.contains('@') {
            return Err(PortalError::BadRequest("email is not valid".into()));
        }
        if self.password.len() < 8 {
            return Err(PortalError::BadRequest(
                "password must be at least 8 characters".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_snake_case() {
        let s = serde_json::to_string(&ComplaintStatus::InProgress).unwrap();
        assert_eq!(s, "\"in_progress\"");
    }

    #[test]
    fn user_never_serializes_password_hash() {
        let user = User {
            id: None,
            email: "a@b.c".into(),
            password_hash: "secret".into(),
            created_at: DateTime::now(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret"));
        assert!(!json.contains("password_hash"));
    }

    #[test]
    fn new_complaint_rejects_blank_fields() {
        let c = NewComplaint {
            title: "  ".into(),
            description: "broken street light".into(),
        };
        assert!(c.validate().is_err());

        let c = NewComplaint {
            title: "street light".into(),
            description: String::new(),
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn credentials_require_email_and_length() {
        let c = Credentials {
            email: "not-an-email".into(),
            password: "longenough".into(),
        };
        assert!(c.validate().is_err());

        let c = Credentials {
            email: "a@b.c".into(),
            password: "short".into(),
        };
        assert!(c.validate().is_err());

        let c = Credentials {
            email: "a@b.c".into(),
            password: "longenough".into(),
        };
        assert!(c.validate().is_ok());
    }
}
