use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Action tags recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditAction {
    #[serde(rename = "POST_CREATED")]
    PostCreated,
    #[serde(rename = "POST_UPDATED")]
    PostUpdated,
    #[serde(rename = "POST_DELETED")]
    PostDeleted,
    #[serde(rename = "UPLOAD_AUTHORIZED")]
    UploadAuthorized,
    #[serde(rename = "IMAGE_UPLOADED")]
    ImageUploaded,
}

/// Append-only record of one successful mutating action.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    pub action: AuditAction,
    pub performed_by: String,
    pub post_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl AuditLogEntry {
    pub fn new(action: AuditAction, performed_by: impl Into<String>, post_id: Uuid) -> Self {
        Self {
            action,
            performed_by: performed_by.into(),
            post_id,
            file_name: None,
            details: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_serialize_as_screaming_tags() {
        let entry = AuditLogEntry::new(AuditAction::PostCreated, "staff@example.edu", Uuid::new_v4());
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["action"], "POST_CREATED");
        assert_eq!(json["performedBy"], "staff@example.edu");
        assert!(json.get("fileName").is_none());
    }
}
