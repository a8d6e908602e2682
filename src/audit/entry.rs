//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::UserId;

/// Types of operations that can be audited
///
/// Expenses are immutable, so there is no update operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// Types of entities that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Expense,
    User,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::Expense => write!(f, "Expense"),
            EntityType::User => write!(f, "User"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    pub entity_type: EntityType,

    pub entity_id: String,

    /// The user on whose behalf the change was made
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<UserId>,

    /// Human-readable description of the entity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    /// The entity before a delete
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// The entity after a create
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,
}

impl AuditEntry {
    /// Entry for a create operation
    pub fn create<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        owner: Option<UserId>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Create,
            entity_type,
            entity_id: entity_id.into(),
            owner,
            entity_name,
            before: None,
            after: serde_json::to_value(entity).ok(),
        }
    }

    /// Entry for a delete operation
    pub fn delete<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        owner: Option<UserId>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Delete,
            entity_type,
            entity_id: entity_id.into(),
            owner,
            entity_name,
            before: serde_json::to_value(entity).ok(),
            after: None,
        }
    }

    /// Override the timestamp
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Create.to_string(), "CREATE");
        assert_eq!(Operation::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_create_entry() {
        let owner = UserId::new();
        let entry = AuditEntry::create(
            EntityType::Expense,
            "exp-12345678",
            Some(owner),
            Some("Lunch".to_string()),
            &json!({"amount": 1250}),
        );

        assert_eq!(entry.operation, Operation::Create);
        assert_eq!(entry.owner, Some(owner));
        assert!(entry.before.is_none());
        assert_eq!(entry.after, Some(json!({"amount": 1250})));
    }

    #[test]
    fn test_delete_entry() {
        let entry = AuditEntry::delete(
            EntityType::Expense,
            "exp-12345678",
            None,
            None,
            &json!({"amount": 1250}),
        );

        assert_eq!(entry.operation, Operation::Delete);
        assert!(entry.before.is_some());
        assert!(entry.after.is_none());
    }

    #[test]
    fn test_serialization_skips_empty_fields() {
        let entry = AuditEntry::create(EntityType::User, "usr-1", None, None, &json!({}));
        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("owner"));
        assert!(!json.contains("before"));

        let back: AuditEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back.entity_type, EntityType::User);
    }

    #[test]
    fn test_human_readable_format() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 19, 8, 30, 0).unwrap();
        let entry = AuditEntry::create(
            EntityType::Expense,
            "exp-12345678",
            None,
            Some("Lunch".to_string()),
            &json!({}),
        )
        .at(ts);

        assert_eq!(
            entry.format_human_readable(),
            "[2025-03-19 08:30:00 UTC] CREATE Expense exp-12345678 (Lunch)"
        );
    }
}
