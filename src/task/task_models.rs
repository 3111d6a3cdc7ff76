use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_PRIORITY: &str = "medium";

/// A stored task. `due_date` and `reminder_time` are kept as the caller's
/// literal strings; `reminder_time` is only parsed when a reminder is
/// scheduled.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub id: Option<ObjectId>,
    pub title: String,
    pub description: String,
    pub due_date: Option<String>,
    pub priority: String,
    pub is_completed: bool,
    pub reminder_time: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_email: String,
}

impl Task {
    /// A fresh task in its creation-time state.
    pub fn new(
        user_email: &str,
        title: &str,
        description: &str,
        reminder_time: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            title: title.to_string(),
            description: description.to_string(),
            due_date: None,
            priority: DEFAULT_PRIORITY.to_string(),
            is_completed: false,
            reminder_time,
            created_at: now,
            updated_at: now,
            user_email: user_email.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_defaults() {
        let task = Task::new("u@x.com", "Title", "Desc", None);
        assert_eq!(task.priority, "medium");
        assert!(!task.is_completed);
        assert!(task.due_date.is_none());
        assert_eq!(task.created_at, task.updated_at);
        assert_eq!(task.user_email, "u@x.com");
    }

    #[test]
    fn test_task_wire_field_names() {
        let task = Task::new("u@x.com", "Title", "Desc", Some("2030-01-01T00:00:00Z".into()));
        let value = serde_json::to_value(&task).unwrap();
        let obj = value.as_object().unwrap();
        assert!(obj.contains_key("userEmail"));
        assert!(obj.contains_key("isCompleted"));
        assert!(obj.contains_key("reminderTime"));
        assert!(obj.contains_key("createdAt"));
        // Unset _id must not serialize into the insert document.
        assert!(!obj.contains_key("_id"));
    }
}
