use crate::task::task_models::Task;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub reminder_time: Option<String>,
}

/// Partial update. Serde drops any field not listed here, which is the
/// edit allow-list: title, description, dueDate, priority, reminderTime.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub priority: Option<String>,
    pub reminder_time: Option<String>,
}

/// Query parameters for GET /api/tasks. Numbers arrive as raw strings so an
/// unparsable value falls back to its default instead of rejecting the
/// request.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListTasksQuery {
    pub page: Option<String>,
    pub size: Option<String>,
    pub status: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TaskListResponse {
    pub tasks: Vec<Task>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_ignores_unknown_fields() {
        let req: UpdateTaskRequest = serde_json::from_str(
            r#"{"title":"T","isCompleted":true,"userEmail":"evil@x.com","_id":"123"}"#,
        )
        .unwrap();
        assert_eq!(req.title.as_deref(), Some("T"));
        assert!(req.description.is_none());
    }

    #[test]
    fn test_list_query_field_names() {
        let q: ListTasksQuery = serde_json::from_str(
            r#"{"page":"2","size":"5","status":"completed","sortBy":"createdAt","sortOrder":"desc"}"#,
        )
        .unwrap();
        assert_eq!(q.page.as_deref(), Some("2"));
        assert_eq!(q.sort_by.as_deref(), Some("createdAt"));
        assert_eq!(q.sort_order.as_deref(), Some("desc"));
    }
}
