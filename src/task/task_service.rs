use crate::error::{AppError, Result};
use crate::mail::Mailer;
use crate::task::reminder::schedule_reminder;
use crate::task::task_dto::{ListTasksQuery, UpdateTaskRequest};
use crate::task::task_models::Task;
use crate::task::task_repository::{TaskFilters, TaskRepository};
use chrono::Utc;
use mongodb::bson::{doc, oid::ObjectId, Document};
use std::sync::Arc;

/// Service layer for task-related business logic.
///
/// TODO: edit/toggle/delete operate by task id alone and never check that
/// the task's userEmail matches the caller; an authorization layer belongs
/// here before this runs anywhere multi-tenant in earnest.
#[derive(Clone)]
pub struct TaskService {
    repo: TaskRepository,
    mailer: Arc<dyn Mailer>,
}

impl TaskService {
    pub fn new(repo: TaskRepository, mailer: Arc<dyn Mailer>) -> Self {
        Self { repo, mailer }
    }

    /// Persist a new task and, if it carries a future reminder time, schedule
    /// the one-shot reminder email.
    pub async fn create_task(
        &self,
        user_email: &str,
        title: &str,
        description: &str,
        reminder_time: Option<String>,
    ) -> Result<()> {
        let task = Task::new(user_email, title, description, reminder_time.clone());
        self.repo.insert(&task).await?;

        if let Some(reminder_time) = reminder_time.filter(|r| !r.is_empty()) {
            schedule_reminder(
                self.mailer.clone(),
                user_email,
                title,
                description,
                &reminder_time,
            );
        }

        Ok(())
    }

    pub async fn list_tasks(&self, user_email: &str, query: &ListTasksQuery) -> Result<Vec<Task>> {
        self.repo
            .find_for_user(user_email, TaskFilters::from_query(query))
            .await
    }

    /// Apply an allow-listed partial update, always refreshing `updatedAt`.
    pub async fn edit_task(&self, task_id: &str, updates: UpdateTaskRequest) -> Result<()> {
        let id = parse_task_id(task_id)?;
        self.repo.update_set(id, build_update_document(&updates)).await
    }

    /// Flip a task's completion flag.
    pub async fn toggle_task_completion(&self, task_id: &str) -> Result<()> {
        let id = parse_task_id(task_id)?;

        let task = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Task not found".to_string()))?;

        self.repo
            .update_set(
                id,
                doc! {
                    "isCompleted": !task.is_completed,
                    "updatedAt": Utc::now().to_rfc3339(),
                },
            )
            .await
    }

    /// Unconditional delete by id; absent ids succeed silently. A pending
    /// reminder for the task is not cancelled.
    pub async fn delete_task(&self, task_id: &str) -> Result<()> {
        let id = parse_task_id(task_id)?;
        self.repo.delete(id).await
    }
}

fn parse_task_id(task_id: &str) -> Result<ObjectId> {
    ObjectId::parse_str(task_id).map_err(|_| AppError::BadRequest("Invalid task id".to_string()))
}

/// Build the `$set` document for an edit. Only the allow-listed fields ever
/// land here; `updatedAt` is always refreshed.
fn build_update_document(updates: &UpdateTaskRequest) -> Document {
    let mut set = Document::new();

    if let Some(ref title) = updates.title {
        set.insert("title", title.as_str());
    }
    if let Some(ref description) = updates.description {
        set.insert("description", description.as_str());
    }
    if let Some(ref due_date) = updates.due_date {
        set.insert("dueDate", due_date.as_str());
    }
    if let Some(ref priority) = updates.priority {
        set.insert("priority", priority.as_str());
    }
    if let Some(ref reminder_time) = updates.reminder_time {
        set.insert("reminderTime", reminder_time.as_str());
    }

    set.insert("updatedAt", Utc::now().to_rfc3339());
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_document_contains_only_provided_fields() {
        let updates = UpdateTaskRequest {
            title: Some("New title".into()),
            priority: Some("high".into()),
            ..Default::default()
        };
        let set = build_update_document(&updates);

        assert_eq!(set.get_str("title").unwrap(), "New title");
        assert_eq!(set.get_str("priority").unwrap(), "high");
        assert!(!set.contains_key("description"));
        assert!(!set.contains_key("dueDate"));
        assert!(!set.contains_key("reminderTime"));
        assert!(set.contains_key("updatedAt"));
    }

    #[test]
    fn test_empty_update_still_refreshes_updated_at() {
        let set = build_update_document(&UpdateTaskRequest::default());
        assert_eq!(set.len(), 1);
        assert!(set.contains_key("updatedAt"));
    }

    #[test]
    fn test_completion_flag_is_not_editable() {
        // isCompleted is not on the allow-list; only the toggle route flips it.
        let set = build_update_document(&UpdateTaskRequest::default());
        assert!(!set.contains_key("isCompleted"));
    }

    #[test]
    fn test_parse_task_id_rejects_garbage() {
        assert!(parse_task_id("not-an-object-id").is_err());
        assert!(parse_task_id("507f1f77bcf86cd799439011").is_ok());
    }
}
