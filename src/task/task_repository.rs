use crate::error::Result;
use crate::task::task_dto::ListTasksQuery;
use crate::task::task_models::Task;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::FindOptions;
use mongodb::{Collection, Database};

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_SIZE: i64 = 10;

/// Resolved listing parameters for the store query.
#[derive(Debug, PartialEq)]
pub struct TaskFilters {
    pub is_completed: Option<bool>,
    pub sort: Option<Document>,
    pub skip: u64,
    pub limit: i64,
}

impl TaskFilters {
    /// Resolve raw query parameters.
    ///
    /// `page`/`size` fall back to 1/10 when absent or unparsable; values
    /// below 1 are clamped there, since the driver's skip is unsigned.
    /// `status` maps "completed"/"pending" onto the stored completion flag;
    /// other values are ignored. Sort is ascending unless `sort_order` is
    /// "desc" in any casing.
    pub fn from_query(query: &ListTasksQuery) -> Self {
        let page = parse_or(query.page.as_deref(), DEFAULT_PAGE).max(1);
        let size = parse_or(query.size.as_deref(), DEFAULT_SIZE).max(1);

        let is_completed = match query.status.as_deref() {
            Some("completed") => Some(true),
            Some("pending") => Some(false),
            _ => None,
        };

        let sort = query.sort_by.as_deref().filter(|s| !s.is_empty()).map(|field| {
            let direction: i32 = match query.sort_order.as_deref() {
                Some(order) if order.eq_ignore_ascii_case("desc") => -1,
                _ => 1,
            };
            let mut sort = Document::new();
            sort.insert(field, direction);
            sort
        });

        Self {
            is_completed,
            sort,
            skip: ((page - 1) * size) as u64,
            limit: size,
        }
    }
}

fn parse_or(value: Option<&str>, default: i64) -> i64 {
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}

#[derive(Clone)]
pub struct TaskRepository {
    collection: Collection<Task>,
}

impl TaskRepository {
    pub fn new(db: Database) -> Self {
        Self {
            collection: db.collection("tasks"),
        }
    }

    pub async fn insert(&self, task: &Task) -> Result<()> {
        self.collection.insert_one(task).await?;
        Ok(())
    }

    pub async fn find_by_id(&self, id: ObjectId) -> Result<Option<Task>> {
        let task = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(task)
    }

    /// Apply a `$set` document to a task by id. No ownership predicate.
    pub async fn update_set(&self, id: ObjectId, set: Document) -> Result<()> {
        self.collection
            .update_one(doc! { "_id": id }, doc! { "$set": set })
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: ObjectId) -> Result<()> {
        self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(())
    }

    pub async fn find_for_user(&self, user_email: &str, filters: TaskFilters) -> Result<Vec<Task>> {
        let mut filter = doc! { "userEmail": user_email };
        if let Some(is_completed) = filters.is_completed {
            filter.insert("isCompleted", is_completed);
        }

        let mut options = FindOptions::default();
        options.skip = Some(filters.skip);
        options.limit = Some(filters.limit);
        options.sort = filters.sort;

        let cursor = self.collection.find(filter).with_options(options).await?;
        let tasks = cursor.try_collect().await?;
        Ok(tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_defaults() {
        let filters = TaskFilters::from_query(&ListTasksQuery::default());
        assert_eq!(filters.skip, 0);
        assert_eq!(filters.limit, 10);
        assert!(filters.is_completed.is_none());
        assert!(filters.sort.is_none());
    }

    #[test]
    fn test_filters_pagination() {
        let query = ListTasksQuery {
            page: Some("2".into()),
            size: Some("5".into()),
            ..Default::default()
        };
        let filters = TaskFilters::from_query(&query);
        assert_eq!(filters.skip, 5);
        assert_eq!(filters.limit, 5);
    }

    #[test]
    fn test_filters_unparsable_falls_back() {
        let query = ListTasksQuery {
            page: Some("abc".into()),
            size: Some("".into()),
            ..Default::default()
        };
        let filters = TaskFilters::from_query(&query);
        assert_eq!(filters.skip, 0);
        assert_eq!(filters.limit, 10);
    }

    #[test]
    fn test_filters_status_maps_to_completion_flag() {
        let completed = ListTasksQuery {
            status: Some("completed".into()),
            ..Default::default()
        };
        assert_eq!(TaskFilters::from_query(&completed).is_completed, Some(true));

        let pending = ListTasksQuery {
            status: Some("pending".into()),
            ..Default::default()
        };
        assert_eq!(TaskFilters::from_query(&pending).is_completed, Some(false));

        let unknown = ListTasksQuery {
            status: Some("archived".into()),
            ..Default::default()
        };
        assert_eq!(TaskFilters::from_query(&unknown).is_completed, None);
    }

    #[test]
    fn test_filters_sort_order_case_insensitive() {
        let query = ListTasksQuery {
            sort_by: Some("createdAt".into()),
            sort_order: Some("DESC".into()),
            ..Default::default()
        };
        let filters = TaskFilters::from_query(&query);
        assert_eq!(filters.sort, Some(doc! { "createdAt": -1 }));

        let query = ListTasksQuery {
            sort_by: Some("priority".into()),
            sort_order: Some("asc".into()),
            ..Default::default()
        };
        let filters = TaskFilters::from_query(&query);
        assert_eq!(filters.sort, Some(doc! { "priority": 1 }));
    }
}
