use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Task entity - a single to-do item as exposed over the API.
///
/// The soft-delete tombstone is a storage concern and never appears here;
/// a deleted task simply stops existing as far as callers can tell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier, assigned by the store on creation, never reused
    pub id: i64,
    /// Short label; never empty once persisted
    pub title: String,
    /// Free-form text, defaults to empty
    pub description: String,
    /// Completion flag
    pub done: bool,
    /// Set once by the store at creation
    pub created_at: DateTime<Utc>,
    /// Refreshed by the store on every mutation
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new task
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTask {
    #[validate(length(min = 1))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub done: bool,
}

/// DTO for updating an existing task.
///
/// String fields merge sparsely: an absent field or an empty incoming string
/// leaves the stored value untouched. `done` has no absent representation and
/// is always taken from the request (missing decodes as `false`). See
/// [`Task::apply_update`].
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub done: bool,
}

impl Task {
    /// Merge an update into this task.
    ///
    /// `title` and `description` are overwritten only when the incoming value
    /// is non-empty; `done` is overwritten unconditionally. One consequence:
    /// this endpoint cannot blank out a title or description, and cannot
    /// leave `done` unspecified. Timestamps are store-managed and not touched
    /// here.
    pub fn apply_update(&mut self, update: UpdateTask) {
        if let Some(title) = update.title {
            if !title.is_empty() {
                self.title = title;
            }
        }
        if let Some(description) = update.description {
            if !description.is_empty() {
                self.description = description;
            }
        }
        self.done = update.done;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task() -> Task {
        Task {
            id: 1,
            title: "Buy milk".to_string(),
            description: "Two liters".to_string(),
            done: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_apply_update_overwrites_non_empty_strings() {
        let mut task = sample_task();
        task.apply_update(UpdateTask {
            title: Some("New title".to_string()),
            description: None,
            done: true,
        });

        assert_eq!(task.title, "New title");
        assert_eq!(task.description, "Two liters");
    }

    #[test]
    fn test_apply_update_ignores_empty_strings() {
        let mut task = sample_task();
        task.apply_update(UpdateTask {
            title: Some(String::new()),
            description: Some(String::new()),
            done: true,
        });

        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.description, "Two liters");
    }

    #[test]
    fn test_apply_update_always_overwrites_done() {
        let mut task = sample_task();
        assert!(task.done);

        // `done` missing from the request decodes as false and still wins.
        task.apply_update(UpdateTask::default());

        assert!(!task.done);
        assert_eq!(task.title, "Buy milk");
    }

    #[test]
    fn test_update_task_deserializes_missing_fields() {
        let update: UpdateTask = serde_json::from_str(r#"{"done":true}"#).unwrap();
        assert!(update.title.is_none());
        assert!(update.description.is_none());
        assert!(update.done);
    }

    #[test]
    fn test_create_task_rejects_empty_title() {
        use validator::Validate;

        let input = CreateTask {
            title: String::new(),
            description: String::new(),
            done: false,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_task_serializes_camel_case_timestamps() {
        let task = sample_task();
        let value = serde_json::to_value(&task).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("deleted").is_none());
    }
}
