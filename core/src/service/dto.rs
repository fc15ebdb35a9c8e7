use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::task::{Priority, Task, TaskId};
use crate::time::DueDateFormat;

/// A task as shown on a card or table row.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TaskCard {
    pub id: TaskId,
    pub name: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub due_display: String,
    pub priority: Priority,
}

impl TaskCard {
    pub fn from_entity(task: Task, format: &DueDateFormat) -> Self {
        let due_display = format.render(task.due_date);
        Self {
            id: task.id,
            name: task.name,
            description: task.description,
            due_date: task.due_date,
            due_display,
            priority: task.priority,
        }
    }
}
