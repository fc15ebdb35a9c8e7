use anyhow::{anyhow, Result};

use crate::model::task::{Task, TaskId};
use crate::repository::traits::TaskRepository;

/// Process-lifetime task list. Insertion order is display order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    tasks: Vec<Task>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing list, e.g. a seed file.
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    fn position(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == *id)
    }
}

impl TaskRepository for InMemoryTaskRepository {
    fn create(&mut self, task: Task) -> Result<Task> {
        if self.position(&task.id).is_some() {
            return Err(anyhow!("Task with ID {} already exists", task.id));
        }
        self.tasks.push(task.clone());
        Ok(task)
    }

    fn list(&self) -> Result<Vec<Task>> {
        Ok(self.tasks.clone())
    }

    fn get(&self, id: &TaskId) -> Result<Task> {
        self.tasks
            .iter()
            .find(|t| t.id == *id)
            .cloned()
            .ok_or_else(|| anyhow!("Task with ID {} not found", id))
    }

    fn update(&mut self, task: &Task) -> Result<()> {
        if let Some(pos) = self.position(&task.id) {
            self.tasks[pos] = task.clone();
            Ok(())
        } else {
            Err(anyhow!("Task with ID {} not found", task.id))
        }
    }

    fn delete(&mut self, id: &TaskId) -> Result<Task> {
        match self.position(id) {
            Some(pos) => Ok(self.tasks.remove(pos)),
            None => Err(anyhow!("Task with ID {} not found", id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::Priority;
    use chrono::NaiveDate;

    fn task(n: u128, name: &str) -> Task {
        Task::new(
            TaskId::from_u128(n),
            name,
            "desc",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            Priority::Low,
        )
    }

    #[test]
    fn test_create_keeps_insertion_order() {
        let mut repo = InMemoryTaskRepository::new();
        repo.create(task(2, "b")).unwrap();
        repo.create(task(1, "a")).unwrap();
        let names: Vec<_> = repo.list().unwrap().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_create_rejects_duplicate_id() {
        let mut repo = InMemoryTaskRepository::with_tasks(vec![task(1, "a")]);
        assert!(repo.create(task(1, "again")).is_err());
        assert_eq!(repo.as_slice().len(), 1);
    }

    #[test]
    fn test_update_in_place() {
        let mut repo = InMemoryTaskRepository::with_tasks(vec![task(1, "a"), task(2, "b")]);
        let mut changed = task(1, "renamed");
        changed.priority = Priority::High;
        repo.update(&changed).unwrap();
        assert_eq!(repo.as_slice()[0], changed);
        assert_eq!(repo.as_slice()[1].name, "b");
    }

    #[test]
    fn test_missing_id_errors() {
        let mut repo = InMemoryTaskRepository::new();
        let id = TaskId::from_u128(9);
        assert!(repo.get(&id).is_err());
        assert!(repo.update(&task(9, "x")).is_err());
        assert!(repo.delete(&id).is_err());
    }
}
