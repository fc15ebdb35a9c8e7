use crate::model::task::{Task, TaskId};
use anyhow::Result;

pub trait TaskRepository {
    fn create(&mut self, task: Task) -> Result<Task>;
    fn list(&self) -> Result<Vec<Task>>;
    fn get(&self, id: &TaskId) -> Result<Task>;
    fn update(&mut self, task: &Task) -> Result<()>;
    fn delete(&mut self, id: &TaskId) -> Result<Task>;
}
