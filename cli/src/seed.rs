use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use todomaster_core::Task;

/// Read an initial task list (JSON array) for the in-memory store.
pub fn load_seed(path: &Path) -> Result<Vec<Task>> {
    let file = File::open(path).with_context(|| format!("Failed to open seed {}", path.display()))?;
    let tasks: Vec<Task> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Invalid seed {}", path.display()))?;

    let mut seen = HashSet::new();
    for task in &tasks {
        if !seen.insert(task.id) {
            return Err(anyhow!("Duplicate task id {} in {}", task.id, path.display()));
        }
    }
    Ok(tasks)
}

/// Highest id in `tasks` read as a number, for continuing sequential ids.
pub fn last_id(tasks: &[Task]) -> u128 {
    tasks.iter().map(|t| t.id.as_uuid().as_u128()).max().unwrap_or(0)
}
