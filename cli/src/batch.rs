//! Scripted runs: one form action per line against an in-memory store.

use std::io::{BufRead, Write};

use anyhow::{anyhow, bail, Result};
use chrono::NaiveDate;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use todomaster_core::{
    apply_to_draft, parse_args, split_command_line, DueDateFormat, IdGenerator, NoticeLevel,
    NoticeLog, Task, TaskCard, TaskFormUseCase, TaskId, TaskRepository, TaskStore,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(Vec<String>),
    Edit(String, Vec<String>),
    Set(Vec<String>),
    Save,
    Submit,
    Cancel,
    Delete(String),
    List,
}

impl Command {
    pub fn parse(words: &[String]) -> Result<Self> {
        let (name, args) = words
            .split_first()
            .ok_or_else(|| anyhow!("Empty command"))?;
        let args = args.to_vec();

        let command = match name.to_lowercase().as_str() {
            "add" => Command::Add(args),
            "edit" => {
                let (reference, rest) = args
                    .split_first()
                    .ok_or_else(|| anyhow!("Usage: edit <position|id> [key:value ...]"))?;
                Command::Edit(reference.clone(), rest.to_vec())
            }
            "set" => Command::Set(args),
            "save" => Command::Save,
            "submit" => Command::Submit,
            "cancel" => Command::Cancel,
            "delete" | "del" | "rm" => match args.as_slice() {
                [reference] => Command::Delete(reference.clone()),
                _ => bail!("Usage: delete <position|id>"),
            },
            "list" | "ls" => Command::List,
            other => bail!("Unknown command: {}", other),
        };
        Ok(command)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub commands: usize,
    pub errors: usize,
}

pub struct Batch<'a, R: TaskRepository, G: IdGenerator> {
    store: &'a mut TaskStore<R, G>,
    notices: NoticeLog,
    today: NaiveDate,
    format: DueDateFormat,
}

impl<'a, R: TaskRepository, G: IdGenerator> Batch<'a, R, G> {
    pub fn new(store: &'a mut TaskStore<R, G>, today: NaiveDate, format: DueDateFormat) -> Self {
        Self {
            store,
            notices: NoticeLog::new(),
            today,
            format,
        }
    }

    pub fn run<I: BufRead, W: Write>(&mut self, input: I, out: &mut W) -> Result<BatchSummary> {
        let mut summary = BatchSummary::default();

        for (idx, line) in input.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            summary.commands += 1;

            let result = split_command_line(line)
                .and_then(|words| Command::parse(&words))
                .and_then(|command| self.execute(command, out));
            if let Err(e) = result {
                tracing::warn!(line = idx + 1, error = %e, "batch command failed");
                writeln!(out, "✖ line {}: {}", idx + 1, e)?;
                summary.errors += 1;
            }

            for notice in self.notices.drain() {
                let icon = match notice.level {
                    NoticeLevel::Success => "✔",
                    NoticeLevel::Error => {
                        summary.errors += 1;
                        "✖"
                    }
                };
                writeln!(out, "{} {}", icon, notice.message)?;
            }
        }

        Ok(summary)
    }

    fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<()> {
        match command {
            Command::Add(args) => {
                if self.store.is_editing() {
                    bail!("Finish or cancel the current edit first");
                }
                self.fill(&args, out)?;
                TaskFormUseCase::new(self.store, &mut self.notices).add();
            }
            Command::Edit(reference, args) => {
                let id = resolve(&self.store.tasks()?, &reference)?;
                if TaskFormUseCase::new(self.store, &mut self.notices).begin_edit(&id) {
                    self.fill(&args, out)?;
                }
            }
            Command::Set(args) => self.fill(&args, out)?,
            Command::Save => {
                TaskFormUseCase::new(self.store, &mut self.notices).save();
            }
            Command::Submit => {
                TaskFormUseCase::new(self.store, &mut self.notices).submit();
            }
            Command::Cancel => TaskFormUseCase::new(self.store, &mut self.notices).cancel(),
            Command::Delete(reference) => {
                let id = resolve(&self.store.tasks()?, &reference)?;
                TaskFormUseCase::new(self.store, &mut self.notices).delete(&id);
            }
            Command::List => {
                let cards = self.cards()?;
                writeln!(out, "{}", render_table(&cards))?;
            }
        }
        Ok(())
    }

    fn fill<W: Write>(&mut self, args: &[String], out: &mut W) -> Result<()> {
        let warnings = apply_to_draft(parse_args(args), self.store.draft_mut(), self.today);
        for warning in warnings {
            writeln!(out, "! {}", warning)?;
        }
        Ok(())
    }

    pub fn cards(&self) -> Result<Vec<TaskCard>> {
        Ok(self
            .store
            .tasks()?
            .into_iter()
            .map(|t| TaskCard::from_entity(t, &self.format))
            .collect())
    }
}

/// A 1-based list position, a full id, or a unique id prefix.
pub fn resolve(tasks: &[Task], reference: &str) -> Result<TaskId> {
    if let Ok(pos) = reference.parse::<usize>() {
        return match pos.checked_sub(1).and_then(|i| tasks.get(i)) {
            Some(task) => Ok(task.id),
            None => Err(anyhow!("No task at position {}", pos)),
        };
    }
    if let Ok(id) = reference.parse::<TaskId>() {
        return Ok(id);
    }

    let needle = reference.to_lowercase();
    let matches: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.id.to_string().starts_with(&needle))
        .collect();
    match matches.as_slice() {
        [task] => Ok(task.id),
        [] => Err(anyhow!("No task matches '{}'", reference)),
        _ => Err(anyhow!("Ambiguous id prefix '{}'", reference)),
    }
}

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Due Date")]
    due: String,
    #[tabled(rename = "Priority")]
    priority: String,
}

pub fn render_table(cards: &[TaskCard]) -> String {
    if cards.is_empty() {
        return "No tasks found.".to_string();
    }

    let rows = cards.iter().enumerate().map(|(i, card)| TaskRow {
        position: i + 1,
        id: card.id.short(),
        name: card.name.clone(),
        description: card.description.clone(),
        due: card.due_display.clone(),
        priority: card.priority.to_string(),
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use todomaster_core::{InMemoryTaskRepository, Priority, SequentialIds};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
    }

    fn run_script(
        store: &mut TaskStore<InMemoryTaskRepository, SequentialIds>,
        script: &str,
    ) -> (BatchSummary, String) {
        let mut out = Vec::new();
        let summary = Batch::new(store, today(), DueDateFormat::default())
            .run(script.as_bytes(), &mut out)
            .unwrap();
        (summary, String::from_utf8(out).unwrap())
    }

    fn new_store() -> TaskStore<InMemoryTaskRepository, SequentialIds> {
        TaskStore::with_parts(InMemoryTaskRepository::new(), SequentialIds::new())
    }

    #[test]
    fn test_command_parse() {
        let words = |s: &str| split_command_line(s).unwrap();
        assert_eq!(Command::parse(&words("save")).unwrap(), Command::Save);
        assert_eq!(
            Command::parse(&words("edit 2 pri:H")).unwrap(),
            Command::Edit("2".to_string(), vec!["pri:H".to_string()])
        );
        assert_eq!(
            Command::parse(&words("rm 1")).unwrap(),
            Command::Delete("1".to_string())
        );
        assert!(Command::parse(&words("delete")).is_err());
        assert!(Command::parse(&words("edit")).is_err());
        assert!(Command::parse(&words("frobnicate")).is_err());
    }

    #[test]
    fn test_buy_milk_script() {
        let mut store = new_store();
        let script = r#"
            # the reference scenario
            add Buy milk desc:"2% milk" due:2024-01-01 pri:L
            edit 1 pri:High
            save
            delete 1
        "#;

        let (summary, out) = run_script(&mut store, script);

        assert_eq!(summary, BatchSummary { commands: 4, errors: 0 });
        assert_eq!(
            out.lines().collect::<Vec<_>>(),
            vec![
                "✔ Task added successfully",
                "✔ Task updated successfully",
                "✔ Task deleted successfully",
            ]
        );
        assert!(store.tasks().unwrap().is_empty());
    }

    #[test]
    fn test_edit_keeps_id_and_position() {
        let mut store = new_store();
        let script = "add a desc:x due:2024-01-01\nadd b desc:y due:2024-01-02\nedit 2 pri:H name:B\nsubmit\n";

        run_script(&mut store, script);

        let tasks = store.tasks().unwrap();
        assert_eq!(tasks[1].id, TaskId::from_u128(2));
        assert_eq!(tasks[1].name, "B");
        assert_eq!(tasks[1].priority, Priority::High);
        assert_eq!(tasks[0].name, "a");
    }

    #[test]
    fn test_validation_error_is_reported_and_counted() {
        let mut store = new_store();
        let (summary, out) = run_script(&mut store, "add Buy milk due:tomorrow\n");

        assert_eq!(summary.errors, 1);
        assert_eq!(out.trim(), "✖ Please fill in all fields");
        assert!(store.tasks().unwrap().is_empty());
        // Draft keeps what was typed
        assert_eq!(store.draft().due_date, NaiveDate::from_ymd_opt(2024, 1, 4));
    }

    #[test]
    fn test_set_then_submit_and_warnings() {
        let mut store = new_store();
        let script = "set name:Report desc:Quarterly due:fri pri:urgent\nsubmit\n";

        let (summary, out) = run_script(&mut store, script);

        assert_eq!(summary.errors, 0);
        assert!(out.starts_with("! Unknown priority: 'urgent'"));
        let tasks = store.tasks().unwrap();
        assert_eq!(tasks[0].due_date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(tasks[0].priority, Priority::Low);
    }

    #[test]
    fn test_add_while_editing_is_refused() {
        let mut store = new_store();
        let script = "add a desc:x due:today\nedit 1\nadd b desc:y due:today\ncancel\n";

        let (summary, out) = run_script(&mut store, script);

        assert_eq!(summary.errors, 1);
        assert!(out.contains("line 3: Finish or cancel the current edit first"));
        assert_eq!(store.len().unwrap(), 1);
        assert!(!store.is_editing());
    }

    #[test]
    fn test_unknown_lines_do_not_stop_the_run() {
        let mut store = new_store();
        let script = "dance\ndelete 5\nadd a desc:x due:today\n";

        let (summary, out) = run_script(&mut store, script);

        assert_eq!(summary, BatchSummary { commands: 3, errors: 2 });
        assert!(out.contains("line 1: Unknown command: dance"));
        assert!(out.contains("line 2: No task at position 5"));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_delete_by_unknown_full_id_reports_success() {
        let mut store = new_store();
        let script = "delete 00000000-0000-0000-0000-000000000009\n";

        let (summary, out) = run_script(&mut store, script);

        assert_eq!(summary.errors, 0);
        assert_eq!(out.trim(), "✔ Task deleted successfully");
    }

    #[test]
    fn test_resolve_prefix() {
        let tasks = vec![
            Task::new(TaskId::from_u128(0xab << 120), "a", "d", today(), Priority::Low),
            Task::new(TaskId::from_u128(0xac << 120), "b", "d", today(), Priority::Low),
        ];
        assert_eq!(resolve(&tasks, "ab").unwrap(), tasks[0].id);
        assert_eq!(resolve(&tasks, "AC").unwrap(), tasks[1].id);
        assert!(resolve(&tasks, "a").is_err());
        assert!(resolve(&tasks, "ff").is_err());
        assert!(resolve(&tasks, "0").is_err());
    }

    #[test]
    fn test_list_renders_table() {
        let mut store = new_store();
        let (_, out) = run_script(&mut store, "list\nadd Buy milk desc:\"2% milk\" due:2024-01-01\nlist\n");

        assert!(out.starts_with("No tasks found."));
        assert!(out.contains("Buy milk"));
        assert!(out.contains("January 1st, 2024"));
        assert!(out.contains("Low"));
    }
}
