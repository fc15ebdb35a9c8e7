
#[cfg(test)]
mod tests {
    use crate::id::SequentialIds;
    use crate::model::task::{Priority, Task, TaskId};
    use crate::repository::{InMemoryTaskRepository, TaskRepository};
    use crate::service::notification::{Notice, NoticeLevel, NoticeLog};
    use crate::service::task_store::{Submitted, TaskStore};
    use crate::usecase::task_form::TaskFormUseCase;
    use anyhow::{anyhow, Result};
    use chrono::NaiveDate;

    fn store() -> TaskStore<InMemoryTaskRepository, SequentialIds> {
        TaskStore::with_parts(InMemoryTaskRepository::new(), SequentialIds::new())
    }

    fn fill<R: TaskRepository>(store: &mut TaskStore<R, SequentialIds>, name: &str) {
        let draft = store.draft_mut();
        draft.name = name.to_string();
        draft.description = "2% milk".to_string();
        draft.due_date = NaiveDate::from_ymd_opt(2024, 1, 1);
    }

    fn messages(log: &NoticeLog) -> Vec<(NoticeLevel, &str)> {
        log.notices()
            .iter()
            .map(|n| (n.level, n.message.as_str()))
            .collect()
    }

    #[test]
    fn test_add_edit_delete_notices() {
        let mut store = store();
        let mut log = NoticeLog::new();

        fill(&mut store, "Buy milk");
        let added = TaskFormUseCase::new(&mut store, &mut log).add().unwrap();

        let mut form = TaskFormUseCase::new(&mut store, &mut log);
        assert!(form.begin_edit(&added.id));
        drop(form);
        store.draft_mut().priority = Priority::High;

        let mut form = TaskFormUseCase::new(&mut store, &mut log);
        let saved = form.submit().unwrap();
        assert!(matches!(saved, Submitted::Updated(ref t) if t.priority == Priority::High));
        form.delete(&added.id);

        assert!(store.tasks().unwrap().is_empty());
        assert_eq!(
            messages(&log),
            vec![
                (NoticeLevel::Success, "Task added successfully"),
                (NoticeLevel::Success, "Task updated successfully"),
                (NoticeLevel::Success, "Task deleted successfully"),
            ]
        );
    }

    #[test]
    fn test_validation_failure_reports_error() {
        let mut store = store();
        let mut log = NoticeLog::new();

        store.draft_mut().name = "no description".to_string();
        let result = TaskFormUseCase::new(&mut store, &mut log).submit();

        assert!(result.is_none());
        assert!(store.tasks().unwrap().is_empty());
        assert_eq!(log.last(), Some(&Notice::error("Please fill in all fields")));
    }

    #[test]
    fn test_save_validation_failure_keeps_task() {
        let mut store = store();
        let mut log = NoticeLog::new();
        fill(&mut store, "Buy milk");
        let added = TaskFormUseCase::new(&mut store, &mut log).add().unwrap();

        store.begin_edit(&added.id).unwrap();
        store.draft_mut().due_date = None;
        let saved = TaskFormUseCase::new(&mut store, &mut log).save();

        assert!(saved.is_none());
        assert_eq!(store.tasks().unwrap(), vec![added]);
        assert!(log.last().unwrap().is_error());
    }

    #[test]
    fn test_delete_unknown_still_reports_success() {
        let mut store = store();
        let mut log = NoticeLog::new();

        let removed = TaskFormUseCase::new(&mut store, &mut log).delete(&TaskId::from_u128(3));

        assert!(removed.is_none());
        assert_eq!(log.last(), Some(&Notice::success("Task deleted successfully")));
    }

    #[test]
    fn test_begin_edit_missing_task() {
        let mut store = store();
        let mut log = NoticeLog::new();

        let ok = TaskFormUseCase::new(&mut store, &mut log).begin_edit(&TaskId::from_u128(1));

        assert!(!ok);
        assert_eq!(log.notices().len(), 1);
        assert!(log.notices()[0].message.contains("not found"));
    }

    #[test]
    fn test_cancel_resets_form() {
        let mut store = store();
        let mut log = NoticeLog::new();
        fill(&mut store, "Buy milk");
        let added = TaskFormUseCase::new(&mut store, &mut log).add().unwrap();

        let mut form = TaskFormUseCase::new(&mut store, &mut log);
        form.begin_edit(&added.id);
        form.cancel();

        assert!(!store.is_editing());
        assert_eq!(store.tasks().unwrap(), vec![added]);
    }

    struct FailingRepo;

    impl TaskRepository for FailingRepo {
        fn create(&mut self, _task: Task) -> Result<Task> { Err(anyhow!("disk full")) }
        fn list(&self) -> Result<Vec<Task>> { Ok(Vec::new()) }
        fn get(&self, _id: &TaskId) -> Result<Task> { unimplemented!() }
        fn update(&mut self, _task: &Task) -> Result<()> { unimplemented!() }
        fn delete(&mut self, _id: &TaskId) -> Result<Task> { unimplemented!() }
    }

    #[test]
    fn test_repository_failure_surfaces_as_error_notice() {
        let mut store = TaskStore::with_parts(FailingRepo, SequentialIds::new());
        let mut log = NoticeLog::new();
        fill(&mut store, "Buy milk");

        let added = TaskFormUseCase::new(&mut store, &mut log).add();

        assert!(added.is_none());
        assert_eq!(log.last(), Some(&Notice::error("Repository error: disk full")));
        // Draft survives so the user can retry
        assert_eq!(store.draft().name, "Buy milk");
    }
}
