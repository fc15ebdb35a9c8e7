use chrono::{Local, NaiveDate};
use ratatui::widgets::TableState;
use todomaster_core::{
    parse_human_date, DueDateFormat, IdGenerator, InMemoryTaskRepository, Notice, Notifier,
    Priority, TaskCard, TaskFormUseCase, TaskStore, UuidIds,
};

use crate::config::Config;
use crate::tui::form::{FormField, FormState};
use crate::tui::toast::ToastSink;

pub enum InputMode {
    Normal,
    Form,
}

pub struct App<G: IdGenerator = UuidIds> {
    pub store: TaskStore<InMemoryTaskRepository, G>,
    pub tasks: Vec<TaskCard>,
    pub state: TableState,
    pub input_mode: InputMode,
    pub form: FormState,
    pub toasts: ToastSink,
    pub date_format: DueDateFormat,
}

impl<G: IdGenerator> App<G> {
    pub fn new(store: TaskStore<InMemoryTaskRepository, G>, config: &Config) -> anyhow::Result<Self> {
        let mut app = App {
            store,
            tasks: Vec::new(),
            state: TableState::default(),
            input_mode: InputMode::Normal,
            form: FormState::default(),
            toasts: ToastSink::new(config.tui.toast()),
            date_format: config.date_format()?,
        };
        app.reload_tasks();
        if !app.tasks.is_empty() {
            app.state.select(Some(0));
        }
        Ok(app)
    }

    pub fn next(&mut self) {
        if self.tasks.is_empty() { return; }

        let i = match self.state.selected() {
            Some(i) => {
                if i >= self.tasks.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.tasks.is_empty() { return; }

        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    self.tasks.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn selected(&self) -> Option<&TaskCard> {
        self.state.selected().and_then(|i| self.tasks.get(i))
    }

    pub fn delete_task(&mut self) {
        if let Some(i) = self.state.selected() {
            if let Some(task) = self.tasks.get(i) {
                let id = task.id;
                TaskFormUseCase::new(&mut self.store, &mut self.toasts).delete(&id);
            }
            self.reload_tasks();

            // Adjust selection after reload
            if self.tasks.is_empty() {
                self.state.select(None);
            } else if i >= self.tasks.len() {
                self.state.select(Some(self.tasks.len() - 1));
            } else {
                self.state.select(Some(i));
            }
        }
    }

    fn reload_tasks(&mut self) {
        match self.store.tasks() {
            Ok(tasks) => {
                self.tasks = tasks
                    .into_iter()
                    .map(|t| TaskCard::from_entity(t, &self.date_format))
                    .collect();
            }
            Err(e) => self.toasts.notify(Notice::error(e.to_string())),
        }
    }

    pub fn enter_add_mode(&mut self) {
        self.store.reset_draft();
        self.form = FormState::default();
        self.input_mode = InputMode::Form;
    }

    pub fn enter_edit_mode(&mut self) {
        let Some(id) = self.selected().map(|t| t.id) else {
            return;
        };
        if TaskFormUseCase::new(&mut self.store, &mut self.toasts).begin_edit(&id) {
            self.form = FormState::for_draft(self.store.draft());
            self.input_mode = InputMode::Form;
        }
    }

    pub fn is_editing(&self) -> bool {
        self.store.is_editing()
    }

    pub fn cancel_form(&mut self) {
        TaskFormUseCase::new(&mut self.store, &mut self.toasts).cancel();
        self.form = FormState::default();
        self.input_mode = InputMode::Normal;
    }

    pub fn next_field(&mut self) {
        let field = self.form.focus.next();
        self.form.focus(field, self.store.draft());
    }

    pub fn previous_field(&mut self) {
        let field = self.form.focus.previous();
        self.form.focus(field, self.store.draft());
    }

    pub fn input_char(&mut self, c: char) {
        if self.form.focus == FormField::Priority {
            if c == ' ' {
                self.cycle_priority(Priority::next);
            }
            return;
        }
        self.form.input_char(c, self.store.draft_mut());
    }

    pub fn delete_char(&mut self) {
        self.form.delete_char(self.store.draft_mut());
    }

    pub fn move_left(&mut self) {
        if self.form.focus == FormField::Priority {
            self.cycle_priority(Priority::previous);
        } else {
            self.form.move_cursor_left();
        }
    }

    pub fn move_right(&mut self) {
        if self.form.focus == FormField::Priority {
            self.cycle_priority(Priority::next);
        } else {
            self.form.move_cursor_right(self.store.draft());
        }
    }

    fn cycle_priority(&mut self, step: fn(Priority) -> Priority) {
        let draft = self.store.draft_mut();
        draft.priority = step(draft.priority);
    }

    pub fn submit_form(&mut self) {
        self.submit_form_on(Local::now().date_naive());
    }

    /// Parse the due text relative to `today`, then add or save.
    pub fn submit_form_on(&mut self, today: NaiveDate) {
        let due_text = self.form.due_input.trim();
        let due_date = if due_text.is_empty() {
            None
        } else {
            match parse_human_date(due_text, today) {
                Ok(d) => Some(d),
                Err(_) => {
                    let message = format!("Invalid due date: {}", due_text);
                    self.toasts.notify(Notice::error(message));
                    self.form.focus(FormField::DueDate, self.store.draft());
                    return;
                }
            }
        };
        self.store.draft_mut().due_date = due_date;

        let submitted = TaskFormUseCase::new(&mut self.store, &mut self.toasts).submit();
        if let Some(submitted) = submitted {
            self.form = FormState::default();
            self.input_mode = InputMode::Normal;
            self.reload_tasks();
            let id = submitted.task().id;
            if let Some(pos) = self.tasks.iter().position(|t| t.id == id) {
                self.state.select(Some(pos));
            }
        }
    }
}
