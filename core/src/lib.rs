pub mod error;
pub mod id;
pub mod model;
pub mod repository;
pub mod input;
pub mod time;
pub mod service;
pub mod usecase;

pub use error::{TaskError, ValidationError};
pub use id::{IdGenerator, SequentialIds, UuidIds};
pub use model::draft::{Draft, Field, FormMode};
pub use model::task::{Task, TaskId, Priority};
pub use repository::{TaskRepository, InMemoryTaskRepository};
pub use input::{parse_args, expand_key, split_command_line, apply_to_draft, ParsedInput};
pub use time::{parse_human_date, format_due_date, DueDateFormat};
pub use service::task_store::{TaskStore, Submitted};
pub use service::notification::{Notice, NoticeLevel, Notifier, NoticeLog};
pub use service::dto::TaskCard;
pub use usecase::task_form::TaskFormUseCase;
