pub mod dto;
pub mod notification;
pub mod task_store;
