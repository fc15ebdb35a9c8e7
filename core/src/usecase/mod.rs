pub mod task_form;
mod task_form_test;
