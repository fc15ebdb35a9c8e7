pub mod memory;
pub mod traits;

// Re-export
pub use memory::InMemoryTaskRepository;
pub use traits::TaskRepository;
