//! Tenant-scoped to-do items

pub mod models;
pub mod repository;

pub use models::{Todo, TodoCreate, TodoEdit};
pub use repository::TodoRepository;
