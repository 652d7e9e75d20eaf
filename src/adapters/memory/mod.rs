//! In-memory adapters for development and tests.

mod content_store;
mod progress_store;
mod user_directory;

pub use content_store::InMemoryContentStore;
pub use progress_store::InMemoryProgressRepository;
pub use user_directory::InMemoryUserDirectory;
