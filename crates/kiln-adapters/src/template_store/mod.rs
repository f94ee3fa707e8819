//! Template store adapters.

mod filesystem;
mod memory;

pub use filesystem::FilesystemStore;
pub use memory::InMemoryStore;
