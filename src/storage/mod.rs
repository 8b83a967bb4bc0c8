pub mod memory;
pub mod sqlite;
pub mod traits;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;
pub use traits::{Capybara, Storage};
