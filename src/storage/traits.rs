#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Capybara {
    pub id: i64,
    pub name: String,
}

/// Persistence contract shared by the in-memory and SQLite backends.
///
/// Absence of a record is a normal outcome and is reported through `Option`
/// or `bool`, never through `Err`. Errors are reserved for storage faults.
pub trait Storage {
    /// All capybaras ordered by ascending id.
    fn list_capybaras(&self) -> anyhow::Result<Vec<Capybara>>;
    fn load_capybara(&self, id: i64) -> anyhow::Result<Option<Capybara>>;
    /// Stores a new capybara and returns it with its assigned id.
    fn insert_capybara(&self, name: &str) -> anyhow::Result<Capybara>;
    fn update_capybara(&self, id: i64, name: &str) -> anyhow::Result<Option<Capybara>>;
    /// Returns `false` when no capybara with `id` exists.
    fn delete_capybara(&self, id: i64) -> anyhow::Result<bool>;
}
