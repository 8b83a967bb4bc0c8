use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{anyhow, bail, Result};

use super::traits::{Capybara, Storage};

/// Process-local storage. Contents live as long as the last clone.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Mutex<MemoryState>>,
}

#[derive(Default)]
struct MemoryState {
    capybaras: Vec<Capybara>,
    // Highest id ever handed out; deleted ids are never reused.
    last_id: i64,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> Result<MutexGuard<'_, MemoryState>> {
        self.inner
            .lock()
            .map_err(|_| anyhow!("in-memory storage lock poisoned"))
    }
}

fn ensure_name(name: &str) -> Result<()> {
    if name.is_empty() {
        bail!("capybara name must not be empty");
    }
    Ok(())
}

impl Storage for MemoryStorage {
    fn list_capybaras(&self) -> Result<Vec<Capybara>> {
        Ok(self.state()?.capybaras.clone())
    }

    fn load_capybara(&self, id: i64) -> Result<Option<Capybara>> {
        let state = self.state()?;
        Ok(state.capybaras.iter().find(|c| c.id == id).cloned())
    }

    fn insert_capybara(&self, name: &str) -> Result<Capybara> {
        ensure_name(name)?;
        let mut state = self.state()?;
        state.last_id += 1;
        let capybara = Capybara {
            id: state.last_id,
            name: name.to_string(),
        };
        // Ids grow monotonically, so pushing keeps the list sorted.
        state.capybaras.push(capybara.clone());
        Ok(capybara)
    }

    fn update_capybara(&self, id: i64, name: &str) -> Result<Option<Capybara>> {
        ensure_name(name)?;
        let mut state = self.state()?;
        Ok(state
            .capybaras
            .iter_mut()
            .find(|c| c.id == id)
            .map(|capybara| {
                capybara.name = name.to_string();
                capybara.clone()
            }))
    }

    fn delete_capybara(&self, id: i64) -> Result<bool> {
        let mut state = self.state()?;
        let before = state.capybaras.len();
        state.capybaras.retain(|c| c.id != id);
        Ok(state.capybaras.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn memory_starts_empty() {
        let storage = MemoryStorage::new();
        assert!(storage.list_capybaras().unwrap().is_empty());
        assert!(storage.load_capybara(1).unwrap().is_none());
    }

    #[test]
    fn memory_assigns_sequential_ids_starting_at_one() {
        let storage = MemoryStorage::new();
        let fluffy = storage.insert_capybara("Fluffy").unwrap();
        let chonky = storage.insert_capybara("Chonky").unwrap();
        assert_eq!(fluffy, Capybara { id: 1, name: "Fluffy".into() });
        assert_eq!(chonky, Capybara { id: 2, name: "Chonky".into() });
        assert_eq!(storage.list_capybaras().unwrap(), vec![fluffy, chonky]);
    }

    #[test]
    fn memory_does_not_reuse_ids_after_delete() {
        let storage = MemoryStorage::new();
        storage.insert_capybara("Fluffy").unwrap();
        let second = storage.insert_capybara("Chonky").unwrap();

        assert!(storage.delete_capybara(second.id).unwrap());
        let third = storage.insert_capybara("Nibbles").unwrap();

        assert_eq!(third.id, 3);
        let ids: Vec<i64> = storage.list_capybaras().unwrap().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn memory_update_and_delete_report_absence() {
        let storage = MemoryStorage::new();
        assert!(storage.update_capybara(7, "Ghost").unwrap().is_none());
        assert!(!storage.delete_capybara(7).unwrap());

        let created = storage.insert_capybara("Fluffy").unwrap();
        let updated = storage.update_capybara(created.id, "Chonky").unwrap();
        assert_eq!(updated, Some(Capybara { id: created.id, name: "Chonky".into() }));
        assert!(storage.delete_capybara(created.id).unwrap());
        assert!(storage.load_capybara(created.id).unwrap().is_none());
    }

    #[test]
    fn memory_rejects_empty_names() {
        let storage = MemoryStorage::new();
        assert!(storage.insert_capybara("").is_err());
        let created = storage.insert_capybara("Fluffy").unwrap();
        assert!(storage.update_capybara(created.id, "").is_err());
        assert_eq!(storage.load_capybara(created.id).unwrap().unwrap().name, "Fluffy");
    }

    #[test]
    fn memory_concurrent_inserts_get_distinct_ids() {
        let storage = MemoryStorage::new();
        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let storage = storage.clone();
                thread::spawn(move || {
                    (0..25)
                        .map(|n| {
                            storage
                                .insert_capybara(&format!("capy-{worker}-{n}"))
                                .unwrap()
                                .id
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids: Vec<i64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 200);

        let listed: Vec<i64> = storage.list_capybaras().unwrap().iter().map(|c| c.id).collect();
        assert_eq!(listed, ids);
    }
}
