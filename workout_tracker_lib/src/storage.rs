use std::collections::HashMap;

use tracing::{debug, warn};

use crate::{error::StorageError, workout::Workout};

/// A string keyed durable store, e.g. the browser's local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-process store. Optionally enforces a total size quota the way browsers do.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    quota: Option<usize>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self { quota: Some(quota), ..Default::default() }
    }

    /// Number of successful `set` calls so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    fn used_without(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(quota) = self.quota {
            if self.used_without(key) + key.len() + value.len() > quota {
                return Err(StorageError::Write { key: key.into(), reason: "quota exceeded".into() });
            }
        }

        self.entries.insert(key.to_owned(), value.to_owned());
        self.writes += 1;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Result of reading the stored list, with a message for everything dropped.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Loaded {
    pub workouts: Vec<Workout>,
    pub problems: Vec<String>,
}

impl Loaded {
    fn problem(&mut self, message: String) {
        warn!("{message}");
        self.problems.push(message);
    }
}

/// Persists the whole workout list as one JSON array under a fixed key.
///
/// The store has a small quota, so callers should not keep unbounded history.
pub struct WorkoutStore<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> WorkoutStore<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self { store, key: key.into() }
    }

    /// Overwrites any previously saved list.
    pub fn save(&mut self, workouts: &[Workout]) -> Result<(), StorageError> {
        let json = serde_json::to_string(workouts).map_err(|e| StorageError::Serialize(e.to_string()))?;
        self.store.set(&self.key, &json)?;
        debug!("Saved {} workouts ({} bytes)", workouts.len(), json.len());
        Ok(())
    }

    /// Missing or unreadable data yields an empty list. Records that do not
    /// parse are skipped one by one; the rest are kept.
    pub fn load(&self) -> Loaded {
        let mut loaded = Loaded::default();

        let json = match self.store.get(&self.key) {
            Ok(Some(json)) => json,
            Ok(None) => return loaded,
            Err(e) => {
                loaded.problem(format!("Could not read stored workouts: {e}"));
                return loaded;
            }
        };

        let records = match serde_json::from_str::<Vec<serde_json::Value>>(&json) {
            Ok(records) => records,
            Err(e) => {
                loaded.problem(format!("Ignoring unparsable stored workouts: {e}"));
                return loaded;
            }
        };

        for (index, record) in records.into_iter().enumerate() {
            match serde_json::from_value::<Workout>(record) {
                Ok(workout) => loaded.workouts.push(workout),
                Err(e) => loaded.problem(format!("Skipping stored workout #{index}: {e}")),
            }
        }

        debug!("Loaded {} workouts", loaded.workouts.len());
        loaded
    }

    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.store.remove(&self.key)
    }

    pub fn inner(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;
    use crate::workout::{Coords, WorkoutDetails};

    fn sample() -> Vec<Workout> {
        let date = DateTime::parse_from_rfc3339("2024-03-07T09:30:00+01:00").unwrap();
        vec![
            Workout::running(Coords::new(56.17, 10.19), 5.2, 24., 178., &date),
            Workout::cycling(Coords::new(56.2, 10.1), 27., 95., -223., &date),
        ]
    }

    #[test]
    fn save_then_load_restores_variants() {
        let mut store = WorkoutStore::new(MemoryStore::new(), "workouts");
        let workouts = sample();
        store.save(&workouts).unwrap();

        let loaded = store.load().workouts;
        assert_eq!(loaded, workouts);
        assert!(matches!(loaded[0].details, WorkoutDetails::Running { .. }));
        assert!(matches!(loaded[1].details, WorkoutDetails::Cycling { .. }));
    }

    #[test]
    fn save_overwrites() {
        let mut store = WorkoutStore::new(MemoryStore::new(), "workouts");
        store.save(&sample()).unwrap();
        store.save(&sample()[..1]).unwrap();
        assert_eq!(store.load().workouts.len(), 1);
        assert_eq!(store.inner().writes(), 2);
    }

    #[test]
    fn missing_or_garbage_loads_empty() {
        let store = WorkoutStore::new(MemoryStore::new(), "workouts");
        assert_eq!(store.load(), Loaded::default());

        let mut raw = MemoryStore::new();
        raw.set("workouts", "{not json").unwrap();
        let loaded = WorkoutStore::new(raw, "workouts").load();
        assert!(loaded.workouts.is_empty());
        assert_eq!(loaded.problems.len(), 1);

        let mut raw = MemoryStore::new();
        raw.set("workouts", "null").unwrap();
        assert!(WorkoutStore::new(raw, "workouts").load().workouts.is_empty());
    }

    #[test]
    fn malformed_record_does_not_drop_the_others() {
        let mut records = serde_json::to_value(sample()).unwrap();
        records[1].as_object_mut().unwrap().remove("speed");
        records.as_array_mut().unwrap().push(serde_json::json!({"type": "swimming"}));

        let mut raw = MemoryStore::new();
        raw.set("workouts", &records.to_string()).unwrap();

        let loaded = WorkoutStore::new(raw, "workouts").load();
        assert_eq!(loaded.workouts, sample()[..1]);
        assert_eq!(loaded.problems.len(), 2);
        assert!(loaded.problems[0].contains("#1"));
        assert!(loaded.problems[1].contains("#2"));
    }

    #[test]
    fn loads_records_written_by_the_browser_app() {
        let json = r#"[{"date":"2024-03-07T08:30:00.000Z","id":"9803000000","coords":[56.17,10.19],
            "distance":5,"duration":25,"type":"running","cadence":170,"pace":5,"description":"Running on March 7"}]"#;
        let mut raw = MemoryStore::new();
        raw.set("workouts", json).unwrap();

        let loaded = WorkoutStore::new(raw, "workouts").load().workouts;
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, "9803000000");
        assert_eq!(loaded[0].metric(), 5.);
        assert_eq!(loaded[0].popup_class(), "running-popup");
    }

    #[test]
    fn clear_removes_key() {
        let mut store = WorkoutStore::new(MemoryStore::new(), "workouts");
        store.save(&sample()).unwrap();
        store.clear().unwrap();
        assert_eq!(store.inner().get("workouts").unwrap(), None);
        assert!(store.load().workouts.is_empty());
    }

    #[test]
    fn quota_exceeded_is_reported() {
        let mut store = WorkoutStore::new(MemoryStore::with_quota(64), "workouts");
        let err = store.save(&sample()).unwrap_err();
        assert!(matches!(err, StorageError::Write { .. }));
        assert!(store.load().workouts.is_empty());
    }
}
