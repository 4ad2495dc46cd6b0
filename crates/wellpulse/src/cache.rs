//! Per-(region, year) corpus cache

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use wellpulse_core::{Region, Result, Sample};

type Slot = Arc<Mutex<Option<Arc<Vec<Sample>>>>>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Generated corpora keyed by `(region, year)`.
///
/// Each key has its own slot lock, so concurrent first requests for one key
/// run the generator once while other keys proceed independently. A failed
/// population leaves the slot empty.
#[derive(Debug, Default)]
pub struct CorpusCache {
    slots: Mutex<HashMap<(Region, i32), Slot>>,
}

impl CorpusCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, region: &Region, year: i32) -> Slot {
        let mut slots = lock(&self.slots);
        slots
            .entry((region.clone(), year))
            .or_default()
            .clone()
    }

    /// Cached samples for the key, running `populate` on the first request
    pub fn get_or_populate<F>(&self, region: &Region, year: i32, populate: F) -> Result<Arc<Vec<Sample>>>
    where
        F: FnOnce() -> Result<Vec<Sample>>,
    {
        let slot = self.slot(region, year);
        let mut entry = lock(&slot);
        if let Some(samples) = entry.as_ref() {
            return Ok(Arc::clone(samples));
        }

        tracing::info!(region = %region, year, "corpus cache miss");
        let samples = Arc::new(populate()?);
        *entry = Some(Arc::clone(&samples));
        Ok(samples)
    }

    pub fn contains(&self, region: &Region, year: i32) -> bool {
        let slot = {
            let slots = lock(&self.slots);
            match slots.get(&(region.clone(), year)) {
                Some(slot) => Arc::clone(slot),
                None => return false,
            }
        };
        let populated = lock(&slot).is_some();
        populated
    }

    /// Number of populated keys
    pub fn len(&self) -> usize {
        let slots: Vec<Slot> = lock(&self.slots).values().cloned().collect();
        slots.iter().filter(|slot| lock(slot).is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
