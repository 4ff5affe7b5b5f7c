use std::collections::BTreeMap;

use super::{Condition, FactChange, Facts};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WatchHandle(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConditionFlip {
    pub handle: WatchHandle,
    pub satisfied: bool,
}

type Subscriber = Box<dyn FnMut(bool)>;

struct Watched {
    condition: Condition,
    satisfied: bool,
    subscribers: Vec<Subscriber>,
}

/// Explicit observer registry for conditions.
///
/// Stores report what they changed; `notify` re-evaluates only the watched
/// conditions that read one of the changed facts and synchronously calls the
/// subscribers of those whose value flipped.
#[derive(Default)]
pub struct ConditionWatcher {
    next_id: u64,
    watched: BTreeMap<WatchHandle, Watched>,
}

impl std::fmt::Debug for ConditionWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConditionWatcher")
            .field("watched", &self.watched.len())
            .finish()
    }
}

impl ConditionWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn watch(&mut self, condition: Condition, facts: &dyn Facts) -> WatchHandle {
        let handle = WatchHandle(self.next_id);
        self.next_id += 1;
        let satisfied = condition.evaluate(facts);
        self.watched.insert(
            handle,
            Watched {
                condition,
                satisfied,
                subscribers: Vec::new(),
            },
        );
        handle
    }

    /// Returns false when the handle is not (or no longer) watched.
    pub fn subscribe(&mut self, handle: WatchHandle, callback: impl FnMut(bool) + 'static) -> bool {
        match self.watched.get_mut(&handle) {
            Some(w) => {
                w.subscribers.push(Box::new(callback));
                true
            }
            None => false,
        }
    }

    pub fn unwatch(&mut self, handle: WatchHandle) -> bool {
        self.watched.remove(&handle).is_some()
    }

    pub fn is_satisfied(&self, handle: WatchHandle) -> Option<bool> {
        self.watched.get(&handle).map(|w| w.satisfied)
    }

    pub fn condition(&self, handle: WatchHandle) -> Option<&Condition> {
        self.watched.get(&handle).map(|w| &w.condition)
    }

    pub fn len(&self) -> usize {
        self.watched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.watched.is_empty()
    }

    pub fn clear(&mut self) {
        self.watched.clear();
    }

    pub fn notify(&mut self, facts: &dyn Facts, change: &FactChange) -> Vec<ConditionFlip> {
        let mut flips = Vec::new();
        if change.is_empty() {
            return flips;
        }

        for (handle, w) in self.watched.iter_mut() {
            if !w.condition.references(change) {
                continue;
            }
            let now = w.condition.evaluate(facts);
            if now == w.satisfied {
                continue;
            }
            w.satisfied = now;
            tracing::debug!(condition = %w.condition, satisfied = now, "condition changed");
            for sub in w.subscribers.iter_mut() {
                sub(now);
            }
            flips.push(ConditionFlip {
                handle: *handle,
                satisfied: now,
            });
        }
        flips
    }
}
