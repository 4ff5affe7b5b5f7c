//! Composable boolean predicates gating visibility and enablement.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

mod watcher;
pub use self::watcher::{ConditionFlip, ConditionWatcher, WatchHandle};

/// Read-only view of the facts conditions are evaluated against.
pub trait Facts {
    fn is_permitted(&self, id: &str) -> bool;
    fn capability(&self, key: &str) -> bool;
    fn edition(&self) -> &str;
    fn is_authenticated(&self) -> bool;
}

/// State keys that non-permission leaves depend on.
pub const USER_KEY: &str = "user";
pub const EDITION_KEY: &str = "edition";

/// What changed in a store mutation; drives re-evaluation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FactChange {
    pub permissions: BTreeSet<String>,
    pub state_keys: BTreeSet<String>,
}

impl FactChange {
    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty() && self.state_keys.is_empty()
    }

    pub fn merge(&mut self, other: FactChange) {
        self.permissions.extend(other.permissions);
        self.state_keys.extend(other.state_keys);
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Condition {
    Always,
    Never,
    Authenticated,
    Permitted(String),
    Capability(String),
    Edition(String),
    All(Vec<Condition>),
    Any(Vec<Condition>),
}

impl Condition {
    pub fn permitted(id: impl Into<String>) -> Self {
        Condition::Permitted(id.into())
    }

    pub fn capability(key: impl Into<String>) -> Self {
        Condition::Capability(key.into())
    }

    pub fn edition(name: impl Into<String>) -> Self {
        Condition::Edition(name.into())
    }

    pub fn and(self, other: Condition) -> Self {
        match self {
            Condition::Always => other,
            Condition::All(mut children) => {
                children.push(other);
                Condition::All(children)
            }
            this => Condition::All(vec![this, other]),
        }
    }

    pub fn or(self, other: Condition) -> Self {
        match self {
            Condition::Never => other,
            Condition::Any(mut children) => {
                children.push(other);
                Condition::Any(children)
            }
            this => Condition::Any(vec![this, other]),
        }
    }

    /// Short-circuits left to right. Never mutates anything.
    pub fn evaluate(&self, facts: &dyn Facts) -> bool {
        match self {
            Condition::Always => true,
            Condition::Never => false,
            Condition::Authenticated => facts.is_authenticated(),
            Condition::Permitted(id) => facts.is_permitted(id),
            Condition::Capability(key) => facts.capability(key),
            Condition::Edition(name) => facts.edition().eq_ignore_ascii_case(name),
            Condition::All(children) => children.iter().all(|c| c.evaluate(facts)),
            Condition::Any(children) => children.iter().any(|c| c.evaluate(facts)),
        }
    }

    /// True when a leaf of this condition reads something in `change`.
    pub fn references(&self, change: &FactChange) -> bool {
        match self {
            Condition::Always | Condition::Never => false,
            Condition::Authenticated => change.state_keys.contains(USER_KEY),
            Condition::Permitted(id) => change.permissions.contains(id),
            Condition::Capability(key) => change.state_keys.contains(key),
            Condition::Edition(_) => change.state_keys.contains(EDITION_KEY),
            Condition::All(children) | Condition::Any(children) => {
                children.iter().any(|c| c.references(change))
            }
        }
    }

    /// Permission ids read by this condition, in leaf order.
    pub fn permission_ids(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_permission_ids(&mut out);
        out
    }

    fn collect_permission_ids<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Condition::Permitted(id) => out.push(id),
            Condition::All(children) | Condition::Any(children) => {
                for c in children {
                    c.collect_permission_ids(out);
                }
            }
            _ => {}
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            Condition::All(children) | Condition::Any(children) => {
                children.iter().map(|c| c.leaf_count()).sum()
            }
            _ => 1,
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn join(f: &mut std::fmt::Formatter<'_>, op: &str, children: &[Condition]) -> std::fmt::Result {
            f.write_str("(")?;
            for (i, c) in children.iter().enumerate() {
                if i > 0 {
                    write!(f, " {} ", op)?;
                }
                write!(f, "{}", c)?;
            }
            f.write_str(")")
        }

        match self {
            Condition::Always => f.write_str("always"),
            Condition::Never => f.write_str("never"),
            Condition::Authenticated => f.write_str("authenticated"),
            Condition::Permitted(id) => write!(f, "permitted({})", id),
            Condition::Capability(key) => write!(f, "capability({})", key),
            Condition::Edition(name) => write!(f, "edition({})", name),
            Condition::All(children) => join(f, "and", children),
            Condition::Any(children) => join(f, "or", children),
        }
    }
}

#[cfg(test)]
#[path = "tests/conditions_tests.rs"]
mod tests;
