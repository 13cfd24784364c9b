//! Status variables.
//!
//! The host polls these for diagnostics. There are two: a fixed informational
//! string and the number of parse calls served since the process started.

use core::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use aakmer_types::StatusValue;

/// Text reported by the `static` status variable.
pub const STATIC_TEXT: &str = "just a static text";

/// Monotonic count of parse invocations.
///
/// Relaxed ordering is enough: nothing is synchronized through the counter,
/// and concurrent increments are still never lost.
#[derive(Debug, Default)]
pub struct CallCounter(AtomicU64);

impl CallCounter {
    /// Creates a counter at zero.
    pub const fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    /// Adds one and returns the new value.
    #[inline(always)]
    pub fn increment(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Current value.
    #[inline(always)]
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Process-wide parse counter, reported as `called`.
pub static CALLS: CallCounter = CallCounter::new();

/// Point-in-time copy of the status variables, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    entries: Vec<(&'static str, StatusValue)>,
}

impl StatusSnapshot {
    /// Reads the status variables backed by `counter`.
    pub fn capture(counter: &CallCounter) -> Self {
        Self {
            entries: vec![
                ("static", StatusValue::Text(STATIC_TEXT)),
                ("called", StatusValue::Long(counter.get())),
            ],
        }
    }

    /// Looks up a variable by name.
    pub fn get(&self, name: &str) -> Option<StatusValue> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(_, v)| v)
    }

    /// Iterates `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, StatusValue)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the snapshot holds no variables.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders the snapshot with every name prefixed, as the host lists them
    /// (`<prefix>_<name>`).
    pub fn qualified(&self, prefix: &str) -> Vec<(String, StatusValue)> {
        self.entries
            .iter()
            .map(|&(n, v)| (format!("{}_{}", prefix, n), v))
            .collect()
    }
}

/// Snapshot of the process-wide status variables.
pub fn snapshot() -> StatusSnapshot {
    StatusSnapshot::capture(&CALLS)
}

impl fmt::Display for StatusSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}\t{}", name, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_starts_at_zero() {
        let c = CallCounter::new();
        assert_eq!(c.get(), 0);
        assert_eq!(c.increment(), 1);
        assert_eq!(c.increment(), 2);
        assert_eq!(c.get(), 2);
    }

    #[test]
    fn concurrent_increments_are_not_lost() {
        let c = CallCounter::new();
        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for _ in 0..1000 {
                        c.increment();
                    }
                });
            }
        });
        assert_eq!(c.get(), 8000);
    }

    #[test]
    fn snapshot_lists_both_variables() {
        let c = CallCounter::new();
        c.increment();
        let snap = StatusSnapshot::capture(&c);
        assert_eq!(snap.len(), 2);
        assert_eq!(snap.get("static"), Some(StatusValue::Text(STATIC_TEXT)));
        assert_eq!(snap.get("called"), Some(StatusValue::Long(1)));
        assert_eq!(snap.get("missing"), None);
        assert_eq!(snap.to_string(), "static\tjust a static text\ncalled\t1");
    }

    #[test]
    fn snapshot_is_a_copy() {
        let c = CallCounter::new();
        let snap = StatusSnapshot::capture(&c);
        c.increment();
        assert_eq!(snap.get("called"), Some(StatusValue::Long(0)));
    }

    #[test]
    fn qualified_names() {
        let snap = StatusSnapshot::capture(&CallCounter::new());
        let names: Vec<_> = snap.qualified("aakmer").into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["aakmer_static", "aakmer_called"]);
    }

    #[test]
    fn global_counter_is_monotonic() {
        let before = snapshot().get("called");
        CALLS.increment();
        let after = snapshot().get("called");
        match (before, after) {
            (Some(StatusValue::Long(a)), Some(StatusValue::Long(b))) => assert!(b > a),
            other => panic!("unexpected snapshot values: {:?}", other),
        }
    }
}
