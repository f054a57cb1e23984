use std::collections::BTreeSet;

use crate::session::metrics::MetricsSnapshot;

/// A badge unlocked by a single threshold on the current metrics.
pub struct Achievement {
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    predicate: fn(&MetricsSnapshot) -> bool,
}

impl Achievement {
    pub fn is_unlocked(&self, snapshot: &MetricsSnapshot) -> bool {
        (self.predicate)(snapshot)
    }
}

pub static ACHIEVEMENTS: [Achievement; 5] = [
    Achievement {
        name: "Speed Demon",
        icon: "\u{26a1}",
        description: "Reach 100 WPM",
        predicate: |s: &MetricsSnapshot| s.wpm >= 100,
    },
    Achievement {
        name: "Perfect Accuracy",
        icon: "\u{1f3af}",
        description: "Type with 100% accuracy",
        predicate: |s: &MetricsSnapshot| s.accuracy == 100,
    },
    Achievement {
        name: "Consistent",
        icon: "\u{2728}",
        description: "Keep accuracy at 95% or better",
        predicate: |s: &MetricsSnapshot| s.accuracy >= 95,
    },
    Achievement {
        name: "Marathon",
        icon: "\u{1f3c3}",
        description: "Type for five minutes",
        predicate: |s: &MetricsSnapshot| s.elapsed_secs >= 300,
    },
    Achievement {
        name: "Typer",
        icon: "\u{2328}",
        description: "Type 500 characters",
        predicate: |s: &MetricsSnapshot| s.typed >= 500,
    },
];

/// Names of every achievement the snapshot satisfies. Recomputed from
/// scratch each call; nothing is remembered between calls.
pub fn evaluate(snapshot: &MetricsSnapshot) -> BTreeSet<&'static str> {
    ACHIEVEMENTS
        .iter()
        .filter(|a| a.is_unlocked(snapshot))
        .map(|a| a.name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(wpm: u32, accuracy: u32, elapsed_secs: u64, typed: usize) -> MetricsSnapshot {
        MetricsSnapshot {
            correct: typed,
            typed,
            accuracy,
            wpm,
            elapsed_secs,
            score: 0,
            is_active: true,
        }
    }

    #[test]
    fn test_fresh_snapshot_unlocks_accuracy_badges() {
        let unlocked = evaluate(&MetricsSnapshot::default());
        assert_eq!(
            unlocked.into_iter().collect::<Vec<_>>(),
            vec!["Consistent", "Perfect Accuracy"]
        );
    }

    #[test]
    fn test_all_unlocked() {
        let unlocked = evaluate(&snap(120, 100, 301, 600));
        assert_eq!(unlocked.len(), 5);
    }

    #[test]
    fn test_none_unlocked() {
        assert!(evaluate(&snap(10, 80, 10, 20)).is_empty());
    }

    #[test]
    fn test_thresholds_are_inclusive() {
        let unlocked = evaluate(&snap(100, 95, 300, 500));
        assert!(unlocked.contains("Speed Demon"));
        assert!(unlocked.contains("Consistent"));
        assert!(!unlocked.contains("Perfect Accuracy"));
        assert!(unlocked.contains("Marathon"));
        assert!(unlocked.contains("Typer"));
    }

    #[test]
    fn test_just_below_thresholds() {
        let unlocked = evaluate(&snap(99, 94, 299, 499));
        assert!(unlocked.is_empty());
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let s = snap(101, 97, 12, 40);
        assert_eq!(evaluate(&s), evaluate(&s));
    }

    #[test]
    fn test_names_unique() {
        let names: BTreeSet<&str> = ACHIEVEMENTS.iter().map(|a| a.name).collect();
        assert_eq!(names.len(), ACHIEVEMENTS.len());
    }
}
