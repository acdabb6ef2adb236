//! The schedule/stats pair a host round-trips between operations.

use serde::{Deserialize, Serialize};

use super::{Schedule, Stats};

/// A generated schedule together with the results recorded against it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub schedule: Schedule,

    #[serde(default)]
    pub stats: Stats,
}

impl Session {
    pub fn new(schedule: Schedule) -> Self {
        Self {
            schedule,
            stats: Stats::new(),
        }
    }

    /// Install a freshly generated schedule. Stats recorded against the
    /// previous schedule are discarded.
    pub fn replace_schedule(&mut self, schedule: Schedule) {
        self.schedule = schedule;
        self.stats.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Player, PlayerStat};

    #[test]
    fn test_empty_session_deserializes_from_empty_object() {
        let session: Session = serde_json::from_str("{}").unwrap();
        assert!(session.schedule.is_empty());
        assert!(session.stats.is_empty());
    }

    #[test]
    fn test_replace_schedule_clears_stats() {
        let mut session = Session {
            schedule: Schedule::default(),
            stats: [(Player::from("A"), PlayerStat::default())]
                .into_iter()
                .collect(),
        };

        session.replace_schedule(Schedule::default());
        assert!(session.stats.is_empty());
    }
}
