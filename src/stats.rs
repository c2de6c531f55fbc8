//! Session statistics: ships left, score, high score, level.

/// Counters for one session. `high_score` survives `reset` for the lifetime
/// of the process.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameStats {
    pub ships_left: u32,
    pub score: u32,
    pub high_score: u32,
    pub level: u32,
}

impl GameStats {
    pub fn new(ship_limit: u32) -> Self {
        Self {
            ships_left: ship_limit,
            score: 0,
            high_score: 0,
            level: 1,
        }
    }

    /// Start-of-game values. Keeps the high score.
    pub fn reset(&mut self, ship_limit: u32) {
        self.ships_left = ship_limit;
        self.score = 0;
        self.level = 1;
    }

    /// Add points and raise the high score if it was beaten.
    /// Returns true when a new high score was set.
    pub fn add_points(&mut self, points: u32) -> bool {
        self.score = self.score.saturating_add(points);
        if self.score > self.high_score {
            self.high_score = self.score;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_keeps_high_score() {
        let mut stats = GameStats::new(3);
        stats.add_points(500);
        stats.level = 4;
        stats.ships_left = 0;
        stats.reset(3);
        assert_eq!(stats.score, 0);
        assert_eq!(stats.level, 1);
        assert_eq!(stats.ships_left, 3);
        assert_eq!(stats.high_score, 500);
    }

    #[test]
    fn add_points_only_raises_high_score() {
        let mut stats = GameStats::new(3);
        stats.high_score = 1000;
        assert!(!stats.add_points(50));
        assert_eq!(stats.high_score, 1000);
        assert!(stats.add_points(1000));
        assert_eq!(stats.high_score, 1050);
    }
}
