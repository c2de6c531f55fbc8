//! HUD text derived from the session statistics.

use crate::stats::GameStats;

/// What the frontend prints in the top bar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hud {
    pub score: String,
    pub high_score: String,
    pub level: String,
    pub ships_left: u32,
}

impl Hud {
    pub fn from_stats(stats: &GameStats) -> Self {
        Hud {
            score: format_score(stats.score),
            high_score: format_score(stats.high_score),
            level: stats.level.to_string(),
            ships_left: stats.ships_left,
        }
    }
}

/// Round to the nearest ten (halves go to even tens) and group thousands
/// with commas.
pub fn format_score(score: u32) -> String {
    let tens = score / 10;
    let rem = score % 10;
    let rounded_tens = if rem > 5 || (rem == 5 && tens % 2 == 1) {
        tens + 1
    } else {
        tens
    };
    let digits = (u64::from(rounded_tens) * 10).to_string();

    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_score_rounds_and_groups() {
        assert_eq!(format_score(0), "0");
        assert_eq!(format_score(50), "50");
        assert_eq!(format_score(1234), "1,230");
        assert_eq!(format_score(1236), "1,240");
        assert_eq!(format_score(1_000_000), "1,000,000");
    }

    #[test]
    fn format_score_rounds_half_to_even() {
        assert_eq!(format_score(25), "20");
        assert_eq!(format_score(35), "40");
    }

    #[test]
    fn hud_mirrors_stats() {
        let mut stats = GameStats::new(3);
        stats.add_points(75);
        stats.level = 2;
        let hud = Hud::from_stats(&stats);
        assert_eq!(hud.score, "80");
        assert_eq!(hud.high_score, "80");
        assert_eq!(hud.level, "2");
        assert_eq!(hud.ships_left, 3);
    }
}
