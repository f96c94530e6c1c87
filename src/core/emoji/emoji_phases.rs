use super::emoji_pools;

/// Where we are in the countdown. Drives emoji intensity and message tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Early,
    Mid,
    FinalMonth,
    FinalWeek,
    FinalDays,
    /// Release day. No emojis, special message.
    Launch,
}

impl Phase {
    pub fn key(&self) -> &'static str {
        match self {
            Phase::Early => "early",
            Phase::Mid => "mid",
            Phase::FinalMonth => "final_month",
            Phase::FinalWeek => "final_week",
            Phase::FinalDays => "final_days",
            Phase::Launch => "launch",
        }
    }

    /// A days-remaining value that lands in this phase. Used to preview a
    /// phase with `/countdown-test`.
    pub fn sample_days(&self) -> i64 {
        match self {
            Phase::Early => 60,
            Phase::Mid => 40,
            Phase::FinalMonth => 20,
            Phase::FinalWeek => 10,
            Phase::FinalDays => 3,
            Phase::Launch => 0,
        }
    }
}

#[derive(Debug)]
pub struct EmojiPhase {
    pub phase: Phase,
    pub name: &'static str,
    pub description: &'static str,
    /// Inclusive bounds on days remaining.
    pub min_days: i64,
    pub max_days: i64,
    pub target_count: usize,
    pub pool: &'static [&'static str],
}

/// Ordered most distant first; ranges are contiguous and do not overlap.
pub const PHASES: [EmojiPhase; 5] = [
    EmojiPhase {
        phase: Phase::Early,
        name: "Early Days",
        description: "Depressed/Melancholy",
        min_days: 55,
        max_days: i64::MAX,
        target_count: 1,
        pool: emoji_pools::EARLY,
    },
    EmojiPhase {
        phase: Phase::Mid,
        name: "Mid Countdown",
        description: "Hopeful/Excited",
        min_days: 30,
        max_days: 54,
        target_count: 2,
        pool: emoji_pools::MID,
    },
    EmojiPhase {
        phase: Phase::FinalMonth,
        name: "Final Month",
        description: "Hype Building",
        min_days: 15,
        max_days: 29,
        target_count: 3,
        pool: emoji_pools::FINAL_MONTH,
    },
    EmojiPhase {
        phase: Phase::FinalWeek,
        name: "Final Week",
        description: "Maximum Hype",
        min_days: 7,
        max_days: 14,
        target_count: 4,
        pool: emoji_pools::FINAL_WEEK,
    },
    EmojiPhase {
        phase: Phase::FinalDays,
        name: "Final Days",
        description: "Insane Hype",
        min_days: 1,
        max_days: 6,
        target_count: 4,
        pool: emoji_pools::FINAL_WEEK,
    },
];

pub fn classify_phase(days_remaining: i64) -> Phase {
    if days_remaining == 0 {
        return Phase::Launch;
    }

    PHASES
        .iter()
        .find(|p| days_remaining >= p.min_days && days_remaining <= p.max_days)
        .map(|p| p.phase)
        // negative values only come from bad input; treat them as far away
        .unwrap_or(Phase::Early)
}

/// Static configuration for a phase. `Launch` has none.
pub fn phase_config(phase: Phase) -> Option<&'static EmojiPhase> {
    PHASES.iter().find(|p| p.phase == phase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_land_in_the_documented_buckets() {
        assert_eq!(classify_phase(0), Phase::Launch);
        assert_eq!(classify_phase(1), Phase::FinalDays);
        assert_eq!(classify_phase(6), Phase::FinalDays);
        assert_eq!(classify_phase(7), Phase::FinalWeek);
        assert_eq!(classify_phase(14), Phase::FinalWeek);
        assert_eq!(classify_phase(15), Phase::FinalMonth);
        assert_eq!(classify_phase(29), Phase::FinalMonth);
        assert_eq!(classify_phase(30), Phase::Mid);
        assert_eq!(classify_phase(54), Phase::Mid);
        assert_eq!(classify_phase(55), Phase::Early);
        assert_eq!(classify_phase(10_000), Phase::Early);
        assert_eq!(classify_phase(-3), Phase::Early);
    }

    #[test]
    fn every_positive_day_matches_exactly_one_phase() {
        for days in 1..=400 {
            let matches = PHASES
                .iter()
                .filter(|p| days >= p.min_days && days <= p.max_days)
                .count();
            assert_eq!(matches, 1, "day {days} matched {matches} phases");
        }
    }

    #[test]
    fn sample_days_round_trip_through_classification() {
        for phase in PHASES.iter().map(|p| p.phase).chain([Phase::Launch]) {
            assert_eq!(classify_phase(phase.sample_days()), phase);
        }
    }

    #[test]
    fn launch_has_no_emoji_config() {
        assert!(phase_config(Phase::Launch).is_none());
        assert_eq!(phase_config(Phase::Mid).unwrap().target_count, 2);
    }
}
