use rand::Rng;

use super::emoji_phases::{classify_phase, phase_config, Phase};

/// Never put more than this many emojis in a title, whatever the phase asks for.
pub const MAX_TITLE_EMOJIS: usize = 4;
/// Resampling budget for one selection. Bounds the loop when a pool is smaller
/// than its phase's target count.
pub const MAX_SELECTION_ATTEMPTS: usize = 100;
/// Discord's embed title ceiling, in characters.
pub const TITLE_CHAR_LIMIT: usize = 256;

/// Display data for a days-remaining value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseInfo {
    pub phase: Phase,
    pub name: &'static str,
    pub description: &'static str,
    pub target_count: usize,
}

/// Picks phase-appropriate emojis for countdown titles.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmojiSelector;

impl EmojiSelector {
    pub fn new() -> Self {
        Self
    }

    /// Uniformly resample the phase's pool until `target_count` distinct
    /// emojis are collected or the attempt budget runs out.
    pub fn select_emojis_with<R: Rng + ?Sized>(
        &self,
        phase: Phase,
        rng: &mut R,
    ) -> Vec<&'static str> {
        let Some(config) = phase_config(phase) else {
            return Vec::new();
        };

        let selected = sample_unique(config.pool, config.target_count, rng);
        if selected.len() < config.target_count {
            tracing::warn!(
                phase = phase.key(),
                wanted = config.target_count,
                got = selected.len(),
                pool_size = config.pool.len(),
                "Could not select enough unique emojis"
            );
        }
        selected
    }

    /// Space-separated emojis for a countdown title, at most
    /// [`MAX_TITLE_EMOJIS`] of them. Empty on launch day.
    pub fn placement_for_title(&self, days_remaining: i64) -> String {
        self.placement_for_title_with(days_remaining, &mut rand::thread_rng())
    }

    pub fn placement_for_title_with<R: Rng + ?Sized>(
        &self,
        days_remaining: i64,
        rng: &mut R,
    ) -> String {
        let mut emojis = self.select_emojis_with(classify_phase(days_remaining), rng);
        emojis.truncate(MAX_TITLE_EMOJIS);
        emojis.join(" ")
    }

    pub fn phase_info(&self, days_remaining: i64) -> PhaseInfo {
        let phase = classify_phase(days_remaining);
        match phase_config(phase) {
            Some(config) => PhaseInfo {
                phase,
                name: config.name,
                description: config.description,
                target_count: config.target_count,
            },
            None => PhaseInfo {
                phase,
                name: "Launch Day",
                description: "It's here",
                target_count: 0,
            },
        }
    }
}

/// Draw up to `count` distinct entries from `pool`, giving up after
/// [`MAX_SELECTION_ATTEMPTS`] draws. A pool with fewer than `count` distinct
/// entries yields what it has.
fn sample_unique<'a, R: Rng + ?Sized>(pool: &[&'a str], count: usize, rng: &mut R) -> Vec<&'a str> {
    let mut selected: Vec<&'a str> = Vec::with_capacity(count);
    if pool.is_empty() {
        return selected;
    }

    let mut attempts = 0;
    while selected.len() < count && attempts < MAX_SELECTION_ATTEMPTS {
        let candidate = pool[rng.gen_range(0..pool.len())];
        if !selected.contains(&candidate) {
            selected.push(candidate);
        }
        attempts += 1;
    }
    selected
}

/// Append `placement` to `base`, dropping trailing emojis until the whole
/// title fits in [`TITLE_CHAR_LIMIT`] characters.
///
/// Returns `None` only when `base` alone is already too long.
pub fn fit_title(base: &str, placement: &str) -> Option<String> {
    if base.chars().count() > TITLE_CHAR_LIMIT {
        return None;
    }

    let mut emojis: Vec<&str> = placement.split_whitespace().collect();
    loop {
        if emojis.is_empty() {
            return Some(base.to_string());
        }
        let title = format!("{} {}", base, emojis.join(" "));
        if title.chars().count() <= TITLE_CHAR_LIMIT {
            return Some(title);
        }
        emojis.pop();
    }
}
