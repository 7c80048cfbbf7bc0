//! Motivational quotes shown next to the level display.

use rand::seq::SliceRandom;

pub const QUOTES: [&str; 8] = [
    "You can do it!",
    "Every day is a new chance.",
    "Keep going, it's worth it!",
    "Great things start small.",
    "Never give up!",
    "Your effort pays off.",
    "Today is your day!",
    "Keep it up!",
];

/// Picks one quote uniformly at random.
pub fn random_quote() -> &'static str {
    QUOTES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(QUOTES[0])
}
