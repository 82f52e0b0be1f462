/// Difficulty bucket, 1 (easiest) through 5. Also drives how many letters
/// get hidden when a mask is built.
pub type Tier = u8;

/// Catalog record identifier. Expected to be unique, not enforced.
pub type WordId = u32;

/// Per-session identifier, drawn from the engine RNG.
pub type SessionId = u64;

/// Mid-tier default used when no explicit tier is requested. Stands in for
/// adaptive difficulty, which has no input signal to work from.
pub const DEFAULT_TIER: Tier = 2;

/// Incorrect guesses allowed per session.
pub const STARTING_ATTEMPTS: u8 = 3;
