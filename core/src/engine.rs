use chrono::{DateTime, Utc};
use rand::prelude::*;
use rand::rngs::SmallRng;

use crate::*;

/// What a single guess did to the session. Transient, never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct GuessOutcome {
    pub correct: bool,
    pub mask: Vec<MaskSlot>,
    pub completed: bool,
    pub score_delta: u32,
    pub message: String,
}

impl GuessOutcome {
    fn no_op(session: &Session, completed: bool, message: &str) -> Self {
        Self {
            correct: false,
            mask: session.mask().to_vec(),
            completed,
            score_delta: 0,
            message: message.to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HintOutcome {
    pub text: String,
    pub hints_remaining: u8,
    pub success: bool,
}

/// Session evaluator: starts sessions against a word store and applies
/// guesses, hints, and skips as pure session-to-session steps.
///
/// Randomness comes only from the injected `rng`, so a seeded engine
/// replays identically.
#[derive(Clone, Debug)]
pub struct Engine<R = SmallRng> {
    store: WordStore,
    rng: R,
}

impl Engine<SmallRng> {
    pub fn from_seed(store: WordStore, seed: u64) -> Self {
        Self::new(store, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Engine<R> {
    pub fn new(store: WordStore, rng: R) -> Self {
        Self { store, rng }
    }

    pub fn store(&self) -> &WordStore {
        &self.store
    }

    pub fn start_session(&mut self, tier: Option<Tier>) -> Result<Session> {
        self.start_session_at(tier, Utc::now())
    }

    /// Resolves the effective tier, draws a word, and builds the initial
    /// mask. Fails only when the store has nothing to offer.
    pub fn start_session_at(&mut self, tier: Option<Tier>, now: DateTime<Utc>) -> Result<Session> {
        let tier = tier.unwrap_or(DEFAULT_TIER);
        let target = self.store.random_word(tier, &mut self.rng)?.text.clone();
        let mask = build_mask(&target, tier, &mut self.rng);
        let id: SessionId = self.rng.random();
        log::debug!(
            "starting session {id:016x} at tier {tier}, {} letters",
            mask.len()
        );
        Ok(Session::new(id, target, mask, now))
    }

    pub fn apply_guess(&self, session: &Session, letter: char) -> Result<(Session, GuessOutcome)> {
        self.apply_guess_at(session, letter, Utc::now())
    }

    /// Applies one letter guess, returning the successor session and a
    /// render-ready outcome. Expected conditions ("already guessed",
    /// "already complete") come back as no-op outcomes, not errors.
    pub fn apply_guess_at(
        &self,
        session: &Session,
        letter: char,
        now: DateTime<Utc>,
    ) -> Result<(Session, GuessOutcome)> {
        let letter = normalize_letter(letter)?;

        if session.is_complete() {
            let outcome = GuessOutcome::no_op(session, true, "Game already complete");
            return Ok((session.clone(), outcome));
        }

        if session.has_guessed(letter) {
            let outcome = GuessOutcome::no_op(session, false, "Letter already guessed");
            return Ok((session.clone(), outcome));
        }

        let mut next = session.clone();
        next.note_guess(letter);

        let correct = next.target_word().contains(letter);
        if correct {
            next.reveal_occurrences(letter);
        } else {
            next.spend_attempt();
        }

        let completed = next.blanks_remaining() == 0 || next.attempts_remaining() == 0;
        let mut score_delta = 0;
        if completed {
            next.finish(now);
            // only a winning final guess scores; losses stay at zero delta
            if correct {
                score_delta = score_for(next.attempts_remaining(), next.elapsed_millis(now));
                next.add_score(score_delta);
            }
        }

        let message = guess_message(correct, completed, next.attempts_remaining());
        let outcome = GuessOutcome {
            correct,
            mask: next.mask().to_vec(),
            completed,
            score_delta,
            message,
        };
        Ok((next, outcome))
    }

    /// Discloses one still-hidden letter and its 1-based position without
    /// touching the session or spending an attempt. Fails softly once the
    /// session is complete or nothing is left to reveal.
    pub fn hint(&mut self, session: &Session) -> HintOutcome {
        if session.is_complete() {
            return HintOutcome {
                text: String::new(),
                hints_remaining: 0,
                success: false,
            };
        }

        let blanks = session.hidden_indices();
        let Some(&index) = blanks.choose(&mut self.rng) else {
            return HintOutcome {
                text: "No more letters to reveal".to_owned(),
                hints_remaining: 0,
                success: false,
            };
        };

        let letter = session
            .target_word()
            .chars()
            .nth(index)
            .expect("mask and target stay the same length");

        HintOutcome {
            text: format!(
                "The word contains the letter '{letter}' at position {}",
                index + 1
            ),
            // hint budget is not tracked, hints never run out
            hints_remaining: 1,
            success: true,
        }
    }

    pub fn skip(&self, session: &Session) -> Session {
        self.skip_at(session, Utc::now())
    }

    /// Forfeits the session: attempts drop to zero and it completes with
    /// its blanks intact, so the loss stays distinguishable from a win.
    pub fn skip_at(&self, session: &Session, now: DateTime<Utc>) -> Session {
        if session.is_complete() {
            return session.clone();
        }
        let mut next = session.clone();
        next.zero_attempts();
        next.finish(now);
        next
    }
}

/// Uppercases the guess; anything but an ASCII letter is rejected rather
/// than truncated or coerced.
fn normalize_letter(letter: char) -> Result<char> {
    if letter.is_ascii_alphabetic() {
        Ok(letter.to_ascii_uppercase())
    } else {
        Err(GameError::InvalidLetter(letter))
    }
}

/// `100` base, `25` per unused attempt, and up to `50` shaved down by one
/// per elapsed second.
fn score_for(attempts_remaining: u8, elapsed_millis: u64) -> u32 {
    let attempt_bonus = 25 * u32::from(attempts_remaining);
    let time_bonus = 50u64.saturating_sub(elapsed_millis / 1000) as u32;
    100 + attempt_bonus + time_bonus
}

fn guess_message(correct: bool, completed: bool, attempts_remaining: u8) -> String {
    if completed {
        if correct {
            "Congratulations! You solved it!".to_owned()
        } else {
            "Game over. Better luck next time!".to_owned()
        }
    } else if correct {
        "Good guess!".to_owned()
    } else {
        let plural = if attempts_remaining == 1 { "" } else { "s" };
        format!("Wrong letter. {attempts_remaining} attempt{plural} remaining.")
    }
}

/// Index 0 always stays visible; among the rest, `min(tier, 0.6 * len)`
/// distinct positions are hidden, sampled without replacement.
fn build_mask<R: Rng + ?Sized>(word: &str, tier: Tier, rng: &mut R) -> Vec<MaskSlot> {
    let letters: Vec<char> = word.chars().collect();
    let len = letters.len();
    let mut mask: Vec<MaskSlot> = letters.into_iter().map(MaskSlot::Revealed).collect();
    if len <= 1 {
        return mask;
    }

    let hide_count = usize::from(tier).min(len * 6 / 10);
    for index in rand::seq::index::sample(rng, len - 1, hide_count) {
        mask[index + 1] = MaskSlot::Hidden;
    }
    mask
}
