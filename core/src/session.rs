use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{MaskSlot, STARTING_ATTEMPTS, SessionId};

/// Valid transitions:
/// - Active -> Complete
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SessionState {
    /// Guesses are still accepted
    Active,
    /// Terminal; a complete session can only be replaced, never resumed
    Complete,
}

impl SessionState {
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Complete)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Active
    }
}

/// One attempt at a single target word, from creation to completion.
///
/// The engine treats sessions as values: every operation returns a fresh
/// `Session` and leaves its input untouched, so callers never share a
/// mutable session with the engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    target: String,
    mask: Vec<MaskSlot>,
    guessed: BTreeSet<char>,
    attempts_remaining: u8,
    state: SessionState,
    score: u32,
    started_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
}

impl Session {
    pub(crate) fn new(
        id: SessionId,
        target: String,
        mask: Vec<MaskSlot>,
        started_at: DateTime<Utc>,
    ) -> Self {
        debug_assert_eq!(mask.len(), target.chars().count());
        Self {
            id,
            target,
            mask,
            guessed: BTreeSet::new(),
            attempts_remaining: STARTING_ATTEMPTS,
            state: Default::default(),
            score: 0,
            started_at,
            ended_at: None,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn target_word(&self) -> &str {
        &self.target
    }

    pub fn mask(&self) -> &[MaskSlot] {
        &self.mask
    }

    /// Mask rendered with `'_'` as the blank marker.
    pub fn mask_string(&self) -> String {
        self.mask
            .iter()
            .map(|slot| slot.letter().unwrap_or('_'))
            .collect()
    }

    pub fn guessed_letters(&self) -> &BTreeSet<char> {
        &self.guessed
    }

    pub fn has_guessed(&self, letter: char) -> bool {
        self.guessed.contains(&letter)
    }

    pub fn attempts_remaining(&self) -> u8 {
        self.attempts_remaining
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_final()
    }

    /// Complete with nothing left hidden; a complete session that still has
    /// blanks was lost or skipped.
    pub fn is_solved(&self) -> bool {
        self.is_complete() && self.blanks_remaining() == 0
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    pub fn blanks_remaining(&self) -> usize {
        self.mask.iter().filter(|slot| slot.is_hidden()).count()
    }

    /// Milliseconds since the session started, frozen at `ended_at` once
    /// complete.
    pub fn elapsed_millis(&self, now: DateTime<Utc>) -> u64 {
        (self.ended_at.unwrap_or(now) - self.started_at)
            .num_milliseconds()
            .max(0) as u64
    }

    pub(crate) fn hidden_indices(&self) -> Vec<usize> {
        self.mask
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_hidden())
            .map(|(index, _)| index)
            .collect()
    }

    pub(crate) fn note_guess(&mut self, letter: char) {
        self.guessed.insert(letter);
    }

    pub(crate) fn reveal_occurrences(&mut self, letter: char) {
        for (index, target_letter) in self.target.chars().enumerate() {
            if target_letter == letter {
                self.mask[index] = MaskSlot::Revealed(letter);
            }
        }
    }

    pub(crate) fn spend_attempt(&mut self) {
        self.attempts_remaining = self.attempts_remaining.saturating_sub(1);
    }

    pub(crate) fn zero_attempts(&mut self) {
        self.attempts_remaining = 0;
    }

    pub(crate) fn add_score(&mut self, delta: u32) {
        self.score += delta;
    }

    pub(crate) fn finish(&mut self, now: DateTime<Utc>) {
        if self.state.is_final() {
            return;
        }
        self.state = SessionState::Complete;
        self.ended_at = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn sample() -> Session {
        let mask = vec![
            MaskSlot::Revealed('H'),
            MaskSlot::Hidden,
            MaskSlot::Hidden,
            MaskSlot::Revealed('L'),
            MaskSlot::Revealed('O'),
        ];
        Session::new(1, "HELLO".to_owned(), mask, Utc::now())
    }

    #[test]
    fn mask_string_uses_blank_markers() {
        assert_eq!(sample().mask_string(), "H__LO");
    }

    #[test]
    fn revealing_fills_every_occurrence() {
        let mut session = sample();

        session.reveal_occurrences('L');

        assert_eq!(session.mask_string(), "H_LLO");
        assert_eq!(session.blanks_remaining(), 1);
    }

    #[test]
    fn attempts_never_go_below_zero() {
        let mut session = sample();

        for _ in 0..5 {
            session.spend_attempt();
        }

        assert_eq!(session.attempts_remaining(), 0);
    }

    #[test]
    fn finish_is_terminal_and_stamps_ended_at_once() {
        let mut session = sample();
        let first = Utc::now();

        session.finish(first);
        session.finish(first + TimeDelta::seconds(5));

        assert!(session.is_complete());
        assert_eq!(session.ended_at(), Some(first));
    }

    #[test]
    fn elapsed_freezes_at_completion() {
        let mut session = sample();
        let ended = session.started_at() + TimeDelta::milliseconds(1500);

        session.finish(ended);

        let much_later = ended + TimeDelta::seconds(60);
        assert_eq!(session.elapsed_millis(much_later), 1500);
    }

    #[test]
    fn in_flight_session_survives_serialization() {
        let mut session = sample();
        session.note_guess('Z');
        session.spend_attempt();

        let encoded = serde_json::to_string(&session).unwrap();
        let decoded: Session = serde_json::from_str(&encoded).unwrap();

        assert_eq!(decoded, session);
    }
}
