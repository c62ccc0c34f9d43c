use crate::TypingTimings;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypingPhase {
    Typing,
    PausingFull,
    Deleting,
    PausingEmpty,
    Stopped,
}

/// State of the looping typing animation.
///
/// `count` is measured in chars of the current phrase and always stays within
/// `0..=len(phrase)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypingState {
    pub phrase: usize,
    pub count: usize,
    pub phase: TypingPhase,
}

impl Default for TypingState {
    fn default() -> Self {
        Self::stopped()
    }
}

impl TypingState {
    /// First phrase, nothing typed yet.
    pub const fn fresh() -> Self {
        Self {
            phrase: 0,
            count: 0,
            phase: TypingPhase::Typing,
        }
    }

    pub const fn stopped() -> Self {
        Self {
            phrase: 0,
            count: 0,
            phase: TypingPhase::Stopped,
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase != TypingPhase::Stopped
    }

    /// Pure transition for one tick.
    ///
    /// Returns the next state and the delay until the following tick, or `None` once the
    /// machine is stopped (or there is nothing to type).
    pub fn next<S: AsRef<str>>(
        self,
        phrases: &[S],
        timings: &TypingTimings,
    ) -> (Self, Option<u64>) {
        if phrases.is_empty() {
            return (Self::stopped(), None);
        }
        let phrase = self.phrase % phrases.len();
        let len = phrases[phrase].as_ref().chars().count();
        let count = self.count.min(len);

        match self.phase {
            TypingPhase::Stopped => (self, None),
            TypingPhase::Typing => {
                let count = (count + 1).min(len);
                if count == len {
                    let s = Self {
                        phrase,
                        count,
                        phase: TypingPhase::PausingFull,
                    };
                    (s, Some(timings.hold_full_ms))
                } else {
                    let s = Self {
                        phrase,
                        count,
                        phase: TypingPhase::Typing,
                    };
                    (s, Some(timings.type_ms))
                }
            }
            TypingPhase::PausingFull | TypingPhase::Deleting => {
                let count = count.saturating_sub(1);
                if count == 0 {
                    let s = Self {
                        phrase,
                        count,
                        phase: TypingPhase::PausingEmpty,
                    };
                    (s, Some(timings.hold_empty_ms))
                } else {
                    let s = Self {
                        phrase,
                        count,
                        phase: TypingPhase::Deleting,
                    };
                    (s, Some(timings.delete_ms))
                }
            }
            TypingPhase::PausingEmpty => {
                let s = Self {
                    phrase: (phrase + 1) % phrases.len(),
                    count: 0,
                    phase: TypingPhase::Typing,
                };
                s.next(phrases, timings)
            }
        }
    }

    /// The visible prefix of the current phrase.
    pub fn display<'a, S: AsRef<str>>(&self, phrases: &'a [S]) -> &'a str {
        if phrases.is_empty() {
            return "";
        }
        let phrase = phrases[self.phrase % phrases.len()].as_ref();
        match phrase.char_indices().nth(self.count) {
            Some((end, _)) => &phrase[..end],
            None => phrase,
        }
    }
}
