use crate::NotificationId;

/// What a pending one-shot timer does when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimerKind {
    TypingTick,
    NotificationEnter(NotificationId),
    NotificationExit(NotificationId),
    NotificationRemove(NotificationId),
    SubmitComplete,
    ScrollFrame,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timer {
    pub kind: TimerKind,
    pub deadline_ms: u64,
    seq: u64,
}

/// A tiny table of one-shot timers keyed by [`TimerKind`].
///
/// At most one timer per kind is pending: scheduling a kind again replaces the previous
/// deadline. The host only needs to arm a single platform timeout for [`Timers::next_deadline`].
#[derive(Clone, Debug, Default)]
pub struct Timers {
    pending: Vec<Timer>,
    seq: u64,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn schedule(&mut self, kind: TimerKind, deadline_ms: u64) {
        self.cancel(kind);
        self.seq = self.seq.wrapping_add(1);
        ftrace!(?kind, deadline_ms, "Timers::schedule");
        self.pending.push(Timer {
            kind,
            deadline_ms,
            seq: self.seq,
        });
    }

    /// Returns `true` if a pending timer of this kind was removed.
    pub fn cancel(&mut self, kind: TimerKind) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.kind != kind);
        before != self.pending.len()
    }

    pub fn cancel_where(&mut self, mut f: impl FnMut(TimerKind) -> bool) {
        self.pending.retain(|t| !f(t.kind));
    }

    pub fn deadline(&self, kind: TimerKind) -> Option<u64> {
        self.pending
            .iter()
            .find(|t| t.kind == kind)
            .map(|t| t.deadline_ms)
    }

    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.deadline(kind).is_some()
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.pending.iter().map(|t| t.deadline_ms).min()
    }

    /// Removes and returns the earliest timer due at `now_ms`.
    ///
    /// Timers sharing a deadline fire in scheduling order.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<Timer> {
        let (pos, _) = self
            .pending
            .iter()
            .enumerate()
            .min_by_key(|(_, t)| (t.deadline_ms, t.seq))?;
        if self.pending[pos].deadline_ms > now_ms {
            return None;
        }
        Some(self.pending.swap_remove(pos))
    }
}
