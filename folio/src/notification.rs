use crate::{NotificationId, Severity};

/// Inline style of a freshly mounted notification (off-screen to the right).
pub const NOTIFICATION_BASE_STYLE: &str = "position: fixed; top: 100px; right: 20px; \
padding: 16px 20px; border-radius: 8px; color: white; font-weight: 500; z-index: 10000; \
max-width: 350px; box-shadow: 0 4px 12px rgba(0, 0, 0, 0.15); \
transform: translateX(400px); transition: transform 0.3s ease;";

pub(crate) const OFFSCREEN_TRANSFORM: &str = "translateX(400px)";
pub(crate) const ONSCREEN_TRANSFORM: &str = "translateX(0)";

/// Full inline style for a notification of the given severity.
pub fn notification_style(severity: Severity) -> String {
    format!(
        "{NOTIFICATION_BASE_STYLE} background: {};",
        severity.background()
    )
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NotificationStage {
    /// Inserted, still off-screen.
    Mounted,
    Shown,
    /// Sliding out, removal pending.
    Leaving,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    pub stage: NotificationStage,
}

/// Holds the single notification that may be on the page.
#[derive(Clone, Debug, Default)]
pub struct NotificationSurface {
    current: Option<Notification>,
    next_id: u64,
}

impl NotificationSurface {
    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    /// Installs a new notification, handing back the one it displaced.
    pub(crate) fn replace(
        &mut self,
        message: String,
        severity: Severity,
    ) -> (Option<Notification>, NotificationId) {
        self.next_id = self.next_id.wrapping_add(1);
        let id = NotificationId(self.next_id);
        let prev = self.current.replace(Notification {
            id,
            message,
            severity,
            stage: NotificationStage::Mounted,
        });
        (prev, id)
    }

    /// Moves the current notification to `stage` if it is still `id`.
    pub(crate) fn advance(&mut self, id: NotificationId, stage: NotificationStage) -> bool {
        match self.current.as_mut() {
            Some(n) if n.id == id => {
                n.stage = stage;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn remove(&mut self, id: NotificationId) -> bool {
        if self.current.as_ref().is_some_and(|n| n.id == id) {
            self.current = None;
            return true;
        }
        false
    }
}
