use crate::{NotificationId, Target};

/// A presentation change the host must apply to the page.
///
/// Style properties use CSS names (`"backdrop-filter"`, not `backdropFilter`). An empty
/// value clears the inline property.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Effect {
    SetClass {
        target: Target,
        class: &'static str,
        enabled: bool,
    },
    SetStyle {
        target: Target,
        property: &'static str,
        value: String,
    },
    SetText {
        target: Target,
        text: String,
    },
    SetDisabled {
        target: Target,
        disabled: bool,
    },
    /// Restore every contact-form control to its initial value.
    ResetForm,
    ScrollTo {
        top: f64,
        smooth: bool,
    },
    /// Append a notification element to the body.
    MountNotification {
        id: NotificationId,
        class_name: &'static str,
        message: String,
        style: String,
    },
    RemoveNotification {
        id: NotificationId,
    },
}

impl Effect {
    pub fn target(&self) -> Option<Target> {
        match self {
            Self::SetClass { target, .. }
            | Self::SetStyle { target, .. }
            | Self::SetText { target, .. }
            | Self::SetDisabled { target, .. } => Some(*target),
            Self::ResetForm => Some(Target::ContactForm),
            Self::MountNotification { id, .. } | Self::RemoveNotification { id } => {
                Some(Target::Notification(*id))
            }
            Self::ScrollTo { .. } => None,
        }
    }
}
