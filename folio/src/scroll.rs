use crate::{SectionSpan, ViewportRect};

/// Geometry sampled by the host on a scroll event.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollMetrics {
    pub scroll_y: f64,
    pub viewport_height: f64,
    /// Bounding rect of the hero section, if present.
    pub hero: Option<ViewportRect>,
    /// Sections carrying an id, in document order.
    pub sections: Vec<SectionSpan>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeaderStyle {
    pub background: &'static str,
    pub backdrop_filter: &'static str,
}

impl HeaderStyle {
    pub const SCROLLED: Self = Self {
        background: "rgba(38, 40, 40, 0.95)",
        backdrop_filter: "blur(15px)",
    };
    pub const TOP: Self = Self {
        background: "rgba(38, 40, 40, 0.9)",
        backdrop_filter: "blur(10px)",
    };

    pub fn for_scroll(scroll_y: f64, threshold: f64) -> Self {
        if scroll_y > threshold {
            Self::SCROLLED
        } else {
            Self::TOP
        }
    }
}

/// The section whose (offset) span contains `scroll_y`. Later sections win on overlap.
pub fn active_section(sections: &[SectionSpan], scroll_y: f64, offset: f64) -> Option<&str> {
    sections
        .iter()
        .rev()
        .find(|s| {
            let top = s.top - offset;
            scroll_y >= top && scroll_y < top + s.height
        })
        .map(|s| s.id.as_str())
}

/// Vertical hero translation, or `None` once the hero has been scrolled past.
pub fn parallax_offset(scroll_y: f64, viewport_height: f64, rate: f64) -> Option<f64> {
    if scroll_y < viewport_height {
        // `+ 0.0` folds -0.0 into 0.0 so the emitted CSS never reads `-0px`.
        Some(scroll_y * rate + 0.0)
    } else {
        None
    }
}
