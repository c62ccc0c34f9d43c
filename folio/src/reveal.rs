use crate::{RevealOptions, ViewportRect};

pub(crate) const REVEAL_TRANSITION: &str = "opacity 0.6s ease, transform 0.6s ease";

/// One-shot reveal bookkeeping for the animated cards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RevealSet {
    revealed: Vec<bool>,
}

impl RevealSet {
    pub fn new(count: usize) -> Self {
        Self {
            revealed: vec![false; count],
        }
    }

    pub fn len(&self) -> usize {
        self.revealed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revealed.is_empty()
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }

    /// Marks `index` revealed. Returns `true` only the first time.
    pub fn reveal(&mut self, index: usize) -> bool {
        match self.revealed.get_mut(index) {
            Some(slot) if !*slot => {
                *slot = true;
                true
            }
            _ => false,
        }
    }

    /// Indexes that are still hidden.
    pub fn pending(&self) -> impl Iterator<Item = usize> + '_ {
        self.revealed
            .iter()
            .enumerate()
            .filter(|(_, r)| !**r)
            .map(|(i, _)| i)
    }
}

/// Geometric equivalent of an `IntersectionObserver` entry with `options.threshold` and a
/// bottom `rootMargin`, for hosts that sample rects on scroll instead.
pub fn intersects(rect: ViewportRect, viewport_height: f64, options: &RevealOptions) -> bool {
    let zone_bottom = viewport_height + options.root_margin_bottom;
    let visible = rect.bottom.min(zone_bottom) - rect.top.max(0.0);
    let height = rect.height();
    if height <= 0.0 {
        return rect.top >= 0.0 && rect.top < zone_bottom;
    }
    visible > 0.0 && visible / height >= options.threshold
}
