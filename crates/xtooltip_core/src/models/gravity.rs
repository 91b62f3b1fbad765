//! Tooltip gravity and the fallback order used by the placement search.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Which side of the anchor the tooltip attaches to.
///
/// Declaration order is the fallback order used after the requested gravity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gravity {
    /// Bubble to the left of the anchor, arrow on the bubble's right edge
    Left,
    /// Bubble to the right of the anchor, arrow on the bubble's left edge
    Right,
    /// Bubble above the anchor, arrow on the bubble's bottom edge
    Top,
    /// Bubble below the anchor, arrow on the bubble's top edge
    Bottom,
    /// Bubble centered over the anchor, no arrow
    Center,
}

/// Ordered list of gravities still to try.
pub type GravityOrder = SmallVec<[Gravity; 5]>;

impl Gravity {
    /// All gravities in declaration order.
    pub const ALL: [Gravity; 5] =
        [Gravity::Left, Gravity::Right, Gravity::Top, Gravity::Bottom, Gravity::Center];

    /// Whether the bubble is stacked above or below the anchor.
    pub fn is_vertical(self) -> bool {
        matches!(self, Gravity::Top | Gravity::Bottom)
    }

    /// Whether the bubble sits beside the anchor.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Gravity::Left | Gravity::Right)
    }

    /// Whether an arrow can be drawn for this gravity.
    pub fn has_arrow(self) -> bool {
        self != Gravity::Center
    }
}

/// Requested gravity first, then the remaining ones in declaration order.
pub fn gravity_fallback_order(requested: Gravity) -> GravityOrder {
    let mut order = GravityOrder::new();
    order.push(requested);
    order.extend(Gravity::ALL.iter().copied().filter(|g| *g != requested));
    order
}

impl std::fmt::Display for Gravity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Gravity::Left => "LEFT",
            Gravity::Right => "RIGHT",
            Gravity::Top => "TOP",
            Gravity::Bottom => "BOTTOM",
            Gravity::Center => "CENTER",
        };
        f.write_str(name)
    }
}
