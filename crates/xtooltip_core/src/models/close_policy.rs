//! Touch dismissal policy.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Raw close-policy bits.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct CloseFlags: u8 {
        const TOUCH_INSIDE = 1 << 1;
        const TOUCH_OUTSIDE = 1 << 2;
        const CONSUME = 1 << 3;
    }
}

/// Which touches dismiss the tooltip and whether those touches are consumed.
///
/// The flags are independent; `anywhere()` is derived from `inside()` and
/// `outside()` and never stored.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "ClosePolicyFlags", into = "ClosePolicyFlags")]
pub struct ClosePolicy {
    flags: CloseFlags,
}

impl ClosePolicy {
    pub const TOUCH_NONE: ClosePolicy = ClosePolicy { flags: CloseFlags::empty() };
    pub const TOUCH_INSIDE_CONSUME: ClosePolicy =
        ClosePolicy { flags: CloseFlags::TOUCH_INSIDE.union(CloseFlags::CONSUME) };
    pub const TOUCH_INSIDE_NO_CONSUME: ClosePolicy = ClosePolicy { flags: CloseFlags::TOUCH_INSIDE };
    pub const TOUCH_OUTSIDE_CONSUME: ClosePolicy =
        ClosePolicy { flags: CloseFlags::TOUCH_OUTSIDE.union(CloseFlags::CONSUME) };
    pub const TOUCH_OUTSIDE_NO_CONSUME: ClosePolicy = ClosePolicy { flags: CloseFlags::TOUCH_OUTSIDE };
    pub const TOUCH_ANYWHERE_NO_CONSUME: ClosePolicy =
        ClosePolicy { flags: CloseFlags::TOUCH_INSIDE.union(CloseFlags::TOUCH_OUTSIDE) };
    pub const TOUCH_ANYWHERE_CONSUME: ClosePolicy = ClosePolicy { flags: CloseFlags::all() };

    /// Start an empty policy builder.
    pub fn builder() -> ClosePolicyBuilder {
        ClosePolicyBuilder::default()
    }

    pub fn flags(&self) -> CloseFlags {
        self.flags
    }

    /// Touches that trigger a dismissal are consumed.
    pub fn consume(&self) -> bool {
        self.flags.contains(CloseFlags::CONSUME)
    }

    /// A touch inside the content dismisses.
    pub fn inside(&self) -> bool {
        self.flags.contains(CloseFlags::TOUCH_INSIDE)
    }

    /// A touch outside the content dismisses.
    pub fn outside(&self) -> bool {
        self.flags.contains(CloseFlags::TOUCH_OUTSIDE)
    }

    /// Any touch dismisses.
    pub fn anywhere(&self) -> bool {
        self.inside() && self.outside()
    }

    /// Decide whether a touch should hide the tooltip.
    ///
    /// `inside_content` is whether the touch landed in the content view's
    /// visible rect.
    pub fn should_hide(&self, inside_content: bool) -> bool {
        if self.anywhere() {
            true
        } else if self.inside() && inside_content {
            true
        } else {
            self.outside() && !inside_content
        }
    }
}

impl Default for ClosePolicy {
    fn default() -> Self {
        Self::TOUCH_INSIDE_CONSUME
    }
}

impl std::fmt::Debug for ClosePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}

impl std::fmt::Display for ClosePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ClosePolicy{{policy: {}, inside: {}, outside: {}, anywhere: {}, consume: {}}}",
            self.flags.bits(),
            self.inside(),
            self.outside(),
            self.anywhere(),
            self.consume()
        )
    }
}

/// Accumulating builder for [`ClosePolicy`].
#[derive(Debug, Clone, Default)]
pub struct ClosePolicyBuilder {
    flags: CloseFlags,
}

impl ClosePolicyBuilder {
    pub fn consume(mut self, value: bool) -> Self {
        self.flags.set(CloseFlags::CONSUME, value);
        self
    }

    pub fn inside(mut self, value: bool) -> Self {
        self.flags.set(CloseFlags::TOUCH_INSIDE, value);
        self
    }

    pub fn outside(mut self, value: bool) -> Self {
        self.flags.set(CloseFlags::TOUCH_OUTSIDE, value);
        self
    }

    /// Reset all flags.
    pub fn clear(mut self) -> Self {
        self.flags = CloseFlags::empty();
        self
    }

    pub fn build(self) -> ClosePolicy {
        ClosePolicy { flags: self.flags }
    }
}

/// Serialized form of a close policy.
#[derive(Serialize, Deserialize)]
struct ClosePolicyFlags {
    #[serde(default)]
    inside: bool,
    #[serde(default)]
    outside: bool,
    #[serde(default)]
    consume: bool,
}

impl From<ClosePolicyFlags> for ClosePolicy {
    fn from(flags: ClosePolicyFlags) -> Self {
        ClosePolicy::builder()
            .inside(flags.inside)
            .outside(flags.outside)
            .consume(flags.consume)
            .build()
    }
}

impl From<ClosePolicy> for ClosePolicyFlags {
    fn from(policy: ClosePolicy) -> Self {
        ClosePolicyFlags {
            inside: policy.inside(),
            outside: policy.outside(),
            consume: policy.consume(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert!(ClosePolicy::TOUCH_INSIDE_CONSUME.inside());
        assert!(ClosePolicy::TOUCH_INSIDE_CONSUME.consume());
        assert!(!ClosePolicy::TOUCH_INSIDE_CONSUME.outside());

        assert!(ClosePolicy::TOUCH_ANYWHERE_NO_CONSUME.anywhere());
        assert!(!ClosePolicy::TOUCH_ANYWHERE_NO_CONSUME.consume());

        assert!(!ClosePolicy::TOUCH_NONE.inside());
        assert!(!ClosePolicy::TOUCH_NONE.outside());
        assert!(!ClosePolicy::TOUCH_NONE.anywhere());
        assert!(ClosePolicy::TOUCH_NONE.flags().is_empty());
    }

    #[test]
    fn test_builder_accumulates_and_clears() {
        let policy = ClosePolicy::builder().inside(true).outside(true).consume(true).build();
        assert_eq!(policy, ClosePolicy::TOUCH_ANYWHERE_CONSUME);

        let policy = ClosePolicy::builder()
            .inside(true)
            .outside(true)
            .outside(false)
            .build();
        assert_eq!(policy, ClosePolicy::TOUCH_INSIDE_NO_CONSUME);

        let policy = ClosePolicy::builder().inside(true).consume(true).clear().build();
        assert_eq!(policy, ClosePolicy::TOUCH_NONE);
    }

    #[test]
    fn test_should_hide_table() {
        let cases = [
            (ClosePolicy::TOUCH_NONE, false, false),
            (ClosePolicy::TOUCH_INSIDE_CONSUME, true, false),
            (ClosePolicy::TOUCH_OUTSIDE_CONSUME, false, true),
            (ClosePolicy::TOUCH_ANYWHERE_CONSUME, true, true),
        ];
        for (policy, inside_hides, outside_hides) in cases {
            assert_eq!(policy.should_hide(true), inside_hides, "{policy}");
            assert_eq!(policy.should_hide(false), outside_hides, "{policy}");
        }
    }

    #[test]
    fn test_flags_match_accessors() {
        let flags = ClosePolicy::TOUCH_OUTSIDE_CONSUME.flags();
        assert_eq!(flags, CloseFlags::TOUCH_OUTSIDE | CloseFlags::CONSUME);
        assert_eq!(ClosePolicy::TOUCH_ANYWHERE_CONSUME.flags().bits(), 0b1110);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ClosePolicy::TOUCH_INSIDE_CONSUME.to_string(),
            "ClosePolicy{policy: 10, inside: true, outside: false, anywhere: false, consume: true}"
        );
    }

    #[test]
    fn test_serde_flags() {
        let policy: ClosePolicy = serde_json::from_str(r#"{"outside": true}"#).unwrap();
        assert_eq!(policy, ClosePolicy::TOUCH_OUTSIDE_NO_CONSUME);

        let json = serde_json::to_value(ClosePolicy::TOUCH_ANYWHERE_CONSUME).unwrap();
        assert_eq!(json["inside"], true);
        assert_eq!(json["outside"], true);
        assert_eq!(json["consume"], true);
    }
}
