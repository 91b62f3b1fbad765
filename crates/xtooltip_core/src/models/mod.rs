//! Data models for xtooltip.
//!
//! - `geometry` - integer Point, Size, Rect
//! - `gravity` - Gravity and the fallback order
//! - `close_policy` - ClosePolicy and its builder
//! - `animation` - floating micro-motion settings
//! - `positions` - placement result with follow offset

pub mod animation;
pub mod close_policy;
pub mod geometry;
pub mod gravity;
pub mod positions;

pub use animation::{Animation, FloatDirection};
pub use close_policy::{CloseFlags, ClosePolicy, ClosePolicyBuilder};
pub use geometry::{Point, Rect, Size};
pub use gravity::{gravity_fallback_order, Gravity, GravityOrder};
pub use positions::Positions;
