//! Core types and utilities for xtooltip.
//!
//! This crate provides the host-independent pieces of the tooltip engine:
//!
//! - **error**: Error handling for construction-time failures
//! - **logging**: Structured logging setup
//! - **models**: Geometry, gravity, close policy, floating animation, positions
//! - **placement**: Gravity-fallback placement engine
//! - **timers**: Cancelable scheduled tasks on a host-driven clock
//! - **tween**: Float tween evaluation

pub mod error;
pub mod logging;
pub mod models;
pub mod placement;
pub mod timers;
pub mod tween;

pub use error::TooltipError;
pub use models::{
    gravity_fallback_order, Animation, CloseFlags, ClosePolicy, ClosePolicyBuilder, FloatDirection,
    Gravity, GravityOrder, Point, Positions, Rect, Size,
};
pub use placement::{find_position, AnchorGeometry, PlacementRequest};
pub use timers::{TimerId, Timers};
pub use tween::{Interpolator, Tween};
