//! Tooltip drawables, host integration and lifecycle for xtooltip.
//!
//! This crate provides:
//!
//! - **style**: Bubble and ripple styling, loadable from JSON
//! - **canvas**: Paints and the canvas trait drawables paint `kurbo` shapes into
//! - **text_drawable**: Bubble background with an anchor-facing arrow
//! - **overlay_drawable**: Pulsing two-circle ripple
//! - **host**: Traits the host toolkit implements
//! - **popup**: The assembled popup the host paints
//! - **tooltip**: The show/fade/hide/dismiss state machine
//! - **builder**: Fluent tooltip configuration

pub mod builder;
pub mod canvas;
pub mod host;
pub mod layout;
pub mod overlay_drawable;
pub mod popup;
pub mod style;
pub mod text_drawable;
pub mod tooltip;

#[cfg(test)]
mod testing;

pub use builder::TooltipBuilder;
pub use canvas::{Canvas, DrawOp, Paint, PaintStyle, RecordingCanvas};
pub use kurbo;
pub use host::{
    AnchorView, ContentLayout, ContentView, KeyAction, KeyCode, KeyEvent, PopupLayoutParams, TooltipHost,
    WindowFlags,
};
pub use overlay_drawable::TooltipOverlayDrawable;
pub use popup::{OverlayView, PopupView};
pub use style::{Color, OverlayStyle, TooltipStyle};
pub use text_drawable::{Notch, Outline, TooltipTextDrawable};
pub use tooltip::{Tooltip, TooltipState};
