#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the viewer.
pub mod error;

/// Input events and discrete commands.
pub mod event;

/// Hit testing of pointer positions against detections.
pub mod selector;

/// Session state and event handling.
pub mod session;

/// Zoom and pan transform between image and screen space.
pub mod viewport;

pub use crate::error::SessionError;
pub use crate::event::{Command, Control, ViewerEvent};
pub use crate::selector::{Selector, SelectorConfig};
pub use crate::session::{Session, ToggleState};
pub use crate::viewport::{Viewport, ViewportLimits};
