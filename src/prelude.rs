//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use pickup_core::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Session facade
pub use crate::session::{FrameInput, FrameReport, OverlapEvent, Session, SessionBuilder};

// Configuration
pub use crate::core::config::{CarryConfig, DetectionConfig, FadeConfig, RestoreMode};

// World model
pub use crate::core::error::WorldError;
pub use crate::core::world::{Body, Descriptor, EntityDesc, EntityId, PhysicalProperties, Tag, World};

// Input
pub use crate::core::input::ButtonEvent;

// Interaction
pub use crate::core::interaction::{CarryEvent, CarryState, Overlap};

// Scoring
pub use crate::core::scoring::{ChannelNotifier, Notification, NotificationSink, ScoreLedger};
