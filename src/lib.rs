//=========================================================================
// Pickup Core — Library Root
//
// Grab, carry and drop-scoring logic for a physics-driven pickup game.
//
// Responsibilities:
// - Expose the per-frame facade (`Session`, `SessionBuilder`)
// - Expose the individual components under `core` for hosts that run
//   their own pipeline
//
// Typical usage:
// ```
// use pickup_core::{FrameInput, SessionBuilder};
//
// let mut session = SessionBuilder::new().build();
// let report = session.update(&FrameInput::new(1.0 / 60.0));
// assert!(report.drops.is_empty());
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the world model and every interaction/scoring component.
// Most hosts only need the `Session` facade re-exported below.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `session` wires the components into the fixed frame pipeline.
//
mod session;

//--- Public Exports ------------------------------------------------------

pub use session::{FrameInput, FrameReport, OverlapEvent, Session, SessionBuilder};
