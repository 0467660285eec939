//=========================================================================
// Core Systems
//
// Everything the frame pipeline is built from. Nothing here owns a clock
// or an event loop; the host (or `Session`) drives each component.
//
// Layout:
// - `world`        entities, bodies, anchors and integration
// - `interaction`  grab detection and the carry controller
// - `scoring`      collection zone, ledger and message display
// - `input`        interact-button edge detection
// - `config`       tunables with shipped defaults
// - `error`        lookup failures against the world
//
//=========================================================================

pub mod config;
pub mod error;
pub mod input;
pub mod interaction;
pub mod scoring;
pub mod world;
