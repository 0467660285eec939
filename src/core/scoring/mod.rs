//=========================================================================
// Scoring System
//=========================================================================
//
// Collection zone, score bookkeeping, and transient messages.
//
// Flow:
//   Overlap (collection volume) → DropRegistry → ScoreLedger
//                                                    └─► NotificationSink
//
//=========================================================================

//=== Module Declarations =================================================

mod fade_text;
mod ledger;
mod notify;
mod registry;

//=== Public API ==========================================================

pub use fade_text::{FadePhase, FadeText};
pub use ledger::{DropRecord, ScoreLedger};
pub use notify::{ChannelNotifier, Notification, NotificationSink};
pub use registry::{DropOutcome, DropRegistry};
