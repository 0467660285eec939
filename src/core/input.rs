//=========================================================================
// Interact Input
//=========================================================================
//
// Edge detection for the single "interact" button.
//
// Architecture:
//   ButtonEvent → process_events() → held flag + pressed edge → query
//
// Frame lifecycle: clear() → process_events() → pressed()
//
// Only the UP → DOWN transition counts as an interaction. Holding the
// button across frames never re-triggers it.
//
//=========================================================================

//=== ButtonEvent =========================================================

/// Raw transition of the interact button as delivered by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonEvent {
    Down,
    Up,
}

//=== InteractInput =======================================================

/// Tracks the interact button's held state and its per-frame press edge.
#[derive(Debug, Default)]
pub struct InteractInput {
    //--- Persistent State (survives frame boundary) ----------------------
    down: bool,

    //--- Frame Delta (reset each frame via clear()) ---------------------
    pressed_this_frame: bool,
}

impl InteractInput {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Frame Processing -------------------------------------------------

    /// Clears the per-frame edge.
    pub fn clear(&mut self) {
        self.pressed_this_frame = false;
    }

    /// Applies this frame's button transitions in order.
    pub fn process_events(&mut self, events: &[ButtonEvent]) {
        for event in events {
            match event {
                ButtonEvent::Down => {
                    // Only an edge if it wasn't already down
                    if !self.down {
                        self.down = true;
                        self.pressed_this_frame = true;
                    }
                }
                ButtonEvent::Up => self.down = false,
            }
        }
    }

    //--- Query API --------------------------------------------------------

    /// Returns `true` if the button went UP → DOWN this frame.
    pub fn pressed(&self) -> bool {
        self.pressed_this_frame
    }

    /// Returns `true` while the button is held.
    pub fn is_down(&self) -> bool {
        self.down
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
