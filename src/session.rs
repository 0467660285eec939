//=========================================================================
// Play Session
//
// Owns one play session's state and runs the per-frame pipeline.
//
// Architecture:
// ```text
//     SessionBuilder  ──build()──>  Session  ──update(&FrameInput)──>  FrameReport
//         │                           │
//         ├─ with_gain()              ├─ World            (entities, anchor)
//         ├─ with_threshold()         ├─ GrabDetector
//         ├─ with_restore_mode()      ├─ CarryController
//         ├─ with_notification_sink() ├─ DropRegistry
//         └─ with_fade_text()         ├─ ScoreLedger ──► NotificationSink
//                                     └─ FadeText (optional)
// ```
//
// Frame pipeline (fixed order):
//   1. Anchor moves (drags the carried body)
//   2. Grab-volume enter/exit → detector
//   3. Interact edge → grab or release
//   4. Carry force → world step → session clock
//   5. Fade text advances
//   6. Collection-volume enters → registry → ledger
//
// Detection is always applied before the controller reads it and before
// the carry force for the same frame.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use glam::Vec3;
use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::config::{CarryConfig, DetectionConfig, FadeConfig, RestoreMode};
use crate::core::error::WorldError;
use crate::core::input::{ButtonEvent, InteractInput};
use crate::core::interaction::{CarryController, CarryEvent, GrabDetector, Overlap};
use crate::core::scoring::{DropOutcome, DropRegistry, FadeText, NotificationSink, ScoreLedger};
use crate::core::world::{Entity, EntityId, PhysicalProperties, Tag, World};

//=== FrameInput ==========================================================

/// Grab-volume overlap transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlapEvent {
    Enter(Overlap),
    Exit(Overlap),
}

/// Everything the outside world reports for one frame.
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Frame duration in seconds.
    pub dt: f32,

    /// New anchor position, if the player moved.
    pub anchor_position: Option<Vec3>,

    /// Grab-volume transitions, in delivery order.
    pub grab_events: Vec<OverlapEvent>,

    /// Interact button transitions, in delivery order.
    pub interact: Vec<ButtonEvent>,

    /// Objects entering the collection volume, in delivery order.
    pub drop_enters: Vec<Overlap>,
}

impl FrameInput {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            ..Self::default()
        }
    }

    pub fn with_anchor(mut self, position: Vec3) -> Self {
        self.anchor_position = Some(position);
        self
    }

    pub fn grab_enter(mut self, overlap: Overlap) -> Self {
        self.grab_events.push(OverlapEvent::Enter(overlap));
        self
    }

    pub fn grab_exit(mut self, overlap: Overlap) -> Self {
        self.grab_events.push(OverlapEvent::Exit(overlap));
        self
    }

    /// Adds a full press (down then up) of the interact button.
    pub fn tap(mut self) -> Self {
        self.interact.push(ButtonEvent::Down);
        self.interact.push(ButtonEvent::Up);
        self
    }

    pub fn button(mut self, event: ButtonEvent) -> Self {
        self.interact.push(event);
        self
    }

    pub fn drop_enter(mut self, overlap: Overlap) -> Self {
        self.drop_enters.push(overlap);
        self
    }
}

//=== FrameReport =========================================================

/// What happened during one [`Session::update`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub carry_events: Vec<CarryEvent>,
    pub carry_force: Option<Vec3>,
    pub drops: Vec<DropOutcome>,
}

//=== SessionBuilder ======================================================

/// Builder for configuring and constructing a [`Session`].
///
/// # Default Values
///
/// - **Carry**: see [`CarryConfig`] (gain 50.0, threshold 0.1, damping 10.0)
/// - **Grabbable tag**: `"Pickable"`
/// - **Gravity**: (0, -9.81, 0)
/// - **Anchor**: origin
/// - **Notification sink**: none
/// - **Fade text**: disabled
///
/// # Examples
///
/// ```
/// use pickup_core::SessionBuilder;
/// use pickup_core::core::scoring::ChannelNotifier;
///
/// let (notifier, messages) = ChannelNotifier::bounded(16);
///
/// let session = SessionBuilder::new()
///     .with_gain(40.0)
///     .with_notification_sink(notifier)
///     .build();
///
/// assert_eq!(session.ledger().drop_count(), 0);
/// assert!(messages.is_empty());
/// ```
pub struct SessionBuilder {
    carry: CarryConfig,
    detection: DetectionConfig,
    fade: Option<FadeConfig>,
    gravity: Vec3,
    anchor_position: Vec3,
    sink: Option<Box<dyn NotificationSink>>,
}

impl SessionBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self {
            carry: CarryConfig::default(),
            detection: DetectionConfig::default(),
            fade: None,
            gravity: World::DEFAULT_GRAVITY,
            anchor_position: Vec3::ZERO,
            sink: None,
        }
    }

    /// Sets the carry force per unit of displacement.
    ///
    /// Default: 50.0
    ///
    /// # Panics
    ///
    /// Panics if `gain <= 0.0` or is not finite.
    pub fn with_gain(mut self, gain: f32) -> Self {
        assert!(gain.is_finite() && gain > 0.0, "Carry gain must be positive, got {}", gain);
        self.carry.gain = gain;
        self
    }

    /// Sets the dead-zone radius around the anchor.
    ///
    /// Default: 0.1
    ///
    /// # Panics
    ///
    /// Panics if `threshold < 0.0` or is not finite.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        assert!(
            threshold.is_finite() && threshold >= 0.0,
            "Carry threshold must be non-negative, got {}",
            threshold
        );
        self.carry.threshold = threshold;
        self
    }

    /// Sets the damping applied to carried bodies.
    ///
    /// Default: 10.0 / 10.0
    ///
    /// # Panics
    ///
    /// Panics if either value is negative or not finite.
    pub fn with_carry_damping(mut self, linear: f32, angular: f32) -> Self {
        assert!(
            linear.is_finite() && linear >= 0.0 && angular.is_finite() && angular >= 0.0,
            "Carry damping must be non-negative, got ({}, {})",
            linear,
            angular
        );
        self.carry.linear_damping = linear;
        self.carry.angular_damping = angular;
        self
    }

    /// Properties given to released bodies in [`RestoreMode::Defaults`].
    pub fn with_release_properties(mut self, properties: PhysicalProperties) -> Self {
        self.carry.release_properties = properties;
        self
    }

    pub fn with_restore_mode(mut self, mode: RestoreMode) -> Self {
        self.carry.restore_mode = mode;
        self
    }

    /// Replaces the whole carry configuration.
    pub fn with_carry_config(mut self, config: CarryConfig) -> Self {
        self.carry = config;
        self
    }

    /// Sets the tag that marks objects as grabbable and collectable.
    pub fn with_grabbable_tag(mut self, tag: impl Into<Tag>) -> Self {
        self.detection.grabbable_tag = tag.into();
        self
    }

    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = gravity;
        self
    }

    /// Initial anchor position.
    pub fn with_anchor_position(mut self, position: Vec3) -> Self {
        self.anchor_position = position;
        self
    }

    /// Forwards every drop notification to `sink`.
    pub fn with_notification_sink(mut self, sink: impl NotificationSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Enables the built-in fade text display.
    ///
    /// # Panics
    ///
    /// Panics if any duration is negative or not finite.
    pub fn with_fade_text(mut self, config: FadeConfig) -> Self {
        let durations = [config.fade_in, config.display_time, config.fade_duration];
        assert!(
            durations.iter().all(|d| d.is_finite() && *d >= 0.0),
            "Fade durations must be non-negative, got {:?}",
            durations
        );
        self.fade = Some(config);
        self
    }

    /// Builds the session.
    pub fn build(self) -> Session {
        info!(
            "Building session (gain: {}, threshold: {}, tag: {})",
            self.carry.gain, self.carry.threshold, self.detection.grabbable_tag
        );

        let mut world = World::with_gravity(self.gravity);
        let anchor = world.add_anchor(self.anchor_position);

        let mut ledger = ScoreLedger::new();
        if let Some(sink) = self.sink {
            ledger.set_sink(sink);
        }

        Session {
            world,
            detector: GrabDetector::new(self.detection.grabbable_tag.clone()),
            carry: CarryController::new(anchor, self.carry),
            registry: DropRegistry::new(self.detection.grabbable_tag),
            ledger,
            interact: InteractInput::new(),
            fade_text: self.fade.map(FadeText::new),
            elapsed: Duration::ZERO,
        }
    }
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Session =============================================================

/// One play session: the world plus every interaction and scoring component.
///
/// Create via [`SessionBuilder`].
pub struct Session {
    world: World,
    detector: GrabDetector,
    carry: CarryController,
    registry: DropRegistry,
    ledger: ScoreLedger,
    interact: InteractInput,
    fade_text: Option<FadeText>,
    elapsed: Duration,
}

impl Session {
    //--- Update Loop ------------------------------------------------------

    /// Runs one frame of the pipeline.
    ///
    /// # Panics
    ///
    /// Panics if `frame.dt` is negative or not finite.
    pub fn update(&mut self, frame: &FrameInput) -> FrameReport {
        assert!(
            frame.dt.is_finite() && frame.dt >= 0.0,
            "Frame delta must be non-negative, got {}",
            frame.dt
        );

        let mut report = FrameReport::default();

        //--- 1. Anchor ----------------------------------------------------
        if let Some(position) = frame.anchor_position {
            self.move_anchor(position);
        }

        //--- 2. Detection -------------------------------------------------
        for event in &frame.grab_events {
            match event {
                OverlapEvent::Enter(overlap) => self.detector.on_enter(overlap),
                OverlapEvent::Exit(overlap) => self.detector.on_exit(overlap),
            }
        }
        if let Some(candidate) = self.detector.candidate() {
            if !self.world.contains(candidate) {
                self.detector.forget(candidate);
            }
        }

        //--- 3. Interaction -----------------------------------------------
        self.interact.clear();
        self.interact.process_events(&frame.interact);
        if self.interact.pressed() {
            if let Some(event) = self.carry.on_interact(&self.detector, &mut self.world) {
                report.carry_events.push(event);
            }
        }

        //--- 4. Physics ---------------------------------------------------
        let held_before = self.carry.held();
        report.carry_force = self.carry.fixed_update(&mut self.world);
        if let (Some(held), false) = (held_before, self.carry.is_holding()) {
            report.carry_events.push(CarryEvent::Lost(held));
        }

        self.world.step(frame.dt);
        self.elapsed = match Duration::try_from_secs_f32(frame.dt) {
            Ok(dt) => self.elapsed.saturating_add(dt),
            Err(e) => {
                warn!("Session clock saturated by frame delta {}: {}", frame.dt, e);
                Duration::MAX
            }
        };

        //--- 5. Display ---------------------------------------------------
        if let Some(fade) = self.fade_text.as_mut() {
            fade.advance(frame.dt);
        }

        //--- 6. Collection ------------------------------------------------
        for overlap in &frame.drop_enters {
            let Some(outcome) =
                self.registry
                    .on_enter(overlap, &mut self.world, &mut self.ledger, self.elapsed)
            else {
                continue;
            };

            self.detector.forget(outcome.entity);
            if let Some(event) = self.carry.forget(outcome.entity) {
                report.carry_events.push(event);
            }
            if let Some(fade) = self.fade_text.as_mut() {
                fade.show(&outcome.notification.message);
            }
            report.drops.push(outcome);
        }

        report
    }

    //--- Direct Operations ------------------------------------------------

    /// Moves the anchor, dragging the carried entity with it.
    pub fn move_anchor(&mut self, position: Vec3) {
        if let Err(e) = self
            .world
            .move_anchor(self.carry.anchor(), position, self.carry.attachment())
        {
            warn!("Anchor move ignored: {}", e);
        }
    }

    /// Removes an entity from outside the drop pipeline.
    ///
    /// The detector and the carry controller let go of it; the carried
    /// body is not restored.
    pub fn despawn(&mut self, id: EntityId) -> Result<Entity, WorldError> {
        let entity = self.world.despawn(id)?;
        self.detector.forget(id);
        if let Some(event) = self.carry.forget(id) {
            debug!("Despawn while carried: {:?}", event);
        }
        Ok(entity)
    }

    //--- Accessors --------------------------------------------------------

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access for spawning and external edits.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn detector(&self) -> &GrabDetector {
        &self.detector
    }

    pub fn carry(&self) -> &CarryController {
        &self.carry
    }

    pub fn ledger(&self) -> &ScoreLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut ScoreLedger {
        &mut self.ledger
    }

    pub fn fade_text(&self) -> Option<&FadeText> {
        self.fade_text.as_ref()
    }

    /// Session time: sum of all frame deltas so far.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Current anchor position.
    pub fn anchor_position(&self) -> Vec3 {
        // The anchor is created in build() and never removed.
        self.world
            .anchor_position(self.carry.anchor())
            .unwrap_or(Vec3::ZERO)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
