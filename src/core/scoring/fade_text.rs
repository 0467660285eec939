//=========================================================================
// Fade Text
//=========================================================================
//
// Per-frame timer for a single on-screen message.
//
// Phases:
//   Idle ──show()──► FadeIn ──► Hold ──► FadeOut ──► Idle
//   (alpha)           0→1        1        1→0         0, text cleared
//
// `show()` during any phase restarts from FadeIn with the new text; timers
// never stack.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::notify::{Notification, NotificationSink};
use crate::core::config::FadeConfig;

//=== FadePhase ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FadePhase {
    #[default]
    Idle,
    FadeIn,
    Hold,
    FadeOut,
}

//=== FadeText ============================================================

/// Message display state advanced once per frame.
#[derive(Debug, Default)]
pub struct FadeText {
    config: FadeConfig,
    phase: FadePhase,
    elapsed: f32,
    text: String,
    alpha: f32,
}

impl FadeText {
    pub fn new(config: FadeConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Displays `message`, restarting the timer.
    pub fn show(&mut self, message: &str) {
        self.text.clear();
        self.text.push_str(message);
        self.elapsed = 0.0;

        if self.config.fade_in > 0.0 {
            self.phase = FadePhase::FadeIn;
            self.alpha = 0.0;
        } else {
            self.phase = FadePhase::Hold;
            self.alpha = 1.0;
        }
    }

    /// Advances the timer by `dt` seconds.
    ///
    /// Time left over at a phase boundary carries into the next phase.
    pub fn advance(&mut self, dt: f32) {
        let mut remaining = dt;

        loop {
            match self.phase {
                FadePhase::Idle => return,

                FadePhase::FadeIn => {
                    self.elapsed += remaining;
                    if self.elapsed < self.config.fade_in {
                        self.alpha = self.elapsed / self.config.fade_in;
                        return;
                    }
                    remaining = self.elapsed - self.config.fade_in;
                    self.enter(FadePhase::Hold, 1.0);
                }

                FadePhase::Hold => {
                    self.elapsed += remaining;
                    if self.elapsed < self.config.display_time {
                        return;
                    }
                    remaining = self.elapsed - self.config.display_time;
                    self.enter(FadePhase::FadeOut, 1.0);
                }

                FadePhase::FadeOut => {
                    self.elapsed += remaining;
                    if self.elapsed < self.config.fade_duration {
                        self.alpha = 1.0 - self.elapsed / self.config.fade_duration;
                        return;
                    }
                    self.text.clear();
                    self.enter(FadePhase::Idle, 0.0);
                    return;
                }
            }
        }
    }

    fn enter(&mut self, phase: FadePhase, alpha: f32) {
        self.phase = phase;
        self.alpha = alpha;
        self.elapsed = 0.0;
    }

    //--- Query API --------------------------------------------------------

    pub fn phase(&self) -> FadePhase {
        self.phase
    }

    /// Opacity in `[0, 1]`.
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Current text; empty when idle.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl NotificationSink for FadeText {
    fn show(&mut self, notification: Notification) {
        FadeText::show(self, &notification.message);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn starts_idle_and_empty() {
        let fade = FadeText::new(FadeConfig::default());
        assert_eq!(fade.phase(), FadePhase::Idle);
        assert_eq!(fade.text(), "");
        assert_eq!(fade.alpha(), 0.0);
    }

    #[test]
    fn default_show_is_instantly_visible() {
        let mut fade = FadeText::new(FadeConfig::default());
        fade.show("Removed Can (+5)");

        assert_eq!(fade.phase(), FadePhase::Hold);
        assert_eq!(fade.alpha(), 1.0);
        assert_eq!(fade.text(), "Removed Can (+5)");
    }

    #[test]
    fn holds_then_fades_then_clears() {
        let mut fade = FadeText::new(FadeConfig::default());
        fade.show("hello");

        fade.advance(1.5);
        assert_eq!(fade.phase(), FadePhase::Hold);
        assert_eq!(fade.alpha(), 1.0);

        fade.advance(1.0); // 2.5s: 0.5s into fade-out
        assert_eq!(fade.phase(), FadePhase::FadeOut);
        assert!(approx(fade.alpha(), 0.5), "alpha = {}", fade.alpha());

        fade.advance(0.6);
        assert_eq!(fade.phase(), FadePhase::Idle);
        assert_eq!(fade.alpha(), 0.0);
        assert_eq!(fade.text(), "");
    }

    #[test]
    fn fade_in_ramps_alpha() {
        let mut fade = FadeText::new(FadeConfig {
            fade_in: 0.5,
            ..FadeConfig::default()
        });
        fade.show("hello");
        assert_eq!(fade.phase(), FadePhase::FadeIn);
        assert_eq!(fade.alpha(), 0.0);

        fade.advance(0.25);
        assert!(approx(fade.alpha(), 0.5));

        fade.advance(0.5);
        assert_eq!(fade.phase(), FadePhase::Hold);
        assert_eq!(fade.alpha(), 1.0);
    }

    #[test]
    fn show_restarts_instead_of_stacking() {
        let mut fade = FadeText::new(FadeConfig::default());
        fade.show("first");
        fade.advance(2.5);
        assert_eq!(fade.phase(), FadePhase::FadeOut);

        fade.show("second");
        assert_eq!(fade.phase(), FadePhase::Hold);
        assert_eq!(fade.alpha(), 1.0);
        assert_eq!(fade.text(), "second");

        fade.advance(1.9);
        assert_eq!(fade.phase(), FadePhase::Hold);
    }

    #[test]
    fn large_step_runs_through_to_idle() {
        let mut fade = FadeText::new(FadeConfig::default());
        fade.show("hello");

        fade.advance(10.0);

        assert_eq!(fade.phase(), FadePhase::Idle);
        assert_eq!(fade.text(), "");
    }

    #[test]
    fn advance_while_idle_does_nothing() {
        let mut fade = FadeText::new(FadeConfig::default());
        fade.advance(1.0);
        assert_eq!(fade.phase(), FadePhase::Idle);
    }

    #[test]
    fn acts_as_notification_sink() {
        let mut fade = FadeText::new(FadeConfig::default());
        let sink: &mut dyn NotificationSink = &mut fade;

        sink.show(Notification {
            message: "Removed Bottle (+2)".to_string(),
            issued_at: std::time::Duration::ZERO,
        });

        assert_eq!(fade.text(), "Removed Bottle (+2)");
    }
}
