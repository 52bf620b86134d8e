//! Viewer interaction state.
//!
//! Mirrors the controls panel: an explosion slider, the reset and
//! maximum-explosion buttons and the quick view buttons. Each [`Action`]
//! updates the state; the caller then re-runs the transform from the
//! original mesh with [`ViewerState::factor`].

use std::fmt;

use crate::projection::ViewPreset;

/// Closed slider range with a fixed step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplosionRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl ExplosionRange {
    /// The explosion slider: 0 to 10 in steps of 0.5.
    pub const UI: ExplosionRange = ExplosionRange {
        min: 0.0,
        max: 10.0,
        step: 0.5,
    };

    /// Clamp into the range and snap to the nearest step.
    /// Non-finite input falls back to the minimum.
    pub fn clamp(&self, factor: f64) -> f64 {
        if !factor.is_finite() {
            return self.min;
        }
        let snapped = self.min + ((factor - self.min) / self.step).round() * self.step;
        snapped.clamp(self.min, self.max)
    }
}

impl Default for ExplosionRange {
    fn default() -> Self {
        Self::UI
    }
}

/// Status classification of an explosion factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplosionLevel {
    Normal,
    Light,
    Medium,
    Strong,
    Extreme,
}

impl ExplosionLevel {
    /// Desktop thresholds: 2.5 / 5 / 7.5
    pub fn classify(factor: f64) -> Self {
        if factor <= 0.0 {
            ExplosionLevel::Normal
        } else if factor <= 2.5 {
            ExplosionLevel::Light
        } else if factor <= 5.0 {
            ExplosionLevel::Medium
        } else if factor <= 7.5 {
            ExplosionLevel::Strong
        } else {
            ExplosionLevel::Extreme
        }
    }

    /// Compact-layout thresholds: 3 / 6, no `Extreme`
    pub fn classify_compact(factor: f64) -> Self {
        if factor <= 0.0 {
            ExplosionLevel::Normal
        } else if factor <= 3.0 {
            ExplosionLevel::Light
        } else if factor <= 6.0 {
            ExplosionLevel::Medium
        } else {
            ExplosionLevel::Strong
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExplosionLevel::Normal => "Normal",
            ExplosionLevel::Light => "Light",
            ExplosionLevel::Medium => "Medium",
            ExplosionLevel::Strong => "Strong",
            ExplosionLevel::Extreme => "Extreme",
        }
    }
}

/// A single user interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    SetFactor(f64),
    Increase,
    Decrease,
    MaxExplosion,
    Reset,
    View(ViewPreset),
}

/// What last changed, which selects the status wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    Slider,
    Reset,
    MaxExplosion,
    View,
}

#[derive(Debug, Clone)]
pub struct ViewerState {
    range: ExplosionRange,
    factor: f64,
    view: ViewPreset,
    trigger: Trigger,
}

impl ViewerState {
    pub fn new(range: ExplosionRange) -> Self {
        Self {
            range,
            factor: range.min,
            view: ViewPreset::Default,
            trigger: Trigger::Slider,
        }
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    pub fn view(&self) -> ViewPreset {
        self.view
    }

    pub fn range(&self) -> ExplosionRange {
        self.range
    }

    pub fn is_exploded(&self) -> bool {
        self.factor > 0.0
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::SetFactor(f) => {
                self.factor = self.range.clamp(f);
                self.trigger = Trigger::Slider;
            }
            Action::Increase => {
                self.factor = self.range.clamp(self.factor + self.range.step);
                self.trigger = Trigger::Slider;
            }
            Action::Decrease => {
                self.factor = self.range.clamp(self.factor - self.range.step);
                self.trigger = Trigger::Slider;
            }
            Action::MaxExplosion => {
                self.factor = self.range.max;
                self.trigger = Trigger::MaxExplosion;
            }
            Action::Reset => {
                self.factor = self.range.min;
                self.view = ViewPreset::Default;
                self.trigger = Trigger::Reset;
            }
            Action::View(preset) => {
                self.view = preset;
                self.trigger = Trigger::View;
            }
        }
        log::debug!("{:?} -> factor {} view {:?}", action, self.factor, self.view);
    }

    /// Status line describing the current state.
    pub fn status(&self) -> Status {
        Status {
            trigger: self.trigger,
            factor: self.factor,
            view: self.view,
            compact: false,
        }
    }

    /// Shorter status for the compact layout.
    pub fn compact_status(&self) -> Status {
        Status {
            compact: true,
            ..self.status()
        }
    }
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::new(ExplosionRange::UI)
    }
}

/// Displayable status text, see [`ViewerState::status`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Status {
    trigger: Trigger,
    factor: f64,
    view: ViewPreset,
    compact: bool,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let factor = self.factor;
        let view = match self.view {
            ViewPreset::Default => "Default",
            ViewPreset::Top => "Top",
            ViewPreset::Front => "Front",
            ViewPreset::Side => "Side",
        };

        if self.compact {
            return match self.trigger {
                Trigger::View => write!(f, "{} - {}", view, factor),
                Trigger::MaxExplosion => write!(f, "Maximum - {}", factor),
                Trigger::Reset => write!(f, "Reset - {}", factor),
                Trigger::Slider => match ExplosionLevel::classify_compact(factor) {
                    ExplosionLevel::Normal => write!(f, "Normal"),
                    level => write!(f, "{} - {}", level.label(), factor),
                },
            };
        }

        match self.trigger {
            Trigger::View => write!(f, "{} View - Explosion: {}", view, factor),
            Trigger::MaxExplosion => write!(f, "Maximum Explosion - Factor: {}", factor),
            Trigger::Reset => write!(f, "View Reset - Explosion: {}", factor),
            Trigger::Slider => match ExplosionLevel::classify(factor) {
                ExplosionLevel::Normal => write!(f, "Normal Mode - No Explosion"),
                level => write!(f, "{} Explosion - Factor: {}", level.label(), factor),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_snaps_and_clamps() {
        let range = ExplosionRange::UI;
        assert_eq!(range.clamp(3.3), 3.5);
        assert_eq!(range.clamp(3.2), 3.0);
        assert_eq!(range.clamp(-4.0), 0.0);
        assert_eq!(range.clamp(42.0), 10.0);
        assert_eq!(range.clamp(f64::NAN), 0.0);
    }

    #[test]
    fn test_classify_thresholds() {
        assert_eq!(ExplosionLevel::classify(0.0), ExplosionLevel::Normal);
        assert_eq!(ExplosionLevel::classify(2.5), ExplosionLevel::Light);
        assert_eq!(ExplosionLevel::classify(3.0), ExplosionLevel::Medium);
        assert_eq!(ExplosionLevel::classify(7.5), ExplosionLevel::Strong);
        assert_eq!(ExplosionLevel::classify(8.0), ExplosionLevel::Extreme);

        assert_eq!(ExplosionLevel::classify_compact(3.0), ExplosionLevel::Light);
        assert_eq!(ExplosionLevel::classify_compact(6.0), ExplosionLevel::Medium);
        assert_eq!(ExplosionLevel::classify_compact(10.0), ExplosionLevel::Strong);
    }

    #[test]
    fn test_buttons() {
        let mut state = ViewerState::default();
        state.apply(Action::MaxExplosion);
        assert_eq!(state.factor(), 10.0);
        assert_eq!(state.status().to_string(), "Maximum Explosion - Factor: 10");

        state.apply(Action::View(ViewPreset::Top));
        assert_eq!(state.factor(), 10.0);
        assert_eq!(state.status().to_string(), "Top View - Explosion: 10");
        assert_eq!(state.compact_status().to_string(), "Top - 10");

        state.apply(Action::Reset);
        assert_eq!(state.factor(), 0.0);
        assert_eq!(state.view(), ViewPreset::Default);
        assert_eq!(state.status().to_string(), "View Reset - Explosion: 0");
    }

    #[test]
    fn test_slider_status() {
        let mut state = ViewerState::default();
        assert_eq!(state.status().to_string(), "Normal Mode - No Explosion");
        assert_eq!(state.compact_status().to_string(), "Normal");

        state.apply(Action::SetFactor(2.5));
        assert_eq!(state.status().to_string(), "Light Explosion - Factor: 2.5");

        state.apply(Action::Increase);
        assert_eq!(state.factor(), 3.0);
        assert_eq!(state.status().to_string(), "Medium Explosion - Factor: 3");
        assert_eq!(state.compact_status().to_string(), "Light - 3");

        state.apply(Action::SetFactor(9.0));
        assert_eq!(state.status().to_string(), "Extreme Explosion - Factor: 9");
    }

    #[test]
    fn test_decrease_stops_at_zero() {
        let mut state = ViewerState::default();
        state.apply(Action::Decrease);
        assert_eq!(state.factor(), 0.0);
        assert!(!state.is_exploded());
    }
}
