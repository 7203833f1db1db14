//! Momentum model for a rolling option picker (hours, minutes, AM/PM).
//!
//! Position is measured in pixels from the first option. A fling sets a
//! velocity; each [`WheelModel::step`] advances one frame and decays it until it
//! drops under the stop threshold, then the wheel snaps to the nearest option.

use serde::Serialize;

use crate::time::{hour_options, minute_options, to_twelve_hour, Meridiem, TwelveHour};

pub const DEFAULT_ITEM_HEIGHT: f64 = 40.0;
pub const DEFAULT_FRICTION: f64 = 0.95;
pub const DEFAULT_MIN_VELOCITY: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WheelModel {
    options: Vec<String>,
    item_height: f64,
    position: f64,
    velocity: f64,
    friction: f64,
    min_velocity: f64,
}

impl WheelModel {
    pub fn new(options: Vec<String>) -> Self {
        Self {
            options,
            item_height: DEFAULT_ITEM_HEIGHT,
            position: 0.0,
            velocity: 0.0,
            friction: DEFAULT_FRICTION,
            min_velocity: DEFAULT_MIN_VELOCITY,
        }
    }

    pub fn with_item_height(mut self, item_height: f64) -> Self {
        self.item_height = item_height.max(1.0);
        self
    }

    /// `friction` is the per-frame velocity multiplier, clamped to `[0, 1)`.
    pub fn with_friction(mut self, friction: f64) -> Self {
        self.friction = friction.clamp(0.0, 0.999);
        self
    }

    pub fn with_min_velocity(mut self, min_velocity: f64) -> Self {
        self.min_velocity = min_velocity.abs();
        self
    }

    /// Starts positioned on `value` when it is one of the options.
    pub fn select_value(&mut self, value: &str) {
        if let Some(index) = self.options.iter().position(|o| o == value) {
            self.position = index as f64 * self.item_height;
            self.velocity = 0.0;
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn is_moving(&self) -> bool {
        self.velocity != 0.0
    }

    pub fn fling(&mut self, velocity: f64) {
        self.velocity = velocity;
    }

    /// Drags the wheel directly, cancelling any momentum.
    pub fn drag_by(&mut self, delta: f64) {
        self.velocity = 0.0;
        self.position += delta;
    }

    /// Advances one frame. Returns `true` while the wheel is still moving.
    pub fn step(&mut self) -> bool {
        if !self.is_moving() {
            return false;
        }

        self.position += self.velocity;
        self.velocity *= self.friction;

        if self.velocity.abs() < self.min_velocity {
            self.velocity = 0.0;
            self.snap();
            return false;
        }
        true
    }

    /// Runs frames until the wheel settles. `max_frames` bounds the loop.
    pub fn settle(&mut self, max_frames: usize) -> Option<&str> {
        for _ in 0..max_frames {
            if !self.step() {
                break;
            }
        }
        if self.is_moving() {
            self.velocity = 0.0;
            self.snap();
        }
        self.selected()
    }

    /// Moves to the nearest option, clamped to the ends of the list.
    pub fn snap(&mut self) {
        self.position = self.selected_index() as f64 * self.item_height;
    }

    pub fn selected_index(&self) -> usize {
        let last = self.options.len().saturating_sub(1);
        let index = (self.position / self.item_height).round();
        if index <= 0.0 {
            0
        } else {
            (index as usize).min(last)
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.options.get(self.selected_index()).map(String::as_str)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Time Picker
// ═══════════════════════════════════════════════════════════════════════════════

const PERIOD_OPTIONS: [&str; 2] = ["AM", "PM"];

/// Hour, minute and AM/PM wheels for one `HH:MM` value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimePicker {
    pub hours: WheelModel,
    pub minutes: WheelModel,
    pub period: WheelModel,
}

impl TimePicker {
    /// Starts on `value`, or 12:00 AM when it isn't a clock time.
    pub fn new(value: &str) -> Self {
        let start = to_twelve_hour(value).unwrap_or_default();
        let mut picker = Self {
            hours: WheelModel::new(hour_options()),
            minutes: WheelModel::new(minute_options()),
            period: WheelModel::new(PERIOD_OPTIONS.iter().map(|p| p.to_string()).collect()),
        };
        picker.hours.select_value(&start.hour.to_string());
        picker.minutes.select_value(&format!("{:02}", start.minute));
        picker.period.select_value(match start.period {
            Meridiem::Am => "AM",
            Meridiem::Pm => "PM",
        });
        picker
    }

    /// Settles all three wheels.
    pub fn settle(&mut self, max_frames: usize) {
        self.hours.settle(max_frames);
        self.minutes.settle(max_frames);
        self.period.settle(max_frames);
    }

    pub fn value(&self) -> TwelveHour {
        let defaults = TwelveHour::default();
        TwelveHour {
            hour: self
                .hours
                .selected()
                .and_then(|h| h.parse().ok())
                .unwrap_or(defaults.hour),
            minute: self
                .minutes
                .selected()
                .and_then(|m| m.parse().ok())
                .unwrap_or(defaults.minute),
            period: match self.period.selected() {
                Some("PM") => Meridiem::Pm,
                _ => Meridiem::Am,
            },
        }
    }

    /// The selection as a 24-hour `HH:MM` string.
    pub fn clock_time(&self) -> String {
        self.value().to_clock_time()
    }
}
