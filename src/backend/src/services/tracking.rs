//! Person tracking service
//!
//! Turns per-frame detections into the tracking status published on
//! `/coordinates` and the reports forwarded to the motor controller.
//! Independent of HTTP concerns; time is passed in by the caller.

use serde::{Deserialize, Serialize};
use smart_fan_core::types::{PersonCoordinates, TrackingStatus};
use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

/// Detections at or below this confidence are dropped
pub const SCORE_THRESHOLD: f64 = 0.3;
/// Detector class ids that represent a person
pub const PERSON_CLASS_IDS: [u32; 3] = [1, 2, 3];
/// How long the controller swings once a group was seen
pub const GROUP_MODE_DURATION: Duration = Duration::from_secs(30);
/// Grace period before an empty frame reports "no person"
pub const NO_PERSON_DELAY: Duration = Duration::from_secs(2);

const HISTORY_SIZE: usize = 5;
const SMOOTHING_FACTOR: f64 = 0.3;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Detection {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
    pub score: f64,
    pub class_id: u32,
}

impl Detection {
    fn is_person(&self) -> bool {
        PERSON_CLASS_IDS.contains(&self.class_id)
    }
}

/// All detections of one camera frame
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct DetectionFrame {
    pub frame_width: u32,
    pub frame_height: u32,
    pub detections: Vec<Detection>,
}

/// Report sent to the controller's `/data` endpoint
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ControllerReport {
    SinglePerson {
        x: i32,
        y: i32,
        confidence: f64,
        width: i32,
        height: i32,
        angle: f64,
        distance_factor: f64,
    },
    MultiplePeople {
        count: usize,
        x: i32,
        y: i32,
        swing_duration: u64,
    },
    NoPerson {
        x: i32,
        y: i32,
        return_center: bool,
    },
    Reset {
        return_center: bool,
    },
}

/// Compute tracking coordinates for one person box
pub fn person_coordinates(
    detection: &Detection,
    frame_width: u32,
    frame_height: u32,
) -> PersonCoordinates {
    let (x1, y1, x2, y2) = (detection.x1, detection.y1, detection.x2, detection.y2);
    let frame_width = f64::from(frame_width.max(1));
    let frame_height = f64::from(frame_height.max(1));
    let half_width = frame_width / 2.0;
    let half_height = frame_height / 2.0;

    // boxes come straight from clients, so widen before combining corners
    let center_x = saturate((i64::from(x1) + i64::from(x2)).div_euclid(2));
    let center_y = saturate((i64::from(y1) + i64::from(y2)).div_euclid(2));
    let width = saturate(i64::from(x2) - i64::from(x1));
    let height = saturate(i64::from(y2) - i64::from(y1));

    PersonCoordinates {
        center_x,
        center_y,
        bbox_x1: x1,
        bbox_y1: y1,
        bbox_x2: x2,
        bbox_y2: y2,
        width,
        height,
        confidence: detection.score,
        class_id: detection.class_id,
        normalized_x: (f64::from(center_x) - half_width) / half_width,
        normalized_y: (f64::from(center_y) - half_height) / half_height,
        distance_factor: f64::from(width) * f64::from(height) / (frame_width * frame_height),
        angle_from_center: (f64::from(center_x) - half_width)
            .atan2(half_height)
            .to_degrees(),
    }
}

fn saturate(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Weighted moving average over the latest centers to reduce jitter
#[derive(Debug, Default)]
pub struct CoordinateSmoother {
    history: VecDeque<(f64, f64)>,
}

impl CoordinateSmoother {
    pub fn smooth(&mut self, raw: PersonCoordinates) -> PersonCoordinates {
        self.history
            .push_back((f64::from(raw.center_x), f64::from(raw.center_y)));

        if self.history.len() == 1 {
            return raw;
        }

        if self.history.len() > HISTORY_SIZE {
            self.history.pop_front();
        }

        // newest entry carries the highest weight
        let (mut sum_x, mut sum_y, mut total_weight) = (0.0, 0.0, 0.0);
        for (i, (x, y)) in self.history.iter().enumerate() {
            let weight = (i + 1) as f64;
            sum_x += x * weight;
            sum_y += y * weight;
            total_weight += weight;
        }
        let mut smoothed_x = sum_x / total_weight;
        let mut smoothed_y = sum_y / total_weight;

        let (prev_x, prev_y) = self.history[self.history.len() - 2];
        smoothed_x = prev_x * (1.0 - SMOOTHING_FACTOR) + smoothed_x * SMOOTHING_FACTOR;
        smoothed_y = prev_y * (1.0 - SMOOTHING_FACTOR) + smoothed_y * SMOOTHING_FACTOR;

        PersonCoordinates {
            center_x: smoothed_x.trunc() as i32,
            center_y: smoothed_y.trunc() as i32,
            ..raw
        }
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}

/// Tracking state machine fed one frame at a time
#[derive(Debug, Default)]
pub struct TrackingService {
    coordinates: Option<PersonCoordinates>,
    person_detected: bool,
    last_detection: Option<Instant>,
    group_mode_started: Option<Instant>,
    smoother: CoordinateSmoother,
}

impl TrackingService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current status as published on `/coordinates`
    pub fn status(&self) -> TrackingStatus {
        TrackingStatus {
            person_detected: self.person_detected,
            group_mode_active: self.group_mode_active(),
            coordinates: if self.person_detected {
                self.coordinates.clone()
            } else {
                None
            },
        }
    }

    pub fn group_mode_active(&self) -> bool {
        self.group_mode_started.is_some()
    }

    /// Process one frame of detections.
    ///
    /// Returns the report to forward to the controller, if any.
    pub fn process_frame(&mut self, frame: &DetectionFrame, now: Instant) -> Option<ControllerReport> {
        if let Some(started) = self.group_mode_started {
            if now.saturating_duration_since(started) >= GROUP_MODE_DURATION {
                log::info!("group mode ended, resuming normal detection");
                self.group_mode_started = None;
            }
        }

        let persons: Vec<&Detection> = frame
            .detections
            .iter()
            .filter(|d| d.score > SCORE_THRESHOLD && d.is_person())
            .collect();

        match persons.as_slice() {
            [person] if !self.group_mode_active() => {
                let raw = person_coordinates(person, frame.frame_width, frame.frame_height);
                let coordinates = self.smoother.smooth(raw);
                self.person_detected = true;
                self.last_detection = Some(now);

                log::debug!(
                    "person at ({}, {}), angle {:.2}, distance factor {:.3}, confidence {:.2}",
                    coordinates.center_x,
                    coordinates.center_y,
                    coordinates.angle_from_center,
                    coordinates.distance_factor,
                    coordinates.confidence
                );

                let report = ControllerReport::SinglePerson {
                    x: coordinates.center_x,
                    y: coordinates.center_y,
                    confidence: coordinates.confidence,
                    width: coordinates.width,
                    height: coordinates.height,
                    angle: coordinates.angle_from_center,
                    distance_factor: coordinates.distance_factor,
                };
                self.coordinates = Some(coordinates);
                Some(report)
            }
            persons if persons.len() >= 2 => {
                if !self.group_mode_active() {
                    log::info!("group of {} detected, starting swing mode", persons.len());
                    self.group_mode_started = Some(now);
                }
                self.clear_person();

                Some(ControllerReport::MultiplePeople {
                    count: persons.len(),
                    x: 0,
                    y: 0,
                    swing_duration: GROUP_MODE_DURATION.as_secs(),
                })
            }
            _ => {
                let grace_expired = self
                    .last_detection
                    .is_none_or(|last| now.saturating_duration_since(last) > NO_PERSON_DELAY);

                if self.person_detected || grace_expired {
                    self.clear_person();
                    Some(ControllerReport::NoPerson {
                        x: 0,
                        y: 0,
                        return_center: true,
                    })
                } else {
                    None
                }
            }
        }
    }

    /// Reset tracking, including group mode
    pub fn reset(&mut self) -> ControllerReport {
        self.clear_person();
        self.group_mode_started = None;
        ControllerReport::Reset {
            return_center: true,
        }
    }

    fn clear_person(&mut self) {
        self.person_detected = false;
        self.coordinates = None;
        self.smoother.clear();
    }
}
