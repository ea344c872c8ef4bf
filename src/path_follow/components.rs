use bevy::prelude::*;

use crate::geometry::{corner_rotation, cyclic_index, lerp_points, turn_angle};

/// Minimum number of waypoints for a follower to move.
///
/// Paths with fewer points are left untouched rather than treated as errors.
pub const MIN_ACTIVE_WAYPOINTS: usize = 3;

/// Component that moves an entity around a closed loop of waypoints.
///
/// Every segment takes `segment_duration` seconds regardless of its length.
/// When the entity crosses a waypoint it is turned about the Y axis by the
/// angle between the next corner's incoming and outgoing segments; the turn is
/// composed onto the current rotation, so the entity's starting orientation is
/// preserved.
///
/// The follower only runs on entities that also carry a rigid body. Entities
/// without one are disabled the first time the follower is seen.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component, Default)]
pub struct WaypointFollower {
    /// Waypoints visited in order. The path returns to the first after the last.
    pub waypoints: Vec<Vec3>,

    /// Seconds needed to travel one segment.
    pub segment_duration: f32,

    /// Turn around -Y at corners instead of +Y.
    pub clockwise: bool,

    /// Whether the follower is updated at all.
    pub enabled: bool,

    current_index: usize,
    elapsed: f32,
}

impl Default for WaypointFollower {
    fn default() -> Self {
        Self {
            waypoints: Vec::new(),
            segment_duration: 1.0,
            clockwise: false,
            enabled: true,
            current_index: 0,
            elapsed: 0.0,
        }
    }
}

impl WaypointFollower {
    /// Create a follower for the given loop.
    pub fn new(waypoints: Vec<Vec3>, segment_duration: f32, clockwise: bool) -> Self {
        let mut follower = Self::default();
        follower.configure(waypoints, segment_duration, clockwise);
        follower
    }

    /// Replace the path and restart from the first waypoint.
    ///
    /// Values are stored as given. Callers are expected to pass a positive
    /// duration and no duplicate consecutive waypoints.
    pub fn configure(&mut self, waypoints: Vec<Vec3>, segment_duration: f32, clockwise: bool) {
        self.waypoints = waypoints;
        self.segment_duration = segment_duration;
        self.clockwise = clockwise;
        self.current_index = 0;
        self.elapsed = 0.0;
    }

    /// Start from another waypoint. Wraps if `index` is past the end.
    pub fn with_start_index(mut self, index: usize) -> Self {
        self.current_index = if self.waypoints.is_empty() {
            0
        } else {
            index % self.waypoints.len()
        };
        self
    }

    /// Set whether the follower starts enabled.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Stop moving without losing progress.
    pub fn pause(&mut self) {
        self.enabled = false;
    }

    /// Continue from where the follower was paused.
    pub fn resume(&mut self) {
        self.enabled = true;
    }

    /// Whether the path is long enough to move along.
    pub fn is_active(&self) -> bool {
        self.waypoints.len() >= MIN_ACTIVE_WAYPOINTS
    }

    /// Whether the follower is currently allowed to move.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Index of the waypoint the follower is currently leaving.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Seconds spent in the current segment.
    pub fn elapsed_in_segment(&self) -> f32 {
        self.elapsed
    }

    /// Fraction of the current segment already travelled.
    pub fn segment_progress(&self) -> f32 {
        if self.segment_duration > 0.0 {
            self.elapsed / self.segment_duration
        } else {
            0.0
        }
    }

    /// Start and end points of the current segment.
    ///
    /// The index wraps if the waypoint list was shortened after the follower
    /// started moving.
    pub fn segment_endpoints(&self) -> Option<(Vec3, Vec3)> {
        let len = self.waypoints.len();
        if len == 0 {
            return None;
        }
        let from = self.waypoints[cyclic_index(self.current_index, 0, len)];
        let to = self.waypoints[cyclic_index(self.current_index, 1, len)];
        Some((from, to))
    }

    /// Sum of the turn angles at every corner of the loop.
    ///
    /// Degenerate corners contribute nothing.
    pub fn lap_turn_angle(&self) -> f32 {
        let len = self.waypoints.len();
        (0..len)
            .filter_map(|index| self.corner_angle(index))
            .sum()
    }

    /// Turn angle at the corner reached right after entering waypoint `index`.
    fn corner_angle(&self, index: usize) -> Option<f32> {
        let len = self.waypoints.len();
        let p1 = self.waypoints[cyclic_index(index, 0, len)];
        let p2 = self.waypoints[cyclic_index(index, 1, len)];
        let p3 = self.waypoints[cyclic_index(index, 2, len)];
        turn_angle(p1, p2, p3)
    }

    /// Advance the follower by `delta` seconds and write the result to `transform`.
    ///
    /// `on_event` is called for every waypoint crossed during this step. When a
    /// single step spans whole laps, those laps are folded into one turn and
    /// reported as a single [`FollowerEventKind::LoopCompleted`], so the work per
    /// call never exceeds one lap. Paths with fewer than [`MIN_ACTIVE_WAYPOINTS`]
    /// points leave the transform untouched. Enablement is checked by the caller.
    pub fn advance(
        &mut self,
        delta: f32,
        transform: &mut Transform,
        mut on_event: impl FnMut(FollowerEventKind),
    ) {
        if !self.is_active() {
            return;
        }

        // NaN durations fail this check too
        if !(self.segment_duration > 0.0) {
            bevy::log::warn_once!(
                "waypoint follower has non-positive segment duration {}, not moving",
                self.segment_duration
            );
            return;
        }

        if !delta.is_finite() {
            bevy::log::warn_once!("waypoint follower got non-finite delta {}, not moving", delta);
            return;
        }

        let len = self.waypoints.len();
        self.current_index %= len;
        self.elapsed += delta;

        if self.elapsed >= self.segment_duration {
            let remainder = self.elapsed % self.segment_duration;
            // Derived from the remainder so the count and the leftover time agree
            let crossings = ((self.elapsed - remainder) / self.segment_duration)
                .round()
                .max(1.0) as u64;
            self.elapsed = remainder;

            let laps = crossings / len as u64;
            let partial = (crossings % len as u64) as usize;

            if laps > 0 {
                // Whole laps end where they started, so only the accumulated turn remains
                let lap_angle = f64::from(self.lap_turn_angle());
                let folded = (laps as f64 * lap_angle).rem_euclid(std::f64::consts::TAU) as f32;
                transform.rotation *= corner_rotation(folded, self.clockwise);
                on_event(FollowerEventKind::LoopCompleted);
            }

            for _ in 0..partial {
                self.cross_waypoint(transform, &mut on_event);
            }
        }

        let t = self.elapsed / self.segment_duration;
        if let Some((from, to)) = self.segment_endpoints() {
            transform.translation = lerp_points(from, to, t);
        }
    }

    /// Move on to the next waypoint and turn for the corner ahead.
    fn cross_waypoint(&mut self, transform: &mut Transform, on_event: &mut impl FnMut(FollowerEventKind)) {
        self.current_index = cyclic_index(self.current_index, 1, self.waypoints.len());

        on_event(FollowerEventKind::ReachedWaypoint(self.current_index));
        if self.current_index == 0 {
            on_event(FollowerEventKind::LoopCompleted);
        }

        match self.corner_angle(self.current_index) {
            Some(angle) => {
                transform.rotation *= corner_rotation(angle, self.clockwise);
            }
            None => {
                bevy::log::warn_once!(
                    "waypoint follower has duplicate consecutive waypoints near index {}, skipping turn",
                    self.current_index
                );
            }
        }
    }
}

/// Message emitted when a follower crosses a waypoint.
#[derive(Message, Debug, Clone)]
pub struct FollowerEvent {
    /// The entity with the WaypointFollower component.
    pub entity: Entity,
    /// The type of event.
    pub kind: FollowerEventKind,
}

/// Types of follower events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowerEventKind {
    /// Follower reached the waypoint with this index and is now leaving it.
    ReachedWaypoint(usize),
    /// Follower returned to the first waypoint.
    LoopCompleted,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn square() -> Vec<Vec3> {
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(10.0, 10.0, 0.0),
            Vec3::new(0.0, 10.0, 0.0),
        ]
    }

    fn step(follower: &mut WaypointFollower, transform: &mut Transform, delta: f32) -> Vec<FollowerEventKind> {
        let mut events = Vec::new();
        follower.advance(delta, transform, |kind| events.push(kind));
        events
    }

    #[test]
    fn test_configure_resets_progress() {
        let mut follower = WaypointFollower::new(square(), 1.0, false);
        let mut transform = Transform::default();
        step(&mut follower, &mut transform, 2.5);
        assert_eq!(follower.current_index(), 2);

        follower.configure(square(), 2.0, true);
        assert_eq!(follower.current_index(), 0);
        assert_eq!(follower.elapsed_in_segment(), 0.0);
        assert_eq!(follower.segment_duration, 2.0);
        assert!(follower.clockwise);
    }

    #[test]
    fn test_short_paths_do_nothing() {
        let start = Transform::from_xyz(1.0, 2.0, 3.0).with_rotation(Quat::from_rotation_x(0.3));

        for count in 0..=2 {
            let points: Vec<Vec3> = square().into_iter().take(count).collect();
            let mut follower = WaypointFollower::new(points, 1.0, false);
            let mut transform = start;

            for _ in 0..10 {
                let events = step(&mut follower, &mut transform, 0.7);
                assert!(events.is_empty());
            }

            assert_eq!(transform, start);
            assert!(!follower.is_active());
        }
    }

    #[test]
    fn test_midpoint_of_segment() {
        let mut follower = WaypointFollower::new(square(), 2.0, false);
        let mut transform = Transform::default();

        step(&mut follower, &mut transform, 1.0);

        assert!((transform.translation - Vec3::new(5.0, 0.0, 0.0)).length() < 0.001);
        assert!((follower.segment_progress() - 0.5).abs() < 0.001);
        assert_eq!(transform.rotation, Quat::IDENTITY);
    }

    #[test]
    fn test_full_lap_returns_to_start() {
        let mut follower = WaypointFollower::new(square(), 1.0, false).with_start_index(2);
        let mut transform = Transform::default();
        let mut events = Vec::new();

        // 4 segments at 0.25s steps
        for _ in 0..16 {
            events.extend(step(&mut follower, &mut transform, 0.25));
            assert!(follower.current_index() < 4);
        }

        assert_eq!(follower.current_index(), 2);
        assert!(follower.elapsed_in_segment() < 0.001);
        assert_eq!(
            events,
            vec![
                FollowerEventKind::ReachedWaypoint(3),
                FollowerEventKind::ReachedWaypoint(0),
                FollowerEventKind::LoopCompleted,
                FollowerEventKind::ReachedWaypoint(1),
                FollowerEventKind::ReachedWaypoint(2),
            ]
        );
    }

    #[test]
    fn test_last_segment_wraps_to_first_waypoint() {
        let mut follower = WaypointFollower::new(square(), 1.0, false).with_start_index(3);
        let mut transform = Transform::default();

        assert_eq!(
            follower.segment_endpoints(),
            Some((Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO))
        );

        step(&mut follower, &mut transform, 0.5);
        assert!((transform.translation - Vec3::new(0.0, 5.0, 0.0)).length() < 0.001);
        assert_eq!(follower.current_index(), 3);
    }

    #[test]
    fn test_square_scenario() {
        let mut follower = WaypointFollower::new(square(), 1.0, false);
        let mut transform = Transform::default();

        step(&mut follower, &mut transform, 0.5);
        assert!((transform.translation - Vec3::new(5.0, 0.0, 0.0)).length() < 0.001);
        assert_eq!(follower.current_index(), 0);

        let events = step(&mut follower, &mut transform, 0.6);
        assert_eq!(events, vec![FollowerEventKind::ReachedWaypoint(1)]);
        assert_eq!(follower.current_index(), 1);
        assert!((follower.elapsed_in_segment() - 0.1).abs() < 0.001);
        assert!((transform.translation - Vec3::new(10.0, 1.0, 0.0)).length() < 0.001);

        // One quarter turn around +Y
        let expected = Quat::from_axis_angle(Vec3::Y, FRAC_PI_2);
        assert!(transform.rotation.angle_between(expected) < 0.001);
    }

    #[test]
    fn test_clockwise_flips_turn_axis() {
        let mut ccw = WaypointFollower::new(square(), 1.0, false);
        let mut cw = WaypointFollower::new(square(), 1.0, true);
        let mut ccw_transform = Transform::default();
        let mut cw_transform = Transform::default();

        step(&mut ccw, &mut ccw_transform, 1.0);
        step(&mut cw, &mut cw_transform, 1.0);

        let (ccw_axis, ccw_angle) = ccw_transform.rotation.to_axis_angle();
        let (cw_axis, cw_angle) = cw_transform.rotation.to_axis_angle();

        assert!((ccw_axis - Vec3::Y).length() < 0.001);
        assert!((cw_axis - Vec3::NEG_Y).length() < 0.001);
        assert!((ccw_angle - cw_angle).abs() < 0.001);
        assert!((ccw_transform.translation - cw_transform.translation).length() < 0.001);
    }

    #[test]
    fn test_turn_composes_with_existing_rotation() {
        let initial = Quat::from_rotation_x(FRAC_PI_2);
        let mut follower = WaypointFollower::new(square(), 1.0, false);
        let mut transform = Transform::from_rotation(initial);

        step(&mut follower, &mut transform, 1.0);

        let expected = initial * Quat::from_axis_angle(Vec3::Y, FRAC_PI_2);
        assert!(transform.rotation.angle_between(expected) < 0.001);
    }

    #[test]
    fn test_long_step_crosses_several_waypoints() {
        let mut follower = WaypointFollower::new(square(), 1.0, false);
        let mut transform = Transform::default();

        let events = step(&mut follower, &mut transform, 2.5);

        assert_eq!(
            events,
            vec![
                FollowerEventKind::ReachedWaypoint(1),
                FollowerEventKind::ReachedWaypoint(2),
            ]
        );
        assert_eq!(follower.current_index(), 2);
        assert!(follower.elapsed_in_segment() < follower.segment_duration);
        assert!((transform.translation - Vec3::new(5.0, 10.0, 0.0)).length() < 0.001);
        // Two quarter turns
        assert!((transform.rotation.to_axis_angle().1 - std::f32::consts::PI).abs() < 0.001);
    }

    #[test]
    fn test_non_positive_duration_does_nothing() {
        let start = Transform::from_xyz(4.0, 0.0, 0.0);
        for duration in [0.0, -1.0, f32::NAN] {
            let mut follower = WaypointFollower::new(square(), duration, false);
            let mut transform = start;
            let events = step(&mut follower, &mut transform, 0.5);
            assert!(events.is_empty());
            assert_eq!(transform, start);
        }
    }

    #[test]
    fn test_duplicate_waypoint_skips_turn() {
        let points = vec![
            Vec3::ZERO,
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(0.0, 10.0, 0.0),
        ];
        let mut follower = WaypointFollower::new(points, 1.0, false);
        let mut transform = Transform::default();

        step(&mut follower, &mut transform, 1.25);

        assert_eq!(follower.current_index(), 1);
        assert!(!transform.rotation.is_nan());
        assert_eq!(transform.rotation, Quat::IDENTITY);
    }

    #[test]
    fn test_huge_step_finishes() {
        let mut follower = WaypointFollower::new(square(), 1.0, false);
        let mut transform = Transform::default();

        let events = step(&mut follower, &mut transform, 1.0e8);

        // 1e8 segments is a whole number of laps around the square
        assert_eq!(events, vec![FollowerEventKind::LoopCompleted]);
        assert_eq!(follower.current_index(), 0);
        assert!(follower.elapsed_in_segment() < follower.segment_duration);
        assert!(transform.translation.length() < 0.001);
        assert!(transform.rotation.is_normalized());
    }

    #[test]
    fn test_tiny_duration_is_bounded() {
        let mut follower = WaypointFollower::new(square(), 1.0e-6, true);
        let mut transform = Transform::default();

        let events = step(&mut follower, &mut transform, 1.0);

        assert!(events.len() <= 2 + follower.waypoints.len() * 2);
        assert!(follower.current_index() < 4);
        assert!(follower.elapsed_in_segment() < follower.segment_duration);
        assert!(transform.rotation.is_normalized());
    }

    #[test]
    fn test_step_spanning_laps_folds_turns() {
        let mut follower = WaypointFollower::new(square(), 1.0, false);
        let mut transform = Transform::default();

        // Two full laps plus one segment and a quarter
        let events = step(&mut follower, &mut transform, 9.25);

        assert_eq!(
            events,
            vec![
                FollowerEventKind::LoopCompleted,
                FollowerEventKind::ReachedWaypoint(1),
            ]
        );
        assert_eq!(follower.current_index(), 1);
        assert!((follower.elapsed_in_segment() - 0.25).abs() < 0.001);
        assert!((transform.translation - Vec3::new(10.0, 2.5, 0.0)).length() < 0.001);

        // Each lap turns a full circle, leaving the single quarter turn
        let expected = Quat::from_axis_angle(Vec3::Y, FRAC_PI_2);
        assert!(transform.rotation.angle_between(expected) < 0.001);
    }

    #[test]
    fn test_lap_turn_angle_of_square() {
        let follower = WaypointFollower::new(square(), 1.0, false);
        assert!((follower.lap_turn_angle() - std::f32::consts::TAU).abs() < 0.001);
    }

    #[test]
    fn test_shortened_path_wraps_index() {
        let mut follower = WaypointFollower::new(square(), 1.0, false).with_start_index(3);
        let mut transform = Transform::default();

        follower.waypoints.truncate(3);
        assert_eq!(follower.segment_endpoints(), Some((Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0))));

        step(&mut follower, &mut transform, 0.1);

        assert_eq!(follower.current_index(), 0);
        assert!((transform.translation - Vec3::new(1.0, 0.0, 0.0)).length() < 0.001);
    }
}
