//! Debug drawing of waypoint loops.

use bevy::prelude::*;

use crate::path_follow::WaypointFollower;

/// Settings for waypoint path gizmos.
#[derive(Resource, Debug, Clone)]
pub struct WaypointGizmoSettings {
    /// Whether to draw follower paths at all.
    pub show_paths: bool,
    /// Also draw paths of disabled followers.
    pub show_disabled: bool,
    /// Radius of waypoint spheres.
    pub point_radius: f32,
    /// Color of the closed path.
    pub path_color: Color,
    /// Color of the segment a follower is currently on.
    pub active_segment_color: Color,
    /// Color of waypoint spheres.
    pub point_color: Color,
    /// Color used for everything on disabled followers.
    pub disabled_color: Color,
}

impl Default for WaypointGizmoSettings {
    fn default() -> Self {
        Self {
            show_paths: true,
            show_disabled: false,
            point_radius: 0.2,
            path_color: Color::srgb(0.5, 0.5, 0.5),
            active_segment_color: Color::srgb(1.0, 0.8, 0.2),
            point_color: Color::srgb(0.3, 0.3, 0.8),
            disabled_color: Color::srgba(0.6, 0.2, 0.2, 0.5),
        }
    }
}

impl WaypointGizmoSettings {
    /// Toggle path visibility.
    pub fn toggle(&mut self) {
        self.show_paths = !self.show_paths;
    }
}

/// System that draws every follower's loop, waypoints and current segment.
pub fn draw_waypoint_paths(
    settings: Res<WaypointGizmoSettings>,
    followers: Query<&WaypointFollower>,
    mut gizmos: Gizmos,
) {
    if !settings.show_paths {
        return;
    }

    for follower in &followers {
        if !follower.is_active() {
            continue;
        }
        if !follower.is_enabled() && !settings.show_disabled {
            continue;
        }

        let (path_color, point_color) = if follower.is_enabled() {
            (settings.path_color, settings.point_color)
        } else {
            (settings.disabled_color, settings.disabled_color)
        };

        let points = &follower.waypoints;
        for window in points.windows(2) {
            gizmos.line(window[0], window[1], path_color);
        }
        // Close the loop
        gizmos.line(points[points.len() - 1], points[0], path_color);

        for &point in points {
            gizmos.sphere(Isometry3d::from_translation(point), settings.point_radius, point_color);
        }

        if follower.is_enabled() {
            if let Some((from, to)) = follower.segment_endpoints() {
                gizmos.line(from, to, settings.active_segment_color);
            }
        }
    }
}

/// Plugin that draws waypoint loops with Bevy gizmos.
///
/// Requires Bevy's gizmo plugin, which `DefaultPlugins` includes. Use the
/// [`WaypointGizmoSettings`] resource to hide the drawing at runtime.
pub struct WaypointGizmoPlugin;

impl Plugin for WaypointGizmoPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WaypointGizmoSettings>()
            .add_systems(Update, draw_waypoint_paths);
    }
}
