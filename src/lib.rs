//! # bevy_waypoint_follow
//!
//! A Bevy plugin that moves rigid bodies around closed waypoint loops.
//!
//! ## Features
//!
//! - Constant time per segment, regardless of segment length
//! - Corner turns composed onto the body's own orientation
//! - Followers gated on a sibling rigid body (avian3d by default)
//! - Messages when waypoints are reached and laps complete
//! - Serializable with Bevy's scene system (RON format)
//! - Optional debug gizmos for the paths
//!
//! ## Quick Start
//!
//! ```ignore
//! use avian3d::prelude::*;
//! use bevy::prelude::*;
//! use bevy_waypoint_follow::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(PhysicsPlugins::default())
//!         .add_plugins(WaypointFollowPlugin::new())
//!         .add_plugins(WaypointGizmoPlugin)  // Optional: draws the loops
//!         .add_systems(Startup, setup)
//!         .run();
//! }
//!
//! fn setup(mut commands: Commands) {
//!     commands.spawn((
//!         Transform::default(),
//!         RigidBody::Kinematic,
//!         WaypointFollower::new(
//!             vec![
//!                 Vec3::new(-6.8, 0.0, 0.0),
//!                 Vec3::new(6.7, 0.0, 4.3),
//!                 Vec3::new(3.2, 0.0, 11.3),
//!             ],
//!             4.0,
//!             true,
//!         ),
//!     ));
//! }
//! ```
//!
//! ## Plugins
//!
//! - [`WaypointFollowPlugin`]: Moves followers and writes [`path_follow::FollowerEvent`]s (required)
//! - [`WaypointGizmoPlugin`]: Draws follower paths (optional, `gizmos` feature)

pub mod geometry;
pub mod path_follow;

#[cfg(feature = "gizmos")]
pub mod gizmos;

pub use path_follow::WaypointFollowPlugin;

#[cfg(feature = "gizmos")]
pub use gizmos::WaypointGizmoPlugin;

/// Convenient re-exports of commonly used types.
pub mod prelude {
    pub use crate::path_follow::{
        FollowerEvent, FollowerEventKind, WaypointFollowPlugin, WaypointFollower,
        MIN_ACTIVE_WAYPOINTS,
    };

    #[cfg(feature = "gizmos")]
    pub use crate::gizmos::{WaypointGizmoPlugin, WaypointGizmoSettings};
}
