//! Waypoint following plugin for moving bodies around closed loops.
//!
//! A [`WaypointFollower`] moves its entity from waypoint to waypoint in a fixed
//! time per segment, wrapping from the last waypoint back to the first, and
//! turns the entity about the Y axis at every corner. Useful for patrolling
//! creatures, moving hazards and other kinematic props.
//!
//! # Example
//!
//! ```rust,ignore
//! use avian3d::prelude::*;
//! use bevy::prelude::*;
//! use bevy_waypoint_follow::prelude::*;
//!
//! fn setup(mut commands: Commands) {
//!     commands.spawn((
//!         Transform::from_xyz(1.0, 0.0, 1.0),
//!         RigidBody::Kinematic,
//!         WaypointFollower::new(
//!             vec![
//!                 Vec3::new(1.0, 0.0, 1.0),
//!                 Vec3::new(2.8, 0.0, 12.8),
//!                 Vec3::new(-7.0, 0.0, 15.0),
//!                 Vec3::new(-10.0, 0.0, 4.0),
//!             ],
//!             5.0,
//!             false,
//!         ),
//!     ));
//! }
//! ```

mod components;
mod systems;

pub use components::*;
pub use systems::{activate_waypoint_followers, update_waypoint_followers};

use std::marker::PhantomData;

use avian3d::prelude::RigidBody;
use bevy::prelude::*;

/// Plugin that moves [`WaypointFollower`] entities.
///
/// Followers need a sibling body component of type `B` on the same entity,
/// avian3d's [`RigidBody`] by default. Followers without one disable
/// themselves the first frame they are seen.
///
/// ```ignore
/// // Gate on avian3d rigid bodies
/// app.add_plugins(WaypointFollowPlugin::new());
///
/// // Gate on a body component of your own
/// app.add_plugins(WaypointFollowPlugin::<MyBody>::with_body_component());
/// ```
pub struct WaypointFollowPlugin<B: Component = RigidBody> {
    _body: PhantomData<fn() -> B>,
}

impl WaypointFollowPlugin {
    /// Create the plugin gated on avian3d's [`RigidBody`].
    pub fn new() -> Self {
        Self::with_body_component()
    }
}

impl Default for WaypointFollowPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Component> WaypointFollowPlugin<B> {
    /// Create the plugin gated on body component `B`.
    pub fn with_body_component() -> Self {
        Self { _body: PhantomData }
    }
}

impl<B: Component> Plugin for WaypointFollowPlugin<B> {
    fn build(&self, app: &mut App) {
        app.register_type::<WaypointFollower>()
            .add_message::<FollowerEvent>()
            .add_systems(
                Update,
                (
                    systems::activate_waypoint_followers::<B>,
                    systems::update_waypoint_followers,
                )
                    .chain(),
            );
    }
}
