use bevy::prelude::*;

use super::{FollowerEvent, WaypointFollower};

/// System that checks newly added followers for a sibling body component `B`.
///
/// Followers on entities without one are disabled. This only happens once per
/// follower; adding the body later does not re-enable it.
pub fn activate_waypoint_followers<B: Component>(
    mut followers: Query<(Entity, &mut WaypointFollower, Has<B>), Added<WaypointFollower>>,
) {
    for (entity, mut follower, has_body) in &mut followers {
        if !has_body {
            debug!(
                "Disabling waypoint follower on {entity}: no {} component",
                std::any::type_name::<B>()
            );
            follower.enabled = false;
        }
    }
}

/// System that moves all enabled followers along their waypoint loops.
pub fn update_waypoint_followers(
    mut followers: Query<(Entity, &mut WaypointFollower, &mut Transform)>,
    time: Res<Time>,
    mut events: MessageWriter<FollowerEvent>,
) {
    let delta = time.delta_secs();

    for (entity, mut follower, mut transform) in &mut followers {
        // Skip before touching the transform so idle followers don't mark it changed
        if !follower.is_enabled() || !follower.is_active() {
            continue;
        }

        follower.advance(delta, &mut transform, |kind| {
            events.write(FollowerEvent { entity, kind });
        });
    }
}
