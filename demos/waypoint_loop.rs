//! Waypoint loop example.
//!
//! Three bodies share the same square loop: two turn in opposite directions,
//! and one has no rigid body, so it disables itself and never moves.
//!
//! Run with: `cargo run --example waypoint_loop`

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy_waypoint_follow::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(PhysicsPlugins::default())
        .add_plugins(WaypointFollowPlugin::new())
        .add_plugins(WaypointGizmoPlugin)
        .add_systems(Startup, setup)
        .add_systems(Update, (handle_input, log_follower_events))
        .run();
}

#[derive(Component)]
pub struct FollowerLabel(&'static str);

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Camera
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(5.0, 20.0, 20.0).looking_at(Vec3::new(5.0, 0.0, 5.0), Vec3::Y),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    let square = vec![
        Vec3::new(0.0, 0.5, 0.0),
        Vec3::new(10.0, 0.5, 0.0),
        Vec3::new(10.0, 0.5, 10.0),
        Vec3::new(0.0, 0.5, 10.0),
    ];

    // Shared mesh and materials
    let cube_mesh = meshes.add(Cuboid::new(0.8, 0.8, 1.2));

    let red_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.9, 0.2, 0.2),
        ..default()
    });
    let green_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.2, 0.9, 0.2),
        ..default()
    });
    let blue_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.2, 0.2, 0.9),
        ..default()
    });

    // Follower 1: counter-clockwise turns (red cube)
    commands.spawn((
        Mesh3d(cube_mesh.clone()),
        MeshMaterial3d(red_material),
        Transform::from_translation(square[0]),
        RigidBody::Kinematic,
        WaypointFollower::new(square.clone(), 2.0, false),
        FollowerLabel("Counter-clockwise"),
    ));

    // Follower 2: clockwise turns, starting half way round (green cube)
    commands.spawn((
        Mesh3d(cube_mesh.clone()),
        MeshMaterial3d(green_material),
        Transform::from_translation(square[2]),
        RigidBody::Kinematic,
        WaypointFollower::new(square.clone(), 1.0, true).with_start_index(2),
        FollowerLabel("Clockwise"),
    ));

    // Follower 3: no rigid body, stays put (blue cube)
    commands.spawn((
        Mesh3d(cube_mesh),
        MeshMaterial3d(blue_material),
        Transform::from_xyz(5.0, 0.5, 5.0),
        WaypointFollower::new(square, 1.0, false),
        FollowerLabel("No body"),
    ));

    // Ground plane for reference
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::new(Vec3::Y, Vec2::splat(20.0)))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.3, 0.3, 0.3),
            ..default()
        })),
        Transform::from_xyz(5.0, 0.0, 5.0),
    ));

    println!("\n=== Waypoint Loop Example ===");
    println!("Red cube: counter-clockwise turns, 2s per segment");
    println!("Green cube: clockwise turns, 1s per segment");
    println!("Blue cube: no rigid body, disabled");
    println!();
    println!("Controls:");
    println!("  Space  - Pause/Resume all followers");
    println!("  G      - Toggle path gizmos");
    println!("=============================\n");
}

fn handle_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut followers: Query<&mut WaypointFollower, With<RigidBody>>,
    mut gizmo_settings: ResMut<WaypointGizmoSettings>,
) {
    // Space to toggle pause
    if keyboard.just_pressed(KeyCode::Space) {
        for mut follower in &mut followers {
            if follower.is_enabled() {
                follower.pause();
                println!("Paused");
            } else {
                follower.resume();
                println!("Playing");
            }
        }
    }

    if keyboard.just_pressed(KeyCode::KeyG) {
        gizmo_settings.toggle();
    }
}

fn log_follower_events(mut events: MessageReader<FollowerEvent>, labels: Query<&FollowerLabel>) {
    for event in events.read() {
        let label = labels.get(event.entity).map(|l| l.0).unwrap_or("Unknown");

        match event.kind {
            FollowerEventKind::ReachedWaypoint(index) => {
                println!("[{}] Reached waypoint {}", label, index);
            }
            FollowerEventKind::LoopCompleted => {
                println!("[{}] Loop completed", label);
            }
        }
    }
}
