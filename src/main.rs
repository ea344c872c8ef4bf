//! Desert scene with two snakes patrolling waypoint loops.
//!
//! Run with: `cargo run`

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
        .add_systems(Update, (toggle_gizmos, log_laps))
        .run();
}

/// Shared handles for props that appear more than once.
struct PropAssets {
    rock_mesh: Handle<Mesh>,
    rock_material: Handle<StandardMaterial>,
    cactus_mesh: Handle<Mesh>,
    cactus_material: Handle<StandardMaterial>,
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Camera
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 28.0, 26.0).looking_at(Vec3::new(-2.0, 0.0, -4.0), Vec3::Y),
    ));

    // Warm key light high above the scene, orange fill near the ground
    commands.spawn((
        PointLight {
            color: Color::srgb(1.0, 1.0, 0.6),
            intensity: 20_000_000.0,
            range: 3000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(15.0, 25.0, -15.0),
    ));
    commands.spawn((
        PointLight {
            color: Color::srgb(1.0, 0.6, 0.0),
            intensity: 2_000_000.0,
            range: 100.0,
            ..default()
        },
        Transform::from_xyz(0.0, 10.0, 0.0),
    ));

    // Sand, with a thin static slab underneath so bodies have something to rest on
    commands.spawn((
        Name::new("Plane"),
        Mesh3d(meshes.add(Plane3d::new(Vec3::Y, Vec2::splat(50.0)))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.86, 0.72, 0.48),
            perceptual_roughness: 1.0,
            ..default()
        })),
        Transform::default(),
    ));
    commands.spawn((
        Name::new("Ground"),
        RigidBody::Static,
        Collider::cuboid(100.0, 1.0, 100.0),
        Transform::from_xyz(0.0, -0.5, 0.0),
    ));

    let props = PropAssets {
        rock_mesh: meshes.add(Sphere::new(0.6)),
        rock_material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.45, 0.42, 0.4),
            ..default()
        }),
        cactus_mesh: meshes.add(Cylinder::new(0.5, 2.0)),
        cactus_material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.25, 0.55, 0.25),
            ..default()
        }),
    };

    spawn_rock(&mut commands, &props, "Rock1", Vec3::new(0.0, 0.0, 0.1), 2.0);
    spawn_rock(&mut commands, &props, "Rock2", Vec3::new(8.0, 0.0, 6.0), 1.6);
    spawn_cactus(&mut commands, &props, "BallCactusSmall", Vec3::new(-12.2, 0.0, 5.9), Vec3::new(1.2, 1.4, 1.0));
    spawn_cactus(&mut commands, &props, "BallCactusBig", Vec3::new(-1.0, 0.0, 7.9), Vec3::new(1.6, 1.2, 1.1));
    spawn_cactus(&mut commands, &props, "BallCactusBig2", Vec3::new(-2.0, 0.0, 4.3), Vec3::new(1.6, 1.8, 1.1));

    let snake_mesh = meshes.add(Capsule3d::new(0.3, 2.0));
    let snake_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.55, 0.7, 0.2),
        ..default()
    });

    // Counter-clockwise loop around the big rock
    let snake_path = vec![
        Vec3::new(1.0, 0.3, -1.0),
        Vec3::new(2.8, 0.3, -12.8),
        Vec3::new(-7.0, 0.3, -15.0),
        Vec3::new(-10.0, 0.3, -4.0),
    ];
    commands.spawn((
        Name::new("Snake"),
        Mesh3d(snake_mesh.clone()),
        MeshMaterial3d(snake_material.clone()),
        Transform::from_translation(snake_path[0])
            .with_rotation(Quat::from_rotation_x(std::f32::consts::FRAC_PI_2)),
        RigidBody::Kinematic,
        Collider::capsule(0.3, 2.0),
        WaypointFollower::new(snake_path, 5.0, false),
    ));

    // Clockwise triangle
    let snake2_path = vec![
        Vec3::new(-6.8, 0.3, 0.0),
        Vec3::new(6.7, 0.3, 4.3),
        Vec3::new(3.2, 0.3, 11.3),
    ];
    commands.spawn((
        Name::new("Snake2"),
        Mesh3d(snake_mesh),
        MeshMaterial3d(snake_material),
        Transform::from_translation(snake2_path[0])
            .with_rotation(Quat::from_rotation_x(std::f32::consts::FRAC_PI_2)),
        RigidBody::Kinematic,
        Collider::capsule(0.3, 2.0),
        WaypointFollower::new(snake2_path, 4.0, true),
    ));

    println!("\n=== Waypoint Follow Demo ===");
    println!("Two snakes patrol their loops around the rocks.");
    println!();
    println!("Controls:");
    println!("  G  - Toggle path gizmos");
    println!("============================\n");
}

fn spawn_rock(commands: &mut Commands, props: &PropAssets, name: &'static str, position: Vec3, scale: f32) {
    commands.spawn((
        Name::new(name),
        Mesh3d(props.rock_mesh.clone()),
        MeshMaterial3d(props.rock_material.clone()),
        Transform::from_translation(position).with_scale(Vec3::splat(scale)),
        RigidBody::Static,
        Collider::sphere(0.6),
    ));
}

fn spawn_cactus(commands: &mut Commands, props: &PropAssets, name: &'static str, position: Vec3, scale: Vec3) {
    commands.spawn((
        Name::new(name),
        Mesh3d(props.cactus_mesh.clone()),
        MeshMaterial3d(props.cactus_material.clone()),
        Transform::from_translation(position + Vec3::Y * scale.y).with_scale(scale),
        RigidBody::Static,
        Collider::cylinder(0.5, 2.0),
    ));
}

fn toggle_gizmos(keyboard: Res<ButtonInput<KeyCode>>, mut settings: ResMut<WaypointGizmoSettings>) {
    if keyboard.just_pressed(KeyCode::KeyG) {
        settings.toggle();
    }
}

fn log_laps(mut events: MessageReader<FollowerEvent>, names: Query<&Name>) {
    for event in events.read() {
        if event.kind == FollowerEventKind::LoopCompleted {
            let name = names.get(event.entity).map(|n| n.as_str()).unwrap_or("Unknown");
            info!("{name} completed a lap");
        }
    }
}
