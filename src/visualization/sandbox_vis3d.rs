use bevy::input::mouse::MouseMotion;
use bevy::log::LogPlugin;
use bevy::math::primitives::{Cuboid, Sphere};
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};

use crate::math::NVec3;
use crate::simulation::collision::Boundary;
use crate::simulation::scenario::Scenario;

/// Bevy resource holding the whole sandbox: world, parameters and camera
#[derive(Resource)]
struct Sandbox(Scenario);

/// Component tagging each sphere with its particle index into the world
#[derive(Component)]
struct ParticleIndex(pub usize);

/// Marks the camera entity driven by `CameraState`
#[derive(Component)]
struct FreeLookCamera;

fn to_vec3(v: &NVec3) -> Vec3 {
    Vec3::new(v.x as f32, v.y as f32, v.z as f32)
}

/// Open a window and run `scenario` in real time
pub fn run_3d(scenario: Scenario) {
    info!("run_3d: starting Bevy 3D viewer with {} particles", scenario.world.len());

    App::new()
        .insert_resource(Sandbox(scenario))
        // tracing is already initialised by the binary
        .add_plugins(DefaultPlugins.build().disable::<LogPlugin>())
        .add_systems(Startup, (setup_3d, grab_cursor))
        .add_systems(
            Update,
            (look_3d, move_3d, physics_step_3d, sync_camera_3d, sync_transforms_3d).chain(),
        )
        .run();
}

/// Startup system: spawn camera, light, boundary and one sphere per particle
fn setup_3d(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    sandbox: Res<Sandbox>,
) {
    let scenario = &sandbox.0;
    let eye = to_vec3(&scenario.camera.position());
    let basis = scenario.camera.basis();

    commands.spawn((
        Camera3dBundle {
            camera: Camera {
                clear_color: ClearColorConfig::Custom(Color::srgb(0.0, 0.0, 0.0)),
                ..Default::default()
            },
            transform: Transform::from_translation(eye)
                .looking_to(to_vec3(&basis.forward), to_vec3(&basis.up)),
            ..Default::default()
        },
        FreeLookCamera,
    ));

    commands.spawn(PointLightBundle {
        point_light: PointLight {
            intensity: 1.0e9,
            range: 5000.0,
            ..Default::default()
        },
        transform: Transform::from_xyz(0.0, 800.0, 800.0),
        ..Default::default()
    });

    spawn_axes(&mut commands, &mut meshes, &mut materials);
    spawn_boundary(&mut commands, &mut meshes, &mut materials, &scenario.engine.boundary);

    // One sphere per particle, hidden until its spawn time
    for (i, p) in scenario.world.particles().iter().enumerate() {
        commands.spawn((
            PbrBundle {
                mesh: meshes.add(Sphere::new(p.radius() as f32).mesh()),
                material: materials.add(StandardMaterial {
                    base_color: Color::srgb(0.9, 0.9, 1.0),
                    ..Default::default()
                }),
                transform: Transform::from_translation(to_vec3(&p.x)),
                visibility: Visibility::Hidden,
                ..Default::default()
            },
            ParticleIndex(i),
        ));
    }
}

fn grab_cursor(mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    if let Ok(mut window) = windows.get_single_mut() {
        window.cursor.grab_mode = CursorGrabMode::Locked;
        window.cursor.visible = false;
    }
}

/// Mouse motion -> pitch/yaw. Moving the mouse up looks up, right looks right.
fn look_3d(mut motion: EventReader<MouseMotion>, mut sandbox: ResMut<Sandbox>) {
    let delta: Vec2 = motion.read().map(|ev| ev.delta).sum();
    if delta == Vec2::ZERO {
        return;
    }

    let scenario = &mut sandbox.0;
    let k = scenario.look_sensitivity;
    scenario
        .camera
        .rotate(-(delta.y as f64) * k, -(delta.x as f64) * k);
}

/// WASD moves in the view plane, Q/E up and down
fn move_3d(keys: Res<ButtonInput<KeyCode>>, time: Res<Time>, mut sandbox: ResMut<Sandbox>) {
    let camera = &mut sandbox.0.camera;
    let step = camera.speed * time.delta_seconds() as f64;

    if keys.pressed(KeyCode::KeyW) {
        camera.move_forward(step);
    }
    if keys.pressed(KeyCode::KeyS) {
        camera.move_forward(-step);
    }
    if keys.pressed(KeyCode::KeyA) {
        camera.move_right(-step);
    }
    if keys.pressed(KeyCode::KeyD) {
        camera.move_right(step);
    }
    if keys.pressed(KeyCode::KeyQ) {
        camera.move_up(step);
    }
    if keys.pressed(KeyCode::KeyE) {
        camera.move_up(-step);
    }
}

/// Per-frame physics step with the frame delta
fn physics_step_3d(time: Res<Time>, mut sandbox: ResMut<Sandbox>) {
    sandbox.0.step(time.delta_seconds() as f64);
}

/// Eye at the camera position looking along its forward vector
fn sync_camera_3d(sandbox: Res<Sandbox>, mut query: Query<&mut Transform, With<FreeLookCamera>>) {
    let camera = &sandbox.0.camera;
    let basis = camera.basis();

    for mut transform in &mut query {
        *transform = Transform::from_translation(to_vec3(&camera.position()))
            .looking_to(to_vec3(&basis.forward), to_vec3(&basis.up));
    }
}

fn sync_transforms_3d(
    sandbox: Res<Sandbox>,
    mut query: Query<(&ParticleIndex, &mut Transform, &mut Visibility)>,
) {
    let world = &sandbox.0.world;
    let particles = world.particles();
    let active = world.active(); // ascending

    for (ParticleIndex(i), mut transform, mut visibility) in &mut query {
        if let Some(p) = particles.get(*i) {
            transform.translation = to_vec3(&p.x);
            *visibility = if active.binary_search(i).is_ok() {
                Visibility::Visible
            } else {
                Visibility::Hidden
            };
        }
    }
}

/// Translucent shell showing where particles are confined
fn spawn_boundary(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    boundary: &Boundary,
) {
    let mesh = match boundary {
        Boundary::None => return,
        Boundary::Box { half_extents } => Mesh::from(Cuboid::new(
            2.0 * half_extents[0] as f32,
            2.0 * half_extents[1] as f32,
            2.0 * half_extents[2] as f32,
        )),
        Boundary::Sphere { radius } => Mesh::from(Sphere::new(*radius as f32)),
    };

    commands.spawn(PbrBundle {
        mesh: meshes.add(mesh),
        material: materials.add(StandardMaterial {
            base_color: Color::srgba(1.0, 1.0, 1.0, 0.05),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            cull_mode: None,
            ..Default::default()
        }),
        ..Default::default()
    });
}

// =========================================================================================
// Draw 3D axes for visual reference
// =========================================================================================

fn spawn_axes(commands: &mut Commands, meshes: &mut Assets<Mesh>, materials: &mut Assets<StandardMaterial>) {
    let axis_len = 200.0;
    let axis_thickness = 0.5;

    let axes = [
        (Vec3::new(axis_len, axis_thickness, axis_thickness), Color::srgb(1.0, 0.0, 0.0)),
        (Vec3::new(axis_thickness, axis_len, axis_thickness), Color::srgb(0.0, 1.0, 0.0)),
        (Vec3::new(axis_thickness, axis_thickness, axis_len), Color::srgb(0.0, 0.0, 1.0)),
    ];

    for (size, color) in axes {
        commands.spawn(PbrBundle {
            mesh: meshes.add(Cuboid::from_size(size).mesh()),
            material: materials.add(StandardMaterial {
                base_color: color,
                unlit: true,
                ..Default::default()
            }),
            ..Default::default()
        });
    }
}
