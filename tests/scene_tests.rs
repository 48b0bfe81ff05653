// Host-side tests for the sphere lattice, cursor placement and draw lists.

use std::time::Duration;

use glam::{Mat4, Quat, Vec3};
use whack_core::*;

fn approx_vec(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-5
}

fn default_scene() -> SceneContent {
    SceneContent::new(&GameConfig::default()).expect("default grid is valid")
}

#[test]
fn lattice_is_five_cubed_with_x_fastest() {
    let positions = lattice_positions(GRID_SIZE, GRID_SPACING);
    assert_eq!(positions.len(), 125);
    assert_eq!(positions[0], Vec3::ZERO);
    assert!(approx_vec(positions[1], Vec3::new(0.14, 0.0, 0.0)));
    assert!(approx_vec(positions[5], Vec3::new(0.0, 0.14, 0.0)));
    assert!(approx_vec(positions[25], Vec3::new(0.0, 0.0, 0.14)));
    assert!(approx_vec(positions[124], Vec3::splat(0.56)));
}

#[test]
fn placement_is_translation_times_scale() {
    let scene = default_scene();
    assert_eq!(scene.len(), SPHERE_COUNT);
    for object in scene.objects() {
        assert!(approx_vec(
            object.placement.transform_point3(Vec3::ZERO),
            object.position
        ));
        let unit = object.placement.transform_vector3(Vec3::X);
        assert!((unit.length() - SPHERE_SCALE).abs() < 1e-6);
    }
}

#[test]
fn empty_grid_is_rejected() {
    let config = GameConfig {
        grid_size: 0,
        ..GameConfig::default()
    };
    assert_eq!(SceneContent::new(&config).err(), Some(SetupError::EmptyGrid));
}

#[test]
fn idle_draw_list_highlights_only_the_cursor() {
    let scene = default_scene();
    let round = RoundState::default();
    let hand = Vec3::new(0.1, 0.2, 0.3);
    let items = scene.draw_list(&round, hand, Mat4::IDENTITY);

    assert_eq!(items.len(), SPHERE_COUNT + 1);
    assert_eq!(items[0].style, Style::Highlighted);
    assert!(approx_vec(items[0].model.transform_point3(Vec3::ZERO), hand));
    assert!(items[1..].iter().all(|d| d.style == Style::Unhighlighted));
}

#[test]
fn active_round_highlights_the_target() {
    let scene = default_scene();
    let mut game = Game::new(scene.positions(), &GameConfig::default().with_seed(3));
    game.update(&FrameInput::new(Duration::ZERO, Vec3::splat(9.0), true));
    let target = game.round().target().expect("round started");

    let items = scene.draw_list(game.round(), Vec3::ZERO, Mat4::IDENTITY);
    let highlighted: Vec<usize> = items[1..]
        .iter()
        .enumerate()
        .filter(|(_, d)| d.style == Style::Highlighted)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(highlighted, vec![target]);
}

#[test]
fn cursor_uses_its_own_scale() {
    let scene = default_scene();
    let placement = scene.cursor_placement(Vec3::new(1.0, 2.0, 3.0));
    let unit = placement.transform_vector3(Vec3::Y);
    assert!((unit.length() - CURSOR_SCALE).abs() < 1e-6);
    assert!(approx_vec(
        placement.transform_point3(Vec3::ZERO),
        Vec3::new(1.0, 2.0, 3.0)
    ));
}

#[test]
fn grab_moves_spheres_but_not_cursor() {
    let scene = default_scene();
    let grab = Mat4::from_translation(Vec3::new(0.0, 1.0, 0.0));
    let hand = Vec3::new(0.5, 0.5, 0.5);
    let items = scene.draw_list(&RoundState::default(), hand, grab);

    assert!(approx_vec(items[0].model.transform_point3(Vec3::ZERO), hand));
    for (object, item) in scene.objects().iter().zip(&items[1..]) {
        assert!(approx_vec(
            item.model.transform_point3(Vec3::ZERO),
            object.position + Vec3::Y
        ));
    }
}

#[test]
fn grab_transform_follows_off_hand_only_while_held() {
    let pose = Pose::new(
        Vec3::new(0.2, 1.0, -0.3),
        Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
    );
    assert_eq!(grab_transform(&pose, false), Mat4::IDENTITY);

    let held = grab_transform(&pose, true);
    assert!(approx_vec(held.transform_point3(Vec3::ZERO), pose.position));
    // rotation is applied before translation
    assert!(approx_vec(
        held.transform_point3(Vec3::new(0.0, 0.0, -1.0)),
        pose.position + Vec3::new(-1.0, 0.0, 0.0)
    ));
}

#[test]
fn instance_raw_matches_model_columns() {
    let item = DrawItem {
        model: Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)),
        style: Style::Unhighlighted,
    };
    let raw = InstanceRaw::from(&item);
    assert_eq!(raw.model[3], [1.0, 2.0, 3.0, 1.0]);
    assert_eq!(std::mem::size_of::<InstanceRaw>(), 64);
}

#[test]
fn uv_sphere_is_closed_unit_mesh() {
    let mesh = uv_sphere(SPHERE_RINGS, SPHERE_SEGMENTS);
    let rings = SPHERE_RINGS as usize;
    let segments = SPHERE_SEGMENTS as usize;
    assert_eq!(mesh.vertices.len(), (rings + 1) * (segments + 1));
    // pole bands contribute one triangle per quad
    assert_eq!(mesh.indices.len(), (rings - 1) * segments * 6);
    assert_eq!(mesh.indices.len() % 3, 0);
    assert!(mesh
        .indices
        .iter()
        .all(|&i| (i as usize) < mesh.vertices.len()));
    for v in &mesh.vertices {
        let p = Vec3::from(v.position);
        assert!((p.length() - 1.0).abs() < 1e-5);
        assert_eq!(v.position, v.normal);
    }
}
