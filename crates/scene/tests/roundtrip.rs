use std::fs;

use scene::{RenderMode, Scene, ScenePatch};

#[test]
fn default_scene_round_trips_exactly() {
    let scene = Scene::default();
    let json = scene.to_json().unwrap();
    let restored = Scene::from_json(&json).unwrap();

    let a = scene.to_document();
    let b = restored.to_document();
    assert_eq!(serde_json::to_value(&a).unwrap(), serde_json::to_value(&b).unwrap());
}

#[test]
fn modified_scene_round_trips_through_mesh_regeneration() {
    let mut scene = Scene::default();
    for patch in [
        ScenePatch::SphereRadius(2.5),
        ScenePatch::SphereResolution(12),
        ScenePatch::SphereWireframeResolution(6),
        ScenePatch::VectorEnabled(true),
        ScenePatch::VectorDirection(glam::Vec3::new(0.0, 1.0, 1.0)),
        ScenePatch::VectorRoll(123.0),
        ScenePatch::ConeEnabled(true),
        ScenePatch::ConeHalfAngle(42.0),
        ScenePatch::PyramidEnabled(true),
        ScenePatch::CuboidEnabled(true),
        ScenePatch::CuboidDimensions(glam::Vec3::new(0.5, 0.75, 4.0)),
        ScenePatch::NearPlaneEnabled(true),
        ScenePatch::NearPlaneDistance(1.25),
        ScenePatch::ScreenEnabled(true),
        ScenePatch::ScreenMode(RenderMode::RayMarch),
        ScenePatch::ScreenResolution([64, 48]),
        ScenePatch::ScreenSamples(4),
        ScenePatch::ScreenMaxBounces(3),
    ] {
        scene.apply(patch);
    }

    let restored = Scene::from_json(&scene.to_json().unwrap()).unwrap();

    // Restoring regenerates the meshes from the restored resolutions.
    assert_eq!(
        restored.sphere.mesh.vertices.len(),
        scene.sphere.mesh.vertices.len()
    );
    assert_eq!(
        restored.sphere.wire_mesh.vertices.len(),
        scene.sphere.wire_mesh.vertices.len()
    );
    assert_eq!(
        serde_json::to_value(restored.to_document()).unwrap(),
        serde_json::to_value(scene.to_document()).unwrap()
    );
}

#[test]
fn partial_document_falls_back_to_defaults() {
    let json = fs::read_to_string("tests/data/partial.json").unwrap();
    let restored = Scene::from_json(&json).unwrap();

    // Present values are honored.
    assert!((restored.sphere.radius - 2.0).abs() < 1e-6);
    assert!(restored.cone.enabled);
    // Absent values come from defaults.
    assert_eq!(restored.sphere.resolution, 32);
    assert!((restored.cone.half_angle_deg - 30.0).abs() < 1e-6);
    assert_eq!(restored.screen.mode, RenderMode::Simple);
}

#[test]
fn out_of_range_document_values_are_clamped_on_load() {
    let json = fs::read_to_string("tests/data/out_of_range.json").unwrap();
    let restored = Scene::from_json(&json).unwrap();

    assert!((restored.cone.half_angle_deg - 89.0).abs() < 1e-6);
    assert!((restored.near_plane.distance - 3.0).abs() < 1e-6);
    assert_eq!(restored.sphere.resolution, 64);
    assert!((restored.screen.update_rate - 0.1).abs() < 1e-6);
    // Zero-length direction in the file keeps the default axis.
    assert!((restored.vector.direction.length() - 1.0).abs() < 1e-6);
}

#[test]
fn cosmetic_sections_round_trip_verbatim() {
    let json = fs::read_to_string("tests/data/with_cosmetics.json").unwrap();
    let restored = Scene::from_json(&json).unwrap();
    assert_eq!(restored.cosmetics.grids["spacing"], 0.5);

    let saved = restored.to_json().unwrap();
    let reparsed: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(reparsed["grids"]["spacing"], 0.5);
    assert_eq!(reparsed["normal_rays"]["count"], 7);
}

#[test]
fn unparseable_document_is_one_error() {
    let err = Scene::from_json("{ not json").unwrap_err();
    assert!(matches!(err, scene::SceneError::Parse(_)));
}

#[test]
fn unknown_render_mode_falls_back_to_simple() {
    let json = r#"{ "screen": { "render_mode": "hologram" } }"#;
    let restored = Scene::from_json(json).unwrap();
    assert_eq!(restored.screen.mode, RenderMode::Simple);
}
