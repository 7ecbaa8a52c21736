//! Integration tests for whole-scene translation.

use std::path::{Path, PathBuf};

use exporter_core::ExportConfig;
use exporter_renderer::{Assembly, ColorSpace, LightModel, Project, RendererError};
use exporter_scene::{HostScene, Transform};
use exporter_translators::{
    MAIN_ASSEMBLY, SKY_EDF, SKY_ENVIRONMENT, SKY_SHADER, SceneTranslator, TranslateError,
};
use glam::Vec3;

const EPSILON: f32 = 1e-3;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

fn translate(scene: &HostScene) -> Result<Project, TranslateError> {
    let config = ExportConfig {
        blend_dir: PathBuf::from("/projects/studio"),
        ..Default::default()
    };
    SceneTranslator::new(config).translate(scene)
}

fn translate_json(text: &str) -> Result<Project, TranslateError> {
    let scene = HostScene::from_json(text).expect("Failed to parse scene");
    translate(&scene)
}

fn main_assembly(project: &Project) -> &Assembly {
    project
        .scene
        .assemblies()
        .entity_by_name(MAIN_ASSEMBLY)
        .expect("Main assembly should exist")
}

#[test]
fn test_translate_studio_fixture() {
    let scene = HostScene::from_path(&fixture("studio.json")).expect("Failed to load fixture");
    let project = translate(&scene).expect("Failed to translate fixture");
    let assembly = main_assembly(&project);

    // Key, its instance, Gobo and Fill; the area lamp creates nothing.
    assert_eq!(assembly.lights().len(), 4);
    assert_eq!(assembly.colors().len(), 4);
    assert!(!assembly.lights().contains("Softbox"));

    let key = assembly.lights().entity_by_name("Key").unwrap();
    assert_eq!(key.model, LightModel::PointLight);
    assert_eq!(key.params.get_str("intensity"), Some("Key_radiance"));
    assert_eq!(key.params.get_float("intensity_multiplier"), Some(2.0));
    assert_eq!(key.params.get_float("exposure"), Some(0.5));
    assert_eq!(
        key.transform.transform_point3(Vec3::ZERO),
        Vec3::new(2.0, -1.0, 4.0)
    );

    let key_radiance = assembly.colors().entity_by_name("Key_radiance").unwrap();
    assert_eq!(key_radiance.color_space, ColorSpace::LinearRgb);
    assert_eq!(key_radiance.values, Vec3::new(1.0, 0.9, 0.8));

    let fill = assembly.lights().entity_by_name("Fill").unwrap();
    assert_eq!(fill.model, LightModel::DirectionalLight);
    assert_eq!(fill.params.get_str("irradiance"), Some("Fill_radiance"));
}

#[test]
fn test_instance_gets_own_light() {
    let scene = HostScene::from_path(&fixture("studio.json")).unwrap();
    let project = translate(&scene).unwrap();
    let assembly = main_assembly(&project);

    let instance = assembly.lights().entity_by_name("Key|Array|0").unwrap();
    assert_eq!(instance.model, LightModel::PointLight);
    assert_eq!(
        instance.params.get_str("intensity"),
        Some("Key|Array|0_radiance")
    );
    assert_eq!(
        instance.transform.transform_point3(Vec3::ZERO),
        Vec3::new(-2.0, 0.0, 4.0)
    );
    assert!(assembly.colors().contains("Key|Array|0_radiance"));
}

#[test]
fn test_spot_texture_is_translated() {
    let scene = HostScene::from_path(&fixture("studio.json")).unwrap();
    let project = translate(&scene).unwrap();
    let assembly = main_assembly(&project);

    let gobo = assembly.lights().entity_by_name("Gobo").unwrap();
    assert_eq!(gobo.model, LightModel::SpotLight);
    assert_eq!(gobo.params.get_str("intensity"), Some("gobo.png_inst"));

    let outer = gobo.params.get_float("outer_angle").unwrap();
    let inner = gobo.params.get_float("inner_angle").unwrap();
    assert!((outer - 60.0).abs() < EPSILON, "outer angle was {}", outer);
    assert!((inner - 30.0).abs() < EPSILON, "inner angle was {}", inner);

    let texture = assembly.textures().entity_by_name("gobo.png").unwrap();
    assert_eq!(
        texture.params.get_str("filename"),
        Some("/projects/studio/textures/gobo.png")
    );
    assert!(assembly.texture_instances().contains("gobo.png_inst"));
}

#[test]
fn test_gradient_world() {
    let scene = HostScene::from_path(&fixture("studio.json")).unwrap();
    let project = translate(&scene).unwrap();
    let scene = &project.scene;

    let environment = scene.environment().unwrap();
    assert_eq!(environment.name, SKY_ENVIRONMENT);
    assert_eq!(environment.params.get_str("environment_edf"), Some(SKY_EDF));
    assert_eq!(
        environment.params.get_str("environment_shader"),
        Some(SKY_SHADER)
    );

    let edf = scene.environment_edfs().entity_by_name(SKY_EDF).unwrap();
    assert_eq!(edf.model, "gradient_environment_edf");
    assert_eq!(
        edf.params.get_str("horizon_radiance"),
        Some("horizon_radiance_color")
    );
    assert_eq!(
        edf.params.get_str("zenith_radiance"),
        Some("zenith_radiance_color")
    );

    let horizon = scene.colors().entity_by_name("horizon_radiance_color").unwrap();
    assert_eq!(horizon.color_space, ColorSpace::Srgb);
    let zenith = scene.colors().entity_by_name("zenith_radiance_color").unwrap();
    assert_eq!(zenith.color_space, ColorSpace::LinearRgb);

    let shader = scene.environment_shaders().entity_by_name(SKY_SHADER).unwrap();
    assert_eq!(shader.model, "edf_environment_shader");
    assert_eq!(shader.params.get_float("alpha_value"), Some(0.75));
}

#[test]
fn test_world_orientation_on_edf() {
    let scene = HostScene::from_path(&fixture("studio.json")).unwrap();
    let project = translate(&scene).unwrap();

    let edf = project
        .scene
        .environment_edfs()
        .entity_by_name(SKY_EDF)
        .unwrap();
    assert_eq!(edf.transforms.len(), 1);
    assert_eq!(
        edf.transforms.get(0.0),
        Some(Transform::sky_rotation(0.0, 90.0))
    );
}

#[test]
fn test_disabled_world_keeps_placeholder() {
    let project = translate_json(
        r#"{"name": "Dark", "world": {"appleseed_sky": {"env_type": "none"}}}"#,
    )
    .unwrap();

    assert_eq!(project.scene.environment().unwrap().name, "environment");
    assert!(project.scene.environment_edfs().is_empty());
    assert!(project.scene.environment_shaders().is_empty());
}

#[test]
fn test_sunsky_with_sun_edf() {
    let project = translate_json(
        r#"{
            "world": {"appleseed_sky": {"env_type": "sunsky", "sun_model": "preetham"}},
            "lights": [{"name": "Sun", "type": "SUN", "appleseed": {"sun_mode": "sun", "use_edf": true}}]
        }"#,
    )
    .unwrap();

    let edf = project
        .scene
        .environment_edfs()
        .entity_by_name(SKY_EDF)
        .unwrap();
    assert_eq!(edf.model, "preetham_environment_edf");
    assert_eq!(edf.params.get_float("ground_albedo"), Some(0.3));
    assert!(project.scene.colors().is_empty());

    let sun = main_assembly(&project)
        .lights()
        .entity_by_name("Sun")
        .unwrap();
    assert_eq!(sun.model, LightModel::SunLight);
    assert_eq!(sun.params.get_str("environment_edf"), Some(SKY_EDF));
}

#[test]
fn test_latlong_world_texture() {
    let project = translate_json(
        r#"{
            "world": {"appleseed_sky": {
                "env_type": "latlong_map",
                "env_tex": {"name": "studio.hdr", "filepath": "/hdri/studio.hdr"},
                "env_tex_mult": 1.5
            }}
        }"#,
    )
    .unwrap();

    let assembly = main_assembly(&project);
    let texture = assembly.textures().entity_by_name("studio.hdr").unwrap();
    assert_eq!(texture.params.get_str("filename"), Some("/hdri/studio.hdr"));

    let edf = project
        .scene
        .environment_edfs()
        .entity_by_name(SKY_EDF)
        .unwrap();
    assert_eq!(edf.model, "latlong_map_environment_edf");
    assert_eq!(edf.params.get_str("radiance"), Some("studio.hdr_inst"));
    assert_eq!(edf.params.get_float("radiance_multiplier"), Some(1.5));
}

#[test]
fn test_duplicate_light_names_fail() {
    let err = translate_json(
        r#"{"lights": [{"name": "Key", "type": "POINT"}, {"name": "Key", "type": "SPOT"}]}"#,
    )
    .unwrap_err();

    assert!(
        matches!(
            &err,
            TranslateError::Renderer(RendererError::DuplicateName { name, .. }) if name == "Key"
        ),
        "Unexpected error: {}",
        err
    );
}

#[test]
fn test_project_serializes() {
    let scene = HostScene::from_path(&fixture("studio.json")).unwrap();
    let project = translate(&scene).unwrap();

    let json = serde_json::to_value(&project).expect("Failed to serialize project");
    assert_eq!(json["name"], "Studio");
    assert!(json["scene"].is_object());
}
