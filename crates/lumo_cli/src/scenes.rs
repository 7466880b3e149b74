//! Built-in demonstration scenes, one per preset.

use std::sync::Arc;

use lumo_core::{
    Checker, Color, DirectionalLight, DVec3, Ideal, ImageBuffer, Lambertian, Light, Material,
    PerspectiveCamera, Phong, Plane, PointLight, Scene, Sphere, SpotLight, Surface, Transport,
};
use lumo_renderer::{
    path_trace, ray_trace, render_depth, render_light, render_normal, RenderError, RenderOptions,
};

use crate::cli::ScenePreset;

const WHITE: Color = Color::ONE;

fn surface<S: Surface + 'static>(s: S) -> Arc<dyn Surface> {
    Arc::new(s)
}

fn material<M: Material + 'static>(m: M) -> Option<Arc<dyn Material>> {
    Some(Arc::new(m))
}

/// Three axis planes forming a corner with a sphere resting in it.
/// Used by the geometric diagnostics and the directional light preset.
fn corner_scene() -> Scene {
    Scene::from_surfaces(vec![
        surface(Plane::new(DVec3::X, 0.0, None)),
        surface(Plane::new(DVec3::Y, 0.0, None)),
        surface(Plane::new(DVec3::Z, 0.0, None)),
        surface(Sphere::new(DVec3::new(20.0, 20.0, 10.0), 10.0, None)),
    ])
}

fn corner_camera(aspect: f64) -> PerspectiveCamera {
    PerspectiveCamera::new(
        DVec3::new(40.0, 20.0, 10.0),
        DVec3::new(-1.0, 0.0, 0.0),
        DVec3::Z,
        90.0,
    )
    .with_aspect(aspect)
}

/// Floor, far wall and back wall with a sphere, lit from above. Used
/// by the point, spot and grid light presets.
fn walled_scene() -> Scene {
    Scene::from_surfaces(vec![
        surface(Plane::new(DVec3::Y, 0.0, None)),
        surface(Plane::new(DVec3::Z, -50.0, None)),
        surface(Plane::new(DVec3::X, -20.0, None)),
        surface(Sphere::new(DVec3::new(0.0, 10.0, -10.0), 10.0, None)),
    ])
}

fn walled_camera(aspect: f64) -> PerspectiveCamera {
    PerspectiveCamera::new(
        DVec3::new(0.0, 10.0, 10.0),
        DVec3::new(0.0, 0.0, -1.0),
        DVec3::Y,
        90.0,
    )
    .with_aspect(aspect)
}

/// Checkerboard floor, colored Lambertian walls and two Phong spheres
/// under three point lights.
fn boxed_spheres() -> (Scene, Vec<Arc<dyn Light>>, PerspectiveCamera) {
    let scene = Scene::from_surfaces(vec![
        surface(Plane::new(DVec3::Z, 0.0, material(Checker::new(0.1, 0.1, 0.5)))),
        surface(Plane::new(
            DVec3::X,
            -20.0,
            material(Lambertian::new(Color::new(0.0, 0.5, 0.5))),
        )),
        surface(Plane::new(
            DVec3::Y,
            -30.0,
            material(Lambertian::new(Color::new(0.5, 0.5, 0.5))),
        )),
        surface(Plane::new(
            -DVec3::Y,
            -30.0,
            material(Lambertian::new(Color::new(0.0, 0.2, 0.5))),
        )),
        surface(Plane::new(
            -DVec3::Z,
            -42.0,
            material(Lambertian::new(Color::new(0.25, 0.75, 0.25))),
        )),
        surface(Sphere::new(
            DVec3::new(-10.0, -12.0, 10.0),
            10.0,
            material(Phong::new(Color::new(1.0, 0.0, 0.0), WHITE, 10.0, 0.25)),
        )),
        surface(Sphere::new(
            DVec3::new(-10.0, 12.0, 10.0),
            10.0,
            material(Phong::new(Color::new(0.5, 0.5, 0.5), WHITE, 16.0, 0.25)),
        )),
    ]);

    let lights: Vec<Arc<dyn Light>> = vec![
        Arc::new(PointLight::new(WHITE * 800.0, DVec3::new(20.0, -20.0, 40.0))),
        Arc::new(PointLight::new(WHITE * 800.0, DVec3::new(20.0, 0.0, 40.0))),
        Arc::new(PointLight::new(WHITE * 800.0, DVec3::new(20.0, 20.0, 40.0))),
    ];

    let camera = PerspectiveCamera::new(
        DVec3::new(20.0, 0.0, 20.0),
        DVec3::new(-1.0, 0.0, 0.0),
        DVec3::Z,
        90.0,
    );

    (scene, lights, camera)
}

/// Cornell-style room built from one-sided planes, with a mirror
/// sphere, a glass sphere and a large spherical area light sunk into
/// the ceiling.
fn cornell_box() -> (Scene, PerspectiveCamera) {
    let grey = Color::new(0.75, 0.75, 0.75);

    let scene = Scene::from_surfaces(vec![
        // ground
        surface(Plane::new(DVec3::Z, 0.0, material(Ideal::diffuse(grey)))),
        // back
        surface(Plane::new(DVec3::X, -100.0, material(Ideal::diffuse(grey)))),
        // left
        surface(Plane::new(
            DVec3::Y,
            -60.0,
            material(Ideal::diffuse(Color::new(0.75, 0.25, 0.25))),
        )),
        // right
        surface(Plane::new(
            -DVec3::Y,
            -60.0,
            material(Ideal::diffuse(Color::new(0.25, 0.25, 0.75))),
        )),
        // ceiling
        surface(Plane::new(-DVec3::Z, -100.0, material(Ideal::diffuse(grey)))),
        // front, behind the camera rays
        surface(Plane::new(
            -DVec3::X,
            -20.0,
            material(Ideal::diffuse(Color::new(0.50, 0.84, 0.81))),
        )),
        surface(Sphere::new(
            DVec3::new(-60.0, -27.5, 20.0),
            20.0,
            material(Ideal::new(WHITE, Color::ZERO, Transport::Specular)),
        )),
        surface(Sphere::new(
            DVec3::new(-45.0, 30.0, 20.0),
            20.0,
            material(Ideal::new(WHITE, Color::ZERO, Transport::Refractive)),
        )),
        surface(Sphere::new(
            DVec3::new(-50.0, 0.0, 197.0),
            100.0,
            material(Ideal::new(grey, WHITE * 7.5, Transport::Diffuse)),
        )),
    ]);

    let camera = PerspectiveCamera::new(
        DVec3::new(150.0, 0.0, 50.0),
        DVec3::new(-1.0, 0.0, 0.0),
        DVec3::Z,
        37.0,
    );

    (scene, camera)
}

fn directional_lights() -> Vec<Arc<dyn Light>> {
    vec![Arc::new(DirectionalLight::new(
        WHITE,
        DVec3::new(-1.5, -1.75, -2.0),
    ))]
}

fn point_lights() -> Vec<Arc<dyn Light>> {
    vec![Arc::new(PointLight::new(
        WHITE * 2000.0,
        DVec3::new(30.0, 40.0, 20.0),
    ))]
}

fn spot_lights() -> Vec<Arc<dyn Light>> {
    vec![Arc::new(SpotLight::new(
        WHITE * 2000.0,
        DVec3::new(30.0, 40.0, 20.0),
        DVec3::new(-1.0, -1.0, -1.0),
        20.0,
        30.0,
        0.5,
    ))]
}

/// Overlapping red, green and blue spot cones plus a white point fill
/// on a bare floor.
fn rgb_spots() -> (Scene, Vec<Arc<dyn Light>>, PerspectiveCamera) {
    let scene = Scene::from_surfaces(vec![
        surface(Plane::new(DVec3::Z, 0.0, None)),
        surface(Plane::new(DVec3::Y, -20.0, None)),
        surface(Plane::new(DVec3::X, -20.0, None)),
    ]);

    let down = DVec3::new(0.0, 0.0, -1.0);
    let lights: Vec<Arc<dyn Light>> = vec![
        Arc::new(PointLight::new(WHITE * 1000.0, DVec3::new(0.0, 0.0, 60.0))),
        Arc::new(SpotLight::new(
            Color::new(3000.0, 0.0, 0.0),
            DVec3::new(6.0, 0.0, 30.0),
            down,
            20.0,
            30.0,
            1.0,
        )),
        Arc::new(SpotLight::new(
            Color::new(0.0, 3000.0, 0.0),
            DVec3::new(-3.0, 3.0 * 1.732, 30.0),
            down,
            20.0,
            30.0,
            1.0,
        )),
        Arc::new(SpotLight::new(
            Color::new(0.0, 0.0, 3000.0),
            DVec3::new(-3.0, -3.0 * 1.732, 30.0),
            down,
            20.0,
            30.0,
            1.0,
        )),
    ];

    let camera = PerspectiveCamera::new(
        DVec3::new(25.0, 25.0, 25.0),
        DVec3::new(-1.0, -1.0, -1.0),
        DVec3::Z,
        60.0,
    );

    (scene, lights, camera)
}

/// A 6x6 grid of dim point lights above the walled scene, with a weak
/// directional fill to lift the shadowed side.
fn grid_lights() -> Vec<Arc<dyn Light>> {
    let mut lights: Vec<Arc<dyn Light>> = Vec::new();

    for x in (10..=30).step_by(4) {
        for z in (20..=40).step_by(4) {
            lights.push(Arc::new(PointLight::new(
                WHITE * 80.0,
                DVec3::new(x as f64, 50.0, z as f64),
            )));
        }
    }
    lights.push(Arc::new(DirectionalLight::new(
        WHITE * 0.25,
        DVec3::new(1.5, 1.0, 0.5),
    )));

    lights
}

/// Build and render one preset.
pub fn render(
    preset: ScenePreset,
    width: usize,
    height: usize,
    samples: u32,
    bounces: u32,
) -> Result<ImageBuffer, RenderError> {
    let aspect = width as f64 / height as f64;
    let linear = RenderOptions::new(width, height, 1.0);

    match preset {
        ScenePreset::Depth => Ok(render_depth(
            &corner_scene(),
            &corner_camera(aspect),
            100.0,
            &linear,
        )),
        ScenePreset::Normal => Ok(render_normal(&corner_scene(), &corner_camera(aspect), &linear)),
        ScenePreset::DirectionalLight => Ok(render_light(
            &corner_scene(),
            &directional_lights(),
            &corner_camera(aspect),
            &linear,
        )),
        ScenePreset::PointLight => Ok(render_light(
            &walled_scene(),
            &point_lights(),
            &walled_camera(aspect),
            &linear,
        )),
        ScenePreset::SpotLight => Ok(render_light(
            &walled_scene(),
            &spot_lights(),
            &walled_camera(aspect),
            &linear,
        )),
        ScenePreset::RgbSpots => {
            let (scene, lights, camera) = rgb_spots();
            Ok(render_light(&scene, &lights, &camera.with_aspect(aspect), &linear))
        }
        ScenePreset::GridLights => Ok(render_light(
            &walled_scene(),
            &grid_lights(),
            &walled_camera(aspect),
            &linear,
        )),
        ScenePreset::BoxedSpheres => {
            let (scene, lights, camera) = boxed_spheres();
            ray_trace(&scene, &lights, &camera.with_aspect(aspect), bounces, &linear)
        }
        ScenePreset::CornellBox => {
            let (scene, camera) = cornell_box();
            let opts = RenderOptions::new(width, height, 2.2);
            path_trace(&scene, &camera.with_aspect(aspect), samples, &opts)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_presets_produce_images() {
        let presets = [
            ScenePreset::Depth,
            ScenePreset::Normal,
            ScenePreset::DirectionalLight,
            ScenePreset::PointLight,
            ScenePreset::SpotLight,
            ScenePreset::RgbSpots,
            ScenePreset::GridLights,
        ];

        for preset in presets {
            let image = render(preset, 8, 6, 1, 1).unwrap();
            assert_eq!(image.width(), 8);
            assert_eq!(image.height(), 6);
        }
    }

    #[test]
    fn test_boxed_spheres_is_lit() {
        let image = render(ScenePreset::BoxedSpheres, 16, 12, 1, 4).unwrap();

        let bytes = image.as_bytes();
        assert!(bytes.iter().any(|&b| b > 0));
    }

    #[test]
    fn test_cornell_box_small_render() {
        let image = render(ScenePreset::CornellBox, 6, 4, 2, 1).unwrap();

        // The room is enclosed and lit; a fully black frame would mean
        // the camera rays never reach the interior.
        let bytes = image.as_bytes();
        assert!(bytes.iter().any(|&b| b > 0));
    }
}
