use std::sync::Arc;

use rand::Rng;

use crate::camera::CameraConfig;
use crate::integrator::{Background, RenderConfig};
use crate::material::{Dielectric, DiffuseLight, GlossyCoated, Lambertian, Material, Metal};
use crate::scene::Scene;
use crate::surfaces::{Cuboid, MovingSphere, RectangleXy, Sphere};
use crate::vec3::{Color, Point3, Vec3};

/// A complete scene description bundling geometry, camera, and render
/// settings. Illustrative only — callers of the library build `Scene`
/// directly rather than going through presets.
pub struct SceneDescription {
    pub name: &'static str,
    pub scene: Scene,
    pub camera_config: CameraConfig,
    pub render_config: RenderConfig,
}

/// Built-in demo scene presets exercised by the `photon-core` binary.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ScenePreset {
    /// The classic random-spheres showcase: diffuse, metal, and glass
    /// spheres scattered over a large Lambertian ground sphere.
    Showcase,
    /// A single sphere of each material, useful for quick sanity renders.
    Minimal,
    /// A lit box: a cuboid plus an emissive rectangle overhead.
    LitBox,
    /// A field of moving spheres, to exercise motion blur.
    MotionBlur,
}

impl ScenePreset {
    pub fn build(self) -> SceneDescription {
        match self {
            ScenePreset::Showcase => build_showcase(),
            ScenePreset::Minimal => build_minimal(),
            ScenePreset::LitBox => build_lit_box(),
            ScenePreset::MotionBlur => build_motion_blur(),
        }
    }
}

fn build_showcase() -> SceneDescription {
    let mut scene = Scene::new();
    let mut rng = rand::thread_rng();

    scene.push(Arc::new(Sphere::new(
        Point3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5))),
    )));

    scene.push(Arc::new(Sphere::new(Point3::new(0.0, 1.0, 0.0), 1.0, Arc::new(Dielectric::new(1.5)))));
    scene.push(Arc::new(Sphere::new(
        Point3::new(-4.0, 1.0, 0.0),
        1.0,
        Arc::new(Lambertian::new(Color::new(0.7, 0.15, 0.15))),
    )));
    scene.push(Arc::new(Sphere::new(
        Point3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Color::new(0.85, 0.85, 0.9), 0.0)),
    )));

    for a in -6..6 {
        for b in -6..6 {
            let center = Point3::new(a as f64 + 0.9 * rng.gen::<f64>(), 0.2, b as f64 + 0.9 * rng.gen::<f64>());
            if (center - Point3::new(4.0, 0.2, 0.0)).length() < 0.9
                || (center - Point3::new(-4.0, 0.2, 0.0)).length() < 0.9
                || (center - Point3::new(0.0, 0.2, 0.0)).length() < 0.9
            {
                continue;
            }

            let choose_mat: f64 = rng.gen();
            let material: Arc<dyn Material> = if choose_mat < 0.6 {
                let albedo = Color::new(rng.gen::<f64>() * rng.gen::<f64>(), rng.gen::<f64>() * rng.gen::<f64>(), rng.gen::<f64>() * rng.gen::<f64>());
                Arc::new(Lambertian::new(albedo))
            } else if choose_mat < 0.8 {
                let albedo = Color::new(rng.gen_range(0.5..1.0), rng.gen_range(0.5..1.0), rng.gen_range(0.5..1.0));
                Arc::new(Metal::new(albedo, rng.gen_range(0.0..0.3)))
            } else if choose_mat < 0.9 {
                Arc::new(Dielectric::new(1.5))
            } else {
                let albedo = Color::new(rng.gen_range(0.5..1.0), rng.gen_range(0.5..1.0), rng.gen_range(0.5..1.0));
                Arc::new(GlossyCoated::new(albedo, 1.5))
            };

            if choose_mat < 0.6 {
                let center1 = center + Vec3::new(0.0, rng.gen_range(0.0..0.3), 0.0);
                scene.push(Arc::new(MovingSphere::new(center, center1, 0.0, 1.0, 0.2, material)));
            } else {
                scene.push(Arc::new(Sphere::new(center, 0.2, material)));
            }
        }
    }

    SceneDescription {
        name: "Showcase",
        scene,
        camera_config: CameraConfig {
            look_from: Point3::new(13.0, 2.0, 3.0),
            look_at: Point3::new(0.0, 0.5, 0.0),
            vup: Vec3::unit_y(),
            vfov_degrees: 20.0,
            aspect_ratio: 16.0 / 9.0,
            aperture: 0.1,
            focus_dist: 10.0,
            time0: 0.0,
            time1: 1.0,
        },
        render_config: RenderConfig {
            image_width: 640,
            aspect_ratio: 16.0 / 9.0,
            samples_per_pixel: 50,
            max_depth: 12,
            background: Background::default(),
            random_seed: None,
        },
    }
}

fn build_minimal() -> SceneDescription {
    let mut scene = Scene::new();
    scene.push(Arc::new(Sphere::new(
        Point3::new(0.0, -100.5, -1.0),
        100.0,
        Arc::new(Lambertian::new(Color::new(0.8, 0.8, 0.0))),
    )));
    scene.push(Arc::new(Sphere::new(
        Point3::new(0.0, 0.0, -1.0),
        0.5,
        Arc::new(Metal::new(Color::new(0.95, 0.95, 0.97), 0.0)),
    )));
    scene.push(Arc::new(Sphere::new(
        Point3::new(-1.0, 0.0, -1.0),
        0.5,
        Arc::new(Lambertian::new(Color::new(0.9, 0.2, 0.1))),
    )));
    scene.push(Arc::new(Sphere::new(Point3::new(1.0, 0.0, -1.0), 0.5, Arc::new(Dielectric::new(1.5)))));

    SceneDescription {
        name: "Minimal",
        scene,
        camera_config: CameraConfig {
            look_from: Point3::new(0.0, 0.0, 0.0),
            look_at: Point3::new(0.0, 0.0, -1.0),
            vup: Vec3::unit_y(),
            vfov_degrees: 90.0,
            aspect_ratio: 16.0 / 9.0,
            aperture: 0.0,
            focus_dist: 1.0,
            time0: 0.0,
            time1: 0.0,
        },
        render_config: RenderConfig {
            image_width: 384,
            aspect_ratio: 16.0 / 9.0,
            samples_per_pixel: 32,
            max_depth: 10,
            background: Background::default(),
            random_seed: None,
        },
    }
}

fn build_lit_box() -> SceneDescription {
    let mut scene = Scene::new();

    scene.push(Arc::new(Sphere::new(
        Point3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Lambertian::new(Color::new(0.4, 0.4, 0.45))),
    )));

    scene.push(Arc::new(Cuboid::new(
        Point3::new(-1.0, 0.0, -1.0),
        Point3::new(1.0, 1.5, 1.0),
        Arc::new(Lambertian::new(Color::new(0.73, 0.73, 0.73))),
    )));

    scene.push(Arc::new(RectangleXy::new(
        -1.5,
        1.5,
        3.0,
        4.0,
        -0.5,
        Arc::new(DiffuseLight::new(Color::new(6.0, 6.0, 6.0))),
    )));

    SceneDescription {
        name: "Lit Box",
        scene,
        camera_config: CameraConfig {
            look_from: Point3::new(0.0, 2.0, 6.0),
            look_at: Point3::new(0.0, 1.0, 0.0),
            vup: Vec3::unit_y(),
            vfov_degrees: 40.0,
            aspect_ratio: 1.0,
            aperture: 0.0,
            focus_dist: 7.0,
            time0: 0.0,
            time1: 0.0,
        },
        render_config: RenderConfig {
            image_width: 400,
            aspect_ratio: 1.0,
            samples_per_pixel: 100,
            max_depth: 20,
            background: Background::Black,
            random_seed: None,
        },
    }
}

fn build_motion_blur() -> SceneDescription {
    let mut scene = Scene::new();
    let mut rng = rand::thread_rng();

    scene.push(Arc::new(Sphere::new(
        Point3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5))),
    )));

    for a in -4..4 {
        for b in -4..4 {
            let center = Point3::new(a as f64 * 1.3, 0.2, b as f64 * 1.3);
            let albedo = Color::new(rng.gen(), rng.gen(), rng.gen());
            let center1 = center + Vec3::new(0.0, rng.gen_range(0.2..0.6), 0.0);
            scene.push(Arc::new(MovingSphere::new(center, center1, 0.0, 1.0, 0.2, Arc::new(Lambertian::new(albedo)))));
        }
    }

    SceneDescription {
        name: "Motion Blur",
        scene,
        camera_config: CameraConfig {
            look_from: Point3::new(8.0, 3.0, 8.0),
            look_at: Point3::zero(),
            vup: Vec3::unit_y(),
            vfov_degrees: 30.0,
            aspect_ratio: 16.0 / 9.0,
            aperture: 0.0,
            focus_dist: 10.0,
            time0: 0.0,
            time1: 1.0,
        },
        render_config: RenderConfig {
            image_width: 480,
            aspect_ratio: 16.0 / 9.0,
            samples_per_pixel: 60,
            max_depth: 12,
            background: Background::default(),
            random_seed: None,
        },
    }
}
