//! Time-sliced ray tracing example.
//!
//! Builds a small scene in code, traces it in 50 ms slices the way a frame
//! loop would, and saves the result as a PNG.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use lumen_core::{Geometry, Material, Mesh, Model, PointLight, Scene, Sphere, Texture, Triangle};
use lumen_math::{Camera, Transform, Vec2, Vec3};
use lumen_tracer::{Color, Raytracer};

const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;
const SLICE: Duration = Duration::from_millis(50);

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let scene = build_scene()?;

    let mut tracer = Raytracer::new();
    tracer.initialize(&scene, WIDTH, HEIGHT, &scene.camera)?;

    let mut pixels = vec![0u8; (WIDTH * HEIGHT * 4) as usize];
    let start = Instant::now();
    let mut slices = 0;
    while !tracer.raytrace(&mut pixels, Some(SLICE))? {
        slices += 1;
        if let Some(row) = tracer.current_row() {
            log::info!("Slice {}: {}/{} rows", slices, row, HEIGHT);
        }
    }
    log::info!("Traced in {:?} over {} slices", start.elapsed(), slices + 1);

    // Rows are stored bottom-up; image files want top-down
    let row_bytes = (WIDTH * 4) as usize;
    let flipped: Vec<u8> = pixels.chunks_exact(row_bytes).rev().flatten().copied().collect();

    let filename = "time_sliced.png";
    image::save_buffer(filename, &flipped, WIDTH, HEIGHT, image::ColorType::Rgba8)
        .with_context(|| format!("Failed to save {}", filename))?;
    log::info!("Saved to {}", filename);

    Ok(())
}

fn build_scene() -> anyhow::Result<Scene> {
    let mut scene = Scene::new();
    scene.background_color = Color::new(0.05, 0.07, 0.12);
    scene.ambient_light = Color::splat(0.15);
    scene.camera = Camera::look_at(
        Vec3::new(0.0, 1.5, 6.0),
        Vec3::new(0.0, 0.3, 0.0),
        Vec3::Y,
        WIDTH as f32 / HEIGHT as f32,
    );

    scene.add_light(PointLight::new(Vec3::new(-4.0, 6.0, 4.0), Color::splat(0.8)));
    scene.add_light(
        PointLight::new(Vec3::new(5.0, 3.0, 2.0), Color::new(1.0, 0.9, 0.7)).with_attenuation(1.0, 0.05, 0.01),
    );

    // Mirror sphere
    let mirror = scene.add_material(Material::mirror(Color::splat(0.85)).with_name("mirror"));
    scene.add_geometry(Geometry::new(
        Sphere::new(1.0, mirror).into(),
        Transform::from_position(Vec3::new(-1.3, 1.0, -0.5)),
    ));

    // Glass sphere
    let glass = scene.add_material(Material::dielectric(1.5).with_name("glass"));
    scene.add_geometry(Geometry::new(
        Sphere::new(0.7, glass).into(),
        Transform::from_position(Vec3::new(1.2, 0.7, 0.8)),
    ));

    // Checkered floor made of two triangles
    let mut texels = Vec::with_capacity(8 * 8);
    for y in 0..8 {
        for x in 0..8 {
            texels.push(if (x + y) % 2 == 0 { Color::ONE } else { Color::splat(0.25) });
        }
    }
    let checker = Arc::new(Texture::from_texels(8, 8, texels)?);
    let floor = scene.add_material(
        Material::diffuse(Color::new(0.8, 0.8, 0.7))
            .with_name("floor")
            .with_texture(checker),
    );
    let corners = [
        Vec3::new(-6.0, 0.0, 6.0),
        Vec3::new(6.0, 0.0, 6.0),
        Vec3::new(6.0, 0.0, -6.0),
        Vec3::new(-6.0, 0.0, -6.0),
    ];
    let uvs = [Vec2::ZERO, Vec2::new(3.0, 0.0), Vec2::new(3.0, 3.0), Vec2::new(0.0, 3.0)];
    for [a, b, c] in [[0, 1, 2], [0, 2, 3]] {
        scene.add_geometry(Geometry::new(
            Triangle::flat([corners[a], corners[b], corners[c]], [uvs[a], uvs[b], uvs[c]], floor.clone()).into(),
            Transform::default(),
        ));
    }

    // Cube mesh, rotated and scaled
    let cube = scene.add_mesh(cube_mesh()?);
    let orange = scene.add_material(Material::diffuse(Color::new(0.9, 0.45, 0.1)).with_name("orange"));
    scene.add_geometry(Geometry::new(
        Model::new(cube, orange).into(),
        Transform::from_position(Vec3::new(0.3, 0.4, -2.0))
            .with_orientation(lumen_math::Quat::from_rotation_y(0.6))
            .with_scale(Vec3::splat(0.4)),
    ));

    scene.prepare()?;
    Ok(scene)
}

fn cube_mesh() -> anyhow::Result<Mesh> {
    let positions = vec![
        Vec3::new(-1.0, -1.0, -1.0),
        Vec3::new(1.0, -1.0, -1.0),
        Vec3::new(1.0, 1.0, -1.0),
        Vec3::new(-1.0, 1.0, -1.0),
        Vec3::new(-1.0, -1.0, 1.0),
        Vec3::new(1.0, -1.0, 1.0),
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(-1.0, 1.0, 1.0),
    ];
    let indices = vec![
        0, 2, 1, 0, 3, 2, // back
        4, 5, 6, 4, 6, 7, // front
        0, 1, 5, 0, 5, 4, // bottom
        3, 7, 6, 3, 6, 2, // top
        0, 4, 7, 0, 7, 3, // left
        1, 2, 6, 1, 6, 5, // right
    ];
    Ok(Mesh::from_positions(positions, indices)?)
}
