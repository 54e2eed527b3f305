//! Example: Load and inspect a scene driver file.
//!
//! Run with: cargo run --example inspect_scene -- scenes/room.txt

use std::env;

use tracer_core::{load_scene_file, Shape};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: inspect_scene <path-to-scene-file>");
        println!("\nExample:");
        println!("  cargo run --example inspect_scene -- scenes/room.txt");
        return;
    }

    let path = &args[1];
    println!("Loading scene file: {}", path);

    match load_scene_file(path) {
        Ok(file) => {
            let (width, height) = file.resolution;
            println!("\n=== Scene: {} ===", file.name);
            println!("Resolution: {}x{}", width, height);
            println!("Primitives: {}", file.scene.primitive_count());
            println!("Materials: {}", file.scene.materials().len());

            let camera = &file.camera;
            let eye = camera.eye();
            let look = camera.look();
            println!("\n--- Camera ---");
            println!("  Eye: ({:.2}, {:.2}, {:.2})", eye.x, eye.y, eye.z);
            println!("  Look: ({:.2}, {:.2}, {:.2})", look.x, look.y, look.z);
            println!("  Focal length: {:.2}", camera.focal_length());

            println!("\n--- Primitives ---");
            for (i, primitive) in file.scene.primitives().iter().enumerate() {
                let material = file.scene.material_of(i);
                match &primitive.shape {
                    Shape::Sphere(sphere) => println!(
                        "  [{}] Sphere r={:.2} at ({:.2}, {:.2}, {:.2}) - {:?}{}",
                        i,
                        sphere.radius,
                        sphere.center.x,
                        sphere.center.y,
                        sphere.center.z,
                        material.kind,
                        if material.is_emissive() { " (light)" } else { "" }
                    ),
                }
            }
        }
        Err(e) => {
            eprintln!("Error loading scene file: {}", e);
        }
    }
}
