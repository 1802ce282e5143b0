//! Headless exploded-view walkthrough.
//!
//! Builds a small gearbox, explodes it step by step and logs where every
//! part ends up. Run with `RUST_LOG=info`. An optional argument points at a
//! JSON file with root manager settings:
//!
//! ```text
//! cargo run -p assembly_demo -- settings.json
//! ```

use anyhow::Context;
use glam::Vec3;
use sunder::{
    Annotation, BoltUnscrew, BoundingBox, ExplosionCommand, ExplosionSettings, ExplosionSystem, Node, NodeHandle,
    Scene,
};

const STEPS: usize = 10;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let settings = match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            ExplosionSettings::from_json(&text).with_context(|| format!("parsing {path}"))?
        }
        None => ExplosionSettings {
            orchestrate_sub_managers: true,
            link_explosion_factors: true,
            separate_movement_and_orchestration: true,
            sensitivity: 1.5,
            ..ExplosionSettings::default()
        },
    };
    log::info!("Root settings: {}", settings.to_json()?);

    let mut scene = Scene::new();
    let mut system = ExplosionSystem::new();
    let gearbox = build_gearbox(&mut scene, &mut system, settings)?;

    system.setup_explosion(&mut scene, gearbox)?;
    for (depth, manager) in system.manager_tree(gearbox) {
        log::info!(
            "{:indent$}{} ({} parts)",
            "",
            scene.get_name(manager).unwrap_or("?"),
            system.manager(manager).map_or(0, |m| m.parts.len()),
            indent = depth * 2
        );
    }

    let tracked = ["Cover", "InputGear", "Bolt", "OutputGear"].map(|name| find_by_name(&scene, name));

    for step in 0..=STEPS {
        let factor = step as f32 / STEPS as f32;
        system.set_explosion_factor(gearbox, factor)?;
        system.update(&mut scene);

        let positions: Vec<String> = tracked
            .iter()
            .flatten()
            .filter_map(|&h| {
                let p = scene.world_position(h)?;
                Some(format!("{}=({:.2}, {:.2}, {:.2})", scene.get_name(h)?, p.x, p.y, p.z))
            })
            .collect();
        log::info!("factor {factor:.1}: {}", positions.join(" "));

        if let Some(cover) = tracked[0]
            && let Some(frame) = system.annotation_frame(cover)
        {
            log::info!("  label visibility {:.2} at {:.2}", frame.visibility, frame.anchor);
        }
    }

    log::debug!("Snapshot:\n{}", system.snapshot().to_json()?);

    system.enqueue(ExplosionCommand::Cleanup {
        manager: gearbox,
        remove_from_tree: false,
    });
    system.update(&mut scene);
    log::info!("Cleanup applied, {} commands pending", system.pending_commands());

    Ok(())
}

fn build_gearbox(scene: &mut Scene, system: &mut ExplosionSystem, settings: ExplosionSettings) -> anyhow::Result<NodeHandle> {
    let gearbox = scene.create_node_with_name("Gearbox");
    system.add_manager(scene, gearbox, settings)?;

    mesh(scene, gearbox, "Housing", Vec3::ZERO, Vec3::new(1.5, 1.0, 1.0));
    let cover = mesh(scene, gearbox, "Cover", Vec3::new(0.0, 1.2, 0.0), Vec3::new(1.5, 0.1, 1.0));
    system.attach_annotation(cover, Annotation::default());

    let input = scene.add_to_parent(Node::with_name("InputShaft"), gearbox);
    scene.node(input).set_position(-0.6, 0.2, 0.0);
    mesh(scene, input, "InputGear", Vec3::new(0.0, 0.0, 0.4), Vec3::splat(0.3));
    let bolt = mesh(scene, input, "Bolt", Vec3::new(0.0, 0.0, 0.9), Vec3::new(0.05, 0.05, 0.2));
    system.attach_animator(bolt, Box::new(BoltUnscrew::new(Vec3::Z, 0.6, 4.0)));
    system.add_manager(scene, input, ExplosionSettings::default())?;

    let output = scene.add_to_parent(Node::with_name("OutputShaft"), gearbox);
    scene.node(output).set_position(0.6, -0.2, 0.0);
    mesh(scene, output, "OutputGear", Vec3::new(0.0, 0.0, -0.4), Vec3::splat(0.45));
    mesh(scene, output, "Bearing", Vec3::new(0.0, 0.0, -0.9), Vec3::splat(0.15));
    system.add_manager(scene, output, ExplosionSettings::default())?;

    Ok(gearbox)
}

fn mesh(scene: &mut Scene, parent: NodeHandle, name: &str, position: Vec3, half_extents: Vec3) -> NodeHandle {
    let handle = scene.add_to_parent(Node::with_name(name), parent);
    scene
        .node(handle)
        .set_position_vec(position)
        .with_renderer(BoundingBox::from_center_half_extents(Vec3::ZERO, half_extents));
    handle
}

fn find_by_name(scene: &Scene, name: &str) -> Option<NodeHandle> {
    let mut stack = scene.root_nodes.clone();
    while let Some(h) = stack.pop() {
        if scene.get_name(h) == Some(name) {
            return Some(h);
        }
        stack.extend_from_slice(scene.children(h));
    }
    None
}
