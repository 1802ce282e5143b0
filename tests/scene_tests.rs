//! Scene Integration Tests
//!
//! Tests for:
//! - Scene: create/remove nodes, attach/detach hierarchy
//! - Renderer capability and subtree queries
//! - Node query: names, root_nodes, find_child
//! - SceneNode wrapper convenience API
//! - World-space helpers (positions, bounds centres)

use glam::Vec3;
use sunder::{BoundingBox, Node, Scene};

fn new_scene() -> Scene {
    Scene::new()
}

fn unit_box() -> BoundingBox {
    BoundingBox::from_center_half_extents(Vec3::ZERO, Vec3::splat(0.5))
}

// ============================================================================
// Node Creation & Removal
// ============================================================================

#[test]
fn scene_create_node() {
    let mut scene = new_scene();
    let handle = scene.create_node();
    assert!(scene.get_node(handle).is_some());
}

#[test]
fn scene_create_node_with_name() {
    let mut scene = new_scene();
    let handle = scene.create_node_with_name("TestNode");
    assert_eq!(scene.get_name(handle), Some("TestNode"));
}

#[test]
fn scene_set_name() {
    let mut scene = new_scene();
    let handle = scene.create_node();
    scene.set_name(handle, "Renamed");
    assert_eq!(scene.get_name(handle), Some("Renamed"));
}

#[test]
fn scene_add_node_to_root() {
    let mut scene = new_scene();
    let handle = scene.add_node(Node::new());
    assert!(scene.root_nodes.contains(&handle));
}

#[test]
fn scene_remove_node_removes_from_root() {
    let mut scene = new_scene();
    let handle = scene.add_node(Node::new());
    assert!(scene.root_nodes.contains(&handle));

    scene.remove_node(handle);
    assert!(!scene.root_nodes.contains(&handle));
    assert!(scene.get_node(handle).is_none());
}

#[test]
fn scene_remove_node_removes_subtree() {
    let mut scene = new_scene();
    let parent = scene.add_node(Node::new());
    let child = scene.create_node();
    let grandchild = scene.create_node();

    scene.attach(child, parent);
    scene.attach(grandchild, child);
    scene.node(grandchild).with_renderer(unit_box());

    scene.remove_node(parent);

    assert!(scene.get_node(parent).is_none());
    assert!(scene.get_node(child).is_none());
    assert!(scene.get_node(grandchild).is_none());
    assert!(!scene.has_renderer(grandchild), "Renderer should be dropped with its node");
}

#[test]
fn scene_stale_handle_queries_are_empty() {
    let mut scene = new_scene();
    let node = scene.create_node();
    scene.remove_node(node);

    assert!(!scene.contains(node));
    assert!(scene.children(node).is_empty());
    assert_eq!(scene.parent(node), None);
    assert_eq!(scene.world_position(node), None);
}

// ============================================================================
// Hierarchy: Attach / Detach
// ============================================================================

#[test]
fn scene_attach_sets_parent_child() {
    let mut scene = new_scene();
    let parent = scene.create_node();
    let child = scene.create_node();

    scene.attach(child, parent);

    assert_eq!(scene.get_node(child).unwrap().parent(), Some(parent));
    assert!(scene.get_node(parent).unwrap().children().contains(&child));
    assert!(!scene.root_nodes.contains(&child));
}

#[test]
fn scene_attach_removes_from_old_parent() {
    let mut scene = new_scene();
    let parent1 = scene.create_node();
    let parent2 = scene.create_node();
    let child = scene.create_node();

    scene.attach(child, parent1);
    assert!(scene.children(parent1).contains(&child));

    // Re-attach to parent2
    scene.attach(child, parent2);
    assert!(
        !scene.children(parent1).contains(&child),
        "Child should be removed from old parent"
    );
    assert!(scene.children(parent2).contains(&child), "Child should be in new parent");
}

#[test]
fn scene_attach_to_self_is_noop() {
    let mut scene = new_scene();
    let node = scene.create_node();

    scene.attach(node, node);

    assert_eq!(scene.parent(node), None);
}

#[test]
fn scene_attach_rejects_cycles() {
    let mut scene = new_scene();
    let a = scene.create_node();
    let b = scene.add_to_parent(Node::new(), a);

    scene.attach(a, b);

    assert_eq!(scene.parent(a), None);
    assert_eq!(scene.parent(b), Some(a));
}

#[test]
fn scene_detach_makes_root() {
    let mut scene = new_scene();
    let parent = scene.create_node();
    let child = scene.add_to_parent(Node::new(), parent);

    scene.detach(child);

    assert_eq!(scene.parent(child), None);
    assert!(scene.root_nodes.contains(&child));
    assert!(scene.children(parent).is_empty());
}

#[test]
fn scene_add_to_parent() {
    let mut scene = new_scene();
    let parent = scene.add_node(Node::new());
    let child = scene.add_to_parent(Node::new(), parent);

    assert_eq!(scene.parent(child), Some(parent));
    assert!(scene.children(parent).contains(&child));
}

#[test]
fn scene_add_to_stale_parent_falls_back_to_root() {
    let mut scene = new_scene();
    let parent = scene.create_node();
    scene.remove_node(parent);

    let child = scene.add_to_parent(Node::new(), parent);
    assert!(scene.root_nodes.contains(&child));
}

#[test]
fn scene_find_child_by_name() {
    let mut scene = new_scene();
    let parent = scene.create_node();
    let a = scene.add_to_parent(Node::with_name("A"), parent);
    let _b = scene.add_to_parent(Node::with_name("B"), parent);

    assert_eq!(scene.find_child(parent, "A"), Some(a));
    assert_eq!(scene.find_child(parent, "C"), None);
}

// ============================================================================
// Hierarchy + Transform Dirty Propagation
// ============================================================================

#[test]
fn scene_attach_marks_child_dirty() {
    let mut scene = new_scene();
    let parent = scene.create_node();
    let child = scene.create_node();

    // Consume dirty flag by calling update_local_matrix
    scene.get_node_mut(child).unwrap().transform.update_local_matrix();

    scene.attach(child, parent);

    let child_node = scene.get_node_mut(child).unwrap();
    assert!(
        child_node.transform.update_local_matrix(),
        "Attach should mark child transform dirty"
    );
}

// ============================================================================
// Renderer Capability & Bounds
// ============================================================================

#[test]
fn scene_subtree_has_renderer() {
    let mut scene = new_scene();
    let group = scene.create_node();
    let empty = scene.add_to_parent(Node::new(), group);
    let mesh = scene.add_to_parent(Node::new(), empty);

    assert!(!scene.subtree_has_renderer(group));

    scene.node(mesh).with_renderer(unit_box());
    assert!(scene.subtree_has_renderer(group));
    assert!(scene.subtree_has_renderer(mesh));
    assert!(!scene.has_renderer(group));
}

#[test]
fn scene_renderer_can_be_removed() {
    let mut scene = new_scene();
    let mesh = scene.create_node();
    scene.node(mesh).with_renderer(unit_box());
    assert_eq!(scene.renderer(mesh).map(|r| r.bounds), Some(unit_box()));

    assert!(scene.remove_renderer(mesh).is_some());
    assert!(!scene.has_renderer(mesh));
    assert!(scene.remove_renderer(mesh).is_none());
}

#[test]
fn scene_world_bounds_center_unions_subtree() {
    let mut scene = new_scene();
    let group = scene.create_node();
    scene.node(group).set_position(10.0, 0.0, 0.0);

    let left = scene.add_to_parent(Node::new(), group);
    scene.node(left).set_position(-1.0, 0.0, 0.0).with_renderer(unit_box());
    let right = scene.add_to_parent(Node::new(), group);
    scene.node(right).set_position(3.0, 0.0, 0.0).with_renderer(unit_box());

    let center = scene.world_bounds_center(group).unwrap();
    assert!((center - Vec3::new(11.0, 0.0, 0.0)).length() < 1e-5);
    let bare = scene.create_node();
    assert_eq!(scene.world_bounds_center(bare), None);
}

#[test]
fn scene_world_position_composes_parents() {
    let mut scene = new_scene();
    let parent = scene.create_node();
    scene.node(parent).set_position(1.0, 2.0, 3.0).set_scale(2.0);
    let child = scene.add_to_parent(Node::new(), parent);
    scene.node(child).set_position(1.0, 0.0, 0.0);

    let world = scene.world_position(child).unwrap();
    assert!((world - Vec3::new(3.0, 2.0, 3.0)).length() < 1e-5);
}

#[test]
fn scene_degenerate_space_has_no_inverse() {
    let mut scene = new_scene();
    let holder = scene.create_node();
    scene.node(holder).set_position(1.0, 0.0, 0.0).set_scale(0.0);
    let child = scene.add_to_parent(Node::new(), holder);
    let other = scene.create_node();

    assert_eq!(scene.inverse_transform_vector(Some(holder), Vec3::X), None);
    assert_eq!(scene.space_to_space(Some(other), Some(holder)), None);
    assert_eq!(scene.space_to_space(None, Some(holder)), None);

    // Collapsing into the degenerate space is still well defined.
    let into_world = scene.space_to_space(Some(holder), None).unwrap();
    assert_eq!(into_world.transform_point3(Vec3::new(3.0, 4.0, 5.0)), Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(scene.world_position(child), Some(Vec3::new(1.0, 0.0, 0.0)));
}

// ============================================================================
// SceneNode Wrapper
// ============================================================================

#[test]
fn scene_node_wrapper_chains() {
    let mut scene = new_scene();
    let handle = scene.create_node();
    scene
        .node(handle)
        .set_name("Gear")
        .set_position(1.0, 2.0, 3.0)
        .set_scale(0.5)
        .set_visible(false);

    let node = scene.get_node(handle).unwrap();
    assert_eq!(node.name, "Gear");
    assert_eq!(node.transform.position, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(node.transform.scale, Vec3::splat(0.5));
    assert!(!node.visible);
}
