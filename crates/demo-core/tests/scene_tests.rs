// Host-side tests for scene storage and wholesale regeneration.

use approx::assert_relative_eq;
use demo_core::*;
use glam::{Mat4, Vec3};
use std::cell::Cell;
use std::rc::Rc;

/// Counts live instances through a shared counter.
struct Tracked {
    live: Rc<Cell<usize>>,
    tag: u32,
}

impl Tracked {
    fn new(live: &Rc<Cell<usize>>, tag: u32) -> Self {
        live.set(live.get() + 1);
        Self {
            live: Rc::clone(live),
            tag,
        }
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}

#[test]
fn add_get_remove() {
    let mut scene = Scene::new();
    let a = scene.add("a");
    let b = scene.add("b");
    assert_eq!(scene.len(), 2);
    assert_eq!(scene.get(a), Some(&"a"));
    assert_eq!(scene.remove(a), Some("a"));
    assert_eq!(scene.get(a), None);
    assert_eq!(scene.remove(a), None);
    assert!(scene.contains(b));
    assert_eq!(scene.len(), 1);
}

#[test]
fn stale_handles_do_not_alias_reused_slots() {
    let mut scene = Scene::new();
    let old = scene.add(1);
    scene.remove(old);
    let new = scene.add(2);
    assert_ne!(old, new);
    assert_eq!(scene.get(old), None);
    assert_eq!(scene.get(new), Some(&2));
    if let Some(v) = scene.get_mut(new) {
        *v = 3;
    }
    assert_eq!(scene.iter().map(|(_, v)| *v).collect::<Vec<_>>(), vec![3]);
}

#[test]
fn regeneration_drops_previous_node_before_building() {
    let live = Rc::new(Cell::new(0));
    let mut scene = Scene::new();
    let mut slot = ReplaceableNode::new();

    for round in 0..5 {
        let seen = Rc::clone(&live);
        slot.regenerate(&mut scene, || {
            assert_eq!(seen.get(), 0, "previous node still alive while building");
            Tracked::new(&seen, round)
        });
        assert_eq!(live.get(), 1);
        assert_eq!(scene.len(), 1);
    }

    let current = slot.current().and_then(|id| scene.get(id)).map(|t| t.tag);
    assert_eq!(current, Some(4));

    slot.clear(&mut scene);
    assert_eq!(live.get(), 0);
    assert!(scene.is_empty());
}

#[test]
fn regeneration_leaves_other_nodes_alone() {
    let live = Rc::new(Cell::new(0));
    let mut scene = Scene::new();
    let keep = scene.add(Tracked::new(&live, 99));
    let mut slot = ReplaceableNode::new();
    for round in 0..3 {
        slot.regenerate(&mut scene, || Tracked::new(&live, round));
    }
    assert_eq!(scene.len(), 2);
    assert_eq!(live.get(), 2);
    assert_eq!(scene.get(keep).map(|t| t.tag), Some(99));
}

#[test]
fn clear_drops_everything() {
    let live = Rc::new(Cell::new(0));
    let mut scene = Scene::new();
    let ids: Vec<_> = (0..4).map(|i| scene.add(Tracked::new(&live, i))).collect();
    scene.clear();
    assert_eq!(live.get(), 0);
    assert!(ids.iter().all(|id| !scene.contains(*id)));
    scene.add(Tracked::new(&live, 7));
    assert_eq!(scene.len(), 1);
}

#[test]
fn transform_applies_scale_then_xyz_rotation_then_translation() {
    let t = Transform {
        position: Vec3::new(1.0, 2.0, 3.0),
        rotation: Vec3::new(0.3, -0.2, 0.1),
        scale: Vec3::splat(2.0),
    };
    let expected = Mat4::from_translation(t.position)
        * Mat4::from_rotation_x(0.3)
        * Mat4::from_rotation_y(-0.2)
        * Mat4::from_rotation_z(0.1)
        * Mat4::from_scale(t.scale);
    let got = t.matrix();
    for (g, e) in got.to_cols_array().iter().zip(expected.to_cols_array()) {
        assert_relative_eq!(*g, e, epsilon = 1e-5);
    }
}

#[test]
fn default_transform_is_identity() {
    assert_eq!(Transform::default().matrix(), Mat4::IDENTITY);
    assert_eq!(Transform::at(Vec3::X).matrix(), Mat4::from_translation(Vec3::X));
}
