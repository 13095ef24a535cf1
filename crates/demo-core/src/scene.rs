//! Flat scene storage with generational handles.
//!
//! A removed node is dropped before `remove` returns (or handed back to the
//! caller), so whatever it owns is released right there. Stale handles
//! never alias a newer node in the same slot.

use glam::{EulerRot, Mat4, Quat, Vec3};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

#[derive(Debug)]
struct Slot<R> {
    generation: u32,
    value: Option<R>,
}

#[derive(Debug)]
pub struct Scene<R> {
    slots: Vec<Slot<R>>,
    free: Vec<u32>,
    len: usize,
}

impl<R> Default for Scene<R> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }
}

impl<R> Scene<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, node: R) -> NodeId {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(node);
            return NodeId {
                index,
                generation: slot.generation,
            };
        }
        self.slots.push(Slot {
            generation: 0,
            value: Some(node),
        });
        NodeId {
            index: (self.slots.len() - 1) as u32,
            generation: 0,
        }
    }

    /// Detach a node and return it. `None` for stale or unknown handles.
    pub fn remove(&mut self, id: NodeId) -> Option<R> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.len -= 1;
        Some(value)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: NodeId) -> Option<&R> {
        self.slots
            .get(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.value.as_ref())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut R> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.value.as_mut())
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &R)> {
        self.slots.iter().enumerate().filter_map(|(i, s)| {
            s.value.as_ref().map(|v| {
                (
                    NodeId {
                        index: i as u32,
                        generation: s.generation,
                    },
                    v,
                )
            })
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut R> {
        self.slots.iter_mut().filter_map(|s| s.value.as_mut())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drop every node.
    pub fn clear(&mut self) {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if slot.value.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(i as u32);
            }
        }
        self.len = 0;
    }
}

/// A scene slot whose content is rebuilt wholesale.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReplaceableNode {
    current: Option<NodeId>,
}

impl ReplaceableNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    /// Remove and drop the previous node, then build and insert a new one.
    /// The old node is gone before `build` runs.
    pub fn regenerate<R>(&mut self, scene: &mut Scene<R>, build: impl FnOnce() -> R) -> NodeId {
        if let Some(old) = self.current.take() {
            drop(scene.remove(old));
        }
        let id = scene.add(build());
        self.current = Some(id);
        id
    }

    pub fn clear<R>(&mut self, scene: &mut Scene<R>) {
        if let Some(old) = self.current.take() {
            drop(scene.remove(old));
        }
    }
}

/// Position, Euler XYZ rotation (radians) and scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn quaternion(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quaternion(), self.position)
    }
}
