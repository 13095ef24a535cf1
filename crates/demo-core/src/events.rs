//! Minimal publish/subscribe hub: event name → callbacks in registration order.

use fnv::FnvHashMap;
use smallvec::SmallVec;

pub const RESIZE: &str = "resize";
pub const TICK: &str = "tick";

/// Handle returned by [`EventEmitter::on`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<P> = (ListenerId, Box<dyn FnMut(&P)>);

pub struct EventEmitter<P> {
    listeners: FnvHashMap<&'static str, SmallVec<[Listener<P>; 2]>>,
    next_id: u64,
}

impl<P> Default for EventEmitter<P> {
    fn default() -> Self {
        Self {
            listeners: FnvHashMap::default(),
            next_id: 0,
        }
    }
}

impl<P> EventEmitter<P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&mut self, event: &'static str, callback: impl FnMut(&P) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners
            .entry(event)
            .or_default()
            .push((id, Box::new(callback)));
        id
    }

    /// Remove one listener. Returns false if it was not registered for `event`.
    pub fn off(&mut self, event: &str, id: ListenerId) -> bool {
        let Some(list) = self.listeners.get_mut(event) else {
            return false;
        };
        let before = list.len();
        list.retain(|(lid, _)| *lid != id);
        let removed = list.len() != before;
        if list.is_empty() {
            self.listeners.remove(event);
        }
        removed
    }

    /// Call every listener of `event` in registration order.
    /// Returns how many were called.
    pub fn trigger(&mut self, event: &str, payload: &P) -> usize {
        match self.listeners.get_mut(event) {
            Some(list) => {
                for (_, callback) in list.iter_mut() {
                    callback(payload);
                }
                list.len()
            }
            None => 0,
        }
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners.get(event).map_or(0, |l| l.len())
    }
}

impl<P> std::fmt::Debug for EventEmitter<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (name, list) in &self.listeners {
            map.entry(name, &list.len());
        }
        map.finish()
    }
}
