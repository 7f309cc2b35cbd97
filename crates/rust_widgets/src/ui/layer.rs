//! Layer registry
//!
//! Named pools of widget handles. Switching the active pool is how screens
//! and menus are navigated without destroying the screens left behind.

use std::collections::HashMap;
use std::rc::Rc;

use super::identity::Handle;

/// Name of the pool active before any bind
pub const DEFAULT_LAYER: &str = "default";

/// Named pools of one widget kind
pub struct Layer<T> {
    current: String,
    pools: HashMap<String, Vec<Handle<T>>>,
}

impl<T> Default for Layer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Layer<T> {
    /// Registry with the default pool active
    pub fn new() -> Self {
        Self {
            current: DEFAULT_LAYER.to_string(),
            pools: HashMap::new(),
        }
    }

    /// Switch the active pool, returning whether the name changed
    pub fn bind(&mut self, name: &str) -> bool {
        if self.current == name {
            return false;
        }
        self.current = name.to_string();
        true
    }

    /// Name of the active pool
    pub fn current_name(&self) -> &str {
        &self.current
    }

    /// Empty a named pool
    pub fn clear(&mut self, name: &str) {
        if let Some(pool) = self.pools.get_mut(name) {
            pool.clear();
        }
    }

    /// Add to the end of the active pool
    pub fn append(&mut self, item: Handle<T>) {
        self.pools.entry(self.current.clone()).or_default().push(item);
    }

    /// Remove by identity from the active pool; unknown handles are ignored
    pub fn erase(&mut self, item: &Handle<T>) -> bool {
        let Some(pool) = self.pools.get_mut(&self.current) else {
            return false;
        };
        match pool.iter().position(|p| Rc::ptr_eq(p, item)) {
            Some(index) => {
                pool.remove(index);
                true
            }
            None => false,
        }
    }

    /// Active pool in insertion order
    pub fn current(&self) -> &[Handle<T>] {
        self.pools.get(&self.current).map_or(&[], Vec::as_slice)
    }

    /// Clone of the active pool, for passes that mutate the registry
    pub fn snapshot(&self) -> Vec<Handle<T>> {
        self.current().to_vec()
    }

    /// Whether the active pool holds this handle
    pub fn contains(&self, item: &Handle<T>) -> bool {
        self.current().iter().any(|p| Rc::ptr_eq(p, item))
    }
}
