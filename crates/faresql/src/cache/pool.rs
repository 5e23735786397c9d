//! Reusable vector storage for evicted cache entries.

use std::sync::Mutex;

/// A shared shelf of emptied vectors.
///
/// Destroying a cache entry in pooled mode clears the vector (dropping its
/// elements) and parks the allocation here instead of releasing it, cutting
/// allocator churn under high request volume.
pub struct VectorPool<R> {
    shelves: Mutex<Vec<Vec<R>>>,
    capacity: usize,
}

impl<R> VectorPool<R> {
    pub fn new(capacity: usize) -> Self {
        Self {
            shelves: Mutex::new(Vec::new()),
            capacity,
        }
    }

    /// Take a pooled allocation, or a fresh vector when the pool is empty.
    pub fn acquire(&self) -> Vec<R> {
        self.shelves.lock().unwrap().pop().unwrap_or_default()
    }

    /// Clear `vec` and park its storage if there is room on the shelf.
    pub fn release(&self, mut vec: Vec<R>) {
        vec.clear();
        let mut shelves = self.shelves.lock().unwrap();
        if shelves.len() < self.capacity {
            shelves.push(vec);
        }
    }

    /// Number of parked allocations.
    pub fn len(&self) -> usize {
        self.shelves.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
