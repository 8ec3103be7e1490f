//! Binary min-heap over node positions with decrease-key

use crate::NodeIndex;

const NOT_QUEUED: usize = usize::MAX;

/// Min-heap keyed by tentative distance. `positions` maps every node to
/// its slot in `heap`, which makes decrease-key O(log n).
#[derive(Debug)]
pub(crate) struct IndexedMinHeap {
    heap: Vec<NodeIndex>,
    keys: Vec<f64>,
    positions: Vec<usize>,
}

impl IndexedMinHeap {
    pub(crate) fn new(node_count: usize) -> Self {
        Self {
            heap: Vec::new(),
            keys: vec![f64::INFINITY; node_count],
            positions: vec![NOT_QUEUED; node_count],
        }
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.heap.len()
    }

    /// Queue `node` with `key`, or lower its key if already queued.
    /// A larger key for a queued node is ignored.
    pub(crate) fn push_or_decrease(&mut self, node: NodeIndex, key: f64) {
        let slot = self.positions[node];
        if slot == NOT_QUEUED {
            self.heap.push(node);
            self.keys[node] = key;
            let last = self.heap.len() - 1;
            self.positions[node] = last;
            self.sift_up(last);
        } else if key < self.keys[node] {
            self.keys[node] = key;
            self.sift_up(slot);
        }
    }

    pub(crate) fn pop(&mut self) -> Option<(NodeIndex, f64)> {
        let last = self.heap.len().checked_sub(1)?;
        self.swap(0, last);
        let node = self.heap.pop()?;
        self.positions[node] = NOT_QUEUED;
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some((node, self.keys[node]))
    }

    fn key_at(&self, slot: usize) -> f64 {
        self.keys[self.heap[slot]]
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.positions[self.heap[a]] = a;
        self.positions[self.heap[b]] = b;
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.key_at(slot) >= self.key_at(parent) {
                break;
            }
            self.swap(slot, parent);
            slot = parent;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            let mut smallest = slot;
            if left < len && self.key_at(left) < self.key_at(smallest) {
                smallest = left;
            }
            if right < len && self.key_at(right) < self.key_at(smallest) {
                smallest = right;
            }
            if smallest == slot {
                break;
            }
            self.swap(slot, smallest);
            slot = smallest;
        }
    }
}
