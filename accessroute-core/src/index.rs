//! Open-addressing index from node identifiers to node positions.
//!
//! Keys are normalized before hashing: everything outside printable
//! ASCII is dropped and the result is cut to [`MAX_ID_LEN`] bytes. The
//! table uses linear probing and doubles its capacity when a probe
//! sequence finds no free slot.

use log::debug;

use crate::NodeIndex;

/// Longest identifier kept after normalization
pub const MAX_ID_LEN: usize = 15;

/// Normalize a raw identifier: keep printable ASCII only, truncate to
/// [`MAX_ID_LEN`] bytes. Case is preserved.
pub fn normalize_id(raw: &str) -> String {
    raw.bytes()
        .filter(|b| (0x20..0x7f).contains(b))
        .take(MAX_ID_LEN)
        .map(char::from)
        .collect()
}

// djb2
fn hash_id(key: &str) -> u32 {
    key.bytes().fold(5381u32, |hash, byte| {
        hash.wrapping_shl(5)
            .wrapping_add(hash)
            .wrapping_add(u32::from(byte))
    })
}

#[derive(Debug, Clone)]
struct Slot {
    key: String,
    node: NodeIndex,
}

enum Probe {
    Found(usize),
    Vacant(usize),
    Full,
}

/// Result of [`IdIndex::insert`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// The normalized key was already present; the table is unchanged
    Duplicate { existing: NodeIndex },
}

#[derive(Debug, Clone)]
pub struct IdIndex {
    slots: Vec<Option<Slot>>,
    len: usize,
    rehashes: usize,
}

impl IdIndex {
    /// Creates an empty index. A capacity of zero is bumped to one.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity.max(1)],
            len: 0,
            rehashes: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of growth events since construction
    pub fn rehashes(&self) -> usize {
        self.rehashes
    }

    /// Insert `id` mapped to `node`. Duplicates are reported, never
    /// overwritten.
    pub fn insert(&mut self, id: &str, node: NodeIndex) -> InsertOutcome {
        let key = normalize_id(id);
        loop {
            match self.probe(&key) {
                Probe::Found(slot) => {
                    let existing = self.slots[slot].as_ref().map_or(node, |s| s.node);
                    return InsertOutcome::Duplicate { existing };
                }
                Probe::Vacant(slot) => {
                    self.slots[slot] = Some(Slot { key, node });
                    self.len += 1;
                    return InsertOutcome::Inserted;
                }
                Probe::Full => self.grow(),
            }
        }
    }

    /// Node position for `id`, or `None` if it was never inserted
    pub fn lookup(&self, id: &str) -> Option<NodeIndex> {
        let key = normalize_id(id);
        match self.probe(&key) {
            Probe::Found(slot) => self.slots[slot].as_ref().map(|s| s.node),
            Probe::Vacant(_) | Probe::Full => None,
        }
    }

    fn probe(&self, key: &str) -> Probe {
        let capacity = self.slots.len();
        let mut slot = hash_id(key) as usize % capacity;
        for _ in 0..capacity {
            match &self.slots[slot] {
                None => return Probe::Vacant(slot),
                Some(entry) if entry.key == key => return Probe::Found(slot),
                Some(_) => slot = (slot + 1) % capacity,
            }
        }
        Probe::Full
    }

    /// Double the capacity and reinsert every entry. The new table is
    /// strictly larger than the entry count, so every reinsert finds a
    /// vacant slot without recursing.
    fn grow(&mut self) {
        let old_capacity = self.slots.len();
        let new_capacity = old_capacity * 2;
        let old_slots = std::mem::replace(&mut self.slots, vec![None; new_capacity]);

        for entry in old_slots.into_iter().flatten() {
            let mut slot = hash_id(&entry.key) as usize % new_capacity;
            while self.slots[slot].is_some() {
                slot = (slot + 1) % new_capacity;
            }
            self.slots[slot] = Some(entry);
        }
        self.rehashes += 1;

        debug!(
            "Identifier index grown: capacity {old_capacity} -> {new_capacity}, {} entries",
            self.len
        );
    }
}
