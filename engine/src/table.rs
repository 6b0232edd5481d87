//! Transposition table: a fixed-capacity cache of search results keyed by
//! position fingerprint.
//!
//! One entry per slot, slot chosen by `fingerprint % capacity`. Replacement
//! is depth-preferred: a resident entry is only displaced by a result from
//! an equal or deeper search, so cheap shallow results never evict
//! expensive deep ones. Probes compare the stored 64-bit fingerprint, so a
//! slot collision between different fingerprints reads as a miss; two
//! boards hashing to the same 64 bits remain indistinguishable.

use othello_core::Position;

/// How a cached score relates to the search window it was produced under.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NodeType {
    /// The true minimax value of the node.
    Exact,
    /// A proven minimum: the search failed high (beta cutoff).
    LowerBound,
    /// A proven maximum: the search failed low.
    UpperBound,
}

#[derive(Clone, Copy, Debug)]
pub struct TtEntry {
    pub key: u64,
    pub score: i32,
    pub best_move: Option<Position>,
    pub depth: u8,
    pub node_type: NodeType,
}

/// Table statistics, advisory only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TableStats {
    pub hits: u64,
    pub misses: u64,
    pub stores: u64,
}

pub struct TranspositionTable {
    slots: Vec<Option<TtEntry>>,
    stats: TableStats,
}

impl TranspositionTable {
    /// A table with `capacity` slots. Capacity 0 disables the table:
    /// every probe misses and every store is dropped, which leaves search
    /// results untouched (the table is a cache, never a correctness
    /// dependency).
    pub fn new(capacity: usize) -> Self {
        TranspositionTable {
            slots: vec![None; capacity],
            stats: TableStats::default(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn slot_index(&self, key: u64) -> usize {
        (key % self.slots.len() as u64) as usize
    }

    /// Look up a fingerprint. Returns the resident entry only when its
    /// stored fingerprint matches exactly; the caller decides whether the
    /// stored depth is sufficient.
    pub fn probe(&mut self, key: u64) -> Option<TtEntry> {
        if self.slots.is_empty() {
            return None;
        }
        let index = self.slot_index(key);
        match self.slots[index] {
            Some(entry) if entry.key == key => {
                self.stats.hits += 1;
                Some(entry)
            }
            _ => {
                self.stats.misses += 1;
                None
            }
        }
    }

    /// Insert a completed search result. Depth-preferred: the incoming
    /// entry replaces the resident one only when searched at least as deep.
    pub fn store(&mut self, entry: TtEntry) {
        if self.slots.is_empty() {
            return;
        }
        let index = self.slot_index(entry.key);
        match self.slots[index] {
            Some(resident) if entry.depth < resident.depth => {}
            _ => {
                self.slots[index] = Some(entry);
                self.stats.stores += 1;
            }
        }
    }

    pub fn stats(&self) -> TableStats {
        self.stats
    }

    /// Drop every entry; the table may be discarded at any time without
    /// affecting correctness, only search time.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.stats = TableStats::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: u64, score: i32, depth: u8) -> TtEntry {
        TtEntry {
            key,
            score,
            best_move: Some(Position::new(2, 3)),
            depth,
            node_type: NodeType::Exact,
        }
    }

    #[test]
    fn test_store_and_probe_round_trip() {
        let mut table = TranspositionTable::new(128);
        table.store(entry(42, 17, 3));

        let found = table.probe(42).unwrap();
        assert_eq!(found.score, 17);
        assert_eq!(found.depth, 3);
        assert_eq!(found.best_move, Some(Position::new(2, 3)));
    }

    #[test]
    fn test_probe_miss_on_empty_slot() {
        let mut table = TranspositionTable::new(128);
        assert!(table.probe(42).is_none());
        assert_eq!(table.stats().misses, 1);
    }

    #[test]
    fn test_colliding_fingerprint_reads_as_miss() {
        let mut table = TranspositionTable::new(128);
        table.store(entry(42, 17, 3));

        // Same slot (42 + 128), different fingerprint.
        assert!(table.probe(42 + 128).is_none());
    }

    #[test]
    fn test_depth_preferred_replacement() {
        let mut table = TranspositionTable::new(128);
        table.store(entry(42, 17, 5));

        // A shallower result for the colliding slot is rejected...
        table.store(entry(42 + 128, 99, 2));
        assert_eq!(table.probe(42).unwrap().score, 17);

        // ...an equal-depth result replaces...
        table.store(entry(42 + 128, 99, 5));
        assert!(table.probe(42).is_none());
        assert_eq!(table.probe(42 + 128).unwrap().score, 99);

        // ...and so does a deeper one.
        table.store(entry(42, 1, 9));
        assert_eq!(table.probe(42).unwrap().depth, 9);
    }

    #[test]
    fn test_zero_capacity_table_is_inert() {
        let mut table = TranspositionTable::new(0);
        table.store(entry(42, 17, 3));
        assert!(table.probe(42).is_none());
        assert_eq!(table.stats().stores, 0);
    }

    #[test]
    fn test_clear_resets_entries_and_stats() {
        let mut table = TranspositionTable::new(16);
        table.store(entry(7, 1, 1));
        table.probe(7);
        table.clear();
        assert!(table.probe(7).is_none());
        assert_eq!(table.stats(), TableStats { hits: 0, misses: 1, stores: 0 });
    }
}
