use super::bitset::Bitset;
use super::error::MineError;
use std::collections::HashMap;

/// One accepted itemset. Transaction bitsets are not retained here; only
/// the current mining level needs them, the rule generator needs supports.
#[derive(Debug, Clone)]
pub struct StoredItemset {
    pub set_bits: Bitset,
    pub support: f64,
    pub size: usize,
}

/// Append-only arena of accepted itemsets across all levels, keyed by bit
/// pattern for O(1) dedup and subset lookup.
#[derive(Debug, Default)]
pub struct ItemsetStore {
    entries: Vec<StoredItemset>,
    index: HashMap<Vec<u64>, usize>,
}

impl ItemsetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit an itemset at the given level. Returns `Ok(true)` when the
    /// pattern is new and `Ok(false)` for a duplicate (the first-seen entry
    /// stays canonical). A popcount that disagrees with `size` indicates a
    /// candidate-generation bug and aborts the run.
    pub fn commit(
        &mut self,
        set_bits: Bitset,
        support: f64,
        size: usize,
    ) -> Result<bool, MineError> {
        let popcount = set_bits.count_ones();
        if popcount != size {
            return Err(MineError::InternalInconsistency {
                detail: format!(
                    "itemset {:?} committed at level {size} but has {popcount} set bits",
                    set_bits.iter_ones().collect::<Vec<_>>()
                ),
            });
        }
        if self.index.contains_key(set_bits.words()) {
            return Ok(false);
        }
        self.index.insert(set_bits.words().to_vec(), self.entries.len());
        self.entries.push(StoredItemset { set_bits, support, size });
        Ok(true)
    }

    pub fn lookup(&self, bits: &Bitset) -> Option<&StoredItemset> {
        self.index.get(bits.words()).map(|&idx| &self.entries[idx])
    }

    pub fn get(&self, idx: usize) -> &StoredItemset {
        &self.entries[idx]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StoredItemset> {
        self.entries.iter()
    }
}
