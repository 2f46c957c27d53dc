use super::bitset::Bitset;
use super::encode::EncodedTransactions;
use super::error::MineError;
use super::rules::{derive_rules, Rule};
use super::store::ItemsetStore;
use rayon::prelude::*;
use std::collections::HashSet;

/// Thresholds for a mining run, validated once at entry.
#[derive(Debug, Clone, Copy)]
pub struct MiningParams {
    pub min_support: f64,
    pub min_confidence: f64,
}

impl MiningParams {
    pub fn validate(&self) -> Result<(), MineError> {
        if !(self.min_support > 0.0 && self.min_support <= 1.0) {
            return Err(MineError::InvalidThreshold {
                name: "min_support",
                value: self.min_support,
            });
        }
        if !(self.min_confidence > 0.0 && self.min_confidence <= 1.0) {
            return Err(MineError::InvalidThreshold {
                name: "min_confidence",
                value: self.min_confidence,
            });
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct MiningOutput {
    pub store: ItemsetStore,
    pub rules: Vec<Rule>,
}

/// An itemset alive at the current level. Transaction bitsets are kept only
/// here; they are dropped once the level has seeded its successor.
struct LevelItemset {
    set_bits: Bitset,
    tid_bits: Bitset,
}

/// Full mining run: validate thresholds, mine itemsets level by level, then
/// derive and score rules from the finished store.
pub fn mine(
    encoded: &EncodedTransactions,
    params: &MiningParams,
) -> Result<MiningOutput, MineError> {
    params.validate()?;
    let store = mine_itemsets(encoded, params.min_support)?;
    let rules = derive_rules(&store, params.min_confidence)?;
    Ok(MiningOutput { store, rules })
}

/// Level-wise breadth-first itemset search with intersection-based support
/// counting. Empty input yields an empty store, not an error.
pub fn mine_itemsets(
    encoded: &EncodedTransactions,
    min_support: f64,
) -> Result<ItemsetStore, MineError> {
    let num_transactions = encoded.num_transactions();
    let num_items = encoded.num_items();
    let mut store = ItemsetStore::new();

    if num_transactions == 0 || num_items == 0 {
        return Ok(store);
    }

    // Level 1 comes straight from the encoder: one itemset per surviving
    // item, already at or above min_support by construction.
    let mut level: Vec<LevelItemset> = (0..num_items)
        .map(|rank| LevelItemset {
            set_bits: Bitset::singleton(num_items, rank),
            tid_bits: encoded.tid_bits(rank).clone(),
        })
        .collect();
    for entry in &level {
        let support = entry.tid_bits.count_ones() as f64 / num_transactions as f64;
        store.commit(entry.set_bits.clone(), support, 1)?;
    }

    let mut k = 1;
    while !level.is_empty() {
        tracing::debug!(level = k, itemsets = level.len(), "level committed");

        // Every unordered pair (i, j), i < j, of the current level is an
        // independent candidate; shard on i and merge sequentially.
        let candidates: Vec<LevelItemset> = level
            .par_iter()
            .enumerate()
            .flat_map_iter(|(i, a)| {
                level[i + 1..]
                    .iter()
                    .filter_map(|b| {
                        let union = a.set_bits.union(&b.set_bits);
                        // A and B must differ by exactly one item, otherwise
                        // the union is not a legitimate (k+1)-extension.
                        if union.count_ones() != k + 1 {
                            return None;
                        }
                        let tids = a.tid_bits.intersection(&b.tid_bits);
                        let support =
                            tids.count_ones() as f64 / num_transactions as f64;
                        if support < min_support {
                            return None;
                        }
                        Some(LevelItemset { set_bits: union, tid_bits: tids })
                    })
                    .collect::<Vec<_>>()
                    .into_iter()
            })
            .collect();

        // Distinct pairs can reach the same union; their tid intersections
        // are identical, so keeping the first-seen candidate loses nothing.
        let mut seen: HashSet<Vec<u64>> = HashSet::new();
        let mut next = Vec::new();
        for candidate in candidates {
            if !seen.insert(candidate.set_bits.words().to_vec()) {
                continue;
            }
            let support =
                candidate.tid_bits.count_ones() as f64 / num_transactions as f64;
            store.commit(candidate.set_bits.clone(), support, k + 1)?;
            next.push(candidate);
        }

        level = next;
        k += 1;
    }

    Ok(store)
}
