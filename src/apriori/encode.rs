use super::bitset::Bitset;
use ndarray::{ArrayView2, Axis};

/// Output of the item encoder: surviving items re-expressed as dense ranks
/// ordered by descending transaction count, each with the bitset of
/// transactions that contain it.
///
/// Read-only once built; the miner and the bindings only ever borrow it.
#[derive(Debug, Clone)]
pub struct EncodedTransactions {
    num_transactions: usize,
    /// rank -> original item id
    labels: Vec<usize>,
    /// rank -> number of owning transactions
    counts: Vec<usize>,
    /// rank -> owning transactions
    tid_bits: Vec<Bitset>,
}

impl EncodedTransactions {
    /// Encode a dense binary transaction matrix (rows = transactions,
    /// columns = items, nonzero = present). Items whose transaction
    /// fraction falls below `min_support` are dropped; survivors are
    /// ranked by descending count, ties broken by ascending column id.
    pub fn from_matrix(transactions: ArrayView2<i32>, min_support: f64) -> Self {
        let num_transactions = transactions.shape()[0];

        let item_counts = transactions.map_axis(Axis(0), |col| {
            col.iter().filter(|&&v| v != 0).count()
        });

        let mut survivors: Vec<(usize, usize)> = item_counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| {
                num_transactions > 0
                    && count as f64 / num_transactions as f64 >= min_support
            })
            .map(|(item, &count)| (item, count))
            .collect();
        survivors.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        let labels: Vec<usize> = survivors.iter().map(|&(item, _)| item).collect();
        let counts: Vec<usize> = survivors.iter().map(|&(_, count)| count).collect();

        let mut tid_bits: Vec<Bitset> =
            (0..labels.len()).map(|_| Bitset::new(num_transactions)).collect();
        for tid in 0..num_transactions {
            for (rank, &item) in labels.iter().enumerate() {
                if transactions[[tid, item]] != 0 {
                    tid_bits[rank].set(tid);
                }
            }
        }

        Self { num_transactions, labels, counts, tid_bits }
    }

    /// Encode a list of transactions given as sets of item ids. Item ids
    /// may be sparse; ranks are dense regardless. Duplicated ids within a
    /// transaction count once.
    pub fn from_transactions(transactions: &[Vec<usize>], min_support: f64) -> Self {
        let num_transactions = transactions.len();
        let num_items = transactions
            .iter()
            .flat_map(|tx| tx.iter().copied())
            .max()
            .map_or(0, |m| m + 1);

        let mut item_counts = vec![0usize; num_items];
        for tx in transactions {
            let mut seen: Vec<usize> = tx.clone();
            seen.sort_unstable();
            seen.dedup();
            for &item in &seen {
                item_counts[item] += 1;
            }
        }

        let mut survivors: Vec<(usize, usize)> = item_counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| {
                count > 0 && count as f64 / num_transactions as f64 >= min_support
            })
            .map(|(item, &count)| (item, count))
            .collect();
        survivors.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        let labels: Vec<usize> = survivors.iter().map(|&(item, _)| item).collect();
        let counts: Vec<usize> = survivors.iter().map(|&(_, count)| count).collect();

        let mut rank_of = vec![usize::MAX; num_items];
        for (rank, &item) in labels.iter().enumerate() {
            rank_of[item] = rank;
        }

        let mut tid_bits: Vec<Bitset> =
            (0..labels.len()).map(|_| Bitset::new(num_transactions)).collect();
        for (tid, tx) in transactions.iter().enumerate() {
            for &item in tx {
                let rank = rank_of[item];
                if rank != usize::MAX {
                    tid_bits[rank].set(tid);
                }
            }
        }

        Self { num_transactions, labels, counts, tid_bits }
    }

    pub fn num_transactions(&self) -> usize {
        self.num_transactions
    }

    /// Number of surviving items; ranks are `0..num_items()`.
    pub fn num_items(&self) -> usize {
        self.labels.len()
    }

    /// Original item id for a rank.
    pub fn label(&self, rank: usize) -> usize {
        self.labels[rank]
    }

    /// Transaction count for a rank.
    pub fn count(&self, rank: usize) -> usize {
        self.counts[rank]
    }

    /// Owning transactions for a rank.
    pub fn tid_bits(&self, rank: usize) -> &Bitset {
        &self.tid_bits[rank]
    }
}
