//! aprio: level-wise (Apriori) frequent itemset mining with bitset-based
//! support counting, plus association rule derivation and scoring.
//!
//! The algorithm lives in [`apriori`] and is pure Rust; the optional
//! `python` feature adds a numpy-based extension module on top of it.

pub mod apriori;

pub use apriori::{
    derive_rules, mine, mine_itemsets, Bitset, EncodedTransactions, ItemsetStore,
    MineError, MiningOutput, MiningParams, Rule, StoredItemset,
};

#[cfg(feature = "python")]
mod python {
    use crate::apriori::{mine, mine_itemsets, EncodedTransactions, MineError, MiningParams};
    use numpy::ndarray::Array2;
    use numpy::{IntoPyArray, PyArray2, PyReadonlyArray2};
    use pyo3::{pymodule, types::PyModule, Bound, PyErr, PyResult, Python};

    fn to_py_err(err: MineError) -> PyErr {
        match err {
            MineError::InvalidThreshold { .. } => {
                pyo3::exceptions::PyValueError::new_err(err.to_string())
            }
            MineError::InternalInconsistency { .. } => {
                pyo3::exceptions::PyRuntimeError::new_err(err.to_string())
            }
        }
    }

    /// Group stored itemsets by size into one (num_itemsets, size) matrix
    /// per level, reporting original matrix column ids in ascending order.
    fn levels_to_arrays<'py>(
        py: Python<'py>,
        store: &crate::apriori::ItemsetStore,
        encoded: &EncodedTransactions,
    ) -> PyResult<Vec<Bound<'py, PyArray2<usize>>>> {
        let max_size = store.iter().map(|entry| entry.size).max().unwrap_or(0);
        let mut result = Vec::new();

        for size in 1..=max_size {
            let itemsets: Vec<Vec<usize>> = store
                .iter()
                .filter(|entry| entry.size == size)
                .map(|entry| {
                    let mut labels: Vec<usize> = entry
                        .set_bits
                        .iter_ones()
                        .map(|rank| encoded.label(rank))
                        .collect();
                    labels.sort_unstable();
                    labels
                })
                .collect();
            if itemsets.is_empty() {
                continue;
            }

            let num_itemsets = itemsets.len();
            let mut data = vec![0usize; num_itemsets * size];
            for (i, itemset) in itemsets.iter().enumerate() {
                data[i * size..(i + 1) * size].copy_from_slice(itemset);
            }

            let array = Array2::from_shape_vec((num_itemsets, size), data)
                .map_err(|_| pyo3::exceptions::PyValueError::new_err("Failed to create array"))?;
            result.push(array.into_pyarray(py));
        }

        Ok(result)
    }

    #[pymodule]
    fn aprio<'py>(m: &Bound<'py, PyModule>) -> PyResult<()> {
        #[pyfn(m)]
        #[pyo3(name = "apriori")]
        fn apriori_py<'py>(
            py: Python<'py>,
            transactions: PyReadonlyArray2<'py, i32>,
            min_support: f64,
        ) -> PyResult<Vec<Bound<'py, PyArray2<usize>>>> {
            let params = MiningParams { min_support, min_confidence: 1.0 };
            params.validate().map_err(to_py_err)?;

            let encoded = EncodedTransactions::from_matrix(transactions.as_array(), min_support);
            let store = mine_itemsets(&encoded, min_support).map_err(to_py_err)?;
            levels_to_arrays(py, &store, &encoded)
        }

        #[pyfn(m)]
        #[pyo3(name = "association_rules")]
        #[allow(clippy::type_complexity)]
        fn association_rules_py(
            transactions: PyReadonlyArray2<'_, i32>,
            min_support: f64,
            min_confidence: f64,
        ) -> PyResult<Vec<(Vec<usize>, Vec<usize>, f64, f64, f64, f64)>> {
            let params = MiningParams { min_support, min_confidence };
            params.validate().map_err(to_py_err)?;

            let encoded = EncodedTransactions::from_matrix(transactions.as_array(), min_support);
            let output = mine(&encoded, &params).map_err(to_py_err)?;

            Ok(output
                .rules
                .into_iter()
                .map(|rule| {
                    let mut pre: Vec<usize> =
                        rule.pre.iter().map(|&rank| encoded.label(rank)).collect();
                    let mut post: Vec<usize> =
                        rule.post.iter().map(|&rank| encoded.label(rank)).collect();
                    pre.sort_unstable();
                    post.sort_unstable();
                    (pre, post, rule.support, rule.confidence, rule.lift, rule.conviction)
                })
                .collect())
        }

        Ok(())
    }
}
