use super::bitset::Bitset;
use super::error::MineError;
use super::store::ItemsetStore;

/// Confidence values closer to 1 than this are treated as exactly 1 when
/// computing conviction, which would otherwise divide by zero.
const CONFIDENCE_ONE_EPS: f64 = 1e-10;

/// An association rule `pre ⇒ post` over item ranks. Ranks map back to
/// caller-visible item ids at the binding layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub pre: Vec<usize>,
    pub post: Vec<usize>,
    pub support: f64,
    pub confidence: f64,
    pub lift: f64,
    pub conviction: f64,
}

/// Enumerate every antecedent/consequent split of every stored itemset of
/// size >= 2 and keep the splits whose confidence meets `min_confidence`.
///
/// Rules come out grouped by source itemset in store commit order, with
/// splits ordered by antecedent mask; the whole sequence is deterministic
/// for a given input.
pub fn derive_rules(
    store: &ItemsetStore,
    min_confidence: f64,
) -> Result<Vec<Rule>, MineError> {
    let mut rules = Vec::new();

    for entry in store.iter().filter(|entry| entry.size >= 2) {
        let members: Vec<usize> = entry.set_bits.iter_ones().collect();
        let k = members.len();
        let capacity = entry.set_bits.capacity();

        // Masks 1..2^k-1 over the member positions enumerate the 2^k - 2
        // ordered splits; both sides stay nonempty.
        for mask in 1..((1usize << k) - 1) {
            let mut pre_bits = Bitset::new(capacity);
            let mut post_bits = Bitset::new(capacity);
            let mut pre = Vec::new();
            let mut post = Vec::new();
            for (pos, &rank) in members.iter().enumerate() {
                if mask & (1 << pos) != 0 {
                    pre_bits.set(rank);
                    pre.push(rank);
                } else {
                    post_bits.set(rank);
                    post.push(rank);
                }
            }

            // Anti-monotonicity guarantees both sides were mined at their
            // own level; a miss means the store is corrupt.
            let pre_entry = store.lookup(&pre_bits).ok_or_else(|| {
                MineError::InternalInconsistency {
                    detail: format!(
                        "antecedent {pre:?} of mined itemset {members:?} missing from store"
                    ),
                }
            })?;
            let post_entry = store.lookup(&post_bits).ok_or_else(|| {
                MineError::InternalInconsistency {
                    detail: format!(
                        "consequent {post:?} of mined itemset {members:?} missing from store"
                    ),
                }
            })?;

            let confidence = entry.support / pre_entry.support;
            if confidence < min_confidence {
                continue;
            }
            let lift = entry.support / (pre_entry.support * post_entry.support);
            let conviction = if (confidence - 1.0).abs() < CONFIDENCE_ONE_EPS {
                0.0
            } else {
                (1.0 - post_entry.support) / (1.0 - confidence)
            };

            rules.push(Rule {
                pre,
                post,
                support: entry.support,
                confidence,
                lift,
                conviction,
            });
        }
    }

    Ok(rules)
}
