const WORD_BITS: usize = 64;

/// Fixed-capacity bitset backed by `u64` words.
///
/// Serves double duty: item patterns (one bit per item rank) and
/// transaction ownership (one bit per transaction id).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bitset {
    words: Vec<u64>,
    nbits: usize,
}

impl Bitset {
    pub fn new(nbits: usize) -> Self {
        Self {
            words: vec![0; nbits.div_ceil(WORD_BITS)],
            nbits,
        }
    }

    /// A bitset with exactly one bit set.
    pub fn singleton(nbits: usize, bit: usize) -> Self {
        let mut bits = Self::new(nbits);
        bits.set(bit);
        bits
    }

    pub fn capacity(&self) -> usize {
        self.nbits
    }

    pub fn set(&mut self, bit: usize) {
        debug_assert!(bit < self.nbits);
        self.words[bit / WORD_BITS] |= 1u64 << (bit % WORD_BITS);
    }

    pub fn contains(&self, bit: usize) -> bool {
        debug_assert!(bit < self.nbits);
        self.words[bit / WORD_BITS] & (1u64 << (bit % WORD_BITS)) != 0
    }

    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Bitwise OR. Both operands must share the same capacity.
    pub fn union(&self, other: &Self) -> Self {
        debug_assert_eq!(self.nbits, other.nbits);
        Self {
            words: self
                .words
                .iter()
                .zip(&other.words)
                .map(|(a, b)| a | b)
                .collect(),
            nbits: self.nbits,
        }
    }

    /// Bitwise AND. Both operands must share the same capacity.
    pub fn intersection(&self, other: &Self) -> Self {
        debug_assert_eq!(self.nbits, other.nbits);
        Self {
            words: self
                .words
                .iter()
                .zip(&other.words)
                .map(|(a, b)| a & b)
                .collect(),
            nbits: self.nbits,
        }
    }

    /// Popcount of the intersection, without allocating it.
    pub fn intersection_len(&self, other: &Self) -> usize {
        debug_assert_eq!(self.nbits, other.nbits);
        self.words
            .iter()
            .zip(&other.words)
            .map(|(a, b)| (a & b).count_ones() as usize)
            .sum()
    }

    /// The backing words, used as a hash-map key for dedup and lookup.
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    /// Positions of set bits in ascending order.
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(wi, &word)| {
            let mut rest = word;
            std::iter::from_fn(move || {
                if rest == 0 {
                    return None;
                }
                let bit = rest.trailing_zeros() as usize;
                rest &= rest - 1;
                Some(wi * WORD_BITS + bit)
            })
        })
    }
}
