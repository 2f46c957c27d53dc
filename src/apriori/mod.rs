pub mod bitset;
pub mod encode;
pub mod error;
pub mod mining;
pub mod rules;
pub mod store;


pub use bitset::Bitset;
pub use encode::EncodedTransactions;
pub use error::MineError;
pub use mining::{mine, mine_itemsets, MiningOutput, MiningParams};
pub use rules::{derive_rules, Rule};
pub use store::{ItemsetStore, StoredItemset};
