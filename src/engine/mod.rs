// ============================================================================
// Engine Module
// Competing literal grammars and the lock-step partition selector
// ============================================================================

mod radix_prefix;
mod radix_suffix;
mod real;
mod special;

pub mod partition;
pub mod selector;

pub use partition::{LiteralKind, Partition, SpecialValue};
pub use radix_prefix::RadixPrefixPartition;
pub use radix_suffix::RadixSuffixPartition;
pub use real::RealPartition;
pub use selector::{PartitionSelector, Selection};
pub use special::SpecialPartition;
