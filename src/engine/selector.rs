// ============================================================================
// Partition Selector
// Runs every grammar in lock-step and keeps the longest unambiguous match
// ============================================================================

use arrayvec::ArrayVec;

use crate::domain::NumberLocale;
use crate::engine::partition::Partition;

/// Outcome of one selection run.
///
/// `winner` is the candidate that got furthest before rejecting, among
/// those that recognized at least one character; `None` means no grammar
/// recognized anything at all.
#[derive(Debug)]
pub struct Selection {
    pub winner: Option<Partition>,
    /// Whether any candidate matched the complete input
    pub any_fully_valid: bool,
}

/// Feeds all four grammars the same text one character at a time.
///
/// Greedy longest-match selection: the candidate with the largest
/// comparison index wins, ties broken by declaration order. This lets
/// `0x1F` go to the hex-prefix grammar even though the real grammar also
/// recognizes its leading `0`, and lets `123abc` surface `123` as a value
/// with `abc` reported as trailing text.
pub struct PartitionSelector {
    partitions: ArrayVec<Partition, 4>,
}

impl PartitionSelector {
    pub fn new(locale: &NumberLocale) -> Self {
        Self {
            partitions: ArrayVec::from(Partition::candidates(locale)),
        }
    }

    pub fn run(mut self, text: &str) -> Selection {
        for (index, ch) in text.char_indices() {
            for partition in &mut self.partitions {
                partition.advance(index, ch);
            }
        }
        for partition in &mut self.partitions {
            partition.finalize(text.len());
        }

        let mut winner: Option<usize> = None;
        for (index, partition) in self.partitions.iter().enumerate() {
            let reach = partition.comparison_index();
            if reach == 0 {
                continue;
            }
            let best = winner.map(|w| self.partitions[w].comparison_index());
            if best.map_or(true, |b| reach > b) {
                winner = Some(index);
            }
        }

        let any_fully_valid = self.partitions.iter().any(Partition::is_fully_valid);
        if let Some(index) = winner {
            let chosen = &self.partitions[index];
            tracing::debug!(
                kind = ?chosen.kind(),
                comparison_index = chosen.comparison_index(),
                fully_valid = chosen.is_fully_valid(),
                "literal partition selected"
            );
        }

        Selection {
            winner: winner.map(|index| self.partitions.remove(index)),
            any_fully_valid,
        }
    }
}
