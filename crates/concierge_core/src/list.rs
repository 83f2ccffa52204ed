use crate::state::{Category, Reservation, ReservationStatus};

/// Per-category totals over the full collection. `all` counts every record,
/// including rows with no recognized status; the named counters only count
/// rows carrying that status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CategoryCounts {
    pub all: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl CategoryCounts {
    pub fn tally(records: &[Reservation]) -> Self {
        let mut counts = Self {
            all: records.len(),
            ..Self::default()
        };
        for record in records {
            match record.status {
                Some(ReservationStatus::InProgress) => counts.in_progress += 1,
                Some(ReservationStatus::Completed) => counts.completed += 1,
                None => {}
            }
        }
        counts
    }

    pub fn get(&self, category: Category) -> usize {
        match category {
            Category::All => self.all,
            Category::Status(ReservationStatus::InProgress) => self.in_progress,
            Category::Status(ReservationStatus::Completed) => self.completed,
        }
    }
}

/// Output of one derivation pass: the rows to show for the active category
/// and the counts for every tab. Counts always describe the full collection,
/// not the filtered view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListDerivation {
    pub visible: Vec<Reservation>,
    pub counts: CategoryCounts,
}

/// Derives the visible rows and tab counts for a category selection.
///
/// Order-preserving and pure: the input is never mutated and identical
/// inputs produce structurally identical output.
pub fn derive_view(records: &[Reservation], selection: Category) -> ListDerivation {
    let visible = records
        .iter()
        .filter(|record| selection.matches(record.status))
        .cloned()
        .collect();
    ListDerivation {
        visible,
        counts: CategoryCounts::tally(records),
    }
}
