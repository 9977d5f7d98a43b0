use crate::enums::Side;
use serde::{Deserialize, Serialize};

/// Counts of periods in which a sleeve selected no assets and stayed flat.
///
/// An empty selection is not an error: the period simply contributes a zero
/// return for that side. These counts make the condition visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionDiagnostics {
    pub n_periods: usize,
    pub degenerate_long: usize,
    pub degenerate_short: usize,
    /// Periods where both sleeves were empty.
    pub flat_periods: usize,
}

impl SelectionDiagnostics {
    /// Records one period given how many assets each side selected.
    pub fn record(&mut self, long_selected: usize, short_selected: usize) {
        self.n_periods += 1;
        if long_selected == 0 {
            self.degenerate_long += 1;
        }
        if short_selected == 0 {
            self.degenerate_short += 1;
        }
        if long_selected == 0 && short_selected == 0 {
            self.flat_periods += 1;
        }
    }

    pub fn degenerate(&self, side: Side) -> usize {
        match side {
            Side::Long => self.degenerate_long,
            Side::Short => self.degenerate_short,
        }
    }

    /// True when the side never selected anything over a non-empty run.
    pub fn always_flat(&self, side: Side) -> bool {
        self.n_periods > 0 && self.degenerate(side) == self.n_periods
    }
}
