use serde::{Deserialize, Serialize};

/// One of the two independently sized sleeves of the strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Long,
    Short,
}

impl Side {
    /// Both sides, in the order they are evaluated.
    pub const ALL: [Side; 2] = [Side::Long, Side::Short];

    /// Position of this side's confidence score on the signal axis of a
    /// prediction matrix.
    pub fn signal_index(&self) -> usize {
        match self {
            Side::Long => 0,
            Side::Short => 1,
        }
    }

    /// Sign applied to asset returns: a short position profits when the asset falls.
    pub fn direction(&self) -> f64 {
        match self {
            Side::Long => 1.0,
            Side::Short => -1.0,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Long => write!(f, "long"),
            Side::Short => write!(f, "short"),
        }
    }
}
