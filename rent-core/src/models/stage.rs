use std::fmt;

/// The stages an auction moves through, strictly in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Stage {
    /// Rent, rooms and bidders are being registered
    Setup,
    /// Bidders are taking their turns
    CollectingBids,
    /// Each room's winner and fair share are being determined
    Resolving,
    /// The fair shares are being scaled to the total rent
    Reconciling,
    /// The results are ready to be reported
    Reporting,
    /// The report has been produced
    Done,
}

impl Stage {
    /// The stage that follows this one, if any
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Setup => Some(Self::CollectingBids),
            Self::CollectingBids => Some(Self::Resolving),
            Self::Resolving => Some(Self::Reconciling),
            Self::Reconciling => Some(Self::Reporting),
            Self::Reporting => Some(Self::Done),
            Self::Done => None,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Setup => "setup",
            Self::CollectingBids => "collecting bids",
            Self::Resolving => "resolving",
            Self::Reconciling => "reconciling",
            Self::Reporting => "reporting",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stages_only_move_forward() {
        let mut stage = Stage::Setup;
        let mut seen = vec![stage];
        while let Some(next) = stage.next() {
            assert!(next > stage);
            stage = next;
            seen.push(stage);
        }
        assert_eq!(seen.len(), 6);
        assert_eq!(stage, Stage::Done);
    }
}
