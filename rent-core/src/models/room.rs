use super::{BidLedger, RoomId, RoomOutcome, SetupError};
use std::fmt;

/// The nickname given to a bedroom, e.g. "Master" or "Attic".
///
/// Labels are trimmed and must not be blank. Two rooms may share a label;
/// they are still told apart by their number.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct RoomLabel(String);

impl RoomLabel {
    /// Validate and wrap a label
    pub fn new(label: impl AsRef<str>) -> Result<Self, SetupError> {
        let label = label.as_ref().trim();
        if label.is_empty() {
            Err(SetupError::BlankRoomLabel)
        } else {
            Ok(Self(label.to_owned()))
        }
    }

    /// The label as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RoomLabel {
    type Error = SetupError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RoomLabel> for String {
    fn from(value: RoomLabel) -> Self {
        value.0
    }
}

impl fmt::Display for RoomLabel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A bedroom up for auction, together with the bids placed on it.
///
/// Once the auction has resolved the room, its outcome is cached here as well.
#[derive(Debug, Clone)]
pub struct Room {
    id: RoomId,
    label: RoomLabel,
    ledger: BidLedger,
    outcome: Option<RoomOutcome>,
}

impl Room {
    /// Create a room with an empty ledger
    pub fn new(id: RoomId, label: RoomLabel) -> Self {
        Self {
            id,
            label,
            ledger: BidLedger::default(),
            outcome: None,
        }
    }

    /// The room's position in registration order
    pub fn id(&self) -> RoomId {
        self.id
    }

    /// The label the room was registered with
    pub fn label(&self) -> &RoomLabel {
        &self.label
    }

    /// The name the room is presented under, e.g. "Bedroom #2: Attic"
    pub fn nickname(&self) -> String {
        self.to_string()
    }

    /// The bids placed on this room
    pub fn ledger(&self) -> &BidLedger {
        &self.ledger
    }

    /// Mutable access to the bids, for submitting new ones
    pub fn ledger_mut(&mut self) -> &mut BidLedger {
        &mut self.ledger
    }

    /// The resolved outcome, if the room has been resolved
    pub fn outcome(&self) -> Option<&RoomOutcome> {
        self.outcome.as_ref()
    }

    /// Cache the resolved outcome on the room
    pub fn set_outcome(&mut self, outcome: RoomOutcome) {
        self.outcome = Some(outcome);
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Bedroom #{}: {}", self.id.number(), self.label)
    }
}
