use super::{BidderName, RoomLabel};
use thiserror::Error;

/// Everything an auction needs before bidding can open: the rent for the
/// house, the rooms up for auction, and the roommates bidding on them.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawAuctionSetup", into = "RawAuctionSetup")
)]
pub struct AuctionSetup {
    total_rent: u64,
    rooms: Vec<RoomLabel>,
    bidders: Vec<BidderName>,
}

/// An error type for the ways in which an auction setup may be invalid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    /// The rent must be a positive whole number
    #[error("the total rent must be greater than zero, got {0}")]
    NonPositiveRent(i64),
    /// At least one room is required
    #[error("at least one room is required")]
    NoRooms,
    /// At least one bidder is required
    #[error("at least one bidder is required")]
    NoBidders,
    /// A room label was empty or whitespace
    #[error("room labels must not be blank")]
    BlankRoomLabel,
    /// A bidder name was empty or whitespace
    #[error("bidder names must not be blank")]
    BlankBidderName,
    /// Two bidders share a name
    #[error("a bidder named {0} is already registered")]
    DuplicateBidder(BidderName),
}

/// Validate a raw rent amount.
pub fn validate_total_rent(value: i64) -> Result<u64, SetupError> {
    u64::try_from(value)
        .ok()
        .filter(|&rent| rent > 0)
        .ok_or(SetupError::NonPositiveRent(value))
}

impl AuctionSetup {
    /// Validate the setup input
    pub fn new<R, B>(
        total_rent: i64,
        rooms: impl IntoIterator<Item = R>,
        bidders: impl IntoIterator<Item = B>,
    ) -> Result<Self, SetupError>
    where
        R: AsRef<str>,
        B: AsRef<str>,
    {
        let total_rent = validate_total_rent(total_rent)?;

        let rooms = rooms
            .into_iter()
            .map(RoomLabel::new)
            .collect::<Result<Vec<_>, _>>()?;
        if rooms.is_empty() {
            return Err(SetupError::NoRooms);
        }

        let mut names = Vec::<BidderName>::new();
        for name in bidders {
            let name = BidderName::new(name)?;
            if names.contains(&name) {
                return Err(SetupError::DuplicateBidder(name));
            }
            names.push(name);
        }
        if names.is_empty() {
            return Err(SetupError::NoBidders);
        }

        Ok(Self {
            total_rent,
            rooms,
            bidders: names,
        })
    }

    /// The rent for the whole house
    pub fn total_rent(&self) -> u64 {
        self.total_rent
    }

    /// The rooms, in the order they will be bid on
    pub fn rooms(&self) -> &[RoomLabel] {
        &self.rooms
    }

    /// The bidders, in the order they will take their turns
    pub fn bidders(&self) -> &[BidderName] {
        &self.bidders
    }
}

// To (de)serialize, we route through a "raw" version of the struct that holds
// primitive values only. Serde handles the raw version and we validate on the
// way in. Rooms and bidders may be given as bare strings or as objects.

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RawAuctionSetup {
    total_rent: i64,
    rooms: Vec<RawRoom>,
    bidders: Vec<RawBidder>,
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
enum RawRoom {
    Label(String),
    Object { label: String },
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
enum RawBidder {
    Name(String),
    Object { name: String },
}

#[cfg(feature = "serde")]
impl TryFrom<RawAuctionSetup> for AuctionSetup {
    type Error = SetupError;

    fn try_from(value: RawAuctionSetup) -> Result<Self, Self::Error> {
        let rooms = value.rooms.into_iter().map(|room| match room {
            RawRoom::Label(label) | RawRoom::Object { label } => label,
        });
        let bidders = value.bidders.into_iter().map(|bidder| match bidder {
            RawBidder::Name(name) | RawBidder::Object { name } => name,
        });
        Self::new(value.total_rent, rooms, bidders)
    }
}

#[cfg(feature = "serde")]
impl From<AuctionSetup> for RawAuctionSetup {
    fn from(value: AuctionSetup) -> Self {
        Self {
            // rents beyond i64::MAX cannot be constructed through `new`
            total_rent: value.total_rent as i64,
            rooms: value
                .rooms
                .into_iter()
                .map(|label| RawRoom::Label(label.into()))
                .collect(),
            bidders: value
                .bidders
                .into_iter()
                .map(|name| RawBidder::Name(name.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_setup() {
        let setup = AuctionSetup::new(3000, ["Master", "Attic"], ["Alice", "Bob"]).unwrap();
        assert_eq!(setup.total_rent(), 3000);
        assert_eq!(setup.rooms().len(), 2);
        assert_eq!(setup.bidders()[1].as_str(), "Bob");
    }

    #[test]
    fn test_rent_must_be_positive() {
        let err = AuctionSetup::new(0, ["Master"], ["Alice"]).unwrap_err();
        assert_eq!(err, SetupError::NonPositiveRent(0));
        let err = AuctionSetup::new(-10, ["Master"], ["Alice"]).unwrap_err();
        assert_eq!(err, SetupError::NonPositiveRent(-10));
    }

    #[test]
    fn test_rooms_and_bidders_required() {
        let none: [&str; 0] = [];
        assert_eq!(
            AuctionSetup::new(100, none, ["Alice"]).unwrap_err(),
            SetupError::NoRooms
        );
        assert_eq!(
            AuctionSetup::new(100, ["Master"], none).unwrap_err(),
            SetupError::NoBidders
        );
    }

    #[test]
    fn test_duplicate_bidders_rejected() {
        let err = AuctionSetup::new(100, ["Master"], ["Alice", " Alice"]).unwrap_err();
        assert_eq!(
            err,
            SetupError::DuplicateBidder(BidderName::new("Alice").unwrap())
        );
    }

    #[test]
    fn test_deserialize_mixed_forms() {
        let setup: AuctionSetup = serde_json::from_str(
            r#"{
                "total_rent": 2400,
                "rooms": ["Master", {"label": "Attic"}],
                "bidders": [{"name": "Alice"}, "Bob"]
            }"#,
        )
        .unwrap();
        assert_eq!(setup.rooms()[1].as_str(), "Attic");
        assert_eq!(setup.bidders()[0].as_str(), "Alice");

        let invalid = serde_json::from_str::<AuctionSetup>(
            r#"{"total_rent": 0, "rooms": ["Master"], "bidders": ["Alice"]}"#,
        );
        assert!(invalid.is_err());
    }
}
