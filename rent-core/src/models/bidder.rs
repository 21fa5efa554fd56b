use super::{BidderId, SetupError};
use std::fmt;

/// The name a roommate is known by for the duration of an auction.
///
/// Names are trimmed and must not be blank. Uniqueness is a property of the
/// auction, not of the name, and is checked on registration.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct BidderName(String);

impl BidderName {
    /// Validate and wrap a name
    pub fn new(name: impl AsRef<str>) -> Result<Self, SetupError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            Err(SetupError::BlankBidderName)
        } else {
            Ok(Self(name.to_owned()))
        }
    }

    /// The name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BidderName {
    type Error = SetupError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BidderName> for String {
    fn from(value: BidderName) -> Self {
        value.0
    }
}

impl fmt::Display for BidderName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A roommate taking part in the auction.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Bidder {
    /// The bidder's position in registration order
    pub id: BidderId,
    /// The bidder's name
    pub name: BidderName,
}

impl fmt::Display for Bidder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.name.fmt(f)
    }
}
