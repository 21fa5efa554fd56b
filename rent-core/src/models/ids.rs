// Bidders and rooms are identified by their registration index within an
// auction. The newtypes keep the two from being mixed up.

macro_rules! index_wrapper {
    ($struct:ident, $what:literal) => {
        #[doc = concat!("The registration index of a ", $what, " within an auction")]
        #[derive(Debug, Hash, PartialEq, Eq, Clone, Copy, PartialOrd, Ord)]
        #[cfg_attr(
            feature = "serde",
            derive(serde::Serialize, serde::Deserialize),
            serde(transparent)
        )]
        #[repr(transparent)]
        pub struct $struct(usize);

        impl $struct {
            /// The zero-based position in registration order
            pub fn index(self) -> usize {
                self.0
            }

            /// The one-based position, as presented to people
            pub fn number(self) -> usize {
                self.0 + 1
            }
        }

        impl From<usize> for $struct {
            fn from(value: usize) -> Self {
                Self(value)
            }
        }

        impl From<$struct> for usize {
            fn from(value: $struct) -> Self {
                value.0
            }
        }

        impl std::fmt::Display for $struct {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{} #{}", $what, self.number())
            }
        }
    };
}

index_wrapper!(BidderId, "bidder");
index_wrapper!(RoomId, "room");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbering_is_one_based() {
        let room = RoomId::from(0);
        assert_eq!(room.index(), 0);
        assert_eq!(room.number(), 1);
        assert_eq!(room.to_string(), "room #1");
        assert_eq!(BidderId::from(2).to_string(), "bidder #3");
    }
}
