use rent_core::models::{ExceedsWinningBid, Reconciliation, RoomAdjustment, RoomId, RoomOutcome};
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;
use tracing::{Level, event};

/// How many decimal places amounts are presented with.
///
/// Computation is always carried out at full precision; these only apply
/// when results are rounded for presentation, and when deciding whether a
/// presented price exceeds a winning bid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Precision {
    /// Decimal places for prices (fair shares, adjusted prices, totals)
    pub price_decimals: u32,
    /// Decimal places for the multiplier
    pub multiplier_decimals: u32,
}

impl Default for Precision {
    fn default() -> Self {
        Self {
            price_decimals: 2,
            multiplier_decimals: 3,
        }
    }
}

impl Precision {
    /// Round a price, halves away from zero
    pub fn price(&self, value: Decimal) -> Decimal {
        value.round_dp_with_strategy(self.price_decimals, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Round a multiplier, halves away from zero
    pub fn multiplier(&self, value: Decimal) -> Decimal {
        value.round_dp_with_strategy(
            self.multiplier_decimals,
            RoundingStrategy::MidpointAwayFromZero,
        )
    }
}

/// The ways reconciliation can fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    /// There is nothing to reconcile
    #[error("there are no resolved rooms to reconcile")]
    NoRooms,
    /// Every bid was zero, so no multiplier can scale the rooms up to the rent
    #[error("the fair shares sum to zero, so no multiplier can reach the total rent of {total_rent}")]
    ZeroSum {
        /// The rent that could not be reached
        total_rent: u64,
    },
}

/// Scales the rooms' fair shares by a single multiplier so they add up to
/// the total rent.
#[derive(Clone, Debug, Default)]
pub struct Reconciler {
    precision: Precision,
}

impl Reconciler {
    /// Create a reconciler that judges warnings at the given precision
    pub fn new(precision: Precision) -> Self {
        Self { precision }
    }

    /// The precision prices are judged at
    pub fn precision(&self) -> &Precision {
        &self.precision
    }

    /// Compute the multiplier and the adjusted price of every room.
    ///
    /// Prices and the multiplier are multiplied at full precision. A room is
    /// flagged when its adjusted price, rounded to the price precision,
    /// exceeds the winning bid. Flags never cause a failure.
    pub fn reconcile<'a>(
        &self,
        rooms: impl IntoIterator<Item = (RoomId, &'a RoomOutcome)>,
        total_rent: u64,
    ) -> Result<Reconciliation, ReconcileError> {
        let rooms = rooms.into_iter().collect::<Vec<_>>();
        if rooms.is_empty() {
            return Err(ReconcileError::NoRooms);
        }

        let sum_of_prices = rooms
            .iter()
            .map(|(_, outcome)| outcome.fair_share)
            .sum::<Decimal>();
        if sum_of_prices.is_zero() {
            return Err(ReconcileError::ZeroSum { total_rent });
        }

        let rent = Decimal::from(total_rent);
        let multiplier = rent / sum_of_prices;
        let shortfall_or_excess = rent - sum_of_prices;

        event!(
            Level::DEBUG,
            %sum_of_prices,
            %multiplier,
            %shortfall_or_excess,
            "reconciling fair shares against total rent"
        );

        let rooms = rooms
            .into_iter()
            .map(|(room, outcome)| {
                let adjusted_price = outcome.fair_share * multiplier;
                let presented = self.precision.price(adjusted_price);
                let winning_bid = outcome.winner.amount;

                let warning = (presented > Decimal::from(winning_bid)).then(|| {
                    event!(
                        Level::WARN,
                        %room,
                        %presented,
                        winning_bid,
                        "adjusted price exceeds the winning bid"
                    );
                    ExceedsWinningBid {
                        room,
                        adjusted_price: presented,
                        winning_bid,
                    }
                });

                (
                    room,
                    RoomAdjustment {
                        fair_share: outcome.fair_share,
                        adjusted_price,
                        warning,
                    },
                )
            })
            .collect();

        Ok(Reconciliation {
            total_rent,
            sum_of_prices,
            multiplier,
            shortfall_or_excess,
            rooms,
        })
    }
}
