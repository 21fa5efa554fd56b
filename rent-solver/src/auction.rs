use crate::{Precision, ReconcileError, Reconciler, ResolveError, build_report, resolve};
use rent_core::{
    models::{
        AuctionReport, AuctionSetup, Bid, BidError, Bidder, BidderId, BidderName, Reconciliation,
        Room, RoomId, RoomLabel, SetupError, Stage, validate_total_rent,
    },
    ports::BidSource,
};
use thiserror::Error;
use tracing::{Level, event};

/// The ways an auction stage can fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuctionError {
    /// The rent, a room or a bidder was invalid
    #[error("invalid setup: {0}")]
    InvalidSetup(#[from] SetupError),
    /// Bidding needs at least one room and one bidder
    #[error(
        "bidding needs at least one room and one bidder, but {rooms} rooms and {bidders} bidders are registered"
    )]
    IncompleteSetup {
        /// The number of rooms registered
        rooms: usize,
        /// The number of bidders registered
        bidders: usize,
    },
    /// The operation belongs to a different stage
    #[error("this step belongs to the {expected} stage, but the auction is in the {actual} stage")]
    WrongStage {
        /// The stage the operation requires
        expected: Stage,
        /// The stage the auction is in
        actual: Stage,
    },
    /// Some bidders have not bid on some rooms
    #[error("{} bids are still missing", .0.len())]
    MissingBids(Vec<(BidderId, RoomId)>),
    /// Some rooms could not be resolved; the others keep their outcomes
    #[error("{} rooms could not be resolved", .0.len())]
    Unresolved(Vec<(RoomId, ResolveError)>),
    /// The fair shares could not be reconciled against the rent
    #[error("reconciliation failed: {0}")]
    Reconcile(#[from] ReconcileError),
}

/// An error while collecting bids from a [`BidSource`].
#[derive(Error, Debug)]
pub enum CollectError<E: std::error::Error + 'static> {
    /// The source itself failed, e.g. its input was closed
    #[error("the bid source failed: {0}")]
    Source(#[source] E),
    /// The auction refused to move on
    #[error(transparent)]
    Auction(#[from] AuctionError),
}

/// A sealed-bid room auction for a shared house.
///
/// The auction moves strictly forward through its stages:
/// `Setup → CollectingBids → Resolving → Reconciling → Reporting → Done`.
/// Each operation belongs to one stage and fails with `WrongStage` anywhere
/// else.
#[derive(Debug, Clone)]
pub struct Auction {
    stage: Stage,
    total_rent: u64,
    rooms: Vec<Room>,
    bidders: Vec<Bidder>,
    reconciler: Reconciler,
    reconciliation: Option<Reconciliation>,
    report: Option<AuctionReport>,
}

impl Auction {
    /// Start setting up an auction for the given rent
    pub fn new(total_rent: i64) -> Result<Self, AuctionError> {
        Ok(Self {
            stage: Stage::Setup,
            total_rent: validate_total_rent(total_rent)?,
            rooms: Vec::new(),
            bidders: Vec::new(),
            reconciler: Reconciler::default(),
            reconciliation: None,
            report: None,
        })
    }

    /// Create an auction with every room and bidder of a validated setup
    /// registered. The auction is still in the setup stage.
    pub fn from_setup(setup: AuctionSetup) -> Self {
        let rooms = setup
            .rooms()
            .iter()
            .enumerate()
            .map(|(i, label)| Room::new(RoomId::from(i), label.clone()))
            .collect();
        let bidders = setup
            .bidders()
            .iter()
            .enumerate()
            .map(|(i, name)| Bidder {
                id: BidderId::from(i),
                name: name.clone(),
            })
            .collect();

        Self {
            stage: Stage::Setup,
            total_rent: setup.total_rent(),
            rooms,
            bidders,
            reconciler: Reconciler::default(),
            reconciliation: None,
            report: None,
        }
    }

    /// Use the given precision for warnings and for the report
    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.reconciler = Reconciler::new(precision);
        self
    }

    /// The stage the auction is in
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// The rent the rooms must add up to
    pub fn total_rent(&self) -> u64 {
        self.total_rent
    }

    /// The rooms, in registration order
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// The bidders, in registration order
    pub fn bidders(&self) -> &[Bidder] {
        &self.bidders
    }

    /// Look up a room
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id.index())
    }

    /// Look up a bidder
    pub fn bidder(&self, id: BidderId) -> Option<&Bidder> {
        self.bidders.get(id.index())
    }

    /// Look up a bidder by name
    pub fn bidder_named(&self, name: &str) -> Option<&Bidder> {
        self.bidders
            .iter()
            .find(|bidder| bidder.name.as_str() == name.trim())
    }

    /// The reconciliation, once the auction has been reconciled
    pub fn reconciliation(&self) -> Option<&Reconciliation> {
        self.reconciliation.as_ref()
    }

    fn expect_stage(&self, expected: Stage) -> Result<(), AuctionError> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(AuctionError::WrongStage {
                expected,
                actual: self.stage,
            })
        }
    }

    fn advance(&mut self) {
        if let Some(next) = self.stage.next() {
            event!(Level::DEBUG, from = %self.stage, to = %next, "auction advancing");
            self.stage = next;
        }
    }

    /// Register a room
    pub fn add_room(&mut self, label: impl AsRef<str>) -> Result<RoomId, AuctionError> {
        self.expect_stage(Stage::Setup)?;
        let label = RoomLabel::new(label)?;
        let id = RoomId::from(self.rooms.len());
        self.rooms.push(Room::new(id, label));
        Ok(id)
    }

    /// Register a bidder. Names must be unique within the auction.
    pub fn add_bidder(&mut self, name: impl AsRef<str>) -> Result<BidderId, AuctionError> {
        self.expect_stage(Stage::Setup)?;
        let name = BidderName::new(name)?;
        if self.bidders.iter().any(|bidder| bidder.name == name) {
            return Err(SetupError::DuplicateBidder(name).into());
        }
        let id = BidderId::from(self.bidders.len());
        self.bidders.push(Bidder { id, name });
        Ok(id)
    }

    /// Close the setup and start accepting bids.
    pub fn open_bidding(&mut self) -> Result<(), AuctionError> {
        self.expect_stage(Stage::Setup)?;
        if self.rooms.is_empty() || self.bidders.is_empty() {
            return Err(AuctionError::IncompleteSetup {
                rooms: self.rooms.len(),
                bidders: self.bidders.len(),
            });
        }

        event!(
            Level::INFO,
            total_rent = self.total_rent,
            rooms = self.rooms.len(),
            bidders = self.bidders.len(),
            "bidding opened"
        );
        self.advance();
        Ok(())
    }

    /// Place a bid on a room.
    ///
    /// Every failure is recoverable and leaves the auction untouched, so the
    /// caller can simply ask for the bid again.
    pub fn submit_bid(
        &mut self,
        bidder: BidderId,
        room: RoomId,
        amount: i64,
    ) -> Result<Bid, BidError> {
        if self.stage != Stage::CollectingBids {
            return Err(BidError::Closed(self.stage));
        }
        if self.bidder(bidder).is_none() {
            return Err(BidError::UnknownBidder(bidder));
        }
        let entry = self
            .rooms
            .get_mut(room.index())
            .ok_or(BidError::UnknownRoom(room))?;

        let bid = entry.ledger_mut().submit(bidder, amount)?;
        // The amount itself stays out of the logs
        event!(Level::DEBUG, %bidder, %room, "bid accepted");
        Ok(bid)
    }

    /// Collect every outstanding bid from a source.
    ///
    /// Bidders take their turns one after another, each bidding on every room
    /// before the next bidder starts. Rooms a bidder has already bid on are
    /// skipped. A refused bid is reported back to the source and asked for
    /// again.
    pub fn collect_bids<S: BidSource>(
        &mut self,
        source: &mut S,
    ) -> Result<(), CollectError<S::Error>> {
        self.expect_stage(Stage::CollectingBids)?;

        for (position, bidder) in self.bidders.iter().enumerate() {
            source.begin_turn(bidder).map_err(CollectError::Source)?;
            event!(Level::INFO, bidder = %bidder.name, "turn started");

            for room in self.rooms.iter_mut() {
                while !room.ledger().contains(bidder.id) {
                    let amount = source.bid(bidder, room).map_err(CollectError::Source)?;
                    if let Err(err) = room.ledger_mut().submit(bidder.id, amount) {
                        event!(
                            Level::INFO,
                            bidder = %bidder.name,
                            room = %room.id(),
                            err = err.to_string(),
                            "bid refused"
                        );
                        source
                            .rejected(bidder, room, &err)
                            .map_err(CollectError::Source)?;
                    }
                }
            }

            let next = self.bidders.get(position + 1);
            source.end_turn(bidder, next).map_err(CollectError::Source)?;
        }

        Ok(())
    }

    /// Stop accepting bids. Every bidder must have bid on every room.
    pub fn close_bidding(&mut self) -> Result<(), AuctionError> {
        self.expect_stage(Stage::CollectingBids)?;

        let missing = self
            .bidders
            .iter()
            .flat_map(|bidder| {
                self.rooms
                    .iter()
                    .filter(|room| !room.ledger().contains(bidder.id))
                    .map(|room| (bidder.id, room.id()))
            })
            .collect::<Vec<_>>();

        if !missing.is_empty() {
            event!(Level::WARN, missing = missing.len(), "bidding cannot close");
            return Err(AuctionError::MissingBids(missing));
        }

        self.advance();
        Ok(())
    }

    /// Determine each room's winner and fair share.
    ///
    /// Rooms that resolve keep their outcome even when others fail; the
    /// failures are returned together and the auction stays in this stage.
    pub fn resolve(&mut self) -> Result<(), AuctionError> {
        self.expect_stage(Stage::Resolving)?;

        let mut failures = Vec::new();
        for room in self.rooms.iter_mut() {
            match resolve(room.ledger().all()) {
                Ok(outcome) => {
                    event!(
                        Level::DEBUG,
                        room = %room.id(),
                        winner = %outcome.winner.bidder,
                        tied = outcome.tied,
                        "room resolved"
                    );
                    room.set_outcome(outcome);
                }
                Err(err) => {
                    event!(Level::ERROR, room = %room.id(), err = err.to_string());
                    failures.push((room.id(), err));
                }
            }
        }

        if !failures.is_empty() {
            return Err(AuctionError::Unresolved(failures));
        }

        self.advance();
        Ok(())
    }

    /// Scale the fair shares so the rooms add up to the rent.
    pub fn reconcile(&mut self) -> Result<&Reconciliation, AuctionError> {
        self.expect_stage(Stage::Reconciling)?;

        let outcomes = self
            .rooms
            .iter()
            .filter_map(|room| room.outcome().map(|outcome| (room.id(), outcome)));
        let reconciliation = self.reconciler.reconcile(outcomes, self.total_rent)?;

        event!(
            Level::INFO,
            multiplier = %reconciliation.multiplier,
            warnings = reconciliation.warnings().count(),
            "auction reconciled"
        );

        self.advance();
        Ok(self.reconciliation.insert(reconciliation))
    }

    /// Produce the report. Once produced, the same report is returned on
    /// every call.
    pub fn report(&mut self) -> Result<AuctionReport, AuctionError> {
        if let (Stage::Done, Some(report)) = (self.stage, &self.report) {
            return Ok(report.clone());
        }
        self.expect_stage(Stage::Reporting)?;

        // Reaching the reporting stage implies a reconciliation
        let reconciliation = self.reconciliation.as_ref().ok_or(AuctionError::WrongStage {
            expected: Stage::Reconciling,
            actual: self.stage,
        })?;
        let report = build_report(
            &self.rooms,
            &self.bidders,
            reconciliation,
            self.reconciler.precision(),
        );

        self.advance();
        Ok(self.report.insert(report).clone())
    }

    /// Run every remaining stage, collecting bids from the source.
    pub fn run<S: BidSource>(
        &mut self,
        source: &mut S,
    ) -> Result<AuctionReport, CollectError<S::Error>> {
        self.open_bidding()?;
        self.collect_bids(source)?;
        self.close_bidding()?;
        self.resolve()?;
        self.reconcile()?;
        Ok(self.report()?)
    }
}
