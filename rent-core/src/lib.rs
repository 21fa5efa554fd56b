#![warn(missing_docs)]
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

/// Core domain models for the room auction.
///
/// This module contains the data structures for the entities of an auction:
/// bidders, rooms, the per-room bid ledgers, the setup input, and the derived
/// outcomes and report.
///
/// The models are primarily data with minimal business logic. The ledger is
/// the exception, as it owns the invariants on bid submission.
pub mod models;

/// Interface traits for the room auction.
///
/// These are the "ports" between the auction and its collaborators, such as
/// the terminal that the roommates take turns at.
pub mod ports;
