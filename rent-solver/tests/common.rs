#![allow(dead_code)]
use rent_core::{
    models::{BidError, Bidder, Room},
    ports::BidSource,
};
use std::collections::VecDeque;

/// A bid source that replays a fixed script of amounts and records every
/// call it receives.
#[derive(Default)]
pub struct ScriptedSource {
    pub amounts: VecDeque<i64>,
    pub calls: Vec<Call>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Begin(String),
    Bid(String, String),
    Rejected(String, String),
    End(String, Option<String>),
}

#[derive(thiserror::Error, Debug)]
#[error("the script ran out of bids")]
pub struct Exhausted;

impl ScriptedSource {
    pub fn new(amounts: impl IntoIterator<Item = i64>) -> Self {
        Self {
            amounts: amounts.into_iter().collect(),
            calls: Vec::new(),
        }
    }
}

impl BidSource for ScriptedSource {
    type Error = Exhausted;

    fn begin_turn(&mut self, bidder: &Bidder) -> Result<(), Self::Error> {
        self.calls.push(Call::Begin(bidder.name.to_string()));
        Ok(())
    }

    fn bid(&mut self, bidder: &Bidder, room: &Room) -> Result<i64, Self::Error> {
        self.calls
            .push(Call::Bid(bidder.name.to_string(), room.label().to_string()));
        self.amounts.pop_front().ok_or(Exhausted)
    }

    fn rejected(&mut self, bidder: &Bidder, room: &Room, _: &BidError) -> Result<(), Self::Error> {
        self.calls.push(Call::Rejected(
            bidder.name.to_string(),
            room.label().to_string(),
        ));
        Ok(())
    }

    fn end_turn(&mut self, bidder: &Bidder, next: Option<&Bidder>) -> Result<(), Self::Error> {
        self.calls.push(Call::End(
            bidder.name.to_string(),
            next.map(|next| next.name.to_string()),
        ));
        Ok(())
    }
}
