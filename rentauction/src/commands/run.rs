use crate::{AppConfig, write_discrepancy, write_results};
use rent_core::{
    models::{AuctionReport, BidError, Bidder, Room, parse_amount},
    ports::BidSource,
};
use rent_solver::{Auction, AuctionError, CollectError};
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::{Level, event};

// Moves the cursor home and clears the display
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

#[derive(Error, Debug)]
pub enum TerminalError {
    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("input ended before the auction was finished")]
    InputClosed,
    #[error(transparent)]
    Auction(#[from] AuctionError),
}

impl From<CollectError<TerminalError>> for TerminalError {
    fn from(value: CollectError<TerminalError>) -> Self {
        match value {
            CollectError::Source(err) => err,
            CollectError::Auction(err) => Self::Auction(err),
        }
    }
}

/// An interactive auction, with the roommates taking turns at one terminal.
pub struct Terminal<R, W> {
    input: R,
    output: W,
    config: AppConfig,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W, config: AppConfig) -> Self {
        Self {
            input,
            output,
            config,
        }
    }

    /// Consume the terminal, returning its output
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run a whole auction, from the greeting to the results.
    pub fn session(&mut self) -> Result<AuctionReport, TerminalError> {
        self.clear()?;
        writeln!(
            self.output,
            "===Welcome to the shared-home room auction! Lets get started with some basic information!==="
        )?;
        writeln!(self.output)?;

        let mut auction = self.setup()?;
        self.show_setup(&auction)?;

        auction.open_bidding()?;
        self.clear()?;
        auction.collect_bids(self)?;
        auction.close_bidding()?;

        self.clear()?;
        writeln!(self.output, "All bids have now been submitted!")?;
        writeln!(
            self.output,
            "The next step is to compute the bids and determine who has won each room and the corresponding rent amount."
        )?;
        self.pause("Press 'Enter' to compute the bids:")?;

        auction.resolve()?;
        auction.reconcile()?;
        let report = auction.report()?;

        let precision = self.config.report;
        write_discrepancy(&mut self.output, &report, &precision)?;
        self.pause("Press 'Enter' to continue")?;
        write_results(&mut self.output, &report, &precision)?;

        writeln!(
            self.output,
            "That is all. Note that a roommate may have won more than one room; that is left for you to sort out."
        )?;
        self.pause("Press 'Enter' to end the program")?;
        Ok(report)
    }

    // Asks for the rent, the rooms and the roommates
    fn setup(&mut self) -> Result<Auction, TerminalError> {
        let rent = loop {
            let line = self.prompt("What is the total rent amount for the house?:")?;
            match parse_amount(&line) {
                Ok(rent) if rent > 0 => break rent,
                _ => writeln!(
                    self.output,
                    "Oops! Please enter a whole number greater than zero with no decimals"
                )?,
            }
        };
        let mut auction = Auction::new(rent)?.with_precision(self.config.report);
        writeln!(self.output, "House total rent = ${}", auction.total_rent())?;
        writeln!(self.output)?;

        let count = loop {
            let line = self.prompt("How many bedrooms are in the house?")?;
            match line.trim().parse::<usize>() {
                Ok(count) if count > 0 => break count,
                _ => writeln!(self.output, "Oops! Please enter a whole number greater than zero")?,
            }
        };
        for number in 1..=count {
            loop {
                let line = self.prompt(&format!("Please give a nickname to room #{number}:"))?;
                match auction.add_room(&line) {
                    Ok(_) => break,
                    Err(err) => writeln!(self.output, "Oops! {err}")?,
                }
            }
        }
        writeln!(self.output)?;

        self.clear()?;
        writeln!(
            self.output,
            "Next, lets get the name of each person who will be living at the house."
        )?;
        loop {
            let line =
                self.prompt("Please enter a name. Type 'done' when all names have been entered:")?;
            if line.trim().eq_ignore_ascii_case("done") {
                if auction.bidders().is_empty() {
                    writeln!(self.output, "Oops! At least one person has to bid.")?;
                    continue;
                }
                break;
            }
            if let Err(err) = auction.add_bidder(&line) {
                writeln!(self.output, "Oops! {err}")?;
            }
        }

        Ok(auction)
    }

    fn show_setup(&mut self, auction: &Auction) -> Result<(), TerminalError> {
        writeln!(self.output, "==Auction Information==")?;
        writeln!(self.output, "Total house rent: ${}", auction.total_rent())?;
        writeln!(self.output)?;
        writeln!(self.output, "Rooms:")?;
        for room in auction.rooms() {
            writeln!(self.output, "{room}")?;
        }
        writeln!(self.output)?;
        writeln!(self.output, "Roommates:")?;
        for bidder in auction.bidders() {
            writeln!(self.output, "{bidder}")?;
        }
        self.pause("Press 'Enter' to continue.")
    }

    fn read_line(&mut self) -> Result<String, TerminalError> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(TerminalError::InputClosed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_owned())
    }

    fn prompt(&mut self, message: &str) -> Result<String, TerminalError> {
        writeln!(self.output, "{message}")?;
        self.read_line()
    }

    fn pause(&mut self, message: &str) -> Result<(), TerminalError> {
        self.prompt(message).map(|_| ())
    }

    fn clear(&mut self) -> Result<(), TerminalError> {
        if self.config.terminal.clear_screen {
            write!(self.output, "{CLEAR_SCREEN}")?;
        }
        Ok(())
    }
}

impl<R: BufRead, W: Write> BidSource for Terminal<R, W> {
    type Error = TerminalError;

    fn begin_turn(&mut self, bidder: &Bidder) -> Result<(), Self::Error> {
        writeln!(
            self.output,
            "It is now {bidder}'s turn. Please ensure that ONLY {bidder} can see the bids being placed."
        )?;
        writeln!(self.output)?;
        Ok(())
    }

    fn bid(&mut self, _bidder: &Bidder, room: &Room) -> Result<i64, Self::Error> {
        writeln!(self.output, "You are now bidding on {room}")?;
        loop {
            let line = self.prompt("Enter your bid amount:")?;
            match parse_amount(&line) {
                Ok(amount) => return Ok(amount),
                Err(err) => {
                    event!(Level::DEBUG, room = %room.id(), "unreadable bid");
                    writeln!(self.output, "{err}")?;
                }
            }
        }
    }

    fn rejected(
        &mut self,
        _bidder: &Bidder,
        _room: &Room,
        error: &BidError,
    ) -> Result<(), Self::Error> {
        writeln!(self.output, "That bid was not accepted: {error}")?;
        Ok(())
    }

    fn end_turn(&mut self, bidder: &Bidder, next: Option<&Bidder>) -> Result<(), Self::Error> {
        if let Some(next) = next {
            writeln!(
                self.output,
                "Thank you {bidder}, you are now finished bidding. Please notify {next} they are next."
            )?;
            self.pause("Press 'Enter' to clear the screen")?;
            self.clear()?;
        }
        Ok(())
    }
}
