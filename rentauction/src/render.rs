//! Plain-text rendering of an auction report.

use rent_core::models::{AuctionReport, RoomReport};
use rent_solver::Precision;
use rust_decimal::Decimal;
use std::io::{self, Write};

/// Write the full report: the rent discrepancy, then each room's result.
pub fn write_report(
    out: &mut impl Write,
    report: &AuctionReport,
    precision: &Precision,
) -> io::Result<()> {
    write_discrepancy(out, report, precision)?;
    writeln!(out)?;
    write_results(out, report, precision)
}

/// Explain how far the fair shares are from the rent, and the multiplier
/// that closes the gap.
pub fn write_discrepancy(
    out: &mut impl Write,
    report: &AuctionReport,
    precision: &Precision,
) -> io::Result<()> {
    let dp = precision.price_decimals as usize;
    let mp = precision.multiplier_decimals as usize;

    if report.shortfall_or_excess.is_zero() {
        writeln!(
            out,
            "When totaled, the average of the bids for each room equals the total rent amount."
        )?;
        writeln!(out, "No multiplier needs to be applied.")?;
    } else {
        writeln!(
            out,
            "When totaled, the average of the bids for each room does not equal the total rent amount."
        )?;
        writeln!(
            out,
            "Therefore, a multiplier will be applied to the rent amount for all rooms."
        )?;
        writeln!(
            out,
            "A multiplier less than 1 means that overall the bids were higher than needed. Greater than 1 means the bids were too low to meet the total rent."
        )?;
    }
    writeln!(out, "===============")?;
    writeln!(out, "Total rent: ${}", report.total_rent)?;
    writeln!(out, "Sum of room averages: ${:.dp$}", report.sum_of_prices)?;

    let gap = report.shortfall_or_excess;
    if gap > Decimal::ZERO {
        writeln!(out, "Shortfall: ${:.dp$}", gap)?;
    } else if gap < Decimal::ZERO {
        writeln!(out, "Excess: ${:.dp$}", gap.abs())?;
    }
    writeln!(
        out,
        "Req'd multiplier to rid shortfall/excess: {:.mp$}",
        report.multiplier
    )
}

/// List the winner and obligations of every room.
pub fn write_results(
    out: &mut impl Write,
    report: &AuctionReport,
    precision: &Precision,
) -> io::Result<()> {
    writeln!(out, "=======AUCTION RESULTS=======")?;
    writeln!(
        out,
        "The 'modified rent obligation' is what each winning bidder is now obliged to pay."
    )?;
    writeln!(out)?;
    for room in &report.rooms {
        write_room(out, room, precision)?;
    }
    Ok(())
}

fn write_room(out: &mut impl Write, room: &RoomReport, precision: &Precision) -> io::Result<()> {
    let dp = precision.price_decimals as usize;

    writeln!(out, "=={}==", room.nickname)?;
    write!(
        out,
        "Highest bidder: {} | Amount: ${}",
        room.winner, room.winning_bid
    )?;
    if room.tied {
        write!(out, " (tied; the earliest bid wins)")?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "Resulting rent obligation (i.e. avg of all bids): ${:.dp$}",
        room.fair_share
    )?;
    writeln!(out, "Modified rent obligation: ${:.dp$}", room.adjusted_price)?;
    if let Some(warning) = &room.warning {
        writeln!(
            out,
            "WARNING: {} would pay ${:.dp$}, which is more than their winning bid of ${}.",
            room.winner, warning.adjusted_price, warning.winning_bid
        )?;
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rent_core::models::{AuctionSetup, BidderId, RoomId};
    use rent_solver::Auction;

    fn report() -> AuctionReport {
        let setup = AuctionSetup::new(3000, ["A", "B"], ["Alice", "Bob"]).unwrap();
        let mut auction = Auction::from_setup(setup);
        auction.open_bidding().unwrap();
        for (bidder, room, amount) in [(0, 0, 1000), (0, 1, 1200), (1, 0, 800), (1, 1, 1400)] {
            auction
                .submit_bid(BidderId::from(bidder), RoomId::from(room), amount)
                .unwrap();
        }
        auction.close_bidding().unwrap();
        auction.resolve().unwrap();
        auction.reconcile().unwrap();
        auction.report().unwrap()
    }

    #[test]
    fn test_text_report() {
        let mut buffer = Vec::new();
        write_report(&mut buffer, &report(), &Precision::default()).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.contains("Shortfall: $800.00"));
        assert!(text.contains("Req'd multiplier to rid shortfall/excess: 1.364"));
        assert!(text.contains("==Bedroom #1: A=="));
        assert!(text.contains("Highest bidder: Alice | Amount: $1000"));
        assert!(text.contains("Resulting rent obligation (i.e. avg of all bids): $900.00"));
        assert!(text.contains("Modified rent obligation: $1772.73"));
        assert_eq!(text.matches("WARNING").count(), 2);
    }
}
