use rent_solver::Precision;
use rentauction::{AppConfig, Terminal, TerminalConfig, TerminalError};
use rstest::*;
use std::io::Cursor;

#[fixture]
pub fn config() -> AppConfig {
    AppConfig {
        report: Precision::default(),
        terminal: TerminalConfig {
            clear_screen: false,
        },
    }
}

fn script(lines: &[&str]) -> Cursor<Vec<u8>> {
    let mut text = lines.join("\n");
    text.push('\n');
    Cursor::new(text.into_bytes())
}

#[rstest]
fn a_full_session(config: AppConfig) {
    let input = script(&[
        "3000", "2", "A", "B", "Alice", "Bob", "done", "", // setup
        "1000", "1200", "", // Alice, then hand over
        "800", "1400", // Bob
        "", "", "", // compute, continue, goodbye
    ]);
    let mut terminal = Terminal::new(input, Vec::new(), config);
    let report = terminal.session().unwrap();
    let output = String::from_utf8(terminal.into_output()).unwrap();

    assert_eq!(report.rooms[0].winner.as_str(), "Alice");
    assert_eq!(report.rooms[1].winner.as_str(), "Bob");
    assert_eq!(report.warnings().count(), 2);

    assert!(output.contains("It is now Alice's turn."));
    assert!(output.contains("Please notify Bob they are next."));
    assert!(output.contains("You are now bidding on Bedroom #2: B"));
    assert!(output.contains("Req'd multiplier to rid shortfall/excess: 1.364"));
    assert!(output.contains("Modified rent obligation: $1227.27"));
    assert!(!output.contains("\x1b[2J"));

    // Alice's turn ends before Bob's begins
    let alice_done = output.find("Thank you Alice").unwrap();
    let bob_turn = output.find("It is now Bob's turn.").unwrap();
    assert!(alice_done < bob_turn);
}

#[rstest]
fn invalid_answers_are_asked_again(config: AppConfig) {
    let input = script(&[
        "lots", "0", "1500", // rent
        "none", "0", "1", "  ", "Loft", // rooms
        "done", "Alice", "Alice", "Bob", "DONE", "", // bidders
        "12.50", "-3", "900", "", // Alice
        "600", // Bob
        "", "", "",
    ]);
    let mut terminal = Terminal::new(input, Vec::new(), config);
    let report = terminal.session().unwrap();
    let output = String::from_utf8(terminal.into_output()).unwrap();

    assert_eq!(report.total_rent, 1500);
    assert_eq!(report.rooms.len(), 1);
    assert_eq!(report.rooms[0].label.as_str(), "Loft");
    assert_eq!(report.rooms[0].winning_bid, 900);

    assert_eq!(
        output
            .matches("Oops! Please enter a whole number greater than zero with no decimals")
            .count(),
        2
    );
    assert!(output.contains("Oops! At least one person has to bid."));
    assert!(output.contains("a bidder named Alice is already registered"));
    assert!(output.contains("invalid bid amount \"12.50\""));
    assert!(output.contains("That bid was not accepted"));
}

#[rstest]
fn screens_are_cleared_between_bidders(mut config: AppConfig) {
    config.terminal.clear_screen = true;
    let input = script(&[
        "1000", "1", "Loft", "Alice", "Bob", "done", "", "600", "", "400", "", "", "",
    ]);
    let mut terminal = Terminal::new(input, Vec::new(), config);
    terminal.session().unwrap();
    let output = String::from_utf8(terminal.into_output()).unwrap();

    let handover = output.find("Press 'Enter' to clear the screen").unwrap();
    let bob_turn = output.find("It is now Bob's turn.").unwrap();
    assert!(output[handover..bob_turn].contains("\x1b[2J"));
}

#[rstest]
fn closed_input_ends_the_session(config: AppConfig) {
    let input = script(&["3000", "1", "Loft", "Alice", "done", "", "700"]);
    let mut terminal = Terminal::new(input, Vec::new(), config);
    assert!(matches!(
        terminal.session(),
        Err(TerminalError::InputClosed)
    ));
}
