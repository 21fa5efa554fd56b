use crate::{BatchInput, ReportFormat, write_report};
use anyhow::Context as _;
use clap::Args;
use rent_core::models::AuctionReport;
use rent_solver::Precision;
use std::{
    convert::Infallible,
    fs::File,
    io::{BufReader, BufWriter, Write, stdin, stdout},
    path::PathBuf,
};

/// Where `solve` reads the auction from and writes the report to.
#[derive(Args)]
pub struct BatchFiles {
    /// The auction JSON file ("-" reads stdin)
    #[arg(value_parser = parse_location)]
    input: Location,

    /// Where to write the report ("-" writes stdout)
    #[arg(short, long, default_value = "-", value_parser = parse_location)]
    output: Location,
}

#[derive(Clone, Debug, PartialEq)]
enum Location {
    Console,
    File(PathBuf),
}

fn parse_location(arg: &str) -> Result<Location, Infallible> {
    Ok(match arg {
        "-" => Location::Console,
        path => Location::File(PathBuf::from(path)),
    })
}

impl BatchFiles {
    /// Parse the auction, setup and bids together
    pub fn read_batch(&self) -> anyhow::Result<BatchInput> {
        let batch: BatchInput = match &self.input {
            Location::Console => serde_json::from_reader(stdin().lock())?,
            Location::File(path) => {
                let file = File::open(path)
                    .with_context(|| format!("cannot open {}", path.display()))?;
                serde_json::from_reader(BufReader::new(file))
                    .with_context(|| format!("{} is not a valid auction", path.display()))?
            }
        };
        Ok(batch)
    }

    /// Write the report in the requested format
    pub fn write_report(
        &self,
        report: &AuctionReport,
        format: ReportFormat,
        precision: &Precision,
    ) -> anyhow::Result<()> {
        let mut output: Box<dyn Write> = match &self.output {
            Location::Console => Box::new(stdout().lock()),
            Location::File(path) => Box::new(BufWriter::new(
                File::create(path).with_context(|| format!("cannot create {}", path.display()))?,
            )),
        };
        match format {
            ReportFormat::Json => {
                serde_json::to_writer_pretty(&mut output, report)?;
                writeln!(output)?;
            }
            ReportFormat::Text => write_report(&mut output, report, precision)?,
        }
        output.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_means_the_console() {
        assert_eq!(parse_location("-"), Ok(Location::Console));
        assert_eq!(
            parse_location("house.json"),
            Ok(Location::File(PathBuf::from("house.json")))
        );
    }

    #[test]
    fn test_batch_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("house.json");
        let output = dir.path().join("report.txt");
        std::fs::write(
            &input,
            r#"{
                "total_rent": 1000,
                "rooms": ["Loft"],
                "bidders": ["Alice"],
                "bids": [{ "bidder": "Alice", "amounts": [1000] }]
            }"#,
        )
        .unwrap();

        let files = BatchFiles {
            input: Location::File(input),
            output: Location::File(output.clone()),
        };
        let report = files.read_batch().unwrap().solve(Precision::default()).unwrap();
        files
            .write_report(&report, ReportFormat::Text, &Precision::default())
            .unwrap();

        let text = std::fs::read_to_string(output).unwrap();
        assert!(text.contains("Highest bidder: Alice | Amount: $1000"));
    }

    #[test]
    fn test_missing_input_names_the_file() {
        let files = BatchFiles {
            input: Location::File(PathBuf::from("/nonexistent/house.json")),
            output: Location::Console,
        };
        let err = files.read_batch().unwrap_err();
        assert!(err.to_string().contains("/nonexistent/house.json"));
    }
}
