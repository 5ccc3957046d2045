use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::Local;

use crate::error::Result;
use crate::types::AlertEntry;

/// Width of the divider printed between transcript sections.
const DIVIDER_WIDTH: usize = 53;

/// Render the combined alert body: `"name (-X%), name (-Y%)"`.
pub fn alert_body(entries: &[AlertEntry]) -> String {
    entries
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Run transcript plus the qualifying-drop accumulator.
///
/// Owns the log file for exactly one run: created (truncating any previous
/// run's transcript) at run start, flushed when `finish` consumes the
/// report. Each transcript line is echoed to stdout and appended to the
/// file.
pub struct RunReport {
    log: BufWriter<File>,
    alerts: Vec<AlertEntry>,
}

impl RunReport {
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let log = BufWriter::new(File::create(path)?);
        Ok(Self {
            log,
            alerts: Vec::new(),
        })
    }

    pub fn line(&mut self, text: &str) -> Result<()> {
        println!("{text}");
        writeln!(self.log, "{text}")?;
        Ok(())
    }

    pub fn blank(&mut self) -> Result<()> {
        self.line("")
    }

    pub fn divider(&mut self) -> Result<()> {
        self.line(&"-".repeat(DIVIDER_WIDTH))
    }

    /// Section heading underlined with dashes to its own length.
    pub fn section(&mut self, title: &str) -> Result<()> {
        self.line(title)?;
        self.line(&"-".repeat(title.len()))
    }

    pub fn date_header(&mut self) -> Result<()> {
        let stamp = Local::now().format("%d %b | %I:%M %p");
        self.line(&format!("Date scanned: {stamp}"))?;
        self.divider()
    }

    /// Register a qualifying drop for the end-of-run alert.
    pub fn flag(&mut self, entry: AlertEntry) {
        self.alerts.push(entry);
    }

    pub fn has_alerts(&self) -> bool {
        !self.alerts.is_empty()
    }

    /// Append the timestamped summary block (when any drops qualified),
    /// flush the transcript, and hand the qualifying entries to the caller
    /// for the alerting step.
    pub fn finish(mut self) -> Result<Vec<AlertEntry>> {
        if self.has_alerts() {
            self.divider()?;
            let stamp = Local::now().format("%d %b %Y | %I:%M %p");
            let body = alert_body(&self.alerts);
            self.line(&format!("[{stamp}] Price drops: {body}"))?;
        }
        self.log.flush()?;
        Ok(self.alerts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, drop: u32) -> AlertEntry {
        AlertEntry {
            reference_name: name.to_string(),
            percentage_drop: drop,
        }
    }

    #[test]
    fn alert_body_joins_entries_in_order() {
        let entries = vec![entry("Fish Oil 400", 20), entry("Coffee Beans 1kg", 25)];
        assert_eq!(
            alert_body(&entries),
            "Fish Oil 400 (-20%), Coffee Beans 1kg (-25%)"
        );
    }

    #[test]
    fn transcript_is_written_and_summary_appended() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");

        let mut report = RunReport::create(&path).unwrap();
        report.section("CHEMIST WAREHOUSE ITEMS").unwrap();
        report.line("Fish Oil 400 Capsules").unwrap();
        report.line("Price: $8.00").unwrap();
        report.flag(entry("Fish Oil 400", 20));
        let alerts = report.finish().unwrap();

        assert_eq!(alerts.len(), 1);
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("CHEMIST WAREHOUSE ITEMS\n-----------------------\n"));
        assert!(text.contains("Price: $8.00"));
        assert!(text.contains("Price drops: Fish Oil 400 (-20%)"));
    }

    #[test]
    fn no_alerts_means_no_summary_block() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");

        let mut report = RunReport::create(&path).unwrap();
        report.line("Fish Oil 400 Capsules").unwrap();
        let alerts = report.finish().unwrap();

        assert!(alerts.is_empty());
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(!text.contains("Price drops:"));
    }

    #[test]
    fn create_truncates_the_previous_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");
        std::fs::write(&path, "stale transcript from last run\n").unwrap();

        let mut report = RunReport::create(&path).unwrap();
        report.line("fresh").unwrap();
        report.finish().unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(!text.contains("stale"));
        assert!(text.contains("fresh"));
    }
}
