//! Append-only CSV history of polled prices
//!
//! Layout:
//!
//! ```text
//! timestamp,bitcoin_usd,ethereum_usd
//! 2024-03-01 09:05:07,50000,3000.5
//! 2024-03-01 09:05:37,,3001
//! ```
//!
//! The header is written only when the file does not exist yet. Each append
//! opens the file, writes one row, syncs and closes it again.

use crate::{constants::TIMESTAMP_FORMAT, error::HistoryError, types::Snapshot};
use chrono::{Local, NaiveDateTime};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

/// CSV price log, or a no-op when logging is disabled
#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: Option<PathBuf>,
    ids: Vec<String>,
}

impl HistoryLog {
    /// Log that never writes anything
    pub fn disabled() -> Self {
        Self {
            path: None,
            ids: Vec::new(),
        }
    }

    /// Log appending to `path`; an empty path disables logging
    pub fn from_path(path: &str, ids: &[String]) -> Self {
        if path.is_empty() {
            return Self::disabled();
        }
        Self {
            path: Some(PathBuf::from(path)),
            ids: ids.to_vec(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_enabled(&self) -> bool {
        self.path.is_some()
    }

    /// Header row, one `<id>_usd` column per tracked identifier
    pub fn header(&self) -> Vec<String> {
        std::iter::once("timestamp".to_string())
            .chain(self.ids.iter().map(|id| format!("{}_usd", id)))
            .collect()
    }

    /// Appends a row stamped with the current local time
    pub fn append(&self, snapshot: &Snapshot) -> Result<(), HistoryError> {
        self.append_at(Local::now().naive_local(), snapshot)
    }

    /// Appends a row stamped with `at`
    pub fn append_at(&self, at: NaiveDateTime, snapshot: &Snapshot) -> Result<(), HistoryError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let fresh = !path.exists();
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if fresh {
            writer.write_record(self.header())?;
            tracing::debug!(path = %path.display(), "Created price history file");
        }

        let row = std::iter::once(at.format(TIMESTAMP_FORMAT).to_string()).chain(
            self.ids
                .iter()
                .map(|id| snapshot.price(id).map(|p| p.to_string()).unwrap_or_default()),
        );
        writer.write_record(row)?;
        writer.flush()?;

        // Blocking write on the loop task; a row never straddles an await
        let file = writer
            .into_inner()
            .map_err(|e| HistoryError::Io(e.into_error()))?;
        file.sync_all()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use temp_dir::TempDir;

    fn ids() -> Vec<String> {
        vec!["bitcoin".to_string(), "ethereum".to_string(), "dogecoin".to_string()]
    }

    fn at(ts: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT).unwrap()
    }

    fn snapshot(entries: &[(&str, Option<f64>)]) -> Snapshot {
        entries.iter().map(|(id, p)| (id.to_string(), *p)).collect()
    }

    #[test]
    fn test_header_written_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.child("prices.csv");
        let log = HistoryLog::from_path(path.to_str().unwrap(), &ids());
        let snap = snapshot(&[("bitcoin", Some(1.0)), ("ethereum", Some(2.0))]);

        log.append_at(at("2024-03-01 09:05:07"), &snap).unwrap();
        log.append_at(at("2024-03-01 09:05:37"), &snap).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines,
            vec![
                "timestamp,bitcoin_usd,ethereum_usd,dogecoin_usd",
                "2024-03-01 09:05:07,1,2,",
                "2024-03-01 09:05:37,1,2,",
            ]
        );
    }

    #[test]
    fn test_existing_file_is_appended_without_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.child("prices.csv");
        std::fs::write(&path, "earlier content\n").unwrap();

        let log = HistoryLog::from_path(path.to_str().unwrap(), &ids());
        log.append_at(at("2024-03-01 09:05:07"), &Snapshot::default())
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "earlier content\n2024-03-01 09:05:07,,,\n");
    }

    #[test]
    fn test_values_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.child("prices.csv");
        let log = HistoryLog::from_path(path.to_str().unwrap(), &ids());
        let snap = snapshot(&[
            ("bitcoin", Some(67123.45678)),
            ("ethereum", None),
            ("dogecoin", Some(0.000012345)),
        ]);

        log.append(&snap).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(
            reader.headers().unwrap(),
            vec!["timestamp", "bitcoin_usd", "ethereum_usd", "dogecoin_usd"]
        );

        let records: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
        assert_eq!(records.len(), 1);
        let record = &records[0];

        assert!(NaiveDateTime::parse_from_str(&record[0], TIMESTAMP_FORMAT).is_ok());
        assert_eq!(record[1].parse::<f64>().unwrap(), 67123.45678);
        assert_eq!(&record[2], "");
        assert_eq!(record[3].parse::<f64>().unwrap(), 0.000012345);
    }

    #[test]
    fn test_disabled_log_writes_nothing() {
        use crate::config::Cli;
        use clap::Parser;

        let dir = TempDir::new().unwrap();
        let path = dir.child("prices.csv");
        let target = path.to_str().unwrap();
        let snap = snapshot(&[("bitcoin", Some(1.0))]);

        let cli = Cli::try_parse_from(["tracker", "--csv", target, "--no-csv"]).unwrap();
        let log = HistoryLog::from_path(cli.csv_path(), &ids());
        assert!(!log.is_enabled());
        log.append(&snap).unwrap();
        assert!(!path.exists());

        let cli = Cli::try_parse_from(["tracker", "--csv", target]).unwrap();
        HistoryLog::from_path(cli.csv_path(), &ids()).append(&snap).unwrap();
        assert!(path.exists());
    }
}
