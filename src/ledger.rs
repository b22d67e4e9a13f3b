//! Ledger rows and the flat-file store.
//!
//! One transaction per line: `2024-04-26T12:30,description,vendor,100.00`.
//! Positive amounts are deposits, negative amounts are payments.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::error::{StoreError, StoreResult};
use crate::log;

const STAMP_FORMAT: &str = "%Y-%m-%dT%H:%M";
const STAMP_FORMAT_SECONDS: &str = "%Y-%m-%dT%H:%M:%S";
const STAMP_FORMAT_FRACTION: &str = "%Y-%m-%dT%H:%M:%S%.f";
const SEPARATOR: char = ',';

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub date_time: NaiveDateTime,
    pub description: String,
    pub vendor: String,
    pub amount: f64,
}

impl Transaction {
    pub fn new(date_time: NaiveDateTime, description: &str, vendor: &str, amount: f64) -> Self {
        Self {
            date_time,
            description: description.to_string(),
            vendor: vendor.to_string(),
            amount,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date_time.date()
    }

    pub fn time(&self) -> NaiveTime {
        self.date_time.time()
    }

    pub fn is_deposit(&self) -> bool {
        self.amount > 0.0
    }

    pub fn is_payment(&self) -> bool {
        self.amount < 0.0
    }

    /// Whether the row's date falls in `from..=to`; open ends match anything.
    pub fn within(&self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> bool {
        let date = self.date();
        from.is_none_or(|f| date >= f) && to.is_none_or(|t| date <= t)
    }

    /// Serialize to one store line, without the newline.
    ///
    /// The timestamp is ISO-8601 local time; seconds are only written when
    /// non-zero, so `2024-03-07T12:18` and `2024-03-07T12:18:30` both occur.
    pub fn to_line(&self) -> String {
        let stamp_format = if self.date_time.second() == 0 && self.date_time.nanosecond() == 0 {
            STAMP_FORMAT
        } else {
            STAMP_FORMAT_SECONDS
        };
        format!(
            "{}{sep}{}{sep}{}{sep}{:.2}",
            self.date_time.format(stamp_format),
            clean_field(&self.description),
            clean_field(&self.vendor),
            self.amount,
            sep = SEPARATOR,
        )
    }

    /// Parse one store line. `line_no` is 1-based and only used for errors.
    pub fn parse_line(line: &str, line_no: usize) -> StoreResult<Self> {
        let malformed = |reason: String| StoreError::MalformedRow { line: line_no, reason };

        let columns: Vec<&str> = line.split(SEPARATOR).collect();
        let [stamp, description, vendor, amount] = columns.as_slice() else {
            return Err(malformed(format!("expected 4 columns, found {}", columns.len())));
        };

        let date_time = parse_stamp(stamp.trim()).ok_or_else(|| malformed(format!("bad timestamp {:?}", stamp)))?;
        let amount: f64 = amount
            .trim()
            .parse()
            .map_err(|e| malformed(format!("bad amount {:?}: {}", amount, e)))?;

        Ok(Self::new(date_time, description, vendor, amount))
    }
}

/// `2024-04-26T12:30`, with optional seconds and fraction.
fn parse_stamp(stamp: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(stamp, STAMP_FORMAT_FRACTION)
        .or_else(|_| NaiveDateTime::parse_from_str(stamp, STAMP_FORMAT))
        .ok()
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {:.2} {} {} for {}",
            self.date_time.format("%Y-%m-%d %H:%M:%S"),
            self.amount.abs(),
            if self.is_deposit() { "from" } else { "to" },
            self.vendor,
            self.description
        )
    }
}

/// The separator can't appear inside a column.
fn clean_field(value: &str) -> String {
    value.replace(SEPARATOR, ";").replace(['\n', '\r'], " ")
}

/// Transactions backed by a line-oriented file.
#[derive(Debug)]
pub struct LedgerStore {
    path: PathBuf,
    transactions: Vec<Transaction>,
}

impl LedgerStore {
    /// Open the store, creating the file and its directory if missing.
    /// Lines that fail to parse are logged and skipped.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        if path.is_dir() {
            return Err(StoreError::IsDirectory(path));
        }
        if !path.exists() {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .map_err(|source| StoreError::WriteFailed { path: path.clone(), source })?;
            }
            fs::write(&path, "").map_err(|source| StoreError::WriteFailed { path: path.clone(), source })?;
        }

        let contents =
            fs::read_to_string(&path).map_err(|source| StoreError::ReadFailed { path: path.clone(), source })?;

        let mut transactions = vec![];
        let mut skipped = 0;
        for (i, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match Transaction::parse_line(line, i + 1) {
                Ok(tx) => transactions.push(tx),
                Err(e) => {
                    skipped += 1;
                    log::log(&format!("Skipping row: {}", e));
                }
            }
        }
        log::log_event(&format!(
            "Loaded {} transactions from {} ({} skipped)",
            transactions.len(),
            path.display(),
            skipped
        ));

        Ok(Self { path, transactions })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn transactions(&self) -> impl DoubleEndedIterator<Item = &Transaction> {
        self.transactions.iter()
    }

    /// Append one row to the file and keep it in memory.
    pub fn append(&mut self, tx: Transaction) -> StoreResult<()> {
        let write_failed = |source| StoreError::WriteFailed { path: self.path.clone(), source };
        let mut file = OpenOptions::new().append(true).create(true).open(&self.path).map_err(write_failed)?;
        writeln!(file, "{}", tx.to_line()).map_err(write_failed)?;
        log::log_event(&format!("Appended {}", tx));
        self.transactions.push(tx);
        Ok(())
    }

    /// Rewrite the whole file from memory.
    pub fn persist(&self) -> StoreResult<()> {
        let mut contents = String::new();
        for tx in &self.transactions {
            contents.push_str(&tx.to_line());
            contents.push('\n');
        }
        fs::write(&self.path, contents).map_err(|source| StoreError::WriteFailed { path: self.path.clone(), source })
    }
}
