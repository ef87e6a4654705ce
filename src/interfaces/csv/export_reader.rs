use crate::error::{NeuronError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

/// Header row of the backend's registration export.
pub const EXPORT_HEADER: [&str; 10] = [
    "Registration ID",
    "Full Name",
    "Email",
    "Phone",
    "College",
    "Team Name",
    "Payment Status",
    "Transaction ID",
    "Amount (INR)",
    "Created At",
];

/// One row of the registration export.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct ExportRow {
    #[serde(rename = "Registration ID")]
    pub registration_id: String,
    #[serde(rename = "Full Name")]
    pub full_name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Phone")]
    pub phone: String,
    #[serde(rename = "College")]
    pub college: String,
    #[serde(rename = "Team Name")]
    pub team_name: String,
    #[serde(rename = "Payment Status")]
    pub payment_status: String,
    #[serde(rename = "Transaction ID")]
    pub transaction_id: String,
    #[serde(rename = "Amount (INR)")]
    pub amount_inr: Decimal,
    #[serde(rename = "Created At")]
    pub created_at: String,
}

/// Reads a downloaded registration export.
///
/// Wraps `csv::Reader`, checks the header once and then yields rows lazily.
pub struct ExportReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ExportReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);
        Self { reader }
    }

    fn check_header(&mut self) -> Result<()> {
        let headers = self.reader.headers()?;
        if headers.iter().eq(EXPORT_HEADER) {
            Ok(())
        } else {
            Err(NeuronError::ValidationError(format!(
                "unexpected export header: {}",
                headers.iter().collect::<Vec<_>>().join(",")
            )))
        }
    }

    pub fn rows(mut self) -> Result<impl Iterator<Item = Result<ExportRow>>> {
        self.check_header()?;
        Ok(self
            .reader
            .into_deserialize()
            .map(|result| result.map_err(NeuronError::from)))
    }

    /// Number of data rows, failing on the first malformed one.
    pub fn count_rows(self) -> Result<usize> {
        self.rows()?.try_fold(0, |count, row| row.map(|_| count + 1))
    }
}
