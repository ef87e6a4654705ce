use super::session::AdminSession;
use crate::domain::ports::{DownloadSink, Notice};
use crate::domain::registration::Registration;
use crate::domain::stats::RegistrationStats;
use crate::error::{NeuronError, Result};
use crate::interfaces::csv::export_reader::ExportReader;
use chrono::Utc;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Everything the dashboard shows, exactly as the backend returned it.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub registrations: Vec<Registration>,
    pub stats: RegistrationStats,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportReceipt {
    pub path: PathBuf,
    /// Data rows in the file, when it matches the known export layout.
    pub rows: Option<usize>,
}

/// File name a download is saved under.
pub fn export_filename(timestamp_millis: i64) -> String {
    format!("neuron_registrations_{timestamp_millis}.csv")
}

pub struct AdminDashboard<'a> {
    session: &'a AdminSession,
}

impl<'a> AdminDashboard<'a> {
    pub fn new(session: &'a AdminSession) -> Self {
        Self { session }
    }

    /// Fetches the registration list and the statistics together.
    ///
    /// Either request failing fails the whole load.
    pub async fn load(&self) -> Result<DashboardData> {
        let api = self.session.api().clone();
        debug!("loading dashboard");
        let result = self
            .session
            .authorized(|token| async move {
                tokio::try_join!(api.registrations(&token), api.stats(&token))
            })
            .await;

        match result {
            Ok((registrations, stats)) => {
                info!(count = registrations.len(), "dashboard loaded");
                Ok(DashboardData {
                    registrations,
                    stats,
                })
            }
            Err(e) => {
                self.report_failure(&e, "Failed to fetch data");
                Err(e)
            }
        }
    }

    /// Downloads the CSV export and hands it to `sink` unmodified.
    pub async fn export(&self, sink: &dyn DownloadSink) -> Result<ExportReceipt> {
        let api = self.session.api().clone();
        let result = async {
            let contents = self
                .session
                .authorized(|token| async move { api.export(&token).await })
                .await?;
            let path = sink.save(&export_filename(Utc::now().timestamp_millis()), &contents)?;
            let rows = match ExportReader::new(contents.as_slice()).count_rows() {
                Ok(rows) => Some(rows),
                Err(e) => {
                    warn!(error = %e, "saved export could not be parsed");
                    None
                }
            };
            Ok::<_, NeuronError>(ExportReceipt { path, rows })
        }
        .await;

        match result {
            Ok(receipt) => {
                info!(path = %receipt.path.display(), rows = ?receipt.rows, "registrations exported");
                self.session
                    .notifier()
                    .notify(Notice::success("Data exported successfully"));
                Ok(receipt)
            }
            Err(e) => {
                self.report_failure(&e, "Failed to export data");
                Err(e)
            }
        }
    }

    fn report_failure(&self, error: &NeuronError, message: &str) {
        // The session has already told the user about these.
        if matches!(
            error,
            NeuronError::Unauthenticated | NeuronError::Unauthorized(_)
        ) {
            return;
        }
        warn!(error = %error, "{message}");
        self.session.notifier().notify(Notice::error(message));
    }
}
