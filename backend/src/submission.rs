//! Remote acceptance of generated schedules.
//!
//! A month is persisted only after the submitter accepts it.

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use crate::{error::ScheduleError, models::schedule::ScheduleDay};

#[async_trait]
pub trait ScheduleSubmitter: Send + Sync {
    async fn submit(&self, employee_id: Uuid, days: &[ScheduleDay]) -> Result<(), ScheduleError>;
}

#[derive(Serialize)]
struct SubmissionPayload<'a> {
    employee_id: Uuid,
    days: &'a [ScheduleDay],
}

/// POSTs each generated month as JSON; any non-2xx answer is a rejection.
#[derive(Clone)]
pub struct HttpSubmitter {
    client: reqwest::Client,
    url: String,
}

impl HttpSubmitter {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl ScheduleSubmitter for HttpSubmitter {
    async fn submit(&self, employee_id: Uuid, days: &[ScheduleDay]) -> Result<(), ScheduleError> {
        let resp = self
            .client
            .post(&self.url)
            .json(&SubmissionPayload { employee_id, days })
            .send()
            .await
            .map_err(|e| ScheduleError::SubmissionRejected(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ScheduleError::SubmissionRejected(format!(
                "{status}: {}",
                body.trim()
            )));
        }

        tracing::info!(%employee_id, days = days.len(), "Schedule accepted");
        Ok(())
    }
}

/// Accepts everything; used when no submission endpoint is configured.
#[derive(Clone, Copy, Default)]
pub struct LoggingSubmitter;

#[async_trait]
impl ScheduleSubmitter for LoggingSubmitter {
    async fn submit(&self, employee_id: Uuid, days: &[ScheduleDay]) -> Result<(), ScheduleError> {
        tracing::info!(
            %employee_id,
            days = days.len(),
            work_days = days.iter().filter(|d| d.is_work_day).count(),
            "Schedule submission skipped, no endpoint configured"
        );
        Ok(())
    }
}
