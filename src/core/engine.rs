use crate::core::Pipeline;
use crate::domain::model::{FileOutcome, OutcomeStatus, UploadedFile};
use crate::utils::monitor::SystemMonitor;

/// Processes uploads one at a time, in upload order. A failing file never
/// stops the batch.
pub struct ReaderEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> ReaderEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn process(&self, upload: &UploadedFile) -> FileOutcome {
        let outcome = self.pipeline.process(upload).await;
        self.monitor.log_file_stats(upload.name());
        outcome
    }

    pub async fn run(&self, uploads: &[UploadedFile]) -> Vec<FileOutcome> {
        self.run_entries(uploads.iter().map(Ok)).await
    }

    /// Runs a batch in which some inputs could not be read. An `Err` entry
    /// already carries its outcome and is passed through in place.
    pub async fn run_entries<'a, I>(&self, entries: I) -> Vec<FileOutcome>
    where
        I: IntoIterator<Item = Result<&'a UploadedFile, FileOutcome>>,
    {
        let entries = entries.into_iter();
        tracing::info!("🚀 Processing {} uploaded file(s)", entries.size_hint().0);

        let mut outcomes = Vec::with_capacity(entries.size_hint().0);
        for entry in entries {
            let outcome = match entry {
                Ok(upload) => self.process(upload).await,
                Err(unreadable) => {
                    tracing::warn!("⚠️ Skipping {}: input could not be read", unreadable.name());
                    unreadable
                }
            };
            outcomes.push(outcome);
        }

        let converted = outcomes
            .iter()
            .filter(|outcome| outcome.status() == OutcomeStatus::Converted)
            .count();
        tracing::info!(
            "🏁 Finished: {} of {} file(s) converted",
            converted,
            outcomes.len()
        );
        self.monitor.log_final_stats(outcomes.len());

        outcomes
    }
}
