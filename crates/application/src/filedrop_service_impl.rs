use std::sync::Arc;

use domain::common::entity::Notice;
use domain::filedrop::entity::{AnalysisResult, StagedFile};
use domain::filedrop::staging::{self, StagingError};
use ports::secondary::backend_gateway::BackendGateway;
use ports::secondary::notification_sink::NotificationSink;
use ports::secondary::view_surface::ViewSurface;

use crate::render;

pub const FILE_LIST_CONTAINER: &str = "file-list";
pub const RESULTS_CONTAINER: &str = "analysis-results";
pub const FILE_COUNT_STAT: &str = "file-count";

/// The file-drop analysis view: a client-side staging list with upload
/// validation, and the analyze action that ships the staged payloads to
/// the backend and renders the per-file verdicts.
pub struct FileDropAppService {
    gateway: Arc<dyn BackendGateway>,
    surface: Arc<dyn ViewSurface>,
    sink: Arc<dyn NotificationSink>,
    staged: Vec<StagedFile>,
    last_results: Vec<AnalysisResult>,
}

impl FileDropAppService {
    pub fn new(
        gateway: Arc<dyn BackendGateway>,
        surface: Arc<dyn ViewSurface>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            gateway,
            surface,
            sink,
            staged: Vec::new(),
            last_results: Vec::new(),
        }
    }

    pub fn staged(&self) -> &[StagedFile] {
        &self.staged
    }

    /// Results of the most recent successful analysis, mirroring the
    /// cards left on the page.
    pub fn last_results(&self) -> &[AnalysisResult] {
        &self.last_results
    }

    /// Admit candidates into the staging list. Each candidate is
    /// validated independently: failures are collected and reported in
    /// one notification while the valid files are still added.
    pub fn stage(&mut self, candidates: Vec<StagedFile>) {
        let mut errors: Vec<StagingError> = Vec::new();
        let mut added = 0usize;

        for candidate in candidates {
            match staging::validate(&candidate, &self.staged) {
                Ok(()) => {
                    self.staged.push(candidate);
                    added += 1;
                }
                Err(err) => errors.push(err),
            }
        }

        if !errors.is_empty() {
            let combined = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n");
            self.sink.notify(&combined, Notice::Error);
        }
        if added > 0 {
            self.sink
                .notify(&format!("added {added} file(s)"), Notice::Success);
            self.update_list();
        }
    }

    /// Drop one staged file by list index. Out-of-range indices are
    /// ignored, the control can only reference a rendered row.
    pub fn remove(&mut self, index: usize) {
        if index >= self.staged.len() {
            return;
        }
        let removed = self.staged.remove(index);
        self.sink
            .notify(&format!("removed {}", removed.name), Notice::Success);
        self.update_list();
    }

    pub fn clear(&mut self) {
        if self.staged.is_empty() {
            self.sink.notify("no files to clear", Notice::Error);
            return;
        }
        self.staged.clear();
        self.sink.notify("staging list cleared", Notice::Success);
        self.update_list();
    }

    /// Ship the staged files for analysis. On success the result cards
    /// replace the results container and the staging list empties; on
    /// failure both the list and the previous results stay as they were.
    pub async fn analyze(&mut self) -> Result<(), StagingError> {
        if self.staged.is_empty() {
            self.sink
                .notify(&StagingError::NothingStaged.to_string(), Notice::Error);
            return Err(StagingError::NothingStaged);
        }

        self.sink.notify("running AI analysis…", Notice::Info);
        match self.gateway.analyze_files(&self.staged).await {
            Ok(outcome) => {
                let html = render::filedrop::result_cards(&outcome.results);
                self.surface.replace_content(RESULTS_CONTAINER, &html);
                self.sink.notify(&outcome.message, Notice::Success);
                self.last_results = outcome.results;
                self.staged.clear();
                self.update_list();
            }
            Err(err) => {
                tracing::warn!("file analysis failed: {err}");
                self.sink.notify(err.user_message(), Notice::Error);
            }
        }
        Ok(())
    }

    fn update_list(&self) {
        self.surface.set_text(
            FILE_COUNT_STAT,
            &format!("{} file(s)", self.staged.len()),
        );
        let html = render::filedrop::file_list(&self.staged);
        self.surface.replace_content(FILE_LIST_CONTAINER, &html);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::common::error::GatewayError;
    use domain::filedrop::entity::AnalysisResult;
    use ports::secondary::backend_gateway::AnalysisOutcome;
    use ports::test_utils::{RecordingSink, RecordingSurface, StubGateway};
    use std::sync::atomic::Ordering;

    struct Harness {
        gateway: Arc<StubGateway>,
        surface: Arc<RecordingSurface>,
        sink: Arc<RecordingSink>,
        service: FileDropAppService,
    }

    fn harness() -> Harness {
        let gateway = Arc::new(StubGateway::default());
        let surface = Arc::new(RecordingSurface::default());
        let sink = Arc::new(RecordingSink::default());
        let service = FileDropAppService::new(gateway.clone(), surface.clone(), sink.clone());
        Harness {
            gateway,
            surface,
            sink,
            service,
        }
    }

    fn file(name: &str, size: usize) -> StagedFile {
        StagedFile {
            name: name.to_string(),
            mime: Some("text/plain".to_string()),
            data: vec![0u8; size],
        }
    }

    #[test]
    fn staging_admits_valid_and_reports_invalid_in_one_pass() {
        let mut h = harness();
        h.service.stage(vec![
            file("notes.txt", 10),
            StagedFile {
                name: "tool.exe".to_string(),
                mime: Some("application/x-msdownload".to_string()),
                data: vec![0u8; 10],
            },
        ]);

        assert_eq!(h.service.staged().len(), 1);
        let messages = h.sink.messages();
        assert!(messages[0].0.contains("tool.exe"));
        assert_eq!(messages[0].1, Notice::Error);
        assert_eq!(messages[1], ("added 1 file(s)".to_string(), Notice::Success));
        assert_eq!(h.surface.text(FILE_COUNT_STAT).as_deref(), Some("1 file(s)"));
    }

    #[test]
    fn duplicates_are_rejected_against_already_staged_files() {
        let mut h = harness();
        h.service.stage(vec![file("a.txt", 10)]);
        h.service.stage(vec![file("a.txt", 10)]);

        assert_eq!(h.service.staged().len(), 1);
        let (message, severity) = h.sink.last().unwrap();
        assert!(message.contains("already staged"));
        assert_eq!(severity, Notice::Error);
    }

    #[test]
    fn remove_drops_by_index_and_rerenders() {
        let mut h = harness();
        h.service.stage(vec![file("a.txt", 1), file("b.txt", 2)]);

        h.service.remove(0);
        assert_eq!(h.service.staged().len(), 1);
        assert_eq!(h.service.staged()[0].name, "b.txt");

        // Out-of-range is a no-op.
        h.service.remove(5);
        assert_eq!(h.service.staged().len(), 1);
    }

    #[test]
    fn clear_on_empty_list_only_notifies() {
        let mut h = harness();
        h.service.clear();
        assert_eq!(
            h.sink.last(),
            Some(("no files to clear".to_string(), Notice::Error))
        );
    }

    #[tokio::test]
    async fn analyze_with_nothing_staged_never_reaches_the_gateway() {
        let mut h = harness();
        let result = h.service.analyze().await;
        assert_eq!(result, Err(StagingError::NothingStaged));
        assert_eq!(h.gateway.analyze_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn successful_analysis_renders_cards_and_empties_staging() {
        let mut h = harness();
        h.service.stage(vec![file("a.txt", 10)]);

        h.gateway.push_analyze(Ok(AnalysisOutcome {
            results: vec![AnalysisResult {
                filename: "a.txt".to_string(),
                error: None,
                is_white_traffic: true,
                confidence: 0.9,
                risk_score: 5,
                risk_factors: vec![],
                file_type: "text/plain".to_string(),
                details: None,
            }],
            message: "1 file analyzed".to_string(),
        }));
        h.service.analyze().await.unwrap();

        assert!(h.service.staged().is_empty());
        let cards = h.surface.content(RESULTS_CONTAINER).unwrap();
        assert!(cards.contains("white traffic"));
        assert_eq!(h.surface.text(FILE_COUNT_STAT).as_deref(), Some("0 file(s)"));
        assert_eq!(
            h.sink.last(),
            Some(("1 file analyzed".to_string(), Notice::Success))
        );
    }

    #[tokio::test]
    async fn failed_analysis_keeps_the_staging_list() {
        let mut h = harness();
        h.service.stage(vec![file("a.txt", 10)]);

        h.gateway
            .push_analyze(Err(GatewayError::Logical("model unavailable".to_string())));
        h.service.analyze().await.unwrap();

        assert_eq!(h.service.staged().len(), 1);
        assert_eq!(
            h.sink.last(),
            Some(("model unavailable".to_string(), Notice::Error))
        );
        assert!(h.surface.content(RESULTS_CONTAINER).is_none());
    }
}
