use std::collections::BTreeMap;

use hub_logging::{hub_debug, hub_info};

use crate::view_model::{format_bytes, AppViewModel, DocPanelView, FileRowView, JobView};

pub type FileId = u64;
pub type RequestId = u64;

/// Written into the document output when the text-generation call fails.
pub const AI_FALLBACK_MESSAGE: &str = "Sorry, I couldn't process that request right now.";

/// Shown as a blocking alert when no credential is configured.
pub const MISSING_CREDENTIAL_ALERT: &str =
    "API Key is missing. This feature requires the Gemini API.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Landing,
    Dashboard,
    ImageTool,
    PdfTool,
    DocTool,
    History,
}

impl View {
    pub const ALL: [View; 6] = [
        View::Landing,
        View::Dashboard,
        View::ImageTool,
        View::PdfTool,
        View::DocTool,
        View::History,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            View::Landing => "landing",
            View::Dashboard => "dashboard",
            View::ImageTool => "tool-image",
            View::PdfTool => "tool-pdf",
            View::DocTool => "tool-doc",
            View::History => "history",
        }
    }

    /// Accepts the slug as well as the short names used on the command line.
    pub fn from_slug(raw: &str) -> Option<View> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "landing" | "home" => Some(View::Landing),
            "dashboard" => Some(View::Dashboard),
            "tool-image" | "image" | "images" => Some(View::ImageTool),
            "tool-pdf" | "pdf" => Some(View::PdfTool),
            "tool-doc" | "doc" | "docs" => Some(View::DocTool),
            "history" => Some(View::History),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Tab selector of the PDF toolkit. There is no document model behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PdfOperation {
    #[default]
    Merge,
    Reorder,
    Unlock,
    Compress,
}

impl PdfOperation {
    pub const ALL: [PdfOperation; 4] = [
        PdfOperation::Merge,
        PdfOperation::Reorder,
        PdfOperation::Unlock,
        PdfOperation::Compress,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PdfOperation::Merge => "merge",
            PdfOperation::Reorder => "reorder",
            PdfOperation::Unlock => "unlock",
            PdfOperation::Compress => "compress",
        }
    }

    pub fn from_label(raw: &str) -> Option<PdfOperation> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|op| op.label().eq_ignore_ascii_case(raw))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocOperation {
    Summarize,
    Polish,
    Translate,
    ExtractActions,
}

impl DocOperation {
    pub const ALL: [DocOperation; 4] = [
        DocOperation::Summarize,
        DocOperation::Polish,
        DocOperation::Translate,
        DocOperation::ExtractActions,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DocOperation::Summarize => "Summarize",
            DocOperation::Polish => "Polish Grammar",
            DocOperation::Translate => "Translate to Spanish",
            DocOperation::ExtractActions => "Extract Actions",
        }
    }

    pub fn from_keyword(raw: &str) -> Option<DocOperation> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "summarize" | "summary" => Some(DocOperation::Summarize),
            "polish" => Some(DocOperation::Polish),
            "translate" => Some(DocOperation::Translate),
            "actions" | "extract" => Some(DocOperation::ExtractActions),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub id: FileId,
    pub name: String,
    pub size_bytes: u64,
    pub mime_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobPhase {
    #[default]
    Idle,
    Running,
    Completed,
    Failed,
}

/// Identifies one conversion run. Tokens are never reused within a session,
/// so events from a superseded run can be told apart from the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JobToken(pub u64);

/// Failure reported back for a text-generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiFailure {
    MissingCredential,
    Upstream(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
struct Navigation {
    view: View,
    sidebar_open: bool,
    landing_menu_open: bool,
    theme: Theme,
}

#[derive(Debug, Clone, PartialEq, Default)]
struct Job {
    phase: JobPhase,
    progress: f64,
    active: Option<JobToken>,
    failure: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
struct DocAssistant {
    input: String,
    output: String,
    pending: Option<RequestId>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    nav: Navigation,
    files: Vec<UploadedFile>,
    job: Job,
    doc: DocAssistant,
    pdf_operation: PdfOperation,
    /// Files with an outstanding rename suggestion, keyed by file.
    renaming: BTreeMap<FileId, RequestId>,
    alert: Option<String>,
    last_token: u64,
    last_request: RequestId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            view: self.nav.view,
            sidebar_open: self.nav.sidebar_open,
            landing_menu_open: self.nav.landing_menu_open,
            theme: self.nav.theme,
            files: self
                .files
                .iter()
                .map(|file| FileRowView {
                    id: file.id,
                    name: file.name.clone(),
                    size_label: format_bytes(file.size_bytes),
                    mime_type: file.mime_type.clone(),
                    renaming: self.renaming.contains_key(&file.id),
                })
                .collect(),
            job: JobView {
                phase: self.job.phase,
                progress_percent: self.job.progress,
                failure: self.job.failure.clone(),
                file_count: self.files.len(),
            },
            doc: DocPanelView {
                input: self.doc.input.clone(),
                output: self.doc.output.clone(),
                is_loading: self.doc.pending.is_some(),
                can_run: self.can_run_doc_operation(),
            },
            pdf_operation: self.pdf_operation,
            alert: self.alert.clone(),
            dirty: self.dirty,
        }
    }

    pub fn current_view(&self) -> View {
        self.nav.view
    }

    pub fn files(&self) -> &[UploadedFile] {
        &self.files
    }

    pub fn job_phase(&self) -> JobPhase {
        self.job.phase
    }

    pub fn progress(&self) -> f64 {
        self.job.progress
    }

    pub fn active_job(&self) -> Option<JobToken> {
        self.job.active
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Applies the navigation reset. Returns true when a running job was
    /// dropped and must be cancelled on the engine side.
    pub(crate) fn navigate(&mut self, view: View) -> bool {
        hub_info!("Navigate {} -> {}", self.nav.view.slug(), view.slug());
        self.nav.view = view;
        self.files.clear();
        let was_running = self.reset_job();
        self.doc = DocAssistant::default();
        self.renaming.clear();
        self.nav.landing_menu_open = false;
        if view != View::Landing {
            self.nav.sidebar_open = false;
        }
        self.mark_dirty();
        was_running
    }

    pub(crate) fn toggle_sidebar(&mut self) {
        self.nav.sidebar_open = !self.nav.sidebar_open;
        self.mark_dirty();
    }

    pub(crate) fn close_sidebar(&mut self) {
        if self.nav.sidebar_open {
            self.nav.sidebar_open = false;
            self.mark_dirty();
        }
    }

    pub(crate) fn toggle_landing_menu(&mut self) {
        self.nav.landing_menu_open = !self.nav.landing_menu_open;
        self.mark_dirty();
    }

    pub(crate) fn toggle_theme(&mut self) {
        self.nav.theme = self.nav.theme.toggled();
        self.mark_dirty();
    }

    /// Replaces the file list. Returns true when a running job was dropped.
    pub(crate) fn replace_files(&mut self, files: Vec<UploadedFile>) -> bool {
        self.files = files;
        self.renaming.clear();
        let was_running = self.reset_job();
        self.mark_dirty();
        was_running
    }

    pub(crate) fn remove_file(&mut self, file_id: FileId) -> bool {
        let before = self.files.len();
        self.files.retain(|file| file.id != file_id);
        if self.files.len() == before {
            return false;
        }
        self.renaming.remove(&file_id);
        self.mark_dirty();
        true
    }

    /// `Idle|Failed -> Running`. Returns `None` when the start is rejected:
    /// a run is active, a finished run still awaits download or reset, or
    /// there is nothing to convert.
    pub(crate) fn start_job(&mut self) -> Option<JobToken> {
        let startable = matches!(self.job.phase, JobPhase::Idle | JobPhase::Failed);
        if !startable || self.files.is_empty() {
            return None;
        }
        self.last_token += 1;
        let token = JobToken(self.last_token);
        self.job = Job {
            phase: JobPhase::Running,
            progress: 0.0,
            active: Some(token),
            failure: None,
        };
        hub_info!("Job {:?} started for {} files", token, self.files.len());
        self.mark_dirty();
        Some(token)
    }

    fn is_active(&self, token: JobToken) -> bool {
        self.job.phase == JobPhase::Running && self.job.active == Some(token)
    }

    pub(crate) fn apply_progress(&mut self, token: JobToken, percent: f64) {
        if !self.is_active(token) {
            hub_debug!("Dropping progress for stale job {:?}", token);
            return;
        }
        let clamped = if percent.is_nan() {
            self.job.progress
        } else {
            percent.clamp(0.0, 100.0)
        };
        if clamped > self.job.progress {
            self.job.progress = clamped;
            self.mark_dirty();
        }
    }

    pub(crate) fn apply_completed(&mut self, token: JobToken) {
        if !self.is_active(token) {
            hub_debug!("Dropping completion for stale job {:?}", token);
            return;
        }
        self.job.progress = 100.0;
        self.job.phase = JobPhase::Completed;
        self.job.active = None;
        hub_info!("Job {:?} completed", token);
        self.mark_dirty();
    }

    pub(crate) fn apply_failed(&mut self, token: JobToken, reason: String) {
        if !self.is_active(token) {
            hub_debug!("Dropping failure for stale job {:?}", token);
            return;
        }
        self.job.phase = JobPhase::Failed;
        self.job.active = None;
        self.job.failure = Some(reason);
        self.mark_dirty();
    }

    /// `reset()` of the job state machine. Returns true if a run was active.
    pub(crate) fn reset_job(&mut self) -> bool {
        let was_running = self.job.phase == JobPhase::Running;
        if self.job != Job::default() {
            self.job = Job::default();
            self.mark_dirty();
        }
        was_running
    }

    pub(crate) fn acknowledge_download(&mut self) -> bool {
        if self.job.phase != JobPhase::Completed {
            return false;
        }
        self.job = Job::default();
        self.files.clear();
        self.renaming.clear();
        self.mark_dirty();
        true
    }

    pub(crate) fn select_pdf_operation(&mut self, operation: PdfOperation) {
        if self.pdf_operation != operation {
            self.pdf_operation = operation;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_doc_input(&mut self, text: String) {
        if self.doc.input != text {
            self.doc.input = text;
            self.mark_dirty();
        }
    }

    fn can_run_doc_operation(&self) -> bool {
        !self.doc.input.trim().is_empty() && self.doc.pending.is_none()
    }

    /// Marks the assistant as loading and returns the input and request id
    /// to send, or `None` when the operation is not available.
    pub(crate) fn begin_doc_request(&mut self) -> Option<(RequestId, String)> {
        if !self.can_run_doc_operation() {
            return None;
        }
        let request = self.next_request_id();
        self.doc.pending = Some(request);
        self.mark_dirty();
        Some((request, self.doc.input.clone()))
    }

    pub(crate) fn begin_rename(&mut self, file_id: FileId) -> Option<(RequestId, String)> {
        if self.renaming.contains_key(&file_id) {
            return None;
        }
        let name = self.files.iter().find(|f| f.id == file_id)?.name.clone();
        let request = self.next_request_id();
        self.renaming.insert(file_id, request);
        self.mark_dirty();
        Some((request, name))
    }

    fn next_request_id(&mut self) -> RequestId {
        self.last_request += 1;
        self.last_request
    }

    /// Routes a text-generation reply to whichever request issued it.
    /// Replies for requests that were reset away are dropped.
    pub(crate) fn apply_ai_reply(
        &mut self,
        request: RequestId,
        outcome: Result<String, AiFailure>,
    ) {
        if self.doc.pending == Some(request) {
            self.doc.pending = None;
            match outcome {
                Ok(text) => self.doc.output = text,
                Err(AiFailure::MissingCredential) => {
                    self.alert = Some(MISSING_CREDENTIAL_ALERT.to_string());
                }
                Err(AiFailure::Upstream(reason)) => {
                    hub_debug!("Document request {} failed: {}", request, reason);
                    self.doc.output = AI_FALLBACK_MESSAGE.to_string();
                }
            }
            self.mark_dirty();
            return;
        }

        let file_id = self
            .renaming
            .iter()
            .find_map(|(file_id, pending)| (*pending == request).then_some(*file_id));
        let Some(file_id) = file_id else {
            hub_debug!("Dropping reply for stale request {}", request);
            return;
        };
        self.renaming.remove(&file_id);
        match outcome {
            Ok(text) => {
                let suggested = text.trim();
                if !suggested.is_empty() {
                    if let Some(file) = self.files.iter_mut().find(|f| f.id == file_id) {
                        hub_info!("Renamed file {} to {}", file_id, suggested);
                        file.name = suggested.to_string();
                    }
                }
            }
            Err(AiFailure::MissingCredential) => {
                self.alert = Some(MISSING_CREDENTIAL_ALERT.to_string());
            }
            Err(AiFailure::Upstream(reason)) => {
                hub_debug!("Rename request {} failed: {}", request, reason);
            }
        }
        self.mark_dirty();
    }

    pub(crate) fn dismiss_alert(&mut self) {
        if self.alert.take().is_some() {
            self.mark_dirty();
        }
    }
}
