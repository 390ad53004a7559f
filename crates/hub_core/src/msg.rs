use crate::{AiFailure, DocOperation, FileId, JobToken, PdfOperation, RequestId, View};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User picked a view from the sidebar, header or landing page.
    Navigate(View),
    ToggleSidebar,
    /// Sidebar backdrop or close button.
    CloseSidebar,
    ToggleLandingMenu,
    ToggleTheme,
    /// User clicked the upload area; the session receives the mock file set.
    MockFilesSelected,
    FileRemoved(FileId),
    /// User clicked "Convert N Files".
    ConvertClicked,
    /// Job runner progress for a run.
    JobProgress { token: JobToken, percent: f64 },
    /// Job runner reached 100%.
    JobCompleted { token: JobToken },
    /// Job runner gave up.
    JobFailed { token: JobToken, reason: String },
    /// User acknowledged a finished run with "Download All".
    DownloadAllClicked,
    /// User closed the job toast.
    DismissJobNotice,
    PdfOperationSelected(PdfOperation),
    /// User edited the document assistant input.
    DocInputChanged(String),
    DocInputCleared,
    DocOperationClicked(DocOperation),
    /// User asked for an AI filename suggestion.
    SmartRenameClicked(FileId),
    /// Text-generation reply for a request issued via `Effect::RequestCompletion`.
    AiReplied {
        request: RequestId,
        outcome: Result<String, AiFailure>,
    },
    AlertDismissed,
    /// Fallback for placeholder wiring.
    NoOp,
}
