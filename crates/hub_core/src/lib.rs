//! ConvertHub core: pure session state machine and view-model helpers.
//!
//! Nothing in this crate performs IO. Front ends feed [`Msg`]s into
//! [`update`] and execute the returned [`Effect`]s.
mod effect;
mod mock;
mod msg;
mod prompts;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use mock::{mock_upload, HistoryEntry, HistoryStatus, MOCK_HISTORY, PDF_PAGES};
pub use msg::Msg;
pub use prompts::{document_prompt, rename_prompt};
pub use state::{
    AiFailure, AppState, DocOperation, FileId, JobPhase, JobToken, PdfOperation, RequestId,
    Theme, UploadedFile, View, AI_FALLBACK_MESSAGE, MISSING_CREDENTIAL_ALERT,
};
pub use update::update;
pub use view_model::{format_bytes, AppViewModel, DocPanelView, FileRowView, JobView};
