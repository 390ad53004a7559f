use crate::{JobToken, RequestId};

/// Work the front end must perform on behalf of the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Begin a conversion run; progress must be reported with `token`.
    StartJob { token: JobToken },
    /// Stop the current conversion run, if any.
    CancelJob,
    /// Send `prompt` to the text-generation service and answer with
    /// [`crate::Msg::AiReplied`] carrying the same `request`.
    RequestCompletion { request: RequestId, prompt: String },
}
