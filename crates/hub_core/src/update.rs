use crate::mock::mock_upload;
use crate::prompts::{document_prompt, rename_prompt};
use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Navigate(view) => cancel_if(state.navigate(view)),
        Msg::ToggleSidebar => {
            state.toggle_sidebar();
            Vec::new()
        }
        Msg::CloseSidebar => {
            state.close_sidebar();
            Vec::new()
        }
        Msg::ToggleLandingMenu => {
            state.toggle_landing_menu();
            Vec::new()
        }
        Msg::ToggleTheme => {
            state.toggle_theme();
            Vec::new()
        }
        Msg::MockFilesSelected => cancel_if(state.replace_files(mock_upload())),
        Msg::FileRemoved(file_id) => {
            state.remove_file(file_id);
            Vec::new()
        }
        Msg::ConvertClicked => match state.start_job() {
            Some(token) => vec![Effect::StartJob { token }],
            None => Vec::new(),
        },
        Msg::JobProgress { token, percent } => {
            state.apply_progress(token, percent);
            Vec::new()
        }
        Msg::JobCompleted { token } => {
            state.apply_completed(token);
            Vec::new()
        }
        Msg::JobFailed { token, reason } => {
            state.apply_failed(token, reason);
            Vec::new()
        }
        Msg::DownloadAllClicked => {
            state.acknowledge_download();
            Vec::new()
        }
        Msg::DismissJobNotice => cancel_if(state.reset_job()),
        Msg::PdfOperationSelected(operation) => {
            state.select_pdf_operation(operation);
            Vec::new()
        }
        Msg::DocInputChanged(text) => {
            state.set_doc_input(text);
            Vec::new()
        }
        Msg::DocInputCleared => {
            state.set_doc_input(String::new());
            Vec::new()
        }
        Msg::DocOperationClicked(operation) => match state.begin_doc_request() {
            Some((request, input)) => vec![Effect::RequestCompletion {
                request,
                prompt: document_prompt(operation, &input),
            }],
            None => Vec::new(),
        },
        Msg::SmartRenameClicked(file_id) => match state.begin_rename(file_id) {
            Some((request, name)) => vec![Effect::RequestCompletion {
                request,
                prompt: rename_prompt(&name),
            }],
            None => Vec::new(),
        },
        Msg::AiReplied { request, outcome } => {
            state.apply_ai_reply(request, outcome);
            Vec::new()
        }
        Msg::AlertDismissed => {
            state.dismiss_alert();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn cancel_if(was_running: bool) -> Vec<Effect> {
    if was_running {
        vec![Effect::CancelJob]
    } else {
        Vec::new()
    }
}
