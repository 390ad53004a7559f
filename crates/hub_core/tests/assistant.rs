use hub_core::{
    update, AiFailure, AppState, DocOperation, Effect, Msg, RequestId, View,
    AI_FALLBACK_MESSAGE, MISSING_CREDENTIAL_ALERT,
};
use pretty_assertions::assert_eq;

fn doc_session(input: &str) -> AppState {
    let (state, _) = update(AppState::new(), Msg::Navigate(View::DocTool));
    let (state, _) = update(state, Msg::DocInputChanged(input.to_string()));
    state
}

fn single_request(effects: &[Effect]) -> (RequestId, String) {
    match effects {
        [Effect::RequestCompletion { request, prompt }] => (*request, prompt.clone()),
        other => panic!("expected one RequestCompletion, got {other:?}"),
    }
}

fn image_session() -> AppState {
    let (state, _) = update(AppState::new(), Msg::Navigate(View::ImageTool));
    let (state, _) = update(state, Msg::MockFilesSelected);
    state
}

#[test]
fn doc_operation_builds_prompt_and_sets_loading() {
    let state = doc_session("We met on Monday.");
    let (state, effects) = update(state, Msg::DocOperationClicked(DocOperation::Summarize));
    let (_request, prompt) = single_request(&effects);

    assert_eq!(
        prompt,
        "Summarize the following text in 3 concise bullet points:\n\nWe met on Monday."
    );
    let view = state.view();
    assert!(view.doc.is_loading);
    assert!(!view.doc.can_run);
}

#[test]
fn doc_operation_needs_input_and_no_pending_call() {
    let state = doc_session("   ");
    let (state, effects) = update(state, Msg::DocOperationClicked(DocOperation::Polish));
    assert!(effects.is_empty());
    assert!(!state.view().doc.is_loading);

    let (state, _) = update(state, Msg::DocInputChanged("draft".to_string()));
    let (state, effects) = update(state, Msg::DocOperationClicked(DocOperation::Polish));
    assert_eq!(effects.len(), 1);
    let (_state, effects) = update(state, Msg::DocOperationClicked(DocOperation::Translate));
    assert!(effects.is_empty());
}

#[test]
fn doc_reply_success_writes_output() {
    let state = doc_session("notes");
    let (state, effects) = update(state, Msg::DocOperationClicked(DocOperation::ExtractActions));
    let (request, _) = single_request(&effects);

    let (state, _) = update(
        state,
        Msg::AiReplied {
            request,
            outcome: Ok("- ship it".to_string()),
        },
    );
    let view = state.view();
    assert_eq!(view.doc.output, "- ship it");
    assert!(!view.doc.is_loading);
    assert!(view.doc.can_run);
}

#[test]
fn doc_reply_empty_text_is_success() {
    let state = doc_session("notes");
    let (state, effects) = update(state, Msg::DocOperationClicked(DocOperation::Summarize));
    let (request, _) = single_request(&effects);

    let (state, _) = update(
        state,
        Msg::AiReplied {
            request,
            outcome: Ok(String::new()),
        },
    );
    assert_eq!(state.view().doc.output, "");
    assert_eq!(state.view().alert, None);
}

#[test]
fn doc_reply_upstream_failure_writes_fallback() {
    let state = doc_session("notes");
    let (state, effects) = update(state, Msg::DocOperationClicked(DocOperation::Summarize));
    let (request, _) = single_request(&effects);

    let (state, _) = update(
        state,
        Msg::AiReplied {
            request,
            outcome: Err(AiFailure::Upstream("http status 500".to_string())),
        },
    );
    let view = state.view();
    assert_eq!(view.doc.output, AI_FALLBACK_MESSAGE);
    assert!(!view.doc.is_loading);
    assert_eq!(view.alert, None);
}

#[test]
fn missing_credential_raises_alert() {
    let state = doc_session("notes");
    let (state, effects) = update(state, Msg::DocOperationClicked(DocOperation::Summarize));
    let (request, _) = single_request(&effects);

    let (state, _) = update(
        state,
        Msg::AiReplied {
            request,
            outcome: Err(AiFailure::MissingCredential),
        },
    );
    let view = state.view();
    assert_eq!(view.alert.as_deref(), Some(MISSING_CREDENTIAL_ALERT));
    assert_eq!(view.doc.output, "");
    assert!(!view.doc.is_loading);

    let (state, _) = update(state, Msg::AlertDismissed);
    assert_eq!(state.view().alert, None);
}

#[test]
fn smart_rename_overwrites_name_and_clears_marker() {
    let (state, effects) = update(image_session(), Msg::SmartRenameClicked(2));
    let (request, prompt) = single_request(&effects);
    assert!(prompt.contains("\"vacation_photo.jpg\""));
    assert!(state.view().files[1].renaming);

    let (state, _) = update(
        state,
        Msg::AiReplied {
            request,
            outcome: Ok("  beach-sunset.jpg\n".to_string()),
        },
    );
    let row = &state.view().files[1];
    assert_eq!(row.name, "beach-sunset.jpg");
    assert!(!row.renaming);
}

#[test]
fn concurrent_renames_resolve_in_any_order() {
    let state = image_session();
    let (state, first) = update(state, Msg::SmartRenameClicked(1));
    let (state, third) = update(state, Msg::SmartRenameClicked(3));
    let (first, _) = single_request(&first);
    let (third, _) = single_request(&third);

    let (state, _) = update(
        state,
        Msg::AiReplied {
            request: third,
            outcome: Ok("mockup.webp".to_string()),
        },
    );
    let (state, _) = update(
        state,
        Msg::AiReplied {
            request: first,
            outcome: Ok("screenshot.png".to_string()),
        },
    );

    let names: Vec<_> = state.view().files.into_iter().map(|f| f.name).collect();
    assert_eq!(names, vec!["screenshot.png", "vacation_photo.jpg", "mockup.webp"]);
}

#[test]
fn rename_twice_for_same_file_is_ignored_while_pending() {
    let (state, effects) = update(image_session(), Msg::SmartRenameClicked(1));
    assert_eq!(effects.len(), 1);
    let (state, effects) = update(state, Msg::SmartRenameClicked(1));
    assert!(effects.is_empty());
    let (_state, effects) = update(state, Msg::SmartRenameClicked(99));
    assert!(effects.is_empty());
}

#[test]
fn rename_failure_keeps_name_and_clears_marker() {
    let (state, effects) = update(image_session(), Msg::SmartRenameClicked(1));
    let (request, _) = single_request(&effects);

    let (state, _) = update(
        state,
        Msg::AiReplied {
            request,
            outcome: Err(AiFailure::Upstream("network error".to_string())),
        },
    );
    let row = &state.view().files[0];
    assert_eq!(row.name, "screenshot_2024.png");
    assert!(!row.renaming);
    assert_eq!(state.view().doc.output, "");
}

#[test]
fn rename_reply_for_removed_file_is_dropped() {
    let (state, effects) = update(image_session(), Msg::SmartRenameClicked(2));
    let (request, _) = single_request(&effects);
    let (state, _) = update(state, Msg::FileRemoved(2));

    let (state, _) = update(
        state,
        Msg::AiReplied {
            request,
            outcome: Ok("renamed.jpg".to_string()),
        },
    );
    let names: Vec<_> = state.view().files.into_iter().map(|f| f.name).collect();
    assert_eq!(names, vec!["screenshot_2024.png", "design_mockup.webp"]);
}
