//! Prompt templates sent to the text-generation service.
use crate::DocOperation;

/// Wraps the assistant input in the instruction for `operation`.
pub fn document_prompt(operation: DocOperation, input: &str) -> String {
    let instruction = match operation {
        DocOperation::Summarize => "Summarize the following text in 3 concise bullet points:",
        DocOperation::Polish => "Fix grammar and polish the tone of this text to be professional:",
        DocOperation::Translate => "Translate the following text to Spanish:",
        DocOperation::ExtractActions => "Extract action items and to-dos from this text:",
    };
    format!("{instruction}\n\n{input}")
}

/// Asks for a replacement filename; the reply is expected to be the bare name.
pub fn rename_prompt(current_name: &str) -> String {
    format!(
        "Suggest a single, clean, SEO-friendly filename (with extension) for an image currently named \"{current_name}\". Return ONLY the filename, nothing else."
    )
}
