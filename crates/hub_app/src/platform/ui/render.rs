//! Plain-text renderers. Everything shown is derived from `AppViewModel`.
use hub_core::{
    AppViewModel, DocOperation, DocPanelView, FileRowView, HistoryStatus, JobPhase, JobView,
    PdfOperation, Theme, View, MOCK_HISTORY, PDF_PAGES,
};

const BAR_WIDTH: usize = 30;

const FEATURES: [(&str, &str); 3] = [
    (
        "Smart Image Optimization",
        "Compress PNG, JPG, WebP and AVIF with zero visual quality loss.",
    ),
    (
        "PDF Toolkit",
        "Merge, split, reorder, unlock, and compress PDFs securely in the browser.",
    ),
    (
        "API First",
        "Automate your workflows with our robust Node.js and Python SDKs.",
    ),
];

pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(alert) = &view.alert {
        lines.push(format!("!! {alert}  (type `ok` to dismiss)"));
    }

    if view.view == View::Landing {
        render_landing(view, &mut lines);
        return lines;
    }

    render_header(view, &mut lines);
    if view.sidebar_open {
        render_sidebar(view.view, &mut lines);
    }
    match view.view {
        View::Dashboard => render_dashboard(&mut lines),
        View::ImageTool => render_image_tool(&view.files, &view.job, &mut lines),
        View::PdfTool => render_pdf_tool(view.pdf_operation, &mut lines),
        View::DocTool => render_doc_tool(&view.doc, &mut lines),
        View::History => lines.push("Job history: Coming Soon".to_string()),
        View::Landing => {}
    }
    render_job_toast(view, &mut lines);
    lines
}

fn render_landing(view: &AppViewModel, lines: &mut Vec<String>) {
    lines.push("ConvertHub".to_string());
    if view.landing_menu_open {
        lines.push("  Features | Pricing | Docs | Get Started".to_string());
    }
    lines.push("Upload files to start (drag & drop or click to browse)".to_string());
    for (title, desc) in FEATURES {
        lines.push(format!("  * {title}: {desc}"));
    }
}

fn render_header(view: &AppViewModel, lines: &mut Vec<String>) {
    let theme = match view.theme {
        Theme::Light => "light",
        Theme::Dark => "dark",
    };
    lines.push(format!("ConvertHub / Workspace / {}  [{theme}]", view_title(view.view)));
}

fn render_sidebar(active: View, lines: &mut Vec<String>) {
    lines.push("+-- Tools".to_string());
    for view in [View::ImageTool, View::PdfTool, View::DocTool] {
        lines.push(nav_entry(view, active));
    }
    lines.push("+-- Workspace".to_string());
    for view in [View::Dashboard, View::History] {
        lines.push(nav_entry(view, active));
    }
    lines.push("|   Free Plan 5/10 used".to_string());
}

fn nav_entry(view: View, active: View) -> String {
    let marker = if view == active { '>' } else { ' ' };
    format!("| {marker} {}", view_title(view))
}

fn view_title(view: View) -> &'static str {
    match view {
        View::Landing => "Home",
        View::Dashboard => "Dashboard",
        View::ImageTool => "Image Tools",
        View::PdfTool => "PDF Tools",
        View::DocTool => "Document Tools",
        View::History => "Job History",
    }
}

fn render_dashboard(lines: &mut Vec<String>) {
    lines.push("Welcome to ConvertHub. Start converting your files instantly.".to_string());
    lines.push("Recent Jobs".to_string());
    for entry in MOCK_HISTORY {
        let status = match entry.status {
            HistoryStatus::Completed => "completed",
            HistoryStatus::Failed => "failed",
        };
        lines.push(format!(
            "  {:<24} {:<16} {:<18} {:<10} {}",
            entry.name, entry.kind, entry.size, status, entry.when
        ));
    }
}

fn render_image_tool(files: &[FileRowView], job: &JobView, lines: &mut Vec<String>) {
    lines.push("Tools > Images: convert, compress, and resize images in bulk.".to_string());
    if files.is_empty() {
        lines.push("  [ click `upload` to select files ]".to_string());
        return;
    }
    for file in files {
        let marker = if file.renaming { " (renaming...)" } else { "" };
        lines.push(format!(
            "  #{} {} - {} {}{marker}",
            file.id, file.name, file.size_label, file.mime_type
        ));
    }
    lines.push(format!("  Output: WEBP, quality 80%  [{}]", job.action_label()));
}

fn render_pdf_tool(active: PdfOperation, lines: &mut Vec<String>) {
    let tabs: Vec<String> = PdfOperation::ALL
        .into_iter()
        .map(|op| {
            if op == active {
                format!("[{}]", op.label())
            } else {
                op.label().to_string()
            }
        })
        .collect();
    lines.push(format!("Tools > PDF: {}", tabs.join(" ")));
    match active {
        PdfOperation::Merge | PdfOperation::Reorder => {
            let pages: Vec<String> = PDF_PAGES.iter().map(|p| format!("p{p}")).collect();
            lines.push(format!("  pages: {}", pages.join(" ")));
        }
        PdfOperation::Unlock => lines.push("  Drop a password-protected PDF to unlock".to_string()),
        PdfOperation::Compress => lines.push("  Drop a PDF to compress".to_string()),
    }
}

fn render_doc_tool(doc: &DocPanelView, lines: &mut Vec<String>) {
    lines.push("Tools > Document Assistant (AI powered)".to_string());
    if doc.input.is_empty() {
        lines.push("  input: (empty, use `input <text>`)".to_string());
    } else {
        lines.push(format!("  input: {}", doc.input));
    }
    if doc.is_loading {
        lines.push("  result: ...".to_string());
    } else if doc.output.is_empty() {
        lines.push("  result: AI output will appear here.".to_string());
    } else {
        lines.push("  result:".to_string());
        lines.extend(doc.output.lines().map(|line| format!("    {line}")));
    }
    let operations: Vec<&str> = DocOperation::ALL.into_iter().map(DocOperation::label).collect();
    if doc.can_run {
        lines.push(format!("  actions: {}", operations.join(" | ")));
    } else if !doc.is_loading {
        lines.push("  (operations need some input text)".to_string());
    }
}

/// Floating status box shown over any workspace view.
fn render_job_toast(view: &AppViewModel, lines: &mut Vec<String>) {
    match view.job.phase {
        JobPhase::Running => {
            lines.push(format!(
                "Processing files {} {:.0}%",
                progress_bar(view.job.progress_percent),
                view.job.progress_percent
            ));
        }
        JobPhase::Completed if view.files.is_empty() && view.view != View::ImageTool => {
            lines.push("Download ready: your files have been processed.".to_string());
        }
        JobPhase::Failed => {
            let reason = view.job.failure.as_deref().unwrap_or("unknown error");
            lines.push(format!("Conversion failed: {reason}"));
        }
        _ => {}
    }
}

fn progress_bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

#[cfg(test)]
mod tests {
    use hub_core::{update, AppState, Msg};

    use super::*;

    fn rendered(msgs: impl IntoIterator<Item = Msg>) -> Vec<String> {
        let state = msgs
            .into_iter()
            .fold(AppState::new(), |state, msg| update(state, msg).0);
        render(&state.view())
    }

    #[test]
    fn landing_shows_menu_only_when_open() {
        let closed = rendered([]);
        assert!(!closed.iter().any(|l| l.contains("Pricing")));
        let open = rendered([Msg::ToggleLandingMenu]);
        assert!(open.iter().any(|l| l.contains("Pricing")));
    }

    #[test]
    fn image_tool_lists_files_with_sizes() {
        let lines = rendered([Msg::Navigate(View::ImageTool), Msg::MockFilesSelected]);
        assert!(lines
            .iter()
            .any(|l| l.contains("#2 vacation_photo.jpg - 4.29 MB image/jpeg")));
        assert!(lines.iter().any(|l| l.contains("[Convert 3 Files]")));
    }

    #[test]
    fn running_job_shows_progress_toast() {
        let lines = rendered([
            Msg::Navigate(View::ImageTool),
            Msg::MockFilesSelected,
            Msg::ConvertClicked,
        ]);
        assert!(lines.iter().any(|l| l.starts_with("Processing files [")));
    }

    #[test]
    fn pdf_tool_highlights_active_tab() {
        let lines = rendered([
            Msg::Navigate(View::PdfTool),
            Msg::PdfOperationSelected(PdfOperation::Unlock),
        ]);
        assert_eq!(lines[1], "Tools > PDF: merge reorder [unlock] compress");
    }

    #[test]
    fn sidebar_marks_active_view() {
        let lines = rendered([Msg::Navigate(View::DocTool), Msg::ToggleSidebar]);
        assert!(lines.contains(&"| > Document Tools".to_string()));
        assert!(lines.contains(&"|   Dashboard".to_string()));
    }

    #[test]
    fn progress_bar_is_fixed_width() {
        assert_eq!(progress_bar(0.0).len(), BAR_WIDTH + 2);
        assert_eq!(progress_bar(100.0), format!("[{}]", "#".repeat(BAR_WIDTH)));
        assert_eq!(progress_bar(150.0), progress_bar(100.0));
    }
}
