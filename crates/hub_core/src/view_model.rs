use crate::{FileId, JobPhase, PdfOperation, Theme, View};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub view: View,
    pub sidebar_open: bool,
    pub landing_menu_open: bool,
    pub theme: Theme,
    pub files: Vec<FileRowView>,
    pub job: JobView,
    pub doc: DocPanelView,
    pub pdf_operation: PdfOperation,
    pub alert: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRowView {
    pub id: FileId,
    pub name: String,
    pub size_label: String,
    pub mime_type: String,
    /// An AI rename suggestion is in flight for this file.
    pub renaming: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct JobView {
    pub phase: JobPhase,
    pub progress_percent: f64,
    pub failure: Option<String>,
    pub file_count: usize,
}

impl JobView {
    /// Caption of the primary button in the image tool.
    pub fn action_label(&self) -> String {
        match self.phase {
            JobPhase::Running => "Processing...".to_string(),
            JobPhase::Completed => "Download All".to_string(),
            JobPhase::Idle | JobPhase::Failed => format!("Convert {} Files", self.file_count),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocPanelView {
    pub input: String,
    pub output: String,
    pub is_loading: bool,
    /// Operation buttons are enabled.
    pub can_run: bool,
}

/// Human readable size using binary units, e.g. `2400000 -> "2.29 MB"`.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_bytes_uses_binary_units() {
        assert_eq!(format_bytes(0), "0 Bytes");
        assert_eq!(format_bytes(512), "512 Bytes");
        assert_eq!(format_bytes(1024), "1 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(2_400_000), "2.29 MB");
        assert_eq!(format_bytes(4_500_000), "4.29 MB");
    }

    #[test]
    fn action_label_follows_phase() {
        let mut job = JobView {
            file_count: 3,
            ..JobView::default()
        };
        assert_eq!(job.action_label(), "Convert 3 Files");
        job.phase = JobPhase::Running;
        assert_eq!(job.action_label(), "Processing...");
        job.phase = JobPhase::Completed;
        assert_eq!(job.action_label(), "Download All");
    }
}
