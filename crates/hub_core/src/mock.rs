//! Fixed data standing in for real upload and history services.
use crate::UploadedFile;

/// Pages shown in the PDF toolkit's page strip.
pub const PDF_PAGES: [u32; 5] = [1, 2, 3, 4, 5];

/// The file set every "select files" action produces.
pub fn mock_upload() -> Vec<UploadedFile> {
    [
        (1, "screenshot_2024.png", 2_400_000, "image/png"),
        (2, "vacation_photo.jpg", 4_500_000, "image/jpeg"),
        (3, "design_mockup.webp", 1_200_000, "image/webp"),
    ]
    .into_iter()
    .map(|(id, name, size_bytes, mime_type)| UploadedFile {
        id,
        name: name.to_string(),
        size_bytes,
        mime_type: mime_type.to_string(),
    })
    .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryStatus {
    Completed,
    Failed,
}

/// One row of the dashboard's recent jobs table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryEntry {
    pub id: u32,
    pub name: &'static str,
    pub kind: &'static str,
    pub when: &'static str,
    pub size: &'static str,
    pub status: HistoryStatus,
}

pub const MOCK_HISTORY: [HistoryEntry; 3] = [
    HistoryEntry {
        id: 1,
        name: "marketing_deck_v2.pdf",
        kind: "PDF Compression",
        when: "2 mins ago",
        size: "2.4 MB → 0.8 MB",
        status: HistoryStatus::Completed,
    },
    HistoryEntry {
        id: 2,
        name: "hero_banner.png",
        kind: "Image Convert",
        when: "1 hour ago",
        size: "4.1 MB → 1.2 MB",
        status: HistoryStatus::Completed,
    },
    HistoryEntry {
        id: 3,
        name: "contract_signed.docx",
        kind: "Doc to PDF",
        when: "3 hours ago",
        size: "500 KB",
        status: HistoryStatus::Failed,
    },
];
