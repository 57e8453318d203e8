use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::format::{format_file_size, format_modified_date};

pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";
pub const DOCUMENT_MIME_TYPE: &str = "application/vnd.google-apps.document";
pub const SPREADSHEET_MIME_TYPE: &str = "application/vnd.google-apps.spreadsheet";
pub const PRESENTATION_MIME_TYPE: &str = "application/vnd.google-apps.presentation";
pub const DRAWING_MIME_TYPE: &str = "application/vnd.google-apps.drawing";
pub const SHORTCUT_MIME_TYPE: &str = "application/vnd.google-apps.shortcut";
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Link to the Drive viewer for any file
pub fn file_view_url(file_id: &str) -> String {
    format!("https://drive.google.com/file/d/{}/view", file_id)
}

/// Link to a folder in the Drive web UI
pub fn folder_url(folder_id: &str) -> String {
    format!("https://drive.google.com/drive/folders/{}", folder_id)
}

/// One file or folder returned by a listing call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryEntry {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    /// Size in bytes; folders and native Google documents have none
    #[serde(default, deserialize_with = "deserialize_size")]
    pub size: Option<u64>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub modified_time: Option<DateTime<Utc>>,
}

impl DirectoryEntry {
    pub fn is_folder(&self) -> bool {
        self.mime_type == FOLDER_MIME_TYPE
    }

    pub fn kind(&self) -> FileKind {
        FileKind::from_mime_type(&self.mime_type)
    }

    pub fn formatted_size(&self) -> String {
        match self.size {
            Some(size) => format_file_size(size),
            None => "N/A".to_string(),
        }
    }

    pub fn formatted_modified(&self) -> String {
        self.modified_time
            .as_ref()
            .map(format_modified_date)
            .unwrap_or_default()
    }

    pub fn view_url(&self) -> String {
        file_view_url(&self.id)
    }
}

/// Display category of an entry, used for icons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Folder,
    GoogleDoc,
    GoogleSheet,
    GoogleSlide,
    Pdf,
    Other,
}

impl FileKind {
    pub fn from_mime_type(mime_type: &str) -> Self {
        match mime_type {
            FOLDER_MIME_TYPE => FileKind::Folder,
            DOCUMENT_MIME_TYPE => FileKind::GoogleDoc,
            SPREADSHEET_MIME_TYPE => FileKind::GoogleSheet,
            PRESENTATION_MIME_TYPE => FileKind::GoogleSlide,
            PDF_MIME_TYPE => FileKind::Pdf,
            _ => FileKind::Other,
        }
    }
}

/// Native Google document types that can be created from the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentKind {
    #[default]
    Document,
    Spreadsheet,
    Presentation,
    Drawing,
}

impl DocumentKind {
    pub fn mime_type(&self) -> &'static str {
        match self {
            DocumentKind::Document => DOCUMENT_MIME_TYPE,
            DocumentKind::Spreadsheet => SPREADSHEET_MIME_TYPE,
            DocumentKind::Presentation => PRESENTATION_MIME_TYPE,
            DocumentKind::Drawing => DRAWING_MIME_TYPE,
        }
    }

    /// Path segment docs.google.com uses for this type
    fn doctype(&self) -> &'static str {
        match self {
            DocumentKind::Document => "document",
            DocumentKind::Spreadsheet => "spreadsheets",
            DocumentKind::Presentation => "presentation",
            DocumentKind::Drawing => "drawings",
        }
    }

    pub fn edit_url(&self, file_id: &str) -> String {
        format!("https://docs.google.com/{}/d/{}/edit", self.doctype(), file_id)
    }

    pub fn from_mime_type(mime_type: &str) -> Option<Self> {
        match mime_type {
            DOCUMENT_MIME_TYPE => Some(DocumentKind::Document),
            SPREADSHEET_MIME_TYPE => Some(DocumentKind::Spreadsheet),
            PRESENTATION_MIME_TYPE => Some(DocumentKind::Presentation),
            DRAWING_MIME_TYPE => Some(DocumentKind::Drawing),
            _ => None,
        }
    }
}

/// A folder identified by id and display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderRef {
    pub id: String,
    pub name: String,
}

/// Whether the folder linked to a record has been trashed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrashStatus {
    pub trashed: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Identifier of a newly created file or folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedFile {
    pub id: String,
}

/// Human-readable outcome of a mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationMessage {
    pub message: String,
}

/// A template document offered by the wizard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateFile {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    /// Set when the template is a shortcut to another file
    #[serde(default)]
    pub target_id: Option<String>,
}

impl TemplateFile {
    /// Id of the file that should actually be copied
    pub fn source_id(&self) -> &str {
        self.target_id.as_deref().unwrap_or(&self.id)
    }
}

/// Accepts `"1024"`, `1024`, `"N/A"` or null
fn deserialize_size<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawSize {
        Number(u64),
        Float(f64),
        Text(String),
    }

    let size = match Option::<RawSize>::deserialize(deserializer)? {
        Some(RawSize::Number(n)) => Some(n),
        Some(RawSize::Float(f)) if f >= 0.0 => Some(f as u64),
        Some(RawSize::Float(_)) => None,
        Some(RawSize::Text(text)) => text.trim().parse::<u64>().ok(),
        None => None,
    };
    Ok(size)
}

/// Unparseable timestamps become `None` instead of failing the whole listing
fn deserialize_timestamp<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }))
}
