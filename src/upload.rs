use std::path::Path;
use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use tracing::{info, warn};

use crate::{
    backend::DriveBackend,
    error::{DriveError, Result},
    events::{BrowserEvent, EventSink, Notification},
    types::OperationMessage,
};

/// Largest file accepted for upload (10 MB)
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

const TOO_LARGE_MESSAGE: &str =
    "The selected file exceeds the 10 MB size limit. Please choose a smaller file.";

/// A file picked by the user, held in memory until upload
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub content: Bytes,
}

/// Upload modal bound to one destination folder
pub struct UploadDialog {
    backend: Arc<dyn DriveBackend>,
    events: EventSink,
    folder_id: String,
    is_open: bool,
    selection: Option<SelectedFile>,
    progress: u8,
}

impl UploadDialog {
    pub fn new(backend: Arc<dyn DriveBackend>, events: EventSink, folder_id: String) -> Self {
        Self {
            backend,
            events,
            folder_id,
            is_open: false,
            selection: None,
            progress: 0,
        }
    }

    pub fn open(&mut self) {
        self.is_open = true;
    }

    pub fn close(&mut self) {
        self.is_open = false;
        self.reset_selection();
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn folder_id(&self) -> &str {
        &self.folder_id
    }

    pub fn selected_file_name(&self) -> Option<&str> {
        self.selection.as_ref().map(|f| f.name.as_str())
    }

    pub fn is_file_selected(&self) -> bool {
        self.selection.is_some()
    }

    pub fn is_upload_disabled(&self) -> bool {
        self.selection.is_none()
    }

    /// Percent complete: 0 idle, 10 in flight, 100 done
    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// Select in-memory content; anything over the size cap is rejected here
    pub fn select_file(
        &mut self,
        name: impl Into<String>,
        mime_type: impl Into<String>,
        content: Bytes,
    ) -> Result<()> {
        let name = name.into();
        self.check_size(&name, content.len() as u64)?;

        let mut mime_type = mime_type.into();
        if mime_type.is_empty() {
            mime_type = "application/octet-stream".to_string();
        }

        self.selection = Some(SelectedFile {
            name,
            mime_type,
            content,
        });
        self.progress = 0;
        Ok(())
    }

    /// Select a file from disk; the size is checked before the file is read
    pub async fn select_path(&mut self, path: &Path) -> Result<()> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| DriveError::InvalidInput {
                message: format!("{} is not a file", path.display()),
            })?;

        let metadata = match tokio::fs::metadata(path).await {
            Ok(metadata) => metadata,
            Err(e) => return Err(self.read_failed(e)),
        };
        self.check_size(&name, metadata.len())?;

        let content = match tokio::fs::read(path).await {
            Ok(content) => content,
            Err(e) => return Err(self.read_failed(e)),
        };
        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .to_string();

        self.select_file(name, mime_type, Bytes::from(content))
    }

    pub async fn upload(&mut self) -> Result<OperationMessage> {
        let file = self.selection.clone().ok_or_else(|| DriveError::InvalidInput {
            message: "no file selected".to_string(),
        })?;

        self.progress = 10;
        let encoded = STANDARD.encode(&file.content);

        match self
            .backend
            .upload_file(&self.folder_id, &file.name, &file.mime_type, &encoded)
            .await
        {
            Ok(result) => {
                self.progress = 100;
                info!("Uploaded {} to folder {}", file.name, self.folder_id);
                self.events
                    .toast(Notification::success("File uploaded successfully!"));
                self.close();
                self.events.emit(BrowserEvent::FileUploaded);
                Ok(result)
            }
            Err(e) => {
                self.progress = 0;
                warn!("Upload of {} failed: {}", file.name, e);
                let mut toast = Notification::error("Error", "Error uploading file");
                toast.sticky = false;
                self.events.toast(toast);
                Err(e)
            }
        }
    }

    fn check_size(&mut self, name: &str, size: u64) -> Result<()> {
        if size <= MAX_UPLOAD_BYTES {
            return Ok(());
        }

        warn!("Rejected {} ({} bytes): over upload limit", name, size);
        let mut toast = Notification::error("File Too Large", TOO_LARGE_MESSAGE);
        toast.sticky = false;
        self.events.toast(toast);
        self.reset_selection();
        Err(DriveError::FileTooLarge {
            name: name.to_string(),
            size,
            limit: MAX_UPLOAD_BYTES,
        })
    }

    fn read_failed(&mut self, error: std::io::Error) -> DriveError {
        let error = DriveError::Io(error);
        self.events
            .toast(Notification::error("Error", error.user_message()));
        self.reset_selection();
        error
    }

    fn reset_selection(&mut self) {
        self.selection = None;
        self.progress = 0;
    }
}
