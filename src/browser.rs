use std::sync::Arc;

use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{info, warn};

use crate::{
    backend::DriveBackend,
    error::{DriveError, Result},
    events::{BrowserEvent, EventSink, Notification},
    navigation::{FolderStackEntry, NavigationState},
    sort::{SortColumn, SortIndicator, SortOptions},
    types::{folder_url, CreatedFile, DirectoryEntry, DocumentKind, OperationMessage},
    upload::UploadDialog,
    wizard::DocumentWizard,
};

/// What happened when the user clicked an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryAction {
    EnteredFolder,
    OpenUrl(String),
}

/// Browses the Drive folder attached to one record
///
/// Owns the folder stack and the current listing. Every backend failure is
/// reported as a toast on the event channel and leaves the stack and listing
/// as they were before the call.
pub struct FolderBrowser {
    backend: Arc<dyn DriveBackend>,
    events: EventSink,
    record_id: Option<String>,
    navigation: Option<NavigationState>,
    entries: Vec<DirectoryEntry>,
    sort: SortOptions,
    status_message: String,
    error_messages: Vec<String>,
    wizard_kind: DocumentKind,
}

impl FolderBrowser {
    /// Create a browser and the receiver for its toasts and events
    pub fn new(backend: Arc<dyn DriveBackend>) -> (Self, UnboundedReceiver<BrowserEvent>) {
        let (events, rx) = EventSink::channel();
        let browser = Self {
            backend,
            events,
            record_id: None,
            navigation: None,
            entries: Vec::new(),
            sort: SortOptions::default(),
            status_message: String::new(),
            error_messages: Vec::new(),
            wizard_kind: DocumentKind::default(),
        };
        (browser, rx)
    }

    /// Locate the record's folder and list it
    ///
    /// Anything left from a previous record is dropped first. A trashed or
    /// missing folder is reported in `error_messages` rather than as a toast.
    pub async fn mount(&mut self, record_id: &str) -> Result<()> {
        self.record_id = None;
        self.navigation = None;
        self.entries.clear();
        self.error_messages.clear();
        self.status_message.clear();

        let record_id = record_id.trim();
        if record_id.is_empty() {
            self.status_message = "No record ID provided.".to_string();
            return Err(DriveError::InvalidInput {
                message: "record id is empty".to_string(),
            });
        }
        self.record_id = Some(record_id.to_string());

        let status = match self.backend.check_folder_trashed(record_id).await {
            Ok(status) => status,
            Err(e) => return Err(self.record_lookup_failed(record_id, e)),
        };
        if status.trashed {
            let message = status
                .message
                .unwrap_or_else(|| "The Google Drive folder for this record is in the trash.".to_string());
            warn!("Folder for record {} is trashed", record_id);
            self.error_messages.push(message);
            return Ok(());
        }

        let root = match self.backend.resolve_root_folder(record_id).await {
            Ok(root) => root,
            Err(e) => return Err(self.record_lookup_failed(record_id, e)),
        };

        self.status_message = format!("The folder ID is: {}", root.id);
        self.initialize(&root.id, Some(root.name.as_str())).await
    }

    /// Reset the stack to a single root folder and list it
    ///
    /// The stack is kept even if the first listing fails, so a later
    /// `refresh` can recover.
    pub async fn initialize(&mut self, root_id: &str, root_name: Option<&str>) -> Result<()> {
        self.navigation = Some(NavigationState::new(root_id, root_name));
        self.entries.clear();
        self.refresh().await
    }

    /// Move into `folder_id`, or back to it if it is already on the path
    pub async fn enter_folder(&mut self, folder_id: &str, folder_name: Option<&str>) -> Result<()> {
        let next = self.navigation()?.entered(folder_id, folder_name);
        self.navigate(next).await
    }

    /// Go back to a folder already in the breadcrumb trail
    pub async fn jump_to_breadcrumb(&mut self, folder_id: &str) -> Result<()> {
        let next = self
            .navigation()?
            .truncated_to(folder_id)
            .ok_or_else(|| DriveError::NotInPath {
                id: folder_id.to_string(),
            })?;
        self.navigate(next).await
    }

    /// Re-list the current folder without touching the stack
    pub async fn refresh(&mut self) -> Result<()> {
        let folder_id = self.navigation()?.current_folder_id().to_string();
        self.entries = self.list_sorted(&folder_id).await?;
        Ok(())
    }

    pub fn current_folder_id(&self) -> Option<&str> {
        self.navigation.as_ref().map(|n| n.current_folder_id())
    }

    pub fn breadcrumbs(&self) -> &[FolderStackEntry] {
        self.navigation.as_ref().map(|n| n.stack()).unwrap_or(&[])
    }

    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    pub fn record_id(&self) -> Option<&str> {
        self.record_id.as_deref()
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Problems with the record's folder itself, shown in place of the listing
    pub fn error_messages(&self) -> &[String] {
        &self.error_messages
    }

    pub fn sort_options(&self) -> SortOptions {
        self.sort
    }

    pub fn sort_indicator(&self, column: SortColumn) -> SortIndicator {
        self.sort.indicator(column)
    }

    pub fn sort_by(&mut self, column: SortColumn) {
        self.sort.select(column);
        self.sort.apply(&mut self.entries);
    }

    /// Folders are entered, files yield their viewer link
    pub async fn open_entry(&mut self, entry_id: &str) -> Result<EntryAction> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.id == entry_id)
            .cloned()
            .ok_or_else(|| DriveError::NotFound {
                id: entry_id.to_string(),
            })?;

        if entry.is_folder() {
            self.enter_folder(&entry.id, Some(entry.name.as_str())).await?;
            Ok(EntryAction::EnteredFolder)
        } else {
            Ok(EntryAction::OpenUrl(entry.view_url()))
        }
    }

    /// Link to the current folder in the Drive web UI
    pub fn drive_folder_url(&self) -> Option<String> {
        self.current_folder_id().map(folder_url)
    }

    pub async fn create_folder(&mut self, name: &str) -> Result<CreatedFile> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DriveError::InvalidInput {
                message: "Please enter a folder name.".to_string(),
            });
        }
        let parent_id = self.navigation()?.current_folder_id().to_string();

        match self.backend.create_folder(&parent_id, name).await {
            Ok(created) => {
                info!("Created folder {} ({}) in {}", name, created.id, parent_id);
                // a failed refresh has already been reported
                let _ = self.refresh().await;
                self.events
                    .toast(Notification::success("Folder created successfully!"));
                Ok(created)
            }
            Err(e) => {
                warn!("Folder creation in {} failed: {}", parent_id, e);
                self.events.toast(Notification::error(
                    "Error",
                    format!("Failed to create folder: {}", e.user_message()),
                ));
                Err(e)
            }
        }
    }

    pub async fn delete_file(&mut self, file_id: &str) -> Result<OperationMessage> {
        self.navigation()?;

        match self.backend.delete_file(file_id).await {
            Ok(result) => {
                info!("Deleted {}", file_id);
                self.events
                    .toast(Notification::success(result.message.clone()));
                let _ = self.refresh().await;
                Ok(result)
            }
            Err(e) => Err(self.surface(e)),
        }
    }

    /// Upload modal targeting the current folder, already open
    pub fn upload_dialog(&self) -> Result<UploadDialog> {
        let folder_id = self.navigation()?.current_folder_id().to_string();
        let mut dialog = UploadDialog::new(self.backend.clone(), self.events.clone(), folder_id);
        dialog.open();
        Ok(dialog)
    }

    pub async fn handle_file_uploaded(&mut self) -> Result<()> {
        self.refresh().await
    }

    /// Creation wizard for `kind` targeting the current folder
    pub fn document_wizard(&mut self, kind: DocumentKind) -> Result<DocumentWizard> {
        let folder_id = self.navigation()?.current_folder_id().to_string();
        self.wizard_kind = kind;
        Ok(DocumentWizard::new(
            self.backend.clone(),
            self.events.clone(),
            folder_id,
            kind,
        ))
    }

    /// Refresh after the wizard created a file and return its edit link
    pub async fn handle_document_created(&mut self, file_id: &str) -> String {
        let _ = self.refresh().await;
        self.wizard_kind.edit_url(file_id)
    }

    fn navigation(&self) -> Result<&NavigationState> {
        self.navigation.as_ref().ok_or(DriveError::NotInitialized)
    }

    /// Commit `next` only once its folder has been listed
    async fn navigate(&mut self, next: NavigationState) -> Result<()> {
        let entries = self.list_sorted(next.current_folder_id()).await?;
        info!(
            "Browsing {} at depth {}",
            next.current_folder_id(),
            next.depth()
        );
        self.entries = entries;
        self.navigation = Some(next);
        Ok(())
    }

    async fn list_sorted(&self, folder_id: &str) -> Result<Vec<DirectoryEntry>> {
        match self.backend.list_folder_contents(folder_id).await {
            Ok(mut entries) => {
                self.sort.apply(&mut entries);
                Ok(entries)
            }
            Err(e) => Err(self.surface(e)),
        }
    }

    fn record_lookup_failed(&mut self, record_id: &str, error: DriveError) -> DriveError {
        match error {
            DriveError::NotFound { .. } => {
                warn!("No Drive folder linked to record {}", record_id);
                self.error_messages.push(format!(
                    "No Google Drive folder is linked to record {}.",
                    record_id
                ));
                error
            }
            other => self.surface(other),
        }
    }

    fn surface(&self, error: DriveError) -> DriveError {
        warn!("Drive call via {} failed: {}", self.backend.identifier(), error);
        self.events
            .toast(Notification::error("Error", error.user_message()));
        error
    }
}
