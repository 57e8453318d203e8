use async_trait::async_trait;

use crate::{
    error::Result,
    types::{CreatedFile, DirectoryEntry, FolderRef, OperationMessage, TemplateFile, TrashStatus},
};

/// Server-side API layer the browser talks to
///
/// Implementors own authentication and transport; every call is fallible
/// and the browser never retries.
#[async_trait]
pub trait DriveBackend: Send + Sync {
    /// Find the Drive folder linked to a business record
    ///
    /// Returns `DriveError::NotFound` if the record has no folder
    async fn resolve_root_folder(&self, record_id: &str) -> Result<FolderRef>;

    /// Check whether the record's folder has been moved to the trash
    async fn check_folder_trashed(&self, record_id: &str) -> Result<TrashStatus>;

    /// List the direct children of a folder
    async fn list_folder_contents(&self, folder_id: &str) -> Result<Vec<DirectoryEntry>>;

    async fn create_folder(&self, parent_id: &str, name: &str) -> Result<CreatedFile>;

    /// Create an empty native file (Doc, Sheet, ...) of the given mime type
    async fn create_typed_file(
        &self,
        parent_id: &str,
        name: &str,
        mime_type: &str,
    ) -> Result<CreatedFile>;

    /// Copy an existing file into `parent_id` under a new name
    async fn clone_file(&self, source_id: &str, new_name: &str, parent_id: &str)
        -> Result<CreatedFile>;

    /// Upload base64-encoded content as a new file
    async fn upload_file(
        &self,
        parent_id: &str,
        file_name: &str,
        mime_type: &str,
        base64_content: &str,
    ) -> Result<OperationMessage>;

    async fn delete_file(&self, file_id: &str) -> Result<OperationMessage>;

    /// Templates the wizard can clone for the given document mime type
    async fn list_templates(&self, mime_type: &str) -> Result<Vec<TemplateFile>>;

    /// Get a human-readable identifier for this backend (for logging/debugging)
    fn identifier(&self) -> String;
}
