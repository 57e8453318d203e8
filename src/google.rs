use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use reqwest::{header::CONTENT_TYPE, Client, Response, StatusCode};
use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    backend::DriveBackend,
    error::{DriveError, Result},
    types::{
        CreatedFile, DirectoryEntry, FolderRef, OperationMessage, TemplateFile, TrashStatus,
        FOLDER_MIME_TYPE, SHORTCUT_MIME_TYPE,
    },
};

const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";
const UPLOAD_API_BASE: &str = "https://www.googleapis.com/upload/drive/v3";
const RECORD_PROPERTY: &str = "recordId";
const LIST_FIELDS: &str = "files(id,name,mimeType,size,modifiedTime,trashed,shortcutDetails(targetId,targetMimeType)),nextPageToken";
const MULTIPART_BOUNDARY: &str = "drive_navigator_boundary";

/// Connection settings for the Drive REST API
#[derive(Debug, Clone)]
pub struct GoogleDriveConfig {
    /// OAuth2 bearer token; refreshing it is the caller's job
    pub access_token: String,
    pub api_base: String,
    pub upload_base: String,
    /// Folder holding the templates offered by the document wizard
    pub templates_folder_id: Option<String>,
    pub user_agent: String,
}

impl GoogleDriveConfig {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            api_base: DRIVE_API_BASE.to_string(),
            upload_base: UPLOAD_API_BASE.to_string(),
            templates_folder_id: None,
            user_agent: format!("drive-navigator/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Read `DRIVE_ACCESS_TOKEN`, `DRIVE_API_BASE`, `DRIVE_UPLOAD_BASE` and
    /// `DRIVE_TEMPLATES_FOLDER_ID` from the environment
    pub fn from_env() -> Result<Self> {
        let token = std::env::var("DRIVE_ACCESS_TOKEN").map_err(|_| DriveError::InvalidConfig {
            message: "DRIVE_ACCESS_TOKEN is not set".to_string(),
        })?;

        let mut config = Self::new(token);
        if let Ok(base) = std::env::var("DRIVE_API_BASE") {
            config = config.with_api_base(base);
        }
        if let Ok(base) = std::env::var("DRIVE_UPLOAD_BASE") {
            config = config.with_upload_base(base);
        }
        if let Ok(folder) = std::env::var("DRIVE_TEMPLATES_FOLDER_ID") {
            config = config.with_templates_folder(folder);
        }
        Ok(config)
    }

    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_upload_base(mut self, base: impl Into<String>) -> Self {
        self.upload_base = base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_templates_folder(mut self, folder_id: impl Into<String>) -> Self {
        self.templates_folder_id = Some(folder_id.into());
        self
    }
}

/// Drive REST v3 backend
///
/// Record folders are located through the `recordId` app property that the
/// record integration stamps on each folder it creates.
#[derive(Clone)]
pub struct GoogleDriveBackend {
    client: Client,
    config: GoogleDriveConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DriveFile {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    mime_type: String,
    size: Option<String>,
    modified_time: Option<String>,
    #[serde(default)]
    trashed: bool,
    shortcut_details: Option<ShortcutDetails>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShortcutDetails {
    target_id: String,
    target_mime_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DriveFileList {
    #[serde(default)]
    files: Vec<DriveFile>,
    next_page_token: Option<String>,
}

impl From<DriveFile> for DirectoryEntry {
    fn from(file: DriveFile) -> Self {
        DirectoryEntry {
            id: file.id,
            name: file.name,
            mime_type: file.mime_type,
            size: file.size.and_then(|s| s.parse().ok()),
            modified_time: file
                .modified_time
                .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }
}

impl GoogleDriveBackend {
    pub fn new(config: GoogleDriveConfig) -> Result<Self> {
        if config.access_token.trim().is_empty() {
            return Err(DriveError::InvalidConfig {
                message: "access token must not be empty".to_string(),
            });
        }

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .unwrap_or_else(|_| Client::new());

        Ok(Self { client, config })
    }

    fn files_url(&self) -> String {
        format!("{}/files", self.config.api_base)
    }

    fn file_url(&self, file_id: &str) -> String {
        format!("{}/files/{}", self.config.api_base, file_id)
    }

    /// Check if an error is a rate limit error
    fn is_rate_limit_error(&self, status: StatusCode) -> bool {
        status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS
    }

    /// Turn non-success statuses into typed errors
    async fn check(&self, response: Response, id: &str) -> Result<Response> {
        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::NOT_FOUND => Err(DriveError::NotFound { id: id.to_string() }),
            status if self.is_rate_limit_error(status) => {
                let message = response
                    .text()
                    .await
                    .map(|body| api_error_message(&body))
                    .unwrap_or_else(|_| "Google Drive API rate limit exceeded".to_string());
                Err(DriveError::RateLimited { message })
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(DriveError::Api {
                    status: status.as_u16(),
                    message: api_error_message(&body),
                })
            }
        }
    }

    /// Run a `files.list` query, following `nextPageToken`
    async fn query_files(&self, query: &str, context: &str) -> Result<Vec<DriveFile>> {
        let mut all_files = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut params = vec![
                ("q", query.to_string()),
                ("fields", LIST_FIELDS.to_string()),
                ("pageSize", "1000".to_string()),
            ];
            if let Some(token) = &page_token {
                params.push(("pageToken", token.clone()));
            }

            debug!(query = %query, "listing drive files");
            let response = self
                .client
                .get(self.files_url())
                .bearer_auth(&self.config.access_token)
                .query(&params)
                .send()
                .await?;
            let list: DriveFileList = self.check(response, context).await?.json().await?;

            all_files.extend(list.files);

            match list.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(all_files)
    }

    async fn find_record_folder(&self, record_id: &str, include_trashed: bool) -> Result<DriveFile> {
        let mut query = format!(
            "appProperties has {{ key='{}' and value='{}' }} and mimeType='{}'",
            RECORD_PROPERTY,
            escape_query(record_id),
            FOLDER_MIME_TYPE
        );
        if !include_trashed {
            query.push_str(" and trashed=false");
        }

        let mut folders = self.query_files(&query, record_id).await?;
        if folders.is_empty() {
            return Err(DriveError::NotFound {
                id: record_id.to_string(),
            });
        }
        // a live folder wins over a trashed copy
        let index = folders.iter().position(|f| !f.trashed).unwrap_or(0);
        Ok(folders.swap_remove(index))
    }

    async fn create_file(&self, parent_id: &str, name: &str, mime_type: &str) -> Result<CreatedFile> {
        let metadata = serde_json::json!({
            "name": name,
            "mimeType": mime_type,
            "parents": [parent_id],
        });

        let response = self
            .client
            .post(self.files_url())
            .bearer_auth(&self.config.access_token)
            .query(&[("fields", "id")])
            .json(&metadata)
            .send()
            .await?;
        let created: CreatedFile = self.check(response, parent_id).await?.json().await?;

        info!("Created {} {} in {}", mime_type, created.id, parent_id);
        Ok(created)
    }
}

#[async_trait]
impl DriveBackend for GoogleDriveBackend {
    async fn resolve_root_folder(&self, record_id: &str) -> Result<FolderRef> {
        let folder = self.find_record_folder(record_id, false).await?;
        Ok(FolderRef {
            id: folder.id,
            name: folder.name,
        })
    }

    async fn check_folder_trashed(&self, record_id: &str) -> Result<TrashStatus> {
        let folder = self.find_record_folder(record_id, true).await?;
        let message = folder
            .trashed
            .then(|| format!("The Google Drive folder \"{}\" has been moved to the trash.", folder.name));
        Ok(TrashStatus {
            trashed: folder.trashed,
            message,
        })
    }

    async fn list_folder_contents(&self, folder_id: &str) -> Result<Vec<DirectoryEntry>> {
        let query = format!("'{}' in parents and trashed=false", escape_query(folder_id));
        let files = self.query_files(&query, folder_id).await?;
        Ok(files.into_iter().map(DirectoryEntry::from).collect())
    }

    async fn create_folder(&self, parent_id: &str, name: &str) -> Result<CreatedFile> {
        self.create_file(parent_id, name, FOLDER_MIME_TYPE).await
    }

    async fn create_typed_file(
        &self,
        parent_id: &str,
        name: &str,
        mime_type: &str,
    ) -> Result<CreatedFile> {
        self.create_file(parent_id, name, mime_type).await
    }

    async fn clone_file(
        &self,
        source_id: &str,
        new_name: &str,
        parent_id: &str,
    ) -> Result<CreatedFile> {
        let metadata = serde_json::json!({
            "name": new_name,
            "parents": [parent_id],
        });

        let response = self
            .client
            .post(format!("{}/copy", self.file_url(source_id)))
            .bearer_auth(&self.config.access_token)
            .query(&[("fields", "id")])
            .json(&metadata)
            .send()
            .await?;
        let created: CreatedFile = self.check(response, source_id).await?.json().await?;

        info!("Copied {} to {} in {}", source_id, created.id, parent_id);
        Ok(created)
    }

    async fn upload_file(
        &self,
        parent_id: &str,
        file_name: &str,
        mime_type: &str,
        base64_content: &str,
    ) -> Result<OperationMessage> {
        let content = STANDARD.decode(base64_content)?;
        let metadata = serde_json::json!({
            "name": file_name,
            "parents": [parent_id],
        });

        let mut body = Vec::with_capacity(content.len() + 512);
        body.extend_from_slice(format!("--{}\r\n", MULTIPART_BOUNDARY).as_bytes());
        body.extend_from_slice(b"Content-Type: application/json; charset=UTF-8\r\n\r\n");
        body.extend_from_slice(metadata.to_string().as_bytes());
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(format!("--{}\r\n", MULTIPART_BOUNDARY).as_bytes());
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", mime_type).as_bytes());
        body.extend_from_slice(&content);
        body.extend_from_slice(format!("\r\n--{}--", MULTIPART_BOUNDARY).as_bytes());

        let response = self
            .client
            .post(format!("{}/files", self.config.upload_base))
            .bearer_auth(&self.config.access_token)
            .query(&[("uploadType", "multipart"), ("fields", "id")])
            .header(
                CONTENT_TYPE,
                format!("multipart/related; boundary={}", MULTIPART_BOUNDARY),
            )
            .body(body)
            .send()
            .await?;
        let created: CreatedFile = self.check(response, parent_id).await?.json().await?;

        info!("Uploaded {} ({} bytes) as {}", file_name, content.len(), created.id);
        Ok(OperationMessage {
            message: format!("File {} uploaded successfully.", file_name),
        })
    }

    async fn delete_file(&self, file_id: &str) -> Result<OperationMessage> {
        let response = self
            .client
            .delete(self.file_url(file_id))
            .bearer_auth(&self.config.access_token)
            .send()
            .await?;
        self.check(response, file_id).await?;

        info!("Deleted: {}", file_id);
        Ok(OperationMessage {
            message: "File deleted successfully.".to_string(),
        })
    }

    async fn list_templates(&self, mime_type: &str) -> Result<Vec<TemplateFile>> {
        let folder_id = self
            .config
            .templates_folder_id
            .as_deref()
            .ok_or_else(|| DriveError::InvalidConfig {
                message: "no templates folder configured".to_string(),
            })?;

        let query = format!(
            "'{}' in parents and trashed=false and (mimeType='{}' or mimeType='{}')",
            escape_query(folder_id),
            escape_query(mime_type),
            SHORTCUT_MIME_TYPE
        );

        let templates = self
            .query_files(&query, folder_id)
            .await?
            .into_iter()
            .filter_map(|file| match file.shortcut_details {
                Some(details) if details.target_mime_type.as_deref() == Some(mime_type) => {
                    Some(TemplateFile {
                        id: file.id,
                        name: file.name,
                        mime_type: mime_type.to_string(),
                        target_id: Some(details.target_id),
                    })
                }
                Some(_) => None,
                None if file.mime_type == mime_type => Some(TemplateFile {
                    id: file.id,
                    name: file.name,
                    mime_type: file.mime_type,
                    target_id: None,
                }),
                None => None,
            })
            .collect();

        Ok(templates)
    }

    fn identifier(&self) -> String {
        format!("gdrive://{}", self.config.api_base)
    }
}

/// Escape a value for use inside a single-quoted Drive query literal
fn escape_query(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Pull `error.message` out of a Drive error body, falling back to the raw text
fn api_error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: ErrorDetail,
    }
    #[derive(Deserialize)]
    struct ErrorDetail {
        message: String,
    }

    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}
