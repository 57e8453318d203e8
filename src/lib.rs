pub mod backend;
pub mod browser;
pub mod error;
pub mod events;
pub mod format;
pub mod google;
pub mod navigation;
pub mod sort;
pub mod types;
pub mod upload;
pub mod wizard;

pub use backend::DriveBackend;
pub use browser::{EntryAction, FolderBrowser};
pub use error::{DriveError, Result};
pub use events::{BrowserEvent, EventSink, Notification, Severity};
pub use google::{GoogleDriveBackend, GoogleDriveConfig};
pub use navigation::{FolderStackEntry, NavigationState};
pub use sort::{SortColumn, SortIndicator, SortOptions, SortOrder};
pub use types::{
    CreatedFile, DirectoryEntry, DocumentKind, FileKind, FolderRef, OperationMessage,
    TemplateFile, TrashStatus,
};
pub use upload::{SelectedFile, UploadDialog, MAX_UPLOAD_BYTES};
pub use wizard::{CreateOption, DocumentWizard, WizardStep};
