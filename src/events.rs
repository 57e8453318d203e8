use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// Transient user-visible notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub severity: Severity,
    /// Sticky toasts stay until the user dismisses them
    pub sticky: bool,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            title: "Success".to_string(),
            message: message.into(),
            severity: Severity::Success,
            sticky: true,
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity: Severity::Error,
            sticky: true,
        }
    }
}

/// Everything the browser and its dialogs report to the embedding context
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserEvent {
    Toast(Notification),
    DocumentCreated { file_id: String },
    FileUploaded,
    CloseModal,
}

/// Sending half shared by the browser, upload dialog and wizard
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: UnboundedSender<BrowserEvent>,
}

impl EventSink {
    pub fn channel() -> (Self, UnboundedReceiver<BrowserEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn emit(&self, event: BrowserEvent) {
        // A dropped receiver means nobody is rendering; nothing to report to
        let _ = self.tx.send(event);
    }

    pub fn toast(&self, notification: Notification) {
        self.emit(BrowserEvent::Toast(notification));
    }
}
