use std::sync::Arc;

use tracing::{error, info};

use crate::{
    backend::DriveBackend,
    error::{DriveError, Result},
    events::{BrowserEvent, EventSink, Notification},
    types::{CreatedFile, DocumentKind, TemplateFile},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    ChooseOption,
    NameNewDocument,
    PickTemplate,
    NameClone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOption {
    NewDocument,
    FromTemplate,
}

/// Multi-step "create a Google document" modal
///
/// Either creates a blank document of `kind` or clones a template, always
/// into the folder the wizard was opened from.
pub struct DocumentWizard {
    backend: Arc<dyn DriveBackend>,
    events: EventSink,
    folder_id: String,
    kind: DocumentKind,
    step: WizardStep,
    option: Option<CreateOption>,
    new_document_name: String,
    clone_name: String,
    templates: Vec<TemplateFile>,
    selected_template_id: Option<String>,
    is_loading: bool,
}

impl DocumentWizard {
    pub fn new(
        backend: Arc<dyn DriveBackend>,
        events: EventSink,
        folder_id: String,
        kind: DocumentKind,
    ) -> Self {
        Self {
            backend,
            events,
            folder_id,
            kind,
            step: WizardStep::ChooseOption,
            option: None,
            new_document_name: String::new(),
            clone_name: String::new(),
            templates: Vec::new(),
            selected_template_id: None,
            is_loading: false,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn folder_id(&self) -> &str {
        &self.folder_id
    }

    pub fn templates(&self) -> &[TemplateFile] {
        &self.templates
    }

    pub fn selected_option(&self) -> Option<CreateOption> {
        self.option
    }

    pub fn selected_template_id(&self) -> Option<&str> {
        self.selected_template_id.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn select_option(&mut self, option: CreateOption) {
        self.option = Some(option);
    }

    pub fn is_next_disabled(&self) -> bool {
        self.option.is_none()
    }

    /// Leave the first step; the template branch loads the template list
    pub async fn next_step(&mut self) {
        match self.option {
            Some(CreateOption::NewDocument) => self.step = WizardStep::NameNewDocument,
            Some(CreateOption::FromTemplate) => {
                self.step = WizardStep::PickTemplate;
                match self.backend.list_templates(self.kind.mime_type()).await {
                    Ok(templates) => self.templates = templates,
                    Err(e) => {
                        error!("Error fetching Google Drive templates: {}", e);
                        self.events
                            .toast(Notification::error("Error", e.user_message()));
                    }
                }
            }
            None => {}
        }
    }

    pub fn back_to_options(&mut self) {
        self.step = WizardStep::ChooseOption;
        self.selected_template_id = None;
    }

    pub fn set_document_name(&mut self, name: impl Into<String>) {
        self.new_document_name = name.into();
    }

    pub fn is_create_disabled(&self) -> bool {
        self.new_document_name.trim().is_empty() || self.is_loading
    }

    pub async fn create_new_document(&mut self) -> Result<CreatedFile> {
        if self.new_document_name.trim().is_empty() {
            return Err(DriveError::InvalidInput {
                message: "document name is required".to_string(),
            });
        }

        self.is_loading = true;
        let result = self
            .backend
            .create_typed_file(&self.folder_id, &self.new_document_name, self.kind.mime_type())
            .await;
        self.is_loading = false;

        self.finish(result, "Error creating the document")
    }

    /// Pick a template by id; shortcuts resolve to the file they point at
    pub fn select_template(&mut self, template_id: &str) -> Result<()> {
        let template = self
            .templates
            .iter()
            .find(|t| t.id == template_id)
            .ok_or_else(|| DriveError::NotFound {
                id: template_id.to_string(),
            })?;
        self.selected_template_id = Some(template.source_id().to_string());
        Ok(())
    }

    pub fn is_template_next_disabled(&self) -> bool {
        self.selected_template_id.is_none()
    }

    pub fn go_to_naming_step(&mut self) {
        if self.selected_template_id.is_some() {
            self.step = WizardStep::NameClone;
        }
    }

    pub fn back_to_templates(&mut self) {
        self.step = WizardStep::PickTemplate;
    }

    pub fn set_clone_name(&mut self, name: impl Into<String>) {
        self.clone_name = name.into();
    }

    pub fn is_clone_disabled(&self) -> bool {
        self.clone_name.trim().is_empty() || self.is_loading
    }

    pub async fn clone_document(&mut self) -> Result<CreatedFile> {
        let source_id = self
            .selected_template_id
            .clone()
            .ok_or_else(|| DriveError::InvalidInput {
                message: "no template selected".to_string(),
            })?;
        if self.clone_name.trim().is_empty() {
            return Err(DriveError::InvalidInput {
                message: "document name is required".to_string(),
            });
        }

        self.is_loading = true;
        let result = self
            .backend
            .clone_file(&source_id, &self.clone_name, &self.folder_id)
            .await;
        self.is_loading = false;

        self.finish(result, "Error cloning the document")
    }

    pub fn cancel(&mut self) {
        self.reset();
        self.events.emit(BrowserEvent::CloseModal);
    }

    fn finish(&mut self, result: Result<CreatedFile>, failure: &str) -> Result<CreatedFile> {
        match result {
            Ok(created) => {
                info!("Document {} created in {}", created.id, self.folder_id);
                self.events.emit(BrowserEvent::DocumentCreated {
                    file_id: created.id.clone(),
                });
                self.reset();
                Ok(created)
            }
            Err(e) => {
                error!("{}: {}", failure, e);
                self.events
                    .toast(Notification::error(failure, e.user_message()));
                Err(e)
            }
        }
    }

    fn reset(&mut self) {
        self.step = WizardStep::ChooseOption;
        self.option = None;
        self.new_document_name.clear();
        self.clone_name.clear();
        self.selected_template_id = None;
        self.is_loading = false;
    }
}
