// Folder stack and breadcrumb trail for the folder browser

pub const UNNAMED_FOLDER: &str = "Unnamed Folder";

/// One breadcrumb, root first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderStackEntry {
    id: String,
    name: String,
    is_last: bool,
    separator_key: String,
}

impl FolderStackEntry {
    fn new(id: &str, name: Option<&str>) -> Self {
        let name = match name {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => UNNAMED_FOLDER.to_string(),
        };
        Self {
            id: id.to_string(),
            name,
            is_last: false,
            separator_key: String::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// True only for the folder currently being browsed
    pub fn is_last(&self) -> bool {
        self.is_last
    }

    /// Positional key for the separator rendered after this entry
    pub fn separator_key(&self) -> &str {
        &self.separator_key
    }
}

/// Folders visited from the record's root down to the current one
///
/// The stack is never empty and never holds the same id twice; entering a
/// folder that is already on the path truncates back to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    stack: Vec<FolderStackEntry>,
}

impl NavigationState {
    pub fn new(root_id: &str, root_name: Option<&str>) -> Self {
        let mut state = Self {
            stack: vec![FolderStackEntry::new(root_id, root_name)],
        };
        state.relabel();
        state
    }

    pub fn stack(&self) -> &[FolderStackEntry] {
        &self.stack
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn root(&self) -> &FolderStackEntry {
        &self.stack[0]
    }

    pub fn current(&self) -> &FolderStackEntry {
        &self.stack[self.stack.len() - 1]
    }

    pub fn current_folder_id(&self) -> &str {
        self.current().id()
    }

    pub fn position(&self, folder_id: &str) -> Option<usize> {
        self.stack.iter().position(|entry| entry.id == folder_id)
    }

    /// State after entering `folder_id`, leaving `self` untouched
    pub fn entered(&self, folder_id: &str, folder_name: Option<&str>) -> Self {
        let mut next = self.clone();
        next.enter(folder_id, folder_name);
        next
    }

    pub fn enter(&mut self, folder_id: &str, folder_name: Option<&str>) {
        match self.position(folder_id) {
            Some(index) => self.stack.truncate(index + 1),
            None => self
                .stack
                .push(FolderStackEntry::new(folder_id, folder_name)),
        }
        self.relabel();
    }

    /// State after jumping back to an ancestor, or `None` if it is not on the path
    pub fn truncated_to(&self, folder_id: &str) -> Option<Self> {
        let index = self.position(folder_id)?;
        let mut next = self.clone();
        next.stack.truncate(index + 1);
        next.relabel();
        Some(next)
    }

    pub fn truncate_to(&mut self, folder_id: &str) -> bool {
        match self.truncated_to(folder_id) {
            Some(next) => {
                *self = next;
                true
            }
            None => false,
        }
    }

    fn relabel(&mut self) {
        let last = self.stack.len() - 1;
        for (index, entry) in self.stack.iter_mut().enumerate() {
            entry.is_last = index == last;
            entry.separator_key = format!("separator-{}", index);
        }
    }
}
