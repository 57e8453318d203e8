// Listing order: folders first, then the active column
use std::cmp::Ordering;

use crate::types::DirectoryEntry;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortColumn {
    Name,
    Modified,
    Size,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

/// Arrow shown next to a column header
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortIndicator {
    Hidden,
    Up,
    Down,
}

/// Active sort column; `None` keeps backend order inside each partition
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SortOptions {
    pub sort_by: Option<SortColumn>,
    pub sort_order: SortOrder,
}

impl SortOptions {
    /// Reselecting the active column flips the order, a new column starts ascending
    pub fn select(&mut self, column: SortColumn) {
        if self.sort_by == Some(column) {
            self.sort_order = self.sort_order.toggled();
        } else {
            self.sort_by = Some(column);
            self.sort_order = SortOrder::Ascending;
        }
    }

    pub fn indicator(&self, column: SortColumn) -> SortIndicator {
        match (self.sort_by, self.sort_order) {
            (Some(active), SortOrder::Ascending) if active == column => SortIndicator::Up,
            (Some(active), SortOrder::Descending) if active == column => SortIndicator::Down,
            _ => SortIndicator::Hidden,
        }
    }

    pub fn apply(&self, entries: &mut [DirectoryEntry]) {
        // sort_by is stable, so equal keys keep backend order
        entries.sort_by(|a, b| {
            folders_first(a, b).then_with(|| match self.sort_by {
                Some(column) => {
                    let ordering = compare_column(column, a, b);
                    match self.sort_order {
                        SortOrder::Ascending => ordering,
                        SortOrder::Descending => ordering.reverse(),
                    }
                }
                None => Ordering::Equal,
            })
        });
    }
}

fn folders_first(a: &DirectoryEntry, b: &DirectoryEntry) -> Ordering {
    b.is_folder().cmp(&a.is_folder())
}

fn compare_column(column: SortColumn, a: &DirectoryEntry, b: &DirectoryEntry) -> Ordering {
    match column {
        SortColumn::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortColumn::Modified => a.modified_time.cmp(&b.modified_time),
        SortColumn::Size => a.size.unwrap_or(0).cmp(&b.size.unwrap_or(0)),
    }
}
