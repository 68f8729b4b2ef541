//! The list composition pipeline.
//!
//! Every surface that shows a list (shop mode, the print layout, the
//! share/export preview) goes through [`compose`]:
//!
//! 1. drop entries that are no longer `required`, unless completed entries
//!    were asked for;
//! 2. stable-sort the survivors with [`compare_entries`](crate::compare_entries);
//! 3. bucket them by section with [`group_by_section`].
//!
//! Progress is counted over the whole snapshot before filtering, so hiding
//! completed entries never changes the reported numbers.
//!
//! The pipeline is a pure function of its arguments. Re-run it whenever the
//! snapshot changes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::grouping::{SectionGroups, group_by_section};
use crate::model::{ShoppingList, ShoppingListEntry};
use crate::ordering::{SortMode, sort_entries};
use crate::types::{EntryStatus, ListId};

/// Options chosen by the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct ComposeOptions {
    /// Keep `bought` and `unavailable` entries in the output.
    #[serde(default)]
    pub include_completed: bool,
    #[serde(default)]
    pub sort_mode: SortMode,
}

impl ComposeOptions {
    /// Options that show every entry in walking order.
    pub const EVERYTHING_BY_LOCATION: Self = Self {
        include_completed: true,
        sort_mode: SortMode::ByLocation,
    };

    #[must_use]
    pub const fn with_completed(mut self, include_completed: bool) -> Self {
        self.include_completed = include_completed;
        self
    }

    #[must_use]
    pub const fn with_sort_mode(mut self, sort_mode: SortMode) -> Self {
        self.sort_mode = sort_mode;
        self
    }

    fn admits(self, entry: &ShoppingListEntry) -> bool {
        self.include_completed || entry.status == EntryStatus::Required
    }
}

/// Counts over the unfiltered snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Progress {
    pub total: usize,
    /// Entries marked `bought`.
    pub completed: usize,
    pub unavailable: usize,
}

impl Progress {
    /// Count statuses across `entries`.
    pub fn of<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a ShoppingListEntry>,
    {
        entries
            .into_iter()
            .fold(Self::default(), |mut progress, entry| {
                progress.total += 1;
                match entry.status {
                    EntryStatus::Bought => progress.completed += 1,
                    EntryStatus::Unavailable => progress.unavailable += 1,
                    EntryStatus::Required => {}
                }
                progress
            })
    }

    /// Entries still marked `required`.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.total
            .saturating_sub(self.completed)
            .saturating_sub(self.unavailable)
    }

    /// Share of entries bought, `0.0` for an empty list.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // list sizes are far below 2^52
    pub fn fraction_completed(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.completed as f64 / self.total as f64
    }
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} of {} items collected ({} unavailable)",
            self.completed, self.total, self.unavailable
        )
    }
}

/// A render-ready list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposedList<'a> {
    pub list_id: ListId,
    pub date: NaiveDate,
    pub options: ComposeOptions,
    pub sections: SectionGroups<'a>,
    pub progress: Progress,
}

impl ComposedList<'_> {
    /// Whether no entry survived the filter.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// The places a composed list is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    /// Interactive shopping mode.
    Shop,
    /// Paper checklist.
    Print,
    /// Shareable text and PDF export.
    Share,
}

impl Surface {
    /// Options the surface composes with, given what the viewer asked for.
    ///
    /// Only the shop surface honors the viewer's choices. The print and
    /// share surfaces always list every entry in walking order.
    #[must_use]
    pub const fn options(self, requested: ComposeOptions) -> ComposeOptions {
        match self {
            Self::Shop => requested,
            Self::Print | Self::Share => ComposeOptions::EVERYTHING_BY_LOCATION,
        }
    }
}

/// Filter, sort and group a snapshot for display.
#[must_use]
pub fn compose(list: &ShoppingList, options: ComposeOptions) -> ComposedList<'_> {
    let mut visible: Vec<&ShoppingListEntry> = list
        .entries
        .iter()
        .filter(|entry| options.admits(entry))
        .collect();
    sort_entries(&mut visible, options.sort_mode);

    ComposedList {
        list_id: list.id,
        date: list.date,
        options,
        sections: group_by_section(visible),
        progress: Progress::of(&list.entries),
    }
}

/// Compose a snapshot for a particular surface.
#[must_use]
pub fn compose_for(
    list: &ShoppingList,
    surface: Surface,
    requested: ComposeOptions,
) -> ComposedList<'_> {
    compose(list, surface.options(requested))
}
