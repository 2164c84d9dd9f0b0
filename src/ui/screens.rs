use std::cmp::Ordering;

use crate::models::{Category, Season, WardrobeItem};

/// Sort direction for the wardrobe list, keyed on `created_at`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub(crate) enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

impl SortOrder {
    pub(crate) fn label(self) -> &'static str {
        match self {
            SortOrder::Newest => "Newest first",
            SortOrder::Oldest => "Oldest first",
        }
    }
}

/// The wardrobe list: the last snapshot read from the store plus the filtered
/// and sorted view the user is looking at.
pub(crate) struct WardrobeScreen {
    pub(crate) items: Vec<WardrobeItem>,
    pub(crate) filtered: Vec<WardrobeItem>,
    pub(crate) season: Option<Season>,
    pub(crate) category: Option<Category>,
    pub(crate) sort: SortOrder,
    pub(crate) selected: usize,
}

impl WardrobeScreen {
    pub(crate) fn new(items: Vec<WardrobeItem>) -> Self {
        let mut screen = Self {
            items,
            filtered: Vec::new(),
            season: None,
            category: None,
            sort: SortOrder::default(),
            selected: 0,
        };
        screen.apply_filter();
        screen
    }

    /// Rebuild `filtered` from `items`. Filtering and sorting happen here, in
    /// memory, because the store only hands back an unordered snapshot.
    pub(crate) fn apply_filter(&mut self) {
        let mut filtered: Vec<WardrobeItem> = self
            .items
            .iter()
            .filter(|item| self.season.map_or(true, |s| item.season == s))
            .filter(|item| self.category.map_or(true, |c| item.category == c))
            .cloned()
            .collect();

        let sort = self.sort;
        filtered.sort_by(|a, b| {
            let ordering = compare_created(a, b);
            match sort {
                SortOrder::Newest => ordering.reverse(),
                SortOrder::Oldest => ordering,
            }
        });

        self.filtered = filtered;
        self.ensure_in_bounds();
    }

    /// Replace the snapshot after a reload, keeping filters and trying to keep
    /// `focus_id` selected.
    pub(crate) fn set_items(&mut self, items: Vec<WardrobeItem>, focus_id: Option<&str>) {
        self.items = items;
        if self.season.is_some_and(|s| !self.items.iter().any(|i| i.season == s)) {
            self.season = None;
        }
        if self
            .category
            .is_some_and(|c| !self.items.iter().any(|i| i.category == c))
        {
            self.category = None;
        }
        self.apply_filter();

        if let Some(id) = focus_id {
            if let Some(idx) = self.filtered.iter().position(|item| item.id == id) {
                self.selected = idx;
            }
        }
    }

    /// Step the season filter through "all" and the seasons that actually
    /// occur in the wardrobe.
    pub(crate) fn cycle_season(&mut self) {
        let present: Vec<Season> = Season::ALL
            .into_iter()
            .filter(|s| self.items.iter().any(|i| i.season == *s))
            .collect();
        self.season = next_filter(&present, self.season);
        self.selected = 0;
        self.apply_filter();
    }

    pub(crate) fn cycle_category(&mut self) {
        let present: Vec<Category> = Category::ALL
            .into_iter()
            .filter(|c| self.items.iter().any(|i| i.category == *c))
            .collect();
        self.category = next_filter(&present, self.category);
        self.selected = 0;
        self.apply_filter();
    }

    pub(crate) fn toggle_sort(&mut self) {
        self.sort = match self.sort {
            SortOrder::Newest => SortOrder::Oldest,
            SortOrder::Oldest => SortOrder::Newest,
        };
        self.selected = 0;
        self.apply_filter();
    }

    pub(crate) fn current_item(&self) -> Option<&WardrobeItem> {
        self.filtered.get(self.selected)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.filtered.is_empty() {
            return;
        }
        let last = self.filtered.len() as isize - 1;
        self.selected = (self.selected as isize + offset).clamp(0, last) as usize;
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        self.selected = self.filtered.len().saturating_sub(1);
    }

    pub(crate) fn ensure_in_bounds(&mut self) {
        if self.filtered.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.filtered.len() {
            self.selected = self.filtered.len() - 1;
        }
    }

    pub(crate) fn summary(&self) -> String {
        format!(
            "Showing {} of {} items",
            self.filtered.len(),
            self.items.len()
        )
    }

    pub(crate) fn filter_label(&self) -> String {
        let season = self.season.map_or("All seasons", Season::label);
        let category = self.category.map_or("All categories", Category::label);
        format!("{season} · {category} · {}", self.sort.label())
    }

    /// Message for an empty list. `None` while there is something to show.
    pub(crate) fn empty_message(&self) -> Option<&'static str> {
        if !self.filtered.is_empty() {
            None
        } else if self.items.is_empty() {
            Some("Add the first item to your wardrobe")
        } else {
            Some("Try changing the filters")
        }
    }
}

/// Advance a filter through `None -> present[0] -> ... -> present[n-1] -> None`.
fn next_filter<T: Copy + PartialEq>(present: &[T], current: Option<T>) -> Option<T> {
    match current {
        None => present.first().copied(),
        Some(value) => present
            .iter()
            .position(|v| *v == value)
            .and_then(|idx| present.get(idx + 1))
            .copied(),
    }
}

/// Order by parsed creation time; unparseable timestamps sort as oldest and
/// ties fall back to the raw string so the order stays stable.
fn compare_created(a: &WardrobeItem, b: &WardrobeItem) -> Ordering {
    a.created_at_time()
        .cmp(&b.created_at_time())
        .then_with(|| a.created_at.cmp(&b.created_at))
}
