use std::path::Path;

use anyhow::{anyhow, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::images::load_data_uri;
use crate::models::{Category, Season, WardrobeItem};

/// Fields available within the add-item form.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub(crate) enum ItemField {
    #[default]
    Photo,
    Season,
    Category,
    Description,
}

impl ItemField {
    fn next(self) -> Self {
        match self {
            ItemField::Photo => ItemField::Season,
            ItemField::Season => ItemField::Category,
            ItemField::Category => ItemField::Description,
            ItemField::Description => ItemField::Photo,
        }
    }

    fn previous(self) -> Self {
        match self {
            ItemField::Photo => ItemField::Description,
            ItemField::Season => ItemField::Photo,
            ItemField::Category => ItemField::Season,
            ItemField::Description => ItemField::Category,
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            ItemField::Photo => "Photo",
            ItemField::Season => "Season",
            ItemField::Category => "Category",
            ItemField::Description => "Description",
        }
    }
}

/// State of the add-item form. The photo path is what the user types; the
/// encoded image only exists once the path has been loaded successfully.
#[derive(Clone, Debug)]
pub(crate) struct ItemForm {
    pub(crate) photo_path: String,
    pub(crate) image_base64: Option<String>,
    pub(crate) season: Season,
    pub(crate) category: Category,
    pub(crate) description: String,
    pub(crate) active: ItemField,
    pub(crate) error: Option<String>,
}

impl Default for ItemForm {
    fn default() -> Self {
        Self {
            photo_path: String::new(),
            image_base64: None,
            season: Season::Winter,
            category: Category::Blouses,
            description: String::new(),
            active: ItemField::Photo,
            error: None,
        }
    }
}

impl ItemForm {
    pub(crate) fn next_field(&mut self) {
        self.active = self.active.next();
    }

    pub(crate) fn previous_field(&mut self) {
        self.active = self.active.previous();
    }

    /// Left/right on the enum fields. Returns whether anything changed.
    pub(crate) fn cycle_choice(&mut self, forward: bool) -> bool {
        match self.active {
            ItemField::Season => {
                self.season = if forward {
                    self.season.next()
                } else {
                    self.season.previous()
                };
                true
            }
            ItemField::Category => {
                self.category = if forward {
                    self.category.next()
                } else {
                    self.category.previous()
                };
                true
            }
            ItemField::Photo | ItemField::Description => false,
        }
    }

    /// Append a character to the active text field. Editing the path forgets
    /// any previously loaded photo so the form never saves a stale image.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            ItemField::Photo => {
                self.photo_path.push(ch);
                self.image_base64 = None;
                true
            }
            ItemField::Description => {
                self.description.push(ch);
                true
            }
            ItemField::Season | ItemField::Category => false,
        }
    }

    pub(crate) fn backspace(&mut self) {
        match self.active {
            ItemField::Photo => {
                if self.photo_path.pop().is_some() {
                    self.image_base64 = None;
                }
            }
            ItemField::Description => {
                self.description.pop();
            }
            ItemField::Season | ItemField::Category => {}
        }
    }

    /// Read the file at `photo_path` into the form.
    pub(crate) fn load_photo(&mut self) -> Result<()> {
        let path = self.photo_path.trim();
        if path.is_empty() {
            return Err(anyhow!("Enter the path of a photo first."));
        }
        self.image_base64 = Some(load_data_uri(Path::new(path))?);
        Ok(())
    }

    /// Whether cancelling would lose anything the user entered.
    pub(crate) fn is_dirty(&self) -> bool {
        let blank = Self::default();
        !self.photo_path.trim().is_empty()
            || !self.description.trim().is_empty()
            || self.season != blank.season
            || self.category != blank.category
    }

    /// Validate the inputs and build the item to persist.
    pub(crate) fn build_item(&self) -> Result<WardrobeItem> {
        let image = self
            .image_base64
            .as_deref()
            .filter(|image| !image.is_empty())
            .ok_or_else(|| anyhow!("Please add a photo of the item."))?;
        Ok(WardrobeItem::new(
            self.season,
            self.category,
            self.description.trim(),
            image,
        ))
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field: ItemField) -> Line<'static> {
        let is_active = self.active == field;
        let (display, empty) = match field {
            ItemField::Photo => {
                if self.photo_path.is_empty() {
                    ("<path to image, Enter to load>".to_string(), true)
                } else if self.image_base64.is_some() {
                    (format!("{} (loaded)", self.photo_path), false)
                } else {
                    (self.photo_path.clone(), false)
                }
            }
            ItemField::Season => (format!("< {} >", self.season.label()), false),
            ItemField::Category => (format!("< {} >", self.category.label()), false),
            ItemField::Description => {
                if self.description.is_empty() {
                    ("<optional>".to_string(), true)
                } else {
                    (self.description.clone(), false)
                }
            }
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if empty {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{}: ", field.label())),
            Span::styled(display, style),
        ])
    }

    /// Character count of the text in the active field, used to place the
    /// cursor.
    pub(crate) fn value_len(&self, field: ItemField) -> usize {
        match field {
            ItemField::Photo => self.photo_path.chars().count(),
            ItemField::Description => self.description.chars().count(),
            ItemField::Season | ItemField::Category => 0,
        }
    }
}

/// Item awaiting a delete confirmation.
#[derive(Clone)]
pub(crate) struct ConfirmItemDelete {
    pub(crate) id: String,
    pub(crate) label: String,
}

impl ConfirmItemDelete {
    pub(crate) fn from(item: &WardrobeItem) -> Self {
        Self {
            id: item.id.clone(),
            label: format!(
                "{} ({}, {})",
                item.display_description(),
                item.category.label(),
                item.season.label()
            ),
        }
    }
}
