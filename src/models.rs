//! Domain models that mirror the `items` table and get passed throughout the
//! TUI. The intent is that these types stay light-weight data holders so other
//! layers can focus on presentation and persistence logic. The enums carry the
//! canonical lowercase strings written to disk, which is also the boundary
//! where unknown values get rejected.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

use crate::error::{Result, StoreError};

/// Season tag attached to every item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    /// Every season in declaration order. Filter cycling and the add form both
    /// walk this list so the order stays consistent across the UI.
    pub const ALL: [Season; 4] = [
        Season::Winter,
        Season::Spring,
        Season::Summer,
        Season::Autumn,
    ];

    /// Canonical value stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
        }
    }

    /// Human-facing label.
    pub fn label(self) -> &'static str {
        match self {
            Season::Winter => "Winter",
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Autumn => "Autumn",
        }
    }

    /// Following season, wrapping from autumn back to winter.
    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    /// Preceding season, wrapping from winter back to autumn.
    pub fn previous(self) -> Self {
        cycle(&Self::ALL, self, -1)
    }
}

impl FromStr for Season {
    type Err = StoreError;

    fn from_str(value: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|season| season.as_str() == value)
            .ok_or_else(|| StoreError::Validation(format!("unknown season {value:?}")))
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Clothing category attached to every item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Blouses,
    Tops,
    Cardigans,
    Dresses,
    Bottoms,
    Pants,
    Skirts,
    Outwear,
    Accessories,
    Shoes,
}

impl Category {
    /// Every category in the order the UI cycles through them.
    pub const ALL: [Category; 10] = [
        Category::Blouses,
        Category::Tops,
        Category::Cardigans,
        Category::Dresses,
        Category::Bottoms,
        Category::Pants,
        Category::Skirts,
        Category::Outwear,
        Category::Accessories,
        Category::Shoes,
    ];

    /// Canonical value stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Blouses => "blouses",
            Category::Tops => "tops",
            Category::Cardigans => "cardigans",
            Category::Dresses => "dresses",
            Category::Bottoms => "bottoms",
            Category::Pants => "pants",
            Category::Skirts => "skirts",
            Category::Outwear => "outwear",
            Category::Accessories => "accessories",
            Category::Shoes => "shoes",
        }
    }

    /// Human-facing label. A few of these read differently from the stored
    /// value (`pants` are sweatpants, `accessories` are tights) and the labels
    /// are what users actually recognise.
    pub fn label(self) -> &'static str {
        match self {
            Category::Blouses => "Blouses",
            Category::Tops => "T-shirts & tops",
            Category::Cardigans => "Jackets & cardigans",
            Category::Dresses => "Dresses",
            Category::Bottoms => "Trousers",
            Category::Pants => "Sweatpants",
            Category::Skirts => "Skirts",
            Category::Outwear => "Outerwear",
            Category::Accessories => "Tights",
            Category::Shoes => "Shoes",
        }
    }

    /// Following category in [`Category::ALL`] order, wrapping at the end.
    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    /// Preceding category in [`Category::ALL`] order, wrapping at the start.
    pub fn previous(self) -> Self {
        cycle(&Self::ALL, self, -1)
    }
}

impl FromStr for Category {
    type Err = StoreError;

    fn from_str(value: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| StoreError::Validation(format!("unknown category {value:?}")))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T, step: isize) -> T {
    let len = all.len() as isize;
    let idx = all.iter().position(|v| *v == current).unwrap_or(0) as isize;
    all[(idx + step).rem_euclid(len) as usize]
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One catalog entry: a single clothing item with its photo and metadata.
pub struct WardrobeItem {
    /// Opaque primary key. Assigned once when the item is created and never
    /// changed afterwards.
    pub id: String,
    pub season: Season,
    pub category: Category,
    /// Free text, may be empty.
    pub description: String,
    /// Self-contained `data:` URI holding the photo.
    pub image_base64: String,
    /// ISO-8601 creation timestamp. Kept as the original string so a stored
    /// item reads back exactly as it was written.
    pub created_at: String,
}

impl WardrobeItem {
    /// Build a new item with a fresh id and the current time as `created_at`.
    pub fn new(
        season: Season,
        category: Category,
        description: impl Into<String>,
        image_base64: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            season,
            category,
            description: description.into(),
            image_base64: image_base64.into(),
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Check the fields the type system cannot: the id and photo must be
    /// present. Ids are opaque, so only the empty string is refused, and
    /// `created_at` is stored as given whether or not it parses.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(StoreError::Validation("item id must not be empty".into()));
        }
        if self.image_base64.is_empty() {
            return Err(StoreError::Validation(format!(
                "item {} has no photo",
                self.id
            )));
        }
        Ok(())
    }

    /// Parsed creation time, used for sorting and display.
    pub fn created_at_time(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Day-precision creation date (`dd.mm.yyyy`), falling back to the raw
    /// string when it does not parse.
    pub fn created_on(&self) -> String {
        self.created_at_time()
            .map(|dt| dt.format("%d.%m.%Y").to_string())
            .unwrap_or_else(|| self.created_at.clone())
    }

    /// Trimmed description, or a placeholder when there is none.
    pub fn display_description(&self) -> &str {
        let trimmed = self.description.trim();
        if trimmed.is_empty() {
            "No description"
        } else {
            trimmed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_parses_canonical_values() {
        for season in Season::ALL {
            assert_eq!(season.as_str().parse::<Season>().unwrap(), season);
        }
    }

    #[test]
    fn unknown_enum_values_are_validation_errors() {
        assert!(matches!(
            "monsoon".parse::<Season>(),
            Err(StoreError::Validation(_))
        ));
        assert!(matches!(
            "Shoes".parse::<Category>(),
            Err(StoreError::Validation(_))
        ));
    }

    #[test]
    fn cycling_wraps_in_both_directions() {
        assert_eq!(Season::Autumn.next(), Season::Winter);
        assert_eq!(Season::Winter.previous(), Season::Autumn);
        assert_eq!(Category::Shoes.next(), Category::Blouses);
        assert_eq!(Category::Blouses.previous(), Category::Shoes);
    }

    #[test]
    fn new_items_get_unique_ids_and_iso_timestamps() {
        let a = WardrobeItem::new(Season::Winter, Category::Shoes, "", "data:image/png;base64,AA==");
        let b = WardrobeItem::new(Season::Winter, Category::Shoes, "", "data:image/png;base64,AA==");
        assert_ne!(a.id, b.id);
        assert!(a.created_at.ends_with('Z'));
        assert!(a.created_at_time().is_some());
        a.validate().unwrap();
    }

    #[test]
    fn validate_rejects_missing_photo() {
        let item = WardrobeItem::new(Season::Summer, Category::Dresses, "linen", "");
        assert!(matches!(item.validate(), Err(StoreError::Validation(_))));
    }

    #[test]
    fn validate_accepts_opaque_ids_and_loose_timestamps() {
        let mut item = WardrobeItem::new(Season::Winter, Category::Shoes, "", "x");
        item.id = " ".into();
        item.created_at = "2024-01-01T00:00:00".into();
        item.validate().unwrap();
        assert!(item.created_at_time().is_none());
        assert_eq!(item.created_on(), "2024-01-01T00:00:00");

        item.id.clear();
        assert!(matches!(item.validate(), Err(StoreError::Validation(_))));
    }

    #[test]
    fn created_on_formats_day_month_year() {
        let mut item = WardrobeItem::new(Season::Spring, Category::Tops, "", "x");
        item.created_at = "2024-03-07T10:00:00Z".into();
        assert_eq!(item.created_on(), "07.03.2024");
    }

    #[test]
    fn blank_description_has_placeholder() {
        let item = WardrobeItem::new(Season::Spring, Category::Tops, "   ", "x");
        assert_eq!(item.display_description(), "No description");
    }
}
