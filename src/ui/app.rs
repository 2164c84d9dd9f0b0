use std::mem;

use anyhow::{Context, Result};
use crossterm::event::KeyCode;
use open::that as open_path;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::db::ItemStore;
use crate::images::{clear_exported, export_for_viewing, remove_exported};
use crate::models::WardrobeItem;

use super::forms::{ConfirmItemDelete, ItemField, ItemForm};
use super::helpers::{centered_rect, item_detail_lines, item_row_line, surface_error};
use super::screens::WardrobeScreen;

/// Header space for the title, summary, and active filters.
const HEADER_HEIGHT: u16 = 4;
/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Rows skipped by PageUp/PageDown.
const PAGE_STEP: isize = 10;

/// Modal states layered over the wardrobe list.
enum Mode {
    Normal,
    AddingItem(ItemForm),
    ConfirmDiscard(ItemForm),
    ConfirmDelete(ConfirmItemDelete),
    ConfirmClear,
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
pub struct App {
    store: ItemStore,
    config: AppConfig,
    screen: WardrobeScreen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    /// Start in the normal list view over the items already read from `store`.
    pub fn new(store: ItemStore, config: AppConfig, items: Vec<WardrobeItem>) -> Self {
        Self {
            store,
            config,
            screen: WardrobeScreen::new(items),
            mode: Mode::Normal,
            status: None,
        }
    }

    /// Hand the store back so the caller can close it explicitly.
    pub fn into_store(self) -> ItemStore {
        self.store
    }

    /// Process one key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::AddingItem(form) => self.handle_add_item(code, form)?,
            Mode::ConfirmDiscard(form) => self.handle_confirm_discard(code, form),
            Mode::ConfirmDelete(confirm) => self.handle_confirm_delete(code, confirm)?,
            Mode::ConfirmClear => self.handle_confirm_clear(code)?,
        };

        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => *exit = true,
            KeyCode::Up => self.screen.move_selection(-1),
            KeyCode::Down => self.screen.move_selection(1),
            KeyCode::PageUp => self.screen.move_selection(-PAGE_STEP),
            KeyCode::PageDown => self.screen.move_selection(PAGE_STEP),
            KeyCode::Home => self.screen.select_first(),
            KeyCode::End => self.screen.select_last(),
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.clear_status();
                self.screen.cycle_season();
            }
            KeyCode::Char('c') | KeyCode::Char('C') => {
                self.clear_status();
                self.screen.cycle_category();
            }
            KeyCode::Char('o') | KeyCode::Char('O') => {
                self.clear_status();
                self.screen.toggle_sort();
            }
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('+') => {
                self.clear_status();
                return Ok(Mode::AddingItem(ItemForm::default()));
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Char('-') => {
                match self.screen.current_item() {
                    Some(item) => {
                        let confirm = ConfirmItemDelete::from(item);
                        self.clear_status();
                        return Ok(Mode::ConfirmDelete(confirm));
                    }
                    None => self.set_status("No item selected to delete.", StatusKind::Error),
                }
            }
            KeyCode::Char('X') => {
                if self.screen.items.is_empty() {
                    self.set_status("The wardrobe is already empty.", StatusKind::Info);
                } else {
                    self.clear_status();
                    return Ok(Mode::ConfirmClear);
                }
            }
            KeyCode::Char('r') | KeyCode::Char('R') => match self.reload_items(None) {
                Ok(()) => self.set_status("Wardrobe reloaded.", StatusKind::Info),
                Err(err) => self.set_status(surface_error(&err), StatusKind::Error),
            },
            KeyCode::Enter | KeyCode::Char('v') | KeyCode::Char('V') => {
                if let Err(err) = self.open_current_photo() {
                    self.set_status(surface_error(&err), StatusKind::Error);
                }
            }
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_add_item(&mut self, code: KeyCode, mut form: ItemForm) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                if form.is_dirty() {
                    return Ok(Mode::ConfirmDiscard(form));
                }
                self.set_status("Add item cancelled.", StatusKind::Info);
                return Ok(Mode::Normal);
            }
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Left => {
                form.cycle_choice(false);
            }
            KeyCode::Right => {
                form.cycle_choice(true);
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter if form.active == ItemField::Photo && form.image_base64.is_none() => {
                match form.load_photo() {
                    Ok(()) => {
                        form.error = None;
                        form.next_field();
                    }
                    Err(err) => form.error = Some(surface_error(&err)),
                }
            }
            KeyCode::Enter => match self.save_new_item(&form) {
                Ok(()) => return Ok(Mode::Normal),
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Ok(Mode::AddingItem(form))
    }

    fn handle_confirm_discard(&mut self, code: KeyCode, form: ItemForm) -> Mode {
        match code {
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.set_status("Add item cancelled.", StatusKind::Info);
                Mode::Normal
            }
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => Mode::AddingItem(form),
            _ => Mode::ConfirmDiscard(form),
        }
    }

    fn handle_confirm_delete(&mut self, code: KeyCode, confirm: ConfirmItemDelete) -> Result<Mode> {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Deletion cancelled.", StatusKind::Info);
                Ok(Mode::Normal)
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                if let Err(err) = self.perform_delete(&confirm) {
                    self.set_status(surface_error(&err), StatusKind::Error);
                }
                Ok(Mode::Normal)
            }
            _ => Ok(Mode::ConfirmDelete(confirm)),
        }
    }

    fn handle_confirm_clear(&mut self, code: KeyCode) -> Result<Mode> {
        match code {
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                if let Err(err) = self.perform_clear() {
                    self.set_status(surface_error(&err), StatusKind::Error);
                }
                Ok(Mode::Normal)
            }
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Clear cancelled.", StatusKind::Info);
                Ok(Mode::Normal)
            }
            _ => Ok(Mode::ConfirmClear),
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let [header_area, body_area, footer_area] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .areas(area);

        self.draw_header(frame, header_area);
        self.draw_body(frame, body_area);
        self.draw_footer(frame, footer_area);

        match &self.mode {
            Mode::AddingItem(form) => self.draw_item_form(frame, area, form),
            Mode::ConfirmDiscard(_) => self.draw_confirm(
                frame,
                area,
                "Discard Item",
                vec![
                    Line::from("Are you sure? Unsaved data will be lost."),
                ],
            ),
            Mode::ConfirmDelete(confirm) => self.draw_confirm(
                frame,
                area,
                "Confirm Removal",
                vec![
                    Line::from("Delete this item from your wardrobe?"),
                    Line::from(confirm.label.clone()),
                ],
            ),
            Mode::ConfirmClear => self.draw_confirm(
                frame,
                area,
                "Clear Wardrobe",
                vec![
                    Line::from(format!(
                        "Remove all {} items? This cannot be undone.",
                        self.screen.items.len()
                    )),
                ],
            ),
            Mode::Normal => {}
        }
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::BOTTOM);
        let lines = vec![
            Line::from(Span::styled(
                "My Wardrobe",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(self.screen.summary()),
            Line::from(Span::styled(
                self.screen.filter_label(),
                Style::default().fg(Color::Gray),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn draw_body(&self, frame: &mut Frame, area: Rect) {
        if let Some(message) = self.screen.empty_message() {
            let paragraph = Paragraph::new(vec![
                Line::from(""),
                Line::from(message),
                Line::from(Span::styled(
                    "Press A to add an item.",
                    Style::default().fg(Color::Gray),
                )),
            ])
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Items"));
            frame.render_widget(paragraph, area);
            return;
        }

        let [list_area, detail_area] = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .areas(area);

        let row_width = list_area.width.saturating_sub(4) as usize;
        let rows: Vec<ListItem> = self
            .screen
            .filtered
            .iter()
            .map(|item| ListItem::new(item_row_line(item, row_width)))
            .collect();
        let list = List::new(rows)
            .block(Block::default().borders(Borders::ALL).title("Items"))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default().with_selected(Some(self.screen.selected));
        frame.render_stateful_widget(list, list_area, &mut state);

        let detail = self
            .screen
            .current_item()
            .map(item_detail_lines)
            .unwrap_or_default();
        let paragraph = Paragraph::new(detail)
            .block(Block::default().borders(Borders::ALL).title("Details"))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, detail_area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let status_line = match &self.status {
            Some(status) => Line::from(Span::styled(status.text.clone(), status.kind.style())),
            None => Line::from(""),
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let hints: &[(&str, &str)] = match &self.mode {
            Mode::Normal => &[
                ("[↑↓]", " Navigate   "),
                ("[S]", " Season   "),
                ("[C]", " Category   "),
                ("[O]", " Sort   "),
                ("[A]", " Add   "),
                ("[D]", " Delete   "),
                ("[V]", " View photo   "),
                ("[R]", " Reload   "),
                ("[Q]", " Quit"),
            ],
            Mode::AddingItem(_) => &[
                ("[Tab]", " Next field   "),
                ("[←→]", " Change choice   "),
                ("[Enter]", " Load photo / Save   "),
                ("[Esc]", " Cancel"),
            ],
            Mode::ConfirmDiscard(_) | Mode::ConfirmDelete(_) | Mode::ConfirmClear => {
                &[("[Y]", " Confirm   "), ("[N]", " Cancel")]
            }
        };

        let spans: Vec<Span<'static>> = hints
            .iter()
            .flat_map(|(key, text)| [Span::styled(*key, key_style), Span::raw(*text)])
            .collect();
        Line::from(spans)
    }

    fn draw_item_form(&self, frame: &mut Frame, area: Rect, form: &ItemForm) {
        let popup_area = centered_rect(70, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Add Item").borders(Borders::ALL);
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let fields = [
            ItemField::Photo,
            ItemField::Season,
            ItemField::Category,
            ItemField::Description,
        ];
        let mut lines: Vec<Line> = fields.iter().map(|f| form.build_line(*f)).collect();
        lines.push(Line::from(""));
        match &form.error {
            Some(error) => lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            ))),
            None => lines.push(Line::from(Span::styled(
                "JPG, PNG, WEBP up to 10MB",
                Style::default().fg(Color::Gray),
            ))),
        }

        frame.render_widget(Paragraph::new(lines), inner);

        if matches!(form.active, ItemField::Photo | ItemField::Description) {
            let row = fields.iter().position(|f| *f == form.active).unwrap_or(0) as u16;
            let prefix = form.active.label().len() as u16 + 2;
            frame.set_cursor_position((
                inner.x + prefix + form.value_len(form.active) as u16,
                inner.y + row,
            ));
        }
    }

    fn draw_confirm(&self, frame: &mut Frame, area: Rect, title: &str, mut lines: Vec<Line>) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(title).borders(Borders::ALL);
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press Y to confirm or N / Esc to cancel.",
            Style::default().fg(Color::Gray),
        )));

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    fn save_new_item(&mut self, form: &ItemForm) -> Result<()> {
        let item = form.build_item()?;
        let id = self.store.add(&item).context("failed to add item")?;
        info!(id = %id, "item added from form");
        self.refresh_after_change(Some(&id), "Item added to your wardrobe.", "Item added");
        Ok(())
    }

    fn perform_delete(&mut self, confirm: &ConfirmItemDelete) -> Result<()> {
        self.store
            .delete(&confirm.id)
            .context("failed to delete item")?;
        if let Err(err) = remove_exported(&confirm.id, &self.config.image_cache_dir()) {
            warn!(id = %confirm.id, error = %err, "failed to remove exported photo");
        }
        self.refresh_after_change(None, "Item deleted.", "Item deleted");
        Ok(())
    }

    fn perform_clear(&mut self) -> Result<()> {
        self.store.clear().context("failed to clear wardrobe")?;
        if let Err(err) = clear_exported(&self.config.image_cache_dir()) {
            warn!(error = %err, "failed to empty photo cache");
        }
        self.refresh_after_change(None, "Wardrobe cleared.", "Wardrobe cleared");
        Ok(())
    }

    /// Reload after a write that already succeeded. A failed reload must not
    /// read as a failed write, so it only changes the status text.
    fn refresh_after_change(&mut self, focus_id: Option<&str>, done: &str, action: &str) {
        match self.reload_items(focus_id) {
            Ok(()) => self.set_status(done, StatusKind::Info),
            Err(err) => {
                warn!(error = %err, "reload after {action} failed");
                self.set_status(
                    format!(
                        "{action}, but the list could not be refreshed: {}",
                        surface_error(&err)
                    ),
                    StatusKind::Error,
                );
            }
        }
    }

    /// Re-read the store. The in-memory list is only a snapshot, so every
    /// mutation is followed by one of these.
    fn reload_items(&mut self, focus_id: Option<&str>) -> Result<()> {
        let items = self.store.list().context("failed to load items")?;
        self.screen.set_items(items, focus_id);
        Ok(())
    }

    fn open_current_photo(&mut self) -> Result<()> {
        let Some(item) = self.screen.current_item() else {
            self.set_status("No item selected.", StatusKind::Error);
            return Ok(());
        };
        let path = export_for_viewing(item, &self.config.image_cache_dir())?;
        if let Err(err) = open_path(&path) {
            warn!(path = %path.display(), error = %err, "failed to launch image viewer");
            self.set_status(
                format!("Photo saved to {}", path.display()),
                StatusKind::Info,
            );
        } else {
            self.set_status("Opened photo in the system viewer.", StatusKind::Info);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::Cursor;

    use super::*;
    use crate::models::{Category, Season};

    fn item(id: &str, season: Season, category: Category, created_at: &str) -> WardrobeItem {
        WardrobeItem {
            id: id.into(),
            season,
            category,
            description: format!("item {id}"),
            image_base64: "data:image/png;base64,AA==".into(),
            created_at: created_at.into(),
        }
    }

    fn app_with(items: &[WardrobeItem]) -> (App, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = ItemStore::open_in_memory().unwrap();
        for item in items {
            store.add(item).unwrap();
        }
        let listed = store.list().unwrap();
        let app = App::new(store, AppConfig::with_data_dir(dir.path()), listed);
        (app, dir)
    }

    fn press(app: &mut App, codes: &[KeyCode]) {
        for code in codes {
            app.handle_key(*code).unwrap();
        }
    }

    #[test]
    fn quit_keys_exit() {
        let (mut app, _dir) = app_with(&[]);
        assert!(app.handle_key(KeyCode::Char('q')).unwrap());
    }

    #[test]
    fn confirmed_delete_removes_selected_item() {
        let (mut app, _dir) = app_with(&[
            item("1", Season::Winter, Category::Shoes, "2024-01-01T00:00:00Z"),
            item("2", Season::Summer, Category::Dresses, "2024-02-01T00:00:00Z"),
        ]);
        // newest first, so "2" is selected
        press(&mut app, &[KeyCode::Char('d'), KeyCode::Char('y')]);

        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(app.store.count().unwrap(), 1);
        let ids: Vec<_> = app.screen.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["1"]);
    }

    #[test]
    fn cancelled_delete_keeps_item() {
        let (mut app, _dir) = app_with(&[item(
            "1",
            Season::Winter,
            Category::Shoes,
            "2024-01-01T00:00:00Z",
        )]);
        press(&mut app, &[KeyCode::Char('d'), KeyCode::Char('n')]);
        assert_eq!(app.store.count().unwrap(), 1);
        assert_eq!(app.screen.items.len(), 1);
    }

    #[test]
    fn clear_requires_confirmation() {
        let (mut app, _dir) = app_with(&[
            item("1", Season::Winter, Category::Shoes, "2024-01-01T00:00:00Z"),
            item("2", Season::Summer, Category::Dresses, "2024-02-01T00:00:00Z"),
        ]);
        press(&mut app, &[KeyCode::Char('X')]);
        assert!(matches!(app.mode, Mode::ConfirmClear));
        press(&mut app, &[KeyCode::Char('y')]);
        assert_eq!(app.store.count().unwrap(), 0);
        assert!(app.screen.items.is_empty());
    }

    #[test]
    fn escaping_dirty_form_asks_before_discarding() {
        let (mut app, _dir) = app_with(&[]);
        press(&mut app, &[KeyCode::Char('a'), KeyCode::Char('x'), KeyCode::Esc]);
        assert!(matches!(app.mode, Mode::ConfirmDiscard(_)));
        press(&mut app, &[KeyCode::Char('n')]);
        assert!(matches!(app.mode, Mode::AddingItem(ref form) if form.photo_path == "x"));
        press(&mut app, &[KeyCode::Esc, KeyCode::Char('y')]);
        assert!(matches!(app.mode, Mode::Normal));
    }

    #[test]
    fn saving_without_photo_keeps_form_open() {
        let (mut app, _dir) = app_with(&[]);
        press(&mut app, &[KeyCode::Char('a'), KeyCode::Tab, KeyCode::Enter]);
        match &app.mode {
            Mode::AddingItem(form) => {
                assert_eq!(form.error.as_deref(), Some("Please add a photo of the item."))
            }
            _ => panic!("form should stay open"),
        }
        assert_eq!(app.store.count().unwrap(), 0);
    }

    #[test]
    fn add_form_loads_photo_and_saves_item() {
        let (mut app, dir) = app_with(&[]);
        let photo = dir.path().join("boots.png");
        let mut bytes = Cursor::new(Vec::new());
        image::DynamicImage::new_rgb8(2, 2)
            .write_to(&mut bytes, image::ImageFormat::Png)
            .unwrap();
        fs::write(&photo, bytes.into_inner()).unwrap();

        press(&mut app, &[KeyCode::Char('a')]);
        for ch in photo.display().to_string().chars() {
            app.handle_key(KeyCode::Char(ch)).unwrap();
        }
        // load photo, then season -> Spring, category -> Tops, then save
        press(
            &mut app,
            &[
                KeyCode::Enter,
                KeyCode::Right,
                KeyCode::Tab,
                KeyCode::Right,
                KeyCode::Enter,
            ],
        );

        assert!(matches!(app.mode, Mode::Normal));
        let stored = app.store.list().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].season, Season::Spring);
        assert_eq!(stored[0].category, Category::Tops);
        assert_eq!(app.screen.current_item().map(|i| &i.id), Some(&stored[0].id));
    }

    #[test]
    fn failed_reload_after_add_still_closes_form() {
        let (mut app, dir) = app_with(&[]);
        // a row the store cannot decode makes every later list() fail
        app.store
            .connection()
            .execute(
                "INSERT INTO items (id, season, category, description, image_base64, created_at)
                 VALUES ('odd', 'monsoon', 'shoes', '', 'data:image/png;base64,AA==', '2024')",
                [],
            )
            .unwrap();
        let photo = dir.path().join("scarf.png");
        let mut bytes = Cursor::new(Vec::new());
        image::DynamicImage::new_rgb8(2, 2)
            .write_to(&mut bytes, image::ImageFormat::Png)
            .unwrap();
        fs::write(&photo, bytes.into_inner()).unwrap();

        press(&mut app, &[KeyCode::Char('a')]);
        for ch in photo.display().to_string().chars() {
            app.handle_key(KeyCode::Char(ch)).unwrap();
        }
        press(&mut app, &[KeyCode::Enter, KeyCode::Enter]);

        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(app.store.count().unwrap(), 2);
        let status = app.status.as_ref().unwrap();
        assert!(matches!(status.kind, StatusKind::Error));
        assert!(status
            .text
            .starts_with("Item added, but the list could not be refreshed"));
    }

    #[test]
    fn deleting_an_item_drops_its_exported_photo() {
        let (mut app, dir) = app_with(&[item(
            "1",
            Season::Winter,
            Category::Shoes,
            "2024-01-01T00:00:00Z",
        )]);
        let cache = dir.path().join("images");
        fs::create_dir_all(&cache).unwrap();
        let exported = cache.join("1.png");
        fs::write(&exported, b"png").unwrap();

        press(&mut app, &[KeyCode::Char('d'), KeyCode::Char('y')]);
        assert_eq!(app.store.count().unwrap(), 0);
        assert!(!exported.exists());
    }
}
