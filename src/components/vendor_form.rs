use std::collections::BTreeMap;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc::UnboundedSender;
use tui_textarea::{CursorMove, TextArea};

use super::Component;
use crate::{
    action::Action,
    config::Config,
    validate,
    vendor::{Category, Field, Vendor, VendorDraft, VendorId},
};

/// Fields edited through a text area, in focus order. `Category` comes last
/// and is cycled through the closed set instead of typed.
const TEXT_FIELDS: [Field; 5] = [
    Field::Name,
    Field::Contact,
    Field::Email,
    Field::Phone,
    Field::Address,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit(VendorId),
}

/// The add/edit vendor form.
///
/// One component serves both flows; `FormMode` decides whether submission
/// creates or replaces. Submission is refused while a request is in flight
/// or while the validation error map is non-empty.
pub struct VendorForm {
    command_tx: Option<UnboundedSender<Action>>,
    config: Config,
    mode: FormMode,
    active: bool,
    loading: bool,
    submitting: bool,
    focus: usize,
    inputs: Vec<TextArea<'static>>,
    category: Category,
    errors: BTreeMap<Field, String>,
}

impl Default for VendorForm {
    fn default() -> Self {
        Self::new()
    }
}

impl VendorForm {
    pub fn new() -> Self {
        Self {
            command_tx: None,
            config: Config::default(),
            mode: FormMode::Add,
            active: false,
            loading: false,
            submitting: false,
            focus: 0,
            inputs: TEXT_FIELDS.iter().map(|_| TextArea::default()).collect(),
            category: Category::default(),
            errors: BTreeMap::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn errors(&self) -> &BTreeMap<Field, String> {
        &self.errors
    }

    fn reset(&mut self, mode: FormMode) {
        self.mode = mode;
        self.loading = false;
        self.submitting = false;
        self.focus = 0;
        self.inputs = TEXT_FIELDS.iter().map(|_| TextArea::default()).collect();
        self.category = Category::default();
        self.errors.clear();
    }

    fn fill(&mut self, vendor: &Vendor) {
        let draft = vendor.draft();
        for (input, field) in self.inputs.iter_mut().zip(TEXT_FIELDS) {
            *input = TextArea::from([draft.field(field)]);
            input.move_cursor(CursorMove::End);
        }
        self.category = draft.category;
    }

    /// Current form content as a draft.
    pub fn draft(&self) -> VendorDraft {
        let mut draft = VendorDraft {
            category: self.category,
            ..VendorDraft::default()
        };
        for (input, field) in self.inputs.iter().zip(TEXT_FIELDS) {
            draft.set_field(field, input.lines().join("\n"));
        }
        draft
    }

    /// Validates and, if clean, emits the create/update action. Re-entry
    /// while a submission is outstanding is a no-op.
    fn submit(&mut self) -> Option<Action> {
        if self.submitting || self.loading {
            return None;
        }
        let draft = self.draft();
        self.errors = validate::validate(&draft);
        if !self.errors.is_empty() {
            return None;
        }
        self.submitting = true;
        Some(match self.mode {
            FormMode::Add => Action::SubmitCreate(draft),
            FormMode::Edit(id) => Action::SubmitUpdate(id, draft),
        })
    }

    fn focus_count(&self) -> usize {
        // Text fields plus the category selector.
        TEXT_FIELDS.len() + 1
    }

    fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.focus_count();
    }

    fn focus_prev(&mut self) {
        self.focus = (self.focus + self.focus_count() - 1) % self.focus_count();
    }

    fn category_focused(&self) -> bool {
        self.focus == TEXT_FIELDS.len()
    }

    fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Add => "Add New Vendor",
            FormMode::Edit(_) => "Edit Vendor",
        }
    }
}

impl Component for VendorForm {
    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
        self.command_tx = Some(tx);
        Ok(())
    }

    fn register_config_handler(&mut self, config: Config) -> Result<()> {
        self.config = config;
        Ok(())
    }

    fn handle_key_events(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if !self.active || self.loading {
            return Ok(None);
        }
        match key.code {
            KeyCode::Esc => return Ok(Some(Action::CloseForm)),
            KeyCode::Enter => return Ok(self.submit()),
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_prev(),
            KeyCode::Left if self.category_focused() => self.category = self.category.prev(),
            KeyCode::Right if self.category_focused() => self.category = self.category.next(),
            KeyCode::Char(' ') if self.category_focused() => self.category = self.category.next(),
            _ if !self.category_focused() => {
                self.inputs[self.focus].input(key);
            }
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::OpenAddForm => {
                self.reset(FormMode::Add);
                self.active = true;
            }
            Action::EditVendor(id) => {
                self.reset(FormMode::Edit(id));
                self.active = true;
                self.loading = true;
            }
            Action::VendorFetched(vendor) => {
                if self.active {
                    self.fill(&vendor);
                    self.loading = false;
                }
            }
            Action::EditTargetMissing | Action::CloseForm => self.active = false,
            Action::VendorCreated(_) | Action::VendorUpdated(_) => {
                self.reset(FormMode::Add);
                self.active = false;
            }
            Action::SubmitFailed(_) => self.submitting = false,
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
        if !self.active {
            return Ok(());
        }

        let width = area.width.clamp(20, 60);
        let height = (TEXT_FIELDS.len() as u16) * 3 + 6;
        let form_area = Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height: height.min(area.height),
        };
        f.render_widget(Clear, form_area);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.title())
            .title_alignment(Alignment::Center);
        let inner = block.inner(form_area);
        f.render_widget(block, form_area);

        if self.loading {
            f.render_widget(Paragraph::new("Loading vendor...").centered(), inner);
            return Ok(());
        }

        let mut constraints: Vec<Constraint> =
            TEXT_FIELDS.iter().map(|_| Constraint::Length(3)).collect();
        constraints.push(Constraint::Length(1)); // category
        constraints.push(Constraint::Length(1)); // hints
        let rows = Layout::new(Direction::Vertical, constraints).split(inner);

        for (i, field) in TEXT_FIELDS.into_iter().enumerate() {
            let focused = self.focus == i;
            let error = self.errors.get(&field);
            let border_style = match (error, focused) {
                (Some(_), _) => Style::default().fg(Color::Red),
                (None, true) => Style::default().fg(Color::Yellow),
                (None, false) => Style::default(),
            };
            let title = match error {
                Some(message) => format!("{field} — {message}"),
                None => field.to_string(),
            };
            self.inputs[i].set_block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(title),
            );
            self.inputs[i].set_cursor_line_style(Style::default());
            f.render_widget(&self.inputs[i], rows[i]);
        }

        let category_style = if self.category_focused() {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let category_line = Paragraph::new(format!("Category: ◀ {} ▶", self.category))
            .style(category_style);
        f.render_widget(category_line, rows[TEXT_FIELDS.len()]);

        let hint = if self.submitting {
            "Saving..."
        } else {
            "Enter: save  Tab: next field  Esc: cancel"
        };
        f.render_widget(
            Paragraph::new(hint).style(Style::default().fg(Color::DarkGray)),
            rows[TEXT_FIELDS.len() + 1],
        );

        Ok(())
    }
}
