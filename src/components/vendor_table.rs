use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc::UnboundedSender;

use super::Component;
use crate::{
    action::{Action, Toast},
    config::Config,
    export,
    query::{self, Column, ListQuery, ListView},
    vendor::{Vendor, VendorId},
};

const COLUMNS: [Column; 6] = [
    Column::Id,
    Column::Name,
    Column::Contact,
    Column::Email,
    Column::Phone,
    Column::Category,
];

/// The vendor list view: search, filter field, sortable columns, pagination,
/// delete confirmation and CSV export.
///
/// The component holds the fetched collection and a [`ListQuery`]; visible
/// rows are re-derived from both on every draw.
#[derive(Default)]
pub struct VendorTable {
    command_tx: Option<UnboundedSender<Action>>,
    config: Config,
    vendors: Vec<Vendor>,
    query: ListQuery,
    table_state: TableState,
    loading: bool,
    search_active: bool,
    pending_delete: Option<VendorId>,
}

impl VendorTable {
    pub fn new() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub fn vendors(&self) -> &[Vendor] {
        &self.vendors
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn pending_delete(&self) -> Option<VendorId> {
        self.pending_delete
    }

    fn view(&self) -> ListView<'_> {
        query::derive_view(&self.vendors, &self.query)
    }

    /// The vendor the cursor is on, if any.
    pub fn selected(&self) -> Option<&Vendor> {
        let view = self.view();
        self.table_state
            .selected()
            .and_then(|i| view.page_rows.get(i).copied())
    }

    fn select_clamped(&mut self, index: usize) {
        let len = self.view().page_rows.len();
        if len == 0 {
            self.table_state.select(None);
        } else {
            self.table_state.select(Some(index.min(len - 1)));
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.view().page_rows.len();
        if len == 0 {
            self.table_state.select(None);
            return;
        }
        let current = self.table_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, len as isize - 1) as usize;
        self.table_state.select(Some(next));
    }

    fn export(&self) -> Action {
        let view = self.view();
        match export::write_csv(&view.rows, std::path::Path::new(".")) {
            Ok(path) => Action::Notify(Toast::success(format!(
                "Exported {} vendors to {}",
                view.rows.len(),
                path.display()
            ))),
            Err(e) => Action::Notify(Toast::error(format!("Export failed: {e}"))),
        }
    }

    fn header_cell(&self, column: Column) -> Cell<'static> {
        let mut label = column.to_string();
        if self.query.sort_column == column {
            label.push_str(match self.query.sort_direction {
                query::SortDirection::Asc => " ▲",
                query::SortDirection::Desc => " ▼",
            });
        }
        Cell::from(label).style(Style::default().bold())
    }

    fn query_line(&self, total: usize, view: &ListView<'_>) -> Line<'static> {
        let search = if self.search_active {
            Span::styled(
                format!("/{}▏", self.query.search),
                Style::default().fg(Color::Yellow),
            )
        } else if self.query.search.is_empty() {
            Span::raw("/ to search")
        } else {
            Span::raw(format!("/{}", self.query.search))
        };
        Line::from(vec![
            Span::raw(format!("Filter: {}  ", self.query.field)),
            search,
            Span::raw(format!(
                "  Page {}/{}  {} rows/page  {} of {} vendors",
                view.page + 1,
                view.page_count,
                self.query.page_size,
                view.rows.len(),
                total,
            )),
        ])
    }
}

impl Component for VendorTable {
    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
        self.command_tx = Some(tx);
        Ok(())
    }

    fn register_config_handler(&mut self, config: Config) -> Result<()> {
        self.config = config;
        Ok(())
    }

    fn handle_key_events(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if !self.search_active {
            return Ok(None);
        }
        match key.code {
            KeyCode::Char(c) => {
                self.query.search.push(c);
                self.select_clamped(0);
            }
            KeyCode::Backspace => {
                self.query.search.pop();
                self.select_clamped(0);
            }
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Refresh => self.loading = true,
            Action::VendorsLoaded(vendors) => {
                self.vendors = vendors;
                self.loading = false;
                self.select_clamped(0);
            }
            Action::FetchFailed(_) => self.loading = false,
            Action::ScrollUp => self.move_selection(-1),
            Action::ScrollDown => self.move_selection(1),
            Action::ScrollTop => self.select_clamped(0),
            Action::ScrollBottom => self.select_clamped(usize::MAX),
            Action::NextPage => {
                let view = self.view();
                if view.page + 1 < view.page_count {
                    self.query.page = view.page + 1;
                    self.select_clamped(0);
                }
            }
            Action::PrevPage => {
                let view = self.view();
                if view.page > 0 {
                    self.query.page = view.page - 1;
                    self.select_clamped(0);
                }
            }
            Action::CyclePageSize => {
                self.query.cycle_page_size();
                self.select_clamped(0);
            }
            Action::SortBy(column) => {
                self.query.toggle_sort(column);
                self.select_clamped(0);
            }
            Action::EnterSearch => self.search_active = true,
            Action::LeaveSearch => self.search_active = false,
            Action::CycleFilterField => {
                self.query.field = self.query.field.next();
                self.select_clamped(0);
            }
            Action::Export => return Ok(Some(self.export())),
            Action::DeleteSelected => {
                if let Some(vendor) = self.selected() {
                    let id = vendor.id;
                    self.pending_delete = Some(id);
                    return Ok(Some(Action::EnterConfirm(id)));
                }
            }
            Action::ConfirmDelete => {
                if let Some(id) = self.pending_delete {
                    return Ok(Some(Action::DeleteVendor(id)));
                }
            }
            // A failed delete leaves the record; the dialog must still close.
            Action::CancelDelete | Action::DeleteFailed(_) => self.pending_delete = None,
            Action::VendorDeleted(id) => {
                // Optimistic local removal; no re-fetch.
                self.vendors.retain(|v| v.id != id);
                self.pending_delete = None;
                let selected = self.table_state.selected().unwrap_or(0);
                self.select_clamped(selected);
            }
            Action::EditSelected => {
                if let Some(vendor) = self.selected() {
                    return Ok(Some(Action::EditVendor(vendor.id)));
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
        let layout = Layout::new(
            Direction::Vertical,
            [
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(2),
            ],
        )
        .split(area);

        let title = Paragraph::new("EcoWare — Vendor Management")
            .style(Style::default().fg(Color::Green).bold())
            .centered();
        f.render_widget(title, layout[0]);

        // Field-level borrow; `table_state` is borrowed mutably further down.
        let view = query::derive_view(&self.vendors, &self.query);
        f.render_widget(self.query_line(self.vendors.len(), &view), layout[1]);

        if self.loading {
            f.render_widget(Paragraph::new("Loading...").centered(), layout[2]);
            return Ok(());
        }

        if view.page_rows.is_empty() {
            f.render_widget(
                Paragraph::new("No vendors available.").centered(),
                layout[2],
            );
        } else {
            let header = Row::new(COLUMNS.map(|c| self.header_cell(c)));
            let rows = view.page_rows.iter().map(|v| {
                Row::new([
                    Cell::from(v.id.to_string()),
                    Cell::from(v.name.clone()),
                    Cell::from(v.contact.clone()),
                    Cell::from(v.email.clone()),
                    Cell::from(v.phone.clone()),
                    Cell::from(v.category.to_string()),
                ])
            });
            let widths = [
                Constraint::Length(6),
                Constraint::Min(12),
                Constraint::Min(10),
                Constraint::Min(18),
                Constraint::Min(10),
                Constraint::Length(10),
            ];
            let table = Table::new(rows, widths)
                .header(header)
                .block(Block::default().borders(Borders::ALL).title("Vendors"))
                .row_highlight_style(Style::default().reversed());
            f.render_stateful_widget(table, layout[2], &mut self.table_state);
        }

        if let Some(id) = self.pending_delete {
            let name = self
                .vendors
                .iter()
                .find(|v| v.id == id)
                .map(|v| v.name.clone())
                .unwrap_or_default();
            let dialog_area = centered_rect(area, 50, 5);
            f.render_widget(Clear, dialog_area);
            let dialog = Paragraph::new(vec![
                Line::raw(format!("Are you sure you want to delete {name}?")),
                Line::raw("This action cannot be undone once deleted."),
                Line::raw("[y] delete    [n] cancel"),
            ])
            .centered()
            .block(Block::default().borders(Borders::ALL).title("Delete Vendor"));
            f.render_widget(dialog, dialog_area);
        }

        Ok(())
    }
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
