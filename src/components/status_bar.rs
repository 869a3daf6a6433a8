use color_eyre::eyre::Result;
use ratatui::{prelude::*, widgets::*};

use super::Component;
use crate::action::{Action, Severity, Toast};
use crate::tui::Frame;

/// How many ticks a toast stays visible. Six seconds at the default
/// 4 ticks/s.
const TOAST_TICKS: u8 = 24;

/// Bottom two lines: key hints and the current toast notification.
pub struct StatusBar {
    toast: Option<(Toast, u8)>,
    is_loading: bool,
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            toast: None,
            is_loading: true,
        }
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref().map(|(toast, _)| toast)
    }

    fn show(&mut self, toast: Toast) {
        self.toast = Some((toast, TOAST_TICKS));
    }
}

impl Component for StatusBar {
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => {
                if let Some((_, ticks)) = &mut self.toast {
                    *ticks = ticks.saturating_sub(1);
                    if *ticks == 0 {
                        self.toast = None;
                    }
                }
            }
            Action::Refresh => self.is_loading = true,
            Action::VendorsLoaded(_) | Action::FetchFailed(_) => self.is_loading = false,
            Action::Notify(toast) => self.show(toast),
            Action::Error(message) => self.show(Toast::error(message)),
            _ => {}
        };

        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
        let layout = Layout::new(
            Direction::Vertical,
            [
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(1),
            ],
        )
        .split(area);
        f.render_widget(Clear, layout[1]);
        f.render_widget(Clear, layout[2]);

        let hints = Span::styled(
            " a:add  enter:edit  d:delete  /:search  f:filter  1-6:sort  h/l:page  p:size  e:export  r:refresh  q:quit",
            Style::default().fg(Color::Gray).italic(),
        );
        let status_line = Paragraph::new(hints).style(Style::default().bg(Color::Black));
        f.render_widget(status_line, layout[1]);

        let message_line = if let Some((toast, _)) = &self.toast {
            let style = match toast.severity {
                Severity::Success => Style::default().fg(Color::Green),
                Severity::Error => Style::default().fg(Color::Red),
                Severity::Info => Style::default().fg(Color::Gray),
            };
            Paragraph::new(toast.message.clone()).style(style)
        } else if self.is_loading {
            Paragraph::new("Loading...")
        } else {
            Paragraph::new("")
        };
        f.render_widget(message_line, layout[2]);

        Ok(())
    }
}
