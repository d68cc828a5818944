use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::theme::Theme;
use crate::ui::Component;

/// Screen shown underneath the dialog: key hints and the last modal outcome.
pub struct Home {
    open_hint: String,
    quit_hint: String,
    status: Option<String>,
}

impl Home {
    pub const fn new(open_hint: String, quit_hint: String) -> Self {
        Self {
            open_hint,
            quit_hint,
            status: None,
        }
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
}

impl Component for Home {
    type Output = ();

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .title(" async-modal ")
            .title_style(
                Style::default()
                    .fg(theme.mauve)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.surface0))
            .style(Style::default().bg(theme.base));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [body, status_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(inner);

        let key_style = Style::default()
            .fg(theme.peach)
            .add_modifier(Modifier::BOLD);
        let text_style = Style::default().fg(theme.subtext0);
        let hints = Line::from(vec![
            Span::styled(format!("[{}]", self.open_hint), key_style),
            Span::styled(" open greeter    ", text_style),
            Span::styled(format!("[{}]", self.quit_hint), key_style),
            Span::styled(" quit", text_style),
        ]);

        let body_area = body.centered(Constraint::Percentage(100), Constraint::Length(1));
        frame.render_widget(
            Paragraph::new(hints).alignment(Alignment::Center),
            body_area,
        );

        if let Some(status) = self.status() {
            frame.render_widget(
                Paragraph::new(status).style(Style::default().fg(theme.text)),
                status_area,
            );
        }
    }
}
