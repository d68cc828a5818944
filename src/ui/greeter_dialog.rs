use std::fmt;
use std::sync::Arc;

use async_modal::AsyncModalProps;
use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::config::{AppAction, DialogAction, KeybindingsConfig};
use crate::theme::Theme;
use crate::ui::{Component, EventResult, Result};

/// Answer produced by the greeter dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Greeting {
    Ok,
    Cancel,
}

impl fmt::Display for Greeting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => f.write_str("ok"),
            Self::Cancel => f.write_str("cancel"),
        }
    }
}

/// Dialog that greets the value it was opened with.
///
/// The dialog settles its modal itself: confirming or cancelling calls
/// `resolve` on its props before the event is handed back.
pub struct GreeterDialog {
    props: AsyncModalProps<String, Greeting>,
    keybindings: Arc<KeybindingsConfig>,
}

impl GreeterDialog {
    pub const fn new(
        props: AsyncModalProps<String, Greeting>,
        keybindings: Arc<KeybindingsConfig>,
    ) -> Self {
        Self { props, keybindings }
    }

    pub fn name(&self) -> &str {
        &self.props.value
    }

    pub fn modal_id(&self) -> u64 {
        self.props.resolve.id()
    }

    fn answer(&self, greeting: Greeting) -> EventResult<Greeting> {
        self.props.resolve.resolve(greeting);
        greeting.into()
    }
}

impl Component for GreeterDialog {
    type Output = Greeting;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        if self.keybindings.matches_dialog(&key, DialogAction::Confirm) {
            return Ok(self.answer(Greeting::Ok));
        }
        if self.keybindings.matches_dialog(&key, DialogAction::Cancel) {
            return Ok(self.answer(Greeting::Cancel));
        }
        // Opening another greeter is up to the host and its double-open policy
        if self.keybindings.matches_app(&key, AppAction::Open) {
            return Ok(EventResult::Ignored);
        }
        // Consume all other keys to prevent propagation
        Ok(EventResult::Consumed)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let popup_area = area.centered(Constraint::Percentage(50), Constraint::Length(7));
        frame.render_widget(Clear, popup_area);

        let key_style = Style::default()
            .fg(theme.peach)
            .add_modifier(Modifier::BOLD);
        let ok_style = Style::default()
            .fg(theme.green)
            .add_modifier(Modifier::BOLD);
        let cancel_style = Style::default()
            .fg(theme.overlay1)
            .add_modifier(Modifier::BOLD);

        let confirm_hint = self.keybindings.dialog_binding(DialogAction::Confirm).hint();
        let cancel_hint = self.keybindings.dialog_binding(DialogAction::Cancel).hint();

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("Hello, {}!", self.props.value),
                Style::default().fg(theme.text),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(format!("[{confirm_hint}]"), key_style),
                Span::raw(" "),
                Span::styled("OK", ok_style),
                Span::raw("    "),
                Span::styled(format!("[{cancel_hint}]"), key_style),
                Span::raw(" "),
                Span::styled("Cancel", cancel_style),
            ]),
        ];

        let block = Block::default()
            .title(" Greeter ")
            .title_style(
                Style::default()
                    .fg(theme.mauve)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.lavender))
            .style(Style::default().bg(theme.base));

        let paragraph = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center);

        frame.render_widget(paragraph, popup_area);
    }
}
