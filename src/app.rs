use std::sync::Arc;

use async_modal::{AsyncModal, ModalError, ModalWatch};
use color_eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::config::{AppAction, AppConfig, KeybindingsConfig};
use crate::theme::Theme;
use crate::tui::{Event, Tui};
use crate::ui::{Component, EventResult, GreeterDialog, Greeting, Home};

const FRAME_RATE: f64 = 30.0;
const TICK_RATE: f64 = 4.0;

/// Result of one greeter modal, sent back from the task awaiting it.
struct ModalOutcome {
    id: u64,
    name: String,
    result: std::result::Result<Greeting, ModalError>,
}

/// Host for the greeter modal.
///
/// The app never decides whether the dialog is shown. It follows the modal
/// state it subscribed to and renders a [`GreeterDialog`] whenever that state
/// carries props.
pub struct App {
    modal: AsyncModal<String, Greeting>,
    modal_state: ModalWatch<String, Greeting>,
    dialog: Option<GreeterDialog>,
    home: Home,
    greeter_name: String,
    keybindings: Arc<KeybindingsConfig>,
    theme: Theme,
    outcome_tx: UnboundedSender<ModalOutcome>,
    outcome_rx: UnboundedReceiver<ModalOutcome>,
    should_quit: bool,
}

impl App {
    pub fn new(config: &AppConfig, theme: Theme) -> Self {
        let modal = AsyncModal::with_options(config.modal);
        let modal_state = modal.subscribe();
        let keybindings = Arc::new(config.keybindings.clone());
        let home = Home::new(
            keybindings.app_binding(AppAction::Open).hint(),
            keybindings.app_binding(AppAction::Quit).hint(),
        );
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();

        Self {
            modal,
            modal_state,
            dialog: None,
            home,
            greeter_name: config.greeter.name.clone(),
            keybindings,
            theme,
            outcome_tx,
            outcome_rx,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new(FRAME_RATE, TICK_RATE)?;
        tui.enter()?;

        while !self.should_quit {
            let Some(event) = tui.next_event().await else {
                break;
            };

            match event {
                Event::Quit => self.should_quit = true,
                Event::Key(key) => self.handle_key(key)?,
                Event::Render => self.render(&mut tui)?,
                Event::Resize(width, height) => {
                    tui.resize(Rect::new(0, 0, width, height))?;
                    self.render(&mut tui)?;
                }
                Event::Error(error) => warn!("Terminal event error: {error}"),
                Event::Tick => {}
            }

            self.sync();
        }

        tui.exit()?;
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // An open dialog sees input first and only lets the open key through
        if let Some(dialog) = &mut self.dialog {
            match dialog.handle_key(key)? {
                EventResult::Event(greeting) => {
                    debug!(
                        modal_id = dialog.modal_id(),
                        name = dialog.name(),
                        %greeting,
                        "Greeter answered"
                    );
                    return Ok(());
                }
                EventResult::Consumed => return Ok(()),
                EventResult::Ignored => {}
            }
        }

        if self.keybindings.matches_app(&key, AppAction::Quit) {
            self.should_quit = true;
        } else if self.keybindings.matches_app(&key, AppAction::Open) {
            self.open_greeter();
        }
        Ok(())
    }

    fn open_greeter(&mut self) {
        let name = self.greeter_name.clone();
        let future = self.modal.show_modal(name.clone());
        let id = future.id();
        info!(modal_id = id, %name, "Opening greeter");

        let outcome_tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let result = future.await;
            // The app may already be shutting down.
            let _ = outcome_tx.send(ModalOutcome { id, name, result });
        });
    }

    /// Pick up modal state changes and finished modals.
    fn sync(&mut self) {
        if self.modal_state.has_changed().unwrap_or(false) {
            let props = self.modal_state.borrow_and_update().props().cloned();
            self.dialog =
                props.map(|props| GreeterDialog::new(props, Arc::clone(&self.keybindings)));
        }

        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.report(outcome);
        }
    }

    fn report(&mut self, outcome: ModalOutcome) {
        let ModalOutcome { id, name, result } = outcome;
        let status = match result {
            Ok(greeting) => {
                info!(modal_id = id, %greeting, "Greeter settled");
                format!("Greeter #{id} for {name} answered {greeting}")
            }
            Err(error) => {
                warn!(modal_id = id, %error, "Greeter ended without an answer");
                format!("Greeter #{id} for {name} ended: {error}")
            }
        };
        self.home.set_status(status);
    }

    fn render(&mut self, tui: &mut Tui) -> Result<()> {
        tui.draw(|frame| {
            let area = frame.area();
            self.home.render(frame, area, &self.theme);
            if let Some(dialog) = &mut self.dialog {
                dialog.render(frame, area, &self.theme);
            }
        })?;
        Ok(())
    }
}
