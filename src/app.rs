use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::prelude::Rect;
use tokio::sync::mpsc::{self, UnboundedSender};

use crate::{
    action::{Action, Toast},
    api::VendorClient,
    components::{Component, StatusBar, VendorForm, VendorTable},
    config::Config,
    mode::Mode,
    tui,
    vendor::{VendorDraft, VendorId},
};

pub struct App {
    pub config: Config,
    pub tick_rate: f64,
    pub frame_rate: f64,
    pub components: Vec<Box<dyn Component>>,
    pub should_quit: bool,
    pub should_suspend: bool,
    pub mode: Mode,
    pub last_tick_key_events: Vec<KeyEvent>,
    client: VendorClient,
}

impl App {
    pub fn new(tick_rate: f64, frame_rate: f64, api_url: Option<String>) -> Result<Self> {
        let table = VendorTable::new();
        let form = VendorForm::new();
        let status_bar = StatusBar::new();
        let config = Config::new()?;
        let base_url = api_url.unwrap_or_else(|| config.api_base_url.clone());
        let client = VendorClient::new(base_url)?;
        let mode = Mode::List;
        Ok(Self {
            tick_rate,
            frame_rate,
            components: vec![Box::new(table), Box::new(form), Box::new(status_bar)],
            should_quit: false,
            should_suspend: false,
            config,
            mode,
            last_tick_key_events: Vec::new(),
            client,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();

        let mut tui = tui::Tui::new()?
            .tick_rate(self.tick_rate)
            .frame_rate(self.frame_rate);
        tui.enter()?;

        for component in self.components.iter_mut() {
            component.register_action_handler(action_tx.clone())?;
        }

        for component in self.components.iter_mut() {
            component.register_config_handler(self.config.clone())?;
        }

        let size = tui.size()?;
        for component in self.components.iter_mut() {
            component.init(Rect::new(0, 0, size.width, size.height))?;
        }

        // Each view re-fetches on mount; the list is the first view.
        action_tx.send(Action::Refresh)?;
        self.fetch_vendors(action_tx.clone());

        loop {
            if let Some(e) = tui.next().await {
                match e {
                    tui::Event::Quit => action_tx.send(Action::Quit)?,
                    tui::Event::Tick => action_tx.send(Action::Tick)?,
                    tui::Event::Render => action_tx.send(Action::Render)?,
                    tui::Event::Resize(x, y) => action_tx.send(Action::Resize(x, y))?,
                    tui::Event::Key(key) => {
                        if let Some(keymap) = self.config.keybindings.get(&self.mode) {
                            if let Some(action) = keymap.get(&vec![key]) {
                                log::info!("Got action: {action:?}");
                                action_tx.send(action.clone())?;
                            } else {
                                // If the key was not handled as a single key action,
                                // then consider it for multi-key combinations.
                                self.last_tick_key_events.push(key);

                                // Check for multi-key combinations
                                if let Some(action) = keymap.get(&self.last_tick_key_events) {
                                    log::info!("Got action: {action:?}");
                                    action_tx.send(action.clone())?;
                                }
                            }
                        };
                    }
                    _ => {}
                }
                for component in self.components.iter_mut() {
                    if let Some(action) = component.handle_events(Some(e.clone()))? {
                        action_tx.send(action)?;
                    }
                }
            }

            while let Ok(action) = action_rx.try_recv() {
                if action != Action::Tick && action != Action::Render {
                    log::debug!("{action:?}");
                }
                match action {
                    Action::Tick => {
                        self.last_tick_key_events.drain(..);
                    }
                    Action::Quit => self.should_quit = true,
                    Action::Suspend => self.should_suspend = true,
                    Action::Resume => self.should_suspend = false,
                    Action::Resize(w, h) => {
                        tui.resize(Rect::new(0, 0, w, h))?;
                        tui.draw(|f| {
                            for component in self.components.iter_mut() {
                                let r = component.draw(f, f.area());
                                if let Err(e) = r {
                                    action_tx
                                        .send(Action::Error(format!("Failed to draw: {e:?}")))
                                        .ok();
                                }
                            }
                        })?;
                    }
                    Action::Render => {
                        tui.draw(|f| {
                            for component in self.components.iter_mut() {
                                let r = component.draw(f, f.area());
                                if let Err(e) = r {
                                    action_tx
                                        .send(Action::Error(format!("Failed to draw: {e:?}")))
                                        .ok();
                                }
                            }
                        })?;
                    }
                    Action::Refresh => self.fetch_vendors(action_tx.clone()),
                    Action::FetchFailed(ref message) => {
                        action_tx.send(Action::Notify(Toast::error(message.clone())))?;
                    }
                    Action::OpenAddForm => self.mode = Mode::Form,
                    Action::EditVendor(id) => {
                        self.mode = Mode::Form;
                        self.fetch_vendor(id, action_tx.clone());
                    }
                    Action::EditTargetMissing => {
                        self.mode = Mode::List;
                        action_tx.send(Action::Notify(Toast::error("Vendor not found")))?;
                    }
                    Action::CloseForm => self.mode = Mode::List,
                    Action::SubmitCreate(ref draft) => {
                        self.create_vendor(draft.clone(), action_tx.clone());
                    }
                    Action::SubmitUpdate(id, ref draft) => {
                        self.update_vendor(id, draft.clone(), action_tx.clone());
                    }
                    Action::VendorCreated(_) => {
                        self.mode = Mode::List;
                        action_tx.send(Action::Notify(Toast::success(
                            "Vendor added successfully!",
                        )))?;
                        action_tx.send(Action::Refresh)?;
                    }
                    Action::VendorUpdated(_) => {
                        self.mode = Mode::List;
                        action_tx.send(Action::Notify(Toast::success(
                            "Vendor updated successfully.",
                        )))?;
                        action_tx.send(Action::Refresh)?;
                    }
                    Action::SubmitFailed(ref message) => {
                        action_tx.send(Action::Notify(Toast::error(message.clone())))?;
                    }
                    Action::EnterSearch => self.mode = Mode::Search,
                    Action::LeaveSearch => self.mode = Mode::List,
                    Action::EnterConfirm(_) => self.mode = Mode::Confirm,
                    Action::ConfirmDelete | Action::CancelDelete => self.mode = Mode::List,
                    Action::DeleteVendor(id) => self.delete_vendor(id, action_tx.clone()),
                    Action::DeleteFailed(ref message) => {
                        action_tx.send(Action::Notify(Toast::error(message.clone())))?;
                    }
                    _ => {}
                }
                for component in self.components.iter_mut() {
                    if let Some(action) = component.update(action.clone())? {
                        action_tx.send(action)?
                    };
                }
            }
            if self.should_suspend {
                tui.suspend()?;
                action_tx.send(Action::Resume)?;
                tui = tui::Tui::new()?
                    .tick_rate(self.tick_rate)
                    .frame_rate(self.frame_rate);
                tui.enter()?;
            } else if self.should_quit {
                tui.stop()?;
                break;
            }
        }
        tui.exit()?;
        Ok(())
    }

    fn fetch_vendors(&self, tx: UnboundedSender<Action>) {
        let client = self.client.clone();
        tokio::spawn(async move {
            match client.list().await {
                Ok(vendors) => tx.send(Action::VendorsLoaded(vendors)),
                Err(e) => tx.send(Action::FetchFailed(e.to_string())),
            }
            .ok();
        });
    }

    fn fetch_vendor(&self, id: VendorId, tx: UnboundedSender<Action>) {
        let client = self.client.clone();
        tokio::spawn(async move {
            match client.get(id).await {
                Ok(vendor) => tx.send(Action::VendorFetched(Box::new(vendor))),
                // Any failure of the item fetch is terminal for the edit view.
                Err(_) => tx.send(Action::EditTargetMissing),
            }
            .ok();
        });
    }

    fn create_vendor(&self, draft: VendorDraft, tx: UnboundedSender<Action>) {
        let client = self.client.clone();
        tokio::spawn(async move {
            match client.create(&draft).await {
                Ok(vendor) => tx.send(Action::VendorCreated(Box::new(vendor))),
                Err(e) => tx.send(Action::SubmitFailed(e.to_string())),
            }
            .ok();
        });
    }

    fn update_vendor(&self, id: VendorId, draft: VendorDraft, tx: UnboundedSender<Action>) {
        let client = self.client.clone();
        tokio::spawn(async move {
            match client.update(id, draft).await {
                Ok(vendor) => tx.send(Action::VendorUpdated(Box::new(vendor))),
                Err(e) => tx.send(Action::SubmitFailed(e.to_string())),
            }
            .ok();
        });
    }

    fn delete_vendor(&self, id: VendorId, tx: UnboundedSender<Action>) {
        let client = self.client.clone();
        tokio::spawn(async move {
            match client.delete(id).await {
                Ok(()) => {
                    tx.send(Action::VendorDeleted(id)).ok();
                    tx.send(Action::Notify(Toast::success("Vendor deleted successfully.")))
                        .ok();
                }
                Err(e) => {
                    tx.send(Action::DeleteFailed(e.to_string())).ok();
                }
            }
        });
    }
}
