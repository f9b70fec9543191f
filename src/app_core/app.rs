use crate::{
    EntryIndex, Settings,
    domain::EntryList,
    key_handler::{self, Action, Director, SeekDirection},
    player::{AudioEngine, PlayerController, RodioEngine},
    tui,
    ui_state::{CellEvent, CellId, Mode, UiState},
};
use anyhow::Result;
use ratatui::{
    DefaultTerminal,
    crossterm::{
        event::{
            DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
            KeyEventKind,
        },
        execute,
    },
};
use std::{sync::Arc, time::Instant};
use tracing::{debug, info};

pub struct ListPlayer<E: AudioEngine = RodioEngine> {
    settings: Settings,
    ui: UiState,
    player: PlayerController<E>,
}

impl ListPlayer<RodioEngine> {
    pub fn new(settings: Settings) -> Result<Self> {
        let entries = Arc::new(EntryList::from_settings(&settings)?);
        info!(entries = entries.len(), "entry list built");

        let engine = RodioEngine::new()?;
        Ok(Self::with_engine(settings, entries, engine))
    }
}

impl<E: AudioEngine> ListPlayer<E> {
    pub fn with_engine(settings: Settings, entries: Arc<EntryList>, engine: E) -> Self {
        ListPlayer {
            ui: UiState::new(Arc::clone(&entries)),
            player: PlayerController::new(engine, entries, settings.tick_interval),
            settings,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut terminal = ratatui::init();
        execute!(std::io::stdout(), EnableFocusChange, EnableMouseCapture)?;

        let result = self.main_loop(&mut terminal);

        // Leaving the screen stops playback like losing focus does
        self.player.stop(&mut self.ui.cells);

        let _ = execute!(std::io::stdout(), DisableMouseCapture, DisableFocusChange);
        ratatui::restore();
        info!("shut down");

        result
    }

    fn main_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        loop {
            let size = terminal.size()?;
            let layout = tui::AppLayout::from_size(size);
            self.ui.viewport.set_height(layout.list_rows());
            self.layout_cells();

            self.ui.update_player_state(self.player.snapshot());
            terminal.draw(|f| tui::render(f, &mut self.ui))?;

            match key_handler::next_event()? {
                Some(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if let Some(action) = key_handler::handle_key_event(key, &self.ui) {
                        self.dispatch(action);
                    }
                }
                Some(Event::Mouse(mouse)) => {
                    if let Some(action) = key_handler::handle_mouse_event(mouse, &self.ui) {
                        self.dispatch(action);
                    }
                }
                Some(Event::FocusLost) => self.dispatch(Action::FocusLost),
                _ => (),
            }

            self.player.poll(Instant::now(), &mut self.ui.cells);

            if self.ui.get_mode() == Mode::QUIT {
                break;
            }
        }
        Ok(())
    }

    /// Binds cells to the visible window and tells the player about every
    /// bind and recycle.
    fn layout_cells(&mut self) {
        let window = self.ui.viewport.window();
        let now = Instant::now();

        for event in self.ui.cells.layout(window) {
            match event {
                CellEvent::Recycled(cell) => self.player.on_recycle(cell, &mut self.ui.cells),
                CellEvent::Bound(cell, entry) => {
                    self.player.on_bind(cell, entry, &mut self.ui.cells, now)
                }
            }
        }
    }

    fn dispatch(&mut self, action: Action) {
        if let Err(e) = self.handle_action(action) {
            self.ui.set_error(e);
        }
    }

    #[rustfmt::skip]
    pub fn handle_action(&mut self, action: Action) -> Result<()> {
        match action {
            // Player
            Action::Activate            => self.activate_selected()?,
            Action::Stop                => self.player.stop(&mut self.ui.cells),
            Action::Seek(direction)     => self.seek_selected(direction),
            Action::SeekTo { cell, ratio } => self.seek_to_ratio(cell, ratio),

            // UI
            Action::Scroll(director)    => self.scroll(director),
            Action::Select(row)         => self.ui.viewport.select(row),
            Action::ClosePopup          => self.ui.close_popup(),

            // Lifecycle
            Action::FocusLost           => {
                debug!("focus lost");
                self.player.stop(&mut self.ui.cells)
            }
            Action::QUIT                => self.ui.set_mode(Mode::QUIT),
        }
        Ok(())
    }
}

impl<E: AudioEngine> ListPlayer<E> {
    fn scroll(&mut self, director: Director) {
        self.ui.viewport.scroll(&director);
        self.layout_cells();
    }

    fn activate_selected(&mut self) -> Result<()> {
        if let Some((row, cell)) = self.ui.selected_cell() {
            self.player
                .activate(EntryIndex(row), cell, &mut self.ui.cells, Instant::now())?;
        }
        Ok(())
    }

    fn seek_selected(&mut self, direction: SeekDirection) {
        let Some((_, cell)) = self.ui.selected_cell() else {
            return;
        };
        let Some(current) = self.ui.cells.view(cell).map(|v| v.seek_bar.value) else {
            return;
        };

        let step = self.settings.seek_step;
        let target = match direction {
            SeekDirection::Forward => current + step,
            SeekDirection::Back => current.saturating_sub(step),
        };
        self.player.seek(cell, target, &mut self.ui.cells);
    }

    fn seek_to_ratio(&mut self, cell: CellId, ratio: f64) {
        let Some(bar) = self.ui.cells.view(cell).map(|v| v.seek_bar) else {
            return;
        };
        if bar.enabled {
            self.player
                .seek(cell, bar.position_at(ratio), &mut self.ui.cells);
        }
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn player(&self) -> &PlayerController<E> {
        &self.player
    }

    /// Lays out `rows` visible rows without a terminal.
    pub fn set_visible_rows(&mut self, rows: usize) {
        self.ui.viewport.set_height(rows);
        self.layout_cells();
    }

    /// One pass of the loop's non-input work.
    pub fn poll(&mut self, now: Instant) {
        self.player.poll(now, &mut self.ui.cells);
        self.ui.update_player_state(self.player.snapshot());
    }
}
