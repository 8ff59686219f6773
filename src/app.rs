use crate::config::Config;
use crate::error::AppError;
use crate::events::network::{Event as NetworkEvent, Handler as NetworkEventHandler};
use crate::events::terminal::Handler as TerminalEventHandler;
use crate::logger::{CustomLogger, LogBuffer};
use crate::nav::Navigator;
use crate::state::State;
use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::*;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout, Stdout};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

pub type NetworkEventSender = mpsc::UnboundedSender<NetworkEvent>;
type NetworkEventReceiver = mpsc::UnboundedReceiver<NetworkEvent>;

/// Oversees event processing, state management, and terminal output.
///
pub struct App {
    state: Arc<Mutex<State>>,
    config: Config,
}

impl App {
    /// Start a new application according to the given configuration. Returns
    /// the result of the application execution.
    ///
    pub async fn start(config: Config) -> Result<()> {
        let log = LogBuffer::default();
        CustomLogger::new(log.clone(), LevelFilter::Debug)
            .init()
            .map_err(|e| AppError::Logger(e.to_string()))?;

        info!("Starting application...");
        let (tx, rx) = mpsc::unbounded_channel::<NetworkEvent>();
        let mut state = State::new(Some(tx), log);
        if !config.is_configured() {
            warn!("Access token not configured.");
            state.show_error("Access token not configured. Run `trello-pocket authorize` first.");
        }
        let app = App {
            state: Arc::new(Mutex::new(state)),
            config,
        };
        app.start_network(rx)?;
        app.start_ui().await?;
        info!("Exiting application...");
        Ok(())
    }

    /// Start a separate thread for asynchronous state mutations. Each event
    /// runs on its own local task, so responses may complete out of order.
    ///
    fn start_network(&self, mut net_receiver: NetworkEventReceiver) -> Result<()> {
        debug!("Creating new thread for asynchronous networking...");
        let cloned_state = Arc::clone(&self.state);
        let config = self.config.clone();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        std::thread::spawn(move || {
            let local = tokio::task::LocalSet::new();
            local.block_on(&runtime, async move {
                let navigator = Navigator::new(config.client());
                let network_event_handler =
                    NetworkEventHandler::new(&cloned_state, navigator, config.timeline_sink());
                while let Some(network_event) = net_receiver.recv().await {
                    let handler = network_event_handler.clone();
                    tokio::task::spawn_local(async move {
                        if let Err(e) = handler.handle(network_event).await {
                            error!("Failed to handle network event: {}", e);
                        }
                    });
                }
            })
        });
        Ok(())
    }

    /// Begin the terminal event poll on a separate thread before starting the
    /// render loop on the main thread. The terminal is restored even if the
    /// loop fails.
    ///
    async fn start_ui(&self) -> Result<()> {
        debug!("Starting user interface on main thread...");
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        enable_raw_mode()?;

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;

        let result = self.render_loop(&mut terminal).await;

        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        result
    }

    async fn render_loop(&self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let terminal_event_handler = TerminalEventHandler::new();
        loop {
            let mut state = self.state.lock().await;
            if let Ok(size) = terminal.size() {
                state.set_terminal_size(size);
            }
            terminal
                .draw(|frame| crate::ui::render(frame, &state))
                .map_err(|e| AppError::Terminal(e.to_string()))?;
            if !terminal_event_handler.handle_next(&mut state)? {
                debug!("Received application exit request.");
                return Ok(());
            }
        }
    }
}
