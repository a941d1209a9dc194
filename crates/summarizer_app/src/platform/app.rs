use std::io::{self, Stdout};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use engine_logging::{engine_error, engine_info};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use summarizer_core::{update, AppState, Msg};
use summarizer_engine::EngineHandle;

use super::clipboard::SystemClipboard;
use super::config::AppConfig;
use super::effects::EffectRunner;
use super::logging;
use super::ui::keys::{self, KeyAction};
use super::ui::render::render;

type Tui = Terminal<CrosstermBackend<Stdout>>;

// Also the granularity of copy-confirmation sweeps.
const TICK_INTERVAL: Duration = Duration::from_millis(33);

pub fn run_app() -> anyhow::Result<()> {
    let config = AppConfig::load().context("loading configuration")?;
    let notice = logging::initialize(&config).notice();
    if let Some(notice) = &notice {
        eprintln!("{notice}");
    }
    engine_info!("Starting summarizer endpoint={}", config.endpoint);

    let (engine, events) =
        EngineHandle::spawn(config.client_settings()).context("starting engine")?;
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let mut runner = EffectRunner::new(engine, events, Box::new(SystemClipboard::new()), msg_tx);

    let mut terminal = setup_terminal().context("setting up terminal")?;
    let result = event_loop(&mut terminal, &mut runner, &msg_rx);
    let restored = restore_terminal(&mut terminal).context("restoring terminal");

    if let Err(err) = &result {
        engine_error!("Event loop ended with error: {:#}", err);
    }
    engine_info!("Summarizer exiting");
    if let Some(notice) = &notice {
        eprintln!("{notice}");
    }
    result.and(restored)
}

fn setup_terminal() -> anyhow::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Tui) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Single logical thread for all state changes: input, engine messages and
/// ticks are applied here in arrival order.
fn event_loop(
    terminal: &mut Tui,
    runner: &mut EffectRunner,
    msg_rx: &mpsc::Receiver<Msg>,
) -> anyhow::Result<()> {
    let mut state = AppState::new();
    let initial = state.view();
    terminal.draw(|frame| render(frame, &initial))?;

    loop {
        let mut force_redraw = false;

        if event::poll(TICK_INTERVAL)? {
            let action = match event::read()? {
                Event::Key(key) => keys::map_key(key, state.url(), Instant::now()),
                Event::Paste(text) => keys::map_paste(&text, state.url()),
                Event::Resize(_, _) => {
                    force_redraw = true;
                    KeyAction::Ignore
                }
                _ => KeyAction::Ignore,
            };
            match action {
                KeyAction::Quit => break,
                KeyAction::Dispatch(msg) => dispatch(&mut state, runner, msg),
                KeyAction::Ignore => {}
            }
        }

        for msg in msg_rx.try_iter() {
            dispatch(&mut state, runner, msg);
        }
        dispatch(&mut state, runner, Msg::Tick { now: Instant::now() });

        if state.consume_dirty() || force_redraw {
            let view = state.view();
            terminal.draw(|frame| render(frame, &view))?;
        }
    }

    Ok(())
}

fn dispatch(state: &mut AppState, runner: &mut EffectRunner, msg: Msg) {
    let (next, effects) = update(std::mem::take(state), msg);
    *state = next;
    runner.run(effects);
}
