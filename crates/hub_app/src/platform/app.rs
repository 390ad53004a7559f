use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use hub_core::{update, AppState, Msg};
use hub_engine::HubConfig;
use hub_logging::{hub_info, hub_warn};

use super::effects::EffectRunner;
use super::logging::{self, LogDestination};
use super::ui::commands::{parse_command, Command, HELP};
use super::ui::render::render;

/// How long the loop waits for input before polling the engine again.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

enum Input {
    Msg(Msg),
    Help,
    Quit,
}

pub fn run_app() -> anyhow::Result<()> {
    logging::initialize(LogDestination::from_env());

    let config = HubConfig::from_env().context("invalid configuration")?;
    if config.completion.api_key.is_none() {
        hub_warn!("GEMINI_API_KEY is not set; AI features will report a missing key");
    }
    hub_info!("Backend base URL {}", config.backend.base_url);

    let effects = EffectRunner::new(config).context("failed to start engine")?;
    let (input_tx, input_rx) = mpsc::channel::<Input>();
    spawn_stdin_reader(input_tx);

    let mut state = AppState::new();
    print_view(&state)?;

    loop {
        let mut inbox = effects.poll();
        match input_rx.recv_timeout(POLL_INTERVAL) {
            Ok(Input::Msg(msg)) => inbox.push(msg),
            Ok(Input::Help) => println!("{HELP}"),
            Ok(Input::Quit) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
            Err(mpsc::RecvTimeoutError::Timeout) => {}
        }

        for msg in inbox {
            let (next, new_effects) = update(state, msg);
            state = next;
            effects.run(new_effects);
        }

        if state.consume_dirty() {
            print_view(&state)?;
        }
    }

    hub_info!("Session closed");
    Ok(())
}

fn spawn_stdin_reader(input_tx: mpsc::Sender<Input>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let input = match parse_command(&line) {
                Ok(Command::Dispatch(msg)) => Input::Msg(msg),
                Ok(Command::Help) => Input::Help,
                Ok(Command::Quit) => Input::Quit,
                Ok(Command::Empty) => continue,
                Err(err) => {
                    eprintln!("{err} (type `help` for commands)");
                    continue;
                }
            };
            let quit = matches!(input, Input::Quit);
            if input_tx.send(input).is_err() || quit {
                break;
            }
        }
    });
}

fn print_view(state: &AppState) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out)?;
    for line in render(&state.view()) {
        writeln!(out, "{line}")?;
    }
    write!(out, "> ")?;
    out.flush()
}
