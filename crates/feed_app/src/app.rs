use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use feed_core::{update, FeedState, Msg};
use feed_logging::{feed_debug, feed_info};

use crate::commands::{parse_command, Input};
use crate::config::FeedConfig;
use crate::effects::EffectRunner;
use crate::render;

pub fn run_app(config: FeedConfig) -> anyhow::Result<()> {
    let (input_tx, input_rx) = mpsc::channel::<Input>();
    let runner = EffectRunner::new(&config, input_tx.clone())?;
    spawn_stdin_reader(input_tx);

    let mut state = FeedState::with_section(config.initial_filter());
    let mut out = io::stdout();
    write!(out, "{}", render::HELP)?;
    dispatch(&mut state, Msg::Started, &runner, &mut out)?;

    // Every state change funnels through this loop; completions arrive as `Input::Feed`.
    while let Ok(input) = input_rx.recv() {
        match input {
            Input::Feed(msg) => dispatch(&mut state, msg, &runner, &mut out)?,
            Input::Open(index) => match state.items().get(index - 1) {
                Some(article) => writeln!(out, "{}\n  {}", article.title, article.url)?,
                None => writeln!(out, "No article {index}.")?,
            },
            Input::Sections => {
                write!(out, "{}", render::render_sections(state.filter_section()))?
            }
            Input::Help => write!(out, "{}", render::HELP)?,
            Input::Unknown(line) => writeln!(out, "Unknown command {line:?}; try `help`.")?,
            Input::Quit => break,
        }
        out.flush()?;
    }

    feed_info!("Shutting down with {} articles loaded", state.items().len());
    Ok(())
}

fn dispatch(
    state: &mut FeedState,
    msg: Msg,
    runner: &EffectRunner,
    out: &mut impl Write,
) -> io::Result<()> {
    if let Msg::PageLoaded { generation, .. } | Msg::PageFailed { generation, .. } = &msg {
        if state.in_flight().map(|ticket| ticket.generation) != Some(*generation) {
            feed_debug!("Discarding stale completion for generation {}", generation);
        }
    }

    let (mut next, effects) = update(std::mem::take(state), msg);
    runner.enqueue(effects);
    if next.consume_dirty() {
        write!(out, "{}", render::render(&next.view()))?;
    }
    *state = next;
    Ok(())
}

fn spawn_stdin_reader(input_tx: mpsc::Sender<Input>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if let Some(input) = parse_command(&line) {
                if input_tx.send(input).is_err() {
                    return;
                }
            }
        }
        let _ = input_tx.send(Input::Quit);
    });
}
