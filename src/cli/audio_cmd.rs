//! Audio screen commands

use std::time::Duration as StdDuration;

use crate::domain::audio::PlaybackState;
use crate::domain::recording::Duration;

use super::app::{AppContext, CliAudioController, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
use super::args::AudioAction;
use super::input::stdin_lines;
use super::presenter::Presenter;
use super::signals::ShutdownSignal;

const RECORD_TICK: StdDuration = StdDuration::from_millis(100);
const PLAYBACK_TICK: StdDuration = StdDuration::from_millis(200);

/// Handle audio subcommand
pub async fn handle_audio_command(
    action: AudioAction,
    context: &AppContext,
    presenter: &Presenter,
) -> u8 {
    let limit = match &action {
        AudioAction::Record {
            duration,
            max_duration,
        } => match record_limit(duration.as_deref(), max_duration.as_deref(), context) {
            Ok(limit) => limit,
            Err(message) => {
                presenter.error(&message);
                return EXIT_USAGE_ERROR;
            }
        },
        _ => context.max_duration,
    };
    let mut controller = context.audio_controller(limit);
    controller.load().await;

    let code = match action {
        AudioAction::List { search } => list(&mut controller, search, presenter),
        AudioAction::Record { .. } => record(&mut controller, limit, presenter).await,
        AudioAction::Play { clip } => play(&mut controller, &clip, presenter).await,
        AudioAction::Formats => {
            controller.show_format_help().await;
            EXIT_SUCCESS
        }
    };

    controller.close().await;
    code
}

fn list(controller: &mut CliAudioController, search: Option<String>, presenter: &Presenter) -> u8 {
    if let Some(search) = search {
        controller.set_search(search);
    }

    let visible = controller.visible_items();
    if visible.is_empty() {
        if controller.search().is_empty() {
            presenter.info("No recordings yet");
        } else {
            presenter.info(&format!("No recordings match '{}'", controller.search().as_str()));
        }
        return EXIT_SUCCESS;
    }

    for item in visible {
        presenter.audio_row(item);
    }
    EXIT_SUCCESS
}

/// Resolve the capture limit: the requested duration clamped to the safety limit
fn record_limit(
    duration: Option<&str>,
    max_duration: Option<&str>,
    context: &AppContext,
) -> Result<Duration, String> {
    let max = match max_duration {
        Some(value) => value
            .parse::<Duration>()
            .map_err(|e| format!("Invalid --max-duration: {}", e))?,
        None => context.max_duration,
    };

    match duration {
        Some(value) => value
            .parse::<Duration>()
            .map(|d| d.clamp_to(max))
            .map_err(|e| format!("Invalid --duration: {}", e)),
        None => Ok(max),
    }
}

async fn record(controller: &mut CliAudioController, limit: Duration, presenter: &Presenter) -> u8 {
    let shutdown = ShutdownSignal::new();
    shutdown.setup();

    if !controller.start_recording().await {
        return EXIT_ERROR;
    }

    let mut progress = Presenter::new();
    progress.start_spinner("Recording... (Enter or Ctrl-C to stop)");

    let mut stdin = stdin_lines();
    let mut stdin_open = true;
    let mut ticker = tokio::time::interval(RECORD_TICK);

    loop {
        tokio::select! {
            _ = shutdown.wait() => break,
            line = stdin.recv(), if stdin_open => match line {
                Some(_) => break,
                None => stdin_open = false,
            },
            _ = ticker.tick() => {
                let elapsed = controller.recording_elapsed();
                progress.update_recording_progress(elapsed, limit);
                if elapsed >= limit {
                    log::info!("Recording limit of {} reached", limit);
                    break;
                }
            }
        }
    }

    progress.stop_spinner();
    match controller.stop_recording().await {
        Some(item) => {
            presenter.success(&format!("Saved {} ({}, {})", item.name, item.length(), item.size));
            presenter.output(&item.id);
            EXIT_SUCCESS
        }
        None => EXIT_ERROR,
    }
}

async fn play(controller: &mut CliAudioController, clip: &str, presenter: &Presenter) -> u8 {
    let Some(item) = controller.find(clip).cloned() else {
        presenter.error(&format!("No clip matches '{}'", clip));
        return EXIT_ERROR;
    };

    let shutdown = ShutdownSignal::new();
    shutdown.setup();

    if !controller.open_player(&item.id).await {
        return EXIT_ERROR;
    }

    presenter.info("Enter: pause/resume | <time> then Enter: seek (e.g. 1m5s) | q: quit");
    let mut progress = Presenter::new();
    progress.start_spinner(&item.name);

    let mut stdin = stdin_lines();
    let mut stdin_open = true;
    let mut ticker = tokio::time::interval(PLAYBACK_TICK);
    let total = item.length();

    loop {
        tokio::select! {
            _ = shutdown.wait() => break,
            line = stdin.recv(), if stdin_open => match line {
                Some(line) => {
                    if !handle_player_input(controller, line.trim(), presenter).await {
                        break;
                    }
                }
                None => stdin_open = false,
            },
            _ = ticker.tick() => {
                let state = controller.poll_playback().await;
                progress.update_playback_progress(&item.name, &state.to_string(), controller.elapsed(), total);
                if state == PlaybackState::Idle {
                    break;
                }
            }
        }
    }

    progress.spinner_success(&format!("{} ({})", item.name, total));
    EXIT_SUCCESS
}

/// Apply one line of player input. Returns false when the user asked to quit.
async fn handle_player_input(
    controller: &mut CliAudioController,
    input: &str,
    presenter: &Presenter,
) -> bool {
    match input {
        "" | "p" => controller.toggle_playback().await,
        "q" => return false,
        position => match position.parse::<Duration>() {
            Ok(position) => controller.seek(position).await,
            Err(e) => presenter.warn(&e.to_string()),
        },
    }
    true
}
