//! Event polling, dispatching, and rendering.
//!
//! Key presses are routed and applied to the [`App`] as they arrive.
//! Background work (the analysis request and the exit timer) runs on Tokio
//! tasks that report back through the [`AppActionDispatcher`] queue, which
//! is drained once per loop iteration.

use std::{
    error::Error,
    io,
    time::{Duration, Instant},
};

use ratatui::crossterm::event::{self, Event, KeyEventKind};
use tokio::sync::mpsc;
use tracing::debug;

use crate::core::app::{
    apply_actions, AnalysisRequest, App, AppAction, AppActionDispatcher, AppCommand,
};
use crate::core::config::ConfigStore;
use crate::core::providers::{create_provider, ProviderKind};
use crate::ui::renderer::ui;
use crate::ui::text_field::InputFields;
use crate::ui::theme::Theme;

use super::keybindings::{route_key, route_paste, sync_fields};
use super::lifecycle::{restore_terminal, setup_terminal, SessionTerminal};

const MAX_FPS: u64 = 60;
const SPINNER_INTERVAL: Duration = Duration::from_millis(80);

#[derive(Debug)]
pub enum UiEvent {
    Crossterm(Event),
}

fn spawn_analysis(dispatcher: AppActionDispatcher, request: AnalysisRequest) {
    tokio::spawn(async move {
        let AnalysisRequest {
            token,
            prompt,
            config,
            provider_kind,
        } = request;

        let provider = create_provider(provider_kind, &config);
        let result = provider.analyze(&prompt).await.map_err(|err| {
            debug!(token, error = %err, transport = err.is_transport(), "analysis request failed");
            err.to_string()
        });

        dispatcher.dispatch(AppAction::AnalysisCompleted { token, result });
    });
}

fn schedule_exit(dispatcher: AppActionDispatcher, delay: Duration) {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        dispatcher.dispatch(AppAction::ExitTimerFired);
    });
}

fn run_commands(commands: Vec<AppCommand>, dispatcher: &AppActionDispatcher) {
    for cmd in commands {
        match cmd {
            AppCommand::SpawnAnalysis(request) => spawn_analysis(dispatcher.clone(), request),
            AppCommand::ScheduleExit { delay } => schedule_exit(dispatcher.clone(), delay),
        }
    }
}

fn try_draw_frame(
    app: &App,
    fields: &InputFields,
    theme: &Theme,
    terminal: &mut SessionTerminal,
    request_redraw: &mut bool,
    last_draw: &mut Instant,
    frame_duration: Duration,
) -> io::Result<()> {
    if !*request_redraw {
        return Ok(());
    }

    let now = Instant::now();
    if now.duration_since(*last_draw) < frame_duration {
        return Ok(());
    }

    terminal.draw(|f| ui(f, app, fields, theme))?;
    *last_draw = now;
    *request_redraw = false;
    Ok(())
}

/// Applies every pending terminal event. Returns whether anything arrived.
fn process_ui_events(
    app: &mut App,
    fields: &mut InputFields,
    event_rx: &mut mpsc::UnboundedReceiver<UiEvent>,
    dispatcher: &AppActionDispatcher,
) -> bool {
    let mut events_processed = false;

    while let Ok(ev) = event_rx.try_recv() {
        events_processed = true;
        sync_fields(app, fields);
        let actions = match ev {
            UiEvent::Crossterm(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                route_key(app, fields, key)
            }
            UiEvent::Crossterm(Event::Paste(text)) => route_paste(app, fields, &text),
            UiEvent::Crossterm(_) => Vec::new(),
        };
        run_commands(apply_actions(app, actions), dispatcher);
        if app.exit_requested() {
            break;
        }
    }

    events_processed
}

/// Applies actions reported by background tasks. Returns whether any arrived.
fn drain_action_queue(
    app: &mut App,
    dispatcher: &AppActionDispatcher,
    action_rx: &mut mpsc::UnboundedReceiver<AppAction>,
) -> bool {
    let mut pending = Vec::new();
    while let Ok(action) = action_rx.try_recv() {
        pending.push(action);
    }

    if pending.is_empty() {
        return false;
    }

    run_commands(apply_actions(app, pending), dispatcher);
    true
}

fn spawn_event_reader(event_tx: mpsc::UnboundedSender<UiEvent>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            if let Ok(true) = event::poll(Duration::from_millis(10)) {
                match event::read() {
                    Ok(ev) => {
                        if event_tx.send(UiEvent::Crossterm(ev)).is_err() {
                            break;
                        }
                    }
                    Err(_) => {
                        continue;
                    }
                }
            } else {
                tokio::task::yield_now().await;
            }
        }
    })
}

/// Runs the interactive session until the user exits.
pub async fn run_session(
    config_store: ConfigStore,
    provider_kind: ProviderKind,
) -> Result<(), Box<dyn Error>> {
    let mut app = App::new(config_store, provider_kind);
    let theme = Theme::mahoraga();
    let mut fields = InputFields::new(&theme);

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<AppAction>();
    let dispatcher = AppActionDispatcher::new(action_tx);

    let mut terminal = setup_terminal()?;

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<UiEvent>();
    let event_reader_handle = spawn_event_reader(event_tx);

    let frame_duration = Duration::from_millis(1000 / MAX_FPS);
    let mut last_draw = Instant::now() - frame_duration;
    let mut request_redraw = true;
    let mut last_spinner_tick = Instant::now();

    let result: Result<(), Box<dyn Error>> = 'main_loop: loop {
        if app.exit_requested() {
            break 'main_loop Ok(());
        }

        sync_fields(&app, &mut fields);
        if let Err(err) = try_draw_frame(
            &app,
            &fields,
            &theme,
            &mut terminal,
            &mut request_redraw,
            &mut last_draw,
            frame_duration,
        ) {
            break 'main_loop Err(err.into());
        }

        let events_processed = process_ui_events(&mut app, &mut fields, &mut event_rx, &dispatcher);
        if events_processed {
            request_redraw = true;
        }

        if drain_action_queue(&mut app, &dispatcher, &mut action_rx) {
            request_redraw = true;
        }

        if app.is_analyzing() && last_spinner_tick.elapsed() >= SPINNER_INTERVAL {
            apply_actions(&mut app, [AppAction::SpinnerTick]);
            last_spinner_tick = Instant::now();
            request_redraw = true;
        }

        if !events_processed && !request_redraw {
            tokio::time::sleep(Duration::from_millis(16)).await;
        }
    };

    event_reader_handle.abort();
    restore_terminal(&mut terminal)?;
    debug!("session ended");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_utils::{create_test_app, sample_result};
    use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[tokio::test]
    async fn exit_timer_reports_back_through_queue() {
        let (mut app, _dir) = create_test_app();
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();
        let dispatcher = AppActionDispatcher::new(action_tx);

        let commands = apply_actions(
            &mut app,
            [AppAction::SubmitInput {
                value: "/exit".to_string(),
            }],
        );
        run_commands(commands, &dispatcher);
        assert!(!drain_action_queue(&mut app, &dispatcher, &mut action_rx));
        assert!(!app.exit_requested());

        tokio::time::sleep(Duration::from_millis(700)).await;
        assert!(drain_action_queue(&mut app, &dispatcher, &mut action_rx));
        assert!(app.exit_requested());
    }

    #[test]
    fn queued_completion_is_applied_on_drain() {
        let (mut app, _dir) = create_test_app();
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();
        let dispatcher = AppActionDispatcher::new(action_tx);

        dispatcher.dispatch(AppAction::AnalysisCompleted {
            token: 7,
            result: Ok(sample_result(0.3)),
        });

        // No analysis with that token is running, so the result is dropped.
        assert!(drain_action_queue(&mut app, &dispatcher, &mut action_rx));
        assert!(app.last_result().is_none());
    }

    #[test]
    fn ui_events_route_keys_and_paste() {
        let (mut app, _dir) = create_test_app();
        let mut fields = InputFields::new(&Theme::mahoraga());
        let (action_tx, _action_rx) = mpsc::unbounded_channel();
        let dispatcher = AppActionDispatcher::new(action_tx);
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();

        event_tx
            .send(UiEvent::Crossterm(Event::Paste("/cle".to_string())))
            .expect("send");
        event_tx
            .send(UiEvent::Crossterm(Event::Key(KeyEvent::new(
                KeyCode::Tab,
                KeyModifiers::NONE,
            ))))
            .expect("send");
        event_tx
            .send(UiEvent::Crossterm(Event::Key(KeyEvent::new(
                KeyCode::Char('!'),
                KeyModifiers::NONE,
            ))))
            .expect("send");

        assert!(process_ui_events(&mut app, &mut fields, &mut event_rx, &dispatcher));
        assert_eq!(app.input(), "/clear!");
        assert!(!process_ui_events(&mut app, &mut fields, &mut event_rx, &dispatcher));
    }
}
