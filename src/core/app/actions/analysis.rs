use tracing::debug;

use super::{App, AppAction, AppCommand};

pub(super) fn handle_analysis_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    match action {
        AppAction::AnalysisCompleted { token, result } => {
            if !app.analysis.finish(token) {
                debug!(token, "dropping stale analysis completion");
                return None;
            }
            match result {
                Ok(result) => {
                    debug!(token, score = result.score, "analysis finished");
                    app.last_result = Some(result);
                    app.last_error = None;
                }
                Err(message) => {
                    debug!(token, error = %message, "analysis failed");
                    app.last_result = None;
                    app.last_error = Some(message);
                }
            }
            None
        }
        AppAction::SpinnerTick => {
            if app.is_analyzing() {
                app.spinner_frame = app.spinner_frame.wrapping_add(1);
            }
            None
        }
        _ => unreachable!("non-analysis action routed to analysis handler"),
    }
}
