//! JSON status handler.

use axum::extract::State;
use axum::Json;

use super::super::types::{
    AnalysisCounts, AppState, ErrorCounts, StatusResponse, WarningCounts,
};
use crate::error_handling::{ErrorType, InfoType, WarningType};

/// Counters of analyses since the server started.
pub async fn status_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    let stats = state.analyzer.stats();
    let errors = |error_type| stats.get_error_count(error_type);

    let failed = errors(ErrorType::ValidationError)
        + errors(ErrorType::SessionError)
        + errors(ErrorType::NavigationTimeout)
        + errors(ErrorType::NavigationError);

    Json(StatusResponse {
        uptime_seconds: state.start_time.elapsed().as_secs_f64(),
        analyses: AnalysisCounts {
            started: stats.get_info_count(InfoType::AnalysisStarted),
            succeeded: stats.get_info_count(InfoType::AnalysisCompleted),
            failed,
            redirected: stats.get_info_count(InfoType::PageRedirected),
            links_checked: stats.get_info_count(InfoType::LinkChecked),
            login_forms_detected: stats.get_info_count(InfoType::LoginFormDetected),
        },
        errors: ErrorCounts {
            total: stats.total_errors(),
            validation: errors(ErrorType::ValidationError),
            session: errors(ErrorType::SessionError),
            navigation_timeout: errors(ErrorType::NavigationTimeout),
            navigation: errors(ErrorType::NavigationError),
            link_http: errors(ErrorType::LinkHttpError),
            link_timeout: errors(ErrorType::LinkTimeout),
            link_network: errors(ErrorType::LinkNetworkError),
            storage: errors(ErrorType::StorageError),
        },
        warnings: WarningCounts {
            total: stats.total_warnings(),
            missing_title: stats.get_warning_count(WarningType::MissingTitle),
            missing_doctype: stats.get_warning_count(WarningType::MissingDoctype),
        },
    })
}
