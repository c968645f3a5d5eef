//! REST API and SSE routes

use crate::state::AppState;
use amicos_core::display::{DisplayOutputs, TireWindow};
use amicos_core::units::Percent;
use amicos_core::{
    classify, CorneringInputs, Evaluation, FieldMask, InputRanges, InputsPatch, Recommendation,
    ValidationError,
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use futures::stream::{Stream, StreamExt as FuturesStreamExt};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use tokio_stream::wrappers::BroadcastStream;
use tower_http::cors::CorsLayer;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/defaults", get(defaults))
        .route("/api/evaluate", post(evaluate))
        .route("/api/classify", get(classify_utilization))
        .route("/api/session", get(session_snapshot))
        .route(
            "/api/session/inputs",
            put(commit_inputs).patch(patch_inputs),
        )
        .route("/api/session/stream", get(session_stream))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

type ApiError = (StatusCode, String);

fn rejected(err: ValidationError) -> ApiError {
    tracing::debug!("Rejected inputs: {}", err);
    (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
}

/// An evaluation with everything a dashboard needs to render it
#[derive(Serialize)]
struct EvaluationView {
    #[serde(flatten)]
    evaluation: Evaluation,
    display: DisplayOutputs,
    tire_window: TireWindow,
    /// Output fields that came out NaN or infinite
    non_finite: Vec<&'static str>,
}

impl From<Evaluation> for EvaluationView {
    fn from(evaluation: Evaluation) -> Self {
        Self {
            display: DisplayOutputs::from(&evaluation.outputs),
            tire_window: TireWindow::assess(&evaluation.inputs.vehicle),
            non_finite: evaluation.outputs.non_finite_fields(),
            evaluation,
        }
    }
}

// === Stateless Endpoints ===

#[derive(Serialize)]
struct DefaultsResponse {
    inputs: CorneringInputs,
    ranges: InputRanges,
    enforce_input_ranges: bool,
}

async fn defaults(State(state): State<AppState>) -> Json<DefaultsResponse> {
    Json(DefaultsResponse {
        inputs: CorneringInputs::default(),
        ranges: state.config.ranges.clone(),
        enforce_input_ranges: state.config.enforce_input_ranges,
    })
}

/// Evaluate a posted snapshot without touching the live session
///
/// The result carries revision 0.
async fn evaluate(
    State(state): State<AppState>,
    Json(inputs): Json<CorneringInputs>,
) -> Result<Json<EvaluationView>, ApiError> {
    state.check(&inputs).map_err(rejected)?;

    let evaluation = Evaluation {
        revision: 0,
        timestamp: Utc::now(),
        inputs,
        outputs: inputs.evaluate(),
    };
    Ok(Json(evaluation.into()))
}

#[derive(Deserialize)]
struct ClassifyQuery {
    grip_utilization: f64,
}

async fn classify_utilization(Query(query): Query<ClassifyQuery>) -> Json<Recommendation> {
    Json(classify(Percent(query.grip_utilization)))
}

// === Session Endpoints ===

async fn session_snapshot(State(state): State<AppState>) -> Json<EvaluationView> {
    let evaluation = state.session.read().await.evaluate_current();
    Json(evaluation.into())
}

async fn commit_inputs(
    State(state): State<AppState>,
    Json(inputs): Json<CorneringInputs>,
) -> Result<Json<EvaluationView>, ApiError> {
    let evaluation = state.commit(inputs).await.map_err(rejected)?;
    Ok(Json(evaluation.into()))
}

async fn patch_inputs(
    State(state): State<AppState>,
    Json(patch): Json<InputsPatch>,
) -> Result<Json<EvaluationView>, ApiError> {
    if patch.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Patch names no known input fields".to_string(),
        ));
    }

    let evaluation = state.apply(&patch).await.map_err(rejected)?;
    Ok(Json(evaluation.into()))
}

// === Evaluation Stream Endpoint ===

#[derive(Deserialize)]
struct StreamQuery {
    fields: Option<String>,
}

async fn session_stream(
    State(state): State<AppState>,
    Query(query): Query<StreamQuery>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.subscribe();
    let field_mask = query.fields.map(|f| FieldMask::parse(&f));

    let stream = BroadcastStream::new(rx).filter_map(move |result| {
        let mask = field_mask.clone();
        async move {
            match result {
                Ok(evaluation) => match evaluation.to_json_filtered(mask.as_ref()) {
                    Ok(json) => Some(Ok(Event::default().data(json))),
                    Err(e) => {
                        tracing::error!("Failed to serialize evaluation: {}", e);
                        None
                    }
                },
                Err(e) => {
                    tracing::warn!("Broadcast stream error: {}", e);
                    None
                }
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
