use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, anyhow};
use axum::extract::State;
use axum::extract::rejection::FormRejection;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::cli::ServeArgs;
use crate::dataset::{self, HospitalTable};
use crate::form::PredictForm;
use crate::query::{self, NO_HOSPITALS_WITHIN_DISTANCE, QueryResult};
use crate::render;
use crate::storage::{StoragePaths, file_present_nonempty};

#[derive(Clone)]
struct AppState {
    hospitals: Arc<HospitalTable>,
}

pub async fn run(opts: ServeArgs) -> anyhow::Result<()> {
    let paths = StoragePaths::from_args(&opts.data);
    tracing::info!("data_dir={}", paths.data_dir.display());
    if !file_present_nonempty(&paths.dataset_path) {
        return Err(anyhow!(
            "Hospital dataset not found at {}. Pass --dataset or --data-dir",
            paths.dataset_path.display()
        ));
    }

    let hospitals = dataset::load(&paths.dataset_path).context("load hospital dataset")?;
    let app = router(AppState {
        hospitals: Arc::new(hospitals),
    });

    let addr: SocketAddr = format!("{}:{}", opts.host, opts.port)
        .parse()
        .context("parse host:port")?;

    tracing::info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/predict", post(predict))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn home() -> Html<&'static str> {
    Html(render::home())
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn error_response(error: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response()
}

async fn predict(
    State(st): State<AppState>,
    form: Result<Form<PredictForm>, FormRejection>,
) -> Response {
    // A submission without a urlencoded body carries no fields at all.
    let form = match form {
        Ok(Form(form)) => form,
        Err(FormRejection::InvalidFormContentType(_)) => PredictForm::default(),
        Err(e) => {
            tracing::debug!("unreadable /predict submission: {}", e.body_text());
            return error_response(e.body_text());
        }
    };

    let criteria = match form.into_criteria() {
        Ok(c) => c,
        Err(e) => {
            tracing::debug!("rejected /predict submission: {}", e);
            return error_response(e.to_string());
        }
    };

    match query::find(&st.hospitals, &criteria) {
        QueryResult::NoneWithinDistance => {
            tracing::debug!("no hospitals within distance {}", criteria.max_distance);
            NO_HOSPITALS_WITHIN_DISTANCE.into_response()
        }
        QueryResult::Matches(hits) => {
            tracing::debug!("criteria={:?} matches={}", criteria, hits.len());
            Html(render::results(&criteria, &hits)).into_response()
        }
    }
}
