//! The interactive entry point: an HTML form that returns the receipts as an
//! inline download.

mod form;

pub use form::{Download, FormPage, Notice, ReceiptForm, DOWNLOAD_NAME};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Form, Router};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::Local;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::audit::write_audit_log;
use crate::error::{ReceiptError, Result};
use crate::receipt::{build, seal, ReceiptRequest};

const GENERIC_FAILURE: &str =
    "Something went wrong while generating the receipts. Please try again.";

#[derive(Clone)]
pub struct AppState {
    logs_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(logs_dir: PathBuf) -> Self {
        Self {
            logs_dir: Arc::new(logs_dir),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(form_page).post(submit))
        .route("/health", get(health))
        .with_state(state)
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(addr: &str, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "receipt form listening");
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}

async fn health() -> &'static str {
    "ok"
}

async fn form_page() -> FormPage {
    FormPage::new(ReceiptForm::default(), Notice::Blank)
}

async fn submit(State(state): State<AppState>, Form(form): Form<ReceiptForm>) -> Response {
    let request = match form.to_request() {
        Ok(request) => request,
        Err(e) => return rejected(form, e),
    };

    let logs_dir = Arc::clone(&state.logs_dir);
    let outcome =
        tokio::task::spawn_blocking(move || generate_download(&logs_dir, &request)).await;

    match outcome {
        Ok(Ok((months, pdf))) => {
            let notice = Notice::Download(Download {
                months,
                pdf_base64: STANDARD.encode(pdf),
            });
            FormPage::new(form, notice).into_response()
        }
        Ok(Err(e)) if e.is_user_input() => rejected(form, e),
        Ok(Err(e)) => {
            error!(error = %e, "receipt generation failed");
            failed(form)
        }
        Err(e) => {
            error!(error = %e, "receipt generation task panicked");
            failed(form)
        }
    }
}

/// Record the submission, then build and seal its receipts. Returns the
/// number of pages and the PDF bytes.
fn generate_download(logs_dir: &Path, request: &ReceiptRequest) -> Result<(usize, Vec<u8>)> {
    write_audit_log(logs_dir, request, Local::now())?;
    let document = build(request)?;
    let pdf = seal(&document)?;
    Ok((document.len(), pdf))
}

fn rejected(form: ReceiptForm, e: ReceiptError) -> Response {
    warn!(error = %e, "rejected receipt form");
    let problems = match e {
        ReceiptError::Validation(problems) => problems,
        other => vec![other.to_string()],
    };
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        FormPage::new(form, Notice::Warning(problems)),
    )
        .into_response()
}

fn failed(form: ReceiptForm) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        FormPage::new(form, Notice::Error(GENERIC_FAILURE)),
    )
        .into_response()
}
