use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::{affiliation::AffiliationForm, content, error::AppError, state::AppState};

pub async fn home_page_handler() -> impl IntoResponse {
    Json(content::home_page())
}

pub async fn affiliate_page_handler() -> impl IntoResponse {
    Json(content::affiliate_page())
}

pub async fn contact_page_handler() -> impl IntoResponse {
    Json(content::contact_page())
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub delivered: bool,
    pub message: String,
    pub pending_id: Option<String>,
}

pub async fn affiliate_handler(
    State(state): State<Arc<AppState>>,
    Json(form): Json<AffiliationForm>,
) -> Result<Json<SubmitResponse>, AppError> {
    form.validate()
        .map_err(|errors| AppError::InvalidSubmission(errors.join("; ")))?;

    match state.mailer.send_affiliation(&form).await {
        Ok(()) => Ok(Json(SubmitResponse {
            delivered: true,
            message: "Application submitted successfully! We'll contact you soon.".to_string(),
            pending_id: None,
        })),
        Err(reason) => {
            let pending = state.store.push(form).await;
            info!("Queued submission {} after delivery failure: {reason}", pending.id);

            Ok(Json(SubmitResponse {
                delivered: false,
                message: "We could not send your application right now. It has been saved \
                          and will be retried."
                    .to_string(),
                pending_id: Some(pending.id),
            }))
        }
    }
}

pub async fn list_pending_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.store.all().await)
}

#[derive(Debug, Serialize)]
pub struct RetryOutcome {
    pub id: String,
    pub delivered: bool,
    pub attempts: u32,
}

pub async fn retry_one_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<RetryOutcome>, AppError> {
    let submission = state
        .store
        .find(&id)
        .await
        .ok_or_else(|| AppError::UnknownSubmission(id.clone()))?;

    match state.mailer.send_affiliation(&submission.form).await {
        Ok(()) => {
            state.store.remove(&id).await;
            info!("Pending submission {id} delivered on retry");

            Ok(Json(RetryOutcome {
                id,
                delivered: true,
                attempts: submission.attempts,
            }))
        }
        Err(reason) => {
            state.store.record_attempt(&id).await;
            warn!("Retry of pending submission {id} failed: {reason}");

            Ok(Json(RetryOutcome {
                id,
                delivered: false,
                attempts: submission.attempts + 1,
            }))
        }
    }
}

#[derive(Serialize)]
pub struct RetryAllSummary {
    pub sent: usize,
    pub remaining: usize,
}

pub async fn retry_all_handler(State(state): State<Arc<AppState>>) -> Json<RetryAllSummary> {
    let submissions = state.store.all().await;
    let mut sent = 0;

    for submission in &submissions {
        match state.mailer.send_affiliation(&submission.form).await {
            Ok(()) => {
                if state.store.remove(&submission.id).await {
                    sent += 1;
                }
            }
            Err(reason) => {
                state.store.record_attempt(&submission.id).await;
                warn!("Retry of pending submission {} failed: {reason}", submission.id);
            }
        }
    }

    info!("Retry sweep delivered {sent} of {} submissions", submissions.len());

    Json(RetryAllSummary {
        sent,
        remaining: state.store.all().await.len(),
    })
}

pub async fn delete_pending_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.store.remove(&id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::UnknownSubmission(id))
    }
}
