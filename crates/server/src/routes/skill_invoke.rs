//! The skill endpoint
//!
//! Relays a request envelope posted to `/` to the skill unchanged, the way
//! the voice platform would invoke it.

use std::sync::Arc;

use axum::{Extension, Json, extract::State};
use skill::{RequestEnvelope, ResponseEnvelope, Skill};
use tracing::debug;

use crate::{error::ApiError, middleware::RequestId};

/// POST /
pub async fn invoke_skill(
    State(skill): State<Arc<Skill>>,
    Extension(request_id): Extension<RequestId>,
    Json(envelope): Json<RequestEnvelope>,
) -> Result<Json<ResponseEnvelope>, ApiError> {
    debug!(
        http_request_id = request_id.as_str(),
        platform_request_id = envelope.request.request_id(),
        request_type = envelope.request.request_type(),
        "Relaying request envelope"
    );

    let response = skill.invoke(envelope).await?;
    Ok(Json(response))
}
