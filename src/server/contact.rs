//! Contact Us form submission.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequest, Request, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use serde::Serialize;
use tracing::info;

use crate::contact::{ContactFormState, EnquiryLead, SUCCESS_MESSAGE, submit_enquiry};
use crate::error::ContactError;
use crate::pages::{PageRequest, Route};

use super::SharedState;
use super::pages::render_route_with_status;

/// JSON answer to a JSON submission.
#[derive(Debug, Serialize)]
struct SubmissionBody {
    success: bool,
    message: String,
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}

const fn status_for(result: &Result<(), ContactError>) -> StatusCode {
    match result {
        Ok(()) => StatusCode::OK,
        Err(ContactError::Invalid(_)) => StatusCode::UNPROCESSABLE_ENTITY,
        Err(ContactError::Submission(_)) => StatusCode::BAD_GATEWAY,
    }
}

/// `POST /contact-us`.
///
/// A form post re-renders the Contact Us page with the outcome above the
/// form (values kept on failure, cleared on success). A JSON post gets a
/// `{success, message}` body.
pub async fn submit(
    State(state): State<SharedState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    request: Request,
) -> Response {
    let json = is_json(request.headers());
    let lead = if json {
        match Json::<EnquiryLead>::from_request(request, &state).await {
            Ok(Json(lead)) => lead,
            Err(rejection) => return rejection.into_response(),
        }
    } else {
        match Form::<EnquiryLead>::from_request(request, &state).await {
            Ok(Form(lead)) => lead,
            Err(rejection) => return rejection.into_response(),
        }
    };

    let lead = lead.trimmed();
    let result = submit_enquiry(state.pages.cms.as_ref(), &lead).await;
    let status = status_for(&result);
    info!(%peer, status = status.as_u16(), "contact form submitted");

    if json {
        let body = SubmissionBody {
            success: result.is_ok(),
            message: result
                .as_ref()
                .map_or_else(ToString::to_string, |_| SUCCESS_MESSAGE.to_string()),
        };
        return (status, Json(body)).into_response();
    }

    let request = PageRequest {
        contact: Some(ContactFormState::after_submit(lead, &result)),
        ..PageRequest::default()
    };
    render_route_with_status(&state, &Route::ContactUs, &request, status).await
}
