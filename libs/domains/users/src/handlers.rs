use axum::{
    Json, Router,
    extract::{FromRef, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use axum_helpers::{
    CurrentSession, Session, SessionResolver,
    auth::cookies::{CookieOptions, SESSION_COOKIE, build_cookie, cookie_value, expire_cookie},
    errors::responses::{BadRequestResponse, InternalServerErrorResponse, UnauthorizedResponse},
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::config::OAuthConfig;
use crate::error::{UserError, UserResult};
use crate::oauth::{OAUTH_STATE_COOKIE, OAuthCallbackParams, OAuthProvider, OAuthState, STATE_TTL};
use crate::repository::UserRepository;
use crate::service::UserService;

const TAG: &str = "auth";

/// OpenAPI documentation for the auth endpoints
#[derive(OpenApi)]
#[openapi(
    paths(signin_github, callback_github, current_session, signout),
    components(
        schemas(Session, SessionResponse),
        responses(BadRequestResponse, UnauthorizedResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = TAG, description = "GitHub sign-in and session endpoints")
    )
)]
pub struct ApiDoc;

/// Body of `GET /auth/session`
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub session: Option<Session>,
}

/// Application state for auth handlers
pub struct AuthState<R: UserRepository> {
    pub service: Arc<UserService<R>>,
    pub provider: Arc<dyn OAuthProvider>,
    pub config: OAuthConfig,
    pub sessions: SessionResolver,
    /// Mark cookies `Secure`
    pub secure_cookies: bool,
}

impl<R: UserRepository> Clone for AuthState<R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            provider: Arc::clone(&self.provider),
            config: self.config.clone(),
            sessions: self.sessions.clone(),
            secure_cookies: self.secure_cookies,
        }
    }
}

impl<R: UserRepository> FromRef<AuthState<R>> for SessionResolver {
    fn from_ref(state: &AuthState<R>) -> Self {
        state.sessions.clone()
    }
}

/// Create auth router
pub fn auth_router<R: UserRepository + 'static>(state: AuthState<R>) -> Router {
    Router::new()
        .route("/signin/github", get(signin_github::<R>))
        .route("/callback/github", get(callback_github::<R>))
        .route("/session", get(current_session))
        .route("/signout", post(signout::<R>))
        .with_state(state)
}

fn cookie_error(e: header::InvalidHeaderValue) -> UserError {
    UserError::Internal(format!("Failed to build cookie: {e}"))
}

/// 302 to `location`, setting every cookie in `cookies`.
fn found(location: &str, cookies: Vec<HeaderValue>) -> UserResult<Response> {
    let location = HeaderValue::from_str(location)
        .map_err(|e| UserError::Internal(format!("Invalid redirect target: {e}")))?;

    let mut response = StatusCode::FOUND.into_response();
    let headers = response.headers_mut();
    headers.insert(header::LOCATION, location);
    for cookie in cookies {
        headers.append(header::SET_COOKIE, cookie);
    }
    Ok(response)
}

/// Start GitHub sign-in
#[utoipa::path(
    get,
    path = "/signin/github",
    tag = TAG,
    responses(
        (status = 302, description = "Redirect to GitHub with state and PKCE challenge"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn signin_github<R: UserRepository>(
    State(state): State<AuthState<R>>,
) -> UserResult<Response> {
    let pending = OAuthState::generate();
    let url = state
        .provider
        .authorize_url(&pending, &state.config.callback_url())?;

    let cookie = build_cookie(
        OAUTH_STATE_COOKIE,
        &pending.encode(),
        CookieOptions {
            max_age: STATE_TTL,
            secure: state.secure_cookies,
        },
    )
    .map_err(cookie_error)?;

    tracing::debug!(provider = state.provider.name(), "Redirecting to provider");
    found(&url, vec![cookie])
}

/// Finish GitHub sign-in
///
/// Creates the user on first sign-in and sets the session cookie.
#[utoipa::path(
    get,
    path = "/callback/github",
    tag = TAG,
    params(
        ("code" = Option<String>, Query, description = "Authorization code"),
        ("state" = Option<String>, Query, description = "CSRF state issued at sign-in"),
        ("error" = Option<String>, Query, description = "Set by GitHub when sign-in was cancelled")
    ),
    responses(
        (status = 302, description = "Redirect to the posts page, or to the login page when sign-in is denied"),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn callback_github<R: UserRepository>(
    State(state): State<AuthState<R>>,
    headers: HeaderMap,
    Query(params): Query<OAuthCallbackParams>,
) -> UserResult<Response> {
    let clear_state =
        expire_cookie(OAUTH_STATE_COOKIE, state.secure_cookies).map_err(cookie_error)?;

    if let Some(error) = params.error.as_deref() {
        tracing::info!(error, "Provider reported sign-in failure");
        return found(&state.config.access_denied_url(), vec![clear_state]);
    }

    let pending = cookie_value(&headers, OAUTH_STATE_COOKIE)
        .and_then(|raw| OAuthState::decode(&raw))
        .ok_or(UserError::InvalidState)?;
    let returned = params.state.as_deref().ok_or(UserError::InvalidState)?;
    if !pending.matches(returned) {
        tracing::warn!("OAuth state mismatch");
        return Err(UserError::InvalidState);
    }
    let code = params
        .code
        .as_deref()
        .filter(|c| !c.is_empty())
        .ok_or(UserError::MissingCode)?;

    let token = state
        .provider
        .exchange_code(code, &pending.pkce_verifier, &state.config.callback_url())
        .await?;
    let profile = state.provider.get_user_info(&token.access_token).await?;

    let user = match state.service.sign_in(&profile).await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!(error = %e, provider_user_id = %profile.provider_user_id, "Sign-in denied");
            return found(&state.config.access_denied_url(), vec![clear_state]);
        }
    };

    let session_token = state.sessions.tokens().issue(
        &profile.provider_user_id,
        &user.name,
        &user.email,
        user.image.as_deref(),
    )?;
    let session_cookie = build_cookie(
        SESSION_COOKIE,
        &session_token,
        CookieOptions {
            max_age: state.sessions.tokens().ttl(),
            secure: state.secure_cookies,
        },
    )
    .map_err(cookie_error)?;

    tracing::info!(user_id = %user.id, "User signed in");
    found(&state.config.signed_in_url(), vec![session_cookie, clear_state])
}

/// Current session, or `null`
#[utoipa::path(
    get,
    path = "/session",
    tag = TAG,
    responses(
        (status = 200, description = "The session attached to the request", body = SessionResponse)
    )
)]
async fn current_session(CurrentSession(session): CurrentSession) -> Json<SessionResponse> {
    Json(SessionResponse { session })
}

/// Sign out
#[utoipa::path(
    post,
    path = "/signout",
    tag = TAG,
    responses(
        (status = 204, description = "Session cookie cleared"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn signout<R: UserRepository>(State(state): State<AuthState<R>>) -> UserResult<Response> {
    let cookie = expire_cookie(SESSION_COOKIE, state.secure_cookies).map_err(cookie_error)?;
    Ok((StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie)]).into_response())
}
