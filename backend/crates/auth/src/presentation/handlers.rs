//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use serde_json::{Map, Value};
use std::sync::Arc;

use kernel::error::app_error::AppError;
use platform::client::extract_auth_token;

use crate::application::config::AuthConfig;
use crate::application::{
    CheckSessionUseCase, RegisterInput, RegisterUseCase, SessionStatus, SignInInput,
    SignInUseCase, SignOutUseCase, TelegramSignInUseCase,
};
use crate::domain::repository::{AuthSessionRepository, MemberAccountRepository};
use crate::error::AuthResult;
use crate::presentation::dto::{
    AuthResponse, LoginRequest, MemberProfile, RegisterRequest, SessionStatusResponse,
    SuccessResponse,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: MemberAccountRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<Json<AuthResponse>>
where
    R: MemberAccountRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    Ok(Json(sign_up(&state, req).await?))
}

async fn sign_up<R>(state: &AuthAppState<R>, req: RegisterRequest) -> AuthResult<AuthResponse>
where
    R: MemberAccountRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let input = RegisterInput {
        email: req.email,
        password: req.password,
        full_name: req.full_name,
    };

    let output = use_case.execute(input).await?;

    Ok(AuthResponse::from(output))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<AuthResponse>>
where
    R: MemberAccountRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    Ok(Json(sign_in(&state, req).await?))
}

async fn sign_in<R>(state: &AuthAppState<R>, req: LoginRequest) -> AuthResult<AuthResponse>
where
    R: MemberAccountRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let input = SignInInput {
        email: req.email,
        password: req.password,
    };

    let output = use_case.execute(input).await?;

    Ok(AuthResponse::from(output))
}

// ============================================================================
// Action Dispatch
// ============================================================================

/// POST /api/auth
///
/// Single endpoint used by the web client: `{action: "register" | "login", ...}`.
pub async fn auth_action<R>(
    State(state): State<AuthAppState<R>>,
    Json(body): Json<Value>,
) -> AuthResult<Json<AuthResponse>>
where
    R: MemberAccountRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let action = body
        .get("action")
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::bad_request("action is required"))?
        .to_string();

    let response = match action.as_str() {
        "register" => {
            let req: RegisterRequest = serde_json::from_value(body).map_err(AppError::from)?;
            sign_up(&state, req).await?
        }
        "login" => {
            let req: LoginRequest = serde_json::from_value(body).map_err(AppError::from)?;
            sign_in(&state, req).await?
        }
        _ => {
            return Err(AppError::bad_request(format!("Unknown action: {}", action))
                .with_action("Use one of: register, login")
                .into());
        }
    };

    Ok(Json(response))
}

// ============================================================================
// Telegram Login
// ============================================================================

/// POST /api/auth/telegram
///
/// Body is the login widget payload as a JSON object.
pub async fn telegram_login<R>(
    State(state): State<AuthAppState<R>>,
    Json(payload): Json<Map<String, Value>>,
) -> AuthResult<Json<AuthResponse>>
where
    R: MemberAccountRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let use_case =
        TelegramSignInUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let output = use_case.execute(&payload).await?;

    Ok(Json(AuthResponse::from(output)))
}

// ============================================================================
// Session Status / Logout
// ============================================================================

/// GET /api/auth/status
pub async fn session_status<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<Json<SessionStatusResponse>>
where
    R: MemberAccountRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let token = extract_auth_token(&headers);

    let use_case = CheckSessionUseCase::new(state.repo.clone(), state.repo.clone());

    let response = match use_case.execute(token.as_deref()).await? {
        SessionStatus::Authenticated {
            account,
            expires_at,
        } => SessionStatusResponse {
            authenticated: true,
            user: Some(MemberProfile::from(&account)),
            expires_at: Some(expires_at),
        },
        SessionStatus::Anonymous => SessionStatusResponse {
            authenticated: false,
            user: None,
            expires_at: None,
        },
    };

    Ok(Json(response))
}

/// POST /api/auth/logout
pub async fn logout<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<Json<SuccessResponse>>
where
    R: MemberAccountRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    if let Some(token) = extract_auth_token(&headers) {
        let use_case = SignOutUseCase::new(state.repo.clone());
        use_case.execute(&token).await?;
    }

    Ok(Json(SuccessResponse { success: true }))
}
