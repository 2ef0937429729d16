use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};
use uuid::Uuid;

pub const DEMO_ANON_KEY: &str = "mock-anon-key";
pub const DEMO_EMAIL: &str = "ana@example.com";
pub const DEMO_PASSWORD: &str = "correct horse battery staple";
pub const TOKEN_TTL_SECS: u64 = 3600;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub role: String,
    pub user_metadata: Value,
    pub app_metadata: Value,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub refresh_token: String,
    pub user: User,
}

/// An account the server knows about at startup.
#[derive(Clone, Debug)]
pub struct SeedUser {
    pub email: String,
    pub password: String,
    pub user_metadata: Value,
}

impl SeedUser {
    pub fn new(email: &str, password: &str, user_metadata: Value) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
            user_metadata,
        }
    }

    pub fn demo() -> Self {
        Self::new(DEMO_EMAIL, DEMO_PASSWORD, json!({ "name": "Ana" }))
    }
}

#[derive(Deserialize)]
pub struct PasswordGrant {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct TokenParams {
    pub grant_type: String,
}

struct Account {
    user: User,
    password: String,
}

#[derive(Default)]
pub struct Store {
    accounts: HashMap<String, Account>,
    tokens: HashMap<String, Uuid>,
}

impl Store {
    fn user_by_id(&self, id: Uuid) -> Option<&User> {
        self.accounts.values().map(|a| &a.user).find(|u| u.id == id)
    }
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Clone)]
struct AppState {
    db: Db,
    anon_key: Arc<str>,
}

type ErrorResponse = (StatusCode, Json<Value>);

pub fn app() -> Router {
    app_with_users(DEMO_ANON_KEY, vec![SeedUser::demo()])
}

pub fn app_with_users(anon_key: &str, users: Vec<SeedUser>) -> Router {
    let mut store = Store::default();
    for seed in users {
        let user = User {
            id: Uuid::new_v4(),
            email: seed.email.clone(),
            role: "authenticated".to_string(),
            user_metadata: seed.user_metadata,
            app_metadata: json!({ "provider": "email" }),
        };
        store.accounts.insert(
            seed.email,
            Account {
                user,
                password: seed.password,
            },
        );
    }

    let state = AppState {
        db: Arc::new(RwLock::new(store)),
        anon_key: Arc::from(anon_key),
    };
    Router::new()
        .route("/auth/v1/token", post(token))
        .route("/auth/v1/user", get(current_user))
        .route("/auth/v1/logout", post(logout))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_api_key))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn token(
    State(state): State<AppState>,
    Query(params): Query<TokenParams>,
    Json(grant): Json<PasswordGrant>,
) -> Result<Json<Session>, ErrorResponse> {
    if params.grant_type != "password" {
        return Err(error(
            StatusCode::BAD_REQUEST,
            json!({ "error": "unsupported_grant_type" }),
        ));
    }

    let mut store = state.db.write().await;
    let user = match store.accounts.get(&grant.email) {
        Some(account) if account.password == grant.password => account.user.clone(),
        _ => {
            debug!(email = %grant.email, "rejected password grant");
            return Err(error(
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "invalid_grant",
                    "error_description": "Invalid login credentials",
                }),
            ));
        }
    };

    let access_token = Uuid::new_v4().simple().to_string();
    store.tokens.insert(access_token.clone(), user.id);
    info!(email = %user.email, "issued session");

    Ok(Json(Session {
        access_token,
        token_type: "bearer".to_string(),
        expires_in: TOKEN_TTL_SECS,
        refresh_token: Uuid::new_v4().simple().to_string(),
        user,
    }))
}

async fn current_user(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<User>, ErrorResponse> {
    let token = bearer_token(&headers).ok_or_else(invalid_token)?;

    let store = state.db.read().await;
    store
        .tokens
        .get(token)
        .and_then(|id| store.user_by_id(*id))
        .cloned()
        .map(Json)
        .ok_or_else(invalid_token)
}

async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ErrorResponse> {
    let token = bearer_token(&headers).ok_or_else(invalid_token)?;

    let mut store = state.db.write().await;
    store
        .tokens
        .remove(token)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(invalid_token)
}

/// Runs before any extractor, so a missing key wins over a bad body.
async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ErrorResponse> {
    let rejection = match request.headers().get("apikey").and_then(|v| v.to_str().ok()) {
        Some(key) if key == &*state.anon_key => None,
        Some(_) => Some("Invalid API key"),
        None => Some("No API key found in request"),
    };
    match rejection {
        None => Ok(next.run(request).await),
        Some(message) => Err(error(
            StatusCode::UNAUTHORIZED,
            json!({ "message": message }),
        )),
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn invalid_token() -> ErrorResponse {
    error(
        StatusCode::UNAUTHORIZED,
        json!({ "message": "invalid JWT: unable to parse or verify signature" }),
    )
}

fn error(status: StatusCode, body: Value) -> ErrorResponse {
    (status, Json(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_serializes_expected_fields() {
        let session = Session {
            access_token: "a".to_string(),
            token_type: "bearer".to_string(),
            expires_in: TOKEN_TTL_SECS,
            refresh_token: "r".to_string(),
            user: User {
                id: Uuid::nil(),
                email: DEMO_EMAIL.to_string(),
                role: "authenticated".to_string(),
                user_metadata: json!({ "name": "Ana" }),
                app_metadata: json!({}),
            },
        };
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["token_type"], "bearer");
        assert_eq!(json["expires_in"], 3600);
        assert_eq!(json["user"]["id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["user"]["user_metadata"]["name"], "Ana");
    }

    #[test]
    fn password_grant_requires_both_fields() {
        let result: Result<PasswordGrant, _> = serde_json::from_str(r#"{"email":"a@b.c"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn bearer_token_strips_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer abc".parse().unwrap());
        assert_eq!(bearer_token(&headers), Some("abc"));

        headers.insert(header::AUTHORIZATION, "Basic abc".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn store_finds_user_by_id() {
        let mut store = Store::default();
        let user = User {
            id: Uuid::new_v4(),
            email: DEMO_EMAIL.to_string(),
            role: "authenticated".to_string(),
            user_metadata: json!({}),
            app_metadata: json!({}),
        };
        let id = user.id;
        store.accounts.insert(
            user.email.clone(),
            Account {
                user,
                password: "pw".to_string(),
            },
        );
        assert!(store.user_by_id(id).is_some());
        assert!(store.user_by_id(Uuid::nil()).is_none());
    }
}
