//! Router configuration for the API.
//!
//! Middleware is applied in reverse order of declaration (last added runs first):
//! request id, then logging, then error normalisation, then the timeout.

use std::time::Duration;

use axum::{
    Router,
    http::{Method, StatusCode, header},
    middleware,
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{
    auth_middleware, global_error_handler, logging_middleware, request_id_middleware,
};
use crate::state::AppState;

pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";
pub const SWAGGER_UI_PATH: &str = "/swagger-ui";

/// Builds the full application router.
///
/// # Routes
/// - `/api/auth/*` public sign-up and login
/// - `/api/users/*` bearer token required
/// - `/api/health*` public probes
/// - `/swagger-ui` interactive documentation
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    let (public, mut openapi) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api/auth", handlers::auth::auth_routes())
        .nest("/api", handlers::health::health_routes())
        .split_for_parts();

    let (protected, protected_doc) = OpenApiRouter::new()
        .nest("/api/users", handlers::users::user_routes())
        .split_for_parts();
    openapi.merge(protected_doc);
    let protected = protected.route_layer(middleware::from_fn_with_state(
        state.clone(),
        auth_middleware,
    ));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    Router::new()
        .merge(public)
        .merge(protected)
        .merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, openapi))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(middleware::from_fn(global_error_handler))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::Request;
    use axum::response::Response;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Settings;
    use crate::db::lazy_connection_pool;
    use crate::models::Role;
    use crate::repositories::{InMemoryUserStore, Repositories};
    use crate::services::RegisterUser;

    struct TestApp {
        router: Router,
        state: AppState,
        store: Arc<InMemoryUserStore>,
    }

    fn test_settings() -> Settings {
        let mut settings = Settings::default();
        settings.database.url = "postgres://nobody@127.0.0.1:1/none".to_string();
        settings.database.connection_timeout = 1;
        settings.jwt.secret = "router-test-secret-with-32-characters!".to_string();
        settings.password.cost = 4;
        settings
    }

    fn test_app() -> TestApp {
        let settings = test_settings();
        let store = Arc::new(InMemoryUserStore::new());
        let repos = Repositories::with_user_store(store.clone());
        let state = AppState::from_parts(repos, lazy_connection_pool(&settings.database), &settings);
        TestApp {
            router: create_router(state.clone(), Duration::from_secs(5)),
            state,
            store,
        }
    }

    fn registration(email: &str, first_name: &str, role: Option<Role>) -> RegisterUser {
        RegisterUser {
            email: email.to_string(),
            password: "segredo123".to_string(),
            first_name: first_name.to_string(),
            last_name: "Silva".to_string(),
            avatar_url: None,
            phone: None,
            role,
            manager_id: None,
        }
    }

    impl TestApp {
        async fn send(&self, request: Request<Body>) -> Response {
            self.router.clone().oneshot(request).await.unwrap()
        }

        async fn seed(&self, email: &str, role: Role) -> (i32, String) {
            let users = &self.state.services.users;
            let user = users
                .register_one_user_auth(registration(email, "Seed", Some(role)))
                .await
                .unwrap();
            let login = users.login(email, "segredo123").await.unwrap();
            (user.id, login.token)
        }
    }

    fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn sign_up_body(email: &str) -> Value {
        json!({
            "email": email,
            "password": "segredo123",
            "first_name": "Ana",
            "last_name": "Souza",
            "role": "Admin"
        })
    }

    #[tokio::test]
    async fn test_register_creates_plain_user_and_rejects_duplicates() {
        let app = test_app();

        let response = app
            .send(json_request(Method::POST, "/api/auth/register", None, sign_up_body("ana@example.com")))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert!(response.headers().contains_key("x-request-id"));
        let body = body_json(response).await;
        assert_eq!(body["email"], "ana@example.com");
        assert_eq!(body["role"], "User");
        assert!(body.get("password").is_none());

        let response = app
            .send(json_request(Method::POST, "/api/auth/register", None, sign_up_body("ana@example.com")))
            .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Este email já está sendo usado!");
        assert_eq!(body["statusCode"], 422);
        assert_eq!(app.store.len(), 1);
    }

    #[tokio::test]
    async fn test_register_validates_body() {
        let app = test_app();
        let response = app
            .send(json_request(Method::POST, "/api/auth/register", None, json!({
                "email": "nope",
                "password": "123",
                "first_name": "Ana",
                "last_name": "Souza"
            })))
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["details"].as_array().unwrap().len(), 2);
        assert!(app.store.is_empty());
    }

    #[tokio::test]
    async fn test_register_with_unknown_manager_is_client_error() {
        let app = test_app();
        let response = app
            .send(json_request(Method::POST, "/api/auth/register", None, json!({
                "email": "lia@example.com",
                "password": "segredo123",
                "first_name": "Lia",
                "last_name": "Souza",
                "manager_id": 999
            })))
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["details"][0]["field"], "manager_id");
        assert!(app.store.is_empty());
    }

    #[tokio::test]
    async fn test_login_outcomes() {
        let app = test_app();
        app.seed("bia@example.com", Role::User).await;

        let response = app
            .send(json_request(Method::POST, "/api/auth/login", None, json!({
                "email": "bia@example.com",
                "password": "segredo123"
            })))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["payload"]["email"], "bia@example.com");
        assert!(app.state.tokens.verify(body["token"].as_str().unwrap()).is_ok());

        let response = app
            .send(json_request(Method::POST, "/api/auth/login", None, json!({
                "email": "bia@example.com",
                "password": "errada"
            })))
            .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["message"], "Senha ou email incorretos!");

        let response = app
            .send(json_request(Method::POST, "/api/auth/login", None, json!({
                "email": "ghost@example.com",
                "password": "segredo123"
            })))
            .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(response).await["message"], "Cadastre-se para fazer login!");
    }

    #[tokio::test]
    async fn test_user_routes_require_token() {
        let app = test_app();

        let response = app.send(get_request("/api/users", None)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["statusCode"], 401);

        let response = app.send(get_request("/api/users", Some("garbage"))).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_privileged_creation_requires_admin() {
        let app = test_app();
        let (_, user_token) = app.seed("user@example.com", Role::User).await;
        let (_, admin_token) = app.seed("admin@example.com", Role::Admin).await;

        let mut body = sign_up_body("manager@example.com");
        body["role"] = json!("Manager");

        let response = app
            .send(json_request(Method::POST, "/api/users", Some(&user_token), body.clone()))
            .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = app
            .send(json_request(Method::POST, "/api/users", Some(&admin_token), body))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_json(response).await["role"], "Manager");
    }

    #[tokio::test]
    async fn test_listing_pages_and_out_of_range() {
        let app = test_app();
        let (_, token) = app.seed("reader@example.com", Role::User).await;
        for i in 0..24 {
            app.state
                .services
                .users
                .register_one_user(registration(&format!("u{i}@example.com"), "Member", None))
                .await
                .unwrap();
        }

        let response = app
            .send(get_request("/api/users?page=3&per_page=10", Some(&token)))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["count"], 25);
        assert_eq!(body["pages"], 3);
        assert_eq!(body["users"].as_array().unwrap().len(), 5);

        let response = app
            .send(get_request("/api/users?page=4&per_page=10", Some(&token)))
            .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let message = body_json(response).await["message"].as_str().unwrap().to_string();
        assert!(message.contains('4') && message.contains('3'));

        let response = app
            .send(get_request("/api/users?page=9223372036854775807&per_page=10", Some(&token)))
            .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["code"], "PAGE_OUT_OF_RANGE");
        assert_eq!(
            body["message"],
            "Não existe a página 9223372036854775807 de um total de 3 páginas!"
        );

        let response = app
            .send(get_request("/api/users?first_name=Seed", Some(&token)))
            .await;
        assert_eq!(body_json(response).await["count"], 1);

        let response = app
            .send(get_request("/api/users?per_page=0", Some(&token)))
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_user_by_id() {
        let app = test_app();
        let (id, token) = app.seed("carla@example.com", Role::Manager).await;

        let response = app.send(get_request(&format!("/api/users/{id}"), Some(&token))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["role"], "Manager");
        assert!(body.get("email").is_none());

        let response = app.send(get_request("/api/users/999", Some(&token))).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body_json(response).await["message"],
            "Não foi possível encontrar esse usuário!"
        );

        let response = app.send(get_request("/api/users/abc", Some(&token))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["statusCode"], 400);
    }

    #[tokio::test]
    async fn test_update_permissions() {
        let app = test_app();
        let (own_id, own_token) = app.seed("dani@example.com", Role::User).await;
        let (other_id, _) = app.seed("edu@example.com", Role::User).await;
        let (_, admin_token) = app.seed("root@example.com", Role::Admin).await;
        let changes = json!({ "first_name": "Daniela", "email": "hijack@example.com" });

        let response = app
            .send(json_request(Method::PUT, &format!("/api/users/{own_id}"), Some(&own_token), changes.clone()))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await["message"],
            "Informações atualizadas com sucesso!"
        );
        let stored = app.store.get(own_id).unwrap();
        assert_eq!(stored.first_name, "Daniela");
        assert_eq!(stored.email, "dani@example.com");

        let response = app
            .send(json_request(Method::PUT, &format!("/api/users/{other_id}"), Some(&own_token), changes.clone()))
            .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = app
            .send(json_request(Method::PUT, "/api/users/999", Some(&admin_token), changes))
            .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_probes_and_docs() {
        let app = test_app();

        let response = app.send(get_request("/api/health/live", None)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.send(get_request("/api/health/ready", None)).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = app.send(get_request(OPENAPI_JSON_PATH, None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let doc = body_json(response).await;
        assert!(doc["paths"].get("/api/auth/login").is_some());
        assert!(doc["components"]["securitySchemes"].get("bearerAuth").is_some());
    }

    #[tokio::test]
    async fn test_unknown_route_returns_error_body() {
        let app = test_app();
        let response = app.send(get_request("/nowhere", None)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["code"], "NOT_FOUND");
    }
}
