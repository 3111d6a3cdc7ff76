use crate::{
    auth::auth_dto::{
        InitiatePasswordResetRequest, LoginRequest, MessageResponse, RegisterRequest,
        ResetPasswordRequest, TokenResponse,
    },
    auth::auth_handlers,
    middleware::auth_middleware,
    state::AppState,
    task::task_dto::{CreateTaskRequest, TaskListResponse, UpdateTaskRequest},
    task::task_handlers,
    task::task_models::Task,
};
use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        auth_handlers::register,
        auth_handlers::login,
        auth_handlers::logout,
        auth_handlers::refresh_token,
        auth_handlers::initiate_password_reset,
        auth_handlers::reset_password,
        task_handlers::create_task,
        task_handlers::get_tasks,
        task_handlers::edit_task,
        task_handlers::toggle_task_completion,
        task_handlers::delete_task,
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            InitiatePasswordResetRequest,
            ResetPasswordRequest,
            TokenResponse,
            MessageResponse,
            CreateTaskRequest,
            UpdateTaskRequest,
            TaskListResponse,
            Task,
        )
    ),
    tags(
        (name = "auth", description = "Registration, sessions and password reset"),
        (name = "tasks", description = "Task management endpoints")
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::Http::new(
                        utoipa::openapi::security::HttpAuthScheme::Bearer,
                    ),
                ),
            )
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Auth routes. Logout and refresh read the bearer header themselves;
    // they must work on tokens the task-route guard would reject.
    let auth_routes = Router::new()
        .route("/register", post(auth_handlers::register))
        .route("/login", post(auth_handlers::login))
        .route("/logout", post(auth_handlers::logout))
        .route("/refresh-token", post(auth_handlers::refresh_token))
        .route(
            "/initiate-password-reset",
            post(auth_handlers::initiate_password_reset),
        )
        .route("/reset-password", post(auth_handlers::reset_password));

    // Task routes sit behind the signature + registry liveness guard.
    let task_routes = Router::new()
        .route(
            "/tasks",
            get(task_handlers::get_tasks).post(task_handlers::create_task),
        )
        .route(
            "/tasks/:id",
            put(task_handlers::edit_task).delete(task_handlers::delete_task),
        )
        .route("/tasks/:id/done", put(task_handlers::toggle_task_completion))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let api_routes = Router::new().merge(auth_routes).merge(task_routes);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
