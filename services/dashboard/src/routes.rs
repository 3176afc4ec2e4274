//! Dashboard service routes

use auth::{
    AuthResult, models::RegistrationForm, session::REGISTRATION_SUCCESS_MESSAGE,
    validation::validate_registration,
};
use axum::{
    Json, Router,
    extract::{Path, State},
    middleware,
    response::{IntoResponse, Redirect},
    routing::{get, post},
};
use axum_extra::extract::{WithRejection, cookie::CookieJar};
use serde_json::{Value, json};

use crate::{
    actions::{
        projects, tasks,
        users::{self, UsersPanel},
    },
    error::{ActionError, ActionResult},
    forms::{ProjectForm, StatusForm, TaskForm},
    middleware::log_requests,
    models::{ActionResponse, CountResponse, LoginForm, ProjectStats, SessionView, TaskStats},
    state::AppState,
};

/// Create the router for the dashboard service
pub fn create_router(state: AppState) -> Router {
    let actions = Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/logout", post(logout))
        .route("/refresh", post(refresh))
        .route("/session", get(current_session).delete(clear_session))
        .route("/users", get(list_users))
        .route("/users/panel", get(users_panel))
        .route("/projects", get(list_projects).post(create_project))
        .route("/projects/count", get(project_count))
        .route("/projects/stats", get(project_stats))
        .route(
            "/projects/:id",
            get(get_project).put(update_project).delete(delete_project),
        )
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/stats", get(task_stats))
        .route("/tasks/recent", get(recent_tasks))
        .route(
            "/tasks/:id",
            get(get_task)
                .put(update_task)
                .patch(update_task_status)
                .delete(delete_task),
        );

    Router::new()
        .route("/health", get(health_check))
        .nest("/actions", actions)
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "dashboard"
    }))
}

/// Log in and set the session cookies
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(form), _): WithRejection<Json<LoginForm>, ActionError>,
) -> ActionResult<(CookieJar, Json<ActionResponse>)> {
    form.validate()?;

    let session = state.session(jar);
    let response = match session.client.login(&form.email, &form.password).await {
        AuthResult::Ok(logged_in) => ActionResponse::ok().with("user", &logged_in.profile),
        other => ActionResponse::failure(other.error_message().unwrap_or("Login failed")),
    };

    Ok((session.jar(), Json(response)))
}

/// Create an account; the user logs in separately afterwards
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(form), _): WithRejection<Json<RegistrationForm>, ActionError>,
) -> ActionResult<Json<ActionResponse>> {
    validate_registration(&form)?;

    let session = state.session(jar);
    let response = match session.client.register(&form).await {
        AuthResult::Ok(()) => ActionResponse::ok().with_message(REGISTRATION_SUCCESS_MESSAGE),
        other => ActionResponse::failure(other.error_message().unwrap_or("Registration failed")),
    };

    Ok(Json(response))
}

/// Drop the session cookies and send the browser to the login page
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Redirect) {
    let session = state.session(jar);
    let redirect = session.client.logout();

    (session.jar(), Redirect::to(redirect.location))
}

pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<ActionResponse>) {
    let session = state.session(jar);
    let result = session.client.refresh().await;

    // A failed refresh reports no reason and keeps the stored tokens
    let response = ActionResponse {
        success: result.is_ok(),
        ..ActionResponse::ok()
    };
    (session.jar(), Json(response))
}

/// Stored profile, without contacting the backend
pub async fn current_session(State(state): State<AppState>, jar: CookieJar) -> Json<SessionView> {
    let session = state.session(jar);
    Json(SessionView::from(session.client.current_session()))
}

/// Drop the session cookies without redirecting
pub async fn clear_session(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<ActionResponse>) {
    let session = state.session(jar);
    session.client.logout();

    (session.jar(), Json(ActionResponse::ok()))
}

pub async fn list_users(State(state): State<AppState>, jar: CookieJar) -> Json<ActionResponse> {
    let session = state.session(jar);
    Json(users::list(&session.fetcher).await)
}

pub async fn users_panel(State(state): State<AppState>, jar: CookieJar) -> Json<UsersPanel> {
    let session = state.session(jar);
    Json(users::panel(&session.fetcher).await)
}

pub async fn list_projects(State(state): State<AppState>, jar: CookieJar) -> Json<ActionResponse> {
    let session = state.session(jar);
    Json(projects::list(&session.fetcher).await)
}

pub async fn get_project(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Json<ActionResponse> {
    let session = state.session(jar);
    Json(projects::get(&session.fetcher, id).await)
}

pub async fn create_project(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(form), _): WithRejection<Json<ProjectForm>, ActionError>,
) -> ActionResult<Json<ActionResponse>> {
    let payload = form.validate()?;

    let session = state.session(jar);
    Ok(Json(projects::create(&session.fetcher, &payload).await))
}

pub async fn update_project(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
    WithRejection(Json(form), _): WithRejection<Json<ProjectForm>, ActionError>,
) -> ActionResult<Json<ActionResponse>> {
    let payload = form.validate()?;

    let session = state.session(jar);
    Ok(Json(projects::update(&session.fetcher, id, &payload).await))
}

pub async fn delete_project(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Json<ActionResponse> {
    let session = state.session(jar);
    Json(projects::delete(&session.fetcher, id).await)
}

pub async fn project_count(State(state): State<AppState>, jar: CookieJar) -> Json<CountResponse> {
    let session = state.session(jar);
    Json(CountResponse {
        count: projects::count(&session.fetcher).await,
    })
}

pub async fn project_stats(State(state): State<AppState>, jar: CookieJar) -> Json<ProjectStats> {
    let session = state.session(jar);
    Json(projects::stats(&session.fetcher).await)
}

pub async fn list_tasks(State(state): State<AppState>, jar: CookieJar) -> Json<ActionResponse> {
    let session = state.session(jar);
    Json(tasks::list(&session.fetcher).await)
}

pub async fn get_task(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Json<ActionResponse> {
    let session = state.session(jar);
    Json(tasks::get(&session.fetcher, id).await)
}

pub async fn create_task(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(form), _): WithRejection<Json<TaskForm>, ActionError>,
) -> ActionResult<Json<ActionResponse>> {
    let payload = form.validate()?;

    let session = state.session(jar);
    Ok(Json(tasks::create(&session.fetcher, &payload).await))
}

pub async fn update_task(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
    WithRejection(Json(form), _): WithRejection<Json<TaskForm>, ActionError>,
) -> ActionResult<Json<ActionResponse>> {
    let payload = form.validate()?;

    let session = state.session(jar);
    Ok(Json(tasks::update(&session.fetcher, id, &payload).await))
}

pub async fn update_task_status(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
    WithRejection(Json(form), _): WithRejection<Json<StatusForm>, ActionError>,
) -> ActionResult<Json<ActionResponse>> {
    let status = form.validate()?;

    let session = state.session(jar);
    Ok(Json(tasks::update_status(&session.fetcher, id, status).await))
}

pub async fn delete_task(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Json<ActionResponse> {
    let session = state.session(jar);
    Json(tasks::delete(&session.fetcher, id).await)
}

pub async fn task_stats(State(state): State<AppState>, jar: CookieJar) -> Json<TaskStats> {
    let session = state.session(jar);
    Json(tasks::stats(&session.fetcher).await)
}

pub async fn recent_tasks(State(state): State<AppState>, jar: CookieJar) -> Json<Vec<Value>> {
    let session = state.session(jar);
    Json(tasks::recent(&session.fetcher).await)
}
