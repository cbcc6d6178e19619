use crate::errors::AppError;
use crate::models::{AssignmentRequest, CentreStat, ChoiceRequest, PortalView, SearchRequest};
use crate::state::AppState;
use crate::ui::{render_card, render_index};
use axum::{
    extract::State,
    response::{Html, Redirect},
    Form, Json,
};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let view = state.view().await;
    Html(render_index(&view))
}

pub async fn card(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let portal = state.portal.lock().await;
    let card = portal
        .selection()
        .and_then(|editor| editor.card())
        .ok_or_else(|| AppError::not_found("No teacher with an assigned centre is selected."))?;
    Ok(Html(render_card(&card)))
}

pub async fn get_state(State(state): State<AppState>) -> Json<PortalView> {
    Json(state.view().await)
}

pub async fn get_dashboard(State(state): State<AppState>) -> Json<Vec<CentreStat>> {
    Json(state.view().await.dashboard)
}

pub async fn search(
    State(state): State<AppState>,
    Json(payload): Json<SearchRequest>,
) -> Result<Json<PortalView>, AppError> {
    state.search(&payload.hrms_code).await?;
    Ok(Json(state.view().await))
}

pub async fn choose(
    State(state): State<AppState>,
    Json(payload): Json<ChoiceRequest>,
) -> Result<Json<PortalView>, AppError> {
    state.choose(&payload.centre).await?;
    Ok(Json(state.view().await))
}

pub async fn save_selection(
    State(state): State<AppState>,
    Json(payload): Json<ChoiceRequest>,
) -> Result<Json<PortalView>, AppError> {
    state.save_selection(&payload.centre).await?;
    Ok(Json(state.view().await))
}

pub async fn save_assignment(
    State(state): State<AppState>,
    Json(payload): Json<AssignmentRequest>,
) -> Result<Json<PortalView>, AppError> {
    let code = payload.hrms_code.trim();
    if code.is_empty() {
        return Err(AppError::bad_request("hrms_code must not be empty"));
    }

    state.save(code, payload.centre.trim()).await?;
    Ok(Json(state.view().await))
}

pub async fn reload(State(state): State<AppState>) -> Result<Json<PortalView>, AppError> {
    state.reload().await?;
    Ok(Json(state.view().await))
}

pub async fn dismiss(State(state): State<AppState>) -> Json<PortalView> {
    state.dismiss().await;
    Json(state.view().await)
}

pub async fn search_form(
    State(state): State<AppState>,
    Form(payload): Form<SearchRequest>,
) -> Result<Redirect, AppError> {
    state.search(&payload.hrms_code).await?;
    Ok(Redirect::to("/"))
}

pub async fn save_form(
    State(state): State<AppState>,
    Form(payload): Form<ChoiceRequest>,
) -> Result<Redirect, AppError> {
    state.save_selection(&payload.centre).await?;
    Ok(Redirect::to("/"))
}

pub async fn reload_form(State(state): State<AppState>) -> Result<Redirect, AppError> {
    state.reload().await?;
    Ok(Redirect::to("/"))
}

pub async fn dismiss_form(State(state): State<AppState>) -> Redirect {
    state.dismiss().await;
    Redirect::to("/")
}
