use crate::{
    auth::AuthenticatedUserId,
    db::TaskRepository,
    error::AppError,
    models::{CreateTaskRequest, UpdateTaskRequest},
    state::AppState,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use validator::Validate;

/// Retrieves the authenticated user's tasks.
///
/// Tasks are returned in creation order. A user without tasks gets an empty array.
///
/// ## Responses:
/// - `200 OK`: Returns a JSON array of `Task` objects.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
#[get("")]
pub async fn get_tasks(
    state: web::Data<AppState>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let tasks = TaskRepository::for_owner(&state.db, user.0).list().await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task owned by the authenticated user.
///
/// ## Request Body:
/// - `title`: required, 1 to 200 characters.
/// - `description` (optional): up to 1000 characters, defaults to an empty string.
/// - `completed` (optional): defaults to `false`.
///
/// ## Responses:
/// - `201 Created`: Returns the newly created `Task` object as JSON.
/// - `400 Bad Request`: Missing or invalid fields.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
#[post("")]
pub async fn create_task(
    state: web::Data<AppState>,
    user: AuthenticatedUserId,
    task_data: web::Json<CreateTaskRequest>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = TaskRepository::for_owner(&state.db, user.0)
        .create(task_data.into_inner())
        .await?;
    log::debug!("User {} created task {}", user.0, task.id);

    Ok(HttpResponse::Created().json(task))
}

/// Retrieves a specific task by its ID.
///
/// ## Responses:
/// - `200 OK`: Returns the `Task` object as JSON.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: The task does not exist or is owned by another user.
#[get("/{id}")]
pub async fn get_task(
    state: web::Data<AppState>,
    user: AuthenticatedUserId,
    task_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let task = TaskRepository::for_owner(&state.db, user.0)
        .get(task_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Partially updates a task.
///
/// Only the fields present in the body are changed.
///
/// ## Responses:
/// - `200 OK`: Returns the updated `Task` object as JSON.
/// - `400 Bad Request`: Invalid fields.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: The task does not exist or is owned by another user.
#[put("/{id}")]
pub async fn update_task(
    state: web::Data<AppState>,
    user: AuthenticatedUserId,
    task_id: web::Path<i64>,
    task_data: web::Json<UpdateTaskRequest>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = TaskRepository::for_owner(&state.db, user.0)
        .update(task_id.into_inner(), task_data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task by its ID.
///
/// ## Responses:
/// - `204 No Content`: On successful deletion.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: The task does not exist or is owned by another user.
#[delete("/{id}")]
pub async fn delete_task(
    state: web::Data<AppState>,
    user: AuthenticatedUserId,
    task_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let task_id = task_id.into_inner();
    TaskRepository::for_owner(&state.db, user.0)
        .delete(task_id)
        .await?;
    log::debug!("User {} deleted task {}", user.0, task_id);

    Ok(HttpResponse::NoContent().finish())
}
