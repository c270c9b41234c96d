//! Task handlers, mounted under `/api/v1/{user_id}/tasks`.
//!
//! Every handler follows the same strict ordering: authorize the path owner
//! against the token subject, parse identifiers, then hand off to the
//! repository. No repository access of any kind happens before the owner
//! check succeeds.

use crate::{
    auth::{authorize_path_owner, parse_task_id, AuthClaims},
    error::AppError,
    models::{CompletionQuery, MessageResponse, TaskCreate, TaskQuery, TaskResponse, TaskUpdate, TasksResponse},
    repository::TaskRepository,
};
use actix_web::{delete, get, patch, post, put, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

/// List the owner's tasks, optionally filtered.
///
/// ## Query Parameters:
/// - `status` (optional): "completed" or "incomplete".
/// - `priority` (optional): "low", "medium", or "high".
#[get("")]
pub async fn list_tasks(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    query: web::Query<TaskQuery>,
    claims: AuthClaims,
) -> Result<impl Responder, AppError> {
    let owner_id = authorize_path_owner(&claims.0, &path.into_inner())?;

    let repo = TaskRepository::new(pool.get_ref().clone());
    let tasks = repo.list(owner_id, &query).await?;

    Ok(HttpResponse::Ok().json(TasksResponse {
        success: true,
        data: tasks,
    }))
}

/// Create a task for the owner. Defaults: `completed = false`,
/// `priority = medium`, `tags = []`.
#[post("")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    payload: web::Json<TaskCreate>,
    claims: AuthClaims,
) -> Result<impl Responder, AppError> {
    let owner_id = authorize_path_owner(&claims.0, &path.into_inner())?;
    payload.validate()?;

    let repo = TaskRepository::new(pool.get_ref().clone());
    let task = repo.create(owner_id, payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(TaskResponse {
        success: true,
        data: task,
    }))
}

/// Fetch one of the owner's tasks by id.
#[get("/{task_id}")]
pub async fn get_task(
    pool: web::Data<PgPool>,
    path: web::Path<(String, String)>,
    claims: AuthClaims,
) -> Result<impl Responder, AppError> {
    let (user_id, task_id) = path.into_inner();
    let owner_id = authorize_path_owner(&claims.0, &user_id)?;
    let task_id = parse_task_id(&task_id)?;

    let repo = TaskRepository::new(pool.get_ref().clone());

    match repo.get(owner_id, task_id).await? {
        Some(task) => Ok(HttpResponse::Ok().json(TaskResponse {
            success: true,
            data: task,
        })),
        None => Err(AppError::NotFound("Task not found".into())),
    }
}

/// Partially update one of the owner's tasks. Fields absent from the body
/// keep their prior values.
#[put("/{task_id}")]
pub async fn update_task(
    pool: web::Data<PgPool>,
    path: web::Path<(String, String)>,
    payload: web::Json<TaskUpdate>,
    claims: AuthClaims,
) -> Result<impl Responder, AppError> {
    let (user_id, task_id) = path.into_inner();
    let owner_id = authorize_path_owner(&claims.0, &user_id)?;
    let task_id = parse_task_id(&task_id)?;
    payload.validate()?;

    let repo = TaskRepository::new(pool.get_ref().clone());

    match repo.update(owner_id, task_id, &payload).await? {
        Some(task) => Ok(HttpResponse::Ok().json(TaskResponse {
            success: true,
            data: task,
        })),
        None => Err(AppError::NotFound("Task not found".into())),
    }
}

/// Delete one of the owner's tasks.
#[delete("/{task_id}")]
pub async fn delete_task(
    pool: web::Data<PgPool>,
    path: web::Path<(String, String)>,
    claims: AuthClaims,
) -> Result<impl Responder, AppError> {
    let (user_id, task_id) = path.into_inner();
    let owner_id = authorize_path_owner(&claims.0, &user_id)?;
    let task_id = parse_task_id(&task_id)?;

    let repo = TaskRepository::new(pool.get_ref().clone());

    if repo.delete(owner_id, task_id).await? {
        Ok(HttpResponse::Ok().json(MessageResponse {
            success: true,
            message: "Task deleted successfully".to_string(),
        }))
    } else {
        Err(AppError::NotFound("Task not found".into()))
    }
}

/// Set the `completed` flag on one of the owner's tasks.
///
/// The flag comes from the required `completed` query parameter, keeping the
/// common check-off path explicit and separate from generic update.
#[patch("/{task_id}/complete")]
pub async fn toggle_completion(
    pool: web::Data<PgPool>,
    path: web::Path<(String, String)>,
    query: web::Query<CompletionQuery>,
    claims: AuthClaims,
) -> Result<impl Responder, AppError> {
    let (user_id, task_id) = path.into_inner();
    let owner_id = authorize_path_owner(&claims.0, &user_id)?;
    let task_id = parse_task_id(&task_id)?;

    let repo = TaskRepository::new(pool.get_ref().clone());

    match repo.set_completion(owner_id, task_id, query.completed).await? {
        Some(task) => Ok(HttpResponse::Ok().json(TaskResponse {
            success: true,
            data: task,
        })),
        None => Err(AppError::NotFound("Task not found".into())),
    }
}
