pub mod auth;
pub mod health;
pub mod tasks;

use actix_web::web;

/// Registers the API routes under the caller's scope (mounted at `/api/v1`).
///
/// `/auth` is registered before the `/{user_id}/tasks` scope so the literal
/// segment wins the match.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::register)
            .service(auth::login)
            .service(auth::me),
    )
    .service(
        web::scope("/{user_id}/tasks")
            .service(tasks::list_tasks)
            .service(tasks::create_task)
            .service(tasks::get_task)
            .service(tasks::update_task)
            .service(tasks::delete_task)
            .service(tasks::toggle_completion),
    );
}
