use actix_web::web;

use crate::auth::handlers::{refresh_token, sign_in, sign_up};
use crate::auth::AuthGate;
use crate::handlers::{self, boats, expenses, logs, tasks, users};
use crate::health_check;

/// Registers every route. Shared by the server binary and the integration
/// tests so both see the same table.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(handlers::path_config())
        .app_data(handlers::json_config())
        .route("/", web::get().to(health_check))
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/users")
                .route("", web::get().to(users::list_users))
                .route("", web::post().to(sign_up))
                .route("/sign-in", web::post().to(sign_in))
                .route("/token", web::post().to(refresh_token))
                .route("/{id}", web::get().to(users::get_user))
                .route("/{id}", web::put().to(users::update_user))
                .route("/{id}", web::delete().to(users::delete_user)),
        )
        .service(
            web::scope("/boat")
                .wrap(AuthGate)
                .route("", web::get().to(boats::list_boats))
                .route("", web::post().to(boats::create_boat))
                .route("/{id}", web::get().to(boats::get_boat))
                .route("/{id}", web::put().to(boats::update_boat))
                .route("/{id}", web::delete().to(boats::delete_boat)),
        )
        .service(
            web::scope("/logs")
                .wrap(AuthGate)
                .route("", web::get().to(logs::list_logs))
                .route("/boat/{boat_id}", web::get().to(logs::list_logs_by_boat))
                // Must precede the `/{boat_id}` POST below.
                .route("/coordinates", web::post().to(logs::add_coordinates))
                .route("/{boat_id}", web::post().to(logs::create_log))
                .route("/{id}", web::get().to(logs::get_log))
                .route("/{id}", web::put().to(logs::update_log))
                .route("/{id}", web::delete().to(logs::delete_log)),
        )
        .service(
            web::scope("/tasks")
                .wrap(AuthGate)
                .route("", web::get().to(tasks::list_tasks))
                .route("/boat/{boat_id}/tasks", web::get().to(tasks::list_tasks_by_boat))
                .route("/{boat_id}", web::post().to(tasks::create_task))
                .route("/{id}", web::get().to(tasks::get_task))
                .route("/{id}", web::put().to(tasks::update_task))
                .route("/{id}", web::delete().to(tasks::delete_task)),
        )
        .service(
            web::scope("/expenses")
                .wrap(AuthGate)
                .route("", web::get().to(expenses::list_expenses))
                .route(
                    "/boat/{boat_id}/expenses",
                    web::get().to(expenses::list_expenses_by_boat),
                )
                .route("/{boat_id}", web::post().to(expenses::create_expense))
                .route("/{id}", web::get().to(expenses::get_expense))
                .route("/{id}", web::put().to(expenses::update_expense))
                .route("/{id}", web::delete().to(expenses::delete_expense)),
        );
}
