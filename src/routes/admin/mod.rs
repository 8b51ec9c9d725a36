use actix_web::web;

use crate::middleware::auth::AuthMiddleware;
use crate::middleware::role_auth::RequireAdmin;

pub mod bookings;
pub mod packages;
pub mod services;

pub fn config(cfg: &mut web::ServiceConfig) {
    // Last-registered wrap runs first: AuthMiddleware decodes the token
    // before RequireAdmin checks the role claim.
    cfg.service(
        web::scope("/admin")
            .wrap(RequireAdmin)
            .wrap(AuthMiddleware)
            .route("/bookings", web::get().to(bookings::get_all_bookings))
            .route("/bookings/{id}", web::get().to(bookings::get_booking_by_id))
            .route(
                "/bookings/{id}/status",
                web::put().to(bookings::update_booking_status),
            )
            .route("/bookings/{id}", web::delete().to(bookings::delete_booking))
            .route("/services", web::get().to(services::get_all_services))
            .route("/services", web::post().to(services::create_service))
            .route("/services/{id}", web::put().to(services::update_service))
            .route("/services/{id}", web::delete().to(services::delete_service))
            .route("/packages", web::get().to(packages::get_all_packages))
            .route("/packages", web::post().to(packages::create_package))
            .route("/packages/{id}", web::put().to(packages::update_package))
            .route("/packages/{id}", web::delete().to(packages::delete_package)),
    );
}
