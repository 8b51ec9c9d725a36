use actix_web::{web, HttpResponse, Responder};
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::Client;
use std::sync::Arc;

use crate::db::repository;
use crate::middleware::auth_context::AuthenticatedAdmin;
use crate::models::booking::StatusUpdateInput;
use crate::services::booking_lifecycle::BookingLifecycle;

/*
    /api/admin/bookings
*/

pub async fn get_all_bookings(data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let repo = repository::bookings(&client);

    // Newest requests first for the dashboard
    match repo.list(doc! {}, doc! { "created_at": -1 }).await {
        Ok(bookings) => HttpResponse::Ok().json(bookings),
        Err(err) => {
            eprintln!("Failed to list bookings: {}", err);
            err.to_response()
        }
    }
}

pub async fn get_booking_by_id(
    data: web::Data<Arc<Client>>,
    path: web::Path<String>,
) -> impl Responder {
    let client = data.into_inner();
    let booking_id = path.into_inner();

    let booking_object_id = match ObjectId::parse_str(&booking_id) {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::BadRequest().body("Invalid booking ID format");
        }
    };

    match repository::bookings(&client)
        .find_by_id(&booking_object_id)
        .await
    {
        Ok(booking) => HttpResponse::Ok().json(booking),
        Err(err) => err.to_response(),
    }
}

pub async fn update_booking_status(
    data: web::Data<Arc<Client>>,
    path: web::Path<String>,
    input: web::Json<StatusUpdateInput>,
    admin: AuthenticatedAdmin,
) -> impl Responder {
    let client = data.into_inner();
    let booking_id = path.into_inner();
    let input = input.into_inner();

    let booking_object_id = match ObjectId::parse_str(&booking_id) {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::BadRequest().body("Invalid booking ID format");
        }
    };

    let repo = repository::bookings(&client);

    match BookingLifecycle::transition(
        &repo,
        &booking_object_id,
        input.expected_status,
        input.status,
    )
    .await
    {
        Ok(booking) => {
            println!(
                "Booking {} moved to {} by {}",
                booking.reference,
                booking.status.as_str(),
                admin.email
            );
            HttpResponse::Ok().json(booking)
        }
        Err(err) => err.to_response(),
    }
}

pub async fn delete_booking(
    data: web::Data<Arc<Client>>,
    path: web::Path<String>,
    admin: AuthenticatedAdmin,
) -> impl Responder {
    let client = data.into_inner();
    let booking_id = path.into_inner();

    let booking_object_id = match ObjectId::parse_str(&booking_id) {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::BadRequest().body("Invalid booking ID format");
        }
    };

    match repository::bookings(&client)
        .delete(&booking_object_id)
        .await
    {
        Ok(()) => {
            println!("Booking {} deleted by {}", booking_id, admin.email);
            HttpResponse::Ok().json(serde_json::json!({ "deleted": true }))
        }
        Err(err) => err.to_response(),
    }
}
