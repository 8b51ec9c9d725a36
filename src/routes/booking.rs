use actix_web::{web, HttpResponse, Responder};
use bson::{doc, oid::ObjectId, DateTime};
use mongodb::Client;
use rand::{distributions::Alphanumeric, Rng};
use std::sync::Arc;

use crate::db::repository;
use crate::errors::ApiError;
use crate::models::booking::{Booking, BookingInput, BookingStatus, BookingType};
use crate::models::package::Package;
use crate::models::service::Service;
use crate::routes::auth::is_valid_email;
use crate::services::email_service::EmailService;
use crate::services::pricing_service::PricingService;

fn generate_reference() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(char::from)
        .collect::<String>()
        .to_uppercase()
}

/// Resolve the customer's selection against the active catalog. Returns the
/// resolved package or services together with the ids to store on the
/// booking record. Flexible-mode services keep the selection order so the
/// pricing engine sees lodging candidates the way the customer picked them.
async fn resolve_selection(
    client: &Client,
    input: &BookingInput,
) -> Result<
    (
        Option<Package>,
        Vec<Service>,
        Option<ObjectId>,
        Option<Vec<ObjectId>>,
    ),
    ApiError,
> {
    match input.booking_type {
        BookingType::Package => {
            let raw_id = input
                .package_id
                .as_deref()
                .ok_or_else(|| ApiError::Validation("no package selected".to_string()))?;
            let package_id = ObjectId::parse_str(raw_id)
                .map_err(|_| ApiError::Validation("invalid package id".to_string()))?;

            let package = repository::packages(client)
                .find_one(doc! { "_id": package_id, "is_active": true })
                .await?
                .ok_or(ApiError::NotFound("Package"))?;

            Ok((Some(package), vec![], Some(package_id), None))
        }
        BookingType::Flexible => {
            let raw_ids = input.service_ids.clone().unwrap_or_default();
            if raw_ids.is_empty() {
                return Err(ApiError::Validation("no services selected".to_string()));
            }

            let mut service_ids = Vec::with_capacity(raw_ids.len());
            for raw in &raw_ids {
                let id = ObjectId::parse_str(raw)
                    .map_err(|_| ApiError::Validation("invalid service id".to_string()))?;
                service_ids.push(id);
            }

            let found = repository::services(client)
                .list(
                    doc! { "_id": { "$in": service_ids.clone() }, "is_active": true },
                    doc! { "created_at": 1 },
                )
                .await?;

            // Re-order the fetched services to match the selection order
            let mut services = Vec::with_capacity(service_ids.len());
            for id in &service_ids {
                match found.iter().find(|s| s.id.as_ref() == Some(id)) {
                    Some(service) => services.push(service.clone()),
                    None => return Err(ApiError::NotFound("Service")),
                }
            }

            Ok((None, services, None, Some(service_ids)))
        }
    }
}

pub async fn create_booking(
    data: web::Data<Arc<Client>>,
    input: web::Json<BookingInput>,
) -> impl Responder {
    let client = data.into_inner();
    let input = input.into_inner();

    if input.customer_name.trim().is_empty() {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "Customer name is required" }));
    }
    if !is_valid_email(&input.customer_email) {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "Invalid email address" }));
    }

    let (package, services, package_id, service_ids) =
        match resolve_selection(&client, &input).await {
            Ok(resolved) => resolved,
            Err(err) => return err.to_response(),
        };

    let total_price = match PricingService::compute_total(
        input.booking_type,
        input.number_of_guests,
        package.as_ref(),
        &services,
        Some(input.check_in_date),
        Some(input.check_out_date),
    ) {
        Ok(total) => total,
        Err(err) => return err.to_response(),
    };

    let now = DateTime::now();
    let mut booking = Booking {
        id: None,
        reference: generate_reference(),
        booking_type: input.booking_type,
        package_id,
        service_ids,
        customer_name: input.customer_name,
        customer_email: input.customer_email,
        customer_phone: input.customer_phone,
        number_of_guests: input.number_of_guests,
        check_in_date: input.check_in_date,
        check_out_date: input.check_out_date,
        total_price,
        status: BookingStatus::Pending,
        special_requests: input
            .special_requests
            .filter(|text| !text.trim().is_empty()),
        created_at: Some(now),
        updated_at: Some(now),
    };

    match repository::bookings(&client).insert(&booking).await {
        Ok(id) => {
            booking.id = Some(id);

            // Best-effort notifications: never block or fail the booking
            let email_booking = booking.clone();
            tokio::spawn(async move {
                match EmailService::new() {
                    Ok(mailer) => {
                        if let Err(err) = mailer.send_booking_emails(&email_booking).await {
                            eprintln!("Failed to send booking emails: {}", err);
                        }
                    }
                    Err(err) => println!("Email notifications disabled: {}", err),
                }
            });

            HttpResponse::Ok().json(booking)
        }
        Err(err) => {
            eprintln!("Failed to create booking: {}", err);
            err.to_response()
        }
    }
}
