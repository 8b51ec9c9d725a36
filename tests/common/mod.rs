use actix_web::{web, App, HttpResponse, Responder};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use mongodb::bson::oid::ObjectId;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use jozi_tours_api::errors::ApiError;
use jozi_tours_api::middleware::auth::{AuthMiddleware, Claims};
use jozi_tours_api::middleware::role_auth::RequireAdmin;
use jozi_tours_api::models::booking::{BookingInput, BookingType, StatusUpdateInput};
use jozi_tours_api::models::package::Package;
use jozi_tours_api::models::service::{Service, ServiceCategory};
use jozi_tours_api::services::booking_lifecycle::BookingLifecycle;
use jozi_tours_api::services::pricing_service::PricingService;

pub const CITY_TOUR_ID: &str = "65a000000000000000000001";
pub const GUESTHOUSE_ID: &str = "65a000000000000000000002";
pub const TRANSFER_ID: &str = "65a000000000000000000003";
pub const PACKAGE_ID: &str = "65a000000000000000000010";
pub const KNOWN_BOOKING_ID: &str = "65a000000000000000000020";

pub fn sample_services() -> Vec<Service> {
    vec![
        sample_service(CITY_TOUR_ID, "City Tour", 200, ServiceCategory::Attraction),
        sample_service(GUESTHOUSE_ID, "Guesthouse Room", 500, ServiceCategory::Lodging),
        sample_service(TRANSFER_ID, "Airport Transfer", 450, ServiceCategory::Transport),
    ]
}

fn sample_service(id: &str, name: &str, price: i64, category: ServiceCategory) -> Service {
    Service {
        id: Some(ObjectId::parse_str(id).unwrap()),
        name: name.to_string(),
        description: format!("{} description", name),
        price: Decimal::from(price),
        category,
        image_url: None,
        is_active: true,
        created_at: None,
    }
}

pub fn sample_package() -> Package {
    Package {
        id: Some(ObjectId::parse_str(PACKAGE_ID).unwrap()),
        name: "Complete Johannesburg Experience".to_string(),
        description: "3-day immersive cultural journey".to_string(),
        duration_days: 3,
        price: Decimal::from(4500),
        inclusions: vec![
            "2 nights accommodation".to_string(),
            "Airport transfers".to_string(),
            "Museum tours".to_string(),
        ],
        service_ids: vec![],
        image_url: None,
        is_active: true,
        created_at: None,
    }
}

/// Token accepted by the real auth stack: signed with the same secret the
/// middleware resolves and carrying the admin role.
pub fn admin_token() -> String {
    bearer_token(Some("admin".to_string()))
}

pub fn non_admin_token() -> String {
    bearer_token(None)
}

fn bearer_token(role: Option<String>) -> String {
    let now = Utc::now();
    let claims = Claims {
        sub: "admin@jozitours.co.za".to_string(),
        iat: now.timestamp() as usize,
        exp: (now + Duration::hours(1)).timestamp() as usize,
        admin_id: ObjectId::new().to_hex(),
        role,
    };

    // Same env-or-default lookup the middleware does
    let key = std::env::var("JWT_SECRET").unwrap_or_else(|_| "default_secret".to_string());

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(key.as_bytes()),
    )
    .unwrap();

    format!("Bearer {}", token)
}

pub struct TestApp;

impl TestApp {
    /// An app with the real auth middleware, pricing engine and lifecycle
    /// rules wired to in-memory catalog data, so the HTTP surface can be
    /// exercised without a database.
    pub fn create_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .route("/health", web::get().to(health_check))
            .service(
                web::scope("/api")
                    .route("/services", web::get().to(get_services))
                    .route("/packages", web::get().to(get_packages))
                    .route("/bookings", web::post().to(create_booking))
                    .service(
                        web::scope("/admin")
                            .wrap(RequireAdmin)
                            .wrap(AuthMiddleware)
                            .route("/bookings", web::get().to(get_all_bookings))
                            .route("/bookings/{id}/status", web::put().to(update_booking_status))
                            .route("/bookings/{id}", web::delete().to(delete_booking)),
                    ),
            )
    }
}

async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({"status": "OK"}))
}

async fn get_services() -> impl Responder {
    HttpResponse::Ok().json(sample_services())
}

async fn get_packages() -> impl Responder {
    HttpResponse::Ok().json(vec![sample_package()])
}

async fn create_booking(input: web::Json<BookingInput>) -> impl Responder {
    let input = input.into_inner();
    let catalog = sample_services();

    let (package, services) = match input.booking_type {
        BookingType::Package => {
            let package = match input.package_id.as_deref() {
                Some(PACKAGE_ID) => Some(sample_package()),
                Some(_) => return ApiError::NotFound("Package").to_response(),
                None => None,
            };
            (package, vec![])
        }
        BookingType::Flexible => {
            let ids = input.service_ids.clone().unwrap_or_default();
            let mut services = Vec::new();
            for raw in &ids {
                match catalog
                    .iter()
                    .find(|s| s.id.map(|id| id.to_hex()).as_deref() == Some(raw.as_str()))
                {
                    Some(service) => services.push(service.clone()),
                    None => return ApiError::NotFound("Service").to_response(),
                }
            }
            (None, services)
        }
    };

    match PricingService::compute_total(
        input.booking_type,
        input.number_of_guests,
        package.as_ref(),
        &services,
        Some(input.check_in_date),
        Some(input.check_out_date),
    ) {
        Ok(total) => HttpResponse::Ok().json(serde_json::json!({
            "status": "pending",
            "total_price": total.to_f64(),
        })),
        Err(err) => err.to_response(),
    }
}

async fn get_all_bookings() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!([]))
}

async fn update_booking_status(
    _path: web::Path<String>,
    input: web::Json<StatusUpdateInput>,
) -> impl Responder {
    let input = input.into_inner();

    match BookingLifecycle::ensure_allowed(input.expected_status, input.status) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "status": input.status,
        })),
        Err(err) => err.to_response(),
    }
}

async fn delete_booking(path: web::Path<String>) -> impl Responder {
    if path.into_inner() == KNOWN_BOOKING_ID {
        HttpResponse::Ok().json(serde_json::json!({ "deleted": true }))
    } else {
        ApiError::NotFound("Booking").to_response()
    }
}
