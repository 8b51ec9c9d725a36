use actix_web::{web, HttpResponse, Responder};
use mongodb::bson::{doc, oid::ObjectId, DateTime};
use mongodb::Client;
use rust_decimal::prelude::ToPrimitive;
use std::sync::Arc;

use crate::db::repository;
use crate::errors::ApiError;
use crate::models::service::{Service, ServiceInput};

fn validate_service_input(input: &ServiceInput) -> Result<(), ApiError> {
    if input.name.trim().is_empty() {
        return Err(ApiError::Validation("service name is required".to_string()));
    }
    if input.price.is_sign_negative() {
        return Err(ApiError::Validation(
            "service price must not be negative".to_string(),
        ));
    }
    Ok(())
}

pub async fn get_all_services(data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let repo = repository::services(&client);

    // Admins see inactive services too
    match repo.list(doc! {}, doc! { "created_at": 1 }).await {
        Ok(services) => HttpResponse::Ok().json(services),
        Err(err) => {
            eprintln!("Failed to list services: {}", err);
            err.to_response()
        }
    }
}

pub async fn create_service(
    data: web::Data<Arc<Client>>,
    input: web::Json<ServiceInput>,
) -> impl Responder {
    let client = data.into_inner();
    let input = input.into_inner();

    if let Err(err) = validate_service_input(&input) {
        return err.to_response();
    }

    let mut service = Service {
        id: None,
        name: input.name,
        description: input.description,
        price: input.price,
        category: input.category,
        image_url: input.image_url,
        is_active: input.is_active,
        created_at: Some(DateTime::now()),
    };

    match repository::services(&client).insert(&service).await {
        Ok(id) => {
            service.id = Some(id);
            HttpResponse::Ok().json(service)
        }
        Err(err) => {
            eprintln!("Failed to create service: {}", err);
            err.to_response()
        }
    }
}

pub async fn update_service(
    data: web::Data<Arc<Client>>,
    path: web::Path<String>,
    input: web::Json<ServiceInput>,
) -> impl Responder {
    let client = data.into_inner();
    let service_id = path.into_inner();
    let input = input.into_inner();

    let service_object_id = match ObjectId::parse_str(&service_id) {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::BadRequest().body("Invalid service ID format");
        }
    };

    if let Err(err) = validate_service_input(&input) {
        return err.to_response();
    }

    // Prices are stored as doubles
    let price = match input.price.to_f64() {
        Some(price) => price,
        None => {
            eprintln!("Price out of range: {}", input.price);
            return HttpResponse::InternalServerError().body("Failed to update service");
        }
    };

    let fields = doc! {
        "name": input.name,
        "description": input.description,
        "price": price,
        "category": input.category.as_str(),
        "image_url": input.image_url,
        "is_active": input.is_active,
    };

    let repo = repository::services(&client);
    match repo.update_fields(&service_object_id, fields).await {
        Ok(()) => match repo.find_by_id(&service_object_id).await {
            Ok(service) => HttpResponse::Ok().json(service),
            Err(err) => err.to_response(),
        },
        Err(err) => err.to_response(),
    }
}

pub async fn delete_service(
    data: web::Data<Arc<Client>>,
    path: web::Path<String>,
) -> impl Responder {
    let client = data.into_inner();
    let service_id = path.into_inner();

    let service_object_id = match ObjectId::parse_str(&service_id) {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::BadRequest().body("Invalid service ID format");
        }
    };

    match repository::services(&client)
        .delete(&service_object_id)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "deleted": true })),
        Err(err) => err.to_response(),
    }
}
