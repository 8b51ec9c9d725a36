use actix_web::{web, HttpResponse, Responder};
use mongodb::bson::{doc, oid::ObjectId, DateTime};
use mongodb::Client;
use rust_decimal::prelude::ToPrimitive;
use std::sync::Arc;

use crate::db::repository;
use crate::errors::ApiError;
use crate::models::package::{Package, PackageInput};

struct ValidatedPackage {
    inclusions: Vec<String>,
    service_ids: Vec<ObjectId>,
}

/// Trims the inclusion list (blank entries are dropped, the way the
/// dashboard form leaves them behind) and parses the referenced service ids.
fn validate_package_input(input: &PackageInput) -> Result<ValidatedPackage, ApiError> {
    if input.name.trim().is_empty() {
        return Err(ApiError::Validation("package name is required".to_string()));
    }
    if input.price.is_sign_negative() {
        return Err(ApiError::Validation(
            "package price must not be negative".to_string(),
        ));
    }
    if input.duration_days < 1 {
        return Err(ApiError::Validation(
            "package duration must be at least one day".to_string(),
        ));
    }

    let inclusions: Vec<String> = input
        .inclusions
        .iter()
        .map(|inc| inc.trim().to_string())
        .filter(|inc| !inc.is_empty())
        .collect();

    let mut service_ids = Vec::with_capacity(input.service_ids.len());
    for raw in &input.service_ids {
        let id = ObjectId::parse_str(raw)
            .map_err(|_| ApiError::Validation("invalid service id".to_string()))?;
        service_ids.push(id);
    }

    Ok(ValidatedPackage {
        inclusions,
        service_ids,
    })
}

pub async fn get_all_packages(data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let repo = repository::packages(&client);

    match repo.list(doc! {}, doc! { "created_at": 1 }).await {
        Ok(packages) => HttpResponse::Ok().json(packages),
        Err(err) => {
            eprintln!("Failed to list packages: {}", err);
            err.to_response()
        }
    }
}

pub async fn create_package(
    data: web::Data<Arc<Client>>,
    input: web::Json<PackageInput>,
) -> impl Responder {
    let client = data.into_inner();
    let input = input.into_inner();

    let validated = match validate_package_input(&input) {
        Ok(validated) => validated,
        Err(err) => return err.to_response(),
    };

    let mut package = Package {
        id: None,
        name: input.name,
        description: input.description,
        duration_days: input.duration_days,
        price: input.price,
        inclusions: validated.inclusions,
        service_ids: validated.service_ids,
        image_url: input.image_url,
        is_active: input.is_active,
        created_at: Some(DateTime::now()),
    };

    match repository::packages(&client).insert(&package).await {
        Ok(id) => {
            package.id = Some(id);
            HttpResponse::Ok().json(package)
        }
        Err(err) => {
            eprintln!("Failed to create package: {}", err);
            err.to_response()
        }
    }
}

pub async fn update_package(
    data: web::Data<Arc<Client>>,
    path: web::Path<String>,
    input: web::Json<PackageInput>,
) -> impl Responder {
    let client = data.into_inner();
    let package_id = path.into_inner();
    let input = input.into_inner();

    let package_object_id = match ObjectId::parse_str(&package_id) {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::BadRequest().body("Invalid package ID format");
        }
    };

    let validated = match validate_package_input(&input) {
        Ok(validated) => validated,
        Err(err) => return err.to_response(),
    };

    // Prices are stored as doubles
    let price = match input.price.to_f64() {
        Some(price) => price,
        None => {
            eprintln!("Price out of range: {}", input.price);
            return HttpResponse::InternalServerError().body("Failed to update package");
        }
    };

    let fields = doc! {
        "name": input.name,
        "description": input.description,
        "duration_days": input.duration_days,
        "price": price,
        "inclusions": validated.inclusions,
        "service_ids": validated.service_ids,
        "image_url": input.image_url,
        "is_active": input.is_active,
    };

    let repo = repository::packages(&client);
    match repo.update_fields(&package_object_id, fields).await {
        Ok(()) => match repo.find_by_id(&package_object_id).await {
            Ok(package) => HttpResponse::Ok().json(package),
            Err(err) => err.to_response(),
        },
        Err(err) => err.to_response(),
    }
}

pub async fn delete_package(
    data: web::Data<Arc<Client>>,
    path: web::Path<String>,
) -> impl Responder {
    let client = data.into_inner();
    let package_id = path.into_inner();

    let package_object_id = match ObjectId::parse_str(&package_id) {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::BadRequest().body("Invalid package ID format");
        }
    };

    match repository::packages(&client)
        .delete(&package_object_id)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "deleted": true })),
        Err(err) => err.to_response(),
    }
}
