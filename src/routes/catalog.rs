use actix_web::{web, HttpResponse, Responder};
use mongodb::bson::doc;
use mongodb::Client;
use std::sync::Arc;

use crate::db::repository;

/*
    Public catalog, read-only: only active records, oldest first so the
    listing order matches the order the catalog was built in.
*/

pub async fn get_services(data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let repo = repository::services(&client);

    match repo
        .list(doc! { "is_active": true }, doc! { "created_at": 1 })
        .await
    {
        Ok(services) => HttpResponse::Ok().json(services),
        Err(err) => {
            eprintln!("Failed to list services: {}", err);
            err.to_response()
        }
    }
}

pub async fn get_packages(data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let repo = repository::packages(&client);

    match repo
        .list(doc! { "is_active": true }, doc! { "created_at": 1 })
        .await
    {
        Ok(packages) => HttpResponse::Ok().json(packages),
        Err(err) => {
            eprintln!("Failed to list packages: {}", err);
            err.to_response()
        }
    }
}
