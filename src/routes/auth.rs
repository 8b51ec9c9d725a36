use actix_web::{web, HttpResponse, Responder};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use mongodb::bson::{doc, oid::ObjectId, DateTime};
use mongodb::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::db::repository;
use crate::middleware::auth::Claims;
use crate::models::admin::{Admin, SigninInput};

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    auth_token: String,
}

pub async fn signin(data: web::Data<Arc<Client>>, input: web::Json<SigninInput>) -> impl Responder {
    let client = data.into_inner();
    let repo = repository::admins(&client);

    let input = input.into_inner();

    match repo.find_one(doc! { "email": &input.email }).await {
        Ok(Some(admin)) => {
            if bcrypt::verify(&input.password, &admin.password).unwrap_or(false) {
                let admin_id = match admin.id {
                    Some(id) => id,
                    None => {
                        eprintln!("Admin record for {} has no id", admin.email);
                        return HttpResponse::InternalServerError()
                            .body("Token generation failed");
                    }
                };

                match generate_token(&admin.email, admin_id) {
                    Ok(token) => HttpResponse::Ok().json(TokenResponse { auth_token: token }),
                    Err(_) => {
                        HttpResponse::InternalServerError().body("Token generation failed")
                    }
                }
            } else {
                HttpResponse::Unauthorized().body("Invalid credentials")
            }
        }
        Ok(None) => HttpResponse::Unauthorized().body("Invalid credentials"),
        Err(err) => {
            eprintln!("Database error during signin: {}", err);
            err.to_response()
        }
    }
}

/// Create the dashboard account from ADMIN_EMAIL / ADMIN_PASSWORD on first
/// start. Does nothing when the account already exists or the variables are
/// missing; failures are logged and never abort startup.
pub async fn ensure_initial_admin(client: &Client) {
    let (email, password) = match (
        std::env::var("ADMIN_EMAIL"),
        std::env::var("ADMIN_PASSWORD"),
    ) {
        (Ok(email), Ok(password)) => (email, password),
        _ => {
            println!("ADMIN_EMAIL/ADMIN_PASSWORD not set, skipping admin bootstrap");
            return;
        }
    };

    let repo = repository::admins(client);

    match repo.find_one(doc! { "email": &email }).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            let hashed = match bcrypt::hash(&password, bcrypt::DEFAULT_COST) {
                Ok(hashed) => hashed,
                Err(err) => {
                    eprintln!("Failed to hash admin password: {}", err);
                    return;
                }
            };

            let now = DateTime::now();
            let admin = Admin {
                id: None,
                email: email.clone(),
                password: hashed,
                role: "admin".to_string(),
                created_at: Some(now),
                updated_at: Some(now),
            };

            match repo.insert(&admin).await {
                Ok(_) => println!("Created initial admin account for {}", email),
                Err(err) => eprintln!("Failed to create initial admin account: {}", err),
            }
        }
        Err(err) => eprintln!("Failed to check for admin account: {}", err),
    }
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    let re = regex::Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?)*$",
    );
    return re.unwrap().is_match(email);
}

fn generate_token(email: &str, admin_id: ObjectId) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = Claims {
        sub: email.to_string(),
        iat: now.timestamp() as usize,
        exp: (now + Duration::hours(24)).timestamp() as usize,
        admin_id: admin_id.to_hex(),
        role: Some("admin".to_string()),
    };

    let key = std::env::var("JWT_SECRET").unwrap_or_else(|_| "default_secret".to_string());

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(key.as_bytes()),
    )
}
