use reqwest;
use serde::{Deserialize, Serialize};
use std::env;

use crate::models::booking::Booking;

#[derive(Debug, Serialize, Deserialize)]
pub struct SendGridEmail {
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SendGridPersonalization {
    pub to: Vec<SendGridEmail>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SendGridContent {
    #[serde(rename = "type")]
    pub content_type: String,
    pub value: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SendGridRequest {
    pub personalizations: Vec<SendGridPersonalization>,
    pub from: SendGridEmail,
    pub subject: String,
    pub content: Vec<SendGridContent>,
}

#[derive(Debug)]
pub enum EmailError {
    EnvironmentError(String),
    RequestError(String),
    ApiError(String),
}

impl std::fmt::Display for EmailError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmailError::EnvironmentError(err) => write!(f, "Environment error: {}", err),
            EmailError::RequestError(err) => write!(f, "Request error: {}", err),
            EmailError::ApiError(err) => write!(f, "API error: {}", err),
        }
    }
}

impl std::error::Error for EmailError {}

/// Sends the two booking notifications through the SendGrid REST API. Both
/// sends are best-effort: the caller fires them from a spawned task and a
/// failure never rolls back the booking itself.
pub struct EmailService {
    api_key: String,
    client: reqwest::Client,
}

impl EmailService {
    pub fn new() -> Result<Self, EmailError> {
        let api_key = env::var("SENDGRID_API_KEY")
            .map_err(|_| EmailError::EnvironmentError("SENDGRID_API_KEY not set".to_string()))?;

        let client = reqwest::Client::new();

        Ok(Self { api_key, client })
    }

    pub async fn send_html_email(
        &self,
        to_email: &str,
        from_email: &str,
        subject: &str,
        html_content: &str,
    ) -> Result<(), EmailError> {
        let url = "https://api.sendgrid.com/v3/mail/send";

        let request = SendGridRequest {
            personalizations: vec![SendGridPersonalization {
                to: vec![SendGridEmail {
                    email: to_email.to_string(),
                }],
            }],
            from: SendGridEmail {
                email: from_email.to_string(),
            },
            subject: subject.to_string(),
            content: vec![SendGridContent {
                content_type: "text/html".to_string(),
                value: html_content.to_string(),
            }],
        };

        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| EmailError::RequestError(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(EmailError::ApiError(format!(
                "Status: {}, Body: {}",
                status, body
            )))
        }
    }

    /// One confirmation to the customer, one alert to the operator inbox.
    /// Both go out together; the first failure is reported.
    pub async fn send_booking_emails(&self, booking: &Booking) -> Result<(), EmailError> {
        let from_email =
            env::var("FROM_EMAIL").unwrap_or_else(|_| "bookings@jozitours.co.za".to_string());
        let operator_email = env::var("OPERATOR_EMAIL")
            .map_err(|_| EmailError::EnvironmentError("OPERATOR_EMAIL not set".to_string()))?;

        let customer_subject = "Booking Confirmation - Jozi Tours & Stays";
        let operator_subject = format!("New Booking Request - {}", booking.customer_name);

        let customer_html = Self::customer_confirmation_html(booking);
        let operator_html = Self::operator_alert_html(booking);

        futures::try_join!(
            self.send_html_email(
                &booking.customer_email,
                &from_email,
                customer_subject,
                &customer_html,
            ),
            self.send_html_email(
                &operator_email,
                &from_email,
                &operator_subject,
                &operator_html,
            ),
        )?;

        Ok(())
    }

    fn customer_confirmation_html(booking: &Booking) -> String {
        let special_requests = match &booking.special_requests {
            Some(text) if !text.trim().is_empty() => format!(
                r#"<p style="background: #fff3e0; padding: 15px;"><strong>Your Special Requests:</strong><br>{}</p>"#,
                text
            ),
            _ => String::new(),
        };

        format!(
            r#"
            <!DOCTYPE html>
            <html>
            <head>
                <meta charset="utf-8">
                <title>Booking Confirmation</title>
                <style>
                    body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #11203d; }}
                    .container {{ max-width: 600px; margin: 0 auto; padding: 20px; }}
                    .header {{ background-color: #11203d; color: white; padding: 30px; text-align: center; }}
                    .details {{ background: #f8f9fa; padding: 20px; margin: 20px 0; border-radius: 4px; }}
                    .footer {{ margin-top: 30px; font-size: 12px; color: #666; text-align: center; }}
                </style>
            </head>
            <body>
                <div class="container">
                    <div class="header">
                        <h1>Booking Confirmation</h1>
                        <p>Jozi Tours &amp; Stays</p>
                    </div>
                    <p>Dear {name},</p>
                    <p>Thank you for your booking request. We have received your details and will confirm availability within 24 hours.</p>
                    <div class="details">
                        <h3>Booking Details</h3>
                        <p><strong>Booking Reference:</strong> {reference}</p>
                        <p><strong>Check-in Date:</strong> {check_in}</p>
                        <p><strong>Check-out Date:</strong> {check_out}</p>
                        <p><strong>Number of Guests:</strong> {guests}</p>
                        <p><strong>Total Amount:</strong> R{total}</p>
                    </div>
                    {special_requests}
                    <p>Payment instructions will be included in the final confirmation. Feel free to contact us if you have any questions.</p>
                    <p>We look forward to welcoming you to Johannesburg!</p>
                    <div class="footer">
                        <p>Jozi Tours &amp; Stays, Johannesburg, Gauteng, South Africa</p>
                        <p>If you did not make this booking, please contact us immediately.</p>
                    </div>
                </div>
            </body>
            </html>
            "#,
            name = booking.customer_name,
            reference = booking.reference,
            check_in = booking.check_in_date,
            check_out = booking.check_out_date,
            guests = booking.number_of_guests,
            total = booking.total_price,
            special_requests = special_requests,
        )
    }

    fn operator_alert_html(booking: &Booking) -> String {
        format!(
            r#"
            <!DOCTYPE html>
            <html>
            <head>
                <meta charset="utf-8">
                <title>New Booking Request</title>
                <style>
                    body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; }}
                    .container {{ max-width: 600px; margin: 0 auto; padding: 20px; }}
                    .alert {{ background: #e96411; color: white; padding: 15px; border-radius: 4px; }}
                    td {{ padding: 8px; border-bottom: 1px solid #ddd; }}
                    .label {{ font-weight: bold; width: 40%; }}
                </style>
            </head>
            <body>
                <div class="container">
                    <div class="alert">
                        <strong>Action Required:</strong> A new booking has been submitted and requires your review.
                    </div>
                    <h3>Customer Information</h3>
                    <table>
                        <tr><td class="label">Name:</td><td>{name}</td></tr>
                        <tr><td class="label">Email:</td><td>{email}</td></tr>
                        <tr><td class="label">Phone:</td><td>{phone}</td></tr>
                    </table>
                    <h3>Booking Details</h3>
                    <table>
                        <tr><td class="label">Reference:</td><td>{reference}</td></tr>
                        <tr><td class="label">Check-in:</td><td>{check_in}</td></tr>
                        <tr><td class="label">Check-out:</td><td>{check_out}</td></tr>
                        <tr><td class="label">Guests:</td><td>{guests}</td></tr>
                        <tr><td class="label">Total:</td><td><strong>R{total}</strong></td></tr>
                    </table>
                </div>
            </body>
            </html>
            "#,
            name = booking.customer_name,
            email = booking.customer_email,
            phone = booking.customer_phone,
            reference = booking.reference,
            check_in = booking.check_in_date,
            check_out = booking.check_out_date,
            guests = booking.number_of_guests,
            total = booking.total_price,
        )
    }
}
