use chrono::NaiveDate;
use mongodb::bson::{oid::ObjectId, DateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingType {
    Package,
    Flexible,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::CheckedIn => "checked_in",
            BookingStatus::CheckedOut => "checked_out",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Statuses an administrator may move a booking into from this one.
    /// Checked-out and cancelled bookings are terminal.
    pub fn allowed_transitions(&self) -> &'static [BookingStatus] {
        match self {
            BookingStatus::Pending => &[BookingStatus::Confirmed, BookingStatus::Cancelled],
            BookingStatus::Confirmed => &[BookingStatus::CheckedIn, BookingStatus::Cancelled],
            BookingStatus::CheckedIn => &[BookingStatus::CheckedOut],
            BookingStatus::CheckedOut => &[],
            BookingStatus::Cancelled => &[],
        }
    }

    pub fn can_transition_to(&self, target: BookingStatus) -> bool {
        self.allowed_transitions().contains(&target)
    }

    pub fn is_terminal(&self) -> bool {
        self.allowed_transitions().is_empty()
    }
}

/// A reservation request. The total price is a snapshot computed at creation
/// time; later catalog edits never change it.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Booking {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub reference: String,
    pub booking_type: BookingType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_ids: Option<Vec<ObjectId>>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub number_of_guests: u32,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    pub status: BookingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime>,
}

/// Payload of the public booking form. Catalog references arrive as hex id
/// strings and are resolved against the active catalog before pricing.
#[derive(Debug, Deserialize, Serialize)]
pub struct BookingInput {
    pub booking_type: BookingType,
    #[serde(default)]
    pub package_id: Option<String>,
    #[serde(default)]
    pub service_ids: Option<Vec<String>>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub number_of_guests: u32,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    #[serde(default)]
    pub special_requests: Option<String>,
}

/// Admin request to move a booking to a new status. `expected_status` is the
/// status the admin saw when issuing the request; the update is rejected if
/// the stored status has drifted in the meantime.
#[derive(Debug, Deserialize, Serialize)]
pub struct StatusUpdateInput {
    pub status: BookingStatus,
    pub expected_status: BookingStatus,
}
