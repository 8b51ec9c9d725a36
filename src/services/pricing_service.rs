use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::ApiError;
use crate::models::booking::BookingType;
use crate::models::package::Package;
use crate::models::service::{Service, ServiceCategory};

pub struct PricingService;

impl PricingService {
    /// Whole nights between check-in and check-out, floored at zero. A
    /// same-day stay is zero nights, not an error.
    pub fn nights(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
        (check_out - check_in).num_days().max(0)
    }

    /// Compute the total price for a booking request.
    ///
    /// Package mode: package price x guest count.
    ///
    /// Flexible mode: flat-priced services are summed once; if both dates are
    /// given, the first lodging service in selection order contributes its
    /// nightly price x nights. The whole bundle is then multiplied by the
    /// guest count.
    ///
    /// Missing selections are rejected here rather than left to the form:
    /// package mode without a package, flexible mode with no services, and a
    /// guest count below one all return `ApiError::Validation` instead of a
    /// silent zero total.
    pub fn compute_total(
        booking_type: BookingType,
        number_of_guests: u32,
        package: Option<&Package>,
        services: &[Service],
        check_in: Option<NaiveDate>,
        check_out: Option<NaiveDate>,
    ) -> Result<Decimal, ApiError> {
        if number_of_guests < 1 {
            return Err(ApiError::Validation(
                "at least one guest is required".to_string(),
            ));
        }

        if let (Some(check_in), Some(check_out)) = (check_in, check_out) {
            if check_out < check_in {
                return Err(ApiError::Validation(
                    "check-out date is before check-in date".to_string(),
                ));
            }
        }

        let guests = Decimal::from(number_of_guests);

        match booking_type {
            BookingType::Package => {
                let package = package
                    .ok_or_else(|| ApiError::Validation("no package selected".to_string()))?;
                Ok(package.price * guests)
            }
            BookingType::Flexible => {
                if services.is_empty() {
                    return Err(ApiError::Validation("no services selected".to_string()));
                }

                let services_total: Decimal = services
                    .iter()
                    .filter(|s| s.category != ServiceCategory::Lodging)
                    .map(|s| s.price)
                    .sum();

                // Only the first lodging service in selection order is
                // priced; without both dates lodging contributes nothing.
                let lodging_cost = match (check_in, check_out) {
                    (Some(check_in), Some(check_out)) => services
                        .iter()
                        .find(|s| s.category == ServiceCategory::Lodging)
                        .map(|s| s.price * Decimal::from(Self::nights(check_in, check_out)))
                        .unwrap_or(Decimal::ZERO),
                    _ => Decimal::ZERO,
                };

                Ok((services_total + lodging_cost) * guests)
            }
        }
    }
}
