use mongodb::bson::{doc, oid::ObjectId, DateTime};

use crate::db::repository::Repository;
use crate::errors::ApiError;
use crate::models::booking::{Booking, BookingStatus};

pub struct BookingLifecycle;

impl BookingLifecycle {
    /// Check a requested transition against the status table without
    /// touching storage.
    pub fn ensure_allowed(from: BookingStatus, to: BookingStatus) -> Result<(), ApiError> {
        if from.can_transition_to(to) {
            Ok(())
        } else {
            Err(ApiError::InvalidTransition { from, to })
        }
    }

    /// Move a booking to a new status. The storage update is conditional on
    /// the status the caller observed, so two admins racing on the same
    /// booking cannot both win: the second conditional update matches
    /// nothing and is reported as an invalid transition from the status
    /// that is actually stored.
    pub async fn transition(
        repo: &Repository<Booking>,
        id: &ObjectId,
        expected: BookingStatus,
        target: BookingStatus,
    ) -> Result<Booking, ApiError> {
        Self::ensure_allowed(expected, target)?;

        let matched = repo
            .update_where(
                doc! { "_id": *id, "status": expected.as_str() },
                doc! { "$set": {
                    "status": target.as_str(),
                    "updated_at": DateTime::now(),
                }},
            )
            .await?;

        if matched == 0 {
            // Either the booking is gone or another admin changed the status
            // first. Re-read to tell the two apart.
            let current = repo.find_by_id(id).await?;
            return Err(ApiError::InvalidTransition {
                from: current.status,
                to: target,
            });
        }

        repo.find_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use BookingStatus::*;

    const ALL: [BookingStatus; 5] = [Pending, Confirmed, CheckedIn, CheckedOut, Cancelled];

    #[test]
    fn pending_can_confirm_or_cancel() {
        assert!(BookingLifecycle::ensure_allowed(Pending, Confirmed).is_ok());
        assert!(BookingLifecycle::ensure_allowed(Pending, Cancelled).is_ok());
    }

    #[test]
    fn pending_cannot_skip_to_checked_in() {
        let result = BookingLifecycle::ensure_allowed(Pending, CheckedIn);
        assert!(matches!(
            result,
            Err(ApiError::InvalidTransition {
                from: Pending,
                to: CheckedIn,
            })
        ));
    }

    #[test]
    fn confirmed_can_check_in_or_cancel() {
        assert!(BookingLifecycle::ensure_allowed(Confirmed, CheckedIn).is_ok());
        assert!(BookingLifecycle::ensure_allowed(Confirmed, Cancelled).is_ok());
        assert!(BookingLifecycle::ensure_allowed(Confirmed, CheckedOut).is_err());
    }

    #[test]
    fn checked_in_can_only_check_out() {
        assert!(BookingLifecycle::ensure_allowed(CheckedIn, CheckedOut).is_ok());
        assert!(BookingLifecycle::ensure_allowed(CheckedIn, Cancelled).is_err());
        assert!(BookingLifecycle::ensure_allowed(CheckedIn, Pending).is_err());
    }

    #[test]
    fn terminal_states_reject_every_target() {
        for from in [CheckedOut, Cancelled] {
            assert!(from.is_terminal());
            for to in ALL {
                assert!(
                    BookingLifecycle::ensure_allowed(from, to).is_err(),
                    "{} -> {} should be rejected",
                    from.as_str(),
                    to.as_str()
                );
            }
        }
    }

    #[test]
    fn no_transition_re_enters_pending() {
        for from in ALL {
            assert!(BookingLifecycle::ensure_allowed(from, Pending).is_err());
        }
    }

    #[test]
    fn status_serializes_as_snake_case() {
        assert_eq!(
            serde_json::to_string(&CheckedIn).unwrap(),
            "\"checked_in\""
        );
        let parsed: BookingStatus = serde_json::from_str("\"checked_out\"").unwrap();
        assert_eq!(parsed, CheckedOut);
        for status in ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }
}
