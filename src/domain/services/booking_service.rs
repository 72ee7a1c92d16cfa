use std::sync::Arc;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use validator::Validate;
use crate::domain::models::booking::{Booking, BookingStatus, NewBookingParams};
use crate::domain::ports::{BookingRepository, Clock, RoomRepository};
use crate::domain::services::availability::{parse_date, DateRange};
use crate::error::{AppError, ValidationErrors};

/// Guest-submitted booking request, as it arrives from the HTML form or the JSON API.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct BookingForm {
    #[validate(length(min = 1, max = 200, message = "Enter your name (up to 200 characters)."))]
    pub guest_name: String,
    #[validate(email(message = "Enter a valid email address."))]
    pub guest_email: String,
    #[validate(length(min = 1, max = 20, message = "Enter a phone number (up to 20 characters)."))]
    pub guest_phone: String,
    pub check_in: String,
    pub check_out: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidBooking {
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: String,
    pub range: DateRange,
}

impl BookingForm {
    const FIELD_ORDER: &'static [&'static str] = &["guest_name", "guest_email", "guest_phone"];

    fn trimmed(&self) -> Self {
        Self {
            guest_name: self.guest_name.trim().to_string(),
            guest_email: self.guest_email.trim().to_string(),
            guest_phone: self.guest_phone.trim().to_string(),
            check_in: self.check_in.trim().to_string(),
            check_out: self.check_out.trim().to_string(),
        }
    }

    /// Checks contact fields, then that check-in is not before `today`, then that
    /// check-out follows check-in. Every violated rule is reported.
    pub fn validate_at(&self, today: NaiveDate) -> Result<ValidBooking, AppError> {
        let form = self.trimmed();
        let mut errors = match form.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(e) => ValidationErrors::ordered(e, Self::FIELD_ORDER),
        };

        let check_in = read_date(&mut errors, "check_in", &form.check_in);
        let check_out = read_date(&mut errors, "check_out", &form.check_out);

        let mut range = None;
        if let (Some(check_in), Some(check_out)) = (check_in, check_out) {
            if check_in < today {
                errors.add("check_in", "Check-in date cannot be in the past.");
            }
            match DateRange::new(check_in, check_out) {
                Ok(r) => range = Some(r),
                Err(AppError::Validation(e)) => errors.extend(e),
                Err(other) => return Err(other),
            }
        }

        match range {
            Some(range) if errors.is_empty() => Ok(ValidBooking {
                guest_name: form.guest_name,
                guest_email: form.guest_email,
                guest_phone: form.guest_phone,
                range,
            }),
            _ => Err(AppError::Validation(errors)),
        }
    }
}

fn read_date(errors: &mut ValidationErrors, field: &str, raw: &str) -> Option<NaiveDate> {
    if raw.is_empty() {
        errors.add(field, "This field is required.");
        return None;
    }
    match parse_date(field, raw) {
        Ok(d) => Some(d),
        Err(AppError::Validation(e)) => {
            errors.extend(e);
            None
        }
        Err(_) => None,
    }
}

pub struct BookingService {
    room_repo: Arc<dyn RoomRepository>,
    booking_repo: Arc<dyn BookingRepository>,
    clock: Arc<dyn Clock>,
}

impl BookingService {
    pub fn new(room_repo: Arc<dyn RoomRepository>, booking_repo: Arc<dyn BookingRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { room_repo, booking_repo, clock }
    }

    pub async fn create_booking(&self, room_id: &str, form: &BookingForm) -> Result<Booking, AppError> {
        let room = self.room_repo.find_by_id(room_id).await?
            .ok_or_else(|| AppError::NotFound("Room not found".into()))?;

        let valid = form.validate_at(self.clock.today())?;

        let booking = Booking::new(NewBookingParams {
            room_id: room.id.clone(),
            guest_name: valid.guest_name,
            guest_email: valid.guest_email,
            guest_phone: valid.guest_phone,
            check_in: valid.range.check_in(),
            check_out: valid.range.check_out(),
        }, self.clock.now());

        match self.booking_repo.create_if_available(&booking).await? {
            Some(created) => {
                info!(
                    booking_id = %created.id,
                    room_id = %room.id,
                    check_in = %created.check_in,
                    check_out = %created.check_out,
                    "Booking request accepted"
                );
                Ok(created)
            }
            None => {
                warn!(room_id = %room.id, check_in = %booking.check_in, check_out = %booking.check_out, "Booking rejected: dates taken");
                Err(AppError::BookingConflict)
            }
        }
    }

    /// Administrative status change. Overlaps are deliberately not re-checked here:
    /// confirming two overlapping requests is an allowed manual override.
    pub async fn change_status(&self, booking_id: &str, next: BookingStatus) -> Result<Booking, AppError> {
        let booking = self.booking_repo.find_by_id(booking_id).await?
            .ok_or_else(|| AppError::NotFound("Booking not found".into()))?;

        if booking.status == next {
            return Ok(booking);
        }

        if !booking.status.can_transition_to(next) {
            return Err(AppError::validation(
                "status",
                format!("Cannot change booking status from {} to {}.", booking.status, next),
            ));
        }

        let updated = self.booking_repo.update_status(&booking.id, next, self.clock.now()).await?;
        info!(booking_id = %updated.id, from = %booking.status, to = %next, "Booking status changed");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn form(check_in: &str, check_out: &str) -> BookingForm {
        BookingForm {
            guest_name: "Anna".into(),
            guest_email: "anna@example.com".into(),
            guest_phone: "+7 999 123-45-67".into(),
            check_in: check_in.into(),
            check_out: check_out.into(),
        }
    }

    fn fields(err: AppError) -> Vec<String> {
        match err {
            AppError::Validation(errors) => errors.iter().map(|e| e.field.clone()).collect(),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_form() {
        let valid = form("2024-06-10", "2024-06-15").validate_at(today()).unwrap();
        assert_eq!(valid.range.nights(), 5);
        assert_eq!(valid.guest_name, "Anna");
    }

    #[test]
    fn test_check_in_today_is_allowed() {
        assert!(form("2024-06-01", "2024-06-02").validate_at(today()).is_ok());
    }

    #[test]
    fn test_past_check_in_rejected() {
        let err = form("2024-05-31", "2024-06-02").validate_at(today()).unwrap_err();
        assert_eq!(fields(err), vec!["check_in"]);
    }

    #[test]
    fn test_checkout_not_after_checkin_rejected() {
        let same_day = form("2024-06-10", "2024-06-10").validate_at(today()).unwrap_err();
        assert_eq!(fields(same_day), vec!["check_out"]);

        let reversed = form("2024-06-10", "2024-06-05").validate_at(today()).unwrap_err();
        assert_eq!(fields(reversed), vec!["check_out"]);
    }

    #[test]
    fn test_contact_fields_reported_before_date_rules() {
        let mut f = form("2024-05-01", "2024-04-01");
        f.guest_name = "   ".into();
        f.guest_email = "not-an-email".into();
        f.guest_phone = String::new();

        let got = fields(f.validate_at(today()).unwrap_err());
        assert_eq!(got, vec!["guest_name", "guest_email", "guest_phone", "check_in", "check_out"]);
    }

    #[test]
    fn test_missing_and_malformed_dates() {
        let got = fields(form("", "15.06.2024").validate_at(today()).unwrap_err());
        assert_eq!(got, vec!["check_in", "check_out"]);
    }

    #[test]
    fn test_phone_length_limit() {
        let mut f = form("2024-06-10", "2024-06-11");
        f.guest_phone = "1".repeat(21);
        assert_eq!(fields(f.validate_at(today()).unwrap_err()), vec!["guest_phone"]);
    }
}
