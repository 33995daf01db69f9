use crate::domain::models::booking::{
    Booking, BookingDetailsInput, BookingKind, BookingStatus, GuestDetails, ListingSnapshot,
    NewBookingParams, PaymentRecord,
};
use crate::domain::ports::{BookingRepository, NotificationService, PropertyRepository};
use crate::domain::services::calendar::dates_in_range;
use crate::domain::services::payment::verify_payment_signature;
use crate::error::AppError;
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

pub const PAYMENT_PROVIDER: &str = "razorpay";
pub const PAYMENT_SUCCEEDED: &str = "succeeded";

/// Everything the confirmation workflow needs from the caller: the payment
/// identifiers relayed from the checkout flow, plus the booking payload.
pub struct ConfirmationRequest {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
    pub info_details: ListingSnapshot,
    pub booking_details: BookingDetailsInput,
    pub guest_details: GuestDetails,
    pub recipients: Vec<String>,
    pub owner_id: String,
}

/// Sequences the booking workflows: payment verification, persistence,
/// inventory blocking and notification for confirmations; ownership and
/// eligibility checks for cancellations.
pub struct BookingService {
    booking_repo: Arc<dyn BookingRepository>,
    property_repo: Arc<dyn PropertyRepository>,
    notifier: Arc<dyn NotificationService>,
    payment_secret: String,
}

impl BookingService {
    pub fn new(
        booking_repo: Arc<dyn BookingRepository>,
        property_repo: Arc<dyn PropertyRepository>,
        notifier: Arc<dyn NotificationService>,
        payment_secret: String,
    ) -> Self {
        Self {
            booking_repo,
            property_repo,
            notifier,
            payment_secret,
        }
    }

    /// Confirms a paid booking: verify the gateway signature, persist the
    /// booking, block room inventory (property bookings only), notify the
    /// guest. Verification failures abort before any side effect; anything
    /// that fails after the booking row exists is logged and absorbed,
    /// because the persisted booking is the source of truth for "the guest
    /// paid and holds a reservation".
    pub async fn confirm(&self, request: ConfirmationRequest) -> Result<Booking, AppError> {
        if request.order_id.trim().is_empty()
            || request.payment_id.trim().is_empty()
            || request.signature.trim().is_empty()
        {
            return Err(AppError::Validation(
                "order_id, payment_id and signature are required".to_string(),
            ));
        }

        let valid = verify_payment_signature(
            &request.order_id,
            &request.payment_id,
            &request.signature,
            &self.payment_secret,
        )?;
        if !valid {
            warn!(
                order_id = %request.order_id,
                payment_id = %request.payment_id,
                "rejected booking confirmation with invalid payment signature"
            );
            return Err(AppError::InvalidSignature);
        }

        let payment = PaymentRecord {
            provider: PAYMENT_PROVIDER.to_string(),
            order_id: request.order_id.clone(),
            payment_id: request.payment_id.clone(),
            status: PAYMENT_SUCCEEDED.to_string(),
        };

        let booking = Booking::new(NewBookingParams {
            info_details: request.info_details,
            booking_details: request.booking_details,
            guest_details: request.guest_details,
            recipients: request.recipients,
            owner_id: request.owner_id,
            payment,
        });

        let created = match self.booking_repo.create(&booking).await {
            Ok(created) => created,
            Err(e) => {
                // The gateway has already captured the payment at this point.
                // Without a booking row there is nothing for the guest to
                // show for it, so this needs operator reconciliation.
                error!(
                    order_id = %request.order_id,
                    payment_id = %request.payment_id,
                    "payment captured but booking persistence failed, manual reconciliation required: {e}"
                );
                return Err(e);
            }
        };
        info!(booking_id = %created.id, "booking persisted");

        if created.kind == BookingKind::Property {
            self.block_inventory(&created).await;
        }

        if let Err(e) = self.notifier.send_confirmation(&created).await {
            warn!(
                booking_id = %created.id,
                order_id = %request.order_id,
                payment_id = %request.payment_id,
                "confirmation notification failed: {e}"
            );
        }

        Ok(created)
    }

    /// Best-effort inventory bookkeeping for a persisted property booking.
    /// Room references that do not parse as ids are dropped up front;
    /// everything else is delegated to one atomic repository call. Failures
    /// never bubble up to the guest.
    async fn block_inventory(&self, booking: &Booking) {
        let details = &booking.booking_details;
        let payment = &details.payment;

        let category_ids: Vec<String> = details
            .rooms_detail
            .iter()
            .filter_map(|room| {
                if Uuid::parse_str(&room.category_id).is_ok() {
                    Some(room.category_id.clone())
                } else {
                    warn!(
                        booking_id = %booking.id,
                        category_id = %room.category_id,
                        "skipping malformed room category reference"
                    );
                    None
                }
            })
            .collect();

        let dates = dates_in_range(
            details.check_in.date_naive(),
            details.check_out.date_naive(),
        );

        if category_ids.is_empty() || dates.is_empty() {
            return;
        }

        let property_id = booking.info_details.listing_id();
        if let Err(e) = self
            .property_repo
            .block_dates(property_id, &category_ids, &dates)
            .await
        {
            error!(
                booking_id = %booking.id,
                order_id = %payment.order_id,
                payment_id = %payment.payment_id,
                property_id = %property_id,
                "inventory blocking failed for confirmed booking: {e}"
            );
        }
    }

    /// Cancels a booking on behalf of its guest. The final write is
    /// conditional, so a concurrent cancel between the eligibility check
    /// and the update surfaces as a conflict instead of a false success.
    pub async fn cancel(
        &self,
        requester_id: &str,
        booking_id: &str,
        reason: &str,
    ) -> Result<Booking, AppError> {
        if Uuid::parse_str(booking_id).is_err() {
            return Err(AppError::Validation("Invalid booking id".to_string()));
        }

        let booking = self
            .booking_repo
            .find_by_id(booking_id)
            .await?
            .ok_or(AppError::NotFound("Booking not found".to_string()))?;

        if booking.guest_details.user_id != requester_id {
            return Err(AppError::Forbidden(
                "Booking belongs to a different guest".to_string(),
            ));
        }

        if booking.status == BookingStatus::Cancelled {
            return Err(AppError::Conflict("Booking is already cancelled".to_string()));
        }

        if Utc::now() > booking.booking_details.check_in {
            return Err(AppError::Validation(
                "Booking can no longer be cancelled after check-in".to_string(),
            ));
        }

        match self.booking_repo.cancel(booking_id, reason).await? {
            Some(cancelled) => {
                info!(booking_id = %cancelled.id, "booking cancelled");
                Ok(cancelled)
            }
            None => Err(AppError::Conflict(
                "Booking was modified concurrently, please retry".to_string(),
            )),
        }
    }

    /// Flags a booking as reviewed, once. Ownership is enforced the same way
    /// as for cancellation.
    pub async fn mark_reviewed(
        &self,
        requester_id: &str,
        booking_id: &str,
    ) -> Result<(), AppError> {
        if Uuid::parse_str(booking_id).is_err() {
            return Err(AppError::Validation("Invalid booking id".to_string()));
        }

        let booking = self
            .booking_repo
            .find_by_id(booking_id)
            .await?
            .ok_or(AppError::NotFound("Booking not found".to_string()))?;

        if booking.guest_details.user_id != requester_id {
            return Err(AppError::Forbidden(
                "Booking belongs to a different guest".to_string(),
            ));
        }

        if self.booking_repo.mark_reviewed(booking_id).await? {
            Ok(())
        } else {
            Err(AppError::Conflict(
                "Booking has already been reviewed".to_string(),
            ))
        }
    }
}
