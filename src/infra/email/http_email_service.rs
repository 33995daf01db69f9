use crate::domain::models::booking::Booking;
use crate::domain::ports::NotificationService;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tera::{Context, Tera};
use tracing::error;

/// Confirmation mail dispatch through the platform's HTTP mail relay.
pub struct HttpEmailService {
    client: Client,
    api_url: String,
    api_key: String,
    templates: Tera,
}

impl HttpEmailService {
    pub fn new(api_url: String, api_key: String) -> Self {
        let mut templates = Tera::default();
        templates
            .add_raw_template(
                "confirmation.html",
                include_str!("../../templates/confirmation.html"),
            )
            .expect("Failed to load confirmation template");

        Self {
            client: Client::new(),
            api_url,
            api_key,
            templates,
        }
    }

    fn render_confirmation(&self, booking: &Booking) -> Result<String, AppError> {
        let details = &booking.booking_details;
        let mut context = Context::new();
        context.insert("guest_name", &booking.guest_details.name);
        context.insert("listing_title", booking.info_details.title());
        context.insert("booking_id", &booking.id);
        context.insert("check_in", &details.check_in.format("%Y-%m-%d").to_string());
        context.insert("check_out", &details.check_out.format("%Y-%m-%d").to_string());
        context.insert("nights", &details.nights);
        context.insert("total_price", &details.total_price);
        context.insert("currency", &details.currency);

        self.templates
            .render("confirmation.html", &context)
            .map_err(|e| AppError::InternalWithMsg(format!("Template rendering failed: {}", e)))
    }
}

#[derive(Serialize)]
struct EmailPayload {
    from_alias: String,
    to_addr: String,
    subject: String,
    html_body: String,
}

#[async_trait]
impl NotificationService for HttpEmailService {
    async fn send_confirmation(&self, booking: &Booking) -> Result<(), AppError> {
        let html_body = self.render_confirmation(booking)?;
        let subject = format!("Booking confirmed: {}", booking.info_details.title());

        for recipient in booking.recipients.iter() {
            let payload = EmailPayload {
                from_alias: "bookings".to_string(),
                to_addr: recipient.clone(),
                subject: subject.clone(),
                html_body: html_body.clone(),
            };

            let res = self
                .client
                .post(&self.api_url)
                .header("Authorization", format!("Bearer {}", self.api_key))
                .json(&payload)
                .send()
                .await
                .map_err(|e| {
                    let msg = format!("Email service connection error: {}", e);
                    error!("{}", msg);
                    AppError::InternalWithMsg(msg)
                })?;

            if !res.status().is_success() {
                let status = res.status();
                let text = res.text().await.unwrap_or_default();
                let msg = format!("Email service failed. Status: {}, Body: {}", status, text);
                error!("{}", msg);
                return Err(AppError::InternalWithMsg(msg));
            }
        }

        Ok(())
    }
}
