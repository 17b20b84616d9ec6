// Mail service endpoints: product feedback and owner notifications

use reqwest::Method;
use tracing::debug;

use crate::client::CatalogClient;
use crate::error::Error;
use crate::models::{FeedbackForm, NotificationPayload};

impl CatalogClient {
    /// Submit a feedback form.
    ///
    /// `POST /api/mail/v0/feedback` (form-encoded)
    pub async fn submit_feedback(&self, form: &FeedbackForm) -> Result<(), Error> {
        let url = self.api_url("mail/v0/feedback")?;
        debug!(feedback_type = form.feedback_type(), "submitting feedback");
        self.post_form_unit(url, &form.form_fields()).await
    }

    /// Send a notification email to resource owners.
    ///
    /// `POST /api/mail/v0/notification` with
    /// `{"recipients", "sender", "notificationType", "options"}`
    pub async fn send_notification(&self, payload: &NotificationPayload) -> Result<(), Error> {
        let url = self.api_url("mail/v0/notification")?;
        debug!(
            notification_type = %payload.notification_type,
            recipients = payload.recipients.len(),
            "sending notification"
        );
        self.send_json_unit(Method::POST, url, payload).await
    }
}
