use validator::ValidateEmail;

use crate::domain::repository::{ContactRepository, Notifier};
use crate::domain::types::{ContactMessage, NewContactMessage, NotifyPolicy, Recipient};
use crate::error::ApiError;
use crate::usecase::mail::{contact_email, deliver};

pub struct SubmitContactUseCase<R, N>
where
    R: ContactRepository,
    N: Notifier,
{
    pub repo: R,
    pub notifier: N,
    pub recipient: Recipient,
}

impl<R, N> SubmitContactUseCase<R, N>
where
    R: ContactRepository,
    N: Notifier,
{
    /// Store the message, then notify the support inbox. The stored message
    /// survives a delivery failure; the caller still sees the error.
    pub async fn execute(&self, input: NewContactMessage) -> Result<ContactMessage, ApiError> {
        let input = NewContactMessage {
            name: input.name.trim().to_owned(),
            email: input.email.trim().to_owned(),
            subject: input.subject.trim().to_owned(),
            message: input.message,
        };
        if input.name.is_empty() || input.subject.is_empty() || input.message.trim().is_empty() {
            return Err(ApiError::validation("name, subject and message are required."));
        }
        if !input.email.validate_email() {
            return Err(ApiError::validation("Enter a valid email address."));
        }

        let stored = self.repo.create(&input).await?;
        let email = contact_email(
            &self.recipient,
            &stored.name,
            &stored.email,
            &stored.subject,
            &stored.message,
        );
        deliver(&self.notifier, &email, NotifyPolicy::Propagate).await?;
        Ok(stored)
    }
}
