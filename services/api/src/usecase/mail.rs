//! Email templates and notifier-failure handling.

use crate::domain::repository::Notifier;
use crate::domain::types::{NotifyPolicy, OutgoingEmail, Recipient};
use crate::error::ApiError;

const FOOTER: &str = "© 2025 Mol. All rights reserved.";

pub fn verification_link(portal_base: &str, token: &str) -> String {
    format!("{portal_base}/register/verification/{token}")
}

pub fn reset_link(portal_base: &str, token: &str) -> String {
    format!("{portal_base}/reset-password/{token}")
}

pub fn newsletter_link(portal_base: &str, token: &str) -> String {
    format!("{portal_base}/newsletter/verify/{token}")
}

pub fn verification_email(name: &str, email: &str, link: &str) -> OutgoingEmail {
    OutgoingEmail {
        subject: "Mol - Verify Your Email".to_owned(),
        body: format!(
            "Hi {name},<br><br>\
             Thank you for signing up with Mol! We're excited to have you join our community.<br><br>\
             To complete your registration and access all features, please verify your email address by clicking the link below:<br>\
             <a href='{link}'>{link}</a><br><br>\
             If the link above doesn't work, copy and paste the following link into your browser. \
             Note: This link will expire in 24 hours for security reasons.<br><br>\
             If you didn't create an account with Mol, you can safely ignore this email.<br><br>\
             {FOOTER}"
        ),
        to: vec![Recipient {
            name: name.to_owned(),
            email: email.to_owned(),
        }],
    }
}

pub fn reset_email(name: &str, email: &str, link: &str) -> OutgoingEmail {
    OutgoingEmail {
        subject: "Mol - Reset Your Password".to_owned(),
        body: format!(
            "Hi {name},<br><br>\
             We received a request to reset your password for your Mol account.<br><br>\
             To reset your password, please click the link below:<br>\
             <a href='{link}'>{link}</a><br><br>\
             If you did not request a password reset, please ignore this email or contact support.<br><br>\
             Note: This link will expire in 1 hour.<br><br>\
             {FOOTER}"
        ),
        to: vec![Recipient {
            name: name.to_owned(),
            email: email.to_owned(),
        }],
    }
}

pub fn newsletter_email(email: &str, link: &str) -> OutgoingEmail {
    OutgoingEmail {
        subject: "Welcome to Our Newsletter!".to_owned(),
        body: format!(
            "<div style='font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;'>\
             <h2 style='color: #333;'>Welcome to Our Newsletter!</h2>\
             <p style='color: #666; font-size: 16px; line-height: 1.6;'>\
             Thank you for subscribing to our newsletter! We're excited to have you join our community.\
             </p>\
             <p style='color: #666; font-size: 16px; line-height: 1.6;'>\
             To complete your subscription and start receiving our updates, please verify your email address by clicking the button below:\
             </p>\
             <div style='text-align: center; margin: 30px 0;'>\
             <a href='{link}' style='display: inline-block; background-color: #007bff; color: #ffffff; padding: 12px 30px; \
             text-decoration: none; border-radius: 5px; font-size: 16px; font-weight: bold;'>Verify Email Address</a>\
             </div>\
             <p style='color: #666; font-size: 14px; line-height: 1.6;'>\
             If the button doesn't work, you can copy and paste the following link into your browser:<br>\
             <a href='{link}' style='color: #007bff;'>{link}</a>\
             </p>\
             <p style='color: #999; font-size: 12px; margin-top: 30px;'>\
             If you didn't subscribe to our newsletter, you can safely ignore this email.\
             </p>\
             <p style='color: #999; font-size: 12px;'>{FOOTER}</p>\
             </div>"
        ),
        to: vec![Recipient {
            name: email.to_owned(),
            email: email.to_owned(),
        }],
    }
}

pub fn contact_email(
    recipient: &Recipient,
    name: &str,
    email: &str,
    subject: &str,
    message: &str,
) -> OutgoingEmail {
    OutgoingEmail {
        subject: format!("New Contact Message: {subject}"),
        body: format!(
            "<div style='font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;'>\
             <h2 style='color: #333;'>New Contact Message</h2>\
             <p style='color: #666; font-size: 16px; line-height: 1.6;'>\
             You have received a new contact message from your website.\
             </p>\
             <div style='background-color: #f5f5f5; padding: 20px; border-radius: 5px; margin: 20px 0;'>\
             <p style='margin: 10px 0;'><strong style='color: #333;'>Name:</strong> <span style='color: #666;'>{name}</span></p>\
             <p style='margin: 10px 0;'><strong style='color: #333;'>Email:</strong> <span style='color: #666;'>{email}</span></p>\
             <p style='margin: 10px 0;'><strong style='color: #333;'>Subject:</strong> <span style='color: #666;'>{subject}</span></p>\
             <p style='margin: 10px 0;'><strong style='color: #333;'>Message:</strong></p>\
             <p style='color: #666; line-height: 1.6; white-space: pre-wrap;'>{message}</p>\
             </div>\
             <p style='color: #999; font-size: 12px; margin-top: 30px;'>\
             This message was sent from the contact form on your website.\
             </p>\
             </div>"
        ),
        to: vec![recipient.clone()],
    }
}

/// Send `email`, applying `policy` to a delivery failure.
pub async fn deliver<N: Notifier>(
    notifier: &N,
    email: &OutgoingEmail,
    policy: NotifyPolicy,
) -> Result<(), ApiError> {
    match notifier.send(email).await {
        Ok(()) => Ok(()),
        Err(e) => match policy {
            NotifyPolicy::Swallow => {
                tracing::warn!(error = %e, subject = %email.subject, "email delivery failed, continuing");
                Ok(())
            }
            NotifyPolicy::Propagate => Err(e),
        },
    }
}
