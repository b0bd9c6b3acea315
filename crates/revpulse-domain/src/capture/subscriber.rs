use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::{DomainError, SubscriberId};

/// A captured email signup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscriber {
    id: SubscriberId,
    email: String,
    name: Option<String>,
    captured_at: DateTime<Utc>,
}

impl Subscriber {
    pub fn new(email: &str, name: Option<&str>) -> Result<Self, DomainError> {
        let email = email.trim();

        if email.is_empty() {
            return Err(DomainError::Validation(
                "Email address cannot be empty".to_string(),
            ));
        }

        // Cheap shape check only; the list provider is the real authority
        if !email.contains('@') || email.contains(char::is_whitespace) {
            return Err(DomainError::Validation(format!(
                "Not a valid email address: {}",
                email
            )));
        }

        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        Ok(Self {
            id: SubscriberId::new(),
            email: email.to_string(),
            name,
            captured_at: Utc::now(),
        })
    }

    /// Reconstruct from persistence
    pub fn restore(
        id: SubscriberId,
        email: String,
        name: Option<String>,
        captured_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            name,
            captured_at,
        }
    }

    pub fn id(&self) -> &SubscriberId {
        &self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email_is_accepted() {
        let subscriber = Subscriber::new("reader@example.com", Some("Reader")).unwrap();
        assert_eq!(subscriber.email(), "reader@example.com");
        assert_eq!(subscriber.name(), Some("Reader"));
    }

    #[test]
    fn test_email_and_name_are_trimmed() {
        let subscriber = Subscriber::new("  reader@example.com ", Some("  ")).unwrap();
        assert_eq!(subscriber.email(), "reader@example.com");
        assert_eq!(subscriber.name(), None);
    }

    #[test]
    fn test_empty_email_is_rejected() {
        let result = Subscriber::new("   ", None);
        match result {
            Err(DomainError::Validation(msg)) => assert!(msg.contains("empty")),
            _ => panic!("Expected Validation error"),
        }
    }

    #[test]
    fn test_email_without_at_sign_is_rejected() {
        assert!(Subscriber::new("not-an-email", None).is_err());
    }

    #[test]
    fn test_email_with_whitespace_is_rejected() {
        assert!(Subscriber::new("rea der@example.com", None).is_err());
    }
}
