//! Turns the list of failed-check messages into control flow.

use crate::core::error::{Result, SanityError};

/// Return normally when `messages` is empty; otherwise fail with a
/// [`SanityError::ValidationFailure`] carrying every message in order.
pub fn gate(messages: Vec<String>) -> Result<()> {
    if messages.is_empty() {
        return Ok(());
    }
    let error = SanityError::validation_failure(messages);
    log::warn!("{}", error);
    Err(error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::VALIDATION_FAILURE_HEADER;

    #[test]
    fn test_empty_passes() {
        assert!(gate(Vec::new()).is_ok());
    }

    #[test]
    fn test_failure_carries_all_messages() {
        let err = gate(vec!["first".to_string(), "second".to_string()]).unwrap_err();
        assert_eq!(err.messages(), &["first".to_string(), "second".to_string()]);
        assert_eq!(
            err.to_string(),
            format!("{}\nfirst\nsecond", VALIDATION_FAILURE_HEADER)
        );
    }
}
