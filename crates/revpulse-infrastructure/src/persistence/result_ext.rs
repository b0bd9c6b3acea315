use revpulse_domain::shared::DomainError;

/// Extension trait to shorten repository error mapping
pub trait ResultExt<T> {
    /// Convert any error into `DomainError::Repository` with context
    fn map_repo_error(self, context: &str) -> Result<T, DomainError>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn map_repo_error(self, context: &str) -> Result<T, DomainError> {
        self.map_err(|e| DomainError::Repository(format!("{}: {}", context, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_repo_error_keeps_context() {
        let result: Result<i32, &str> = Err("disk on fire");
        match result.map_repo_error("Failed to load ledger") {
            Err(DomainError::Repository(msg)) => {
                assert!(msg.contains("Failed to load ledger"));
                assert!(msg.contains("disk on fire"));
            }
            _ => panic!("Expected Repository error"),
        }
    }
}
