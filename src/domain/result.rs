//! Result type alias for LegTrack

use super::errors::LegTrackError;

/// Result type alias for LegTrack operations
///
/// # Examples
///
/// ```
/// use legtrack::domain::result::Result;
/// use legtrack::domain::errors::LegTrackError;
///
/// fn require_year(year: Option<i32>) -> Result<i32> {
///     year.ok_or_else(|| LegTrackError::Validation("year is required".to_string()))
/// }
///
/// assert!(require_year(None).is_err());
/// ```
pub type Result<T> = std::result::Result<T, LegTrackError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::LegTrackError;

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(LegTrackError::Validation("test error".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
