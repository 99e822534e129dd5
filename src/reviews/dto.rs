use serde::Deserialize;

use crate::error::ApiError;

/// Request body for review submission. `taskworker` is the ratee's id.
#[derive(Debug, Deserialize)]
pub struct AddReviewRequest {
    pub taskworker: String,
    pub rating: i32,
}

impl AddReviewRequest {
    /// Boundary validation; runs before any store access.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.taskworker.trim().is_empty() {
            return Err(ApiError::Validation("Taskworker is required".into()));
        }
        if !(1..=5).contains(&self.rating) {
            return Err(ApiError::Validation(
                "Rating must be between 1 and 5".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(taskworker: &str, rating: i32) -> AddReviewRequest {
        AddReviewRequest {
            taskworker: taskworker.into(),
            rating,
        }
    }

    #[test]
    fn accepts_ratings_in_range() {
        for rating in 1..=5 {
            assert!(req("worker-id", rating).validate().is_ok());
        }
    }

    #[test]
    fn rejects_rating_out_of_range() {
        assert!(matches!(
            req("worker-id", 6).validate(),
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(
            req("worker-id", 0).validate(),
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(
            req("worker-id", -1).validate(),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn rejects_missing_taskworker() {
        assert!(matches!(
            req("  ", 3).validate(),
            Err(ApiError::Validation(_))
        ));
    }
}
