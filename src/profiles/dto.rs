use serde::Serialize;

use crate::auth::repo_types::User;
use crate::reviews::repo_types::Review;

/// `/myprofile` payload: the caller plus the reviews written about them.
#[derive(Debug, Serialize)]
pub struct MyProfileResponse {
    pub user: User,
    pub reviews: Vec<Review>,
}
