use serde::{Deserialize, Serialize};

use crate::auth::repo_types::User;

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub fullname: String,
    pub email: String,
    pub mobile: String,
    pub skill: String,
    pub password: String,
    pub confirmpassword: String,
}

/// Request body for login and admin login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for admin promotion.
#[derive(Debug, Deserialize)]
pub struct MakeAdminRequest {
    pub email: String,
}

/// Response returned after login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}

/// Public part of the user returned to the client; never the hash.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub fullname: String,
    pub email: String,
    pub mobile: String,
    pub skill: String,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            fullname: u.fullname,
            email: u.email,
            mobile: u.mobile,
            skill: u.skill,
        }
    }
}

/// Response returned after admin login.
#[derive(Debug, Serialize)]
pub struct AdminAuthResponse {
    pub token: String,
    pub user: AdminPublicUser,
}

#[derive(Debug, Serialize)]
pub struct AdminPublicUser {
    pub fullname: String,
    pub email: String,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
}
