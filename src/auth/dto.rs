use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response returned after registration.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
}

/// Response returned after login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_response_uses_user_id_key() {
        let response = RegisterResponse {
            user_id: Uuid::new_v4(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("userId").is_some());
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn login_response_carries_token() {
        let response = LoginResponse {
            token: "abc.def.ghi".into(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["token"], "abc.def.ghi");
    }
}
