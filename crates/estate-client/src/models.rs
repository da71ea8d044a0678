// File: src/models.rs
// Purpose: Response envelope and the records the API sends back

use serde::{Deserialize, Serialize};

/// `{status, data, message, error}` wrapper around every response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub status: Option<String>,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }

    /// Human-readable failure text: `message` first, then `error`.
    pub fn failure_message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .filter(|m| !m.is_empty())
            .or(self.error.as_deref().filter(|e| !e.is_empty()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, alias = "role")]
    pub user_type: Option<String>,
}

impl User {
    pub fn is_client(&self) -> bool {
        self.user_type
            .as_deref()
            .map_or(false, |t| t.eq_ignore_ascii_case("client"))
    }
}

/// `data` of a successful login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthData {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyImage {
    pub id: i64,
    #[serde(default)]
    pub property_id: Option<i64>,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    pub address: String,
    pub price: f64,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub bedrooms: Option<i64>,
    #[serde(default)]
    pub bathrooms: Option<f64>,
    #[serde(default)]
    pub square_feet: Option<f64>,
    #[serde(default)]
    pub property_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub agent_id: Option<i64>,
    #[serde(default)]
    pub images: Vec<PropertyImage>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_success_envelope() {
        let body = r#"{"status":"success","data":{"token":"t0k","user":{"id":3,"name":"Ada","email":"ada@estate.com","role":"agent"}},"message":"Login successful"}"#;
        let resp: ApiResponse<AuthData> = serde_json::from_str(body).unwrap();

        assert!(resp.is_success());
        let data = resp.data.unwrap();
        assert_eq!(data.token, "t0k");
        assert_eq!(data.user.user_type.as_deref(), Some("agent"));
        assert!(!data.user.is_client());
    }

    #[test]
    fn test_error_envelope() {
        let body = r#"{"status":"error","error":"Unauthorized","message":"Invalid credentials"}"#;
        let resp: ApiResponse<AuthData> = serde_json::from_str(body).unwrap();
        assert!(!resp.is_success());
        assert!(resp.data.is_none());
        assert_eq!(resp.failure_message(), Some("Invalid credentials"));

        let bare: ApiResponse<AuthData> = serde_json::from_str(r#"{"error":"Conflict"}"#).unwrap();
        assert_eq!(bare.failure_message(), Some("Conflict"));
    }

    #[test]
    fn test_property_listing_decodes_sparse_rows() {
        let body = r#"[{"id":1,"address":"12 Quay St","price":250000.5,"bathrooms":2,"square_feet":null,"property_type":"apartment","agent_id":4,"images":[{"id":9,"property_id":1,"image_url":"/uploads/a.png"}]}]"#;
        let rows: Vec<Property> = serde_json::from_str(body).unwrap();
        assert_eq!(rows[0].price, 250000.5);
        assert_eq!(rows[0].bathrooms, Some(2.0));
        assert_eq!(rows[0].square_feet, None);
        assert_eq!(rows[0].images[0].image_url, "/uploads/a.png");
    }
}
