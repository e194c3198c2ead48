use serde::{Deserialize, Serialize};

/// Uniform success envelope: `{success, message, data?}`.
/// Error responses use the same shape with `success: false` and an
/// optional `errors` list of field-level problems.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Success envelope with no payload.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }
}

/// One field-level validation problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_envelope_shape() {
        let resp = ApiResponse::ok("Doctors fetched successfully", json!([1, 2]));
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["message"], "Doctors fetched successfully");
        assert_eq!(value["data"], json!([1, 2]));
    }

    #[test]
    fn test_message_envelope_omits_data() {
        let resp = ApiResponse::message("Password changed successfully");
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["success"], true);
        assert!(value.get("data").is_none());
    }

    #[test]
    fn test_field_error_shape() {
        let err = FieldError::new("email", "Please enter a valid email");
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value["field"], "email");
        assert_eq!(value["message"], "Please enter a valid email");
    }
}
