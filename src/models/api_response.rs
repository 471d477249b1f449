use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Uniform envelope for every API response.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[schema(nullable = false)]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success() {
        let response = ApiResponse::success("test data");

        assert!(response.success);
        assert_eq!(response.data, Some("test data"));
        assert_eq!(response.error, None);
    }

    #[test]
    fn test_error() {
        let response: ApiResponse<()> = ApiResponse::error("test error");

        assert!(!response.success);
        assert!(response.data.is_none());
        assert_eq!(response.error, Some("test error".to_string()));
    }
}
