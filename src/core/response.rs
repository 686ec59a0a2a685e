//! 核心响应处理模块

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// API 响应结构
///
/// 业务失败（如保存失败）同样以该结构返回，`success` 为 `false`。
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub request_id: String,
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    fn build(success: bool, message: Option<String>, data: Option<T>) -> Self {
        Self {
            success,
            message,
            data,
            request_id: Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn ok() -> Self {
        Self::build(true, None, None)
    }

    pub fn success(data: T) -> Self {
        Self::build(true, None, Some(data))
    }

    pub fn success_with_message(message: impl Into<String>, data: T) -> Self {
        Self::build(true, Some(message.into()), Some(data))
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::build(false, Some(message.into()), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_fields_are_omitted() {
        let body = serde_json::to_value(ApiResponse::<()>::ok()).unwrap();
        assert_eq!(body["success"], true);
        assert!(body.get("message").is_none());
        assert!(body.get("data").is_none());
        assert!(body["request_id"].is_string());
    }

    #[test]
    fn test_error_carries_message() {
        let body = serde_json::to_value(ApiResponse::<u32>::error("保存失败")).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "保存失败");
        assert!(body.get("data").is_none());
    }

    #[test]
    fn test_success_with_message() {
        let body =
            serde_json::to_value(ApiResponse::success_with_message("成功导入 2 条数据", 2)).unwrap();
        assert_eq!(body["data"], 2);
        assert_eq!(body["message"], "成功导入 2 条数据");
    }
}
