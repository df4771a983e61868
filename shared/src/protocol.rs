//! 后端接口协议定义
//!
//! 每个端点对应一个实现了 [`ApiRequest`] 的请求类型，
//! 由请求类型本身携带路径、方法与响应类型。

use crate::{Folder, SavedImage, UserProfile};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Deserializer, Serialize};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// 该方法是否携带 JSON 请求体
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The response type carried in the `data` field of the backend envelope.
    type Response: DeserializeOwned;
    /// The URL path (or path prefix for endpoints with a trailing id).
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// 是否携带会话令牌；凭据端点为 false，其 401 表示凭据错误而非会话过期
    const AUTHENTICATED: bool = true;

    /// 实际请求路径，带路径参数的端点需要覆盖
    fn path(&self) -> String {
        Self::PATH.to_string()
    }
}

/// 无意义的成功响应，可以从任意 JSON（包括 `null`）反序列化
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Acknowledged;

impl<'de> Deserialize<'de> for Acknowledged {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        IgnoredAny::deserialize(deserializer)?;
        Ok(Acknowledged)
    }
}

/// 后端错误响应体 `{ "error": ..., "message": ... }`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// 优先使用 `message`，其次 `error`
    pub fn text(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .filter(|s| !s.trim().is_empty())
    }
}

// =========================================================
// Auth
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub user_id: String,
    #[serde(default)]
    pub two_factor_enabled: bool,
}

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const PATH: &'static str = "/auth/login";
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone_no: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default, alias = "_id")]
    pub user_id: Option<String>,
}

impl ApiRequest for RegisterRequest {
    type Response = RegisterResponse;
    const PATH: &'static str = "/auth/register";
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutRequest {}

impl ApiRequest for LogoutRequest {
    type Response = Acknowledged;
    const PATH: &'static str = "/auth/logout";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfoRequest;

impl ApiRequest for UserInfoRequest {
    type Response = UserProfile;
    const PATH: &'static str = "/auth/userInfo";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivateTwoFactorRequest {}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivateTwoFactorResponse {
    pub qr_data_url: String,
    #[serde(default)]
    pub recovery_codes: Vec<String>,
}

impl ApiRequest for ActivateTwoFactorRequest {
    type Response = ActivateTwoFactorResponse;
    const PATH: &'static str = "/auth/activate-2fa";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyTwoFactorRequest {
    pub totp: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyTwoFactorResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl ApiRequest for VerifyTwoFactorRequest {
    type Response = VerifyTwoFactorResponse;
    const PATH: &'static str = "/auth/verify-2fa";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

impl ApiRequest for ForgotPasswordRequest {
    type Response = Acknowledged;
    const PATH: &'static str = "/auth/forgot-password";
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;
}

// =========================================================
// Folders & Images
// =========================================================

/// 后端返回的图片记录
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteImage {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(alias = "url")]
    pub image_url: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "folder")]
    pub folder_id: String,
    #[serde(default, alias = "createdAt")]
    pub date: String,
}

impl RemoteImage {
    /// 转换为本地图片记录；嵌套在文件夹中返回时后端可能省略 `folderId`
    pub fn into_saved(self, fallback_folder_id: &str) -> SavedImage {
        let folder_id = if self.folder_id.is_empty() {
            fallback_folder_id.to_string()
        } else {
            self.folder_id
        };
        SavedImage {
            id: self.id,
            image_url: self.image_url,
            name: self.name,
            folder_id,
            date: self.date,
        }
    }
}

/// 后端返回的文件夹记录，图片以内嵌形式返回
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteFolder {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub images: Vec<RemoteImage>,
}

impl RemoteFolder {
    pub fn into_parts(self) -> (Folder, Vec<SavedImage>) {
        let images = self
            .images
            .into_iter()
            .map(|img| img.into_saved(&self.id))
            .collect();
        let folder = Folder {
            id: self.id,
            name: self.name,
            created_at: self.created_at,
            is_default: false,
        };
        (folder, images)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListFoldersRequest;

impl ApiRequest for ListFoldersRequest {
    type Response = Vec<RemoteFolder>;
    const PATH: &'static str = "/folders/get-folder";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolderRequest {
    pub name: String,
}

impl ApiRequest for CreateFolderRequest {
    type Response = RemoteFolder;
    const PATH: &'static str = "/folders/create-folder";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteFolderRequest {
    #[serde(skip)]
    pub id: String,
}

impl ApiRequest for DeleteFolderRequest {
    type Response = Acknowledged;
    const PATH: &'static str = "/folders/delete-folder";
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("{}/{}", Self::PATH, self.id)
    }
}

/// 图片上传目标；请求体为 multipart，不走 JSON 序列化
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadImageRequest {
    #[serde(skip)]
    pub folder_id: String,
}

impl ApiRequest for UploadImageRequest {
    type Response = RemoteImage;
    const PATH: &'static str = "/images/image-upload";
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("{}/{}", Self::PATH, self.folder_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteImageRequest {
    #[serde(skip)]
    pub id: String,
}

impl ApiRequest for DeleteImageRequest {
    type Response = Acknowledged;
    const PATH: &'static str = "/images/image-delete";
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("{}/{}", Self::PATH, self.id)
    }
}

// =========================================================
// Classification
// =========================================================

/// 外部分类服务路径，multipart 字段名见 `MULTIPART_IMAGE_FIELD`
pub const PREDICT_PATH: &str = "/predict";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acknowledged_accepts_anything() {
        let _: Acknowledged = serde_json::from_str("null").unwrap();
        let _: Acknowledged = serde_json::from_str(r#"{"ok":true}"#).unwrap();
        let _: Acknowledged = serde_json::from_str("[1,2]").unwrap();
    }

    #[test]
    fn test_error_body_prefers_message() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"error":"E_DUP","message":"Email already used"}"#).unwrap();
        assert_eq!(body.text(), Some("Email already used"));

        let body: ErrorBody = serde_json::from_str(r#"{"error":"Invalid OTP"}"#).unwrap();
        assert_eq!(body.text(), Some("Invalid OTP"));

        let body: ErrorBody = serde_json::from_str(r#"{"message":"  "}"#).unwrap();
        assert_eq!(body.text(), None);
    }

    #[test]
    fn test_path_parameters() {
        let del = DeleteFolderRequest { id: "f1".into() };
        assert_eq!(del.path(), "/folders/delete-folder/f1");
        let up = UploadImageRequest {
            folder_id: "f2".into(),
        };
        assert_eq!(up.path(), "/images/image-upload/f2");
        let img = DeleteImageRequest { id: "i3".into() };
        assert_eq!(img.path(), "/images/image-delete/i3");
        assert_eq!(ListFoldersRequest.path(), "/folders/get-folder");
    }

    #[test]
    fn test_remote_folder_into_parts_fills_folder_id() {
        let json = r#"{
            "_id": "f1",
            "name": "Greenhouse",
            "createdAt": "2024-02-01T12:00:00Z",
            "images": [
                {"_id": "i1", "imageUrl": "https://cdn/x.jpg", "name": "x.jpg", "createdAt": "2024-02-02"}
            ]
        }"#;
        let remote: RemoteFolder = serde_json::from_str(json).unwrap();
        let (folder, images) = remote.into_parts();
        assert_eq!(folder.id, "f1");
        assert!(!folder.is_default);
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].folder_id, "f1");
        assert_eq!(images[0].date, "2024-02-02");
    }
}
