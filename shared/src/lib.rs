use serde::{Deserialize, Serialize};

pub mod date;
pub mod protocol;

pub use date::Timestamp;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const MULTIPART_IMAGE_FIELD: &str = "image";
pub const RECOVERY_CODES_FILE_NAME: &str = "plantguard-recovery-codes.txt";

// =========================================================
// 用户模型 (User)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_no: u64,
    #[serde(default)]
    pub two_factor_activated: bool,
    pub created_at: String,
}

impl UserProfile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// 头像占位用的首字母
    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .take(1)
            .chain(self.last_name.chars().take(1))
            .flat_map(char::to_uppercase)
            .collect()
    }
}

// =========================================================
// 文件夹与图片 (Organizer)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: String,
    pub name: String,
    pub created_at: String,
    /// 客户端合成的病害分类文件夹，不可删除也不可上传
    #[serde(default)]
    pub is_default: bool,
}

impl Folder {
    pub fn created_timestamp(&self) -> Timestamp {
        Timestamp::parse(&self.created_at).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedImage {
    pub id: String,
    pub image_url: String,
    pub name: String,
    pub folder_id: String,
    pub date: String,
}

/// 分类服务返回结果，内容对客户端不透明
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub disease: String,
    pub confidence: f64,
    pub description: String,
}

impl Prediction {
    /// 置信度展示文本，数值按服务返回原样输出
    pub fn confidence_label(&self) -> String {
        format!("{}% Match", self.confidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_profile_from_backend_json() {
        let json = r#"{
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "phoneNo": 5551234567,
            "twoFactorActivated": true,
            "createdAt": "2024-01-15T10:00:00.000Z"
        }"#;

        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.full_name(), "Ada Lovelace");
        assert_eq!(profile.initials(), "AL");
        assert_eq!(profile.phone_no, 5551234567);
        assert!(profile.two_factor_activated);
    }

    #[test]
    fn test_folder_created_timestamp_orders_by_time() {
        let older = Folder {
            id: "a".into(),
            name: "older".into(),
            created_at: "2024-01-10T08:00:00Z".into(),
            is_default: false,
        };
        let newer = Folder {
            id: "b".into(),
            name: "newer".into(),
            created_at: "2024-01-12".into(),
            is_default: false,
        };
        assert!(newer.created_timestamp() > older.created_timestamp());
    }

    #[test]
    fn test_confidence_label_is_verbatim() {
        let mut p = Prediction {
            disease: "Tomato_Late_blight".into(),
            confidence: 0.94,
            description: String::new(),
        };
        assert_eq!(p.confidence_label(), "0.94% Match");
        p.confidence = 89.0;
        assert_eq!(p.confidence_label(), "89% Match");
        p.confidence = 1.0;
        assert_eq!(p.confidence_label(), "1% Match");
        p.confidence = 97.25;
        assert_eq!(p.confidence_label(), "97.25% Match");
    }
}
