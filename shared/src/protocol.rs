use crate::{Session, User};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// =========================================================
// Authentication
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    pub password_confirm: String,
}

/// Login answers `{token, user: {...}}` while signup answers the flat
/// `{token, email, username}`. Both collapse into a [`Session`].
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AuthResponse {
    Nested {
        token: String,
        user: User,
    },
    Flat {
        token: String,
        email: String,
        #[serde(default)]
        username: String,
    },
}

impl From<AuthResponse> for Session {
    fn from(resp: AuthResponse) -> Self {
        match resp {
            AuthResponse::Nested { token, user } => Session { token, user },
            AuthResponse::Flat {
                token,
                email,
                username,
            } => Session {
                token,
                user: User {
                    email,
                    username,
                    ..Default::default()
                },
            },
        }
    }
}

// =========================================================
// Account
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeEmailRequest {
    pub new_email: String,
    pub password: String,
}

/// Upload endpoints report the stored file under either key.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadedFile {
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl UploadedFile {
    pub fn location(&self) -> Option<&str> {
        self.avatar_url
            .as_deref()
            .or(self.url.as_deref())
            .filter(|s| !s.is_empty())
    }
}

// =========================================================
// Export
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExportRequest {
    pub format: ExportFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_response_accepts_login_and_signup_shapes() {
        let login: AuthResponse = serde_json::from_str(
            r#"{"token":"T1","user":{"id":1,"email":"a@b.com","username":"a"}}"#,
        )
        .unwrap();
        let session = Session::from(login);
        assert_eq!(session.token, "T1");
        assert_eq!(session.user.email, "a@b.com");

        let signup: AuthResponse =
            serde_json::from_str(r#"{"token":"T2","email":"c@d.com","username":"c"}"#).unwrap();
        let session = Session::from(signup);
        assert_eq!(session.token, "T2");
        assert_eq!(session.user.username, "c");
    }

    #[test]
    fn export_request_omits_missing_dates() {
        let req = ExportRequest {
            format: ExportFormat::Json,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 31),
            end_date: None,
        };
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"format": "json", "start_date": "2024-01-31"})
        );
    }

    #[test]
    fn uploaded_file_prefers_avatar_url() {
        let file: UploadedFile =
            serde_json::from_str(r#"{"avatar_url":"/m/a.png","url":"/m/b.png"}"#).unwrap();
        assert_eq!(file.location(), Some("/m/a.png"));
        let file: UploadedFile = serde_json::from_str(r#"{"url":""}"#).unwrap();
        assert_eq!(file.location(), None);
    }
}
