//! Bilingual (vi/en) message catalogue and notification templates
//!
//! Every user-facing string the API returns lives here. Lookups always fall
//! back to Vietnamese, which is the product's primary language.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// Supported interface languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lang {
    #[default]
    Vi,
    En,
}

impl Lang {
    /// Parse a language code; anything that is not "en" maps to Vietnamese.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Lang::En,
            _ => Lang::Vi,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Lang::Vi => "vi",
            Lang::En => "en",
        }
    }
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Keys for every translatable API message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    Ok,
    GenericError,
    InvalidInput,

    // Auth
    SigninInvalid,
    SigninSuccess,
    SigninFailed,
    SignupInvalid,
    SignupSuccess,
    SignupFailed,
    UsernameTaken,
    EmailTaken,
    SignoutSuccess,
    LoginRequired,
    LoginRequiredToCreateProject,
    LoginRequiredToApply,
    Forbidden,
    AdminOnly,
    AccountLocked,
    EmailInvalid,
    EmailNotFound,
    OtpSent,
    OtpSendFailed,
    OtpInvalid,
    OtpVerified,
    OtpRequiredBeforeSetPassword,
    PasswordMismatch,
    PasswordSet,
    PasswordSetFailed,

    // Projects
    ProjectInvalid,
    ProjectCreated,
    ProjectCreateFailed,
    ProjectNotFound,
    ProjectIdInvalid,
    ProjectDeleted,
    ProjectDeleteFailed,
    ProjectDeleteForbidden,
    ProjectListSuccess,
    SearchSuccess,
    SearchFailed,
    ProjectCompleted,
    ProjectApproved,
    ProjectRejected,
    PendingProjectsSuccess,

    // Applications
    ApplicationIdInvalid,
    ProjectClosed,
    OwnProjectApplication,
    AlreadyApplied,
    ApplicationSubmitted,
    ApplicationSubmitFailed,
    ApplicationApproved,
    ApplicationApproveFailed,
    ApplicationRejected,
    ApplicationRejectFailed,
    ApplicationsListSuccess,

    // Profiles
    ProfileUpdated,
    ProfileUpdateFailed,
    ProfileFetchSuccess,
    UserNotFound,
    UsersListSuccess,
    UserUpdated,
    UserUpdateFailed,
    MissingFields,

    // Notifications
    NotificationsFetchSuccess,
    NotificationIdRequired,
    NotificationRead,
    NotificationUpdateFailed,
    NotificationDefaultTitle,

    // Reviews
    ReviewSubmitted,
    ReviewInvalid,
}

/// Translate a message key; missing English strings fall back to Vietnamese.
pub fn translate(key: MessageKey, lang: Lang) -> &'static str {
    let (vi, en) = texts(key);
    match lang {
        Lang::Vi => vi,
        Lang::En => {
            if en.is_empty() {
                vi
            } else {
                en
            }
        }
    }
}

fn texts(key: MessageKey) -> (&'static str, &'static str) {
    use MessageKey::*;

    match key {
        Ok => ("OK", "OK"),
        GenericError => (
            "Có lỗi xảy ra. Vui lòng thử lại sau.",
            "Something went wrong. Please try again later.",
        ),
        InvalidInput => ("Thông tin không hợp lệ", "Invalid information"),

        SigninInvalid => (
            "Thông tin đăng nhập không hợp lệ",
            "Invalid sign-in credentials",
        ),
        SigninSuccess => ("Đăng nhập thành công", "Signed in successfully"),
        SigninFailed => ("Lỗi khi đăng nhập", "Failed to sign in"),
        SignupInvalid => ("Thông tin đăng ký không hợp lệ", "Invalid sign-up details"),
        SignupSuccess => ("Đăng ký thành công", "Signed up successfully"),
        SignupFailed => ("Lỗi khi đăng ký", "Failed to sign up"),
        UsernameTaken => ("Username đã được sử dụng", "Username is already taken"),
        EmailTaken => ("Email đã được đăng ký", "Email is already registered"),
        SignoutSuccess => ("Đăng xuất thành công", "Signed out successfully"),
        LoginRequired => ("Bạn cần đăng nhập", "You need to sign in"),
        LoginRequiredToCreateProject => (
            "Bạn cần đăng nhập để tạo dự án",
            "You need to sign in to create a project",
        ),
        LoginRequiredToApply => (
            "Bạn cần đăng nhập để ứng tuyển",
            "You need to sign in to apply",
        ),
        Forbidden => (
            "Bạn không có quyền thực hiện thao tác này",
            "You do not have permission to perform this action",
        ),
        AdminOnly => ("Bạn không có quyền truy cập", "You do not have access"),
        AccountLocked => ("Tài khoản của bạn đã bị khóa", "Your account has been locked"),
        EmailInvalid => ("Email không hợp lệ", "Invalid email"),
        EmailNotFound => (
            "Email không tồn tại trong hệ thống",
            "Email not found in the system",
        ),
        OtpSent => (
            "Chúng tôi đã gửi mã OTP đến email của bạn. Vui lòng kiểm tra hộp thư.",
            "We have sent an OTP code to your email. Please check your inbox.",
        ),
        OtpSendFailed => (
            "Không thể gửi email đặt lại mật khẩu. Vui lòng thử lại sau.",
            "Could not send the password reset email. Please try again later.",
        ),
        OtpInvalid => (
            "Mã OTP không hợp lệ hoặc đã hết hạn",
            "The OTP code is invalid or has expired",
        ),
        OtpVerified => ("Xác thực OTP thành công", "OTP verified successfully"),
        OtpRequiredBeforeSetPassword => (
            "Bạn cần xác thực OTP trước khi đặt mật khẩu mới",
            "You must verify the OTP before setting a new password",
        ),
        PasswordMismatch => (
            "Mật khẩu xác nhận không khớp",
            "Password confirmation does not match",
        ),
        PasswordSet => ("Đặt mật khẩu mới thành công", "New password set successfully"),
        PasswordSetFailed => (
            "Không thể đặt mật khẩu mới. Vui lòng thử lại sau.",
            "Could not set the new password. Please try again later.",
        ),

        ProjectInvalid => ("Thông tin dự án không hợp lệ", "Invalid project details"),
        ProjectCreated => ("Tạo dự án thành công", "Project created successfully"),
        ProjectCreateFailed => ("Lỗi khi tạo dự án", "Failed to create the project"),
        ProjectNotFound => ("Dự án không tồn tại", "Project not found"),
        ProjectIdInvalid => ("ID dự án không hợp lệ", "Invalid project ID"),
        ProjectDeleted => ("Xóa dự án thành công", "Project deleted successfully"),
        ProjectDeleteFailed => ("Xóa dự án thất bại", "Failed to delete the project"),
        ProjectDeleteForbidden => (
            "Bạn không có quyền xóa dự án này",
            "You do not have permission to delete this project",
        ),
        ProjectListSuccess => (
            "Lấy danh sách dự án thành công",
            "Projects fetched successfully",
        ),
        SearchSuccess => ("Tìm kiếm thành công", "Search completed successfully"),
        SearchFailed => ("Lỗi khi tìm kiếm dự án", "Failed to search projects"),
        ProjectCompleted => (
            "Dự án đã được đánh dấu hoàn thành",
            "Project marked as completed",
        ),
        ProjectApproved => ("Duyệt dự án thành công", "Project approved successfully"),
        ProjectRejected => ("Từ chối dự án thành công", "Project rejected successfully"),
        PendingProjectsSuccess => (
            "Lấy danh sách dự án chờ duyệt thành công",
            "Pending projects fetched successfully",
        ),

        ApplicationIdInvalid => ("ID đơn ứng tuyển không hợp lệ", "Invalid application ID"),
        ProjectClosed => (
            "Dự án không còn nhận ứng viên",
            "The project is no longer accepting applicants",
        ),
        OwnProjectApplication => (
            "Bạn không thể ứng tuyển cho dự án của chính mình",
            "You cannot apply to your own project",
        ),
        AlreadyApplied => (
            "Bạn đã ứng tuyển cho dự án này rồi",
            "You have already applied to this project",
        ),
        ApplicationSubmitted => (
            "Gửi đơn ứng tuyển thành công",
            "Application submitted successfully",
        ),
        ApplicationSubmitFailed => (
            "Lỗi khi gửi đơn ứng tuyển",
            "Failed to submit the application",
        ),
        ApplicationApproved => ("Duyệt ứng viên thành công", "Applicant approved successfully"),
        ApplicationApproveFailed => ("Duyệt ứng viên thất bại", "Failed to approve the applicant"),
        ApplicationRejected => (
            "Từ chối ứng viên thành công",
            "Applicant rejected successfully",
        ),
        ApplicationRejectFailed => (
            "Từ chối ứng viên thất bại",
            "Failed to reject the applicant",
        ),
        ApplicationsListSuccess => (
            "Lấy danh sách đơn ứng tuyển thành công",
            "Applications fetched successfully",
        ),

        ProfileUpdated => ("Cập nhật profile thành công", "Profile updated successfully"),
        ProfileUpdateFailed => ("Lỗi khi cập nhật profile", "Failed to update the profile"),
        ProfileFetchSuccess => (
            "Lấy thông tin người dùng thành công",
            "User profile fetched successfully",
        ),
        UserNotFound => (
            "Không tìm thấy thông tin người dùng",
            "User not found",
        ),
        UsersListSuccess => (
            "Lấy danh sách người dùng thành công",
            "Users fetched successfully",
        ),
        UserUpdated => (
            "Cập nhật người dùng thành công",
            "User updated successfully",
        ),
        UserUpdateFailed => ("Cập nhật người dùng thất bại", "Failed to update the user"),
        MissingFields => ("Thiếu thông tin", "Missing information"),

        NotificationsFetchSuccess => (
            "Lấy danh sách thông báo thành công",
            "Notifications fetched successfully",
        ),
        NotificationIdRequired => ("Thiếu notification ID", "Notification ID is required"),
        NotificationRead => (
            "Đã đánh dấu thông báo là đã đọc",
            "Notification marked as read",
        ),
        NotificationUpdateFailed => (
            "Lỗi khi cập nhật thông báo",
            "Failed to update the notification",
        ),
        NotificationDefaultTitle => ("Thông báo", "Notification"),

        ReviewSubmitted => ("Gửi đánh giá thành công", "Review submitted successfully"),
        ReviewInvalid => ("Thông tin đánh giá không hợp lệ", "Invalid review details"),
    }
}

// ---------------------------------------------------------------------------
// Notification templates
// ---------------------------------------------------------------------------

/// Notification event types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Someone wants to join a project (sent to the owner)
    ApplicationReceived,
    /// A project passed admin moderation (sent to the owner)
    ProjectApproved,
    /// An application was accepted (sent to the applicant)
    ApplicationApproved,
    /// A project was rejected by moderation (sent to the owner)
    ProjectRejected,
    /// An application was declined (sent to the applicant)
    ApplicationRejected,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::ApplicationReceived => "application_received",
            NotificationKind::ProjectApproved => "project_approved",
            NotificationKind::ApplicationApproved => "application_approved",
            NotificationKind::ProjectRejected => "project_rejected",
            NotificationKind::ApplicationRejected => "application_rejected",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "application_received" => Some(NotificationKind::ApplicationReceived),
            "project_approved" => Some(NotificationKind::ProjectApproved),
            "application_approved" => Some(NotificationKind::ApplicationApproved),
            "project_rejected" => Some(NotificationKind::ProjectRejected),
            "application_rejected" => Some(NotificationKind::ApplicationRejected),
            _ => None,
        }
    }
}

/// Per-kind template strings for one language
struct NotificationTemplate {
    title: &'static str,
    message: &'static str,
    view_project: &'static str,
}

fn template(kind: NotificationKind, lang: Lang) -> NotificationTemplate {
    match (kind, lang) {
        (NotificationKind::ApplicationReceived, Lang::Vi) => NotificationTemplate {
            title: "Đơn ứng tuyển mới",
            message: "{{applicantName}} (@{{applicantUsername}}) muốn tham gia dự án \"{{projectTitle}}\"",
            view_project: "Xem dự án",
        },
        (NotificationKind::ApplicationReceived, Lang::En) => NotificationTemplate {
            title: "New application",
            message: "{{applicantName}} (@{{applicantUsername}}) wants to join your project \"{{projectTitle}}\"",
            view_project: "View project",
        },
        (NotificationKind::ProjectApproved, Lang::Vi) => NotificationTemplate {
            title: "Dự án đã được duyệt",
            message: "Dự án \"{{projectTitle}}\" của bạn đã được duyệt",
            view_project: "Xem dự án",
        },
        (NotificationKind::ProjectApproved, Lang::En) => NotificationTemplate {
            title: "Project approved",
            message: "Your project \"{{projectTitle}}\" has been approved",
            view_project: "View project",
        },
        (NotificationKind::ApplicationApproved, Lang::Vi) => NotificationTemplate {
            title: "Đã được duyệt vào dự án",
            message: "Bạn đã được duyệt vào dự án \"{{projectTitle}}\"",
            view_project: "Xem dự án",
        },
        (NotificationKind::ApplicationApproved, Lang::En) => NotificationTemplate {
            title: "Application approved",
            message: "You have been accepted into the project \"{{projectTitle}}\"",
            view_project: "View project",
        },
        (NotificationKind::ProjectRejected, Lang::Vi) => NotificationTemplate {
            title: "Dự án đã bị từ chối",
            message: "Dự án \"{{projectTitle}}\" của bạn đã bị từ chối",
            view_project: "Xem dự án",
        },
        (NotificationKind::ProjectRejected, Lang::En) => NotificationTemplate {
            title: "Project rejected",
            message: "Your project \"{{projectTitle}}\" has been rejected",
            view_project: "View project",
        },
        (NotificationKind::ApplicationRejected, Lang::Vi) => NotificationTemplate {
            title: "Đã bị từ chối",
            message: "Bạn đã bị từ chối khi tham gia dự án \"{{projectTitle}}\"",
            view_project: "Xem dự án",
        },
        (NotificationKind::ApplicationRejected, Lang::En) => NotificationTemplate {
            title: "Application rejected",
            message: "Your application to the project \"{{projectTitle}}\" was declined",
            view_project: "View project",
        },
    }
}

/// Link attached to a rendered notification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationLink {
    pub url: String,
    pub text: String,
}

/// A notification rendered for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedNotification {
    pub title: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<NotificationLink>,
}

static PLACEHOLDER: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"\{\{(\w+)\}\}").expect("Invalid placeholder pattern"));

/// Substitute `{{key}}` placeholders from a JSON payload. Unknown keys keep
/// their placeholder, matching the original web client's renderer.
fn interpolate(template: &str, payload: &serde_json::Value) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &regex::Captures<'_>| {
            let key = &caps[1];
            match payload.get(key) {
                Some(serde_json::Value::String(s)) => s.clone(),
                Some(other) if !other.is_null() => other.to_string(),
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Render a stored notification row (type + JSON payload) into display text.
///
/// Unknown types and unparsable payloads fall back to the raw message so a
/// malformed row never breaks the listing.
pub fn render_notification(
    kind: Option<&str>,
    message_json: Option<&str>,
    lang: Lang,
) -> RenderedNotification {
    let fallback_title = translate(MessageKey::NotificationDefaultTitle, lang).to_string();

    let (Some(kind_str), Some(raw)) = (kind, message_json) else {
        return RenderedNotification {
            title: fallback_title,
            text: message_json.unwrap_or_default().to_string(),
            link: None,
        };
    };

    let Some(kind) = NotificationKind::from_str(kind_str) else {
        return RenderedNotification {
            title: fallback_title,
            text: raw.to_string(),
            link: None,
        };
    };

    let payload: serde_json::Value = match serde_json::from_str(raw) {
        Result::Ok(value) => value,
        Err(_) => {
            return RenderedNotification {
                title: fallback_title,
                text: raw.to_string(),
                link: None,
            };
        }
    };

    let tpl = template(kind, lang);
    let text = interpolate(tpl.message, &payload);

    let link = payload
        .get("projectId")
        .and_then(serde_json::Value::as_i64)
        .map(|project_id| NotificationLink {
            url: format!("/project/{}", project_id),
            text: tpl.view_project.to_string(),
        });

    RenderedNotification {
        title: tpl.title.to_string(),
        text,
        link,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lang_from_code() {
        assert_eq!(Lang::from_code("en"), Lang::En);
        assert_eq!(Lang::from_code("EN"), Lang::En);
        assert_eq!(Lang::from_code("vi"), Lang::Vi);
        assert_eq!(Lang::from_code(""), Lang::Vi);
        assert_eq!(Lang::from_code("fr"), Lang::Vi);
    }

    #[test]
    fn test_translate_both_languages() {
        assert_eq!(
            translate(MessageKey::SigninSuccess, Lang::Vi),
            "Đăng nhập thành công"
        );
        assert_eq!(
            translate(MessageKey::SigninSuccess, Lang::En),
            "Signed in successfully"
        );
    }

    #[test]
    fn test_interpolate_replaces_known_keys() {
        let payload = serde_json::json!({
            "applicantName": "Nguyễn Văn A",
            "applicantUsername": "nva",
            "projectTitle": "Website bán hàng",
        });
        let text = interpolate(
            "{{applicantName}} (@{{applicantUsername}}) muốn tham gia dự án \"{{projectTitle}}\"",
            &payload,
        );
        assert_eq!(
            text,
            "Nguyễn Văn A (@nva) muốn tham gia dự án \"Website bán hàng\""
        );
    }

    #[test]
    fn test_interpolate_keeps_unknown_keys() {
        let payload = serde_json::json!({});
        assert_eq!(interpolate("hello {{who}}", &payload), "hello {{who}}");
    }

    #[test]
    fn test_render_notification_with_link() {
        let payload = r#"{"projectId": 7, "projectTitle": "App di động"}"#;
        let rendered = render_notification(Some("project_approved"), Some(payload), Lang::Vi);

        assert_eq!(rendered.title, "Dự án đã được duyệt");
        assert_eq!(rendered.text, "Dự án \"App di động\" của bạn đã được duyệt");
        assert_eq!(
            rendered.link,
            Some(NotificationLink {
                url: "/project/7".to_string(),
                text: "Xem dự án".to_string(),
            })
        );
    }

    #[test]
    fn test_render_notification_unknown_type_falls_back_to_raw() {
        let rendered = render_notification(Some("mystery"), Some("raw text"), Lang::En);
        assert_eq!(rendered.text, "raw text");
        assert_eq!(rendered.title, "Notification");
        assert!(rendered.link.is_none());
    }

    #[test]
    fn test_render_notification_bad_json_falls_back_to_raw() {
        let rendered = render_notification(Some("project_approved"), Some("{not json"), Lang::Vi);
        assert_eq!(rendered.text, "{not json");
        assert!(rendered.link.is_none());
    }
}
