//! Users, sessions and orders

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{courses::CourseId, ids::TypedId};

/// User ID
pub type UserId = TypedId<UserProfile>;

/// Order ID
pub type OrderId = TypedId<Order>;

/// Account role stored on the profile document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular customer.
    #[default]
    User,

    /// Storefront administrator.
    Admin,
}

/// Signed-in account as reported by the auth service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    /// Account key, shared with the profile document key.
    pub uid: UserId,

    /// Account email, when the identity has one.
    pub email: Option<String>,

    /// Display name.
    pub display_name: Option<String>,

    /// Avatar URL supplied by an identity provider.
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
}

/// Identity providers accepted for federated sign-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentityProvider {
    /// Google accounts.
    Google,
}

impl IdentityProvider {
    /// Provider id understood by the auth service.
    pub const fn provider_id(self) -> &'static str {
        match self {
            Self::Google => "google.com",
        }
    }
}

/// Token obtained from a provider's own sign-in flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderCredential {
    /// Issuing provider.
    pub provider: IdentityProvider,

    /// Provider-issued ID token.
    pub id_token: String,
}

/// Profile document in the `users` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Account email
    pub email: Option<String>,

    /// Display name
    pub display_name: Option<String>,

    /// Avatar URL
    #[serde(rename = "photoURL", default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,

    /// When the profile was first written
    #[serde(default)]
    pub created_at: Option<Timestamp>,

    /// Account role
    #[serde(default)]
    pub role: Role,

    /// Enrolled course keys; grows by set union only.
    #[serde(default)]
    pub enrolled_courses: Vec<CourseId>,

    /// Whether the account may sign in
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

const fn active_by_default() -> bool {
    true
}

impl UserProfile {
    /// Profile written for a freshly created account.
    pub fn new_member(user: &AuthUser, created_at: Timestamp) -> Self {
        Self {
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            photo_url: user.photo_url.clone(),
            created_at: Some(created_at),
            role: Role::User,
            enrolled_courses: Vec::new(),
            is_active: true,
        }
    }

    /// Whether the profile carries the admin role.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Whether `course` is in the enrolled set.
    pub fn is_enrolled(&self, course: &CourseId) -> bool {
        self.enrolled_courses.contains(course)
    }
}

/// Profile document together with its key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Profile key
    pub id: UserId,

    /// Profile fields
    #[serde(flatten)]
    pub profile: UserProfile,
}

/// Order status. Enrollment only ever records completed orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Paid and fulfilled
    Completed,
}

/// Append-only enrollment record in the `orders` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Buyer
    pub user_id: UserId,

    /// Course bought
    pub course_id: CourseId,

    /// Order status
    pub status: OrderStatus,

    /// When the order was placed
    pub created_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn profile_defaults_fill_missing_fields() -> TestResult {
        let profile: UserProfile = serde_json::from_value(serde_json::json!({
            "email": "ana@example.test",
            "displayName": "Ana"
        }))?;

        assert_eq!(profile.role, Role::User);
        assert!(profile.enrolled_courses.is_empty());
        assert!(profile.is_active);
        assert!(!profile.is_admin());

        Ok(())
    }

    #[test]
    fn admin_role_parses_from_lowercase() -> TestResult {
        let profile: UserProfile = serde_json::from_value(serde_json::json!({
            "email": null,
            "displayName": null,
            "role": "admin"
        }))?;

        assert!(profile.is_admin());

        Ok(())
    }

    #[test]
    fn order_serializes_with_camel_case_keys() -> TestResult {
        let order = Order {
            user_id: UserId::new("u1"),
            course_id: CourseId::new("c1"),
            status: OrderStatus::Completed,
            created_at: Timestamp::UNIX_EPOCH,
        };

        let value = serde_json::to_value(&order)?;

        assert_eq!(value["userId"], "u1");
        assert_eq!(value["courseId"], "c1");
        assert_eq!(value["status"], "completed");

        Ok(())
    }
}
