//! 用户数据模型

use serde::{Deserialize, Serialize};

use crate::core::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Basic,
    Premium,
}

impl Tier {
    fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "basic" => Ok(Tier::Basic),
            "premium" => Ok(Tier::Premium),
            other => Err(CoreError::Internal(format!(
                "unknown tier `{other}`, expected `basic` or `premium`"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub tier: Tier,
}

/// 创建用户请求，所有字段可选
#[derive(Debug, Default, Deserialize)]
pub struct CreateUserInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub tier: Option<String>,
}

impl CreateUserInput {
    pub const DEFAULT_NAME: &'static str = "New User";
    pub const DEFAULT_EMAIL: &'static str = "user@example.com";

    /// 补齐默认值，空字符串视同缺省
    pub fn into_user(self, id: i64) -> Result<User, CoreError> {
        let tier = match self.tier.filter(|t| !t.is_empty()) {
            Some(t) => Tier::parse(&t)?,
            None => Tier::Basic,
        };

        Ok(User {
            id,
            name: non_empty_or(self.name, Self::DEFAULT_NAME),
            email: non_empty_or(self.email, Self::DEFAULT_EMAIL),
            tier,
        })
    }
}

pub(crate) fn non_empty_or(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// 启动时的种子用户
pub fn seed_users() -> Vec<User> {
    vec![
        User {
            id: 1,
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            tier: Tier::Premium,
        },
        User {
            id: 2,
            name: "Jane Smith".to_string(),
            email: "jane@example.com".to_string(),
            tier: Tier::Basic,
        },
        User {
            id: 3,
            name: "Bob Johnson".to_string(),
            email: "bob@example.com".to_string(),
            tier: Tier::Premium,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let user = CreateUserInput::default().into_user(4).unwrap();
        assert_eq!(user.name, "New User");
        assert_eq!(user.email, "user@example.com");
        assert_eq!(user.tier, Tier::Basic);
    }

    #[test]
    fn test_empty_strings_fall_back() {
        let input = CreateUserInput {
            name: Some(String::new()),
            email: Some("a@b.c".to_string()),
            tier: Some(String::new()),
        };
        let user = input.into_user(9).unwrap();
        assert_eq!(user.name, "New User");
        assert_eq!(user.email, "a@b.c");
        assert_eq!(user.tier, Tier::Basic);
    }

    #[test]
    fn test_unknown_tier_rejected() {
        let input = CreateUserInput {
            tier: Some("gold".to_string()),
            ..Default::default()
        };
        assert!(matches!(input.into_user(1), Err(CoreError::Internal(_))));
    }

    #[test]
    fn test_tier_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Tier::Premium).unwrap(), "premium");
    }
}
