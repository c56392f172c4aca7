//! 用户业务服务

use std::sync::{Arc, RwLock};

use super::model::{CreateUserInput, User};
use crate::core::error::CoreError;

/// 内存用户存储，克隆后共享同一份数据
#[derive(Clone)]
pub struct UserService {
    users: Arc<RwLock<Vec<User>>>,
}

impl UserService {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }

    pub fn list_users(&self) -> Result<Vec<User>, CoreError> {
        let users = self.users.read().map_err(|_| poisoned())?;
        Ok(users.clone())
    }

    /// 线性查找第一个 id 匹配的用户
    pub fn get_user(&self, id: Option<i64>) -> Result<User, CoreError> {
        let users = self.users.read().map_err(|_| poisoned())?;
        id.and_then(|id| users.iter().find(|u| u.id == id))
            .cloned()
            .ok_or_else(|| CoreError::NotFound("User not found".to_string()))
    }

    /// 追加新用户，id 取当前长度 + 1
    pub fn create_user(&self, input: CreateUserInput) -> Result<User, CoreError> {
        let mut users = self.users.write().map_err(|_| poisoned())?;
        let user = input.into_user(users.len() as i64 + 1)?;
        users.push(user.clone());
        Ok(user)
    }

    pub fn count(&self) -> Result<usize, CoreError> {
        Ok(self.users.read().map_err(|_| poisoned())?.len())
    }
}

fn poisoned() -> CoreError {
    CoreError::Internal("user store lock poisoned".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::users::model::{seed_users, Tier};

    #[test]
    fn test_get_user() {
        let service = UserService::new(seed_users());
        let user = service.get_user(Some(2)).unwrap();
        assert_eq!(user.name, "Jane Smith");
        assert_eq!(user.tier, Tier::Basic);

        assert!(matches!(
            service.get_user(Some(42)),
            Err(CoreError::NotFound(msg)) if msg == "User not found"
        ));
        assert!(service.get_user(None).is_err());
    }

    #[test]
    fn test_create_user_uses_length_plus_one() {
        let service = UserService::new(seed_users());
        let user = service
            .create_user(CreateUserInput {
                name: Some("Alice".to_string()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(user.id, 4);
        assert_eq!(user.name, "Alice");
        assert_eq!(service.count().unwrap(), 4);
        assert_eq!(service.list_users().unwrap().last(), Some(&user));
    }

    #[test]
    fn test_failed_create_leaves_store_untouched() {
        let service = UserService::new(seed_users());
        let result = service.create_user(CreateUserInput {
            tier: Some("gold".to_string()),
            ..Default::default()
        });

        assert!(result.is_err());
        assert_eq!(service.count().unwrap(), 3);
    }

    #[test]
    fn test_concurrent_creates_get_unique_ids() {
        const WRITERS: i64 = 32;

        let service = UserService::new(seed_users());
        let handles: Vec<_> = (0..WRITERS)
            .map(|i| {
                let service = service.clone();
                std::thread::spawn(move || {
                    service
                        .create_user(CreateUserInput {
                            name: Some(format!("writer-{i}")),
                            ..Default::default()
                        })
                        .unwrap()
                })
            })
            .collect();

        let created: Vec<User> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let mut ids: Vec<i64> = created.iter().map(|u| u.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids, (4..=3 + WRITERS).collect::<Vec<_>>());
        assert_eq!(service.count().unwrap(), 3 + WRITERS as usize);

        // 存储中的 id 与位置一致
        for (index, user) in service.list_users().unwrap().iter().enumerate() {
            assert_eq!(user.id, index as i64 + 1);
        }
    }

    #[test]
    fn test_clones_share_store() {
        let service = UserService::new(Vec::new());
        let other = service.clone();
        other.create_user(CreateUserInput::default()).unwrap();
        assert_eq!(service.count().unwrap(), 1);
    }
}
