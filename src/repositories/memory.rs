//! In-process [`UserStore`] used by service and router tests.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::error::{AppError, AppResult};
use crate::models::{
    NewUser, PaginationParameters, UpdateUser, User, UserProfile, UserSummary, UsersFilter,
};
use crate::repositories::UserStore;

#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<User>> {
        self.users.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: i32) -> Option<User> {
        self.lock().iter().find(|u| u.id == id).cloned()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let mut users = self.lock();
        if users.iter().any(|u| u.email == new_user.email) {
            return Err(AppError::Duplicate {
                entity: "users".to_string(),
                field: "email".to_string(),
                value: new_user.email,
            });
        }
        if let Some(manager_id) = new_user.manager_id {
            if !users.iter().any(|u| u.id == manager_id) {
                return Err(AppError::Validation {
                    field: "manager_id".to_string(),
                    reason: format!("Nenhum registro corresponde a manager_id = {manager_id}"),
                });
            }
        }

        let user = User {
            id: users.len() as i32 + 1,
            email: new_user.email,
            password: new_user.password,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            avatar_url: new_user.avatar_url,
            phone: new_user.phone,
            role: new_user.role,
            manager_id: new_user.manager_id,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.lock();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_profile_by_id(&self, id: i32) -> AppResult<Option<UserProfile>> {
        Ok(self.get(id).map(UserProfile::from))
    }

    async fn list(
        &self,
        filter: &UsersFilter,
        pagination: PaginationParameters,
    ) -> AppResult<Vec<UserSummary>> {
        let users = self.lock();
        Ok(users
            .iter()
            .filter(|u| filter.matches(u))
            .skip(pagination.skip as usize)
            .take(pagination.per_page_number as usize)
            .cloned()
            .map(UserSummary::from)
            .collect())
    }

    async fn count(&self, filter: &UsersFilter) -> AppResult<i64> {
        let users = self.lock();
        Ok(users.iter().filter(|u| filter.matches(u)).count() as i64)
    }

    async fn update(&self, id: i32, changes: UpdateUser) -> AppResult<usize> {
        let mut users = self.lock();
        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(0);
        };

        if let Some(first_name) = changes.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = changes.last_name {
            user.last_name = last_name;
        }
        if let Some(phone) = changes.phone {
            user.phone = Some(phone);
        }
        Ok(1)
    }
}
