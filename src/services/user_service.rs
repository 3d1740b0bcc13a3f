use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::domain::User,
    models::dto::request::{CreateUserRequest, UpdateUserRequest},
    models::dto::response::UserDto,
    repositories::UserRepository,
};

pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn create_user(&self, request: CreateUserRequest) -> AppResult<UserDto> {
        request.validate()?;

        if self
            .repository
            .find_by_username(&request.username)
            .await?
            .is_some()
        {
            return Err(AppError::AlreadyExists(format!(
                "User with username '{}' already exists",
                request.username
            )));
        }

        let user = self.repository.create(User::from_request(request)).await?;
        Ok(user.into())
    }

    pub async fn get_user(&self, username: &str) -> AppResult<UserDto> {
        Ok(self.find_user(username).await?.into())
    }

    /// Domain user, for callers that need more than the DTO (token mint).
    pub async fn find_user(&self, username: &str) -> AppResult<User> {
        self.repository
            .find_by_username(username)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("User with username '{}' not found", username))
            })
    }

    pub async fn list_users(&self, offset: i64, limit: i64) -> AppResult<(Vec<UserDto>, i64)> {
        let (users, total) = self.repository.list(offset, limit).await?;
        Ok((users.into_iter().map(UserDto::from).collect(), total))
    }

    pub async fn update_user(
        &self,
        username: &str,
        request: UpdateUserRequest,
    ) -> AppResult<UserDto> {
        request.validate()?;

        let mut user = self
            .repository
            .find_by_username(username)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("User with username '{}' not found", username))
            })?;

        if let Some(first_name) = request.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = request.last_name {
            user.last_name = last_name;
        }
        if let Some(email) = request.email {
            user.email = email;
        }
        if let Some(role) = request.role {
            user.role = role;
        }

        let user = self.repository.update(username, user).await?;
        Ok(user.into())
    }

    pub async fn delete_user(&self, username: &str) -> AppResult<()> {
        self.repository.delete(username).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::UserRole;
    use crate::repositories::user_repository::MockUserRepository;

    fn create_request(username: &str) -> CreateUserRequest {
        CreateUserRequest {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            username: username.to_string(),
            email: format!("{}@example.com", username),
            role: Some(UserRole::Instructor),
        }
    }

    #[actix_rt::test]
    async fn create_user_rejects_duplicate_username() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .returning(|username| Ok(Some(User::test_student(username))));

        let service = UserService::new(Arc::new(repo));
        let result = service.create_user(create_request("johndoe")).await;

        assert!(matches!(result, Err(AppError::AlreadyExists(_))));
    }

    #[actix_rt::test]
    async fn create_user_persists_and_returns_dto() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));
        repo.expect_create().returning(Ok);

        let service = UserService::new(Arc::new(repo));
        let dto = service.create_user(create_request("johndoe")).await.unwrap();

        assert_eq!(dto.username, "johndoe");
        assert_eq!(dto.full_name, "John Doe");
        assert_eq!(dto.role, UserRole::Instructor);
    }

    #[actix_rt::test]
    async fn get_user_maps_missing_to_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repo));
        let result = service.get_user("ghost").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[actix_rt::test]
    async fn update_user_applies_partial_fields() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .returning(|username| Ok(Some(User::test_student(username))));
        repo.expect_update().returning(|_, user| Ok(user));

        let service = UserService::new(Arc::new(repo));
        let request = UpdateUserRequest {
            first_name: Some("Updated".to_string()),
            last_name: None,
            email: None,
            role: None,
        };
        let dto = service.update_user("johndoe", request).await.unwrap();

        assert_eq!(dto.full_name, "Updated User");
    }
}
