//! Membership Applications Use Case

use std::sync::Arc;

use kernel::id::ApplicationId;

use crate::domain::entity::application::{MembershipApplication, NewApplication};
use crate::domain::repository::ApplicationRepository;
use crate::domain::value_object::application_status::ApplicationStatus;
use crate::error::{ClubError, ClubResult};

/// Public join form input
pub struct SubmitApplicationInput {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

/// Applications use case
pub struct ApplicationsUseCase<R>
where
    R: ApplicationRepository,
{
    repo: Arc<R>,
}

impl<R> ApplicationsUseCase<R>
where
    R: ApplicationRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn submit(&self, input: SubmitApplicationInput) -> ClubResult<ApplicationId> {
        let application = NewApplication::new(
            &input.full_name,
            &input.email,
            &input.phone,
            &input.message,
        )?;

        let id = self.repo.submit(&application).await?;

        tracing::info!(application_id = %id, "Membership application received");
        Ok(id)
    }

    pub async fn list(&self) -> ClubResult<Vec<MembershipApplication>> {
        self.repo.list_applications().await
    }

    pub async fn review(&self, id: ApplicationId, status: &str) -> ClubResult<()> {
        let status = ApplicationStatus::from_code(status)?;

        if !self.repo.set_status(id, status).await? {
            return Err(ClubError::ApplicationNotFound);
        }

        tracing::info!(application_id = %id, status = %status, "Application reviewed");
        Ok(())
    }
}
