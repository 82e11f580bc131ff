//! Member Administration Use Case

use std::sync::Arc;

use auth::models::member_role::MemberRole;
use kernel::id::MemberId;

use crate::domain::entity::member::{Member, RoleChange, RoleChangeOutcome, RoleChangeRequest};
use crate::domain::repository::MemberRepository;
use crate::domain::value_object::text;
use crate::error::{ClubError, ClubResult};

pub const REASON_MAX_LENGTH: usize = 500;

/// Role change input
pub struct ChangeRoleInput {
    pub member_id: MemberId,
    pub role: String,
    pub admin_id: Option<MemberId>,
    pub reason: Option<String>,
}

/// Members use case
pub struct MembersUseCase<R>
where
    R: MemberRepository,
{
    repo: Arc<R>,
}

impl<R> MembersUseCase<R>
where
    R: MemberRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list_active(&self) -> ClubResult<Vec<Member>> {
        self.repo.list_active().await
    }

    pub async fn list_removed(&self) -> ClubResult<Vec<Member>> {
        self.repo.list_removed().await
    }

    pub async fn role_history(&self) -> ClubResult<Vec<RoleChange>> {
        self.repo.role_history().await
    }

    /// Soft delete a member. Admins cannot be removed.
    pub async fn remove(&self, id: MemberId) -> ClubResult<()> {
        let member = self
            .repo
            .find_member(id)
            .await?
            .filter(|m| !m.is_removed())
            .ok_or(ClubError::MemberNotFound)?;

        if member.role.is_admin() {
            return Err(ClubError::CannotRemoveAdmin);
        }

        if !self.repo.soft_delete(id).await? {
            // Promoted or removed since the lookup above
            let promoted = self
                .repo
                .find_member(id)
                .await?
                .is_some_and(|m| !m.is_removed() && m.role.is_admin());
            return Err(if promoted {
                ClubError::CannotRemoveAdmin
            } else {
                ClubError::MemberNotFound
            });
        }

        tracing::info!(member_id = %id, "Member removed");
        Ok(())
    }

    pub async fn restore(&self, id: MemberId) -> ClubResult<()> {
        if !self.repo.restore(id).await? {
            return Err(ClubError::MemberNotFound);
        }

        tracing::info!(member_id = %id, "Member restored");
        Ok(())
    }

    pub async fn change_role(&self, input: ChangeRoleInput) -> ClubResult<RoleChangeOutcome> {
        let request = RoleChangeRequest {
            member_id: input.member_id,
            new_role: MemberRole::from_code(&input.role)?,
            changed_by: input.admin_id,
            reason: text::optional("Reason", input.reason.as_deref(), REASON_MAX_LENGTH)?,
        };

        let outcome = self
            .repo
            .change_role(&request)
            .await?
            .ok_or(ClubError::MemberNotFound)?;

        match outcome {
            RoleChangeOutcome::Changed { from, to } => tracing::info!(
                member_id = %request.member_id,
                from = %from,
                to = %to,
                "Member role changed"
            ),
            RoleChangeOutcome::Unchanged => tracing::debug!(
                member_id = %request.member_id,
                "Role change requested with current role"
            ),
        }

        Ok(outcome)
    }
}
