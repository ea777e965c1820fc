//! Driving port for editing the caller's own profile.
//!
//! Every operation takes the [`AuthContext`] so the target identity is the
//! authenticated subject and cannot be chosen by the request body.

use async_trait::async_trait;

use crate::domain::{AuthContext, AvatarUrl, Error, ProfileUpdate, User};

/// Domain use-case port for profile mutation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileCommand: Send + Sync {
    /// Update name and/or about.
    async fn update_profile(
        &self,
        auth: &AuthContext,
        update: &ProfileUpdate,
    ) -> Result<User, Error>;

    /// Replace the avatar.
    async fn update_avatar(&self, auth: &AuthContext, avatar: &AvatarUrl) -> Result<User, Error>;
}
