use lumina_core::UserId;

/// Identity context for a request.
///
/// Inserted by [`crate::middleware::identity_middleware`] on every request;
/// `user_id` is `None` when the caller sent no identity header.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct IdentityContext {
    user_id: Option<UserId>,
}

impl IdentityContext {
    pub fn new(user_id: Option<UserId>) -> Self {
        Self { user_id }
    }

    pub fn anonymous() -> Self {
        Self { user_id: None }
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }
}
