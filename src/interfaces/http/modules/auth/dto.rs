//! Authentication DTOs

use serde::Serialize;
use utoipa::ToSchema;

use crate::interfaces::http::modules::users::UserView;

/// Signed-in user; the session token travels in `x-needle-token`
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionEnvelope {
    pub user: UserView,
}
