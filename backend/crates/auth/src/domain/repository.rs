//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::user::User;
use crate::domain::value_object::user_name::UserName;
use crate::error::InternalResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Persist a new user
    ///
    /// A taken user name is a store failure, not a distinct outcome.
    async fn create(&self, user: &User) -> InternalResult<()>;

    /// Find user by user name (exact match)
    async fn find_by_user_name(&self, user_name: &UserName) -> InternalResult<Option<User>>;
}
