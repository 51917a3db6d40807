//! Value Objects

use kernel::id::UserId;

/// Field updates for an owned post; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl PostChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

/// Which posts a listing returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    /// Every post
    All,
    /// Only posts written by this user
    Author(UserId),
}
