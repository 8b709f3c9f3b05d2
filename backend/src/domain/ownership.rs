//! Ownership rule shared by every mutating post operation.
//!
//! Checks run in a fixed order: the resource must exist, the caller must be
//! authenticated, and the caller must own the resource. A missing resource is
//! therefore reported before a permission problem.

use super::{Post, UserId};

/// Anything with a single owning user.
pub trait Owned {
    /// User allowed to mutate the resource.
    fn owner_id(&self) -> UserId;
}

impl Owned for Post {
    fn owner_id(&self) -> UserId {
        self.author_id()
    }
}

/// Reason a mutation was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AccessDenied {
    /// The resource does not exist.
    #[error("resource not found")]
    NotFound,
    /// No authenticated identity accompanied the request.
    #[error("authentication required")]
    Unauthenticated,
    /// The caller is not the owner.
    #[error("caller does not own the resource")]
    Forbidden,
}

/// Decide whether `actor` may mutate `resource`.
///
/// # Examples
/// ```
/// use pressroom::domain::{AccessDenied, Owned, UserId, authorize_mutation};
///
/// struct Note(UserId);
/// impl Owned for Note {
///     fn owner_id(&self) -> UserId { self.0 }
/// }
///
/// let owner = UserId::new(1).unwrap();
/// let other = UserId::new(2).unwrap();
/// let note = Note(owner);
///
/// assert!(authorize_mutation(Some(owner), Some(&note)).is_ok());
/// assert_eq!(authorize_mutation(Some(other), Some(&note)).err(), Some(AccessDenied::Forbidden));
/// assert_eq!(
///     authorize_mutation::<Note>(None, None).err(),
///     Some(AccessDenied::NotFound)
/// );
/// ```
pub fn authorize_mutation<R: Owned>(
    actor: Option<UserId>,
    resource: Option<&R>,
) -> Result<&R, AccessDenied> {
    let resource = resource.ok_or(AccessDenied::NotFound)?;
    let actor = actor.ok_or(AccessDenied::Unauthenticated)?;
    if resource.owner_id() != actor {
        return Err(AccessDenied::Forbidden);
    }
    Ok(resource)
}
