//! Authorization policy - plain predicate functions over a principal and a
//! resource, composable with AND/OR.
//!
//! Read access is open to everyone (visibility filtering happens in the
//! handlers); these checks gate mutations only.

use uuid::Uuid;

use crate::domain::Post;

/// The acting principal, decoded from an access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
    pub is_staff: bool,
}

/// A single authorization check against a resource.
pub type Check<R> = fn(&Principal, &R) -> bool;

/// Grant if any one check passes.
pub fn any_of<R>(checks: &[Check<R>], principal: &Principal, resource: &R) -> bool {
    checks.iter().any(|check| check(principal, resource))
}

/// Grant only if every check passes.
pub fn all_of<R>(checks: &[Check<R>], principal: &Principal, resource: &R) -> bool {
    checks.iter().all(|check| check(principal, resource))
}

pub fn is_staff<R>(principal: &Principal, _resource: &R) -> bool {
    principal.is_staff
}

pub fn is_author(principal: &Principal, post: &Post) -> bool {
    principal.user_id == post.author_id
}

/// Create/update on a post: author only. Staff status grants no write
/// access to someone else's post.
pub fn can_edit_post(principal: &Principal, post: &Post) -> bool {
    is_author(principal, post)
}

/// Delete on a post: staff or author.
pub fn can_delete_post(principal: &Principal, post: &Post) -> bool {
    any_of(&[is_staff, is_author], principal, post)
}

/// Staff see every post; everyone else only published ones.
pub fn can_view_post(principal: Option<&Principal>, post: &Post) -> bool {
    use crate::domain::PostStatus;

    match principal {
        Some(p) if p.is_staff => true,
        _ => post.status == PostStatus::Published,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Post, PostStatus};

    fn principal(is_staff: bool) -> Principal {
        Principal {
            user_id: Uuid::new_v4(),
            is_staff,
        }
    }

    fn post_by(author: &Principal) -> Post {
        Post::new(author.user_id, "T".into(), "C".into(), Uuid::new_v4())
    }

    #[test]
    fn test_author_can_edit_and_delete() {
        let author = principal(false);
        let post = post_by(&author);

        assert!(can_edit_post(&author, &post));
        assert!(can_delete_post(&author, &post));
    }

    #[test]
    fn test_staff_can_delete_but_not_edit_others_posts() {
        let staff = principal(true);
        let post = post_by(&principal(false));

        assert!(can_delete_post(&staff, &post));
        assert!(!can_edit_post(&staff, &post));
    }

    #[test]
    fn test_stranger_can_neither_edit_nor_delete() {
        let stranger = principal(false);
        let post = post_by(&principal(false));

        assert!(!can_edit_post(&stranger, &post));
        assert!(!can_delete_post(&stranger, &post));
    }

    #[test]
    fn test_draft_visibility() {
        let staff = principal(true);
        let reader = principal(false);
        let draft = post_by(&principal(false));

        assert!(can_view_post(Some(&staff), &draft));
        assert!(!can_view_post(Some(&reader), &draft));
        assert!(!can_view_post(None, &draft));

        let mut published = draft.clone();
        published.status = PostStatus::Published;
        assert!(can_view_post(None, &published));
    }

    #[test]
    fn test_combinators() {
        let staff = principal(true);
        let post = post_by(&principal(false));

        assert!(any_of(&[is_staff, is_author], &staff, &post));
        assert!(!all_of(&[is_staff, is_author], &staff, &post));
    }
}
