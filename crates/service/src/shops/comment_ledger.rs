//! Ordered comments on a shop (newest first) and the authorship rule for
//! removing them.

use chrono::Utc;
use models::{Comment, ObjectId};

use crate::errors::ServiceError;
use crate::shops::domain::AuthorProfile;

/// A comment that passed validation but has not been placed in a ledger yet.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentDraft {
    text: String,
    review: f64,
}

impl CommentDraft {
    /// `text` must be non-blank and `review` must parse as a finite number.
    pub fn parse(text: &str, review: &str) -> Result<Self, ServiceError> {
        if text.trim().is_empty() {
            return Err(ServiceError::Validation("comment text must not be empty".into()));
        }
        let review: f64 = review
            .trim()
            .parse()
            .map_err(|_| ServiceError::Validation(format!("review `{review}` is not a number")))?;
        if !review.is_finite() {
            return Err(ServiceError::Validation("review must be a finite number".into()));
        }
        Ok(Self { text: text.to_string(), review })
    }

    pub fn review(&self) -> f64 { self.review }
}

/// Build a comment from the draft with a fresh id and the author's current
/// profile, prepend it, and return a copy.
pub fn add(comments: &mut Vec<Comment>, author: &AuthorProfile, draft: &CommentDraft) -> Comment {
    let comment = Comment {
        id: ObjectId::new(),
        text: draft.text.clone(),
        review: draft.review,
        author: author.user_id.clone(),
        name: author.name.clone(),
        avatar: author.avatar.clone(),
        date: Utc::now(),
    };
    comments.insert(0, comment.clone());
    comment
}

/// Remove the comment with `comment_id`, only if `caller` wrote it.
pub fn remove(comments: &mut Vec<Comment>, comment_id: &ObjectId, caller: &str) -> Result<Comment, ServiceError> {
    let idx = comments
        .iter()
        .position(|c| &c.id == comment_id)
        .ok_or_else(|| ServiceError::not_found("comment"))?;
    if comments[idx].author != caller {
        return Err(ServiceError::Unauthorized("only the author may delete this comment".into()));
    }
    Ok(comments.remove(idx))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author(id: &str) -> AuthorProfile {
        AuthorProfile { user_id: id.into(), name: format!("{id}-name"), avatar: format!("{id}.png") }
    }

    #[test]
    fn draft_validation() {
        assert!(CommentDraft::parse("nice", "4").is_ok());
        assert_eq!(CommentDraft::parse("nice", " 3.5 ").unwrap().review(), 3.5);
        assert!(matches!(CommentDraft::parse("  ", "4"), Err(ServiceError::Validation(_))));
        assert!(matches!(CommentDraft::parse("nice", "four"), Err(ServiceError::Validation(_))));
        assert!(matches!(CommentDraft::parse("nice", ""), Err(ServiceError::Validation(_))));
        assert!(matches!(CommentDraft::parse("nice", "NaN"), Err(ServiceError::Validation(_))));
        assert!(matches!(CommentDraft::parse("nice", "inf"), Err(ServiceError::Validation(_))));
    }

    #[test]
    fn add_snapshots_author_and_prepends() {
        let mut comments = Vec::new();
        let first = add(&mut comments, &author("a"), &CommentDraft::parse("one", "4").unwrap());
        let second = add(&mut comments, &author("b"), &CommentDraft::parse("two", "5").unwrap());
        assert_ne!(first.id, second.id);
        assert_eq!(comments[0].id, second.id);
        assert_eq!(comments[1].id, first.id);
        assert_eq!(comments[1].name, "a-name");
        assert_eq!(comments[1].avatar, "a.png");
        assert_eq!(comments[0].author, "b");
    }

    #[test]
    fn remove_requires_author() {
        let mut comments = Vec::new();
        let c = add(&mut comments, &author("a"), &CommentDraft::parse("one", "4").unwrap());
        assert!(matches!(remove(&mut comments, &c.id, "b"), Err(ServiceError::Unauthorized(_))));
        assert_eq!(comments.len(), 1);
    }

    #[test]
    fn remove_missing_is_not_found() {
        let mut comments = Vec::new();
        add(&mut comments, &author("a"), &CommentDraft::parse("one", "4").unwrap());
        assert!(matches!(remove(&mut comments, &ObjectId::new(), "a"), Err(ServiceError::NotFound(_))));
    }

    #[test]
    fn remove_preserves_order_of_others() {
        let mut comments = Vec::new();
        let ids: Vec<ObjectId> = ["x", "y", "z"]
            .iter()
            .map(|t| add(&mut comments, &author("a"), &CommentDraft::parse(t, "3").unwrap()).id)
            .collect();
        // ledger is z, y, x
        let removed = remove(&mut comments, &ids[1], "a").unwrap();
        assert_eq!(removed.text, "y");
        let left: Vec<&str> = comments.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(left, vec!["z", "x"]);
        assert_eq!(comments[0].id, ids[2]);
        assert_eq!(comments[1].id, ids[0]);
    }
}
