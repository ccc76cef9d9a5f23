//! Per-user likes on a shop: each user appears at most once, newest first.

use crate::errors::ServiceError;

/// Prepend `user`, refusing a second like from the same user.
pub fn add(likes: &mut Vec<String>, user: &str) -> Result<(), ServiceError> {
    if likes.iter().any(|u| u == user) {
        return Err(ServiceError::Conflict("already liked".into()));
    }
    likes.insert(0, user.to_string());
    Ok(())
}

/// Remove `user`'s like; fails if there is none.
pub fn remove(likes: &mut Vec<String>, user: &str) -> Result<(), ServiceError> {
    let idx = likes
        .iter()
        .position(|u| u == user)
        .ok_or_else(|| ServiceError::Conflict("not liked".into()))?;
    likes.remove(idx);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_prepends() {
        let mut likes = vec!["a".to_string()];
        add(&mut likes, "b").unwrap();
        assert_eq!(likes, vec!["b", "a"]);
    }

    #[test]
    fn double_like_conflicts() {
        let mut likes = Vec::new();
        add(&mut likes, "a").unwrap();
        assert!(matches!(add(&mut likes, "a"), Err(ServiceError::Conflict(m)) if m == "already liked"));
        assert_eq!(likes.len(), 1);
    }

    #[test]
    fn unlike_without_like_conflicts() {
        let mut likes = vec!["b".to_string()];
        assert!(matches!(remove(&mut likes, "a"), Err(ServiceError::Conflict(m)) if m == "not liked"));
        assert_eq!(likes, vec!["b"]);
    }

    #[test]
    fn remove_keeps_others_in_order() {
        let mut likes = vec!["c".to_string(), "b".to_string(), "a".to_string()];
        remove(&mut likes, "b").unwrap();
        assert_eq!(likes, vec!["c", "a"]);
    }

    #[test]
    fn user_never_appears_twice_over_any_sequence() {
        let mut likes = vec!["other".to_string()];
        for step in 0..20 {
            let _ = if step % 3 == 0 { remove(&mut likes, "me") } else { add(&mut likes, "me") };
            assert!(likes.iter().filter(|u| *u == "me").count() <= 1);
        }
    }
}
