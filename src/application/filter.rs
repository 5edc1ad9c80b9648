//! Live search over a list cache.

use crate::domain::entities::{Post, User};

/// Case-insensitive substring match against a record's searchable fields.
pub trait Searchable {
    /// `needle` is already lowercased.
    fn matches(&self, needle: &str) -> bool;
}

impl Searchable for User {
    fn matches(&self, needle: &str) -> bool {
        [&self.name, &self.username, &self.email]
            .into_iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

impl Searchable for Post {
    fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
    }
}

/// Search text typed into a view. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    text: String,
    needle: String,
}

impl Query {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let needle = text.to_lowercase();
        Self { text, needle }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn needle(&self) -> &str {
        &self.needle
    }
}

/// Records of `items` matching `query`, in cache order. One pass, no
/// allocation beyond the result.
pub fn filter_view<'a, T: Searchable>(items: &'a [T], query: &Query) -> Vec<&'a T> {
    if query.is_empty() {
        return items.iter().collect();
    }
    items
        .iter()
        .filter(|item| item.matches(query.needle()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users() -> Vec<User> {
        vec![
            User {
                id: 1,
                name: "Leanne Graham".into(),
                username: "Bret".into(),
                email: "Sincere@april.biz".into(),
            },
            User {
                id: 2,
                name: "Ervin Howell".into(),
                username: "Antonette".into(),
                email: "Shanna@melissa.tv".into(),
            },
            User {
                id: 3,
                name: "Clementine Bauch".into(),
                username: "Samantha".into(),
                email: "Nathan@yesenia.net".into(),
            },
        ]
    }

    fn posts() -> Vec<Post> {
        vec![
            Post {
                id: 1,
                user_id: 1,
                title: "Qui est esse".into(),
            },
            Post {
                id: 2,
                user_id: 1,
                title: "ea molestias quasi".into(),
            },
            Post {
                id: 3,
                user_id: 9,
                title: "eum et est occaecati".into(),
            },
        ]
    }

    fn ids<T: crate::domain::entities::Record>(rows: &[&T]) -> Vec<i64> {
        rows.iter().map(|row| row.id()).collect()
    }

    #[test]
    fn empty_query_returns_everything_in_order() {
        let items = users();
        let rows = filter_view(&items, &Query::default());
        assert_eq!(ids(&rows), vec![1, 2, 3]);
    }

    #[test]
    fn users_match_any_field_case_insensitively() {
        let items = users();
        assert_eq!(ids(&filter_view(&items, &Query::new("GRAHAM"))), vec![1]);
        assert_eq!(ids(&filter_view(&items, &Query::new("antonette"))), vec![2]);
        assert_eq!(ids(&filter_view(&items, &Query::new(".net"))), vec![3]);
        // "an" hits name, username and email of different users.
        assert_eq!(ids(&filter_view(&items, &Query::new("an"))), vec![1, 2, 3]);
        assert!(filter_view(&items, &Query::new("zzz")).is_empty());
    }

    #[test]
    fn posts_match_title_only() {
        let items = posts();
        assert_eq!(ids(&filter_view(&items, &Query::new("QUI"))), vec![1]);
        assert_eq!(ids(&filter_view(&items, &Query::new("Occaecati"))), vec![3]);
        // user ids are not searchable
        assert!(filter_view(&items, &Query::new("9")).is_empty());
    }

    #[test]
    fn filtering_is_idempotent_and_leaves_input_alone() {
        let items = posts();
        let query = Query::new("e");
        let first: Vec<Post> = filter_view(&items, &query).into_iter().cloned().collect();
        let second: Vec<Post> = filter_view(&items, &query).into_iter().cloned().collect();
        assert_eq!(first, second);
        assert_eq!(items, posts());
    }
}
