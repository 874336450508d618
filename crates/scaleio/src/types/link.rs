//! Relation links returned on gateway records.

use serde::{Deserialize, Serialize};

/// A navigation link: a relation tag and the path it resolves to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Relation name, e.g. `/api/StoragePool/relationship/Volume`.
    pub rel: String,
    /// Path of the related resource, e.g. `/api/instances/StoragePool::1/relationships/Volume`.
    pub href: String,
}

/// Find the first link carrying the given relation.
pub fn find_link<'a>(links: &'a [Link], rel: &str) -> Option<&'a Link> {
    links.iter().find(|link| link.rel == rel)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links() -> Vec<Link> {
        serde_json::from_str(
            r#"[
                {"rel":"self","href":"/api/instances/StoragePool::1"},
                {"rel":"/api/StoragePool/relationship/Volume","href":"/api/instances/StoragePool::1/relationships/Volume"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn finds_by_relation() {
        let links = links();
        let link = find_link(&links, "/api/StoragePool/relationship/Volume").unwrap();
        assert_eq!(link.href, "/api/instances/StoragePool::1/relationships/Volume");
    }

    #[test]
    fn missing_relation_is_none() {
        assert!(find_link(&links(), "/api/StoragePool/relationship/Device").is_none());
    }
}
