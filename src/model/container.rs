use indexmap::IndexMap;

/// Mapping from container id to its ordered child ids.
///
/// Iteration follows insertion order. That order is part of the contract:
/// `find_container` returns the first container (in insertion order) whose
/// children include the id, and the resolver walks containers in the same
/// order the view renders them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerMap {
    entries: IndexMap<String, Vec<String>>,
}

impl ContainerMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a container. Replacing keeps the original position.
    pub fn insert(&mut self, id: impl Into<String>, children: Vec<String>) {
        self.entries.insert(id.into(), children);
    }

    pub fn is_container(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn children(&self, id: &str) -> Option<&[String]> {
        self.entries.get(id).map(Vec::as_slice)
    }

    /// The container an id lives in: the id itself when it is a container,
    /// otherwise the first container listing it as a child.
    pub fn find_container(&self, id: &str) -> Option<&str> {
        if let Some((key, _)) = self.entries.get_key_value(id) {
            return Some(key.as_str());
        }
        self.entries
            .iter()
            .find(|(_, children)| children.iter().any(|c| c == id))
            .map(|(key, _)| key.as_str())
    }

    /// Position of `id` among the children of `container`
    pub fn index_in(&self, container: &str, id: &str) -> Option<usize> {
        self.children(container)?.iter().position(|c| c == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Vec<String>)> for ContainerMap {
    fn from_iter<T: IntoIterator<Item = (String, Vec<String>)>>(iter: T) -> Self {
        ContainerMap {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn sample() -> ContainerMap {
        let mut map = ContainerMap::new();
        map.insert("a", ids(&["1", "2"]));
        map.insert("b", ids(&[]));
        map.insert("board", ids(&["a", "b"]));
        map
    }

    #[test]
    fn container_resolves_to_itself() {
        let map = sample();
        assert_eq!(map.find_container("a"), Some("a"));
        assert_eq!(map.find_container("b"), Some("b"));
    }

    #[test]
    fn child_resolves_to_parent() {
        let map = sample();
        assert_eq!(map.find_container("2"), Some("a"));
        assert_eq!(map.index_in("a", "2"), Some(1));
        assert_eq!(map.find_container("nope"), None);
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let mut map = sample();
        map.insert("a", ids(&["1"]));
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["a", "b", "board"]);
    }
}
