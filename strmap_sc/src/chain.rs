use std::{fmt, slice, vec};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node<V> {
    pub key: String,
    pub value: V,
}

/// The nodes that share one bucket, in insertion order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chain<V> {
    nodes: Vec<Node<V>>,
}

impl<V> Chain<V> {
    pub fn new() -> Self {
        Chain { nodes: Vec::new() }
    }

    pub fn insert(&mut self, key: String, value: V) {
        self.nodes.push(Node { key, value });
    }

    // unlinks the first node holding `key`
    #[allow(clippy::disallowed_methods)]
    pub fn remove(&mut self, key: &str) -> Option<Node<V>> {
        let pos = self.nodes.iter().position(|node| node.key == key)?;
        Some(self.nodes.remove(pos))
    }

    pub fn contains(&self, key: &str) -> Option<&Node<V>> {
        self.nodes.iter().find(|node| node.key == key)
    }

    pub fn contains_mut(&mut self, key: &str) -> Option<&mut Node<V>> {
        self.nodes.iter_mut().find(|node| node.key == key)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Node<V>> {
        self.nodes.iter()
    }
}

impl<V> Default for Chain<V> {
    fn default() -> Self {
        Chain::new()
    }
}

impl<V> IntoIterator for Chain<V> {
    type Item = Node<V>;
    type IntoIter = vec::IntoIter<Node<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl<'a, V> IntoIterator for &'a Chain<V> {
    type Item = &'a Node<V>;
    type IntoIter = slice::Iter<'a, Node<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V: fmt::Display> fmt::Display for Chain<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, node) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}: {}", node.key, node.value)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::Chain;

    #[test]
    fn insertion_order() {
        let mut chain = Chain::new();
        chain.insert("b".to_string(), 2);
        chain.insert("a".to_string(), 1);
        chain.insert("c".to_string(), 3);
        let keys: Vec<_> = chain.iter().map(|node| node.key.as_str()).collect();
        assert_eq!(keys, ["b", "a", "c"]);
        assert_eq!(chain.to_string(), "[b: 2 -> a: 1 -> c: 3]");
    }

    #[test]
    fn remove_first_match() {
        let mut chain = Chain::new();
        chain.insert("a".to_string(), 1);
        chain.insert("a".to_string(), 2);
        assert_eq!(chain.remove("a").map(|node| node.value), Some(1));
        assert_eq!(chain.contains("a").map(|node| node.value), Some(2));
        assert_eq!(chain.len(), 1);
        assert!(chain.remove("z").is_none());
    }

    #[test]
    fn contains_mut() {
        let mut chain = Chain::new();
        assert!(chain.is_empty());
        chain.insert("a".to_string(), 1);
        chain.contains_mut("a").unwrap().value = 5;
        assert_eq!(chain.into_iter().map(|node| node.value).sum::<i32>(), 5);
    }
}
