use std::collections::HashMap;
use std::hash::Hash;

/// Map that iterates in first-insertion order.
#[derive(Debug, Clone)]
pub struct OrderedMap<K, V> {
    map: HashMap<K, V>,
    keys: Vec<K>,
}

impl <K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self {
            map: HashMap::new(),
            keys: Vec::new(),
        }
    }
}

impl<K, V> OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.keys.iter().filter_map(|key| {
            self.map.get(key).map(|value| (key, value))
        })
    }

    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if !self.map.contains_key(&key) {
            self.keys.push(key.clone());
        }
        self.map.insert(key, value)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.map.get(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iterates_in_insertion_order() {
        let mut map = OrderedMap::new();
        assert!(map.is_empty());
        map.insert("soins-visage", 30);
        map.insert("maquillage", 12);
        map.insert("accessoires", 4);

        let keys = map.iter().map(|(key, _)| *key).collect::<Vec<_>>();
        assert_eq!(keys, vec!["soins-visage", "maquillage", "accessoires"]);
        assert_eq!(map.len(), 3);
        assert!(!map.is_empty());
    }

    #[test]
    fn reinserting_keeps_position_and_returns_previous() {
        let mut map = OrderedMap::new();
        map.insert("a", 1);
        map.insert("b", 2);

        assert_eq!(map.insert("a", 10), Some(1));
        assert_eq!(map.get(&"a"), Some(&10));
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&"c"), None);

        let entries = map.iter().map(|(key, value)| (*key, *value)).collect::<Vec<_>>();
        assert_eq!(entries, vec![("a", 10), ("b", 2)]);
    }
}
