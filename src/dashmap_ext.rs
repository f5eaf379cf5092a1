use dashmap::DashMap;
use std::borrow::Borrow;
use std::hash::Hash;

/// Clone-out helpers for `DashMap`.
///
/// `DashMap::get()` and `DashMap::iter()` hand out guards that hold a shard
/// lock. Every dispatch stage awaits a host collaborator, so guards must never
/// live across those `.await`s; these helpers copy the data out and drop the
/// guard before returning.
pub trait DashMapExt<K, V> {
    fn get_cloned<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone;

    /// Snapshot of all `(key, value)` pairs, sorted by key.
    fn snapshot(&self) -> Vec<(K, V)>
    where
        K: Clone + Ord,
        V: Clone;
}

impl<K, V> DashMapExt<K, V> for DashMap<K, V>
where
    K: Eq + Hash,
{
    fn get_cloned<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.get(key).map(|r| r.value().clone())
    }

    fn snapshot(&self) -> Vec<(K, V)>
    where
        K: Clone + Ord,
        V: Clone,
    {
        let mut entries: Vec<(K, V)> = self
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}
