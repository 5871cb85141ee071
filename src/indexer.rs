use std::borrow::Borrow;
use std::hash::Hash;

use crate::col::{HashMap, map_new};

/// Hands out dense indices `0, 1, 2, ...` to ids in the order they are first seen.
pub struct Indexer<Id, Index>
where
    Id: Eq + Hash,
    Index: Eq + Copy,
{
    len: usize,
    index_by_id: HashMap<Id, Index>,
    to_index: fn(usize) -> Index,
}

impl<Id: Eq + Hash, Index: Eq + Copy> Indexer<Id, Index> {
    pub fn new(to_index: fn(usize) -> Index) -> Self {
        Self {
            len: 0,
            index_by_id: map_new(),
            to_index,
        }
    }

    /// Returns the index of `id` and whether it was assigned by this call.
    pub fn index(&mut self, id: Id) -> (Index, bool) {
        if let Some(&index) = self.index_by_id.get(&id) {
            return (index, false);
        }
        let index = (self.to_index)(self.len);
        self.len += 1;
        self.index_by_id.insert(id, index);
        (index, true)
    }

    pub fn get<Q>(&self, id: &Q) -> Option<Index>
    where
        Id: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.index_by_id.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.len
    }
}

#[cfg(test)]
mod tests {
    use super::Indexer;

    #[test]
    fn assigns_dense_indices_in_first_seen_order() {
        let mut indexer: Indexer<String, u32> = Indexer::new(|it| it as u32);
        assert_eq!(indexer.index("b".to_string()), (0, true));
        assert_eq!(indexer.index("a".to_string()), (1, true));
        assert_eq!(indexer.index("b".to_string()), (0, false));
        assert_eq!(indexer.get("a"), Some(1));
        assert_eq!(indexer.get("c"), None);
        assert_eq!(indexer.len(), 2);
    }
}
