//! Circular doubly-linked collection of items.
//!
//! Members live in an arena of slots and link to each other by slot index,
//! so unlinking never leaves a dangling pointer. Handles carry the slot's
//! generation: a handle to a removed member stays invalid even after its
//! slot is reused.

use haversack_core::{DomainError, Entity};

use crate::item::Item;

/// Stable reference to a member of an [`ItemCollection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemHandle {
    index: usize,
    generation: u32,
}

#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    prev: usize,
    next: usize,
}

#[derive(Debug, Clone)]
struct Slot<T> {
    generation: u32,
    node: Option<Node<T>>,
}

/// Ordered ring of uniquely keyed members.
///
/// Insertion order is kept: new members go after the current last one, and
/// `next` of the last member is the first (`prev` of the first is the last).
#[derive(Debug, Clone)]
pub struct ItemCollection<T = Item> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    head: Option<usize>,
    len: usize,
}

impl<T> Default for ItemCollection<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            len: 0,
        }
    }
}

impl<T> ItemCollection<T>
where
    T: Entity,
    T::Id: core::fmt::Display,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append `value` as the new last member.
    pub fn insert_at_end(&mut self, value: T) -> Result<ItemHandle, DomainError> {
        if self.contains(value.id()) {
            return Err(DomainError::duplicate_id(value.id().to_string()));
        }

        let index = self.allocate(value);
        match self.head {
            None => self.head = Some(index),
            Some(head) => {
                let tail = self.node(head).prev;
                {
                    let node = self.node_mut(index);
                    node.prev = tail;
                    node.next = head;
                }
                self.node_mut(tail).next = index;
                self.node_mut(head).prev = index;
            }
        }
        self.len += 1;
        Ok(self.handle_at(index))
    }

    /// Unlink the member with `id`, handing it back to the caller.
    pub fn remove_by_id(&mut self, id: &T::Id) -> Option<T> {
        let handle = self.find(id)?;
        self.remove(handle)
    }

    /// Unlink the member behind `handle`.
    pub fn remove(&mut self, handle: ItemHandle) -> Option<T> {
        if !self.is_live(handle) {
            return None;
        }
        let index = handle.index;
        let (prev, next) = {
            let node = self.node(index);
            (node.prev, node.next)
        };

        if next == index {
            self.head = None;
        } else {
            self.node_mut(prev).next = next;
            self.node_mut(next).prev = prev;
            if self.head == Some(index) {
                self.head = Some(next);
            }
        }

        let slot = &mut self.slots[index];
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(index);
        self.len -= 1;
        Some(node.value)
    }

    /// Walk `next` from the first member until `id` matches or the ring wraps.
    pub fn find(&self, id: &T::Id) -> Option<ItemHandle> {
        let head = self.head?;
        let mut cursor = head;
        loop {
            let node = self.node(cursor);
            if node.value.has_id(id) {
                return Some(self.handle_at(cursor));
            }
            cursor = node.next;
            if cursor == head {
                return None;
            }
        }
    }

    pub fn contains(&self, id: &T::Id) -> bool {
        self.find(id).is_some()
    }

    pub fn get(&self, handle: ItemHandle) -> Option<&T> {
        if !self.is_live(handle) {
            return None;
        }
        self.slots[handle.index].node.as_ref().map(|node| &node.value)
    }

    pub fn first(&self) -> Option<ItemHandle> {
        self.head.map(|index| self.handle_at(index))
    }

    pub fn last(&self) -> Option<ItemHandle> {
        self.head.map(|head| self.handle_at(self.node(head).prev))
    }

    /// Member after `handle`, wrapping from last to first.
    pub fn next(&self, handle: ItemHandle) -> Option<ItemHandle> {
        if !self.is_live(handle) {
            return None;
        }
        Some(self.handle_at(self.node(handle.index).next))
    }

    /// Member before `handle`, wrapping from first to last.
    pub fn prev(&self, handle: ItemHandle) -> Option<ItemHandle> {
        if !self.is_live(handle) {
            return None;
        }
        Some(self.handle_at(self.node(handle.index).prev))
    }

    /// Handles in order, starting at the first member.
    pub fn handles(&self) -> impl Iterator<Item = ItemHandle> + '_ {
        std::iter::successors(self.first(), move |h| self.next(*h)).take(self.len)
    }

    /// Members in order, starting at the first member.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.handles().filter_map(move |h| self.get(h))
    }

    /// Verify the ring structure.
    ///
    /// Panics on a broken link: a corrupted ring is a defect, not an input
    /// error.
    pub fn check_links(&self) {
        let occupied = self.slots.iter().filter(|s| s.node.is_some()).count();
        assert_eq!(occupied, self.len, "member count out of sync with occupied slots");

        let Some(head) = self.head else {
            assert_eq!(self.len, 0, "empty ring with members");
            return;
        };

        let mut cursor = head;
        for step in 0..self.len {
            let next = self.node(cursor).next;
            assert_eq!(self.node(next).prev, cursor, "next/prev mismatch at slot {cursor}");
            cursor = next;
            assert!(
                cursor != head || step + 1 == self.len,
                "ring closes after {} of {} members",
                step + 1,
                self.len
            );
        }
        assert_eq!(cursor, head, "forward walk does not return to the first member");

        for _ in 0..self.len {
            cursor = self.node(cursor).prev;
        }
        assert_eq!(cursor, head, "backward walk does not return to the first member");
    }

    fn allocate(&mut self, value: T) -> usize {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: None,
                });
                self.slots.len() - 1
            }
        };
        self.slots[index].node = Some(Node {
            value,
            prev: index,
            next: index,
        });
        index
    }

    fn is_live(&self, handle: ItemHandle) -> bool {
        self.slots
            .get(handle.index)
            .is_some_and(|slot| slot.generation == handle.generation && slot.node.is_some())
    }

    fn handle_at(&self, index: usize) -> ItemHandle {
        ItemHandle {
            index,
            generation: self.slots[index].generation,
        }
    }

    fn node(&self, index: usize) -> &Node<T> {
        match self.slots[index].node.as_ref() {
            Some(node) => node,
            None => panic!("ring link points at vacant slot {index}"),
        }
    }

    fn node_mut(&mut self, index: usize) -> &mut Node<T> {
        match self.slots[index].node.as_mut() {
            Some(node) => node,
            None => panic!("ring link points at vacant slot {index}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use haversack_core::ItemId;
    use proptest::prelude::*;

    fn item(id: &str) -> Item {
        Item::new(ItemId::new(id), id.to_uppercase())
    }

    fn ids(items: &ItemCollection) -> Vec<String> {
        items.iter().map(|i| i.id_typed().to_string()).collect()
    }

    fn three() -> ItemCollection {
        let mut items = ItemCollection::new();
        for id in ["rope", "torch", "bedroll"] {
            items.insert_at_end(item(id)).unwrap();
        }
        items
    }

    #[test]
    fn single_member_is_its_own_neighbour() {
        let mut items = ItemCollection::new();
        let h = items.insert_at_end(item("rope")).unwrap();
        assert_eq!(items.next(h), Some(h));
        assert_eq!(items.prev(h), Some(h));
        items.check_links();
    }

    #[test]
    fn traversal_wraps_both_ways() {
        let items = three();
        let first = items.first().unwrap();
        let last = items.last().unwrap();
        assert_eq!(items.get(last).unwrap().id_typed().as_str(), "bedroll");
        assert_eq!(items.next(last), Some(first));
        assert_eq!(items.prev(first), Some(last));
    }

    #[test]
    fn keeps_insertion_order() {
        assert_eq!(ids(&three()), vec!["rope", "torch", "bedroll"]);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut items = three();
        let err = items.insert_at_end(item("torch")).unwrap_err();
        assert_eq!(err, DomainError::DuplicateId("torch".to_string()));
        assert_eq!(items.count(), 3);
        items.check_links();
    }

    #[test]
    fn removing_absent_id_changes_nothing() {
        let mut items = three();
        assert!(items.remove_by_id(&ItemId::new("lantern")).is_none());
        assert_eq!(items.count(), 3);
        assert_eq!(ids(&items), vec!["rope", "torch", "bedroll"]);
        items.check_links();
    }

    #[test]
    fn removing_from_empty_collection_reports_not_found() {
        let mut items: ItemCollection = ItemCollection::new();
        assert!(items.remove_by_id(&ItemId::new("rope")).is_none());
        assert!(items.is_empty());
    }

    #[test]
    fn removing_the_head_promotes_its_successor() {
        let mut items = three();
        let removed = items.remove_by_id(&ItemId::new("rope")).unwrap();
        assert_eq!(removed.id_typed().as_str(), "rope");
        assert_eq!(ids(&items), vec!["torch", "bedroll"]);
        items.check_links();
    }

    #[test]
    fn removing_down_to_one_then_empty() {
        let mut items = three();
        items.remove_by_id(&ItemId::new("torch")).unwrap();
        items.remove_by_id(&ItemId::new("rope")).unwrap();
        let last = items.first().unwrap();
        assert_eq!(items.next(last), Some(last));
        items.check_links();

        items.remove_by_id(&ItemId::new("bedroll")).unwrap();
        assert!(items.is_empty());
        assert!(items.first().is_none());
        items.check_links();
    }

    #[test]
    fn stale_handle_stays_invalid_after_slot_reuse() {
        let mut items = three();
        let torch = items.find(&ItemId::new("torch")).unwrap();
        items.remove(torch).unwrap();
        items.insert_at_end(item("lantern")).unwrap();
        assert!(items.get(torch).is_none());
        assert!(items.next(torch).is_none());
        assert!(items.remove(torch).is_none());
        assert_eq!(ids(&items), vec!["rope", "bedroll", "lantern"]);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Insert(u8),
        Remove(u8),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![(0u8..12).prop_map(Op::Insert), (0u8..12).prop_map(Op::Remove)]
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: after any insert/remove sequence the ring matches a plain
        /// ordered list, and N steps in either direction from any member
        /// return to that member.
        #[test]
        fn ring_stays_circular(ops in prop::collection::vec(op(), 0..64)) {
            let mut items: ItemCollection = ItemCollection::new();
            let mut model: Vec<String> = Vec::new();

            for op in ops {
                match op {
                    Op::Insert(n) => {
                        let id = format!("item-{n}");
                        let inserted = items.insert_at_end(item(&id)).is_ok();
                        prop_assert_eq!(inserted, !model.contains(&id));
                        if inserted {
                            model.push(id);
                        }
                    }
                    Op::Remove(n) => {
                        let id = format!("item-{n}");
                        let removed = items.remove_by_id(&ItemId::new(id.clone()));
                        let position = model.iter().position(|m| *m == id);
                        prop_assert_eq!(removed.is_some(), position.is_some());
                        if let Some(p) = position {
                            model.remove(p);
                        }
                    }
                }
                items.check_links();
            }

            prop_assert_eq!(ids(&items), model.clone());
            prop_assert_eq!(items.count(), model.len());

            let handles: Vec<ItemHandle> = items.handles().collect();
            for start in handles {
                let mut forward = start;
                let mut backward = start;
                for _ in 0..items.count() {
                    forward = items.next(forward).unwrap();
                    backward = items.prev(backward).unwrap();
                }
                prop_assert_eq!(forward, start);
                prop_assert_eq!(backward, start);
            }
        }
    }
}
