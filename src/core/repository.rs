use std::cmp::Ordering;
use std::collections::HashMap;

use crate::core::models::BaseEntity;
use crate::errors::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sort {
    Unordered,
    IdAsc,
    IdDesc,
}

struct FilterSorter<'a, T: BaseEntity> {
    filters: Vec<Box<dyn Fn(&T) -> bool + 'a>>,
    sort: Sort,
    cmp: Option<Box<dyn Fn(&T, &T) -> Ordering + 'a>>,
}

impl<'a, T: BaseEntity> FilterSorter<'a, T> {
    fn new() -> Self {
        Self {
            filters: Vec::new(),
            sort: Sort::Unordered,
            cmp: None,
        }
    }

    fn matches(&self, entity: &T) -> bool {
        self.filters.iter().all(|f| f(entity))
    }

    fn sorted_ids(&self, items: &HashMap<i32, T>) -> Vec<i32> {
        let mut hits: Vec<(&i32, &T)> = items.iter().filter(|(_, e)| self.matches(e)).collect();

        if let Some(cmp) = &self.cmp {
            // Ties fall back to id so callers see a stable order.
            hits.sort_by(|(ia, a), (ib, b)| cmp(a, b).then_with(|| ia.cmp(ib)));
        } else {
            match self.sort {
                Sort::Unordered => {}
                Sort::IdAsc => hits.sort_by_key(|(id, _)| **id),
                Sort::IdDesc => hits.sort_by_key(|(id, _)| std::cmp::Reverse(**id)),
            }
        }
        hits.into_iter().map(|(id, _)| *id).collect()
    }
}

/// In-memory id-keyed store. Ids are assigned on insert and never reused.
#[derive(Debug, Clone)]
pub struct Repository<T: BaseEntity> {
    items: HashMap<i32, T>,
    next_id: i32,
}

impl<T: BaseEntity> Default for Repository<T> {
    fn default() -> Self {
        Self {
            items: HashMap::new(),
            next_id: 1,
        }
    }
}

impl<T: BaseEntity> Repository<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: i32) -> bool {
        self.items.contains_key(&id)
    }

    pub fn insert(&mut self, mut entity: T) -> i32 {
        let id = self.next_id;
        self.next_id += 1;
        entity.set_id(id);
        self.items.insert(id, entity);
        id
    }

    pub fn get(&self, id: i32) -> Result<&T> {
        self.items
            .get(&id)
            .ok_or_else(|| Error::not_found(T::ENTITY, id))
    }

    pub fn get_mut(&mut self, id: i32) -> Result<&mut T> {
        self.items
            .get_mut(&id)
            .ok_or_else(|| Error::not_found(T::ENTITY, id))
    }

    pub fn delete(&mut self, id: i32) -> Result<T> {
        self.items
            .remove(&id)
            .ok_or_else(|| Error::not_found(T::ENTITY, id))
    }

    /// Removes every entity matching `pred`; returns them in id order.
    pub fn remove_where(&mut self, pred: impl Fn(&T) -> bool) -> Vec<T> {
        let mut ids: Vec<i32> = self
            .items
            .iter()
            .filter(|(_, e)| pred(e))
            .map(|(id, _)| *id)
            .collect();
        ids.sort();
        ids.into_iter()
            .filter_map(|id| self.items.remove(&id))
            .collect()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.next_id = 1;
    }

    pub fn values(&self, sort: Sort) -> Vec<&T> {
        let mut v: Vec<&T> = self.items.values().collect();
        match sort {
            Sort::Unordered => {}
            Sort::IdAsc => v.sort_by_key(|e| e.id()),
            Sort::IdDesc => v.sort_by_key(|e| std::cmp::Reverse(e.id())),
        }
        v
    }

    pub fn query(&self) -> Query<'_, T> {
        Query::new(self)
    }

    pub fn query_mut(&mut self) -> QueryMut<'_, T> {
        QueryMut::new(self)
    }
}

pub struct Query<'a, T: BaseEntity> {
    store: &'a Repository<T>,
    fs: FilterSorter<'a, T>,
}

impl<'a, T: BaseEntity> Query<'a, T> {
    fn new(store: &'a Repository<T>) -> Self {
        Self {
            store,
            fs: FilterSorter::new(),
        }
    }

    pub fn r#where(mut self, pred: impl Fn(&T) -> bool + 'a) -> Self {
        self.fs.filters.push(Box::new(pred));
        self
    }

    pub fn order(mut self, sort: Sort) -> Self {
        self.fs.sort = sort;
        self
    }

    pub fn order_with(mut self, cmp: impl Fn(&T, &T) -> Ordering + 'a) -> Self {
        self.fs.cmp = Some(Box::new(cmp));
        self
    }

    pub fn collect(self) -> Vec<&'a T> {
        let ids = self.fs.sorted_ids(&self.store.items);
        ids.into_iter()
            .filter_map(|id| self.store.items.get(&id))
            .collect()
    }

    pub fn ids(self) -> Vec<i32> {
        self.fs.sorted_ids(&self.store.items)
    }

    pub fn count(self) -> usize {
        self.store
            .items
            .values()
            .filter(|e| self.fs.matches(e))
            .count()
    }

    pub fn exists(self) -> bool {
        self.store.items.values().any(|e| self.fs.matches(e))
    }
}

pub struct QueryMut<'a, T: BaseEntity> {
    store: &'a mut Repository<T>,
    fs: FilterSorter<'a, T>,
}

impl<'a, T: BaseEntity> QueryMut<'a, T> {
    fn new(store: &'a mut Repository<T>) -> Self {
        Self {
            store,
            fs: FilterSorter::new(),
        }
    }

    pub fn r#where(mut self, pred: impl Fn(&T) -> bool + 'a) -> Self {
        self.fs.filters.push(Box::new(pred));
        self
    }

    pub fn order(mut self, sort: Sort) -> Self {
        self.fs.sort = sort;
        self
    }

    /// Applies `f` to each match; returns how many entities were visited.
    pub fn for_each_mut<F>(self, mut f: F) -> usize
    where
        F: FnMut(&mut T),
    {
        let ids = self.fs.sorted_ids(&self.store.items);
        let mut visited = 0;
        for id in ids {
            if let Some(item) = self.store.items.get_mut(&id) {
                f(item);
                visited += 1;
            }
        }
        visited
    }
}
