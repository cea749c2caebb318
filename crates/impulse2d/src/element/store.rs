use std::collections::BTreeMap;

use super::{Element, ID};

/**
 * ElementStore keeps elements in insertion order, the index of an element
 * never changes once pushed
 */
#[derive(Default, Clone)]
pub struct ElementStore {
    elements: Vec<Element>,
    map: BTreeMap<ID, usize>, // element id to index
}

impl ElementStore {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
            map: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.elements.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.elements.iter_mut()
    }

    pub fn push(&mut self, element: Element) -> usize {
        let index = self.elements.len();
        self.map.insert(element.id(), index);
        self.elements.push(element);
        index
    }

    pub fn has_element(&self, id: ID) -> bool {
        self.map.contains_key(&id)
    }

    pub fn clear(&mut self) {
        self.elements.clear();
        self.map.clear();
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }

    pub fn get_element_by_id(&self, id: ID) -> Option<&Element> {
        self.map.get(&id).and_then(|&index| self.elements.get(index))
    }

    pub fn get_mut_element_by_id(&mut self, id: ID) -> Option<&mut Element> {
        let index = *self.map.get(&id)?;
        self.elements.get_mut(index)
    }

    /// Two distinct elements borrowed mutably at once, `None` when `a == b` or
    /// either index is out of range.
    pub fn pair_mut(&mut self, a: usize, b: usize) -> Option<(&mut Element, &mut Element)> {
        if a == b || a.max(b) >= self.elements.len() {
            return None;
        }

        if a < b {
            let (left, right) = self.elements.split_at_mut(b);
            Some((&mut left[a], &mut right[0]))
        } else {
            let (left, right) = self.elements.split_at_mut(a);
            Some((&mut right[0], &mut left[b]))
        }
    }

    /// every unordered pair `(i, j)` with `i < j`, in insertion order
    pub fn pairs(&self) -> impl Iterator<Item = ((usize, &Element), (usize, &Element))> {
        self.elements.iter().enumerate().flat_map(move |(i, a)| {
            self.elements
                .iter()
                .enumerate()
                .skip(i + 1)
                .map(move |(j, b)| ((i, a), (j, b)))
        })
    }
}
