//! Ordered table of gesture name → recognizer.
//!
//! Insertion order is dispatch order. Re-registering a name swaps the
//! recognizer in place, so the name keeps its original slot.

use crate::recognizer::{Recognizer, RecognizerOptions};
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use std::fmt;

#[derive(Default)]
pub struct GestureRegistry {
    recognizers: IndexMap<String, Box<dyn Recognizer>, FxBuildHasher>,
}

impl GestureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces `name`, returning the replaced recognizer.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        recognizer: Box<dyn Recognizer>,
    ) -> Option<Box<dyn Recognizer>> {
        self.recognizers.insert(name.into(), recognizer)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.recognizers.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&dyn Recognizer> {
        self.recognizers.get(name).map(|recognizer| recognizer.as_ref())
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut (dyn Recognizer + 'static)> {
        self.recognizers
            .get_mut(name)
            .map(|recognizer| recognizer.as_mut())
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.recognizers.get_index_of(name)
    }

    pub(crate) fn get_index_mut(
        &mut self,
        index: usize,
    ) -> Option<&mut (dyn Recognizer + 'static)> {
        self.recognizers
            .get_index_mut(index)
            .map(|(_, recognizer)| recognizer.as_mut())
    }

    pub fn options(&self, name: &str) -> Option<RecognizerOptions> {
        self.get(name).map(|recognizer| recognizer.options())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.recognizers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.recognizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recognizers.is_empty()
    }

    pub fn reset_all(&mut self) {
        for recognizer in self.recognizers.values_mut() {
            recognizer.reset();
        }
    }

    /// Recognizers in dispatch order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut (dyn Recognizer + 'static)> + '_ {
        self.recognizers
            .values_mut()
            .map(|recognizer| recognizer.as_mut())
    }
}

impl fmt::Debug for GestureRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
