//! Per-tick cache of executable objects rebuilt from persisted records.
//!
//! The persisted store only holds plain data.  At the start of every tick
//! [`Registry::init`] throws the previous contents away and derives a fresh
//! executable object for every record through a caller-supplied factory.
//! Nothing in the registry is trusted to survive the tick.

#[cfg(not(feature = "fx-hash"))]
type Map<V> = std::collections::HashMap<String, V>;

#[cfg(feature = "fx-hash")]
type Map<V> = rustc_hash::FxHashMap<String, V>;

/// Name-keyed map of boxed objects, usually trait objects.
pub struct Registry<T: ?Sized> {
    entries: Map<Box<T>>,
}

impl<T: ?Sized> Default for Registry<T> {
    fn default() -> Self {
        Self { entries: Map::default() }
    }
}

impl<T: ?Sized> Registry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the registry, then construct and register one object per
    /// `(name, record)`.
    ///
    /// Records the factory rejects are left out; their names and errors are
    /// returned in input order.
    pub fn init<'r, R, E, F>(
        &mut self,
        records: impl IntoIterator<Item = (&'r str, &'r R)>,
        mut construct: F,
    ) -> Vec<(String, E)>
    where
        R: ?Sized + 'r,
        F: FnMut(&str, &R) -> Result<Box<T>, E>,
    {
        self.entries.clear();
        let mut rejected = Vec::new();
        for (name, record) in records {
            match construct(name, record) {
                Ok(obj) => {
                    self.entries.insert(name.to_owned(), obj);
                }
                Err(e) => rejected.push((name.to_owned(), e)),
            }
        }
        rejected
    }

    /// Insert `obj` under `name`, returning the object it replaced.
    pub fn register(&mut self, name: impl Into<String>, obj: Box<T>) -> Option<Box<T>> {
        self.entries.insert(name.into(), obj)
    }

    pub fn unregister(&mut self, name: &str) -> Option<Box<T>> {
        self.entries.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.get(name).map(|b| &**b)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        self.entries.get_mut(name).map(|b| &mut **b)
    }

    /// Registered names in ascending order.
    pub fn list(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> + '_ {
        self.entries.iter().map(|(name, obj)| (name.as_str(), &**obj))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
