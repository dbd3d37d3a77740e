//! Optimistic writes that are later confirmed or rolled back.

#[derive(Debug)]
#[must_use = "a pending write must be committed or rolled back"]
pub struct WriteToken<K> {
    key: K,
}

impl<K> WriteToken<K> {
    pub fn new(key: K) -> Self {
        Self { key }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn into_key(self) -> K {
        self.key
    }
}

pub trait PendingWrite {
    type Key;
    type Value;

    /// Applies `optimistic` immediately.
    fn begin(&self, key: Self::Key, optimistic: Self::Value) -> WriteToken<Self::Key>;

    fn commit(&self, token: WriteToken<Self::Key>);

    /// Puts `previous` back in place of the optimistic value.
    fn rollback(&self, token: WriteToken<Self::Key>, previous: Self::Value);
}
