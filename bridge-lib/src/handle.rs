//! Handles and owned units
//!
//! A handle is an opaque non-zero integer naming one live unit in a
//! [`HandleTable`]. Handles come from a monotonic counter and are never reused.
//! Units are `Arc`-shared, so work already in flight keeps a unit alive after
//! its handle has been disposed.

use crate::error::{BridgeError, Result};
use dashmap::DashMap;
use log::{debug, error};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

pub type Handle = i64;

/// Sentinel returned to managed code when no unit was created.
pub const NULL_HANDLE: Handle = 0;

/// Listener side of an owned unit.
pub trait Detach {
    /// Stops event delivery into managed code.
    fn detach(&self);
}

impl<T: Detach + ?Sized> Detach for Arc<T> {
    fn detach(&self) {
        (**self).detach()
    }
}

/// A native object paired with its listener.
///
/// Fields drop in declaration order: the listener goes first, then the object.
pub struct OwnedUnit<O, L> {
    listener: L,
    object: O,
}

impl<O, L> OwnedUnit<O, L> {
    pub fn new(object: O, listener: L) -> Self {
        Self { listener, object }
    }

    pub fn object(&self) -> &O {
        &self.object
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }
}

pub struct HandleTable<T> {
    kind: &'static str,
    next: AtomicI64,
    units: DashMap<Handle, Arc<T>>,
}

impl<T> HandleTable<T> {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            next: AtomicI64::new(1),
            units: DashMap::new(),
        }
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn insert(&self, unit: T) -> Handle {
        let handle = self.next.fetch_add(1, Ordering::Relaxed);
        self.units.insert(handle, Arc::new(unit));
        debug!("{} {} created", self.kind, handle);
        handle
    }

    /// Resolves a live handle.
    pub fn get(&self, handle: Handle) -> Result<Arc<T>> {
        self.units
            .get(&handle)
            .map(|unit| Arc::clone(unit.value()))
            .ok_or_else(|| BridgeError::invalid_handle(self.kind, handle))
    }

    /// Takes a unit out of the table. Succeeds once per handle.
    pub fn remove(&self, handle: Handle) -> Result<Arc<T>> {
        match self.units.remove(&handle) {
            Some((_, unit)) => {
                debug!("{} {} disposed", self.kind, handle);
                Ok(unit)
            }
            None => {
                error!("{} {} disposed twice or never created", self.kind, handle);
                Err(BridgeError::invalid_handle(self.kind, handle))
            }
        }
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.units.contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Drops every unit still registered.
    pub fn clear(&self) {
        if !self.units.is_empty() {
            debug!("releasing {} leftover {} units", self.units.len(), self.kind);
        }
        self.units.clear();
    }
}

impl<O, L: Detach> HandleTable<OwnedUnit<O, L>> {
    /// Removes the unit and detaches its listener.
    pub fn dispose(&self, handle: Handle) -> Result<()> {
        let unit = self.remove(handle)?;
        unit.listener.detach();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize};

    struct Counted {
        name: &'static str,
        order: Arc<std::sync::Mutex<Vec<&'static str>>>,
    }

    impl Drop for Counted {
        fn drop(&mut self) {
            self.order.lock().unwrap().push(self.name);
        }
    }

    struct Listener {
        detached: AtomicBool,
        _counted: Counted,
    }

    impl Detach for Listener {
        fn detach(&self) {
            self.detached.store(true, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_handles_are_never_reused() {
        let table = HandleTable::new("device");
        let first = table.insert(1u8);
        table.remove(first).unwrap();
        let second = table.insert(2u8);

        assert_ne!(first, NULL_HANDLE);
        assert_ne!(first, second);
        assert!(!table.contains(first));
    }

    #[test]
    fn test_remove_succeeds_once() {
        let table = HandleTable::new("producer");
        let handle = table.insert("unit");

        assert!(table.remove(handle).is_ok());
        assert_eq!(
            table.remove(handle).unwrap_err(),
            BridgeError::invalid_handle("producer", handle)
        );
        assert_eq!(
            table.get(handle).unwrap_err(),
            BridgeError::invalid_handle("producer", handle)
        );
    }

    #[test]
    fn test_listener_drops_before_object() {
        let order = Arc::new(std::sync::Mutex::new(Vec::new()));
        let table = HandleTable::new("consumer");
        let listener = Arc::new(Listener {
            detached: AtomicBool::new(false),
            _counted: Counted {
                name: "listener",
                order: Arc::clone(&order),
            },
        });
        let object = Counted {
            name: "object",
            order: Arc::clone(&order),
        };
        let handle = table.insert(OwnedUnit::new(object, Arc::clone(&listener)));
        drop(listener);

        table.dispose(handle).unwrap();

        assert_eq!(*order.lock().unwrap(), vec!["listener", "object"]);
        assert!(table.dispose(handle).is_err());
    }

    #[test]
    fn test_in_flight_reference_outlives_dispose() {
        let drops = Arc::new(AtomicUsize::new(0));
        struct Probe(Arc<AtomicUsize>);
        impl Drop for Probe {
            fn drop(&mut self) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }

        let table = HandleTable::new("transport");
        let handle = table.insert(Probe(Arc::clone(&drops)));
        let in_flight = table.get(handle).unwrap();

        table.remove(handle).unwrap();
        assert_eq!(drops.load(Ordering::SeqCst), 0);

        drop(in_flight);
        assert_eq!(drops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_concurrent_inserts_get_distinct_handles() {
        let table = Arc::new(HandleTable::new("data producer"));
        let threads: Vec<_> = (0..4)
            .map(|_| {
                let table = Arc::clone(&table);
                std::thread::spawn(move || (0..100).map(|i| table.insert(i)).collect::<Vec<_>>())
            })
            .collect();

        let mut handles: Vec<Handle> = threads
            .into_iter()
            .flat_map(|t| t.join().unwrap())
            .collect();
        handles.sort_unstable();
        handles.dedup();

        assert_eq!(handles.len(), 400);
        assert_eq!(table.len(), 400);
    }
}
