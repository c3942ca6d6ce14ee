use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use super::model::Customer;

/// The in-memory customer collection.
///
/// Cheap to clone: every clone shares the same records. Each operation runs
/// inside a single lock scope, so assigning an id and appending the record
/// happen atomically. Ids come from a counter that only moves forward, so an
/// id is never handed out twice, even after deletions.
#[derive(Debug, Clone, Default)]
pub struct Customers {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    records: Vec<Customer>,
    last_id: u64,
}

impl Customers {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records in creation order.
    pub fn list(&self) -> Vec<Customer> {
        self.inner.lock().records.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: u64) -> Option<Customer> {
        self.inner.lock().records.iter().find(|c| c.id == id).cloned()
    }

    /// Appends a record under the next id and returns it.
    pub fn create(&self, name: String) -> Customer {
        let mut inner = self.inner.lock();
        inner.last_id += 1;
        let customer = Customer { id: inner.last_id, name };
        inner.records.push(customer.clone());
        debug!(id = customer.id, "customer created");
        customer
    }

    /// Replaces the name of record `id`. `None` if there is no such record.
    pub fn update(&self, id: u64, name: String) -> Option<Customer> {
        let mut inner = self.inner.lock();
        let customer = inner.records.iter_mut().find(|c| c.id == id)?;
        customer.name = name;
        debug!(id, "customer updated");
        Some(customer.clone())
    }

    /// Removes record `id` and returns it. `None` if there is no such record.
    pub fn remove(&self, id: u64) -> Option<Customer> {
        let mut inner = self.inner.lock();
        let pos = inner.records.iter().position(|c| c.id == id)?;
        debug!(id, "customer removed");
        Some(inner.records.remove(pos))
    }
}
