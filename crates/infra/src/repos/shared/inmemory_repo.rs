use salon_notifier_domain::{Entity, ID};
use std::sync::Mutex;

/// Useful functions for creating inmemory repositories

pub fn insert<T: Clone>(val: &T, collection: &Mutex<Vec<T>>) {
    let mut collection = collection.lock().unwrap();
    collection.push(val.clone());
}

pub fn find<T: Clone + Entity>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let collection = collection.lock().unwrap();
    collection.iter().find(|v| v.id() == val_id).cloned()
}

pub fn find_by<T: Clone, F: FnMut(&T) -> bool>(collection: &Mutex<Vec<T>>, mut compare: F) -> Vec<T> {
    let collection = collection.lock().unwrap();
    let mut items = Vec::new();
    for item in collection.iter() {
        if compare(item) {
            items.push(item.clone());
        }
    }
    items
}

pub fn delete<T: Clone + Entity>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let mut collection = collection.lock().unwrap();
    let index = collection.iter().position(|v| v.id() == val_id)?;
    Some(collection.remove(index))
}

/// Applies `update` to the entity with the given id if `precondition`
/// holds. The check and the update happen under the same lock, so this is
/// the inmemory counterpart of a conditional `UPDATE ... WHERE`.
pub fn update_if<T: Entity, F: Fn(&T) -> bool, U: FnOnce(&mut T)>(
    val_id: &ID,
    collection: &Mutex<Vec<T>>,
    precondition: F,
    update: U,
) -> bool {
    let mut collection = collection.lock().unwrap();
    match collection
        .iter_mut()
        .find(|v| v.id() == val_id && precondition(v))
    {
        Some(val) => {
            update(val);
            true
        }
        None => false,
    }
}
