//! Typed identifiers for objects placed into a scene

use std::{
    fmt::Debug,
    hash::{Hash, Hasher},
    marker::PhantomData,
};

/// Object identifier, typed by the kind of object it refers to
pub struct Id<T> {
    value: uuid::Uuid,
    phantom: PhantomData<T>,
}

impl<T> Id<T> {
    /// Constructs new random id
    pub fn random() -> Self {
        Self {
            value: uuid::Uuid::new_v4(),
            phantom: PhantomData,
        }
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> Debug for Id<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let of_type = std::any::type_name::<T>();
        write!(f, "Id<{}>({})", of_type, self.value.hyphenated())
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

#[cfg(test)]
mod tests {
    use super::Id;

    struct Marker;

    #[test]
    fn random_ids_differ() {
        let a = Id::<Marker>::random();
        let b = Id::<Marker>::random();
        assert_ne!(a, b);
        let copy = a;
        assert_eq!(a, copy);
    }

    #[test]
    fn debug_names_the_type() {
        let id = Id::<Marker>::random();
        assert!(format!("{:?}", id).contains("Marker"));
    }
}
