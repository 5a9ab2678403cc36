//! Items used by the code `#[derive(Persist)]` expands to.

pub use alloc::vec;
pub use core::any::type_name;
pub use std::sync::OnceLock;

#[cfg(feature = "auto_register")]
pub use inventory;

#[cfg(feature = "auto_register")]
pub use auto_register::AutoRegistration;

#[cfg(feature = "auto_register")]
mod auto_register {
    use crate::registry::{GetTypeMeta, TypeRegistry};

    /// One type submitted by `#[persist(auto_register)]`.
    pub struct AutoRegistration(pub fn(&mut TypeRegistry));

    impl AutoRegistration {
        pub const fn of<T: GetTypeMeta>() -> Self {
            Self(TypeRegistry::register::<T>)
        }
    }

    inventory::collect!(AutoRegistration);
}
