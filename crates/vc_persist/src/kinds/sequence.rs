use crate::Reflect;

/// A sequence whose length is fixed once allocated (`[T; N]`, `Box<[T]>`).
pub trait Array: Reflect {
    fn len(&self) -> usize;

    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Prepares the array to hold exactly `len` elements.
    ///
    /// Fails with the supported length when the array cannot take `len`.
    fn reset(&mut self, len: usize) -> Result<(), usize>;
}

/// A growable sequence (`Vec<T>`, `VecDeque<T>`).
pub trait List: Reflect {
    fn len(&self) -> usize;

    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    fn clear(&mut self);

    /// Appends a default element and returns it for population.
    fn push_default(&mut self) -> &mut dyn Reflect;
}
