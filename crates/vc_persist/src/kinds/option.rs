use crate::Reflect;

/// An optional value; `None` is persisted as a null node.
pub trait OptionValue: Reflect {
    fn get(&self) -> Option<&dyn Reflect>;

    fn set_none(&mut self);

    fn get_or_insert_default(&mut self) -> &mut dyn Reflect;
}
