/// Stable, human-readable names of a type.
///
/// The full [`type_path`](TypePath::type_path) is what gets persisted as
/// the declared type of an object, so it should not change between program
/// versions. `#[derive(Persist)]` uses `module_path!()` plus the type name,
/// or the value of `#[persist(type_path = "...")]`.
///
/// # Examples
///
/// ```
/// use vc_persist::info::TypePath;
///
/// assert_eq!(<i32 as TypePath>::type_path(), "i32");
/// assert_eq!(<String as TypePath>::type_name(), "String");
/// ```
pub trait TypePath: 'static {
    /// The fully qualified path, e.g. `"game::units::Unit"`.
    fn type_path() -> &'static str;

    /// The last segment of the path, e.g. `"Unit"`.
    fn type_name() -> &'static str;

    /// The module part of the path, if there is one.
    fn module_path() -> Option<&'static str> {
        None
    }
}
