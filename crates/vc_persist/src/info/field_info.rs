/// One participating field of an object type.
#[derive(Debug, Clone)]
pub struct FieldInfo {
    name: &'static str,
    former_names: &'static [&'static str],
    omit_when_null: bool,
    declared_by: &'static str,
    type_path: &'static str,
}

impl FieldInfo {
    /// `name` is the persisted key, `declared_by` the path of the type
    /// declaring the field and `type_path` the path of its value type.
    pub const fn new(
        name: &'static str,
        declared_by: &'static str,
        type_path: &'static str,
    ) -> Self {
        Self {
            name,
            former_names: &[],
            omit_when_null: false,
            declared_by,
            type_path,
        }
    }

    /// Names the field was persisted under by earlier versions, tried in
    /// order when the current name is absent.
    pub const fn with_former_names(mut self, former_names: &'static [&'static str]) -> Self {
        self.former_names = former_names;
        self
    }

    /// Skip the field on write while its value is null.
    pub const fn with_omit_when_null(mut self, omit: bool) -> Self {
        self.omit_when_null = omit;
        self
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn former_names(&self) -> &'static [&'static str] {
        self.former_names
    }

    #[inline]
    pub const fn omit_when_null(&self) -> bool {
        self.omit_when_null
    }

    #[inline]
    pub const fn declared_by(&self) -> &'static str {
        self.declared_by
    }

    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.type_path
    }
}
