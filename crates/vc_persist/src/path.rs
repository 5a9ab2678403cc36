use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Write};

// -----------------------------------------------------------------------------
// FieldPath

#[derive(Debug, Clone)]
enum Segment {
    Field(&'static str),
    Key(String),
    Index(usize),
}

/// The location of the value a driver is currently visiting,
/// rendered as `root.children[2].name` in errors and diagnostics.
#[derive(Debug, Default, Clone)]
pub(crate) struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    #[inline]
    pub(crate) fn push_field(&mut self, name: &'static str) {
        self.segments.push(Segment::Field(name));
    }

    #[inline]
    pub(crate) fn push_key(&mut self, key: &str) {
        self.segments.push(Segment::Key(String::from(key)));
    }

    #[inline]
    pub(crate) fn push_index(&mut self, index: usize) {
        self.segments.push(Segment::Index(index));
    }

    #[inline]
    pub(crate) fn pop(&mut self) {
        self.segments.pop();
    }

    pub(crate) fn render(&self) -> String {
        let mut out = String::from("root");
        for segment in &self.segments {
            // Writing into a `String` cannot fail.
            let _ = match segment {
                Segment::Field(name) => write!(out, ".{name}"),
                Segment::Key(key) => write!(out, "[{key:?}]"),
                Segment::Index(index) => write!(out, "[{index}]"),
            };
        }
        out
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::FieldPath;

    #[test]
    fn renders_segments() {
        let mut path = FieldPath::default();
        assert_eq!(path.render(), "root");

        path.push_field("children");
        path.push_index(2);
        path.push_key("name");
        assert_eq!(path.render(), r#"root.children[2]["name"]"#);

        path.pop();
        path.pop();
        assert_eq!(path.to_string(), "root.children");
    }
}
