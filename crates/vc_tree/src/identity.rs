use core::fmt;

// -----------------------------------------------------------------------------
// Identity

/// The per-conversion identity of an object in a property tree.
///
/// `0` is reserved as the null sentinel ("not tracked"), real identities
/// start at [`Identity::FIRST`] and are allocated in increasing order.
///
/// # Examples
///
/// ```
/// use vc_tree::Identity;
///
/// assert!(Identity::NULL.is_null());
/// assert_eq!(Identity::FIRST.next(), Some(Identity::new(2)));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Identity(u32);

impl Identity {
    /// The null sentinel.
    pub const NULL: Self = Self(0);

    /// The first identity handed out to a real object.
    pub const FIRST: Self = Self(1);

    #[inline(always)]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    #[inline(always)]
    pub const fn get(self) -> u32 {
        self.0
    }

    #[inline(always)]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Returns the identity following this one, or `None` once the
    /// identity space is exhausted.
    #[inline]
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(raw) => Some(Self(raw)),
            None => None,
        }
    }
}

impl From<u32> for Identity {
    #[inline(always)]
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Identity> for u32 {
    #[inline(always)]
    fn from(value: Identity) -> Self {
        value.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
