//! Service scope definitions.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use crate::error::{LocatorError, LocatorResult};

/// Service scopes controlling when a factory runs and whether its result is cached
///
/// Scopes are flags: a descriptor holds a [`Scopes`] set, so `Immediate` can be
/// combined with `Singleton`. The discriminants are the raw flag values
/// accepted at the integer boundary ([`Scope::from_bits`], [`Scopes::from_flags`]).
///
/// # Examples
///
/// ```rust
/// use ferrous_locator::{Scope, Scopes};
///
/// let scopes = Scope::Singleton | Scope::Immediate;
/// assert!(scopes.contains(Scope::Singleton));
/// assert!(!scopes.contains(Scope::PerLookup));
/// assert_eq!(scopes.bits(), 0b101);
///
/// assert_eq!(Scope::from_bits(2), Some(Scope::PerLookup));
/// assert_eq!(Scope::from_bits(3), None);
/// # let _ = Scopes::empty();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Scope {
    /// Constructed at most once; the instance or failure is cached and shared
    Singleton = 1,
    /// Constructed fresh on every lookup, never cached
    PerLookup = 1 << 1,
    /// Modifier on `Singleton`: constructed during registration instead of on first lookup
    Immediate = 1 << 2,
}

impl Scope {
    /// Every recognized scope, in flag order.
    pub const ALL: [Scope; 3] = [Scope::Singleton, Scope::PerLookup, Scope::Immediate];

    /// Raw flag value of this scope.
    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Maps a raw flag back to its scope.
    ///
    /// Only the exact value of a single recognized flag maps; combinations and
    /// unknown values return `None`.
    pub fn from_bits(bits: u8) -> Option<Scope> {
        Scope::ALL.into_iter().find(|scope| scope.bits() == bits)
    }

    /// Human-readable name.
    pub fn as_str(self) -> &'static str {
        match self {
            Scope::Singleton => "Singleton",
            Scope::PerLookup => "PerLookup",
            Scope::Immediate => "Immediate",
        }
    }
}

impl TryFrom<u8> for Scope {
    type Error = LocatorError;

    fn try_from(bits: u8) -> LocatorResult<Self> {
        Scope::from_bits(bits).ok_or(LocatorError::UnknownScope(bits))
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of [`Scope`] flags.
///
/// Only recognized flags can ever be stored; raw input goes through
/// [`Scopes::from_flags`] (permissive) or [`Scopes::try_from_flags`] (strict).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Scopes(u8);

impl Scopes {
    /// The empty set.
    #[inline]
    pub const fn empty() -> Self {
        Scopes(0)
    }

    /// Raw bitmask of the set.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Adds a scope; adding one already present is a no-op.
    #[inline]
    pub fn insert(&mut self, scope: Scope) {
        self.0 |= scope.bits();
    }

    /// True iff every flag of `other` is present in `self`.
    ///
    /// The empty set is contained in every set.
    #[inline]
    pub fn contains(self, other: impl Into<Scopes>) -> bool {
        let other = other.into();
        self.0 & other.0 == other.0
    }

    /// Iterates over the scopes in the set, in flag order.
    pub fn iter(self) -> impl Iterator<Item = Scope> {
        Scope::ALL.into_iter().filter(move |scope| self.contains(*scope))
    }

    /// Builds a set from raw flag values, silently dropping unrecognized ones.
    ///
    /// Each value must be exactly one recognized flag; `3` is not read as
    /// `Singleton | PerLookup`.
    ///
    /// ```rust
    /// use ferrous_locator::{Scope, Scopes};
    ///
    /// let scopes = Scopes::from_flags([1, 4, 3, 64]);
    /// assert_eq!(scopes, Scope::Singleton | Scope::Immediate);
    /// ```
    pub fn from_flags(flags: impl IntoIterator<Item = u8>) -> Self {
        let mut scopes = Scopes::empty();
        for flag in flags {
            match Scope::from_bits(flag) {
                Some(scope) => scopes.insert(scope),
                None => tracing::trace!(flag, "ignoring unrecognized scope flag"),
            }
        }
        scopes
    }

    /// Strict variant of [`Scopes::from_flags`]: the first unrecognized value
    /// fails with [`LocatorError::UnknownScope`].
    pub fn try_from_flags(flags: impl IntoIterator<Item = u8>) -> LocatorResult<Self> {
        flags
            .into_iter()
            .map(Scope::try_from)
            .collect::<LocatorResult<Scopes>>()
    }
}

impl From<Scope> for Scopes {
    #[inline]
    fn from(scope: Scope) -> Self {
        Scopes(scope.bits())
    }
}

impl FromIterator<Scope> for Scopes {
    fn from_iter<I: IntoIterator<Item = Scope>>(iter: I) -> Self {
        let mut scopes = Scopes::empty();
        for scope in iter {
            scopes.insert(scope);
        }
        scopes
    }
}

impl BitOr for Scope {
    type Output = Scopes;

    fn bitor(self, rhs: Scope) -> Scopes {
        Scopes(self.bits() | rhs.bits())
    }
}

impl BitOr<Scope> for Scopes {
    type Output = Scopes;

    fn bitor(self, rhs: Scope) -> Scopes {
        Scopes(self.0 | rhs.bits())
    }
}

impl BitOr for Scopes {
    type Output = Scopes;

    fn bitor(self, rhs: Scopes) -> Scopes {
        Scopes(self.0 | rhs.0)
    }
}

impl BitOrAssign<Scope> for Scopes {
    fn bitor_assign(&mut self, rhs: Scope) {
        self.insert(rhs);
    }
}

impl fmt::Display for Scopes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("(none)");
        }
        let mut first = true;
        for scope in self.iter() {
            if !first {
                f.write_str(" | ")?;
            }
            f.write_str(scope.as_str())?;
            first = false;
        }
        Ok(())
    }
}

impl fmt::Debug for Scopes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scopes({})", self)
    }
}
