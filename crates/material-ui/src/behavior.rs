/// Visual treatment of a [`Material`](crate::Material).
///
/// The variants are exclusive: choosing one replaces the previous one, so a
/// material can never be both raised and flat.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Behavior {
    /// Filled, no shadow.
    Default,
    /// Filled, with a drop shadow drawn beneath it.
    Raised,
    /// Fill alpha forced to zero. Icons and textures still show.
    Flat,
}

impl Behavior {
    #[inline]
    pub const fn casts_shadow(self) -> bool {
        matches!(self, Behavior::Raised)
    }

    #[inline]
    pub const fn suppresses_fill(self) -> bool {
        matches!(self, Behavior::Flat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effects_are_exclusive() {
        for b in [Behavior::Default, Behavior::Raised, Behavior::Flat] {
            assert!(!(b.casts_shadow() && b.suppresses_fill()), "{b:?}");
        }
        assert!(Behavior::Raised.casts_shadow());
        assert!(Behavior::Flat.suppresses_fill());
        assert!(!Behavior::Default.casts_shadow() && !Behavior::Default.suppresses_fill());
    }
}
