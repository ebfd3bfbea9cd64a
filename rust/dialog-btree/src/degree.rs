use crate::DialogBTreeError;

/// The minimum degree (`t`) of a [`BTree`](crate::BTree).
///
/// Every node other than the root holds between `t - 1` and `2t - 1`
/// entries. The degree is fixed when a tree is constructed and never changes
/// afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Degree(usize);

impl Degree {
    /// The smallest degree for which a B-Tree exists.
    pub const MINIMUM: usize = 2;

    /// The degree used by [`Degree::default`].
    pub const DEFAULT: Degree = Degree(Self::MINIMUM);

    /// Creates a new [`Degree`], rejecting values below [`Degree::MINIMUM`].
    pub fn new(degree: usize) -> Result<Self, DialogBTreeError> {
        if degree < Self::MINIMUM {
            return Err(DialogBTreeError::InvalidConfiguration(format!(
                "Minimum degree must be at least {}, got {degree}",
                Self::MINIMUM
            )));
        }

        if degree.checked_mul(2).is_none() {
            return Err(DialogBTreeError::InvalidConfiguration(format!(
                "Minimum degree {degree} is too large to bound a node"
            )));
        }

        Ok(Self(degree))
    }

    /// The raw value of `t`.
    pub fn get(self) -> usize {
        self.0
    }

    /// The fewest entries a non-root node may hold (`t - 1`).
    pub fn min_entries(self) -> usize {
        self.0 - 1
    }

    /// The most entries any node may hold (`2t - 1`).
    pub fn max_entries(self) -> usize {
        2 * self.0 - 1
    }
}

impl Default for Degree {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<usize> for Degree {
    type Error = DialogBTreeError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::Degree;
    use crate::DialogBTreeError;

    #[test]
    fn it_derives_occupancy_bounds() {
        let degree = Degree::new(3).unwrap();

        assert_eq!(degree.get(), 3);
        assert_eq!(degree.min_entries(), 2);
        assert_eq!(degree.max_entries(), 5);
    }

    #[test]
    fn it_rejects_degrees_below_two() {
        for degree in [0, 1] {
            assert!(matches!(
                Degree::try_from(degree),
                Err(DialogBTreeError::InvalidConfiguration(_))
            ));
        }
    }

    #[test]
    fn it_rejects_degrees_whose_node_bound_overflows() {
        assert!(matches!(
            Degree::new(usize::MAX / 2 + 1),
            Err(DialogBTreeError::InvalidConfiguration(_))
        ));

        let largest = Degree::new(usize::MAX / 2).unwrap();
        assert_eq!(largest.max_entries(), usize::MAX - 2);
    }

    #[test]
    fn it_defaults_to_the_smallest_degree() {
        assert_eq!(Degree::default().get(), Degree::MINIMUM);
        assert_eq!(Degree::default().max_entries(), 3);
    }
}
