use rand::{Rng, seq::SliceRandom};

use super::ShuffleError;

/// A reordering of the positions `0..len`.
///
/// Every position appears exactly once. Applying it as
/// `output[i] = input[permutation[i]]` yields the shuffled order while the
/// input itself stays untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation(Vec<usize>);

impl Permutation {
    /// Draws a uniformly random permutation of `0..len` from the thread-local
    /// generator.
    pub fn random(len: usize) -> Self {
        Self::random_with(len, &mut rand::rng())
    }

    /// Draws a uniformly random permutation of `0..len` from `rng`.
    ///
    /// Uses the Fisher-Yates shuffle from [`SliceRandom::shuffle`], so each of
    /// the `len!` orderings is equally likely given a fair generator.
    pub fn random_with<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Self {
        let mut indices: Vec<usize> = (0..len).collect();
        indices.shuffle(rng);
        Self(indices)
    }

    /// Wraps an existing index sequence after checking that it covers
    /// `0..indices.len()` exactly once.
    pub fn from_indices(indices: Vec<usize>) -> Result<Self, ShuffleError> {
        let mut seen = vec![false; indices.len()];
        for &index in &indices {
            match seen.get_mut(index) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => {
                    return Err(ShuffleError::InvalidArgument(format!(
                        "position {index} appears more than once"
                    )));
                }
                None => {
                    return Err(ShuffleError::InvalidArgument(format!(
                        "position {index} is out of range for length {}",
                        indices.len()
                    )));
                }
            }
        }
        Ok(Self(indices))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Dereferences the permutation against `items`.
    ///
    /// Fails when `items` does not have exactly as many elements as the
    /// permutation has positions, which happens when the collection changed
    /// after the permutation was drawn.
    pub fn apply<'a, T>(&self, items: &'a [T]) -> Result<Vec<&'a T>, ShuffleError> {
        if items.len() != self.0.len() {
            return Err(ShuffleError::InvalidArgument(format!(
                "permutation covers {} positions but the collection has {}",
                self.0.len(),
                items.len()
            )));
        }

        Ok(self.0.iter().map(|&index| &items[index]).collect())
    }
}
