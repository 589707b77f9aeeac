use super::ReorderError;

/// A client-submitted reordering request.
///
/// One pair per display slot: the identifier of the slot's previous occupant
/// and the identifier of the item occupying it now. Pairs cover the visible
/// page, not necessarily the whole scope. Submitting a permutation derived
/// from already-applied state is an effective no-op.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Permutation {
    pairs: Vec<(String, String)>,
}

impl Permutation {
    /// Build from `(old_key, new_key)` pairs, one per slot in display order.
    pub fn from_pairs<I, A, B>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<String>,
        B: Into<String>,
    {
        Permutation {
            pairs: pairs
                .into_iter()
                .map(|(old, new)| (old.into(), new.into()))
                .collect(),
        }
    }

    /// Build by zipping the id sequence before the drag with the sequence
    /// after it. The sequences must be the same length.
    pub fn from_sequences<A, B>(before: &[A], after: &[B]) -> Result<Self, ReorderError>
    where
        A: AsRef<str>,
        B: AsRef<str>,
    {
        if before.len() != after.len() {
            return Err(ReorderError::MismatchedSequences {
                before: before.len(),
                after: after.len(),
            });
        }

        Ok(Permutation {
            pairs: before
                .iter()
                .zip(after.iter())
                .map(|(old, new)| (old.as_ref().to_string(), new.as_ref().to_string()))
                .collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate `(old_key, new_key)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|(old, new)| (old.as_str(), new.as_str()))
    }
}

impl From<Vec<(String, String)>> for Permutation {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Permutation { pairs }
    }
}
