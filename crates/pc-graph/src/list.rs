/// The maximum number of admissible colors a vertex can carry. 3 is the
/// interesting case for list coloring; the cap leaves headroom for
/// callers that start from a larger palette and shrink it before
/// handing the graph to the coloring algorithms.
pub const MAX_LIST_LEN: usize = 6;

/// A small fixed-capacity set of admissible colors for one vertex,
/// mutated in place by the list-coloring algorithm as it shrinks lists
/// toward singletons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdmissibleList {
    colors: [i32; MAX_LIST_LEN],
    len: u8,
}

impl AdmissibleList {
    pub fn from_slice(colors: &[i32]) -> Self {
        assert!(
            colors.len() <= MAX_LIST_LEN,
            "admissible list exceeds the {MAX_LIST_LEN}-color cap"
        );
        let mut buf = [0i32; MAX_LIST_LEN];
        buf[..colors.len()].copy_from_slice(colors);
        AdmissibleList { colors: buf, len: colors.len() as u8 }
    }

    pub fn singleton(color: i32) -> Self {
        Self::from_slice(&[color])
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.colors[..self.len as usize]
    }

    pub fn contains(&self, color: i32) -> bool {
        self.as_slice().contains(&color)
    }

    /// The committed color, once the list has been shrunk to one entry.
    pub fn committed(&self) -> Option<i32> {
        if self.len == 1 {
            Some(self.colors[0])
        } else {
            None
        }
    }

    /// Shrinks this list to the single color `color`, which must already
    /// be a member.
    pub fn commit(&mut self, color: i32) {
        debug_assert!(self.contains(color), "committing a color outside the admissible list");
        self.colors[0] = color;
        self.len = 1;
    }

    /// Removes `color` from this list if present. Returns the new length.
    pub fn remove(&mut self, color: i32) -> usize {
        if let Some(pos) = self.as_slice().iter().position(|&c| c == color) {
            for i in pos..self.len as usize - 1 {
                self.colors[i] = self.colors[i + 1];
            }
            self.len -= 1;
        }
        self.len as usize
    }

    /// Returns a color present in both `self` and `other`, if any.
    pub fn intersect_one(&self, other: &AdmissibleList) -> Option<i32> {
        self.as_slice().iter().copied().find(|c| other.contains(*c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_shrinks_to_singleton() {
        let mut l = AdmissibleList::from_slice(&[1, 2, 3]);
        l.commit(2);
        assert_eq!(l.committed(), Some(2));
        assert_eq!(l.len(), 1);
    }

    #[test]
    fn remove_preserves_remaining_members() {
        let mut l = AdmissibleList::from_slice(&[1, 2, 3]);
        l.remove(2);
        assert_eq!(l.as_slice(), &[1, 3]);
    }

    #[test]
    fn intersect_one_finds_shared_color() {
        let a = AdmissibleList::from_slice(&[1, 2, 3]);
        let b = AdmissibleList::from_slice(&[4, 3, 5]);
        assert_eq!(a.intersect_one(&b), Some(3));
    }
}
