use pc_core::Arena;

/// Per-vertex scratch labels the frame-based state machines use to tell
/// which already-decided region a boundary vertex belongs to: `-1`
/// means unmarked, and any other value is a mark class handed out by
/// [`Marks::fresh`]. Two vertices with the same mark class were placed
/// on the boundary by the same frame; this is what lets a chord
/// encountered mid-scan be told apart from a vertex that merely
/// happens to share a color.
pub struct Marks<'a> {
    m: &'a mut [i32],
    next_mark: i32,
}

impl<'a> Marks<'a> {
    pub fn new(arena: &'a Arena, n: usize) -> Self {
        Marks { m: arena.alloc_slice_fill_copy(n, -1i32), next_mark: 0 }
    }

    pub fn get(&self, v: u32) -> i32 {
        self.m[v as usize]
    }

    pub fn set(&mut self, v: u32, mark: i32) {
        self.m[v as usize] = mark;
    }

    pub fn is_marked(&self, v: u32) -> bool {
        self.m[v as usize] >= 0
    }

    /// Hands out a fresh mark class, distinct from every class issued
    /// so far by this instance.
    pub fn fresh(&mut self) -> i32 {
        let mark = self.next_mark;
        self.next_mark += 1;
        mark
    }
}

#[cfg(test)]
mod marks_tests {
    use super::*;

    #[test]
    fn fresh_marks_are_distinct_and_unmarked_starts_at_minus_one() {
        let arena = Arena::with_capacity(4096);
        let mut marks = Marks::new(&arena, 4);
        assert!(!marks.is_marked(0));
        let a = marks.fresh();
        let b = marks.fresh();
        assert_ne!(a, b);
        marks.set(0, a);
        marks.set(1, b);
        assert!(marks.is_marked(0));
        assert_eq!(marks.get(0), a);
        assert_eq!(marks.get(1), b);
    }
}

/// The output coloring: `0` means uncolored, positive values are colors.
pub struct Coloring<'a> {
    c: &'a mut [i32],
}

impl<'a> Coloring<'a> {
    pub fn new(arena: &'a Arena, n: usize) -> Self {
        Coloring { c: arena.alloc_slice_fill_copy(n, 0i32) }
    }

    pub fn get(&self, v: u32) -> i32 {
        self.c[v as usize]
    }

    pub fn set(&mut self, v: u32, color: i32) {
        debug_assert!(color > 0, "0 is reserved for uncolored");
        self.c[v as usize] = color;
    }

    pub fn is_colored(&self, v: u32) -> bool {
        self.c[v as usize] != 0
    }

    pub fn as_slice(&self) -> &[i32] {
        self.c
    }
}
