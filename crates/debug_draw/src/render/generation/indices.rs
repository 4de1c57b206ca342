//! Triangle index patterns shared by the generators
//!
//! Every method writes into a pre-sized index slice at an explicit output
//! offset and returns the offset just past what it wrote, so a generator can
//! thread one running cursor through consecutive regions.

/// Writes quad strips and pole fans into an index buffer
pub struct IndexBuilder<'a> {
    indices: &'a mut [u32],
}

impl<'a> IndexBuilder<'a> {
    /// Wrap an index buffer already sized to the final count
    pub fn new(indices: &'a mut [u32]) -> Self {
        Self { indices }
    }

    /// Emit `count` quads between two rows of `count + 1` vertices
    ///
    /// The lower-numbered row starts at `in_base`, the other row directly after
    /// it. Quad `j` joins `k, k+1, k+count+1, k+count+2` with `k = in_base + j`.
    pub fn quad_strip(&mut self, out_base: usize, in_base: u32, count: u32) -> usize {
        let row = count + 1;
        for j in 0..count {
            let k = in_base + j;
            let out = out_base + 6 * j as usize;
            self.indices[out..out + 6].copy_from_slice(&[k, k + 1, k + row, k + row, k + 1, k + row + 1]);
        }
        out_base + 6 * count as usize
    }

    /// Fan `count` pole vertices at `in_base` onto the seamed ring that follows them
    ///
    /// The pole comes first, as for the top of a sphere.
    pub fn sawtooth_up(&mut self, out_base: usize, in_base: u32, count: u32) -> usize {
        for j in 0..count {
            let k = in_base + j;
            let out = out_base + 3 * j as usize;
            self.indices[out..out + 3].copy_from_slice(&[k, k + count + 1, k + count]);
        }
        out_base + 3 * count as usize
    }

    /// Fan the seamed ring at `in_base` onto the `count` pole vertices after it
    ///
    /// The ring comes first, as for the bottom of a sphere.
    pub fn sawtooth_down(&mut self, out_base: usize, in_base: u32, count: u32) -> usize {
        for j in 0..count {
            let k = in_base + j;
            let out = out_base + 3 * j as usize;
            self.indices[out..out + 3].copy_from_slice(&[k, k + 1, k + count + 1]);
        }
        out_base + 3 * count as usize
    }

    /// Emit `strips` stacked quad strips over rings of `meridians + 1` vertices
    pub fn segment(&mut self, out_base: usize, in_base: u32, strips: u32, meridians: u32) -> usize {
        let mut out = out_base;
        for i in 0..strips {
            out = self.quad_strip(out, in_base + (meridians + 1) * i, meridians);
        }
        out
    }
}
