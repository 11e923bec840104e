//! Cached quad triangulation indices

/// Largest quad count addressable with 16-bit indices (4 vertices per quad)
pub(crate) const MAX_QUADS_PER_BATCH: usize = (u16::MAX as usize + 1) / 4;

/// Monotonically-growing table of quad triangulation indices
///
/// Each quad `k` is encoded as two triangles over its four vertices:
/// `[4k, 4k+1, 4k+2, 4k+2, 4k+1, 4k+3]`. The table is sized to the largest
/// quad count ever requested and never shrinks, so frames drawing similar or
/// growing batch sizes reuse it without regeneration; only the upload cost
/// scales with the per-draw quad count.
#[derive(Debug, Default)]
pub(crate) struct QuadIndexTable {
    indices: Vec<u16>,
}

impl QuadIndexTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index sequence for `quads` quads, regenerating the table only when
    /// the request exceeds its current capacity
    pub fn indices_for(&mut self, quads: usize) -> &[u16] {
        debug_assert!(
            quads <= MAX_QUADS_PER_BATCH,
            "quad batch of {quads} exceeds the 16-bit index limit of {MAX_QUADS_PER_BATCH}"
        );

        let needed = quads * 6;
        if needed > self.indices.len() {
            log::trace!("regenerating quad index table for {quads} quads");
            self.indices.clear();
            self.indices.reserve(needed);
            for quad in 0..quads as u16 {
                let base = quad * 4;
                self.indices
                    .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 1, base + 3]);
            }
        }
        &self.indices[..needed]
    }
}
