//! Per-page quad buffers.
//!
//! Each atlas page used by a text gets one [`PageBatch`] holding a quad per
//! glyph. Batches stay bound to their page across layout passes and keep
//! their buffers, so re-laying out text of similar length writes into the
//! same memory. Batches no longer needed go back to a [`Pool`] and are handed
//! out again when a new page shows up.
//!
//! Hosts key GPU resources on [`BatchId`]. A batch's `generation` changes
//! whenever its buffers were reallocated, which is the signal to recreate
//! rather than update the GPU side. [`BatchEvent`]s report batches entering
//! and leaving the drawable set.

use sdftext_core::alloc::{HashMap, Pool, Recycle};
use sdftext_core::geometry::Size;
use sdftext_core::math::Vec2;
use sdftext_core::profiling::{profile_function, profile_scope};

use crate::config::BatchConfig;
use crate::font::PageId;
use crate::layout::{GlyphLayout, glyph_offset};
use crate::style::TextAlign;

pub const FLOATS_PER_QUAD: usize = 8;
pub const INDICES_PER_QUAD: usize = 6;

const QUAD_INDICES: [u32; INDICES_PER_QUAD] = [0, 1, 2, 0, 2, 3];

/// Stable handle of a batch, unique within its [`BatchSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BatchId(pub u64);

/// Change in the set of drawable batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchEvent {
    Attached { id: BatchId, page: PageId },
    Detached { id: BatchId, page: PageId },
}

/// Quads of every glyph on one atlas page.
///
/// Vertices are `x, y` pairs in top-left, top-right, bottom-right,
/// bottom-left order. Buffers always hold `capacity` quads; only the first
/// `live` are meaningful and the rest are zeroed.
#[derive(Debug)]
pub struct PageBatch {
    id: BatchId,
    page: PageId,
    capacity: usize,
    live: usize,
    generation: u32,
    vertices: Vec<f32>,
    uvs: Vec<f32>,
    indices: Vec<u32>,
}

impl PageBatch {
    fn new(id: BatchId, page: PageId) -> Self {
        Self {
            id,
            page,
            capacity: 0,
            live: 0,
            generation: 0,
            vertices: Vec::new(),
            uvs: Vec::new(),
            indices: Vec::new(),
        }
    }

    pub fn id(&self) -> BatchId {
        self.id
    }

    pub fn page(&self) -> PageId {
        self.page
    }

    /// Number of quads the buffers can hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of quads written by the last pass.
    pub fn live(&self) -> usize {
        self.live
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Vertex positions of the live quads.
    pub fn vertices(&self) -> &[f32] {
        &self.vertices[..self.live * FLOATS_PER_QUAD]
    }

    pub fn uvs(&self) -> &[f32] {
        &self.uvs[..self.live * FLOATS_PER_QUAD]
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices[..self.live * INDICES_PER_QUAD]
    }

    /// Full vertex buffer including the zeroed tail, for upload.
    pub fn vertex_buffer(&self) -> &[f32] {
        &self.vertices
    }

    pub fn uv_buffer(&self) -> &[f32] {
        &self.uvs
    }

    pub fn index_buffer(&self) -> &[u32] {
        &self.indices
    }

    /// Make room for `needed` quads. Returns `true` if buffers were reallocated.
    fn reserve(&mut self, needed: usize, config: &BatchConfig) -> bool {
        if config.needs_realloc(self.capacity, needed) {
            tracing::debug!(
                "Reallocating batch {:?} on page {}: {} -> {} quads",
                self.id,
                self.page.0,
                self.capacity,
                needed
            );
            self.capacity = needed;
            self.vertices = vec![0.0; needed * FLOATS_PER_QUAD];
            self.uvs = vec![0.0; needed * FLOATS_PER_QUAD];
            self.indices = (0..needed as u32)
                .flat_map(|quad| QUAD_INDICES.map(|i| i + quad * 4))
                .collect();
            self.generation = self.generation.wrapping_add(1);
            self.live = needed;
            return true;
        }

        if needed < self.live {
            let stale = needed * FLOATS_PER_QUAD..self.live * FLOATS_PER_QUAD;
            self.vertices[stale.clone()].fill(0.0);
            self.uvs[stale].fill(0.0);
        }
        self.live = needed;
        false
    }

    fn write_quad(&mut self, quad: usize, origin: Vec2, size: Vec2, uvs: &[Vec2; 4]) {
        debug_assert!(quad < self.live, "quad {quad} beyond live count {}", self.live);
        let base = quad * FLOATS_PER_QUAD;
        let (x0, y0) = (origin.x, origin.y);
        let (x1, y1) = (origin.x + size.x, origin.y + size.y);
        self.vertices[base..base + FLOATS_PER_QUAD]
            .copy_from_slice(&[x0, y0, x1, y0, x1, y1, x0, y1]);
        for (dst, uv) in self.uvs[base..base + FLOATS_PER_QUAD]
            .chunks_exact_mut(2)
            .zip(uvs)
        {
            dst[0] = uv.x;
            dst[1] = uv.y;
        }
    }

    fn translate(&mut self, delta: Vec2) {
        for vertex in self.vertices[..self.live * FLOATS_PER_QUAD].chunks_exact_mut(2) {
            vertex[0] += delta.x;
            vertex[1] += delta.y;
        }
    }

    #[cfg(debug_assertions)]
    fn check_invariants(&self) {
        debug_assert_eq!(self.vertices.len(), self.capacity * FLOATS_PER_QUAD);
        debug_assert_eq!(self.uvs.len(), self.capacity * FLOATS_PER_QUAD);
        debug_assert_eq!(self.indices.len(), self.capacity * INDICES_PER_QUAD);
        debug_assert!(self.live <= self.capacity);
    }
}

impl Recycle for PageBatch {
    fn recycle(&mut self) {
        let live = self.live * FLOATS_PER_QUAD;
        self.vertices[..live].fill(0.0);
        self.uvs[..live].fill(0.0);
        self.live = 0;
    }
}

/// Inputs for writing a layout into batches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildParams {
    /// Render pixels per native font pixel.
    pub scale: f32,
    pub align: TextAlign,
    pub round_pixels: bool,
    /// Fraction of the measured size subtracted from every vertex.
    pub anchor: Vec2,
    /// Line height plus line spacing, in native pixels.
    pub line_advance: f32,
}

/// The batches of one text instance plus the pool backing them.
#[derive(Debug, Default)]
pub struct BatchSet {
    config: BatchConfig,
    batches: Vec<PageBatch>,
    pool: Pool<PageBatch>,
    events: Vec<BatchEvent>,
    next_id: u64,

    // scratch reused between passes
    page_slots: HashMap<PageId, usize>,
    page_counts: Vec<(PageId, usize)>,
    retired: Vec<PageBatch>,
    staged: Vec<Option<PageBatch>>,
    cursors: Vec<usize>,
}

impl BatchSet {
    pub fn new(config: BatchConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: BatchConfig) {
        self.config = config;
    }

    /// Batches in first-appearance order of their page.
    pub fn batches(&self) -> &[PageBatch] {
        &self.batches
    }

    /// Batches waiting in the pool.
    pub fn pooled(&self) -> usize {
        self.pool.available()
    }

    pub fn drain_events(&mut self) -> std::vec::Drain<'_, BatchEvent> {
        self.events.drain(..)
    }

    /// Write `layout` into page batches and return the measured size in
    /// render pixels.
    ///
    /// Line offsets in `layout` must already be resolved.
    pub fn rebuild(&mut self, layout: &GlyphLayout, params: &BuildParams) -> Size<f32> {
        profile_function!();
        self.group_pages(layout);
        self.bind_batches();

        {
            profile_scope!("write_quads");
            self.cursors.clear();
            self.cursors.resize(self.batches.len(), 0);
            for glyph in &layout.glyphs {
                let slot = self.page_slots[&glyph.page];
                let quad = self.cursors[slot];
                self.cursors[slot] += 1;

                let mut x = glyph.position.x + glyph_offset(glyph, &layout.lines, params.align);
                if params.round_pixels {
                    x = x.round();
                }
                let origin = Vec2::new(x, glyph.position.y) * params.scale;
                self.batches[slot].write_quad(quad, origin, glyph.size * params.scale, &glyph.uvs);
            }
        }

        let size = Size::new(
            layout.max_line_width,
            layout.line_count as f32 * params.line_advance,
        ) * params.scale;
        let shift = -params.anchor * Vec2::new(size.width, size.height);
        if shift != Vec2::ZERO {
            for batch in &mut self.batches {
                batch.translate(shift);
            }
        }

        #[cfg(debug_assertions)]
        for batch in &self.batches {
            batch.check_invariants();
        }
        size
    }

    /// Count glyphs per page in first-appearance order.
    fn group_pages(&mut self, layout: &GlyphLayout) {
        self.page_slots.clear();
        self.page_counts.clear();
        for glyph in &layout.glyphs {
            let counts = &mut self.page_counts;
            let slot = *self.page_slots.entry(glyph.page).or_insert_with(|| {
                counts.push((glyph.page, 0));
                counts.len() - 1
            });
            self.page_counts[slot].1 += 1;
        }
    }

    /// Give every page in `page_counts` a batch sized for its glyphs.
    fn bind_batches(&mut self) {
        self.retired.append(&mut self.batches);

        self.staged.clear();
        for &(page, _) in &self.page_counts {
            let bound = self
                .retired
                .iter()
                .position(|b| b.page == page)
                .map(|idx| self.retired.swap_remove(idx));
            self.staged.push(bound);
        }

        for batch in self.retired.drain(..) {
            tracing::trace!("Releasing batch {:?} from page {}", batch.id, batch.page.0);
            self.events.push(BatchEvent::Detached {
                id: batch.id,
                page: batch.page,
            });
            self.pool.release(batch);
        }

        for (bound, &(page, count)) in self.staged.iter_mut().zip(&self.page_counts) {
            let mut batch = match bound.take() {
                Some(batch) => batch,
                None => {
                    let next_id = &mut self.next_id;
                    let mut batch = self.pool.acquire_matching(
                        |b| b.capacity >= count,
                        || {
                            *next_id += 1;
                            PageBatch::new(BatchId(*next_id), page)
                        },
                    );
                    batch.page = page;
                    tracing::trace!(
                        "Attaching batch {:?} to page {} ({} created, {} pooled at most)",
                        batch.id,
                        page.0,
                        self.pool.created(),
                        self.pool.high_water()
                    );
                    self.events.push(BatchEvent::Attached { id: batch.id, page });
                    batch
                }
            };
            batch.reserve(count, &self.config);
            self.batches.push(batch);
        }
    }
}
