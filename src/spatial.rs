//! Spatial partition for proximity queries.
//!
//! Nodes are bucketed into a uniform grid keyed by `floor(position / cell_size)`
//! and queried through their 3x3 cell neighborhood. The grid is rebuilt from
//! scratch every tick with a counting sort into preallocated arrays
//! (`counts` / `starts` / `entries`), so steady-state rebuilds allocate
//! nothing.
//!
//! The cell size must be at least the maximum connection reach: pairs more
//! than one cell apart are never considered connectable, which is exact
//! rather than approximate only under that precondition.

use crate::node::Node;
use crate::render::Viewport;
use glam::IVec2;

/// Uniform grid over the wrap region.
#[derive(Debug)]
pub struct SpatialGrid {
    cell_size: f32,
    cols: i32,
    rows: i32,
    /// World coordinates of the grid's min corner.
    origin: (f32, f32),
    /// Per-cell node counts for the current tick.
    counts: Vec<u32>,
    /// Exclusive prefix sums of `counts`.
    starts: Vec<u32>,
    /// Node indices grouped by cell.
    entries: Vec<u32>,
    /// Scatter cursors, reset from `starts` each rebuild.
    cursors: Vec<u32>,
}

impl SpatialGrid {
    /// Build a grid covering the viewport's wrap region.
    ///
    /// `capacity` is the maximum number of nodes the grid will ever index.
    pub fn new(viewport: Viewport, cell_size: f32, capacity: usize) -> Self {
        let (cols, rows, origin) = Self::extents(viewport, cell_size);
        let cells = (cols * rows) as usize;
        Self {
            cell_size,
            cols,
            rows,
            origin,
            counts: vec![0; cells],
            starts: vec![0; cells],
            entries: vec![0; capacity],
            cursors: vec![0; cells],
        }
    }

    fn extents(viewport: Viewport, cell_size: f32) -> (i32, i32, (f32, f32)) {
        let (wx, wy) = viewport.wrap();
        let cols = ((2.0 * wx / cell_size).ceil() as i32).max(1);
        let rows = ((2.0 * wy / cell_size).ceil() as i32).max(1);
        (cols, rows, (-wx, -wy))
    }

    /// Re-derive grid extents after a viewport change.
    pub fn resize(&mut self, viewport: Viewport) {
        let (cols, rows, origin) = Self::extents(viewport, self.cell_size);
        self.cols = cols;
        self.rows = rows;
        self.origin = origin;
        let cells = (cols * rows) as usize;
        self.counts.resize(cells, 0);
        self.starts.resize(cells, 0);
        self.cursors.resize(cells, 0);
    }

    /// Grid cell containing a world position, clamped to the grid.
    #[inline]
    pub fn cell_of(&self, x: f32, y: f32) -> IVec2 {
        let cx = ((x - self.origin.0) / self.cell_size).floor() as i32;
        let cy = ((y - self.origin.1) / self.cell_size).floor() as i32;
        IVec2::new(cx.clamp(0, self.cols - 1), cy.clamp(0, self.rows - 1))
    }

    #[inline]
    fn cell_index(&self, cell: IVec2) -> usize {
        (cell.y * self.cols + cell.x) as usize
    }

    /// Rebucket every node, storing each node's cell coordinates back onto it.
    pub fn rebuild(&mut self, nodes: &mut [Node]) {
        debug_assert!(nodes.len() <= self.entries.len());

        self.counts.fill(0);
        for node in nodes.iter_mut() {
            let cell = self.cell_of(node.position.x, node.position.y);
            node.cell = cell;
            let idx = self.cell_index(cell);
            self.counts[idx] += 1;
        }

        let mut running = 0;
        for (start, count) in self.starts.iter_mut().zip(&self.counts) {
            *start = running;
            running += count;
        }
        self.cursors.copy_from_slice(&self.starts);

        for (i, node) in nodes.iter().enumerate() {
            let cell = self.cell_index(node.cell);
            self.entries[self.cursors[cell] as usize] = i as u32;
            self.cursors[cell] += 1;
        }
    }

    /// Node indices bucketed into one cell.
    #[inline]
    pub fn cell_entries(&self, cell: IVec2) -> &[u32] {
        let idx = self.cell_index(cell);
        let start = self.starts[idx] as usize;
        let end = start + self.counts[idx] as usize;
        &self.entries[start..end]
    }

    /// Iterate the node indices of a cell and its 8 neighbors.
    pub fn neighborhood(&self, cell: IVec2) -> Neighborhood<'_> {
        Neighborhood {
            grid: self,
            center: cell,
            step: 0,
            slice: &[],
            offset: 0,
        }
    }
}

/// Iterator over the 3x3 cell neighborhood of a cell.
pub struct Neighborhood<'a> {
    grid: &'a SpatialGrid,
    center: IVec2,
    /// Which of the 9 cells we are draining, 0..9.
    step: u8,
    slice: &'a [u32],
    offset: usize,
}

impl<'a> Iterator for Neighborhood<'a> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        loop {
            if self.offset < self.slice.len() {
                let idx = self.slice[self.offset];
                self.offset += 1;
                return Some(idx);
            }
            if self.step >= 9 {
                return None;
            }
            let dx = (self.step % 3) as i32 - 1;
            let dy = (self.step / 3) as i32 - 1;
            self.step += 1;

            let cell = self.center + IVec2::new(dx, dy);
            if cell.x < 0 || cell.y < 0 || cell.x >= self.grid.cols || cell.y >= self.grid.rows {
                continue;
            }
            self.slice = self.grid.cell_entries(cell);
            self.offset = 0;
        }
    }
}
