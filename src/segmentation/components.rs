//! Connected-component labelling of an alpha mask.
//!
//! Components are grown with an 8-connected flood fill driven by an explicit
//! stack, so very large sprites cannot overflow the call stack. Seeds are
//! taken in row-major order, which fixes the output order for a given mask.
//!
//! ## Empty row / column guard
//!
//! A step that moves horizontally is only taken if the destination column
//! holds at least one opaque pixel somewhere in the image; likewise a step
//! that moves vertically requires an occupied destination row. A diagonal
//! step must satisfy both. Fill seeding is not restricted to mask boundary
//! pixels.

use tracing::debug;

use crate::geometry::PixelBounds;

use super::alpha_mask::AlphaMask;

/// 8-connected neighbor offsets.
#[rustfmt::skip]
const NEIGHBORS: [(isize, isize); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0),           (1, 0),
    (-1, 1),  (0, 1),  (1, 1),
];

/// One maximal group of connected opaque pixels.
#[derive(Clone, Debug)]
pub struct Component {
    pub bounds: PixelBounds,
    /// Row-major source indices (`y * width + x`) of every member pixel, in
    /// visiting order.
    pub members: Vec<usize>,
}

impl Component {
    pub fn pixel_count(&self) -> usize {
        self.members.len()
    }
}

/// Find every connected component whose padded bounding box is at least
/// `min_size` on both sides. Smaller components are dropped.
pub fn find_components(mask: &AlphaMask, min_size: u32, padding: u32) -> Vec<Component> {
    let (width, height) = (mask.width(), mask.height());
    let rows = mask.occupied_rows();
    let cols = mask.occupied_columns();
    let mut visited = vec![false; width * height];
    let mut components = Vec::new();
    let mut discarded = 0usize;

    for y in 0..height {
        if !rows[y] {
            continue;
        }
        for x in 0..width {
            let idx = y * width + x;
            if visited[idx] || !mask.is_opaque(x, y) {
                continue;
            }

            let component = flood_fill(mask, &rows, &cols, &mut visited, x, y);
            if component.bounds.padded(padding).meets_min_size(min_size) {
                components.push(component);
            } else {
                discarded += 1;
            }
        }
    }

    debug!(
        kept = components.len(),
        discarded, min_size, padding, "Connected components found"
    );
    components
}

/// Grow one component from `(seed_x, seed_y)`, marking members as visited.
fn flood_fill(
    mask: &AlphaMask,
    rows: &[bool],
    cols: &[bool],
    visited: &mut [bool],
    seed_x: usize,
    seed_y: usize,
) -> Component {
    let (width, height) = (mask.width(), mask.height());
    let mut bounds = PixelBounds::at(seed_x, seed_y);
    let mut members = Vec::new();
    let mut stack = vec![(seed_x, seed_y)];

    while let Some((x, y)) = stack.pop() {
        let idx = y * width + x;
        if visited[idx] || !mask.is_opaque(x, y) {
            continue;
        }
        visited[idx] = true;
        members.push(idx);
        bounds.include(x, y);

        for &(dx, dy) in &NEIGHBORS {
            let nx = x as isize + dx;
            let ny = y as isize + dy;
            if nx < 0 || ny < 0 || nx >= width as isize || ny >= height as isize {
                continue;
            }
            let (nx, ny) = (nx as usize, ny as usize);

            if dx != 0 && !cols[nx] {
                continue;
            }
            if dy != 0 && !rows[ny] {
                continue;
            }

            if !visited[ny * width + nx] && mask.is_opaque(nx, ny) {
                stack.push((nx, ny));
            }
        }
    }

    Component { bounds, members }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Raster;

    /// Build a mask from ASCII art: `#` is opaque, anything else transparent.
    fn mask_from(rows: &[&str]) -> AlphaMask {
        let width = rows[0].len();
        let data = rows
            .iter()
            .flat_map(|row| row.chars())
            .flat_map(|c| if c == '#' { [0, 0, 0, 255] } else { [0, 0, 0, 0] })
            .collect();
        AlphaMask::build(&Raster::from_rgba(width, rows.len(), data).unwrap(), 1)
    }

    #[test]
    fn test_empty_mask() {
        let mask = mask_from(&["....", "...."]);
        assert!(find_components(&mask, 1, 0).is_empty());
    }

    #[test]
    fn test_diagonal_pixels_connect() {
        let mask = mask_from(&[
            "#...",
            ".#..",
            "..#.",
        ]);
        let components = find_components(&mask, 1, 0);
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].pixel_count(), 3);
        assert_eq!(components[0].bounds, PixelBounds { min_x: 0, min_y: 0, max_x: 2, max_y: 2 });
    }

    #[test]
    fn test_separate_regions_in_scan_order() {
        let mask = mask_from(&[
            "...##",
            "...##",
            ".....",
            "##...",
        ]);
        let components = find_components(&mask, 1, 0);
        assert_eq!(components.len(), 2);
        // Seed of the first component is found first in the row-major scan
        assert_eq!(components[0].bounds.min_x, 3);
        assert_eq!(components[1].bounds.min_y, 3);
    }

    #[test]
    fn test_gap_of_one_pixel_separates() {
        let mask = mask_from(&[
            "#.#",
            "#.#",
        ]);
        assert_eq!(find_components(&mask, 1, 0).len(), 2);
    }

    #[test]
    fn test_no_pixel_in_two_components() {
        let mask = mask_from(&[
            "##.#",
            "#..#",
            ".##.",
            "#..#",
        ]);
        let components = find_components(&mask, 1, 0);
        let total: usize = components.iter().map(Component::pixel_count).sum();
        assert_eq!(total, mask.count());

        let mut all: Vec<usize> = components.iter().flat_map(|c| c.members.clone()).collect();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), total);
    }

    #[test]
    fn test_min_size_filter_counts_padding() {
        // Single 2x2 blob: padded by 1 it becomes 4x4
        let mask = mask_from(&[
            "......",
            ".##...",
            ".##...",
            "......",
        ]);
        assert_eq!(find_components(&mask, 4, 1).len(), 1);
        assert_eq!(find_components(&mask, 5, 1).len(), 0);
        assert_eq!(find_components(&mask, 2, 0).len(), 1);
        assert_eq!(find_components(&mask, 3, 0).len(), 0);
    }

    #[test]
    fn test_deterministic() {
        let mask = mask_from(&[
            "#.#.#",
            ".#...",
            "...##",
        ]);
        let a = find_components(&mask, 1, 0);
        let b = find_components(&mask, 1, 0);
        let bounds_a: Vec<_> = a.iter().map(|c| c.bounds).collect();
        let bounds_b: Vec<_> = b.iter().map(|c| c.bounds).collect();
        assert_eq!(bounds_a, bounds_b);
    }

    #[test]
    fn test_large_component_does_not_recurse() {
        let row = "#".repeat(400);
        let rows: Vec<&str> = std::iter::repeat(row.as_str()).take(400).collect();
        let mask = mask_from(&rows);
        let components = find_components(&mask, 1, 0);
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].pixel_count(), 160_000);
    }
}
