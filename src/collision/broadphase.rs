//! Sort-and-sweep broad phase over cached boundary projections.

use crate::core::boundary::Boundary;
use crate::core::types::Interval;

/// Sorts `items` in place by the start of their x projection.
///
/// Objects move little between ticks, so the live set stays nearly sorted and
/// insertion sort runs close to linear time. Entries without a key keep their
/// relative order at the front.
pub fn insertion_sort_by_start<T: Copy>(items: &mut [T], x_of: impl Fn(T) -> Option<Interval>) {
    let start_of = |item: T| x_of(item).map_or(f64::NEG_INFINITY, |x| x.start);
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && start_of(items[j]) < start_of(items[j - 1]) {
            items.swap(j, j - 1);
            j -= 1;
        }
    }
}

/// Candidate pair finder. Keeps its pair buffer between ticks.
#[derive(Debug)]
pub struct BroadPhase<T> {
    pairs: Vec<(T, T)>,
}

impl<T: Copy> Default for BroadPhase<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy> BroadPhase<T> {
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Sweeps a list sorted by x start and returns every pair whose x and y
    /// projections overlap and whose slabs are coplanar.
    ///
    /// The scan from `i` stops at the first `j` whose x projection no longer
    /// overlaps, since every later entry starts even further right.
    pub fn find_pairs<'b>(
        &mut self,
        sorted: &[T],
        boundary_of: impl Fn(T) -> Option<&'b Boundary>,
    ) -> &[(T, T)] {
        self.pairs.clear();
        for (i, &a) in sorted.iter().enumerate() {
            let Some(boundary_a) = boundary_of(a) else {
                continue;
            };
            let pa = boundary_a.projections();
            for &b in &sorted[i + 1..] {
                let Some(boundary_b) = boundary_of(b) else {
                    continue;
                };
                let pb = boundary_b.projections();
                if !pa.x.overlaps(&pb.x) {
                    break;
                }
                if pa.y.overlaps(&pb.y) && boundary_a.is_coplanar(boundary_b) {
                    self.pairs.push((a, b));
                }
            }
        }
        &self.pairs
    }

    pub fn pairs(&self) -> &[(T, T)] {
        &self.pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::shapes::Shape;
    use crate::core::types::Point;

    fn placed(shape: Shape, x: f64, y: f64, z: f64) -> Boundary {
        let mut boundary = Boundary::new(shape);
        boundary.update_projections(Point::new(x, y, z));
        boundary
    }

    #[test]
    fn sorts_by_projection_start() {
        let boundaries = vec![
            placed(Shape::circle(1.0), 5.0, 0.0, 0.0),
            placed(Shape::circle(1.0), -3.0, 0.0, 0.0),
            placed(Shape::rectangle(2.0, 2.0), 0.0, 0.0, 0.0),
        ];
        let mut order: Vec<usize> = (0..boundaries.len()).collect();
        insertion_sort_by_start(&mut order, |i| Some(boundaries[i].projections().x));
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn sweep_filters_on_y_and_slab() {
        let boundaries = vec![
            placed(Shape::circle(1.0), 0.0, 0.0, 0.0),
            placed(Shape::circle(1.0), 1.0, 0.0, 0.0),
            placed(Shape::circle(1.0), 1.5, 10.0, 0.0),
            placed(Shape::circle(1.0), 1.8, 0.0, 4.0),
            placed(Shape::circle(1.0), 50.0, 0.0, 0.0),
        ];
        let order: Vec<usize> = (0..boundaries.len()).collect();
        let mut broad_phase = BroadPhase::new();
        let pairs = broad_phase.find_pairs(&order, |i| boundaries.get(i));
        assert_eq!(pairs.to_vec(), vec![(0usize, 1usize)]);
    }
}
