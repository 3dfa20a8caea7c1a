use std::collections::VecDeque;

use crate::*;

/// Ordered cells from start to goal, both included.
pub type Path = Vec<CellIndex>;

/// Breadth-first search from `start` to `goal` over king-move adjacency,
/// treating every cell in `blocked` as impassable.
///
/// Returns one shortest path by hop count, or `None` when the goal cannot be
/// reached (including when either end is blocked or off the grid).
pub fn shortest_path(
    start: CellIndex,
    goal: CellIndex,
    cols: Coord,
    rows: Coord,
    blocked: &CellSet,
) -> Option<Path> {
    let total = usize::try_from(mult(cols, rows)).ok()?;
    if start >= total || goal >= total {
        return None;
    }
    if blocked.contains(start) || blocked.contains(goal) {
        return None;
    }

    let mut previous: Vec<Option<CellIndex>> = vec![None; total];
    let mut queue = VecDeque::with_capacity(total);
    previous[start] = Some(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        if current == goal {
            break;
        }

        for neighbor in NeighborIter::new(current, cols, rows) {
            if blocked.contains(neighbor) || previous[neighbor].is_some() {
                continue;
            }
            previous[neighbor] = Some(current);
            queue.push_back(neighbor);
        }
    }

    previous[goal]?;

    let mut path = vec![goal];
    let mut cursor = goal;
    while cursor != start {
        cursor = previous[cursor]?;
        path.push(cursor);
    }
    path.reverse();
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocked(cells: &[CellIndex]) -> CellSet {
        cells.iter().copied().collect()
    }

    fn assert_walkable(path: &[CellIndex], cols: Coord, rows: Coord, blocked: &CellSet) {
        for step in path.windows(2) {
            assert!(neighbors(step[0], cols, rows).contains(&step[1]));
        }
        assert!(path.iter().all(|&cell| !blocked.contains(cell)));
    }

    #[test]
    fn open_grid_walks_the_diagonal() {
        let path = shortest_path(0, 8, 3, 3, &CellSet::default()).unwrap();
        assert_eq!(path, [0, 4, 8]);
    }

    #[test]
    fn detours_around_blocked_center() {
        // king moves slip past the corner: 0 -> 1 -> 5 -> 8
        let walls = blocked(&[4]);
        let path = shortest_path(0, 8, 3, 3, &walls).unwrap();

        assert_eq!(path.len(), 4);
        assert_eq!(path.first(), Some(&0));
        assert_eq!(path.last(), Some(&8));
        assert_walkable(&path, 3, 3, &walls);
    }

    #[test]
    fn wall_with_a_gap_forces_the_long_way() {
        let walls = blocked(&[3, 4]);
        let path = shortest_path(0, 6, 3, 3, &walls).unwrap();

        assert_eq!(path, [0, 1, 5, 7, 6]);
        assert_walkable(&path, 3, 3, &walls);
    }

    #[test]
    fn diagonal_wall_is_not_a_barrier() {
        let walls = blocked(&[2, 4, 6]);
        let path = shortest_path(0, 8, 3, 3, &walls).unwrap();
        assert_eq!(path, [0, 1, 5, 8]);
    }

    #[test]
    fn full_wall_means_no_path() {
        assert_eq!(shortest_path(0, 8, 3, 3, &blocked(&[3, 4, 5])), None);
        assert_eq!(shortest_path(0, 8, 3, 3, &blocked(&[1, 3, 4])), None);
    }

    #[test]
    fn blocked_or_invalid_endpoints_have_no_path() {
        assert_eq!(shortest_path(0, 8, 3, 3, &blocked(&[0])), None);
        assert_eq!(shortest_path(0, 8, 3, 3, &blocked(&[8])), None);
        assert_eq!(shortest_path(0, 9, 3, 3, &CellSet::default()), None);
    }

    #[test]
    fn start_equal_to_goal_is_a_single_cell() {
        assert_eq!(shortest_path(4, 4, 3, 3, &CellSet::default()), Some(vec![4]));
        assert_eq!(shortest_path(0, 0, 1, 1, &CellSet::default()), Some(vec![0]));
    }

    #[test]
    fn repeated_queries_agree() {
        let walls = blocked(&[1, 7, 8, 13, 20]);
        let first = shortest_path(0, 29, 6, 5, &walls);
        for _ in 0..5 {
            assert_eq!(shortest_path(0, 29, 6, 5, &walls), first);
        }
        assert!(first.is_some());
    }
}
