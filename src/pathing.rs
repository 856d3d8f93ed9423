use itertools::Itertools;
use petgraph::graph::{NodeIndex, UnGraph};
use smallvec::SmallVec;

use crate::coordinates::Cartesian3DCoordinate;
use crate::grid::Grid;
use crate::utils::{self, FnvHashMap};


/// Step counts from one cell to every cell reachable from it through open walls.
#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: Cartesian3DCoordinate,
    distances: FnvHashMap<Cartesian3DCoordinate, u32>,
    max_distance: u32,
}

impl Distances {
    pub fn new(grid: &Grid, start_coordinate: Cartesian3DCoordinate) -> Option<Distances> {

        if !grid.is_valid_coordinate(start_coordinate) {
            return None;
        }

        let mut max = 0;
        let mut distances = utils::fnv_hashmap(grid.size());
        distances.insert(start_coordinate, 0);

        // Every passage is one step, so the first distance recorded for a cell is already
        // its shortest and the map doubles as the visited set.
        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {

                let distance_to_cell = distances[cell_coord];
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                for link_coordinate in grid.links(*cell_coord).iter() {
                    if !distances.contains_key(link_coordinate) {
                        distances.insert(*link_coordinate, distance_to_cell + 1);
                        new_frontier.push(*link_coordinate);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate: start_coordinate,
            distances: distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> Cartesian3DCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: Cartesian3DCoordinate) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }

    /// Number of cells that can be reached, including the start.
    pub fn reachable_count(&self) -> usize {
        self.distances.len()
    }

    /// Sorted so the result does not depend on hash order.
    pub fn furthest_points_on_grid(&self) -> SmallVec<[Cartesian3DCoordinate; 8]> {
        let furthest_distance = self.max();
        self.distances
            .iter()
            .filter(|&(_, distance)| *distance == furthest_distance)
            .map(|(coord, _)| *coord)
            .sorted()
            .collect()
    }
}

/// Walk back from `end_point` to the start of `distances_from_start`, always stepping to
/// the linked neighbour closest to the start.
pub fn shortest_path(grid: &Grid,
                     distances_from_start: &Distances,
                     end_point: Cartesian3DCoordinate)
                     -> Option<Vec<Cartesian3DCoordinate>> {

    let mut current_distance = distances_from_start.distance_from_start_to(end_point)?;
    let mut path = vec![end_point];
    let start = distances_from_start.start();
    let mut current_coord = end_point;

    while current_coord != start {

        let closest_to_start = grid.links(current_coord)
            .iter()
            .filter_map(|coord| distances_from_start.distance_from_start_to(*coord).map(|d| (*coord, d)))
            .min_by_key(|&(_, d)| d);

        match closest_to_start {
            Some((closer_coord, closer_distance)) if closer_distance < current_distance => {
                current_coord = closer_coord;
                current_distance = closer_distance;
                path.push(current_coord);
            }
            // The distances were not computed on this grid.
            _ => return None,
        }
    }

    path.reverse();
    Some(path)
}

/// The longest path in a perfect maze: from the furthest point of an arbitrary start to
/// the furthest point from there. With loops it is only a long path.
pub fn dijkstra_longest_path(grid: &Grid) -> Option<Vec<Cartesian3DCoordinate>> {
    let arbitrary_start_point = grid.iter().next()?;
    let first_distances = Distances::new(grid, arbitrary_start_point)?;

    let long_path_start_coordinate = first_distances.furthest_points_on_grid()[0];
    let distances_from_start = Distances::new(grid, long_path_start_coordinate)?;
    let end_point = distances_from_start.furthest_points_on_grid()[0];

    shortest_path(grid, &distances_from_start, end_point)
}

/// One node per cell, in slot order, and one edge per open passage.
pub fn passage_graph(grid: &Grid) -> UnGraph<Cartesian3DCoordinate, ()> {
    let mut graph = UnGraph::with_capacity(grid.size(), grid.size() * 3);
    let nodes: Vec<NodeIndex> = grid.iter().map(|coord| graph.add_node(coord)).collect();
    let dimensions = grid.dimensions();
    for (a, b) in grid.iter_links() {
        if let (Some(i), Some(j)) = (dimensions.index_of(a), dimensions.index_of(b)) {
            graph.add_edge(nodes[i], nodes[j], ());
        }
    }
    graph
}

/// The passage graph as text: `vertices edges` on the first line, then one line per
/// passage holding the 1 based slot indices of its two cells.
pub fn edge_list(grid: &Grid) -> String {
    let dimensions = grid.dimensions();
    let mut graph_data = format!("{} {}\n", grid.size(), grid.links_count());
    for (src, dst) in grid.iter_links() {
        if let (Some(index_a), Some(index_b)) = (dimensions.index_of(src), dimensions.index_of(dst)) {
            graph_data.push_str(&format!("{} {}\n", index_a + 1, index_b + 1));
        }
    }
    graph_data
}
