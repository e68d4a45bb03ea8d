//! The neighbor relation and the update rule: the pure core of the automaton.
//!
//! Both functions are total over their valid domain and know nothing about
//! tasks, locks, or shared state. Everything concurrent builds on top of them.

/// Valid neighbor indices of cell `index` in a colony of `len` cells.
///
/// The neighborhood is {index - 1, index + 1} clipped to [0, len): edge
/// cells have exactly one neighbor, there is no wraparound, and a cell is
/// never its own neighbor.
pub fn neighbors(index: usize, len: usize) -> Vec<usize> {
    debug_assert!(index < len, "cell index {index} out of range for {len} cells");
    let mut out = Vec::with_capacity(2);
    if index > 0 {
        out.push(index - 1);
    }
    if index + 1 < len {
        out.push(index + 1);
    }
    out
}

/// Next value of a cell given the sum of its neighbors' current values.
///
/// Sum 0 (isolation) and sum 2 (over-crowding) kill the cell; exactly one
/// live neighbor (reproduction) brings it to life. Edge cells only ever see
/// sums 0 and 1.
pub fn next_state(neighbor_sum: u8) -> u8 {
    match neighbor_sum {
        1 => 1,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn update_rule_table() {
        assert_eq!(next_state(0), 0, "isolation kills");
        assert_eq!(next_state(1), 1, "reproduction revives");
        assert_eq!(next_state(2), 0, "over-crowding kills");
    }

    #[test]
    fn singleton_colony_has_no_neighbors() {
        assert!(neighbors(0, 1).is_empty());
    }

    #[test]
    fn edges_have_one_neighbor() {
        assert_eq!(neighbors(0, 5), vec![1]);
        assert_eq!(neighbors(4, 5), vec![3]);
    }

    #[test]
    fn interior_has_both_neighbors() {
        assert_eq!(neighbors(2, 5), vec![1, 3]);
    }

    proptest! {
        #[test]
        fn neighbor_properties(len in 1usize..512, offset in 0usize..512) {
            let index = offset % len;
            let nb = neighbors(index, len);

            prop_assert!(nb.len() <= 2);
            prop_assert!(nb.iter().all(|&j| j < len));
            prop_assert!(!nb.contains(&index));

            let at_edge = index == 0 || index == len - 1;
            if len == 1 {
                prop_assert!(nb.is_empty());
            } else if at_edge {
                prop_assert_eq!(nb.len(), 1);
            } else {
                prop_assert_eq!(nb.len(), 2);
            }
        }

        #[test]
        fn neighbor_relation_is_symmetric(len in 2usize..512, offset in 0usize..512) {
            let index = offset % len;
            for j in neighbors(index, len) {
                prop_assert!(neighbors(j, len).contains(&index));
            }
        }
    }
}
