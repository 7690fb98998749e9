//! This module implements a breadth-first search in the style of
//! [pathfinding's bfs function](https://docs.rs/pathfinding/latest/pathfinding/directed/bfs/index.html)
//! which additionally reports every expanded node, in expansion order, so the
//! flood can be replayed by a renderer.
use fxhash::FxBuildHasher;
use indexmap::map::Entry::Vacant;
use indexmap::IndexMap;
use log::trace;
use std::collections::VecDeque;
use std::hash::Hash;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

fn reverse_path<N, V, F>(parents: &FxIndexMap<N, V>, mut parent: F, start: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
    F: FnMut(&V) -> usize,
{
    let mut path: Vec<N> = std::iter::successors(Some(start), |&i| {
        parents.get_index(i).map(|(_, value)| parent(value))
    })
    .map_while(|i| parents.get_index(i).map(|(node, _)| node.clone()))
    .collect();
    path.reverse();
    path
}

/// Searches from `start` until `success` holds for an expanded node.
///
/// Each node is recorded with its parent the first time it is discovered, so
/// it enters the frontier at most once. `visit` is called with every node as
/// it is dequeued together with its expansion order, starting at 0. Expansion
/// stops at the first successful node; the returned path runs from `start` to
/// that node inclusive.
pub fn bfs<N, FN, IN, FS, FV>(
    start: &N,
    mut successors: FN,
    mut success: FS,
    mut visit: FV,
) -> Option<Vec<N>>
where
    N: Eq + Hash + Clone,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = N>,
    FS: FnMut(&N) -> bool,
    FV: FnMut(&N, usize),
{
    let mut parents: FxIndexMap<N, usize> = FxIndexMap::default();
    parents.insert(start.clone(), usize::MAX);
    let mut frontier = VecDeque::new();
    frontier.push_back(0);
    let mut order = 0;
    while let Some(index) = frontier.pop_front() {
        let node = match parents.get_index(index) {
            Some((node, _)) => node.clone(),
            None => break,
        };
        visit(&node, order);
        order += 1;
        if success(&node) {
            trace!("Goal expanded after {} nodes", order);
            return Some(reverse_path(&parents, |&p| p, index));
        }
        for successor in successors(&node) {
            if let Vacant(e) = parents.entry(successor) {
                frontier.push_back(e.index());
                e.insert(index);
            }
        }
    }
    trace!("Frontier exhausted after {} nodes", order);
    None
}
