//! Splicing of path pieces that share end points.
//!
//! Chains live in an arena and the end-point map stores arena indices, so a
//! chain reachable from both of its ends is still a single entry. Consumed
//! chains leave an empty slot behind.

use std::collections::HashMap;
use std::hash::Hash;

/// Result of joining: cycles, then chains that stayed open.
#[derive(Debug, Clone, PartialEq)]
pub struct Joined<T> {
    /// Closed chains (first element equals last), in the order they closed.
    pub closed: Vec<Vec<T>>,
    /// Open chains, in creation order.
    pub open: Vec<Vec<T>>,
}

impl<T> Joined<T> {
    /// All chains, closed first.
    pub fn into_paths(self) -> Vec<Vec<T>> {
        let mut paths = self.closed;
        paths.extend(self.open);
        paths
    }
}

/// Join `pieces` into maximal chains.
///
/// Two pieces are spliced when an end of one has the same key as an end of
/// the other; the element already in the chain is kept at the joint. Pieces
/// that start and end on the same key are closed as they are. Pieces with
/// fewer than two elements are ignored.
pub fn join_paths<T, K, F>(pieces: impl IntoIterator<Item = Vec<T>>, key: F) -> Joined<T>
where
    T: Clone,
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut joiner = Joiner {
        chains: Vec::new(),
        ends: HashMap::new(),
        closed: Vec::new(),
        key,
    };

    for piece in pieces {
        joiner.add(piece);
    }

    Joined {
        closed: joiner.closed,
        open: joiner.chains.into_iter().flatten().collect(),
    }
}

struct Joiner<T, K, F> {
    chains: Vec<Option<Vec<T>>>,
    ends: HashMap<K, usize>,
    closed: Vec<Vec<T>>,
    key: F,
}

impl<T, K, F> Joiner<T, K, F>
where
    T: Clone,
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    fn add(&mut self, piece: Vec<T>) {
        let (head, tail) = match (piece.first(), piece.last()) {
            (Some(first), Some(last)) if piece.len() >= 2 => ((self.key)(first), (self.key)(last)),
            _ => return,
        };

        if head == tail {
            self.closed.push(piece);
            return;
        }

        let at_head = self.ends.get(&head).copied();
        let at_tail = self.ends.get(&tail).copied();

        match (at_head, at_tail) {
            (None, None) => {
                let id = self.chains.len();
                self.chains.push(Some(piece));
                self.track(id);
            }
            (Some(id), Some(other)) if id == other => {
                if let Some(mut chain) = self.release(id) {
                    if (self.key)(&chain[chain.len() - 1]) != head {
                        chain.reverse();
                    }
                    chain.extend_from_slice(&piece[1..]);
                    self.closed.push(chain);
                }
            }
            (Some(left_id), Some(right_id)) => {
                if let (Some(mut left), Some(mut right)) = (self.release(left_id), self.release(right_id)) {
                    if (self.key)(&left[left.len() - 1]) != head {
                        left.reverse();
                    }
                    if (self.key)(&right[0]) != tail {
                        right.reverse();
                    }
                    left.extend_from_slice(&piece[1..piece.len() - 1]);
                    left.extend(right);
                    self.chains[left_id] = Some(left);
                    self.track(left_id);
                }
            }
            (Some(id), None) => {
                if let Some(mut chain) = self.release(id) {
                    if (self.key)(&chain[chain.len() - 1]) == head {
                        chain.extend_from_slice(&piece[1..]);
                    } else {
                        // Piece leaves from the chain start: prepend it reversed.
                        let mut longer: Vec<T> = piece[1..].iter().rev().cloned().collect();
                        longer.extend(chain);
                        chain = longer;
                    }
                    self.chains[id] = Some(chain);
                    self.track(id);
                }
            }
            (None, Some(id)) => {
                if let Some(mut chain) = self.release(id) {
                    if (self.key)(&chain[0]) == tail {
                        let mut longer = piece[..piece.len() - 1].to_vec();
                        longer.extend(chain);
                        chain = longer;
                    } else {
                        chain.extend(piece[..piece.len() - 1].iter().rev().cloned());
                    }
                    self.chains[id] = Some(chain);
                    self.track(id);
                }
            }
        }
    }

    /// Take a chain out of the arena and forget its end points.
    fn release(&mut self, id: usize) -> Option<Vec<T>> {
        let chain = self.chains.get_mut(id)?.take()?;
        if let (Some(first), Some(last)) = (chain.first(), chain.last()) {
            self.ends.remove(&(self.key)(first));
            self.ends.remove(&(self.key)(last));
        }
        Some(chain)
    }

    /// Index both ends of the chain stored at `id`.
    fn track(&mut self, id: usize) {
        if let Some(Some(chain)) = self.chains.get(id) {
            if let (Some(first), Some(last)) = (chain.first(), chain.last()) {
                let (head, tail) = ((self.key)(first), (self.key)(last));
                self.ends.insert(head, id);
                self.ends.insert(tail, id);
            }
        }
    }
}
