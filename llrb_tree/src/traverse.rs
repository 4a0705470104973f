use std::iter::FusedIterator;

use crate::node::Node;

/// Visiting order of a [`Traversal`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Order {
    /// Node, then left subtree, then right subtree
    PreOrder,
    /// Left subtree, node, right subtree: ascending
    #[default]
    InOrder,
    /// Left subtree, right subtree, then node
    PostOrder,
    /// Right subtree, node, left subtree: descending
    ReverseOrder,
}

enum Step<'a, T> {
    Walk(&'a Node<T>),
    Yield(&'a T),
}

/// Lazy walk over a tree in one of the four [`Order`]s.
///
/// The walk keeps its pending work on an explicit stack, bounded by the
/// tree height, and borrows the tree for its whole lifetime. Dropping it
/// part way through releases everything at once.
pub struct Traversal<'a, T> {
    order: Order,
    stack: Vec<Step<'a, T>>,
    remaining: usize,
}

impl<'a, T> Traversal<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>, len: usize, order: Order) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = root {
            stack.push(Step::Walk(root));
        }
        Self {
            order,
            stack,
            remaining: len,
        }
    }

    pub fn order(&self) -> Order {
        self.order
    }

    // Steps go on the stack in the reverse of the order they are visited.
    fn expand(&mut self, node: &'a Node<T>) {
        let left = node.left.as_deref().map(Step::Walk);
        let right = node.right.as_deref().map(Step::Walk);
        let this = Some(Step::Yield(&node.value));

        let steps = match self.order {
            Order::PreOrder => [right, left, this],
            Order::InOrder => [right, this, left],
            Order::PostOrder => [this, right, left],
            Order::ReverseOrder => [left, this, right],
        };
        self.stack.extend(steps.into_iter().flatten());
    }
}

impl<'a, T> Iterator for Traversal<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(step) = self.stack.pop() {
            match step {
                Step::Walk(node) => self.expand(node),
                Step::Yield(value) => {
                    self.remaining = self.remaining.saturating_sub(1);
                    return Some(value);
                }
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Traversal<'_, T> {}

impl<T> FusedIterator for Traversal<'_, T> {}
