// Node storage and the rebalancing primitives of the 2-3 variant described
// by Sedgewick in "Left-leaning Red-Black Trees". Every routine takes
// ownership of a subtree and hands back its (possibly new) root, so links
// only ever point downward.

use std::cmp::Ordering;

use crate::compare::Compare;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Color {
    Red,
    Black,
}

impl Color {
    #[inline]
    fn flipped(self) -> Self {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }
}

pub(crate) type Link<T> = Option<Box<Node<T>>>;

#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
    pub(crate) color: Color,
}

impl<T> Node<T> {
    fn new(value: T) -> Box<Self> {
        Box::new(Self {
            value,
            left: None,
            right: None,
            color: Color::Red,
        })
    }

    #[inline]
    pub(crate) fn is_red(&self) -> bool {
        self.color == Color::Red
    }
}

#[inline]
pub(crate) fn is_red<T>(link: &Link<T>) -> bool {
    link.as_ref().is_some_and(|node| node.is_red())
}

#[inline]
fn left_left_is_red<T>(node: &Node<T>) -> bool {
    node.left.as_ref().is_some_and(|left| is_red(&left.left))
}

#[inline]
fn right_left_is_red<T>(node: &Node<T>) -> bool {
    node.right.as_ref().is_some_and(|right| is_red(&right.left))
}

fn flip_colors<T>(node: &mut Node<T>) {
    node.color = node.color.flipped();
    if let Some(left) = node.left.as_mut() {
        left.color = left.color.flipped();
    }
    if let Some(right) = node.right.as_mut() {
        right.color = right.color.flipped();
    }
}

//          node                  x
//          /  \                 / \
//         a   (x)     =>     (node) c
//             / \             /  \
//            b   c           a    b
fn rotate_left<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let Some(mut x) = node.right.take() else {
        return node;
    };
    node.right = x.left.take();
    x.color = node.color;
    node.color = Color::Red;
    x.left = Some(node);
    x
}

//          node                 x
//          /  \                / \
//        (x)   c     =>       a (node)
//        / \                     /  \
//       a   b                   b    c
fn rotate_right<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let Some(mut x) = node.left.take() else {
        return node;
    };
    node.left = x.right.take();
    x.color = node.color;
    node.color = Color::Red;
    x.right = Some(node);
    x
}

fn fix_up<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    if is_red(&node.right) && !is_red(&node.left) {
        node = rotate_left(node);
    }
    if is_red(&node.left) && left_left_is_red(&node) {
        node = rotate_right(node);
    }
    if is_red(&node.left) && is_red(&node.right) {
        flip_colors(&mut node);
    }
    node
}

// Borrow a red link for the left child so the descent never lands on a
// 2-node.
fn move_red_left<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    flip_colors(&mut node);
    if right_left_is_red(&node) {
        node.right = node.right.take().map(rotate_right);
        node = rotate_left(node);
        flip_colors(&mut node);
    }
    node
}

fn move_red_right<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    flip_colors(&mut node);
    if left_left_is_red(&node) {
        node = rotate_right(node);
        flip_colors(&mut node);
    }
    node
}

/// Inserts `value` below `link`. Returns the new subtree root and whether a
/// node was created; an equal value already present is left untouched.
pub(crate) fn insert<T, C>(link: Link<T>, value: T, cmp: &C) -> (Box<Node<T>>, bool)
where
    C: Compare<T>,
{
    let Some(mut node) = link else {
        return (Node::new(value), true);
    };

    let inserted = match cmp.compare(&value, &node.value) {
        Ordering::Less => {
            let (left, inserted) = insert(node.left.take(), value, cmp);
            node.left = Some(left);
            inserted
        }
        Ordering::Greater => {
            let (right, inserted) = insert(node.right.take(), value, cmp);
            node.right = Some(right);
            inserted
        }
        Ordering::Equal => false,
    };

    (fix_up(node), inserted)
}

/// Removes the value matched by `probe` from the subtree rooted at `node`.
/// `probe` reports how the wanted item orders relative to a stored value.
pub(crate) fn delete<T, F>(mut node: Box<Node<T>>, probe: &F) -> (Link<T>, bool)
where
    F: Fn(&T) -> Ordering,
{
    let deleted;

    if probe(&node.value) == Ordering::Less {
        if node.left.is_none() {
            return (Some(node), false);
        }
        if !is_red(&node.left) && !left_left_is_red(&node) {
            node = move_red_left(node);
        }
        deleted = match node.left.take() {
            Some(left) => {
                let (left, deleted) = delete(left, probe);
                node.left = left;
                deleted
            }
            None => false,
        };
    } else {
        if is_red(&node.left) {
            node = rotate_right(node);
        }
        if probe(&node.value) == Ordering::Equal && node.right.is_none() {
            // A matched node without a right child is a leaf here.
            return (node.left.take(), true);
        }
        if node.right.is_some() && !is_red(&node.right) && !right_left_is_red(&node) {
            node = move_red_right(node);
        }
        if probe(&node.value) == Ordering::Equal {
            match node.right.take() {
                Some(right) => {
                    let (right, min) = delete_leftmost(right);
                    node.right = right;
                    node.value = min;
                    deleted = true;
                }
                None => return (node.left.take(), true),
            }
        } else {
            deleted = match node.right.take() {
                Some(right) => {
                    let (right, deleted) = delete(right, probe);
                    node.right = right;
                    deleted
                }
                None => false,
            };
        }
    }

    (Some(fix_up(node)), deleted)
}

/// Detaches the minimum of the subtree, returning the new root and the
/// removed value.
fn delete_leftmost<T>(mut node: Box<Node<T>>) -> (Link<T>, T) {
    if node.left.is_some() && !is_red(&node.left) && !left_left_is_red(&node) {
        node = move_red_left(node);
    }
    match node.left.take() {
        Some(left) => {
            let (left, min) = delete_leftmost(left);
            node.left = left;
            (Some(fix_up(node)), min)
        }
        None => {
            let Node { value, right, .. } = *node;
            (right, value)
        }
    }
}

/// Number of nodes on the longest root-to-leaf path.
pub(crate) fn height<T>(link: &Link<T>) -> usize {
    match link {
        None => 0,
        Some(node) => 1 + height(&node.left).max(height(&node.right)),
    }
}
