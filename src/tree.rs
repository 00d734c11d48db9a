//! An ordered collection implemented with an AVL tree, counting duplicate insertions.

use std::borrow::Borrow;
use std::cmp::{self, Ordering};
use std::fmt;

/// An ordered collection implemented with an AVL tree.
///
/// Every distinct element is stored in exactly one node together with the number of
/// times an equal element has been inserted.
/// Lookups that return an element by reference fall back to a `not_found` sentinel
/// given at construction; the `Option` returning variants do not need it.
///
/// ```
/// use counting_avl::OrderedCountingTree;
/// let mut tree = OrderedCountingTree::new(-1);
/// tree.insert(2);
/// tree.insert(1);
/// tree.insert(2);
/// assert_eq!(tree.count(&2), 2);
/// assert_eq!(tree.find(&1), &1);
/// assert_eq!(tree.find(&3), &-1);
/// tree.remove(&2);
/// assert!(!tree.contains(&2));
/// ```
#[derive(Clone)]
pub struct OrderedCountingTree<T> {
    root: Link<T>,
    num_nodes: usize,
    not_found: T,
}

#[derive(Clone)]
struct Node<T> {
    element: T,
    count: usize,
    left: Link<T>,
    right: Link<T>,
    height: usize,
}

type Link<T> = Option<Box<Node<T>>>;

impl<T: Ord> OrderedCountingTree<T> {
    /// Returns true if the tree contains an element equal to the given value.
    ///
    /// The value may be any borrowed form of the element type, but the ordering
    /// on the borrowed form *must* match the ordering on the element type.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_node(value).is_some()
    }

    /// Returns a reference to the stored element equal to the given value,
    /// or the `not_found` sentinel if there is none.
    pub fn find<Q>(&self, value: &Q) -> &T
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(value).unwrap_or(&self.not_found)
    }

    /// Returns a reference to the stored element equal to the given value.
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_node(value).map(|node| &node.element)
    }

    /// Returns the stored element equal to the given value and its count.
    pub fn get_with_count<Q>(&self, value: &Q) -> Option<(&T, usize)>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_node(value).map(|node| (&node.element, node.count))
    }

    /// Returns how many times the given value has been inserted, 0 if it is not present.
    pub fn count<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_node(value).map_or(0, |node| node.count)
    }

    /// Inserts an element into the tree.
    ///
    /// If an equal element is already present, only its count is incremented
    /// and the given element is dropped.
    /// Returns the count of the element after insertion, i.e. 1 for a new element.
    pub fn insert(&mut self, element: T) -> usize {
        let (root, count) = Node::insert(self.root.take(), element);
        self.root = Some(root);
        if count == 1 {
            self.num_nodes += 1;
        }
        count
    }

    /// Removes an element from the tree, regardless of its count.
    /// Returns whether the element was previously in the tree.
    ///
    /// The value may be any borrowed form of the element type, but the ordering
    /// on the borrowed form *must* match the ordering on the element type.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.take(value).is_some()
    }

    /// Removes an element from the tree.
    /// Returns the stored element and its count if it was previously in the tree.
    pub fn take<Q>(&mut self, value: &Q) -> Option<(T, usize)>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (root, removed) = Node::remove(self.root.take(), value);
        self.root = root;
        if removed.is_some() {
            debug_assert!(self.num_nodes >= 1);
            self.num_nodes -= 1;
        }
        removed
    }

    /// Asserts that the internal tree structure is consistent.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        // Returns number of nodes in subtree
        fn check<T: Ord>(node: &Node<T>, lower: Option<&T>, upper: Option<&T>) -> usize {
            let mut num_nodes = 1;
            assert!(node.count >= 1);

            // Check element order against all ancestors, not only the parent
            if let Some(lower) = lower {
                assert!(node.element > *lower);
            }
            if let Some(upper) = upper {
                assert!(node.element < *upper);
            }

            if let Some(left) = node.left.as_deref() {
                num_nodes += check(left, lower, Some(&node.element));
            }
            if let Some(right) = node.right.as_deref() {
                num_nodes += check(right, Some(&node.element), upper);
            }

            // Check height
            let left_height = Node::left_height(node);
            let right_height = Node::right_height(node);
            assert_eq!(node.height, cmp::max(left_height, right_height));

            // Check AVL condition (nearly balance)
            assert!(left_height <= right_height + 1);
            assert!(right_height <= left_height + 1);

            num_nodes
        }

        let num_nodes = match self.root.as_deref() {
            None => 0,
            Some(root) => check(root, None, None),
        };

        // Check number of nodes
        assert_eq!(num_nodes, self.num_nodes);
        assert_eq!(self.is_empty(), self.num_nodes == 0);
    }

    fn find_node<Q>(&self, value: &Q) -> Option<&Node<T>>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match value.cmp(node.element.borrow()) {
                Ordering::Equal => break,
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            }
        }
        current
    }
}

impl<T> OrderedCountingTree<T> {
    /// Creates an empty tree.
    /// No memory is allocated until the first element is inserted.
    /// `not_found` is returned by [`find`], [`find_min`] and [`find_max`] when there is no match.
    ///
    /// [`find`]: #method.find
    /// [`find_min`]: #method.find_min
    /// [`find_max`]: #method.find_max
    pub fn new(not_found: T) -> Self {
        Self {
            root: None,
            num_nodes: 0,
            not_found,
        }
    }

    /// Returns the sentinel returned by lookups that find nothing.
    pub fn not_found(&self) -> &T {
        &self.not_found
    }

    /// Returns true if the tree contains no elements.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of distinct elements in the tree.
    pub fn len(&self) -> usize {
        self.num_nodes
    }

    /// Returns the sum of the counts of all elements,
    /// i.e. the number of insertions the tree currently accounts for.
    pub fn total(&self) -> usize {
        let mut total = 0;
        self.traverse_preorder(|_, count| total += count);
        total
    }

    /// Returns the height of the tree: -1 if empty, 0 for a single element.
    pub fn height(&self) -> isize {
        match self.root.as_deref() {
            None => -1,
            Some(root) => root.height as isize,
        }
    }

    /// Clears the tree, deallocating all memory.
    pub fn clear(&mut self) {
        Node::destroy(&mut self.root);
        self.num_nodes = 0;
    }

    /// Returns the smallest element, or the `not_found` sentinel if the tree is empty.
    pub fn find_min(&self) -> &T {
        self.first().unwrap_or(&self.not_found)
    }

    /// Returns the largest element, or the `not_found` sentinel if the tree is empty.
    pub fn find_max(&self) -> &T {
        self.last().unwrap_or(&self.not_found)
    }

    /// Returns the smallest element.
    pub fn first(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some(&node.element)
    }

    /// Returns the largest element.
    pub fn last(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some(&node.element)
    }

    /// Calls `f` with every element and its count in pre-order,
    /// i.e. a node before its left subtree before its right subtree.
    ///
    /// ```
    /// use counting_avl::OrderedCountingTree;
    /// let mut tree = OrderedCountingTree::new("");
    /// for word in ["b", "a", "c", "a"] {
    ///     tree.insert(word);
    /// }
    /// let mut listing = Vec::new();
    /// tree.traverse_preorder(|word, count| listing.push(format!("{word} - {count}")));
    /// assert_eq!(listing, ["b - 1", "a - 2", "c - 1"]);
    /// ```
    pub fn traverse_preorder<F: FnMut(&T, usize)>(&self, mut f: F) {
        Node::walk_preorder(self.root.as_deref(), &mut |node: &Node<T>| {
            f(&node.element, node.count)
        });
    }

    /// Calls `f` with every element and its count in ascending order.
    pub fn traverse_inorder<F: FnMut(&T, usize)>(&self, mut f: F) {
        Node::walk_inorder(self.root.as_deref(), &mut |node: &Node<T>| {
            f(&node.element, node.count)
        });
    }
}

impl<T> Drop for OrderedCountingTree<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: fmt::Debug> fmt::Debug for OrderedCountingTree<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let mut map = fmt.debug_map();
        Node::walk_inorder(self.root.as_deref(), &mut |node: &Node<T>| {
            map.entry(&node.element, &node.count);
        });
        map.finish()
    }
}

impl<T: Ord> Extend<T> for OrderedCountingTree<T> {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        iter.into_iter().for_each(move |element| {
            self.insert(element);
        });
    }
}

impl<'a, T> Extend<&'a T> for OrderedCountingTree<T>
where
    T: Ord + Copy,
    T: 'a,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = &'a T>,
    {
        self.extend(iter.into_iter().copied());
    }
}

impl<T: Ord> Node<T> {
    /// Inserts an element into the given subtree and returns its new root
    /// together with the count of the element after insertion.
    fn insert(link: Link<T>, element: T) -> (Box<Self>, usize) {
        let mut node = match link {
            None => return (Self::create(element), 1),
            Some(node) => node,
        };
        let count = match element.cmp(&node.element) {
            Ordering::Less => {
                let (left, count) = Self::insert(node.left.take(), element);
                node.left = Some(left);
                count
            }
            Ordering::Greater => {
                let (right, count) = Self::insert(node.right.take(), element);
                node.right = Some(right);
                count
            }
            Ordering::Equal => {
                // Duplicate, structure stays as is
                node.count += 1;
                let count = node.count;
                return (node, count);
            }
        };
        (Self::rebalance(node), count)
    }

    /// Removes an element from the given subtree and returns its new root
    /// together with the removed element and its count.
    fn remove<Q>(link: Link<T>, value: &Q) -> (Link<T>, Option<(T, usize)>)
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut node = match link {
            None => return (None, None),
            Some(node) => node,
        };
        let removed = match value.cmp(node.element.borrow()) {
            Ordering::Less => {
                let (left, removed) = Self::remove(node.left.take(), value);
                node.left = left;
                removed
            }
            Ordering::Greater => {
                let (right, removed) = Self::remove(node.right.take(), value);
                node.right = right;
                removed
            }
            Ordering::Equal => {
                let (replacement, removed) = Self::unlink(node);
                return (replacement, Some(removed));
            }
        };
        (Some(Self::rebalance(node)), removed)
    }
}

impl<T> Node<T> {
    fn create(element: T) -> Box<Self> {
        Box::new(Node {
            element,
            count: 1,
            left: None,
            right: None,
            height: 0,
        })
    }

    /// Tears down a subtree in post-order and leaves the link empty.
    fn destroy(link: &mut Link<T>) {
        if let Some(mut node) = link.take() {
            Self::destroy(&mut node.left);
            Self::destroy(&mut node.right);
        }
    }

    /// Takes a node out of its subtree and returns the subtree's replacement root
    /// together with the node's element and count.
    fn unlink(mut node: Box<Self>) -> (Link<T>, (T, usize)) {
        match (node.left.take(), node.right.take()) {
            // Node is stem or leaf, its only child takes its place
            (None, child) | (child, None) => {
                let Node { element, count, .. } = *node;
                (child, (element, count))
            }
            (Some(left), Some(right)) => {
                // Move smallest element of right subtree into this node
                let (right, successor) = Self::detach_min(right);
                let Node { element, count, .. } = *successor;
                let removed_element = std::mem::replace(&mut node.element, element);
                let removed_count = std::mem::replace(&mut node.count, count);
                node.left = Some(left);
                node.right = right;
                (Some(Self::rebalance(node)), (removed_element, removed_count))
            }
        }
    }

    /// Detaches the leftmost node of a subtree.
    /// Returns the remaining subtree and the detached node.
    fn detach_min(mut node: Box<Self>) -> (Link<T>, Box<Self>) {
        match node.left.take() {
            None => {
                let right = node.right.take();
                (right, node)
            }
            Some(left) => {
                let (left, min) = Self::detach_min(left);
                node.left = left;
                (Some(Self::rebalance(node)), min)
            }
        }
    }

    // Heights of absent subtrees count as 0 here, so a child contributes its height + 1.
    fn left_height(node: &Self) -> usize {
        match node.left.as_deref() {
            None => 0,
            Some(left) => left.height + 1,
        }
    }

    fn right_height(node: &Self) -> usize {
        match node.right.as_deref() {
            None => 0,
            Some(right) => right.height + 1,
        }
    }

    fn adjust_height(node: &mut Self) {
        node.height = cmp::max(Self::left_height(node), Self::right_height(node));
    }

    /// Right child becomes the new subtree root, node becomes its left child.
    fn rotate_left(mut node: Box<Self>) -> Box<Self> {
        match node.right.take() {
            None => node,
            Some(mut right) => {
                node.right = right.left.take();
                Self::adjust_height(&mut node);
                right.left = Some(node);
                Self::adjust_height(&mut right);
                right
            }
        }
    }

    /// Left child becomes the new subtree root, node becomes its right child.
    fn rotate_right(mut node: Box<Self>) -> Box<Self> {
        match node.left.take() {
            None => node,
            Some(mut left) => {
                node.left = left.right.take();
                Self::adjust_height(&mut node);
                left.right = Some(node);
                Self::adjust_height(&mut left);
                left
            }
        }
    }

    /// Resolves a left heavy node whose left child is right heavy.
    fn rotate_left_right(mut node: Box<Self>) -> Box<Self> {
        node.left = node.left.take().map(Self::rotate_left);
        Self::rotate_right(node)
    }

    /// Resolves a right heavy node whose right child is left heavy.
    fn rotate_right_left(mut node: Box<Self>) -> Box<Self> {
        node.right = node.right.take().map(Self::rotate_right);
        Self::rotate_left(node)
    }

    /// Restores AVL condition (balance) at given node if necessary and adjusts height.
    /// Resulting balance will be +1, 0 or -1 height difference between left and right subtree.
    /// Initial balance must not exceed +2 or -2, which always holds after a single update
    /// below this node.
    ///
    /// A single rotation is used when the heavy child's outer subtree is at least as high
    /// as its inner one. After an insertion the two are never equal, so this picks the same
    /// rotation as comparing the inserted element against the heavy child.
    fn rebalance(mut node: Box<Self>) -> Box<Self> {
        let left_height = Self::left_height(&node);
        let right_height = Self::right_height(&node);
        debug_assert!(left_height <= right_height + 2);
        debug_assert!(right_height <= left_height + 2);
        if left_height > right_height + 1 {
            let left_leans_right = node
                .left
                .as_deref()
                .map_or(false, |left| Self::right_height(left) > Self::left_height(left));
            if left_leans_right {
                Self::rotate_left_right(node)
            } else {
                Self::rotate_right(node)
            }
        } else if right_height > left_height + 1 {
            let right_leans_left = node
                .right
                .as_deref()
                .map_or(false, |right| Self::left_height(right) > Self::right_height(right));
            if right_leans_left {
                Self::rotate_right_left(node)
            } else {
                Self::rotate_left(node)
            }
        } else {
            Self::adjust_height(&mut node);
            node
        }
    }

    fn walk_preorder<'a, F: FnMut(&'a Self)>(link: Option<&'a Self>, f: &mut F) {
        if let Some(node) = link {
            f(node);
            Self::walk_preorder(node.left.as_deref(), f);
            Self::walk_preorder(node.right.as_deref(), f);
        }
    }

    fn walk_inorder<'a, F: FnMut(&'a Self)>(link: Option<&'a Self>, f: &mut F) {
        if let Some(node) = link {
            Self::walk_inorder(node.left.as_deref(), f);
            f(node);
            Self::walk_inorder(node.right.as_deref(), f);
        }
    }
}
