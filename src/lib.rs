//! An AVL tree that keeps one node per distinct element and counts how often
//! each element has been inserted, plus a word frequency counter built on it.
//!
//! ```
//! use counting_avl::OrderedCountingTree;
//! let mut tree = OrderedCountingTree::new(0);
//! for value in [1, 2, 3, 4, 5, 3] {
//!     tree.insert(value);
//! }
//! assert_eq!(tree.len(), 5);
//! assert_eq!(tree.height(), 2);
//! assert_eq!(tree.count(&3), 2);
//! assert_eq!(tree.find_min(), &1);
//! assert_eq!(tree.find_max(), &5);
//! ```

mod tree;
pub mod word_count;

pub use tree::OrderedCountingTree;
pub use word_count::WordCount;
