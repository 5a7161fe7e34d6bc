//! Static Curriculum Graph
//!
//! Topics, their subtopics, and prerequisite edges are fixed at process
//! start and never mutated. All structural invariants (unique ids,
//! resolvable prerequisites, at least one subtopic per topic, acyclic
//! prerequisite edges) are validated once at construction, so everything
//! downstream can assume a well-formed DAG.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

/// Identifier of a curriculum topic.
pub type TopicId = i64;
/// Identifier of a subtopic. Subtopic ids are global, not per-topic.
pub type SubtopicId = i64;

/// An atomic learning unit within a topic, independently markable complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtopic {
    pub id: SubtopicId,
    pub name: String,
    pub description: String,
}

/// A curriculum unit composed of subtopics, gated by prerequisite topics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    pub name: String,
    pub description: String,
    /// Position in the curriculum's canonical ordering. Drives all
    /// deterministic tie-breaks.
    pub order: u32,
    pub prerequisites: Vec<TopicId>,
    pub subtopics: Vec<Subtopic>,
}

impl Topic {
    pub fn subtopic_count(&self) -> usize {
        self.subtopics.len()
    }
}

/// Structural problems detected while loading a curriculum.
#[derive(Debug, thiserror::Error)]
pub enum CurriculumError {
    #[error("duplicate topic id {0}")]
    DuplicateTopic(TopicId),
    #[error("duplicate subtopic id {0}")]
    DuplicateSubtopic(SubtopicId),
    #[error("topic {topic} lists unknown prerequisite {prerequisite}")]
    UnknownPrerequisite { topic: TopicId, prerequisite: TopicId },
    #[error("topic {0} has no subtopics")]
    EmptyTopic(TopicId),
    #[error("prerequisite edges contain a cycle")]
    CyclicPrerequisites,
}

/// The validated topic graph, held in canonical order.
#[derive(Debug, Clone)]
pub struct Curriculum {
    topics: Vec<Topic>,
    positions: HashMap<TopicId, usize>,
    subtopic_owner: HashMap<SubtopicId, TopicId>,
}

impl Curriculum {
    /// Builds and validates a curriculum. Topics are sorted into canonical
    /// order by their `order` field.
    pub fn new(mut topics: Vec<Topic>) -> Result<Self, CurriculumError> {
        topics.sort_by_key(|t| t.order);

        let mut positions = HashMap::new();
        let mut subtopic_owner = HashMap::new();
        for (idx, topic) in topics.iter().enumerate() {
            if positions.insert(topic.id, idx).is_some() {
                return Err(CurriculumError::DuplicateTopic(topic.id));
            }
            if topic.subtopics.is_empty() {
                return Err(CurriculumError::EmptyTopic(topic.id));
            }
            for subtopic in &topic.subtopics {
                if subtopic_owner.insert(subtopic.id, topic.id).is_some() {
                    return Err(CurriculumError::DuplicateSubtopic(subtopic.id));
                }
            }
        }

        for topic in &topics {
            for &prereq in &topic.prerequisites {
                if !positions.contains_key(&prereq) {
                    return Err(CurriculumError::UnknownPrerequisite {
                        topic: topic.id,
                        prerequisite: prereq,
                    });
                }
            }
        }

        Self::check_acyclic(&topics)?;

        Ok(Self {
            topics,
            positions,
            subtopic_owner,
        })
    }

    /// Kahn's algorithm over the prerequisite edges. Anything left
    /// unvisited after the peel sits on a cycle.
    fn check_acyclic(topics: &[Topic]) -> Result<(), CurriculumError> {
        let mut indegree: HashMap<TopicId, usize> = topics
            .iter()
            .map(|t| (t.id, t.prerequisites.len()))
            .collect();
        let mut dependents: HashMap<TopicId, Vec<TopicId>> = HashMap::new();
        for topic in topics {
            for &prereq in &topic.prerequisites {
                dependents.entry(prereq).or_default().push(topic.id);
            }
        }

        let mut queue: VecDeque<TopicId> = topics
            .iter()
            .filter(|t| t.prerequisites.is_empty())
            .map(|t| t.id)
            .collect();
        let mut visited = 0usize;
        while let Some(id) = queue.pop_front() {
            visited += 1;
            if let Some(deps) = dependents.get(&id) {
                for &dep in deps {
                    if let Some(remaining) = indegree.get_mut(&dep) {
                        *remaining -= 1;
                        if *remaining == 0 {
                            queue.push_back(dep);
                        }
                    }
                }
            }
        }

        if visited == topics.len() {
            Ok(())
        } else {
            Err(CurriculumError::CyclicPrerequisites)
        }
    }

    /// Topics in canonical order.
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    pub fn topic(&self, id: TopicId) -> Option<&Topic> {
        self.positions.get(&id).map(|&idx| &self.topics[idx])
    }

    /// Position of a topic in the canonical ordering.
    pub fn position(&self, id: TopicId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    /// The topic a subtopic belongs to.
    pub fn topic_of_subtopic(&self, subtopic_id: SubtopicId) -> Option<TopicId> {
        self.subtopic_owner.get(&subtopic_id).copied()
    }

    /// Every subtopic id in the curriculum, in canonical topic order.
    /// This is the target set of the bulk complete-all operation.
    pub fn subtopic_ids(&self) -> Vec<SubtopicId> {
        self.topics
            .iter()
            .flat_map(|t| t.subtopics.iter().map(|s| s.id))
            .collect()
    }

    /// Total number of subtopics across all topics.
    pub fn subtopic_total(&self) -> usize {
        self.topics.iter().map(|t| t.subtopics.len()).sum()
    }

    /// The fixed Data Structures & Algorithms curriculum: eight topics,
    /// 51 subtopics, prerequisite chain from arrays through dynamic
    /// programming.
    pub fn dsa() -> Result<Self, CurriculumError> {
        fn sub(id: SubtopicId, name: &str, description: &str) -> Subtopic {
            Subtopic {
                id,
                name: name.to_string(),
                description: description.to_string(),
            }
        }
        fn topic(
            id: TopicId,
            name: &str,
            description: &str,
            order: u32,
            prerequisites: Vec<TopicId>,
            subtopics: Vec<Subtopic>,
        ) -> Topic {
            Topic {
                id,
                name: name.to_string(),
                description: description.to_string(),
                order,
                prerequisites,
                subtopics,
            }
        }

        Self::new(vec![
            topic(
                1,
                "Arrays & Strings",
                "Foundation of DSA - contiguous memory, indexing, string manipulation",
                1,
                vec![],
                vec![
                    sub(1, "Array Basics", "Declaration, initialization, indexing"),
                    sub(2, "Two Pointers", "Technique for sorted array problems"),
                    sub(3, "Sliding Window", "Fixed and variable size window problems"),
                    sub(4, "Prefix Sum", "Cumulative sum for range queries"),
                    sub(5, "Kadane's Algorithm", "Maximum subarray sum"),
                    sub(6, "String Manipulation", "Substrings, palindromes, anagrams"),
                    sub(7, "Hashing in Arrays", "Using hashmaps for O(1) lookups"),
                ],
            ),
            topic(
                2,
                "Linked Lists",
                "Dynamic data structures with node-based storage",
                2,
                vec![1],
                vec![
                    sub(8, "Singly Linked List", "Basic node and next pointer"),
                    sub(9, "Doubly Linked List", "Nodes with prev and next pointers"),
                    sub(10, "Cycle Detection", "Floyd's Tortoise and Hare algorithm"),
                    sub(11, "List Reversal", "Iterative and recursive reversal"),
                    sub(12, "Fast & Slow Pointers", "Finding middle, detecting cycles"),
                    sub(13, "Merge Lists", "Merging sorted linked lists"),
                ],
            ),
            topic(
                3,
                "Stacks & Queues",
                "LIFO and FIFO data structures for ordered operations",
                3,
                vec![1, 2],
                vec![
                    sub(14, "Stack Basics", "Push, pop, peek operations"),
                    sub(15, "Monotonic Stack", "Next greater/smaller element"),
                    sub(16, "Queue Basics", "Enqueue, dequeue operations"),
                    sub(17, "Deque", "Double-ended queue operations"),
                    sub(18, "Priority Queue Intro", "Heap-based priority operations"),
                    sub(
                        19,
                        "Stack Applications",
                        "Balanced parentheses, expression evaluation",
                    ),
                ],
            ),
            topic(
                4,
                "Recursion & Backtracking",
                "Problem-solving through self-referential functions",
                4,
                vec![3],
                vec![
                    sub(20, "Recursion Basics", "Base case, recursive case"),
                    sub(21, "Recursion Tree", "Visualizing recursive calls"),
                    sub(22, "Backtracking", "Explore and undo approach"),
                    sub(23, "Subsets & Permutations", "Generating all combinations"),
                    sub(24, "N-Queens Problem", "Classic backtracking example"),
                    sub(25, "Sudoku Solver", "Constraint satisfaction"),
                ],
            ),
            topic(
                5,
                "Trees & BST",
                "Hierarchical data structures with parent-child relationships",
                5,
                vec![4],
                vec![
                    sub(26, "Binary Tree Basics", "Nodes with left and right children"),
                    sub(27, "Tree Traversals", "Inorder, preorder, postorder, level-order"),
                    sub(28, "BST Operations", "Insert, search, delete in BST"),
                    sub(29, "Height & Depth", "Calculating tree dimensions"),
                    sub(30, "Lowest Common Ancestor", "Finding LCA in trees"),
                    sub(31, "Tree Construction", "Build tree from traversals"),
                ],
            ),
            topic(
                6,
                "Graphs",
                "Networks of nodes and edges for complex relationships",
                6,
                vec![5],
                vec![
                    sub(32, "Graph Representation", "Adjacency list and matrix"),
                    sub(33, "BFS", "Breadth-first search traversal"),
                    sub(34, "DFS", "Depth-first search traversal"),
                    sub(35, "Connected Components", "Finding connected parts"),
                    sub(36, "Topological Sort", "Ordering DAG nodes"),
                    sub(37, "Cycle Detection in Graphs", "Detecting cycles using DFS"),
                    sub(38, "Shortest Path Basics", "BFS for unweighted graphs"),
                ],
            ),
            topic(
                7,
                "Sorting Algorithms",
                "Efficient ordering of data using various strategies",
                7,
                vec![4],
                vec![
                    sub(39, "Bubble & Selection Sort", "Simple O(n^2) algorithms"),
                    sub(40, "Insertion Sort", "Build sorted array one element at a time"),
                    sub(41, "Merge Sort", "Divide and conquer, O(n log n)"),
                    sub(42, "Quick Sort", "Partition-based sorting"),
                    sub(43, "Counting Sort", "Non-comparison based sorting"),
                    sub(44, "Heap Sort", "Using heap data structure"),
                ],
            ),
            topic(
                8,
                "Dynamic Programming",
                "Optimization through overlapping subproblems",
                8,
                vec![4, 7],
                vec![
                    sub(45, "DP Introduction", "Memoization vs tabulation"),
                    sub(46, "1D DP", "Fibonacci, climbing stairs"),
                    sub(47, "2D DP", "Grid problems, LCS"),
                    sub(48, "Longest Common Subsequence", "Classic 2D DP problem"),
                    sub(
                        49,
                        "Longest Increasing Subsequence",
                        "1D DP with binary search optimization",
                    ),
                    sub(50, "Knapsack Problems", "0/1 and unbounded knapsack"),
                    sub(51, "DP on Strings", "Edit distance, palindromic substrings"),
                ],
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_topic(id: TopicId, order: u32, prerequisites: Vec<TopicId>) -> Topic {
        Topic {
            id,
            name: format!("Topic {id}"),
            description: String::new(),
            order,
            prerequisites,
            subtopics: vec![Subtopic {
                id: id * 100,
                name: format!("Subtopic {id}"),
                description: String::new(),
            }],
        }
    }

    #[test]
    fn builds_valid_graph_in_canonical_order() {
        let curriculum = Curriculum::new(vec![
            plain_topic(2, 2, vec![1]),
            plain_topic(1, 1, vec![]),
            plain_topic(3, 3, vec![1, 2]),
        ])
        .unwrap();

        let ids: Vec<TopicId> = curriculum.topics().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(curriculum.position(1), Some(0));
        assert_eq!(curriculum.position(3), Some(2));
        assert_eq!(curriculum.topic_of_subtopic(200), Some(2));
        assert_eq!(curriculum.topic_of_subtopic(999), None);
    }

    #[test]
    fn rejects_cycles() {
        let err = Curriculum::new(vec![
            plain_topic(1, 1, vec![2]),
            plain_topic(2, 2, vec![1]),
        ])
        .unwrap_err();
        assert!(matches!(err, CurriculumError::CyclicPrerequisites));
    }

    #[test]
    fn rejects_self_loop() {
        let err = Curriculum::new(vec![plain_topic(1, 1, vec![1])]).unwrap_err();
        assert!(matches!(err, CurriculumError::CyclicPrerequisites));
    }

    #[test]
    fn rejects_unknown_prerequisite() {
        let err = Curriculum::new(vec![plain_topic(1, 1, vec![42])]).unwrap_err();
        assert!(matches!(
            err,
            CurriculumError::UnknownPrerequisite {
                topic: 1,
                prerequisite: 42
            }
        ));
    }

    #[test]
    fn rejects_duplicate_topic_id() {
        let err =
            Curriculum::new(vec![plain_topic(1, 1, vec![]), plain_topic(1, 2, vec![])]).unwrap_err();
        assert!(matches!(err, CurriculumError::DuplicateTopic(1)));
    }

    #[test]
    fn rejects_topic_without_subtopics() {
        let mut topic = plain_topic(1, 1, vec![]);
        topic.subtopics.clear();
        let err = Curriculum::new(vec![topic]).unwrap_err();
        assert!(matches!(err, CurriculumError::EmptyTopic(1)));
    }

    #[test]
    fn dsa_curriculum_is_well_formed() {
        let curriculum = Curriculum::dsa().unwrap();
        assert_eq!(curriculum.len(), 8);
        assert_eq!(curriculum.subtopic_total(), 51);
        assert_eq!(curriculum.subtopic_ids().len(), 51);

        // Arrays & Strings is the only root; DP depends on recursion and sorting.
        let arrays = curriculum.topic(1).unwrap();
        assert!(arrays.prerequisites.is_empty());
        let dp = curriculum.topic(8).unwrap();
        assert_eq!(dp.prerequisites, vec![4, 7]);
        assert_eq!(curriculum.topic_of_subtopic(45), Some(8));
    }
}
