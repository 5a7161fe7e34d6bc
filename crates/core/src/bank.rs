//! Question bank seam.
//!
//! The engine never owns question content; it consumes whatever source the
//! runtime wires in. `StaticQuestionBank` is the deterministic in-memory
//! implementation used by the service and by tests.

use crate::curriculum::TopicId;
use crate::question::{Difficulty, Question, QuestionId};
use anyhow::Result;
use async_trait::async_trait;

/// The contract for any source of diagnostic and reassessment questions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionBank: Send + Sync {
    /// Questions for an initial diagnostic quiz, optionally restricted to a
    /// set of topics.
    async fn diagnostic_questions<'a>(
        &self,
        topic_ids: Option<&'a [TopicId]>,
    ) -> Result<Vec<Question>>;

    /// Questions for a reassessment over the caller's weak topics. Which
    /// topics count as weak is the caller's policy, not the bank's.
    async fn reassess_questions(&self, weak_topic_ids: &[TopicId]) -> Result<Vec<Question>>;
}

/// A fixed in-memory bank. Selection is deterministic: filters preserve the
/// bank's insertion order.
pub struct StaticQuestionBank {
    questions: Vec<Question>,
}

impl StaticQuestionBank {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn all(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// The seeded multiple-choice bank for the DSA curriculum, three
    /// questions per topic.
    pub fn dsa_sample() -> Self {
        fn q(
            id: QuestionId,
            topic_id: TopicId,
            topic: &str,
            text: &str,
            options: [&str; 4],
            correct_index: usize,
            difficulty: Difficulty,
        ) -> Question {
            Question {
                id,
                topic_id,
                topic: topic.to_string(),
                text: text.to_string(),
                options: options.iter().map(|o| o.to_string()).collect(),
                correct_index,
                difficulty,
            }
        }
        use Difficulty::{Easy, Medium};

        Self::new(vec![
            q(
                1,
                1,
                "Arrays & Strings",
                "What is the time complexity of accessing an element in an array by index?",
                ["O(1)", "O(n)", "O(log n)", "O(n^2)"],
                0,
                Easy,
            ),
            q(
                2,
                1,
                "Arrays & Strings",
                "Which technique is used to find pairs in a sorted array that sum to a target?",
                ["Binary Search", "Two Pointers", "Sliding Window", "Recursion"],
                1,
                Medium,
            ),
            q(
                3,
                1,
                "Arrays & Strings",
                "What algorithm finds maximum subarray sum in O(n)?",
                ["Merge Sort", "Quick Sort", "Kadane's Algorithm", "Two Pointers"],
                2,
                Medium,
            ),
            q(
                4,
                2,
                "Linked Lists",
                "What is the time complexity of inserting at the head of a singly linked list?",
                ["O(n)", "O(1)", "O(log n)", "O(n^2)"],
                1,
                Easy,
            ),
            q(
                5,
                2,
                "Linked Lists",
                "Which algorithm detects a cycle in a linked list in O(1) space?",
                ["Hash Set", "Floyd's Cycle Detection", "BFS", "DFS"],
                1,
                Medium,
            ),
            q(
                6,
                2,
                "Linked Lists",
                "How many pointers are typically needed to reverse a linked list iteratively?",
                ["1", "2", "3", "4"],
                2,
                Easy,
            ),
            q(
                7,
                3,
                "Stacks & Queues",
                "Which data structure is used to implement function calls in recursion?",
                ["Queue", "Stack", "Array", "Tree"],
                1,
                Easy,
            ),
            q(
                8,
                3,
                "Stacks & Queues",
                "Monotonic stack is used to find?",
                ["Minimum element", "Next greater element", "Sorted order", "Middle element"],
                1,
                Medium,
            ),
            q(
                9,
                3,
                "Stacks & Queues",
                "Which data structure follows FIFO principle?",
                ["Stack", "Queue", "Tree", "Graph"],
                1,
                Easy,
            ),
            q(
                10,
                4,
                "Recursion & Backtracking",
                "What is the base case in calculating factorial recursively?",
                ["n == 1", "n == 0 or n == 1", "n < 0", "No base case needed"],
                1,
                Easy,
            ),
            q(
                11,
                4,
                "Recursion & Backtracking",
                "What is the time complexity of recursive Fibonacci without memoization?",
                ["O(n)", "O(n^2)", "O(2^n)", "O(log n)"],
                2,
                Medium,
            ),
            q(
                12,
                4,
                "Recursion & Backtracking",
                "N-Queens problem is solved using which technique?",
                ["Dynamic Programming", "Greedy", "Backtracking", "Divide and Conquer"],
                2,
                Medium,
            ),
            q(
                13,
                5,
                "Trees & BST",
                "In a Binary Search Tree, where are smaller elements stored?",
                ["Right subtree", "Left subtree", "Root", "Anywhere"],
                1,
                Easy,
            ),
            q(
                14,
                5,
                "Trees & BST",
                "Which traversal gives sorted order for a BST?",
                ["Preorder", "Inorder", "Postorder", "Level order"],
                1,
                Easy,
            ),
            q(
                15,
                5,
                "Trees & BST",
                "What is the time complexity of search in a balanced BST?",
                ["O(n)", "O(log n)", "O(n^2)", "O(1)"],
                1,
                Medium,
            ),
            q(
                16,
                6,
                "Graphs",
                "Which algorithm is used for shortest path in an unweighted graph?",
                ["DFS", "BFS", "Dijkstra", "Bellman-Ford"],
                1,
                Medium,
            ),
            q(
                17,
                6,
                "Graphs",
                "Topological sort is applicable to?",
                ["Any graph", "DAG only", "Cyclic graphs", "Trees only"],
                1,
                Medium,
            ),
            q(
                18,
                6,
                "Graphs",
                "BFS uses which data structure?",
                ["Stack", "Queue", "Priority Queue", "Deque"],
                1,
                Easy,
            ),
            q(
                19,
                7,
                "Sorting Algorithms",
                "What is the average time complexity of Quick Sort?",
                ["O(n)", "O(n log n)", "O(n^2)", "O(log n)"],
                1,
                Easy,
            ),
            q(
                20,
                7,
                "Sorting Algorithms",
                "Which sorting algorithm is stable?",
                ["Quick Sort", "Heap Sort", "Merge Sort", "Selection Sort"],
                2,
                Medium,
            ),
            q(
                21,
                7,
                "Sorting Algorithms",
                "Counting Sort works best when?",
                ["Data is random", "Range of values is small", "Data is large", "Data is sorted"],
                1,
                Medium,
            ),
            q(
                22,
                8,
                "Dynamic Programming",
                "DP is recursion plus?",
                ["Iteration", "Memoization", "Sorting", "Hashing"],
                1,
                Easy,
            ),
            q(
                23,
                8,
                "Dynamic Programming",
                "What are the two approaches to DP?",
                [
                    "BFS and DFS",
                    "Top-down and Bottom-up",
                    "Greedy and Brute force",
                    "Recursive and Iterative",
                ],
                1,
                Easy,
            ),
            q(
                24,
                8,
                "Dynamic Programming",
                "0/1 Knapsack can be solved using?",
                ["Greedy", "DP", "Divide and Conquer", "Both Greedy and DP"],
                1,
                Medium,
            ),
        ])
    }
}

#[async_trait]
impl QuestionBank for StaticQuestionBank {
    async fn diagnostic_questions<'a>(
        &self,
        topic_ids: Option<&'a [TopicId]>,
    ) -> Result<Vec<Question>> {
        let questions = match topic_ids {
            Some(ids) => self
                .questions
                .iter()
                .filter(|q| ids.contains(&q.topic_id))
                .cloned()
                .collect(),
            None => self.questions.clone(),
        };
        Ok(questions)
    }

    async fn reassess_questions(&self, weak_topic_ids: &[TopicId]) -> Result<Vec<Question>> {
        Ok(self
            .questions
            .iter()
            .filter(|q| weak_topic_ids.contains(&q.topic_id))
            .cloned()
            .collect())
    }
}
