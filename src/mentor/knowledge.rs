use crate::backend::MentorResponse;
use once_cell::sync::Lazy;

pub struct KnowledgeEntry {
    pub topic: &'static str,
    pub keywords: &'static [&'static str],
    pub response: MentorResponse,
}

fn response(
    approach: &str,
    trade_offs: &str,
    real_world_analogy: &str,
    better_alternative: &str,
) -> MentorResponse {
    MentorResponse {
        approach: approach.to_string(),
        trade_offs: trade_offs.to_string(),
        real_world_analogy: real_world_analogy.to_string(),
        better_alternative: better_alternative.to_string(),
    }
}

/// Scanned in order; the first entry with a matching keyword wins.
pub static KNOWLEDGE_BASE: Lazy<Vec<KnowledgeEntry>> = Lazy::new(|| {
    vec![
        KnowledgeEntry {
            topic: "bst",
            keywords: &["bst", "binary search tree", "tree", "search"],
            response: response(
                "Binary Search Tree (BST) for ordered data lookup",
                "BST offers O(log n) average search vs O(n) for flat arrays. However, worst-case BST degrades to O(n) if unbalanced. Self-balancing trees (AVL, Red-Black) guarantee O(log n) at the cost of rotation overhead.",
                "Think of a BST like a library with a Dewey Decimal System — you never scan every book. You go left or right at each shelf based on the number, halving your search space each time.",
                "For most production use cases, consider a HashMap for O(1) lookups if ordering is not required, or a B-Tree (used in databases like PostgreSQL) for disk-based ordered storage.",
            ),
        },
        KnowledgeEntry {
            topic: "array",
            keywords: &["array", "flat array", "list", "linear"],
            response: response(
                "Flat Array / Linear Search",
                "Arrays provide O(1) random access by index and excellent cache locality. However, searching unsorted arrays is O(n). Insertion/deletion in the middle is O(n) due to shifting.",
                "A flat array is like a row of numbered lockers — you can jump directly to locker #42, but finding \"the locker with the red key\" means checking each one.",
                "Sort the array first to enable binary search O(log n), or use a hash map for O(1) key-based lookups when random access by value is the primary operation.",
            ),
        },
        KnowledgeEntry {
            topic: "git",
            keywords: &["git", "merge", "conflict", "branch", "rebase"],
            response: response(
                "Git Merge vs Rebase for integrating branches",
                "Merge preserves full history with a merge commit — great for auditing. Rebase creates a linear history but rewrites commits, making force-push necessary and potentially dangerous on shared branches.",
                "Merge is like stapling two documents together with a cover page noting when they were combined. Rebase is like retyping one document to include the other's changes inline — cleaner, but you've altered the original.",
                "Use \"squash and merge\" for feature branches to keep main history clean, while preserving full history in the feature branch PR for review purposes.",
            ),
        },
        KnowledgeEntry {
            topic: "hash",
            keywords: &["hash", "hashmap", "dictionary", "map", "lookup"],
            response: response(
                "HashMap / Hash Table for key-value lookups",
                "HashMaps provide O(1) average-case insert, delete, and lookup. Worst case is O(n) due to hash collisions. Memory overhead is higher than arrays, and iteration order is not guaranteed.",
                "A HashMap is like a coat check — you hand in your coat and get a numbered ticket. Retrieving it is instant because the number maps directly to a rack position, not a sequential search.",
                "If you need ordered iteration, use a TreeMap (O(log n) operations). For concurrent access, use ConcurrentHashMap or lock-free structures like skip lists.",
            ),
        },
        KnowledgeEntry {
            topic: "queue",
            keywords: &["queue", "stack", "fifo", "lifo", "deque"],
            response: response(
                "Queue (FIFO) vs Stack (LIFO) data structures",
                "Queues ensure fairness — first in, first out. Stacks are ideal for undo/redo and recursive call management. Both offer O(1) push/pop. Choosing wrong leads to incorrect ordering semantics.",
                "A Queue is a coffee shop line — first customer served first. A Stack is a pile of plates — you always take from the top, which was placed last.",
                "For priority-based processing, use a Priority Queue (min/max heap) with O(log n) insertion. For concurrent systems, consider lock-free queues like Michael-Scott queue.",
            ),
        },
        KnowledgeEntry {
            topic: "system design",
            keywords: &[
                "system design",
                "architecture",
                "scalable",
                "microservice",
                "monolith",
            ],
            response: response(
                "Monolith vs Microservices Architecture",
                "Monoliths are simpler to develop, test, and deploy initially. Microservices enable independent scaling and deployment but introduce network latency, distributed tracing complexity, and operational overhead.",
                "A monolith is a Swiss Army knife — one tool, many functions, easy to carry. Microservices are a professional chef's knife set — each tool is optimized for its job, but you need a bigger kitchen to use them all.",
                "Start with a modular monolith (well-separated modules in one codebase). Extract services only when a specific module has distinct scaling or deployment needs — this is the \"strangler fig\" pattern.",
            ),
        },
    ]
});

pub static DEFAULT_RESPONSE: Lazy<MentorResponse> = Lazy::new(|| {
    response(
        "Analyzing your question from first principles",
        "Every engineering decision involves trade-offs between time complexity, space complexity, readability, and maintainability. Without more context, the best approach depends on your specific constraints (data size, access patterns, team familiarity).",
        "Think of it like choosing a vehicle: a bicycle is perfect for a city commute but impractical for cross-country travel. The \"best\" choice is always relative to the problem constraints.",
        "Try asking about a specific data structure (BST, HashMap, Array), algorithm pattern (sorting, searching), or system design concept (caching, queuing, sharding) for a more targeted explanation.",
    )
});

/// Prompts offered before the first question is asked.
pub const SUGGESTED_QUESTIONS: [&str; 3] = [
    "Why use a BST over a flat array?",
    "Explain Git merge vs rebase",
    "When to use a HashMap?",
];
