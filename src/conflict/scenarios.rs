use once_cell::sync::Lazy;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictScenario {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub base: &'static str,
    pub ours: &'static str,
    pub theirs: &'static str,
    pub conflict_markers: &'static str,
    pub expected: &'static str,
    pub hints: &'static [&'static str],
    pub explanation: &'static str,
}

pub static SCENARIOS: Lazy<[ConflictScenario; 3]> = Lazy::new(|| {
    [
        ConflictScenario {
            id: "variable-rename",
            title: "Variable Rename Conflict",
            description: "Two developers renamed the same variable differently in their branches.",
            base: r#"function calculateTotal(items) {
  let sum = 0;
  for (const item of items) {
    sum += item.price;
  }
  return sum;
}"#,
            ours: r#"function calculateTotal(items) {
-  let sum = 0;
+  let total = 0;
  for (const item of items) {
-    sum += item.price;
+    total += item.price;
  }
-  return sum;
+  return total;
}"#,
            theirs: r#"function calculateTotal(items) {
-  let sum = 0;
+  let accumulator = 0;
  for (const item of items) {
-    sum += item.price;
+    accumulator += item.price;
  }
-  return sum;
+  return accumulator;
}"#,
            conflict_markers: r#"function calculateTotal(items) {
<<<<<<< HEAD (ours)
  let total = 0;
  for (const item of items) {
    total += item.price;
  }
  return total;
=======
  let accumulator = 0;
  for (const item of items) {
    accumulator += item.price;
  }
  return accumulator;
>>>>>>> feature/rename-vars
}"#,
            expected: r#"function calculateTotal(items) {
  let total = 0;
  for (const item of items) {
    total += item.price;
  }
  return total;
}"#,
            hints: &[
                "Hint 1: Both branches renamed the same variable — you need to pick ONE name consistently.",
                "Hint 2: Remove all conflict markers (<<<<<<, =======, >>>>>>>) and keep only one version of the variable name throughout.",
                "Hint 3: The team agreed on \"total\" as the preferred name. Keep the HEAD (ours) version and remove the incoming changes.",
            ],
            explanation: "Variable naming conflicts are resolved by team convention. The HEAD branch used \"total\" which is more descriptive than \"accumulator\" for a price sum. Always remove ALL conflict markers and ensure the chosen name is used consistently throughout the function.",
        },
        ConflictScenario {
            id: "logic-divergence",
            title: "Logic Divergence Conflict",
            description: "Two developers added different validation logic to the same function.",
            base: r#"function validateAge(age) {
  if (age < 0) {
    throw new Error('Invalid age');
  }
  return true;
}"#,
            ours: r#"function validateAge(age) {
  if (age < 0) {
    throw new Error('Invalid age');
  }
+  if (age > 150) {
+    throw new Error('Age too large');
+  }
  return true;
}"#,
            theirs: r#"function validateAge(age) {
  if (age < 0) {
    throw new Error('Invalid age');
  }
+  if (typeof age !== 'number') {
+    throw new Error('Age must be a number');
+  }
  return true;
}"#,
            conflict_markers: r#"function validateAge(age) {
  if (age < 0) {
    throw new Error('Invalid age');
  }
<<<<<<< HEAD (ours)
  if (age > 150) {
    throw new Error('Age too large');
  }
=======
  if (typeof age !== 'number') {
    throw new Error('Age must be a number');
  }
>>>>>>> feature/type-check
  return true;
}"#,
            expected: r#"function validateAge(age) {
  if (typeof age !== 'number') {
    throw new Error('Age must be a number');
  }
  if (age < 0) {
    throw new Error('Invalid age');
  }
  if (age > 150) {
    throw new Error('Age too large');
  }
  return true;
}"#,
            hints: &[
                "Hint 1: Both validations are useful and non-conflicting — you should KEEP BOTH, not choose one.",
                "Hint 2: The type check should come FIRST (before numeric comparisons) since comparing a non-number to 0 is undefined behavior.",
                "Hint 3: Order: type check → negative check → upper bound check. Remove conflict markers and include all three validations.",
            ],
            explanation: "Logic divergence conflicts often require MERGING both changes, not choosing one. The type check must come first (guard clause pattern) since numeric comparisons on non-numbers produce NaN. This is a classic case where both developers added valid, complementary validations.",
        },
        ConflictScenario {
            id: "structural-refactor",
            title: "Structural Refactor Conflict",
            description: "One developer refactored a class while another added a new method to the original structure.",
            base: r#"class UserService {
  constructor(db) {
    this.db = db;
  }

  getUser(id) {
    return this.db.find(id);
  }
}"#,
            ours: r#"class UserService {
  #db;
  constructor(db) {
-    this.db = db;
+    this.#db = db;
  }

  getUser(id) {
-    return this.db.find(id);
+    return this.#db.find(id);
  }
}"#,
            theirs: r#"class UserService {
  constructor(db) {
    this.db = db;
  }

  getUser(id) {
    return this.db.find(id);
  }

+  async createUser(data) {
+    return this.db.insert(data);
+  }
}"#,
            conflict_markers: r#"class UserService {
<<<<<<< HEAD (ours)
  #db;
  constructor(db) {
    this.#db = db;
  }

  getUser(id) {
    return this.#db.find(id);
  }
=======
  constructor(db) {
    this.db = db;
  }

  getUser(id) {
    return this.db.find(id);
  }

  async createUser(data) {
    return this.db.insert(data);
  }
>>>>>>> feature/add-create
}"#,
            expected: r#"class UserService {
  #db;
  constructor(db) {
    this.#db = db;
  }

  getUser(id) {
    return this.#db.find(id);
  }

  async createUser(data) {
    return this.#db.insert(data);
  }
}"#,
            hints: &[
                "Hint 1: The HEAD branch used private class fields (#db) — a modern JS feature. The incoming branch added a new method. You need BOTH.",
                "Hint 2: Keep the private field refactor from HEAD, but also include the createUser method from the incoming branch.",
                "Hint 3: Update createUser to use this.#db instead of this.db to be consistent with the private field refactor.",
            ],
            explanation: "Structural refactors require careful integration. The private field (#db) is a security improvement that prevents external access to the database connection. The new createUser method must be updated to use #db for consistency. This is why code reviews and small, focused PRs reduce conflict complexity.",
        },
    ]
});

pub fn find_scenario(id: &str) -> Option<&'static ConflictScenario> {
    SCENARIOS.iter().find(|s| s.id == id)
}
