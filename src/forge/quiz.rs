use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct QuizOption {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizQuestion {
    pub question: &'static str,
    pub options: [QuizOption; 4],
    #[serde(skip)]
    pub correct: &'static str,
    /// Mistake tag this question probes.
    pub tag: &'static str,
}

const fn opt(value: &'static str, label: &'static str) -> QuizOption {
    QuizOption { value, label }
}

pub static QUIZ: [QuizQuestion; 5] = [
    QuizQuestion {
        question: "What does `arr[arr.length]` return in JavaScript?",
        options: [
            opt("a", "The last element"),
            opt("b", "undefined"),
            opt("c", "An error"),
            opt("d", "null"),
        ],
        correct: "b",
        tag: "off-by-one",
    },
    QuizQuestion {
        question: "What happens when you compare `null == undefined` in JavaScript?",
        options: [
            opt("a", "true"),
            opt("b", "false"),
            opt("c", "TypeError"),
            opt("d", "NaN"),
        ],
        correct: "a",
        tag: "null-handling",
    },
    QuizQuestion {
        question: "What is the output of `typeof NaN`?",
        options: [
            opt("a", "'NaN'"),
            opt("b", "'undefined'"),
            opt("c", "'number'"),
            opt("d", "'object'"),
        ],
        correct: "c",
        tag: "type-coercion",
    },
    QuizQuestion {
        question: "In a `for` loop with `var i`, what does `i` equal after the loop?",
        options: [
            opt("a", "undefined"),
            opt("b", "The last iterated value"),
            opt("c", "The length of the array"),
            opt("d", "It's not accessible"),
        ],
        correct: "c",
        tag: "scope-confusion",
    },
    QuizQuestion {
        question: "What does `!!'false'` evaluate to?",
        options: [
            opt("a", "false"),
            opt("b", "true"),
            opt("c", "'false'"),
            opt("d", "TypeError"),
        ],
        correct: "b",
        tag: "logic-inversion",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    pub fn from_correct(correct: usize) -> Self {
        match correct {
            0 | 1 => Self::Beginner,
            2 | 3 => Self::Intermediate,
            _ => Self::Advanced,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

/// Number of answers matching the key, compared position by position.
pub fn score(answers: &[String]) -> usize {
    QUIZ.iter()
        .zip(answers)
        .filter(|(q, a)| q.correct == a.as_str())
        .count()
}
