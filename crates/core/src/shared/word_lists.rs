/// A named practice list shipped with the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordList {
    pub id: &'static str,
    pub name: &'static str,
    pub words: &'static [&'static str],
}

pub const BUILT_IN_LISTS: &[WordList] = &[
    WordList {
        id: "sight-words-k",
        name: "Kindergarten Sight Words",
        words: &[
            "the", "and", "a", "to", "said", "it", "he", "she", "was", "for", "on", "are", "as",
            "with", "his", "they", "I", "at", "be", "this",
        ],
    },
    WordList {
        id: "sight-words-1",
        name: "1st Grade Sight Words",
        words: &[
            "have", "from", "or", "one", "had", "by", "word", "but", "not", "what", "all", "were",
            "we", "when", "your", "can", "an", "each", "which", "their",
        ],
    },
    WordList {
        id: "cvc-words",
        name: "CVC Words",
        words: &[
            "cat", "dog", "run", "sit", "hop", "map", "pen", "bed", "pig", "fox", "sun", "cup",
            "bat", "hat", "red", "leg", "bus", "rug", "pot", "log",
        ],
    },
    WordList {
        id: "simple-sentences",
        name: "Simple Sentences",
        words: &[
            "I see a cat",
            "The dog is big",
            "I can run fast",
            "She is happy",
            "We like to play",
            "The sun is hot",
            "I love my mom",
            "He has a hat",
            "We go to school",
            "I can read",
        ],
    },
];

pub fn find(id: &str) -> Option<&'static WordList> {
    BUILT_IN_LISTS.iter().find(|list| list.id == id)
}
