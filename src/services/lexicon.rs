// Default Lexicons
// Word lists shipped with the engine; all of them can be replaced from config.json

pub const POSITIVE_WORDS: &[&str] = &[
    "love", "happy", "good", "great", "amazing", "wonderful", "like", "enjoy", "excellent", "cool",
    "fantastic", "awesome", "brilliant", "delightful", "fabulous", "glad", "joyful", "pleased",
    "cheerful", "optimistic", "thrilled", "blessed", "content", "ecstatic", "elated", "energetic",
    "grateful", "hopeful", "inspired", "jubilant", "laugh", "laughing", "smile", "smiling",
    "satisfied", "stunning", "terrific", "thankful", "amused", "blissful", "confident", "peaceful",
    "proud", "radiant", "relieved", "sparkling", "splendid", "vibrant",
];

pub const NEGATIVE_WORDS: &[&str] = &[
    "bad", "hate", "terrible", "worst", "awful", "sad", "angry", "boring", "disgusting", "fear",
    "annoyed", "disappointed", "frustrated", "guilty", "jealous", "lonely", "mad", "nervous", "pain",
    "regret", "resentful", "stressed", "upset", "unhappy", "anxious", "depressed", "embarrassed",
    "hurt", "miserable", "pessimistic", "resentment", "shocked", "sorrow", "tense", "trouble",
    "vulnerable", "worried", "tired", "dreadful", "hopeless", "offended", "uncomfortable", "grief",
    "discouraged", "frightened",
];

pub const NEGATORS: &[&str] = &[
    "not", "no", "never", "nor", "neither", "without", "hardly", "cannot", "can't", "don't",
    "doesn't", "didn't", "isn't", "wasn't", "aren't", "weren't", "won't", "wouldn't", "couldn't",
    "shouldn't", "haven't", "hasn't", "hadn't", "ain't",
];

/// English function words (NLTK stopword list).
pub const FUNCTION_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours", "yourself",
    "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself", "it", "its",
    "itself", "they", "them", "their", "theirs", "themselves", "what", "which", "who", "whom",
    "this", "that", "these", "those", "am", "is", "are", "was", "were", "be", "been", "being",
    "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but",
    "if", "or", "because", "as", "until", "while", "of", "at", "by", "for", "with", "about",
    "against", "between", "into", "through", "during", "before", "after", "above", "below", "to",
    "from", "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then",
    "once", "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few",
    "more", "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so",
    "than", "too", "very", "s", "t", "can", "will", "just", "don", "should", "now",
];

pub fn to_owned_list(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}
