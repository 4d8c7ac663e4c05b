pub const SYSTEM_PROMPT: &str = "You are the user's private second brain. \
Answer ONLY from the context below. \
If the context does not contain the answer, say so plainly instead of guessing. \
Cite the notes you used with their bracketed numbers from the context, like [1], [2].";

/// The user turn: the question followed by the numbered context block.
pub fn user_message(question: &str, context: &str) -> String {
    format!("Question: {}\n\nContext:\n{}", question, context)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_layout() {
        assert_eq!(
            user_message("What is my cat's name?", "[1] Pets: Whiskers"),
            "Question: What is my cat's name?\n\nContext:\n[1] Pets: Whiskers"
        );
        assert_eq!(user_message("q", ""), "Question: q\n\nContext:\n");
    }
}
