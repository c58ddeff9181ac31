pub const SUMMARY_INSTRUCTION: &str =
    "Summarize this lecture into 1 page notes in md format, use subheadings and bulleted points and emojis: \n\n";

pub const QUIZ_INSTRUCTION: &str = "Generate a quiz from the following text: \n\n";

pub const QUIZ_FORMAT_EXAMPLE: &str = "\n\nThe format of the quiz should be multiple choice questions. Return 5 questions as a python list EXACTLY in this format, example: [{'question': 'What is the capital of France?', 'options': ['Paris', 'London', 'Berlin', 'Madrid'], 'answer': 'Paris'}, ...]";

/// Instruction plus source text. The reply is returned to the caller verbatim.
pub fn summary_prompt(text: &str) -> String {
    format!("{SUMMARY_INSTRUCTION}{text}")
}

/// Instruction, source text, then the output-format example the reply
/// parser expects. Question count and format are fixed in the template.
pub fn quiz_prompt(text: &str) -> String {
    format!("{QUIZ_INSTRUCTION}{text}{QUIZ_FORMAT_EXAMPLE}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_prompt_appends_source_text() {
        let prompt = summary_prompt("the lecture text");

        assert!(prompt.starts_with(SUMMARY_INSTRUCTION));
        assert!(prompt.ends_with("the lecture text"));
    }

    #[test]
    fn quiz_prompt_places_text_between_instruction_and_example() {
        let prompt = quiz_prompt("the lecture text");

        assert!(prompt.starts_with(QUIZ_INSTRUCTION));
        assert!(prompt.contains("the lecture text"));
        assert!(prompt.ends_with(QUIZ_FORMAT_EXAMPLE));
    }

    #[test]
    fn quiz_format_example_requests_five_questions() {
        assert!(QUIZ_FORMAT_EXAMPLE.contains("Return 5 questions"));
        assert!(QUIZ_FORMAT_EXAMPLE.contains("'question'"));
        assert!(QUIZ_FORMAT_EXAMPLE.contains("'options'"));
        assert!(QUIZ_FORMAT_EXAMPLE.contains("'answer'"));
    }
}
