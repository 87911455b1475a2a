// src/prompts.rs

//! System instructions and prompt assembly for both subcommands.

/// Instruction for the jq subcommand.
pub const JQ_SYSTEM_PROMPT: &str = "\
Based on the example JSON snippet and the desired query, write a jq program

Return only the jq program to be executed as a raw string, no string delimiters
wrapping it, no yapping, no markdown, no fenced code blocks, what you return
will be passed to the jq executable as its only argument directly.
For example, if the user asks: extract the name of the first person
You return only: .people[0].name";

/// Instruction for the py subcommand.
pub const PY_SYSTEM_PROMPT: &str = "\
Based on the example JSON snippet and the desired query, write a Python script

Return only the Python script to be executed as a raw string, no string delimiters
wrapping it, no yapping, no markdown, no fenced code blocks, what you return
will be passed to a Python interpreter directly.

Do not use anything other than the standard library. Read the JSON input from
stdin and write the result in JSON format to stdout.";

const SAMPLE_SEPARATOR: &str = "\n\n";
const SAMPLE_LABEL: &str = "Example JSON snippet:\n";

/// Build the user prompt from the description and the captured sample.
///
/// Invalid UTF-8 in the sample is replaced rather than rejected; a truncated
/// sample routinely ends in the middle of a multi-byte character.
pub fn build_prompt(description: &str, sample: &[u8]) -> String {
    if sample.is_empty() {
        return description.to_string();
    }

    let decoded = String::from_utf8_lossy(sample);
    let mut prompt =
        String::with_capacity(description.len() + SAMPLE_SEPARATOR.len() + SAMPLE_LABEL.len() + decoded.len());
    prompt.push_str(description);
    prompt.push_str(SAMPLE_SEPARATOR);
    prompt.push_str(SAMPLE_LABEL);
    prompt.push_str(&decoded);
    prompt
}
