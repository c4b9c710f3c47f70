/// Builds the fixed instructional prompt for one transcript fragment.
///
/// The model is told to answer with strict JSON or the literal `null` and
/// nothing else. It does not always comply; `classifier::parse_outcome`
/// defends against that.
pub fn task_extraction_prompt(text: &str) -> String {
    format!(
        r#"You are a meeting assistant that detects actionable task assignments.

Analyze the following meeting transcript line and decide whether it assigns a task to someone.

Transcript line: "{text}"

If it contains a task assignment, respond with ONLY a JSON object in exactly this shape:
{{"assignee": "<who the task is assigned to>", "task": "<what needs to be done>", "due": "<deadline if mentioned>"}}

Use the string "unspecified" for any field you cannot determine.

If it does NOT contain a task assignment, respond with ONLY the literal text: null

Do not add explanations, markdown formatting, or any other text."#
    )
}
