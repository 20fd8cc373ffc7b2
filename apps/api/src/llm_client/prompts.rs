// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction shared by every prompt that writes on the candidate's behalf.
pub const NO_INVENTION_INSTRUCTION: &str = "\
    CRITICAL: Use the resume as the only factual basis for the candidate's experience. \
    Do NOT invent projects, employers, metrics, or skills that are not present in the resume.";

/// Fills `{name}` placeholders in `template` with the matching value from `vars`.
///
/// Substitution is a single pass: inserted values are never re-scanned, so page
/// text that happens to contain `{resume_text}` is embedded verbatim. Braces that
/// do not form a known placeholder (JSON examples in templates) are left alone.
pub fn build_prompt(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(
        template.len() + vars.iter().map(|(_, v)| v.len()).sum::<usize>(),
    );
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];

        let replacement = after_open.find('}').and_then(|close| {
            let name = &after_open[..close];
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });

        match replacement {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after_open[close + 1..];
            }
            None => {
                out.push('{');
                rest = after_open;
            }
        }
    }

    out.push_str(rest);
    out
}
