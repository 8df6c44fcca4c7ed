// Shared prompt fragments.
// Each feature that calls the model keeps its own prompts.rs alongside it;
// this file holds the cross-cutting pieces.

/// Appended to every prompt whose response is parsed as JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "\
Respond with a single valid JSON object only. \
Do NOT include any text outside the JSON object. \
Do NOT use markdown code fences. \
Do NOT include explanations or apologies.";

/// Grounds every feature in the candidate's own text.
pub const NO_FABRICATION_INSTRUCTION: &str = "\
Base every statement on the resume text provided. \
Do NOT invent employers, dates, degrees, skills, or metrics that the resume does not contain.";

/// Fills `{name}` placeholders in a single pass over `template`.
///
/// Substituted values are never rescanned, so user text containing a
/// placeholder name is inserted verbatim. Braces that do not name a known
/// placeholder (JSON schemas in prompts) are left alone.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let value = after.find('}').and_then(|end| {
            let name = &after[..end];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, end))
        });
        match value {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
