// Cover letter prompt template.
// Placeholders: {resumeText}, {jobDescription}, {no_fabrication}.

pub const COVER_LETTER_PROMPT: &str = r#"You are a professional career writer.
Write a cover letter for the candidate whose resume is below, addressed to the role described.

RESUME:
{resumeText}

TARGET ROLE:
{jobDescription}

RULES:
1. Three to four paragraphs, 250 to 400 words, professional but personable.
2. Open with the role and a one-sentence hook drawn from the candidate's strongest relevant experience.
3. Connect two or three concrete achievements from the resume to the role's needs.
4. Close with a short call to action.
5. {no_fabrication}
6. Return the letter text only. No subject line, no markdown, no placeholders such as [Company Name]."#;
