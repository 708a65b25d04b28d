// Prompt templates for the three analysis calls.
// Each template is filled with `str::replace` before sending; the model's reply is passed
// through untouched.

/// Resume summary prompt. Replace `{resume_text}` before sending.
pub const RESUME_PARSE_PROMPT: &str = "You are a professional resume parser.
Extract the following from the text below:
- Skills
- Experience summary
- Education
- Tools & technologies

Resume Text:
{resume_text}

Return the response in clear bullet points.";

/// Job description summary prompt. Replace `{jd_text}` before sending.
pub const JD_PARSE_PROMPT: &str = "Extract the following from this Job Description:
- Required skills
- Responsibilities
- Preferred qualifications

Job Description:
{jd_text}

Return in clear bullet points.";

/// ATS match prompt. Replace `{parsed_resume}` and `{parsed_jd}` before sending.
pub const ATS_MATCH_PROMPT: &str = "You are a high-end Applicant Tracking System (ATS).
Compare the provided resume analysis against the job description analysis.

Resume Analysis:
{parsed_resume}

Job Description Analysis:
{parsed_jd}

Provide a detailed report including:
1. Match percentage (Format as: Match Score: XX%)
2. Matching skills
3. Critical missing skills
4. Strengths of the candidate
5. Specific improvement suggestions for this JD";

pub fn resume_parse_prompt(resume_text: &str) -> String {
    RESUME_PARSE_PROMPT.replace("{resume_text}", resume_text)
}

pub fn jd_parse_prompt(jd_text: &str) -> String {
    JD_PARSE_PROMPT.replace("{jd_text}", jd_text)
}

/// The resume analysis is substituted last so placeholder-looking text inside either
/// summary is never expanded a second time.
pub fn ats_match_prompt(parsed_resume: &str, parsed_jd: &str) -> String {
    let (head, tail) = ATS_MATCH_PROMPT
        .split_once("{parsed_jd}")
        .unwrap_or((ATS_MATCH_PROMPT, ""));
    let head = head.replace("{parsed_resume}", parsed_resume);
    format!("{head}{parsed_jd}{tail}")
}
