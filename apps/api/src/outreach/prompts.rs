// All LLM prompt constants for the outreach module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Sampling temperature for job-detail extraction. Kept low to bias toward stable JSON.
pub const EXTRACTION_TEMPERATURE: f32 = 0.3;

/// Sampling temperature for the email + resume advice call.
pub const EXTENDED_GENERATION_TEMPERATURE: f32 = 0.4;

/// Sampling temperature for the plain cold email call.
pub const SIMPLE_GENERATION_TEMPERATURE: f32 = 0.3;

/// Job extraction prompt template. Replace `{raw_text}` before sending.
pub const JOB_EXTRACTION_PROMPT_TEMPLATE: &str = r#"Extract the key job details from the following job posting: company name, position, salary or pay rate, responsibilities, requirements, preferred qualifications (often listed in a separate section; include them when present, they are important but not required), and tech stack.

JOB POSTING:
{raw_text}

Return the output as a single valid JSON object with this EXACT schema:
{
  "company_name": "string - the hiring company's name, or null",
  "position": "string - the position being applied for, or null",
  "salary": "string or number - the salary or pay rate, or null if it is not provided",
  "responsibilities": ["string"],
  "requirements": ["string"],
  "preferred_qualifications": ["string"],
  "tech_stack": ["string"]
}

Use empty arrays for sections the posting does not mention. Return ONLY the JSON object."#;

/// Shown to the generator in place of structured fields when extraction degraded.
pub const UNSTRUCTURED_JOB_PREAMBLE: &str = "The job posting could not be structured. \
    The raw extraction output follows; infer the company, title and requirements from it.";

/// Email + resume advice prompt template.
/// Replace: {job_posting}, {resume_text}, {no_invention_instruction}
pub const EXTENDED_GENERATION_PROMPT_TEMPLATE: &str = r#"You are an expert career assistant. Your task is to generate two things based on the provided job description and resume:
1. A professional, skimmable cold email, tailored primarily to the job description.
2. Actionable advice on how to subtly modify the resume to better align with the job posting.

INPUTS:
- Job Posting: {job_posting}
- My Current Resume: {resume_text}

{no_invention_instruction}

TASK 1: GENERATE THE COLD EMAIL
- Write a short, professional email expressing interest in the job.
- Prioritize tailoring the content to the job description. Use the resume as the factual basis for experience, but frame it to match the job's needs.
- Follow the email format below. Use bullet points for clarity.
- Use Markdown double asterisks (`**text**`) to bold key elements: **Job Title**, **Company Name**, specific **technical skills**, and **quantifiable metrics**.

EMAIL FORMAT TO FOLLOW:
Hi [Recruiter Name if available],
I hope you're doing well. I'm reaching out to express my strong interest in the **[Job Title]** opportunity at **[Company Name]**. I'm enthusiastic about the possibility of contributing to your team.
Here's a quick overview of how my experience aligns with your needs:
- [Relevant Experience/Project 1: framed to match a responsibility or requirement from the posting. Include relevant tech.]
- [Relevant Experience/Project 2: framed to match another key requirement. Include relevant tech and quantifiable outcomes if possible.]
- [Summary of technical proficiency, highlighting skills mentioned in the job description.]
I am confident that my background in [1-2 key areas from the job description] makes me a strong candidate.
I've attached my resume for your review and would welcome the opportunity to discuss how my skills can benefit your team.
Thank you for your time!
Sincerely,
[Your Name]

TASK 2: GENERATE RESUME MODIFICATION ADVICE
- Provide a list of specific, actionable suggestions for modifying the resume to better match the job.
- Do NOT invent new projects or work experiences. All suggestions must be based on the existing resume content.
- Focus on:
  - Rephrasing bullet points to include keywords from the job description.
  - Highlighting or re-ordering skills in the Skills or Tech Stack section to match the job's priorities.
  - Suggesting which projects to emphasize.
- The advice should be encouraging and easy to follow.

FINAL OUTPUT FORMAT:
Return a single, valid JSON object with exactly two keys, "email_content" and "resume_advice":
{
  "email_content": "The full Markdown text of the generated email.",
  "resume_advice": "The full Markdown text of the resume advice, using bullet points for suggestions."
}"#;

/// Plain cold email prompt template.
/// Replace: {job_posting}, {resume_text}, {no_invention_instruction}
pub const SIMPLE_GENERATION_PROMPT_TEMPLATE: &str = r#"Write a short, polished, and skimmable cold email expressing my interest in a job I applied for. The email should have three concise paragraphs:

1. A warm opening stating that I recently applied for the role and expressing enthusiasm for the opportunity.
2. A brief highlight of my relevant skills and experience that make me a strong fit.
3. A closing sentence politely requesting to schedule a call to discuss further.

Job Posting: {job_posting}
My Resume: {resume_text}

{no_invention_instruction}

Keep the tone professional yet friendly, making it easy for the recruiter to skim quickly while still leaving a strong impression. Avoid unnecessary details or long sentences. Return only the email text."#;
