// All LLM prompt constants for the Coach module.
// Templates use `{placeholder}` slots replaced before sending.

/// Shared system prompt for every coach completion.
pub const COACH_SYSTEM: &str = "You are an experienced career coach. \
    Be specific and practical. \
    Ground every suggestion in the details the user provided. \
    Do NOT invent facts about the company or role.";

/// Application-insight prompt. Replace `{company}`, `{position}`,
/// `{requirements}` before sending.
pub const INSIGHTS_PROMPT_TEMPLATE: &str = r#"Analyze this job application and provide valuable insights:

Company: {company}
Position: {position}
Requirements: {requirements}

Please provide:
1. Key skills and qualifications needed
2. Potential interview topics to prepare for
3. Company culture insights
4. Growth opportunities
5. Tips for standing out in the application

Format the response in a clear, concise way."#;

/// Interview-question prompt. The response must be a numbered list — the
/// handler keeps numbered lines only.
pub const INTERVIEW_PREP_PROMPT_TEMPLATE: &str = r#"Generate relevant interview questions for this job application:

Position: {position}
Company: {company}
Requirements: {requirements}

Please provide 5-7 specific interview questions that:
1. Are tailored to this role and company
2. Cover both technical and behavioral aspects
3. Help assess the candidate's fit for the position
4. Are commonly asked in similar roles
5. Help evaluate the candidate's experience and skills

Return ONLY the questions as a numbered list, one per line."#;

/// System prompt for answer feedback — enforces JSON-only output.
pub const FEEDBACK_SYSTEM: &str = "You are an expert interviewer evaluating practice answers. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Answer-feedback prompt. Replace `{question_type}` and `{answer}` before
/// sending; the remaining braces are the required output schema.
pub const FEEDBACK_PROMPT_TEMPLATE: &str = r#"Analyze this interview answer for a {question_type} question:

"{answer}"

Provide feedback covering:
1. 2-3 key strengths in the answer
2. 2-3 specific areas for improvement
3. A detailed analysis of the answer's structure, clarity, and technical accuracy

Return a JSON object with this EXACT schema (no extra fields):
{
  "strengths": ["strength1", "strength2"],
  "improvements": ["improvement1", "improvement2"],
  "analysis": "detailed analysis text"
}"#;

/// Strategic-recommendation prompt. Replace `{position}`, `{company}`,
/// `{status}`, `{requirements}` before sending.
pub const RECOMMENDATIONS_PROMPT_TEMPLATE: &str = r#"Based on this job application, provide strategic recommendations:

Position: {position}
Company: {company}
Current Status: {status}
Requirements: {requirements}

Please provide specific recommendations for:
1. Next steps in the application process
2. How to stand out as a candidate
3. Skills to highlight or develop
4. Preparation strategies for upcoming stages
5. Potential questions to ask the employer

Format the response as a list of actionable recommendations, one per line."#;
