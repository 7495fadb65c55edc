//! Prompt templates sent to the hosted model providers.
//!
//! Both templates demand the exact section headers and severity markers
//! that `parsers::report` understands. The OpenAI template additionally
//! requests threat-intelligence fields for the vulnerabilities section;
//! those extra lines fold into issue descriptions during parsing.

/// System role for the OpenAI chat endpoint.
pub const OPENAI_SYSTEM_ROLE: &str = "You are a code analyzer. Always respond in the exact \
format specified, using the exact headers SECURITY VULNERABILITIES, CODE QUALITY and BEST \
PRACTICES. Always include severity levels (HIGH), (MEDIUM), or (LOW) before each issue.";

/// Analysis prompt for the OpenAI provider.
pub fn openai_prompt(code: &str) -> String {
    format!(
        "Analyze this code for vulnerabilities and provide a structured response.
Follow this EXACT format (keep the exact headers and structure):

SECURITY VULNERABILITIES:
(HIGH): [Issue title here]
[Description here]
Recommendation: [Mitigations linked with the vulnerability from attack.mitre.org]
CVE: [list all CVE numbers separated by comma]
APT-GROUPS: [list all linked APT groups separated by comma]
ATTACK NAME: [attack name from attack.mitre.org]
SUPPLY-CHAIN ATTACK: [linked supply-chain attack with affected companies, if any]
LINKED CODE: [the vulnerable line of code]

(MEDIUM): [Issue title here]
[Description here]
Recommendation: [Mitigations linked with the vulnerability from attack.mitre.org]
CVE: [list all CVE numbers separated by comma]
APT-GROUPS: [list all linked APT groups separated by comma]
ATTACK NAME: [attack name from attack.mitre.org]
SUPPLY-CHAIN ATTACK: [linked supply-chain attack with affected companies, if any]
LINKED CODE: [the vulnerable line of code]

CODE QUALITY:
(HIGH): [Issue title here]
[Description here]
Recommendation: [Fix here]

(MEDIUM): [Issue title here]
[Description here]
Recommendation: [Fix here]

BEST PRACTICES:
(HIGH): [Issue title here]
[Description here]
Recommendation: [Fix here]

Here's the code to analyze:
{code}
"
    )
}

/// Analysis prompt for the Gemini provider.
pub fn gemini_prompt(code: &str) -> String {
    format!(
        "Analyze this code for vulnerabilities and provide a structured response.
Follow this EXACT format (keep the exact headers and structure):

SECURITY VULNERABILITIES:
(HIGH): [Issue title here]
[Description here]
Recommendation: [Fix here]

(MEDIUM): [Issue title here]
[Description here]
Recommendation: [Fix here]

CODE QUALITY:
(HIGH): [Issue title here]
[Description here]
Recommendation: [Fix here]

(MEDIUM): [Issue title here]
[Description here]
Recommendation: [Fix here]

BEST PRACTICES:
(HIGH): [Issue title here]
[Description here]
Recommendation: [Fix here]

Here's the code to analyze:
{code}
"
    )
}
