//! Prompt templates for the Gemini rewrite calls.
//!
//! Builders are pure functions: identical input produces byte-identical
//! output. The templates insist on bare JSON output; the sanitizer in
//! `response` handles the model ignoring that anyway.

use crate::models::IeltsLevel;

/// Writing criteria embedded into the prompt for each target band.
fn level_criteria(level: IeltsLevel) -> &'static str {
    match level {
        IeltsLevel::Band6 => {
            "\
- Simple and compound sentences
- Common everyday vocabulary
- Basic connectors (and, but, because)
- Some grammatical errors acceptable
- Clear but simple expression"
        }
        IeltsLevel::Band7 => {
            "\
- Mix of simple and complex sentences
- Good range of vocabulary with some less common words
- Various linking words (however, moreover, consequently)
- Occasional errors that don't impede understanding
- Clear and coherent expression"
        }
        IeltsLevel::Band8 => {
            "\
- Wide range of complex structures
- Sophisticated vocabulary and collocations
- Flexible use of advanced connectors
- Rare minor errors
- Natural and fluent expression"
        }
        IeltsLevel::Band9 => {
            "\
- Full range of structures with flexibility
- Precise and natural vocabulary (idiomatic expressions)
- Seamless coherence and cohesion
- No noticeable errors
- Native-like fluency"
        }
    }
}

/// Stock phrases the model reaches for when asked to sound academic.
/// A diary rewrite should not read like an essay, so they are banned.
const BANNED_PHRASES: &str = "\
\"Furthermore\", \"Moreover\", \"In conclusion\", \"It is worth noting that\", \
\"delve into\", \"a plethora of\", \"a myriad of\", \"utilize\", \"commence\", \"endeavor\"";

/// Build the prompt for a basic rewrite: text plus new vocabulary.
pub fn rewrite_prompt(text: &str, level: IeltsLevel) -> String {
    format!(
        r#"You are an IELTS Writing Assessment Expert with 15+ years of experience.

**TASK**: Rewrite the user's text to match IELTS Band {level} standards.

**IELTS BAND {level} CRITERIA**:
{criteria}

**IMPORTANT RULES**:
1. Preserve the original meaning and context
2. Identify words/phrases YOU ADDED that weren't in the original text
3. Only list vocabulary that is NEW or more advanced than the original
4. Provide Turkish meanings for Turkish speakers
5. Return ONLY valid JSON, no markdown, no explanations

**OUTPUT FORMAT** (strict JSON):
{{
  "rewritten_text": "The rewritten text at IELTS {level} level",
  "new_words": [
    {{
      "english_word": "sophisticated",
      "turkish_meaning": "sofistike, gelişmiş"
    }}
  ]
}}

**EXAMPLE INPUT**: "I went to park yesterday. It was nice."

**EXAMPLE OUTPUT FOR IELTS 8**:
{{
  "rewritten_text": "Yesterday, I visited the local park, where I found the atmosphere remarkably serene and rejuvenating.",
  "new_words": [
    {{
      "english_word": "remarkably",
      "turkish_meaning": "oldukça, dikkat çekici şekilde"
    }},
    {{
      "english_word": "serene",
      "turkish_meaning": "huzurlu, sakin"
    }},
    {{
      "english_word": "rejuvenating",
      "turkish_meaning": "canlandırıcı, yenileyici"
    }}
  ]
}}

**USER TEXT TO REWRITE**:
{text}

**TARGET LEVEL**: IELTS {level}

Return ONLY the JSON object, nothing else."#,
        level = level,
        criteria = level_criteria(level),
        text = text,
    )
}

/// Build the prompt for an upgrade rewrite: text, grammar corrections,
/// vocabulary, writing tips, strengths, weaknesses, and overall feedback.
pub fn rewrite_upgrade_prompt(text: &str, level: IeltsLevel) -> String {
    format!(
        r#"You are an IELTS Writing Assessment Expert with 15+ years of experience.

**TASK**: Rewrite the user's diary text to match IELTS Band {level} standards and
assess the original writing.

**IELTS BAND {level} CRITERIA**:
{criteria}

**TONE**: This is a personal diary entry, not an academic essay. Keep the
rewrite natural and personal. Do NOT use any of these phrases:
{banned}

**IMPORTANT RULES**:
1. Preserve the original meaning and context
2. List every grammar mistake in the original with its correction and a short explanation
3. Identify words/phrases YOU ADDED that weren't in the original text
4. Provide Turkish meanings for Turkish speakers
5. Give concrete writing tips, strengths, and weaknesses of the ORIGINAL text
6. Finish with one overall feedback sentence about the original text
7. Return ONLY valid JSON, no markdown, no explanations

**OUTPUT FORMAT** (strict JSON):
{{
  "rewritten_text": "The rewritten text at IELTS {level} level",
  "grammar_corrections": [
    {{
      "original": "to park",
      "corrected": "to the park",
      "explanation": "Missing definite article 'the'"
    }}
  ],
  "new_words": [
    {{
      "english_word": "contemplate",
      "turkish_meaning": "derin düşünmek"
    }}
  ],
  "writing_tips": ["Use articles correctly before singular countable nouns."],
  "strengths": ["The meaning is clear."],
  "weaknesses": ["Limited vocabulary range."],
  "overall_feedback": "Clear but basic; vocabulary and accuracy need work for Band {level}."
}}

**EXAMPLE INPUT**: "I went to park yesterday. It was nice."

**EXAMPLE OUTPUT FOR IELTS 8**:
{{
  "rewritten_text": "Yesterday, I wandered over to the local park, and the calm atmosphere there left me feeling wonderfully refreshed.",
  "grammar_corrections": [
    {{
      "original": "to park",
      "corrected": "to the park",
      "explanation": "Missing definite article 'the'"
    }}
  ],
  "new_words": [
    {{
      "english_word": "wandered",
      "turkish_meaning": "gezinmek, dolaşmak"
    }},
    {{
      "english_word": "refreshed",
      "turkish_meaning": "tazelenmiş, dinlenmiş"
    }}
  ],
  "writing_tips": [
    "Use articles (a, an, the) correctly before singular countable nouns.",
    "Try combining short sentences into complex structures."
  ],
  "strengths": [
    "The meaning is clear.",
    "The sentence structure is understandable."
  ],
  "weaknesses": [
    "Limited vocabulary range.",
    "Missing article usage."
  ],
  "overall_feedback": "The text is clear but basic. Vocabulary and grammatical accuracy need improvement to reach Band 8."
}}

**USER TEXT TO REWRITE**:
{text}

**TARGET LEVEL**: IELTS {level}

Return ONLY the JSON object, nothing else."#,
        level = level,
        criteria = level_criteria(level),
        banned = BANNED_PHRASES,
        text = text,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_prompt_is_deterministic() {
        for level in IeltsLevel::ALL {
            let first = rewrite_prompt("Today I went to the park.", level);
            let second = rewrite_prompt("Today I went to the park.", level);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_rewrite_prompt_embeds_text_and_level() {
        for level in IeltsLevel::ALL {
            let prompt = rewrite_prompt("Today I went to the park.", level);
            assert!(prompt.contains("Today I went to the park."));
            assert!(prompt.contains(&format!("IELTS Band {} standards", level)));
            assert!(prompt.contains(&format!("**TARGET LEVEL**: IELTS {}", level)));
        }
    }

    #[test]
    fn test_upgrade_prompt_is_deterministic() {
        for level in IeltsLevel::ALL {
            let first = rewrite_upgrade_prompt("Today I went to the park.", level);
            let second = rewrite_upgrade_prompt("Today I went to the park.", level);
            assert_eq!(first, second);
            assert!(first.contains("Today I went to the park."));
        }
    }

    #[test]
    fn test_upgrade_prompt_covers_all_response_keys() {
        let prompt = rewrite_upgrade_prompt("Today I went to the park.", IeltsLevel::Band7);
        for key in [
            "rewritten_text",
            "grammar_corrections",
            "new_words",
            "writing_tips",
            "strengths",
            "weaknesses",
            "overall_feedback",
        ] {
            assert!(prompt.contains(key), "prompt is missing key {}", key);
        }
        assert!(prompt.contains("Do NOT use any of these phrases"));
    }
}
