//! Prompt templates for research helpers and debate turns

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// Keyword extraction prompt. The response is expected to be quoted
    /// phrases separated by spaces.
    pub fn keyword_extraction(topic: &str) -> String {
        format!(
            r#"You are a search query optimizer for academic paper and patent databases.
Convert the USER_INPUT into keyword phrases for literature search.

RULES:
1. Extract 2-5 core technical concepts (not individual words).
2. Wrap each concept in double quotes for exact phrase matching.
3. Separate phrases with spaces (no AND/OR operators).
4. Remove filler words (I want to, study about, etc.).
5. Translate to English if the input is in another language.
6. Only use concepts that appear in the input.
7. Output ONLY the phrases, no explanation.

EXAMPLES:
USER_INPUT: "I want to improve competitive analysis between companies using patent network analysis"
PHRASES: "patent network" "competitive analysis"

USER_INPUT: "deep learning based battery lifetime prediction"
PHRASES: "deep learning" "battery life prediction"

USER_INPUT: "{}"

PHRASES:"#,
            topic
        )
    }

    /// Synonyms for a single topic token.
    pub fn token_synonyms(token: &str, topic: &str) -> String {
        format!(
            r#"List up to 2 technical synonyms or abbreviations for the term "{}" as used in the research topic "{}".

RULES:
1. Each synonym must be at most 3 words.
2. Separate synonyms with commas.
3. Do not repeat the term itself.
4. Output ONLY the synonyms, no explanation.

SYNONYMS:"#,
            token, topic
        )
    }

    /// Alternative phrasings of the whole topic.
    pub fn topic_synonyms(topic: &str) -> String {
        format!(
            r#"Give up to 3 alternative technical phrasings of the research topic "{}" that a paper or patent title might use.

RULES:
1. One phrasing per line.
2. Each phrasing must be short (2-6 words).
3. Output ONLY the phrasings, no numbering or explanation.

PHRASINGS:"#,
            topic
        )
    }

    /// Ranking of N-1 keyword combinations. `combinations` are rendered
    /// query strings; they are listed with 1-based numbers.
    pub fn combination_ranking(topic: &str, combinations: &[String], select: usize) -> String {
        let mut prompt = format!(
            r#"You are selecting search queries for academic paper and patent search.

USER_INTENT: "{}"

Each candidate below drops one keyword from the full query:
"#,
            topic
        );

        for (i, combination) in combinations.iter().enumerate() {
            prompt.push_str(&format!("{}. {}\n", i + 1, combination));
        }

        prompt.push_str(&format!(
            r#"
RULES:
1. Select the {} candidates that best preserve the user's research intent.
2. Output ONLY their numbers, best first, separated by commas.

SELECTED:"#,
            select
        ));

        prompt
    }

    /// System prompt for one debate turn: persona prompt, retrieved context,
    /// topic and the length constraint.
    pub fn debate_system(persona_prompt: &str, context: &str, topic: &str, max_words: usize) -> String {
        format!(
            "{}\n\nCONTEXT FROM DATABASE:\n{}\n\nTOPIC: {} IMPORTANT: Keep response under {} words. Be direct.",
            persona_prompt, context, topic, max_words
        )
    }
}
