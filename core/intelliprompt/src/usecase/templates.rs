//! スターターテンプレート（generate のアイデア雛形）
//!
//! `[topic]` のような角括弧の部分はユーザーが埋めるプレースホルダ。

use common::domain::Category;
use common::error::Error;
use regex::Regex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarterTemplate {
    pub name: &'static str,
    pub category: Category,
    pub idea: &'static str,
}

const TEMPLATES: &[StarterTemplate] = &[
    StarterTemplate {
        name: "Social Media",
        category: Category::SocialMedia,
        idea: "Create a series of 3 Instagram posts about [topic], aimed at [audience]. The tone should be [tone, e.g. fun, inspiring].",
    },
    StarterTemplate {
        name: "Blog",
        category: Category::Writing,
        idea: "Write a 500-word blog article draft about [main topic]. Include an introduction, 3 key points and a conclusion. The SEO keyword is '[keyword]'.",
    },
    StarterTemplate {
        name: "Code",
        category: Category::Coding,
        idea: "Generate a function in [language, e.g. JavaScript] that [purpose of the function, e.g. 'converts an object into an array of its values']. It must include comments explaining the logic.",
    },
    StarterTemplate {
        name: "Slogans",
        category: Category::Marketing,
        idea: "Generate 5 creative slogans for a [product type] brand called [brand name].",
    },
    StarterTemplate {
        name: "SWOT Analysis",
        category: Category::Business,
        idea: "Perform a SWOT analysis (Strengths, Weaknesses, Opportunities, Threats) for a company that [describe the company].",
    },
    StarterTemplate {
        name: "Short Story",
        category: Category::Creativity,
        idea: "Propose 3 ideas for a [genre, e.g. science fiction] short story involving [a type of character] and [a mysterious object].",
    },
    StarterTemplate {
        name: "Lesson Plan",
        category: Category::Education,
        idea: "Create a 60-minute lesson plan about [topic] for [education level] students. Include learning objectives, activities and an assessment method.",
    },
    StarterTemplate {
        name: "SQL Query",
        category: Category::DataAnalysis,
        idea: "Write an SQL query for [database, e.g. PostgreSQL] that selects [columns] from the table [table_name] where [condition].",
    },
    StarterTemplate {
        name: "Article Summary",
        category: Category::Research,
        idea: "Summarise the key points, methodology and conclusions of the following research text: [paste text or abstract here].",
    },
    StarterTemplate {
        name: "Technical Explanation",
        category: Category::Technology,
        idea: "Explain the concept of [technology concept, e.g. 'Serverless Computing'] to a [audience type, e.g. non-technical] audience, using simple analogies.",
    },
    StarterTemplate {
        name: "Meal Plan",
        category: Category::Health,
        idea: "Create a healthy 3-day meal plan for a person who wants to [goal, e.g. lose weight], with options for breakfast, lunch and dinner.",
    },
    StarterTemplate {
        name: "Financial Email",
        category: Category::Finance,
        idea: "Write an email to a client explaining the advantages of [financial product, e.g. an index fund]. The tone should be clear and trustworthy.",
    },
    StarterTemplate {
        name: "Travel Itinerary",
        category: Category::Travel,
        idea: "Create a [number of days]-day itinerary for a trip to [destination], focused on [interests, e.g. culture, adventure, food].",
    },
    StarterTemplate {
        name: "Design Brief",
        category: Category::Design,
        idea: "Prepare a design brief for a logo for a [product type] brand called [name]. The brand should convey [values, e.g. elegance, modernity].",
    },
    StarterTemplate {
        name: "General Ideas",
        category: Category::Other,
        idea: "Generate a list of 5 ideas about [topic].",
    },
];

/// 名前順の全テンプレート
pub fn starter_templates() -> Vec<&'static StarterTemplate> {
    let mut all: Vec<&StarterTemplate> = TEMPLATES.iter().collect();
    all.sort_by_key(|t| t.name.to_lowercase());
    all
}

/// 名前で探す（大文字小文字・区切りの `-` `_` は区別しない）
pub fn find_template(name: &str) -> Result<&'static StarterTemplate, Error> {
    let wanted = normalize(name);
    TEMPLATES
        .iter()
        .find(|t| normalize(t.name) == wanted)
        .ok_or_else(|| {
            Error::invalid_argument(format!(
                "Unknown template '{}'. Run `intelliprompt templates` to list them.",
                name
            ))
        })
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase().replace(['-', '_'], " ")
}

/// アイデア中の未記入プレースホルダ（角括弧の中身）を出現順に返す
pub fn placeholders(idea: &str) -> Result<Vec<String>, Error> {
    let re = Regex::new(r"\[([^\[\]]+)\]")
        .map_err(|e| Error::system(format!("placeholder pattern: {}", e)))?;
    Ok(re
        .captures_iter(idea)
        .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
        .collect())
}
