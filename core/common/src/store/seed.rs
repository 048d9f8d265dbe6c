//! 組み込みのシードデータ（キュレーション済みのプロンプト例）
//!
//! ストレージに保存済みのコレクションが無い（または壊れている）ときの初期値。
//! - コミュニティ: カタログ全件からメトリクスを外したもの
//! - 個人: カタログ先頭の数件（作者・メトリクス・公開フラグなし）

use crate::domain::{Category, Prompt, PromptId};
use chrono::{DateTime, Utc};

/// シードカタログの作者ラベル
pub const SEED_AUTHOR: &str = "GeniusPrompt Team";

/// 旧バージョンがシードに付けていた作者ラベル。読み込み時にメトリクスを外す対象
pub const LEGACY_SEED_AUTHOR: &str = "IntelliBot";

/// 個人ライブラリの初期件数
const PERSONAL_SEED_COUNT: usize = 3;

struct SeedEntry {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    content: &'static str,
    category: Category,
    created_at: &'static str,
    rating: f64,
    downloads: u64,
}

const CATALOG: &[SeedEntry] = &[
    SeedEntry {
        id: "ideal-1",
        title: "Persuasive Launch Email Sequence",
        description: "A three-email product launch sequence built on neuro-copywriting techniques.",
        content: "Act as a neuro-copywriting expert specialised in e-commerce. Write a sequence of three persuasive emails for the launch of 'EcoGlow', a sustainable skincare product.\n- Email 1 (Opening): use the Zeigarnik effect by leaving a story about the environmental cost of conventional products unfinished.\n- Email 2 (Development): apply social proof with an early-adopter testimonial and market statistics on sustainable products.\n- Email 3 (Close and CTA): apply urgency with a limited pre-order discount.\nFormat: each email has a compelling subject line, a 150-200 word body and one clear call to action. Tone: professional, inspiring and direct.",
        category: Category::Marketing,
        created_at: "2024-07-01T10:00:00Z",
        rating: 4.9,
        downloads: 1250,
    },
    SeedEntry {
        id: "ideal-2",
        title: "Differentiated Lesson Plan on UX Basics",
        description: "A 60-minute lesson plan with activities for three proficiency levels.",
        content: "Act as an instructional designer for digital education. Create a 60-minute lesson plan introducing UI/UX fundamentals to first-year design students.\n1. State three measurable learning objectives.\n2. Design one activity per level: basic (key-term brainstorm), intermediate (usability review of an existing interface), advanced (low-fidelity prototype for a given usability problem).\n3. Add a five-minute formative assessment.\nOutput as a Markdown table with columns: time, activity, level, materials, expected outcome.",
        category: Category::Education,
        created_at: "2024-07-02T09:30:00Z",
        rating: 4.8,
        downloads: 830,
    },
    SeedEntry {
        id: "ideal-3",
        title: "Weekly Personal-Finance Content Calendar",
        description: "An Instagram calendar for a personal-finance brand with ready-to-post copy.",
        content: "Act as a social media strategist for a personal-finance brand targeting young professionals. Build a one-week Instagram content calendar.\nFor each day include: recommended posting time, content type (carousel, reel, story, infographic, Q&A), topic (e.g. saving for a first home, index funds for beginners).\nWrite persuasive copy for two of the posts using social proof or scarcity and a clear CTA.\nReturn a Markdown table followed by the two copies.",
        category: Category::SocialMedia,
        created_at: "2024-07-03T11:00:00Z",
        rating: 4.7,
        downloads: 400,
    },
    SeedEntry {
        id: "ideal-4",
        title: "Executive Brief on Quantum-Safe Security",
        description: "A structured white-paper outline on quantum computing and cybersecurity.",
        content: "Act as a senior cybersecurity analyst writing for a board of directors. Draft an executive brief on the impact of quantum computing on cybersecurity.\nCover: current state, threats to RSA and ECC, post-quantum cryptography and QKD opportunities, geopolitical and economic implications, and five concrete recommendations for the next 24 months.\nKeep it under 900 words, use headings, and avoid unexplained jargon.",
        category: Category::Writing,
        created_at: "2024-07-04T08:15:00Z",
        rating: 4.6,
        downloads: 610,
    },
    SeedEntry {
        id: "ideal-5",
        title: "Sustainable Product Concept Generator",
        description: "Five product concepts with USPs, sustainability angle and audience.",
        content: "Act as a product innovation consultant. Propose five concepts for sustainable consumer products in the home-care market.\nFor each concept give: a catchy name, a one-paragraph concept, unique selling points, the sustainable component (ingredients, packaging or supply chain), target audience and typical usage moments.\nRank the concepts by feasibility and explain the ranking in two sentences.",
        category: Category::Creativity,
        created_at: "2024-07-05T14:45:00Z",
        rating: 4.5,
        downloads: 290,
    },
    SeedEntry {
        id: "ideal-6",
        title: "EV Market Trend Analysis",
        description: "Turn raw market facts into an analyst-grade trend report.",
        content: "Act as a market data analyst. Using the facts below, write a trend analysis of the electric-vehicle market.\nFacts: 2023 global EV share 14% with China at 60% of sales; 2024 projected share 18%; battery costs falling 15% per year; charging infrastructure gaps; solid-state battery advances.\nDeliver: three key trends, two risks, one contrarian view, and a table of indicators to monitor quarterly.",
        category: Category::DataAnalysis,
        created_at: "2024-07-06T16:20:00Z",
        rating: 4.7,
        downloads: 520,
    },
    SeedEntry {
        id: "ideal-7",
        title: "Robust Database Access Function",
        description: "A Python function with connection handling, parameterised queries and logging.",
        content: "Act as a senior Python engineer. Write a function get_user_data(username, db_config) that connects to PostgreSQL, selects the user's row with a parameterised query and returns it as a dict.\nRequirements: handle connection errors, SQL errors and missing users separately; log errors to a file; close resources in all paths; include type hints and a docstring.\nAfter the code, list three unit tests you would write.",
        category: Category::Coding,
        created_at: "2024-07-07T12:00:00Z",
        rating: 4.9,
        downloads: 1430,
    },
    SeedEntry {
        id: "ideal-8",
        title: "Research Proposal Critical Review",
        description: "Evaluate a study proposal for relevance, feasibility, impact and ethics.",
        content: "Act as a peer reviewer for an educational-technology journal. Review the research proposal I will paste below.\nStart with a short overall critique, then assess relevance, feasibility, potential impact and ethical considerations as bulleted strengths, weaknesses and improvements.\nFinish with five concrete suggestions to strengthen methodological rigour.",
        category: Category::Research,
        created_at: "2024-07-08T10:10:00Z",
        rating: 4.4,
        downloads: 210,
    },
    SeedEntry {
        id: "ideal-9",
        title: "SWOT Analysis for a Growing Startup",
        description: "A structured SWOT with prioritised strategic actions.",
        content: "Act as a strategy consultant. Perform a SWOT analysis for a 40-person SaaS startup selling scheduling software to clinics.\nPresent the SWOT as a 2x2 Markdown table, then derive three SO and three WT strategies.\nClose with a 90-day action plan ordered by impact and effort.",
        category: Category::Business,
        created_at: "2024-07-09T15:30:00Z",
        rating: 4.6,
        downloads: 700,
    },
    SeedEntry {
        id: "ideal-10",
        title: "Serverless Explained for SMEs",
        description: "Explain serverless computing to non-technical business owners.",
        content: "Act as a cloud architect who is great at explaining technology to non-technical audiences. Explain serverless computing to owners of small and medium businesses.\nInclude: a simple analogy, cost and scalability benefits, three common use cases (event processing, APIs, chatbots) and when serverless is not the right choice.\nKeep it under 600 words with short paragraphs.",
        category: Category::Technology,
        created_at: "2024-07-10T09:00:00Z",
        rating: 4.5,
        downloads: 480,
    },
    SeedEntry {
        id: "ideal-11",
        title: "Guided Mindfulness Script",
        description: "A ten-minute guided meditation script for stress relief.",
        content: "Act as a certified mindfulness instructor. Write a ten-minute guided meditation script for office workers under stress.\nStructure: introduction and posture, body scan or breath anchor, awareness of sounds, observing thoughts without judgement, an optional calming visualisation, and a gentle close.\nMark suggested pauses in brackets, e.g. [pause 10s].",
        category: Category::Health,
        created_at: "2024-07-11T07:45:00Z",
        rating: 4.8,
        downloads: 950,
    },
    SeedEntry {
        id: "ideal-12",
        title: "Financial Ratio Health Check",
        description: "Compute and interpret key ratios from a simplified balance sheet.",
        content: "Act as a financial analyst. From the figures below compute liquidity, solvency and profitability ratios and interpret each one.\nCurrent assets $500M; non-current assets $1,000M; current liabilities $300M; non-current liabilities $400M; equity $800M; revenue $1,200M; cost of sales $600M; operating expenses $300M; financial expenses $50M; taxes $50M.\nPresent the ratios in a table and end with an overall assessment and two recommendations.",
        category: Category::Finance,
        created_at: "2024-07-12T13:00:00Z",
        rating: 4.6,
        downloads: 560,
    },
    SeedEntry {
        id: "ideal-13",
        title: "Ten-Day Cultural Itinerary",
        description: "A day-by-day travel plan balancing culture, food and rest.",
        content: "Act as a travel planner specialised in cultural trips. Create a ten-day itinerary through southern Spain for a couple interested in history and gastronomy.\nFor each day list: city, two or three main activities, accommodation style (no brand names), local dishes to try, and practical tips (bookings, transport, best visiting hours).\nReturn a Markdown table plus a short packing list.",
        category: Category::Travel,
        created_at: "2024-07-13T17:00:00Z",
        rating: 4.7,
        downloads: 640,
    },
    SeedEntry {
        id: "ideal-14",
        title: "Design Project Assessment Rubric",
        description: "A four-level rubric for evaluating sustainable design projects.",
        content: "Act as a design educator. Build an assessment rubric for a sustainable packaging design project.\nCriteria: research, concept originality, sustainability, visual execution, presentation. Levels: excellent, proficient, developing, beginning.\nDescribe clearly what is expected at each level and make the rubric usable for both self and peer assessment.",
        category: Category::Design,
        created_at: "2024-07-14T11:20:00Z",
        rating: 4.5,
        downloads: 330,
    },
    SeedEntry {
        id: "ideal-15",
        title: "Structured Model-Debugging Dialogue",
        description: "A multi-turn prompt that diagnoses a degrading classifier step by step.",
        content: "Act as a machine-learning engineer mentoring a junior team. A spam classifier that performed well on historical data is degrading on new emails.\nLet's think step by step. First ask the diagnostic questions you need answered (performance trend, independent validation set, failure examples, data drift, label consistency, metrics used, train vs test accuracy).\nThen, once answered, propose a prioritised remediation plan.",
        category: Category::Other,
        created_at: "2024-07-15T10:00:00Z",
        rating: 4.3,
        downloads: 180,
    },
];

fn parse_ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|d| d.with_timezone(&Utc))
        .unwrap_or_default()
}

/// シードカタログ全件（作者・メトリクス付き）
pub fn seed_catalog() -> Vec<Prompt> {
    CATALOG
        .iter()
        .map(|e| Prompt {
            id: PromptId::new(e.id),
            title: e.title.to_string(),
            description: e.description.to_string(),
            content: e.content.to_string(),
            category: e.category,
            created_at: parse_ts(e.created_at),
            author: Some(SEED_AUTHOR.to_string()),
            rating: Some(e.rating),
            downloads: Some(e.downloads),
            is_favorite: false,
            is_published: true,
        })
        .collect()
}

/// コミュニティの初期値: カタログからメトリクスを外したもの
pub fn seed_community() -> Vec<Prompt> {
    seed_catalog().iter().map(Prompt::without_metrics).collect()
}

/// 個人ライブラリの初期値: カタログ先頭の数件を個人の未公開エントリとして
pub fn seed_personal() -> Vec<Prompt> {
    seed_catalog()
        .into_iter()
        .take(PERSONAL_SEED_COUNT)
        .map(|p| Prompt {
            author: None,
            rating: None,
            downloads: None,
            is_favorite: false,
            is_published: false,
            ..p
        })
        .collect()
}

/// id がシードカタログに含まれるか
pub fn is_seed_id(id: &PromptId) -> bool {
    CATALOG.iter().any(|e| e.id == id.as_str())
}
