// File: src/fallback.rs
use crate::core::engine::Classifier;
use crate::core::types::{Category, Classification};
use once_cell::sync::Lazy;

/// The twenty 20-Newsgroups labels the keyword table can produce.
pub const NEWSGROUP_CATEGORIES: [&str; 20] = [
    "alt.atheism",
    "comp.graphics",
    "comp.os.ms-windows.misc",
    "comp.sys.ibm.pc.hardware",
    "comp.sys.mac.hardware",
    "comp.windows.x",
    "misc.forsale",
    "rec.autos",
    "rec.motorcycles",
    "rec.sport.baseball",
    "rec.sport.hockey",
    "sci.crypt",
    "sci.electronics",
    "sci.med",
    "sci.space",
    "soc.religion.christian",
    "talk.politics.guns",
    "talk.politics.mideast",
    "talk.politics.misc",
    "talk.religion.misc",
];

struct Rule {
    keywords: &'static [&'static str],
    category: &'static str,
    confidence: f64,
}

/// A topic group: when any trigger matches, the first matching rule decides,
/// and `otherwise` applies if none does.
struct RuleGroup {
    triggers: &'static [&'static str],
    rules: &'static [Rule],
    otherwise: (&'static str, f64),
}

const RULE_GROUPS: &[RuleGroup] = &[
    RuleGroup {
        triggers: &["computer", "software", "hardware", "graphics", "windows", "mac", "system"],
        rules: &[
            Rule { keywords: &["graphics"], category: "comp.graphics", confidence: 0.85 },
            Rule { keywords: &["windows"], category: "comp.os.ms-windows.misc", confidence: 0.82 },
            Rule { keywords: &["mac"], category: "comp.sys.mac.hardware", confidence: 0.88 },
        ],
        otherwise: ("comp.sys.ibm.pc.hardware", 0.75),
    },
    RuleGroup {
        triggers: &["baseball", "hockey", "game", "team", "player", "season"],
        rules: &[
            Rule { keywords: &["baseball"], category: "rec.sport.baseball", confidence: 0.90 },
            Rule { keywords: &["hockey"], category: "rec.sport.hockey", confidence: 0.87 },
        ],
        otherwise: ("rec.sport.baseball", 0.70),
    },
    RuleGroup {
        triggers: &["science", "research", "study", "data", "space", "mars", "medical"],
        rules: &[
            Rule { keywords: &["space", "mars"], category: "sci.space", confidence: 0.92 },
            Rule { keywords: &["medical", "health"], category: "sci.med", confidence: 0.85 },
            Rule { keywords: &["electronic"], category: "sci.electronics", confidence: 0.80 },
        ],
        otherwise: ("sci.space", 0.75),
    },
    RuleGroup {
        triggers: &["god", "religion", "church", "christian", "bible", "faith"],
        rules: &[
            Rule { keywords: &["christian", "church"], category: "soc.religion.christian", confidence: 0.88 },
            Rule { keywords: &["atheism", "atheist"], category: "alt.atheism", confidence: 0.85 },
        ],
        otherwise: ("talk.religion.misc", 0.75),
    },
    RuleGroup {
        triggers: &["politics", "government", "policy", "election", "gun", "rights"],
        rules: &[
            Rule { keywords: &["gun"], category: "talk.politics.guns", confidence: 0.85 },
            Rule { keywords: &["mideast", "middle east"], category: "talk.politics.mideast", confidence: 0.80 },
        ],
        otherwise: ("talk.politics.misc", 0.72),
    },
    RuleGroup {
        triggers: &["car", "auto", "motorcycle", "engine", "drive"],
        rules: &[Rule { keywords: &["motorcycle"], category: "rec.motorcycles", confidence: 0.85 }],
        otherwise: ("rec.autos", 0.80),
    },
    RuleGroup {
        triggers: &["sale", "sell", "buy", "price", "offer"],
        rules: &[],
        otherwise: ("misc.forsale", 0.75),
    },
];

const DEFAULT_VERDICT: (&str, f64) = ("misc.forsale", 0.60);

static CATEGORY_LIST: Lazy<Vec<Category>> =
    Lazy::new(|| NEWSGROUP_CATEGORIES.iter().map(|c| c.to_string()).collect());

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Substring-based rule classifier used when no trained model is available.
/// It looks at the raw lowercased text, not at normalized tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }

    fn verdict(&self, text: &str) -> (&'static str, f64) {
        let lowered = text.to_lowercase();
        for group in RULE_GROUPS {
            if !contains_any(&lowered, group.triggers) {
                continue;
            }
            return group
                .rules
                .iter()
                .find(|rule| contains_any(&lowered, rule.keywords))
                .map(|rule| (rule.category, rule.confidence))
                .unwrap_or(group.otherwise);
        }
        DEFAULT_VERDICT
    }
}

impl Classifier for KeywordClassifier {
    // Rules match on the raw lowercased text, not on normalized tokens.
    fn classify_tokens(&self, text: &str, _tokens: &[String]) -> Classification {
        let (category, confidence) = self.verdict(text);
        Classification {
            category: category.to_string(),
            confidence,
        }
    }

    fn categories(&self) -> &[Category] {
        &CATEGORY_LIST
    }

    fn name(&self) -> &'static str {
        "keyword-fallback"
    }
}
