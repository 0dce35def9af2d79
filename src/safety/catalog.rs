// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Keyword and pattern catalogs for all detectors.
//!
//! Catalogs ship with built-in defaults and can be replaced wholesale or
//! per-section from a TOML file, so list content updates never require a
//! code change. Missing sections in a loaded file fall back to the built-in
//! list for that section.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Environment variable naming a TOML catalog file to load at startup.
pub const CATALOG_PATH_ENV: &str = "COMPANION_GUARD_CATALOGS";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse catalog file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid pattern in category {category}: {source}")]
    Pattern {
        category: String,
        #[source]
        source: regex::Error,
    },
}

/// Crisis phrase lists, one per crisis category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CrisisCatalog {
    pub suicide: Vec<String>,
    pub self_harm: Vec<String>,
    pub abuse_physical: Vec<String>,
    pub abuse_emotional: Vec<String>,
    pub abuse_sexual: Vec<String>,
}

impl Default for CrisisCatalog {
    fn default() -> Self {
        Self {
            suicide: words(&[
                "kill myself",
                "want to die",
                "wanna die",
                "end my life",
                "take my own life",
                "better off dead",
                "end it all",
                "don't want to live",
                "dont want to live",
                "no reason to live",
                "wish i was dead",
                "wish i were dead",
                "suicide",
                "suicidal",
            ]),
            self_harm: words(&[
                "hurt myself",
                "hurting myself",
                "cut myself",
                "cutting myself",
                "harm myself",
                "self harm",
                "self-harm",
                "burn myself",
                "starve myself",
                "stop eating on purpose",
                "make myself bleed",
            ]),
            abuse_physical: words(&[
                "hits me",
                "hit me",
                "beats me",
                "beat me",
                "punches me",
                "punched me",
                "kicks me",
                "kicked me",
                "slaps me",
                "slapped me",
                "hurts me",
                "threw me",
                "throws things at me",
                "leaves bruises",
                "gave me bruises",
            ]),
            abuse_emotional: words(&[
                "yells at me all the time",
                "screams at me",
                "calls me worthless",
                "calls me stupid",
                "says i'm worthless",
                "says im worthless",
                "tells me i'm nothing",
                "tells me im nothing",
                "says nobody loves me",
                "makes me feel worthless",
                "says i should never have been born",
            ]),
            abuse_sexual: words(&[
                "touches me",
                "touched me",
                "touching me",
                "inappropriate touching",
                "touches my private",
                "touched my private",
                "made me touch",
                "makes me touch",
                "shows me private parts",
                "showed me private parts",
                "makes me keep a secret about touching",
            ]),
        }
    }
}

/// Profanity word lists by severity tier. Entries are plain words; the
/// profanity detector expands each into an obfuscation-tolerant pattern.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfanityCatalog {
    pub mild: Vec<String>,
    pub moderate: Vec<String>,
    pub severe: Vec<String>,
}

impl Default for ProfanityCatalog {
    fn default() -> Self {
        Self {
            mild: words(&["damn", "darn", "dang", "crap", "hell", "sucks", "freakin"]),
            moderate: words(&[
                "shit", "ass", "asshole", "bitch", "bastard", "piss", "dick", "prick", "douche",
            ]),
            severe: words(&[
                "fuck",
                "fucking",
                "fucker",
                "motherfucker",
                "cunt",
                "cocksucker",
                "whore",
                "slut",
            ]),
        }
    }
}

/// Bullying phrase lists, one per bullying category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BullyingCatalog {
    pub threats: Vec<String>,
    pub physical: Vec<String>,
    pub cyberbullying: Vec<String>,
    pub verbal: Vec<String>,
    pub social_exclusion: Vec<String>,
    pub emotional_impact: Vec<String>,
}

impl Default for BullyingCatalog {
    fn default() -> Self {
        Self {
            threats: words(&[
                "threatened me",
                "threatens me",
                "said they would hurt me",
                "said they will hurt me",
                "going to beat me up",
                "gonna beat me up",
                "told me to watch my back",
                "said they would get me",
            ]),
            physical: words(&[
                "pushed me",
                "pushes me",
                "shoved me",
                "shoves me",
                "tripped me",
                "grabbed me",
                "knocked my books",
                "took my stuff",
                "takes my stuff",
                "broke my things",
            ]),
            cyberbullying: words(&[
                "mean messages",
                "mean texts",
                "posting about me",
                "posted about me",
                "spreading rumors online",
                "made a fake account about me",
                "sharing my photos without",
                "group chat making fun of me",
            ]),
            verbal: words(&[
                "bullying me",
                "bully me",
                "bullies me",
                "being bullied",
                "bullied me",
                "making fun of me",
                "makes fun of me",
                "calls me names",
                "called me names",
                "name calling",
                "teasing me",
                "teases me",
                "mocks me",
                "laughed at me",
            ]),
            social_exclusion: words(&[
                "won't let me play",
                "wont let me play",
                "excluded me",
                "excludes me",
                "left me out",
                "leave me out",
                "nobody will sit with me",
                "won't talk to me",
                "not invited",
                "ignores me at school",
            ]),
            emotional_impact: words(&[
                "don't want to go to school",
                "dont want to go to school",
                "scared to go to school",
                "afraid to go to school",
                "everyone hates me",
                "i have no friends",
                "feel so alone at school",
            ]),
        }
    }
}

/// Regex pattern lists for disallowed requests, one per request category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestCatalog {
    pub violence: Vec<String>,
    pub sexual: Vec<String>,
    pub illegal: Vec<String>,
    pub manipulation: Vec<String>,
    pub safety_bypass: Vec<String>,
    pub harmful_advice: Vec<String>,
    pub personal_info: Vec<String>,
}

impl Default for RequestCatalog {
    fn default() -> Self {
        Self {
            violence: words(&[
                r"how\s+(to|do\s+i)\s+(hurt|fight|attack|beat\s+up)\s+(someone|somebody|people|a\s+kid|them)",
                r"how\s+(to|do\s+i)\s+(make|build|get)\s+a?\s*(weapon|bomb|gun|knife)",
                r"ways?\s+to\s+hurt\s+(someone|somebody|people)",
                r"want\s+to\s+(hurt|punch|hit)\s+(him|her|them|someone)",
            ]),
            sexual: words(&[
                r"\bporn(ography)?\b",
                r"(naked|nude)\s+(pictures?|photos?|pics?)",
                r"send\s+(me\s+)?nudes",
                r"sexual\s+(stuff|things|content|pictures?)",
                r"(show|tell)\s+me\s+.*\bsexy\b",
            ]),
            illegal: words(&[
                r"how\s+(to|do\s+i)\s+(steal|shoplift|rob)",
                r"how\s+(to|do\s+i)\s+(buy|get|make)\s+(drugs|weed|vapes?|alcohol|cigarettes)",
                r"how\s+(to|do\s+i)\s+(hack|break\s+into)",
                r"(steal|take)\s+.*without\s+(paying|getting\s+caught)",
                r"how\s+(to|do\s+i)\s+cheat\s+on\s+(a\s+)?test",
            ]),
            manipulation: words(&[
                r"don'?t\s+tell\s+(your|the|my)\s+(parents|mom|dad|teacher)",
                r"keep\s+(this|it)\s+(a\s+)?secret\s+from",
                r"this\s+(stays|is)\s+between\s+us",
                r"if\s+you\s+(were\s+)?really\s+(were\s+)?my\s+friend\s+you\s+would",
                r"help\s+me\s+(trick|fool|lie\s+to)",
            ]),
            safety_bypass: words(&[
                r"ignore\s+(all\s+)?(previous|your)\s+(instructions?|rules?|guidelines?)",
                r"forget\s+(all\s+)?(previous|your)\s+(instructions?|rules?)",
                r"pretend\s+(you\s+have|there\s+are)\s+no\s+rules",
                r"(bypass|disable|turn\s+off)\s+(your\s+)?(safety|filters?|rules?)",
                r"\bjailbreak\b",
                r"act\s+as\s+if\s+you\s+(have|had)\s+no\s+(rules|filters?)",
            ]),
            harmful_advice: words(&[
                r"how\s+(much|many)\s+(pills?|medicine|medication)\s+(can|should|would)",
                r"is\s+it\s+ok\s+to\s+(not\s+eat|skip\s+meals|stop\s+eating)",
                r"how\s+(to|do\s+i)\s+(lose\s+weight\s+really\s+fast|throw\s+up\s+after\s+eating)",
                r"(drink|drinking|take|taking)\s+(bleach|poison|chemicals)",
                r"how\s+(to|do\s+i)\s+(choke|pass\s+out|hold\s+my\s+breath\s+until)",
            ]),
            personal_info: words(&[
                r"(tell|give)\s+me\s+your\s+(address|phone\s+number|password|full\s+name)",
                r"where\s+do\s+you\s+live",
                r"what\s+school\s+do\s+you\s+go\s+to",
                r"send\s+(me\s+)?a\s+(photo|picture)\s+of\s+you(rself)?",
                r"what'?s\s+your\s+(mom|dad|parent)'?s?\s+(credit\s+card|password)",
            ]),
        }
    }
}

/// All keyword and pattern lists consumed by the detectors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyCatalogs {
    pub crisis: CrisisCatalog,
    pub profanity: ProfanityCatalog,
    pub bullying: BullyingCatalog,
    pub requests: RequestCatalog,
}

impl SafetyCatalogs {
    /// Parse catalogs from TOML text. Sections absent from the text keep
    /// their built-in defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, CatalogError> {
        Ok(toml::from_str(s)?)
    }

    /// Load catalogs from a TOML file.
    pub fn from_toml_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Load catalogs from the path named by `COMPANION_GUARD_CATALOGS`,
    /// falling back to the built-in defaults when the variable is unset or
    /// the file cannot be loaded.
    pub fn load_default() -> Self {
        match std::env::var(CATALOG_PATH_ENV) {
            Ok(path) => Self::from_toml_path(&path).unwrap_or_else(|e| {
                warn!("Failed to load catalogs from {}: {}; using built-ins", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Per-category entry counts across all catalogs, for diagnostics.
    pub fn stats(&self) -> CatalogStats {
        let mut crisis_terms = BTreeMap::new();
        crisis_terms.insert("suicide".to_string(), self.crisis.suicide.len());
        crisis_terms.insert("self_harm".to_string(), self.crisis.self_harm.len());
        crisis_terms.insert("abuse_physical".to_string(), self.crisis.abuse_physical.len());
        crisis_terms.insert(
            "abuse_emotional".to_string(),
            self.crisis.abuse_emotional.len(),
        );
        crisis_terms.insert("abuse_sexual".to_string(), self.crisis.abuse_sexual.len());

        let mut profanity_terms = BTreeMap::new();
        profanity_terms.insert("mild".to_string(), self.profanity.mild.len());
        profanity_terms.insert("moderate".to_string(), self.profanity.moderate.len());
        profanity_terms.insert("severe".to_string(), self.profanity.severe.len());

        let mut bullying_terms = BTreeMap::new();
        bullying_terms.insert("threats".to_string(), self.bullying.threats.len());
        bullying_terms.insert("physical".to_string(), self.bullying.physical.len());
        bullying_terms.insert("cyberbullying".to_string(), self.bullying.cyberbullying.len());
        bullying_terms.insert("verbal".to_string(), self.bullying.verbal.len());
        bullying_terms.insert(
            "social_exclusion".to_string(),
            self.bullying.social_exclusion.len(),
        );
        bullying_terms.insert(
            "emotional_impact".to_string(),
            self.bullying.emotional_impact.len(),
        );

        let mut request_patterns = BTreeMap::new();
        request_patterns.insert("violence".to_string(), self.requests.violence.len());
        request_patterns.insert("sexual".to_string(), self.requests.sexual.len());
        request_patterns.insert("illegal".to_string(), self.requests.illegal.len());
        request_patterns.insert("manipulation".to_string(), self.requests.manipulation.len());
        request_patterns.insert("safety_bypass".to_string(), self.requests.safety_bypass.len());
        request_patterns.insert(
            "harmful_advice".to_string(),
            self.requests.harmful_advice.len(),
        );
        request_patterns.insert("personal_info".to_string(), self.requests.personal_info.len());

        CatalogStats {
            crisis_terms,
            profanity_terms,
            bullying_terms,
            request_patterns,
        }
    }
}

/// Per-category entry counts, reported through `service_stats`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogStats {
    pub crisis_terms: BTreeMap<String, usize>,
    pub profanity_terms: BTreeMap<String, usize>,
    pub bullying_terms: BTreeMap<String, usize>,
    pub request_patterns: BTreeMap<String, usize>,
}

fn words(entries: &[&str]) -> Vec<String> {
    entries.iter().map(|w| w.to_string()).collect()
}
