// src/persona.rs
use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// The fixed set of reader archetypes sections are ranked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    Executive,
    Technical,
    Marketing,
    Investor,
}

impl Persona {
    pub const ALL: [Persona; 4] = [
        Persona::Executive,
        Persona::Technical,
        Persona::Marketing,
        Persona::Investor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Persona::Executive => "executive",
            Persona::Technical => "technical",
            Persona::Marketing => "marketing",
            Persona::Investor => "investor",
        }
    }

    pub fn profile(&self) -> &'static PersonaProfile {
        match self {
            Persona::Executive => &EXECUTIVE,
            Persona::Technical => &TECHNICAL,
            Persona::Marketing => &MARKETING,
            Persona::Investor => &INVESTOR,
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Persona {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Persona::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown persona: {}", s))
    }
}

/// Keyword and priority-phrase lists for one persona. Order matters for
/// `priority_sections`: the first phrase found in a title wins the bonus.
#[derive(Debug)]
pub struct PersonaProfile {
    pub keywords: &'static [&'static str],
    pub priority_sections: &'static [&'static str],
}

static EXECUTIVE: PersonaProfile = PersonaProfile {
    keywords: &["strategy", "business", "revenue", "growth", "market", "leadership", "vision"],
    priority_sections: &["executive summary", "business model", "market analysis", "financial projections"],
};

static TECHNICAL: PersonaProfile = PersonaProfile {
    keywords: &["technology", "implementation", "architecture", "code", "development", "technical", "api"],
    priority_sections: &["technical architecture", "implementation details", "code examples", "system design"],
};

static MARKETING: PersonaProfile = PersonaProfile {
    keywords: &["marketing", "brand", "customer", "user", "growth", "acquisition", "engagement"],
    priority_sections: &["marketing strategy", "user acquisition", "customer journey", "brand positioning"],
};

static INVESTOR: PersonaProfile = PersonaProfile {
    keywords: &["investment", "funding", "financial", "roi", "valuation", "exit", "returns"],
    priority_sections: &["financial projections", "business model", "market opportunity", "investment thesis"],
};

/// Looks up a profile by persona name. Unknown names yield `None`.
pub fn profile_for(name: &str) -> Option<&'static PersonaProfile> {
    name.parse::<Persona>().ok().map(|p| p.profile())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip_through_from_str() {
        for persona in Persona::ALL {
            assert_eq!(persona.as_str().parse::<Persona>(), Ok(persona));
            assert_eq!(persona.to_string(), persona.as_str());
        }
        assert!("cfo".parse::<Persona>().is_err());
        assert!("Executive".parse::<Persona>().is_err(), "names are lowercase only");
    }

    #[test]
    fn test_profiles_are_lowercase_and_non_empty() {
        for persona in Persona::ALL {
            let profile = persona.profile();
            assert_eq!(profile.keywords.len(), 7);
            assert_eq!(profile.priority_sections.len(), 4);
            for term in profile.keywords.iter().chain(profile.priority_sections) {
                assert_eq!(*term, term.to_lowercase());
            }
        }
    }

    #[test]
    fn test_profile_for_unknown_name() {
        assert!(profile_for("investor").is_some());
        assert!(profile_for("lawyer").is_none());
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Persona::Technical).unwrap();
        assert_eq!(json, "\"technical\"");
        let back: Persona = serde_json::from_str("\"marketing\"").unwrap();
        assert_eq!(back, Persona::Marketing);
    }
}
