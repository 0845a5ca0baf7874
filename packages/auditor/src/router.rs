//! Claim routing: decide which reference lookup, if any, verifies a claim.
//!
//! Routing is an ordered list of pure rules. The explicit category tag is
//! consulted first; keyword rules only apply when the tag is missing or not
//! one we recognize. A claim no rule accepts is left unverified.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use strum::{Display, EnumString};

use crate::gateway::GatewayOperation;
use crate::models::DataAnchor;

/// Claim categories the model is asked to assign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Category {
    #[strum(to_string = "inflation", serialize = "cpi")]
    Inflation,
    #[strum(to_string = "unemployment")]
    Unemployment,
    #[strum(to_string = "energy", serialize = "oil", serialize = "energy_oil")]
    Energy,
    #[strum(to_string = "gdp_growth", serialize = "global_gdp", serialize = "gdp")]
    GdpGrowth,
    #[strum(to_string = "market_index", serialize = "market", serialize = "stocks")]
    MarketIndex,
    #[strum(to_string = "climate", serialize = "climate_metric", serialize = "temperature")]
    Climate,
    #[strum(to_string = "demographics", serialize = "global_stats", serialize = "population")]
    Demographics,
}

impl Category {
    /// Parse a model-supplied tag, tolerating case and separator variations
    /// (`"Energy/Oil"`, `"market-index"`, `" GDP Growth "`).
    pub fn from_tag(tag: &str) -> Option<Self> {
        let normalized: String = tag
            .trim()
            .chars()
            .map(|c| if matches!(c, ' ' | '-' | '/') { '_' } else { c })
            .collect();
        Category::from_str(&normalized).ok()
    }
}

pub const INFLATION: GatewayOperation = GatewayOperation::Fred {
    series_id: "CPIAUCSL",
    units: Some("pc1"),
};
pub const UNEMPLOYMENT: GatewayOperation = GatewayOperation::Fred {
    series_id: "UNRATE",
    units: None,
};
pub const CRUDE_OIL: GatewayOperation = GatewayOperation::Eia {
    route: "petroleum/pri/spt",
    series: "RWTC",
};
pub const WORLD_GDP_GROWTH: GatewayOperation = GatewayOperation::WorldBank {
    indicator: "NY.GDP.MKTP.KD.ZG",
    country: "WLD",
};
pub const WORLD_POPULATION: GatewayOperation = GatewayOperation::WorldBank {
    indicator: "SP.POP.TOTL",
    country: "WLD",
};
pub const GLOBAL_TEMPERATURE: GatewayOperation = GatewayOperation::ClimateAnomaly {
    region: "globe/land_ocean",
};

/// Baseline index when the claim names no specific one.
pub const SP500: GatewayOperation = GatewayOperation::Fred {
    series_id: "SP500",
    units: None,
};
pub const DOW_JONES: GatewayOperation = GatewayOperation::Fred {
    series_id: "DJIA",
    units: None,
};
pub const NASDAQ: GatewayOperation = GatewayOperation::Fred {
    series_id: "NASDAQCOM",
    units: None,
};

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ENERGY_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:oil|crude|energy|brent|barrels?|gasoline)\b").expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static INFLATION_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:inflation|cpi|consumer prices?)\b").expect("valid regex")
});

// No trailing boundary: "joblessness" counts.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static UNEMPLOYMENT_KEYWORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:unemployment|jobless)").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static MARKET_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bs&p|\bsp500\b|\bdow jones\b|\bnasdaq\b|\bstock markets?\b")
        .expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static GDP_KEYWORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:gdp|economic growth)\b").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static POPULATION_KEYWORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bpopulations?\b").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static CLIMATE_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:global temperatures?|warming)\b").expect("valid regex")
});

// "S&P500" has no boundary after the p, so the S&P branch has no trailing \b.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SP500_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bs&p|\bsp500\b").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DOW_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bdow\b").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static NASDAQ_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bnasdaq\b").expect("valid regex"));

/// A routing rule: a pure function from claim to lookup.
pub type Rule = fn(&DataAnchor) -> Option<GatewayOperation>;

/// Rules in evaluation order; the first `Some` wins.
pub const RULES: &[(&str, Rule)] = &[
    ("category", by_category),
    ("energy", energy_keywords),
    ("economic", economic_keywords),
    ("global", global_keywords),
];

/// Pick the lookup for a claim, or `None` if nothing applies.
pub fn route(anchor: &DataAnchor) -> Option<GatewayOperation> {
    RULES.iter().find_map(|(name, rule)| {
        let operation = rule(anchor)?;
        tracing::debug!(rule = *name, ?operation, "claim routed");
        Some(operation)
    })
}

pub fn by_category(anchor: &DataAnchor) -> Option<GatewayOperation> {
    let category = anchor.category.as_deref().and_then(Category::from_tag)?;
    let operation = match category {
        Category::Inflation => INFLATION,
        Category::Unemployment => UNEMPLOYMENT,
        Category::Energy => CRUDE_OIL,
        Category::GdpGrowth => WORLD_GDP_GROWTH,
        Category::MarketIndex => market_index_for(&anchor.claim),
        Category::Climate => GLOBAL_TEMPERATURE,
        Category::Demographics => WORLD_POPULATION,
    };
    Some(operation)
}

pub fn energy_keywords(anchor: &DataAnchor) -> Option<GatewayOperation> {
    ENERGY_KEYWORDS.is_match(&anchor.claim).then_some(CRUDE_OIL)
}

pub fn economic_keywords(anchor: &DataAnchor) -> Option<GatewayOperation> {
    let claim = anchor.claim.as_str();
    if INFLATION_KEYWORDS.is_match(claim) {
        Some(INFLATION)
    } else if UNEMPLOYMENT_KEYWORDS.is_match(claim) {
        Some(UNEMPLOYMENT)
    } else if MARKET_KEYWORDS.is_match(claim) {
        Some(market_index_for(claim))
    } else {
        None
    }
}

pub fn global_keywords(anchor: &DataAnchor) -> Option<GatewayOperation> {
    let claim = anchor.claim.as_str();
    if GDP_KEYWORDS.is_match(claim) {
        Some(WORLD_GDP_GROWTH)
    } else if POPULATION_KEYWORDS.is_match(claim) {
        Some(WORLD_POPULATION)
    } else if CLIMATE_KEYWORDS.is_match(claim) {
        Some(GLOBAL_TEMPERATURE)
    } else {
        None
    }
}

/// Choose an index series by name; an explicit S&P mention wins.
fn market_index_for(claim: &str) -> GatewayOperation {
    if SP500_NAME.is_match(claim) {
        SP500
    } else if DOW_NAME.is_match(claim) {
        DOW_JONES
    } else if NASDAQ_NAME.is_match(claim) {
        NASDAQ
    } else {
        SP500
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn claim(text: &str) -> DataAnchor {
        DataAnchor::new(text)
    }

    #[test]
    fn test_category_tags_normalize() {
        assert_eq!(Category::from_tag("Energy/Oil"), Some(Category::Energy));
        assert_eq!(Category::from_tag("market-index"), Some(Category::MarketIndex));
        assert_eq!(Category::from_tag(" GDP Growth "), Some(Category::GdpGrowth));
        assert_eq!(Category::from_tag("global stats"), Some(Category::Demographics));
        assert_eq!(Category::from_tag("CPI"), Some(Category::Inflation));
        assert_eq!(Category::from_tag("sports"), None);
        assert_eq!(Category::from_tag(""), None);
    }

    #[test]
    fn test_category_display_is_snake_case() {
        assert_eq!(Category::MarketIndex.to_string(), "market_index");
    }

    #[test]
    fn test_category_routes_directly() {
        let anchor = claim("Joblessness hit 5%").with_category("unemployment");
        assert_eq!(route(&anchor), Some(UNEMPLOYMENT));

        let anchor = claim("Temperatures are 1.5C above baseline").with_category("climate");
        assert_eq!(route(&anchor), Some(GLOBAL_TEMPERATURE));
    }

    #[test]
    fn test_market_index_secondary_keyword() {
        let dow = claim("The Dow closed at 42,000").with_category("market_index");
        let nasdaq = claim("Nasdaq is at 18,000").with_category("market_index");
        let other = claim("Stocks are at record highs").with_category("market_index");
        assert_eq!(route(&dow), Some(DOW_JONES));
        assert_eq!(route(&nasdaq), Some(NASDAQ));
        assert_eq!(route(&other), Some(SP500));
    }

    #[test]
    fn test_category_beats_keywords() {
        // Mentions oil, but the explicit tag says inflation.
        let anchor = claim("Oil shocks pushed inflation to 9%").with_category("inflation");
        assert_eq!(route(&anchor), Some(INFLATION));
    }

    #[test]
    fn test_unknown_category_falls_back_to_keywords() {
        let anchor = claim("Unemployment is 5%").with_category("labour stuff");
        assert_eq!(route(&anchor), Some(UNEMPLOYMENT));
    }

    #[test]
    fn test_keyword_priority_energy_first() {
        // Matches both the energy and economic sets; energy wins.
        assert_eq!(
            route(&claim("Energy costs drove CPI up 4%")),
            Some(CRUDE_OIL)
        );
        // Matches economic and global sets; economic wins.
        assert_eq!(
            route(&claim("Inflation outpaced GDP growth")),
            Some(INFLATION)
        );
    }

    #[test]
    fn test_global_keywords() {
        assert_eq!(route(&claim("World GDP grew 3.1%")), Some(WORLD_GDP_GROWTH));
        assert_eq!(
            route(&claim("The population passed 8 billion")),
            Some(WORLD_POPULATION)
        );
        assert_eq!(
            route(&claim("Global warming reached 1.3C")),
            Some(GLOBAL_TEMPERATURE)
        );
    }

    #[test]
    fn test_no_route() {
        assert_eq!(route(&claim("The author cites a 2019 survey")), None);
        assert_eq!(route(&claim("")), None);
    }

    #[test]
    fn test_dow_needs_a_whole_word() {
        assert_eq!(
            route(&claim("The S&P 500 fell 10% during the slowdown")),
            Some(SP500)
        );
        let tagged = claim("Shares slowed down after the 5% drop").with_category("market_index");
        assert_eq!(route(&tagged), Some(SP500));
        let shadow = claim("Stock market shadow banking grew 8%");
        assert_eq!(route(&shadow), Some(SP500));
    }

    #[test]
    fn test_explicit_index_names() {
        let sp = claim("S&P500 and the Dow both rose 2%").with_category("market_index");
        assert_eq!(route(&sp), Some(SP500));
        assert_eq!(route(&claim("The Dow Jones gained 300 points")), Some(DOW_JONES));
        assert_eq!(route(&claim("NASDAQ closed at 18,000")), Some(NASDAQ));
    }

    #[test]
    fn test_oil_needs_a_whole_word() {
        assert_eq!(
            route(&claim("Political turmoil pushed inflation to 9%")),
            Some(INFLATION)
        );
        assert_eq!(route(&claim("Soil erosion cut output by 4%")), None);
        assert_eq!(route(&claim("Oil fell to $70 a barrel")), Some(CRUDE_OIL));
    }

    #[test]
    fn test_keywords_ignore_case() {
        assert_eq!(route(&claim("CPI rose 3.2%")), Some(INFLATION));
        assert_eq!(route(&claim("Joblessness hit 5%")), Some(UNEMPLOYMENT));
    }

    #[test]
    fn test_rules_are_individually_callable() {
        let anchor = claim("Crude oil trades at $80");
        assert_eq!(by_category(&anchor), None);
        assert_eq!(energy_keywords(&anchor), Some(CRUDE_OIL));
        assert_eq!(economic_keywords(&anchor), None);
        assert_eq!(global_keywords(&anchor), None);
    }
}
