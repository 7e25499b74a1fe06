/// Static industry insight table: the "offline database" behind enrichment.
pub struct IndustryInsight {
    pub pains: &'static [&'static str],
    pub trigger: &'static str,
}

const INSIGHTS: &[(&str, IndustryInsight)] = &[
    (
        "SaaS",
        IndustryInsight {
            pains: &[
                "High customer churn",
                "Long deployment cycles",
                "Technical debt",
            ],
            trigger: "Recently raised Series B funding",
        },
    ),
    (
        "Manufacturing",
        IndustryInsight {
            pains: &[
                "Supply chain disruptions",
                "Inventory overhead",
                "Unexpected downtime",
            ],
            trigger: "Opening new regional plant",
        },
    ),
    (
        "Healthcare",
        IndustryInsight {
            pains: &[
                "HIPAA compliance risks",
                "Staff burnout/shortages",
                "Legacy EMR interoperability",
            ],
            trigger: "New federal health regulations",
        },
    ),
    (
        "FinTech",
        IndustryInsight {
            pains: &[
                "Fraud detection latency",
                "Cross-border compliance",
                "Legacy banking integration",
            ],
            trigger: "Expansion into Asian markets",
        },
    ),
    (
        "E-commerce",
        IndustryInsight {
            pains: &[
                "Cart abandonment rates",
                "Rising CAC (Acquisition Cost)",
                "Last-mile delivery delays",
            ],
            trigger: "Q4 Holiday season preparation",
        },
    ),
    (
        "Biotech",
        IndustryInsight {
            pains: &[
                "Clinical trial delays",
                "FDA approval uncertainty",
                "R&D data silos",
            ],
            trigger: "Phase 3 trial results announced",
        },
    ),
];

static FALLBACK_INSIGHT: IndustryInsight = IndustryInsight {
    pains: &["Operational inefficiency", "Budget constraints"],
    trigger: "Fiscal year-end planning",
};

/// Substitutes used when a stored enrichment payload is missing or unusable.
pub const FALLBACK_PAIN: &str = "efficiency";
pub const FALLBACK_TRIGGER: &str = "growth";

pub fn industry_insight(industry: &str) -> &'static IndustryInsight {
    INSIGHTS
        .iter()
        .find(|(name, _)| *name == industry)
        .map(|(_, insight)| insight)
        .unwrap_or(&FALLBACK_INSIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_industry_has_insights() {
        let insight = industry_insight("SaaS");
        assert!(!insight.pains.is_empty());
        assert!(insight.trigger.contains("Series B"));
    }

    #[test]
    fn unknown_industry_gets_fallback() {
        let insight = industry_insight("Space Mining");
        assert_eq!(insight.pains, FALLBACK_INSIGHT.pains);
        assert_eq!(insight.trigger, FALLBACK_INSIGHT.trigger);
    }
}
