use regex::Regex;
use std::collections::HashSet;

use crate::models::LeadCandidate;

/// Industry-specific roles so generated profiles stay plausible.
const ROLES_BY_INDUSTRY: &[(&str, &[&str])] = &[
    (
        "SaaS",
        &[
            "CTO",
            "VP of Engineering",
            "Product Manager",
            "Head of Growth",
            "DevOps Lead",
            "Solutions Architect",
            "Chief Product Officer",
        ],
    ),
    (
        "Manufacturing",
        &[
            "Supply Chain Manager",
            "Plant Director",
            "Head of Operations",
            "Procurement Manager",
            "Logistics Coordinator",
            "Quality Assurance Lead",
        ],
    ),
    (
        "Healthcare",
        &[
            "Medical Director",
            "Clinical Lead",
            "Practice Manager",
            "Head of Patient Services",
            "Chief Medical Officer",
            "Hospital Administrator",
        ],
    ),
    (
        "FinTech",
        &[
            "Head of Risk",
            "Compliance Officer",
            "CFO",
            "Director of Fintech",
            "Blockchain Lead",
            "Chief Investment Officer",
            "Fraud Analyst",
        ],
    ),
    (
        "E-commerce",
        &[
            "Head of Digital Marketing",
            "E-commerce Director",
            "Supply Chain Lead",
            "Customer Experience VP",
            "Brand Manager",
            "Fulfillment Director",
        ],
    ),
    (
        "Biotech",
        &[
            "Head of R&D",
            "Lab Director",
            "Clinical Trial Manager",
            "Chief Scientific Officer",
            "Regulatory Affairs Director",
        ],
    ),
];

const GENERIC_ROLES: &[&str] = &["CEO", "Founder", "Managing Director", "VP of Sales"];

const FIRST_NAMES: &[&str] = &[
    "Alice", "Marcus", "Priya", "Daniel", "Sofia", "Ahmed", "Elena", "Victor", "Naomi", "Oscar",
    "Linnea", "Rafael", "Chloe", "Mateo", "Ingrid", "Tariq", "Hannah", "Luca", "Yuki", "Sebastian",
    "Amara", "Felix", "Noor", "Gabriel",
];

const LAST_NAMES: &[&str] = &[
    "Hartmann", "Okafor", "Lindqvist", "Moreau", "Tanaka", "Petrov", "Silva", "Johansson",
    "Keller", "Nguyen", "Rossi", "Andersen", "Kowalski", "Haddad", "Fernandez", "Bauer",
    "Svensson", "Dubois", "Costa", "Novak", "Ferreira", "Weiss", "Larsen", "Marino",
];

const COMPANY_STEMS: &[&str] = &[
    "Nimbus", "Vertex", "Harbor", "Cobalt", "Meridian", "Atlas", "Juniper", "Solstice", "Quartz",
    "Beacon", "Cascade", "Orchid", "Pioneer", "Summit", "Lumen", "Drift", "Anchor", "Crescent",
];

const COMPANY_SUFFIXES: &[&str] = &[
    "Labs", "Systems", "Group", "Works", "Dynamics", "Solutions", "Holdings", "Technologies",
];

const COUNTRIES: &[&str] = &[
    "United States",
    "Germany",
    "France",
    "United Kingdom",
    "Sweden",
    "Canada",
    "Netherlands",
    "Australia",
    "Japan",
    "Brazil",
    "Switzerland",
    "Singapore",
];

/// A source of candidate lead records. Implementations must be reproducible:
/// the same (seed, industry) pair yields the same candidate sequence.
pub trait LeadSource: Send + Sync {
    fn name(&self) -> &str;
    fn generate(&self, count: usize, seed: u64, industry: Option<&str>) -> Vec<LeadCandidate>;
}

/// Synthetic candidate generator driven by a seeded RNG.
pub struct SyntheticLeadSource;

impl SyntheticLeadSource {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SyntheticLeadSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Strips everything but alphanumerics for URL/email slugs
/// ('Acme, Inc.' -> 'acmeinc').
fn clean_slug(text: &str) -> String {
    Regex::new(r"[^a-zA-Z0-9]")
        .unwrap()
        .replace_all(text, "")
        .to_lowercase()
}

fn match_industry(filter: &str) -> Option<&'static str> {
    ROLES_BY_INDUSTRY
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(filter))
        .map(|(name, _)| *name)
}

fn roles_for(industry: &str) -> &'static [&'static str] {
    ROLES_BY_INDUSTRY
        .iter()
        .find(|(name, _)| *name == industry)
        .map(|(_, roles)| *roles)
        .unwrap_or(GENERIC_ROLES)
}

fn pick<'a>(rng: &mut fastrand::Rng, items: &'a [&'a str]) -> &'a str {
    items[rng.usize(0..items.len())]
}

fn generate_candidate(rng: &mut fastrand::Rng, industry_filter: Option<&str>) -> LeadCandidate {
    let matched = industry_filter.and_then(match_industry);

    let (industry, role) = match matched {
        Some(industry) => (industry, pick(rng, roles_for(industry))),
        None => {
            let (industry, roles) = ROLES_BY_INDUSTRY[rng.usize(0..ROLES_BY_INDUSTRY.len())];
            // 80% industry-specific role, 20% generic C-suite
            let role = if rng.f64() < 0.8 {
                pick(rng, roles)
            } else {
                pick(rng, GENERIC_ROLES)
            };
            (industry, role)
        }
    };

    let company_name = format!(
        "{} {}",
        pick(rng, COMPANY_STEMS),
        pick(rng, COMPANY_SUFFIXES)
    );
    let company_slug = clean_slug(&company_name);
    let website = format!("https://www.{}.com", company_slug);

    let first_name = pick(rng, FIRST_NAMES);
    let last_name = pick(rng, LAST_NAMES);
    let full_name = format!("{} {}", first_name, last_name);

    // first.last@company.com, matching the company website
    let email = format!(
        "{}.{}@{}.com",
        clean_slug(first_name),
        clean_slug(last_name),
        company_slug
    );

    let linkedin_url = format!(
        "https://linkedin.com/in/{}-{}-{}",
        clean_slug(first_name),
        clean_slug(last_name),
        rng.u32(100..=999)
    );

    LeadCandidate {
        full_name,
        company_name,
        role: role.to_string(),
        industry: industry.to_string(),
        website,
        email,
        linkedin_url,
        country: pick(rng, COUNTRIES).to_string(),
    }
}

impl LeadSource for SyntheticLeadSource {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn generate(&self, count: usize, seed: u64, industry: Option<&str>) -> Vec<LeadCandidate> {
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut seen = HashSet::new();
        let mut candidates = Vec::with_capacity(count);

        // Redraw on intra-batch email collisions; the draw cap keeps huge
        // counts from spinning once the name/company pools are exhausted.
        let mut draws = 0;
        while candidates.len() < count && draws < count.saturating_mul(20).max(64) {
            draws += 1;
            let candidate = generate_candidate(&mut rng, industry);
            if seen.insert(candidate.email.clone()) {
                candidates.push(candidate);
            }
        }

        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_reproduces_candidates() {
        let source = SyntheticLeadSource::new();
        let a = source.generate(10, 7, None);
        let b = source.generate(10, 7, None);

        assert_eq!(a.len(), 10);
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.full_name, y.full_name);
            assert_eq!(x.role, y.role);
            assert_eq!(x.industry, y.industry);
            assert_eq!(x.email, y.email);
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let source = SyntheticLeadSource::new();
        let a = source.generate(20, 1, None);
        let b = source.generate(20, 2, None);

        let identical = a
            .iter()
            .zip(b.iter())
            .filter(|(x, y)| x.email == y.email)
            .count();
        assert!(identical < a.len());
    }

    #[test]
    fn emails_are_unique_within_a_batch() {
        let source = SyntheticLeadSource::new();
        let candidates = source.generate(50, 42, None);

        let emails: HashSet<_> = candidates.iter().map(|c| c.email.as_str()).collect();
        assert_eq!(candidates.len(), 50);
        assert_eq!(emails.len(), 50);
    }

    #[test]
    fn industry_filter_is_case_insensitive() {
        let source = SyntheticLeadSource::new();
        for candidate in source.generate(8, 42, Some("fintech")) {
            assert_eq!(candidate.industry, "FinTech");
        }
    }

    #[test]
    fn unknown_industry_falls_back_to_random() {
        let source = SyntheticLeadSource::new();
        let candidates = source.generate(8, 42, Some("Aerospace"));
        assert_eq!(candidates.len(), 8);
        for candidate in &candidates {
            assert!(ROLES_BY_INDUSTRY
                .iter()
                .any(|(name, _)| *name == candidate.industry));
        }
    }

    #[test]
    fn candidate_identifiers_are_well_formed() {
        let source = SyntheticLeadSource::new();
        for candidate in source.generate(10, 3, None) {
            assert!(candidate.email.contains('@'));
            assert!(!candidate.email.contains(' '));
            assert!(candidate.website.starts_with("https://www."));
            assert!(candidate.linkedin_url.starts_with("https://linkedin.com/in/"));

            // email domain matches the company website slug
            let domain = candidate.email.split('@').nth(1).unwrap();
            assert!(candidate.website.contains(domain.trim_end_matches(".com")));
        }
    }
}
