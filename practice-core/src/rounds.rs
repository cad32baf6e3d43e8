//! Role to interview-round table.

/// Role used when a session asks for interview mode without naming one.
pub const DEFAULT_ROLE: &str = "BackEnd";

const FRONTEND_ROUNDS: &[&str] = &[
    "CV Screening",
    "Behavioral",
    "Frontend Basic",
    "CSS",
    "JavaScript",
    "React",
    "System Design",
    "Algorithms",
];

const BACKEND_ROUNDS: &[&str] = &[
    "CV Screening",
    "Behavioral",
    "Database",
    "Data Layer",
    "System Design",
    "Algorithms",
    "Testing",
];

const FULLSTACK_ROUNDS: &[&str] = &[
    "CV Screening",
    "Behavioral",
    "JavaScript",
    "React",
    "Database",
    "System Design",
    "Algorithms",
];

const DEVOPS_ROUNDS: &[&str] = &[
    "CV Screening",
    "Behavioral",
    "Docker",
    "Kubernetes",
    "AWS",
    "DevOps",
    "System Design",
];

const MOBILE_ROUNDS: &[&str] = &[
    "CV Screening",
    "Behavioral",
    "JavaScript",
    "System Design",
    "Algorithms",
    "Testing",
];

const FALLBACK_ROUNDS: &[&str] = &["CV Screening", "Behavioral", "System Design", "Algorithms"];

/// Ordered topic names for an interview in the given role.
///
/// Matching ignores case and `-`/`_`/space separators, so "Front-End",
/// "frontend" and "FrontEnd" resolve to the same plan. Unknown roles get
/// the fallback plan.
pub fn round_plan(role: &str) -> Vec<String> {
    let key: String = role
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .collect::<String>()
        .to_ascii_lowercase();

    let rounds = match key.as_str() {
        "frontend" => FRONTEND_ROUNDS,
        "backend" => BACKEND_ROUNDS,
        "fullstack" => FULLSTACK_ROUNDS,
        "devops" => DEVOPS_ROUNDS,
        "mobile" => MOBILE_ROUNDS,
        _ => FALLBACK_ROUNDS,
    };

    rounds.iter().map(|r| r.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frontend_plan() {
        assert_eq!(
            round_plan("FrontEnd"),
            vec![
                "CV Screening",
                "Behavioral",
                "Frontend Basic",
                "CSS",
                "JavaScript",
                "React",
                "System Design",
                "Algorithms",
            ]
        );
    }

    #[test]
    fn test_plan_is_deterministic() {
        for role in ["FrontEnd", "BackEnd", "DevOps", "Data Scientist", ""] {
            assert_eq!(round_plan(role), round_plan(role));
        }
    }

    #[test]
    fn test_role_spelling_variants() {
        assert_eq!(round_plan("front-end"), round_plan("FrontEnd"));
        assert_eq!(round_plan("BACKEND"), round_plan("BackEnd"));
        assert_eq!(round_plan("Full Stack"), round_plan("FullStack"));
    }

    #[test]
    fn test_unknown_role_uses_fallback() {
        assert_eq!(round_plan("Data Scientist"), round_plan("Astronaut"));
        assert_eq!(round_plan("Astronaut").len(), FALLBACK_ROUNDS.len());
    }

    #[test]
    fn test_every_plan_starts_with_screening() {
        for role in ["FrontEnd", "BackEnd", "FullStack", "DevOps", "Mobile", "Other"] {
            assert_eq!(round_plan(role)[0], "CV Screening");
        }
    }
}
