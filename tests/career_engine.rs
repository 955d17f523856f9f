//! End-to-end behaviour of the skill-to-career engine

use career_insight::career::decision::DecisionKind;
use career_insight::career::taxonomy::{CareerCategory, CombinationRole, Importance, SkillDefinition};
use career_insight::career::{CareerAnalyzer, CareerContent, CategoryId, Priority, Taxonomy};
use career_insight::config::CareerConfig;
use career_insight::processing::fuzzy::{levenshtein_distance, matches_alias};
use std::sync::Arc;

fn analyzer() -> CareerAnalyzer {
    CareerAnalyzer::new(CareerConfig::default()).unwrap()
}

#[test]
fn test_frontend_skills_pick_frontend_developer() {
    let analysis = analyzer().analyze_skills(&["JavaScript", "React", "HTML", "CSS"]);
    assert_eq!(analysis.primary_category, "Frontend Development");
    assert_eq!(analysis.primary_title, "Frontend Developer");
    assert!(!analysis.decision.is_combination());
}

#[test]
fn test_mern_stack_is_full_stack() {
    let analysis = analyzer().analyze_skills(&["MongoDB", "Express", "React", "Node"]);
    assert_eq!(analysis.primary_category, "Full-Stack Development");
    match &analysis.decision.kind {
        DecisionKind::Combination { members, .. } => {
            let names: Vec<&str> = members.iter().map(CategoryId::as_str).collect();
            assert!(names.contains(&"Frontend Development"));
            assert!(names.contains(&"Backend Development"));
        }
        other => panic!("expected a combination, got {other:?}"),
    }
}

#[test]
fn test_ml_skills_pick_ml_engineer_without_leaking_python() {
    let analysis = analyzer().analyze_skills(&["Python", "TensorFlow", "PyTorch"]);
    assert_eq!(analysis.primary_category, "AI/ML Engineering");
    assert_eq!(analysis.primary_title, "AI/ML Engineer");
    let backend_has_python = analysis
        .breakdown_for("Backend Development")
        .map(|score| score.matched_skills.iter().any(|s| s == "Python"))
        .unwrap_or(false);
    assert!(!backend_has_python);
}

#[test]
fn test_scores_stay_in_range_for_many_inputs() {
    let analyzer = analyzer();
    let inputs: Vec<Vec<&str>> = vec![
        vec!["Rust"],
        vec!["Figma", "Sketch", "User Research"],
        vec!["Docker", "Kubernetes", "AWS", "Terraform", "Linux", "Python", "Go"],
        vec!["Swift", "Kotlin", "Flutter", "React Native"],
        vec!["SQL", "Tableau", "Statistics", "Excel", "Pandas", "Spark", "Airflow"],
        vec!["", "   ", "?"],
    ];
    for skills in inputs {
        let analysis = analyzer.analyze_skills(&skills);
        for score in &analysis.skill_breakdown {
            assert!(score.normalized_score > 0.0 && score.normalized_score <= 100.0);
            let category = analyzer.taxonomy().category(score.category.as_str()).unwrap();
            for matched in &score.matched_skills {
                assert!(category.skills.iter().any(|s| &s.canonical == matched));
            }
        }
        assert!(analysis.career_paths.len() <= 3);
        assert!(analysis.career_paths.iter().all(|p| p.adjusted_match <= 98));
    }
}

#[test]
fn test_breakdown_is_sorted_descending() {
    let analysis = analyzer().analyze_skills(&["React", "Node.js", "Docker", "Figma", "Python"]);
    assert!(analysis
        .skill_breakdown
        .windows(2)
        .all(|w| w[0].normalized_score >= w[1].normalized_score));
}

#[test]
fn test_skills_to_enhance_cover_top_two_categories() {
    let analysis = analyzer().analyze_skills(&["MongoDB", "Express", "React", "Node"]);
    let categories: Vec<&str> = analysis
        .skills_to_enhance
        .iter()
        .map(|s| s.category.as_str())
        .collect();
    assert!(categories.contains(&"Frontend Development"));
    assert!(categories.contains(&"Backend Development"));
    for category in ["Frontend Development", "Backend Development"] {
        let count = categories.iter().filter(|c| **c == category).count();
        assert!(count <= 6);
    }
    assert!(analysis
        .skills_to_enhance
        .iter()
        .any(|s| s.priority == Priority::High || s.priority == Priority::Medium));
}

#[test]
fn test_empty_input_is_general() {
    let analysis = analyzer().analyze_skills::<&str>(&[]);
    assert_eq!(analysis.primary_category, "General");
    assert_eq!(analysis.primary_title, "Technology Professional");
    assert!(analysis.skills_to_enhance.is_empty());
}

#[test]
fn test_smaller_taxonomy_can_be_injected() {
    let systems = CareerCategory::new(
        "Systems",
        vec![
            SkillDefinition::new("Rust", &["rustlang"], Importance::Core),
            SkillDefinition::new("Linux", &[], Importance::Supporting),
        ],
    )
    .unwrap();
    let embedded = CareerCategory::new(
        "Embedded",
        vec![
            SkillDefinition::new("C", &[], Importance::Core),
            SkillDefinition::new("RTOS", &[], Importance::Supporting),
        ],
    )
    .unwrap();
    let firmware = CombinationRole {
        categories: [
            CategoryId::new("Systems").unwrap(),
            CategoryId::new("Embedded").unwrap(),
        ],
        result: CategoryId::new("Firmware Engineering").unwrap(),
        weight: 1.0,
    };
    let taxonomy = Taxonomy::new(vec![systems, embedded], vec![firmware], vec![]).unwrap();
    let analyzer = CareerAnalyzer::with_data(
        Arc::new(taxonomy),
        Arc::new(CareerContent::builtin().clone()),
        CareerConfig::default(),
    )
    .unwrap();

    let analysis = analyzer.analyze_skills(&["rustlang", "C"]);
    assert_eq!(analysis.primary_category, "Firmware Engineering");
    assert_eq!(analysis.primary_title, "Technology Professional");
}

#[test]
fn test_alias_matching_properties() {
    assert!(!matches_alias("css", &["scss"]));
    assert!(!matches_alias("c", &["c#", "c++"]));
    assert!(!matches_alias("react", &["react native"]));
    assert!(matches_alias("nodejs", &["node.js"]));
    assert!(matches_alias("angulr", &["angular"]));
    assert!(!matches_alias("rect", &["react"]));
    assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
    assert_eq!(levenshtein_distance("css", "scss"), 1);
}

#[test]
fn test_near_miss_words_do_not_imply_frameworks() {
    let analyzer = CareerAnalyzer::new(CareerConfig::default()).unwrap();
    let analysis = analyzer.analyze_skills(&["string"]);
    assert_eq!(analysis.expanded_skills, vec!["string"]);
    assert!(analysis.skill_breakdown.is_empty());
    assert!(matches!(analysis.decision.kind, DecisionKind::NoMatch));

    let analysis = analyzer.analyze_skills(&["Spring Boot"]);
    assert!(analysis.expanded_skills.contains(&"java".to_string()));
    assert!(analysis.breakdown_for("Backend Development").is_some());
}
