//! Implied-skills expansion
//!
//! Frameworks imply their host language ("Django" implies "Python"). Expansion
//! only ever adds skills and runs to a fixed point, so applying it twice gives
//! the same result as applying it once.

use crate::career::taxonomy::ImpliedRule;
use crate::processing::fuzzy::matches_alias;
use crate::processing::text_processor::normalize_skills;
use log::debug;

/// Expand normalized skill tokens with every skill implied by the rule table.
///
/// Input order is preserved; implied skills are appended in rule order. An
/// implied skill is not added when an existing token matches it or any alias
/// of the taxonomy skill it names ("js" already covers "javascript").
pub fn expand_implied_skills<S: AsRef<str>>(skills: &[S], rules: &[ImpliedRule]) -> Vec<String> {
    let mut expanded = normalize_skills(skills);

    loop {
        let mut added: Vec<String> = Vec::new();
        for rule in rules {
            let triggered = expanded
                .iter()
                .chain(added.iter())
                .any(|token: &String| matches_alias(token, rule.triggers.as_slice()));
            if !triggered {
                continue;
            }
            for (implied, equivalents) in rule.implied_with_equivalents() {
                let present = expanded
                    .iter()
                    .chain(added.iter())
                    .any(|token| matches_alias(token, equivalents));
                if !present {
                    added.push(implied.clone());
                }
            }
        }

        if added.is_empty() {
            break;
        }
        debug!("Implied skills added: {}", added.join(", "));
        expanded.extend(added);
    }

    expanded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::career::taxonomy::Taxonomy;

    fn rules() -> Vec<ImpliedRule> {
        vec![
            ImpliedRule::new(&["react", "vue"], &["javascript", "html", "css"]),
            ImpliedRule::new(&["express"], &["node.js"]),
            ImpliedRule::new(&["node.js"], &["javascript"]),
        ]
    }

    #[test]
    fn test_framework_implies_language() {
        let expanded = expand_implied_skills(&["React"], &rules());
        assert_eq!(expanded, vec!["react", "javascript", "html", "css"]);
    }

    #[test]
    fn test_chained_rules_reach_fixed_point() {
        let expanded = expand_implied_skills(&["Express"], &rules());
        assert_eq!(expanded, vec!["express", "node.js", "javascript"]);
    }

    #[test]
    fn test_no_duplicates_for_existing_variants() {
        let expanded = expand_implied_skills(&["React", "JavaScript", "nodejs", "Express"], &rules());
        assert_eq!(
            expanded,
            vec!["react", "javascript", "nodejs", "express", "html", "css"]
        );
    }

    #[test]
    fn test_expansion_is_idempotent() {
        let taxonomy = Taxonomy::builtin();
        let once = expand_implied_skills(&["Django", "Vue", "Kubernetes"], taxonomy.implied_rules());
        let twice = expand_implied_skills(&once, taxonomy.implied_rules());
        assert_eq!(once, twice);
        assert!(once.contains(&"python".to_string()));
        assert!(once.contains(&"javascript".to_string()));
        assert!(once.contains(&"docker".to_string()));
    }

    #[test]
    fn test_expansion_never_removes() {
        let expanded = expand_implied_skills(&["Cobol", "react"], &rules());
        assert_eq!(&expanded[..2], &["cobol".to_string(), "react".to_string()]);
    }

    #[test]
    fn test_empty_input() {
        let expanded = expand_implied_skills::<&str>(&[], &rules());
        assert!(expanded.is_empty());
    }

    #[test]
    fn test_aliases_of_implied_skill_count_as_present() {
        let rules = Taxonomy::builtin().implied_rules();

        let expanded = expand_implied_skills(&["JS", "React"], rules);
        assert_eq!(expanded, vec!["js", "react", "html", "css"]);

        let expanded = expand_implied_skills(&["Node", "Express"], rules);
        assert_eq!(expanded, vec!["node", "express", "javascript"]);

        let expanded = expand_implied_skills(&["HTML5", "React"], rules);
        assert_eq!(expanded, vec!["html5", "react", "javascript", "css"]);
    }

    #[test]
    fn test_no_skill_is_listed_twice_after_expansion() {
        let taxonomy = Taxonomy::builtin();
        let inputs: [&[&str]; 3] = [&["JS", "React"], &["Node", "Express"], &["HTML5", "Vue", "ES6"]];
        for input in inputs {
            let expanded = expand_implied_skills(input, taxonomy.implied_rules());
            for category in taxonomy.categories() {
                for skill in &category.skills {
                    let hits = expanded
                        .iter()
                        .filter(|token| matches_alias(token, &skill.aliases))
                        .count();
                    assert!(hits <= 1, "{} listed {} times in {:?}", skill.canonical, hits, expanded);
                }
            }
        }
    }
}
