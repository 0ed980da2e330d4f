//! Offline Q&A — an ordered keyword rule table.
//!
//! Rules are evaluated top to bottom and the first match wins. Keywords are
//! matched against whole words (or whole multi-word phrases) of the
//! lower-cased question, so "hi" does not fire on "this".
//! `DEFAULT_ANSWER` applies when nothing matches.

use tracing::debug;

/// Maximum number of resume lines quoted in one answer.
const MAX_QUOTED_LINES: usize = 5;

pub const DEFAULT_ANSWER: &str = "I can tell you about skills, projects, experience, \
education, and achievements. Try asking about one of those, or use the contact form \
to reach out directly.";

/// How a matched rule produces its answer.
#[derive(Debug)]
pub enum Selector {
    Fixed(&'static str),
    /// Quote resume lines that contain any of `terms`, or `fallback` if none do.
    ResumeLines {
        intro: &'static str,
        terms: &'static [&'static str],
        fallback: &'static str,
    },
}

#[derive(Debug)]
pub struct Rule {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub select: Selector,
}

pub const RULES: &[Rule] = &[
    Rule {
        name: "contact",
        keywords: &["contact", "email", "reach", "hire", "phone", "linkedin"],
        select: Selector::Fixed(
            "The quickest way to get in touch is the contact form at the bottom of this page.",
        ),
    },
    Rule {
        name: "skills",
        keywords: &["skill", "skills", "stack", "tech stack", "languages", "technologies", "tools"],
        select: Selector::ResumeLines {
            intro: "Here is what the resume lists for skills:",
            terms: &["skill", "language", "framework", "tool", "technolog"],
            fallback: "The skills section is not available right now.",
        },
    },
    Rule {
        name: "projects",
        keywords: &["project", "projects", "built", "portfolio", "github"],
        select: Selector::ResumeLines {
            intro: "Some projects from the resume:",
            terms: &["project", "built", "developed", "implemented"],
            fallback: "Have a look at the Projects section of this site for details.",
        },
    },
    Rule {
        name: "experience",
        keywords: &[
            "experience",
            "work",
            "worked",
            "job",
            "jobs",
            "intern",
            "internship",
            "internships",
            "company",
            "companies",
        ],
        select: Selector::ResumeLines {
            intro: "From the experience section of the resume:",
            terms: &["intern", "engineer", "developer", "experience"],
            fallback: "Work experience details are not available right now.",
        },
    },
    Rule {
        name: "education",
        keywords: &[
            "education",
            "study",
            "studied",
            "degree",
            "university",
            "college",
            "school",
            "gpa",
            "cgpa",
        ],
        select: Selector::ResumeLines {
            intro: "Education, according to the resume:",
            terms: &["university", "college", "institute", "bachelor", "master", "degree", "b.tech", "gpa"],
            fallback: "Education details are not available right now.",
        },
    },
    Rule {
        name: "achievements",
        keywords: &[
            "achievement",
            "achievements",
            "award",
            "awards",
            "hackathon",
            "hackathons",
            "certification",
            "certifications",
        ],
        select: Selector::ResumeLines {
            intro: "A few highlights from the resume:",
            terms: &["award", "winner", "won", "rank", "hackathon", "certif", "achiev"],
            fallback: "See the Achievements section of this site for highlights.",
        },
    },
    Rule {
        name: "resume_download",
        keywords: &["resume", "cv", "download"],
        select: Selector::Fixed(
            "You can download the full resume from the Resume section of this site.",
        ),
    },
    Rule {
        name: "greeting",
        keywords: &["hi", "hello", "hey", "greetings", "good morning", "good evening"],
        select: Selector::Fixed(
            "Hi! Ask me anything about the skills, projects, or experience on this site.",
        ),
    },
];

/// Answers `question` from the rule table, quoting `document` where a rule asks for it.
pub fn respond(question: &str, document: &str) -> String {
    match find_rule(question) {
        Some(rule) => {
            debug!("Matched chat rule '{}'", rule.name);
            select(&rule.select, document)
        }
        None => DEFAULT_ANSWER.to_string(),
    }
}

pub fn find_rule(question: &str) -> Option<&'static Rule> {
    let normalized = normalize(question);
    RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| contains_phrase(&normalized, k)))
}

/// Lower-cases and reduces the text to space-separated words, padded with a
/// space on both sides.
fn normalize(text: &str) -> String {
    let words: Vec<String> = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect();
    format!(" {} ", words.join(" "))
}

fn contains_phrase(normalized: &str, phrase: &str) -> bool {
    normalized.contains(&format!(" {phrase} "))
}

fn select(selector: &Selector, document: &str) -> String {
    match selector {
        Selector::Fixed(text) => text.to_string(),
        Selector::ResumeLines {
            intro,
            terms,
            fallback,
        } => {
            let lines = matching_lines(document, terms);
            if lines.is_empty() {
                fallback.to_string()
            } else {
                format!("{intro}\n{}", lines.join("\n"))
            }
        }
    }
}

fn matching_lines<'a>(document: &'a str, terms: &[&str]) -> Vec<&'a str> {
    let mut lines: Vec<&str> = Vec::new();
    for line in document.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let lower = line.to_lowercase();
        if terms.iter().any(|t| lower.contains(t)) && !lines.contains(&line) {
            lines.push(line);
            if lines.len() == MAX_QUOTED_LINES {
                break;
            }
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Jane Doe\n\
        Skills: Rust, Go, TypeScript\n\
        Software Engineer Intern at Acme\n\
        Completed 4 internships\n\
        B.Tech in Computer Science, State University\n\
        Winner, National Hackathon 2023";

    #[test]
    fn test_first_matching_rule_wins() {
        // "email" (contact) precedes "skills" in the table.
        assert_eq!(find_rule("email me your skills").unwrap().name, "contact");
    }

    #[test]
    fn test_greeting_yields_to_topical_rule() {
        assert_eq!(find_rule("hi, what are your skills?").unwrap().name, "skills");
    }

    #[test]
    fn test_keywords_match_whole_words_only() {
        // "this" contains "hi" but must not trigger the greeting rule.
        assert!(find_rule("this").is_none());
        assert_eq!(find_rule("Hi there").unwrap().name, "greeting");
    }

    #[test]
    fn test_topical_rules_precede_resume_download() {
        assert_eq!(
            find_rule("What internships are on your resume?").unwrap().name,
            "experience"
        );
        assert_eq!(find_rule("Can I download your CV?").unwrap().name, "resume_download");
        let answer = respond("What internships are on your resume?", RESUME);
        assert!(answer.contains("Completed 4 internships"));
    }

    #[test]
    fn test_multi_word_phrase() {
        assert_eq!(find_rule("what is your tech stack").unwrap().name, "skills");
    }

    #[test]
    fn test_default_when_nothing_matches() {
        assert_eq!(respond("what is the airspeed of a swallow", RESUME), DEFAULT_ANSWER);
    }

    #[test]
    fn test_quotes_resume_lines() {
        let answer = respond("Tell me about internships", RESUME);
        assert!(answer.contains("Completed 4 internships"));
        assert!(answer.contains("Software Engineer Intern at Acme"));
    }

    #[test]
    fn test_fallback_when_document_empty() {
        let answer = respond("where did you study", "");
        assert_eq!(answer, "Education details are not available right now.");
    }

    #[test]
    fn test_quoted_lines_are_capped() {
        let doc = (0..20)
            .map(|i| format!("Project {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let lines = matching_lines(&doc, &["project"]);
        assert_eq!(lines.len(), MAX_QUOTED_LINES);
        assert_eq!(lines[0], "Project 0");
    }

    #[test]
    fn test_every_rule_has_keywords() {
        assert!(RULES.iter().all(|r| !r.keywords.is_empty()));
    }
}
