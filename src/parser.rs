use csv::{Reader, ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use tracing::debug;

use crate::error::AppError;
use crate::models::{Concept, ConceptExample, Prompt};

const PREVIEW_CHARS: usize = 120;

pub(crate) fn parse_prompts(content: &str) -> Result<Vec<Prompt>, AppError> {
    let mut reader = csv_reader(content);
    require_columns(reader.headers()?, &["role", "title", "prompt"])?;

    let mut prompts = Vec::new();
    for row in reader.deserialize::<Prompt>() {
        let mut prompt = row?;
        if prompt.author.as_deref().is_some_and(str::is_empty) {
            prompt.author = None;
        }
        prompts.push(prompt);
    }
    Ok(prompts)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConceptRow {
    concept: String,
    example: String,
}

pub(crate) fn parse_concept_examples(content: &str) -> Result<Vec<ConceptExample>, AppError> {
    let mut reader = csv_reader(content);
    require_columns(reader.headers()?, &["concept", "example"])?;

    let mut examples = Vec::new();
    for row in reader.deserialize::<ConceptRow>() {
        let row = row?;
        match Concept::from_name(&row.concept) {
            Some(concept) => examples.push(ConceptExample {
                concept,
                example: row.example,
            }),
            None => debug!(concept = %row.concept, "skipping example for unknown concept"),
        }
    }
    Ok(examples)
}

/// Distinct roles in first-appearance order.
pub(crate) fn roles(prompts: &[Prompt]) -> Vec<String> {
    let mut roles: Vec<String> = Vec::new();
    for prompt in prompts {
        if !roles.iter().any(|role| *role == prompt.role) {
            roles.push(prompt.role.clone());
        }
    }
    roles
}

pub(crate) fn prompts_for_role<'a>(prompts: &'a [Prompt], role: Option<&str>) -> Vec<&'a Prompt> {
    match role {
        Some(role) => prompts.iter().filter(|prompt| prompt.role == role).collect(),
        None => Vec::new(),
    }
}

pub(crate) fn preview(prompt: &Prompt) -> String {
    if prompt.prompt.chars().count() > PREVIEW_CHARS {
        let mut excerpt: String = prompt.prompt.chars().take(PREVIEW_CHARS).collect();
        excerpt.push('…');
        excerpt
    } else {
        prompt.prompt.clone()
    }
}

/// Header row required, short rows allowed, blank lines skipped.
fn csv_reader(content: &str) -> Reader<&[u8]> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(content.as_bytes())
}

fn require_columns(headers: &StringRecord, names: &[&'static str]) -> Result<(), AppError> {
    for name in names {
        if !headers.iter().any(|header| header == *name) {
            return Err(AppError::MissingColumn(*name));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt(role: &str, title: &str) -> Prompt {
        Prompt {
            role: role.to_string(),
            title: title.to_string(),
            prompt: format!("{title} body"),
            author: None,
        }
    }

    #[test]
    fn test_parse_prompts_by_header_name() {
        let csv = "title,prompt,role,author\nGreeting,\"Hi, ${name:you}\",Writer,ada\n";
        let prompts = parse_prompts(csv).unwrap();
        assert_eq!(
            prompts,
            vec![Prompt {
                role: "Writer".to_string(),
                title: "Greeting".to_string(),
                prompt: "Hi, ${name:you}".to_string(),
                author: Some("ada".to_string()),
            }]
        );
    }

    #[test]
    fn test_parse_prompts_quoted_newlines_and_quotes() {
        let csv = "role,title,prompt\r\nDev,Review,\"Line one\nsay \"\"hi\"\"\"\r\n\r\nDev,Short,x\r\n";
        let prompts = parse_prompts(csv).unwrap();
        assert_eq!(prompts.len(), 2);
        assert_eq!(prompts[0].prompt, "Line one\nsay \"hi\"");
        assert_eq!(prompts[0].author, None);
        assert_eq!(prompts[1].title, "Short");
    }

    #[test]
    fn test_parse_prompts_short_rows_and_empty_author() {
        let csv = "role,title,prompt,author\nDev,Only title\nDev,T,P,\n";
        let prompts = parse_prompts(csv).unwrap();
        assert_eq!(prompts[0].prompt, "");
        assert_eq!(prompts[1].author, None);
    }

    #[test]
    fn test_parse_prompts_missing_column() {
        let err = parse_prompts("role,title\nDev,T\n").unwrap_err();
        assert!(matches!(err, AppError::MissingColumn("prompt")));
        assert!(matches!(parse_prompts("").unwrap_err(), AppError::MissingColumn("role")));
    }

    #[test]
    fn test_parse_prompts_carriage_return_line_endings() {
        let prompts = parse_prompts("role,title,prompt\rDev,T,P\r").unwrap();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].role, "Dev");
        assert_eq!(prompts[0].prompt, "P");
    }

    #[test]
    fn test_parse_prompts_ignores_extra_columns() {
        let prompts = parse_prompts("role,notes,title,prompt\nDev,x,T,P\n").unwrap();
        assert_eq!(prompts[0].title, "T");
        assert_eq!(prompts[0].author, None);
    }

    #[test]
    fn test_parse_concept_examples_skips_unknown() {
        let csv = "concept,example\nPersona,You are a chef\nMood,happy\nTone,Friendly\n";
        let examples = parse_concept_examples(csv).unwrap();
        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0].concept, Concept::Persona);
        assert_eq!(examples[1].example, "Friendly");
    }

    #[test]
    fn test_roles_first_appearance_order() {
        let prompts = vec![prompt("B", "1"), prompt("A", "2"), prompt("B", "3")];
        assert_eq!(roles(&prompts), vec!["B".to_string(), "A".to_string()]);
    }

    #[test]
    fn test_prompts_for_role() {
        let prompts = vec![prompt("B", "1"), prompt("A", "2"), prompt("B", "3")];
        assert!(prompts_for_role(&prompts, None).is_empty());
        let titles: Vec<&str> = prompts_for_role(&prompts, Some("B"))
            .iter()
            .map(|p| p.title.as_str())
            .collect();
        assert_eq!(titles, vec!["1", "3"]);
        assert!(prompts_for_role(&prompts, Some("C")).is_empty());
    }

    #[test]
    fn test_preview_truncates_long_prompts() {
        let mut long = prompt("A", "t");
        long.prompt = "é".repeat(130);
        let excerpt = preview(&long);
        assert_eq!(excerpt.chars().count(), 121);
        assert!(excerpt.ends_with('…'));

        let mut exact = prompt("A", "t");
        exact.prompt = "x".repeat(120);
        assert_eq!(preview(&exact), exact.prompt);
    }
}
