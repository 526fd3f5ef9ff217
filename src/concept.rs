use std::collections::HashMap;

use rand::seq::IndexedRandom;

use crate::models::{Concept, ConceptExample, ConceptPart};

pub(crate) type ConceptValues = HashMap<Concept, String>;

pub(crate) fn default_selection() -> Vec<Concept> {
    vec![
        Concept::Persona,
        Concept::Task,
        Concept::Context,
        Concept::Format,
    ]
}

/// First example of every concept that has one.
pub(crate) fn default_values(examples: &[ConceptExample]) -> ConceptValues {
    let mut values = ConceptValues::new();
    for concept in Concept::ALL {
        if let Some(example) = examples.iter().find(|example| example.concept == concept) {
            values.insert(concept, example.example.clone());
        }
    }
    values
}

/// Removes a selected concept, otherwise appends it.
pub(crate) fn toggle(selected: &mut Vec<Concept>, concept: Concept) {
    if let Some(index) = selected.iter().position(|c| *c == concept) {
        selected.remove(index);
    } else {
        selected.push(concept);
    }
}

pub(crate) fn examples_for(examples: &[ConceptExample], concept: Concept) -> Vec<&str> {
    examples
        .iter()
        .filter(|example| example.concept == concept)
        .map(|example| example.example.as_str())
        .collect()
}

/// Steps through a concept's examples. A custom value starts at the first
/// (forward) or last (backward) example.
pub(crate) fn cycle_example(
    examples: &[ConceptExample],
    concept: Concept,
    current: &str,
    delta: isize,
) -> Option<String> {
    let options = examples_for(examples, concept);
    if options.is_empty() {
        return None;
    }
    let len = options.len() as isize;
    let next = match options.iter().position(|option| *option == current) {
        Some(index) => (index as isize + delta).rem_euclid(len),
        None if delta < 0 => len - 1,
        None => 0,
    };
    Some(options[next as usize].to_string())
}

/// Random example for every selected concept that has any.
pub(crate) fn reroll(
    examples: &[ConceptExample],
    selected: &[Concept],
    values: &mut ConceptValues,
) {
    let mut rng = rand::rng();
    for concept in selected {
        let options = examples_for(examples, *concept);
        if let Some(pick) = options.choose(&mut rng) {
            values.insert(*concept, pick.to_string());
        }
    }
}

pub(crate) fn build_parts(selected: &[Concept], values: &ConceptValues) -> Vec<ConceptPart> {
    Concept::ASSEMBLY
        .into_iter()
        .filter(|concept| selected.contains(concept))
        .map(|concept| {
            let value = values.get(&concept).map(String::as_str).unwrap_or("");
            let text = match concept {
                Concept::Persona => format!("{value}. "),
                Concept::Task => value.to_string(),
                Concept::Context | Concept::Format | Concept::Tone => format!(" {value}"),
                Concept::Example => format!("\n\n{value}"),
            };
            ConceptPart { concept, text }
        })
        .collect()
}

pub(crate) fn build_prompt(selected: &[Concept], values: &ConceptValues) -> String {
    let joined: String = build_parts(selected, values)
        .iter()
        .map(|part| part.text.as_str())
        .collect();
    joined.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example(concept: Concept, text: &str) -> ConceptExample {
        ConceptExample {
            concept,
            example: text.to_string(),
        }
    }

    fn sample() -> Vec<ConceptExample> {
        vec![
            example(Concept::Persona, "You are a chef"),
            example(Concept::Task, "Write a recipe"),
            example(Concept::Persona, "You are a pilot"),
            example(Concept::Tone, "Be playful."),
            example(Concept::Example, "Recipe: toast"),
        ]
    }

    #[test]
    fn test_default_values_first_example() {
        let values = default_values(&sample());
        assert_eq!(values[&Concept::Persona], "You are a chef");
        assert_eq!(values[&Concept::Task], "Write a recipe");
        assert!(!values.contains_key(&Concept::Context));
    }

    #[test]
    fn test_toggle_removes_or_appends() {
        let mut selected = default_selection();
        toggle(&mut selected, Concept::Task);
        assert_eq!(
            selected,
            vec![Concept::Persona, Concept::Context, Concept::Format]
        );
        toggle(&mut selected, Concept::Task);
        assert_eq!(selected.last(), Some(&Concept::Task));
    }

    #[test]
    fn test_build_prompt_assembly_order() {
        let values = default_values(&sample());
        let selected = vec![
            Concept::Example,
            Concept::Tone,
            Concept::Task,
            Concept::Persona,
        ];
        assert_eq!(
            build_prompt(&selected, &values),
            "You are a chef. Write a recipe Be playful.\n\nRecipe: toast"
        );
    }

    #[test]
    fn test_build_parts_keep_decoration_and_missing_values() {
        let values = default_values(&sample());
        let parts = build_parts(&default_selection(), &values);
        let texts: Vec<&str> = parts.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["You are a chef. ", "Write a recipe", " ", " "]);
        assert_eq!(build_prompt(&default_selection(), &values), "You are a chef. Write a recipe");
    }

    #[test]
    fn test_build_prompt_nothing_selected() {
        assert_eq!(build_prompt(&[], &ConceptValues::new()), "");
    }

    #[test]
    fn test_cycle_example_wraps_and_handles_custom() {
        let examples = sample();
        let next = cycle_example(&examples, Concept::Persona, "You are a chef", 1);
        assert_eq!(next.as_deref(), Some("You are a pilot"));
        let wrapped = cycle_example(&examples, Concept::Persona, "You are a pilot", 1);
        assert_eq!(wrapped.as_deref(), Some("You are a chef"));
        let back = cycle_example(&examples, Concept::Persona, "custom text", -1);
        assert_eq!(back.as_deref(), Some("You are a pilot"));
        assert_eq!(cycle_example(&examples, Concept::Format, "", 1), None);
    }

    #[test]
    fn test_reroll_picks_known_examples_for_selected_only() {
        let examples = sample();
        let mut values = ConceptValues::new();
        reroll(&examples, &[Concept::Persona, Concept::Format], &mut values);
        let persona = values[&Concept::Persona].as_str();
        assert!(persona == "You are a chef" || persona == "You are a pilot");
        assert!(!values.contains_key(&Concept::Format));
        assert!(!values.contains_key(&Concept::Task));
    }
}
