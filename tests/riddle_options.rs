use alphabet_magic::game::riddle::{build_options, normalize_letter, GeneratedRiddle, ALPHABET};
use alphabet_magic::game::{Difficulty, RiddleData};
use rand::rngs::mock::StepRng;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn distractors() -> Vec<String> {
    vec!["Cat".to_string(), "Cup".to_string(), "Car".to_string()]
}

#[test]
fn test_alphabet_has_26_letters() {
    assert_eq!(ALPHABET.len(), 26);
    assert_eq!(ALPHABET[0], 'A');
    assert_eq!(ALPHABET[25], 'Z');
}

#[test]
fn test_normalize_letter() {
    assert_eq!(normalize_letter('q').unwrap(), 'Q');
    assert_eq!(normalize_letter('Z').unwrap(), 'Z');
    assert!(normalize_letter('!').is_err());
    assert!(normalize_letter('é').is_err());
}

#[test]
fn test_options_with_fixed_source_have_exact_order() {
    let options = build_options("Cow", distractors(), &mut StepRng::new(0, 0));

    assert_eq!(options, vec!["Cup", "Car", "Cow", "Cat"]);
}

#[test]
fn test_options_contain_answer_once_plus_distractors() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let mut options = build_options("Cow", distractors(), &mut rng);
        assert_eq!(options.len(), 4);
        assert_eq!(options.iter().filter(|o| *o == "Cow").count(), 1);

        options.sort();
        assert_eq!(options, vec!["Car", "Cat", "Cow", "Cup"]);
    }
}

#[test]
fn test_same_seed_same_order() {
    let a = build_options("Cow", distractors(), &mut StdRng::seed_from_u64(42));
    let b = build_options("Cow", distractors(), &mut StdRng::seed_from_u64(42));

    assert_eq!(a, b);
}

#[test]
fn test_assemble_keeps_question_and_answer() {
    let generated = GeneratedRiddle {
        question: "I say moo. What am I?".to_string(),
        answer: "Cow".to_string(),
        distractors: distractors(),
    };

    let riddle = RiddleData::assemble('C', generated, &mut StepRng::new(0, 0));

    assert_eq!(riddle.letter, 'C');
    assert_eq!(riddle.question, "I say moo. What am I?");
    assert!(riddle.is_answer("Cow"));
    assert!(!riddle.is_answer("Cat"));
    assert_eq!(riddle.options.len(), 4);
}

#[test]
fn test_generated_riddle_from_service_json() {
    let json = r#"{"question": "I hop and say ribbit.", "answer": "Frog", "options": ["Fish", "Fork", "Fan"]}"#;

    let generated: GeneratedRiddle = serde_json::from_str(json).unwrap();

    assert_eq!(generated.answer, "Frog");
    assert_eq!(generated.distractors, vec!["Fish", "Fork", "Fan"]);
}

#[test]
fn test_difficulty_parsing() {
    assert_eq!("Easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
    assert_eq!("hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
    assert!("extreme".parse::<Difficulty>().is_err());
    assert_eq!(Difficulty::Medium.to_string(), "medium");
}
