use std::io::{Cursor, Write};

use no_nonsense_nuance::classify::TextClassifier;
use no_nonsense_nuance::error::{N3Error, PipelineError, Result};
use no_nonsense_nuance::prompt::Answer;
use no_nonsense_nuance::session::{self, Session, FAREWELL};
use no_nonsense_nuance::text_classification::Prediction;
use tempfile::NamedTempFile;

struct Canned(Vec<(&'static str, f32)>);

impl TextClassifier for Canned {
    fn classify(&self, _text: &str) -> Result<Vec<Prediction>> {
        Ok(self
            .0
            .iter()
            .map(|(label, score)| Prediction {
                label: label.to_string(),
                score: *score,
            })
            .collect())
    }
}

fn polarity() -> Result<Canned> {
    Ok(Canned(vec![("NEGATIVE", 0.97), ("POSITIVE", 0.03)]))
}

fn emotions() -> Result<Canned> {
    Ok(Canned(vec![
        ("neutral", 0.893_356_8),
        ("disgust", 0.031_303_98),
        ("anger", 0.022_359_306),
        ("fear", 0.022_121_353),
        ("surprise", 0.020_261_215),
        ("sadness", 0.005_417_15),
        ("joy", 0.005_180_109),
    ]))
}

fn text_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn run_with(
    input: String,
    polarity: impl FnOnce() -> Result<Canned>,
    emotions: impl FnOnce() -> Result<Canned>,
) -> (std::result::Result<Answer, N3Error>, String) {
    let mut output = Vec::new();
    let mut session = Session::new(Cursor::new(input.into_bytes()), &mut output);
    let result = session::run(&mut session, polarity, emotions);
    drop(session);
    (result, String::from_utf8(output).unwrap())
}

#[test]
fn detailed_run_prints_summary_and_breakdown() {
    let file = text_file("words, four total—yes");
    let input = format!("{}\nmaybe\ny\n", file.path().display());

    let (result, out) = run_with(input, polarity, emotions);

    assert_eq!(result.unwrap(), Answer::Detailed);
    assert!(out.contains("Your text is overall negative, with it's top emotional hit being neutral."));
    assert!(out.contains("😐Neutral contributes 89%"));
    assert!(out.contains("😁Joy contributes 1%"));
    assert!(out.trim_end().ends_with(FAREWELL));
}

#[test]
fn declined_run_skips_breakdown() {
    let file = text_file("A calm and ordinary afternoon.");
    let input = format!("{}\n n \n", file.path().display());

    let (result, out) = run_with(input, polarity, emotions);

    assert_eq!(result.unwrap(), Answer::Declined);
    assert!(!out.contains("contributes"));
    assert!(out.contains(FAREWELL));
}

#[test]
fn invalid_file_stops_before_models_load() {
    let (result, out) = run_with(
        "essay.docx\n".to_string(),
        || -> Result<Canned> { panic!("polarity model must not load") },
        || -> Result<Canned> { panic!("emotion model must not load") },
    );

    let err = result.unwrap_err();
    assert!(matches!(err, N3Error::InvalidFileType));
    assert_eq!(err.to_string(), ":( Not a .txt file. Please reload the program.");
    assert!(!out.contains("Your text is overall"));
}

#[test]
fn missing_file_is_reported() {
    let (result, _) = run_with("no-such-file-5d1e.txt\n".to_string(), polarity, emotions);
    assert!(matches!(result, Err(N3Error::FileNotFound)));
}

#[test]
fn long_file_is_reported() {
    let file = text_file(&vec!["word"; 501].join(" "));
    let input = format!("{}\n", file.path().display());

    let (result, _) = run_with(input, polarity, emotions);
    assert!(matches!(result, Err(N3Error::DocumentTooLong { words: 501 })));
}

#[test]
fn model_load_failure_is_an_inference_error() {
    let file = text_file("Short text.");
    let input = format!("{}\n", file.path().display());

    let (result, _) = run_with(
        input,
        || Err(PipelineError::Download("offline".into())),
        emotions,
    );
    assert!(matches!(
        result,
        Err(N3Error::Inference(PipelineError::Download(_)))
    ));
}

#[test]
fn unknown_emotion_surfaces_only_when_details_are_requested() {
    let file = text_file("Short text.");
    let odd = || -> Result<Canned> { Ok(Canned(vec![("boredom", 0.9), ("joy", 0.1)])) };

    let (declined, _) = run_with(format!("{}\nn\n", file.path().display()), polarity, odd);
    assert_eq!(declined.unwrap(), Answer::Declined);

    let (detailed, _) = run_with(format!("{}\ny\n", file.path().display()), polarity, odd);
    assert!(matches!(detailed, Err(N3Error::UnknownEmotionLabel(label)) if label == "boredom"));
}
