use clinote_engine::{AnnotationEngine, Document, EngineConfig};
use pretty_assertions::assert_eq;

fn load_fixture(name: &str) -> Document {
    let text = std::fs::read_to_string(format!(
        "{}/tests/fixtures/{name}.txt",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap();
    Document::from_plain_text(&text)
}

#[test]
fn fixture_ward_round_overlay() {
    let doc = load_fixture("ward_round");
    assert_eq!(doc.root().children().len(), 4);

    let mut engine = AnnotationEngine::new(&EngineConfig::builtin().unwrap(), doc);
    let unmatched: Vec<String> = engine
        .decorations()
        .spans()
        .into_iter()
        .map(|span| engine.document().text_between(span.from, span.to).unwrap())
        .collect();
    assert_eq!(
        unmatched,
        vec![
            "This sentence has no keywords or meds.",
            "This one also lacks matches.",
            "asdf qwert zxcvb.",
        ]
    );
}

#[test]
fn fixture_ward_round_tasks() {
    let config = EngineConfig::builtin().unwrap();
    let engine = AnnotationEngine::new(&config, load_fixture("ward_round"));
    let tasks: Vec<&str> = engine.tasks().iter().collect();
    assert_eq!(
        tasks,
        vec![
            "Check patient temperature regularly.",
            "Administer antipyretics if ordered.",
            "Verify order for Paracetamol (found based on \"Paracetamol 500mg\"). Check dosage.",
            "Assess respiratory status.",
            "Encourage fluid intake.",
            "Administer cough suppressants/expectorants if ordered.",
            "Assess pain level (scale 1-10).",
            "Administer pain medication as prescribed.",
            "Consider non-pharmacological pain relief methods.",
            "Measure BP, HR, RR, Temp, SpO2.",
            "Record vital signs.",
            "Report any abnormal findings.",
            "Assess wound condition.",
            "Perform dressing change using sterile technique.",
            "Document wound assessment and care provided.",
            "Verify medication order (5 Rights).",
            "Prepare and administer medication.",
            "Document administration.",
        ]
    );
}
