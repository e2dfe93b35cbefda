// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
#[allow(dead_code)]
pub fn generate_note(paragraphs: usize) -> Vec<String> {
    const LINES: [&str; 4] = [
        "Patient presents with fever and headache. Prescribed Paracetamol 500mg.",
        "No signs of cough. Assess pain levels regularly! Check vital signs q4h.",
        "This sentence has no keywords or meds. This one also lacks matches?",
        "Needs wound care on left leg. Started Amoxicilin 250 mg yesterday.",
    ];
    (0..paragraphs)
        .map(|i| LINES[i % LINES.len()].to_string())
        .collect()
}
