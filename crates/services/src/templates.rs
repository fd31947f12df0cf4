//! Text handed to users who need to prepare a question file.

use serde_json::json;

use quiz_core::bank::COLUMNS;

/// Minimal CSV showing the expected header and two rows.
pub const CSV_TEMPLATE: &str = "\
id,kategori,pertanyaan,pilihan_a,pilihan_b,pilihan_c,pilihan_d,jawaban
1,Matematika,2+2=?,3,4,5,6,B
2,Sains,\"Planet terdekat dari Matahari adalah...\",Bumi,Mars,Merkurius,Jupiter,C
";

/// Built-in question set for trying the quiz without a file.
pub const SAMPLE_CSV: &str = include_str!("../data/contoh_soal.csv");

/// File name reported for the built-in question set.
pub const SAMPLE_NAME: &str = "contoh_soal.csv";

/// Pretty-printed JSON prompt asking a language model to write a question file.
#[must_use]
pub fn ai_prompt() -> String {
    let prompt = json!({
        "role": "Professional Quiz Creator",
        "task": "Generate a quiz in CSV format",
        "columns": COLUMNS,
        "rules": [
            "'jawaban' column MUST be 'A', 'B', 'C', or 'D'",
            "Use comma (,) as delimiter",
            "Wrap text in double quotes if it contains commas",
            "Language: Indonesian",
            "Topic: [YOUR_TOPIC]",
            "Total Questions: [NUMBER]"
        ],
        "output_format": "Raw CSV content starting with the header ONLY"
    });
    format!("{prompt:#}")
}
