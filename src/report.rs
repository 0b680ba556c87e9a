//! Markdown rendering of the check-up for terminal output.

use crate::diagnosis::Diagnosis;
use crate::secrets::SETUP_INSTRUCTIONS;

const HEADER: &str = "# 🌿 My Green Doctor\n\n##### *Your AI-powered plant health assistant*\n\n---\n";

const TIP: &str = "💡 **Tip:** For best results, ensure good lighting and capture the affected areas clearly.";

const FOOTER: &str = "🌿 **My Green Doctor** | Educational Plant Health Tool | Powered by Google Gemini AI";

/// Full report for a completed request, successful or not.
///
/// The model's text is inserted verbatim.
#[must_use]
pub fn render_diagnosis(diagnosis: &Diagnosis) -> String {
    format!(
        "{HEADER}\n## 🩺 Diagnosis Report\n\n{}\n\n---\n{TIP}\n\n---\n{FOOTER}\n",
        diagnosis.text().trim_end()
    )
}

/// Page shown instead of any analysis when the API key is missing.
#[must_use]
pub fn render_setup_required() -> String {
    format!("{HEADER}\n{}\n\n---\n{FOOTER}\n", SETUP_INSTRUCTIONS.trim_end())
}
