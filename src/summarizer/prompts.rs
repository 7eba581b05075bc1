// src/summarizer/prompts.rs
use crate::screener::models::DocumentKind;

/// Builds the analyst prompt for a document kind with `text` embedded verbatim.
pub fn build_prompt(kind: DocumentKind, text: &str) -> String {
    match kind {
        DocumentKind::Concall => format!(
            "You are a financial analyst. Summarize the key insights from this conference call transcript.\n\
             \n\
             **Analysis should include:**\n\
             - **Recent business developments**\n\
             - **Future projections & company outlook**\n\
             - **Key highlights from the management**\n\
             - **Any financial trends, risks, or opportunities mentioned**\n\
             \n\
             **Transcript:**\n\
             {text}\n"
        ),
        DocumentKind::Presentation => format!(
            "You are a financial analyst. Summarize the key insights from this investor presentation:\n\
             \n\
             {text}\n\
             \n\
             Provide:\n\
             1. Overall business performance summary\n\
             2. Key management commentary and future guidance\n\
             3. Notable financial trends, risks, and opportunities\n"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_embedded_verbatim() {
        let text = "  Line one\n\tLine two with {braces} and **stars**  \n";
        for kind in [DocumentKind::Concall, DocumentKind::Presentation] {
            let prompt = build_prompt(kind, text);
            assert!(prompt.contains(text), "{:?} prompt altered the text", kind);
            assert!(prompt.starts_with("You are a financial analyst."));
        }
    }

    #[test]
    fn prompts_name_the_document() {
        assert!(build_prompt(DocumentKind::Concall, "x").contains("conference call transcript"));
        assert!(build_prompt(DocumentKind::Presentation, "x").contains("investor presentation"));
    }
}
