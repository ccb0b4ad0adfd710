use crate::corpus::Passage;

/// Renders the generator prompt: instructions, the question, then each passage as `[id] text`.
pub fn build_prompt(query: &str, passages: &[Passage]) -> String {
    let context = passages
        .iter()
        .map(|p| format!("{} {}", p.citation(), p.text()))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "Answer the following question using ONLY the provided context. \
         Include citations in [DOC-ID] format.\n\n\
         Question: {query}\n\n\
         Context:\n{context}\n\n\
         Answer:"
    )
}
