use crate::domain::CompletionOutcome;

/// Answers each prompt in order through the cache
pub async fn run(prompts: Vec<String>) -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    let service = crate::create_prompt_cache_service(&config).await?;

    for prompt in prompts {
        let outcome = service.complete(&prompt).await?;
        println!("{}", render(&outcome));
    }

    Ok(())
}

pub(crate) fn render(outcome: &CompletionOutcome) -> String {
    let source = match (outcome.matched_prompt(), outcome.similarity()) {
        (Some(matched), Some(similarity)) => {
            format!("cache hit ({:.4}) from \"{}\"", similarity, matched)
        }
        _ => "cache miss, answered by provider".to_string(),
    };

    format!("Prompt: {}\n[{}]\n{}\n", outcome.prompt, source, outcome.response)
}
