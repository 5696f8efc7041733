use crate::infrastructure::services::PromptCacheService;

pub const FIRST_PROMPT: &str =
    "What are the benefits of regular exercise for cardiovascular health?";
pub const SECOND_PROMPT: &str =
    "How does regular exercise contribute to maintaining cardiovascular health?";

pub async fn run() -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    let service = crate::create_prompt_cache_service(&config).await?;

    for line in walkthrough(&service).await? {
        println!("{}", line);
    }

    Ok(())
}

/// Scores the two prompts, then answers both in order
async fn walkthrough(service: &PromptCacheService) -> anyhow::Result<Vec<String>> {
    let report = service.score(FIRST_PROMPT, SECOND_PROMPT);

    let mut lines = vec![
        format!("Prompt 1: {}", FIRST_PROMPT),
        format!("Prompt 2: {}", SECOND_PROMPT),
        format!("Similarity: {:.4}", report.score),
        String::new(),
    ];

    for prompt in [FIRST_PROMPT, SECOND_PROMPT] {
        let outcome = service.complete(prompt).await?;
        lines.push(super::ask::render(&outcome));
    }

    Ok(lines)
}
