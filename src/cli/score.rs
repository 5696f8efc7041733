use crate::domain::{SemanticCacheConfig, SimilarityLookup};

/// Prints the similarity of two prompts
///
/// Needs no store or provider, only the cache settings.
pub async fn run(a: String, b: String) -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    println!("{}", render(&config.cache, &a, &b)?);

    Ok(())
}

fn render(config: &SemanticCacheConfig, a: &str, b: &str) -> anyhow::Result<String> {
    config.validate()?;

    let lookup = SimilarityLookup::new(config);
    let score = lookup.scorer().score(a, b);
    let verdict = if lookup.is_match(score) { "hit" } else { "miss" };

    Ok(format!(
        "Similarity: {:.4} (threshold {}, would {})",
        score,
        lookup.threshold(),
        verdict
    ))
}
