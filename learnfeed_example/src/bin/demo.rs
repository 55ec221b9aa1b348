use anyhow::Result;
use learnfeed::prelude::*;
use learnfeed_example::{init_logging, Config};
use learnfeed_fixtures::DemoContent;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;
    init_logging(&config);

    tracing::info!("Starting Learnfeed demo");
    tracing::info!(
        page_size = config.feed.effective_page_size(),
        model = %config.challenge.model,
        "Config loaded"
    );

    println!("Learnfeed - Demo");
    println!("================\n");

    // 1. Wire the feed against in-memory sources
    let store = Arc::new(InMemoryCommentStore::new());
    let votes = Arc::new(InMemoryVoteLog::new());
    let recorder = Arc::new(RecordingObserver::new());

    let feed = LearnFeedBuilder::new()
        .comment_source(store.clone())
        .vote_sink(votes.clone())
        .challenge_generator(Arc::new(KeywordChallengeGenerator::with_config(
            config.challenge.clone(),
        )))
        .config(config.feed.clone())
        .observer(recorder.clone())
        .build()?;

    let content = DemoContent::generate();
    content.seed_comments(&store).await;
    content.install(&mut *feed.timeline_mut().await);
    tracing::info!(comments = content.comments.len(), "Seeded demo content");

    println!("1. Loaded demo content");
    for kind in FeedKind::ALL {
        println!("   {}: {} posts", kind, feed.timeline().await.posts(kind).len());
    }
    println!();

    // 2. Page through the busiest discussion
    let Some(first) = content.related.first() else {
        anyhow::bail!("demo content has no related posts");
    };
    tracing::info!(post_id = %first.id(), "Opening discussion");
    println!("2. Opening discussion on \"{}\"", first.summary());
    feed.open_discussion(first.id()).await?;
    let mut pages = 1;
    while feed.load_more(first.id()).await? {
        pages += 1;
    }
    if let Some(post) = feed.post(first.id()).await {
        println!(
            "   {} pages of {}: holding {} of {} comments",
            pages,
            feed.page_size(),
            post.discussions().len(),
            post.comment_count()
        );
    }
    println!();

    // 3. Vote on the challenge
    println!("3. Voting on the challenge...");
    if !feed.vote(first.id(), false).await {
        tracing::warn!(post_id = %first.id(), "Vote was not recorded");
    }
    if let Some(challenge) = feed.post(first.id()).await.and_then(|p| p.ai_challenge().cloned()) {
        println!("   \"{}\"", challenge.text());
        println!(
            "   correct {} / incorrect {} ({} submitted)",
            challenge.correct_votes(),
            challenge.incorrect_votes(),
            votes.len().await
        );
    }
    println!();

    // 4. Submit a new post
    println!("4. Submitting a post...");
    let author = content
        .users
        .first()
        .cloned()
        .unwrap_or_else(|| User::new("demo"));
    let post = feed
        .submit(author.clone(), "今日はPythonのデコレータについて学びました。")
        .await?;
    tracing::info!(post_id = %post.id(), "Submitted post");
    if let Some(challenge) = post.ai_challenge() {
        println!("   Challenge: {}", challenge.text());
    }
    feed.comment(post.id(), author, "補足: functools.wraps を忘れずに").await?;
    feed.assign_server_id(post.id(), "summary-new").await;
    println!();

    // 5. Preload the remaining feed
    let loaded = feed.preload(FeedKind::Related).await;
    println!("5. Preloaded {} related discussions\n", loaded);

    let events = recorder.events().len();
    tracing::info!(events, "Demo finished");
    println!("Observed {} events", events);
    Ok(())
}
