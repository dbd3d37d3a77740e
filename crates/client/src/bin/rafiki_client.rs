use anyhow::Context;
use client::{
    config::ClientSettings, CachedComment, CommentThread, FileStore, HttpRemote, Interactions,
    SessionGate, SubmitOutcome, TokenSession, TracingNotifier,
};
use domain::{thread::reply_count_text, Interaction, Slug};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = ClientSettings::new().context("Failed to load client configuration")?;
    let slug_arg = std::env::args().nth(1).unwrap_or_else(|| "intro".to_string());
    let slug = Slug::new(slug_arg)?;

    let session = Arc::new(TokenSession::new(settings.api.session_token.clone()));
    let remote = Arc::new(HttpRemote::new(
        settings.api.base_url.clone(),
        session.token().map(str::to_string),
    ));
    let notifier = Arc::new(TracingNotifier);
    let store = Arc::new(FileStore::new(&settings.state.dir));

    let thread = CommentThread::new(remote.clone(), session.clone(), notifier.clone());
    let interactions = Interactions::new(store, remote, session.clone(), notifier);

    println!("[1/4] Loading comments for '{}'...", slug);
    thread.load(&slug).await?;
    print_thread(&thread, &slug);

    if !session.is_signed_in() {
        println!("\nNo session token configured, stopping after read-only steps.");
        return Ok(());
    }

    println!("\n[2/4] Posting a comment...");
    match thread
        .submit(&slug, "<p>Hello from the Rafiki client!</p>", None)
        .await
    {
        Ok(SubmitOutcome::Posted) => println!("   -> posted"),
        Ok(other) => println!("   -> not posted: {:?}", other),
        Err(e) => println!("   -> failed: {}", e),
    }
    print_thread(&thread, &slug);

    println!("\n[3/4] Toggling like and bookmark on '{}'...", slug);
    for outcome in [
        interactions.toggle_slug_like(&slug).await,
        interactions.toggle_slug_bookmark(&slug).await,
    ] {
        match outcome {
            Ok(o) => println!("   -> {:?}", o),
            Err(e) => println!("   -> failed: {}", e),
        }
    }
    let like = interactions.state(&Interaction::SlugLike(slug.clone()));
    let bookmark = interactions.state(&Interaction::SlugBookmark(slug.clone()));
    println!(
        "   -> liked={} ({:?}), bookmarked={} ({:?})",
        like.active, like.count, bookmark.active, bookmark.count
    );

    println!("\n[4/4] Liking the first top-level comment...");
    let first = thread.tree(&slug).top_level().iter().find_map(|c| match c {
        CachedComment::Confirmed(view) => Some(view.comment.id),
        CachedComment::Pending(_) => None,
    });
    match first {
        Some(id) => match interactions.toggle_comment_like(id).await {
            Ok(o) => println!("   -> comment {}: {:?}", id, o),
            Err(e) => println!("   -> failed: {}", e),
        },
        None => println!("   -> nothing to like"),
    }

    Ok(())
}

fn print_thread(thread: &CommentThread, slug: &Slug) {
    let tree = thread.tree(slug);
    let nodes = tree.flatten();
    if nodes.is_empty() {
        println!("   -> no comments yet");
        return;
    }
    for node in nodes {
        let indent = "  ".repeat(node.depth);
        let author = match node.item {
            CachedComment::Confirmed(view) => view
                .author
                .name
                .clone()
                .unwrap_or_else(|| view.author.id.to_string()),
            CachedComment::Pending(_) => "(sending)".to_string(),
        };
        println!(
            "   {}- {}: {} [{}]",
            indent,
            author,
            node.item.body(),
            reply_count_text(node.reply_count)
        );
    }
}
