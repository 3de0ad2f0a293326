//! CLI demo walking the three views against the public todo store.
//!
//! Runs the list view, an add flow, and an edit flow end to end, printing
//! list snapshots along the way. Requires network access to
//! `jsonplaceholder.typicode.com`.

use std::time::Duration;

use taskboard_app::{
    AppAction, AppEnvironment, AppReducer, AppState, FormAction, ListAction, Route,
};
use taskboard_client::TodoApi;
use taskboard_runtime::Store;
use tracing_subscriber::EnvFilter;

const BASE_URL: &str = "https://jsonplaceholder.typicode.com";
const WAIT: Duration = Duration::from_secs(15);

type AppStore = Store<AppState, AppAction, AppEnvironment, AppReducer>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Taskboard Demo ===\n");

    let api = TodoApi::new(BASE_URL)?;
    let store = Store::new(AppState::default(), AppReducer::new(), AppEnvironment::new(api));

    // List view
    println!("Loading todos from {BASE_URL}...");
    store
        .send_and_wait_for(
            AppAction::Navigate(Route::List),
            |a| matches!(a, AppAction::List(ListAction::LoadFinished { .. })),
            WAIT,
        )
        .await?;

    print_snapshot(&store).await;

    // Add flow
    println!("\nAdding a todo via {}...", Route::Add);
    store.send(AppAction::Navigate(Route::Add)).await?;
    store
        .send(AppAction::Form(FormAction::TitleChanged(
            "Buy milk".to_string(),
        )))
        .await?;
    store
        .send(AppAction::Form(FormAction::UserIdChanged("1".to_string())))
        .await?;

    let outcome = store
        .send_and_wait_for(
            AppAction::Form(FormAction::Submit),
            |a| {
                matches!(
                    a,
                    AppAction::Form(
                        FormAction::SubmitSucceeded(_) | FormAction::SubmitFailed(_)
                    )
                )
            },
            WAIT,
        )
        .await?;

    match outcome {
        AppAction::Form(FormAction::SubmitSucceeded(todo)) => {
            println!("Created todo {} ({:?})", todo.id, todo.title);
        },
        AppAction::Form(FormAction::SubmitFailed(message)) => {
            println!("Create failed: {message}");
        },
        _ => {},
    }

    print_snapshot(&store).await;

    // Edit flow: toggle the first loaded todo
    if let Some(first) = store.state(|s| s.list.todos.first().cloned()).await {
        println!("\nEditing todo {} via {}...", first.id, Route::Edit(first.id));
        store
            .send(AppAction::Navigate(Route::Edit(first.id)))
            .await?;
        store
            .send(AppAction::Form(FormAction::CompletedChanged(
                !first.completed,
            )))
            .await?;

        let outcome = store
            .send_and_wait_for(
                AppAction::Form(FormAction::Submit),
                |a| {
                    matches!(
                        a,
                        AppAction::Form(
                            FormAction::SubmitSucceeded(_) | FormAction::SubmitFailed(_)
                        )
                    )
                },
                WAIT,
            )
            .await?;

        match outcome {
            AppAction::Form(FormAction::SubmitSucceeded(todo)) => {
                println!("Updated todo {} (completed: {})", todo.id, todo.completed);
            },
            AppAction::Form(FormAction::SubmitFailed(message)) => {
                println!("Update failed: {message}");
            },
            _ => {},
        }

        print_snapshot(&store).await;
    }

    store.shutdown(Duration::from_secs(5)).await?;
    println!("\n=== Demo Complete ===");
    Ok(())
}

async fn print_snapshot(store: &AppStore) {
    let (total, preview, error) = store
        .state(|s| {
            (
                s.list.todos.len(),
                s.list.todos.iter().take(5).cloned().collect::<Vec<_>>(),
                s.list.error.clone(),
            )
        })
        .await;

    if let Some(message) = error {
        println!("List error: {message}");
        return;
    }

    println!("{total} todos loaded; first {}:", preview.len());
    for todo in preview {
        let status = if todo.completed { "x" } else { " " };
        println!("  [{status}] #{:<4} {}", todo.id, todo.title);
    }
}
