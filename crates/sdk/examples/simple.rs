//! Simple SDK Example
//!
//! Demonstrates basic usage of the Feature Board SDK.
//!
//! # Usage
//!
//! 1. Start the daemon:
//!    ```bash
//!    cargo run --package featureboard-daemon
//!    ```
//!
//! 2. Run this example:
//!    ```bash
//!    cargo run --example simple
//!    ```

use featureboard_sdk::{code, AddFeatureRequest, AddTaskRequest, FeatureBoardClient};
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Feature Board SDK - Simple Example");
    println!("==================================\n");

    // 1. Connect to daemon
    println!("1. Connecting to daemon...");
    let client = FeatureBoardClient::connect("http://127.0.0.1:8083").await?;
    let status = client.status().await?;
    println!("   ✓ {} (v{})\n", status.status, status.version);

    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    // 2. Create a task
    println!("2. Creating a task...");
    let task = client
        .add_task(AddTaskRequest {
            id: None,
            user_id: alice,
            name: "Plan sprint".to_string(),
            description: "Pick the top voted features".to_string(),
            completed: false,
        })
        .await?;
    println!("   ✓ Task {} created\n", task.id);

    // 3. Propose a feature
    println!("3. Proposing a feature...");
    let feature = client
        .add_feature(AddFeatureRequest {
            id: None,
            user_id: alice,
            name: "Dark mode".to_string(),
            description: "Easier on the eyes".to_string(),
        })
        .await?;
    println!("   ✓ Feature {} created\n", feature.id);

    // 4. Vote
    println!("4. Voting...");
    let vote = client.upvote(bob, feature.id).await?;
    println!("   ✓ Bob voted, {} vote(s)", vote.vote_count);

    match client.upvote(alice, feature.id).await {
        Err(e) if e.rpc_code() == Some(code::SELF_VOTE) => {
            println!("   ✓ Owner vote rejected")
        }
        other => println!("   ⚠ Unexpected: {:?}", other),
    }

    // 5. Clean up
    println!("\n5. Cleaning up...");
    client.delete_task(alice, task.id).await?;
    client.delete_feature(alice, feature.id).await?;
    println!("   ✓ Done");

    Ok(())
}
