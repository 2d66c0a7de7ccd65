//! Basic example demonstrating the Cloud Foundry API client.
//!
//! Run with:
//! ```
//! CF_ACCESS_TOKEN=your-token CF_ORGANIZATION_ID=org-guid cargo run --example basic
//! ```

use cfapi::{Buildpack, CfClient, GetSpaceQuotaRequest, List, SpaceAdmin};

#[tokio::main]
async fn main() -> cfapi::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables
    println!("Creating Cloud Foundry client...");
    let client = CfClient::from_env()?;
    println!("Cloud Controller: {}", client.api_url());
    println!("UAA: {}", client.uaa_url());

    // List first page of buildpacks
    println!("\n--- Listing Buildpacks (first page) ---");
    let buildpacks = Buildpack::list_page(&client, &(), 1, 10).await?;
    println!(
        "Found {} buildpacks (total: {})",
        buildpacks.len(),
        buildpacks.total_results
    );

    for buildpack in &buildpacks {
        let entity = &buildpack.entity;
        let state = match (entity.enabled, entity.locked) {
            (Some(false), _) => "disabled",
            (_, Some(true)) => "locked",
            _ => "enabled",
        };
        println!(
            "  {}. {} ({}) - {}",
            entity.position.unwrap_or_default(),
            entity.name,
            buildpack.id(),
            state
        );
    }

    // Space quotas need an organization to look in
    let Ok(organization_id) = std::env::var("CF_ORGANIZATION_ID") else {
        println!("\nSet CF_ORGANIZATION_ID to list space quotas.");
        return Ok(());
    };

    println!("\n--- Space Quotas ---");
    let space_admin = SpaceAdmin::new(client, organization_id);
    let quotas = space_admin.list_quotas().await?;
    println!("Found {} space quotas", quotas.len());

    for quota in &quotas {
        println!(
            "  - {} ({}): memory {:?} MB, routes {:?}, services {:?}",
            quota.name,
            quota.id,
            quota.total_memory_limit,
            quota.total_routes,
            quota.total_service_instances
        );
    }

    // Look one up by name
    if let Some(first) = quotas.first() {
        println!("\n--- Space Quota Lookup ---");
        let request = GetSpaceQuotaRequest::builder().name(&first.name).build()?;
        let quota = space_admin.get(&request).await?;
        println!("  {} paid services allowed: {:?}", quota.name, quota.paid_services_allowed);
    }

    let request = GetSpaceQuotaRequest::builder()
        .name("no-such-quota")
        .build()?;
    match space_admin.get(&request).await {
        Ok(quota) => println!("  Unexpectedly found {}", quota.name),
        Err(e) => println!("  {e}"),
    }

    println!("\nDone!");
    Ok(())
}
